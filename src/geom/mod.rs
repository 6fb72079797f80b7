mod centroid;
mod square;

pub use centroid::mean_centroid;
pub use square::{create_square, create_square_from_point};
