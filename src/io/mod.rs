pub mod html;

pub use html::{GridMap, MapView, write_html_map};
