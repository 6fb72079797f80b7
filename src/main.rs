use era5_gridcells::{PipelineConfig, run};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = PipelineConfig::default();
    let summary = run(&config)?;

    info!(
        cells = summary.cells,
        lat = summary.view.center.lat,
        lon = summary.view.center.lon,
        output = %config.output_path.display(),
        "Done"
    );
    Ok(())
}
