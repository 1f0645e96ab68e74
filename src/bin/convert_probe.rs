//! Convert one track, then three tracks, against the deployed API.
use std::io;

use s2y_probe::probes::{ConfigBuilder, Prober, Target};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ConfigBuilder::new()
        .target(Some(Target::Deployed))
        .build()?;
    let mut prober = Prober::new(config, io::stdout());
    prober.probe_tracks().await?;

    Ok(())
}
