//! Send the sample playlist to a local API instance and print what comes back.
use std::io;

use s2y_probe::probes::{ConfigBuilder, Prober, Target};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ConfigBuilder::new().target(Some(Target::Local)).build()?;
    let mut prober = Prober::new(config, io::stdout());
    prober.probe_playlist().await?;

    Ok(())
}
