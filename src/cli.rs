use std::io;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::info;
use s2y_probe::clients::errors::Result;
use s2y_probe::probes::{ConfigBuilder, ProbeOutcome, Prober, Target, Timeouts};

#[derive(Parser)]
#[command(name = "s2y-probe")]
#[command(version, about = "Probe the Spotify-to-YouTube conversion API", long_about = None)]
struct Cli {
    /// Known deployment to probe
    #[arg(long, global = true, value_enum)]
    target: Option<Target>,

    /// API base URL, takes precedence over --target and S2Y_API_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a playlist through /api/playlist
    Playlist {
        /// Spotify playlist URL to convert
        #[arg(long)]
        url: Option<String>,
        /// Request timeout in seconds
        #[arg(long, default_value_t = 120)]
        timeout: u64,
    },
    /// Convert one track, then three tracks, through /api/convert
    Convert {
        #[arg(long, default_value_t = 30)]
        single_timeout: u64,
        #[arg(long, default_value_t = 60)]
        multiple_timeout: u64,
    },
    /// Run every probe with default settings
    All {},
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let builder = ConfigBuilder::new()
        .base_url(cli.base_url)
        .target(cli.target);

    let outcomes = match cli.command {
        Commands::Playlist { url, timeout } => {
            let timeouts = Timeouts {
                playlist: Duration::from_secs(timeout),
                ..Timeouts::default()
            };
            let config = builder.playlist_url(url).timeouts(timeouts).build()?;
            let mut prober = Prober::new(config, io::stdout());
            vec![prober.probe_playlist().await?]
        }
        Commands::Convert {
            single_timeout,
            multiple_timeout,
        } => {
            let timeouts = Timeouts {
                single_track: Duration::from_secs(single_timeout),
                multiple_tracks: Duration::from_secs(multiple_timeout),
                ..Timeouts::default()
            };
            let config = builder
                .fallback(Target::Deployed)
                .timeouts(timeouts)
                .build()?;
            let mut prober = Prober::new(config, io::stdout());
            prober.probe_tracks().await?
        }
        Commands::All {} => {
            let mut prober = Prober::new(builder.build()?, io::stdout());
            let mut outcomes = vec![prober.probe_playlist().await?];
            outcomes.extend(prober.probe_tracks().await?);
            outcomes
        }
    };

    let failed = outcomes
        .iter()
        .filter(|o| **o == ProbeOutcome::Failed)
        .count();
    info!(
        "Probes finished: {} completed, {failed} failed",
        outcomes.len() - failed
    );
    Ok(())
}
