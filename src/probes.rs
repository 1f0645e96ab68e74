use std::io::Write;
use std::time::Duration;

use log::{debug, info, warn};

use crate::clients::{
    ConverterClient,
    converter::PLAYLIST_PATH,
    entities::TrackDescriptor,
    errors::{Error, Result},
};
use crate::report;

/// Environment variable that overrides the default API base URL.
pub const API_URL_ENV: &str = "S2Y_API_URL";

pub const DEFAULT_PLAYLIST_URL: &str =
    "https://open.spotify.com/playlist/5CpXDyvoA25wURjqF61qgv?si=5e08e0a3e49a4ea2";

/// Known deployments of the conversion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Target {
    Local,
    Deployed,
}

impl Target {
    pub fn base_url(self) -> &'static str {
        match self {
            Target::Local => "http://localhost:5000",
            Target::Deployed => "https://spotify-youtube-api.vercel.app",
        }
    }
}

/// Per-request time limits, sized to the server-side lookup cost of each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub playlist: Duration,
    pub single_track: Duration,
    pub multiple_tracks: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            playlist: Duration::from_secs(120),
            single_track: Duration::from_secs(30),
            multiple_tracks: Duration::from_secs(60),
        }
    }
}

pub fn single_track_request() -> Vec<TrackDescriptor> {
    vec![TrackDescriptor::new("Honeythief", ["Halou"])]
}

pub fn multiple_tracks_request() -> Vec<TrackDescriptor> {
    vec![
        TrackDescriptor::new("Honeythief", ["Halou"]),
        TrackDescriptor::new("Blinding Lights", ["The Weeknd"]),
        TrackDescriptor::new("Get Lucky", ["Daft Punk", "Pharrell Williams"]),
    ]
}

// Configuration for the Prober struct
pub struct Config {
    pub client: ConverterClient,
    pub timeouts: Timeouts,
    pub playlist_url: String,
}

pub struct ConfigBuilder {
    base_url: Option<String>,
    target: Option<Target>,
    fallback: Target,
    timeouts: Option<Timeouts>,
    playlist_url: Option<String>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            target: None,
            // Used when neither a URL, a target nor the env variable is set
            fallback: Target::Local,
            timeouts: None,
            playlist_url: None,
        }
    }

    #[must_use]
    pub fn base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn target(mut self, target: Option<Target>) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn fallback(mut self, fallback: Target) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = Some(timeouts);
        self
    }

    #[must_use]
    pub fn playlist_url(mut self, playlist_url: Option<String>) -> Self {
        self.playlist_url = playlist_url;
        self
    }

    fn resolve_base_url(&self) -> Result<String> {
        if let Some(url) = &self.base_url {
            return Ok(url.clone());
        }
        if let Some(target) = self.target {
            return Ok(target.base_url().to_string());
        }
        match std::env::var(API_URL_ENV) {
            Ok(url) => {
                debug!("Using API base URL from {API_URL_ENV}");
                Ok(url)
            }
            Err(std::env::VarError::NotPresent) => Ok(self.fallback.base_url().to_string()),
            Err(e) => Err(Error::from(e)),
        }
    }

    pub fn build(self) -> Result<Config> {
        let client = ConverterClient::new(self.resolve_base_url()?)?;
        Ok(Config {
            client,
            timeouts: self.timeouts.unwrap_or_default(),
            playlist_url: self
                .playlist_url
                .unwrap_or_else(|| DEFAULT_PLAYLIST_URL.to_string()),
        })
    }
}

/// How a single probe ended. Failures are reported, never propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Completed,
    Failed,
}

// Runs the probes against the configured API and writes the report to `out`
pub struct Prober<W: Write> {
    config: Config,
    out: W,
}

impl<W: Write> Prober<W> {
    pub fn new(config: Config, out: W) -> Self {
        Prober { config, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn failed(&mut self, probe: &str, err: &Error) -> Result<ProbeOutcome> {
        warn!("{probe} probe failed: {err}");
        report::render_failure(&mut self.out, err)?;
        Ok(ProbeOutcome::Failed)
    }

    pub async fn probe_playlist(&mut self) -> Result<ProbeOutcome> {
        let url = self.config.client.endpoint(PLAYLIST_PATH);
        info!("Probing {url} ...");
        writeln!(self.out, "🔍 Testing {url} endpoint...")?;

        let reply = self
            .config
            .client
            .convert_playlist(&self.config.playlist_url, self.config.timeouts.playlist)
            .await;
        match reply {
            Ok(reply) => {
                report::render_playlist(&mut self.out, &reply)?;
                Ok(ProbeOutcome::Completed)
            }
            Err(e) => self.failed("Playlist", &e),
        }
    }

    async fn probe_conversion(
        &mut self,
        name: &str,
        tracks: &[TrackDescriptor],
        timeout: Duration,
    ) -> Result<ProbeOutcome> {
        info!("Probing {name} conversion with {} tracks ...", tracks.len());
        writeln!(self.out, "🎵 Testing {name} conversion...")?;

        match self.config.client.convert_tracks(tracks, timeout).await {
            Ok(reply) => {
                report::render_conversion(&mut self.out, &reply)?;
                Ok(ProbeOutcome::Completed)
            }
            Err(e) => self.failed(name, &e),
        }
    }

    pub async fn probe_single_track(&mut self) -> Result<ProbeOutcome> {
        let timeout = self.config.timeouts.single_track;
        self.probe_conversion("single track", &single_track_request(), timeout)
            .await
    }

    pub async fn probe_multiple_tracks(&mut self) -> Result<ProbeOutcome> {
        let timeout = self.config.timeouts.multiple_tracks;
        self.probe_conversion("multiple tracks", &multiple_tracks_request(), timeout)
            .await
    }

    // Single then multiple, strictly in sequence; a failed first probe does not skip the second
    pub async fn probe_tracks(&mut self) -> Result<Vec<ProbeOutcome>> {
        let single = self.probe_single_track().await?;
        writeln!(self.out, "\n{}\n", "=".repeat(50))?;
        let multiple = self.probe_multiple_tracks().await?;
        Ok(vec![single, multiple])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_url_wins_over_target() {
        let config = ConfigBuilder::new()
            .base_url(Some("http://127.0.0.1:9999/".into()))
            .target(Some(Target::Deployed))
            .build()
            .unwrap();
        assert_eq!(config.client.base_url(), "http://127.0.0.1:9999");
    }

    #[test]
    fn target_selects_known_deployment() {
        let config = ConfigBuilder::new()
            .target(Some(Target::Deployed))
            .build()
            .unwrap();
        assert_eq!(
            config.client.base_url(),
            "https://spotify-youtube-api.vercel.app"
        );
        assert_eq!(config.playlist_url, DEFAULT_PLAYLIST_URL);
        assert_eq!(config.timeouts, Timeouts::default());
    }

    #[test]
    fn default_timeouts_match_expected_lookup_cost() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.playlist, Duration::from_secs(120));
        assert_eq!(timeouts.single_track, Duration::from_secs(30));
        assert_eq!(timeouts.multiple_tracks, Duration::from_secs(60));
    }

    #[test]
    fn canned_requests() {
        assert_eq!(
            single_track_request(),
            vec![TrackDescriptor::new("Honeythief", ["Halou"])]
        );
        assert_eq!(multiple_tracks_request().len(), 3);
    }
}
