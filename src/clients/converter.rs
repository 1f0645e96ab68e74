use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{
    entities::{ConvertResponse, PlaylistResponse, TrackDescriptor},
    errors::{Error, Result},
};

pub const PLAYLIST_PATH: &str = "/api/playlist";
pub const CONVERT_PATH: &str = "/api/convert";

#[derive(Serialize, Debug)]
struct PlaylistRequest<'a> {
    url: &'a str,
}

#[derive(Serialize, Debug)]
struct ConvertRequest<'a> {
    tracks: &'a [TrackDescriptor],
}

/// A decoded 200 response together with the status it arrived with.
#[derive(Debug)]
pub struct ApiReply<T> {
    pub status: StatusCode,
    pub payload: T,
}

pub struct ConverterClient {
    http: Client,
    base_url: String,
}

impl ConverterClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::ConfigurationError(
                "API base URL must not be empty".into(),
            ));
        }
        // Every probe is a single independent request, keep no idle connections around
        let http = Client::builder().pool_max_idle_per_host(0).build()?;
        Ok(ConverterClient { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Resolve a single Spotify playlist into playlist metadata and per-track matches
    pub async fn convert_playlist(
        &self,
        playlist_url: &str,
        timeout: Duration,
    ) -> Result<ApiReply<PlaylistResponse>> {
        let body = PlaylistRequest { url: playlist_url };
        self.post_json(PLAYLIST_PATH, &body, timeout).await
    }

    // Look up each track descriptor; results come back in request order
    pub async fn convert_tracks(
        &self,
        tracks: &[TrackDescriptor],
        timeout: Duration,
    ) -> Result<ApiReply<ConvertResponse>> {
        let body = ConvertRequest { tracks };
        self.post_json(CONVERT_PATH, &body, timeout).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, timeout: Duration) -> Result<ApiReply<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {url} (timeout {timeout:?})");

        let response = self
            .http
            .post(&url)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Error::from_transport(e, timeout))?;

        let status = response.status();
        // The body read is still bounded by the request timeout
        let text = response
            .text()
            .await
            .map_err(|e| Error::from_transport(e, timeout))?;
        debug!("{url} answered {status} with {} bytes", text.len());

        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        // Syntax errors and shape errors are reported differently
        let value: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(source) => return Err(Error::MalformedJson { source, body: text }),
        };
        match serde_json::from_value(value) {
            Ok(payload) => Ok(ApiReply { status, payload }),
            Err(source) => Err(Error::UnexpectedPayload { source, body: text }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_track_payload_matches_wire_format() {
        let tracks = [TrackDescriptor::new("Honeythief", ["Halou"])];
        let body = serde_json::to_string(&ConvertRequest { tracks: &tracks }).unwrap();
        assert_eq!(
            body,
            r#"{"tracks":[{"title":"Honeythief","artists":["Halou"]}]}"#
        );
    }

    #[test]
    fn playlist_payload_carries_only_the_url() {
        let body = serde_json::to_value(PlaylistRequest {
            url: "https://open.spotify.com/playlist/abc",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "url": "https://open.spotify.com/playlist/abc" })
        );
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ConverterClient::new("http://localhost:5000/").unwrap();
        assert_eq!(
            client.endpoint(CONVERT_PATH),
            "http://localhost:5000/api/convert"
        );
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(matches!(
            ConverterClient::new("/"),
            Err(Error::ConfigurationError(_))
        ));
    }
}
