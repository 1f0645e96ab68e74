use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// The API sends `null` and omits keys interchangeably, treat both as the default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Title plus artist names, the lookup key sent to `/api/convert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<String>,
}

impl TrackDescriptor {
    pub fn new<I, S>(title: impl Into<String>, artists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TrackDescriptor {
            title: title.into(),
            artists: artists.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of a single track lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    Matched {
        youtube_id: String,
        youtube_title: Option<String>,
    },
    Failed {
        error: String,
    },
}

// Wire shape: one loose record where `success` decides which fields are set
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ConversionRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    artists: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    success: bool,
    youtube_id: Option<String>,
    youtube_title: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ConversionRecord")]
pub struct ConversionResult {
    pub title: String,
    pub artists: Vec<String>,
    pub conversion: Conversion,
}

impl From<ConversionRecord> for ConversionResult {
    fn from(r: ConversionRecord) -> ConversionResult {
        let conversion = if r.success {
            Conversion::Matched {
                youtube_id: r.youtube_id.unwrap_or_default(),
                youtube_title: r.youtube_title,
            }
        } else {
            Conversion::Failed {
                error: r.error.unwrap_or_default(),
            }
        };
        ConversionResult {
            title: r.title,
            artists: r.artists,
            conversion,
        }
    }
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.conversion, Conversion::Matched { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Summary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub successful: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub failed: u32,
}

/// Body of a 200 response from `/api/convert`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertResponse {
    pub summary: Option<Summary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ConversionResult>,
}

/// A way the response disagrees with the documented API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    SummaryArithmetic {
        total: u32,
        successful: u32,
        failed: u32,
    },
    SummaryTotalMismatch {
        total: u32,
        results: usize,
    },
    MissingYoutubeId {
        position: usize,
    },
    MissingError {
        position: usize,
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::SummaryArithmetic {
                total,
                successful,
                failed,
            } => write!(
                f,
                "summary does not add up: {successful} successful + {failed} failed != {total} total"
            ),
            ContractViolation::SummaryTotalMismatch { total, results } => write!(
                f,
                "summary reports {total} tracks but {results} results were returned"
            ),
            ContractViolation::MissingYoutubeId { position } => {
                write!(f, "result {position} succeeded without a YouTube id")
            }
            ContractViolation::MissingError { position } => {
                write!(f, "result {position} failed without an error message")
            }
        }
    }
}

impl ConvertResponse {
    /// Positions in the returned violations are 1-based, as printed in reports.
    pub fn contract_violations(&self) -> Vec<ContractViolation> {
        let mut violations = Vec::new();

        if let Some(summary) = self.summary {
            if u64::from(summary.successful) + u64::from(summary.failed) != u64::from(summary.total)
            {
                violations.push(ContractViolation::SummaryArithmetic {
                    total: summary.total,
                    successful: summary.successful,
                    failed: summary.failed,
                });
            }
            if summary.total as usize != self.results.len() {
                violations.push(ContractViolation::SummaryTotalMismatch {
                    total: summary.total,
                    results: self.results.len(),
                });
            }
        }

        for (i, result) in self.results.iter().enumerate() {
            let position = i + 1;
            match &result.conversion {
                Conversion::Matched { youtube_id, .. } if youtube_id.is_empty() => {
                    violations.push(ContractViolation::MissingYoutubeId { position });
                }
                Conversion::Failed { error } if error.is_empty() => {
                    violations.push(ContractViolation::MissingError { position });
                }
                _ => {}
            }
        }

        violations
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistTrack {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<String>,
    pub youtube_id: Option<String>,
    pub album_art: Option<String>,
}

/// Whether a playlist track got its own album art or fell back to the playlist cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtStatus {
    SameAsPlaylistCover,
    Unique,
    Missing,
}

impl PlaylistTrack {
    pub fn art_status(&self, cover_image_url: Option<&str>) -> ArtStatus {
        match self.album_art.as_deref() {
            None => ArtStatus::Missing,
            Some(art) if Some(art) == cover_image_url => ArtStatus::SameAsPlaylistCover,
            Some(_) => ArtStatus::Unique,
        }
    }
}

/// Body of a 200 response from `/api/playlist`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub playlist: PlaylistInfo,
    pub results: Option<Vec<PlaylistTrack>>,
}
