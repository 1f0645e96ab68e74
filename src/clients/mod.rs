/// Spotify-to-YouTube conversion API client
pub mod converter;
/// Request and response entities for tracks and playlists
pub mod entities;
/// Error types and result aliases
pub mod errors;

pub use converter::{ApiReply, ConverterClient};
