use std::io::{self, Write};

use log::warn;

use crate::clients::{
    ApiReply,
    entities::{ArtStatus, Conversion, ConversionResult, ConvertResponse, PlaylistResponse},
    errors::Error,
};

const MISSING: &str = "n/a";

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

fn artists_line(artists: &[String]) -> String {
    if artists.is_empty() {
        "Unknown artist".to_string()
    } else {
        artists.join(", ")
    }
}

pub fn render_playlist(
    out: &mut impl Write,
    reply: &ApiReply<PlaylistResponse>,
) -> io::Result<()> {
    writeln!(out, "📡 Status: {}\n", reply.status.as_u16())?;

    let playlist = &reply.payload.playlist;
    let cover = playlist.cover_image_url.as_deref();
    writeln!(out, "📋 Playlist: {}", or_missing(playlist.name.as_deref()))?;
    writeln!(out, "👤 Owner: {}", or_missing(playlist.owner_name.as_deref()))?;
    writeln!(out, "🖼️ Cover: {}\n", or_missing(cover))?;

    let Some(results) = &reply.payload.results else {
        return Ok(());
    };

    writeln!(out, "🎵 Tracks:")?;
    for (i, track) in results.iter().enumerate() {
        writeln!(out, "\n{}. {}", i + 1, track.title)?;
        writeln!(out, "   Artists: {}", track.artists.join(", "))?;
        writeln!(out, "   YouTube: {}", or_missing(track.youtube_id.as_deref()))?;
        writeln!(out, "   Album Art: {}", or_missing(track.album_art.as_deref()))?;
        match track.art_status(cover) {
            ArtStatus::SameAsPlaylistCover => writeln!(out, "   ⚠️  SAME AS PLAYLIST COVER")?,
            ArtStatus::Unique => writeln!(out, "   ✅ UNIQUE ALBUM ART")?,
            ArtStatus::Missing => writeln!(out, "   ❔ NO ALBUM ART")?,
        }
    }
    Ok(())
}

fn render_result(
    out: &mut impl Write,
    position: usize,
    result: &ConversionResult,
) -> io::Result<()> {
    let artists = artists_line(&result.artists);
    match &result.conversion {
        Conversion::Matched {
            youtube_id,
            youtube_title,
        } => {
            writeln!(out, "{position}. ✅ {} - {artists}", result.title)?;
            writeln!(out, "   YouTube ID: {youtube_id}")?;
            writeln!(out, "   YouTube Title: {}", or_missing(youtube_title.as_deref()))?;
            if !youtube_id.is_empty() {
                writeln!(out, "   🔗 https://www.youtube.com/watch?v={youtube_id}")?;
            }
        }
        Conversion::Failed { error } => {
            writeln!(out, "{position}. ❌ {} - {artists}", result.title)?;
            writeln!(out, "   Error: {error}")?;
        }
    }
    Ok(())
}

pub fn render_conversion(
    out: &mut impl Write,
    reply: &ApiReply<ConvertResponse>,
) -> io::Result<()> {
    writeln!(out, "📡 Status: {}\n", reply.status.as_u16())?;

    let response = &reply.payload;
    if let Some(summary) = response.summary {
        writeln!(out, "📊 Summary:")?;
        writeln!(out, "   Total: {}", summary.total)?;
        writeln!(out, "   Successful: {}", summary.successful)?;
        writeln!(out, "   Failed: {}\n", summary.failed)?;
    }

    writeln!(out, "🎵 Results:")?;
    for (i, result) in response.results.iter().enumerate() {
        render_result(out, i + 1, result)?;
    }

    let violations = response.contract_violations();
    if !violations.is_empty() {
        writeln!(out)?;
        for violation in violations {
            warn!("Conversion response violates the API contract: {violation}");
            writeln!(out, "⚠️  Contract: {violation}")?;
        }
    }
    Ok(())
}

pub fn render_failure(out: &mut impl Write, err: &Error) -> io::Result<()> {
    match err {
        Error::Timeout(timeout) => {
            writeln!(out, "⏰ Request timed out after {}s", timeout.as_secs_f64())
        }
        Error::RequestError(e) => writeln!(out, "❌ Request failed: {e}"),
        Error::UnexpectedStatus { status, body } => {
            writeln!(out, "📡 Status: {status}")?;
            writeln!(out, "❌ Error response:\n{body}")
        }
        Error::MalformedJson { source, body } => {
            writeln!(out, "❌ Response is not valid JSON: {source}")?;
            writeln!(out, "Raw response:\n{body}")
        }
        Error::UnexpectedPayload { source, body } => {
            writeln!(out, "❌ Unexpected response shape: {source}")?;
            writeln!(out, "Raw response:\n{body}")
        }
        Error::ConfigurationError(_) | Error::OutputError(_) => writeln!(out, "❌ {err}"),
    }
}
