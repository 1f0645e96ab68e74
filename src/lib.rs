//! s2y-probe - Manual probes for the Spotify-to-YouTube conversion API
//!
//! This library sends playlist and track conversion requests to a running
//! instance of the API and prints the answers for a human to inspect.

/// Client modules for talking to the conversion API
pub mod clients;
/// Probe configuration and the probe routines themselves
pub mod probes;
/// Console rendering of responses and failures
pub mod report;
