//! DocFinder: find doctors near a resolved location.
//!
//! The pipeline resolves a search origin (explicit coordinates, city
//! geocoding, or IP inference), runs a bounded-radius nearby search,
//! attaches haversine distances, and renders a fixed textual listing.
//! The same pipeline backs the CLI, the HTTP server, and the
//! find_doctors tool boundary.

pub mod agent;
pub mod config;
pub mod distance;
pub mod format;
pub mod location;
pub mod places;
pub mod server;
pub mod tool;
