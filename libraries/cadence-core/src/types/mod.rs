//! Domain types: tracks, their ids and the library

mod ids;
mod library;
mod track;

pub use ids::TrackId;
pub use library::Library;
pub use track::{Track, TrackRecord};
