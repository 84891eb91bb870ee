//! Domain models for the artist catalog

mod artist;

pub use artist::{Artist, Suggestion};
