//! Text-level helpers shared by the diff engine.

pub mod similarity;
