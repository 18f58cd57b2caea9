// Ember: cascading risk classification for multilingual short text.
//
// This is the library root. Each module corresponds to a major subsystem
// of the classification pipeline.

pub mod batch;
pub mod classify;
pub mod config;
pub mod fallback;
pub mod ingest;
pub mod lexicon;
pub mod output;
