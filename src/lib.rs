//! Toplist track resolution - shared modules for the library and CLI.
//!
//! Maps an ordered list of noisy (artist, title) pairs to catalog track ids
//! and assembles the resolved ids into a playlist.

pub mod assemble;
pub mod catalog;
pub mod fixture;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod resolver;
pub mod scoring;
