//! Step-by-step visualizations of bubble, insertion, merge and quick sort.
//!
//! The engine lives in [`sorting_algorithms`]: each driver owns its array and
//! either advances one visible step at a time or records the full history of
//! annotated snapshots. [`playback`] paces those frames and [`sorting_graph`]
//! draws them in the terminal.

pub mod array_generator;
#[cfg(feature = "audio")]
pub mod audio;
pub mod config;
pub mod error;
pub mod playback;
pub mod sorting_algorithms;
pub mod sorting_graph;

pub use error::{Error, Result};
