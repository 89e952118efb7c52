//! Thumbnail cue sheets for seek-bar scrub previews.
//!
//! A cue sheet is a small WebVTT dialect where every cue carries the
//! sprite region to show for its time range:
//!
//! ```text
//! WEBVTT
//!
//! 00:00.000 --> 00:05.000
//! x:0,y:0,w:160,h:90
//! ```

pub mod config;
pub mod cue;
pub mod error;
pub mod loader;
pub mod parser;
pub mod scrub;
pub mod serialiser;
pub mod track;

pub use cue::{Cue, CueIndex};
pub use error::LoadError;
pub use loader::{Loader, LoaderConfig, Source};
pub use track::PreviewTrack;
