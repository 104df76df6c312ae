//! YouTube transcript extractor.
//!
//! Fetches the caption track of a video and writes it to a local text or JSON
//! file, resolving clashes with existing files according to a
//! [`ConflictPolicy`](conflict::ConflictPolicy).

pub mod app;
pub mod captions;
pub mod cli;
pub mod config;
pub mod conflict;
pub mod error;
pub mod sanitize;
pub mod transcript;
pub mod video_id;
pub mod youtube;
