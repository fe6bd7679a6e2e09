//! Pipeline stages for a batch render.
//!
//! Each submodule implements exactly one step of the batch.
//!
//! ## Data Flow
//!
//! ```text
//! manifest ──▶ input ──▶ render
//! (lines)      (abs path, is-file)   (one subprocess per path)
//! ```
//!
//! 1. [`manifest`] — read the manifest and strip each entry
//! 2. [`input`]    — normalise entries to absolute paths and check that each
//!    names an existing regular file
//! 3. [`render`]   — build the fixed renderer command line and run it,
//!    capturing exit status and output

pub mod input;
pub mod manifest;
pub mod render;
