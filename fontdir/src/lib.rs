//! Finds font files and reads what we need from them: names, style, charset coverage
//! and cmap lookups.

pub mod binary;
mod error;
pub mod faces;

pub use crate::binary::{FontBinary, MISSING_GLYPH};
pub use crate::error::Error;
pub use crate::faces::{Charset, FaceInfo};
