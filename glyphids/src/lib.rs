//! Looks up the glyph indices a font assigns to some text, after resolving the font
//! the way a Windows GDI program would.

mod error;
pub mod host;
pub mod loader;
pub mod options;
pub mod resolver;
pub mod system;
pub mod text;

pub use crate::error::Error;
pub use crate::host::{FontHost, HostError};
pub use crate::system::SystemFontHost;
pub use fontdir::MISSING_GLYPH;
