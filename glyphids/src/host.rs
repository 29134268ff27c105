//! The font services we need from the host, modeled on the GDI calls the tool was built around.

use std::path::Path;

use fontdir::Charset;
use smol_str::SmolStr;
use thiserror::Error;

use crate::options::MAX_FONT_NAME;

/// `FW_BOLD`
pub const WEIGHT_BOLD: u16 = 700;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("no fonts are available")]
    NoFaces,
    #[error("no font is selected")]
    NoFontSelected,
    #[error("stale {0} handle")]
    StaleHandle(&'static str),
    #[error("unable to read {face}: {reason}")]
    Unreadable { face: SmolStr, reason: String },
}

/// A request for a font, which the host resolves to a real face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalFont {
    pub face_name: SmolStr,
    /// 0 lets the host pick its default weight.
    pub weight: u16,
    pub italic: bool,
    pub charset: Charset,
}

impl LogicalFont {
    /// Longer face names are cut to what fits the fixed size field.
    pub fn new(face_name: &str, bold: bool, italic: bool, charset: Charset) -> Self {
        let mut units = 0;
        let face_name: String = face_name
            .chars()
            .take_while(|c| {
                units += c.len_utf16();
                units <= MAX_FONT_NAME
            })
            .collect();
        LogicalFont {
            face_name: face_name.into(),
            weight: if bold { WEIGHT_BOLD } else { 0 },
            italic,
            charset,
        }
    }
}

/// Process wide font services.
///
/// Handles are cheap copies; the host owns what they refer to until the matching
/// release call.
pub trait FontHost {
    type Context: Copy;
    type Font: Copy;

    /// Registers a font file for this process only.
    /// Returns the number of faces added, 0 on failure.
    fn add_font_resource(&mut self, path: &Path) -> u32;

    /// A context for the whole screen rather than any one window.
    fn acquire_context(&mut self) -> Result<Self::Context, HostError>;
    fn release_context(&mut self, context: Self::Context);

    fn create_font(&mut self, font: &LogicalFont) -> Result<Self::Font, HostError>;
    fn delete_font(&mut self, font: Self::Font);

    /// Selects `font` into `context`, `None` meaning the stock font.
    /// Returns what was selected before.
    fn select_font(
        &mut self,
        context: Self::Context,
        font: Option<Self::Font>,
    ) -> Result<Option<Self::Font>, HostError>;

    /// Name of the face actually used for the selected font, which may be a substitute.
    fn text_face(&self, context: Self::Context) -> Result<SmolStr, HostError>;

    /// One glyph index per character, [`fontdir::MISSING_GLYPH`] for characters the face lacks.
    fn glyph_indices(&self, context: Self::Context, text: &str) -> Result<Vec<u16>, HostError>;
}
