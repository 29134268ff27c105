//! Resolves the requested font and looks up glyph indices.

use fontdir::Charset;
use log::{debug, warn};
use smol_str::SmolStr;

use crate::{
    Error,
    host::{FontHost, LogicalFont},
    options::Request,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The face the host picked, not necessarily the one asked for.
    pub face_name: SmolStr,
    pub glyphs: Vec<u16>,
}

/// A screen context with at most one font we created selected into it.
///
/// Dropping it puts back the previous font, deletes ours and releases the context,
/// whichever way the lookup ended.
struct ScreenContext<'h, H: FontHost + ?Sized> {
    host: &'h mut H,
    context: H::Context,
    font: Option<H::Font>,
    previous: Option<Option<H::Font>>,
}

impl<'h, H: FontHost + ?Sized> ScreenContext<'h, H> {
    fn acquire(host: &'h mut H) -> Result<Self, Error> {
        let context = host.acquire_context()?;
        Ok(ScreenContext {
            host,
            context,
            font: None,
            previous: None,
        })
    }

    fn select(&mut self, font: &LogicalFont) -> Result<(), Error> {
        let created = self.host.create_font(font)?;
        self.font = Some(created);
        self.previous = Some(self.host.select_font(self.context, Some(created))?);
        Ok(())
    }
}

impl<H: FontHost + ?Sized> Drop for ScreenContext<'_, H> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            if let Err(e) = self.host.select_font(self.context, previous) {
                warn!("Unable to restore previous font: {e}");
            }
        }
        if let Some(font) = self.font.take() {
            self.host.delete_font(font);
        }
        self.host.release_context(self.context);
    }
}

/// Resolves the font described by `request` and returns the glyph index of each
/// character of `text`.
pub fn resolve<H: FontHost + ?Sized>(
    host: &mut H,
    request: &Request,
    text: &str,
) -> Result<Resolution, Error> {
    let font = LogicalFont::new(
        request.font_name,
        request.bold,
        request.italic,
        Charset::ShiftJis,
    );
    debug!("Resolving {font:?}");

    let mut screen = ScreenContext::acquire(host)?;
    screen.select(&font)?;
    let face_name = screen.host.text_face(screen.context)?;
    let glyphs = screen.host.glyph_indices(screen.context, text)?;
    Ok(Resolution { face_name, glyphs })
}
