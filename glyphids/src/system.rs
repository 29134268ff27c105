//! A portable [`FontHost`] that reads font files itself instead of asking the OS.

use std::path::{Path, PathBuf};

use fontdir::{FaceInfo, FontBinary, faces};
use log::{debug, info, warn};
use smol_str::SmolStr;

use crate::host::{FontHost, HostError, LogicalFont};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContextId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FontId(usize);

struct Realized {
    face: FaceInfo,
    binary: FontBinary,
}

#[derive(Default)]
struct ContextState {
    font: Option<FontId>,
    realized: Option<Realized>,
}

/// Font host backed by the font files in a set of directories plus privately registered files.
///
/// Directories are scanned on first use, so registering private fonts stays cheap.
pub struct SystemFontHost {
    font_dirs: Vec<PathBuf>,
    installed: Option<Vec<FaceInfo>>,
    private: Vec<FaceInfo>,
    // Handles index these tables. Freed slots are left as `None` and never reused,
    // so a stale handle cannot alias a newer object.
    fonts: Vec<Option<LogicalFont>>,
    contexts: Vec<Option<ContextState>>,
}

impl SystemFontHost {
    pub fn new(font_dirs: Vec<PathBuf>) -> Self {
        SystemFontHost {
            font_dirs,
            installed: None,
            private: Vec::new(),
            fonts: Vec::new(),
            contexts: Vec::new(),
        }
    }

    fn context(&self, context: ContextId) -> Result<&ContextState, HostError> {
        self.contexts
            .get(context.0)
            .and_then(Option::as_ref)
            .ok_or(HostError::StaleHandle("context"))
    }

    /// Picks the face to use for `font`, searching private registrations first.
    fn realize(&mut self, font: &LogicalFont) -> Result<FaceInfo, HostError> {
        if self.installed.is_none() {
            self.installed = Some(faces::scan(&self.font_dirs));
        }
        let known: Vec<&FaceInfo> = self
            .private
            .iter()
            .chain(self.installed.iter().flatten())
            .collect();
        let face = match_face(&known, font).ok_or(HostError::NoFaces)?;
        if !face.is_named(&font.face_name) {
            info!("{} substituted for {}", face.family_name, font.face_name);
        }
        debug!("Realized {:?} as {:?} #{}", font.face_name, face.path, face.index);
        Ok(face.clone())
    }
}

/// Lower is better. Slant matters more than weight; weight 0 asks for regular.
fn unwantedness(face: &FaceInfo, font: &LogicalFont) -> u32 {
    let mut score = 0;
    if face.italic != font.italic {
        score += 1000;
    }
    let wanted = match font.weight {
        0 => 400.0,
        w => f32::from(w),
    };
    score + (face.weight - wanted).abs() as u32
}

/// Chooses among faces named like the request, else those covering its charset, else all of them.
pub(crate) fn match_face<'f>(faces: &[&'f FaceInfo], font: &LogicalFont) -> Option<&'f FaceInfo> {
    let named: Vec<&FaceInfo> = faces
        .iter()
        .copied()
        .filter(|face| face.is_named(&font.face_name))
        .collect();
    let candidates = if !named.is_empty() {
        named
    } else {
        let covering: Vec<&FaceInfo> = faces
            .iter()
            .copied()
            .filter(|face| face.covers(font.charset))
            .collect();
        if covering.is_empty() {
            faces.to_vec()
        } else {
            covering
        }
    };
    candidates.into_iter().reduce(|acc, e| {
        if unwantedness(acc, font) <= unwantedness(e, font) {
            acc
        } else {
            e
        }
    })
}

impl FontHost for SystemFontHost {
    type Context = ContextId;
    type Font = FontId;

    fn add_font_resource(&mut self, path: &Path) -> u32 {
        match FontBinary::open(path).and_then(|binary| binary.faces()) {
            Ok(faces) => {
                let added = faces.len() as u32;
                self.private.extend(faces);
                added
            }
            Err(e) => {
                debug!("Not registered: {e}");
                0
            }
        }
    }

    fn acquire_context(&mut self) -> Result<ContextId, HostError> {
        self.contexts.push(Some(ContextState::default()));
        Ok(ContextId(self.contexts.len() - 1))
    }

    fn release_context(&mut self, context: ContextId) {
        match self.contexts.get_mut(context.0) {
            Some(state) if state.is_some() => *state = None,
            _ => warn!("Release of unknown {context:?}"),
        }
    }

    fn create_font(&mut self, font: &LogicalFont) -> Result<FontId, HostError> {
        self.fonts.push(Some(font.clone()));
        Ok(FontId(self.fonts.len() - 1))
    }

    fn delete_font(&mut self, font: FontId) {
        match self.fonts.get_mut(font.0) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => warn!("Delete of unknown {font:?}"),
        }
    }

    fn select_font(
        &mut self,
        context: ContextId,
        font: Option<FontId>,
    ) -> Result<Option<FontId>, HostError> {
        self.context(context)?;
        let realized = match font {
            Some(id) => {
                let logical = self
                    .fonts
                    .get(id.0)
                    .and_then(Option::as_ref)
                    .ok_or(HostError::StaleHandle("font"))?
                    .clone();
                let face = self.realize(&logical)?;
                let binary =
                    FontBinary::open(&face.path).map_err(|e| HostError::Unreadable {
                        face: face.family_name.clone(),
                        reason: e.to_string(),
                    })?;
                Some(Realized { face, binary })
            }
            None => None,
        };
        let Some(Some(state)) = self.contexts.get_mut(context.0) else {
            return Err(HostError::StaleHandle("context"));
        };
        state.realized = realized;
        Ok(std::mem::replace(&mut state.font, font))
    }

    fn text_face(&self, context: ContextId) -> Result<SmolStr, HostError> {
        let realized = self
            .context(context)?
            .realized
            .as_ref()
            .ok_or(HostError::NoFontSelected)?;
        Ok(realized.face.family_name.clone())
    }

    fn glyph_indices(&self, context: ContextId, text: &str) -> Result<Vec<u16>, HostError> {
        let realized = self
            .context(context)?
            .realized
            .as_ref()
            .ok_or(HostError::NoFontSelected)?;
        realized
            .binary
            .glyph_ids(realized.face.index, text)
            .map_err(|e| HostError::Unreadable {
                face: realized.face.family_name.clone(),
                reason: e.to_string(),
            })
    }
}
