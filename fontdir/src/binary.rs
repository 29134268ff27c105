//! Memory mapped font files

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use memmap2::Mmap;
use skrifa::{FontRef, MetadataProvider, attribute::Style, raw::FileRef, string::StringId};
use smol_str::SmolStr;

use crate::{
    Error,
    faces::{Charset, FaceInfo},
};

/// Glyph id reported for characters the font does not map.
pub const MISSING_GLYPH: u16 = 0xFFFF;

/// A font file, or font collection, mapped into memory.
pub struct FontBinary {
    path: PathBuf,
    data: Mmap,
}

impl FontBinary {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        // SAFETY: the mapping is read-only and lives no longer than `self`.
        let data = unsafe { Mmap::map(&file) }.map_err(io_error)?;
        Ok(FontBinary {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Number of faces in the file; 1 unless it is a collection.
    pub fn face_count(&self) -> Result<u32, Error> {
        match FileRef::new(&self.data).map_err(|e| Error::parse(&self.path, e))? {
            FileRef::Font(_) => Ok(1),
            FileRef::Collection(collection) => Ok(collection.len()),
        }
    }

    pub fn font(&self, index: u32) -> Result<FontRef<'_>, Error> {
        FontRef::from_index(&self.data, index).map_err(|e| Error::parse(&self.path, e))
    }

    /// Describes every face in the file.
    pub fn faces(&self) -> Result<Vec<FaceInfo>, Error> {
        (0..self.face_count()?)
            .map(|index| self.face_info(index))
            .collect()
    }

    fn face_info(&self, index: u32) -> Result<FaceInfo, Error> {
        let font = self.font(index)?;
        let Some(family_name) = english_name(&font, StringId::FAMILY_NAME) else {
            return Err(Error::parse(
                &self.path,
                format!("face {index} has no family name"),
            ));
        };
        let attributes = font.attributes();
        let charmap = font.charmap();
        let charsets = Charset::ALL
            .into_iter()
            .filter(|charset| {
                charset
                    .sample_chars()
                    .iter()
                    .all(|c| charmap.map(*c).is_some())
            })
            .collect();

        Ok(FaceInfo {
            family_name,
            full_name: english_name(&font, StringId::FULL_NAME),
            weight: attributes.weight.value(),
            italic: !matches!(attributes.style, Style::Normal),
            path: self.path.clone(),
            index,
            charsets,
        })
    }

    /// One glyph id per character of `text`, [`MISSING_GLYPH`] where the cmap has no entry.
    pub fn glyph_ids(&self, index: u32, text: &str) -> Result<Vec<u16>, Error> {
        let font = self.font(index)?;
        let charmap = font.charmap();
        Ok(text
            .chars()
            .map(|c| {
                charmap
                    .map(c)
                    .and_then(|gid| u16::try_from(gid.to_u32()).ok())
                    .unwrap_or(MISSING_GLYPH)
            })
            .collect())
    }
}

fn english_name(font: &FontRef, id: StringId) -> Option<SmolStr> {
    font.localized_strings(id)
        .english_or_first()
        .map(|name| name.to_string().into())
}
