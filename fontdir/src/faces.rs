//! Discovery of installed font faces

use std::{
    env,
    path::{Path, PathBuf},
};

use log::{debug, info};
use smol_str::SmolStr;
use walkdir::WalkDir;

use crate::binary::FontBinary;

/// Character sets a logical font can ask for, named after their Windows charset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Charset {
    Ansi,
    ShiftJis,
}

impl Charset {
    pub const ALL: [Charset; 2] = [Charset::Ansi, Charset::ShiftJis];

    /// Characters a face must map to count as covering the charset.
    pub fn sample_chars(self) -> &'static [char] {
        match self {
            Charset::Ansi => &['A', 'z', '0'],
            Charset::ShiftJis => &['あ', 'ア', '日'],
        }
    }
}

/// What we know about one face of one font file.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceInfo {
    pub family_name: SmolStr,
    pub full_name: Option<SmolStr>,
    pub weight: f32,
    pub italic: bool,
    pub path: PathBuf,
    pub index: u32,
    pub charsets: Vec<Charset>,
}

impl FaceInfo {
    /// Whether the face answers to `name`, by family or full name, ignoring ASCII case.
    pub fn is_named(&self, name: &str) -> bool {
        self.family_name.eq_ignore_ascii_case(name)
            || self
                .full_name
                .as_deref()
                .is_some_and(|full| full.eq_ignore_ascii_case(name))
    }

    pub fn covers(&self, charset: Charset) -> bool {
        self.charsets.contains(&charset)
    }
}

pub fn is_font_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    ["ttf", "otf", "ttc", "otc"]
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

/// Font files anywhere below `dir`, in a stable order.
pub fn font_files(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(e) => {
                debug!("Walk error {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_font_file(e.path()))
        .map(|e| e.into_path())
}

/// Reads every face from every font file below `dirs`. Unreadable files are skipped.
pub fn scan(dirs: &[PathBuf]) -> Vec<FaceInfo> {
    let mut faces = Vec::new();
    let mut files = 0;
    for dir in dirs {
        if !dir.is_dir() {
            debug!("No font directory at {dir:?}");
            continue;
        }
        for path in font_files(dir) {
            match FontBinary::open(&path).and_then(|binary| binary.faces()) {
                Ok(found) => {
                    files += 1;
                    faces.extend(found);
                }
                Err(e) => debug!("Skipping {e}"),
            }
        }
    }
    info!("{} faces in {files} font files", faces.len());
    faces
}

/// Where the platform keeps installed fonts.
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if cfg!(target_os = "windows") {
        let windir = env::var_os("WINDIR").unwrap_or_else(|| r"C:\Windows".into());
        dirs.push(PathBuf::from(windir).join("Fonts"));
        if let Some(local) = env::var_os("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join(r"Microsoft\Windows\Fonts"));
        }
    } else if cfg!(target_os = "macos") {
        dirs.push("/System/Library/Fonts".into());
        dirs.push("/Library/Fonts".into());
        if let Some(home) = env::var_os("HOME") {
            dirs.push(PathBuf::from(home).join("Library/Fonts"));
        }
    } else {
        dirs.push("/usr/share/fonts".into());
        dirs.push("/usr/local/share/fonts".into());
        match env::var_os("XDG_DATA_HOME") {
            Some(data) => dirs.push(PathBuf::from(data).join("fonts")),
            None => {
                if let Some(home) = env::var_os("HOME") {
                    dirs.push(PathBuf::from(&home).join(".local/share/fonts"));
                }
            }
        }
        if let Some(home) = env::var_os("HOME") {
            dirs.push(PathBuf::from(home).join(".fonts"));
        }
    }
    dirs
}
