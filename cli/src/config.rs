//! Settings that are not command line switches, read from `GLYPHIDS_*` environment variables.

use std::{env, ffi::OsString, path::PathBuf};

use glyphids::text::TextSource;
use log::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Wait for Enter before exiting, when attached to a terminal.
    pub pause: bool,
    pub text_source: TextSource,
    /// Searched before the system font directories.
    pub font_dirs: Vec<PathBuf>,
    pub system_fonts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pause: true,
            text_source: TextSource::Sample,
            font_dirs: Vec::new(),
            system_fonts: true,
        }
    }
}

fn flag(name: &str, value: Option<OsString>, default: bool) -> bool {
    let Some(value) = value else {
        return default;
    };
    match value.to_string_lossy().to_ascii_lowercase().as_str() {
        "0" | "false" | "no" | "off" => false,
        "1" | "true" | "yes" | "on" => true,
        other => {
            warn!("Ignoring {name}={other:?}, expected a boolean");
            default
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var_os(name))
    }

    fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Self {
        let defaults = Config::default();
        let text_source = match var("GLYPHIDS_TEXT") {
            None => defaults.text_source,
            Some(v) if v.eq_ignore_ascii_case("sample") => TextSource::Sample,
            Some(v) if v.eq_ignore_ascii_case("file") => TextSource::File,
            Some(v) => {
                warn!("Ignoring GLYPHIDS_TEXT={v:?}, expected sample or file");
                defaults.text_source
            }
        };
        Config {
            pause: flag("GLYPHIDS_PAUSE", var("GLYPHIDS_PAUSE"), defaults.pause),
            text_source,
            font_dirs: var("GLYPHIDS_FONT_DIRS")
                .map(|dirs| {
                    env::split_paths(&dirs)
                        .filter(|d| !d.as_os_str().is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            system_fonts: flag(
                "GLYPHIDS_SYSTEM_FONTS",
                var("GLYPHIDS_SYSTEM_FONTS"),
                defaults.system_fonts,
            ),
        }
    }

    /// Every directory the font host should scan, in search order.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.font_dirs.clone();
        if self.system_fonts {
            dirs.extend(fontdir::faces::system_font_dirs());
        }
        dirs
    }
}
