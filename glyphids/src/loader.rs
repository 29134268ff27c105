//! Registration of private font files from a `-l` list.

use std::path::Path;

use log::{debug, info};

use crate::host::FontHost;

/// Longest path accepted in a font list, in UTF-16 units.
pub const MAX_FONT_PATH: usize = 1023;

/// Registers every font file in the comma separated `fonts_list` with `host`.
///
/// Empty and over-long entries are skipped. Returns the number of faces the host
/// added; a file that fails to register adds nothing and does not stop the rest.
pub fn load_fonts<H: FontHost + ?Sized>(host: &mut H, fonts_list: &str) -> u32 {
    let mut loaded = 0;
    for path in fonts_list.split(',') {
        if path.is_empty() {
            continue;
        }
        if path.encode_utf16().count() > MAX_FONT_PATH {
            debug!("Skipping font path longer than {MAX_FONT_PATH} characters");
            continue;
        }
        let added = host.add_font_resource(Path::new(path));
        info!("{path}: {added} faces registered");
        loaded += added;
    }
    loaded
}
