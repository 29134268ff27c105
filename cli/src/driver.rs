use std::{
    borrow::Cow,
    ffi::OsString,
    fs::File,
    io::{self, Write},
};

use glyphids::{Error, FontHost, loader, options, resolver, text};
use itertools::Itertools;
use log::debug;

use crate::config::Config;

fn usage(program: &str, err: &mut impl Write) -> io::Result<()> {
    writeln!(
        err,
        "\nglyphids v{} - Retrieves the glyph ids associated with text.",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(
        err,
        "Usage: {program} [-bir] [-l font_file...] -f font_name text_file"
    )?;
    writeln!(err, "  -b  Selects the bold font face.")?;
    writeln!(err, "  -i  Selects the italic font face.")?;
    writeln!(err, "  -r  The input file specifies ranges and not text.")?;
    writeln!(
        err,
        "  -l font_file[,...]  Loads a comma separated list of fonts."
    )?;
    writeln!(err, "  -f font_name  Selects the name of the font to use.")?;
    writeln!(
        err,
        "  text_file  Specifies the UTF-8 encoded text file to read."
    )
}

fn arg(args: &[OsString], index: usize) -> Option<Cow<'_, str>> {
    args.get(index).map(|a| a.to_string_lossy())
}

fn report(args: &[OsString], e: &Error, err: &mut impl Write) -> io::Result<()> {
    match e {
        Error::NoArguments => {}
        Error::InvalidArgument { index } => writeln!(
            err,
            "Invalid parameter specified in '{}'.",
            arg(args, *index).unwrap_or_default()
        )?,
        e => writeln!(err, "{e}")?,
    }
    if e.wants_usage() {
        usage(&arg(args, 0).unwrap_or("glyphids".into()), err)?;
    }
    Ok(())
}

fn execute<H: FontHost + ?Sized>(
    args: &[OsString],
    config: &Config,
    host: &mut H,
    out: &mut impl Write,
) -> Result<(), Error> {
    if args.len() < 2 {
        return Err(Error::NoArguments);
    }

    let mut written = Ok(());
    let opts = options::parse(args, |fonts_list| {
        let loaded = loader::load_fonts(host, fonts_list);
        if written.is_ok() {
            written = writeln!(out, "{loaded} fonts loaded.");
        }
    });
    let request = opts?.validate()?;
    written?;

    writeln!(out, "Specified options:")?;
    writeln!(
        out,
        "  Font: '{}' [{}{}]",
        request.font_name,
        if request.bold { "Bold" } else { "Regular" },
        if request.italic { " Italic" } else { "" }
    )?;
    writeln!(
        out,
        "  Input file: '{}'{}",
        request.text_file.display(),
        if request.is_range { " (range)" } else { "" }
    )?;

    let path = request.text_file;
    let input = File::open(path).map_err(|source| Error::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let text = text::query_text(config.text_source, input, path, request.is_range)?;
    debug!("Query text {text:?}");

    let resolution = resolver::resolve(host, &request, &text)?;
    writeln!(out, "Selected text face: {}", resolution.face_name)?;
    writeln!(
        out,
        "Glyph ids: {}",
        resolution.glyphs.iter().map(|gid| format!("{gid:04x}")).join(" ")
    )?;
    Ok(())
}

/// Runs the tool and returns the process exit code.
pub fn run<H: FontHost + ?Sized>(
    args: &[OsString],
    config: &Config,
    host: &mut H,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8 {
    match execute(args, config, host, out) {
        Ok(()) => 0,
        Err(e) => match report(args, &e, err) {
            Ok(()) => e.exit_code(),
            Err(io) => Error::from(io).exit_code(),
        },
    }
}
