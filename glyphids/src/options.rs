//! Command line switches, parsed the way the classic Windows tool did: flags may be
//! grouped behind one `-`, value flags take the following argument.
//!
//! The input file may be any path the platform accepts. Font names and font lists
//! must be valid Unicode.

use std::{ffi::OsStr, path::Path};

use crate::Error;

/// Longest face name that fits the 32 unit `lfFaceName` field, terminator included.
pub const MAX_FONT_NAME: usize = 31;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Options<'a> {
    pub bold: bool,
    pub italic: bool,
    pub is_range: bool,
    pub font_name: Option<&'a str>,
    pub text_file: Option<&'a Path>,
}

/// Validated options: everything needed to open the input and resolve the font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<'a> {
    pub bold: bool,
    pub italic: bool,
    pub is_range: bool,
    pub font_name: &'a str,
    pub text_file: &'a Path,
}

/// Parses `args`, skipping the program name at index 0.
///
/// `on_font_list` is called with the value of every `-l` as soon as it is seen.
/// On failure the error carries the index of the offending argument.
pub fn parse<'a, S: AsRef<OsStr>>(
    args: &'a [S],
    mut on_font_list: impl FnMut(&'a str),
) -> Result<Options<'a>, Error> {
    let mut opts = Options::default();
    let mut index = 1;
    while index < args.len() {
        let arg = args[index].as_ref();
        // Value flags consume arguments after this one
        let mut next = index;
        if let Some(flags) = arg.as_encoded_bytes().strip_prefix(b"-") {
            // Bytes that are not Unicode decode to U+FFFD, which is no flag
            for flag in String::from_utf8_lossy(flags).chars() {
                match flag {
                    'b' => opts.bold = !opts.bold,
                    'i' => opts.italic = !opts.italic,
                    'r' => opts.is_range = !opts.is_range,
                    'f' | 'l' => {
                        next += 1;
                        let value = args.get(next).and_then(|v| v.as_ref().to_str());
                        let Some(value) = value else {
                            return Err(Error::InvalidArgument { index });
                        };
                        if flag == 'f' {
                            opts.font_name = Some(value);
                        } else {
                            on_font_list(value);
                        }
                    }
                    _ => return Err(Error::InvalidArgument { index }),
                }
            }
        } else {
            opts.text_file = Some(Path::new(arg));
        }
        index = next + 1;
    }
    Ok(opts)
}

impl<'a> Options<'a> {
    pub fn validate(&self) -> Result<Request<'a>, Error> {
        let (Some(font_name), Some(text_file)) = (self.font_name, self.text_file) else {
            return Err(Error::MissingFontOrFile);
        };
        let len = font_name.encode_utf16().count();
        if len > MAX_FONT_NAME {
            return Err(Error::FontNameTooLong {
                len,
                max: MAX_FONT_NAME,
            });
        }
        Ok(Request {
            bold: self.bold,
            italic: self.italic,
            is_range: self.is_range,
            font_name,
            text_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_quiet<'a>(args: &'a [&'a str]) -> Result<Options<'a>, Error> {
        parse(args, |list| panic!("unexpected font list {list}"))
    }

    fn invalid_at(result: Result<Options, Error>) -> usize {
        match result {
            Err(Error::InvalidArgument { index }) => index,
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn plain_font_and_file() {
        let opts = parse_quiet(&["glyphids", "-f", "Arial", "input.txt"]).unwrap();
        assert_eq!(
            Options {
                font_name: Some("Arial"),
                text_file: Some(Path::new("input.txt")),
                ..Default::default()
            },
            opts
        );
    }

    #[test]
    fn grouped_style_flags() {
        let opts = parse_quiet(&["glyphids", "-bi", "-f", "MS Gothic", "input.txt"]).unwrap();
        assert!(opts.bold);
        assert!(opts.italic);
        assert!(!opts.is_range);
        assert_eq!(Some("MS Gothic"), opts.font_name);
    }

    #[test]
    fn repeated_flags_toggle() {
        let opts = parse_quiet(&["glyphids", "-bb", "-i", "-ri", "-r", "-r"]).unwrap();
        assert!(!opts.bold);
        assert!(!opts.italic);
        assert!(opts.is_range);
    }

    #[test]
    fn unknown_flag_reports_its_index() {
        assert_eq!(1, invalid_at(parse_quiet(&["glyphids", "-z", "-f", "Arial", "in.txt"])));
        assert_eq!(3, invalid_at(parse_quiet(&["glyphids", "-f", "Arial", "-bx", "in.txt"])));
    }

    #[test]
    fn value_flag_without_value() {
        assert_eq!(2, invalid_at(parse_quiet(&["glyphids", "in.txt", "-f"])));
        assert_eq!(1, invalid_at(parse(&["glyphids", "-l"], |_| ())));
    }

    #[test]
    fn grouped_value_flags_consume_successive_arguments() {
        let mut lists = Vec::new();
        let opts = parse(&["glyphids", "-lf", "a.ttf,b.ttf", "Arial", "in.txt"], |l| {
            lists.push(l)
        })
        .unwrap();
        assert_eq!(vec!["a.ttf,b.ttf"], lists);
        assert_eq!(Some("Arial"), opts.font_name);
        assert_eq!(Some(Path::new("in.txt")), opts.text_file);
    }

    #[test]
    fn font_lists_are_reported_before_a_later_error() {
        let mut lists = Vec::new();
        let result = parse(&["glyphids", "-l", "a.ttf", "-l", "b.ttf", "-q"], |l| {
            lists.push(l)
        });
        assert_eq!(5, invalid_at(result));
        assert_eq!(vec!["a.ttf", "b.ttf"], lists);
    }

    #[test]
    fn last_positional_wins_and_lone_dash_is_ignored() {
        let opts = parse_quiet(&["glyphids", "first.txt", "-", "second.txt"]).unwrap();
        assert_eq!(Some(Path::new("second.txt")), opts.text_file);
        assert_eq!(None, opts.font_name);
    }

    #[cfg(unix)]
    #[test]
    fn input_path_need_not_be_unicode() {
        use std::os::unix::ffi::OsStrExt;

        let file = OsStr::from_bytes(b"caf\xe9.txt");
        let args = [
            OsStr::new("glyphids"),
            OsStr::new("-f"),
            OsStr::new("Arial"),
            file,
        ];
        let request = parse(&args, |_| ()).unwrap().validate().unwrap();
        assert_eq!(Path::new(file), request.text_file);
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_flags_and_values_are_invalid() {
        use std::os::unix::ffi::OsStrExt;

        let bad = OsStr::from_bytes(b"\xff");
        let args = [
            OsStr::new("glyphids"),
            OsStr::new("-f"),
            bad,
            OsStr::new("in.txt"),
        ];
        assert_eq!(1, invalid_at(parse(&args, |_| ())));

        let args = [OsStr::new("glyphids"), OsStr::from_bytes(b"-b\xff")];
        assert_eq!(1, invalid_at(parse(&args, |_| ())));
    }

    #[test]
    fn validate_requires_font_and_file() {
        let opts = parse_quiet(&["glyphids", "-f", "Arial"]).unwrap();
        assert!(matches!(opts.validate(), Err(Error::MissingFontOrFile)));
        let opts = parse_quiet(&["glyphids", "in.txt"]).unwrap();
        assert!(matches!(opts.validate(), Err(Error::MissingFontOrFile)));
    }

    #[test]
    fn validate_font_name_length() {
        let longest = "x".repeat(MAX_FONT_NAME);
        let too_long = "x".repeat(MAX_FONT_NAME + 1);

        let args = ["glyphids", "-f", longest.as_str(), "in.txt"];
        let request = parse_quiet(&args).unwrap().validate().unwrap();
        assert_eq!(longest, request.font_name);

        let args = ["glyphids", "-f", too_long.as_str(), "in.txt"];
        let err = parse_quiet(&args).unwrap().validate().unwrap_err();
        assert!(matches!(err, Error::FontNameTooLong { len: 32, max: 31 }));
        assert_eq!(4, err.exit_code());
    }

    #[test]
    fn font_name_length_counts_utf16_units() {
        // 16 astral characters are 32 UTF-16 units
        let name = "𝐀".repeat(16);
        let args = ["glyphids", "-f", name.as_str(), "in.txt"];
        let err = parse_quiet(&args).unwrap().validate().unwrap_err();
        assert!(matches!(err, Error::FontNameTooLong { len: 32, .. }));
    }
}
