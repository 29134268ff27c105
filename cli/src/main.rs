mod config;
mod driver;

use std::{
    env,
    ffi::OsString,
    io::{self, BufRead, IsTerminal, Write},
    process::ExitCode,
};

use env_logger::Env;
use glyphids::SystemFontHost;
use log::LevelFilter;

use crate::config::Config;

/// Keeps a console window open until the operator presses Enter.
struct PauseOnExit(bool);

impl Drop for PauseOnExit {
    fn drop(&mut self) {
        if !self.0 || !io::stdin().is_terminal() {
            return;
        }
        let mut stdout = io::stdout();
        if write!(stdout, "Press Enter to continue . . . ")
            .and_then(|()| stdout.flush())
            .is_ok()
        {
            let mut line = String::new();
            let _ = io::stdin().lock().read_line(&mut line);
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .format_timestamp(None)
        .parse_env(Env::new().filter("GLYPHIDS_LOG"))
        .init();

    let config = Config::from_env();
    let _pause = PauseOnExit(config.pause);

    let args: Vec<OsString> = env::args_os().collect();
    let mut host = SystemFontHost::new(config.search_dirs());
    let code = driver::run(
        &args,
        &config,
        &mut host,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    ExitCode::from(code)
}
