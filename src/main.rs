//! cmdshell - CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use cmdshell::cli::demo;

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let app = demo::build_app();
    let code = app.run(&argv);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
