//! # Toynbee CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/toynbee/cli/`, while this
//! file only invokes `cli::run()` and handles process termination. Everything the
//! tool actually does lives in the `toynbee` library; see its crate docs for the
//! layering.
//!
//! ## Exit Codes
//!
//! - `0`: the run completed (individual endpoints may still have failed; those are
//!   reported inline or logged)
//! - `1`: usage errors and every fatal error (no PROJECT given, unknown flag,
//!   template that does not compile, browser that cannot be launched)

use colored::Colorize;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
