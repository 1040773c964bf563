//! # CLI Behavior
//!
//! This is the only client of the `toynbee` library and the only place that knows
//! about terminal I/O, logging setup and exit codes.
//!
//! ## Flow
//!
//! 1. Parse arguments (`setup`). `--help` and `--version` print to stdout and
//!    exit 0; any parse error exits 1.
//! 2. Install the stderr log subscriber.
//! 3. Reject an empty PROJECT list before anything touches the network.
//! 4. Compile the template. A syntax error ends the run here, so a typo never
//!    costs a dozen requests.
//! 5. Run the inspection against the built-in endpoint table, writing the report
//!    to stdout through a `TabWriter`.
//!
//! ## Module Structure
//!
//! - `commands`: Wiring of parsed arguments into the library
//! - `setup`: Argument parsing via clap, help text, version string

mod commands;
pub mod setup;

pub use commands::run;
