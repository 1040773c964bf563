//! # Toynbee Architecture
//!
//! Toynbee answers one question: *which commit is every production endpoint of my
//! app running right now?* For each application name it walks a fixed table of
//! deployment targets, pulls a JSON status document from each and prints one
//! templated line per target. Alternatively it opens every target in the browser.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, installs logging, maps exit codes      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Inspection Layer (inspect.rs)                              │
//! │  - app × endpoint loop, per-pair error isolation            │
//! │  - Generic over Fetcher, Opener and the output writer       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Building Blocks                                            │
//! │  - endpoints.rs: URL pattern table                          │
//! │  - fetch.rs: blocking HTTP GET                              │
//! │  - render.rs: compiled template + fault-isolated execution  │
//! │  - tabwriter.rs: column alignment on flush                  │
//! │  - browser.rs: OS specific URL launcher                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Isolation
//!
//! One bad endpoint must never hide the others. Only a handful of errors end a run
//! (no application names, a template that does not compile, a browser that cannot be
//! launched); everything else is reported where it happened and the loop moves on.
//! See [`inspect`] for the details.
//!
//! ## Testing Strategy
//!
//! - **Building blocks**: unit tests next to the code. Rendering is tested against
//!   in-memory writers, fetching against a throw-away local HTTP listener.
//! - **Inspection**: recording `Fetcher` / `Opener` doubles count exactly what the
//!   loop asked for, with no network and no processes.
//! - **CLI**: `assert_cmd` tests in `tests/` for exit codes and help output.
//!
//! ## Module Overview
//!
//! - [`endpoints`]: Endpoint descriptors and the built-in table
//! - [`fetch`]: The `Fetcher` trait and its HTTP implementation
//! - [`render`]: Template compilation and execution
//! - [`tabwriter`]: Column-aligned output writer
//! - [`browser`]: The `Opener` trait and the system browser launcher
//! - [`inspect`]: The batch loop
//! - [`error`]: Error types
//! - `cli`: Argument parsing and process wiring for the binary (not part of the lib API)

pub mod browser;
pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod inspect;
pub mod render;
pub mod tabwriter;
