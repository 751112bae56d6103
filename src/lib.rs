//! ## Doctest for shell sessions
//!
//! `trysh` re-runs the commands embedded in documentation-style text files
//! and checks that they still print what the file claims, taking
//! inspiration from [cram](https://bitheap.org/cram/) and
//! [trycmd](https://crates.io/crates/trycmd).
//!
//! An input file looks like a terminal session:
//!
//! ```text
//! The greeting is stable:
//!
//! $ echo hello
//! hello
//! $ echo hello | wc -c  #→ 6
//! ```
//!
//! Every `$ ` line is executed through a real shell with stdout and stderr
//! merged; the lines that follow (until a lone `$`, the next command, or
//! the end of the file) are the expected output. Expected output can also
//! sit on the command line itself after the `#→ ` marker, either as
//! literal text or with a matcher:
//!
//! ```text
//! $ date  #→ --regex ^[A-Z][a-z][a-z]
//! $ cat big.log  #→ --file expected-log.txt
//! ```
//!
//! Tests inside indented documentation use `--prefix`; tests with another
//! prompt use `--prompt`. Run `trysh --help` for the full surface.
//!
//! The exit code tells the result: 0 all tests passed, 1 at least one
//! failed, 2 the runner could not do its job (bad flags, unreadable
//! files, bad regex, ...).

mod cli;
mod color;
mod command;
mod compare;
mod config;
mod diff;
mod error;
mod lines;
mod macros;
mod range;
mod runner;
mod schema;

pub use cli::Cli;
pub use error::Error;

/// Run a fully parsed invocation and return the process exit code.
pub fn run(cli: Cli) -> Result<i32, Error> {
    let (config, files) = cli.into_config()?;
    crate::debug!("{config:#?}");
    runner::Runner::new(&config).run(&files)
}
