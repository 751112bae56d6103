//! Command-line surface.

use crate::color::Palette;
use crate::config::{self, Config};
use crate::range::RangeSet;

/// Run the example commands embedded in documentation files and check
/// that they still print what the documentation claims.
#[derive(clap::Parser, Debug)]
#[command(name = "trysh", version, about)]
pub struct Cli {
    /// Stop at the first failed test
    #[arg(short = '1', long = "first")]
    first: bool,

    /// List the tests found, do not run them
    #[arg(short, long)]
    list: bool,

    /// List the tests found, stamped OK or FAIL after running them
    #[arg(short = 'L', long = "list-run")]
    list_run: bool,

    /// Quiet operation, only the exit code tells the result
    #[arg(short, long)]
    quiet: bool,

    /// Show each command before running it
    #[arg(short, long)]
    verbose: bool,

    /// Run only the tests in RANGE, e.g. 1,3,5-8
    #[arg(short = 'n', long = "number", value_name = "RANGE")]
    number: Option<String>,

    /// Disable ANSI colors in the output
    #[arg(long)]
    no_color: bool,

    /// Prefix required at the start of every test line
    /// (shortcuts: `tab`, `0`, a number of spaces, backslash escapes)
    #[arg(long, value_name = "STRING", default_value = "")]
    prefix: String,

    /// String that marks a command line
    #[arg(long, value_name = "STRING", default_value = config::DEFAULT_PROMPT)]
    prompt: String,

    /// Marker separating a command from its inline expected output
    #[arg(long, value_name = "STRING", default_value = config::DEFAULT_INLINE_PREFIX)]
    inline_prefix: String,

    /// Options for the diff shown on failures
    #[arg(long, value_name = "OPTIONS", default_value = "-u", allow_hyphen_values = true)]
    diff_options: String,

    /// Shell used to execute the commands
    #[arg(long, value_name = "PATH", default_value = "/bin/sh")]
    shell: std::path::PathBuf,

    /// Input files with embedded test sessions
    #[arg(value_name = "FILE", required = true)]
    files: Vec<std::path::PathBuf>,
}

impl Cli {
    pub(crate) fn into_config(self) -> Result<(Config, Vec<std::path::PathBuf>), crate::Error> {
        let range = RangeSet::parse(self.number.as_deref().unwrap_or(""))?;
        let diff_context = config::parse_diff_options(&self.diff_options)?;
        let use_colors = !self.no_color && crate::color::is_colored();
        let config = Config {
            prefix: config::expand_prefix(&self.prefix),
            prompt: self.prompt,
            inline_prefix: self.inline_prefix,
            diff_context,
            range,
            stop_on_first_error: self.first,
            list_mode: self.list,
            list_run: self.list_run,
            verbose: self.verbose,
            quiet: self.quiet,
            use_colors,
            palette: if use_colors {
                Palette::always()
            } else {
                Palette::never()
            },
            shell: self.shell,
        };
        Ok((config, self.files))
    }
}
