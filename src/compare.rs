//! Mode-dispatched comparison of captured output against a block's
//! expectation.

use crate::config::Config;
use crate::schema::{Expectation, TestBlock};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Pass,
    /// The rendered diff shown in the failure report.
    Fail(String),
}

impl Verdict {
    pub(crate) fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Decide pass/fail for one block.
///
/// Only the captured bytes matter; the command's exit status never does.
/// A bad regex or an unreadable reference file is an operator error, not
/// a test failure.
pub(crate) fn compare(
    block: &TestBlock,
    captured: &[u8],
    config: &Config,
) -> Result<Verdict, crate::Error> {
    match &block.expected {
        Expectation::Text(line) => {
            // A single line of expected text always gains its final `\n`,
            // so `printf foo` does not satisfy an inline `foo`.
            let mut expected = line.clone();
            expected.push('\n');
            Ok(byte_compare(expected.as_bytes(), captured, config))
        }
        Expectation::Output(text) => Ok(byte_compare(text.as_bytes(), captured, config)),
        Expectation::File(path) => {
            let expected = std::fs::read(path).map_err(|e| {
                format!(
                    "cannot read file {} (at {}:{}): {}",
                    path.display(),
                    block.source_file.display(),
                    block.source_line,
                    e
                )
            })?;
            Ok(byte_compare(&expected, captured, config))
        }
        Expectation::Regex(pattern) => {
            let re = regex::Regex::new(pattern).map_err(|e| {
                format!(
                    "invalid regex at {}:{}: {}",
                    block.source_file.display(),
                    block.source_line,
                    e
                )
            })?;
            let text = String::from_utf8_lossy(captured);
            if text.lines().any(|line| re.is_match(line)) {
                Ok(Verdict::Pass)
            } else {
                // Show the pattern itself as the expected side.
                let expected = format!("{pattern}\n");
                Ok(Verdict::Fail(crate::diff::render_unified(
                    &expected,
                    &text,
                    config.diff_context,
                )))
            }
        }
    }
}

fn byte_compare(expected: &[u8], captured: &[u8], config: &Config) -> Verdict {
    if expected == captured {
        Verdict::Pass
    } else {
        Verdict::Fail(crate::diff::render_unified(
            &String::from_utf8_lossy(expected),
            &String::from_utf8_lossy(captured),
            config.diff_context,
        ))
    }
}
