//! The orchestrator: drives the input files in order, numbers every test,
//! runs what the range allows, and turns the counters into a report and an
//! exit code.

use crate::compare::{self, Verdict};
use crate::config::Config;
use crate::schema::SessionFile;

pub(crate) struct Runner<'c> {
    config: &'c Config,
}

#[derive(Clone, Copy, Debug, Default)]
struct Counters {
    /// Blocks that passed the range filter.
    tests: usize,
    failures: usize,
}

struct FileReport {
    path: std::path::PathBuf,
    counters: Counters,
}

impl<'c> Runner<'c> {
    pub(crate) fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Run every file and return the process exit code: 0 all passed,
    /// 1 some test failed. Operator errors come back as `Err`.
    pub(crate) fn run(&self, files: &[std::path::PathBuf]) -> Result<i32, crate::Error> {
        // Scratch space for the run; removed on every exit path when the
        // guard drops. Owner-only permissions.
        let workspace = tempfile::tempdir()
            .map_err(|e| format!("cannot create temporary work directory: {e}"))?;
        let invoked_from = std::env::current_dir()
            .map_err(|e| format!("cannot determine current directory: {e}"))?;

        let multi = files.len() > 1;
        let mut total = Counters::default();
        let mut reports = Vec::new();
        let mut ordinal = 0;
        for (index, path) in files.iter().enumerate() {
            if multi && self.visible() {
                println!(
                    "{}",
                    self.config
                        .palette
                        .warn(format_args!("Testing file {}", path.display()))
                );
            }

            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read input file {}: {}", path.display(), e))?;
            let clean = crate::lines::normalize_lines(&raw);
            let scratch = workspace.path().join(format!("{}.clean", index + 1));
            std::fs::write(&scratch, &clean)
                .map_err(|e| format!("cannot write {}: {}", scratch.display(), e))?;

            let session = SessionFile::parse(&clean, path, self.config)?;
            if session.blocks.is_empty() && !self.config.range.is_active() {
                return Err(format!("no test found in input file {}", path.display()).into());
            }

            let mut counters = Counters::default();
            for block in &session.blocks {
                ordinal += 1;
                if !self.config.range.matches(ordinal) {
                    continue;
                }
                counters.tests += 1;
                total.tests += 1;

                if self.config.list_mode {
                    self.list_line(ordinal, &block.cmd, None);
                    continue;
                }
                if self.config.verbose && !self.config.list_run && self.visible() {
                    println!(
                        "{}",
                        self.config
                            .palette
                            .hint(format_args!("{}{}", self.config.prompt, block.cmd))
                    );
                }

                let capture =
                    crate::command::run_shell(&self.config.shell, &block.cmd, &invoked_from)?;
                let verdict = compare::compare(block, &capture.output, self.config)?;
                if self.config.list_run {
                    self.list_line(ordinal, &block.cmd, Some(verdict.is_pass()));
                }
                if let Verdict::Fail(diff) = verdict {
                    counters.failures += 1;
                    total.failures += 1;
                    if !self.config.list_run && self.visible() {
                        self.report_failure(ordinal, &block.cmd, &diff);
                    }
                    if self.config.stop_on_first_error {
                        return Ok(1);
                    }
                }
            }
            reports.push(FileReport {
                path: path.clone(),
                counters,
            });
        }

        if self.config.range.is_active() && total.tests == 0 {
            return Err("no test found for the specified number or range".into());
        }

        if self.visible() && !self.config.list_mode && !self.config.list_run {
            self.summary(&reports, total, multi);
        }
        Ok(if total.failures > 0 { 1 } else { 0 })
    }

    fn visible(&self) -> bool {
        !self.config.quiet
    }

    fn list_line(&self, ordinal: usize, cmd: &str, status: Option<bool>) {
        match status {
            None => println!("{ordinal}\t{cmd}"),
            Some(ok) if self.config.use_colors => {
                let line = format!("{ordinal}\t{cmd}");
                if ok {
                    println!("{}", self.config.palette.info(line));
                } else {
                    println!("{}", self.config.palette.error(line));
                }
            }
            Some(ok) => {
                let stamp = if ok { "OK" } else { "FAIL" };
                println!("{ordinal}\t{stamp}\t{cmd}");
            }
        }
    }

    fn report_failure(&self, ordinal: usize, cmd: &str, diff: &str) {
        let palette = self.config.palette;
        let separator = "-".repeat(separator_width());
        println!("{}", palette.error(&separator));
        println!("{}", palette.error(format_args!("[FAILED #{ordinal}] {cmd}")));
        print!("{}", palette.error(diff));
        println!("{}", palette.error(&separator));
    }

    fn summary(&self, reports: &[FileReport], total: Counters, multi: bool) {
        let palette = self.config.palette;
        if multi {
            let separator = "-".repeat(separator_width());
            println!("{separator}");
            for report in reports {
                println!(
                    "{:>4} ok, {:>4} fail  {}",
                    report.counters.tests - report.counters.failures,
                    report.counters.failures,
                    report.path.display()
                );
            }
            println!("{separator}");
        }
        let line = summary_line(total.tests, total.failures);
        if total.failures == 0 {
            println!("{}", palette.info(line));
        } else {
            println!("{}", palette.error(line));
        }
    }
}

/// Width of the separator lines: the terminal's if known, 50 otherwise.
fn separator_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|n: &usize| *n > 0)
        .unwrap_or(50)
}

fn summary_line(tests: usize, failures: usize) -> String {
    if failures == 0 {
        match tests {
            1 => "OK! The single test has passed.".to_owned(),
            n if n < 50 => format!("OK! All {n} tests have passed."),
            n if n < 100 => format!("YOU WIN! All {n} tests have passed."),
            n => format!("YOU WIN! PERFECT! All {n} tests have passed."),
        }
    } else if failures == tests {
        match tests {
            1 => "FAIL: The single test has failed.".to_owned(),
            n if n < 50 => format!("COMPLETE FAIL! All {n} tests have failed."),
            n => format!("EPIC FAIL! All {n} tests have failed."),
        }
    } else {
        format!("FAIL: {failures} of {tests} tests have failed.")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn summary_thresholds() {
        assert_eq!(summary_line(1, 0), "OK! The single test has passed.");
        assert_eq!(summary_line(49, 0), "OK! All 49 tests have passed.");
        assert_eq!(summary_line(50, 0), "YOU WIN! All 50 tests have passed.");
        assert_eq!(summary_line(99, 0), "YOU WIN! All 99 tests have passed.");
        assert_eq!(
            summary_line(100, 0),
            "YOU WIN! PERFECT! All 100 tests have passed."
        );
    }

    #[test]
    fn summary_failures() {
        assert_eq!(summary_line(1, 1), "FAIL: The single test has failed.");
        assert_eq!(summary_line(3, 1), "FAIL: 1 of 3 tests have failed.");
        assert_eq!(summary_line(49, 49), "COMPLETE FAIL! All 49 tests have failed.");
        assert_eq!(summary_line(50, 50), "EPIC FAIL! All 50 tests have failed.");
    }

    #[test]
    fn separator_defaults_to_50() {
        // COLUMNS is not inherited into the test environment on most CI
        // runners; when it is, the parsed value applies instead.
        let width = separator_width();
        match std::env::var("COLUMNS") {
            Ok(v) if v.parse::<usize>().map(|n| n > 0).unwrap_or(false) => {
                assert_eq!(width, v.parse::<usize>().unwrap());
            }
            _ => assert_eq!(width, 50),
        }
    }
}
