//! Test blocks and the scanner that lifts them out of a session file.
//!
//! A session file is free-form text in which a prompt line introduces a
//! command and the lines after it are the command's expected output:
//!
//! ```text
//! $ echo hello
//! hello
//! ```
//!
//! The scanner only produces blocks; nothing is executed here. That keeps
//! listing modes side-effect free and lets the runner number every block
//! before the first command runs.

use crate::config::Config;

/// How a block's expectation is compared against the captured output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Expectation {
    /// A single line of literal text; a terminating `\n` is added at
    /// comparison time.
    Text(String),
    /// A pattern that must match at least one captured line.
    Regex(String),
    /// A file whose contents are the expected output.
    File(std::path::PathBuf),
    /// The lines collected until the block closed, each `\n`-terminated.
    Output(String),
}

/// One executable unit: a command plus what it is expected to print.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TestBlock {
    /// Exact text handed to the shell, prompt and prefix already stripped.
    pub(crate) cmd: String,
    pub(crate) expected: Expectation,
    pub(crate) source_file: std::path::PathBuf,
    /// Line the block began on, 1-based, for error messages.
    pub(crate) source_line: usize,
}

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub(crate) struct SessionFile {
    pub(crate) blocks: Vec<TestBlock>,
}

impl SessionFile {
    /// Scan `data` (already CRLF-normalized) into test blocks.
    pub(crate) fn parse(
        data: &str,
        source: &std::path::Path,
        config: &Config,
    ) -> Result<Self, crate::Error> {
        let mut blocks = Vec::new();

        // "Prompt alone" closes the open block: the exact prompt, the
        // prompt with its trailing space trimmed, and the prompt plus one
        // extra space.
        let command_intro = format!("{}{}", config.prefix, config.prompt);
        let bare_trimmed = format!("{}{}", config.prefix, config.prompt.trim_end());
        let bare_padded = format!("{} ", command_intro);

        let mut open: Option<OpenBlock> = None;

        for (line_num, line) in data.lines().enumerate().map(|(i, l)| (i + 1, l)) {
            if line == command_intro || line == bare_trimmed || line == bare_padded {
                if let Some(open) = open.take() {
                    blocks.push(open.close(source));
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix(&command_intro) {
                if let Some(open) = open.take() {
                    blocks.push(open.close(source));
                }
                if let Some(split) = rest.find(&config.inline_prefix) {
                    let cmd = &rest[..split];
                    let last = rest.rfind(&config.inline_prefix).unwrap();
                    let payload = &rest[last + config.inline_prefix.len()..];
                    blocks.push(TestBlock {
                        cmd: cmd.to_owned(),
                        expected: classify_inline(payload, source, line_num)?,
                        source_file: source.to_owned(),
                        source_line: line_num,
                    });
                } else {
                    open = Some(OpenBlock {
                        cmd: rest.to_owned(),
                        expected: String::new(),
                        start: line_num,
                    });
                }
                continue;
            }

            if let Some(mut block) = open.take() {
                if let Some(body) = line.strip_prefix(&config.prefix) {
                    block.expected.push_str(body);
                    block.expected.push('\n');
                    open = Some(block);
                } else {
                    // In prefix mode a non-prefixed line ends the block;
                    // the line itself is not part of the expected output.
                    blocks.push(block.close(source));
                }
            }
        }
        if let Some(open) = open.take() {
            blocks.push(open.close(source));
        }

        crate::debug!("{}: {} blocks", source.display(), blocks.len());
        Ok(Self { blocks })
    }
}

struct OpenBlock {
    cmd: String,
    expected: String,
    start: usize,
}

impl OpenBlock {
    fn close(self, source: &std::path::Path) -> TestBlock {
        TestBlock {
            cmd: self.cmd,
            expected: Expectation::Output(self.expected),
            source_file: source.to_owned(),
            source_line: self.start,
        }
    }
}

/// Classify the text after the inline marker.
///
/// `--regex`, `--file` and `--text` select a mode for the remainder;
/// anything else is literal text. Only `--text` may have an empty payload,
/// which asserts the command prints a single blank line.
fn classify_inline(
    payload: &str,
    source: &std::path::Path,
    line_num: usize,
) -> Result<Expectation, crate::Error> {
    let expected = if let Some(rest) = payload.strip_prefix("--regex ") {
        Expectation::Regex(rest.to_owned())
    } else if let Some(rest) = payload.strip_prefix("--file ") {
        Expectation::File(rest.into())
    } else if let Some(rest) = payload.strip_prefix("--text ") {
        Expectation::Text(rest.to_owned())
    } else {
        Expectation::Text(payload.to_owned())
    };

    let empty = match &expected {
        Expectation::Text(_) | Expectation::Output(_) => false,
        Expectation::Regex(pattern) => pattern.is_empty(),
        Expectation::File(path) => path.as_os_str().is_empty(),
    };
    if empty {
        return Err(format!(
            "missing inline output at {}:{}",
            source.display(),
            line_num
        )
        .into());
    }
    Ok(expected)
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(data: &str) -> SessionFile {
        parse_with(data, &Config::default())
    }

    fn parse_with(data: &str, config: &Config) -> SessionFile {
        SessionFile::parse(data, std::path::Path::new("input.txt"), config).unwrap()
    }

    fn block(cmd: &str, expected: Expectation, source_line: usize) -> TestBlock {
        TestBlock {
            cmd: cmd.into(),
            expected,
            source_file: "input.txt".into(),
            source_line,
        }
    }

    #[test]
    fn command_with_output() {
        let session = parse("$ echo hi\nhi\n");
        assert_eq!(
            session.blocks,
            vec![block("echo hi", Expectation::Output("hi\n".into()), 1)]
        );
    }

    #[test]
    fn command_with_empty_output() {
        let session = parse("$ true\n$ \n");
        assert_eq!(
            session.blocks,
            vec![block("true", Expectation::Output(String::new()), 1)]
        );
    }

    #[test]
    fn prompt_alone_variants_close() {
        // Exact, trimmed, and padded prompt all close the open block.
        for closer in ["$ ", "$", "$  "] {
            let session = parse(&format!("$ echo a\na\n{closer}\ntrailing prose\n"));
            assert_eq!(
                session.blocks,
                vec![block("echo a", Expectation::Output("a\n".into()), 1)],
                "closer {closer:?}"
            );
        }
    }

    #[test]
    fn next_command_closes() {
        let session = parse("$ echo a\na\n$ echo b\nb\n");
        assert_eq!(
            session.blocks,
            vec![
                block("echo a", Expectation::Output("a\n".into()), 1),
                block("echo b", Expectation::Output("b\n".into()), 3),
            ]
        );
    }

    #[test]
    fn eof_closes() {
        let session = parse("$ echo a\na");
        assert_eq!(
            session.blocks,
            vec![block("echo a", Expectation::Output("a\n".into()), 1)]
        );
    }

    #[test]
    fn leading_prose_is_ignored() {
        let session = parse("Some documentation.\n\n$ echo a\na\n");
        assert_eq!(session.blocks.len(), 1);
        assert_eq!(session.blocks[0].source_line, 3);
    }

    #[test]
    fn inline_text() {
        let session = parse("$ echo hi  #→ hi\n");
        assert_eq!(
            session.blocks,
            vec![block("echo hi  ", Expectation::Text("hi".into()), 1)]
        );
    }

    #[test]
    fn inline_flags() {
        let session = parse(
            "$ date  #→ --regex ^[A-Z]\n\
             $ cat f  #→ --file expected.txt\n\
             $ echo --file  #→ --text --file \n",
        );
        assert_eq!(
            session.blocks,
            vec![
                block("date  ", Expectation::Regex("^[A-Z]".into()), 1),
                block("cat f  ", Expectation::File("expected.txt".into()), 2),
                block("echo --file  ", Expectation::Text("--file ".into()), 3),
            ]
        );
    }

    #[test]
    fn inline_splits_first_and_last_marker() {
        // Command ends at the first marker, payload starts after the last.
        let session = parse("$ echo '#→ x'  #→ a #→ b\n");
        assert_eq!(session.blocks[0].cmd, "echo '");
        assert_eq!(session.blocks[0].expected, Expectation::Text("b".into()));
    }

    #[test]
    fn inline_empty_text_is_allowed() {
        let session = parse("$ echo  #→ \n");
        assert_eq!(session.blocks[0].expected, Expectation::Text(String::new()));
    }

    #[test]
    fn inline_empty_regex_is_fatal() {
        let err = SessionFile::parse(
            "$ date  #→ --regex \n",
            std::path::Path::new("input.txt"),
            &Config::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "missing inline output at input.txt:1");
    }

    #[test]
    fn prefix_mode() {
        let config = Config {
            prefix: "\t".to_owned(),
            ..Config::default()
        };
        let session = parse_with("prose\n\t$ echo a\n\ta\nmore prose\n", &config);
        assert_eq!(
            session.blocks,
            vec![block("echo a", Expectation::Output("a\n".into()), 2)]
        );
    }

    #[test]
    fn prefix_mode_non_prefixed_line_ends_block() {
        let config = Config {
            prefix: "    ".to_owned(),
            ..Config::default()
        };
        let session = parse_with("    $ echo a\n    a\nend\n    b\n", &config);
        // `end` closes the block; the following indented line is prose.
        assert_eq!(
            session.blocks,
            vec![block("echo a", Expectation::Output("a\n".into()), 1)]
        );
    }

    #[test]
    fn custom_prompt() {
        let config = Config {
            prompt: "%% ".to_owned(),
            ..Config::default()
        };
        let session = parse_with("%% echo a\na\n%%\n", &config);
        assert_eq!(
            session.blocks,
            vec![block("echo a", Expectation::Output("a\n".into()), 1)]
        );
    }

    #[test]
    fn blank_lines_collect_into_output() {
        let session = parse("$ printf 'a\\n\\nb\\n'\na\n\nb\n");
        assert_eq!(
            session.blocks[0].expected,
            Expectation::Output("a\n\nb\n".into())
        );
    }
}
