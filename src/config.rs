//! Immutable configuration for a whole run.

use crate::color::Palette;
use crate::range::RangeSet;

pub(crate) const DEFAULT_PROMPT: &str = "$ ";
pub(crate) const DEFAULT_INLINE_PREFIX: &str = "#→ ";

#[derive(Clone, Debug)]
pub(crate) struct Config {
    /// Required at the start of every meaningful line, already expanded
    /// from the `--prefix` shortcuts.
    pub(crate) prefix: String,
    pub(crate) prompt: String,
    pub(crate) inline_prefix: String,
    /// Context radius for the failure diff.
    pub(crate) diff_context: usize,
    pub(crate) range: RangeSet,
    pub(crate) stop_on_first_error: bool,
    pub(crate) list_mode: bool,
    pub(crate) list_run: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
    pub(crate) use_colors: bool,
    pub(crate) palette: Palette,
    pub(crate) shell: std::path::PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            prompt: DEFAULT_PROMPT.to_owned(),
            inline_prefix: DEFAULT_INLINE_PREFIX.to_owned(),
            diff_context: 3,
            range: RangeSet::default(),
            stop_on_first_error: false,
            list_mode: false,
            list_run: false,
            verbose: false,
            quiet: false,
            use_colors: false,
            palette: Palette::never(),
            shell: std::path::PathBuf::from("/bin/sh"),
        }
    }
}

/// Expand the `--prefix` shortcuts into the literal per-line prefix.
///
/// `tab` is an ASCII tab, `0` is empty, an integer 1..=99 is that many
/// spaces, and anything containing a backslash goes through escape
/// expansion. Everything else is taken literally.
pub(crate) fn expand_prefix(raw: &str) -> String {
    if raw == "tab" {
        return "\t".to_owned();
    }
    if raw == "0" {
        return String::new();
    }
    if let Ok(n) = raw.parse::<usize>() {
        if (1..=99).contains(&n) {
            return " ".repeat(n);
        }
    }
    if raw.contains('\\') {
        return unescape(raw);
    }
    raw.to_owned()
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('e') => out.push('\x1b'),
            Some('f') => out.push('\x0c'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\x0b'),
            Some('\\') => out.push('\\'),
            // Unknown escapes stay literal.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Reduce `--diff-options` to the context radius the in-process diff can
/// honor: `-u`, `-U<n>`, `-U n`, `--unified[=n]`.
pub(crate) fn parse_diff_options(raw: &str) -> Result<usize, crate::Error> {
    let mut context = 3;
    let mut tokens = raw.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "-u" || token == "--unified" {
            context = 3;
        } else if token == "-U" {
            let n = tokens
                .next()
                .ok_or_else(|| format!("missing count after {token} in --diff-options"))?;
            context = parse_count(n)?;
        } else if let Some(n) = token.strip_prefix("-U") {
            context = parse_count(n)?;
        } else if let Some(n) = token.strip_prefix("--unified=") {
            context = parse_count(n)?;
        } else {
            return Err(format!("unsupported option for --diff-options: {token}").into());
        }
    }
    Ok(context)
}

fn parse_count(n: &str) -> Result<usize, crate::Error> {
    n.parse()
        .map_err(|_| format!("invalid count in --diff-options: {n}").into())
}
