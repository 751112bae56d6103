/// Normalize `\r\n` and bare `\r` to `\n`.
///
/// Input files are normalized before scanning; captured command output
/// never is.
pub(crate) fn normalize_lines(data: &str) -> String {
    normalize_line_endings::normalized(data.chars()).collect()
}
