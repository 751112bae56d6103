//! In-process unified diff between expected and captured text.

/// Render the hunks of a unified diff, without the two file-header lines
/// an external tool would print.
///
/// An empty string means the inputs were identical, but equality is
/// decided on raw bytes by the comparator, not here.
pub(crate) fn render_unified(expected: &str, actual: &str, context: usize) -> String {
    let diff = similar::TextDiff::configure()
        .algorithm(similar::Algorithm::Patience)
        .timeout(std::time::Duration::from_millis(500))
        .diff_lines(expected, actual);
    diff.unified_diff().context_radius(context).to_string()
}
