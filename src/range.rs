//! Test range selection, as given to `-n` / `--number`.

const INVALID: &str = "invalid argument for -n or --number";

/// A set of test ordinals, parsed from an expression like `1,3,5-8`.
///
/// An empty expression selects everything and reports itself inactive,
/// so "no `-n` given" and `-n ''` behave the same.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub(crate) struct RangeSet {
    parts: Vec<(usize, usize)>,
}

impl RangeSet {
    pub(crate) fn parse(expr: &str) -> Result<Self, crate::Error> {
        let expr = expr.trim();
        if expr.chars().any(|c| !matches!(c, '0'..='9' | ',' | '-')) {
            return Err(INVALID.into());
        }

        let mut parts = Vec::new();
        if expr.is_empty() {
            return Ok(Self { parts });
        }
        for part in expr.split(',') {
            if let Some((lo, hi)) = part.split_once('-') {
                let lo: usize = lo.parse().map_err(|_| INVALID)?;
                let hi: usize = hi.parse().map_err(|_| INVALID)?;
                // Reverse ranges are accepted: 8-5 is the same set as 5-8.
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                parts.push((lo.max(1), hi));
            } else {
                let n: usize = part.parse().map_err(|_| INVALID)?;
                if n == 0 {
                    // Historical no-op token.
                    continue;
                }
                parts.push((n, n));
            }
        }
        Ok(Self { parts })
    }

    /// Whether any filtering is in effect.
    pub(crate) fn is_active(&self) -> bool {
        !self.parts.is_empty()
    }

    pub(crate) fn matches(&self, ordinal: usize) -> bool {
        !self.is_active()
            || self
                .parts
                .iter()
                .any(|&(lo, hi)| lo <= ordinal && ordinal <= hi)
    }
}
