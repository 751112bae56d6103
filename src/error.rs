/// An operator error: anything that prevents the run from completing.
///
/// Test failures are not errors; they are counted and reported by the
/// runner. An `Error` aborts the run and maps to exit code 2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    inner: String,
}

impl Error {
    pub(crate) fn new(inner: impl Into<String>) -> Self {
        Self {
            inner: inner.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(other: String) -> Self {
        Self::new(other)
    }
}

impl<'a> From<&'a str> for Error {
    fn from(other: &'a str) -> Self {
        Self::new(other)
    }
}
