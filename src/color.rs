/// Styles for the runner's output.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Palette {
    info: anstyle::Style,
    warn: anstyle::Style,
    error: anstyle::Style,
    hint: anstyle::Style,
}

impl Palette {
    pub(crate) fn always() -> Self {
        Self {
            info: anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Green.into())),
            warn: anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Yellow.into())),
            error: anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Red.into())),
            hint: anstyle::Effects::DIMMED.into(),
        }
    }

    pub(crate) fn never() -> Self {
        Self::default()
    }

    pub(crate) fn info<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.info)
    }

    pub(crate) fn warn<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.warn)
    }

    pub(crate) fn error<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.error)
    }

    pub(crate) fn hint<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.hint)
    }
}

/// Whether stdout will accept escape sequences.
///
/// Respects `NO_COLOR` and friends through `anstream`'s detection, so a
/// redirected stdout never receives escapes even without `--no-color`.
pub(crate) fn is_colored() -> bool {
    anstream::AutoStream::choice(&std::io::stdout()) != anstream::ColorChoice::Never
}

#[derive(Debug)]
pub(crate) struct Styled<D> {
    display: D,
    style: anstyle::Style,
}

impl<D: std::fmt::Display> Styled<D> {
    pub(crate) fn new(display: D, style: anstyle::Style) -> Self {
        Self { display, style }
    }
}

impl<D: std::fmt::Display> std::fmt::Display for Styled<D> {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.style.render())?;
        self.display.fmt(f)?;
        write!(f, "{}", self.style.render_reset())?;
        Ok(())
    }
}
