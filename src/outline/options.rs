//! Outline extraction options.

/// Shortest text (in chars) that can be a heading or title.
pub const DEFAULT_MIN_HEADING_LENGTH: usize = 3;
/// Longest text (in chars) that can be a heading or title.
pub const DEFAULT_MAX_HEADING_LENGTH: usize = 200;
/// Lower bound of the optional font-size window, in points.
pub const DEFAULT_MIN_FONT_SIZE: f32 = 8.0;
/// Upper bound of the optional font-size window, in points.
pub const DEFAULT_MAX_FONT_SIZE: f32 = 72.0;

/// Options controlling outline extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// Minimum fragment/heading length in chars
    pub min_heading_length: usize,

    /// Maximum heading length in chars
    pub max_heading_length: usize,

    /// Inclusive font-size window; fragments outside it are dropped.
    /// `None` keeps every size.
    pub font_size_range: Option<(f32, f32)>,

    /// Error handling mode for per-page failures
    pub error_mode: ErrorMode,

    /// Whether batches run in parallel
    pub parallel: bool,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum heading length.
    pub fn with_min_heading_length(mut self, len: usize) -> Self {
        self.min_heading_length = len;
        self
    }

    /// Set the maximum heading length.
    pub fn with_max_heading_length(mut self, len: usize) -> Self {
        self.max_heading_length = len;
        self
    }

    /// Only keep fragments whose size lies within `[min, max]`.
    pub fn with_font_size_range(mut self, min: f32, max: f32) -> Self {
        self.font_size_range = Some((min, max));
        self
    }

    /// Enable the font-size window with the default bounds.
    pub fn with_default_font_size_range(self) -> Self {
        self.with_font_size_range(DEFAULT_MIN_FONT_SIZE, DEFAULT_MAX_FONT_SIZE)
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip unreadable pages instead of failing the document.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Whether a font size passes the configured window.
    pub fn accepts_font_size(&self, size: f32) -> bool {
        match self.font_size_range {
            Some((min, max)) => size >= min && size <= max,
            None => true,
        }
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            min_heading_length: DEFAULT_MIN_HEADING_LENGTH,
            max_heading_length: DEFAULT_MAX_HEADING_LENGTH,
            font_size_range: None,
            error_mode: ErrorMode::Strict,
            parallel: true,
        }
    }
}

/// How page-level decode errors are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document
    #[default]
    Strict,
    /// Skip the page and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = OutlineOptions::new()
            .lenient()
            .with_min_heading_length(4)
            .with_max_heading_length(120)
            .sequential();

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.min_heading_length, 4);
        assert_eq!(options.max_heading_length, 120);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = OutlineOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.min_heading_length, 3);
        assert_eq!(options.max_heading_length, 200);
        assert!(options.font_size_range.is_none());
        assert!(options.parallel);
    }

    #[test]
    fn test_font_size_window() {
        let options = OutlineOptions::new();
        assert!(options.accepts_font_size(4.0));
        assert!(options.accepts_font_size(96.0));

        let options = options.with_default_font_size_range();
        assert!(options.accepts_font_size(8.0));
        assert!(options.accepts_font_size(72.0));
        assert!(!options.accepts_font_size(7.5));
        assert!(!options.accepts_font_size(80.0));
    }
}
