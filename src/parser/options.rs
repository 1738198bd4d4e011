//! Extraction options and configuration.

/// Options controlling how a document is extracted.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How image decoding failures are handled
    pub error_mode: ErrorMode,

    /// Largest image (width × height) that will be decoded; `None` = unlimited
    pub max_image_pixels: Option<u64>,

    /// Maximum nesting of Form XObjects followed when looking for images
    pub max_form_depth: usize,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Abort image extraction on the first undecodable resource.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the pixel limit for decoded images.
    pub fn with_max_image_pixels(mut self, pixels: u64) -> Self {
        self.max_image_pixels = Some(pixels);
        self
    }

    /// Set the Form XObject nesting limit.
    pub fn with_max_form_depth(mut self, depth: usize) -> Self {
        self.max_form_depth = depth;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_image_pixels: None,
            max_form_depth: 8,
        }
    }
}

/// Error handling mode for per-image failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the whole extraction on the first bad image
    Strict,
    /// Record the failure and keep going
    #[default]
    Lenient,
}
