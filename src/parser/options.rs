//! Parsing options and configuration.

/// Default id of the heading that carries the page title.
pub const DEFAULT_TITLE_ELEMENT_ID: &str = "title-text";

/// Options for parsing wiki pages.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// How body cells are paired into rows
    pub pairing: PairingMode,

    /// Apply NFC normalization and collapse whitespace in extracted text
    pub normalize_text: bool,

    /// Id of the element whose children hold the page title
    pub title_element_id: String,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (downgrade empty bullet lists to plain text).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set pairing mode.
    pub fn with_pairing(mut self, pairing: PairingMode) -> Self {
        self.pairing = pairing;
        self
    }

    /// Pair cells per row instead of by running parity.
    pub fn per_row(mut self) -> Self {
        self.pairing = PairingMode::PerRow;
        self
    }

    /// Enable or disable text normalization.
    pub fn with_normalize_text(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }

    /// Keep extracted text exactly as it appears in the markup.
    pub fn raw_text(mut self) -> Self {
        self.normalize_text = false;
        self
    }

    /// Set the id of the title element.
    pub fn with_title_element_id(mut self, id: impl Into<String>) -> Self {
        self.title_element_id = id.into();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            pairing: PairingMode::Parity,
            normalize_text: true,
            title_element_id: DEFAULT_TITLE_ELEMENT_ID.to_string(),
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Downgrade recoverable cell errors and continue
    Lenient,
}

/// How body cells are assigned to the code and description columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingMode {
    /// Running counter across the whole body: flat cells at even positions are
    /// codes, flat cells at odd positions and structured cells are descriptions
    #[default]
    Parity,
    /// Each row carries exactly two cells: code then description
    PerRow,
}
