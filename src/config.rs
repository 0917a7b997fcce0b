//! Configuration for PDF generation.

/// PDF generation configuration.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    /// PDF version written in the header.
    pub pdf_version: String,

    /// Strip unused glyphs from embedded font programs.
    pub subset_fonts: bool,

    /// Flate-compress content streams and font programs.
    pub compress: bool,

    /// Serialize objects without pretty-printing whitespace.
    pub compact: bool,

    /// Minimum number of characters before the first hyphen.
    pub hyphenation_left_min: usize,

    /// Minimum number of characters after the last hyphen.
    pub hyphenation_right_min: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            pdf_version: "1.7".to_string(),
            subset_fonts: true,
            compress: false,
            compact: true,
            hyphenation_left_min: 2,
            hyphenation_right_min: 3,
        }
    }

    /// Set the PDF version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.pdf_version = version.into();
        self
    }

    /// Enable or disable font subsetting.
    pub fn with_subset_fonts(mut self, enable: bool) -> Self {
        self.subset_fonts = enable;
        self
    }

    /// Enable stream compression.
    pub fn with_compress(mut self, enable: bool) -> Self {
        self.compress = enable;
        self
    }

    /// Enable compact serialization.
    pub fn with_compact(mut self, enable: bool) -> Self {
        self.compact = enable;
        self
    }

    /// Set hyphenation minimum fragment lengths.
    pub fn with_hyphenation_min(mut self, left: usize, right: usize) -> Self {
        self.hyphenation_left_min = left;
        self.hyphenation_right_min = right;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PdfConfig::default();
        assert_eq!(config.pdf_version, "1.7");
        assert!(config.subset_fonts);
        assert!(!config.compress);
        assert!(config.compact);
        assert_eq!(config.hyphenation_left_min, 2);
        assert_eq!(config.hyphenation_right_min, 3);
    }

    #[test]
    fn test_builder() {
        let config = PdfConfig::new()
            .with_version("1.4")
            .with_subset_fonts(false)
            .with_compress(true)
            .with_hyphenation_min(1, 1);
        assert_eq!(config.pdf_version, "1.4");
        assert!(!config.subset_fonts);
        assert!(config.compress);
        assert_eq!(config.hyphenation_left_min, 1);
    }
}
