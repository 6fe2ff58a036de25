//! Lowercase char filter.
//!
//! Lowercases the whole input before tokenization so that later patterns can
//! be written against lowercase text only.

use super::CharFilter;

/// A char filter that converts the input text to lowercase.
///
/// ASCII input takes the cheap byte-wise path; anything else goes through
/// Unicode-aware lowercasing.
///
/// # Examples
///
/// ```
/// use spamsift::analysis::char_filter::CharFilter;
/// use spamsift::analysis::char_filter::lowercase::LowercaseCharFilter;
///
/// let filter = LowercaseCharFilter::new();
/// assert_eq!(filter.filter("URGENT! Claim NOW"), "urgent! claim now");
/// ```
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_ascii() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("Hello WORLD"), "hello world");
    }

    #[test]
    fn test_lowercase_unicode() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("ÉCOLE Über"), "école über");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseCharFilter::new().name(), "lowercase");
    }
}
