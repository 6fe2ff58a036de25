//! Message normalizer used before vectorization.
//!
//! Order matters: lowercase, blank URLs, blank everything outside
//! `[a-z0-9\s]`, split on whitespace, drop stop words, stem, join.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::{LowercaseCharFilter, PatternReplaceCharFilter};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{StemFilter, StopFilter};
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;

/// URL-like substrings: anything starting with `http` or `www.` up to whitespace.
pub const URL_PATTERN: &str = r"http\S+|www\.\S+";

/// Characters that survive normalization are lowercase ASCII letters, digits and whitespace.
pub const DISALLOWED_CHARS_PATTERN: &str = r"[^a-z0-9\s]";

/// Cleans raw SMS text into a space-separated sequence of stemmed tokens.
///
/// The output is a fixed point: normalizing it again returns it unchanged.
/// Stems are computed to a fixed point, and a stem that is itself a stop
/// word is dropped.
///
/// # Examples
///
/// ```
/// use spamsift::analysis::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new().unwrap();
/// let cleaned = normalizer.clean("URGENT! Your ATM card will be blocked. Verify at http://verify-now.com.");
///
/// assert_eq!(cleaned, "urgent atm card block verifi");
/// assert_eq!(normalizer.clean(&cleaned), cleaned);
/// ```
#[derive(Clone)]
pub struct TextNormalizer {
    inner: PipelineAnalyzer,
}

impl TextNormalizer {
    /// Create the standard SMS normalizer.
    pub fn new() -> Result<Self> {
        let stop_filter = Arc::new(StopFilter::new());
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(URL_PATTERN, " ")?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(
                DISALLOWED_CHARS_PATTERN,
                " ",
            )?))
            .add_filter(stop_filter.clone())
            .add_filter(Arc::new(StemFilter::new().until_stable()))
            .add_filter(stop_filter)
            .with_name("sms_normalizer");

        Ok(Self { inner: analyzer })
    }

    /// Normalize `text` into its cleaned token sequence.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        // Every stage of this pipeline is infallible once constructed.
        match self.inner.analyze(text) {
            Ok(tokens) => tokens.map(|token| token.text).collect(),
            Err(e) => {
                log::warn!("normalizer failed, treating message as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Normalize `text` into a single space-joined string.
    pub fn clean(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Normalize optional input; missing input yields the empty string.
    pub fn clean_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.clean(t)).unwrap_or_default()
    }
}

impl Analyzer for TextNormalizer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        "sms_normalizer"
    }
}

impl Debug for TextNormalizer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new().unwrap()
    }

    #[test]
    fn test_clean_spam_template() {
        let cleaned = normalizer().clean("Congratulations! You won ₹5000 cash prize. Claim now.");
        assert_eq!(cleaned, "congratul 5000 cash prize claim");
    }

    #[test]
    fn test_clean_ham_template() {
        assert_eq!(normalizer().clean("I will call you back."), "call back");
        assert_eq!(normalizer().clean("Ok done."), "ok done");
    }

    #[test]
    fn test_urls_removed() {
        let cleaned = normalizer().clean("Click HTTP://claim-gift.com or www.Update-KYC.in today");
        assert_eq!(cleaned, "click todai");
    }

    #[test]
    fn test_output_properties() {
        let inputs = [
            "WINNER!! Call 09061701461 to claim £900. Valid 12hrs only.",
            "Hey... r u coming 2nite?? <3",
            "Visit https://t.co/xyz?a=1&b=2 NOW!!!",
            "ÀÉÎ Ünïcödé — text with “quotes” and émojis 🎉",
            "",
            "     \t\n",
        ];

        let normalizer = normalizer();
        for input in inputs {
            let cleaned = normalizer.clean(input);
            assert!(!cleaned.chars().any(|c| c.is_uppercase()), "{cleaned}");
            assert!(
                cleaned.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '),
                "{cleaned}"
            );
            assert!(!cleaned.contains("http") && !cleaned.contains("www."), "{cleaned}");
            assert!(!cleaned.contains("  ") && cleaned.trim() == cleaned, "{cleaned}");
        }
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Agreed, we were doing the generalizations yesterday!",
            "You have been selected for a VIP membership. Reply YES to claim.",
            "Don't forget the class at 4 PM.",
            "Exclusive offer: Buy 1 get 1 free. Limited time.",
            "relational conditional hopefulness",
        ];

        let normalizer = normalizer();
        for input in inputs {
            let once = normalizer.clean(input);
            assert_eq!(normalizer.clean(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_stem_that_becomes_stop_word_is_dropped() {
        // "doings" is not a stop word, but its stem "do" is.
        let cleaned = normalizer().clean("doings fun");
        assert_eq!(cleaned, "fun");
    }

    #[test]
    fn test_stems_are_fixed_points() {
        // One Porter pass gives "agre"; stemming again gives "agr".
        let normalizer = normalizer();
        assert_eq!(normalizer.clean("agreed"), "agr");
        assert_eq!(normalizer.clean("agre"), "agr");
        assert_eq!(normalizer.clean("doings agreed"), "agr");
    }

    #[test]
    fn test_long_token_does_not_exhaust_stack() {
        let token = format!("{}ed", "y".repeat(300_000));
        let cleaned = normalizer().clean(&token);

        assert_eq!(cleaned.len(), 300_000);
        assert!(cleaned.ends_with('i'));
        assert!(!cleaned.contains(' '));
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(normalizer().clean_opt(None), "");
        assert_eq!(normalizer().clean_opt(Some("Thank you!")), "thank");
    }

    #[test]
    fn test_analyzer_name() {
        assert_eq!(normalizer().name(), "sms_normalizer");
    }
}
