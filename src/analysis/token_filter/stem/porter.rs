//! Porter stemming algorithm implementation.
//!
//! Reduces English words to their stems with the rewrite rules of the
//! classic Porter algorithm:
//! 1. Plurals and -ed/-ing suffixes, terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! This is the classic 1980 rule set. Step 1 turns any terminal `y` after a
//! vowel-containing stem into `i` (`say` → `sai`), unlike the NLTK variant
//! which requires a consonant before the `y`.
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::token_filter::stem::Stemmer;
//! use spamsift::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// Ordered so that the first match is also the longest match.
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemming algorithm implementation.
///
/// Operates on ASCII words; anything else is only lowercased.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    /// Mark which bytes of `word` are vowels.
    ///
    /// `y` counts as a vowel when it follows a consonant, so the mask is built
    /// left to right from the previous byte's classification.
    fn vowel_mask(&self, word: &[u8]) -> Vec<bool> {
        let mut mask: Vec<bool> = Vec::with_capacity(word.len());
        for (pos, &byte) in word.iter().enumerate() {
            let vowel = match byte {
                b'a' | b'e' | b'i' | b'o' | b'u' => true,
                b'y' => pos > 0 && !mask[pos - 1],
                _ => false,
            };
            mask.push(vowel);
        }
        mask
    }

    /// Calculate the measure of a word (number of VC patterns).
    fn measure(&self, word: &[u8]) -> usize {
        let mask = self.vowel_mask(word);
        // Count vowel-to-consonant transitions.
        mask.windows(2).filter(|pair| pair[0] && !pair[1]).count()
    }

    fn contains_vowel(&self, word: &[u8]) -> bool {
        self.vowel_mask(word).contains(&true)
    }

    fn ends_with_double_consonant(&self, word: &[u8]) -> bool {
        let len = word.len();
        len >= 2
            && word[len - 1] == word[len - 2]
            && self.vowel_mask(word).last() == Some(&false)
    }

    /// Check if word ends with consonant-vowel-consonant, the last not w, x or y.
    fn ends_cvc(&self, word: &[u8]) -> bool {
        let len = word.len();
        if len < 3 {
            return false;
        }

        let mask = self.vowel_mask(word);
        !mask[len - 3]
            && mask[len - 2]
            && !mask[len - 1]
            && !matches!(word[len - 1], b'w' | b'x' | b'y')
    }

    /// Replace `suffix` by `replacement` when the remaining stem has a measure above `min_measure`.
    fn replace_if_measure(
        &self,
        word: &mut Vec<u8>,
        suffix: &str,
        replacement: &str,
        min_measure: usize,
    ) {
        let stem_len = word.len() - suffix.len();
        if self.measure(&word[..stem_len]) > min_measure {
            word.truncate(stem_len);
            word.extend_from_slice(replacement.as_bytes());
        }
    }

    fn step1a(&self, word: &mut Vec<u8>) {
        if word.ends_with(b"sses") || word.ends_with(b"ies") {
            word.truncate(word.len() - 2);
        } else if word.ends_with(b"s") && !word.ends_with(b"ss") {
            word.pop();
        }
    }

    fn step1b(&self, word: &mut Vec<u8>) {
        if word.ends_with(b"eed") {
            if self.measure(&word[..word.len() - 3]) > 0 {
                word.pop();
            }
            return;
        }

        let suffix_len = if word.ends_with(b"ed") {
            2
        } else if word.ends_with(b"ing") {
            3
        } else {
            return;
        };

        let stem_len = word.len() - suffix_len;
        if !self.contains_vowel(&word[..stem_len]) {
            return;
        }
        word.truncate(stem_len);

        if word.ends_with(b"at") || word.ends_with(b"bl") || word.ends_with(b"iz") {
            word.push(b'e');
        } else if self.ends_with_double_consonant(word)
            && !matches!(word.last(), Some(b'l') | Some(b's') | Some(b'z'))
        {
            word.pop();
        } else if self.measure(word) == 1 && self.ends_cvc(word) {
            word.push(b'e');
        }
    }

    /// Classic Porter: `y` → `i` whenever the stem contains a vowel.
    fn step1c(&self, word: &mut [u8]) {
        let len = word.len();
        if word.ends_with(b"y") && self.contains_vowel(&word[..len - 1]) {
            word[len - 1] = b'i';
        }
    }

    fn step2(&self, word: &mut Vec<u8>) {
        if let Some((suffix, replacement)) = STEP2_SUFFIXES
            .iter()
            .find(|(suffix, _)| word.ends_with(suffix.as_bytes()))
        {
            self.replace_if_measure(word, suffix, replacement, 0);
        }
    }

    fn step3(&self, word: &mut Vec<u8>) {
        if let Some((suffix, replacement)) = STEP3_SUFFIXES
            .iter()
            .find(|(suffix, _)| word.ends_with(suffix.as_bytes()))
        {
            self.replace_if_measure(word, suffix, replacement, 0);
        }
    }

    fn step4(&self, word: &mut Vec<u8>) {
        let Some(suffix) = STEP4_SUFFIXES
            .iter()
            .find(|suffix| word.ends_with(suffix.as_bytes()))
        else {
            return;
        };

        let stem_len = word.len() - suffix.len();
        let stem = &word[..stem_len];
        if self.measure(stem) <= 1 {
            return;
        }
        if *suffix == "ion" && !(stem.ends_with(b"s") || stem.ends_with(b"t")) {
            return;
        }
        word.truncate(stem_len);
    }

    fn step5(&self, word: &mut Vec<u8>) {
        if word.ends_with(b"e") {
            let stem = &word[..word.len() - 1];
            let m = self.measure(stem);
            if m > 1 || (m == 1 && !self.ends_cvc(stem)) {
                word.pop();
            }
        }

        if word.ends_with(b"ll") && self.measure(word) > 1 {
            word.pop();
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if word.len() <= 2 || !word.is_ascii() {
            return word;
        }

        let mut bytes = word.into_bytes();
        self.step1a(&mut bytes);
        self.step1b(&mut bytes);
        self.step1c(&mut bytes);
        self.step2(&mut bytes);
        self.step3(&mut bytes);
        self.step4(&mut bytes);
        self.step5(&mut bytes);

        // Only ASCII bytes were removed or appended.
        String::from_utf8(bytes).unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}
