//! Synthetic SMS dataset generator.
//!
//! Messages are produced by picking a random template and filling its
//! `{placeholder}` slots with random values, then shuffled together.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::dataset::DATASET_HEADER;
use crate::dataset::reader::Message;
use crate::error::{Result, SpamSiftError};
use crate::ml::types::Label;

/// Default number of messages generated per class.
pub const DEFAULT_MESSAGES_PER_CLASS: usize = 500;

pub const SPAM_TEMPLATES: &[&str] = &[
    "Congratulations! You won {amount} cash prize. Claim now.",
    "URGENT! Your ATM card will be blocked. Verify at {link}.",
    "Free recharge of {amount} available. Click {link}.",
    "You have been selected for a {item}. Reply YES to claim.",
    "Your loan of {amount} is pre-approved. Apply now.",
    "Winner! You are chosen for a lucky draw. Call {number}.",
    "Exclusive offer: Buy 1 get 1 free. Limited time.",
    "Your account will be suspended. Update KYC here: {link}.",
    "Get a free gift voucher worth {amount}. Click {link}.",
    "You\u{2019}ve won a holiday trip to {place}! Claim now.",
];

pub const HAM_TEMPLATES: &[&str] = &[
    "Bro where are you?",
    "Call me when you reach.",
    "I will message you later.",
    "Are you coming today?",
    "Good morning, have a nice day!",
    "Don't forget the class at {time}.",
    "I reached home.",
    "Thank you!",
    "Ok done.",
    "See you tomorrow.",
    "Send me the notes.",
    "I'm waiting outside.",
    "Did you eat?",
    "On the way.",
    "I will call you back.",
];

/// Placeholder name and the values it can take.
const PLACEHOLDERS: &[(&str, &[&str])] = &[
    ("{amount}", &["₹5000", "₹10000", "₹300", "$500", "₹2000"]),
    (
        "{link}",
        &[
            "http://verify-now.com",
            "http://update-kyc.in",
            "http://claim-gift.com",
        ],
    ),
    (
        "{item}",
        &[
            "free Netflix subscription",
            "special cashback offer",
            "VIP membership",
        ],
    ),
    ("{number}", &["9876543210", "9028374651", "9988776655"]),
    ("{place}", &["Goa", "Dubai", "Singapore"]),
    ("{time}", &["2 PM", "4 PM", "6 PM"]),
];

/// Generates labeled messages from the built-in templates.
///
/// # Examples
///
/// ```
/// use spamsift::dataset::DatasetGenerator;
///
/// let a = DatasetGenerator::new(Some(7)).with_counts(3, 2).generate();
/// let b = DatasetGenerator::new(Some(7)).with_counts(3, 2).generate();
/// assert_eq!(a.len(), 5);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    spam_count: usize,
    ham_count: usize,
    rng: StdRng,
}

impl DatasetGenerator {
    /// Create a generator; without a seed the RNG is seeded from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        DatasetGenerator {
            spam_count: DEFAULT_MESSAGES_PER_CLASS,
            ham_count: DEFAULT_MESSAGES_PER_CLASS,
            rng,
        }
    }

    /// Set the number of spam and ham messages.
    pub fn with_counts(mut self, spam_count: usize, ham_count: usize) -> Self {
        self.spam_count = spam_count;
        self.ham_count = ham_count;
        self
    }

    /// Generate all messages in shuffled order.
    pub fn generate(&mut self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.spam_count + self.ham_count);

        for _ in 0..self.spam_count {
            let text = fill_template(SPAM_TEMPLATES, &mut self.rng);
            messages.push(Message::new(Label::Spam, text));
        }
        for _ in 0..self.ham_count {
            let text = fill_template(HAM_TEMPLATES, &mut self.rng);
            messages.push(Message::new(Label::Ham, text));
        }

        messages.shuffle(&mut self.rng);
        messages
    }

    /// Generate messages and write them as CSV to `writer`.
    pub fn write_to<W: Write>(&mut self, writer: W) -> Result<usize> {
        let messages = self.generate();

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(DATASET_HEADER)?;
        for message in &messages {
            let label = message.label.map(|l| l.as_str()).unwrap_or_default();
            csv_writer.write_record([label, message.text.as_str()])?;
        }
        csv_writer.flush()?;

        Ok(messages.len())
    }

    /// Generate messages into a CSV file, creating parent directories.
    pub fn write_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path).map_err(|e| {
            SpamSiftError::dataset(format!("Failed to create {}: {e}", path.display()))
        })?;
        let written = self.write_to(file)?;

        log::info!("wrote {written} messages to {}", path.display());
        Ok(written)
    }
}

fn fill_template<R: Rng + ?Sized>(templates: &[&str], rng: &mut R) -> String {
    let mut text = templates.choose(rng).copied().unwrap_or_default().to_string();
    for (placeholder, values) in PLACEHOLDERS {
        if text.contains(placeholder)
            && let Some(value) = values.choose(rng)
        {
            text = text.replace(placeholder, value);
        }
    }
    text
}
