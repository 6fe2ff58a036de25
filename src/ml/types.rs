//! Common types for spam classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpamSiftError;

/// Message class label.
///
/// The derived ordering (`Ham < Spam`) is the class order used by models,
/// reports and confusion matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Legitimate message.
    Ham,
    /// Unsolicited message.
    Spam,
}

impl Label {
    /// All labels in class order.
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    /// The lowercase name used in datasets.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = SpamSiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.eq_ignore_ascii_case("ham") {
            Ok(Label::Ham)
        } else if label.eq_ignore_ascii_case("spam") {
            Ok(Label::Spam)
        } else {
            Err(SpamSiftError::dataset(format!(
                "unknown label '{label}' (expected 'spam' or 'ham')"
            )))
        }
    }
}

/// Probability assigned to one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: Label,
    pub probability: f64,
}
