use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse confidence tag attached to findings and sources.
///
/// Closed set: any value outside it collapses to `Unknown` during
/// normalization, so the renderers never see free-form reliability text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl Reliability {
    /// Normalize a raw reliability value (trim, lowercase, whitelist).
    ///
    /// Total and idempotent: unrecognized or empty input maps to `Unknown`,
    /// and parsing an already-normalized value yields the same value.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "low" => Reliability::Low,
            "medium" => Reliability::Medium,
            "high" => Reliability::High,
            _ => Reliability::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Reliability::Low => "low",
            Reliability::Medium => "medium",
            Reliability::High => "high",
            Reliability::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four subject identifier fields, trimmed and possibly empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subject {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
}

impl Subject {
    /// True when all four identifier fields are empty
    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.username.is_empty()
    }
}

/// A single finding row.
///
/// `source` is a free-text citation, not a URL; the URL-carrying entity is
/// [`Source`]. The two deliberately stay separate types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Finding {
    pub category: String,
    pub category_en: String,
    pub details: String,
    pub details_en: String,
    pub source: String,
    pub reliability: Reliability,
}

/// A single source row with its URL and bilingual label/notes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub label: String,
    pub label_en: String,
    pub url: String,
    pub reliability: Reliability,
    pub notes: String,
    pub notes_en: String,
}

/// One bilingual note or limitation entry.
///
/// Halves are stored raw (trimmed, possibly empty); the fixed "not provided"
/// placeholders are substituted at render time, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilingualItem {
    pub fr: String,
    pub en: String,
}

impl BilingualItem {
    pub fn new(fr: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            fr: fr.into(),
            en: en.into(),
        }
    }

    /// True when both halves are empty
    pub fn is_blank(&self) -> bool {
        self.fr.is_empty() && self.en.is_empty()
    }
}

/// The canonical report record, safe for direct consumption by either
/// rendering backend. Produced only by [`crate::normalize::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportInput {
    pub subject: Subject,
    pub findings: Vec<Finding>,
    pub sources: Vec<Source>,
    pub notes: Vec<BilingualItem>,
    pub limitations: Vec<BilingualItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reliability_parse_whitelist() {
        assert_eq!(Reliability::parse("low"), Reliability::Low);
        assert_eq!(Reliability::parse("medium"), Reliability::Medium);
        assert_eq!(Reliability::parse("high"), Reliability::High);
        assert_eq!(Reliability::parse("unknown"), Reliability::Unknown);
    }

    #[test]
    fn test_reliability_parse_fallback() {
        assert_eq!(Reliability::parse(""), Reliability::Unknown);
        assert_eq!(Reliability::parse("certain"), Reliability::Unknown);
        assert_eq!(Reliability::parse("42"), Reliability::Unknown);
    }

    #[test]
    fn test_reliability_parse_trims_and_lowercases() {
        assert_eq!(Reliability::parse("  HIGH "), Reliability::High);
        assert_eq!(Reliability::parse("Medium"), Reliability::Medium);
    }

    #[test]
    fn test_reliability_parse_idempotent() {
        for raw in ["low", "medium", "high", "unknown", "bogus"] {
            let once = Reliability::parse(raw);
            assert_eq!(Reliability::parse(once.as_str()), once);
        }
    }

    #[test]
    fn test_subject_is_empty() {
        assert!(Subject::default().is_empty());
        let subject = Subject {
            username: "jdoe".to_string(),
            ..Subject::default()
        };
        assert!(!subject.is_empty());
    }

    #[test]
    fn test_bilingual_item_is_blank() {
        assert!(BilingualItem::default().is_blank());
        assert!(!BilingualItem::new("texte", "").is_blank());
        assert!(!BilingualItem::new("", "text").is_blank());
    }
}
