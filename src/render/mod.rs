//! Shared section contract for the two rendering backends.
//!
//! Both backends walk the same six sections in the same order with the same
//! titles, placeholder texts, and bilingual fallback rules; only the output
//! primitives differ.

pub mod html;
pub mod pdf;

pub use html::render_html;
pub use pdf::render_pdf;

use chrono::Utc;

use crate::models::{BilingualItem, Subject};

/// Report cover title, shared by both backends
pub const REPORT_TITLE: &str =
    "Rapport OSINT (donnees fournies) / OSINT Report (provided data)";

pub const SECTION_IDENTIFIERS: &str = "Identifiants / Identifiers";
pub const SECTION_NOTES: &str = "Notes / Notes";
pub const SECTION_FINDINGS: &str = "Constats / Findings";
pub const SECTION_SOURCES: &str = "Sources / Sources";
pub const SECTION_LIMITATIONS: &str = "Limites / Limitations";

/// Fixed disclosure paragraphs on the cover slide
pub const COVER_PARAGRAPHS: [(&str, &str); 2] = [
    (
        "Rapport genere pour un usage autorise et documente.",
        "Report generated for authorized, documented use.",
    ),
    (
        "Chaque element doit etre confirme par des sources fiables.",
        "Each element must be confirmed with reliable sources.",
    ),
];

/// Substituted for a missing French half
pub const PLACEHOLDER_FR: &str = "information non fournie";
/// Substituted for a missing English half
pub const PLACEHOLDER_EN: &str = "translation not provided";
/// Inline marker for blank single-value cells and fully-empty pairs
pub const PLACEHOLDER_INLINE: &str = "n/a";

pub const EMPTY_SUBJECT: &str = "Aucune donnee fournie / No data provided.";
pub const EMPTY_NOTES: &str = "Aucune note fournie / No notes provided.";
pub const EMPTY_FINDINGS: &str = "Aucun constat fourni / No findings provided.";
pub const EMPTY_SOURCES: &str = "Aucune source fournie / No sources provided.";

pub const LABEL_CATEGORY: &str = "Categorie / Category";
pub const LABEL_DETAILS: &str = "Details / Details";
pub const LABEL_SOURCE: &str = "Source / Source";
pub const LABEL_RELIABILITY: &str = "Fiabilite / Reliability";
pub const LABEL_LABEL: &str = "Label / Label";
pub const LABEL_URL: &str = "URL / URL";
pub const LABEL_NOTES: &str = "Notes / Notes";

/// Generation timestamp: UTC, minute precision
pub fn generated_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Subject rows in fixed label order, restricted to non-empty values.
/// Both backends render exactly this list, or the empty-subject placeholder.
pub fn subject_rows(subject: &Subject) -> Vec<(&'static str, &str)> {
    [
        ("Nom complet / Full name", subject.full_name.as_str()),
        ("Email / Email", subject.email.as_str()),
        ("Telephone / Phone", subject.phone.as_str()),
        ("Pseudo / Username", subject.username.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .collect()
}

/// Apply the per-half placeholder rule to a bilingual value.
/// Never returns an empty half.
pub fn placeholder_halves(fr: &str, en: &str) -> (String, String) {
    let fr = if fr.is_empty() { PLACEHOLDER_FR } else { fr };
    let en = if en.is_empty() { PLACEHOLDER_EN } else { en };
    (fr.to_string(), en.to_string())
}

/// FR/EN lines for a notes or limitations entry; placeholders always apply
pub fn item_halves(item: &BilingualItem) -> (String, String) {
    placeholder_halves(&item.fr, &item.en)
}
