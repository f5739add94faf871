use serde_json::Value;

use crate::models::{BilingualItem, Finding, Reliability, ReportInput, Source, Subject};

/// Limitation statements injected when the record provides none, so every
/// report discloses that it covers manually supplied, non-collected data.
pub const DEFAULT_LIMITATIONS: [(&str, &str); 2] = [
    (
        "Donnees basees uniquement sur les informations fournies.",
        "Data is based only on provided information.",
    ),
    (
        "Aucune collecte automatique n a ete effectuee.",
        "No automated collection was performed.",
    ),
];

/// Coerce an arbitrary JSON value into the canonical report record.
///
/// Total function: any shape problem degrades to an empty field, list, or
/// record. Nothing past this boundary inspects the raw value again.
pub fn normalize(raw: &Value) -> ReportInput {
    let subject = coerce_subject(raw.get("subject"));
    let findings = as_array(raw.get("findings"))
        .iter()
        .map(coerce_finding)
        .collect();
    let sources = as_array(raw.get("sources"))
        .iter()
        .map(coerce_source)
        .collect();
    let notes = as_array(raw.get("notes"))
        .iter()
        .map(coerce_bilingual_item)
        .collect();
    let mut limitations: Vec<BilingualItem> = as_array(raw.get("limitations"))
        .iter()
        .map(coerce_bilingual_item)
        .collect();

    // Injected only when the coerced list is empty; a list of blank entries
    // keeps its blank entries.
    if limitations.is_empty() {
        limitations = DEFAULT_LIMITATIONS
            .iter()
            .map(|(fr, en)| BilingualItem::new(*fr, *en))
            .collect();
    }

    ReportInput {
        subject,
        findings,
        sources,
        notes,
        limitations,
    }
}

/// Stringify and trim a leaf value. Null and absent become empty; non-string
/// scalars and containers use their JSON display form.
fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

fn as_array(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn coerce_subject(value: Option<&Value>) -> Subject {
    let Some(subject) = value.filter(|v| v.is_object()) else {
        return Subject::default();
    };
    Subject {
        full_name: text(subject.get("full_name")),
        email: text(subject.get("email")),
        phone: text(subject.get("phone")),
        username: text(subject.get("username")),
    }
}

fn coerce_finding(item: &Value) -> Finding {
    Finding {
        category: text(item.get("category")),
        category_en: text(item.get("category_en")),
        details: text(item.get("details")),
        details_en: text(item.get("details_en")),
        source: text(item.get("source")),
        reliability: Reliability::parse(&text(item.get("reliability"))),
    }
}

fn coerce_source(item: &Value) -> Source {
    Source {
        label: text(item.get("label")),
        label_en: text(item.get("label_en")),
        url: text(item.get("url")),
        reliability: Reliability::parse(&text(item.get("reliability"))),
        notes: text(item.get("notes")),
        notes_en: text(item.get("notes_en")),
    }
}

/// Accepts the mapping form (`fr`/`text` and `en`/`text_en` aliases) or a
/// bare scalar, which becomes the French half.
fn coerce_bilingual_item(item: &Value) -> BilingualItem {
    if item.is_object() {
        let fr = first_non_empty(text(item.get("fr")), || text(item.get("text")));
        let en = first_non_empty(text(item.get("en")), || text(item.get("text_en")));
        BilingualItem::new(fr, en)
    } else {
        BilingualItem::new(text(Some(item)), "")
    }
}

fn first_non_empty(primary: String, fallback: impl FnOnce() -> String) -> String {
    if primary.is_empty() { fallback() } else { primary }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_non_object_top_level_is_empty_record() {
        for raw in [Value::Null, json!("text"), json!(42), json!([1, 2])] {
            let report = normalize(&raw);
            assert!(report.subject.is_empty());
            assert!(report.findings.is_empty());
            assert!(report.sources.is_empty());
            assert!(report.notes.is_empty());
        }
    }

    #[test]
    fn test_wrong_shape_lists_become_empty() {
        let raw = json!({
            "findings": "not a list",
            "sources": {"label": "x"},
            "notes": 7,
        });
        let report = normalize(&raw);
        assert!(report.findings.is_empty());
        assert!(report.sources.is_empty());
        assert!(report.notes.is_empty());
    }

    #[test]
    fn test_subject_leaves_are_stringified_and_trimmed() {
        let raw = json!({
            "subject": {
                "full_name": "  Jane Doe  ",
                "email": null,
                "phone": 33600000000u64,
                "username": true,
            }
        });
        let report = normalize(&raw);
        assert_eq!(report.subject.full_name, "Jane Doe");
        assert_eq!(report.subject.email, "");
        assert_eq!(report.subject.phone, "33600000000");
        assert_eq!(report.subject.username, "true");
    }

    #[test]
    fn test_non_object_subject_is_empty() {
        let report = normalize(&json!({"subject": ["x"]}));
        assert!(report.subject.is_empty());
    }

    #[test]
    fn test_finding_coercion_and_reliability_fallback() {
        let raw = json!({
            "findings": [
                {
                    "category": "Profil public",
                    "category_en": "Public profile",
                    "details": "Bio publique",
                    "details_en": "Public bio",
                    "source": "https://example.com/profile",
                    "reliability": "MEDIUM",
                },
                {"reliability": "certain"},
            ]
        });
        let report = normalize(&raw);
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.findings[0].reliability, Reliability::Medium);
        assert_eq!(report.findings[1].reliability, Reliability::Unknown);
        assert_eq!(report.findings[1].category, "");
    }

    #[test]
    fn test_omitted_reliability_is_unknown() {
        let report = normalize(&json!({"sources": [{"label": "Profil"}]}));
        assert_eq!(report.sources[0].reliability, Reliability::Unknown);
    }

    #[test]
    fn test_non_object_list_entries_degrade_to_empty_rows() {
        let report = normalize(&json!({"findings": ["just a string", 12]}));
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.findings[0], Finding::default());
    }

    #[test]
    fn test_bilingual_item_mapping_and_aliases() {
        let raw = json!({
            "notes": [
                {"fr": "Note en francais", "en": "Note in English"},
                {"text": "Alias francais", "text_en": "Alias English"},
                {"fr": "", "text": "Repli sur text"},
                "scalaire",
            ]
        });
        let report = normalize(&raw);
        assert_eq!(report.notes[0], BilingualItem::new("Note en francais", "Note in English"));
        assert_eq!(report.notes[1], BilingualItem::new("Alias francais", "Alias English"));
        assert_eq!(report.notes[2].fr, "Repli sur text");
        assert_eq!(report.notes[3], BilingualItem::new("scalaire", ""));
    }

    #[test]
    fn test_default_limitations_injected_when_empty() {
        let report = normalize(&json!({}));
        assert_eq!(report.limitations.len(), 2);
        assert_eq!(report.limitations[0].fr, DEFAULT_LIMITATIONS[0].0);
        assert_eq!(report.limitations[1].en, DEFAULT_LIMITATIONS[1].1);
    }

    #[test]
    fn test_blank_limitation_entries_block_injection() {
        let report = normalize(&json!({"limitations": [{"fr": "", "en": ""}]}));
        assert_eq!(report.limitations.len(), 1);
        assert!(report.limitations[0].is_blank());
    }

    #[test]
    fn test_provided_limitations_are_kept() {
        let report = normalize(&json!({"limitations": [{"fr": "Portee limitee", "en": "Limited scope"}]}));
        assert_eq!(report.limitations.len(), 1);
        assert_eq!(report.limitations[0].fr, "Portee limitee");
    }
}
