use crate::models::{BilingualItem, Finding, ReportInput, Source, Subject};
use crate::render::{
    COVER_PARAGRAPHS, EMPTY_FINDINGS, EMPTY_NOTES, EMPTY_SOURCES, EMPTY_SUBJECT, LABEL_CATEGORY,
    LABEL_DETAILS, LABEL_LABEL, LABEL_NOTES, LABEL_RELIABILITY, LABEL_SOURCE, LABEL_URL,
    PLACEHOLDER_INLINE, REPORT_TITLE, SECTION_FINDINGS, SECTION_IDENTIFIERS, SECTION_LIMITATIONS,
    SECTION_NOTES, SECTION_SOURCES, item_halves, placeholder_halves, subject_rows,
};

const DOCUMENT_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>OSINT Report</title>
  <style>
    body {
      font-family: Arial, sans-serif;
      background: #f2f2f2;
      margin: 0;
      padding: 0;
      color: #1a1a1a;
    }
    .slide {
      background: #ffffff;
      width: 960px;
      margin: 32px auto;
      padding: 40px 48px;
      border-radius: 10px;
      box-shadow: 0 6px 16px rgba(0, 0, 0, 0.12);
      page-break-after: always;
    }
    h1, h2 {
      margin-top: 0;
    }
    .bilingual .fr {
      font-weight: 600;
    }
    .bilingual .en {
      color: #3d3d3d;
    }
    .meta {
      font-size: 12px;
      color: #6b6b6b;
      margin-top: 18px;
    }
    table {
      width: 100%;
      border-collapse: collapse;
      margin-top: 12px;
    }
    th, td {
      border: 1px solid #dedede;
      padding: 10px 12px;
      text-align: left;
      vertical-align: top;
    }
    th {
      background: #f7f7f7;
    }
    ul {
      padding-left: 20px;
    }
    .placeholder {
      color: #6b6b6b;
    }
    @media print {
      body {
        background: #ffffff;
      }
      .slide {
        box-shadow: none;
        margin: 0;
        border-radius: 0;
        width: auto;
        page-break-after: always;
      }
    }
  </style>
</head>
<body>
"#;

const DOCUMENT_FOOT: &str = "\n</body>\n</html>";

/// Render the canonical record as a self-contained slide-style HTML document.
///
/// Pure function of the record and the caller-supplied timestamp; never fails.
pub fn render_html(report: &ReportInput, generated_at: &str) -> String {
    let cover = cover_block(generated_at);
    let slides = [
        slide(REPORT_TITLE, &cover),
        slide(SECTION_IDENTIFIERS, &subject_block(&report.subject)),
        slide(SECTION_NOTES, &bilingual_list(&report.notes)),
        slide(SECTION_FINDINGS, &findings_table(&report.findings)),
        slide(SECTION_SOURCES, &sources_table(&report.sources)),
        slide(SECTION_LIMITATIONS, &bilingual_list(&report.limitations)),
    ];
    format!("{}{}{}", DOCUMENT_HEAD, slides.concat(), DOCUMENT_FOOT)
}

fn slide(title: &str, content: &str) -> String {
    format!(
        "<section class=\"slide\">\n  <h1>{}</h1>\n  {}\n</section>\n",
        escape_html(title),
        content
    )
}

fn cover_block(generated_at: &str) -> String {
    let mut block = String::new();
    for (fr, en) in COVER_PARAGRAPHS {
        block.push_str(&bilingual_paragraph(fr, en));
    }
    block.push_str(&format!(
        "<p class=\"meta\">Generated: {}</p>",
        escape_html(generated_at)
    ));
    block
}

fn bilingual_paragraph(fr: &str, en: &str) -> String {
    format!(
        "<p class=\"bilingual\"><span class=\"fr\">FR: {}</span><br><span class=\"en\">EN: {}</span></p>",
        escape_html(fr),
        escape_html(en)
    )
}

fn subject_block(subject: &Subject) -> String {
    let rows = subject_rows(subject);
    if rows.is_empty() {
        return placeholder_paragraph(EMPTY_SUBJECT);
    }
    let items: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                "<li><strong>{}:</strong> {}</li>",
                escape_html(label),
                escape_html(value)
            )
        })
        .collect();
    format!("<ul>{}</ul>", items)
}

fn bilingual_list(items: &[BilingualItem]) -> String {
    if items.is_empty() {
        return placeholder_paragraph(EMPTY_NOTES);
    }
    let entries: String = items
        .iter()
        .map(|item| {
            let (fr, en) = item_halves(item);
            format!(
                "<li class=\"bilingual\"><div class=\"fr\">FR: {}</div><div class=\"en\">EN: {}</div></li>",
                escape_html(&fr),
                escape_html(&en)
            )
        })
        .collect();
    format!("<ul>{}</ul>", entries)
}

fn findings_table(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return placeholder_paragraph(EMPTY_FINDINGS);
    }
    let header = format!(
        "<tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr>",
        LABEL_CATEGORY, LABEL_DETAILS, LABEL_SOURCE, LABEL_RELIABILITY
    );
    let rows: String = findings
        .iter()
        .map(|finding| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                bilingual_cell(&finding.category, &finding.category_en),
                bilingual_cell(&finding.details, &finding.details_en),
                text_cell(&finding.source),
                escape_html(finding.reliability.as_str())
            )
        })
        .collect();
    format!("<table>{}{}</table>", header, rows)
}

fn sources_table(sources: &[Source]) -> String {
    if sources.is_empty() {
        return placeholder_paragraph(EMPTY_SOURCES);
    }
    let header = format!(
        "<tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr>",
        LABEL_LABEL, LABEL_URL, LABEL_RELIABILITY, LABEL_NOTES
    );
    let rows: String = sources
        .iter()
        .map(|source| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                bilingual_cell(&source.label, &source.label_en),
                text_cell(&source.url),
                escape_html(source.reliability.as_str()),
                bilingual_cell(&source.notes, &source.notes_en)
            )
        })
        .collect();
    format!("<table>{}{}</table>", header, rows)
}

/// A pair cell collapses to the inline marker when both halves are empty;
/// otherwise each missing half gets its language placeholder.
fn bilingual_cell(fr: &str, en: &str) -> String {
    if fr.is_empty() && en.is_empty() {
        return inline_placeholder();
    }
    let (fr, en) = placeholder_halves(fr, en);
    format!(
        "<div class=\"fr\">FR: {}</div><div class=\"en\">EN: {}</div>",
        escape_html(&fr),
        escape_html(&en)
    )
}

fn text_cell(value: &str) -> String {
    if value.is_empty() {
        inline_placeholder()
    } else {
        escape_html(value)
    }
}

fn placeholder_paragraph(message: &str) -> String {
    format!("<p class=\"placeholder\">{}</p>", escape_html(message))
}

fn inline_placeholder() -> String {
    format!("<span class=\"placeholder\">{}</span>", PLACEHOLDER_INLINE)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::Reliability;
    use crate::normalize::{DEFAULT_LIMITATIONS, normalize};

    const STAMP: &str = "2026-08-04 10:30 UTC";

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#"say "hello""#), "say &quot;hello&quot;");
    }

    #[test]
    fn test_empty_record_renders_all_sections() {
        let report = normalize(&json!(null));
        let html = render_html(&report, STAMP);

        for title in [
            REPORT_TITLE,
            SECTION_IDENTIFIERS,
            SECTION_NOTES,
            SECTION_FINDINGS,
            SECTION_SOURCES,
            SECTION_LIMITATIONS,
        ] {
            assert!(html.contains(title), "missing section: {}", title);
        }
        assert!(html.contains(EMPTY_SUBJECT));
        assert!(html.contains(EMPTY_NOTES));
        assert!(html.contains(EMPTY_FINDINGS));
        assert!(html.contains(EMPTY_SOURCES));
        assert!(html.contains("Generated: 2026-08-04 10:30 UTC"));
    }

    #[test]
    fn test_default_limitations_rendered_for_empty_record() {
        let report = normalize(&json!({}));
        let html = render_html(&report, STAMP);

        for (fr, en) in DEFAULT_LIMITATIONS {
            assert!(html.contains(&format!("FR: {}", fr)));
            assert!(html.contains(&format!("EN: {}", en)));
        }
    }

    #[test]
    fn test_subject_markup_is_escaped() {
        let report = normalize(&json!({
            "subject": {"full_name": "<script>alert(1)</script>"}
        }));
        let html = render_html(&report, STAMP);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_subject_section_lists_only_present_fields() {
        let report = normalize(&json!({"subject": {"full_name": "Jane Doe"}}));
        let html = render_html(&report, STAMP);

        assert!(html.contains("Nom complet / Full name:</strong> Jane Doe"));
        assert!(!html.contains("Email / Email:"));
        assert!(!html.contains("Telephone / Phone:"));
        assert!(!html.contains("Pseudo / Username:"));
    }

    #[test]
    fn test_empty_pair_collapses_to_inline_placeholder() {
        let report = normalize(&json!({
            "findings": [{"source": "citation", "reliability": "high"}]
        }));
        let html = render_html(&report, STAMP);

        // category and details pairs are both fully empty
        assert_eq!(html.matches(&inline_placeholder()).count(), 2);
        assert!(!html.contains(&format!("FR: {}", crate::render::PLACEHOLDER_FR)));
    }

    #[test]
    fn test_half_empty_pair_uses_language_placeholders() {
        let report = normalize(&json!({
            "findings": [{"category": "Profil public"}]
        }));
        let html = render_html(&report, STAMP);

        assert!(html.contains("FR: Profil public"));
        assert!(html.contains(&format!("EN: {}", crate::render::PLACEHOLDER_EN)));
    }

    #[test]
    fn test_blank_finding_source_and_omitted_reliability() {
        let report = normalize(&json!({
            "findings": [{"category": "Profil", "category_en": "Profile"}]
        }));
        assert_eq!(report.findings[0].reliability, Reliability::Unknown);

        let html = render_html(&report, STAMP);
        assert!(html.contains(&inline_placeholder()));
        assert!(html.contains("<td>unknown</td>"));
    }

    #[test]
    fn test_bilingual_list_always_has_both_lines() {
        let report = normalize(&json!({"notes": [{"fr": "", "en": ""}]}));
        let html = render_html(&report, STAMP);

        assert!(html.contains(&format!("FR: {}", crate::render::PLACEHOLDER_FR)));
        assert!(html.contains(&format!("EN: {}", crate::render::PLACEHOLDER_EN)));
    }

    #[test]
    fn test_sources_table_columns() {
        let report = normalize(&json!({
            "sources": [{
                "label": "Profil public",
                "label_en": "Public profile",
                "url": "https://example.com/profile",
                "reliability": "medium",
                "notes": "Page publique",
                "notes_en": "Public page",
            }]
        }));
        let html = render_html(&report, STAMP);

        assert!(html.contains(LABEL_URL));
        assert!(html.contains("https://example.com/profile"));
        assert!(html.contains("<td>medium</td>"));
        assert!(html.contains("FR: Page publique"));
        assert!(html.contains("EN: Public page"));
    }
}
