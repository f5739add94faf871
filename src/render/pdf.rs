use anyhow::{Result, anyhow};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Rgb,
};

use crate::models::{BilingualItem, Finding, ReportInput, Source, Subject};
use crate::render::{
    COVER_PARAGRAPHS, EMPTY_FINDINGS, EMPTY_NOTES, EMPTY_SOURCES, EMPTY_SUBJECT, LABEL_CATEGORY,
    LABEL_DETAILS, LABEL_LABEL, LABEL_NOTES, LABEL_RELIABILITY, LABEL_SOURCE, LABEL_URL,
    PLACEHOLDER_INLINE, REPORT_TITLE, SECTION_FINDINGS, SECTION_IDENTIFIERS, SECTION_LIMITATIONS,
    SECTION_NOTES, SECTION_SOURCES, item_halves, placeholder_halves, subject_rows,
};

// A4 portrait with 18 mm margins on all sides
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;

const TITLE_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 12.0;
const SMALL_SIZE: f32 = 11.0;
const META_SIZE: f32 = 10.0;

const TITLE_LINE_MM: f32 = 10.0;
const BODY_LINE_MM: f32 = 6.0;
const META_LINE_MM: f32 = 5.0;

const PT_TO_MM: f32 = 0.352_778;

/// Render the canonical record as a paginated A4 PDF, one section per page
/// with automatic page breaks on overflow. Returns the serialized bytes.
pub fn render_pdf(report: &ReportInput, generated_at: &str) -> Result<Vec<u8>> {
    let mut writer = SlideWriter::new()?;

    writer.add_slide(REPORT_TITLE);
    for (fr, en) in COVER_PARAGRAPHS {
        writer.bilingual_paragraph(fr, en);
    }
    writer.meta(&format!("Generated: {}", generated_at));

    writer.add_slide(SECTION_IDENTIFIERS);
    writer.subject_block(&report.subject);

    writer.add_slide(SECTION_NOTES);
    writer.bilingual_list(&report.notes);

    writer.add_slide(SECTION_FINDINGS);
    writer.findings_block(&report.findings);

    writer.add_slide(SECTION_SOURCES);
    writer.sources_block(&report.sources);

    writer.add_slide(SECTION_LIMITATIONS);
    writer.bilingual_list(&report.limitations);

    writer.finish()
}

#[derive(Clone, Copy)]
enum Face {
    Regular,
    Bold,
}

/// Cursor-based page writer over the printpdf document.
///
/// Tracks the baseline position from the bottom of the page; every emitted
/// line first checks the bottom margin and opens a fresh page on overflow.
struct SlideWriter {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    layer: PdfLayerReference,
    y: f32,
    started: bool,
}

impl SlideWriter {
    fn new() -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            "OSINT Report",
            mm(PAGE_WIDTH_MM),
            mm(PAGE_HEIGHT_MM),
            "Section",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| anyhow!("failed to load built-in font: {}", err))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|err| anyhow!("failed to load built-in font: {}", err))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            regular,
            bold,
            layer,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
            started: false,
        })
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|err| anyhow!("failed to serialize PDF document: {}", err))
    }

    /// Start a new section page with its title
    fn add_slide(&mut self, title: &str) {
        if self.started {
            self.new_page();
        } else {
            self.started = true;
        }
        self.write_line(title, TITLE_SIZE, TITLE_LINE_MM, Face::Bold);
        self.gap(2.0);
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(mm(PAGE_WIDTH_MM), mm(PAGE_HEIGHT_MM), "Section");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    /// Emit one logical line, wrapped to the usable width, breaking pages at
    /// the bottom margin. Text outside Latin-1 is substituted, never fatal.
    fn write_line(&mut self, text: &str, size: f32, line_height: f32, face: Face) {
        let wrapped = wrap_text(&latin1_lossy(text), max_chars(size));
        for line in wrapped.lines() {
            if self.y - line_height < MARGIN_MM {
                self.new_page();
            }
            self.y -= line_height;
            let font = match face {
                Face::Regular => &self.regular,
                Face::Bold => &self.bold,
            };
            self.layer
                .use_text(line, size.into(), mm(MARGIN_MM), mm(self.y), font);
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn bilingual_paragraph(&mut self, fr: &str, en: &str) {
        self.write_line(&format!("FR: {}", fr), BODY_SIZE, BODY_LINE_MM, Face::Regular);
        self.write_line(&format!("EN: {}", en), BODY_SIZE, BODY_LINE_MM, Face::Regular);
        self.gap(1.0);
    }

    fn meta(&mut self, text: &str) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.35, 0.35, 0.35, None)));
        self.write_line(text, META_SIZE, META_LINE_MM, Face::Regular);
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }

    fn bullet(&mut self, text: &str) {
        self.write_line(&format!("- {}", text), BODY_SIZE, BODY_LINE_MM, Face::Regular);
    }

    fn heading(&mut self, text: &str) {
        self.write_line(text, BODY_SIZE, BODY_LINE_MM, Face::Bold);
    }

    fn labeled_pair(&mut self, label: &str, fr: &str, en: &str) {
        let (fr, en) = placeholder_halves(fr, en);
        self.write_line(label, SMALL_SIZE, BODY_LINE_MM, Face::Bold);
        self.write_line(&format!("FR: {}", fr), SMALL_SIZE, BODY_LINE_MM, Face::Regular);
        self.write_line(&format!("EN: {}", en), SMALL_SIZE, BODY_LINE_MM, Face::Regular);
    }

    fn kv_line(&mut self, label: &str, value: &str) {
        self.write_line(
            &format!("{}: {}", label, value),
            SMALL_SIZE,
            BODY_LINE_MM,
            Face::Regular,
        );
    }

    fn placeholder(&mut self, message: &str) {
        self.write_line(message, BODY_SIZE, BODY_LINE_MM, Face::Regular);
    }

    fn subject_block(&mut self, subject: &Subject) {
        let rows = subject_rows(subject);
        if rows.is_empty() {
            self.placeholder(EMPTY_SUBJECT);
            return;
        }
        for (label, value) in rows {
            self.bullet(&format!("{}: {}", label, value));
        }
    }

    fn bilingual_list(&mut self, items: &[BilingualItem]) {
        if items.is_empty() {
            self.placeholder(EMPTY_NOTES);
            return;
        }
        for item in items {
            let (fr, en) = item_halves(item);
            self.bullet(&format!("FR: {}", fr));
            self.bullet(&format!("EN: {}", en));
            self.gap(1.0);
        }
    }

    fn findings_block(&mut self, findings: &[Finding]) {
        if findings.is_empty() {
            self.placeholder(EMPTY_FINDINGS);
            return;
        }
        for (index, finding) in findings.iter().enumerate() {
            self.heading(&format!("{}. Constat / Finding", index + 1));
            self.labeled_pair(LABEL_CATEGORY, &finding.category, &finding.category_en);
            self.labeled_pair(LABEL_DETAILS, &finding.details, &finding.details_en);
            self.kv_line(LABEL_SOURCE, or_inline(&finding.source));
            self.kv_line(LABEL_RELIABILITY, finding.reliability.as_str());
            self.gap(2.0);
        }
    }

    fn sources_block(&mut self, sources: &[Source]) {
        if sources.is_empty() {
            self.placeholder(EMPTY_SOURCES);
            return;
        }
        for (index, source) in sources.iter().enumerate() {
            self.heading(&format!("{}. Source", index + 1));
            self.labeled_pair(LABEL_LABEL, &source.label, &source.label_en);
            self.kv_line(LABEL_URL, or_inline(&source.url));
            self.kv_line(LABEL_RELIABILITY, source.reliability.as_str());
            self.labeled_pair(LABEL_NOTES, &source.notes, &source.notes_en);
            self.gap(2.0);
        }
    }
}

fn mm(value: f32) -> Mm {
    Mm(value.into())
}

fn or_inline(value: &str) -> &str {
    if value.is_empty() { PLACEHOLDER_INLINE } else { value }
}

/// Substitute characters outside the Latin-1 repertoire of the built-in
/// faces so exotic input degrades instead of failing the render.
fn latin1_lossy(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

/// Characters that fit on one line at the given font size, assuming the
/// average Helvetica glyph advance of half the point size
fn max_chars(font_size: f32) -> usize {
    let usable_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let char_mm = font_size * 0.5 * PT_TO_MM;
    (usable_mm / char_mm).floor().max(1.0) as usize
}

/// Wrap text at approximately the given width in characters
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + word_len + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }

    result
}
