use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value, json};

#[derive(Parser)]
#[command(name = "dossier")]
#[command(author, version, about = "Bilingual slide-style report generator for manually supplied data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the HTML report (and optionally a PDF) from the record
    Generate {
        /// Input JSON record file; omitted means an empty record
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output HTML report path
        #[arg(short, long, default_value = "reports/report.html")]
        output: PathBuf,

        /// Optional PDF report path
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Subject full name
        #[arg(long)]
        full_name: Option<String>,

        /// Subject email address
        #[arg(long)]
        email: Option<String>,

        /// Subject phone number
        #[arg(long)]
        phone: Option<String>,

        /// Subject username / handle
        #[arg(long)]
        username: Option<String>,

        /// Add a finding: category|category_en|details|details_en|source|reliability
        #[arg(long)]
        finding: Vec<String>,

        /// Add a source: label|label_en|url|reliability|notes|notes_en
        #[arg(long)]
        source: Vec<String>,

        /// Add a note: fr_text|en_text
        #[arg(long)]
        note: Vec<String>,

        /// Add a limitation: fr_text|en_text
        #[arg(long)]
        limitation: Vec<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize the record without writing a report
    Inspect {
        /// Input JSON record file; omitted means an empty record
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Subject overrides and pipe-delimited records appended on the command line
#[derive(Debug, Clone, Default)]
pub struct RecordOverrides {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
    pub findings: Vec<String>,
    pub sources: Vec<String>,
    pub notes: Vec<String>,
    pub limitations: Vec<String>,
}

/// Merge command-line overrides into the raw record before normalization.
///
/// Mirrors the shape tolerance of the normalizer: a non-object record or
/// non-list field is replaced rather than rejected.
pub fn apply_overrides(data: Value, overrides: &RecordOverrides) -> Value {
    let mut map = match data {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut subject = match map.remove("subject") {
        Some(Value::Object(subject)) => subject,
        _ => Map::new(),
    };
    for (key, value) in [
        ("full_name", &overrides.full_name),
        ("email", &overrides.email),
        ("phone", &overrides.phone),
        ("username", &overrides.username),
    ] {
        if let Some(value) = value {
            subject.insert(key.to_string(), Value::String(value.clone()));
        }
    }
    map.insert("subject".to_string(), Value::Object(subject));

    let mut findings = take_list(&mut map, "findings");
    for raw in &overrides.findings {
        let fields = parse_pipe_fields(raw, 6);
        findings.push(json!({
            "category": fields[0],
            "category_en": fields[1],
            "details": fields[2],
            "details_en": fields[3],
            "source": fields[4],
            "reliability": fields[5],
        }));
    }
    map.insert("findings".to_string(), Value::Array(findings));

    let mut sources = take_list(&mut map, "sources");
    for raw in &overrides.sources {
        let fields = parse_pipe_fields(raw, 6);
        sources.push(json!({
            "label": fields[0],
            "label_en": fields[1],
            "url": fields[2],
            "reliability": fields[3],
            "notes": fields[4],
            "notes_en": fields[5],
        }));
    }
    map.insert("sources".to_string(), Value::Array(sources));

    let mut notes = take_list(&mut map, "notes");
    for raw in &overrides.notes {
        let fields = parse_pipe_fields(raw, 2);
        notes.push(json!({"fr": fields[0], "en": fields[1]}));
    }
    map.insert("notes".to_string(), Value::Array(notes));

    let mut limitations = take_list(&mut map, "limitations");
    for raw in &overrides.limitations {
        let fields = parse_pipe_fields(raw, 2);
        limitations.push(json!({"fr": fields[0], "en": fields[1]}));
    }
    map.insert("limitations".to_string(), Value::Array(limitations));

    Value::Object(map)
}

/// Split an `a|b|c` record into a fixed number of trimmed fields.
///
/// Missing trailing fields are padded with empty strings; excess segments
/// fold back into the final field so its own `|` characters survive.
pub fn parse_pipe_fields(raw: &str, expected: usize) -> Vec<String> {
    let mut parts: Vec<String> = raw.split('|').map(|part| part.trim().to_string()).collect();
    if parts.len() < expected {
        parts.resize(expected, String::new());
    }
    if parts.len() > expected {
        let tail = parts.split_off(expected - 1).join("|");
        parts.push(tail);
    }
    parts
}

fn take_list(map: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match map.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}
