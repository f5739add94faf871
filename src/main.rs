use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use dossier::{
    Cli, Commands, RecordOverrides, Reliability, apply_overrides, generated_timestamp,
    load_record_file, normalize, render_html, render_pdf, subject_rows, write_html_report,
    write_pdf_report,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            pdf,
            full_name,
            email,
            phone,
            username,
            finding,
            source,
            note,
            limitation,
            verbose,
        } => {
            setup_logging(verbose);
            let overrides = RecordOverrides {
                full_name,
                email,
                phone,
                username,
                findings: finding,
                sources: source,
                notes: note,
                limitations: limitation,
            };
            generate_report(input, output, pdf, overrides)
        }
        Commands::Inspect { input, verbose } => {
            setup_logging(verbose);
            inspect_record(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn generate_report(
    input: Option<PathBuf>,
    output: PathBuf,
    pdf: Option<PathBuf>,
    overrides: RecordOverrides,
) -> Result<()> {
    info!("Loading record from {:?}", input);
    let raw = load_record_file(input.as_deref()).context("Failed to load input record")?;
    let data = apply_overrides(raw, &overrides);
    let report = normalize(&data);

    info!(
        "Normalized record: {} findings, {} sources, {} notes, {} limitations",
        report.findings.len(),
        report.sources.len(),
        report.notes.len(),
        report.limitations.len()
    );

    let generated_at = generated_timestamp();

    let html = render_html(&report, &generated_at);
    write_html_report(&output, &html)?;
    println!("Report written to: {}", output.display());

    if let Some(pdf_path) = pdf {
        let bytes = render_pdf(&report, &generated_at)?;
        write_pdf_report(&pdf_path, &bytes)?;
        println!("PDF report written to: {}", pdf_path.display());
    }

    println!("FR: Aucune collecte automatique n a ete effectuee.");
    println!("EN: No automated collection was performed.");

    Ok(())
}

fn inspect_record(input: Option<PathBuf>) -> Result<()> {
    info!("Loading record from {:?}", input);
    let raw = load_record_file(input.as_deref()).context("Failed to load input record")?;
    let report = normalize(&raw);

    println!("Record Summary");
    println!("==============");

    println!();
    println!("Subject");
    println!("-------");
    let rows = subject_rows(&report.subject);
    if rows.is_empty() {
        println!("(no subject fields provided)");
    } else {
        for (label, value) in rows {
            println!("{}: {}", label, value);
        }
    }

    println!();
    println!("Sections");
    println!("--------");
    println!("Findings: {}", report.findings.len());
    println!("Sources: {}", report.sources.len());
    println!("Notes: {}", report.notes.len());
    println!("Limitations: {}", report.limitations.len());

    println!();
    println!("Reliability");
    println!("-----------");
    let tags = report
        .findings
        .iter()
        .map(|f| f.reliability)
        .chain(report.sources.iter().map(|s| s.reliability));
    let mut counts = [0usize; 4];
    for tag in tags {
        let slot = match tag {
            Reliability::Low => 0,
            Reliability::Medium => 1,
            Reliability::High => 2,
            Reliability::Unknown => 3,
        };
        counts[slot] += 1;
    }
    for (label, count) in ["low", "medium", "high", "unknown"].iter().zip(counts) {
        println!("{}: {}", label, count);
    }

    Ok(())
}
