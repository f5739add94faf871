use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Write the rendered HTML document, creating parent directories as needed
pub fn write_html_report(path: &Path, html: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    file.write_all(html.as_bytes())
        .with_context(|| format!("Failed to write report: {:?}", path))?;
    Ok(())
}

/// Write the rendered PDF bytes, creating parent directories as needed
pub fn write_pdf_report(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write report: {:?}", path))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("nested").join("report.html");

        write_html_report(&path, "<html></html>").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "<html></html>");
    }

    #[test]
    fn test_write_pdf_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");

        write_pdf_report(&path, b"%PDF-1.3 fake").unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }

    #[test]
    fn test_existing_directory_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&path, "first").unwrap();
        write_html_report(&path, "second").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "second");
    }
}
