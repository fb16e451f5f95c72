// PlantCare - core/export.rs
//
// Save the current article as Markdown or as a standalone HTML page.
// Core layer: writes to any Write trait object.

use crate::core::markdown::{gfm_options, Document};
use crate::util::constants::{DEFAULT_EXPORT_STEM, EXPORT_FILE_SUFFIX};
use crate::util::error::ExportError;
use chrono::{DateTime, Local};
use pulldown_cmark::{Event, Parser};
use std::io::Write;
use std::path::Path;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
        }
    }
}

/// Write the article verbatim. Returns the number of bytes written.
pub fn export_markdown<W: Write>(
    article: &str,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    if article.trim().is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let io_err = |e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    };
    writer.write_all(article.as_bytes()).map_err(io_err)?;
    if !article.ends_with('\n') {
        writer.write_all(b"\n").map_err(io_err)?;
        return Ok(article.len() + 1);
    }
    Ok(article.len())
}

/// Write the article as a self-contained HTML page.
pub fn export_html<W: Write>(
    article: &str,
    generated_at: DateTime<Local>,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    if article.trim().is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let title = Document::parse(article)
        .title()
        .unwrap_or_else(|| "Plant care".to_string());

    // Raw HTML from the service is not copied into the page.
    let events = Parser::new_ext(article, gfm_options())
        .filter(|e| !matches!(e, Event::Html(_) | Event::InlineHtml(_)));
    let mut body = String::new();
    pulldown_cmark::html::push_html(&mut body, events);

    let page = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"generator\" content=\"{} {}\">\n\
         <meta name=\"created\" content=\"{}\">\n<title>{}</title>\n</head>\n\
         <body>\n<article>\n{body}</article>\n</body>\n</html>\n",
        crate::util::constants::APP_NAME,
        crate::util::constants::APP_VERSION,
        generated_at.to_rfc3339(),
        escape_html(&title),
    );

    writer
        .write_all(page.as_bytes())
        .map_err(|e| ExportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })?;
    Ok(page.len())
}

/// Create `dest` and write the article in `format`.
///
/// An empty article is refused before the file is created, so a failed
/// export never leaves an empty file behind.
pub fn export_to_file(
    article: &str,
    format: ExportFormat,
    generated_at: DateTime<Local>,
    dest: &Path,
) -> Result<usize, ExportError> {
    if article.trim().is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let file = std::fs::File::create(dest).map_err(|e| ExportError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;
    let mut writer = std::io::BufWriter::new(file);
    let written = match format {
        ExportFormat::Markdown => export_markdown(article, &mut writer, dest)?,
        ExportFormat::Html => export_html(article, generated_at, &mut writer, dest)?,
    };
    writer.flush().map_err(|e| ExportError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;
    Ok(written)
}

/// Default file name for an export, derived from the article's title.
pub fn suggested_file_name(document: &Document, format: ExportFormat) -> String {
    let stem = document
        .title()
        .map(|t| slugify(&t))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_EXPORT_STEM.to_string());
    format!("{stem}{EXPORT_FILE_SUFFIX}.{}", format.extension())
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const ARTICLE: &str = "# Snake Plant\n\nWater **every 2 weeks**.\n\n- Low light\n";

    #[test]
    fn test_markdown_export_is_verbatim() {
        let mut buf = Vec::new();
        let n = export_markdown(ARTICLE, &mut buf, &PathBuf::from("out.md")).unwrap();
        assert_eq!(n, ARTICLE.len());
        assert_eq!(String::from_utf8(buf).unwrap(), ARTICLE);
    }

    #[test]
    fn test_html_export() {
        let mut buf = Vec::new();
        export_html(ARTICLE, Local::now(), &mut buf, &PathBuf::from("out.html")).unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("<title>Snake Plant</title>"));
        assert!(output.contains("<h1>Snake Plant</h1>"));
        assert!(output.contains("<strong>every 2 weeks</strong>"));
        assert!(output.contains("<li>Low light</li>"));
    }

    #[test]
    fn test_html_export_drops_raw_html() {
        let mut buf = Vec::new();
        let article = "# Ivy\n\n<script>alert(1)</script>\n\nKeep <b>moist</b>.\n";
        export_html(article, Local::now(), &mut buf, &PathBuf::from("out.html")).unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert!(!output.contains("<script>"));
        assert!(!output.contains("<b>"));
        assert!(output.contains("moist"));
    }

    #[test]
    fn test_empty_article_is_rejected() {
        let mut buf = Vec::new();
        let result = export_markdown("  \n", &mut buf, &PathBuf::from("out.md"));
        assert!(matches!(result, Err(ExportError::NothingToExport)));
    }

    #[test]
    fn test_blank_article_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("blank-care.md");

        let result = export_to_file(" \n\t", ExportFormat::Markdown, Local::now(), &dest);
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert!(!dest.exists());
    }

    #[test]
    fn test_export_to_file_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("snake-plant-care.html");

        let written = export_to_file(ARTICLE, ExportFormat::Html, Local::now(), &dest).unwrap();
        let on_disk = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(on_disk.len(), written);
        assert!(on_disk.contains("<h1>Snake Plant</h1>"));
    }

    #[test]
    fn test_suggested_file_name() {
        let doc = Document::parse(ARTICLE);
        assert_eq!(
            suggested_file_name(&doc, ExportFormat::Markdown),
            "snake-plant-care.md"
        );
        let untitled = Document::parse("Just text.");
        assert_eq!(
            suggested_file_name(&untitled, ExportFormat::Html),
            "plant-care.html"
        );
    }

    #[test]
    fn test_slugify_collapses_punctuation() {
        assert_eq!(slugify("Peace Lily (Spathiphyllum)!"), "peace-lily-spathiphyllum");
    }
}
