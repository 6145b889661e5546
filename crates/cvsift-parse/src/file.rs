//! File text extraction for the supported resume formats.

use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use cvsift_core::Result;

/// Supported file types for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    PlainText,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" | "doc" => Self::Docx,
            "txt" => Self::PlainText,
            _ => Self::Unknown,
        }
    }
}

/// Check whether a filename carries a supported extension.
pub fn allowed_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| FileType::from_extension(e) != FileType::Unknown)
        .unwrap_or(false)
}

/// Extract plain text from a file.
///
/// Returns `Ok(None)` when the container yields no usable text (scanned
/// PDF, malformed archive, unsupported extension); only filesystem errors
/// propagate.
pub fn extract_text(path: &Path) -> Result<Option<String>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match FileType::from_extension(ext) {
        FileType::Pdf => extract_pdf(path),
        FileType::Docx => extract_docx(path),
        FileType::PlainText => extract_txt(path),
        FileType::Unknown => Ok(None),
    }
}

fn extract_pdf(path: &Path) -> Result<Option<String>> {
    let bytes = std::fs::read(path)?;
    match pdf_extract::extract_text_from_mem(&bytes) {
        Ok(text) => Ok(Some(text)),
        Err(e) => {
            warn!("PDF extraction failed for {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

/// DOCX is a zip archive; the document body lives in `word/document.xml`.
fn extract_docx(path: &Path) -> Result<Option<String>> {
    let file = std::fs::File::open(path)?;
    let mut archive = match zip::ZipArchive::new(file) {
        Ok(a) => a,
        Err(e) => {
            warn!("Not a valid DOCX archive {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    let mut xml = String::new();
    match archive.by_name("word/document.xml") {
        Ok(mut entry) => {
            if let Err(e) = entry.read_to_string(&mut xml) {
                warn!("Failed reading document.xml from {}: {}", path.display(), e);
                return Ok(None);
            }
        }
        Err(e) => {
            warn!("No document.xml in {}: {}", path.display(), e);
            return Ok(None);
        }
    }

    Ok(Some(strip_document_xml(&xml)))
}

static XML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Flatten WordprocessingML into plain text: paragraph and break tags
/// become newlines, tabs become tabs, all remaining tags are dropped.
fn strip_document_xml(xml: &str) -> String {
    let with_breaks = xml
        .replace("</w:p>", "\n")
        .replace("<w:br/>", "\n")
        .replace("<w:tab/>", "\t");
    let text = XML_TAG.replace_all(&with_breaks, "");
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

fn extract_txt(path: &Path) -> Result<Option<String>> {
    let bytes = std::fs::read(path)?;
    // UTF-8 first, lossy decode as the fallback for legacy encodings
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_allowed_file() {
        assert!(allowed_file("resume.pdf"));
        assert!(allowed_file("resume.DOCX"));
        assert!(allowed_file("resume.txt"));
        assert!(!allowed_file("resume.exe"));
        assert!(!allowed_file("resume"));
    }

    #[test]
    fn test_extract_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Jane Smith\njane@gmail.com").unwrap();

        let text = extract_text(&path).unwrap().unwrap();
        assert!(text.contains("Jane Smith"));
    }

    #[test]
    fn test_extract_txt_invalid_utf8_is_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"Jane\xFFSmith").unwrap();

        let text = extract_text(&path).unwrap().unwrap();
        assert!(text.contains("Jane"));
        assert!(text.contains("Smith"));
    }

    #[test]
    fn test_unknown_extension_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.exe");
        std::fs::write(&path, "binary").unwrap();

        assert!(extract_text(&path).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_docx_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, "not a zip archive").unwrap();

        assert!(extract_text(&path).unwrap().is_none());
    }

    #[test]
    fn test_strip_document_xml() {
        let xml = "<w:p><w:r><w:t>Jane Smith</w:t></w:r></w:p>\
                   <w:p><w:r><w:t>Engineer &amp; Designer</w:t></w:r></w:p>";
        let text = strip_document_xml(xml);
        assert!(text.contains("Jane Smith\n"));
        assert!(text.contains("Engineer & Designer"));
    }
}
