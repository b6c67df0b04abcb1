//! Document-to-text conversion for `.txt`, `.pdf` and `.docx` résumés.

use std::path::{Path, PathBuf};

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported document format: '{0}'")]
    Unsupported(String),

    #[error("'{0}' is not valid UTF-8 text")]
    Encoding(String),

    #[error("PDF text extraction failed for '{filename}': {message}")]
    Pdf { filename: String, message: String },

    #[error("DOCX parse failed for '{filename}': {message}")]
    Docx { filename: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Format from the file extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())?;
        match ext.as_str() {
            "txt" => Some(DocumentFormat::PlainText),
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

/// Converts raw document bytes to plain text based on the filename's extension.
pub fn decode_document(filename: &str, bytes: &[u8]) -> Result<String, IngestError> {
    let format = DocumentFormat::from_filename(filename)
        .ok_or_else(|| IngestError::Unsupported(filename.to_string()))?;

    let text = match format {
        DocumentFormat::PlainText => String::from_utf8(bytes.to_vec())
            .map_err(|_| IngestError::Encoding(filename.to_string()))?,
        DocumentFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| IngestError::Pdf {
                filename: filename.to_string(),
                message: e.to_string(),
            })?
        }
        DocumentFormat::Docx => docx_text(filename, bytes)?,
    };

    debug!("Decoded '{}' ({:?}): {} chars", filename, format, text.len());
    Ok(text)
}

/// Reads a document from disk and converts it to text.
pub fn read_document(path: &Path) -> Result<String, IngestError> {
    let filename = display_name(path);
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode_document(&filename, &bytes)
}

/// Supported documents directly inside `folder`, sorted by filename.
pub fn list_documents(folder: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let io_err = |source| IngestError::Io {
        path: folder.display().to_string(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && DocumentFormat::from_filename(&display_name(&path)).is_some() {
            paths.push(path);
        }
    }
    paths.sort_by_key(|p| display_name(p));
    Ok(paths)
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Paragraph runs are concatenated; paragraphs are joined by newlines, blanks skipped.
/// Table cells contribute their paragraphs in row order.
fn docx_text(filename: &str, bytes: &[u8]) -> Result<String, IngestError> {
    let docx = read_docx(bytes).map_err(|e| IngestError::Docx {
        filename: filename.to_string(),
        message: format!("{e:?}"),
    })?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => paragraphs.push(paragraph_text(para)),
            DocumentChild::Table(table) => table_paragraphs(table, &mut paragraphs),
            _ => {}
        }
    }
    paragraphs.retain(|p| !p.trim().is_empty());

    Ok(paragraphs.join("\n"))
}

fn table_paragraphs(table: &Table, out: &mut Vec<String>) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => out.push(paragraph_text(para)),
                    TableCellContent::Table(nested) => table_paragraphs(nested, out),
                    _ => {}
                }
            }
        }
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_runs(&para.children, &mut text);
    text
}

// Word wraps typed emails and URLs in hyperlinks; their runs are part of the line.
fn push_runs(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    if let RunChild::Text(t) = rc {
                        text.push_str(&t.text);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_runs(&link.children, text),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Hyperlink, HyperlinkType, Run, TableCell, TableRow};
    use std::io::Cursor;

    fn docx_bytes(paragraphs: &[&[&str]]) -> Vec<u8> {
        let mut doc = Docx::new();
        for runs in paragraphs {
            let mut para = Paragraph::new();
            for run in *runs {
                para = para.add_run(Run::new().add_text(*run));
            }
            doc = doc.add_paragraph(para);
        }
        let mut cursor = Cursor::new(Vec::new());
        doc.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_filename("cv.TXT"), Some(DocumentFormat::PlainText));
        assert_eq!(DocumentFormat::from_filename("cv.Pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_filename("hoja de vida.docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_filename("cv.doc"), None);
        assert_eq!(DocumentFormat::from_filename("README"), None);
    }

    #[test]
    fn test_plain_text_decodes_utf8() {
        let text = decode_document("cv.txt", "José Pérez\n5 años".as_bytes()).unwrap();
        assert_eq!(text, "José Pérez\n5 años");
    }

    #[test]
    fn test_invalid_utf8_is_an_encoding_error() {
        let err = decode_document("cv.txt", &[0x4a, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, IngestError::Encoding(_)));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = decode_document("photo.png", b"\x89PNG").unwrap_err();
        assert!(matches!(err, IngestError::Unsupported(_)));
    }

    #[test]
    fn test_garbage_pdf_is_a_pdf_error() {
        let err = decode_document("cv.pdf", b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, IngestError::Pdf { .. }));
    }

    #[test]
    fn test_garbage_docx_is_a_docx_error() {
        let err = decode_document("cv.docx", b"not a zip archive").unwrap_err();
        assert!(matches!(err, IngestError::Docx { .. }));
    }

    #[test]
    fn test_docx_paragraphs_joined_by_newline() {
        let bytes = docx_bytes(&[&["Andrés Cárdenas"], &[""], &["andres", "@example.com"]]);
        let text = decode_document("cv.docx", &bytes).unwrap();
        assert_eq!(text, "Andrés Cárdenas\nandres@example.com");
    }

    #[test]
    fn test_docx_hyperlink_runs_are_kept() {
        let para = Paragraph::new().add_run(Run::new().add_text("Email: ")).add_hyperlink(
            Hyperlink::new("contacto", HyperlinkType::Anchor)
                .add_run(Run::new().add_text("ana@example.com")),
        );
        let mut cursor = Cursor::new(Vec::new());
        Docx::new().add_paragraph(para).build().pack(&mut cursor).unwrap();

        let text = decode_document("cv.docx", &cursor.into_inner()).unwrap();
        assert_eq!(text, "Email: ana@example.com");
    }

    #[test]
    fn test_docx_table_cells_are_read() {
        let cell = |text: &str| {
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
        };
        let table = Table::new(vec![TableRow::new(vec![
            cell("Tel 300-123-4567"),
            cell("ana@example.com"),
        ])]);
        let mut cursor = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Ana Gómez")))
            .add_table(table)
            .build()
            .pack(&mut cursor)
            .unwrap();

        let text = decode_document("cv.docx", &cursor.into_inner()).unwrap();
        assert_eq!(text, "Ana Gómez\nTel 300-123-4567\nana@example.com");
    }

    #[test]
    fn test_list_documents_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.pdf", "notes.md", "c.DOCX"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let names: Vec<String> = list_documents(dir.path())
            .unwrap()
            .iter()
            .map(|p| display_name(p))
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.txt", "c.DOCX"]);
    }

    #[test]
    fn test_list_documents_missing_folder_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_documents(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn test_read_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        std::fs::write(&path, "Laura Gil").unwrap();
        assert_eq!(read_document(&path).unwrap(), "Laura Gil");
    }
}
