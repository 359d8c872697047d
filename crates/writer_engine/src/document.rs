use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use writer_core::DocumentFormat;
use writer_logging::{writer_debug, writer_info};

use crate::convert::{
    html_to_plain_text, markdown_to_html, plain_text_to_html, Converter, Html2MdConverter,
};
use crate::decode::{decode_text, DecodeError};
use crate::docx::{docx_to_plain_text, DocxError};
use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub plain_text: String,
    pub html: Option<String>,
    pub encoding_label: String,
}

#[derive(Debug, Error)]
pub enum DocumentIoError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Docx(#[from] DocxError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("{operation} is not supported for {format:?} documents")]
    Unsupported {
        format: DocumentFormat,
        operation: &'static str,
    },
}

/// Read a document, detecting its text encoding and projecting it to plain text.
///
/// HTML and Markdown keep an HTML projection; Word documents are imported as
/// text only.
pub fn load_document(path: &Path) -> Result<LoadedDocument, DocumentIoError> {
    let format = DocumentFormat::from_path(path);
    if format == DocumentFormat::Docx {
        let plain_text = docx_to_plain_text(fs::File::open(path)?)?;
        writer_debug!("imported {:?} ({} chars)", path, plain_text.chars().count());
        return Ok(LoadedDocument {
            path: path.to_path_buf(),
            format,
            plain_text,
            html: None,
            encoding_label: "UTF-8".to_string(),
        });
    }

    let bytes = fs::read(path)?;
    let decoded = decode_text(&bytes)?;
    writer_debug!(
        "decoded {:?} as {} ({} bytes)",
        path,
        decoded.encoding_label,
        bytes.len()
    );

    let (plain_text, html) = match format {
        DocumentFormat::Html => (html_to_plain_text(&decoded.text), Some(decoded.text)),
        DocumentFormat::Markdown => {
            let html = markdown_to_html(&decoded.text);
            (html_to_plain_text(&html), Some(html))
        }
        DocumentFormat::PlainText | DocumentFormat::Docx => (decoded.text, None),
    };

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        format,
        plain_text,
        html,
        encoding_label: decoded.encoding_label,
    })
}

/// Write a document in `format` as UTF-8, atomically replacing any existing file.
pub fn save_document(
    path: &Path,
    format: DocumentFormat,
    plain_text: &str,
    html: Option<&str>,
) -> Result<PathBuf, DocumentIoError> {
    let content = match format {
        DocumentFormat::Html => match html {
            Some(html) => html.to_string(),
            None => plain_text_to_html(plain_text),
        },
        DocumentFormat::Markdown => match html {
            Some(html) => Html2MdConverter.to_markdown(html),
            None => plain_text.to_string(),
        },
        DocumentFormat::PlainText => plain_text.to_string(),
        DocumentFormat::Docx => {
            return Err(DocumentIoError::Unsupported {
                format,
                operation: "saving",
            })
        }
    };

    let (writer, filename) = AtomicFileWriter::for_path(path)?;
    let written = writer.write(filename, content)?;
    writer_info!("saved {:?} as {:?}", written, format);
    Ok(written)
}
