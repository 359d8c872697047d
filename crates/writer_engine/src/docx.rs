//! Text import from Word `.docx` packages.
//!
//! Only the main document part is read. Runs become text, `w:tab` and `w:br`
//! become a tab and a newline, and each paragraph ends a line.

use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a docx package: {0}")]
    Package(#[from] ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document part: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed text in document part: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
}

/// Extract the plain text of a `.docx` package.
pub fn docx_to_plain_text<R: Read + Seek>(package: R) -> Result<String, DocxError> {
    let mut archive = ZipArchive::new(package)?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    document_xml_to_plain_text(&xml)
}

fn document_xml_to_plain_text(xml: &str) -> Result<String, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) if element.name().as_ref() == b"w:t" => in_text = true,
            Event::End(element) => match element.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(element) => match element.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                // An empty paragraph is still a line.
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(text) if in_text => out.push_str(&text.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    while out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}
