//! DOCX text extraction: `word/document.xml` read with zip and quick-xml.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::ZipArchive;

use super::{DocumentReader, Result};
use crate::error::DocumentError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reader for Word documents.
///
/// Text runs are joined per paragraph; each non-blank paragraph becomes one
/// line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn read_text(&self, data: &[u8]) -> Result<String> {
        let mut archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| DocumentError::Docx(e.to_string()))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| DocumentError::Docx(format!("{}: {}", DOCUMENT_PART, e)))?
            .read_to_string(&mut xml)?;

        paragraphs(&xml)
    }
}

fn paragraphs(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => flush_line(&mut current, &mut lines),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => flush_line(&mut current, &mut lines),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| DocumentError::Docx(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Docx(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }
    flush_line(&mut current, &mut lines);

    Ok(lines.join("\n"))
}

fn flush_line(current: &mut String, lines: &mut Vec<String>) {
    let line = current.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn docx(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = ZipWriter::new(&mut buf);
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
            writer.start_file(DOCUMENT_PART, options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    fn body(paragraphs: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            paragraphs
        )
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let xml = body(
            r#"<w:p><w:r><w:t>Name: Juma</w:t></w:r><w:r><w:t xml:space="preserve"> Mkono</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t></w:t></w:r></w:p>
<w:p><w:r><w:t>Income: TZS 500,000</w:t></w:r></w:p>"#,
        );
        let text = DocxReader.read_text(&docx(&xml)).unwrap();
        assert_eq!(text, "Name: Juma Mkono\nIncome: TZS 500,000");
    }

    #[test]
    fn test_entities_tabs_and_breaks() {
        let xml = body(
            r#"<w:p><w:r><w:t>Employer: Mushi &amp; Sons</w:t><w:tab/><w:t>Arusha</w:t><w:br/><w:t>Age: 40</w:t></w:r></w:p>"#,
        );
        let text = DocxReader.read_text(&docx(&xml)).unwrap();
        assert_eq!(text, "Employer: Mushi & Sons\tArusha\nAge: 40");
    }

    #[test]
    fn test_not_a_zip() {
        let result = DocxReader.read_text(b"plain bytes");
        assert!(matches!(result, Err(DocumentError::Docx(_))));
    }

    #[test]
    fn test_missing_document_part() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = ZipWriter::new(&mut buf);
            writer
                .start_file("other.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let result = DocxReader.read_text(&buf.into_inner());
        assert!(matches!(result, Err(DocumentError::Docx(_))));
    }
}
