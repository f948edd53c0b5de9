use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Text runs, paragraph ends, tabs and line breaks in WordprocessingML.
const RUN_PATTERN: &str = r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|</w:p>|<w:tab(?:\s[^>]*)?/>|<w:br(?:\s[^>]*)?/>";

static RUNS: OnceLock<Regex> = OnceLock::new();
static CHAR_REFS: OnceLock<Regex> = OnceLock::new();

fn runs() -> &'static Regex {
    RUNS.get_or_init(|| Regex::new(RUN_PATTERN).expect("run pattern is valid"))
}

fn char_refs() -> &'static Regex {
    CHAR_REFS.get_or_init(|| {
        Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("char ref pattern is valid")
    })
}

/// Reads the main document part of a DOCX archive and flattens it to text,
/// one line per paragraph.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("not a valid DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    Ok(document_xml_to_text(&xml))
}

fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::with_capacity(xml.len() / 4);

    for caps in runs().captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            text.push_str(&unescape_xml(run.as_str()));
            continue;
        }
        let tag = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        if tag.starts_with("<w:tab") {
            text.push('\t');
        } else {
            text.push('\n');
        }
    }

    text
}

/// Decodes numeric character references first, then the predefined entities,
/// with `&amp;` last so `&amp;lt;` stays a literal `&lt;`.
fn unescape_xml(s: &str) -> String {
    let decoded = char_refs().replace_all(s, |caps: &regex::Captures| {
        let reference = &caps[1];
        let code = match reference.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => reference.parse().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    decoded
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Minimal single-part DOCX used by tests.
#[cfg(test)]
pub(crate) fn fixture(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::FileOptions;

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    writer.start_file(DOCUMENT_PART, options).unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
