// file: src/parser/extract.rs
// description: plain text extraction for each supported document format
// reference: https://docs.rs/pdf-extract, https://docs.rs/docx-rs, https://docs.rs/calamine, https://docs.rs/csv, https://docs.rs/quick-xml

use super::format::DocumentFormat;
use crate::error::{QaError, Result};
use calamine::{Data, Reader, open_workbook_auto};
use quick_xml::events::Event;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::debug;

const SLIDE_PREFIX: &str = "ppt/slides/slide";
const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

type XmlResult<T> = std::result::Result<T, quick_xml::Error>;

/// Extracts one flattened text blob from `path`, read as `format`.
pub fn extract_text(path: &Path, format: &DocumentFormat) -> Result<String> {
    debug!("Extracting {} text from {}", format, path.display());

    match format {
        DocumentFormat::Pdf => extract_pdf(path),
        DocumentFormat::Docx => extract_docx(path),
        DocumentFormat::Pptx => extract_pptx(path),
        DocumentFormat::Xlsx => extract_xlsx(path),
        DocumentFormat::Csv => extract_csv(path),
        DocumentFormat::Unsupported(_) => {
            Err(QaError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| QaError::FileOperation {
        path: path.to_path_buf(),
        source,
    })
}

/// Text of every page, in page order.
fn extract_pdf(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path).map_err(|e| QaError::parse(file_label(path), e))
}

/// Body paragraphs joined by newlines.
fn extract_docx(path: &Path) -> Result<String> {
    let data = read_bytes(path)?;
    let doc = docx_rs::read_docx(&data).map_err(|e| QaError::parse(file_label(path), e))?;

    let mut paragraphs = Vec::new();

    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut text = String::new();
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Each text-bearing shape of each slide, followed by a newline.
fn extract_pptx(path: &Path) -> Result<String> {
    let label = file_label(path);
    let file = File::open(path).map_err(|source| QaError::FileOperation {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| QaError::parse(&label, e))?;

    let presentation = read_part(&mut archive, PRESENTATION_PART, &label)?;
    let relationships = read_part(&mut archive, PRESENTATION_RELS_PART, &label)?;

    let mut slide_names = match (presentation, relationships) {
        (Some(presentation), Some(relationships)) => {
            presentation_order(&presentation, &relationships)
                .map_err(|e| QaError::parse(&label, e))?
        }
        _ => Vec::new(),
    };
    if slide_names.is_empty() {
        slide_names = numbered_slides(&archive);
    }

    let mut text = String::new();

    for slide_name in slide_names {
        let xml = read_part(&mut archive, &slide_name, &label)?
            .ok_or_else(|| QaError::parse(&label, format!("missing slide part {}", slide_name)))?;

        text.push_str(&slide_text(&xml).map_err(|e| QaError::parse(&label, e))?);
    }

    Ok(text)
}

/// Contents of one archive entry, `None` when the entry does not exist.
fn read_part(
    archive: &mut zip::ZipArchive<File>,
    name: &str,
    label: &str,
) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut entry) => {
            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;
            Ok(Some(xml))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(QaError::parse(label, e)),
    }
}

/// `slideN.xml` parts ordered by N, for decks without a usable slide list.
fn numbered_slides(archive: &zip::ZipArchive<File>) -> Vec<String> {
    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            name.strip_prefix(SLIDE_PREFIX)
                .and_then(|rest| rest.strip_suffix(".xml"))
                .and_then(|num| num.parse::<u32>().ok())
                .map(|num| (num, name.to_string()))
        })
        .collect();
    slides.sort();

    slides.into_iter().map(|(_, name)| name).collect()
}

/// Slide part names in the order of `<p:sldIdLst>`, resolved through the presentation relationships.
pub(crate) fn presentation_order(
    presentation: &str,
    relationships: &str,
) -> XmlResult<Vec<String>> {
    let targets = relationship_targets(relationships)?;

    Ok(slide_relationship_ids(presentation)?
        .iter()
        .filter_map(|id| targets.get(id))
        .map(|target| match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("ppt/{}", target),
        })
        .collect())
}

fn slide_relationship_ids(xml: &str) -> XmlResult<Vec<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                for attr in e.attributes() {
                    let attr = attr?;
                    // `r:id` points into the relationships; the bare `id` is a numeric slide id.
                    if attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id" {
                        ids.push(attr.unescape_value()?.into_owned());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

fn relationship_targets(xml: &str) -> XmlResult<HashMap<String, String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.as_ref() {
                        b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(targets)
}

/// Walks one slide's XML, emitting the paragraphs of each top-level `<p:sp>` that owns a
/// text body. Shapes inside a `<p:grpSp>` are skipped along with the group.
pub(crate) fn slide_text(xml: &str) -> XmlResult<String> {
    let mut reader = quick_xml::Reader::from_str(xml);

    let mut out = String::new();
    let mut group_depth = 0usize;
    let mut in_shape = false;
    let mut has_text_body = false;
    let mut in_run_text = false;
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"grpSp" => group_depth += 1,
                _ if group_depth > 0 => {}
                b"sp" => {
                    in_shape = true;
                    has_text_body = false;
                    paragraphs.clear();
                }
                b"txBody" if in_shape => has_text_body = true,
                b"p" if in_shape && has_text_body => current = Some(String::new()),
                b"t" if current.is_some() => in_run_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                _ if group_depth > 0 => {}
                b"p" if in_shape && has_text_body => paragraphs.push(String::new()),
                b"br" => {
                    if let Some(paragraph) = current.as_mut() {
                        paragraph.push('\n');
                    }
                }
                _ => {}
            },
            Event::Text(e) if in_run_text => {
                if let Some(paragraph) = current.as_mut() {
                    paragraph.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"grpSp" => group_depth = group_depth.saturating_sub(1),
                _ if group_depth > 0 => {}
                b"t" => in_run_text = false,
                b"p" => {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                b"sp" => {
                    if has_text_body {
                        out.push_str(&paragraphs.join("\n"));
                        out.push('\n');
                    }
                    in_shape = false;
                    has_text_body = false;
                    paragraphs.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

/// Rows of the first worksheet, cells tab separated.
fn extract_xlsx(path: &Path) -> Result<String> {
    let mut workbook = open_workbook_auto(path).map_err(|e| QaError::parse(file_label(path), e))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| QaError::parse(file_label(path), e))?,
        None => return Ok(String::new()),
    };

    let mut text = String::new();
    for row in range.rows() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        text.push_str(&cells.join("\t"));
        text.push('\n');
    }

    Ok(text)
}

const CELL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Falsy cells (empty, zero, false, "") render as empty strings; dates as `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) if *f != 0.0 => f.to_string(),
        Data::Int(i) if *i != 0 => i.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => datetime.format(CELL_DATETIME_FORMAT).to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        _ => String::new(),
    }
}

/// Rows joined with commas, one per line; the first row is data like any other.
fn extract_csv(path: &Path) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| QaError::parse(file_label(path), e))?;

    let mut text = String::new();
    for record in reader.records() {
        let record = record.map_err(|e| QaError::parse(file_label(path), e))?;
        text.push_str(&record.iter().collect::<Vec<_>>().join(","));
        text.push('\n');
    }

    Ok(text)
}
