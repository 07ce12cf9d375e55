//! WordprocessingML template container and substitution walker.
//!
//! A `.docx` file is a zip archive; the text-bearing parts are
//! `word/document.xml` (body paragraphs and tables at any nesting depth),
//! `word/header*.xml` and `word/footer*.xml`. The walker rewrites only
//! `<w:t>` text nodes, so run properties and every other element round-trip
//! untouched.

use std::io::{Cursor, Read, Write};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::paragraph::substitute_paragraph;
use super::placeholder::PlaceholderTable;
use super::LetterError;

/// Footer text is normalized to 8pt; `w:sz` counts half-points.
const FOOTER_FONT_HALF_POINTS: &str = "16";

const BODY_PART: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Body,
    Header,
    Footer,
}

#[derive(Debug)]
struct Part {
    entry: usize,
    zone: Zone,
    events: Vec<Event<'static>>,
}

/// A freshly-parsed template. [`DocxTemplate::fill`] consumes it; there is
/// no way back to the unfilled state and no partial output on error.
#[derive(Debug)]
pub struct DocxTemplate {
    name: String,
    entries: Vec<(String, Vec<u8>)>,
    parts: Vec<Part>,
}

impl DocxTemplate {
    /// Parse template bytes. `name` only labels errors.
    pub fn parse(name: &str, bytes: &[u8]) -> Result<Self, LetterError> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|err| corrupt(name, err))?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(|err| corrupt(name, err))?;
            let entry_name = entry.name().to_string();
            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|err| corrupt(name, err))?;
            entries.push((entry_name, data));
        }

        let mut parts = Vec::new();
        for (index, (entry_name, data)) in entries.iter().enumerate() {
            let zone = match zone_of(entry_name) {
                Some(zone) => zone,
                None => continue,
            };
            let xml = std::str::from_utf8(data).map_err(|err| corrupt(name, err))?;
            parts.push(Part {
                entry: index,
                zone,
                events: parse_events(name, xml)?,
            });
        }
        if !parts.iter().any(|part| part.zone == Zone::Body) {
            return Err(corrupt(name, format!("missing {BODY_PART}")));
        }

        Ok(Self {
            name: name.to_string(),
            entries,
            parts,
        })
    }

    /// Substitute every zone, normalize footer font size, drop blank body
    /// paragraphs, and serialize back to `.docx` bytes.
    pub fn fill(mut self, placeholders: &PlaceholderTable) -> Result<Vec<u8>, LetterError> {
        for part in &mut self.parts {
            substitute_part(&mut part.events, placeholders);
            match part.zone {
                Zone::Footer => force_footer_font(&mut part.events),
                Zone::Body => remove_blank_paragraphs(&mut part.events),
                Zone::Header => {}
            }
        }

        for part in &self.parts {
            let xml = write_events(&self.name, &part.events)?;
            self.entries[part.entry].1 = xml;
        }
        write_archive(&self.name, &self.entries)
    }
}

fn zone_of(entry_name: &str) -> Option<Zone> {
    if entry_name == BODY_PART {
        Some(Zone::Body)
    } else if entry_name.starts_with("word/header") && entry_name.ends_with(".xml") {
        Some(Zone::Header)
    } else if entry_name.starts_with("word/footer") && entry_name.ends_with(".xml") {
        Some(Zone::Footer)
    } else {
        None
    }
}

fn corrupt(name: &str, reason: impl std::fmt::Display) -> LetterError {
    LetterError::TemplateCorrupt {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_events(name: &str, xml: &str) -> Result<Vec<Event<'static>>, LetterError> {
    let mut reader = Reader::from_str(xml);
    let mut events = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => events.push(event.into_owned()),
            Err(err) => return Err(corrupt(name, err)),
        }
    }
    Ok(events)
}

fn is_tag(event: &Event<'_>, tag: &[u8]) -> bool {
    match event {
        Event::Start(e) | Event::Empty(e) => e.name().as_ref() == tag,
        Event::End(e) => e.name().as_ref() == tag,
        _ => false,
    }
}

/// Index of the `</w:p>` closing the paragraph opened at `start`.
/// Text-box content can nest paragraphs, hence the depth counter.
fn paragraph_end(events: &[Event<'static>], start: usize) -> usize {
    let mut depth = 0usize;
    let mut index = start + 1;
    while index < events.len() {
        match &events[index] {
            Event::Start(e) if e.name().as_ref() == b"w:p" => depth += 1,
            Event::End(e) if e.name().as_ref() == b"w:p" => {
                if depth == 0 {
                    return index;
                }
                depth -= 1;
            }
            _ => {}
        }
        index += 1;
    }
    events.len().saturating_sub(1)
}

/// One `<w:t>` element inside a paragraph: the event span it occupies and
/// its current text.
struct TextSlot {
    start: usize,
    end: usize,
    text: String,
}

fn collect_text_slots(events: &[Event<'static>], from: usize, to: usize) -> Vec<TextSlot> {
    let mut slots = Vec::new();
    let mut index = from;
    while index < to {
        match &events[index] {
            Event::Start(e) if e.name().as_ref() == b"w:t" => {
                let mut text = String::new();
                let mut cursor = index + 1;
                while cursor < to {
                    match &events[cursor] {
                        Event::Text(t) => {
                            if let Ok(chunk) = t.unescape() {
                                text.push_str(&chunk);
                            }
                        }
                        Event::End(e) if e.name().as_ref() == b"w:t" => break,
                        _ => {}
                    }
                    cursor += 1;
                }
                if cursor >= to {
                    break;
                }
                slots.push(TextSlot {
                    start: index,
                    end: cursor,
                    text,
                });
                index = cursor + 1;
                continue;
            }
            Event::Empty(e) if e.name().as_ref() == b"w:t" => {
                slots.push(TextSlot {
                    start: index,
                    end: index,
                    text: String::new(),
                });
            }
            _ => {}
        }
        index += 1;
    }
    slots
}

/// Walk every paragraph of a part and apply the two-tier substitution to its
/// run texts. Table cells need no special casing; their paragraphs are plain
/// `<w:p>` elements in the same stream.
fn substitute_part(events: &mut Vec<Event<'static>>, placeholders: &PlaceholderTable) {
    let mut replacements: Vec<(usize, usize, String)> = Vec::new();
    let mut index = 0;
    while index < events.len() {
        let starts_paragraph = matches!(&events[index], Event::Start(e) if e.name().as_ref() == b"w:p");
        if !starts_paragraph {
            index += 1;
            continue;
        }

        let end = paragraph_end(events, index);
        let slots = collect_text_slots(events, index + 1, end);
        let mut runs: Vec<String> = slots.iter().map(|slot| slot.text.clone()).collect();
        substitute_paragraph(&mut runs, placeholders);
        for (slot, new_text) in slots.iter().zip(runs) {
            if new_text != slot.text {
                replacements.push((slot.start, slot.end, new_text));
            }
        }
        index = end + 1;
    }
    apply_text_replacements(events, replacements);
}

/// Rebuild the event stream with each replaced `<w:t>` span swapped for a
/// fresh element carrying the new text. Untouched events move over as-is.
fn apply_text_replacements(
    events: &mut Vec<Event<'static>>,
    mut replacements: Vec<(usize, usize, String)>,
) {
    if replacements.is_empty() {
        return;
    }
    replacements.sort_by_key(|(start, _, _)| *start);

    let old = std::mem::take(events);
    let mut pending = replacements.into_iter().peekable();
    let mut skip_until: Option<usize> = None;
    for (index, event) in old.into_iter().enumerate() {
        if let Some(until) = skip_until {
            if index <= until {
                continue;
            }
            skip_until = None;
        }
        if let Some((_, end, text)) = pending.next_if(|(start, _, _)| *start == index) {
            events.extend(text_element(&text));
            skip_until = Some(end);
            continue;
        }
        events.push(event);
    }
}

/// Build the events for a `<w:t>` element holding `text`. Leading/trailing
/// whitespace needs `xml:space="preserve"` or Word collapses it.
fn text_element(text: &str) -> Vec<Event<'static>> {
    let mut start = BytesStart::new("w:t");
    let boundary_whitespace = text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace);
    if !text.is_empty() && boundary_whitespace {
        start.push_attribute(("xml:space", "preserve"));
    }
    if text.is_empty() {
        vec![Event::Empty(start)]
    } else {
        vec![
            Event::Start(start),
            Event::Text(BytesText::new(text).into_owned()),
            Event::End(BytesEnd::new("w:t")),
        ]
    }
}

fn size_element(tag: &'static str) -> Event<'static> {
    let mut element = BytesStart::new(tag);
    element.push_attribute(("w:val", FOOTER_FONT_HALF_POINTS));
    Event::Empty(element)
}

fn is_size_tag(element: &BytesStart<'_>) -> bool {
    matches!(element.name().as_ref(), b"w:sz" | b"w:szCs")
}

/// Force every run in a footer part to the fixed footer font size,
/// inserting a `<w:rPr>` when the run has none.
fn force_footer_font(events: &mut Vec<Event<'static>>) {
    let old = std::mem::take(events);
    let total = old.len();
    let mut out: Vec<Event<'static>> = Vec::with_capacity(total + 8);
    let mut index = 0;

    while index < total {
        let is_run_start =
            matches!(&old[index], Event::Start(e) if e.name().as_ref() == b"w:r");
        if !is_run_start {
            out.push(old[index].clone());
            index += 1;
            continue;
        }

        out.push(old[index].clone());
        match old.get(index + 1) {
            Some(Event::Start(next)) if next.name().as_ref() == b"w:rPr" => {
                out.push(old[index + 1].clone());
                out.push(size_element("w:sz"));
                out.push(size_element("w:szCs"));
                let mut cursor = index + 2;
                while cursor < total {
                    match &old[cursor] {
                        Event::End(e) if e.name().as_ref() == b"w:rPr" => {
                            out.push(old[cursor].clone());
                            break;
                        }
                        Event::Empty(e) if is_size_tag(e) => {}
                        Event::Start(e) if is_size_tag(e) => {
                            let tag = e.name().as_ref().to_vec();
                            cursor += 1;
                            while cursor < total && !is_tag(&old[cursor], &tag) {
                                cursor += 1;
                            }
                        }
                        _ => out.push(old[cursor].clone()),
                    }
                    cursor += 1;
                }
                index = cursor + 1;
            }
            Some(Event::Empty(next)) if next.name().as_ref() == b"w:rPr" => {
                out.push(Event::Start(BytesStart::new("w:rPr")));
                out.push(size_element("w:sz"));
                out.push(size_element("w:szCs"));
                out.push(Event::End(BytesEnd::new("w:rPr")));
                index += 2;
            }
            _ => {
                out.push(Event::Start(BytesStart::new("w:rPr")));
                out.push(size_element("w:sz"));
                out.push(size_element("w:szCs"));
                out.push(Event::End(BytesEnd::new("w:rPr")));
                index += 1;
            }
        }
    }
    *events = out;
}

/// Drop top-level body paragraphs whose final text is whitespace-only.
/// Table-cell paragraphs stay; collapsing those would deform row layout.
fn remove_blank_paragraphs(events: &mut Vec<Event<'static>>) {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut table_depth = 0usize;
    let mut index = 0;
    while index < events.len() {
        match &events[index] {
            Event::Start(e) if e.name().as_ref() == b"w:tbl" => {
                table_depth += 1;
                index += 1;
            }
            Event::End(e) if e.name().as_ref() == b"w:tbl" => {
                table_depth = table_depth.saturating_sub(1);
                index += 1;
            }
            Event::Start(e) if e.name().as_ref() == b"w:p" => {
                let end = paragraph_end(events, index);
                if table_depth == 0 {
                    let text: String = collect_text_slots(events, index + 1, end)
                        .iter()
                        .map(|slot| slot.text.as_str())
                        .collect();
                    if text.trim().is_empty() {
                        spans.push((index, end));
                    }
                }
                index = end + 1;
            }
            _ => index += 1,
        }
    }
    if spans.is_empty() {
        return;
    }

    let old = std::mem::take(events);
    let mut pending = spans.into_iter().peekable();
    let mut skip_until: Option<usize> = None;
    for (index, event) in old.into_iter().enumerate() {
        if let Some(until) = skip_until {
            if index <= until {
                continue;
            }
            skip_until = None;
        }
        if let Some((_, end)) = pending.next_if(|(start, _)| *start == index) {
            skip_until = Some(end);
            continue;
        }
        events.push(event);
    }
}

fn write_events(name: &str, events: &[Event<'static>]) -> Result<Vec<u8>, LetterError> {
    let mut writer = Writer::new(Vec::new());
    for event in events {
        writer
            .write_event(event.clone())
            .map_err(|err| corrupt(name, err))?;
    }
    Ok(writer.into_inner())
}

/// Rebuild the archive preserving entry order; media entries are stored
/// uncompressed, the layout Word expects.
fn write_archive(name: &str, entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, LetterError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (entry_name, data) in entries {
        let options = if entry_name.starts_with("word/media/") {
            stored
        } else {
            deflated
        };
        zip.start_file(entry_name.clone(), options)
            .map_err(|err| corrupt(name, err))?;
        zip.write_all(data).map_err(|err| corrupt(name, err))?;
    }

    let cursor = zip.finish().map_err(|err| corrupt(name, err))?;
    Ok(cursor.into_inner())
}
