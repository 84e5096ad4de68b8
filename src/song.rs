//! Hydrogen song document builder.
//!
//! Streams the embedded `.h2song` template through a reader/writer pair
//! and injects the converted content at the container boundaries: the
//! pattern elements before `</patternList>`, the group wrappers before
//! `</patternSequence>`, and the catalog's instrument list before
//! `</song>`. The containers' child layout matches what Hydrogen writes,
//! field for field, so the sequencer loads the result as its own.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;
use std::path::Path;

use crate::catalog::InstrumentCatalog;
use crate::error::Result;
use crate::pattern::{Pattern, PatternList};
use crate::template;

/// Render the full song document to UTF-8 bytes.
pub fn render(
    patterns: &PatternList,
    sequence: &[String],
    catalog: &InstrumentCatalog,
) -> Result<Vec<u8>> {
    let mut reader = Reader::from_str(template::SONG_TEMPLATE);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::End(e) if e.name().as_ref() == b"patternList" => {
                for pattern in patterns {
                    write_pattern(&mut writer, pattern)?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"patternSequence" => {
                for name in sequence {
                    write_group(&mut writer, name)?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"song" => {
                write_fragment(&mut writer, catalog.fragment())?;
            }
            Event::Eof => break,
            _ => {}
        }
        writer.write_event(event)?;
    }

    Ok(writer.into_inner())
}

/// Render and write to disk. Any pre-existing file is removed first, and
/// nothing is written unless rendering succeeded, so a failed conversion
/// never leaves a partial song behind.
pub fn save(
    patterns: &PatternList,
    sequence: &[String],
    catalog: &InstrumentCatalog,
    path: &Path,
) -> Result<()> {
    let bytes = render(patterns, sequence, catalog)?;

    if path.exists() {
        std::fs::remove_file(path)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

fn write_pattern<W: Write>(writer: &mut Writer<W>, pattern: &Pattern) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("pattern")))?;

    text_element(writer, "name", &pattern.name)?;
    text_element(writer, "info", "")?;
    text_element(writer, "category", "unknown")?;
    text_element(writer, "size", &pattern.size.to_string())?;
    text_element(writer, "denominator", "4")?;

    writer.write_event(Event::Start(BytesStart::new("noteList")))?;
    for note in &pattern.notes {
        writer.write_event(Event::Start(BytesStart::new("note")))?;
        text_element(writer, "position", &note.position.to_string())?;
        text_element(writer, "leadlag", "0")?;
        text_element(writer, "velocity", &note.velocity.to_string())?;
        text_element(writer, "pan", "0")?;
        text_element(writer, "pitch", "0")?;
        text_element(writer, "key", "C0")?;
        text_element(writer, "length", "-1")?;
        text_element(writer, "instrument", &note.instrument.to_string())?;
        text_element(writer, "note_off", "false")?;
        text_element(writer, "probability", "1")?;
        writer.write_event(Event::End(BytesEnd::new("note")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("noteList")))?;

    writer.write_event(Event::End(BytesEnd::new("pattern")))?;
    Ok(())
}

fn write_group<W: Write>(writer: &mut Writer<W>, pattern_name: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("group")))?;
    text_element(writer, "patternID", pattern_name)?;
    writer.write_event(Event::End(BytesEnd::new("group")))?;
    Ok(())
}

/// Echo a serialized XML fragment into the writer, re-indented.
fn write_fragment<W: Write>(writer: &mut Writer<W>, fragment: &str) -> Result<()> {
    let mut reader = Reader::from_str(fragment);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Decl(_) => {}
            event => writer.write_event(event)?,
        }
    }
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    if !value.is_empty() {
        writer.write_event(Event::Text(BytesText::new(value)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
