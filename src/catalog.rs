//! The instrument catalog: the ordered instrument list of the destination
//! drumkit, plus where it came from.
//!
//! A catalog is built either from the embedded GMRockKit fragment or from
//! a user-supplied Hydrogen drumkit descriptor. Besides the parsed
//! instrument names it keeps the `instrumentList` element in serialized
//! form, so the document builder can splice it into the song unchanged.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::mapping::KeyMapping;
use crate::midi::{EventKind, Track};
use crate::template;

/// First key of the General MIDI drum map: key 36 plays instrument 0.
pub const GM_DRUM_MAP_BASE: u8 = 36;

#[derive(Debug, Clone)]
pub struct InstrumentCatalog {
    instruments: Vec<String>,
    drumkit: String,
    drumkit_path: String,
    /// The `instrumentList` subtree, reserialized.
    fragment: String,
}

impl InstrumentCatalog {
    /// The default catalog, built from the embedded GMRockKit list.
    pub fn gm_rock_kit() -> Self {
        Self::from_xml(template::GM_ROCK_KIT_INSTRUMENT_LIST)
            .expect("embedded GMRockKit instrument list is valid")
    }

    /// Build a catalog from any document containing an `instrumentList`
    /// element (a drumkit descriptor or a song). Fails with
    /// `MalformedCatalog` when the element is absent.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == b"instrumentList" => {
                    return parse_instrument_list(&mut reader);
                }
                Event::Eof => return Err(ConvertError::MalformedCatalog),
                _ => {}
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }

    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.instruments.iter().position(|known| known == name)
    }

    pub fn drumkit(&self) -> &str {
        &self.drumkit
    }

    pub fn drumkit_path(&self) -> &str {
        &self.drumkit_path
    }

    /// The serialized `instrumentList` element, ready for splicing into a
    /// song document.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Seed a key mapping from a track: each distinct note-on key maps to
    /// the catalog instrument at `key - 36` when that index exists
    /// (General MIDI drum map convention). Other keys stay unmapped.
    pub fn seed_mapping(&self, track: &Track) -> KeyMapping {
        let mut mapping = KeyMapping::new();

        for event in &track.events {
            if event.kind != EventKind::NoteOn {
                continue;
            }
            if event.key < GM_DRUM_MAP_BASE {
                continue;
            }
            let index = usize::from(event.key - GM_DRUM_MAP_BASE);
            if let Some(name) = self.instruments.get(index) {
                mapping.insert(event.key, name.clone());
            }
        }

        mapping
    }
}

/// Walk the `instrumentList` subtree: collect each instrument's `name`,
/// the first instrument's `drumkit`/`drumkitPath`, and echo every event
/// into a writer to retain the serialized form.
fn parse_instrument_list(reader: &mut Reader<&[u8]>) -> Result<InstrumentCatalog> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer.write_event(Event::Start(BytesStart::new("instrumentList")))?;

    let mut instruments = Vec::new();
    let mut drumkit = String::new();
    let mut drumkit_path = String::new();

    // Path below instrumentList, plus a counter of instrument children
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut instrument_count = 0usize;

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(e) => {
                if stack.is_empty() && e.name().as_ref() == b"instrument" {
                    instrument_count += 1;
                }
                stack.push(e.name().as_ref().to_vec());
            }
            Event::End(e) => {
                if stack.is_empty() {
                    if e.name().as_ref() != b"instrumentList" {
                        return Err(ConvertError::MalformedCatalog);
                    }
                    writer.write_event(Event::End(BytesEnd::new("instrumentList")))?;
                    break;
                }
                stack.pop();
            }
            Event::Text(text) => {
                if let [parent, field] = stack.as_slice() {
                    if parent.as_slice() == b"instrument" {
                        let value = text.unescape()?.into_owned();
                        match field.as_slice() {
                            b"name" => instruments.push(value),
                            b"drumkit" if instrument_count == 1 => drumkit = value,
                            b"drumkitPath" if instrument_count == 1 => drumkit_path = value,
                            _ => {}
                        }
                    }
                }
            }
            Event::Eof => return Err(ConvertError::MalformedCatalog),
            _ => {}
        }
        writer.write_event(event)?;
    }

    let fragment = String::from_utf8_lossy(&writer.into_inner()).into_owned();

    Ok(InstrumentCatalog {
        instruments,
        drumkit,
        drumkit_path,
        fragment,
    })
}
