//! Import and export of the note-key to instrument mapping.
//!
//! The on-disk shape is a flat JSON object whose keys are decimal MIDI
//! note numbers and whose values are instrument names:
//!
//! ```json
//! { "36": "Kick", "38": "Snare Rock", "42": "HH Closed" }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConvertError, Result};

/// Source MIDI key -> destination instrument name. Ordered by key so
/// exports and displays are stable.
pub type KeyMapping = BTreeMap<u8, String>;

/// The on-disk shape: a flat object of decimal key strings to instrument
/// names. Deserializing into this type is what enforces flatness; any
/// nested value or non-string name fails the whole document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
struct MappingDocument(BTreeMap<String, String>);

/// Parse a mapping document. Anything other than a flat string-to-string
/// object is rejected; keys that do not parse as MIDI note numbers are
/// skipped.
pub fn parse(data: &[u8]) -> Result<KeyMapping> {
    let MappingDocument(entries) =
        serde_json::from_slice(data).map_err(|_| ConvertError::MalformedMapping)?;

    let mut mapping = KeyMapping::new();
    for (key, name) in entries {
        if let Ok(key) = key.parse::<u8>() {
            mapping.insert(key, name);
        }
    }

    Ok(mapping)
}

/// Serialize a mapping back to the flat JSON object form.
pub fn serialize(mapping: &KeyMapping) -> String {
    let document = MappingDocument(
        mapping
            .iter()
            .map(|(key, name)| (key.to_string(), name.clone()))
            .collect(),
    );

    // A string map cannot fail to serialize
    serde_json::to_string_pretty(&document).unwrap_or_default()
}

pub fn load(path: &Path) -> Result<KeyMapping> {
    let data = std::fs::read(path)?;
    parse(&data)
}

pub fn save(mapping: &KeyMapping, path: &Path) -> Result<()> {
    std::fs::write(path, serialize(mapping))?;
    Ok(())
}
