//! Error types for the conversion pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Everything that can go wrong between reading a MIDI file and writing
/// the Hydrogen song. Parse hiccups inside the per-event scan are not
/// errors; unrecognized events are skipped.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The selected track is missing or contains no events.
    #[error("selected track is missing or contains no events")]
    EmptyTrack,

    /// A drumkit descriptor without the expected `instrumentList` element.
    /// The previous catalog stays in effect.
    #[error("drumkit descriptor has no instrumentList element")]
    MalformedCatalog,

    /// A mapping document that is not a flat string-to-string JSON object.
    /// The previous mapping stays in effect.
    #[error("mapping document is not a flat string-to-string object")]
    MalformedMapping,

    #[error("failed to parse MIDI data: {0}")]
    Midi(#[from] midly::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
