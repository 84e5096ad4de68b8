//! MIDI to Hydrogen converter library
//!
//! Converts a recorded MIDI performance into a Hydrogen drum-machine song
//! (`.h2song`). The pipeline: parse the MIDI file, re-base its tick
//! resolution onto Hydrogen's 48-ticks-per-beat grid, segment the note
//! stream of one selected track into measure-sized patterns (identical
//! measures collapse into one reusable pattern), resolve each MIDI key to
//! a drumkit instrument index, and serialize everything into the Hydrogen
//! song schema from an embedded template.

pub mod catalog;
pub mod convert;
pub mod error;
pub mod mapping;
pub mod midi;
pub mod note;
pub mod pattern;
pub mod song;
pub mod template;

// Re-export main types for convenience
pub use catalog::InstrumentCatalog;
pub use convert::Convertor;
pub use error::{ConvertError, Result};
pub use mapping::KeyMapping;
pub use midi::{MidiData, Track};
pub use note::Note;
pub use pattern::{Pattern, PatternList, PatternSequence};
