//! The conversion engine: re-bases MIDI time onto Hydrogen's tick grid
//! and segments the note stream into measure-sized patterns.
//!
//! Timing works on accumulated deltas, not absolute positions: each event
//! advances a running source-tick counter by
//! `(position_in_beats - last_position) * midi_resolution`, and the
//! accumulated count is then re-based onto the Hydrogen grid by dividing
//! through the resolution ratio and rounding. Note-offs advance the clock
//! but never emit notes and never close a pattern.

use std::path::Path;

use crate::catalog::InstrumentCatalog;
use crate::error::{ConvertError, Result};
use crate::mapping::{self, KeyMapping};
use crate::midi::{EventKind, Track};
use crate::note::Note;
use crate::pattern::{Pattern, PatternList, PatternSequence};
use crate::song;

/// Instrument index used when a key is unmapped or its mapped name is not
/// in the catalog.
pub const FALLBACK_INSTRUMENT: usize = 35;

/// Holds the timing configuration, the active drumkit catalog, and the
/// key mapping. Catalog and mapping persist across conversions; pattern
/// state is rebuilt from scratch on every call.
#[derive(Debug, Clone)]
pub struct Convertor {
    /// Ticks per quarter note of the Hydrogen format.
    hydrogen_resolution: u32,
    /// Quarter notes per measure.
    beats_in_measure: u32,
    catalog: InstrumentCatalog,
    mapping: KeyMapping,
}

impl Default for Convertor {
    fn default() -> Self {
        Self::new()
    }
}

impl Convertor {
    pub fn new() -> Self {
        Self {
            hydrogen_resolution: 48,
            beats_in_measure: 4,
            catalog: InstrumentCatalog::gm_rock_kit(),
            mapping: KeyMapping::new(),
        }
    }

    /// Tick length of one measure (192 for the stock 4 x 48 grid). The
    /// measure-boundary check and the flushed pattern size both use this
    /// value, so they cannot drift apart.
    pub fn measure_length(&self) -> u32 {
        self.beats_in_measure * self.hydrogen_resolution
    }

    pub fn catalog(&self) -> &InstrumentCatalog {
        &self.catalog
    }

    pub fn mapping(&self) -> &KeyMapping {
        &self.mapping
    }

    /// Replace the catalog from a drumkit descriptor file. On any failure
    /// the previous catalog stays in effect.
    pub fn load_drumkit(&mut self, path: &Path) -> Result<()> {
        self.catalog = InstrumentCatalog::from_file(path)?;
        Ok(())
    }

    /// Seed the key mapping from a track along the General MIDI drum map,
    /// replacing the previous mapping.
    pub fn seed_mapping(&mut self, track: &Track) {
        self.mapping = self.catalog.seed_mapping(track);
    }

    /// Replace the mapping from a JSON document. On any failure the
    /// previous mapping stays in effect.
    pub fn load_mapping(&mut self, path: &Path) -> Result<()> {
        self.mapping = mapping::load(path)?;
        Ok(())
    }

    pub fn save_mapping(&self, path: &Path) -> Result<()> {
        mapping::save(&self.mapping, path)
    }

    pub fn set_mapping(&mut self, mapping: KeyMapping) {
        self.mapping = mapping;
    }

    /// Segment one track into unique patterns plus the name sequence that
    /// reconstructs the song.
    ///
    /// Single forward pass: every note event advances the source-tick
    /// clock; a note-on whose re-based position crosses into a new
    /// measure first flushes the open pattern, then lands in the fresh
    /// one. The final pattern is flushed unconditionally, even when
    /// empty.
    pub fn convert(
        &self,
        track: &Track,
        midi_resolution: u16,
    ) -> Result<(PatternList, PatternSequence)> {
        if track.events.is_empty() {
            return Err(ConvertError::EmptyTrack);
        }

        let ratio = f64::from(midi_resolution) / f64::from(self.hydrogen_resolution);
        let measure_length = i64::from(self.measure_length());

        let mut patterns = PatternList::new();
        let mut sequence = PatternSequence::new();
        let mut notes: Vec<Note> = Vec::new();
        let mut pattern_number = 1u32;

        let mut tick_count = 0.0f64;
        let mut last_position_in_beats = 0.0f64;
        let mut last_measure = 0i64;

        for event in &track.events {
            tick_count +=
                (event.position_in_beats - last_position_in_beats) * f64::from(midi_resolution);
            last_position_in_beats = event.position_in_beats;

            if event.kind != EventKind::NoteOn {
                continue;
            }

            let dest_ticks = (tick_count / ratio).round() as i64;

            if dest_ticks / measure_length > last_measure {
                flush(
                    &mut patterns,
                    &mut sequence,
                    &mut notes,
                    &mut pattern_number,
                    self.measure_length(),
                );
            }

            last_measure = dest_ticks / measure_length;
            let position = dest_ticks - last_measure * measure_length;

            notes.push(Note {
                position: position as u32,
                velocity: f64::from(event.velocity) / 127.0,
                instrument: self.resolve_instrument(event.key),
            });
        }

        flush(
            &mut patterns,
            &mut sequence,
            &mut notes,
            &mut pattern_number,
            self.measure_length(),
        );

        Ok((patterns, sequence))
    }

    /// Convert a track and write the Hydrogen song in one step.
    pub fn convert_to_file(
        &self,
        track: &Track,
        midi_resolution: u16,
        path: &Path,
    ) -> Result<()> {
        let (patterns, sequence) = self.convert(track, midi_resolution)?;
        song::save(&patterns, &sequence, &self.catalog, path)
    }

    /// Key -> mapped instrument name -> catalog index, with the fixed
    /// fallback when either lookup misses.
    fn resolve_instrument(&self, key: u8) -> usize {
        self.mapping
            .get(&key)
            .and_then(|name| self.catalog.index_of(name))
            .unwrap_or(FALLBACK_INSTRUMENT)
    }
}

/// Close the open pattern: deduplicate against the known patterns by
/// content, append the resolved name to the sequence, and start a fresh
/// note buffer. The pattern counter advances only for genuinely new
/// patterns.
fn flush(
    patterns: &mut PatternList,
    sequence: &mut PatternSequence,
    notes: &mut Vec<Note>,
    pattern_number: &mut u32,
    measure_length: u32,
) {
    let candidate = Pattern::new(
        format!("Pattern{pattern_number}"),
        measure_length,
        std::mem::take(notes),
    );

    let (name, fresh) = patterns.insert(candidate);
    sequence.push(name);
    if fresh {
        *pattern_number += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::TrackEvent;

    const DIVISION: u16 = 96;

    fn note_on(beat: f64, key: u8, velocity: u8) -> TrackEvent {
        TrackEvent {
            kind: EventKind::NoteOn,
            position_in_beats: beat,
            key,
            velocity,
        }
    }

    fn note_off(beat: f64, key: u8) -> TrackEvent {
        TrackEvent {
            kind: EventKind::NoteOff,
            position_in_beats: beat,
            key,
            velocity: 0,
        }
    }

    fn track(events: Vec<TrackEvent>) -> Track {
        Track { events, name: None }
    }

    fn seeded_convertor(track: &Track) -> Convertor {
        let mut convertor = Convertor::new();
        convertor.seed_mapping(track);
        convertor
    }

    #[test]
    fn empty_track_is_an_error() {
        let convertor = Convertor::new();
        let result = convertor.convert(&track(vec![]), DIVISION);
        assert!(matches!(result, Err(ConvertError::EmptyTrack)));
    }

    #[test]
    fn single_note_lands_at_position_zero() {
        let track = track(vec![note_on(0.0, 36, 127), note_off(1.0, 36)]);
        let convertor = seeded_convertor(&track);

        let (patterns, sequence) = convertor.convert(&track, DIVISION).unwrap();

        assert_eq!(patterns.len(), 1);
        assert_eq!(sequence, vec!["Pattern1"]);

        let pattern = patterns.iter().next().unwrap();
        assert_eq!(pattern.size, 192);
        assert_eq!(pattern.notes, vec![Note::new(0, 1.0, 0)]);
    }

    #[test]
    fn rebasing_halves_ticks_at_division_96() {
        // Division 96 -> ratio 2: source tick 96 (beat 1) lands on
        // Hydrogen tick 48.
        let track = track(vec![note_on(0.0, 36, 127), note_on(1.0, 36, 127)]);
        let convertor = seeded_convertor(&track);

        let (patterns, _) = convertor.convert(&track, DIVISION).unwrap();
        let pattern = patterns.iter().next().unwrap();
        assert_eq!(pattern.notes[1].position, 48);
    }

    #[test]
    fn identical_measures_deduplicate() {
        // The same single hit at the start of two consecutive measures
        let track = track(vec![note_on(0.0, 36, 127), note_on(4.0, 36, 127)]);
        let convertor = seeded_convertor(&track);

        let (patterns, sequence) = convertor.convert(&track, DIVISION).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(sequence, vec!["Pattern1", "Pattern1"]);
    }

    #[test]
    fn repeated_measures_stay_deduplicated_over_many_repeats() {
        let mut events = Vec::new();
        for measure in 0..8 {
            let start = measure as f64 * 4.0;
            events.push(note_on(start, 36, 127));
            events.push(note_on(start + 1.0, 38, 100));
            events.push(note_on(start + 2.0, 36, 127));
            events.push(note_on(start + 3.0, 38, 100));
        }
        let track = track(events);
        let convertor = seeded_convertor(&track);

        let (patterns, sequence) = convertor.convert(&track, DIVISION).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(sequence.len(), 8);
        assert!(sequence.iter().all(|name| name == "Pattern1"));
    }

    #[test]
    fn distinct_measures_get_distinct_names() {
        let track = track(vec![
            note_on(0.0, 36, 127),
            note_on(4.0, 38, 127),
            note_on(8.0, 36, 127),
        ]);
        let convertor = seeded_convertor(&track);

        let (patterns, sequence) = convertor.convert(&track, DIVISION).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(sequence, vec!["Pattern1", "Pattern2", "Pattern1"]);
    }

    #[test]
    fn trailing_partial_measure_still_flushes() {
        // Last hit at beat 5 sits inside measure 2; nothing closes that
        // measure except end-of-track.
        let track = track(vec![note_on(0.0, 36, 127), note_on(5.0, 38, 100)]);
        let convertor = seeded_convertor(&track);

        let (patterns, sequence) = convertor.convert(&track, DIVISION).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(sequence, vec!["Pattern1", "Pattern2"]);

        let last = patterns.iter().nth(1).unwrap();
        assert_eq!(last.notes.len(), 1);
        assert_eq!(last.notes[0].position, 48);
    }

    #[test]
    fn note_off_only_advances_the_clock() {
        // The note-off at beat 4 crosses the measure boundary, but only a
        // note-on may flush: the hit at beat 4.5 opens the new measure.
        let track = track(vec![
            note_on(0.0, 36, 127),
            note_off(4.0, 36),
            note_on(4.5, 36, 127),
        ]);
        let convertor = seeded_convertor(&track);

        let (patterns, sequence) = convertor.convert(&track, DIVISION).unwrap();
        assert_eq!(sequence.len(), 2);
        let second = patterns.iter().nth(1).unwrap();
        assert_eq!(second.notes[0].position, 24);
    }

    #[test]
    fn unmapped_key_falls_back_to_instrument_35() {
        let track = track(vec![note_on(0.0, 36, 127), note_on(1.0, 105, 127)]);
        let convertor = seeded_convertor(&track);

        let (patterns, _) = convertor.convert(&track, DIVISION).unwrap();
        let pattern = patterns.iter().next().unwrap();
        assert_eq!(pattern.notes[0].instrument, 0);
        assert_eq!(pattern.notes[1].instrument, FALLBACK_INSTRUMENT);
    }

    #[test]
    fn mapped_name_missing_from_catalog_falls_back() {
        let track = track(vec![note_on(0.0, 36, 127)]);
        let mut convertor = Convertor::new();
        let mut mapping = KeyMapping::new();
        mapping.insert(36, "No Such Instrument".to_string());
        convertor.set_mapping(mapping);

        let (patterns, _) = convertor.convert(&track, DIVISION).unwrap();
        assert_eq!(
            patterns.iter().next().unwrap().notes[0].instrument,
            FALLBACK_INSTRUMENT
        );
    }

    #[test]
    fn velocity_normalizes_against_127() {
        let track = track(vec![note_on(0.0, 36, 64)]);
        let convertor = seeded_convertor(&track);

        let (patterns, _) = convertor.convert(&track, DIVISION).unwrap();
        let note = &patterns.iter().next().unwrap().notes[0];
        assert_eq!(note.velocity, 64.0 / 127.0);
    }

    #[test]
    fn failed_drumkit_load_keeps_previous_catalog() {
        let mut convertor = Convertor::new();
        let instruments_before = convertor.catalog().instruments().to_vec();
        let drumkit_before = convertor.catalog().drumkit().to_string();
        let fragment_before = convertor.catalog().fragment().to_string();

        let path = std::env::temp_dir().join(format!(
            "midi2hydrogen-bad-kit-{}.xml",
            std::process::id()
        ));
        std::fs::write(&path, "<drumkit_info><name>Empty</name></drumkit_info>").unwrap();
        let result = convertor.load_drumkit(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConvertError::MalformedCatalog)));
        assert_eq!(convertor.catalog().instruments(), instruments_before);
        assert_eq!(convertor.catalog().drumkit(), drumkit_before);
        assert_eq!(convertor.catalog().fragment(), fragment_before);
    }

    #[test]
    fn failed_mapping_load_keeps_previous_mapping() {
        let track = track(vec![note_on(0.0, 36, 127), note_on(0.5, 42, 100)]);
        let mut convertor = seeded_convertor(&track);
        let before = convertor.mapping().clone();
        assert!(!before.is_empty());

        let path = std::env::temp_dir().join(format!(
            "midi2hydrogen-bad-mapping-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"36": 1}"#).unwrap();
        let result = convertor.load_mapping(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConvertError::MalformedMapping)));
        assert_eq!(convertor.mapping(), &before);
    }

    #[test]
    fn conversion_is_deterministic() {
        let track = track(vec![
            note_on(0.0, 36, 127),
            note_on(1.5, 42, 90),
            note_on(4.0, 36, 127),
            note_on(6.25, 38, 80),
        ]);
        let convertor = seeded_convertor(&track);

        let first = convertor.convert(&track, DIVISION).unwrap();
        let second = convertor.convert(&track, DIVISION).unwrap();

        assert_eq!(first.1, second.1);
        let first_patterns: Vec<_> = first.0.iter().collect();
        let second_patterns: Vec<_> = second.0.iter().collect();
        assert_eq!(first_patterns, second_patterns);

        let bytes_a = song::render(&first.0, &first.1, convertor.catalog()).unwrap();
        let bytes_b = song::render(&second.0, &second.1, convertor.catalog()).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }
}
