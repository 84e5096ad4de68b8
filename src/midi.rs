//! Thin boundary around the MIDI parser.
//!
//! The conversion engine only needs, per track, an ordered list of timed
//! note events plus the file's time division. This module flattens midly's
//! view of a Standard MIDI File into exactly that, so the rest of the
//! crate never touches raw MIDI.

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use std::path::Path;

use crate::error::Result;

/// Event classes the engine distinguishes. Anything else in the file is
/// dropped during collection (meta events, controllers, pitch bend...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteOn,
    NoteOff,
}

/// A single timed note event, positioned in quarter-note beats relative
/// to the start of its track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackEvent {
    pub kind: EventKind,
    pub position_in_beats: f64,
    pub key: u8,
    pub velocity: u8,
}

/// One MIDI track's note events, in file order.
#[derive(Debug, Clone, Default)]
pub struct Track {
    pub events: Vec<TrackEvent>,
    pub name: Option<String>,
}

/// A parsed MIDI file: the time division and the per-track event lists.
#[derive(Debug, Clone)]
pub struct MidiData {
    /// Ticks per quarter note of the source file.
    pub time_division: u16,
    pub tracks: Vec<Track>,
}

impl MidiData {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let smf = Smf::parse(data)?;

        let time_division = match smf.header.timing {
            Timing::Metrical(tpb) => tpb.as_int(),
            Timing::Timecode(fps, subframe) => {
                // Approximate a tick-per-beat value for SMPTE-timed files
                (fps.as_f32() * subframe as f32 * 4.0) as u16
            }
        };

        let tracks = smf
            .tracks
            .iter()
            .map(|track| collect_track(track, time_division))
            .collect();

        Ok(MidiData {
            time_division,
            tracks,
        })
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

fn collect_track(track: &[midly::TrackEvent<'_>], time_division: u16) -> Track {
    let mut ticks: u64 = 0;
    let mut events = Vec::new();
    let mut name = None;

    for event in track {
        ticks += u64::from(event.delta.as_int());
        let position_in_beats = ticks as f64 / f64::from(time_division);

        match event.kind {
            TrackEventKind::Midi { message, .. } => match message {
                MidiMessage::NoteOn { key, vel } => {
                    // A note-on with velocity 0 is a note-off by convention
                    let kind = if vel.as_int() > 0 {
                        EventKind::NoteOn
                    } else {
                        EventKind::NoteOff
                    };
                    events.push(TrackEvent {
                        kind,
                        position_in_beats,
                        key: key.as_int(),
                        velocity: vel.as_int(),
                    });
                }
                MidiMessage::NoteOff { key, vel } => {
                    events.push(TrackEvent {
                        kind: EventKind::NoteOff,
                        position_in_beats,
                        key: key.as_int(),
                        velocity: vel.as_int(),
                    });
                }
                _ => {}
            },
            TrackEventKind::Meta(MetaMessage::TrackName(raw)) => {
                if let Ok(text) = std::str::from_utf8(raw) {
                    let cleaned = text.trim_end_matches('\0').trim();
                    if !cleaned.is_empty() {
                        name = Some(cleaned.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    Track { events, name }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_with_zero_velocity_becomes_note_off() {
        use midly::num::{u4, u7, u28};

        let events = vec![
            midly::TrackEvent {
                delta: u28::new(0),
                kind: TrackEventKind::Midi {
                    channel: u4::new(9),
                    message: MidiMessage::NoteOn {
                        key: u7::new(36),
                        vel: u7::new(100),
                    },
                },
            },
            midly::TrackEvent {
                delta: u28::new(96),
                kind: TrackEventKind::Midi {
                    channel: u4::new(9),
                    message: MidiMessage::NoteOn {
                        key: u7::new(36),
                        vel: u7::new(0),
                    },
                },
            },
        ];

        let track = collect_track(&events, 96);
        assert_eq!(track.events.len(), 2);
        assert_eq!(track.events[0].kind, EventKind::NoteOn);
        assert_eq!(track.events[1].kind, EventKind::NoteOff);
        assert_eq!(track.events[1].position_in_beats, 1.0);
    }
}
