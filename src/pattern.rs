//! Pattern types for the Hydrogen song model.
//!
//! A `Pattern` is one measure of notes. Equality is deliberately defined
//! over note content only: two patterns holding the same notes are the
//! same pattern no matter what they are called. This is what lets the
//! segmentation engine collapse repeated measures into a single reusable
//! pattern referenced many times from the sequence.

use crate::note::Note;

/// One measure worth of notes, named for reference from the sequence.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: String,
    pub size: u32,
    pub notes: Vec<Note>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, size: u32, notes: Vec<Note>) -> Self {
        Self {
            name: name.into(),
            size,
            notes,
        }
    }
}

/// Content-only equality: name and size do not participate.
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.notes == other.notes
    }
}

/// Insertion-ordered list of unique patterns, first-seen-wins.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

/// Play order of the song: pattern names, repeats allowed.
pub type PatternSequence = Vec<String>;

impl PatternList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate pattern, deduplicating by content. Returns the
    /// name that should go into the sequence (the existing pattern's name
    /// when the candidate is a duplicate) and whether the candidate was
    /// genuinely new.
    pub fn insert(&mut self, candidate: Pattern) -> (String, bool) {
        for known in &self.patterns {
            if *known == candidate {
                return (known.name.clone(), false);
            }
        }

        let name = candidate.name.clone();
        self.patterns.push(candidate);
        (name, true)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatternList {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}
