/// A single drum hit inside a pattern.
///
/// `position` is in Hydrogen ticks relative to the start of the pattern,
/// `velocity` is normalized to `[0, 1]`, and `instrument` indexes into the
/// drumkit's instrument list.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub position: u32,
    pub velocity: f64,
    pub instrument: usize,
}

impl Note {
    pub fn new(position: u32, velocity: f64, instrument: usize) -> Self {
        Self {
            position,
            velocity,
            instrument,
        }
    }
}
