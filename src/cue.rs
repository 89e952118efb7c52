use crate::parser;

use serde::{Deserialize, Serialize};

/// A time range and the sprite region shown while scrubbing through it.
///
/// Times are seconds. `x`/`y` locate the top-left corner of the region
/// inside the sprite image, `w`/`h` give its size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Cue {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            x: 0,
            y: 0,
            w: 0,
            h: 0,
        }
    }

    /// Inclusive on both ends. Never true when a bound is NaN.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Cues in the order they appeared in the source text.
///
/// Built once from a cue sheet and never modified afterwards; a new sheet
/// means a new index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CueIndex {
    cues: Vec<Cue>,
}

impl CueIndex {
    pub fn parse(text: &str) -> Self {
        parser::parse(text)
    }

    /// First cue, in input order, whose range contains `t`.
    pub fn lookup(&self, t: f64) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.contains(t))
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }
}

impl From<Vec<Cue>> for CueIndex {
    fn from(cues: Vec<Cue>) -> Self {
        Self { cues }
    }
}

impl<'a> IntoIterator for &'a CueIndex {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start: f64, end: f64, x: i64) -> Cue {
        Cue {
            x,
            ..Cue::new(start, end)
        }
    }

    #[test]
    fn empty_index_never_matches() {
        let index = CueIndex::parse("");
        assert!(index.is_empty());
        for t in [-1.0, 0.0, 0.5, 1e9, f64::NAN, f64::INFINITY] {
            assert_eq!(index.lookup(t), None);
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let index = CueIndex::from(vec![cue(5.0, 10.0, 0)]);
        assert!(index.lookup(5.0).is_some());
        assert!(index.lookup(10.0).is_some());
        assert!(index.lookup(4.999).is_none());
        assert!(index.lookup(10.001).is_none());
    }

    #[test]
    fn overlapping_cues_resolve_to_earliest() {
        let index = CueIndex::from(vec![cue(0.0, 10.0, 1), cue(2.0, 4.0, 2), cue(0.0, 10.0, 3)]);
        assert_eq!(index.lookup(3.0).map(|c| c.x), Some(1));
    }

    #[test]
    fn shared_boundary_goes_to_earlier_cue() {
        let index = CueIndex::from(vec![cue(0.0, 5.0, 1), cue(5.0, 10.0, 2)]);
        assert_eq!(index.lookup(5.0).map(|c| c.x), Some(1));
    }

    #[test]
    fn nan_bounds_never_match() {
        let index = CueIndex::from(vec![cue(f64::NAN, 10.0, 1), cue(0.0, 10.0, 2)]);
        assert_eq!(index.lookup(1.0).map(|c| c.x), Some(2));
    }

    #[test]
    fn serialises_as_array() {
        let index = CueIndex::from(vec![Cue {
            w: 160,
            h: 90,
            ..Cue::new(0.0, 5.0)
        }]);
        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"start": 0.0, "end": 5.0, "x": 0, "y": 0, "w": 160, "h": 90}])
        );
    }
}
