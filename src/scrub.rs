//! Seek-bar geometry: pointer positions to media time, and where the
//! thumbnail panel goes while the pointer hovers the bar.
//!
//! All coordinates are client pixels, as reported by pointer events.

use crate::cue::{Cue, CueIndex};

use serde::Serialize;

/// Horizontal extent of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub width: f64,
}

impl Bounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }
}

/// Where to draw the preview panel, relative to the player container, and
/// how far to shift the sprite image inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub left: f64,
    pub width: i64,
    pub height: i64,
    pub offset_x: i64,
    pub offset_y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preview {
    Hidden,
    Visible(Placement),
}

fn known_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// Media time under the pointer. `None` until the duration is known.
pub fn pointer_time(pointer_x: f64, bar: Bounds, duration: f64) -> Option<f64> {
    if !known_duration(duration) || bar.width.is_nan() || bar.width <= 0.0 {
        return None;
    }
    Some((pointer_x - bar.left) / bar.width * duration)
}

/// Centre the panel on the pointer, keeping it inside the container where
/// it fits. A panel wider than the container hangs off the left edge.
pub fn place(cue: &Cue, pointer_x: f64, container: Bounds) -> Placement {
    let width = cue.w as f64;
    let mut left = pointer_x - container.left - width / 2.0;
    if left < 0.0 {
        left = 0.0;
    }
    if left + width > container.width {
        left = container.width - width;
    }
    Placement {
        left,
        width: cue.w,
        height: cue.h,
        offset_x: -cue.x,
        offset_y: -cue.y,
    }
}

pub fn preview_at(
    index: Option<&CueIndex>,
    pointer_x: f64,
    bar: Bounds,
    container: Bounds,
    duration: f64,
) -> Preview {
    let Some(index) = index.filter(|index| !index.is_empty()) else {
        return Preview::Hidden;
    };
    pointer_time(pointer_x, bar, duration)
        .and_then(|t| index.lookup(t))
        .map_or(Preview::Hidden, |cue| {
            Preview::Visible(place(cue, pointer_x, container))
        })
}

/// Jump by `delta` seconds, staying within the media. Forward jumps wait
/// for a duration; a live stream's infinite one never clamps.
pub fn skip(current: f64, delta: f64, duration: f64) -> f64 {
    if delta < 0.0 {
        (current + delta).max(0.0)
    } else if duration > 0.0 {
        (current + delta).min(duration)
    } else {
        current
    }
}
