use crate::cue::{Cue, CueIndex};

use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1, one_of};
use nom::combinator::{opt, recognize};
use nom::sequence::{pair, tuple};
use nom::IResult;
use tracing::{debug, trace};

const HEADER: &str = "WEBVTT";
const ARROW: &str = "-->";

/// Parse a thumbnail cue sheet.
///
/// ```text
/// WEBVTT
///
/// 00:00.000 --> 00:05.000
/// x:0,y:0,w:160,h:90
/// ```
///
/// Never fails. Lines that don't fit are dropped, and numbers that don't
/// parse become NaN (times) or zero (region).
pub fn parse(input: &str) -> CueIndex {
    let mut cues = Vec::new();
    let mut open: Option<Cue> = None;

    for (lineno, line) in input.lines().enumerate() {
        let line = trim(line);
        if line.is_empty() {
            if let Some(cue) = open.take() {
                cues.push(cue);
            }
            continue;
        }
        if lineno == 0 && line.starts_with(HEADER) {
            continue;
        }

        if line.contains(ARROW) {
            match timing(line) {
                Some((start, end)) => {
                    if open.replace(Cue::new(start, end)).is_some() {
                        debug!(line = lineno + 1, "cue replaced before it was terminated");
                    }
                }
                None => debug!(line = lineno + 1, "ignoring timing line with extra separators"),
            }
        } else if let Some(cue) = open.as_mut() {
            apply_attributes(cue, line);
        } else {
            trace!(line = lineno + 1, "ignoring text outside of a cue");
        }
    }
    if let Some(cue) = open {
        cues.push(cue);
    }

    CueIndex::from(cues)
}

/// Seconds for `[[hours:]minutes:]seconds`. Extra fields beyond three are
/// not an error: only the first one is read.
pub fn parse_timecode(input: &str) -> f64 {
    let parts: Vec<&str> = input.split(':').collect();
    match parts.as_slice() {
        [hours, minutes, seconds] => {
            leading_float(hours) * 3600.0 + leading_float(minutes) * 60.0 + leading_float(seconds)
        }
        [minutes, seconds] => leading_float(minutes) * 60.0 + leading_float(seconds),
        [first, ..] => leading_float(first),
        [] => f64::NAN,
    }
}

// Includes U+FEFF so a byte-order mark never hides the header.
fn trim(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

fn timing(line: &str) -> Option<(f64, f64)> {
    let mut sides = line.split(ARROW);
    match (sides.next(), sides.next(), sides.next()) {
        (Some(start), Some(end), None) => {
            Some((parse_timecode(trim(start)), parse_timecode(trim(end))))
        }
        _ => None,
    }
}

fn apply_attributes(cue: &mut Cue, line: &str) {
    for attr in line.split(',') {
        let mut kv = attr.split(':');
        let (key, value) = match (kv.next(), kv.next(), kv.next()) {
            (Some(key), Some(value), None) => (trim(key), trim(value)),
            _ => {
                trace!(attr, "dropping malformed attribute");
                continue;
            }
        };
        let field = match key {
            "x" => &mut cue.x,
            "y" => &mut cue.y,
            "w" => &mut cue.w,
            "h" => &mut cue.h,
            _ => {
                trace!(key, "ignoring unknown attribute");
                continue;
            }
        };
        // A malformed value still overwrites, reading back as zero.
        *field = leading_integer(value).unwrap_or_else(|| {
            debug!(key, value, "attribute value is not an integer");
            0
        });
    }
}

fn decimal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

fn integer(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(one_of("+-")), digit1))(input)
}

// Longest numeric prefix wins; "5.5s" reads as 5.5.
fn leading_float(input: &str) -> f64 {
    decimal(trim(input))
        .ok()
        .and_then(|(_, num)| num.parse().ok())
        .unwrap_or(f64::NAN)
}

fn leading_integer(input: &str) -> Option<i64> {
    integer(trim(input))
        .ok()
        .and_then(|(_, num)| num.parse().ok())
}
