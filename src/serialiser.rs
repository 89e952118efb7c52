use crate::cue::{Cue, CueIndex};

use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

pub fn serialise<P: AsRef<Path>>(index: &CueIndex, output: P) -> Result<()> {
    let file = std::fs::File::create(output).context("Failed to create file!")?;
    let mut writer = BufWriter::new(file);
    write_index(&mut writer, index).context("Failed to write to output file.")?;
    writer.flush().context("Failed to write to output file.")?;
    Ok(())
}

pub fn write_index<W: Write>(buf: &mut W, index: &CueIndex) -> Result<()> {
    writeln!(buf, "WEBVTT")?;
    writeln!(buf)?;
    for (i, cue) in index.iter().enumerate() {
        if !writable(cue.start) || !writable(cue.end) {
            warn!(
                cue = i,
                start = cue.start,
                end = cue.end,
                "skipping cue without usable times"
            );
            continue;
        }
        write_cue(buf, cue)?;
    }
    Ok(())
}

fn writable(seconds: f64) -> bool {
    seconds.is_finite() && seconds >= 0.0
}

fn write_cue<W: Write>(buf: &mut W, cue: &Cue) -> Result<()> {
    write_ts(buf, cue.start)?;
    write!(buf, " --> ")?;
    write_ts(buf, cue.end)?;
    writeln!(buf)?;
    writeln!(buf, "x:{},y:{},w:{},h:{}", cue.x, cue.y, cue.w, cue.h)?;
    writeln!(buf)?;
    Ok(())
}

fn write_ts<W: Write>(buf: &mut W, seconds: f64) -> Result<()> {
    let total_millis = (seconds * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    write!(buf, "{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)?;
    Ok(())
}

/// `MM:SS` for the player's time readout. Minutes keep counting past an
/// hour; an unknown time reads as `00:00`.
pub fn format_clock(seconds: f64) -> String {
    if seconds.is_nan() {
        return "00:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as i64;
    let secs = (seconds % 60.0).floor() as i64;
    format!("{:02}:{:02}", minutes, secs)
}
