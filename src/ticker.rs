use std::time::{Duration, Instant};

use crate::rankings::{TeamLatest, result_label};

/// Cells per second the track moves; the loop never runs shorter than
/// [`MIN_LOOP_SECS`] so sparse content doesn't race.
pub const SCROLL_CELLS_PER_SEC: f64 = 12.0;
pub const MIN_LOOP_SECS: f64 = 20.0;

pub const NO_RESULTS_MESSAGE: &str = "No results found";
const CLOSED_FALLBACK_NOTE: &str = "GROUND CLOSED";
const ITEM_SEPARATOR: &str = "  •  ";

/// The ticker stays on screen only near the top of the results table.
pub const SCROLL_HIDE_THRESHOLD: usize = 3;

pub fn ticker_visible(table_scroll: usize) -> bool {
    table_scroll <= SCROLL_HIDE_THRESHOLD
}

#[derive(Debug, Clone, Copy)]
struct TrackTiming {
    width: usize,
    loop_duration: Duration,
    epoch: Instant,
}

/// One logical marquee content block plus its timing.
///
/// Animated tracks render the block twice back-to-back and translate exactly
/// one copy-width per loop; the copies are identical by construction, so the
/// wrap shows no seam. Timing is not set at build time: the event loop calls
/// [`TickerTrack::ensure_timed`] once the content has actually been laid
/// out, and only then is the loop duration derived from the measured width.
#[derive(Debug, Clone)]
pub struct TickerTrack {
    content: String,
    animated: bool,
    timing: Option<TrackTiming>,
}

impl TickerTrack {
    pub fn build(entries: &[TeamLatest]) -> Self {
        if entries.is_empty() {
            return Self::static_message(NO_RESULTS_MESSAGE);
        }
        let mut content = String::new();
        for entry in entries {
            content.push_str(&format_entry(entry));
            content.push_str(ITEM_SEPARATOR);
        }
        Self {
            content,
            animated: true,
            timing: None,
        }
    }

    /// Closure takeover: a static banner that replaces the results track.
    pub fn closed(note: Option<&str>) -> Self {
        let note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(CLOSED_FALLBACK_NOTE);
        Self::static_message(&format!("⚠ {note}"))
    }

    fn static_message(message: &str) -> Self {
        Self {
            content: message.to_string(),
            animated: false,
            timing: None,
        }
    }

    /// The measure step of render → measure → time. Idempotent; a no-op for
    /// static tracks. Until it runs the track draws at offset zero.
    pub fn ensure_timed(&mut self) {
        if !self.animated || self.timing.is_some() {
            return;
        }
        let width = self.content_width();
        if width == 0 {
            return;
        }
        self.timing = Some(TrackTiming {
            width,
            loop_duration: loop_duration(width),
            epoch: Instant::now(),
        });
    }

    pub fn offset_at(&self, now: Instant) -> usize {
        let Some(timing) = self.timing else {
            return 0;
        };
        offset_for(
            now.saturating_duration_since(timing.epoch),
            timing.loop_duration,
            timing.width,
        )
    }

    /// A `cols`-wide window into the doubled content starting at `offset`.
    pub fn window(&self, offset: usize, cols: usize) -> String {
        let width = self.content_width();
        if width == 0 {
            return String::new();
        }
        let offset = offset % width;
        self.content
            .chars()
            .chain(self.content.chars())
            .skip(offset)
            .take(cols)
            .collect()
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn content_width(&self) -> usize {
        self.content.chars().count()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Loop time for one copy-width of content at the fixed scroll speed.
pub fn loop_duration(width_cells: usize) -> Duration {
    let secs = (width_cells as f64 / SCROLL_CELLS_PER_SEC).max(MIN_LOOP_SECS);
    Duration::from_secs_f64(secs)
}

/// Pure animation clock: elapsed time → cell offset, one width per loop.
pub fn offset_for(elapsed: Duration, loop_duration: Duration, width: usize) -> usize {
    if width == 0 || loop_duration.is_zero() {
        return 0;
    }
    let frac = (elapsed.as_secs_f64() / loop_duration.as_secs_f64()).fract();
    ((frac * width as f64) as usize) % width
}

fn format_entry(entry: &TeamLatest) -> String {
    let record = &entry.record;
    format!(
        "{} │ {} vs {} │ {}",
        entry.team.label,
        record.home,
        record.away,
        result_label(record)
    )
}
