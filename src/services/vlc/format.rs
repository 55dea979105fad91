//! Display formatting for the published variables.

use super::types::PlayState;

const TITLE_MAX_CHARS: usize = 20;
const TITLE_KEEP_CHARS: usize = 10;
const TENTHS_WINDOW_MILLIS: u64 = 5_000;

/// Shortens long titles to the first 10 and last 10 characters.
pub fn truncate_title(name: &str) -> String {
    let count = name.chars().count();
    if count <= TITLE_MAX_CHARS {
        return name.to_string();
    }

    let head = name.chars().take(TITLE_KEEP_CHARS);
    let tail = name.chars().skip(count - TITLE_KEEP_CHARS);
    head.chain(tail).collect()
}

/// Glyph shown for a transport state.
pub fn status_glyph(state: PlayState) -> &'static str {
    match state {
        PlayState::Playing => "\u{23F5}",
        PlayState::Paused => "\u{23F8}",
        PlayState::Stopped | PlayState::Stopping => "\u{23F9}",
    }
}

/// Remaining time of the current track, split into display components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    millis: u64,
    tenths: bool,
}

impl Remaining {
    /// Remaining time for a track of `length_seconds` at `position`.
    ///
    /// Without tenths a whole second is added to any nonzero remainder so the
    /// display does not reach zero while audio is still playing.
    pub fn new(length_seconds: f64, position: f64, tenths: bool) -> Self {
        let left = length_seconds.max(0.0) * (1.0 - position.clamp(0.0, 1.0));
        // Saturates for absurd lengths instead of wrapping.
        let mut millis = (left * 1000.0).round() as u64;
        if !tenths && millis > 0 {
            millis = millis.saturating_add(1000);
        }
        Self { millis, tenths }
    }

    fn total_seconds(&self) -> u64 {
        self.millis / 1000
    }

    /// Hours, two digits.
    pub fn hh(&self) -> String {
        format!("{:02}", (self.total_seconds() / 3600) % 100)
    }

    /// Minutes within the hour, two digits.
    pub fn mm(&self) -> String {
        format!("{:02}", (self.total_seconds() / 60) % 60)
    }

    /// Seconds within the minute, two digits.
    pub fn ss(&self) -> String {
        format!("{:02}", self.total_seconds() % 60)
    }

    /// Always `hh:mm:ss`.
    pub fn hhmmss(&self) -> String {
        format!("{}:{}:{}", self.hh(), self.mm(), self.ss())
    }

    /// Shortest form: leading zero components are dropped, and in tenths
    /// mode the last five seconds count down as `s.d`.
    pub fn compact(&self) -> String {
        if self.tenths && self.millis > 0 && self.millis < TENTHS_WINDOW_MILLIS {
            let seconds = self.total_seconds() % 10;
            let decile = (self.millis % 1000) / 100;
            return format!("{seconds}.{decile}");
        }

        let total = self.total_seconds();
        let show_hours = total / 3600 % 100 > 0;
        let show_minutes = show_hours || (total / 60) % 60 > 0;

        let mut out = String::new();
        if show_hours {
            out.push_str(&self.hh());
            out.push(':');
        }
        if show_minutes {
            out.push_str(&self.mm());
            out.push(':');
        }
        out.push_str(&self.ss());
        out
    }
}
