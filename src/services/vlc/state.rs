use super::types::{PlayState, PlaybackState, Playlist, TrackStatus};
use crate::config::{ChangeDetection, Config};

/// Behaviour knobs taken from the configuration at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Poll status every tick while a track is loaded
    pub high_resolution: bool,
    /// Throttled status polls run on every Nth tick
    pub throttle_divisor: u64,
    /// Count the last seconds down in tenths
    pub use_tenths: bool,
    /// How playlist changes are detected
    pub change_detection: ChangeDetection,
}

impl SyncOptions {
    /// Extracts the options from a validated config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            high_resolution: config.player.high_resolution,
            throttle_divisor: config.polling.throttle_divisor.max(1),
            use_tenths: config.display.use_tenths,
            change_detection: config.polling.playlist_change_detection,
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Orders responses of one endpoint so a slow, superseded response never
/// overwrites a newer one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sequence {
    issued: u64,
    applied: u64,
}

impl Sequence {
    /// Reserves the number for a request about to be sent.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether the response to request `seq` is newer than anything applied.
    /// Marks it applied when it is.
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.applied {
            return false;
        }
        self.applied = seq;
        true
    }
}

/// Everything the bridge mirrors from the player.
///
/// Owned by one service instance behind a single lock. Replaced wholesale on
/// reconfiguration.
#[derive(Debug, Default)]
pub struct BridgeState {
    /// Discrete player state
    pub playback: PlaybackState,
    /// Progress of the current item
    pub track: TrackStatus,
    /// Cached playlist in player order
    pub playlist: Playlist,
    /// Ticks of the playback loop so far
    pub poll_counter: u64,
    /// Status request ordering
    pub status_seq: Sequence,
    /// Playlist request ordering
    pub playlist_seq: Sequence,
    /// Set when the owning service lets go; late responses are dropped
    pub closed: bool,
}

impl BridgeState {
    /// Fresh state for a new connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether this playback tick makes a network round-trip, then
    /// advances the counter.
    pub fn tick_playback(&mut self, options: &SyncOptions) -> bool {
        let active = self.playback.play_state != PlayState::Stopped && options.high_resolution;
        let due = active || self.poll_counter % options.throttle_divisor == 0;
        self.poll_counter = self.poll_counter.wrapping_add(1);
        due
    }

    /// Moves the counter to the next multiple of the divisor so the next
    /// tick is never throttled.
    pub fn nudge(&mut self, options: &SyncOptions) {
        let divisor = options.throttle_divisor;
        self.poll_counter += (divisor - self.poll_counter % divisor) % divisor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(high_resolution: bool) -> SyncOptions {
        SyncOptions {
            high_resolution,
            ..SyncOptions::default()
        }
    }

    #[test]
    fn throttled_ticks_poll_on_multiples_of_divisor() {
        let options = options(false);
        let mut state = BridgeState::new();
        state.playback.play_state = PlayState::Playing;

        let polled: Vec<u64> = (0..12).filter(|_| state.tick_playback(&options)).collect();

        assert_eq!(polled, vec![0, 5, 10]);
    }

    #[test]
    fn high_resolution_polls_every_tick_while_playing() {
        let options = options(true);
        let mut state = BridgeState::new();
        state.playback.play_state = PlayState::Paused;

        assert!((0..7).all(|_| state.tick_playback(&options)));
    }

    #[test]
    fn high_resolution_still_throttles_when_stopped() {
        let options = options(true);
        let mut state = BridgeState::new();

        assert!(state.tick_playback(&options));
        assert!(!state.tick_playback(&options));
    }

    #[test]
    fn nudge_makes_next_tick_poll() {
        let options = options(false);
        let mut state = BridgeState::new();

        for start in 0..10 {
            state.poll_counter = start;
            state.nudge(&options);
            assert!(state.tick_playback(&options), "counter started at {start}");
        }
    }

    #[test]
    fn stale_sequence_numbers_are_rejected() {
        let mut seq = Sequence::default();
        let first = seq.issue();
        let second = seq.issue();

        assert!(seq.accept(second));
        assert!(!seq.accept(first));
        assert!(!seq.accept(second));
    }
}
