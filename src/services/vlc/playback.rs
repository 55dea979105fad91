use tracing::debug;

use super::{
    format::{Remaining, status_glyph, truncate_title},
    host::{
        HostSink, VAR_HH, VAR_HHMMSS, VAR_LEFT, VAR_MM, VAR_SS, VAR_STATUS, VAR_TRACK_ID,
        VAR_TRACK_NAME, VAR_TRACK_NUMBER, VAR_VERSION,
    },
    snapshot::StatusSnapshot,
    state::{BridgeState, SyncOptions},
    types::{PlayState, TrackId, TrackStatus},
};

/// Item ids below this mean nothing is selected.
const FIRST_REAL_ITEM_ID: i64 = 2;

/// What a status poll changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusOutcome {
    /// A discrete field (state or a toggle) changed
    pub state_changed: bool,
    /// Current item, position or state changed and variables were republished
    pub republished: bool,
}

#[derive(PartialEq)]
struct Fingerprint<'a> {
    track_id: &'a TrackId,
    position: f64,
    play_state: PlayState,
}

impl BridgeState {
    /// Applies one status poll and pushes whatever changed to the host.
    pub fn apply_status(
        &mut self,
        snapshot: StatusSnapshot,
        options: &SyncOptions,
        host: &dyn HostSink,
    ) -> StatusOutcome {
        let before_id = self.playback.current_track_id.clone();
        let before_position = self.track.position;
        let before_state = self.playback.play_state;

        if let Some(version) = snapshot.version.filter(|v| !v.is_empty()) {
            self.playback.version = version;
        }

        let playback = &mut self.playback;
        let mut state_changed = false;
        state_changed |= replace(&mut playback.play_state, snapshot.play_state);
        state_changed |= replace(&mut playback.repeat, snapshot.repeat);
        state_changed |= replace(&mut playback.loop_enabled, snapshot.loop_enabled);
        state_changed |= replace(&mut playback.shuffle, snapshot.shuffle);
        state_changed |= replace(&mut playback.fullscreen, snapshot.fullscreen);

        let reported_id = TrackId::from(snapshot.current_plid);
        if snapshot.current_plid < FIRST_REAL_ITEM_ID {
            self.track = TrackStatus::default();
            self.playback.current_track_id = reported_id.clone();
        } else if !self.playlist.is_empty() {
            self.track = TrackStatus {
                title: self
                    .playlist
                    .get(&reported_id)
                    .map(|entry| truncate_title(&entry.name))
                    .unwrap_or_default(),
                length_seconds: snapshot.length_seconds,
                position: snapshot.position,
                elapsed_seconds: snapshot.elapsed_seconds,
                playlist_index: self.playlist.slot_of(&reported_id),
            };
            self.playback.current_track_id = reported_id.clone();
        }

        let before = Fingerprint {
            track_id: &before_id,
            position: before_position,
            play_state: before_state,
        };
        let after = Fingerprint {
            track_id: &reported_id,
            position: snapshot.position,
            play_state: self.playback.play_state,
        };
        let republished = before != after;

        if state_changed {
            debug!(
                "Player state: {} loop={} repeat={} shuffle={} fullscreen={}",
                self.playback.play_state,
                self.playback.loop_enabled,
                self.playback.repeat,
                self.playback.shuffle,
                self.playback.fullscreen
            );
        }

        if republished {
            self.publish_variables(options, host);
        }
        if state_changed || republished {
            host.check_feedbacks(&self.playback);
        }

        StatusOutcome {
            state_changed,
            republished,
        }
    }

    /// Pushes every derived display variable to the host.
    pub fn publish_variables(&self, options: &SyncOptions, host: &dyn HostSink) {
        let left = Remaining::new(
            self.track.length_seconds,
            self.track.position,
            options.use_tenths,
        );

        let values = [
            (VAR_VERSION, self.playback.version.clone()),
            (VAR_TRACK_ID, self.playback.current_track_id.to_string()),
            (VAR_TRACK_NAME, self.track.title.clone()),
            (VAR_TRACK_NUMBER, self.track.playlist_index.to_string()),
            (VAR_STATUS, status_glyph(self.playback.play_state).to_string()),
            (VAR_HHMMSS, left.hhmmss()),
            (VAR_HH, left.hh()),
            (VAR_MM, left.mm()),
            (VAR_SS, left.ss()),
            (VAR_LEFT, left.compact()),
        ];

        for (name, value) in values {
            host.set_variable(name, Some(value));
        }
    }
}

fn replace<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::vlc::{
        host::testing::RecordingHost,
        types::{Playlist, PlaylistEntry},
    };

    fn status(state: PlayState, plid: i64, position: f64) -> StatusSnapshot {
        StatusSnapshot {
            version: Some("3.0.20".into()),
            play_state: state,
            repeat: false,
            loop_enabled: false,
            shuffle: false,
            fullscreen: false,
            current_plid: plid,
            length_seconds: 125.0,
            position,
            elapsed_seconds: 125.0 * position,
        }
    }

    fn state_with_playlist() -> BridgeState {
        let mut state = BridgeState::new();
        state.playlist = Playlist::new(vec![
            PlaylistEntry {
                id: TrackId::new("4"),
                name: "A very long title for a short display".into(),
                ..Default::default()
            },
            PlaylistEntry {
                id: TrackId::new("5"),
                name: "Short".into(),
                ..Default::default()
            },
        ]);
        state
    }

    #[test]
    fn playing_track_is_resolved_through_playlist() {
        let host = RecordingHost::default();
        let mut state = state_with_playlist();

        let outcome = state.apply_status(
            status(PlayState::Playing, 5, 0.0),
            &SyncOptions::default(),
            &host,
        );

        assert!(outcome.state_changed);
        assert!(outcome.republished);
        assert_eq!(state.track.title, "Short");
        assert_eq!(state.track.playlist_index, 2);
        assert_eq!(host.variable(VAR_TRACK_NUMBER).as_deref(), Some("2"));
        assert_eq!(host.variable(VAR_STATUS).as_deref(), Some("⏵"));
        assert_eq!(host.variable(VAR_LEFT).as_deref(), Some("02:06"));
        assert_eq!(host.variable(VAR_VERSION).as_deref(), Some("3.0.20"));
        assert_eq!(host.feedback_checks(), 1);
    }

    #[test]
    fn long_titles_are_truncated() {
        let host = RecordingHost::default();
        let mut state = state_with_playlist();

        state.apply_status(
            status(PlayState::Playing, 4, 0.5),
            &SyncOptions::default(),
            &host,
        );

        assert_eq!(state.track.title, "A very lonrt display");
    }

    #[test]
    fn sentinel_id_resets_track() {
        let host = RecordingHost::default();
        let mut state = state_with_playlist();
        let options = SyncOptions::default();
        state.apply_status(status(PlayState::Playing, 5, 0.3), &options, &host);

        state.apply_status(status(PlayState::Stopped, -1, 0.0), &options, &host);

        assert_eq!(state.track, TrackStatus::default());
        assert_eq!(state.playback.current_track_id, TrackId::new("-1"));
    }

    #[test]
    fn empty_cache_leaves_track_untouched() {
        let host = RecordingHost::default();
        let mut state = BridgeState::new();

        state.apply_status(
            status(PlayState::Playing, 9, 0.5),
            &SyncOptions::default(),
            &host,
        );

        assert_eq!(state.track, TrackStatus::default());
        assert_eq!(state.playback.current_track_id, TrackId::default());
        assert_eq!(state.playback.play_state, PlayState::Playing);
    }

    #[test]
    fn identical_poll_publishes_nothing() {
        let host = RecordingHost::default();
        let mut state = state_with_playlist();
        let options = SyncOptions::default();
        state.apply_status(status(PlayState::Paused, 5, 0.4), &options, &host);
        host.clear();

        let outcome = state.apply_status(status(PlayState::Paused, 5, 0.4), &options, &host);

        assert_eq!(outcome, StatusOutcome::default());
        assert!(host.events().is_empty());
    }

    #[test]
    fn position_change_republishes_without_state_change() {
        let host = RecordingHost::default();
        let mut state = state_with_playlist();
        let options = SyncOptions::default();
        state.apply_status(status(PlayState::Playing, 5, 0.4), &options, &host);
        host.clear();

        let outcome = state.apply_status(status(PlayState::Playing, 5, 0.5), &options, &host);

        assert!(!outcome.state_changed);
        assert!(outcome.republished);
        assert!(host.variable(VAR_LEFT).is_some());
    }

    #[test]
    fn every_toggle_is_committed() {
        let host = RecordingHost::default();
        let mut state = BridgeState::new();
        let mut snapshot = status(PlayState::Stopped, -1, 0.0);
        snapshot.repeat = true;
        snapshot.loop_enabled = true;
        snapshot.shuffle = true;
        snapshot.fullscreen = true;

        let outcome = state.apply_status(snapshot, &SyncOptions::default(), &host);

        assert!(outcome.state_changed);
        assert!(state.playback.repeat);
        assert!(state.playback.loop_enabled);
        assert!(state.playback.shuffle);
        assert!(state.playback.fullscreen);
    }

    #[test]
    fn version_is_sticky() {
        let host = RecordingHost::default();
        let mut state = BridgeState::new();
        let options = SyncOptions::default();
        state.apply_status(status(PlayState::Stopped, -1, 0.0), &options, &host);

        let mut snapshot = status(PlayState::Stopped, -1, 0.0);
        snapshot.version = None;
        state.apply_status(snapshot, &options, &host);

        assert_eq!(state.playback.version, "3.0.20");
    }
}
