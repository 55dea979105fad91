use tracing::debug;

use super::{
    host::{HostSink, slot_variable},
    snapshot::PlaylistSnapshot,
    state::{BridgeState, SyncOptions},
    types::{Playlist, PlaylistEntry},
};
use crate::config::ChangeDetection;

/// Whether `new` should replace `cached` under the given policy.
pub fn playlist_changed(
    cached: &Playlist,
    new: &[PlaylistEntry],
    detection: ChangeDetection,
) -> bool {
    match detection {
        ChangeDetection::Heuristic => {
            cached.is_empty()
                || cached.len() != new.len()
                || cached.ids().next() != new.first().map(|entry| &entry.id)
        }
        ChangeDetection::Strict => !cached.ids().eq(new.iter().map(|entry| &entry.id)),
    }
}

impl BridgeState {
    /// Applies one playlist poll.
    ///
    /// On change the cache is replaced wholesale, every slot name is
    /// republished and slots past the new length are cleared. Returns whether
    /// the cache was replaced.
    pub fn apply_playlist(
        &mut self,
        snapshot: PlaylistSnapshot,
        options: &SyncOptions,
        host: &dyn HostSink,
    ) -> bool {
        let Some(entries) = snapshot.entries else {
            return false;
        };

        if !playlist_changed(&self.playlist, &entries, options.change_detection) {
            return false;
        }

        let old_len = self.playlist.len();
        self.playlist = Playlist::new(entries);
        debug!(
            "Playlist replaced: {} -> {} entries",
            old_len,
            self.playlist.len()
        );

        for (index, entry) in self.playlist.entries().iter().enumerate() {
            host.set_variable(&slot_variable(index + 1), Some(entry.name.clone()));
        }
        for slot in self.playlist.len() + 1..=old_len {
            host.set_variable(&slot_variable(slot), None);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::vlc::{host::testing::RecordingHost, types::TrackId};

    fn entries(ids: &[&str]) -> Vec<PlaylistEntry> {
        ids.iter()
            .map(|id| PlaylistEntry {
                id: TrackId::new(*id),
                name: format!("Track {id}"),
                duration_seconds: 60,
                uri: format!("file:///{id}.mp3"),
            })
            .collect()
    }

    fn snapshot(ids: &[&str]) -> PlaylistSnapshot {
        PlaylistSnapshot {
            entries: Some(entries(ids)),
        }
    }

    #[test]
    fn heuristic_misses_reorder_behind_first_entry() {
        let cached = Playlist::new(entries(&["1", "2", "3"]));

        assert!(!playlist_changed(
            &cached,
            &entries(&["1", "3", "2"]),
            ChangeDetection::Heuristic
        ));
        assert!(playlist_changed(
            &cached,
            &entries(&["1", "3", "2"]),
            ChangeDetection::Strict
        ));
    }

    #[test]
    fn empty_cache_always_changes() {
        let cached = Playlist::default();

        assert!(playlist_changed(&cached, &[], ChangeDetection::Heuristic));
        assert!(!playlist_changed(&cached, &[], ChangeDetection::Strict));
    }

    #[test]
    fn first_poll_publishes_every_slot() {
        let host = RecordingHost::default();
        let mut state = BridgeState::new();

        let changed = state.apply_playlist(snapshot(&["4", "5"]), &SyncOptions::default(), &host);

        assert!(changed);
        assert_eq!(
            host.variables(),
            vec![
                ("pname_1".to_string(), Some("Track 4".to_string())),
                ("pname_2".to_string(), Some("Track 5".to_string())),
            ]
        );
    }

    #[test]
    fn unchanged_playlist_is_silent() {
        let host = RecordingHost::default();
        let mut state = BridgeState::new();
        let options = SyncOptions::default();
        state.apply_playlist(snapshot(&["4", "5"]), &options, &host);
        host.clear();

        let changed = state.apply_playlist(snapshot(&["4", "5"]), &options, &host);

        assert!(!changed);
        assert!(host.events().is_empty());
    }

    #[test]
    fn shrinking_playlist_clears_trailing_slots() {
        let host = RecordingHost::default();
        let mut state = BridgeState::new();
        let options = SyncOptions::default();
        state.apply_playlist(snapshot(&["1", "2", "3"]), &options, &host);
        host.clear();

        state.apply_playlist(snapshot(&["7"]), &options, &host);

        assert_eq!(state.playlist.len(), 1);
        assert_eq!(host.variable("pname_1").as_deref(), Some("Track 7"));
        assert!(host.variables().contains(&("pname_2".to_string(), None)));
        assert!(host.variables().contains(&("pname_3".to_string(), None)));
    }

    #[test]
    fn missing_container_keeps_cache() {
        let host = RecordingHost::default();
        let mut state = BridgeState::new();
        let options = SyncOptions::default();
        state.apply_playlist(snapshot(&["1"]), &options, &host);

        let changed = state.apply_playlist(PlaylistSnapshot { entries: None }, &options, &host);

        assert!(!changed);
        assert_eq!(state.playlist.len(), 1);
    }
}
