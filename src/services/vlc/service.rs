use std::{sync::Arc, time::Duration};

use tokio::{
    sync::Mutex,
    task::{JoinHandle, JoinSet},
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, instrument, trace, warn};

use super::{
    Action,
    dispatch::dispatch,
    health::{Health, StatusReporter},
    host::HostSink,
    snapshot::{PlaylistSnapshot, StatusSnapshot},
    state::{BridgeState, SyncOptions},
    transport::{
        Connection, HttpTransport, PLAYLIST_PATH, ReportingTransport, STATUS_PATH, Transport,
    },
    types::{PlaybackState, Playlist, TrackStatus},
};
use crate::config::Config;

/// State, link and host of one configured player.
struct Bridge {
    state: Mutex<BridgeState>,
    link: ReportingTransport,
    host: Arc<dyn HostSink>,
    options: SyncOptions,
}

impl Bridge {
    async fn playlist_tick(&self) {
        let seq = self.state.lock().await.playlist_seq.issue();
        self.poll_playlist(seq).await;
    }

    async fn playback_tick(&self) -> bool {
        let seq = {
            let mut state = self.state.lock().await;
            if !state.tick_playback(&self.options) {
                return false;
            }
            state.status_seq.issue()
        };
        self.poll_status(seq).await;
        true
    }

    async fn poll_playlist(&self, seq: u64) {
        let Ok(body) = self.link.get(PLAYLIST_PATH).await else {
            return;
        };
        let snapshot = match PlaylistSnapshot::parse(&body) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Ignoring playlist response: {e}");
                return;
            }
        };

        let mut state = self.state.lock().await;
        if state.closed {
            return;
        }
        if !state.playlist_seq.accept(seq) {
            trace!("Discarding stale playlist response #{seq}");
            return;
        }
        state.apply_playlist(snapshot, &self.options, self.host.as_ref());
    }

    async fn poll_status(&self, seq: u64) {
        let Ok(body) = self.link.get(STATUS_PATH).await else {
            return;
        };
        let snapshot = match StatusSnapshot::parse(&body) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Ignoring status response: {e}");
                return;
            }
        };

        let mut state = self.state.lock().await;
        if state.closed {
            return;
        }
        if !state.status_seq.accept(seq) {
            trace!("Discarding stale status response #{seq}");
            return;
        }
        state.apply_status(snapshot, &self.options, self.host.as_ref());
    }

    /// Drops every later result. Anything already applied stays applied.
    async fn close(&self) {
        self.link.close();
        self.state.lock().await.closed = true;
    }

    /// Ticks on `period`, spawning each poll so a slow response never delays
    /// the next tick. In-flight polls die with the loop.
    async fn run_playlist_loop(self: Arc<Self>, period: Duration) {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let seq = self.state.lock().await.playlist_seq.issue();
                    let bridge = Arc::clone(&self);
                    in_flight.spawn(async move { bridge.poll_playlist(seq).await });
                }
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }
    }

    async fn run_playback_loop(self: Arc<Self>, period: Duration) {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let seq = {
                        let mut state = self.state.lock().await;
                        state
                            .tick_playback(&self.options)
                            .then(|| state.status_seq.issue())
                    };
                    if let Some(seq) = seq {
                        let bridge = Arc::clone(&self);
                        in_flight.spawn(async move { bridge.poll_status(seq).await });
                    }
                }
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }
    }
}

/// Bridge between a host and one VLC instance.
///
/// Owns the polling loops; dropping the service stops them together with
/// every request still in flight.
pub struct VlcService {
    host: Arc<dyn HostSink>,
    bridge: Option<Arc<Bridge>>,
    playlist_period: Duration,
    playback_period: Duration,
    loops: Vec<JoinHandle<()>>,
    running: bool,
}

impl VlcService {
    /// Connects to the configured player over HTTP and starts polling.
    ///
    /// Without a host or port the service stays idle and reports
    /// "No host configured".
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn start(config: &Config, host: Arc<dyn HostSink>) -> crate::Result<Self> {
        let mut service = Self::connect(config, host)?;
        service.run();
        Ok(service)
    }

    /// Like [`start`](Self::start) but without spawning the polling loops,
    /// for one-shot use through the manual ticks.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    #[instrument(skip_all, fields(player = %config.player.endpoint()))]
    pub fn connect(config: &Config, host: Arc<dyn HostSink>) -> crate::Result<Self> {
        if !config.player.is_configured() {
            return Ok(Self::unconfigured(host));
        }

        let transport = HttpTransport::new(
            Connection::from_config(&config.player),
            config.polling.request_timeout(),
        )?;

        Ok(Self::with_transport(config, host, Arc::new(transport)))
    }

    /// Builds an idle service over any transport. Nothing is polled until
    /// [`run`](Self::run) or a manual tick.
    pub fn with_transport(
        config: &Config,
        host: Arc<dyn HostSink>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let reporter = Arc::new(StatusReporter::new(
            Arc::clone(&host),
            config.player.endpoint(),
        ));
        reporter.announce(Health::Warning("Connecting".into()));

        let bridge = Bridge {
            state: Mutex::new(BridgeState::new()),
            link: ReportingTransport::new(transport, reporter),
            host: Arc::clone(&host),
            options: SyncOptions::from_config(config),
        };

        Self {
            host,
            bridge: Some(Arc::new(bridge)),
            playlist_period: config.polling.playlist_interval(),
            playback_period: config.polling.playback_interval(),
            loops: Vec::new(),
            running: false,
        }
    }

    fn unconfigured(host: Arc<dyn HostSink>) -> Self {
        warn!("No player host configured");
        host.set_status(&Health::Warning("No host configured".into()));

        Self {
            host,
            bridge: None,
            playlist_period: Duration::ZERO,
            playback_period: Duration::ZERO,
            loops: Vec::new(),
            running: false,
        }
    }

    /// Spawns the playlist and playback polling loops.
    pub fn run(&mut self) {
        self.running = true;
        let Some(bridge) = &self.bridge else {
            return;
        };
        if !self.loops.is_empty() {
            return;
        }

        info!(
            "Polling playlist every {:?}, playback every {:?}",
            self.playlist_period, self.playback_period
        );
        self.loops = vec![
            tokio::spawn(Arc::clone(bridge).run_playlist_loop(self.playlist_period)),
            tokio::spawn(Arc::clone(bridge).run_playback_loop(self.playback_period)),
        ];
    }

    /// Whether a player is configured.
    pub fn is_configured(&self) -> bool {
        self.bridge.is_some()
    }

    /// Sends one command to the player and makes the next playback tick poll.
    pub async fn dispatch(&self, action: Action) {
        match &self.bridge {
            Some(bridge) => {
                dispatch(action, &bridge.state, &bridge.link, &bridge.options).await;
            }
            None => debug!("Dropping {action}: no player configured"),
        }
    }

    /// Runs one playlist poll to completion.
    pub async fn playlist_tick(&self) {
        if let Some(bridge) = &self.bridge {
            bridge.playlist_tick().await;
        }
    }

    /// Runs one playback tick to completion. Returns whether it polled.
    pub async fn playback_tick(&self) -> bool {
        match &self.bridge {
            Some(bridge) => bridge.playback_tick().await,
            None => false,
        }
    }

    /// Current discrete player state.
    pub async fn playback(&self) -> Option<PlaybackState> {
        let bridge = self.bridge.as_ref()?;
        Some(bridge.state.lock().await.playback.clone())
    }

    /// Progress of the current item.
    pub async fn track(&self) -> Option<TrackStatus> {
        let bridge = self.bridge.as_ref()?;
        Some(bridge.state.lock().await.track.clone())
    }

    /// Cached playlist.
    pub async fn playlist(&self) -> Option<Playlist> {
        let bridge = self.bridge.as_ref()?;
        Some(bridge.state.lock().await.playlist.clone())
    }

    /// Tears everything down and starts over with `config`. No state is
    /// carried across. Polling resumes if the service was running.
    ///
    /// # Errors
    /// Returns error if the new HTTP client cannot be built; the service is
    /// left stopped.
    pub async fn reconfigure(&mut self, config: &Config) -> crate::Result<()> {
        info!("Reconfiguring player connection");
        self.close().await;

        let fresh = Self::connect(config, Arc::clone(&self.host))?;
        self.take_over(fresh);
        Ok(())
    }

    /// [`reconfigure`](Self::reconfigure) over an already built transport.
    pub async fn reconfigure_with_transport(
        &mut self,
        config: &Config,
        transport: Arc<dyn Transport>,
    ) {
        info!("Reconfiguring player connection");
        self.close().await;

        let fresh = Self::with_transport(config, Arc::clone(&self.host), transport);
        self.take_over(fresh);
    }

    /// Stops polling and reports the service as disabled.
    pub async fn shutdown(&mut self) {
        self.close().await;
        self.running = false;
        self.host.set_status(&Health::Warning("Disabled".into()));
        info!("VLC service stopped");
    }

    fn take_over(&mut self, mut fresh: Self) {
        if self.running {
            fresh.run();
        }
        *self = fresh;
    }

    async fn close(&mut self) {
        self.stop_loops();
        if let Some(bridge) = self.bridge.take() {
            bridge.close().await;
        }
    }

    fn stop_loops(&mut self) {
        for handle in self.loops.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for VlcService {
    fn drop(&mut self) {
        self.stop_loops();
        if let Some(bridge) = &self.bridge {
            bridge.link.close();
        }
    }
}
