use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{error, info, warn};

use super::{TransportError, host::HostSink};

/// Connectivity status shown to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    /// Requests succeed
    Ok,
    /// Usable but degraded or not yet connected: no host, initializing, bad password
    Warning(String),
    /// Requests fail
    Error(String),
}

/// Status class used for edge-triggered reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLevel {
    /// See [`Health::Ok`]
    Ok,
    /// See [`Health::Warning`]
    Warning,
    /// See [`Health::Error`]
    Error,
}

impl Health {
    /// Class of this status.
    pub fn level(&self) -> HealthLevel {
        match self {
            Health::Ok => HealthLevel::Ok,
            Health::Warning(_) => HealthLevel::Warning,
            Health::Error(_) => HealthLevel::Error,
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Health::Ok => f.write_str("OK"),
            Health::Warning(msg) => write!(f, "Warning: {msg}"),
            Health::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

/// Forwards connectivity changes to the host once per class transition.
///
/// Shared by both synchronizers and the dispatcher so a command failure and
/// a poll failure of the same class produce a single report.
pub struct StatusReporter {
    host: Arc<dyn HostSink>,
    endpoint: String,
    reported: Mutex<Reported>,
}

#[derive(Default)]
struct Reported {
    last: Option<HealthLevel>,
    closed: bool,
}

impl StatusReporter {
    /// Creates a reporter for the player at `endpoint` (`host:port`).
    pub fn new(host: Arc<dyn HostSink>, endpoint: impl Into<String>) -> Self {
        Self {
            host,
            endpoint: endpoint.into(),
            reported: Mutex::new(Reported::default()),
        }
    }

    /// Publishes a lifecycle status unconditionally and forgets the last class,
    /// so the next request outcome is always reported.
    pub fn announce(&self, health: Health) {
        let mut reported = self.lock();
        reported.last = None;
        self.host.set_status(&health);
    }

    /// Silences the reporter. Outcomes of requests still in flight are
    /// dropped once this returns.
    pub fn close(&self) {
        self.lock().closed = true;
    }

    /// Records a successful request.
    pub fn success(&self) {
        self.report(Health::Ok);
    }

    /// Records a failed request.
    ///
    /// Malformed bodies arrive over a working connection and do not change
    /// the connectivity class.
    pub fn failure(&self, err: &TransportError) {
        let health = match err {
            TransportError::Unauthorized => Health::Warning("Unauthorized. Bad password?".into()),
            TransportError::Remote(msg) | TransportError::Network(msg) => Health::Error(msg.clone()),
            TransportError::MalformedResponse(_) => return,
        };
        self.report(health);
    }

    fn report(&self, health: Health) {
        let mut reported = self.lock();
        let level = health.level();
        if reported.closed || reported.last == Some(level) {
            return;
        }
        reported.last = Some(level);

        match &health {
            Health::Ok => info!("Connected to {}", self.endpoint),
            Health::Warning(msg) => warn!("{}: {msg}", self.endpoint),
            Health::Error(msg) => error!("{}: {msg}", self.endpoint),
        }
        self.host.set_status(&health);
    }

    fn lock(&self) -> MutexGuard<'_, Reported> {
        self.reported.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::vlc::host::testing::RecordingHost;

    #[test]
    fn repeated_outcomes_are_reported_once() {
        let host = Arc::new(RecordingHost::default());
        let reporter = StatusReporter::new(host.clone(), "127.0.0.1:8080");

        reporter.success();
        reporter.success();
        reporter.failure(&TransportError::Network("connection refused".into()));
        reporter.failure(&TransportError::Remote("Internal Server Error".into()));
        reporter.success();

        assert_eq!(
            host.statuses(),
            vec![
                Health::Ok,
                Health::Error("connection refused".into()),
                Health::Ok,
            ]
        );
    }

    #[test]
    fn unauthorized_is_a_warning() {
        let host = Arc::new(RecordingHost::default());
        let reporter = StatusReporter::new(host.clone(), "vlc:8080");

        reporter.failure(&TransportError::Unauthorized);
        reporter.failure(&TransportError::Unauthorized);

        assert_eq!(
            host.statuses(),
            vec![Health::Warning("Unauthorized. Bad password?".into())]
        );
    }

    #[test]
    fn malformed_body_keeps_status() {
        let host = Arc::new(RecordingHost::default());
        let reporter = StatusReporter::new(host.clone(), "vlc:8080");

        reporter.success();
        reporter.failure(&TransportError::MalformedResponse("eof".into()));

        assert_eq!(host.statuses(), vec![Health::Ok]);
    }

    #[test]
    fn announce_rearms_reporting() {
        let host = Arc::new(RecordingHost::default());
        let reporter = StatusReporter::new(host.clone(), "vlc:8080");

        reporter.success();
        reporter.announce(Health::Warning("Connecting".into()));
        reporter.success();

        assert_eq!(
            host.statuses(),
            vec![
                Health::Ok,
                Health::Warning("Connecting".into()),
                Health::Ok
            ]
        );
    }

    #[test]
    fn closed_reporter_stays_silent() {
        let host = Arc::new(RecordingHost::default());
        let reporter = StatusReporter::new(host.clone(), "vlc:8080");

        reporter.success();
        reporter.close();
        reporter.failure(&TransportError::Network("connection refused".into()));
        reporter.success();

        assert_eq!(host.statuses(), vec![Health::Ok]);
    }
}
