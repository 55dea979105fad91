//! Shared fixtures: a scripted in-memory player and a recording host.

#![allow(dead_code, clippy::unwrap_used)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use vlcdeck::{
    config::Config,
    services::vlc::{Health, HostSink, PlaybackState, Transport, TransportError, VlcService},
};

pub const STATUS: &str = "/requests/status.json";
pub const PLAYLIST: &str = "/requests/playlist.json";

/// Answers each endpoint with whatever was last scripted for it.
#[derive(Default)]
pub struct ScriptedPlayer {
    responses: Mutex<HashMap<String, Result<Vec<u8>, TransportError>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedPlayer {
    pub fn respond(&self, endpoint: &str, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Ok(body.into().into_bytes()));
    }

    pub fn fail(&self, endpoint: &str, error: TransportError) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Err(error));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests to `endpoint` without a query string.
    pub fn polls(&self, endpoint: &str) -> usize {
        self.requests().iter().filter(|path| *path == endpoint).count()
    }

    pub fn commands(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|path| path.contains("?command="))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedPlayer {
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        self.requests.lock().unwrap().push(path.to_string());

        let endpoint = path.split('?').next().unwrap_or(path);
        self.responses
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Remote("Not Found".into())))
    }
}

/// Records every host call.
#[derive(Default)]
pub struct RecordingHost {
    pub variables: Mutex<Vec<(String, Option<String>)>>,
    pub feedback_checks: Mutex<Vec<PlaybackState>>,
    pub statuses: Mutex<Vec<Health>>,
}

impl RecordingHost {
    pub fn variable_writes(&self) -> usize {
        self.variables.lock().unwrap().len()
    }

    pub fn last(&self, name: &str) -> Option<Option<String>> {
        self.variables
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(var, _)| var == name)
            .map(|(_, value)| value.clone())
    }

    pub fn last_status(&self) -> Option<Health> {
        self.statuses.lock().unwrap().last().cloned()
    }
}

impl HostSink for RecordingHost {
    fn set_variable(&self, name: &str, value: Option<String>) {
        self.variables
            .lock()
            .unwrap()
            .push((name.to_string(), value));
    }

    fn check_feedbacks(&self, state: &PlaybackState) {
        self.feedback_checks.lock().unwrap().push(state.clone());
    }

    fn set_status(&self, health: &Health) {
        self.statuses.lock().unwrap().push(health.clone());
    }
}

pub struct Harness {
    pub player: Arc<ScriptedPlayer>,
    pub host: Arc<RecordingHost>,
    pub service: VlcService,
}

pub fn harness(config: &Config) -> Harness {
    let player = Arc::new(ScriptedPlayer::default());
    let host = Arc::new(RecordingHost::default());
    let service = VlcService::with_transport(config, host.clone(), player.clone());
    Harness {
        player,
        host,
        service,
    }
}

pub fn playlist_json(items: &[(&str, &str)]) -> String {
    let children: Vec<String> = items
        .iter()
        .map(|(id, name)| {
            format!(
                r#"{{"id":"{id}","name":"{name}","duration":100,"uri":"file:///{id}","type":"leaf"}}"#
            )
        })
        .collect();

    format!(
        r#"{{"name":"","id":"0","children":[
            {{"name":"Playlist","id":"1","children":[{}]}},
            {{"name":"Media Library","id":"2","children":[
                {{"id":"99","name":"Library item","duration":5,"uri":"file:///lib"}}
            ]}}
        ]}}"#,
        children.join(",")
    )
}

pub fn status_json(state: &str, plid: i64, length: f64, position: f64) -> String {
    format!(
        r#"{{"version":"3.0.20 Vetinari","state":"{state}","repeat":false,"loop":false,
            "random":false,"fullscreen":0,"currentplid":{plid},"length":{length},
            "position":{position},"time":{time}}}"#,
        time = (length * position).floor()
    )
}
