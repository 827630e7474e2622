//! Durable logged-in context.
//!
//! The backing file is a JSON object of string keys, like browser local
//! storage; the session record lives under [`STORAGE_KEY`] and other keys are
//! left untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::sync::watch;
use yoga_model::SessionInformation;

use crate::error::ClientResult;

pub const STORAGE_KEY: &str = "session";

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    information: Option<SessionInformation>,
    logged: watch::Sender<bool>,
}

impl SessionStore {
    /// Restore the stored record, if any. A malformed record is discarded.
    pub fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let information = match read_map(&path)?.remove(STORAGE_KEY) {
            Some(value) => match serde_json::from_value(value) {
                Ok(info) => Some(info),
                Err(e) => {
                    tracing::warn!("Ignoring malformed session record in {}: {e}", path.display());
                    None
                }
            },
            None => None,
        };

        let (logged, _) = watch::channel(information.is_some());
        Ok(Self {
            path,
            information,
            logged,
        })
    }

    pub fn is_logged(&self) -> bool {
        *self.logged.borrow()
    }

    pub fn information(&self) -> Option<&SessionInformation> {
        self.information.as_ref()
    }

    /// Observe the logged-in flag. The receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.logged.subscribe()
    }

    pub fn log_in(&mut self, information: SessionInformation) -> ClientResult<()> {
        let mut map = read_map(&self.path)?;
        map.insert(STORAGE_KEY.to_string(), serde_json::to_value(&information)?);
        write_map(&self.path, &map)?;

        self.information = Some(information);
        self.logged.send_replace(true);
        Ok(())
    }

    pub fn log_out(&mut self) -> ClientResult<()> {
        let mut map = read_map(&self.path)?;
        if map.remove(STORAGE_KEY).is_some() {
            write_map(&self.path, &map)?;
        }

        self.information = None;
        self.logged.send_replace(false);
        Ok(())
    }
}

/// Unreadable JSON counts as an empty store so a truncated file cannot lock
/// the user out; the next write replaces it.
fn read_map(path: &Path) -> ClientResult<Map<String, Value>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) => return Err(e.into()),
    };
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => {
            tracing::warn!("Ignoring non-object storage file {}", path.display());
            Ok(Map::new())
        }
        Err(e) => {
            tracing::warn!("Ignoring unreadable storage file {}: {e}", path.display());
            Ok(Map::new())
        }
    }
}

/// Write to a sibling file and rename it over the target, so readers see
/// either the old contents or the new ones.
fn write_map(path: &Path, map: &Map<String, Value>) -> ClientResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    fs::write(&staging, serde_json::to_string_pretty(map)?)?;
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}
