//! Where the profile comes from, and the background thread that fetches it.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{error, info};
use termfolio_types::error::{Result, TermfolioError};
use termfolio_types::profile::ProfileRecord;

/// Profile bundled into the binary.
const EMBEDDED_PROFILE: &str = include_str!("../assets/profile.json");

/// Read-only provider of the profile record.
pub trait ProfileSource {
    fn fetch(&self) -> Result<ProfileRecord>;

    /// Short human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Profile stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileSource for JsonFileSource {
    fn fetch(&self) -> Result<ProfileRecord> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            TermfolioError::Profile(format!("cannot read {}: {e}", self.path.display()))
        })?;
        ProfileRecord::from_json(&text)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// The profile compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl ProfileSource for EmbeddedSource {
    fn fetch(&self) -> Result<ProfileRecord> {
        ProfileRecord::from_json(EMBEDDED_PROFILE)
    }

    fn describe(&self) -> String {
        "embedded profile".into()
    }
}

/// A profile held in memory, or a canned failure.
#[derive(Debug, Clone)]
pub struct StaticSource {
    outcome: std::result::Result<ProfileRecord, String>,
}

impl StaticSource {
    pub fn new(profile: ProfileRecord) -> Self {
        Self {
            outcome: Ok(profile),
        }
    }

    /// A source whose fetch always fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }
}

impl ProfileSource for StaticSource {
    fn fetch(&self) -> Result<ProfileRecord> {
        self.outcome.clone().map_err(TermfolioError::Profile)
    }

    fn describe(&self) -> String {
        "in-memory profile".into()
    }
}

/// Where the session's profile stands.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileStatus {
    Loading,
    Ready(ProfileRecord),
    /// Fetch failed; the reason is shown to the user.
    Failed(String),
}

impl ProfileStatus {
    pub fn record(&self) -> Option<&ProfileRecord> {
        match self {
            Self::Ready(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Runs a [`ProfileSource`] once on a background thread.
///
/// The result arrives over a channel; poll it with `try_recv()` from the
/// frame loop.
#[derive(Debug)]
pub struct ProfileLoader {
    rx: Receiver<Result<ProfileRecord>>,
    handle: Option<JoinHandle<()>>,
}

impl ProfileLoader {
    pub fn spawn<S>(source: S) -> Result<Self>
    where
        S: ProfileSource + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let origin = source.describe();
        info!("loading profile from {origin}");
        let handle = thread::Builder::new()
            .name("termfolio-profile".into())
            .spawn(move || {
                let result = source.fetch();
                match &result {
                    Ok(p) => info!("profile loaded from {origin}: {}", p.personal.name),
                    Err(e) => error!("profile fetch from {origin} failed: {e}"),
                }
                // The receiver may be gone if the session ended first.
                let _ = tx.send(result);
            })?;
        Ok(Self {
            rx,
            handle: Some(handle),
        })
    }

    /// Non-blocking check for the fetch result.
    pub fn try_recv(&mut self) -> Option<Result<ProfileRecord>> {
        match self.rx.try_recv() {
            Ok(result) => {
                self.join();
                Some(result)
            },
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join();
                Some(Err(TermfolioError::Profile(
                    "loader thread exited without a result".into(),
                )))
            },
        }
    }

    /// Block until the fetch finishes.
    pub fn wait(mut self) -> Result<ProfileRecord> {
        let result = self.rx.recv().unwrap_or_else(|_| {
            Err(TermfolioError::Profile(
                "loader thread exited without a result".into(),
            ))
        });
        self.join();
        result
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            error!("profile loader thread panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_profile_parses() {
        let p = EmbeddedSource.fetch().unwrap();
        assert_eq!(p.personal.name, "ARYAN TOMAR");
        assert_eq!(p.projects.len(), 3);
        assert!(p.projects.iter().all(|p| p.is_live));
        assert_eq!(p.experience[1].responsibilities.len(), 3);
        assert_eq!(p.initials(), "AT");
    }

    #[test]
    fn json_file_source_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "personal": {{ "name": "Linus" }}, "activities": ["Diving"] }}"#)
            .unwrap();
        let source = JsonFileSource::new(file.path());
        let p = source.fetch().unwrap();
        assert_eq!(p.personal.name, "Linus");
        assert_eq!(p.activities, vec!["Diving".to_string()]);
        assert!(source.describe().starts_with("file "));
    }

    #[test]
    fn json_file_source_missing_file_is_profile_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("absent.json"));
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, TermfolioError::Profile(_)));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn json_file_source_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = JsonFileSource::new(file.path()).fetch().unwrap_err();
        assert!(matches!(err, TermfolioError::Json(_)));
    }

    #[test]
    fn loader_delivers_ready_profile() {
        let loader = ProfileLoader::spawn(EmbeddedSource).unwrap();
        let p = loader.wait().unwrap();
        assert_eq!(p.personal.name, "ARYAN TOMAR");
    }

    #[test]
    fn loader_delivers_failure() {
        let mut loader = ProfileLoader::spawn(StaticSource::failing("connection refused")).unwrap();
        let result = loop {
            if let Some(result) = loader.try_recv() {
                break result;
            }
            thread::yield_now();
        };
        assert_eq!(
            result.unwrap_err().to_string(),
            "profile error: connection refused"
        );
    }

    #[test]
    fn status_accessors() {
        assert!(ProfileStatus::Loading.is_loading());
        assert!(ProfileStatus::Loading.record().is_none());
        let p = EmbeddedSource.fetch().unwrap();
        assert_eq!(ProfileStatus::Ready(p.clone()).record(), Some(&p));
        assert!(ProfileStatus::Failed("x".into()).record().is_none());
    }
}
