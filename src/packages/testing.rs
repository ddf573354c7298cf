//! Scriptable `PackageManager` double for orchestration tests.

use crate::error::{PpmError, Result};
use crate::packages::traits::{Package, PackageManager};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Shared, ordered log of `"<identity>:<op>:<arg>"` entries.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().map(|l| l.clone()).unwrap_or_default()
}

/// Meeting point for `expected` concurrent searches. A search that is still
/// alone after `patience` gives up.
pub struct Rendezvous {
    arrived: Mutex<usize>,
    all_here: Condvar,
    expected: usize,
    patience: Duration,
}

impl Rendezvous {
    pub fn new(expected: usize) -> Arc<Self> {
        Arc::new(Self {
            arrived: Mutex::new(0),
            all_here: Condvar::new(),
            expected,
            patience: Duration::from_secs(2),
        })
    }

    /// `true` once every expected caller is inside `arrive` at the same time.
    fn arrive(&self) -> bool {
        let Ok(mut arrived) = self.arrived.lock() else {
            return false;
        };
        *arrived += 1;
        self.all_here.notify_all();
        match self
            .all_here
            .wait_timeout_while(arrived, self.patience, |n| *n < self.expected)
        {
            Ok((_, timeout)) => !timeout.timed_out(),
            Err(_) => false,
        }
    }
}

enum SearchBehavior {
    Results(Vec<Package>),
    Fail,
    Panic,
}

pub struct MockManager {
    identity: String,
    available: Arc<AtomicBool>,
    search: SearchBehavior,
    install_ok: bool,
    update_ok: bool,
    remove_ok: bool,
    rendezvous: Option<Arc<Rendezvous>>,
    log: CallLog,
}

impl MockManager {
    pub fn new(identity: &str, log: &CallLog) -> Self {
        Self {
            identity: identity.to_string(),
            available: Arc::new(AtomicBool::new(true)),
            search: SearchBehavior::Results(Vec::new()),
            install_ok: true,
            update_ok: true,
            remove_ok: true,
            rendezvous: None,
            log: Arc::clone(log),
        }
    }

    pub fn unavailable(self) -> Self {
        self.available.store(false, Ordering::SeqCst);
        self
    }

    /// Flag controlling availability after the mock is moved into a registry.
    pub fn availability(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.available)
    }

    /// Results as `(name, version, score)`, stamped with this identity.
    pub fn with_results(mut self, results: &[(&str, &str, f64)]) -> Self {
        let packages = results
            .iter()
            .map(|(name, version, score)| Package {
                name: name.to_string(),
                version: version.to_string(),
                provider: self.identity.clone(),
                score: *score,
                ..Default::default()
            })
            .collect();
        self.search = SearchBehavior::Results(packages);
        self
    }

    pub fn with_raw_results(mut self, packages: Vec<Package>) -> Self {
        self.search = SearchBehavior::Results(packages);
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.search = SearchBehavior::Fail;
        self
    }

    pub fn panicking_search(mut self) -> Self {
        self.search = SearchBehavior::Panic;
        self
    }

    /// Search only succeeds if every other searcher of `rendezvous` runs
    /// at the same time.
    pub fn meeting_at(mut self, rendezvous: &Arc<Rendezvous>) -> Self {
        self.rendezvous = Some(Arc::clone(rendezvous));
        self
    }

    pub fn failing_install(mut self) -> Self {
        self.install_ok = false;
        self
    }

    pub fn failing_update(mut self) -> Self {
        self.update_ok = false;
        self
    }

    pub fn failing_remove(mut self) -> Self {
        self.remove_ok = false;
        self
    }

    fn record(&self, op: &str, arg: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.push(format!("{}:{}:{}", self.identity, op, arg));
        }
    }
}

impl PackageManager for MockManager {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn search(&self, query: &str) -> Result<Vec<Package>> {
        self.record("search", query);
        if let Some(rendezvous) = &self.rendezvous
            && !rendezvous.arrive()
        {
            return Err(PpmError::SearchFailure {
                provider: self.identity.clone(),
                reason: "searched alone".to_string(),
            });
        }
        match &self.search {
            SearchBehavior::Results(packages) => Ok(packages.clone()),
            SearchBehavior::Fail => Err(PpmError::SearchFailure {
                provider: self.identity.clone(),
                reason: "index unreachable".to_string(),
            }),
            SearchBehavior::Panic => panic!("{} adapter crashed", self.identity),
        }
    }

    fn install(&self, name: &str) -> Result<()> {
        self.record("install", name);
        if self.install_ok {
            Ok(())
        } else {
            Err(PpmError::InstallFailure {
                provider: self.identity.clone(),
                diagnostic: format!("{}: cannot install {}", self.identity, name),
            })
        }
    }

    fn update(&self, name: &str) -> Result<()> {
        self.record("update", name);
        if self.update_ok {
            Ok(())
        } else {
            Err(PpmError::UpdateFailure {
                provider: self.identity.clone(),
                diagnostic: format!("{}: cannot update {}", self.identity, name),
            })
        }
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.record("remove", name);
        if self.remove_ok {
            Ok(())
        } else {
            Err(PpmError::RemoveFailure {
                provider: self.identity.clone(),
                diagnostic: format!("{}: cannot remove {}", self.identity, name),
            })
        }
    }
}
