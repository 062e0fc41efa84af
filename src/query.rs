//! Keyed cache for asynchronous fetches.
//!
//! `QueryCache` runs each distinct key's fetch once on a background thread and
//! keeps the result for the life of the cache. The UI thread calls `query` every
//! frame; finished fetches are picked up from an mpsc channel without blocking.

use crate::api::Fetcher;
use crate::error::FetchError;
use crate::view::LoadState;
use ahash::AHashMap;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

type Outcome<T> = Result<Option<T>, FetchError>;
type Settled<T> = Result<Option<Arc<T>>, Arc<FetchError>>;

#[derive(Debug)]
enum Entry<T> {
    InFlight,
    Settled(Settled<T>),
}

pub struct QueryCache<F: Fetcher> {
    fetcher: Arc<F>,
    entries: AHashMap<String, Entry<F::Output>>,
    tx: Sender<(String, Outcome<F::Output>)>,
    rx: Receiver<(String, Outcome<F::Output>)>,
}

impl<F: Fetcher> QueryCache<F> {
    pub fn new(fetcher: F) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            fetcher: Arc::new(fetcher),
            entries: AHashMap::new(),
            tx,
            rx,
        }
    }

    /// State of `key`, starting a fetch if the key has never been seen.
    ///
    /// An empty key disables fetching and reads as `Absent`.
    pub fn query(&mut self, key: &str) -> LoadState<Arc<F::Output>> {
        self.poll();
        if key.is_empty() {
            return LoadState::Absent { cause: None };
        }
        if !self.entries.contains_key(key) {
            self.spawn(key);
        }
        self.state_of(key)
    }

    /// Collect finished fetches. Returns how many settled.
    pub fn poll(&mut self) -> usize {
        let mut n = 0;
        while let Ok((key, outcome)) = self.rx.try_recv() {
            self.settle(key, outcome);
            n += 1;
        }
        n
    }

    /// Like `query`, but block until `key` settles or `timeout` elapses.
    pub fn wait(&mut self, key: &str, timeout: Duration) -> LoadState<Arc<F::Output>> {
        let deadline = Instant::now() + timeout;
        let mut state = self.query(key);
        while state.is_loading() {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(left) {
                Ok((k, outcome)) => self.settle(k, outcome),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
            state = self.state_of(key);
        }
        state
    }

    /// Forget a settled result so the next `query` fetches again. In-flight
    /// fetches are left alone.
    pub fn invalidate(&mut self, key: &str) {
        if let Some(Entry::Settled(_)) = self.entries.get(key) {
            self.entries.remove(key);
        }
    }

    /// `true` when `key` settled with an error.
    pub fn is_error(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(Entry::Settled(Err(_))))
    }

    /// `true` while any fetch is still running.
    pub fn has_pending(&self) -> bool {
        self.entries.values().any(|e| matches!(e, Entry::InFlight))
    }

    fn spawn(&mut self, key: &str) {
        self.entries.insert(key.to_string(), Entry::InFlight);
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let key = key.to_string();
        log::debug!("query {key:?}: fetching");
        thread::spawn(move || {
            // A panicking fetcher still settles its key, otherwise it would stay in flight.
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| fetcher.fetch(&key)))
                .unwrap_or_else(|payload| Err(FetchError::Panicked(panic_message(&*payload))));
            // The receiver lives as long as the cache; a dropped cache discards the result.
            let _ = tx.send((key, outcome));
        });
    }

    fn settle(&mut self, key: String, outcome: Outcome<F::Output>) {
        let settled = match outcome {
            Ok(v) => {
                log::debug!("query {key:?}: {}", if v.is_some() { "found" } else { "empty" });
                Ok(v.map(Arc::new))
            }
            Err(e) => {
                log::warn!("query {key:?} failed: {e}");
                Err(Arc::new(e))
            }
        };
        self.entries.insert(key, Entry::Settled(settled));
    }

    fn state_of(&self, key: &str) -> LoadState<Arc<F::Output>> {
        match self.entries.get(key) {
            None | Some(Entry::InFlight) => LoadState::Loading,
            Some(Entry::Settled(Ok(Some(v)))) => LoadState::Present(Arc::clone(v)),
            Some(Entry::Settled(Ok(None))) => LoadState::Absent { cause: None },
            Some(Entry::Settled(Err(e))) => LoadState::Absent {
                cause: Some(Arc::clone(e)),
            },
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
