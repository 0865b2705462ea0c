//! Application state held by the outermost event loop.
//!
//! The collection and filters live here instead of in globals; everything the
//! state calls into (query engine, deep-link codec) is a pure function.

use std::time::{Duration, Instant};
use url::Url;

use crate::deeplink;
use crate::natives::{Criteria, HASH_NAME, Native, NativeIndex};

/// A single pending deadline. Scheduling again replaces it (last write wins).
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires at most once per schedule, when `now` reached the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// What the current address, or a direct pick by key, selects.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    None,
    Found(&'a Native),
    NotFound(String),
}

pub struct AppState {
    index: NativeIndex,
    criteria: Criteria,
    pending_query: Option<String>,
    debouncer: Debouncer,
    location: Url,
    /// Key picked directly that has no permalink form
    direct: Option<String>,
}

impl AppState {
    pub fn new(index: NativeIndex, location: Url, debounce: Duration) -> Self {
        Self {
            index,
            criteria: Criteria::default(),
            pending_query: None,
            debouncer: Debouncer::new(debounce),
            location,
            direct: None,
        }
    }

    pub fn index(&self) -> &NativeIndex {
        &self.index
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Entries visible under the applied filters.
    pub fn visible(&self) -> Vec<&Native> {
        self.index.filter(&self.criteria)
    }

    /// Record typed text; it is applied by [`tick`](Self::tick) once the
    /// debounce delay passed without further input.
    pub fn set_query(&mut self, text: &str, now: Instant) {
        self.pending_query = Some(text.to_string());
        self.debouncer.schedule(now);
    }

    /// Apply the pending query if due. Returns `true` when the filter changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.debouncer.poll(now) {
            return false;
        }
        match self.pending_query.take() {
            Some(query) => {
                self.criteria.query = query;
                true
            }
            None => false,
        }
    }

    /// Apply any pending query right away.
    pub fn flush(&mut self) {
        self.debouncer.cancel();
        if let Some(query) = self.pending_query.take() {
            self.criteria.query = query;
        }
    }

    pub fn set_api_set(&mut self, api_set: &str) {
        self.criteria.api_set = api_set.to_string();
    }

    pub fn set_namespace(&mut self, namespace: &str) {
        self.criteria.namespace = namespace.to_string();
    }

    /// Address of the current selection, unless it was picked by a key that
    /// cannot be written into an address.
    pub fn permalink(&self) -> Option<&Url> {
        match self.direct {
            Some(_) => None,
            None => Some(&self.location),
        }
    }

    /// Select `key`. Hash-style keys rewrite the current address in place;
    /// any other key is looked up directly and leaves the address alone.
    pub fn select(&mut self, key: &str) {
        if HASH_NAME.is_match(key) {
            self.direct = None;
            deeplink::encode(&mut self.location, key);
        } else {
            self.direct = Some(key.to_string());
        }
    }

    pub fn selection(&self) -> Selection<'_> {
        if let Some(key) = &self.direct {
            return match self.index.get(key) {
                Some(native) => Selection::Found(native),
                None => Selection::NotFound(key.clone()),
            };
        }
        match deeplink::decode(&self.location) {
            None => Selection::None,
            Some(key) => match self.index.get(&key) {
                Some(native) => Selection::Found(native),
                None => Selection::NotFound(key),
            },
        }
    }
}
