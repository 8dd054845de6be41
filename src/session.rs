//! One inquiry controller per visitor, keyed by a session cookie.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use mclears_inquiry::{Controller, Deliver};

pub const SESSION_COOKIE: &str = "inquiry_session";

struct Entry {
    controller: Controller,
    last_seen: Instant,
}

impl Entry {
    /// Sessions still sending stay alive until delivery settles.
    fn is_live(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_seen) <= ttl || self.controller.state().is_submitting()
    }
}

#[derive(Clone)]
pub struct Sessions {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    delivery: Arc<dyn Deliver>,
    delivery_timeout: Duration,
    ttl: Duration,
    max_entries: usize,
}

impl Sessions {
    pub fn new(
        delivery: Arc<dyn Deliver>,
        delivery_timeout: Duration,
        ttl: Duration,
        max_entries: usize,
    ) -> Self {
        Self {
            entries: Arc::default(),
            delivery,
            delivery_timeout,
            ttl,
            max_entries,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the visitor's controller, opening a new session when the id is
    /// missing or expired.
    pub fn get_or_create(&self, id: Option<&str>) -> (String, Controller) {
        if let Some(id) = id {
            if let Some(controller) = self.get(id) {
                return (id.to_owned(), controller);
            }
        }

        let now = Instant::now();
        let mut entries = self.lock();

        entries.retain(|_, entry| entry.is_live(now, self.ttl));

        if entries.len() >= self.max_entries {
            self.evict_oldest(&mut entries);
        }

        let id = ulid::Ulid::new().to_string();
        let controller =
            Controller::new(self.delivery.clone()).with_timeout(self.delivery_timeout);

        tracing::debug!(session = %id, "Inquiry session opened");

        entries.insert(
            id.to_owned(),
            Entry {
                controller: controller.clone(),
                last_seen: now,
            },
        );

        (id, controller)
    }

    /// Looks up a live session and marks it as seen. Never creates one.
    pub fn get(&self, id: &str) -> Option<Controller> {
        let now = Instant::now();
        let mut entries = self.lock();

        let entry = entries.get_mut(id)?;
        if !entry.is_live(now, self.ttl) {
            entries.remove(id);
            return None;
        }

        entry.last_seen = now;

        Some(entry.controller.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn evict_oldest(&self, entries: &mut HashMap<String, Entry>) {
        let oldest = entries
            .iter()
            .filter(|(_, entry)| !entry.controller.state().is_submitting())
            .min_by_key(|(_, entry)| entry.last_seen)
            .map(|(id, _)| id.to_owned());

        match oldest {
            Some(id) => {
                entries.remove(&id);
                tracing::debug!(session = %id, "Inquiry session evicted, store full");
            }
            None => tracing::warn!(
                sessions = entries.len(),
                "Session store full of in-flight inquiries"
            ),
        }
    }
}
