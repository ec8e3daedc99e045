//! The user's own events.
//!
//! `LocalEvents` is owned by the host application: it loads the list from a
//! `KvStore`, applies edits, and writes the whole list back. Events tagged
//! `external` can be looked at but never changed through it.

use chrono::{DateTime, Utc};

use crate::error::{NovaError, NovaResult};
use crate::event::{Event, EventPatch, EventSource, NewEvent};
use crate::store::KvStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalEvents {
    events: Vec<Event>,
}

impl LocalEvents {
    pub fn new(events: Vec<Event>) -> Self {
        LocalEvents { events }
    }

    /// Load the list stored under `key`. A missing key is an empty list.
    ///
    /// Everything in the store is local, whatever `source` it was saved
    /// with. Records saved without an id get one and the list is written
    /// back, so the new ids stay stable across loads.
    pub fn load(store: &dyn KvStore, key: &str) -> NovaResult<Self> {
        let Some(content) = store.get(key)? else {
            return Ok(Self::default());
        };

        let events: Vec<Event> =
            serde_json::from_str(&content).map_err(|e| NovaError::Storage {
                key: key.to_string(),
                message: format!("stored events are not valid JSON: {}", e),
            })?;

        let mut local = LocalEvents { events };
        let assigned = local.normalize(Utc::now());
        if assigned > 0 {
            tracing::info!(key, assigned, "assigned ids to stored events");
            local.save(store, key)?;
        }

        Ok(local)
    }

    pub fn save(&self, store: &dyn KvStore, key: &str) -> NovaResult<()> {
        let content = serde_json::to_string_pretty(&self.events)?;
        store.put(key, &content)
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Validate and append a new event, returning the stored copy.
    pub fn create(&mut self, new_event: NewEvent, now: DateTime<Utc>) -> NovaResult<&Event> {
        let event = new_event.into_event(self.next_id(now));
        event.validate()?;

        tracing::debug!(id = %event.id, date = %event.date, "created local event");
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }

    /// Apply `patch` to the local event `target` refers to.
    pub fn update(&mut self, target: &Event, patch: EventPatch) -> NovaResult<&Event> {
        let index = self.position_of(target)?;

        let mut updated = self.events[index].clone();
        patch.apply(&mut updated);
        updated.validate()?;

        self.events[index] = updated;
        Ok(&self.events[index])
    }

    /// Remove the local event `target` refers to.
    pub fn remove(&mut self, target: &Event) -> NovaResult<Event> {
        let index = self.position_of(target)?;
        Ok(self.events.remove(index))
    }

    fn position_of(&self, target: &Event) -> NovaResult<usize> {
        if target.source == EventSource::External {
            return Err(NovaError::ReadOnlyEvent(target.id.clone()));
        }

        self.events
            .iter()
            .position(|e| e.id == target.id)
            .ok_or_else(|| NovaError::EventNotFound(target.id.clone()))
    }

    /// Tag every event local and give id-less ones a fresh id. Returns the
    /// number of ids assigned.
    fn normalize(&mut self, now: DateTime<Utc>) -> usize {
        let mut assigned = 0;
        for index in 0..self.events.len() {
            self.events[index].source = EventSource::Local;
            if self.events[index].id.trim().is_empty() {
                self.events[index].id = self.next_id(now);
                assigned += 1;
            }
        }
        assigned
    }

    /// Time-based id (Unix milliseconds), bumped past any id already taken.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        while self.find(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}
