//! # In-Memory Store
//!
//! Concurrent maps of applications and calls keyed by id.
//!
//! ## Locking
//!
//! A unit of work holds the write guard of its application entry from first
//! read to commit, so everything touching one application (including the
//! calls it owns) is serialized while different applications proceed in
//! parallel. Locks are always taken applications first, calls second, and no
//! calls guard is held across an insert into the calls map.
//!
//! ## Snapshots
//!
//! [`LiaisonSnapshot`] is the serde form of the whole store. It can be written
//! to and read from a JSON file.

use crate::error::{not_found, validation_error, LiaisonError, LiaisonResult};
use crate::models::{CallFilter, GrantApplication, ScheduledCall};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Applications and calls held in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    applications: DashMap<String, GrantApplication>,
    calls: DashMap<String, ScheduledCall>,
}

/// Serializable copy of a store, sorted by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiaisonSnapshot {
    pub applications: Vec<GrantApplication>,
    pub calls: Vec<ScheduledCall>,
}

/// Staging area handed to [`InMemoryStore::with_application`]
///
/// Calls staged here are written to the store only when the unit of work
/// returns `Ok`.
#[derive(Debug)]
pub struct UnitOfWork<'a> {
    application_id: &'a str,
    calls: &'a DashMap<String, ScheduledCall>,
    staged_calls: Vec<ScheduledCall>,
}

impl UnitOfWork<'_> {
    /// Current version of a call owned by the application under work
    pub fn call(&self, call_id: &str) -> Option<ScheduledCall> {
        if let Some(staged) = self.staged_calls.iter().rev().find(|c| c.id == call_id) {
            return Some(staged.clone());
        }
        self.calls
            .get(call_id)
            .map(|call| call.value().clone())
            .filter(|call| call.application_id == self.application_id)
    }

    /// Stage a new or updated call for commit
    pub fn stage_call(&mut self, call: ScheduledCall) -> LiaisonResult<()> {
        if call.application_id != self.application_id {
            return Err(validation_error(format!(
                "call {} belongs to application {}, not {}",
                call.id, call.application_id, self.application_id
            )));
        }
        self.staged_calls.push(call);
        Ok(())
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new application; ids must be unique
    pub fn insert_application(&self, application: GrantApplication) -> LiaisonResult<()> {
        match self.applications.entry(application.id.clone()) {
            Entry::Occupied(_) => Err(validation_error(format!(
                "application id already exists: {}",
                application.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(application);
                Ok(())
            }
        }
    }

    pub fn get_application(&self, id: &str) -> Option<GrantApplication> {
        self.applications.get(id).map(|entry| entry.value().clone())
    }

    pub fn contains_application(&self, id: &str) -> bool {
        self.applications.contains_key(id)
    }

    /// Remove an application together with the calls it owns
    pub fn remove_application(&self, id: &str) -> Option<(GrantApplication, Vec<ScheduledCall>)> {
        let (_, application) = self.applications.remove(id)?;

        let owned: Vec<String> = self
            .calls
            .iter()
            .filter(|entry| entry.application_id == id)
            .map(|entry| entry.key().clone())
            .collect();
        let calls = owned
            .iter()
            .filter_map(|call_id| self.calls.remove(call_id).map(|(_, call)| call))
            .collect();

        Some((application, calls))
    }

    /// Run `work` against a staged copy of one application
    ///
    /// The application entry stays locked for the whole closure. Both the
    /// application and any staged calls are committed on `Ok`; on `Err` the
    /// store is left exactly as it was.
    pub fn with_application<T, F>(&self, id: &str, work: F) -> LiaisonResult<T>
    where
        F: FnOnce(&mut GrantApplication, &mut UnitOfWork<'_>) -> LiaisonResult<T>,
    {
        let mut entry = self
            .applications
            .get_mut(id)
            .ok_or_else(|| not_found("Application", id))?;

        let mut staged = entry.value().clone();
        let mut unit = UnitOfWork {
            application_id: id,
            calls: &self.calls,
            staged_calls: Vec::new(),
        };

        let value = work(&mut staged, &mut unit)?;

        for call in unit.staged_calls {
            self.calls.insert(call.id.clone(), call);
        }
        *entry.value_mut() = staged;

        Ok(value)
    }

    pub fn get_call(&self, id: &str) -> Option<ScheduledCall> {
        self.calls.get(id).map(|entry| entry.value().clone())
    }

    pub fn applications(&self) -> Vec<GrantApplication> {
        self.applications
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<ScheduledCall> {
        self.calls.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn find_calls(&self, filter: &CallFilter) -> Vec<ScheduledCall> {
        self.calls
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn application_count(&self) -> usize {
        self.applications.len()
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    pub fn snapshot(&self) -> LiaisonSnapshot {
        let mut applications = self.applications();
        applications.sort_by(|a, b| a.id.cmp(&b.id));
        let mut calls = self.calls();
        calls.sort_by(|a, b| a.id.cmp(&b.id));
        LiaisonSnapshot {
            applications,
            calls,
        }
    }

    /// Rebuild a store from a snapshot
    ///
    /// Rejects duplicate ids, orphaned calls, applications whose status
    /// disagrees with their audit trail or whose trail runs backwards in time,
    /// and calls whose status disagrees with their outcome.
    pub fn from_snapshot(snapshot: LiaisonSnapshot) -> LiaisonResult<Self> {
        let store = Self::new();
        for application in snapshot.applications {
            if !application.status_matches_history() {
                return Err(validation_error(format!(
                    "application {} has status {} but its history ends elsewhere",
                    application.id, application.status
                )));
            }
            if !application.status_history.is_chronological() {
                return Err(validation_error(format!(
                    "application {} has out-of-order status history",
                    application.id
                )));
            }
            store.insert_application(application)?;
        }

        let mut seen = HashSet::new();
        for call in snapshot.calls {
            if !store.contains_application(&call.application_id) {
                return Err(validation_error(format!(
                    "call {} references unknown application {}",
                    call.id, call.application_id
                )));
            }
            if call.is_completed() != call.outcome.is_some() {
                return Err(validation_error(format!(
                    "call {} is {} but {} an outcome",
                    call.id,
                    call.status,
                    if call.outcome.is_some() { "has" } else { "lacks" }
                )));
            }
            if !seen.insert(call.id.clone()) {
                return Err(validation_error(format!(
                    "call id already exists: {}",
                    call.id
                )));
            }
            store.calls.insert(call.id.clone(), call);
        }

        tracing::debug!(
            applications = store.application_count(),
            calls = store.call_count(),
            "Store restored from snapshot"
        );
        Ok(store)
    }

    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> LiaisonResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| io_error("write", path, &e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.snapshot())?;
        tracing::info!(path = %path.display(), "💾 Snapshot saved");
        Ok(())
    }

    pub fn load_snapshot(path: impl AsRef<Path>) -> LiaisonResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| io_error("read", path, &e))?;
        let snapshot: LiaisonSnapshot = serde_json::from_reader(BufReader::new(file))?;
        Self::from_snapshot(snapshot)
    }
}

fn io_error(action: &str, path: &Path, error: &std::io::Error) -> LiaisonError {
    LiaisonError::Serialization(format!(
        "failed to {action} snapshot {}: {error}",
        path.display()
    ))
}
