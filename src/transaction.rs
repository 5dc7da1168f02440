//! Transaction correlation table (spec §4.3).
//!
//! A single `id → Transaction` mapping, shared by whichever layer
//! (`Connection`, `Session`, `Handle`) created the pending request. Every
//! mutation goes through this API; the owner check and idempotent-close
//! behaviour live here once rather than being re-implemented per layer.

use crate::error::Error;
use crate::types::{HandleId, SessionId};
use crate::util::IdGenerator;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::oneshot;

/// Which entity is allowed to close a given transaction (invariant I3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Owner {
    Connection,
    Session(SessionId),
    Handle(HandleId),
}

/// The raw reply payload handed back to whoever is awaiting a transaction.
pub(crate) type TransactionReply = serde_json::Value;

struct Entry {
    owner: Owner,
    resolver: oneshot::Sender<Result<TransactionReply, Error>>,
}

/// A future resolving when the matching transaction is closed.
pub(crate) type TransactionFuture = oneshot::Receiver<Result<TransactionReply, Error>>;

#[derive(Default)]
pub(crate) struct TransactionManager {
    table: Mutex<HashMap<String, Entry>>,
    ids: IdGenerator,
}

impl TransactionManager {
    pub(crate) fn new() -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
            ids: IdGenerator::new(),
        }
    }

    /// Generates a fresh id, guaranteed (statistically) unused.
    pub(crate) fn generate_id(&self) -> String {
        self.ids.next_id()
    }

    /// Registers a new pending transaction, returning the future its owner
    /// awaits for the reply. Fails with [`Error::DuplicateId`] if `id` is
    /// already registered (I1).
    pub(crate) fn create(&self, id: String, owner: Owner) -> Result<TransactionFuture, Error> {
        let (tx, rx) = oneshot::channel();
        let mut table = self.table.lock();
        if table.contains_key(&id) {
            return Err(Error::DuplicateId);
        }
        table.insert(id, Entry { owner, resolver: tx });
        Ok(rx)
    }

    pub(crate) fn has(&self, id: &str) -> bool {
        self.table.lock().contains_key(id)
    }

    pub(crate) fn owner_of(&self, id: &str) -> Option<Owner> {
        self.table.lock().get(id).map(|entry| entry.owner)
    }

    /// Removes and resolves the transaction with `data`, but only if `owner`
    /// matches the registered owner. No-op (silently ignored) otherwise —
    /// this is both the idempotence guard (I2) and the "no silent
    /// promotion" guard: a non-owner's close attempt never succeeds.
    pub(crate) fn close_with_success(&self, id: &str, owner: Owner, data: TransactionReply) {
        let entry = {
            let mut table = self.table.lock();
            match table.get(id) {
                Some(entry) if entry.owner == owner => table.remove(id),
                _ => None,
            }
        };
        if let Some(entry) = entry {
            let _ = entry.resolver.send(Ok(data));
        }
    }

    pub(crate) fn close_with_error(&self, id: &str, owner: Owner, err: Error) {
        let entry = {
            let mut table = self.table.lock();
            match table.get(id) {
                Some(entry) if entry.owner == owner => table.remove(id),
                _ => None,
            }
        };
        if let Some(entry) = entry {
            let _ = entry.resolver.send(Err(err));
        }
    }

    /// Closes every transaction owned by `owner` with `err`. Used during
    /// teardown: connection close fails everything, session destroy fails
    /// that session's and its handles' transactions, handle detach fails
    /// only that handle's.
    pub(crate) fn close_all_with_error<F>(&self, matches: F, err_factory: impl Fn() -> Error)
    where
        F: Fn(Owner) -> bool,
    {
        let entries: Vec<Entry> = {
            let mut table = self.table.lock();
            let ids: Vec<String> = table
                .iter()
                .filter(|(_, entry)| matches(entry.owner))
                .map(|(id, _)| id.clone())
                .collect();
            ids.into_iter()
                .filter_map(|id| table.remove(&id))
                .collect()
        };
        for entry in entries {
            let _ = entry.resolver.send(Err(err_factory()));
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.table.lock().len()
    }
}
