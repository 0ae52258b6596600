//! Generation tickets for asynchronous completions
//!
//! A ticket captures the session state an asynchronous request was issued
//! under. Any state-changing event bumps the generation, so a completion
//! whose ticket no longer matches is stale and gets discarded.

use chorobin_core::{Error, MethodId, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of the context a request was issued in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationTicket {
    pub session_id: Uuid,
    pub generation: u64,
    pub attribute: String,
    pub method: MethodId,
}

/// Monotonic generation counter of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCounter {
    session_id: Uuid,
    generation: u64,
}

impl Default for GenerationCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::with_session_id(Uuid::new_v4())
    }

    pub fn with_session_id(session_id: Uuid) -> Self {
        Self {
            session_id,
            generation: 0,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn current(&self) -> u64 {
        self.generation
    }

    /// Invalidate every outstanding ticket; returns the new generation
    pub fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn ticket(&self, attribute: &str, method: &MethodId) -> GenerationTicket {
        GenerationTicket {
            session_id: self.session_id,
            generation: self.generation,
            attribute: attribute.to_string(),
            method: method.clone(),
        }
    }

    /// `StaleAsyncResult` unless `ticket` was issued in the current context
    pub fn validate(
        &self,
        ticket: &GenerationTicket,
        attribute: &str,
        method: &MethodId,
    ) -> Result<()> {
        let current = self.ticket(attribute, method);
        if *ticket == current {
            Ok(())
        } else {
            Err(Error::StaleAsyncResult {
                captured: ticket.generation,
                current: self.generation,
            })
        }
    }
}
