//! Snapshot and restore for machine instances.
//!
//! A snapshot captures what is needed to rebuild an instance against the
//! same definition: its current state and transition history. Callbacks and
//! the user context are not part of it; the embedding application stores
//! the context however it likes and passes it back on restore.

use crate::core::{Event, State, StateHistory};
use crate::machine::{MachineDefinition, MachineInstance};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of an instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<S: State> {
    /// Snapshot format version
    pub version: u32,

    /// Id of the instance the snapshot was taken from
    pub instance_id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Current state of the instance
    pub current_state: S,

    /// Retained transition history
    pub history: StateHistory<S>,
}

impl<S: State> Snapshot<S> {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact encoding for storage.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl<S: State, E: Event, C, P> MachineInstance<S, E, C, P> {
    /// Capture the current state and history.
    pub fn snapshot(&self) -> Snapshot<S> {
        Snapshot {
            version: SNAPSHOT_VERSION,
            instance_id: self.id,
            taken_at: Utc::now(),
            current_state: self.current.clone(),
            history: self.history.clone(),
        }
    }

    /// Rebuild an instance from a snapshot.
    ///
    /// The restored instance keeps the snapshot's id. No hooks run. History
    /// longer than the definition's limit loses its oldest records; every
    /// state the snapshot names must be declared by the definition.
    pub fn restore(
        definition: Arc<MachineDefinition<S, E, C, P>>,
        snapshot: Snapshot<S>,
        context: C,
    ) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        let recorded = snapshot
            .history
            .transitions()
            .flat_map(|transition| [&transition.from, &transition.to]);
        if let Some(unknown) = std::iter::once(&snapshot.current_state)
            .chain(recorded)
            .find(|state| !definition.contains_state(state))
        {
            return Err(SnapshotError::UnknownState {
                state: unknown.name().to_string(),
            });
        }

        let mut history = snapshot.history;
        history.truncate_to(definition.config().history_limit);
        debug!(
            instance = %snapshot.instance_id,
            state = snapshot.current_state.name(),
            history = history.len(),
            "instance restored"
        );
        let mut instance = MachineInstance::new(definition, context);
        instance.id = snapshot.instance_id;
        instance.current = snapshot.current_state;
        instance.history = history;
        Ok(instance)
    }
}
