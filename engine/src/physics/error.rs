//! Physics error type
//!
//! Errors only surface at construction and configuration time. A running
//! step never fails; shape mismatches take the placeholder resolution paths.

use std::path::PathBuf;

use thiserror::Error;

use super::body::BodyId;

/// Errors returned by body construction, attachment and config loading.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Mass must be strictly positive (forces are divided by it).
    #[error("body '{name}' has non-positive mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    /// The id does not refer to a body in this set.
    #[error("unknown body {0:?}")]
    UnknownBody(BodyId),

    /// A body cannot be its own parent.
    #[error("body {0:?} cannot be attached to itself")]
    SelfAttachment(BodyId),

    /// Attaching would close a loop in the parent chain.
    #[error("attaching {child:?} to {parent:?} would create a parent cycle")]
    ParentCycle { child: BodyId, parent: BodyId },

    /// A kinematic body would end up in a chain with a movable root.
    #[error("kinematic body {body:?} cannot ride on movable root {root:?}")]
    KinematicUnderMovableRoot { body: BodyId, root: BodyId },

    /// Config file could not be read.
    #[error("failed to read physics config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config JSON is malformed.
    #[error("failed to parse physics config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
