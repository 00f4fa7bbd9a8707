//! Error types for Flowline operations.
//!
//! This module provides the main error type [`FlowlineError`]. Only explicit
//! API misuse produces errors (unknown ids, duplicate ids, invalid sizes,
//! inconsistent scenes). Anomalies that can appear transiently while a user
//! edits the diagram, such as dangling connections or cyclic drop targets, are
//! skipped or refused instead.

use std::io;

use thiserror::Error;

use flowline_core::identifier::Id;

/// The main error type for Flowline operations.
#[derive(Debug, Error)]
pub enum FlowlineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown shape `{0}`")]
    UnknownShape(Id),

    #[error("Unknown connection `{0}`")]
    UnknownConnection(Id),

    #[error("Shape `{0}` already exists")]
    DuplicateShape(Id),

    #[error("Connection `{0}` already exists")]
    DuplicateConnection(Id),

    #[error("Shape `{id}` must have a positive size, got {width}x{height}")]
    InvalidSize { id: Id, width: f32, height: f32 },

    #[error("Grouping `{child}` under `{parent}` would create a cycle")]
    CyclicGrouping { child: Id, parent: Id },

    #[error("Invalid scene: {0}")]
    Scene(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
