// src/ident.rs
//! Identifier aliases consumed by the API-facing error kinds.
//!
//! The object store and resolver address things by fully-qualified
//! name; the diagnostics core only carries these identifiers through
//! into rendered messages.

/// Fully-qualified object name, e.g. `engine.Unit`.
pub type Fqon = String;

/// Member name within an object, e.g. `hitpoints`.
pub type MemberId = String;
