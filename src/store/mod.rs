//! Ledger storage for the FieldTrack engine.
//!
//! The store is an injected repository (never a module-level singleton)
//! that owns the employee, job site, shift, and segment tables. Every
//! ledger mutation runs its state check and its inserts/updates inside a
//! single write transaction, which is what keeps the at-most-one-open-shift
//! invariant safe under concurrent callers.

mod memory;

pub use memory::{MemoryStore, StoreInner};
