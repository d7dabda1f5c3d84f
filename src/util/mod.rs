//! Utility helpers shared across admin UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and
//! component logic so the session and feed plumbing stays testable off-wasm.

pub mod cookies;
pub mod format;
pub mod guard;
pub mod nav;
pub mod storage;
