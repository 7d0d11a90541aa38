//! Background Tasks Module
//!
//! Periodic maintenance for the in-process store.

pub mod cleanup;

pub use cleanup::spawn_cleanup_task;
