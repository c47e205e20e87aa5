//! Core abstractions for pocket: the task entity and the storage contract.
//! This crate is intentionally small to keep dependency surface minimal.

pub mod storage;
pub mod tasks;
