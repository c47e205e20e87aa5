//! Concrete storage backends for the task list.
//! Writes go through a temp file and an atomic rename.

pub mod json_file_store;
