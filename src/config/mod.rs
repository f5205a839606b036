// src/config/mod.rs

//! Job files: a TOML description of one invocation.
//!
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a job file from disk (`loader.rs`).
//! - Turn it into a runnable [`Job`] (`job.rs`).

pub mod job;
pub mod loader;
pub mod model;

pub use job::Job;
pub use loader::{load_from_path, load_job};
pub use model::{AdHocSection, CommonSection, JobFile, PlaybookSection};
