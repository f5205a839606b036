// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`options`] holds the run-time options and the fully resolved
//!   [`Invocation`] (program, argv, environment, working directory).
//! - [`runner`] provides the `ProcessRunner` trait and the
//!   `TokioProcessRunner` used in production, which tests can replace with a
//!   fake implementation.

pub mod options;
pub mod runner;

pub use options::{ExecOptions, Invocation, OutputEvent, OutputSender, StreamKind, UNBUFFERED_ENV};
pub use runner::{ProcessRunner, TokioProcessRunner};
