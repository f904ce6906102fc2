//! Ferry schedule normalization and day views.
//!
//! Schedules from several operators are normalized into one canonical
//! document, which then answers "which sailings run on this date?" across
//! every service at once. The answers are rendered as a static site, served
//! over HTTP, or printed.

pub mod canonical;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod publish;
pub mod render;
pub mod schedule;
pub mod web;

pub use error::Error;
