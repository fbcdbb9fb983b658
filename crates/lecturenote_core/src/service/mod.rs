//! Core use-case services.
//!
//! # Responsibility
//! - Expose the async persistence surface (`NotebookStore`).
//! - Layer caller-facing use-cases on top of it (`LibraryService`).

pub mod library_service;
pub mod notebook_store;
