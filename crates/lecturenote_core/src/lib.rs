//! Core persistence for lecturenote: classes, lectures and per-slide notes.
//! This crate is the single source of truth for storage invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{StoreConfig, StoreLocation};
pub use db::{Database, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::class::{Class, ClassId, NewClass};
pub use model::lecture::{Lecture, LectureId, LecturePatch, NewLecture};
pub use model::notes::{is_blank_markup, SlideNotes};
pub use model::pdf::{decode_pdf_data_url, encode_pdf_data_url, PdfBlobError};
pub use model::timestamp::Timestamp;
pub use model::ValidationError;
pub use repo::class_repo::{ClassRepository, SqliteClassRepository};
pub use repo::lecture_repo::{LectureRepository, SqliteLectureRepository};
pub use repo::{Entity, RepoError, RepoResult};
pub use service::library_service::{LectureView, LibraryService};
pub use service::notebook_store::NotebookStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
