//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Provide typed CRUD over the `classes` and `lectures` tables.
//! - Isolate SQL details from the async store and library services.
//!
//! # Invariants
//! - Every repository call is exactly one SQLite transaction.
//! - Write paths validate records before SQL mutations.
//! - Point lookups return `Ok(None)` for absent rows; only updates report
//!   `NotFound`.
//! - Engine failures always surface as `EngineUnavailable`; nothing retries.

use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod class_repo;
pub mod lecture_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Record kind named in `NotFound`/`DuplicateKey` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Class,
    Lecture,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Lecture => write!(f, "lecture"),
        }
    }
}

#[derive(Debug)]
pub enum RepoError {
    /// The engine could not open, or the request failed inside it.
    EngineUnavailable(DbError),
    NotFound { entity: Entity, id: Uuid },
    DuplicateKey { entity: Entity, id: Uuid },
    Validation(ValidationError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EngineUnavailable(err) => write!(f, "storage engine unavailable: {err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateKey { entity, id } => write!(f, "{entity} id already exists: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EngineUnavailable(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } | Self::DuplicateKey { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl RepoError {
    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EngineUnavailable(_) => "engine_unavailable",
            Self::NotFound { .. } => "not_found",
            Self::DuplicateKey { .. } => "duplicate_key",
            Self::Validation(_) => "validation",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::EngineUnavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::EngineUnavailable(DbError::Sqlite(value))
    }
}

/// Maps a primary-key collision on insert to `DuplicateKey`.
pub(crate) fn map_insert_error(err: rusqlite::Error, entity: Entity, id: Uuid) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            RepoError::DuplicateKey { entity, id }
        }
        _ => err.into(),
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn parse_timestamp(
    millis: i64,
    column: &str,
) -> RepoResult<crate::model::timestamp::Timestamp> {
    crate::model::timestamp::from_epoch_ms(millis).ok_or_else(|| {
        RepoError::InvalidData(format!("timestamp `{millis}` out of range in {column}"))
    })
}
