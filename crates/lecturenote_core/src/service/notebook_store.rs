//! Async store facade over the class/lecture repositories.
//!
//! # Responsibility
//! - Expose the public persistence surface as `async fn`s.
//! - Run each request on a blocking worker against the shared connection.
//!
//! # Invariants
//! - One store call is one repository call is one SQLite transaction, except
//!   `update_lecture` (read transaction, then write transaction).
//! - Engine failures are returned, never swallowed or retried.
//! - Dropping a returned future does not cancel the in-flight request.

use crate::config::StoreConfig;
use crate::db::{lock_connection, Database, DbError};
use crate::model::class::{Class, ClassId, NewClass};
use crate::model::lecture::{Lecture, LectureId, LecturePatch, NewLecture};
use crate::repo::class_repo::{ClassRepository, SqliteClassRepository};
use crate::repo::lecture_repo::{LectureRepository, SqliteLectureRepository};
use crate::repo::{Entity, RepoError, RepoResult};
use log::{debug, error};
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Instant;

/// Cloneable handle to the persistence layer; clones share one [`Database`].
#[derive(Clone)]
pub struct NotebookStore {
    db: Arc<Database>,
}

impl NotebookStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store over a fresh, unopened [`Database`] for `config`.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(Arc::new(Database::new(config.location.clone())))
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    pub async fn create_class(&self, new_class: NewClass) -> RepoResult<Class> {
        new_class.validate()?;
        let class = new_class.into_class();
        self.run("create_class", move |conn| {
            SqliteClassRepository::new(conn).insert_class(&class)?;
            Ok(class)
        })
        .await
    }

    /// All classes in storage order; sort by `updated_at` if order matters.
    pub async fn get_all_classes(&self) -> RepoResult<Vec<Class>> {
        self.run("get_all_classes", |conn| {
            SqliteClassRepository::new(conn).list_classes()
        })
        .await
    }

    pub async fn get_class(&self, id: ClassId) -> RepoResult<Option<Class>> {
        self.run("get_class", move |conn| {
            SqliteClassRepository::new(conn).get_class(id)
        })
        .await
    }

    /// Removes the class row only. Its lectures stay in storage and remain
    /// reachable by id and through [`Self::get_lectures_by_class`].
    pub async fn delete_class(&self, id: ClassId) -> RepoResult<()> {
        self.run("delete_class", move |conn| {
            let removed = SqliteClassRepository::new(conn).delete_class(id)?;
            debug!("event=class_delete module=store class_id={id} removed={removed}");
            Ok(())
        })
        .await
    }

    pub async fn create_lecture(&self, new_lecture: NewLecture) -> RepoResult<Lecture> {
        new_lecture.validate()?;
        let lecture = new_lecture.into_lecture();
        self.run("create_lecture", move |conn| {
            SqliteLectureRepository::new(conn).insert_lecture(&lecture)?;
            Ok(lecture)
        })
        .await
    }

    /// Lectures whose `class_id` equals `class_id`, in storage order.
    pub async fn get_lectures_by_class(&self, class_id: ClassId) -> RepoResult<Vec<Lecture>> {
        self.run("get_lectures_by_class", move |conn| {
            SqliteLectureRepository::new(conn).list_lectures_by_class(class_id)
        })
        .await
    }

    pub async fn get_lecture(&self, id: LectureId) -> RepoResult<Option<Lecture>> {
        self.run("get_lecture", move |conn| {
            SqliteLectureRepository::new(conn).get_lecture(id)
        })
        .await
    }

    /// Merges `patch` over the stored lecture and writes the whole record.
    ///
    /// The read and the write are separate transactions. Two overlapping
    /// calls for the same id can both read the same state, and the later
    /// write then discards the earlier one (lost update). Use
    /// [`Self::update_lecture_atomic`] when more than one writer exists.
    ///
    /// # Errors
    /// - `NotFound` when the lecture is absent at read time or was deleted
    ///   before the write.
    pub async fn update_lecture(&self, id: LectureId, patch: LecturePatch) -> RepoResult<Lecture> {
        let current = self.get_lecture(id).await?.ok_or(RepoError::NotFound {
            entity: Entity::Lecture,
            id,
        })?;

        let merged = current.merge(patch);
        self.run("update_lecture", move |conn| {
            SqliteLectureRepository::new(conn).replace_lecture(&merged)?;
            Ok(merged)
        })
        .await
    }

    /// Same contract as [`Self::update_lecture`] in a single transaction.
    pub async fn update_lecture_atomic(
        &self,
        id: LectureId,
        patch: LecturePatch,
    ) -> RepoResult<Lecture> {
        self.run("update_lecture_atomic", move |conn| {
            SqliteLectureRepository::new(conn).update_lecture_atomic(id, patch)
        })
        .await
    }

    pub async fn delete_lecture(&self, id: LectureId) -> RepoResult<()> {
        self.run("delete_lecture", move |conn| {
            let removed = SqliteLectureRepository::new(conn).delete_lecture(id)?;
            debug!("event=lecture_delete module=store lecture_id={id} removed={removed}");
            Ok(())
        })
        .await
    }

    async fn run<T, F>(&self, op: &'static str, request: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
    {
        let started_at = Instant::now();
        let db = Arc::clone(&self.db);

        let outcome = tokio::task::spawn_blocking(move || -> RepoResult<T> {
            let shared = db.connection()?;
            let conn = lock_connection(&shared)?;
            request(&conn)
        })
        .await
        .map_err(|err| RepoError::EngineUnavailable(DbError::WorkerFailed(err.to_string())))
        .and_then(|result| result);

        match &outcome {
            Ok(_) => debug!(
                "event=store_op module=store op={} status=ok duration_ms={}",
                op,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_op module=store op={} status=error duration_ms={} error_code={} error={}",
                op,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }

        outcome
    }
}
