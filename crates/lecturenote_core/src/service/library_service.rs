//! Library use-cases built on [`NotebookStore`].
//!
//! # Responsibility
//! - Shape store results for list/detail screens (sorting, joined lookups).
//! - Save single-slide notes and import PDF decks.
//!
//! # Invariants
//! - Listing/loading failures degrade to empty/absent results with an
//!   `error` log; they never propagate.
//! - Create/update/delete failures always propagate to the caller.
//! - No use-case here deletes lectures when their class is deleted.

use crate::model::class::{Class, ClassId, NewClass};
use crate::model::lecture::{Lecture, LectureId, LecturePatch, NewLecture};
use crate::model::pdf::encode_pdf_data_url;
use crate::repo::{Entity, RepoError, RepoResult};
use crate::service::notebook_store::NotebookStore;
use log::{error, info};

/// Lecture detail plus its owning class; either may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LectureView {
    pub lecture: Option<Lecture>,
    pub class: Option<Class>,
}

#[derive(Clone)]
pub struct LibraryService {
    store: NotebookStore,
}

impl LibraryService {
    pub fn new(store: NotebookStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &NotebookStore {
        &self.store
    }

    /// All classes, most recently updated first. Empty on failure.
    pub async fn classes_recent_first(&self) -> Vec<Class> {
        match self.store.get_all_classes().await {
            Ok(mut classes) => {
                classes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                classes
            }
            Err(err) => {
                error!(
                    "event=classes_load module=library status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Lectures of one class, oldest first. Empty on failure.
    pub async fn lectures_for_class(&self, class_id: ClassId) -> Vec<Lecture> {
        match self.store.get_lectures_by_class(class_id).await {
            Ok(mut lectures) => {
                lectures.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
                lectures
            }
            Err(err) => {
                error!(
                    "event=lectures_load module=library status=error class_id={} error_code={} error={}",
                    class_id,
                    err.code(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Loads a lecture and its class concurrently.
    pub async fn open_lecture(&self, class_id: ClassId, lecture_id: LectureId) -> LectureView {
        let (lecture, class) = tokio::join!(
            self.store.get_lecture(lecture_id),
            self.store.get_class(class_id)
        );

        LectureView {
            lecture: lecture.unwrap_or_else(|err| {
                log_load_failure("lecture", lecture_id, &err);
                None
            }),
            class: class.unwrap_or_else(|err| {
                log_load_failure("class", class_id, &err);
                None
            }),
        }
    }

    pub async fn create_class(&self, new_class: NewClass) -> RepoResult<Class> {
        let class = self.store.create_class(new_class).await?;
        info!(
            "event=class_create module=library status=ok class_id={}",
            class.id
        );
        Ok(class)
    }

    /// Deletes the class row. Lectures of the class are left in place.
    pub async fn delete_class(&self, class_id: ClassId) -> RepoResult<()> {
        self.store.delete_class(class_id).await?;
        info!("event=class_delete module=library status=ok class_id={class_id}");
        Ok(())
    }

    /// Creates a lecture from raw PDF bytes with no notes yet.
    pub async fn import_lecture(
        &self,
        class_id: ClassId,
        name: &str,
        pdf_bytes: &[u8],
    ) -> RepoResult<Lecture> {
        let new_lecture = NewLecture::new(class_id, name.trim(), encode_pdf_data_url(pdf_bytes));
        let lecture = self.store.create_lecture(new_lecture).await?;
        info!(
            "event=lecture_import module=library status=ok lecture_id={} class_id={} pdf_bytes={}",
            lecture.id,
            class_id,
            pdf_bytes.len()
        );
        Ok(lecture)
    }

    /// Replaces the note of one slide and persists the full notes map.
    ///
    /// Inherits the lost-update window of [`NotebookStore::update_lecture`].
    pub async fn save_slide_note(
        &self,
        lecture_id: LectureId,
        slide: u32,
        markup: impl Into<String>,
    ) -> RepoResult<Lecture> {
        let current = self
            .store
            .get_lecture(lecture_id)
            .await?
            .ok_or(RepoError::NotFound {
                entity: Entity::Lecture,
                id: lecture_id,
            })?;

        let mut notes = current.notes;
        notes.set(slide, markup)?;
        self.store
            .update_lecture(lecture_id, LecturePatch::notes(notes))
            .await
    }
}

fn log_load_failure(kind: &str, id: uuid::Uuid, err: &RepoError) {
    error!(
        "event={kind}_load module=library status=error id={id} error_code={} error={err}",
        err.code()
    );
}
