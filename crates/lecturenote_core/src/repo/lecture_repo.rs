//! Lecture repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist lectures including their JSON-encoded slide notes.
//! - Serve the by-class listing through `idx_lectures_class_id`.
//!
//! # Invariants
//! - `class_id` is stored as given; no existence check against `classes`.
//! - `replace_lecture` rewrites the whole row and never changes `created_at`.
//! - `update_lecture_atomic` reads and writes inside one IMMEDIATE
//!   transaction, so no other writer can interleave.

use super::{map_insert_error, parse_timestamp, parse_uuid, Entity, RepoError, RepoResult};
use crate::model::class::ClassId;
use crate::model::lecture::{Lecture, LectureId, LecturePatch};
use crate::model::notes::SlideNotes;
use crate::model::timestamp::to_epoch_ms;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const LECTURE_SELECT_SQL: &str = "SELECT
    id,
    class_id,
    name,
    pdf_url,
    notes,
    created_at,
    updated_at
FROM lectures";

pub trait LectureRepository {
    fn insert_lecture(&self, lecture: &Lecture) -> RepoResult<()>;
    fn get_lecture(&self, id: LectureId) -> RepoResult<Option<Lecture>>;
    fn list_lectures_by_class(&self, class_id: ClassId) -> RepoResult<Vec<Lecture>>;
    /// Overwrites every mutable column of an existing row.
    ///
    /// Fails with `NotFound` when the row no longer exists.
    fn replace_lecture(&self, lecture: &Lecture) -> RepoResult<()>;
    /// Read, merge and write as one transaction.
    fn update_lecture_atomic(&self, id: LectureId, patch: LecturePatch) -> RepoResult<Lecture>;
    /// Returns whether a row was removed; an unknown id is not an error.
    fn delete_lecture(&self, id: LectureId) -> RepoResult<bool>;
}

pub struct SqliteLectureRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLectureRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl LectureRepository for SqliteLectureRepository<'_> {
    fn insert_lecture(&self, lecture: &Lecture) -> RepoResult<()> {
        lecture.validate()?;
        let notes_json = encode_notes(&lecture.notes)?;

        self.conn
            .execute(
                "INSERT INTO lectures (
                    id,
                    class_id,
                    name,
                    pdf_url,
                    notes,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    lecture.id.to_string(),
                    lecture.class_id.to_string(),
                    lecture.name.as_str(),
                    lecture.pdf_url.as_str(),
                    notes_json,
                    to_epoch_ms(lecture.created_at),
                    to_epoch_ms(lecture.updated_at),
                ],
            )
            .map_err(|err| map_insert_error(err, Entity::Lecture, lecture.id))?;

        Ok(())
    }

    fn get_lecture(&self, id: LectureId) -> RepoResult<Option<Lecture>> {
        select_lecture(self.conn, id)
    }

    fn list_lectures_by_class(&self, class_id: ClassId) -> RepoResult<Vec<Lecture>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LECTURE_SELECT_SQL} WHERE class_id = ?1;"))?;
        let rows = stmt.query_map([class_id.to_string()], read_lecture_columns)?;

        let mut lectures = Vec::new();
        for row in rows {
            lectures.push(row?.into_lecture()?);
        }
        Ok(lectures)
    }

    fn replace_lecture(&self, lecture: &Lecture) -> RepoResult<()> {
        write_lecture(self.conn, lecture)
    }

    fn update_lecture_atomic(&self, id: LectureId, patch: LecturePatch) -> RepoResult<Lecture> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let current = select_lecture(&tx, id)?.ok_or(RepoError::NotFound {
            entity: Entity::Lecture,
            id,
        })?;

        let merged = current.merge(patch);
        write_lecture(&tx, &merged)?;
        tx.commit()?;

        Ok(merged)
    }

    fn delete_lecture(&self, id: LectureId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM lectures WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn select_lecture(conn: &Connection, id: LectureId) -> RepoResult<Option<Lecture>> {
    let mut stmt = conn.prepare(&format!("{LECTURE_SELECT_SQL} WHERE id = ?1;"))?;
    let row = stmt
        .query_row([id.to_string()], read_lecture_columns)
        .optional()?;

    row.map(LectureColumns::into_lecture).transpose()
}

fn write_lecture(conn: &Connection, lecture: &Lecture) -> RepoResult<()> {
    lecture.validate()?;
    let notes_json = encode_notes(&lecture.notes)?;

    let changed = conn.execute(
        "UPDATE lectures
         SET
            class_id = ?2,
            name = ?3,
            pdf_url = ?4,
            notes = ?5,
            updated_at = ?6
         WHERE id = ?1;",
        params![
            lecture.id.to_string(),
            lecture.class_id.to_string(),
            lecture.name.as_str(),
            lecture.pdf_url.as_str(),
            notes_json,
            to_epoch_ms(lecture.updated_at),
        ],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound {
            entity: Entity::Lecture,
            id: lecture.id,
        });
    }

    Ok(())
}

fn encode_notes(notes: &SlideNotes) -> RepoResult<String> {
    serde_json::to_string(notes)
        .map_err(|err| RepoError::InvalidData(format!("unable to encode lecture notes: {err}")))
}

struct LectureColumns {
    id: String,
    class_id: String,
    name: String,
    pdf_url: String,
    notes: String,
    created_at: i64,
    updated_at: i64,
}

fn read_lecture_columns(row: &Row<'_>) -> rusqlite::Result<LectureColumns> {
    Ok(LectureColumns {
        id: row.get("id")?,
        class_id: row.get("class_id")?,
        name: row.get("name")?,
        pdf_url: row.get("pdf_url")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl LectureColumns {
    fn into_lecture(self) -> RepoResult<Lecture> {
        let notes: SlideNotes = serde_json::from_str(&self.notes).map_err(|err| {
            RepoError::InvalidData(format!("invalid notes json in lectures.notes: {err}"))
        })?;

        Ok(Lecture {
            id: parse_uuid(&self.id, "lectures.id")?,
            class_id: parse_uuid(&self.class_id, "lectures.class_id")?,
            name: self.name,
            pdf_url: self.pdf_url,
            notes,
            created_at: parse_timestamp(self.created_at, "lectures.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "lectures.updated_at")?,
        })
    }
}
