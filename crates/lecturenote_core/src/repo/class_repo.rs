//! Class repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a class never touches the `lectures` table.
//! - Listing order is unspecified; callers sort.

use super::{map_insert_error, parse_timestamp, parse_uuid, Entity, RepoResult};
use crate::model::class::{Class, ClassId};
use crate::model::timestamp::to_epoch_ms;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CLASS_SELECT_SQL: &str = "SELECT
    id,
    name,
    year,
    description,
    created_at,
    updated_at
FROM classes";

pub trait ClassRepository {
    fn insert_class(&self, class: &Class) -> RepoResult<()>;
    fn get_class(&self, id: ClassId) -> RepoResult<Option<Class>>;
    fn list_classes(&self) -> RepoResult<Vec<Class>>;
    /// Returns whether a row was removed; an unknown id is not an error.
    fn delete_class(&self, id: ClassId) -> RepoResult<bool>;
}

pub struct SqliteClassRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClassRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ClassRepository for SqliteClassRepository<'_> {
    fn insert_class(&self, class: &Class) -> RepoResult<()> {
        class.validate()?;

        self.conn
            .execute(
                "INSERT INTO classes (
                    id,
                    name,
                    year,
                    description,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    class.id.to_string(),
                    class.name.as_str(),
                    class.year.as_str(),
                    class.description.as_deref(),
                    to_epoch_ms(class.created_at),
                    to_epoch_ms(class.updated_at),
                ],
            )
            .map_err(|err| map_insert_error(err, Entity::Class, class.id))?;

        Ok(())
    }

    fn get_class(&self, id: ClassId) -> RepoResult<Option<Class>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLASS_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id.to_string()], read_class_columns)
            .optional()?;

        row.map(ClassColumns::into_class).transpose()
    }

    fn list_classes(&self) -> RepoResult<Vec<Class>> {
        let mut stmt = self.conn.prepare(&format!("{CLASS_SELECT_SQL};"))?;
        let rows = stmt.query_map([], read_class_columns)?;

        let mut classes = Vec::new();
        for row in rows {
            classes.push(row?.into_class()?);
        }
        Ok(classes)
    }

    fn delete_class(&self, id: ClassId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM classes WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

// Raw column values; decoding happens outside the rusqlite row callback so
// bad data maps to `InvalidData` rather than an engine error.
struct ClassColumns {
    id: String,
    name: String,
    year: String,
    description: Option<String>,
    created_at: i64,
    updated_at: i64,
}

fn read_class_columns(row: &Row<'_>) -> rusqlite::Result<ClassColumns> {
    Ok(ClassColumns {
        id: row.get("id")?,
        name: row.get("name")?,
        year: row.get("year")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl ClassColumns {
    fn into_class(self) -> RepoResult<Class> {
        Ok(Class {
            id: parse_uuid(&self.id, "classes.id")?,
            name: self.name,
            year: self.year,
            description: self.description,
            created_at: parse_timestamp(self.created_at, "classes.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "classes.updated_at")?,
        })
    }
}
