//! Class (course/subject) records.

use super::timestamp::{self, Timestamp};
use super::{validate_name, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ClassId = Uuid;

/// One course grouping that owns lectures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    /// Free-form, e.g. `"2025"` or `"Fall 2025"`.
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Caller-supplied fields for a new class; id and timestamps are generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClass {
    pub name: String,
    pub year: String,
    pub description: Option<String>,
}

impl NewClass {
    pub fn new(name: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            year: year.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    /// Builds the full record with a fresh id and `created_at == updated_at`.
    pub fn into_class(self) -> Class {
        let now = timestamp::now();
        Class {
            id: Uuid::new_v4(),
            name: self.name,
            year: self.year,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Class {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}
