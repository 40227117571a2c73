//! Skill persistence sink.
//!
//! Generated skills are upserted into the `skills` table keyed by their
//! composite id, so re-running setup replaces a skill's content in place
//! while keeping its original install timestamp.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use skillbridge_codegen::SkillDescriptor;

use crate::db::Database;
use crate::error::{StoreError, StoreResult};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A skill row as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledSkill {
    /// Composite id (`{tool}-{action}`).
    pub id: String,
    /// Display title.
    pub title: String,
    /// Action description.
    pub description: String,
    /// File name the skill is installed under.
    pub file_name: String,
    /// Rendered Python source.
    pub content: String,
    /// Unix timestamp of the first install.
    pub created_at: i64,
    /// Unix timestamp of the last upsert.
    pub updated_at: i64,
}

// ---------------------------------------------------------------------------
// SkillStore
// ---------------------------------------------------------------------------

/// Upsert-oriented store for generated skills.
#[derive(Clone)]
pub struct SkillStore {
    db: Database,
}

impl SkillStore {
    /// Create a new skill store backed by `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert or replace a skill, keyed by its id.
    ///
    /// An existing row keeps its `created_at`; everything else is
    /// overwritten with the new descriptor.
    #[instrument(skip(self, skill), fields(id = %skill.id))]
    pub async fn upsert(&self, skill: &SkillDescriptor) -> StoreResult<()> {
        let skill = skill.clone();
        let now = Utc::now().timestamp();

        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO skills (id, title, description, file_name, content, created_at, updated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) \
                     ON CONFLICT(id) DO UPDATE SET \
                         title = excluded.title, \
                         description = excluded.description, \
                         file_name = excluded.file_name, \
                         content = excluded.content, \
                         updated_at = excluded.updated_at",
                    rusqlite::params![
                        skill.id,
                        skill.title,
                        skill.description,
                        skill.file_name,
                        skill.content,
                        now
                    ],
                )?;
                Ok(())
            })
            .await?;

        debug!("skill upserted");
        Ok(())
    }

    /// Fetch a single skill by id, returning `None` if not installed.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> StoreResult<Option<InstalledSkill>> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                let result = conn.query_row(
                    "SELECT id, title, description, file_name, content, created_at, updated_at \
                     FROM skills WHERE id = ?1",
                    rusqlite::params![id],
                    map_skill_row,
                );
                match result {
                    Ok(skill) => Ok(Some(skill)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(StoreError::Sqlite(e)),
                }
            })
            .await
    }

    /// List installed skills ordered by first install time.
    #[instrument(skip(self))]
    pub async fn list(&self) -> StoreResult<Vec<InstalledSkill>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, title, description, file_name, content, created_at, updated_at \
                     FROM skills ORDER BY created_at ASC, id ASC",
                )?;
                let rows = stmt
                    .query_map([], map_skill_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
    }

    /// Remove a skill permanently.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                let deleted =
                    conn.execute("DELETE FROM skills WHERE id = ?1", rusqlite::params![id])?;
                if deleted == 0 {
                    return Err(StoreError::NotFound { entity: "skill", id });
                }
                Ok(())
            })
            .await
    }

    /// Return the total number of installed skills.
    #[instrument(skip(self))]
    pub async fn count(&self) -> StoreResult<i64> {
        self.db
            .execute(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM skills", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }
}

/// Map a full skills row.
fn map_skill_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<InstalledSkill> {
    Ok(InstalledSkill {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        file_name: row.get(3)?,
        content: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

// ── tests ────────────────────────────────────────────────────────────
