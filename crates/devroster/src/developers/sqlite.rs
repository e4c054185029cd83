use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use tracing::warn;

use super::domain::{Developer, MemberId, RetiredDeveloper, StatusCode};
use super::repository::{DeveloperStore, DeveloperTransaction, RepositoryError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS developer (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    member_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    developer_level TEXT NOT NULL,
    developer_skill_type TEXT NOT NULL,
    experience_years INTEGER NOT NULL,
    status_code TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS retired_developer (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    member_id TEXT NOT NULL,
    name TEXT NOT NULL,
    retired_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS developer_status_idx ON developer (status_code);
";

const DEVELOPER_COLUMNS: &str = "member_id, name, age, developer_level, developer_skill_type, \
     experience_years, status_code, created_at, updated_at";

/// SQLite-backed store. The connection is shared behind a mutex; each
/// transaction runs `BEGIN IMMEDIATE` while holding it.
pub struct SqliteDeveloperStore {
    connection: Mutex<Connection>,
}

impl SqliteDeveloperStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let connection = Connection::open(path).map_err(unavailable)?;
        Self::with_connection(connection)
    }

    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        let connection = Connection::open_in_memory().map_err(unavailable)?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, RepositoryError> {
        connection.execute_batch(SCHEMA).map_err(unavailable)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }
}

impl DeveloperStore for SqliteDeveloperStore {
    type Transaction<'a> = SqliteTransaction<'a>;

    fn begin(&self) -> Result<Self::Transaction<'_>, RepositoryError> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| RepositoryError::Unavailable("sqlite connection lock poisoned".into()))?;
        connection
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(unavailable)?;

        Ok(SqliteTransaction {
            connection,
            finished: false,
        })
    }
}

pub struct SqliteTransaction<'a> {
    connection: MutexGuard<'a, Connection>,
    finished: bool,
}

impl DeveloperTransaction for SqliteTransaction<'_> {
    fn find_by_member_id(
        &mut self,
        member_id: &MemberId,
    ) -> Result<Option<Developer>, RepositoryError> {
        let sql = format!("SELECT {DEVELOPER_COLUMNS} FROM developer WHERE member_id = ?1");
        let row = self
            .connection
            .query_row(&sql, params![member_id.as_str()], DeveloperRow::read)
            .optional()
            .map_err(unavailable)?;

        row.map(Developer::try_from).transpose()
    }

    fn find_all_by_status(
        &mut self,
        status: StatusCode,
    ) -> Result<Vec<Developer>, RepositoryError> {
        let sql = format!(
            "SELECT {DEVELOPER_COLUMNS} FROM developer WHERE status_code = ?1 ORDER BY member_id"
        );
        let mut statement = self.connection.prepare(&sql).map_err(unavailable)?;
        let rows = statement
            .query_map(params![status.as_str()], DeveloperRow::read)
            .map_err(unavailable)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(unavailable)?;

        rows.into_iter().map(Developer::try_from).collect()
    }

    fn insert(&mut self, developer: Developer) -> Result<(), RepositoryError> {
        let sql = format!(
            "INSERT INTO developer ({DEVELOPER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        );
        self.connection
            .execute(
                &sql,
                params![
                    developer.member_id.as_str(),
                    developer.name,
                    developer.age,
                    developer.level.as_str(),
                    developer.skill_type.as_str(),
                    developer.experience_years,
                    developer.status.as_str(),
                    developer.created_at.to_rfc3339(),
                    developer.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|err| match err.sqlite_error_code() {
                Some(ErrorCode::ConstraintViolation) => RepositoryError::Conflict,
                _ => unavailable(err),
            })?;
        Ok(())
    }

    fn save(&mut self, developer: Developer) -> Result<(), RepositoryError> {
        let changed = self
            .connection
            .execute(
                "UPDATE developer SET name = ?2, age = ?3, developer_level = ?4, \
                 developer_skill_type = ?5, experience_years = ?6, status_code = ?7, \
                 updated_at = ?8 WHERE member_id = ?1",
                params![
                    developer.member_id.as_str(),
                    developer.name,
                    developer.age,
                    developer.level.as_str(),
                    developer.skill_type.as_str(),
                    developer.experience_years,
                    developer.status.as_str(),
                    developer.updated_at.to_rfc3339(),
                ],
            )
            .map_err(unavailable)?;

        if changed == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn save_retired(&mut self, retired: RetiredDeveloper) -> Result<(), RepositoryError> {
        self.connection
            .execute(
                "INSERT INTO retired_developer (member_id, name, retired_at) VALUES (?1, ?2, ?3)",
                params![
                    retired.member_id.as_str(),
                    retired.name,
                    retired.retired_at.to_rfc3339(),
                ],
            )
            .map_err(unavailable)?;
        Ok(())
    }

    fn find_all_retired(&mut self) -> Result<Vec<RetiredDeveloper>, RepositoryError> {
        let mut statement = self
            .connection
            .prepare("SELECT member_id, name, retired_at FROM retired_developer ORDER BY id")
            .map_err(unavailable)?;
        let rows = statement
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(unavailable)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(unavailable)?;

        rows.into_iter()
            .map(|(member_id, name, retired_at)| {
                Ok(RetiredDeveloper {
                    member_id: MemberId(member_id),
                    name,
                    retired_at: parse_timestamp(&retired_at)?,
                })
            })
            .collect()
    }

    fn commit(mut self) -> Result<(), RepositoryError> {
        self.connection
            .execute_batch("COMMIT")
            .map_err(unavailable)?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for SqliteTransaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.connection.execute_batch("ROLLBACK") {
            warn!(error = %err, "failed to roll back developer transaction");
        }
    }
}

/// Raw column values, converted to domain types outside the rusqlite row callback.
struct DeveloperRow {
    member_id: String,
    name: String,
    age: u32,
    level: String,
    skill_type: String,
    experience_years: u32,
    status: String,
    created_at: String,
    updated_at: String,
}

impl DeveloperRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            member_id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            level: row.get(3)?,
            skill_type: row.get(4)?,
            experience_years: row.get(5)?,
            status: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

impl TryFrom<DeveloperRow> for Developer {
    type Error = RepositoryError;

    fn try_from(row: DeveloperRow) -> Result<Self, Self::Error> {
        Ok(Developer {
            member_id: MemberId(row.member_id),
            name: row.name,
            age: row.age,
            level: FromStr::from_str(&row.level).map_err(unavailable)?,
            skill_type: FromStr::from_str(&row.skill_type).map_err(unavailable)?,
            experience_years: row.experience_years,
            status: FromStr::from_str(&row.status).map_err(unavailable)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(unavailable)
}

fn unavailable(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}
