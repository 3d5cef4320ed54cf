// ==========================================
// Vegetation Cut - area configuration repository
// ==========================================
// Table: area_config (one row per physical area)
// No business rules here; validation happens in config
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::area::AreaConfig;
use crate::domain::types::Machine;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// raw row before the machine code is parsed
type AreaRow = (u32, String, String, u32, u32);

pub struct AreaConfigRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AreaConfigRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: AreaRow) -> RepositoryResult<AreaConfig> {
        let (id, name, machine, rainy, dry) = row;
        let machine = machine
            .parse::<Machine>()
            .map_err(|message| RepositoryError::FieldValueError {
                field: "machine".to_string(),
                message,
            })?;

        Ok(AreaConfig {
            id,
            name,
            machine,
            rainy_season_interval_days: rainy,
            dry_season_interval_days: dry,
        })
    }

    /// All areas ordered by id
    pub fn list_all(&self) -> RepositoryResult<Vec<AreaConfig>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT area_id, name, machine, rainy_interval_days, dry_interval_days
            FROM area_config
            ORDER BY area_id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })?
            .collect::<Result<Vec<AreaRow>, _>>()?;

        rows.into_iter().map(Self::map_row).collect()
    }

    pub fn find_by_id(&self, area_id: u32) -> RepositoryResult<Option<AreaConfig>> {
        let conn = self.get_conn()?;
        let row: Option<AreaRow> = conn
            .query_row(
                r#"
                SELECT area_id, name, machine, rainy_interval_days, dry_interval_days
                FROM area_config
                WHERE area_id = ?1
                "#,
                params![area_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()?;

        row.map(Self::map_row).transpose()
    }

    pub fn count(&self) -> RepositoryResult<u32> {
        let conn = self.get_conn()?;
        let count: u32 = conn.query_row("SELECT COUNT(*) FROM area_config", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert or update one area
    pub fn upsert(&self, area: &AreaConfig) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::upsert_with(&conn, area)?;
        Ok(())
    }

    /// Replace the whole area list in one transaction
    pub fn replace_all(&self, areas: &[AreaConfig]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute("DELETE FROM area_config", [])?;
        for area in areas {
            Self::upsert_with(&tx, area)?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(areas.len())
    }

    pub(crate) fn upsert_with(conn: &Connection, area: &AreaConfig) -> rusqlite::Result<usize> {
        conn.execute(
            r#"
            INSERT INTO area_config (
                area_id, name, machine, rainy_interval_days, dry_interval_days, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))
            ON CONFLICT(area_id) DO UPDATE SET
                name = excluded.name,
                machine = excluded.machine,
                rainy_interval_days = excluded.rainy_interval_days,
                dry_interval_days = excluded.dry_interval_days,
                updated_at = excluded.updated_at
            "#,
            params![
                area.id,
                area.name,
                area.machine.to_string(),
                area.rainy_season_interval_days,
                area.dry_season_interval_days,
            ],
        )
    }
}
