use anyhow::Result;
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;

use super::traits::{NewCountry, NewMedal, Storage, StorageRead, StorageTx, StorageWrite};
use crate::types::{
    Country, CountrySortField, Gender, GoldMedal, MedalSortField, Season, SortDirection,
};

const DB_SCHEMA_VERSION: i64 = 1;

const MEDAL_COLUMNS: &str =
    "id, year, city, season, athlete, country, gender, sport, discipline, event";

#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
}

pub struct SqliteTx {
    conn: Connection,
}

impl StorageTx for SqliteTx {
    fn commit(self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }
}

fn country_order_clause(sort: CountrySortField, direction: SortDirection) -> String {
    match sort {
        CountrySortField::Name => format!("ORDER BY name {}", direction.sql()),
        CountrySortField::Gdp => format!("ORDER BY gdp {}", direction.sql()),
        CountrySortField::Population => format!("ORDER BY population {}", direction.sql()),
        // Medal counts are derived; the aggregator re-sorts over table order.
        CountrySortField::Medals => "ORDER BY id ASC".to_string(),
    }
}

fn medal_order_clause(sort: MedalSortField, direction: SortDirection) -> String {
    format!("ORDER BY {} {}", sort.column(), direction.sql())
}

fn map_country_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Country> {
    Ok(Country {
        id: row.get(0)?,
        name: row.get(1)?,
        gdp: row.get(2)?,
        population: row.get(3)?,
    })
}

fn map_medal_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GoldMedal> {
    let season_str: String = row.get(3)?;
    let season: Season = season_str
        .parse()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(err)))?;
    let gender_str: String = row.get(6)?;
    let gender: Gender = gender_str
        .parse()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(err)))?;
    Ok(GoldMedal {
        id: row.get(0)?,
        year: row.get(1)?,
        city: row.get(2)?,
        season,
        athlete: row.get(4)?,
        country: row.get(5)?,
        gender,
        sport: row.get(7)?,
        discipline: row.get(8)?,
        event: row.get(9)?,
    })
}

fn db_list_countries(
    conn: &Connection,
    sort: CountrySortField,
    direction: SortDirection,
) -> rusqlite::Result<Vec<Country>> {
    let sql = format!(
        "SELECT id, name, gdp, population FROM countries {}",
        country_order_clause(sort, direction)
    );
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt
        .query_map([], map_country_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_find_country_by_name(conn: &Connection, name: &str) -> rusqlite::Result<Option<Country>> {
    conn.query_row(
        "SELECT id, name, gdp, population FROM countries WHERE name = ?1",
        params![name],
        map_country_row,
    )
    .optional()
}

fn db_list_medals(
    conn: &Connection,
    sort: MedalSortField,
    direction: SortDirection,
) -> rusqlite::Result<Vec<GoldMedal>> {
    let sql = format!(
        "SELECT {MEDAL_COLUMNS} FROM gold_medals {}",
        medal_order_clause(sort, direction)
    );
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt
        .query_map([], map_medal_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_list_medals_by_country(
    conn: &Connection,
    country: &str,
    sort: MedalSortField,
    direction: SortDirection,
) -> rusqlite::Result<Vec<GoldMedal>> {
    let sql = format!(
        "SELECT {MEDAL_COLUMNS} FROM gold_medals WHERE country = ?1 {}",
        medal_order_clause(sort, direction)
    );
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt
        .query_map(params![country], map_medal_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_list_medals_by_country_and_season(
    conn: &Connection,
    country: &str,
    season: Season,
) -> rusqlite::Result<Vec<GoldMedal>> {
    let sql = format!(
        "SELECT {MEDAL_COLUMNS} FROM gold_medals WHERE country = ?1 AND season = ?2 ORDER BY year ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt
        .query_map(params![country, season.as_str()], map_medal_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_list_medals_by_season(conn: &Connection, season: Season) -> rusqlite::Result<Vec<GoldMedal>> {
    let sql = format!("SELECT {MEDAL_COLUMNS} FROM gold_medals WHERE season = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt
        .query_map(params![season.as_str()], map_medal_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_list_medals_by_gender_and_country(
    conn: &Connection,
    gender: Gender,
    country: &str,
) -> rusqlite::Result<Vec<GoldMedal>> {
    let sql = format!("SELECT {MEDAL_COLUMNS} FROM gold_medals WHERE gender = ?1 AND country = ?2");
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt
        .query_map(params![gender.as_str(), country], map_medal_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_insert_countries(conn: &Connection, rows: &[NewCountry]) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO countries (name, gdp, population) VALUES (?1, ?2, ?3)
                 ON CONFLICT(name) DO UPDATE SET gdp=excluded.gdp, population=excluded.population",
    )?;
    for row in rows {
        stmt.execute(params![row.name, row.gdp, row.population])?;
    }
    Ok(())
}

fn db_insert_medals(conn: &Connection, rows: &[NewMedal]) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO gold_medals (year, city, season, athlete, country, gender, sport, discipline, event)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.year,
            row.city,
            row.season.as_str(),
            row.athlete,
            row.country,
            row.gender.as_str(),
            row.sport,
            row.discipline,
            row.event
        ])?;
    }
    Ok(())
}

impl StorageRead for SqliteTx {
    fn list_countries(
        &self,
        sort: CountrySortField,
        direction: SortDirection,
    ) -> Result<Vec<Country>> {
        Ok(db_list_countries(&self.conn, sort, direction)?)
    }

    fn find_country_by_name(&self, name: &str) -> Result<Option<Country>> {
        Ok(db_find_country_by_name(&self.conn, name)?)
    }

    fn list_medals(
        &self,
        sort: MedalSortField,
        direction: SortDirection,
    ) -> Result<Vec<GoldMedal>> {
        Ok(db_list_medals(&self.conn, sort, direction)?)
    }

    fn list_medals_by_country(
        &self,
        country: &str,
        sort: MedalSortField,
        direction: SortDirection,
    ) -> Result<Vec<GoldMedal>> {
        Ok(db_list_medals_by_country(&self.conn, country, sort, direction)?)
    }

    fn list_medals_by_country_and_season(
        &self,
        country: &str,
        season: Season,
    ) -> Result<Vec<GoldMedal>> {
        Ok(db_list_medals_by_country_and_season(&self.conn, country, season)?)
    }

    fn list_medals_by_season(&self, season: Season) -> Result<Vec<GoldMedal>> {
        Ok(db_list_medals_by_season(&self.conn, season)?)
    }

    fn list_medals_by_gender_and_country(
        &self,
        gender: Gender,
        country: &str,
    ) -> Result<Vec<GoldMedal>> {
        Ok(db_list_medals_by_gender_and_country(&self.conn, gender, country)?)
    }
}

impl StorageWrite for SqliteTx {
    fn insert_countries(&self, rows: &[NewCountry]) -> Result<()> {
        Ok(db_insert_countries(&self.conn, rows)?)
    }

    fn insert_medals(&self, rows: &[NewMedal]) -> Result<()> {
        Ok(db_insert_medals(&self.conn, rows)?)
    }
}

impl Storage for SqliteStorage {
    type Tx = SqliteTx;

    fn begin_tx(&self) -> Result<Self::Tx> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        conn.execute("BEGIN IMMEDIATE", [])?;

        Ok(SqliteTx { conn })
    }
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        if version == 0 {
            conn.execute_batch(
                r#"
            CREATE TABLE countries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                gdp REAL,
                population INTEGER
            );
            CREATE TABLE gold_medals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                year INTEGER NOT NULL,
                city TEXT NOT NULL,
                season TEXT NOT NULL CHECK (season IN ('Summer', 'Winter')),
                athlete TEXT NOT NULL,
                country TEXT NOT NULL,
                gender TEXT NOT NULL CHECK (gender IN ('Men', 'Women')),
                sport TEXT NOT NULL,
                discipline TEXT NOT NULL,
                event TEXT NOT NULL
            );
            CREATE INDEX gold_medals_country_idx
                ON gold_medals(country);
            CREATE INDEX gold_medals_season_idx
                ON gold_medals(season);
            CREATE INDEX gold_medals_gender_country_idx
                ON gold_medals(gender, country);
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl StorageRead for SqliteStorage {
    fn list_countries(
        &self,
        sort: CountrySortField,
        direction: SortDirection,
    ) -> Result<Vec<Country>> {
        let rows = self.with_conn(|conn| db_list_countries(conn, sort, direction))?;
        Ok(rows)
    }

    fn find_country_by_name(&self, name: &str) -> Result<Option<Country>> {
        let row = self.with_conn(|conn| db_find_country_by_name(conn, name))?;
        Ok(row)
    }

    fn list_medals(
        &self,
        sort: MedalSortField,
        direction: SortDirection,
    ) -> Result<Vec<GoldMedal>> {
        let rows = self.with_conn(|conn| db_list_medals(conn, sort, direction))?;
        Ok(rows)
    }

    fn list_medals_by_country(
        &self,
        country: &str,
        sort: MedalSortField,
        direction: SortDirection,
    ) -> Result<Vec<GoldMedal>> {
        let rows = self.with_conn(|conn| db_list_medals_by_country(conn, country, sort, direction))?;
        Ok(rows)
    }

    fn list_medals_by_country_and_season(
        &self,
        country: &str,
        season: Season,
    ) -> Result<Vec<GoldMedal>> {
        let rows =
            self.with_conn(|conn| db_list_medals_by_country_and_season(conn, country, season))?;
        Ok(rows)
    }

    fn list_medals_by_season(&self, season: Season) -> Result<Vec<GoldMedal>> {
        let rows = self.with_conn(|conn| db_list_medals_by_season(conn, season))?;
        Ok(rows)
    }

    fn list_medals_by_gender_and_country(
        &self,
        gender: Gender,
        country: &str,
    ) -> Result<Vec<GoldMedal>> {
        let rows =
            self.with_conn(|conn| db_list_medals_by_gender_and_country(conn, gender, country))?;
        Ok(rows)
    }
}
