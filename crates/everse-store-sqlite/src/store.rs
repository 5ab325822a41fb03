//! [`SqliteStore`] — the SQLite implementation of [`EverseStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension as _};
use tracing::{debug, info};

use everse_core::{
  assessment::{NewAssessment, StoredAssessment},
  dimension::{Dimension, NewDimension},
  indicator::{Indicator, NewIndicator},
  relation::{ContentRelation, NewContentRelation},
  software::{NewSoftware, Software},
  store::{ColumnInfo, EverseStore, TableInfo},
  vocab::{Literal as _, Status},
};

use crate::{
  Error, Result,
  encode::{
    ASSESSED_SOFTWARE_COLUMNS, ASSESSMENT_COLUMNS, CHECK_COLUMNS,
    CREATOR_COLUMNS, DIMENSION_COLUMNS, DimensionRow, INDICATOR_COLUMNS,
    IndicatorRow, RELATION_COLUMNS, RawAssessment, RawDimension, RawIndicator,
    RawSoftware, RawStoredAssessment, SOFTWARE_COLUMNS, SoftwareRow,
    assessed_software_from_row, check_from_row, creator_from_row, encode_dt,
    relation_from_row,
  },
  schema,
};

/// Schema used by [`SqliteStore::open_in_memory`].
pub const DEFAULT_SCHEMA: &str = "everse";

// ─── Store ───────────────────────────────────────────────────────────────────

/// An EVERSE store backed by one SQLite file, attached under the schema name.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:   tokio_rusqlite::Connection,
  schema: String,
}

impl SqliteStore {
  /// Open (or create) the database at `path` as schema `schema` and create
  /// the tables if needed.
  pub async fn open(path: impl AsRef<Path>, schema: &str) -> Result<Self> {
    let store = Self::attach(&path.as_ref().to_string_lossy(), schema).await?;
    store.journal_mode_wal().await?;
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Attach an existing, initialised database. Fails with
  /// [`Error::Connectivity`] if the file or its tables are missing.
  pub async fn connect(path: impl AsRef<Path>, schema: &str) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      return Err(Error::Connectivity(format!(
        "database {} does not exist",
        path.display()
      )));
    }
    let store = Self::attach(&path.to_string_lossy(), schema).await?;
    store.journal_mode_wal().await?;
    store.require_tables().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let store = Self::attach(":memory:", DEFAULT_SCHEMA).await?;
    store.ensure_schema().await?;
    Ok(store)
  }

  pub fn schema(&self) -> &str { &self.schema }

  async fn attach(target: &str, schema: &str) -> Result<Self> {
    if !schema::is_valid_schema_name(schema) {
      return Err(Error::InvalidSchemaName(schema.to_owned()));
    }
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let target = target.to_owned();
    let attach = format!("ATTACH DATABASE ?1 AS {schema}");
    conn
      .call(move |conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute(&attach, [&target])?;
        Ok(())
      })
      .await?;
    Ok(Self { conn, schema: schema.to_owned() })
  }

  async fn journal_mode_wal(&self) -> Result<()> {
    let sql = format!("PRAGMA {}.journal_mode = WAL;", self.schema);
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn require_tables(&self) -> Result<()> {
    let sql = self.sql(
      "SELECT name FROM {schema}.sqlite_master WHERE type = 'table'",
    );
    let present: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let names = stmt
          .query_map([], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
      })
      .await?;

    let missing: Vec<&str> = schema::TABLES
      .into_iter()
      .filter(|t| !present.iter().any(|p| p == t))
      .collect();
    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::Connectivity(format!(
        "schema {} is missing tables: {}",
        self.schema,
        missing.join(", ")
      )))
    }
  }

  /// Substitute the schema name into a statement template.
  fn sql(&self, template: &str) -> String {
    template.replace("{schema}", &self.schema)
  }
}

#[cfg(test)]
impl SqliteStore {
  pub(crate) async fn count_rows(&self, table: &str) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}.{table}", self.schema);
    Ok(
      self
        .conn
        .call(move |conn| Ok(conn.query_row(&sql, [], |r| r.get(0))?))
        .await?,
    )
  }

  pub(crate) async fn execute_batch(&self, sql: &str) -> Result<()> {
    let sql = self.sql(sql);
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Synchronous helpers (run on the connection thread) ─────────────────────

fn read_assessment(
  conn: &Connection,
  schema: &str,
  id: i64,
) -> rusqlite::Result<Option<RawStoredAssessment>> {
  let Some(assessment) = conn
    .query_row(
      &format!(
        "SELECT {ASSESSMENT_COLUMNS} FROM {schema}.assessments WHERE id = ?1"
      ),
      [id],
      RawAssessment::from_row,
    )
    .optional()?
  else {
    return Ok(None);
  };

  let creators = conn
    .prepare(&format!(
      "SELECT {CREATOR_COLUMNS} FROM {schema}.assessment_creators
       WHERE assessment_id = ?1 ORDER BY id"
    ))?
    .query_map([id], creator_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let software = conn
    .query_row(
      &format!(
        "SELECT {ASSESSED_SOFTWARE_COLUMNS} FROM {schema}.assessment_software
         WHERE assessment_id = ?1"
      ),
      [id],
      assessed_software_from_row,
    )
    .optional()?;

  let checks = conn
    .prepare(&format!(
      "SELECT {CHECK_COLUMNS} FROM {schema}.assessment_checks
       WHERE assessment_id = ?1 ORDER BY id"
    ))?
    .query_map([id], check_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(Some(RawStoredAssessment { assessment, creators, software, checks }))
}

fn insert_indicator(
  conn: &Connection,
  schema: &str,
  row: &IndicatorRow,
) -> rusqlite::Result<i64> {
  let d = &row.data;
  conn.execute(
    &format!(
      "INSERT INTO {schema}.indicators (
         identifier, name, description, keywords, status,
         quality_dimensions, release_date, version, doi
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
    ),
    rusqlite::params![
      d.identifier,
      d.name,
      d.description,
      row.keywords,
      d.status.literal(),
      row.quality_dimensions,
      row.release_date,
      d.version,
      d.doi,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn insert_dimension(
  conn: &Connection,
  schema: &str,
  row: &DimensionRow,
) -> rusqlite::Result<i64> {
  let d = &row.data;
  conn.execute(
    &format!(
      "INSERT INTO {schema}.dimensions (identifier, name, description, source)
       VALUES (?1, ?2, ?3, ?4)"
    ),
    rusqlite::params![d.identifier, d.name, d.description, row.source],
  )?;
  Ok(conn.last_insert_rowid())
}

fn insert_software(
  conn: &Connection,
  schema: &str,
  row: &SoftwareRow,
) -> rusqlite::Result<i64> {
  let d = &row.data;
  conn.execute(
    &format!(
      "INSERT INTO {schema}.software (
         identifier, name, description, url, is_accessible_for_free,
         quality_dimensions, how_to_use, license
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
    ),
    rusqlite::params![
      d.identifier,
      d.name,
      d.description,
      d.url,
      d.is_accessible_for_free,
      row.quality_dimensions,
      row.how_to_use,
      d.license,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn insert_relation(
  conn: &Connection,
  schema: &str,
  row: &NewContentRelation,
) -> rusqlite::Result<i64> {
  conn.execute(
    &format!(
      "INSERT INTO {schema}.content_relation
         (indicator_id, dimension_id, software_id)
       VALUES (?1, ?2, ?3)"
    ),
    rusqlite::params![row.indicator_id, row.dimension_id, row.software_id],
  )?;
  Ok(conn.last_insert_rowid())
}

fn delete_by_id(
  conn: &Connection,
  schema: &str,
  table: &str,
  id: i64,
) -> rusqlite::Result<bool> {
  let n = conn.execute(&format!("DELETE FROM {schema}.{table} WHERE id = ?1"), [
    id,
  ])?;
  Ok(n > 0)
}

// ─── EverseStore impl ────────────────────────────────────────────────────────

impl EverseStore for SqliteStore {
  type Error = Error;

  // ── Schema ────────────────────────────────────────────────────────────────

  async fn ensure_schema(&self) -> Result<()> {
    let ddl = schema::ddl(&self.schema);
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&ddl)?;
        Ok(())
      })
      .await?;
    info!(schema = %self.schema, "schema ready");
    Ok(())
  }

  async fn describe_tables(&self) -> Result<Vec<TableInfo>> {
    let schema = self.schema.clone();
    let tables = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT name FROM {schema}.sqlite_master
           WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
           ORDER BY name"
        ))?;
        let names = stmt
          .query_map([], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
          let columns = conn
            .prepare(&format!("PRAGMA {schema}.table_info({name})"))?
            .query_map([], |r| {
              Ok(ColumnInfo {
                name:     r.get(1)?,
                sql_type: r.get(2)?,
                nullable: r.get::<_, i64>(3)? == 0,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          tables.push(TableInfo { name, columns });
        }
        Ok(tables)
      })
      .await?;
    Ok(tables)
  }

  async fn clear(&self) -> Result<()> {
    let sql = schema::clear(&self.schema);
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(&sql)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    info!(schema = %self.schema, "all rows removed");
    Ok(())
  }

  // ── Indicators ────────────────────────────────────────────────────────────

  async fn add_indicator(&self, input: NewIndicator) -> Result<Indicator> {
    let row = IndicatorRow::encode(input)?;
    let schema = self.schema.clone();
    let (id, row) = self
      .conn
      .call(move |conn| {
        let id = insert_indicator(conn, &schema, &row)?;
        Ok((id, row))
      })
      .await?;
    Ok(Indicator { id, data: row.data })
  }

  async fn insert_indicators(
    &self,
    inputs: Vec<NewIndicator>,
  ) -> Result<Vec<Indicator>> {
    let rows = inputs
      .into_iter()
      .map(IndicatorRow::encode)
      .collect::<Result<Vec<_>>>()?;
    let schema = self.schema.clone();
    let (ids, rows) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let ids = rows
          .iter()
          .map(|row| insert_indicator(&tx, &schema, row))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        Ok((ids, rows))
      })
      .await?;
    debug!(count = ids.len(), "indicators inserted");
    Ok(
      ids
        .into_iter()
        .zip(rows)
        .map(|(id, row)| Indicator { id, data: row.data })
        .collect(),
    )
  }

  async fn get_indicator(&self, id: i64) -> Result<Option<Indicator>> {
    let sql = self.sql(&format!(
      "SELECT {INDICATOR_COLUMNS} FROM {{schema}}.indicators WHERE id = ?1"
    ));
    let raw = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, [id], RawIndicator::from_row).optional()?)
      })
      .await?;
    raw.map(RawIndicator::into_indicator).transpose()
  }

  async fn list_indicators(&self) -> Result<Vec<Indicator>> {
    let sql = self.sql(&format!(
      "SELECT {INDICATOR_COLUMNS} FROM {{schema}}.indicators ORDER BY id"
    ));
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawIndicator::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawIndicator::into_indicator).collect()
  }

  async fn update_indicator(
    &self,
    id: i64,
    input: NewIndicator,
  ) -> Result<Indicator> {
    let row = IndicatorRow::encode(input)?;
    let sql = self.sql(
      "UPDATE {schema}.indicators SET
         identifier = ?2, name = ?3, description = ?4, keywords = ?5,
         status = ?6, quality_dimensions = ?7, release_date = ?8,
         version = ?9, doi = ?10
       WHERE id = ?1",
    );

    let (updated, row) = self
      .conn
      .call(move |conn| {
        let d = &row.data;
        let n = conn.execute(&sql, rusqlite::params![
          id,
          d.identifier,
          d.name,
          d.description,
          row.keywords,
          d.status.literal(),
          row.quality_dimensions,
          row.release_date,
          d.version,
          d.doi,
        ])?;
        Ok((n, row))
      })
      .await?;

    if updated == 0 {
      return Err(Error::NotFound { entity: "indicator", id });
    }
    Ok(Indicator { id, data: row.data })
  }

  async fn set_indicator_status(
    &self,
    id: i64,
    status: Status,
  ) -> Result<Indicator> {
    let update =
      self.sql("UPDATE {schema}.indicators SET status = ?2 WHERE id = ?1");
    let select = self.sql(&format!(
      "SELECT {INDICATOR_COLUMNS} FROM {{schema}}.indicators WHERE id = ?1"
    ));

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(&update, rusqlite::params![id, status.literal()])?;
        let raw =
          tx.query_row(&select, [id], RawIndicator::from_row).optional()?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw
      .ok_or(Error::NotFound { entity: "indicator", id })?
      .into_indicator()
  }

  async fn delete_indicator(&self, id: i64) -> Result<bool> {
    let schema = self.schema.clone();
    Ok(
      self
        .conn
        .call(move |conn| Ok(delete_by_id(conn, &schema, "indicators", id)?))
        .await?,
    )
  }

  // ── Dimensions ────────────────────────────────────────────────────────────

  async fn add_dimension(&self, input: NewDimension) -> Result<Dimension> {
    let row = DimensionRow::encode(input)?;
    let schema = self.schema.clone();
    let (id, row) = self
      .conn
      .call(move |conn| {
        let id = insert_dimension(conn, &schema, &row)?;
        Ok((id, row))
      })
      .await?;
    Ok(Dimension { id, data: row.data })
  }

  async fn insert_dimensions(
    &self,
    inputs: Vec<NewDimension>,
  ) -> Result<Vec<Dimension>> {
    let rows = inputs
      .into_iter()
      .map(DimensionRow::encode)
      .collect::<Result<Vec<_>>>()?;
    let schema = self.schema.clone();
    let (ids, rows) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let ids = rows
          .iter()
          .map(|row| insert_dimension(&tx, &schema, row))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        Ok((ids, rows))
      })
      .await?;
    debug!(count = ids.len(), "dimensions inserted");
    Ok(
      ids
        .into_iter()
        .zip(rows)
        .map(|(id, row)| Dimension { id, data: row.data })
        .collect(),
    )
  }

  async fn get_dimension(&self, id: i64) -> Result<Option<Dimension>> {
    let sql = self.sql(&format!(
      "SELECT {DIMENSION_COLUMNS} FROM {{schema}}.dimensions WHERE id = ?1"
    ));
    let raw = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, [id], RawDimension::from_row).optional()?)
      })
      .await?;
    raw.map(RawDimension::into_dimension).transpose()
  }

  async fn list_dimensions(&self) -> Result<Vec<Dimension>> {
    let sql = self.sql(&format!(
      "SELECT {DIMENSION_COLUMNS} FROM {{schema}}.dimensions ORDER BY id"
    ));
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawDimension::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawDimension::into_dimension).collect()
  }

  async fn delete_dimension(&self, id: i64) -> Result<bool> {
    let schema = self.schema.clone();
    Ok(
      self
        .conn
        .call(move |conn| Ok(delete_by_id(conn, &schema, "dimensions", id)?))
        .await?,
    )
  }

  // ── Software ──────────────────────────────────────────────────────────────

  async fn add_software(&self, input: NewSoftware) -> Result<Software> {
    let row = SoftwareRow::encode(input)?;
    let schema = self.schema.clone();
    let (id, row) = self
      .conn
      .call(move |conn| {
        let id = insert_software(conn, &schema, &row)?;
        Ok((id, row))
      })
      .await?;
    Ok(Software { id, data: row.data })
  }

  async fn insert_software(
    &self,
    inputs: Vec<NewSoftware>,
  ) -> Result<Vec<Software>> {
    let rows = inputs
      .into_iter()
      .map(SoftwareRow::encode)
      .collect::<Result<Vec<_>>>()?;
    let schema = self.schema.clone();
    let (ids, rows) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let ids = rows
          .iter()
          .map(|row| insert_software(&tx, &schema, row))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        Ok((ids, rows))
      })
      .await?;
    debug!(count = ids.len(), "software inserted");
    Ok(
      ids
        .into_iter()
        .zip(rows)
        .map(|(id, row)| Software { id, data: row.data })
        .collect(),
    )
  }

  async fn get_software(&self, id: i64) -> Result<Option<Software>> {
    let sql = self.sql(&format!(
      "SELECT {SOFTWARE_COLUMNS} FROM {{schema}}.software WHERE id = ?1"
    ));
    let raw = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, [id], RawSoftware::from_row).optional()?)
      })
      .await?;
    raw.map(RawSoftware::into_software).transpose()
  }

  async fn list_software(&self) -> Result<Vec<Software>> {
    let sql = self.sql(&format!(
      "SELECT {SOFTWARE_COLUMNS} FROM {{schema}}.software ORDER BY id"
    ));
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawSoftware::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawSoftware::into_software).collect()
  }

  async fn delete_software(&self, id: i64) -> Result<bool> {
    let schema = self.schema.clone();
    Ok(
      self
        .conn
        .call(move |conn| Ok(delete_by_id(conn, &schema, "software", id)?))
        .await?,
    )
  }

  // ── Content relations ─────────────────────────────────────────────────────

  async fn add_content_relation(
    &self,
    input: NewContentRelation,
  ) -> Result<ContentRelation> {
    let schema = self.schema.clone();
    let id = self
      .conn
      .call(move |conn| Ok(insert_relation(conn, &schema, &input)?))
      .await?;
    Ok(ContentRelation { id, data: input })
  }

  async fn insert_content_relations(
    &self,
    inputs: Vec<NewContentRelation>,
  ) -> Result<Vec<ContentRelation>> {
    let schema = self.schema.clone();
    let rows = inputs.clone();
    let ids = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let ids = rows
          .iter()
          .map(|row| insert_relation(&tx, &schema, row))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(ids)
      })
      .await?;
    debug!(count = ids.len(), "content relations inserted");
    Ok(
      ids
        .into_iter()
        .zip(inputs)
        .map(|(id, data)| ContentRelation { id, data })
        .collect(),
    )
  }

  async fn list_content_relations(&self) -> Result<Vec<ContentRelation>> {
    let sql = self.sql(&format!(
      "SELECT {RELATION_COLUMNS} FROM {{schema}}.content_relation ORDER BY id"
    ));
    Ok(
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map([], relation_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn delete_content_relation(&self, id: i64) -> Result<bool> {
    let schema = self.schema.clone();
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(delete_by_id(conn, &schema, "content_relation", id)?)
        })
        .await?,
    )
  }

  // ── Assessments ───────────────────────────────────────────────────────────

  async fn insert_assessment(
    &self,
    input: NewAssessment,
  ) -> Result<StoredAssessment> {
    let schema = self.schema.clone();
    let date_created = encode_dt(input.record.date_created);
    let now = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let r = &input.record;
        tx.execute(
          &format!(
            "INSERT INTO {schema}.assessments
               (context, type, name, description, date_created, license_uri,
                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)"
          ),
          rusqlite::params![
            r.context,
            r.r#type,
            r.name,
            r.description,
            date_created,
            r.license_uri,
            now,
          ],
        )?;
        let id = tx.last_insert_rowid();

        for c in &input.creators {
          tx.execute(
            &format!(
              "INSERT INTO {schema}.assessment_creators
                 (assessment_id, type, name, email)
               VALUES (?1, ?2, ?3, ?4)"
            ),
            rusqlite::params![id, c.r#type, c.name, c.email],
          )?;
        }

        if let Some(s) = &input.software {
          tx.execute(
            &format!(
              "INSERT INTO {schema}.assessment_software
                 (assessment_id, type, name, version, url, identifier_uri)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            ),
            rusqlite::params![
              id,
              s.r#type,
              s.name,
              s.version,
              s.url,
              s.identifier_uri,
            ],
          )?;
        }

        for c in &input.checks {
          tx.execute(
            &format!(
              "INSERT INTO {schema}.assessment_checks (
                 assessment_id, type, indicator_uri,
                 checking_software_type, checking_software_name,
                 checking_software_uri, checking_software_version,
                 process, status_uri, output, evidence
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ),
            rusqlite::params![
              id,
              c.r#type,
              c.indicator_uri,
              c.checking_software_type,
              c.checking_software_name,
              c.checking_software_uri,
              c.checking_software_version,
              c.process,
              c.status_uri,
              c.output,
              c.evidence,
            ],
          )?;
        }

        let stored = read_assessment(&tx, &schema, id)?;
        tx.commit()?;
        Ok((id, stored))
      })
      .await?;

    let (id, stored) = raw;
    debug!(id, "assessment inserted");
    stored
      .ok_or(Error::NotFound { entity: "assessment", id })?
      .into_stored()
  }

  async fn get_assessment(&self, id: i64) -> Result<Option<StoredAssessment>> {
    let schema = self.schema.clone();
    let raw = self
      .conn
      .call(move |conn| Ok(read_assessment(conn, &schema, id)?))
      .await?;
    raw.map(RawStoredAssessment::into_stored).transpose()
  }

  async fn list_assessments(&self) -> Result<Vec<StoredAssessment>> {
    let schema = self.schema.clone();
    let raws = self
      .conn
      .call(move |conn| {
        let ids = conn
          .prepare(&format!("SELECT id FROM {schema}.assessments ORDER BY id"))?
          .query_map([], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<i64>>>()?;
        let mut rows = Vec::with_capacity(ids.len());
        for id in ids {
          if let Some(raw) = read_assessment(conn, &schema, id)? {
            rows.push(raw);
          }
        }
        Ok(rows)
      })
      .await?;
    raws
      .into_iter()
      .map(RawStoredAssessment::into_stored)
      .collect()
  }

  async fn delete_assessment(&self, id: i64) -> Result<bool> {
    let schema = self.schema.clone();
    let deleted = self
      .conn
      .call(move |conn| Ok(delete_by_id(conn, &schema, "assessments", id)?))
      .await?;
    if deleted {
      info!(id, "assessment deleted with its owned rows");
    }
    Ok(deleted)
  }
}
