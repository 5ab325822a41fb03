//! SQL schema for the EVERSE SQLite store.
//!
//! Every object lives in an attached database named after the configured
//! schema identifier. `{schema}` in the templates below is replaced with that
//! identifier before execution; it is validated first, see
//! [`is_valid_schema_name`]. Foreign keys and trigger bodies use unqualified
//! names, which SQLite resolves inside the same attached database.

/// Tables in dependency order: every table only references tables before it.
pub const TABLES: [&str; 8] = [
  "indicators",
  "dimensions",
  "software",
  "assessments",
  "assessment_creators",
  "assessment_software",
  "assessment_checks",
  "content_relation",
];

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
const TEMPLATE: &str = "
CREATE TABLE IF NOT EXISTS {schema}.indicators (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    identifier         TEXT NOT NULL UNIQUE,
    name               TEXT NOT NULL,
    description        TEXT NOT NULL,
    keywords           TEXT NOT NULL DEFAULT '[]',   -- JSON array of literals
    status             TEXT NOT NULL DEFAULT 'active'
                       CHECK (status IN ('active', 'deprecated')),
    quality_dimensions TEXT NOT NULL DEFAULT '[]',
    release_date       TEXT,                         -- RFC 3339 UTC or NULL
    version            TEXT NOT NULL,
    doi                TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS {schema}.dimensions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    identifier  TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    source      TEXT NOT NULL DEFAULT '[]'           -- ordered JSON array
);

CREATE TABLE IF NOT EXISTS {schema}.software (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    identifier              TEXT NOT NULL UNIQUE,
    name                    TEXT NOT NULL,
    description             TEXT NOT NULL,
    url                     TEXT NOT NULL,
    is_accessible_for_free  INTEGER NOT NULL CHECK (is_accessible_for_free IN (0, 1)),
    quality_dimensions      TEXT NOT NULL DEFAULT '[]',
    how_to_use              TEXT NOT NULL DEFAULT '[]',
    license                 TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS {schema}.assessments (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    context      TEXT NOT NULL,
    type         TEXT NOT NULL,
    name         TEXT NOT NULL,
    description  TEXT NOT NULL,
    date_created TEXT NOT NULL,
    license_uri  TEXT NOT NULL,
    created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at   TEXT
);

CREATE TABLE IF NOT EXISTS {schema}.assessment_creators (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    assessment_id INTEGER NOT NULL REFERENCES assessments(id) ON DELETE CASCADE,
    type          TEXT,
    name          TEXT NOT NULL,
    email         TEXT
);

-- At most one assessed-software record per assessment.
CREATE TABLE IF NOT EXISTS {schema}.assessment_software (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    assessment_id  INTEGER NOT NULL UNIQUE
                   REFERENCES assessments(id) ON DELETE CASCADE,
    type           TEXT,
    name           TEXT NOT NULL,
    version        TEXT,
    url            TEXT,
    identifier_uri TEXT
);

-- indicator_uri is a soft reference by URI, not a foreign key.
CREATE TABLE IF NOT EXISTS {schema}.assessment_checks (
    id                        INTEGER PRIMARY KEY AUTOINCREMENT,
    assessment_id             INTEGER NOT NULL
                              REFERENCES assessments(id) ON DELETE CASCADE,
    type                      TEXT,
    indicator_uri             TEXT NOT NULL,
    checking_software_type    TEXT,
    checking_software_name    TEXT NOT NULL,
    checking_software_uri     TEXT,
    checking_software_version TEXT,
    process                   TEXT,
    status_uri                TEXT NOT NULL,
    output                    TEXT,
    evidence                  TEXT
);

CREATE TABLE IF NOT EXISTS {schema}.content_relation (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    indicator_id INTEGER NOT NULL REFERENCES indicators(id) ON DELETE RESTRICT,
    dimension_id INTEGER NOT NULL REFERENCES dimensions(id) ON DELETE RESTRICT,
    software_id  INTEGER NOT NULL REFERENCES software(id)   ON DELETE RESTRICT
);

CREATE INDEX IF NOT EXISTS {schema}.assessment_creators_owner_idx
    ON assessment_creators(assessment_id);
CREATE INDEX IF NOT EXISTS {schema}.assessment_checks_owner_idx
    ON assessment_checks(assessment_id);
CREATE INDEX IF NOT EXISTS {schema}.content_relation_indicator_idx
    ON content_relation(indicator_id);
CREATE INDEX IF NOT EXISTS {schema}.content_relation_dimension_idx
    ON content_relation(dimension_id);
CREATE INDEX IF NOT EXISTS {schema}.content_relation_software_idx
    ON content_relation(software_id);

-- Status only ever moves forward.
CREATE TRIGGER IF NOT EXISTS {schema}.indicators_status_one_way
BEFORE UPDATE OF status ON indicators
FOR EACH ROW WHEN OLD.status = 'deprecated' AND NEW.status = 'active'
BEGIN
    SELECT RAISE(ABORT, 'indicator status cannot move from deprecated to active');
END;

-- A referenced indicator is frozen apart from its status.
CREATE TRIGGER IF NOT EXISTS {schema}.indicators_frozen_while_referenced
BEFORE UPDATE ON indicators
FOR EACH ROW WHEN
    EXISTS (SELECT 1 FROM content_relation WHERE indicator_id = OLD.id)
    AND (   NEW.identifier         IS NOT OLD.identifier
         OR NEW.name               IS NOT OLD.name
         OR NEW.description        IS NOT OLD.description
         OR NEW.keywords           IS NOT OLD.keywords
         OR NEW.quality_dimensions IS NOT OLD.quality_dimensions
         OR NEW.release_date       IS NOT OLD.release_date
         OR NEW.version            IS NOT OLD.version
         OR NEW.doi                IS NOT OLD.doi)
BEGIN
    SELECT RAISE(ABORT, 'indicator is referenced by a content relation; only status may change');
END;

PRAGMA {schema}.user_version = 1;
";

/// Removes every row, children first, and restarts the id counters.
const CLEAR_TEMPLATE: &str = "
DELETE FROM {schema}.content_relation;
DELETE FROM {schema}.assessment_checks;
DELETE FROM {schema}.assessment_software;
DELETE FROM {schema}.assessment_creators;
DELETE FROM {schema}.assessments;
DELETE FROM {schema}.software;
DELETE FROM {schema}.dimensions;
DELETE FROM {schema}.indicators;
DELETE FROM {schema}.sqlite_sequence;
";

pub fn ddl(schema: &str) -> String { TEMPLATE.replace("{schema}", schema) }

pub fn clear(schema: &str) -> String { CLEAR_TEMPLATE.replace("{schema}", schema) }

/// `[A-Za-z_][A-Za-z0-9_]*`; anything else is refused before it reaches SQL.
pub fn is_valid_schema_name(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn schema_names() {
    assert!(is_valid_schema_name("everse"));
    assert!(is_valid_schema_name("_staging2"));
    assert!(!is_valid_schema_name(""));
    assert!(!is_valid_schema_name("2024"));
    assert!(!is_valid_schema_name("everse; DROP TABLE x"));
    assert!(!is_valid_schema_name("main.everse"));
  }

  #[test]
  fn every_table_is_created_qualified() {
    let sql = ddl("qa");
    for table in TABLES {
      assert!(sql.contains(&format!("CREATE TABLE IF NOT EXISTS qa.{table} (")));
    }
    assert!(!sql.contains("{schema}"));
  }
}
