//! Plain-text tables for terminal output.

use std::fmt;

use everse_core::{
  assessment::AssessmentSummary,
  dimension::Dimension,
  indicator::Indicator,
  relation::ContentRelation,
  software::Software,
  store::TableInfo,
  vocab::Literal,
};

/// Cells longer than this are cut and suffixed with `...`.
const MAX_CELL: usize = 40;

pub struct Table {
  title:   String,
  headers: Vec<String>,
  rows:    Vec<Vec<String>>,
}

impl Table {
  pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
    Self {
      title:   title.into(),
      headers: headers.iter().map(|h| (*h).to_owned()).collect(),
      rows:    Vec::new(),
    }
  }

  /// Append a row. Missing trailing cells render empty; extra cells are
  /// dropped.
  pub fn push(&mut self, cells: Vec<String>) {
    let mut cells: Vec<String> =
      cells.into_iter().take(self.headers.len()).map(truncate).collect();
    cells.resize(self.headers.len(), String::new());
    self.rows.push(cells);
  }

  fn widths(&self) -> Vec<usize> {
    self
      .headers
      .iter()
      .enumerate()
      .map(|(i, h)| {
        self
          .rows
          .iter()
          .map(|r| r[i].chars().count())
          .chain([h.chars().count()])
          .max()
          .unwrap_or_default()
      })
      .collect()
  }
}

fn truncate(cell: String) -> String {
  let cell = cell.replace('\n', " ");
  if cell.chars().count() <= MAX_CELL {
    return cell;
  }
  let mut cut: String = cell.chars().take(MAX_CELL - 3).collect();
  cut.push_str("...");
  cut
}

fn write_row(
  f: &mut fmt::Formatter<'_>,
  cells: &[String],
  widths: &[usize],
) -> fmt::Result {
  let line = cells
    .iter()
    .zip(widths)
    .map(|(c, w)| format!("{c:<w$}"))
    .collect::<Vec<_>>()
    .join(" | ");
  writeln!(f, "| {line} |")
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.rows.is_empty() {
      return writeln!(f, "=== {} (No entries found) ===", self.title);
    }
    writeln!(f, "=== {} ({} entries) ===", self.title, self.rows.len())?;

    let widths = self.widths();
    let rule = widths
      .iter()
      .map(|w| "-".repeat(w + 2))
      .collect::<Vec<_>>()
      .join("+");
    writeln!(f, "+{rule}+")?;
    write_row(f, &self.headers, &widths)?;
    writeln!(f, "+{rule}+")?;
    for row in &self.rows {
      write_row(f, row, &widths)?;
    }
    writeln!(f, "+{rule}+")
  }
}

// ─── Entity tables ───────────────────────────────────────────────────────────

fn join<T: Literal>(items: &[T]) -> String {
  items.iter().map(|i| i.literal()).collect::<Vec<_>>().join(", ")
}

pub fn indicators(rows: &[Indicator]) -> Table {
  let mut table = Table::new("Indicators", &[
    "id",
    "identifier",
    "name",
    "status",
    "keywords",
    "qualityDimensions",
    "releaseDate",
    "version",
    "doi",
  ]);
  for i in rows {
    let d = &i.data;
    table.push(vec![
      i.id.to_string(),
      d.identifier.clone(),
      d.name.clone(),
      d.status.literal().to_owned(),
      join(&d.keywords),
      join(&d.quality_dimensions),
      d.release_date.map(|t| t.to_rfc3339()).unwrap_or_default(),
      d.version.clone(),
      d.doi.clone(),
    ]);
  }
  table
}

pub fn dimensions(rows: &[Dimension]) -> Table {
  let mut table =
    Table::new("Dimensions", &["id", "identifier", "name", "description", "source"]);
  for d in rows {
    table.push(vec![
      d.id.to_string(),
      d.data.identifier.clone(),
      d.data.name.clone(),
      d.data.description.clone(),
      d.data.source.join(", "),
    ]);
  }
  table
}

pub fn software(rows: &[Software]) -> Table {
  let mut table = Table::new("Software", &[
    "id",
    "identifier",
    "name",
    "url",
    "free",
    "qualityDimensions",
    "howToUse",
    "license",
  ]);
  for s in rows {
    let d = &s.data;
    table.push(vec![
      s.id.to_string(),
      d.identifier.clone(),
      d.name.clone(),
      d.url.clone(),
      d.is_accessible_for_free.to_string(),
      join(&d.quality_dimensions),
      join(&d.how_to_use),
      d.license.clone(),
    ]);
  }
  table
}

pub fn assessments(rows: &[AssessmentSummary]) -> Table {
  let mut table = Table::new("Assessments", &[
    "id",
    "name",
    "creators",
    "software",
    "checks",
  ]);
  for a in rows {
    table.push(vec![
      a.id.to_string(),
      a.name.clone(),
      a.creator_names.clone(),
      a.software_name.clone().unwrap_or_default(),
      a.check_count.to_string(),
    ]);
  }
  table
}

pub fn relations(rows: &[ContentRelation]) -> Table {
  let mut table = Table::new("Content relations", &[
    "id",
    "indicator_id",
    "dimension_id",
    "software_id",
  ]);
  for r in rows {
    table.push(vec![
      r.id.to_string(),
      r.data.indicator_id.to_string(),
      r.data.dimension_id.to_string(),
      r.data.software_id.to_string(),
    ]);
  }
  table
}

/// One table per schema table, listing its columns.
pub fn columns(info: &TableInfo) -> Table {
  let mut table =
    Table::new(format!("{} columns", info.name), &["column", "type", "nullable"]);
  for c in &info.columns {
    table.push(vec![
      c.name.clone(),
      c.sql_type.clone(),
      if c.nullable { "yes" } else { "no" }.to_owned(),
    ]);
  }
  table
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn columns_are_aligned() {
    let mut t = Table::new("Things", &["id", "name"]);
    t.push(vec!["1".into(), "a".into()]);
    t.push(vec!["10".into(), "longer name".into()]);

    let out = t.to_string();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "=== Things (2 entries) ===");
    assert_eq!(lines[2], "| id | name        |");
    assert_eq!(lines[4], "| 1  | a           |");
    assert_eq!(lines[5], "| 10 | longer name |");
    assert!(lines.iter().skip(1).all(|l| l.len() == lines[1].len()));
  }

  #[test]
  fn long_cells_are_truncated() {
    let mut t = Table::new("T", &["text"]);
    t.push(vec!["x".repeat(100)]);
    let cell = &t.rows[0][0];
    assert_eq!(cell.chars().count(), MAX_CELL);
    assert!(cell.ends_with("..."));
  }

  #[test]
  fn short_rows_are_padded() {
    let mut t = Table::new("T", &["a", "b"]);
    t.push(vec!["1".into()]);
    t.push(vec!["1".into(), "2".into(), "3".into()]);
    assert_eq!(t.rows[0], ["1", ""]);
    assert_eq!(t.rows[1], ["1", "2"]);
  }

  #[test]
  fn empty_table_says_so() {
    let t = Table::new("Software", &["id"]);
    assert_eq!(t.to_string(), "=== Software (No entries found) ===\n");
    assert!(t.rows.is_empty());
  }
}
