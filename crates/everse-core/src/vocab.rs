//! Closed vocabularies for enum-typed fields.
//!
//! Every literal set is a Rust sum type. Parsing is a case-sensitive exact
//! match against the allowed literals; anything else is rejected with
//! [`Error::UnknownLiteral`] rather than coerced.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result};

// ─── Literal trait ───────────────────────────────────────────────────────────

/// A closed set of string literals with a validated identity per value.
pub trait Literal: Sized + Copy + FromStr + IntoEnumIterator {
  /// Human-readable name of the vocabulary, used in error messages.
  const VOCABULARY: &'static str;

  /// The canonical stored literal (the display label).
  fn literal(self) -> &'static str;

  fn parse_literal(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownLiteral {
      vocabulary: Self::VOCABULARY,
      value:      s.to_owned(),
    })
  }

  /// All canonical literals, in declaration order.
  fn allowed() -> Vec<&'static str> { Self::iter().map(Self::literal).collect() }
}

macro_rules! literal_vocabulary {
  ($ty:ty, $name:literal) => {
    impl Literal for $ty {
      const VOCABULARY: &'static str = $name;

      fn literal(self) -> &'static str { self.into() }
    }
  };
}

// ─── Indicator vocabularies ──────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
  Keyword1,
  Keyword2,
  Keyword3,
}

/// Lifecycle status of an indicator. Transitions are one-way.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
  #[default]
  Active,
  Deprecated,
}

impl Status {
  /// `active → deprecated` is allowed, the reverse never is. Re-applying the
  /// current status is a no-op and therefore allowed.
  pub fn can_transition_to(self, next: Status) -> bool {
    !matches!((self, next), (Status::Deprecated, Status::Active))
  }
}

/// Quality dimension shared by indicators and software.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
pub enum QualityDimension {
  #[serde(rename = "openness")]
  #[strum(serialize = "openness")]
  Openness,
  #[serde(rename = "FAIRness")]
  #[strum(serialize = "FAIRness")]
  Fairness,
  #[serde(rename = "sustainability")]
  #[strum(serialize = "sustainability")]
  Sustainability,
}

// ─── Software vocabularies ───────────────────────────────────────────────────

/// How a piece of software is meant to be used. Both the short identity
/// (`cicd`) and the display label (`CI/CD`) are accepted; the label is
/// canonical.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
pub enum HowToUse {
  #[serde(rename = "CI/CD", alias = "cicd")]
  #[strum(to_string = "CI/CD", serialize = "cicd")]
  Cicd,
  #[serde(rename = "command-line", alias = "cmdline")]
  #[strum(to_string = "command-line", serialize = "cmdline")]
  Cmdline,
}

literal_vocabulary!(Keyword, "keyword");
literal_vocabulary!(Status, "status");
literal_vocabulary!(QualityDimension, "quality dimension");
literal_vocabulary!(HowToUse, "how-to-use");

// ─── Sets ────────────────────────────────────────────────────────────────────

/// Collapse duplicates while keeping first-occurrence order. Set-valued
/// fields are stored as ordered lists.
pub fn dedup_preserving_order<T: PartialEq>(items: Vec<T>) -> Vec<T> {
  let mut out: Vec<T> = Vec::with_capacity(items.len());
  for item in items {
    if !out.contains(&item) {
      out.push(item);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_is_case_sensitive() {
    assert_eq!(Status::parse_literal("active").unwrap(), Status::Active);
    let err = Status::parse_literal("Active").unwrap_err();
    assert!(matches!(
      err,
      Error::UnknownLiteral { vocabulary: "status", ref value } if value == "Active"
    ));

    assert_eq!(
      QualityDimension::parse_literal("FAIRness").unwrap(),
      QualityDimension::Fairness
    );
    assert!(QualityDimension::parse_literal("fairness").is_err());
  }

  #[test]
  fn how_to_use_accepts_identity_and_label() {
    assert_eq!(HowToUse::parse_literal("cicd").unwrap(), HowToUse::Cicd);
    assert_eq!(HowToUse::parse_literal("CI/CD").unwrap(), HowToUse::Cicd);
    assert_eq!(
      HowToUse::parse_literal("command-line").unwrap(),
      HowToUse::Cmdline
    );
    assert_eq!(HowToUse::Cmdline.literal(), "command-line");
    assert!(HowToUse::parse_literal("ci/cd").is_err());
  }

  #[test]
  fn allowed_lists_canonical_literals() {
    assert_eq!(Keyword::allowed(), ["keyword1", "keyword2", "keyword3"]);
    assert_eq!(HowToUse::allowed(), ["CI/CD", "command-line"]);
  }

  #[test]
  fn serde_matches_literals() {
    let json = serde_json::to_string(&[
      QualityDimension::Fairness,
      QualityDimension::Openness,
    ])
    .unwrap();
    assert_eq!(json, r#"["FAIRness","openness"]"#);

    let parsed: HowToUse = serde_json::from_str(r#""cmdline""#).unwrap();
    assert_eq!(parsed, HowToUse::Cmdline);
    assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""command-line""#);
  }

  #[test]
  fn status_transitions_are_one_way() {
    assert!(Status::Active.can_transition_to(Status::Deprecated));
    assert!(Status::Deprecated.can_transition_to(Status::Deprecated));
    assert!(!Status::Deprecated.can_transition_to(Status::Active));
  }

  #[test]
  fn dedup_keeps_first_occurrence() {
    let v = dedup_preserving_order(vec![
      Keyword::Keyword2,
      Keyword::Keyword1,
      Keyword::Keyword2,
    ]);
    assert_eq!(v, [Keyword::Keyword2, Keyword::Keyword1]);
  }
}
