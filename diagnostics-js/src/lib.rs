//! Diagnostic model for the linter pipeline.
//!
//! Diagnostics are pure data: a [`DiagKind`] from a closed set, its severity,
//! and an ordered list of role-tagged byte ranges. Nothing here renders or
//! translates messages; hosts look up presentation by [`DiagKind::code`].
//!
//! ```
//! use diagnostics_js::{DiagKind, Diagnostic, DiagnosticCollector, DiagnosticSink, LabelRole, TextRange};
//!
//! let mut collector = DiagnosticCollector::new();
//! collector.report(Diagnostic::new(
//!   DiagKind::RedeclarationOfVariable,
//!   &[TextRange::new(15, 16), TextRange::new(4, 5)],
//! ));
//! let diags = collector.into_sorted();
//! assert_eq!(diags[0].label(LabelRole::FirstDeclaredHere), Some(TextRange::new(4, 5)));
//! ```

mod kind;
mod line_index;

pub use kind::DiagKind;
pub use line_index::LineCol;
pub use line_index::LineIndex;

use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

/// A half-open byte range in the analysed source.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize)]
pub struct TextRange {
  pub start: u32,
  pub end: u32,
}

impl TextRange {
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  /// An empty range at `offset`, used for "something is missing here" labels.
  pub const fn point(offset: u32) -> Self {
    Self {
      start: offset,
      end: offset,
    }
  }

  pub fn len(&self) -> u32 {
    self.end.saturating_sub(self.start)
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.end
  }

  pub fn contains(&self, offset: u32) -> bool {
    offset >= self.start && offset < self.end
  }

  /// Saturating conversion from `usize` offsets.
  pub fn from_usize(start: usize, end: usize) -> Self {
    Self {
      start: saturating_to_u32(start),
      end: saturating_to_u32(end),
    }
  }
}

/// Diagnostic severity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Error,
  Warning,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// What a label's span means for its diagnostic.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelRole {
  Here,
  OpenedHere,
  DeclaredHere,
  FirstDeclaredHere,
  RedeclaredHere,
  UsedHere,
  AssignedHere,
  Modifier,
  /// A keyword the primary label conflicts with.
  Keyword,
}

impl LabelRole {
  pub const fn as_str(&self) -> &'static str {
    match self {
      LabelRole::Here => "here",
      LabelRole::OpenedHere => "opened here",
      LabelRole::DeclaredHere => "declared here",
      LabelRole::FirstDeclaredHere => "first declared here",
      LabelRole::RedeclaredHere => "redeclared here",
      LabelRole::UsedHere => "used here",
      LabelRole::AssignedHere => "assigned here",
      LabelRole::Modifier => "modifier",
      LabelRole::Keyword => "keyword",
    }
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Label {
  pub role: LabelRole,
  pub range: TextRange,
}

/// A reported rule violation. Immutable once constructed.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Diagnostic {
  pub kind: DiagKind,
  pub severity: Severity,
  pub labels: Vec<Label>,
}

impl Diagnostic {
  /// Builds a diagnostic from one range per role of `kind`, in [`DiagKind::label_roles`] order.
  pub fn new(kind: DiagKind, ranges: &[TextRange]) -> Self {
    let roles = kind.label_roles();
    debug_assert_eq!(
      roles.len(),
      ranges.len(),
      "{:?} takes {} labels",
      kind,
      roles.len()
    );
    Self {
      kind,
      severity: kind.severity(),
      labels: roles
        .iter()
        .zip(ranges)
        .map(|(&role, &range)| Label { role, range })
        .collect(),
    }
  }

  /// Shorthand for kinds with a single label.
  pub fn at(kind: DiagKind, range: TextRange) -> Self {
    Self::new(kind, &[range])
  }

  pub fn code(&self) -> &'static str {
    self.kind.code()
  }

  /// The range of the first label; every kind has at least one.
  pub fn primary_range(&self) -> TextRange {
    self.labels.first().map(|l| l.range).unwrap_or_default()
  }

  pub fn label(&self, role: LabelRole) -> Option<TextRange> {
    self.labels.iter().find(|l| l.role == role).map(|l| l.range)
  }
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let range = self.primary_range();
    write!(
      f,
      "{}[{}]: {} ({}..{})",
      self.severity,
      self.code(),
      self.kind.summary(),
      range.start,
      range.end
    )
  }
}

/// Receives diagnostics in detection order.
pub trait DiagnosticSink {
  fn report(&mut self, diag: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
  fn report(&mut self, diag: Diagnostic) {
    self.push(diag);
  }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
  fn report(&mut self, diag: Diagnostic) {
    (**self).report(diag);
  }
}

/// Accumulates diagnostics for a whole file.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
  diags: Vec<Diagnostic>,
}

impl DiagnosticCollector {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.diags.len()
  }

  pub fn is_empty(&self) -> bool {
    self.diags.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
    self.diags.iter()
  }

  /// Diagnostics in the order they were reported.
  pub fn into_vec(self) -> Vec<Diagnostic> {
    self.diags
  }

  /// Diagnostics stably sorted by primary span, so parser and analyzer output interleave in document order.
  pub fn into_sorted(mut self) -> Vec<Diagnostic> {
    self.diags.sort_by_key(|d| d.primary_range());
    self.diags
  }
}

impl DiagnosticSink for DiagnosticCollector {
  fn report(&mut self, diag: Diagnostic) {
    self.diags.push(diag);
  }
}

fn saturating_to_u32(value: usize) -> u32 {
  u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_kind_has_a_unique_code() {
    let mut codes: Vec<_> = DiagKind::ALL.iter().map(|k| k.code()).collect();
    codes.sort_unstable();
    let len = codes.len();
    codes.dedup();
    assert_eq!(codes.len(), len);
  }

  #[test]
  fn labels_follow_kind_roles() {
    let diag = Diagnostic::new(DiagKind::VariableUsedBeforeDeclaration, &[
      TextRange::new(0, 1),
      TextRange::new(8, 9),
    ]);
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.labels[0].role, LabelRole::UsedHere);
    assert_eq!(diag.label(LabelRole::DeclaredHere), Some(TextRange::new(8, 9)));
    assert_eq!(diag.primary_range(), TextRange::new(0, 1));
  }

  #[test]
  fn undeclared_uses_are_warnings() {
    assert_eq!(DiagKind::UseOfUndeclaredVariable.severity(), Severity::Warning);
    assert_eq!(DiagKind::AssignmentToConstVariable.severity(), Severity::Error);
  }

  #[test]
  fn collector_sort_is_stable() {
    let mut collector = DiagnosticCollector::new();
    collector.report(Diagnostic::at(DiagKind::UnexpectedToken, TextRange::new(5, 6)));
    collector.report(Diagnostic::at(DiagKind::MissingExpression, TextRange::new(0, 1)));
    collector.report(Diagnostic::at(DiagKind::ExpectedToken, TextRange::new(5, 6)));
    let kinds: Vec<_> = collector.into_sorted().into_iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![
      DiagKind::MissingExpression,
      DiagKind::UnexpectedToken,
      DiagKind::ExpectedToken,
    ]);
  }

  #[test]
  fn converts_usize_offsets_saturating() {
    let range = TextRange::from_usize(usize::MAX - 1, usize::MAX);
    assert_eq!(range, TextRange::new(u32::MAX, u32::MAX));
    assert!(range.is_empty());
  }

  #[test]
  fn displays_code_and_summary() {
    let diag = Diagnostic::at(DiagKind::UseOfUndeclaredVariable, TextRange::new(0, 1));
    assert_eq!(
      diag.to_string(),
      "warning[E0122]: use of undeclared variable (0..1)"
    );
  }

  #[test]
  fn serializes_labels_with_roles() {
    let diag = Diagnostic::new(DiagKind::AssignmentToConstVariable, &[
      TextRange::new(13, 14),
      TextRange::new(6, 7),
    ]);
    let json = serde_json::to_value(&diag).unwrap();
    assert_eq!(json["severity"], "error");
    assert_eq!(json["labels"][0]["role"], "assigned-here");
    assert_eq!(json["labels"][1]["range"]["start"], 6);
  }
}
