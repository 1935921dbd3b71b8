//! Lints one JavaScript or TypeScript document: parse, analyse variables, collect.
//!
//! The analyzer consumes scope events as the parser produces them; nothing is buffered unless
//! [`lint_with_events`] is asked for the stream.
//!
//! Syntax and scope diagnostics are returned together, ordered by where they
//! start in the source. Nothing here fails on malformed input; only
//! configuration can be rejected, see [`ConfigError`].
//!
//! ```
//! use diagnostics_js::DiagKind;
//! use lint_js::{lint, LintOptions};
//! use parse_events_js::options::LanguageMode;
//!
//! let options = LintOptions::new(LanguageMode::JavaScript);
//! let globals = options.build_globals().unwrap();
//! let diags = lint("let a = b;", &options, &globals);
//! assert_eq!(diags.len(), 1);
//! assert_eq!(diags[0].kind, DiagKind::UseOfUndeclaredVariable);
//! ```

mod config;

pub use config::ConfigError;
pub use config::LintOptions;

use diagnostics_js::Diagnostic;
use diagnostics_js::DiagnosticCollector;
use diagnostics_js::DiagnosticSink;
use parse_events_js::options::ParserOptions;
use parse_events_js::parse_module;
use parse_events_js::visit::Event;
use parse_events_js::visit::EventRecorder;
use parse_events_js::visit::Tee;
use parse_events_js::visit::Visitor;
use scope_js::GlobalDeclaredVariableSet;
use scope_js::VariableAnalyzer;
use tracing::debug;
use tracing::debug_span;

/// Lints `source`, analysing variables while the parser runs.
pub fn lint(
  source: &str,
  options: &LintOptions,
  globals: &GlobalDeclaredVariableSet,
) -> Vec<Diagnostic> {
  let _lint = debug_span!("lint_js.lint", mode = %options.language, len = source.len()).entered();
  let mut collector = DiagnosticCollector::new();
  let mut semantic: Vec<Diagnostic> = Vec::new();
  {
    let mut analyzer = VariableAnalyzer::new(globals, options.language, &mut semantic);
    run(source, options, &mut analyzer, &mut collector);
  }
  finish(collector, semantic)
}

/// Like [`lint`], also returning the parser's event stream.
pub fn lint_with_events(
  source: &str,
  options: &LintOptions,
  globals: &GlobalDeclaredVariableSet,
) -> (Vec<Diagnostic>, Vec<Event>) {
  let _lint = debug_span!("lint_js.lint", mode = %options.language, len = source.len()).entered();
  let mut collector = DiagnosticCollector::new();
  let mut semantic: Vec<Diagnostic> = Vec::new();
  let events = {
    let mut tee = Tee(
      EventRecorder::new(),
      VariableAnalyzer::new(globals, options.language, &mut semantic),
    );
    run(source, options, &mut tee, &mut collector);
    let Tee(recorder, _) = tee;
    recorder.into_events()
  };
  (finish(collector, semantic), events)
}

fn run(
  source: &str,
  options: &LintOptions,
  visitor: &mut dyn Visitor,
  collector: &mut DiagnosticCollector,
) {
  let _span = debug_span!("lint_js.analyze").entered();
  parse_module(source, ParserOptions::new(options.language), visitor, collector);
}

// Syntax errors were reported straight to the collector; semantic ones join them for sorting.
fn finish(mut collector: DiagnosticCollector, semantic: Vec<Diagnostic>) -> Vec<Diagnostic> {
  debug!(
    syntax = collector.len(),
    semantic = semantic.len(),
    "linted"
  );
  for diag in semantic {
    collector.report(diag);
  }
  collector.into_sorted()
}
