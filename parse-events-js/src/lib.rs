use diagnostics_js::DiagnosticSink;
use options::ParserOptions;
use parse::Parser;
use visit::Visitor;

pub mod char;
pub mod lex;
pub mod loc;
pub mod operator;
pub mod options;
pub mod parse;
pub mod token;
pub mod visit;

/// Parses a module, reporting scopes, declarations and uses to `visitor` and syntax errors to `sink`.
///
/// Never fails: malformed input is reported and skipped, and the visitor always receives
/// `end_of_module` last.
pub fn parse_module(
  source: &str,
  options: ParserOptions,
  visitor: &mut dyn Visitor,
  sink: &mut dyn DiagnosticSink,
) {
  let mut parser = Parser::new(source, options, visitor, sink);
  parser.parse_module();
}
