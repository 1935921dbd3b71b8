//! Variable analysis for JavaScript and TypeScript modules.
//!
//! [`VariableAnalyzer`] consumes the event stream produced by
//! [`parse_events_js::parse_module`] and reports redeclarations, uses before
//! declaration, assignments to constants and imports, and names that resolve
//! neither to a declaration nor to a [`GlobalDeclaredVariableSet`] entry.
//!
//! ```
//! use diagnostics_js::{DiagKind, Diagnostic};
//! use parse_events_js::options::{LanguageMode, ParserOptions};
//! use parse_events_js::parse_module;
//! use scope_js::{GlobalDeclaredVariableSet, VariableAnalyzer};
//!
//! let globals = GlobalDeclaredVariableSet::default_globals();
//! let mut syntax: Vec<Diagnostic> = Vec::new();
//! let mut semantic: Vec<Diagnostic> = Vec::new();
//! let mut analyzer = VariableAnalyzer::new(&globals, LanguageMode::JavaScript, &mut semantic);
//! parse_module("const x = 1; x = 2;", ParserOptions::new(LanguageMode::JavaScript), &mut analyzer, &mut syntax);
//! assert!(syntax.is_empty());
//! assert_eq!(semantic[0].kind, DiagKind::AssignmentToConstVariable);
//! ```

mod analyzer;
mod globals;

pub use analyzer::analyze;
pub use analyzer::is_compatible_redeclaration;
pub use analyzer::ScopeId;
pub use analyzer::VariableAnalyzer;
pub use globals::GlobalDeclaredVariableSet;
pub use globals::GlobalSetting;
pub use globals::GlobalVariable;
pub use globals::GlobalsConfig;
pub use globals::InvalidGlobalError;
