use crate::globals::GlobalDeclaredVariableSet;
use diagnostics_js::DiagKind;
use diagnostics_js::Diagnostic;
use diagnostics_js::DiagnosticSink;
use diagnostics_js::TextRange;
use parse_events_js::loc::Loc;
use parse_events_js::options::LanguageMode;
use parse_events_js::visit::Access;
use parse_events_js::visit::DeclarationFlags;
use parse_events_js::visit::Event;
use parse_events_js::visit::Identifier;
use parse_events_js::visit::ScopeKind;
use parse_events_js::visit::VariableDeclaration;
use parse_events_js::visit::VariableKind;
use parse_events_js::visit::VariableUse;
use parse_events_js::visit::Visitor;
use std::collections::BTreeMap;
use std::mem::take;
use tracing::debug;
use tracing::trace;

/// Index of a scope record in the analyzer's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
  pub const MODULE: ScopeId = ScopeId(0);

  pub fn raw(self) -> u32 {
    self.0
  }

  fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Debug)]
struct Declared {
  loc: Loc,
  kind: VariableKind,
  flags: DeclarationFlags,
}

impl Declared {
  fn is_declare(&self) -> bool {
    self.flags.contains(DeclarationFlags::DECLARE_CONTEXT)
  }
}

// A use not yet matched with a declaration. It waits in the scope it has bubbled up to.
#[derive(Clone, Debug)]
struct PendingUse {
  name: String,
  loc: Loc,
  access: Access,
  is_type: bool,
  in_declare_context: bool,
  // Where the use occurred.
  origin: ScopeId,
  // Set once the use has left a function body or field initializer, whose code runs later.
  deferred: bool,
}

#[derive(Debug)]
struct ScopeRecord {
  kind: ScopeKind,
  // Declarations in order; a name maps to several only when they merge.
  declared: BTreeMap<String, Vec<Declared>>,
  pending: Vec<PendingUse>,
}

impl ScopeRecord {
  fn new(kind: ScopeKind) -> Self {
    ScopeRecord {
      kind,
      declared: BTreeMap::new(),
      pending: Vec::new(),
    }
  }
}

// Kinds that live only in the value namespace.
fn is_value_only(kind: VariableKind) -> bool {
  matches!(
    kind,
    VariableKind::Var
      | VariableKind::Let
      | VariableKind::Const
      | VariableKind::Function
      | VariableKind::Parameter
      | VariableKind::CatchVariable
  )
}

fn merges_in_typescript(existing: VariableKind, new: VariableKind) -> bool {
  use VariableKind::*;
  let merges = |a: VariableKind, b: VariableKind| match (a, b) {
    (a, b) if a.is_type_only() && is_value_only(b) => true,
    (Interface, Interface | Class) => true,
    (Namespace, Namespace | Function | Class | Enum) => true,
    (Enum, Enum) => true,
    (InferType, InferType) => true,
    _ => false,
  };
  merges(existing, new) || merges(new, existing)
}

/// Whether a second declaration of a name in one scope is allowed.
pub fn is_compatible_redeclaration(
  existing: VariableKind,
  new: VariableKind,
  language: LanguageMode,
) -> bool {
  use VariableKind::*;
  match (existing, new) {
    (Var | Function, Var | Function) => true,
    (Parameter, Var | Function) => true,
    // `catch (e) { var e; }`
    (CatchVariable, Var) => true,
    _ => language.is_typescript() && merges_in_typescript(existing, new),
  }
}

/// Resolves uses against declarations while consuming parser events.
///
/// Scopes are kept in an arena and addressed by [`ScopeId`]; the open ones form
/// a stack whose bottom is the module scope. A use that cannot be resolved in
/// its own scope waits there and moves to the parent when the scope closes, so
/// a later declaration in an enclosing scope still claims it. Whatever reaches
/// the end of the module is looked up in the [`GlobalDeclaredVariableSet`].
pub struct VariableAnalyzer<'a> {
  globals: &'a GlobalDeclaredVariableSet,
  language: LanguageMode,
  sink: &'a mut dyn DiagnosticSink,
  scopes: Vec<ScopeRecord>,
  stack: Vec<ScopeId>,
  finished: bool,
}

impl<'a> VariableAnalyzer<'a> {
  pub fn new(
    globals: &'a GlobalDeclaredVariableSet,
    language: LanguageMode,
    sink: &'a mut dyn DiagnosticSink,
  ) -> Self {
    VariableAnalyzer {
      globals,
      language,
      sink,
      scopes: vec![ScopeRecord::new(ScopeKind::Module)],
      stack: vec![ScopeId::MODULE],
      finished: false,
    }
  }

  fn current(&self) -> ScopeId {
    self.stack.last().copied().unwrap_or(ScopeId::MODULE)
  }

  fn report(&mut self, kind: DiagKind, locs: &[Loc]) {
    let ranges: Vec<TextRange> = locs.iter().map(Loc::as_range).collect();
    self.sink.report(Diagnostic::new(kind, &ranges));
  }

  fn lookup(&self, scope: ScopeId, name: &str, is_type: bool) -> Option<Declared> {
    let decls = self.scopes[scope.index()].declared.get(name)?;
    if is_type {
      return decls.first().cloned();
    }
    decls
      .iter()
      .find(|d| !d.kind.is_type_only())
      .or_else(|| decls.first())
      .cloned()
  }

  // Checks that apply however the use was matched to its declaration.
  fn check_resolved(&mut self, access: Access, is_type: bool, loc: Loc, declared: &Declared) {
    if is_type || access != Access::Write {
      return;
    }
    match declared.kind {
      VariableKind::Const => {
        self.report(DiagKind::AssignmentToConstVariable, &[loc, declared.loc]);
      }
      VariableKind::Import | VariableKind::ImportType => {
        self.report(DiagKind::AssignmentToImportedVariable, &[loc, declared.loc]);
      }
      _ => {}
    }
  }

  // A declaration claiming a use that came before it in the same scope.
  fn check_late_use(&mut self, usage: &PendingUse, declared: &Declared) {
    let too_early = !usage.is_type
      && declared.kind.is_lexical()
      && !usage.deferred
      && !usage.in_declare_context
      && !declared.is_declare();
    if too_early {
      self.report(DiagKind::VariableUsedBeforeDeclaration, &[usage.loc, declared.loc]);
      return;
    }
    self.check_resolved(usage.access, usage.is_type, usage.loc, declared);
  }

  // Adds a declaration to `scope`, or reports it if it clashes with an earlier one, which stays.
  fn add_declaration(&mut self, scope: ScopeId, name: &str, declared: &Declared) -> bool {
    let language = self.language;
    let conflict = self.scopes[scope.index()].declared.get(name).and_then(|existing| {
      existing
        .iter()
        .find(|e| !is_compatible_redeclaration(e.kind, declared.kind, language))
        .map(|e| e.loc)
    });
    if let Some(first) = conflict {
      trace!(name, ?first, redeclared = ?declared.loc, "redeclaration");
      self.report(DiagKind::RedeclarationOfVariable, &[declared.loc, first]);
      return false;
    }
    let record = &mut self.scopes[scope.index()];
    record
      .declared
      .entry(name.to_string())
      .or_default()
      .push(declared.clone());

    let (claimed, rest): (Vec<PendingUse>, Vec<PendingUse>) =
      take(&mut record.pending).into_iter().partition(|u| u.name == name);
    record.pending = rest;
    for usage in claimed.iter() {
      self.check_late_use(usage, declared);
    }
    true
  }

  // `var` belongs to the nearest function, namespace or module scope, but also clashes with
  // lexical declarations in the blocks it is hoisted out of.
  fn declare_var(&mut self, name: &str, declared: &Declared) {
    for i in (0..self.stack.len()).rev() {
      let scope = self.stack[i];
      if !self.add_declaration(scope, name, declared) {
        return;
      }
      if self.scopes[scope.index()].kind.is_var_target() {
        return;
      }
    }
  }

  fn use_name(&mut self, usage: &VariableUse, is_type: bool) {
    let scope = self.current();
    if let Some(declared) = self.lookup(scope, &usage.name, is_type) {
      self.check_resolved(usage.access, is_type, usage.loc, &declared);
      return;
    }
    self.scopes[scope.index()].pending.push(PendingUse {
      name: usage.name.clone(),
      loc: usage.loc,
      access: usage.access,
      is_type,
      in_declare_context: usage.in_declare_context || self.language.is_definition(),
      origin: scope,
      deferred: false,
    });
  }

  fn check_global(&mut self, usage: &PendingUse) {
    match self.globals.find(&usage.name) {
      Some(global) => {
        if !usage.is_type && usage.access == Access::Write && !global.writable {
          self.report(DiagKind::AssignmentToConstGlobalVariable, &[usage.loc]);
        }
      }
      None => {
        trace!(name = %usage.name, origin = usage.origin.raw(), "unresolved");
        let kind = if usage.is_type {
          DiagKind::UseOfUndeclaredType
        } else if usage.access == Access::Write {
          DiagKind::AssignmentToUndeclaredVariable
        } else {
          DiagKind::UseOfUndeclaredVariable
        };
        self.report(kind, &[usage.loc]);
      }
    }
  }
}

impl<'a> Visitor for VariableAnalyzer<'a> {
  fn enter_scope(&mut self, kind: ScopeKind) {
    let id = ScopeId(self.scopes.len() as u32);
    self.scopes.push(ScopeRecord::new(kind));
    self.stack.push(id);
  }

  fn exit_scope(&mut self, kind: ScopeKind) {
    if self.stack.len() <= 1 {
      trace!(?kind, "exit without a matching enter");
      return;
    }
    let Some(closing) = self.stack.pop() else {
      return;
    };
    let record = &mut self.scopes[closing.index()];
    debug_assert_eq!(record.kind, kind);
    let deferred = record.kind.is_deferred();
    let pending = take(&mut record.pending);
    // Only the record's kind outlives the scope.
    record.declared.clear();

    let parent = self.current();
    for mut usage in pending {
      usage.deferred |= deferred;
      match self.lookup(parent, &usage.name, usage.is_type) {
        Some(declared) => self.check_resolved(usage.access, usage.is_type, usage.loc, &declared),
        None => self.scopes[parent.index()].pending.push(usage),
      }
    }
  }

  fn declare_variable(&mut self, decl: &VariableDeclaration) {
    let mut flags = decl.flags;
    if self.language.is_definition() {
      flags |= DeclarationFlags::DECLARE_CONTEXT;
    }
    let declared = Declared {
      loc: decl.loc,
      kind: decl.kind,
      flags,
    };
    if decl.kind == VariableKind::Var {
      self.declare_var(&decl.name, &declared);
    } else {
      let scope = self.current();
      self.add_declaration(scope, &decl.name, &declared);
    }
  }

  fn use_variable(&mut self, usage: &VariableUse) {
    self.use_name(usage, false);
  }

  fn use_type(&mut self, usage: &VariableUse) {
    self.use_name(usage, true);
  }

  fn declare_property(&mut self, _name: Option<&Identifier>, _loc: Loc) {}

  fn end_of_module(&mut self) {
    if self.finished {
      return;
    }
    self.finished = true;
    // Close anything left open by a truncated stream.
    while self.stack.len() > 1 {
      let kind = self.scopes[self.current().index()].kind;
      self.exit_scope(kind);
    }
    let unresolved = take(&mut self.scopes[ScopeId::MODULE.index()].pending);
    debug!(
      scopes = self.scopes.len(),
      unresolved = unresolved.len(),
      "resolved module"
    );
    for usage in unresolved.iter() {
      self.check_global(usage);
    }
  }
}

/// Runs the analyzer over a recorded event stream. A missing final [`Event::EndOfModule`] is implied.
pub fn analyze(
  events: &[Event],
  globals: &GlobalDeclaredVariableSet,
  language: LanguageMode,
  sink: &mut dyn DiagnosticSink,
) {
  let mut analyzer = VariableAnalyzer::new(globals, language, sink);
  Event::replay(events, &mut analyzer);
  analyzer.end_of_module();
}

#[cfg(test)]
mod tests {
  use super::*;

  fn use_of(name: &str, start: usize, access: Access) -> Event {
    Event::UseVariable(VariableUse {
      name: name.to_string(),
      loc: Loc(start, start + name.len()),
      access,
      in_declare_context: false,
    })
  }

  #[test]
  fn truncated_streams_are_closed_at_the_end() {
    let events = vec![
      Event::EnterScope {
        kind: ScopeKind::Function,
      },
      Event::EnterScope {
        kind: ScopeKind::Block,
      },
      use_of("x", 3, Access::Write),
    ];
    let mut diags: Vec<Diagnostic> = Vec::new();
    analyze(&events, &GlobalDeclaredVariableSet::new(), LanguageMode::JavaScript, &mut diags);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagKind::AssignmentToUndeclaredVariable);
  }

  #[test]
  fn end_of_module_is_reported_once() {
    let globals = GlobalDeclaredVariableSet::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let mut analyzer = VariableAnalyzer::new(&globals, LanguageMode::JavaScript, &mut diags);
    use_of("y", 0, Access::Read).visit(&mut analyzer);
    analyzer.end_of_module();
    analyzer.end_of_module();
    assert_eq!(diags.len(), 1);
  }

  #[test]
  fn merging_depends_on_the_language() {
    use VariableKind::*;
    assert!(is_compatible_redeclaration(Var, Function, LanguageMode::JavaScript));
    assert!(!is_compatible_redeclaration(Let, Var, LanguageMode::TypeScript));
    assert!(is_compatible_redeclaration(Class, Interface, LanguageMode::TypeScript));
    assert!(!is_compatible_redeclaration(Class, Interface, LanguageMode::JavaScript));
    assert!(is_compatible_redeclaration(ImportType, Const, LanguageMode::TypeScriptJsx));
    assert!(!is_compatible_redeclaration(Import, Const, LanguageMode::TypeScript));
  }
}
