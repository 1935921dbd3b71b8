//! The event interface between the parser and its consumers.
//!
//! The parser never builds a syntax tree. It reports scopes, declarations and
//! uses to a [`Visitor`] in source order, and consumers (the variable analyzer,
//! recorders in tests, outline tools) interpret that stream.

use crate::loc::Loc;
use serde::Serialize;
use std::fmt::Debug;
use std::fmt::Formatter;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub enum ScopeKind {
  Module,
  Function,
  Block,
  Class,
  Interface,
  Namespace,
  IndexSignature,
  Catch,
  /// A class field's initializer; runs when the instance is constructed.
  FieldInitializer,
  TypeAlias,
  ConditionalType,
  MappedType,
  Enum,
  /// The head of a `for` statement, which owns `let`/`const` loop bindings.
  For,
}

impl ScopeKind {
  /// Whether code in this scope runs later than the code of its parent.
  pub fn is_deferred(self) -> bool {
    matches!(self, ScopeKind::Function | ScopeKind::FieldInitializer)
  }

  /// Whether `var` declarations stop bubbling up at this scope.
  pub fn is_var_target(self) -> bool {
    matches!(
      self,
      ScopeKind::Module | ScopeKind::Function | ScopeKind::Namespace | ScopeKind::FieldInitializer
    )
  }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub enum VariableKind {
  Var,
  Let,
  Const,
  Function,
  Class,
  Interface,
  TypeAlias,
  Enum,
  Parameter,
  CatchVariable,
  Import,
  GenericParameter,
  Namespace,
  EnumMember,
  /// `import type { T }` and `import { type T }`.
  ImportType,
  /// `infer T` inside a conditional type's `extends` clause.
  InferType,
}

impl VariableKind {
  /// Kinds whose uses before their declaration are errors in the declaring scope.
  pub fn is_lexical(self) -> bool {
    matches!(
      self,
      VariableKind::Let
        | VariableKind::Const
        | VariableKind::Class
        | VariableKind::Interface
        | VariableKind::TypeAlias
        | VariableKind::Enum
    )
  }

  /// Kinds that only exist in the type namespace.
  pub fn is_type_only(self) -> bool {
    matches!(
      self,
      VariableKind::Interface
        | VariableKind::TypeAlias
        | VariableKind::GenericParameter
        | VariableKind::ImportType
        | VariableKind::InferType
    )
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct DeclarationFlags(u8);

impl DeclarationFlags {
  pub const NONE: DeclarationFlags = DeclarationFlags(0);
  /// Declared with `declare`, or inside a `declare` block or definition file.
  pub const DECLARE_CONTEXT: DeclarationFlags = DeclarationFlags(1 << 0);
  pub const HAS_INITIALIZER: DeclarationFlags = DeclarationFlags(1 << 1);

  pub const fn contains(self, other: DeclarationFlags) -> bool {
    self.0 & other.0 == other.0
  }

  pub const fn union(self, other: DeclarationFlags) -> DeclarationFlags {
    DeclarationFlags(self.0 | other.0)
  }

  pub const fn bits(self) -> u8 {
    self.0
  }
}

impl std::ops::BitOr for DeclarationFlags {
  type Output = DeclarationFlags;

  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl std::ops::BitOrAssign for DeclarationFlags {
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl Debug for DeclarationFlags {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut names = Vec::new();
    if self.contains(DeclarationFlags::DECLARE_CONTEXT) {
      names.push("DECLARE_CONTEXT");
    }
    if self.contains(DeclarationFlags::HAS_INITIALIZER) {
      names.push("HAS_INITIALIZER");
    }
    if names.is_empty() {
      f.write_str("NONE")
    } else {
      f.write_str(&names.join(" | "))
    }
  }
}

/// A name as it appears in the source, with escapes decoded.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Identifier {
  pub name: String,
  pub loc: Loc,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum Access {
  Read,
  Write,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct VariableDeclaration {
  pub name: String,
  pub loc: Loc,
  pub kind: VariableKind,
  pub flags: DeclarationFlags,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct VariableUse {
  pub name: String,
  pub loc: Loc,
  pub access: Access,
  pub in_declare_context: bool,
}

/// Receives the parser's semantic events in source order.
///
/// Every `enter_scope` is matched by an `exit_scope` of the same kind, and `end_of_module` is the
/// last call, on every input.
pub trait Visitor {
  fn enter_scope(&mut self, kind: ScopeKind);
  fn exit_scope(&mut self, kind: ScopeKind);
  fn declare_variable(&mut self, decl: &VariableDeclaration);
  fn use_variable(&mut self, usage: &VariableUse);
  fn use_type(&mut self, usage: &VariableUse);
  /// `None` for members without a simple name, such as call signatures or computed keys.
  fn declare_property(&mut self, name: Option<&Identifier>, loc: Loc);
  fn end_of_module(&mut self);
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
  fn enter_scope(&mut self, kind: ScopeKind) {
    (**self).enter_scope(kind)
  }

  fn exit_scope(&mut self, kind: ScopeKind) {
    (**self).exit_scope(kind)
  }

  fn declare_variable(&mut self, decl: &VariableDeclaration) {
    (**self).declare_variable(decl)
  }

  fn use_variable(&mut self, usage: &VariableUse) {
    (**self).use_variable(usage)
  }

  fn use_type(&mut self, usage: &VariableUse) {
    (**self).use_type(usage)
  }

  fn declare_property(&mut self, name: Option<&Identifier>, loc: Loc) {
    (**self).declare_property(name, loc)
  }

  fn end_of_module(&mut self) {
    (**self).end_of_module()
  }
}

/// A recorded visitor callback.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
  EnterScope {
    kind: ScopeKind,
  },
  ExitScope {
    kind: ScopeKind,
  },
  DeclareVariable(VariableDeclaration),
  UseVariable(VariableUse),
  UseType(VariableUse),
  DeclareProperty {
    name: Option<String>,
    loc: Loc,
  },
  EndOfModule,
}

impl Event {
  /// Feeds recorded events to another visitor, in order.
  pub fn replay(events: &[Event], visitor: &mut dyn Visitor) {
    for event in events {
      event.visit(visitor);
    }
  }

  pub fn visit(&self, visitor: &mut dyn Visitor) {
    match self {
      Event::EnterScope { kind } => visitor.enter_scope(*kind),
      Event::ExitScope { kind } => visitor.exit_scope(*kind),
      Event::DeclareVariable(decl) => visitor.declare_variable(decl),
      Event::UseVariable(usage) => visitor.use_variable(usage),
      Event::UseType(usage) => visitor.use_type(usage),
      Event::DeclareProperty { name, loc } => {
        let ident = name.as_ref().map(|name| Identifier {
          name: name.clone(),
          loc: *loc,
        });
        visitor.declare_property(ident.as_ref(), *loc)
      }
      Event::EndOfModule => visitor.end_of_module(),
    }
  }
}

/// Records every callback as an [`Event`].
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
  pub events: Vec<Event>,
}

impl EventRecorder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn into_events(self) -> Vec<Event> {
    self.events
  }
}

impl Visitor for EventRecorder {
  fn enter_scope(&mut self, kind: ScopeKind) {
    self.events.push(Event::EnterScope { kind });
  }

  fn exit_scope(&mut self, kind: ScopeKind) {
    self.events.push(Event::ExitScope { kind });
  }

  fn declare_variable(&mut self, decl: &VariableDeclaration) {
    self.events.push(Event::DeclareVariable(decl.clone()));
  }

  fn use_variable(&mut self, usage: &VariableUse) {
    self.events.push(Event::UseVariable(usage.clone()));
  }

  fn use_type(&mut self, usage: &VariableUse) {
    self.events.push(Event::UseType(usage.clone()));
  }

  fn declare_property(&mut self, name: Option<&Identifier>, loc: Loc) {
    self.events.push(Event::DeclareProperty {
      name: name.map(|n| n.name.clone()),
      loc,
    });
  }

  fn end_of_module(&mut self) {
    self.events.push(Event::EndOfModule);
  }
}

/// Forwards every callback to two visitors, first `.0` then `.1`.
pub struct Tee<A, B>(pub A, pub B);

impl<A: Visitor, B: Visitor> Visitor for Tee<A, B> {
  fn enter_scope(&mut self, kind: ScopeKind) {
    self.0.enter_scope(kind);
    self.1.enter_scope(kind);
  }

  fn exit_scope(&mut self, kind: ScopeKind) {
    self.0.exit_scope(kind);
    self.1.exit_scope(kind);
  }

  fn declare_variable(&mut self, decl: &VariableDeclaration) {
    self.0.declare_variable(decl);
    self.1.declare_variable(decl);
  }

  fn use_variable(&mut self, usage: &VariableUse) {
    self.0.use_variable(usage);
    self.1.use_variable(usage);
  }

  fn use_type(&mut self, usage: &VariableUse) {
    self.0.use_type(usage);
    self.1.use_type(usage);
  }

  fn declare_property(&mut self, name: Option<&Identifier>, loc: Loc) {
    self.0.declare_property(name, loc);
    self.1.declare_property(name, loc);
  }

  fn end_of_module(&mut self) {
    self.0.end_of_module();
    self.1.end_of_module();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replay_reproduces_the_stream() {
    let mut recorder = EventRecorder::new();
    recorder.enter_scope(ScopeKind::Function);
    recorder.declare_variable(&VariableDeclaration {
      name: "a".into(),
      loc: Loc(0, 1),
      kind: VariableKind::Let,
      flags: DeclarationFlags::HAS_INITIALIZER,
    });
    recorder.declare_property(None, Loc(2, 3));
    recorder.exit_scope(ScopeKind::Function);
    recorder.end_of_module();
    let events = recorder.into_events();

    let mut copy = EventRecorder::new();
    Event::replay(&events, &mut copy);
    assert_eq!(copy.events, events);
  }

  #[test]
  fn tee_forwards_to_both() {
    let mut tee = Tee(EventRecorder::new(), EventRecorder::new());
    tee.use_variable(&VariableUse {
      name: "x".into(),
      loc: Loc(0, 1),
      access: Access::Write,
      in_declare_context: false,
    });
    assert_eq!(tee.0.events, tee.1.events);
    assert_eq!(tee.0.events.len(), 1);
  }

  #[test]
  fn flags_compose() {
    let flags = DeclarationFlags::DECLARE_CONTEXT | DeclarationFlags::HAS_INITIALIZER;
    assert!(flags.contains(DeclarationFlags::DECLARE_CONTEXT));
    assert!(!DeclarationFlags::NONE.contains(DeclarationFlags::HAS_INITIALIZER));
    assert_eq!(format!("{:?}", flags), "DECLARE_CONTEXT | HAS_INITIALIZER");
  }

  #[test]
  fn events_serialize_with_tags() {
    let json = serde_json::to_string(&Event::EnterScope {
      kind: ScopeKind::Block,
    })
    .unwrap();
    assert_eq!(json, r#"{"event":"enter-scope","kind":"Block"}"#);
  }
}
