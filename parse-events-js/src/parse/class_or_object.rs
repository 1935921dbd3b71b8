//! Class bodies, and the members of interfaces and object types, which share their modifier syntax.

use super::expr::tree::Expr;
use super::func::FnBody;
use super::ParseCtx;
use super::Parser;
use crate::loc::Loc;
use crate::operator::PRECEDENCE_MEMBER;
use crate::token::TT;
use crate::visit::DeclarationFlags;
use crate::visit::Identifier;
use crate::visit::ScopeKind;
use crate::visit::VariableKind;
use diagnostics_js::DiagKind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClassKind {
  Statement,
  /// `export default class {}`; the name is optional.
  ExportDefault,
  Expression,
}

/// Modifier keywords before a member's name, each with where it appeared.
#[derive(Default, Debug)]
struct Modifiers {
  is_static: Option<Loc>,
  is_async: Option<Loc>,
  generator: Option<Loc>,
  get_or_set: Option<Loc>,
  access: Option<(TT, Loc)>,
  is_abstract: Option<Loc>,
  accessor: Option<Loc>,
  function_keyword: Option<Loc>,
  const_keyword: Option<Loc>,
  // `readonly`, `override` and `declare`.
  other_ts: Option<Loc>,
}

/// Whether a member can continue with this token after a modifier.
fn continues_member(typ: TT) -> bool {
  typ.is_identifier_name()
    || matches!(
      typ,
      TT::LiteralString
        | TT::LiteralNumber
        | TT::LiteralBigInt
        | TT::BracketOpen
        | TT::PrivateMember
        | TT::Asterisk
    )
}

impl<'a> Parser<'a> {
  /// `@expr` before a class, member or parameter.
  pub fn decorator(&mut self, ctx: ParseCtx) {
    self.consume();
    let e = self.expr_with_min_prec(ctx, PRECEDENCE_MEMBER);
    self.visit_expr(ctx, &e);
  }

  /// A class declaration or expression. The `class` keyword is next; `start` is where the whole
  /// construct began, before modifiers such as `abstract`.
  pub fn class(&mut self, ctx: ParseCtx, kind: ClassKind, start: usize) -> Expr {
    let keyword = self.consume().loc;
    let t = self.peek();
    let name = if t.typ.is_identifier_like() && t.typ != TT::KeywordImplements {
      self.consume();
      Some(self.ident(&t))
    } else {
      None
    };
    if name.is_none() && kind == ClassKind::Statement {
      self.diag(DiagKind::MissingNameInClassStatement, keyword);
    }

    self.enter_scope(ScopeKind::Class);
    if self.peek().typ == TT::ChevronLeft {
      self.generic_params(ctx);
    }
    if self.consume_if(TT::KeywordExtends).is_match() {
      let base = self.expr_with_min_prec(ctx, PRECEDENCE_MEMBER);
      self.visit_expr(ctx, &base);
      if self.peek().typ == TT::ChevronLeft {
        self.type_args(ctx);
      }
    }
    if let Some(implements) = self.consume_if(TT::KeywordImplements).match_loc() {
      self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, implements);
      loop {
        self.type_expr(ctx.with_ts_reported());
        if !self.consume_if(TT::Comma).is_match() {
          break;
        }
      }
    }
    if let Some(name) = &name {
      // The class's own binding, visible to its members.
      self.declare(ctx, name, VariableKind::Class, DeclarationFlags::NONE);
    }
    if self.peek().typ == TT::BraceOpen {
      self.class_body(ctx);
    } else {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::MissingBodyForClass, at);
    }
    self.exit_scope(ScopeKind::Class);

    if let (Some(name), ClassKind::Statement | ClassKind::ExportDefault) = (&name, kind) {
      self.declare(ctx, name, VariableKind::Class, DeclarationFlags::NONE);
    }
    Expr::leaf(Loc(start, self.prev_end()))
  }

  fn class_body(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    loop {
      match self.peek().typ {
        TT::BraceClose => {
          self.consume();
          break;
        }
        TT::EOF => {
          self.diag(DiagKind::UnclosedClassBlock, open);
          break;
        }
        TT::Semicolon => {
          self.consume();
        }
        _ => {
          let before = self.checkpoint().next_tok_i;
          self.nested(|p| p.class_member(ctx));
          if self.checkpoint().next_tok_i == before {
            self.unexpected();
          }
        }
      }
    }
  }

  // `static { ... }`, with `static` next.
  fn static_block(&mut self, ctx: ParseCtx) {
    self.consume();
    let open = self.consume().loc;
    self.enter_scope(ScopeKind::Block);
    self.stmts_until(ctx.with_function(false, false), TT::BraceClose);
    if !self.consume_if(TT::BraceClose).is_match() {
      self.diag(DiagKind::UnclosedBlock, open);
    }
    self.exit_scope(ScopeKind::Block);
  }

  fn member_modifiers(&mut self) -> Modifiers {
    let mut m = Modifiers::default();
    loop {
      let (t, next) = self.peek_2();
      // `static` stays a modifier across a line break; the others become property names.
      let same_line = !next.preceded_by_line_terminator || matches!(t.typ, TT::KeywordStatic | TT::Asterisk);
      if !continues_member(next.typ) || !same_line {
        break;
      }
      match t.typ {
        TT::KeywordStatic => {
          if let Some(a) = m.is_async {
            self.diag(DiagKind::AsyncStaticMethod, Loc(a.0, t.loc.1));
          }
          if let Some(accessor) = m.accessor {
            self.diag_n(DiagKind::ClassModifierMustPrecedeOtherModifier, &[t.loc, accessor]);
          }
          m.is_static = Some(t.loc);
        }
        TT::KeywordAsync => m.is_async = Some(t.loc),
        TT::Asterisk => m.generator = Some(t.loc),
        TT::KeywordGet | TT::KeywordSet => m.get_or_set = Some(t.loc),
        TT::KeywordPublic | TT::KeywordPrivate | TT::KeywordProtected => m.access = Some((t.typ, t.loc)),
        TT::KeywordAbstract => m.is_abstract = Some(t.loc),
        TT::KeywordAccessor => m.accessor = Some(t.loc),
        TT::KeywordFunction => m.function_keyword = Some(t.loc),
        TT::KeywordConst => m.const_keyword = Some(t.loc),
        TT::KeywordReadonly | TT::KeywordOverride | TT::KeywordDeclare => m.other_ts = Some(t.loc),
        _ => break,
      };
      self.consume();
    }
    m
  }

  /// A member's name. Private names keep their `#`; string, number and computed keys have none.
  /// Computed keys are read straight away.
  fn member_key(&mut self, ctx: ParseCtx) -> Option<Option<Identifier>> {
    let key = self.peek();
    match key.typ {
      TT::PrivateMember => {
        self.consume();
        Some(Some(self.ident(&key)))
      }
      TT::BracketOpen => {
        self.consume();
        let computed = self.assignment_expr(ctx.with_no_in(false));
        if !self.consume_if(TT::BracketClose).is_match() {
          self.diag(DiagKind::UnmatchedBracket, key.loc);
        }
        self.visit_expr(ctx, &computed);
        Some(None)
      }
      TT::LiteralString | TT::LiteralNumber | TT::LiteralBigInt => {
        self.consume();
        Some(None)
      }
      typ if typ.is_identifier_name() => {
        self.consume();
        Some(Some(self.ident(&key)))
      }
      _ => None,
    }
  }

  fn class_member(&mut self, ctx: ParseCtx) {
    while self.peek().typ == TT::At {
      self.decorator(ctx);
    }
    let (t, next) = self.peek_2();
    if t.typ == TT::KeywordStatic && next.typ == TT::BraceOpen {
      self.static_block(ctx);
      return;
    }

    let m = self.member_modifiers();
    if let Some(loc) = m.function_keyword {
      self.diag(DiagKind::MethodsShouldNotUseFunctionKeyword, loc);
    }
    if let Some(loc) = m.const_keyword {
      self.ts_only(ctx, DiagKind::TypeScriptStyleConstField, loc);
    }
    for loc in [m.access.map(|(_, loc)| loc), m.is_abstract, m.other_ts].into_iter().flatten() {
      self.ts_only(ctx, DiagKind::AccessModifiersNotAllowedInJavaScript, loc);
    }

    let key = self.peek();
    let name = if key.typ == TT::ParenthesisOpen {
      self.diag(DiagKind::MissingClassMethodName, Loc::point(key.loc.0));
      None
    } else {
      match self.member_key(ctx) {
        Some(name) => name,
        None => return,
      }
    };
    let name_loc = if key.typ == TT::ParenthesisOpen {
      Loc::point(key.loc.0)
    } else {
      Loc(key.loc.0, self.prev_end())
    };

    if let Some(q) = self.consume_if(TT::Question).match_loc() {
      self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, q);
    }
    if let Some(bang) = self.consume_if(TT::Exclamation).match_loc() {
      self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, bang);
    }

    let next = self.peek();
    let is_method = matches!(next.typ, TT::ParenthesisOpen | TT::ChevronLeft)
      || (next.typ == TT::BraceOpen && !next.preceded_by_line_terminator)
      || m.generator.is_some()
      || m.get_or_set.is_some();
    if is_method {
      if let Some(accessor) = m.accessor {
        let paren = if next.typ == TT::ParenthesisOpen {
          next.loc
        } else {
          Loc::point(next.loc.0)
        };
        match m.get_or_set {
          Some(get_or_set) => {
            self.diag_n(DiagKind::ClassAccessorOnGetterOrSetter, &[paren, accessor, get_or_set])
          }
          None => self.diag_n(DiagKind::ClassAccessorOnMethod, &[paren, accessor]),
        };
      }
      let body = if self.is_typescript() || ctx.in_declare {
        FnBody::Optional
      } else {
        FnBody::Required
      };
      self.enter_scope(ScopeKind::Function);
      self.function_rest(ctx, m.is_async.is_some(), m.generator.is_some(), body);
      self.exit_scope(ScopeKind::Function);
      self.declare_property(name.as_ref(), name_loc);
      return;
    }

    if self.peek().typ == TT::Colon {
      self.type_annotation(ctx);
    }
    if self.consume_if(TT::Equals).is_match() {
      if m.is_static.is_some() {
        let init = self.assignment_expr(ctx);
        self.visit_expr(ctx, &init);
      } else {
        // Instance initializers run in the constructor.
        self.enter_scope(ScopeKind::FieldInitializer);
        let init_ctx = ctx.with_function(false, false);
        let init = self.assignment_expr(init_ctx);
        self.visit_expr(init_ctx, &init);
        self.exit_scope(ScopeKind::FieldInitializer);
      }
    }
    self.declare_property(name.as_ref(), name_loc);

    let t = self.peek();
    match t.typ {
      TT::Semicolon => {
        self.consume();
      }
      TT::BraceClose | TT::EOF => {}
      TT::Comma => {
        self.diag(DiagKind::UnexpectedCommaAfterClassField, t.loc);
        self.consume();
      }
      _ if t.preceded_by_line_terminator => {}
      _ => {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::MissingSemicolonAfterField, at);
      }
    };
  }

  /// `{ ... }` of an interface or object type. The `{` is next.
  pub fn type_members(&mut self, ctx: ParseCtx, is_interface: bool) {
    let open = self.consume().loc;
    loop {
      match self.peek().typ {
        TT::BraceClose => {
          self.consume();
          break;
        }
        TT::EOF => {
          let kind = if is_interface {
            DiagKind::UnclosedInterfaceBlock
          } else {
            DiagKind::UnclosedBlock
          };
          self.diag(kind, open);
          break;
        }
        TT::Semicolon | TT::Comma => {
          self.consume();
        }
        _ => {
          let before = self.checkpoint().next_tok_i;
          self.nested(|p| p.type_member(ctx, is_interface));
          if self.checkpoint().next_tok_i == before {
            self.unexpected();
          }
        }
      }
    }
  }

  fn type_member_end(&mut self, missing: DiagKind) {
    let t = self.peek();
    match t.typ {
      TT::Semicolon | TT::Comma => {
        self.consume();
      }
      TT::BraceClose | TT::EOF => {}
      _ if t.preceded_by_line_terminator => {}
      _ => {
        let at = Loc::point(self.prev_end());
        self.diag(missing, at);
      }
    };
  }

  fn type_member(&mut self, ctx: ParseCtx, is_interface: bool) {
    let (t, next) = self.peek_2();
    if is_interface && t.typ == TT::KeywordStatic && next.typ == TT::BraceOpen {
      self.diag(DiagKind::InterfacesCannotContainStaticBlocks, t.loc);
      self.static_block(ctx);
      return;
    }

    let m = self.member_modifiers();
    if is_interface {
      if let Some((access, loc)) = m.access {
        let kind = match access {
          TT::KeywordPrivate => DiagKind::InterfacePropertiesCannotBePrivate,
          TT::KeywordProtected => DiagKind::InterfacePropertiesCannotBeProtected,
          _ => DiagKind::InterfacePropertiesCannotBeExplicitlyPublic,
        };
        self.diag(kind, loc);
      }
      if let Some(loc) = m.is_static {
        self.diag(DiagKind::InterfacePropertiesCannotBeStatic, loc);
      }
      if let Some(loc) = m.is_abstract {
        self.diag(DiagKind::AbstractPropertyNotAllowedInInterface, loc);
      }
      if let Some(loc) = m.is_async {
        self.diag(DiagKind::InterfaceMethodsCannotBeAsync, loc);
      }
      if let Some(loc) = m.generator {
        self.diag(DiagKind::InterfaceMethodsCannotBeGenerators, loc);
      }
    }

    let (key, after_key, third) = self.peek_3();
    // `[key: K]: V`
    if key.typ == TT::BracketOpen && after_key.typ.is_identifier_like() && third.typ == TT::Colon {
      self.index_signature(ctx);
      return;
    }
    // Call and construct signatures.
    let is_construct = key.typ == TT::KeywordNew
      && matches!(after_key.typ, TT::ParenthesisOpen | TT::ChevronLeft);
    if is_construct || matches!(key.typ, TT::ParenthesisOpen | TT::ChevronLeft) {
      if is_construct {
        self.consume();
      }
      self.declare_property(None, Loc::point(key.loc.0));
      self.enter_scope(ScopeKind::Function);
      self.function_rest(ctx, false, false, FnBody::Forbidden);
      self.exit_scope(ScopeKind::Function);
      self.type_member_end(DiagKind::MissingSemicolonAfterInterfaceMethod);
      return;
    }

    if is_interface && key.typ == TT::PrivateMember {
      self.diag(DiagKind::InterfacePropertiesCannotBePrivate, key.loc);
    }
    let Some(name) = self.member_key(ctx) else {
      return;
    };
    let name_loc = Loc(key.loc.0, self.prev_end());
    let _ = self.consume_if(TT::Question);
    if let Some(bang) = self.consume_if(TT::Exclamation).match_loc() {
      if is_interface {
        self.diag(DiagKind::AssignmentAssertedFieldsNotAllowedInInterfaces, bang);
      }
    }

    let next = self.peek();
    if matches!(next.typ, TT::ParenthesisOpen | TT::ChevronLeft) || m.generator.is_some() {
      self.enter_scope(ScopeKind::Function);
      self.function_rest(ctx, m.is_async.is_some(), m.generator.is_some(), FnBody::Forbidden);
      self.exit_scope(ScopeKind::Function);
      self.declare_property(name.as_ref(), name_loc);
      self.type_member_end(DiagKind::MissingSemicolonAfterInterfaceMethod);
      return;
    }

    if self.peek().typ == TT::Colon {
      self.type_annotation(ctx);
    }
    if let Some(eq) = self.consume_if(TT::Equals).match_loc() {
      if is_interface {
        self.diag(DiagKind::InterfaceFieldsCannotHaveInitializers, eq);
      }
      let init = self.assignment_expr(ctx);
      self.visit_expr(ctx, &init);
    }
    self.declare_property(name.as_ref(), name_loc);
    self.type_member_end(DiagKind::MissingSemicolonAfterField);
  }

  // `[key: K]: V`, with `[` next.
  fn index_signature(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    let key_token = self.consume();
    let key = self.ident(&key_token);
    self.consume();
    self.enter_scope(ScopeKind::IndexSignature);
    self.type_expr(ctx);
    self.declare(ctx, &key, VariableKind::Parameter, DeclarationFlags::NONE);
    if !self.consume_if(TT::BracketClose).is_match() {
      self.diag(DiagKind::UnmatchedBracket, open);
    }
    let next = self.peek();
    if next.typ == TT::ParenthesisOpen {
      self.diag(DiagKind::IndexSignatureCannotBeMethod, next.loc);
      self.declare_property(None, Loc(open.0, self.prev_end()));
      self.enter_scope(ScopeKind::Function);
      self.function_rest(ctx, false, false, FnBody::Forbidden);
      self.exit_scope(ScopeKind::Function);
    } else if self.peek().typ == TT::Colon {
      self.type_annotation(ctx);
    } else {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::IndexSignatureNeedsType, at);
    }
    self.exit_scope(ScopeKind::IndexSignature);
    self.type_member_end(DiagKind::MissingSemicolonAfterIndexSignature);
  }
}
