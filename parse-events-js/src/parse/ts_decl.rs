//! TypeScript declarations: interfaces, type aliases, enums, namespaces and `declare`.
//!
//! Each starts with a contextual keyword, so statement parsing first asks [`Parser::ts_declaration`]
//! and falls back to an expression when it declines. In JavaScript files they are reported once
//! and then parsed like TypeScript.

use super::class_or_object::ClassKind;
use super::ParseCtx;
use super::Parser;
use crate::loc::Loc;
use crate::token::TT;
use crate::visit::DeclarationFlags;
use crate::visit::ScopeKind;
use crate::visit::VariableKind;
use diagnostics_js::DiagKind;

impl<'a> Parser<'a> {
  // Reports a TypeScript-only declaration in a JavaScript file. The construct's contents are then
  // parsed without further reports.
  fn ts_declaration_ctx(&mut self, ctx: ParseCtx, kind: DiagKind, loc: Loc) -> ParseCtx {
    if self.is_typescript() {
      return ctx;
    }
    self.ts_only(ctx, kind, loc);
    ctx.with_ts_reported()
  }

  /// Parses a declaration starting with a contextual keyword, or returns false without consuming
  /// anything if the keyword is used as an identifier here.
  pub fn ts_declaration(&mut self, ctx: ParseCtx) -> bool {
    let (t, next, third) = self.peek_3();
    let same_line = !next.preceded_by_line_terminator;
    match t.typ {
      TT::KeywordInterface if next.typ.is_identifier_like() => {
        if !same_line {
          // `interface\nI {}` is still meant as an interface when the body follows the name.
          let body_follows = matches!(third.typ, TT::BraceOpen | TT::ChevronLeft)
            && !third.preceded_by_line_terminator;
          if !self.is_typescript() || !body_follows {
            return false;
          }
          self.diag(DiagKind::NewlineNotAllowedAfterInterfaceKeyword, t.loc);
        }
        self.interface(ctx);
        true
      }
      TT::KeywordType
        if next.typ.is_identifier_like()
          && same_line
          && matches!(third.typ, TT::Equals | TT::ChevronLeft) =>
      {
        self.type_alias(ctx);
        true
      }
      TT::KeywordEnum => {
        self.enum_decl(ctx);
        true
      }
      TT::KeywordNamespace | TT::KeywordModule
        if same_line
          && (next.typ.is_identifier_like()
            || (t.typ == TT::KeywordModule && next.typ == TT::LiteralString)) =>
      {
        self.namespace(ctx);
        true
      }
      TT::KeywordDeclare if same_line && starts_declaration(next.typ) => {
        self.declare_decl(ctx);
        true
      }
      TT::KeywordAbstract if same_line && next.typ == TT::KeywordClass => {
        let start = self.consume().loc;
        self.ts_only(ctx, DiagKind::AccessModifiersNotAllowedInJavaScript, start);
        self.class(ctx, ClassKind::Statement, start.0);
        true
      }
      TT::KeywordGlobal if ctx.in_declare && next.typ == TT::BraceOpen => {
        self.consume();
        self.namespace_body(ctx);
        true
      }
      _ => false,
    }
  }

  fn interface(&mut self, ctx: ParseCtx) {
    let keyword = self.consume().loc;
    let ctx = self.ts_declaration_ctx(ctx, DiagKind::InterfacesNotAllowedInJavaScript, keyword);
    let name = self.consume();
    let id = self.ident(&name);
    self.declare(ctx, &id, VariableKind::Interface, DeclarationFlags::NONE);
    self.enter_scope(ScopeKind::Interface);
    if self.peek().typ == TT::ChevronLeft {
      self.generic_params(ctx);
    }
    if self.consume_if(TT::KeywordExtends).is_match() {
      loop {
        self.type_expr(ctx);
        if !self.consume_if(TT::Comma).is_match() {
          break;
        }
      }
    }
    if self.peek().typ == TT::BraceOpen {
      self.type_members(ctx, true);
    } else {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::MissingBodyForInterface, at);
    }
    self.exit_scope(ScopeKind::Interface);
  }

  fn type_alias(&mut self, ctx: ParseCtx) {
    let keyword = self.consume().loc;
    let ctx = self.ts_declaration_ctx(ctx, DiagKind::TypeAliasesNotAllowedInJavaScript, keyword);
    let name = self.consume();
    let id = self.ident(&name);
    self.declare(ctx, &id, VariableKind::TypeAlias, DeclarationFlags::NONE);
    self.enter_scope(ScopeKind::TypeAlias);
    if self.peek().typ == TT::ChevronLeft {
      self.generic_params(ctx);
    }
    if self.require(TT::Equals).is_match() {
      self.type_expr(ctx);
    }
    self.exit_scope(ScopeKind::TypeAlias);
    self.require_statement_end();
  }

  /// `enum E { A, B = A }`, with `enum` next. A preceding `const` has been consumed.
  pub fn enum_decl(&mut self, ctx: ParseCtx) {
    let keyword = self.consume().loc;
    let ctx = self.ts_declaration_ctx(ctx, DiagKind::EnumsNotAllowedInJavaScript, keyword);
    let name = self.peek();
    if name.typ.is_identifier_like() {
      self.consume();
      let id = self.ident(&name);
      self.declare(ctx, &id, VariableKind::Enum, DeclarationFlags::NONE);
    } else {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::MissingVariableName, at);
    }
    self.enter_scope(ScopeKind::Enum);
    if let Some(open) = self.require(TT::BraceOpen).match_loc() {
      let closed = self.list(TT::Comma, TT::BraceClose, |p| p.enum_member(ctx));
      if closed.is_none() {
        self.diag(DiagKind::UnclosedBlock, open);
      }
    }
    self.exit_scope(ScopeKind::Enum);
  }

  fn enum_member(&mut self, ctx: ParseCtx) {
    let key = self.peek();
    let name = match key.typ {
      TT::LiteralString | TT::LiteralNumber => {
        self.consume();
        None
      }
      typ if typ.is_identifier_name() => {
        self.consume();
        Some(self.ident(&key))
      }
      TT::BracketOpen => {
        self.consume();
        self.expr_and_visit(ctx);
        if !self.consume_if(TT::BracketClose).is_match() {
          self.diag(DiagKind::UnmatchedBracket, key.loc);
        }
        None
      }
      _ => return,
    };
    if self.consume_if(TT::Equals).is_match() {
      let init = self.assignment_expr(ctx);
      self.visit_expr(ctx, &init);
    }
    if let Some(name) = name {
      self.declare(ctx, &name, VariableKind::EnumMember, DeclarationFlags::NONE);
    }
  }

  fn namespace(&mut self, ctx: ParseCtx) {
    let keyword = self.consume().loc;
    let mut ctx = self.ts_declaration_ctx(ctx, DiagKind::NamespacesNotAllowedInJavaScript, keyword);
    let name = self.consume();
    if name.typ == TT::LiteralString {
      // `module "m"` describes another module's exports.
      ctx = ctx.with_declare();
    } else {
      let id = self.ident(&name);
      self.declare(ctx, &id, VariableKind::Namespace, DeclarationFlags::NONE);
      while self.consume_if(TT::Dot).is_match() {
        if !self
          .consume_if_pred(|t| t.typ.is_identifier_name())
          .is_match()
        {
          let at = Loc::point(self.prev_end());
          self.diag(DiagKind::ExpectedToken, at);
          break;
        }
      }
    }
    if self.peek().typ == TT::BraceOpen {
      self.namespace_body(ctx);
    } else {
      self.require_statement_end();
    }
  }

  // `{ ... }` of a namespace, module or `declare global`.
  fn namespace_body(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    self.enter_scope(ScopeKind::Namespace);
    self.stmts_until(ctx, TT::BraceClose);
    if !self.consume_if(TT::BraceClose).is_match() {
      self.diag(DiagKind::UnclosedBlock, open);
    }
    self.exit_scope(ScopeKind::Namespace);
  }

  fn declare_decl(&mut self, ctx: ParseCtx) {
    let keyword = self.consume().loc;
    let ctx = self.ts_declaration_ctx(ctx, DiagKind::DeclareNotAllowedInJavaScript, keyword);
    let ctx = ctx.with_declare();
    let (t, next) = self.peek_2();
    if t.typ == TT::KeywordGlobal && next.typ == TT::BraceOpen {
      self.consume();
      self.namespace_body(ctx);
      return;
    }
    self.stmt(ctx);
  }
}

fn starts_declaration(typ: TT) -> bool {
  matches!(
    typ,
    TT::KeywordVar
      | TT::KeywordLet
      | TT::KeywordConst
      | TT::KeywordFunction
      | TT::KeywordAsync
      | TT::KeywordClass
      | TT::KeywordAbstract
      | TT::KeywordInterface
      | TT::KeywordType
      | TT::KeywordEnum
      | TT::KeywordNamespace
      | TT::KeywordModule
      | TT::KeywordGlobal
  )
}
