use super::class_or_object::ClassKind;
use super::func::FunctionKind;
use super::ParseCtx;
use super::Parser;
use crate::loc::Loc;
use crate::token::TT;
use crate::visit::Access;
use crate::visit::DeclarationFlags;
use crate::visit::Identifier;
use crate::visit::VariableKind;
use diagnostics_js::DiagKind;

// A name in an import or export list, which may be a string: `export { "a b" as c }`.
fn is_module_export_name(typ: TT) -> bool {
  typ.is_identifier_name() || typ == TT::LiteralString
}

// Whether `type` before `next` inside braces is a modifier rather than the imported name itself.
fn is_type_modifier(next: TT) -> bool {
  is_module_export_name(next) && next != TT::KeywordAs
}

impl<'a> Parser<'a> {
  /// An import declaration, with `import` next. Bindings are declared as they are named.
  pub fn import_decl(&mut self, ctx: ParseCtx) {
    self.consume();
    let (t, next) = self.peek_2();
    if t.typ == TT::LiteralString {
      // `import "m";`
      self.consume();
      self.import_attributes(ctx);
      self.require_statement_end();
      return;
    }

    let mut kind = VariableKind::Import;
    // `import type from "m"` imports a default export named `type`.
    if t.typ == TT::KeywordType
      && (matches!(next.typ, TT::BraceOpen | TT::Asterisk)
        || (next.typ.is_identifier_like() && next.typ != TT::KeywordFrom))
    {
      let keyword = self.consume().loc;
      self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, keyword);
      kind = VariableKind::ImportType;
    }

    let t = self.peek();
    let mut needs_from = false;
    if t.typ.is_identifier_like() && t.typ != TT::KeywordFrom {
      self.consume();
      let id = self.ident(&t);
      if self.peek().typ == TT::Equals {
        self.import_equals(ctx, &id);
        return;
      }
      self.declare(ctx, &id, kind, DeclarationFlags::NONE);
      needs_from = true;
      if !self.consume_if(TT::Comma).is_match() {
        self.import_from(ctx);
        return;
      }
    }

    match self.peek().typ {
      TT::Asterisk => {
        self.consume();
        let _ = self.require(TT::KeywordAs);
        let name = self.peek();
        if name.typ.is_identifier_like() {
          self.consume();
          let id = self.ident(&name);
          self.declare(ctx, &id, kind, DeclarationFlags::NONE);
        } else {
          let at = Loc::point(self.prev_end());
          self.diag(DiagKind::MissingVariableName, at);
        }
      }
      TT::BraceOpen => self.named_imports(ctx, kind),
      _ if needs_from => {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
      }
      _ => {}
    }
    self.import_from(ctx);
  }

  fn named_imports(&mut self, ctx: ParseCtx, kind: VariableKind) {
    let open = self.consume().loc;
    let closed = self.list(TT::Comma, TT::BraceClose, |p| {
      let mut kind = kind;
      let (t, next) = p.peek_2();
      if t.typ == TT::KeywordType && is_type_modifier(next.typ) {
        let keyword = p.consume().loc;
        p.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, keyword);
        kind = VariableKind::ImportType;
      }
      let imported = p.peek();
      if !is_module_export_name(imported.typ) {
        return;
      }
      p.consume();
      let local = if p.consume_if(TT::KeywordAs).is_match() {
        let local = p.peek();
        if !local.typ.is_identifier_like() {
          let at = Loc::point(p.prev_end());
          p.diag(DiagKind::MissingVariableName, at);
          return;
        }
        p.consume();
        local
      } else if imported.typ == TT::LiteralString {
        // `import { "a b" }` has no local name.
        let at = Loc::point(p.prev_end());
        p.diag(DiagKind::ExpectedToken, at);
        return;
      } else {
        imported
      };
      let id = p.ident(&local);
      p.declare(ctx, &id, kind, DeclarationFlags::NONE);
    });
    if closed.is_none() {
      self.diag(DiagKind::UnclosedBlock, open);
    }
  }

  // `from "m"` and any attributes, ending the statement.
  fn import_from(&mut self, ctx: ParseCtx) {
    if self.require(TT::KeywordFrom).is_match() {
      let _ = self.require(TT::LiteralString);
    }
    self.import_attributes(ctx);
    self.require_statement_end();
  }

  // `with { type: "json" }`; `assert` is the older spelling.
  fn import_attributes(&mut self, ctx: ParseCtx) {
    let (t, next) = self.peek_2();
    let is_keyword =
      t.typ == TT::KeywordWith || (t.typ == TT::Identifier && self.str(t.loc) == "assert");
    if is_keyword && !t.preceded_by_line_terminator && next.typ == TT::BraceOpen {
      self.consume();
      // A literal object, so nothing in it refers to variables worth reporting.
      let _ = self.assignment_expr(ctx);
    }
  }

  // `import x = require("m")` or `import x = a.b.c`, with `=` next.
  fn import_equals(&mut self, ctx: ParseCtx, id: &Identifier) {
    self.consume();
    let (t, next) = self.peek_2();
    if t.typ == TT::Identifier && self.str(t.loc) == "require" && next.typ == TT::ParenthesisOpen {
      self.consume();
      self.consume();
      let _ = self.require(TT::LiteralString);
      let _ = self.require(TT::ParenthesisClose);
    } else if t.typ.is_identifier_like() {
      self.consume();
      let head = self.ident(&t);
      self.use_variable(ctx, &head, Access::Read);
      while self.consume_if(TT::Dot).is_match() {
        if !self.consume_if_pred(|t| t.typ.is_identifier_name()).is_match() {
          let at = Loc::point(self.prev_end());
          self.diag(DiagKind::ExpectedToken, at);
          break;
        }
      }
    } else {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::MissingExpression, at);
    }
    self.declare(ctx, id, VariableKind::Import, DeclarationFlags::NONE);
    self.require_statement_end();
  }

  /// An export declaration, with `export` next.
  pub fn export_decl(&mut self, ctx: ParseCtx) {
    self.consume();
    let (t, next) = self.peek_2();
    match t.typ {
      TT::KeywordDefault => self.export_default(ctx),
      TT::Equals => {
        // `export = x;`
        self.consume();
        self.expr_and_visit(ctx);
        self.require_statement_end();
      }
      TT::Asterisk => self.export_star(),
      TT::BraceOpen => self.export_list(ctx, false),
      TT::KeywordType if next.typ == TT::BraceOpen => {
        let keyword = self.consume().loc;
        self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, keyword);
        self.export_list(ctx, true);
      }
      TT::KeywordType if next.typ == TT::Asterisk => {
        let keyword = self.consume().loc;
        self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, keyword);
        self.export_star();
      }
      TT::KeywordAs if next.typ == TT::KeywordNamespace => {
        // `export as namespace Lib;` names a UMD global, which is not a binding here.
        self.consume();
        self.consume();
        let _ = self.consume_if_pred(|t| t.typ.is_identifier_like());
        self.require_statement_end();
      }
      _ => self.stmt(ctx),
    }
  }

  fn export_default(&mut self, ctx: ParseCtx) {
    self.consume();
    let (t, next) = self.peek_2();
    match t.typ {
      TT::KeywordFunction => {
        self.function(ctx, None, FunctionKind::ExportDefault);
      }
      TT::KeywordAsync if next.typ == TT::KeywordFunction && !next.preceded_by_line_terminator => {
        let async_loc = self.consume().loc;
        self.function(ctx, Some(async_loc), FunctionKind::ExportDefault);
      }
      TT::KeywordClass => {
        self.class(ctx, ClassKind::ExportDefault, t.loc.0);
      }
      TT::KeywordAbstract if next.typ == TT::KeywordClass => {
        let start = self.consume().loc;
        self.ts_only(ctx, DiagKind::AccessModifiersNotAllowedInJavaScript, start);
        self.class(ctx, ClassKind::ExportDefault, start.0);
      }
      TT::KeywordInterface if next.typ.is_identifier_like() => {
        if !self.ts_declaration(ctx) {
          self.expr_and_visit(ctx);
          self.require_statement_end();
        }
      }
      _ => {
        self.expr_and_visit(ctx);
        self.require_statement_end();
      }
    }
  }

  // `export * from "m"` or `export * as ns from "m"`, with `*` next.
  fn export_star(&mut self) {
    self.consume();
    if self.consume_if(TT::KeywordAs).is_match()
      && !self.consume_if_pred(|t| is_module_export_name(t.typ)).is_match()
    {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::MissingVariableName, at);
    }
    if self.require(TT::KeywordFrom).is_match() {
      let _ = self.require(TT::LiteralString);
    }
    self.require_statement_end();
  }

  // `export { a, b as c }`. Without a `from` clause, each local name is used once the list is closed.
  fn export_list(&mut self, ctx: ParseCtx, type_only: bool) {
    let open = self.consume().loc;
    let mut locals: Vec<(Identifier, bool)> = Vec::new();
    let mut has_string_local = false;
    let closed = self.list(TT::Comma, TT::BraceClose, |p| {
      let mut is_type = type_only;
      let (t, next) = p.peek_2();
      if t.typ == TT::KeywordType && is_type_modifier(next.typ) {
        let keyword = p.consume().loc;
        p.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, keyword);
        is_type = true;
      }
      let local = p.peek();
      if !is_module_export_name(local.typ) {
        return;
      }
      p.consume();
      if local.typ == TT::LiteralString {
        has_string_local = true;
      } else {
        locals.push((p.ident(&local), is_type));
      }
      if p.consume_if(TT::KeywordAs).is_match()
        && !p.consume_if_pred(|t| is_module_export_name(t.typ)).is_match()
      {
        let at = Loc::point(p.prev_end());
        p.diag(DiagKind::MissingVariableName, at);
      }
    });
    if closed.is_none() {
      self.diag(DiagKind::UnclosedBlock, open);
    }
    if self.consume_if(TT::KeywordFrom).is_match() {
      // A re-export names another module's bindings.
      let _ = self.require(TT::LiteralString);
      self.import_attributes(ctx);
    } else {
      if has_string_local {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
      }
      for (id, is_type) in locals {
        if is_type {
          self.use_type(ctx, &id);
        } else {
          self.use_variable(ctx, &id, Access::Read);
        }
      }
    }
    self.require_statement_end();
  }
}
