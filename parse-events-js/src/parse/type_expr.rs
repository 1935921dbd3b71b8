//! TypeScript type expressions. Types never produce values, so every name in them is reported
//! as a type use except the operand of `typeof`.

use super::ParseCtx;
use super::Parser;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::token::TT;
use crate::visit::Access;
use crate::visit::DeclarationFlags;
use crate::visit::ScopeKind;
use crate::visit::VariableKind;
use diagnostics_js::DiagKind;

impl<'a> Parser<'a> {
  /// `: T` after a binding, field or parameter. The `:` is next.
  pub fn type_annotation(&mut self, ctx: ParseCtx) {
    let colon = self.consume().loc;
    self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, colon);
    self.type_expr(ctx.with_ts_reported());
  }

  /// `: T` after a function's parameters, which may also be a type predicate. The `:` is next.
  pub fn return_type(&mut self, ctx: ParseCtx) {
    let colon = self.consume().loc;
    self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, colon);
    self.type_or_predicate(ctx.with_ts_reported());
  }

  // `x is T`, `asserts x is T`, `asserts x` or a plain type.
  fn type_or_predicate(&mut self, ctx: ParseCtx) {
    let (t, next, third) = self.peek_3();
    let is_subject = |typ: TT| typ.is_identifier_like() || typ == TT::KeywordThis;
    if t.typ == TT::KeywordAsserts && is_subject(next.typ) && !next.preceded_by_line_terminator {
      self.consume();
      self.consume();
      if third.typ == TT::KeywordIs {
        self.consume();
        self.type_expr(ctx);
      }
      return;
    }
    if is_subject(t.typ) && next.typ == TT::KeywordIs && !next.preceded_by_line_terminator {
      self.consume();
      self.consume();
      self.type_expr(ctx);
      return;
    }
    self.type_expr(ctx);
  }

  pub fn type_expr(&mut self, ctx: ParseCtx) {
    self.type_expr_inner(ctx, true);
  }

  fn type_expr_inner(&mut self, ctx: ParseCtx, allow_conditional: bool) {
    self.nested(|p| {
      if p.is_function_type() {
        p.function_type(ctx);
        return;
      }
      p.union_type(ctx);
      let t = p.peek();
      if allow_conditional && t.typ == TT::KeywordExtends && !t.preceded_by_line_terminator {
        p.consume();
        // `infer` names are visible in the true branch only.
        p.enter_scope(ScopeKind::ConditionalType);
        p.type_expr_inner(ctx, false);
        if p.require(TT::Question).is_match() {
          p.type_expr(ctx);
        }
        p.exit_scope(ScopeKind::ConditionalType);
        if p.require(TT::Colon).is_match() {
          p.type_expr(ctx);
        }
      }
    })
  }

  fn is_function_type(&mut self) -> bool {
    let (t, next) = self.peek_2();
    match t.typ {
      TT::ChevronLeft | TT::KeywordNew => true,
      TT::KeywordAbstract => next.typ == TT::KeywordNew,
      TT::ParenthesisOpen => self.is_arrow_params(),
      _ => false,
    }
  }

  // `(a: A) => R`, `<T>(a: T) => R` and `new (...) => R`.
  fn function_type(&mut self, ctx: ParseCtx) {
    let _ = self.consume_if(TT::KeywordAbstract);
    let _ = self.consume_if(TT::KeywordNew);
    self.enter_scope(ScopeKind::Function);
    if self.peek().typ == TT::ChevronLeft {
      self.generic_params(ctx);
    }
    if self.peek().typ == TT::ParenthesisOpen {
      self.params(ctx);
    } else {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::ExpectedOpenParenthesis, at);
    }
    if self.require(TT::EqualsChevronRight).is_match() {
      self.type_or_predicate(ctx);
    }
    self.exit_scope(ScopeKind::Function);
  }

  fn union_type(&mut self, ctx: ParseCtx) {
    // A leading `|` or `&` is allowed.
    let _ = self.consume_if_pred(|t| matches!(t.typ, TT::Bar | TT::Ampersand));
    loop {
      self.postfix_type(ctx);
      if !self
        .consume_if_pred(|t| matches!(t.typ, TT::Bar | TT::Ampersand))
        .is_match()
      {
        break;
      }
    }
  }

  // Array types and indexed access.
  fn postfix_type(&mut self, ctx: ParseCtx) {
    self.primary_type(ctx);
    loop {
      let t = self.peek();
      if t.typ != TT::BracketOpen || t.preceded_by_line_terminator {
        break;
      }
      self.consume();
      if !self.consume_if(TT::BracketClose).is_match() {
        self.type_expr(ctx);
        if !self.consume_if(TT::BracketClose).is_match() {
          self.diag(DiagKind::UnmatchedBracket, t.loc);
        }
      }
    }
  }

  fn primary_type(&mut self, ctx: ParseCtx) {
    let (t, next) = self.peek_2();
    match t.typ {
      TT::KeywordKeyof | TT::KeywordUnique | TT::KeywordReadonly
        if can_start_type(next.typ) && !next.preceded_by_line_terminator =>
      {
        self.consume();
        self.nested(|p| p.postfix_type(ctx));
      }
      TT::KeywordInfer if next.typ.is_identifier_like() => {
        self.consume();
        let name = self.consume();
        let id = self.ident(&name);
        self.declare(ctx, &id, VariableKind::InferType, DeclarationFlags::NONE);
      }
      TT::KeywordTypeof => {
        self.consume();
        if self.peek().typ == TT::KeywordImport {
          self.import_type(ctx);
          return;
        }
        let name = self.peek();
        if name.typ.is_identifier_like() {
          self.consume();
          let id = self.ident(&name);
          self.use_variable(ctx, &id, Access::Read);
        } else if !self.consume_if(TT::KeywordThis).is_match() {
          let at = Loc::point(self.prev_end());
          self.diag(DiagKind::ExpectedToken, at);
          return;
        }
        self.qualified_rest(ctx);
      }
      TT::KeywordImport => self.import_type(ctx),
      TT::ParenthesisOpen => {
        self.consume();
        self.type_expr(ctx);
        if !self.consume_if(TT::ParenthesisClose).is_match() {
          self.diag(DiagKind::UnmatchedParenthesis, t.loc);
        }
      }
      TT::BracketOpen => self.tuple_type(ctx),
      TT::BraceOpen => {
        if self.is_mapped_type() {
          self.mapped_type(ctx);
        } else {
          self.type_members(ctx, false);
        }
      }
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => self.template_type(ctx),
      TT::Hyphen => {
        // `-1`
        self.consume();
        let _ = self.consume_if_pred(|t| matches!(t.typ, TT::LiteralNumber | TT::LiteralBigInt));
      }
      TT::KeywordNew | TT::ChevronLeft => self.function_type(ctx),
      TT::LiteralString
      | TT::LiteralNumber
      | TT::LiteralBigInt
      | TT::LiteralTrue
      | TT::LiteralFalse
      | TT::LiteralNull
      | TT::KeywordThis
      | TT::KeywordVoid
      | TT::KeywordAny
      | TT::KeywordUnknown
      | TT::KeywordNever
      | TT::KeywordNumberType
      | TT::KeywordStringType
      | TT::KeywordBooleanType
      | TT::KeywordBigIntType
      | TT::KeywordSymbolType
      | TT::KeywordObjectType
      | TT::KeywordUndefinedType => {
        self.consume();
      }
      typ if typ.is_identifier_like() => {
        self.consume();
        let id = self.ident(&t);
        // The head of `ns.T` is reported as a type use too; namespaces live in both spaces.
        self.use_type(ctx, &id);
        self.qualified_rest(ctx);
      }
      _ => {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
      }
    }
  }

  // `.b.c<T>` after the head of a type reference.
  fn qualified_rest(&mut self, ctx: ParseCtx) {
    while self.consume_if(TT::Dot).is_match() {
      if !self
        .consume_if_pred(|t| t.typ.is_identifier_name())
        .is_match()
      {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
        return;
      }
    }
    let t = self.peek();
    if t.typ == TT::ChevronLeft && !t.preceded_by_line_terminator {
      self.type_args(ctx);
    }
  }

  // `import("m").T<A>`
  fn import_type(&mut self, ctx: ParseCtx) {
    self.consume();
    if let Some(open) = self.require(TT::ParenthesisOpen).match_loc() {
      let _ = self.require(TT::LiteralString);
      if !self.consume_if(TT::ParenthesisClose).is_match() {
        self.diag(DiagKind::UnmatchedParenthesis, open);
      }
    }
    self.qualified_rest(ctx);
  }

  fn tuple_type(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    let closed = self.list(TT::Comma, TT::BracketClose, |p| {
      let _ = p.consume_if(TT::DotDotDot);
      let (t, next, third) = p.peek_3();
      let labelled = t.typ.is_identifier_name()
        && (next.typ == TT::Colon || (next.typ == TT::Question && third.typ == TT::Colon));
      if labelled {
        p.consume();
        let _ = p.consume_if(TT::Question);
        p.consume();
      }
      p.type_expr(ctx);
      let _ = p.consume_if(TT::Question);
    });
    if closed.is_none() {
      self.diag(DiagKind::UnmatchedBracket, open);
    }
  }

  fn template_type(&mut self, ctx: ParseCtx) {
    let first = self.consume();
    if first.typ == TT::LiteralTemplatePartStringEnd {
      return;
    }
    loop {
      self.type_expr(ctx);
      if !self.consume_if(TT::BraceClose).is_match() {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
        return;
      }
      if self.consume_with_mode(LexMode::TemplateStrContinue).typ != TT::LiteralTemplatePartString {
        return;
      }
    }
  }

  // `{ [K in T]: V }`, `{ readonly [K in T]?: V }` and `{ -readonly [K in T]-?: V }`.
  fn is_mapped_type(&mut self) -> bool {
    self.lookahead(|p| {
      p.skip_with_mode(LexMode::Standard);
      if matches!(p.peek().typ, TT::Plus | TT::Hyphen) {
        p.skip_with_mode(LexMode::Standard);
      }
      if p.peek().typ == TT::KeywordReadonly {
        p.skip_with_mode(LexMode::Standard);
      }
      let (open, name, keyword) = p.peek_3();
      open.typ == TT::BracketOpen && name.typ.is_identifier_like() && keyword.typ == TT::KeywordIn
    })
  }

  fn mapped_type(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    let _ = self.consume_if_pred(|t| matches!(t.typ, TT::Plus | TT::Hyphen));
    let _ = self.consume_if(TT::KeywordReadonly);
    self.consume();
    let name = self.consume();
    let key = self.ident(&name);
    self.consume();
    self.enter_scope(ScopeKind::MappedType);
    self.type_expr(ctx);
    self.declare(ctx, &key, VariableKind::GenericParameter, DeclarationFlags::NONE);
    if self.consume_if(TT::KeywordAs).is_match() {
      self.type_expr(ctx);
    }
    let _ = self.require(TT::BracketClose);
    let _ = self.consume_if_pred(|t| matches!(t.typ, TT::Plus | TT::Hyphen));
    let _ = self.consume_if(TT::Question);
    if self.consume_if(TT::Colon).is_match() {
      self.type_expr(ctx);
    }
    self.exit_scope(ScopeKind::MappedType);
    let _ = self.consume_if_pred(|t| matches!(t.typ, TT::Semicolon | TT::Comma));
    if !self.consume_if(TT::BraceClose).is_match() {
      self.diag(DiagKind::UnclosedBlock, open);
    }
  }

  /// `<A, B>` after a type name, call or heritage clause. The `<` is next.
  pub fn type_args(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    self.ts_only(ctx, DiagKind::GenericsNotAllowedInJavaScript, open);
    let ctx = ctx.with_ts_reported();
    loop {
      if self.consume_type_args_close() {
        return;
      }
      if self.peek().typ == TT::EOF {
        break;
      }
      self.type_expr(ctx);
      if self.consume_if(TT::Comma).is_match() {
        continue;
      }
      if self.consume_type_args_close() {
        return;
      }
      break;
    }
    let at = Loc::point(self.prev_end());
    self.diag(DiagKind::ExpectedToken, at);
  }

  /// `<T extends C = D, ...>` on a generic declaration, declaring each parameter in the current
  /// scope before reading its constraint and default. The `<` is next.
  pub fn generic_params(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    self.ts_only(ctx, DiagKind::GenericsNotAllowedInJavaScript, open);
    let ctx = ctx.with_ts_reported();
    loop {
      if self.consume_type_args_close() {
        return;
      }
      // Variance and const modifiers.
      loop {
        let (t, next) = self.peek_2();
        if matches!(t.typ, TT::KeywordIn | TT::KeywordOut | TT::KeywordConst) && next.typ.is_identifier_like() {
          self.consume();
        } else {
          break;
        }
      }
      let t = self.peek();
      if !t.typ.is_identifier_like() {
        break;
      }
      self.consume();
      let id = self.ident(&t);
      self.declare(ctx, &id, VariableKind::GenericParameter, DeclarationFlags::NONE);
      if self.consume_if(TT::KeywordExtends).is_match() {
        self.type_expr(ctx);
      }
      if self.consume_if(TT::Equals).is_match() {
        self.type_expr(ctx);
      }
      if self.consume_if(TT::Comma).is_match() {
        continue;
      }
      if self.consume_type_args_close() {
        return;
      }
      break;
    }
    let at = Loc::point(self.prev_end());
    self.diag(DiagKind::ExpectedToken, at);
  }
}

fn can_start_type(typ: TT) -> bool {
  typ.is_identifier_like()
    || matches!(
      typ,
      TT::BracketOpen
        | TT::BraceOpen
        | TT::ParenthesisOpen
        | TT::KeywordTypeof
        | TT::KeywordThis
        | TT::KeywordVoid
        | TT::KeywordImport
        | TT::LiteralString
        | TT::LiteralNumber
    )
}
