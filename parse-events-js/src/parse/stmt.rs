use super::class_or_object::ClassKind;
use super::expr::can_start_expression;
use super::func::FunctionKind;
use super::ParseCtx;
use super::Parser;
use crate::loc::Loc;
use crate::token::TT;
use crate::visit::DeclarationFlags;
use crate::visit::ScopeKind;
use crate::visit::VariableKind;
use diagnostics_js::DiagKind;
use tracing::trace;

impl<'a> Parser<'a> {
  /// Parses statements until `end` or EOF, leaving that token unconsumed.
  pub fn stmts_until(&mut self, ctx: ParseCtx, end: TT) {
    loop {
      let t = self.peek();
      if t.typ == end || t.typ == TT::EOF {
        break;
      }
      self.stmt(ctx);
    }
  }

  pub fn stmt(&mut self, ctx: ParseCtx) {
    let before = self.checkpoint().next_tok_i;
    self.nested(|p| p.stmt_inner(ctx));
    if self.checkpoint().next_tok_i == before && self.peek().typ != TT::EOF {
      self.unexpected();
    }
  }

  /// The body of `if`, `for`, `while`, `do`, `with` or a label, where a class declaration is not allowed.
  pub fn body_stmt(&mut self, ctx: ParseCtx) {
    let t = self.peek();
    match t.typ {
      TT::KeywordClass => {
        let at = Loc::point(self.prev_end());
        self.diag_n(DiagKind::ClassStatementNotAllowedInBody, &[at, t.loc]);
      }
      TT::BraceClose | TT::EOF => {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::MissingExpression, at);
        return;
      }
      _ => {}
    };
    self.stmt(ctx);
  }

  fn stmt_inner(&mut self, ctx: ParseCtx) {
    let (t, next) = self.peek_2();
    match t.typ {
      TT::BraceOpen => self.block(ctx),
      TT::Semicolon => {
        self.consume();
      }
      TT::KeywordVar => {
        self.var_decl(ctx, VariableKind::Var);
        self.require_statement_end();
      }
      TT::KeywordConst if next.typ == TT::KeywordEnum => {
        self.consume();
        self.enum_decl(ctx);
      }
      TT::KeywordConst => {
        self.var_decl(ctx, VariableKind::Const);
        self.require_statement_end();
      }
      TT::KeywordLet if starts_let_binding(next.typ) => {
        self.var_decl(ctx, VariableKind::Let);
        self.require_statement_end();
      }
      TT::KeywordFunction => {
        self.function(ctx, None, FunctionKind::Statement);
      }
      TT::KeywordAsync if next.typ == TT::KeywordFunction && !next.preceded_by_line_terminator => {
        let async_loc = self.consume().loc;
        self.function(ctx, Some(async_loc), FunctionKind::Statement);
      }
      TT::KeywordClass => {
        self.class(ctx, ClassKind::Statement, t.loc.0);
      }
      TT::At => {
        while self.peek().typ == TT::At {
          self.decorator(ctx);
        }
        self.stmt(ctx);
      }
      TT::KeywordIf => self.if_stmt(ctx),
      TT::KeywordFor => self.for_stmt(ctx),
      TT::KeywordWhile => {
        self.consume();
        self.paren_condition(ctx);
        self.body_stmt(ctx);
      }
      TT::KeywordDo => self.do_while_stmt(ctx),
      TT::KeywordWith => {
        self.consume();
        self.paren_condition(ctx);
        self.body_stmt(ctx);
      }
      TT::KeywordSwitch => self.switch_stmt(ctx),
      TT::KeywordTry => self.try_stmt(ctx),
      TT::KeywordReturn => {
        self.consume();
        let t = self.peek();
        if !t.preceded_by_line_terminator && !matches!(t.typ, TT::Semicolon | TT::BraceClose | TT::EOF) {
          self.expr_and_visit(ctx);
        }
        self.require_statement_end();
      }
      TT::KeywordThrow => {
        self.consume();
        self.expr_and_visit(ctx);
        self.require_statement_end();
      }
      TT::KeywordBreak | TT::KeywordContinue => {
        self.consume();
        let label = self.peek();
        if label.typ.is_identifier_like() && !label.preceded_by_line_terminator {
          self.consume();
        }
        self.require_statement_end();
      }
      TT::KeywordDebugger => {
        self.consume();
        self.require_statement_end();
      }
      TT::KeywordImport if !matches!(next.typ, TT::ParenthesisOpen | TT::Dot) => self.import_decl(ctx),
      TT::KeywordExport => self.export_decl(ctx),
      typ if typ.is_identifier_like() && next.typ == TT::Colon => {
        // A label.
        self.consume();
        self.consume();
        self.body_stmt(ctx);
      }
      TT::KeywordInterface
      | TT::KeywordType
      | TT::KeywordEnum
      | TT::KeywordNamespace
      | TT::KeywordModule
      | TT::KeywordDeclare
      | TT::KeywordAbstract
      | TT::KeywordGlobal => {
        // Each of these is also a valid identifier.
        if !self.ts_declaration(ctx) {
          self.expression_stmt(ctx);
        }
      }
      typ if can_start_expression(typ) => self.expression_stmt(ctx),
      _ => {
        trace!(typ = ?t.typ, "token cannot start a statement");
        self.unexpected();
      }
    }
  }

  fn expression_stmt(&mut self, ctx: ParseCtx) {
    self.expr_and_visit(ctx);
    self.require_statement_end();
  }

  pub fn block(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    self.enter_scope(ScopeKind::Block);
    self.stmts_until(ctx, TT::BraceClose);
    if !self.consume_if(TT::BraceClose).is_match() {
      self.diag(DiagKind::UnclosedBlock, open);
    }
    self.exit_scope(ScopeKind::Block);
  }

  /// `var`, `let` or `const` and its declarators. The keyword is next.
  pub fn var_decl(&mut self, ctx: ParseCtx, kind: VariableKind) {
    self.consume();
    loop {
      self.declarator(ctx, kind);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
  }

  /// `x`, `x: T = init` or a destructuring pattern. The initializer is read before the names are declared.
  fn declarator(&mut self, ctx: ParseCtx, kind: VariableKind) {
    let target = self.binding_pattern(ctx);
    if let Some(bang) = self.consume_if(TT::Exclamation).match_loc() {
      self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, bang);
    }
    if self.peek().typ == TT::Colon {
      self.type_annotation(ctx);
    }
    let mut flags = DeclarationFlags::NONE;
    if self.consume_if(TT::Equals).is_match() {
      let init = self.assignment_expr(ctx);
      self.visit_expr(ctx, &init);
      flags |= DeclarationFlags::HAS_INITIALIZER;
    }
    self.declare_pattern(ctx, &target, kind, flags);
  }

  /// `( expr )` after `if`, `while`, `with` and `switch`.
  fn paren_condition(&mut self, ctx: ParseCtx) {
    match self.consume_if(TT::ParenthesisOpen).match_loc() {
      Some(open) => {
        self.expr_and_visit(ctx);
        if !self.consume_if(TT::ParenthesisClose).is_match() {
          self.diag(DiagKind::UnmatchedParenthesis, open);
        }
      }
      None => {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedOpenParenthesis, at);
        if self.peek().typ != TT::BraceOpen {
          self.expr_and_visit(ctx);
        }
      }
    }
  }

  fn if_stmt(&mut self, ctx: ParseCtx) {
    self.consume();
    self.paren_condition(ctx);
    self.body_stmt(ctx);
    if self.consume_if(TT::KeywordElse).is_match() {
      self.body_stmt(ctx);
    }
  }

  fn do_while_stmt(&mut self, ctx: ParseCtx) {
    self.consume();
    self.body_stmt(ctx);
    if self.require(TT::KeywordWhile).is_match() {
      self.paren_condition(ctx);
    }
    // `do ; while (x) f()` needs no semicolon after the condition.
    let _ = self.consume_if(TT::Semicolon);
  }

  fn for_stmt(&mut self, ctx: ParseCtx) {
    self.consume();
    let _ = self.consume_if(TT::KeywordAwait);
    let Some(open) = self.consume_if(TT::ParenthesisOpen).match_loc() else {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::ExpectedOpenParenthesis, at);
      self.body_stmt(ctx);
      return;
    };

    let (t, next) = self.peek_2();
    let decl_kind = match t.typ {
      TT::KeywordVar => Some(VariableKind::Var),
      TT::KeywordConst => Some(VariableKind::Const),
      TT::KeywordLet if starts_let_binding(next.typ) => Some(VariableKind::Let),
      _ => None,
    };
    // Loop bindings declared with `let` or `const` get a scope of their own.
    let scoped = matches!(decl_kind, Some(VariableKind::Let | VariableKind::Const));
    if scoped {
      self.enter_scope(ScopeKind::For);
    }
    let head_ctx = ctx.with_no_in(true);
    match decl_kind {
      Some(kind) => {
        self.consume();
        let target = self.binding_pattern(head_ctx);
        if self.peek().typ == TT::Colon {
          self.type_annotation(ctx);
        }
        if self.for_in_or_of(ctx) {
          self.declare_pattern(ctx, &target, kind, DeclarationFlags::HAS_INITIALIZER);
        } else {
          let mut flags = DeclarationFlags::NONE;
          if self.consume_if(TT::Equals).is_match() {
            let init = self.assignment_expr(head_ctx);
            self.visit_expr(ctx, &init);
            flags |= DeclarationFlags::HAS_INITIALIZER;
          }
          self.declare_pattern(ctx, &target, kind, flags);
          while self.consume_if(TT::Comma).is_match() {
            self.declarator(head_ctx, kind);
          }
          self.for_classic_rest(ctx);
        }
      }
      None if t.typ == TT::Semicolon => self.for_classic_rest(ctx),
      None => {
        let init = self.expr(head_ctx);
        if self.for_in_or_of(ctx) {
          self.check_target(&init, true);
          self.visit_target(ctx, &init);
        } else {
          self.visit_expr(ctx, &init);
          self.for_classic_rest(ctx);
        }
      }
    };
    if !self.consume_if(TT::ParenthesisClose).is_match() {
      self.diag(DiagKind::UnmatchedParenthesis, open);
    }
    self.body_stmt(ctx);
    if scoped {
      self.exit_scope(ScopeKind::For);
    }
  }

  /// `in expr` or `of expr` in a `for` head; the iterated value is read right away.
  fn for_in_or_of(&mut self, ctx: ParseCtx) -> bool {
    let t = self.peek();
    let iterated = match t.typ {
      TT::KeywordIn => {
        self.consume();
        self.expr(ctx)
      }
      TT::KeywordOf => {
        self.consume();
        self.assignment_expr(ctx)
      }
      _ => return false,
    };
    self.visit_expr(ctx, &iterated);
    true
  }

  // `; test; update` of a classic `for` head.
  fn for_classic_rest(&mut self, ctx: ParseCtx) {
    if !self.require(TT::Semicolon).is_match() {
      return;
    }
    if self.peek().typ != TT::Semicolon {
      self.expr_and_visit(ctx);
    }
    if !self.require(TT::Semicolon).is_match() {
      return;
    }
    if self.peek().typ != TT::ParenthesisClose {
      self.expr_and_visit(ctx);
    }
  }

  fn switch_stmt(&mut self, ctx: ParseCtx) {
    self.consume();
    self.paren_condition(ctx);
    let Some(open) = self.require(TT::BraceOpen).match_loc() else {
      return;
    };
    // All clauses share one scope.
    self.enter_scope(ScopeKind::Block);
    loop {
      let t = self.peek();
      match t.typ {
        TT::BraceClose => {
          self.consume();
          break;
        }
        TT::EOF => {
          self.diag(DiagKind::UnclosedBlock, open);
          break;
        }
        TT::KeywordCase => {
          self.consume();
          self.expr_and_visit(ctx);
          let _ = self.require(TT::Colon);
        }
        TT::KeywordDefault => {
          self.consume();
          let _ = self.require(TT::Colon);
        }
        _ => self.stmt(ctx),
      }
    }
    self.exit_scope(ScopeKind::Block);
  }

  fn try_stmt(&mut self, ctx: ParseCtx) {
    let keyword = self.consume().loc;
    if self.peek().typ == TT::BraceOpen {
      self.block(ctx);
    } else {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::ExpectedToken, at);
    }
    let mut has_handler = false;
    if self.consume_if(TT::KeywordCatch).is_match() {
      has_handler = true;
      self.enter_scope(ScopeKind::Catch);
      if let Some(open) = self.consume_if(TT::ParenthesisOpen).match_loc() {
        let target = self.binding_pattern(ctx);
        if self.peek().typ == TT::Colon {
          self.type_annotation(ctx);
        }
        if !self.consume_if(TT::ParenthesisClose).is_match() {
          self.diag(DiagKind::UnmatchedParenthesis, open);
        }
        self.declare_pattern(ctx, &target, VariableKind::CatchVariable, DeclarationFlags::NONE);
      }
      // The handler's statements live directly in the catch scope.
      if let Some(open) = self.require(TT::BraceOpen).match_loc() {
        self.stmts_until(ctx, TT::BraceClose);
        if !self.consume_if(TT::BraceClose).is_match() {
          self.diag(DiagKind::UnclosedBlock, open);
        }
      }
      self.exit_scope(ScopeKind::Catch);
    }
    if self.consume_if(TT::KeywordFinally).is_match() {
      has_handler = true;
      if self.peek().typ == TT::BraceOpen {
        self.block(ctx);
      } else {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
      }
    }
    if !has_handler {
      self.diag(DiagKind::MissingCatchOrFinally, keyword);
    }
  }
}

/// Whether the token after `let` makes it a declaration rather than a variable named `let`.
fn starts_let_binding(next: TT) -> bool {
  next.is_identifier_like() || matches!(next, TT::BracketOpen | TT::BraceOpen)
}
