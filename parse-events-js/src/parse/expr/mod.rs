pub mod jsx;
pub mod tree;

use super::class_or_object::ClassKind;
use super::func::FnBody;
use super::func::FunctionKind;
use super::ParseCtx;
use super::Parser;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::MULTARY_OPERATOR_MAPPING;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::operator::PRECEDENCE_COMMA;
use crate::operator::PRECEDENCE_MEMBER;
use crate::operator::PRECEDENCE_UNARY;
use crate::operator::UNARY_OPERATOR_MAPPING;
use crate::token::TT;
use crate::visit::DeclarationFlags;
use crate::visit::ScopeKind;
use crate::visit::VariableKind;
use diagnostics_js::DiagKind;
use tracing::trace;
use tree::Expr;
use tree::ExprKind;
use tree::Prop;

/// Whether a token can begin an expression, used to decide between recovery and parsing.
pub fn can_start_expression(typ: TT) -> bool {
  typ.is_identifier_like()
    || matches!(
      typ,
      TT::BraceOpen
        | TT::BracketOpen
        | TT::ChevronLeft
        | TT::Exclamation
        | TT::Hyphen
        | TT::HyphenHyphen
        | TT::KeywordClass
        | TT::KeywordDelete
        | TT::KeywordFunction
        | TT::KeywordImport
        | TT::KeywordNew
        | TT::KeywordSuper
        | TT::KeywordThis
        | TT::KeywordTypeof
        | TT::KeywordVoid
        | TT::LiteralBigInt
        | TT::LiteralFalse
        | TT::LiteralNull
        | TT::LiteralNumber
        | TT::LiteralRegex
        | TT::LiteralString
        | TT::LiteralTemplatePartString
        | TT::LiteralTemplatePartStringEnd
        | TT::LiteralTrue
        | TT::ParenthesisOpen
        | TT::Plus
        | TT::PlusPlus
        | TT::PrivateMember
        | TT::Slash
        | TT::SlashEquals
        | TT::Tilde
    )
}

impl<'a> Parser<'a> {
  fn span_from(&self, start: usize) -> Loc {
    Loc(start, self.prev_end().max(start))
  }

  pub fn expr(&mut self, ctx: ParseCtx) -> Expr {
    self.expr_with_min_prec(ctx, PRECEDENCE_COMMA)
  }

  pub fn assignment_expr(&mut self, ctx: ParseCtx) -> Expr {
    self.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT)
  }

  /// Parses an expression and reports its uses straight away.
  pub fn expr_and_visit(&mut self, ctx: ParseCtx) {
    let e = self.expr(ctx);
    self.visit_expr(ctx, &e);
  }

  pub fn expr_with_min_prec(&mut self, ctx: ParseCtx, min_prec: u8) -> Expr {
    self.nested(|p| {
      let operand = p.operand(ctx);
      p.operators(ctx, operand, min_prec)
    })
  }

  pub fn check_target(&mut self, e: &Expr, allow_pattern: bool) {
    if !e.is_assignable(allow_pattern) {
      self.diag(DiagKind::InvalidAssignmentTarget, e.loc);
    }
  }

  fn operand(&mut self, ctx: ParseCtx) -> Expr {
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    match t.typ {
      // Top-level `await` is allowed in modules.
      TT::KeywordAwait if ctx.in_async || !ctx.in_function => {
        self.consume();
        let operand = self.expr_with_min_prec(ctx, PRECEDENCE_UNARY);
        Expr::composite(self.span_from(t.loc.0), vec![operand])
      }
      TT::KeywordYield if ctx.in_generator => self.yield_expr(ctx),
      TT::KeywordNew => self.new_expr(ctx),
      TT::ChevronLeft => self.angle_operand(ctx),
      typ => match UNARY_OPERATOR_MAPPING.get(&typ) {
        Some(op) => {
          self.consume_with_mode(LexMode::SlashIsRegex);
          let operand = self.expr_with_min_prec(ctx, op.precedence);
          let loc = self.span_from(t.loc.0);
          match op.name {
            OperatorName::PrefixIncrement | OperatorName::PrefixDecrement => {
              self.check_target(&operand, false);
              Expr::update(loc, operand)
            }
            _ => Expr::composite(loc, vec![operand]),
          }
        }
        None => self.primary(ctx),
      },
    }
  }

  fn yield_expr(&mut self, ctx: ParseCtx) -> Expr {
    let start = self.consume().loc.0;
    let delegate = self.consume_if(TT::Asterisk).is_match();
    let next = self.peek_with_mode(LexMode::SlashIsRegex);
    let mut parts = Vec::new();
    if delegate || (!next.preceded_by_line_terminator && can_start_expression(next.typ)) {
      parts.push(self.assignment_expr(ctx));
    }
    Expr::composite(self.span_from(start), parts)
  }

  fn new_expr(&mut self, ctx: ParseCtx) -> Expr {
    let start = self.consume().loc.0;
    if self.consume_if(TT::Dot).is_match() {
      // `new.target`.
      if !self.consume_if_pred(|t| t.typ.is_identifier_name()).is_match() {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
      }
      return Expr::leaf(self.span_from(start));
    }
    // Arguments are parsed as part of the callee; the difference doesn't affect scoping.
    let callee = self.expr_with_min_prec(ctx, PRECEDENCE_MEMBER);
    Expr::composite(self.span_from(start), vec![callee])
  }

  /// `<` in operand position: a generic arrow function, a `<T>expr` assertion, or JSX.
  fn angle_operand(&mut self, ctx: ParseCtx) -> Expr {
    if self.is_generic_arrow() {
      return self.arrow_function(ctx, None);
    }
    let (_, next) = self.peek_2();
    if self.is_typescript()
      && !self.allows_jsx()
      && next.typ != TT::ChevronRight
      && !self.is_element_not_assertion()
    {
      let start = self.consume().loc.0;
      self.type_expr(ctx);
      if !self.consume_type_args_close() {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
      }
      let operand = self.expr_with_min_prec(ctx, PRECEDENCE_UNARY);
      return Expr::transparent(self.span_from(start), operand);
    }
    let lt = self.peek().loc;
    if !self.allows_jsx() {
      let kind = if self.is_typescript() {
        DiagKind::JsxNotAllowedInTypeScript
      } else {
        DiagKind::JsxNotAllowedInJavaScript
      };
      self.diag(kind, lt);
    }
    self.jsx_element(ctx)
  }

  fn primary(&mut self, ctx: ParseCtx) -> Expr {
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    match t.typ {
      TT::ParenthesisOpen => {
        if self.is_arrow_params() {
          self.arrow_function(ctx, None)
        } else {
          self.paren_expr(ctx)
        }
      }
      TT::BracketOpen => self.array_literal(ctx),
      TT::BraceOpen => self.object_literal(ctx),
      TT::KeywordFunction => self.function(ctx, None, FunctionKind::Expression),
      TT::KeywordClass => self.class(ctx, ClassKind::Expression, t.loc.0),
      TT::KeywordAsync => {
        let (_, next) = self.peek_2();
        if next.typ == TT::KeywordFunction && !next.preceded_by_line_terminator {
          let async_loc = self.consume().loc;
          return self.function(ctx, Some(async_loc), FunctionKind::Expression);
        }
        if self.is_async_arrow() {
          let async_loc = self.consume().loc;
          return self.arrow_function(ctx, Some(async_loc));
        }
        self.identifier_operand()
      }
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => self.template(ctx),
      TT::KeywordImport => {
        // `import(...)` is finished by the call operator; `import.meta` is a leaf.
        self.consume();
        if self.consume_if(TT::Dot).is_match() {
          let _ = self.consume_if_pred(|t| t.typ.is_identifier_name());
        }
        Expr::leaf(self.span_from(t.loc.0))
      }
      TT::KeywordThis
      | TT::KeywordSuper
      | TT::LiteralBigInt
      | TT::LiteralFalse
      | TT::LiteralNull
      | TT::LiteralNumber
      | TT::LiteralRegex
      | TT::LiteralString
      | TT::LiteralTrue
      | TT::PrivateMember => {
        self.consume_with_mode(LexMode::SlashIsRegex);
        Expr::leaf(t.loc)
      }
      TT::Invalid => {
        self.consume_with_mode(LexMode::SlashIsRegex);
        Expr::missing(t.loc)
      }
      typ if typ.is_identifier_like() => {
        let (_, next) = self.peek_2();
        if next.typ == TT::EqualsChevronRight && !next.preceded_by_line_terminator {
          return self.arrow_function(ctx, None);
        }
        self.identifier_operand()
      }
      _ => {
        trace!(found = ?t.typ, "missing expression");
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::MissingExpression, at);
        Expr::missing(at)
      }
    }
  }

  fn identifier_operand(&mut self) -> Expr {
    let t = self.consume_with_mode(LexMode::SlashIsRegex);
    Expr::id(self.ident(&t))
  }

  fn paren_expr(&mut self, ctx: ParseCtx) -> Expr {
    let open = self.consume().loc;
    if self.peek().typ == TT::ParenthesisClose {
      let close = self.consume().loc;
      self.diag(DiagKind::MissingExpression, Loc(open.0, close.1));
      return Expr::missing(Loc(open.0, close.1));
    }
    let inner = self.expr(ctx.with_no_in(false));
    if !self.consume_if(TT::ParenthesisClose).is_match() {
      self.diag(DiagKind::UnmatchedParenthesis, open);
    }
    Expr::new(self.span_from(open.0), ExprKind::Paren(Box::new(inner)))
  }

  fn array_literal(&mut self, ctx: ParseCtx) -> Expr {
    let open = self.consume().loc;
    let ctx = ctx.with_no_in(false);
    let mut elems = Vec::new();
    let closed = self.list(TT::Comma, TT::BracketClose, |p| {
      let t = p.peek();
      elems.push(match t.typ {
        TT::Comma => Expr::missing(Loc::point(t.loc.0)),
        TT::DotDotDot => {
          p.consume();
          let inner = p.assignment_expr(ctx);
          Expr::new(p.span_from(t.loc.0), ExprKind::Spread(Box::new(inner)))
        }
        _ => p.assignment_expr(ctx),
      });
    });
    if closed.is_none() {
      self.diag(DiagKind::UnmatchedBracket, open);
    }
    Expr::new(self.span_from(open.0), ExprKind::Array(elems))
  }

  fn object_literal(&mut self, ctx: ParseCtx) -> Expr {
    let open = self.consume().loc;
    let ctx = ctx.with_no_in(false);
    let mut props = Vec::new();
    let closed = self.list(TT::Comma, TT::BraceClose, |p| {
      if let Some(prop) = p.object_prop(ctx) {
        props.push(prop);
      }
    });
    if closed.is_none() {
      self.diag(DiagKind::UnclosedObjectLiteral, open);
    }
    Expr::new(self.span_from(open.0), ExprKind::Object(props))
  }

  fn object_prop(&mut self, ctx: ParseCtx) -> Option<Prop> {
    let t = self.peek();
    if t.typ == TT::DotDotDot {
      self.consume();
      let inner = self.assignment_expr(ctx);
      return Some(Prop {
        computed_key: None,
        value: Some(Expr::new(self.span_from(t.loc.0), ExprKind::Spread(Box::new(inner)))),
      });
    }

    let mut is_async = false;
    let mut is_generator = false;
    let mut is_accessor = false;
    loop {
      let (t, next) = self.peek_2();
      let next_is_key = is_property_key_start(next.typ) || next.typ == TT::Asterisk;
      match t.typ {
        TT::KeywordAsync if next_is_key && !next.preceded_by_line_terminator => is_async = true,
        TT::KeywordGet | TT::KeywordSet if next_is_key => is_accessor = true,
        TT::Asterisk => is_generator = true,
        _ => break,
      }
      self.consume();
    }

    let key = self.peek();
    let mut computed_key = None;
    match key.typ {
      TT::BracketOpen => {
        self.consume();
        computed_key = Some(self.assignment_expr(ctx));
        if !self.consume_if(TT::BracketClose).is_match() {
          self.diag(DiagKind::UnmatchedBracket, key.loc);
        }
      }
      typ if is_property_key_start(typ) => {
        self.consume();
      }
      // Let the list recover.
      _ => return None,
    };

    let next = self.peek();
    if matches!(next.typ, TT::ParenthesisOpen | TT::ChevronLeft) || is_async || is_generator || is_accessor {
      self.enter_scope(ScopeKind::Function);
      self.function_rest(ctx, is_async, is_generator, FnBody::Required);
      self.exit_scope(ScopeKind::Function);
      return Some(Prop {
        computed_key,
        value: None,
      });
    }
    if self.consume_if(TT::Colon).is_match() {
      let value = self.assignment_expr(ctx);
      return Some(Prop {
        computed_key,
        value: Some(value),
      });
    }
    if computed_key.is_none() && key.typ.is_identifier_like() {
      let id = Expr::id(self.ident(&key));
      let value = if self.consume_if(TT::Equals).is_match() {
        // Only valid once the literal turns out to be a destructuring target.
        let default = self.assignment_expr(ctx);
        Expr::new(self.span_from(key.loc.0), ExprKind::Assign {
          target: Box::new(id),
          value: Box::new(default),
        })
      } else {
        id
      };
      return Some(Prop {
        computed_key: None,
        value: Some(value),
      });
    }
    let at = Loc::point(self.prev_end());
    self.diag(DiagKind::ExpectedToken, at);
    Some(Prop {
      computed_key,
      value: None,
    })
  }

  /// A template literal, starting at its first part.
  pub fn template(&mut self, ctx: ParseCtx) -> Expr {
    let first = self.consume();
    let mut parts = Vec::new();
    if first.typ == TT::LiteralTemplatePartString {
      loop {
        parts.push(self.expr(ctx.with_no_in(false)));
        if !self.consume_if(TT::BraceClose).is_match() {
          let at = Loc::point(self.prev_end());
          self.diag(DiagKind::ExpectedToken, at);
          break;
        }
        let part = self.consume_with_mode(LexMode::TemplateStrContinue);
        if part.typ != TT::LiteralTemplatePartString {
          break;
        }
      }
    }
    Expr::composite(self.span_from(first.loc.0), parts)
  }

  /// An arrow function. `async` has been consumed if `async_loc` is set; the parameters or the
  /// single parameter name are next.
  pub fn arrow_function(&mut self, ctx: ParseCtx, async_loc: Option<Loc>) -> Expr {
    let start = async_loc.map_or_else(|| self.peek().loc.0, |l| l.0);
    let fn_ctx = ctx.with_function(async_loc.is_some(), false);
    self.enter_scope(ScopeKind::Function);
    match self.peek().typ {
      TT::ChevronLeft => {
        self.generic_params(fn_ctx);
        self.params(fn_ctx);
      }
      TT::ParenthesisOpen => self.params(fn_ctx),
      _ => {
        let t = self.consume();
        let id = self.ident(&t);
        self.declare(fn_ctx, &id, VariableKind::Parameter, DeclarationFlags::NONE);
      }
    }
    if self.peek().typ == TT::Colon {
      self.return_type(fn_ctx);
    }
    let _ = self.require(TT::EqualsChevronRight);
    if self.peek().typ == TT::BraceOpen {
      self.function_body(fn_ctx);
    } else {
      let body = self.assignment_expr(fn_ctx.with_no_in(ctx.no_in));
      self.visit_expr(fn_ctx, &body);
    }
    self.exit_scope(ScopeKind::Function);
    Expr::leaf(self.span_from(start))
  }

  fn call_args(&mut self, ctx: ParseCtx, open: Loc) -> Vec<Expr> {
    let ctx = ctx.with_no_in(false);
    let mut args = Vec::new();
    let closed = self.list(TT::Comma, TT::ParenthesisClose, |p| {
      let t = p.peek();
      if t.typ == TT::DotDotDot {
        p.consume();
        let inner = p.assignment_expr(ctx);
        args.push(Expr::new(p.span_from(t.loc.0), ExprKind::Spread(Box::new(inner))));
      } else {
        args.push(p.assignment_expr(ctx));
      }
    });
    if closed.is_none() {
      self.diag(DiagKind::UnmatchedParenthesis, open);
    }
    args
  }

  fn operators(&mut self, ctx: ParseCtx, mut left: Expr, min_prec: u8) -> Expr {
    loop {
      let t = self.peek();
      match t.typ {
        TT::PlusPlus | TT::HyphenHyphen if !t.preceded_by_line_terminator => {
          self.consume();
          self.check_target(&left, false);
          left = Expr::update(Loc(left.loc.0, t.loc.1), left);
          continue;
        }
        TT::Exclamation if self.is_typescript() && !t.preceded_by_line_terminator => {
          self.consume();
          left = Expr::transparent(Loc(left.loc.0, t.loc.1), left);
          continue;
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          let tagged = self.template(ctx);
          left = Expr::composite(Loc(left.loc.0, tagged.loc.1), vec![left, tagged]);
          continue;
        }
        TT::ChevronLeft if self.is_typescript() && self.is_type_args_after_expr() => {
          // A generic call or instantiation; the call itself is handled as usual.
          self.type_args(ctx);
          continue;
        }
        _ => {}
      };

      let Some(&op) = MULTARY_OPERATOR_MAPPING.get(&t.typ) else {
        break;
      };
      if op.precedence < min_prec || (op.name == OperatorName::In && ctx.no_in) {
        break;
      }
      if op.name == OperatorName::TypeAssertion {
        if t.preceded_by_line_terminator {
          break;
        }
        self.ts_only(ctx, DiagKind::TypeAssertionsNotAllowedInJavaScript, t.loc);
      }
      let next_min_prec = op.precedence + (op.associativity == Associativity::Left) as u8;
      self.consume();
      let start = left.loc.0;
      left = match op.name {
        OperatorName::Call | OperatorName::OptionalChainingCall => {
          let mut parts = vec![left];
          parts.extend(self.call_args(ctx, t.loc));
          Expr::composite(self.span_from(start), parts)
        }
        OperatorName::ComputedMemberAccess | OperatorName::OptionalChainingComputedMemberAccess => {
          let prop = self.expr(ctx.with_no_in(false));
          if !self.consume_if(TT::BracketClose).is_match() {
            self.diag(DiagKind::UnmatchedBracket, t.loc);
          }
          Expr::member(self.span_from(start), left, Some(prop))
        }
        OperatorName::MemberAccess | OperatorName::OptionalChainingMemberAccess => {
          let name = self.consume_if_pred(|t| t.typ.is_identifier_name() || t.typ == TT::PrivateMember);
          if !name.is_match() {
            let at = Loc::point(self.prev_end());
            self.diag(DiagKind::ExpectedToken, at);
          }
          Expr::member(self.span_from(start), left, None)
        }
        OperatorName::Conditional => {
          let consequent = self.assignment_expr(ctx.with_no_in(false));
          if !self.consume_if(TT::Colon).is_match() {
            let at = Loc::point(self.prev_end());
            self.diag(DiagKind::MissingColonInConditional, at);
          }
          let alternate = self.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT);
          Expr::composite(self.span_from(start), vec![left, consequent, alternate])
        }
        OperatorName::TypeAssertion => {
          // `x as const`.
          if !self.consume_if(TT::KeywordConst).is_match() {
            self.type_expr(ctx.with_ts_reported());
          }
          Expr::transparent(self.span_from(start), left)
        }
        name if name.is_assignment() => {
          self.check_target(&left, name == OperatorName::Assignment);
          let value = self.expr_with_min_prec(ctx, op.precedence);
          Expr::new(self.span_from(start), ExprKind::Assign {
            target: Box::new(left),
            value: Box::new(value),
          })
        }
        _ => {
          let right = self.expr_with_min_prec(ctx, next_min_prec);
          Expr::composite(self.span_from(start), vec![left, right])
        }
      };
    }
    left
  }
}

/// Tokens that can name a property in an object literal or class body.
pub fn is_property_key_start(typ: TT) -> bool {
  typ.is_identifier_name()
    || matches!(
      typ,
      TT::LiteralString | TT::LiteralNumber | TT::LiteralBigInt | TT::BracketOpen | TT::PrivateMember
    )
}
