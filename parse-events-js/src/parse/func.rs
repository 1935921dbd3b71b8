use super::expr::tree::Expr;
use super::ParseCtx;
use super::Parser;
use crate::loc::Loc;
use crate::token::TT;
use crate::visit::DeclarationFlags;
use crate::visit::ScopeKind;
use crate::visit::VariableKind;
use diagnostics_js::DiagKind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FunctionKind {
  /// `function f() {}` as a statement; the name is declared in the enclosing scope.
  Statement,
  /// `export default function () {}`; the name is optional.
  ExportDefault,
  /// The name, if any, is only visible inside the function.
  Expression,
}

/// What to expect after a function's signature.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FnBody {
  Required,
  /// Overloads, abstract methods and ambient declarations have no body.
  Optional,
  /// Interface and object type methods.
  Forbidden,
}

impl<'a> Parser<'a> {
  /// A `function` declaration or expression. `async` has already been consumed if `async_loc` is set.
  pub fn function(&mut self, ctx: ParseCtx, async_loc: Option<Loc>, kind: FunctionKind) -> Expr {
    let keyword = self.consume().loc;
    let start = async_loc.map_or(keyword.0, |l| l.0);
    let is_async = async_loc.is_some();
    let is_generator = self.consume_if(TT::Asterisk).is_match();
    let t = self.peek();
    let name = if t.typ.is_identifier_like() {
      self.consume();
      Some(self.ident(&t))
    } else {
      None
    };

    match (&name, kind) {
      (None, FunctionKind::Statement) => {
        self.diag(DiagKind::MissingNameInFunctionStatement, keyword);
      }
      (Some(name), FunctionKind::Statement | FunctionKind::ExportDefault) => {
        self.declare(ctx, name, VariableKind::Function, DeclarationFlags::NONE);
      }
      _ => {}
    };

    self.enter_scope(ScopeKind::Function);
    if let (Some(name), FunctionKind::Expression) = (&name, kind) {
      self.declare(ctx, name, VariableKind::Function, DeclarationFlags::NONE);
    }
    let body = if self.is_typescript() || ctx.in_declare {
      FnBody::Optional
    } else {
      FnBody::Required
    };
    self.function_rest(ctx, is_async, is_generator, body);
    self.exit_scope(ScopeKind::Function);
    Expr::leaf(Loc(start, self.prev_end()))
  }

  /// Generic parameters, parameters, return type and body of any function-like. The caller has
  /// entered the function scope. Returns whether a body was parsed.
  pub fn function_rest(
    &mut self,
    ctx: ParseCtx,
    is_async: bool,
    is_generator: bool,
    body: FnBody,
  ) -> bool {
    let fn_ctx = ctx.with_function(is_async, is_generator);
    if self.peek().typ == TT::ChevronLeft {
      self.generic_params(fn_ctx);
    }
    if self.peek().typ == TT::ParenthesisOpen {
      self.params(fn_ctx);
    } else {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::MissingFunctionParameterList, at);
    }
    if self.peek().typ == TT::Colon {
      self.return_type(fn_ctx);
    }
    if let Some(arrow) = self.consume_if(TT::EqualsChevronRight).match_loc() {
      self.diag(DiagKind::FunctionsOrMethodsShouldNotHaveArrowOperator, arrow);
    }
    let t = self.peek();
    if t.typ == TT::BraceOpen {
      if body == FnBody::Forbidden {
        self.diag(DiagKind::InterfaceMethodsCannotContainBodies, t.loc);
      }
      self.function_body(fn_ctx);
      return true;
    }
    if body == FnBody::Required {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::MissingBodyForFunction, at);
    }
    false
  }

  /// `{ ... }` of a function, in the function's own scope.
  pub fn function_body(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    self.stmts_until(ctx, TT::BraceClose);
    if !self.consume_if(TT::BraceClose).is_match() {
      self.diag(DiagKind::UnclosedBlock, open);
    }
  }

  /// `(a, b = 1, ...rest)`, declaring each parameter after reading its default.
  pub fn params(&mut self, ctx: ParseCtx) {
    let open = self.consume().loc;
    let closed = self.list(TT::Comma, TT::ParenthesisClose, |p| p.param(ctx));
    if closed.is_none() {
      self.diag(DiagKind::UnmatchedParenthesis, open);
    }
  }

  fn param(&mut self, ctx: ParseCtx) {
    while self.peek().typ == TT::At {
      self.decorator(ctx);
    }
    // Parameter properties: `constructor(private readonly x: T)`.
    loop {
      let (t, next) = self.peek_2();
      let is_modifier = matches!(
        t.typ,
        TT::KeywordPublic
          | TT::KeywordPrivate
          | TT::KeywordProtected
          | TT::KeywordReadonly
          | TT::KeywordOverride
      ) && (next.typ.is_identifier_like()
        || matches!(next.typ, TT::BracketOpen | TT::BraceOpen | TT::DotDotDot));
      if !is_modifier {
        break;
      }
      self.consume();
      self.ts_only(ctx, DiagKind::AccessModifiersNotAllowedInJavaScript, t.loc);
    }

    let (t, next) = self.peek_2();
    if t.typ == TT::KeywordThis && next.typ == TT::Colon {
      // `this: T` types the receiver and binds nothing.
      self.consume();
      self.type_annotation(ctx);
      return;
    }

    let target = match t.typ {
      TT::DotDotDot => self.rest_element(ctx),
      typ if typ.is_identifier_like() || matches!(typ, TT::BracketOpen | TT::BraceOpen) => {
        self.binding_pattern(ctx)
      }
      // Let the list skip it.
      _ => return,
    };
    if let Some(q) = self.consume_if(TT::Question).match_loc() {
      self.ts_only(ctx, DiagKind::TypeAnnotationsNotAllowedInJavaScript, q);
    }
    if self.peek().typ == TT::Colon {
      self.type_annotation(ctx);
    }
    if self.consume_if(TT::Equals).is_match() {
      let default = self.assignment_expr(ctx);
      self.visit_expr(ctx, &default);
    }
    self.declare_pattern(ctx, &target, VariableKind::Parameter, DeclarationFlags::NONE);
  }
}
