use super::expr::tree::Expr;
use super::expr::tree::ExprKind;
use super::expr::tree::Prop;
use super::ParseCtx;
use super::Parser;
use crate::loc::Loc;
use crate::token::TT;
use diagnostics_js::DiagKind;

impl<'a> Parser<'a> {
  /// A binding target: a name, or an array or object destructuring pattern. Reports
  /// [`DiagKind::MissingVariableName`] and consumes nothing if none starts here.
  pub fn binding_pattern(&mut self, ctx: ParseCtx) -> Expr {
    self.nested(|p| {
      let t = p.peek();
      match t.typ {
        TT::BracketOpen => p.array_pattern(ctx),
        TT::BraceOpen => p.object_pattern(ctx),
        typ if typ.is_identifier_like() => {
          p.consume();
          Expr::id(p.ident(&t))
        }
        _ => {
          let at = Loc::point(p.prev_end());
          p.diag(DiagKind::MissingVariableName, at);
          Expr::missing(at)
        }
      }
    })
  }

  /// A binding target with an optional default value.
  pub fn binding_element(&mut self, ctx: ParseCtx) -> Expr {
    let target = self.binding_pattern(ctx);
    if !self.consume_if(TT::Equals).is_match() {
      return target;
    }
    let value = self.assignment_expr(ctx);
    Expr::new(Loc(target.loc.0, value.loc.1.max(target.loc.1)), ExprKind::Assign {
      target: Box::new(target),
      value: Box::new(value),
    })
  }

  pub fn rest_element(&mut self, ctx: ParseCtx) -> Expr {
    let start = self.consume().loc.0;
    let inner = self.binding_pattern(ctx);
    Expr::new(Loc(start, inner.loc.1.max(start)), ExprKind::Spread(Box::new(inner)))
  }

  fn array_pattern(&mut self, ctx: ParseCtx) -> Expr {
    let open = self.consume().loc;
    let mut elems = Vec::new();
    let closed = self.list(TT::Comma, TT::BracketClose, |p| {
      let t = p.peek();
      elems.push(match t.typ {
        TT::Comma => Expr::missing(Loc::point(t.loc.0)),
        TT::DotDotDot => p.rest_element(ctx),
        _ => p.binding_element(ctx),
      });
    });
    if closed.is_none() {
      self.diag(DiagKind::UnmatchedBracket, open);
    }
    Expr::new(Loc(open.0, self.prev_end()), ExprKind::Array(elems))
  }

  fn object_pattern(&mut self, ctx: ParseCtx) -> Expr {
    let open = self.consume().loc;
    let mut props = Vec::new();
    let closed = self.list(TT::Comma, TT::BraceClose, |p| {
      if let Some(prop) = p.object_pattern_prop(ctx) {
        props.push(prop);
      }
    });
    if closed.is_none() {
      self.diag(DiagKind::UnclosedObjectLiteral, open);
    }
    Expr::new(Loc(open.0, self.prev_end()), ExprKind::Object(props))
  }

  fn object_pattern_prop(&mut self, ctx: ParseCtx) -> Option<Prop> {
    let key = self.peek();
    match key.typ {
      TT::DotDotDot => {
        return Some(Prop {
          computed_key: None,
          value: Some(self.rest_element(ctx)),
        })
      }
      TT::BracketOpen => {
        self.consume();
        let computed = self.assignment_expr(ctx.with_no_in(false));
        if !self.consume_if(TT::BracketClose).is_match() {
          self.diag(DiagKind::UnmatchedBracket, key.loc);
        }
        let _ = self.require(TT::Colon);
        return Some(Prop {
          computed_key: Some(computed),
          value: Some(self.binding_element(ctx)),
        });
      }
      TT::LiteralString | TT::LiteralNumber | TT::LiteralBigInt => {
        self.consume();
        let _ = self.require(TT::Colon);
        return Some(Prop {
          computed_key: None,
          value: Some(self.binding_element(ctx)),
        });
      }
      typ if typ.is_identifier_name() => {
        self.consume();
      }
      _ => return None,
    };

    if self.consume_if(TT::Colon).is_match() {
      return Some(Prop {
        computed_key: None,
        value: Some(self.binding_element(ctx)),
      });
    }
    // Shorthand `{ a }` or `{ a = 1 }` binds the key itself.
    if !key.typ.is_identifier_like() {
      self.diag(DiagKind::MissingVariableName, key.loc);
    }
    let target = Expr::id(self.ident(&key));
    let value = if self.consume_if(TT::Equals).is_match() {
      let default = self.assignment_expr(ctx);
      Expr::new(Loc(key.loc.0, self.prev_end()), ExprKind::Assign {
        target: Box::new(target),
        value: Box::new(default),
      })
    } else {
      target
    };
    Some(Prop {
      computed_key: None,
      value: Some(value),
    })
  }
}
