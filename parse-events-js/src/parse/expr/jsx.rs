use super::tree::Expr;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::parse::ParseCtx;
use crate::parse::Parser;
use crate::token::TT;
use diagnostics_js::DiagKind;

/// Whether a tag name refers to a variable rather than an intrinsic element like `div`.
fn is_component_name(name: &str) -> bool {
  name.starts_with(|c: char| c.is_ascii_uppercase() || c == '_' || c == '$') && !name.contains('-')
}

impl<'a> Parser<'a> {
  /// A JSX element or fragment, with `<` next. Component names and embedded expressions are
  /// collected as reads.
  pub fn jsx_element(&mut self, ctx: ParseCtx) -> Expr {
    let start = self.peek().loc.0;
    let mut parts = Vec::new();
    self.jsx_element_into(ctx, &mut parts);
    Expr::composite(Loc(start, self.prev_end()), parts)
  }

  fn jsx_element_into(&mut self, ctx: ParseCtx, parts: &mut Vec<Expr>) {
    self.nested(|p| {
      p.consume();
      p.jsx_tag_name(parts);
      loop {
        let t = p.peek_with_mode(LexMode::JsxTag);
        match t.typ {
          TT::ChevronRight => {
            p.consume_with_mode(LexMode::JsxTag);
            p.jsx_children(ctx, parts);
            return;
          }
          TT::Slash => {
            p.consume_with_mode(LexMode::JsxTag);
            if !p.maybe_consume_with_mode(TT::ChevronRight, LexMode::JsxTag).is_match() {
              let at = Loc::point(p.prev_end());
              p.diag(DiagKind::ExpectedToken, at);
            }
            return;
          }
          TT::BraceOpen => {
            // `{...props}`
            p.consume_with_mode(LexMode::JsxTag);
            let _ = p.consume_if(TT::DotDotDot);
            parts.push(p.assignment_expr(ctx));
            let _ = p.require(TT::BraceClose);
          }
          typ if typ.is_identifier_name() => {
            p.consume_with_mode(LexMode::JsxTag);
            if p.maybe_consume_with_mode(TT::Colon, LexMode::JsxTag).is_match() {
              let _ = p.maybe_consume_with_mode(TT::Identifier, LexMode::JsxTag);
            }
            if p.maybe_consume_with_mode(TT::Equals, LexMode::JsxTag).is_match() {
              p.jsx_attr_value(ctx, parts);
            }
          }
          _ => {
            let at = Loc::point(p.prev_end());
            p.diag(DiagKind::ExpectedToken, at);
            return;
          }
        }
      }
    })
  }

  fn jsx_attr_value(&mut self, ctx: ParseCtx, parts: &mut Vec<Expr>) {
    let t = self.peek_with_mode(LexMode::JsxTag);
    match t.typ {
      TT::LiteralString => {
        self.consume_with_mode(LexMode::JsxTag);
      }
      TT::BraceOpen => {
        self.consume_with_mode(LexMode::JsxTag);
        parts.push(self.assignment_expr(ctx));
        let _ = self.require(TT::BraceClose);
      }
      TT::ChevronLeft => self.jsx_element_into(ctx, parts),
      _ => {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
      }
    }
  }

  // `div`, `Foo`, `a.b.C` or `svg:rect`. Fragments have no name.
  fn jsx_tag_name(&mut self, parts: &mut Vec<Expr>) {
    let t = self.peek_with_mode(LexMode::JsxTag);
    if !t.typ.is_identifier_name() {
      return;
    }
    self.consume_with_mode(LexMode::JsxTag);
    if self.maybe_consume_with_mode(TT::Colon, LexMode::JsxTag).is_match() {
      let _ = self.maybe_consume_with_mode(TT::Identifier, LexMode::JsxTag);
      return;
    }
    let is_member = self.peek_with_mode(LexMode::JsxTag).typ == TT::Dot;
    let id = self.ident(&t);
    if is_member || is_component_name(&id.name) {
      parts.push(Expr::id(id));
    }
    while self.maybe_consume_with_mode(TT::Dot, LexMode::JsxTag).is_match() {
      let _ = self.consume_if_pred(|t| t.typ.is_identifier_name());
    }
  }

  fn jsx_children(&mut self, ctx: ParseCtx, parts: &mut Vec<Expr>) {
    loop {
      self.consume_with_mode(LexMode::JsxTextContent);
      let t = self.peek();
      match t.typ {
        TT::BraceOpen => {
          self.consume();
          let _ = self.consume_if(TT::DotDotDot);
          // `{}` and `{/* comment */}` are empty.
          if self.peek().typ != TT::BraceClose {
            parts.push(self.expr(ctx));
          }
          let _ = self.require(TT::BraceClose);
        }
        TT::ChevronLeftSlash => {
          self.consume();
          loop {
            let t = self.peek_with_mode(LexMode::JsxTag);
            if matches!(t.typ, TT::ChevronRight | TT::EOF) {
              break;
            }
            self.consume_with_mode(LexMode::JsxTag);
          }
          if !self.maybe_consume_with_mode(TT::ChevronRight, LexMode::JsxTag).is_match() {
            let at = Loc::point(self.prev_end());
            self.diag(DiagKind::ExpectedToken, at);
          }
          return;
        }
        TT::ChevronLeft => self.jsx_element_into(ctx, parts),
        _ => {
          // Only EOF ends text content.
          let at = Loc::point(self.prev_end());
          self.diag(DiagKind::ExpectedToken, at);
          return;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::is_component_name;

  #[test]
  fn intrinsic_elements_are_not_variables() {
    assert!(is_component_name("Foo"));
    assert!(is_component_name("_Foo"));
    assert!(!is_component_name("div"));
    assert!(!is_component_name("Foo-bar"));
  }
}
