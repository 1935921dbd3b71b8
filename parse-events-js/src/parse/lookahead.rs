//! Token-only scans that resolve grammar ambiguities before anything is reported.
//!
//! Every scan runs inside [`Parser::lookahead`], so the token position is restored afterwards and
//! no events or diagnostics escape.

use super::Parser;
use crate::lex::LexMode;
use crate::token::TT;

impl<'a> Parser<'a> {
  fn skip(&mut self) -> TT {
    self.skip_with_mode(LexMode::Standard).typ
  }

  /// Skips the bracketed group opened by the next token, including nested groups and template
  /// substitutions. Returns false if the group is mismatched or unterminated.
  fn skip_balanced(&mut self) -> bool {
    let mut stack = Vec::new();
    loop {
      let t = self.skip_with_mode(LexMode::Standard);
      match t.typ {
        TT::ParenthesisOpen | TT::QuestionDotParenthesisOpen => stack.push(TT::ParenthesisClose),
        TT::BracketOpen | TT::QuestionDotBracketOpen => stack.push(TT::BracketClose),
        TT::BraceOpen => stack.push(TT::BraceClose),
        // Stands for an open `${`, closed by a `}` that resumes the template.
        TT::LiteralTemplatePartString => stack.push(TT::LiteralTemplatePartString),
        TT::ParenthesisClose | TT::BracketClose | TT::BraceClose => match stack.pop() {
          Some(TT::LiteralTemplatePartString) if t.typ == TT::BraceClose => {
            let part = self.skip_with_mode(LexMode::TemplateStrContinue);
            if part.typ == TT::LiteralTemplatePartString {
              stack.push(TT::LiteralTemplatePartString);
            }
          }
          Some(expected) if expected == t.typ => {}
          _ => return false,
        },
        TT::EOF => return false,
        _ => {}
      }
      if stack.is_empty() {
        return true;
      }
    }
  }

  /// Skips `<...>`. `>>` and `>>>` close several levels at once. Gives up on tokens that cannot
  /// appear in a type, or past the nesting limit.
  fn skip_type_args(&mut self) -> bool {
    let mut depth = 0i32;
    loop {
      let t = self.peek();
      match t.typ {
        TT::ParenthesisOpen | TT::BracketOpen | TT::BraceOpen | TT::LiteralTemplatePartString => {
          if !self.skip_balanced() {
            return false;
          }
          continue;
        }
        TT::ChevronLeft => {
          depth += 1;
          // Also bounds the rescans of `a < b < c < ...`.
          if depth as u32 > self.options().max_depth {
            return false;
          }
        }
        TT::ChevronRight => depth -= 1,
        TT::ChevronRightChevronRight => depth -= 2,
        TT::ChevronRightChevronRightChevronRight => depth -= 3,
        TT::EOF
        | TT::Semicolon
        | TT::Equals
        | TT::EqualsEquals
        | TT::EqualsEqualsEquals
        | TT::ExclamationEquals
        | TT::ExclamationEqualsEquals
        | TT::AmpersandAmpersand
        | TT::BarBar
        | TT::QuestionQuestion
        | TT::Plus
        | TT::Asterisk
        | TT::Slash
        | TT::Percent
        | TT::ChevronLeftEquals
        | TT::ChevronRightEquals
        | TT::ParenthesisClose
        | TT::BracketClose
        | TT::BraceClose => return false,
        _ => {}
      }
      self.skip();
      if depth == 0 {
        return true;
      }
      if depth < 0 {
        return false;
      }
    }
  }

  /// At `(`: whether it opens an arrow function's parameters.
  pub fn is_arrow_params(&mut self) -> bool {
    self.lookahead(|p| {
      if !p.skip_balanced() {
        return false;
      }
      match p.skip() {
        TT::EqualsChevronRight => true,
        TT::Colon if p.is_typescript() => p.skip_return_type_to_arrow(),
        _ => false,
      }
    })
  }

  fn skip_return_type_to_arrow(&mut self) -> bool {
    loop {
      match self.peek().typ {
        TT::EqualsChevronRight => return true,
        TT::ParenthesisOpen | TT::BracketOpen | TT::BraceOpen | TT::LiteralTemplatePartString => {
          if !self.skip_balanced() {
            return false;
          }
        }
        TT::EOF
        | TT::Semicolon
        | TT::Comma
        | TT::Equals
        | TT::ParenthesisClose
        | TT::BracketClose
        | TT::BraceClose => return false,
        _ => {
          self.skip();
        }
      }
    }
  }

  /// At `<` following an expression: whether it opens type arguments, as in `f<T>(x)` or `new C<T>`.
  pub fn is_type_args_after_expr(&mut self) -> bool {
    self.lookahead(|p| {
      if !p.skip_type_args() {
        return false;
      }
      matches!(
        p.peek().typ,
        TT::ParenthesisOpen
          | TT::LiteralTemplatePartString
          | TT::LiteralTemplatePartStringEnd
          | TT::ParenthesisClose
          | TT::BracketClose
          | TT::BraceClose
          | TT::Comma
          | TT::Semicolon
          | TT::Dot
          | TT::QuestionDot
          | TT::EOF
      )
    })
  }

  /// At `<` in operand position: whether it opens the type parameters of a generic arrow function.
  pub fn is_generic_arrow(&mut self) -> bool {
    let jsx = self.allows_jsx();
    self.lookahead(|p| {
      if jsx {
        // `<T>(x) => x` is an element in JSX files; only `<T,>` and `<T extends U>` are generic.
        let (_, name, after) = p.peek_3();
        let name_ok = name.typ.is_identifier_like() || name.typ == TT::KeywordConst;
        if !name_ok || !matches!(after.typ, TT::Comma | TT::KeywordExtends | TT::Identifier) {
          return false;
        }
      }
      p.skip_type_args() && p.peek().typ == TT::ParenthesisOpen && p.is_arrow_params()
    })
  }

  /// At `<` where JSX isn't enabled: whether an element follows rather than a `<T>x` assertion,
  /// as in `<div/>` or `<div id="x">`.
  pub fn is_element_not_assertion(&mut self) -> bool {
    self.lookahead(|p| {
      p.skip();
      if !p.skip().is_identifier_name() {
        return false;
      }
      match p.skip() {
        TT::Slash => true,
        typ if typ.is_identifier_name() => p.skip() == TT::Equals,
        _ => false,
      }
    })
  }

  /// At `async`: whether it starts an async arrow function.
  pub fn is_async_arrow(&mut self) -> bool {
    let ts = self.is_typescript();
    self.lookahead(|p| {
      p.skip();
      let t = p.peek();
      if t.preceded_by_line_terminator {
        return false;
      }
      match t.typ {
        TT::ParenthesisOpen => p.is_arrow_params(),
        TT::ChevronLeft if ts => p.is_generic_arrow(),
        typ if typ.is_identifier_like() => {
          p.skip();
          p.peek().typ == TT::EqualsChevronRight
        }
        _ => false,
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use crate::options::LanguageMode;
  use crate::options::ParserOptions;
  use crate::parse::Parser;
  use crate::visit::EventRecorder;
  use diagnostics_js::Diagnostic;

  fn scan(code: &str, language: LanguageMode, f: impl FnOnce(&mut Parser<'_>) -> bool) -> bool {
    let mut events = EventRecorder::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let mut parser = Parser::new(code, ParserOptions::new(language), &mut events, &mut diags);
    let res = f(&mut parser);
    // Scans rewind fully.
    assert_eq!(parser.prev_end(), 0);
    drop(parser);
    assert!(events.events.is_empty());
    assert!(diags.is_empty());
    res
  }

  #[test]
  fn arrow_params() {
    let js = LanguageMode::JavaScript;
    assert!(scan("(a, b) => a", js, |p| p.is_arrow_params()));
    assert!(scan("({a = `${x}`}) => a", js, |p| p.is_arrow_params()));
    assert!(!scan("(a, b)", js, |p| p.is_arrow_params()));
    assert!(!scan("(a) : b", js, |p| p.is_arrow_params()));
    assert!(scan("(a): Promise<T> => a", LanguageMode::TypeScript, |p| p.is_arrow_params()));
  }

  #[test]
  fn type_args_after_expression() {
    let ts = LanguageMode::TypeScript;
    assert!(scan("<T>(x)", ts, |p| p.is_type_args_after_expr()));
    assert!(scan("<A<B>>(x)", ts, |p| p.is_type_args_after_expr()));
    assert!(!scan("< b > c", ts, |p| p.is_type_args_after_expr()));
    assert!(!scan("< b; c > (d)", ts, |p| p.is_type_args_after_expr()));
  }

  #[test]
  fn generic_arrows_need_a_marker_in_jsx() {
    assert!(scan("<T>(x) => x", LanguageMode::TypeScript, |p| p.is_generic_arrow()));
    assert!(!scan("<T>(x) => x", LanguageMode::TypeScriptJsx, |p| p.is_generic_arrow()));
    assert!(scan("<T,>(x) => x", LanguageMode::TypeScriptJsx, |p| p.is_generic_arrow()));
  }

  #[test]
  fn elements_where_an_assertion_could_start() {
    let ts = LanguageMode::TypeScript;
    assert!(scan("<div/>", ts, |p| p.is_element_not_assertion()));
    assert!(scan("<div id=\"x\">", ts, |p| p.is_element_not_assertion()));
    assert!(!scan("<T>x", ts, |p| p.is_element_not_assertion()));
    assert!(!scan("<keyof T>x", ts, |p| p.is_element_not_assertion()));
    assert!(!scan("<A.B>x", ts, |p| p.is_element_not_assertion()));
  }

  #[test]
  fn async_arrows() {
    let js = LanguageMode::JavaScript;
    assert!(scan("async x => x", js, |p| p.is_async_arrow()));
    assert!(scan("async (x) => x", js, |p| p.is_async_arrow()));
    assert!(!scan("async(x)", js, |p| p.is_async_arrow()));
    assert!(!scan("async\nx => x", js, |p| p.is_async_arrow()));
  }
}
