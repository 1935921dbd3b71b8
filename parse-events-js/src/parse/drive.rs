use super::Parser;
use crate::loc::Loc;
use crate::token::TT;
use diagnostics_js::DiagKind;

impl<'a> Parser<'a> {
  /// Parses items separated by `delim` until `close`, which is consumed if present. Allows a
  /// trailing delimiter. Returns the closing token's location, or `None` if the list was cut short
  /// by EOF or a different closing bracket; the caller reports the unclosed opener.
  pub fn list<F>(&mut self, delim: TT, close: TT, mut f: F) -> Option<Loc>
  where
    F: FnMut(&mut Self),
  {
    loop {
      if let Some(loc) = self.consume_if(close).match_loc() {
        return Some(loc);
      }
      if is_foreign_closer(self.peek().typ, close) {
        return None;
      }
      let before = self.checkpoint();
      f(self);
      if self.consume_if(delim).is_match() {
        continue;
      }
      let t = self.peek();
      if t.typ == close {
        continue;
      }
      if is_foreign_closer(t.typ, close) {
        return None;
      }
      if self.checkpoint().next_tok_i == before.next_tok_i {
        // The item could not start here; drop the token so the list makes progress.
        self.unexpected();
      } else {
        let at = Loc::point(self.prev_end());
        self.diag(DiagKind::ExpectedToken, at);
      }
    }
  }

  /// Runs a token-only scan and rewinds afterwards. Scans never emit events or diagnostics.
  pub fn lookahead<F>(&mut self, f: F) -> bool
  where
    F: FnOnce(&mut Self) -> bool,
  {
    let checkpoint = self.checkpoint();
    let res = f(self);
    self.restore_checkpoint(checkpoint);
    res
  }
}

fn is_foreign_closer(typ: TT, close: TT) -> bool {
  typ == TT::EOF
    || (typ != close && matches!(typ, TT::ParenthesisClose | TT::BracketClose | TT::BraceClose))
}
