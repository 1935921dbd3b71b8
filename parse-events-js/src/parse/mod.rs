use crate::lex::decode_identifier;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::options::ParserOptions;
use crate::token::Token;
use crate::token::TT;
use crate::visit::Access;
use crate::visit::DeclarationFlags;
use crate::visit::Identifier;
use crate::visit::ScopeKind;
use crate::visit::VariableDeclaration;
use crate::visit::VariableKind;
use crate::visit::VariableUse;
use crate::visit::Visitor;
use diagnostics_js::DiagKind;
use diagnostics_js::Diagnostic;
use diagnostics_js::DiagnosticSink;
use diagnostics_js::TextRange;
use std::borrow::Cow;
use tracing::trace;

pub mod class_or_object;
pub mod drive;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod lookahead;
pub mod pat;
pub mod stmt;
pub mod ts_decl;
pub mod type_expr;

// Almost every parse_* function takes these field values as parameters. Instead of having to enumerate them as parameters on every function and ordered unnamed arguments on every call, we simply pass this struct around. The value should be treated as immutable; the with_* methods create an altered copy for passing into other functions, which is useful as most calls simply pass through the values unchanged. This struct should be received as a value, not a reference.
#[derive(Clone, Copy, Default, Debug)]
pub struct ParseCtx {
  pub in_function: bool,
  pub in_async: bool,
  pub in_generator: bool,
  // Inside `declare`, a `declare namespace`, or a definition file.
  pub in_declare: bool,
  // Inside a TypeScript-only construct whose use in JavaScript has already been reported.
  pub ts_reported: bool,
  // `in` is not a binary operator here, as in the head of a `for` statement.
  pub no_in: bool,
}

impl ParseCtx {
  pub fn with_function(&self, is_async: bool, is_generator: bool) -> ParseCtx {
    ParseCtx {
      in_function: true,
      in_async: is_async,
      in_generator: is_generator,
      no_in: false,
      ..*self
    }
  }

  pub fn with_declare(&self) -> ParseCtx {
    ParseCtx {
      in_declare: true,
      ..*self
    }
  }

  pub fn with_ts_reported(&self) -> ParseCtx {
    ParseCtx {
      ts_reported: true,
      ..*self
    }
  }

  pub fn with_no_in(&self, no_in: bool) -> ParseCtx {
    ParseCtx { no_in, ..*self }
  }
}

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }

  /// The token that was looked at, whether or not it matched.
  pub fn loc(&self) -> Loc {
    self.loc
  }

  pub fn typ(&self) -> TT {
    self.typ
  }

  pub fn map<R, F: FnOnce(Self) -> R>(self, f: F) -> Option<R> {
    if self.matched {
      Some(f(self))
    } else {
      None
    }
  }
}

pub struct ParserCheckpoint {
  next_tok_i: usize,
}

/// To get the lexer's `next` after this token was lexed, use `token.loc.1`.
struct BufferedToken {
  token: Token,
  lex_mode: LexMode,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  buf: Vec<BufferedToken>,
  next_tok_i: usize,
  options: ParserOptions,
  visitor: &'a mut dyn Visitor,
  sink: &'a mut dyn DiagnosticSink,
  depth: u32,
  // Set once the nesting limit is hit. The rest of the input is skipped and no further syntax
  // errors are reported.
  bailed: bool,
  // Start of the last token whose lexer diagnostics were reported.
  lex_diags_reported_at: Option<usize>,
}

// We extend this struct with added methods in the various submodules, instead of simply using free functions and passing `&mut Parser` around, for several reasons:
// - Avoid needing to redeclare `<'a>` on every function.
// - More lifetime elision is available for `self` than if it was just another reference parameter.
// - `self` is shorter than `parser` but makes more sense than `p`.
// - Don't need to import each function.
// - Autocomplete is more specific since `self.*` narrows down the options instead of just listing all visible functions.
// - For general consistency; if there's no reason why it should be a free function (e.g. more than one ambiguous base type), it should be a method.
// - Makes free functions truly separate independent utility functions.
impl<'a> Parser<'a> {
  pub fn new(
    source: &'a str,
    options: ParserOptions,
    visitor: &'a mut dyn Visitor,
    sink: &'a mut dyn DiagnosticSink,
  ) -> Parser<'a> {
    Parser {
      lexer: Lexer::new(source),
      buf: Vec::new(),
      next_tok_i: 0,
      options,
      visitor,
      sink,
      depth: 0,
      bailed: false,
      lex_diags_reported_at: None,
    }
  }

  pub fn options(&self) -> &ParserOptions {
    &self.options
  }

  pub fn is_typescript(&self) -> bool {
    self.options.language.is_typescript()
  }

  pub fn allows_jsx(&self) -> bool {
    self.options.language.allows_jsx()
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    let source = self.lexer.source();
    &source[loc.0.min(source.len())..loc.1.min(source.len())]
  }

  /// The token's spelling with Unicode escapes decoded.
  pub fn token_text(&self, t: &Token) -> Cow<'a, str> {
    let raw = self.str(t.loc);
    if t.escaped {
      decode_identifier(raw)
    } else {
      Cow::Borrowed(raw)
    }
  }

  pub fn ident(&self, t: &Token) -> Identifier {
    Identifier {
      name: self.token_text(t).into_owned(),
      loc: t.loc,
    }
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
    }
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
  }

  /// End of the most recently consumed token, where "missing" diagnostics point.
  pub fn prev_end(&self) -> usize {
    match self.next_tok_i {
      0 => 0,
      i => self.buf[i - 1].token.loc.1,
    }
  }

  fn reset_to(&mut self, n: usize) {
    self.next_tok_i = n;
    self.buf.truncate(n);
    match self.buf.last() {
      _ if self.bailed => self.lexer.set_next(self.lexer.source().len()),
      Some(t) => self.lexer.set_next(t.token.loc.1),
      None => self.lexer.set_next(0),
    };
  }

  fn forward<K: FnOnce(&Token) -> bool>(&mut self, mode: LexMode, keep: K) -> (bool, Token) {
    if self
      .buf
      .get(self.next_tok_i)
      .is_some_and(|t| t.lex_mode != mode)
    {
      self.reset_to(self.next_tok_i);
    }
    debug_assert!(self.buf.len() >= self.next_tok_i);
    if self.buf.len() == self.next_tok_i {
      let token = lex_next(&mut self.lexer, mode);
      self.buf.push(BufferedToken {
        token,
        lex_mode: mode,
      });
    }
    let t = self.buf[self.next_tok_i].token.clone();
    let k = keep(&t);
    if k {
      self.next_tok_i += 1;
    };
    (k, t)
  }

  // Lexer diagnostics travel with their token and are reported the first time it is consumed, so
  // lookahead and re-lexing never duplicate them.
  fn report_lex_diags(&mut self, t: &Token) {
    if t.diags.is_empty() || self.lex_diags_reported_at.is_some_and(|at| t.loc.0 <= at) {
      return;
    }
    self.lex_diags_reported_at = Some(t.loc.0);
    for d in t.diags.iter() {
      self.diag(d.kind, d.loc);
    }
  }

  /// Advances without reporting anything. Only for lookahead scans, which always restore a checkpoint.
  pub(crate) fn skip_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| true).1
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    let t = self.forward(mode, |_| true).1;
    self.report_lex_diags(&t);
    t
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| false).1
  }

  pub fn peek(&mut self) -> Token {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn peek_2(&mut self) -> (Token, Token) {
    let cp = self.checkpoint();
    let a = self.forward(LexMode::Standard, |_| true);
    let b = self.forward(LexMode::Standard, |_| true);
    self.restore_checkpoint(cp);
    (a.1, b.1)
  }

  pub fn peek_3(&mut self) -> (Token, Token, Token) {
    let cp = self.checkpoint();
    let a = self.forward(LexMode::Standard, |_| true);
    let b = self.forward(LexMode::Standard, |_| true);
    let c = self.forward(LexMode::Standard, |_| true);
    self.restore_checkpoint(cp);
    (a.1, b.1, c.1)
  }

  pub fn maybe_consume_with_mode(&mut self, typ: TT, mode: LexMode) -> MaybeToken {
    let (matched, t) = self.forward(mode, |t| t.typ == typ);
    if matched {
      self.report_lex_diags(&t);
    }
    MaybeToken {
      typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    self.maybe_consume_with_mode(typ, LexMode::Standard)
  }

  pub fn consume_if_pred<F: FnOnce(&Token) -> bool>(&mut self, pred: F) -> MaybeToken {
    let (matched, t) = self.forward(LexMode::Standard, pred);
    if matched {
      self.report_lex_diags(&t);
    }
    MaybeToken {
      typ: t.typ,
      matched,
      loc: t.loc,
    }
  }

  /// Consumes `typ` if present; otherwise reports [`DiagKind::ExpectedToken`] where it should have
  /// been and leaves the input untouched.
  pub fn require(&mut self, typ: TT) -> MaybeToken {
    let t = self.consume_if(typ);
    if !t.is_match() {
      trace!(expected = ?typ, found = ?t.typ(), "required token missing");
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::ExpectedToken, at);
    }
    t
  }

  /// Consumes a single `>`, splitting a longer token that starts with one, such as the `>>` in `A<B<C>>`.
  pub fn consume_type_args_close(&mut self) -> bool {
    let t = self.peek();
    let rest = match t.typ {
      TT::ChevronRight => {
        self.consume();
        return true;
      }
      TT::ChevronRightChevronRight => TT::ChevronRight,
      TT::ChevronRightChevronRightChevronRight => TT::ChevronRightChevronRight,
      TT::ChevronRightEquals => TT::Equals,
      TT::ChevronRightChevronRightEquals => TT::ChevronRightEquals,
      TT::ChevronRightChevronRightChevronRightEquals => TT::ChevronRightChevronRightEquals,
      _ => return false,
    };
    let i = self.next_tok_i;
    let lex_mode = self.buf[i].lex_mode;
    let tail = Token {
      loc: Loc(t.loc.0 + 1, t.loc.1),
      typ: rest,
      preceded_by_line_terminator: false,
      escaped: false,
      diags: Vec::new(),
    };
    self.buf[i].token.loc = Loc(t.loc.0, t.loc.0 + 1);
    self.buf[i].token.typ = TT::ChevronRight;
    // Tokens buffered past the split are dropped and lexed again after the tail, so nothing shifts.
    self.buf.truncate(i + 1);
    let tail_end = tail.loc.1;
    self.buf.push(BufferedToken {
      token: tail,
      lex_mode,
    });
    if !self.bailed {
      self.lexer.set_next(tail_end);
    }
    self.next_tok_i += 1;
    true
  }

  pub fn diag(&mut self, kind: DiagKind, loc: Loc) {
    self.diag_n(kind, &[loc]);
  }

  pub fn diag_n(&mut self, kind: DiagKind, locs: &[Loc]) {
    if self.bailed {
      return;
    }
    let ranges: Vec<TextRange> = locs.iter().map(|&loc| loc.into()).collect();
    self.sink.report(Diagnostic::new(kind, &ranges));
  }

  /// Reports a TypeScript-only construct in a JavaScript file, unless an enclosing construct already was.
  pub fn ts_only(&mut self, ctx: ParseCtx, kind: DiagKind, loc: Loc) {
    if !self.is_typescript() && !ctx.ts_reported {
      self.diag(kind, loc);
    }
  }

  /// Reports an unexpected token and consumes it. Invalid tokens were already reported by the lexer.
  pub fn unexpected(&mut self) {
    let t = self.consume();
    trace!(typ = ?t.typ, loc = ?t.loc, "skipping unexpected token");
    if t.typ != TT::Invalid && t.typ != TT::EOF {
      self.diag(DiagKind::UnexpectedToken, t.loc);
    }
  }

  /// Runs `f` one nesting level deeper. Past the limit, the rest of the input is dropped so every
  /// caller unwinds through EOF.
  pub fn nested<R, F: FnOnce(&mut Self) -> R>(&mut self, f: F) -> R {
    self.depth += 1;
    if self.depth > self.options.max_depth && !self.bailed {
      let loc = self.peek().loc;
      self.diag(DiagKind::DepthLimitExceeded, loc);
      trace!(depth = self.depth, "nesting limit exceeded, skipping rest of input");
      self.bailed = true;
      self.reset_to(self.next_tok_i);
    }
    let r = f(self);
    self.depth -= 1;
    r
  }

  /// Whether the current statement may end here: an explicit `;` (consumed), `}`, EOF, or a line break.
  pub fn statement_end(&mut self) -> bool {
    let t = self.peek();
    match t.typ {
      TT::Semicolon => {
        self.consume();
        true
      }
      TT::BraceClose | TT::EOF => true,
      _ => t.preceded_by_line_terminator,
    }
  }

  pub fn require_statement_end(&mut self) {
    if !self.statement_end() {
      let at = Loc::point(self.prev_end());
      self.diag(DiagKind::MissingSemicolonAfterStatement, at);
    }
  }

  pub fn enter_scope(&mut self, kind: ScopeKind) {
    self.visitor.enter_scope(kind);
  }

  pub fn exit_scope(&mut self, kind: ScopeKind) {
    self.visitor.exit_scope(kind);
  }

  pub fn declare(
    &mut self,
    ctx: ParseCtx,
    id: &Identifier,
    kind: VariableKind,
    mut flags: DeclarationFlags,
  ) {
    if id.name == "await" && ctx.in_async {
      self.diag(DiagKind::CannotDeclareAwaitInAsyncFunction, id.loc);
    }
    if id.name == "yield" && ctx.in_generator {
      self.diag(DiagKind::CannotDeclareYieldInGenerator, id.loc);
    }
    if ctx.in_declare {
      flags |= DeclarationFlags::DECLARE_CONTEXT;
    }
    self.visitor.declare_variable(&VariableDeclaration {
      name: id.name.clone(),
      loc: id.loc,
      kind,
      flags,
    });
  }

  pub fn use_variable(&mut self, ctx: ParseCtx, id: &Identifier, access: Access) {
    self.visitor.use_variable(&VariableUse {
      name: id.name.clone(),
      loc: id.loc,
      access,
      in_declare_context: ctx.in_declare,
    });
  }

  pub fn use_type(&mut self, ctx: ParseCtx, id: &Identifier) {
    self.visitor.use_type(&VariableUse {
      name: id.name.clone(),
      loc: id.loc,
      access: Access::Read,
      in_declare_context: ctx.in_declare,
    });
  }

  pub fn declare_property(&mut self, name: Option<&Identifier>, loc: Loc) {
    self.visitor.declare_property(name, loc);
  }

  /// Parses a whole module, closing with [`Visitor::end_of_module`].
  pub fn parse_module(&mut self) {
    let ctx = ParseCtx {
      in_declare: self.options.language.is_definition(),
      ..ParseCtx::default()
    };
    // The module scope is implicit: consumers open it before the first event.
    self.stmts_until(ctx, TT::EOF);
    // Flushes diagnostics attached to EOF, such as an unclosed trailing comment.
    self.consume();
    self.visitor.end_of_module();
  }
}
