use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::is_line_terminator;
use crate::char::CharFilter;
use crate::char::DIGIT;
use crate::char::DIGIT_BIN;
use crate::char::DIGIT_HEX;
use crate::char::DIGIT_OCT;
use crate::char::ID_CONTINUE_ASCII;
use crate::char::ID_CONTINUE_JSX_ASCII;
use crate::loc::Loc;
use crate::token::LexDiag;
use crate::token::Token;
use crate::token::KEYWORDS_MAPPING;
use crate::token::TT;
use crate::token::UNRESERVED_KEYWORDS;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use diagnostics_js::DiagKind;
use memchr::memchr2;
use memchr::memchr3;
use once_cell::sync::Lazy;
use std::borrow::Cow;

#[cfg(test)]
mod tests;

/// The lexical context a token is read under. The parser picks the mode; a token buffered under one
/// mode is re-lexed if later requested under another.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  JsxTag,
  JsxTextContent,
  SlashIsRegex,
  Standard,
  TemplateStrContinue,
}

#[derive(Copy, Clone)]
pub struct LexerCheckpoint {
  next: usize,
}

// Contains the match length.
#[derive(Copy, Clone)]
struct Match(usize);

impl Match {
  pub fn len(&self) -> usize {
    self.0
  }

  pub fn prefix(&self, n: usize) -> Match {
    debug_assert!(n <= self.len());
    Match(n)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

struct PatternMatcher {
  patterns: Vec<TT>,
  matcher: AhoCorasick,
}

impl PatternMatcher {
  pub fn new<D: AsRef<str>>(patterns: Vec<(TT, D)>) -> Self {
    let (tts, syns): (Vec<_>, Vec<_>) = patterns.into_iter().unzip();
    let byte_syns: Vec<Vec<u8>> = syns.iter().map(|s| s.as_ref().as_bytes().to_vec()).collect();
    let matcher = AhoCorasickBuilder::new()
      .start_kind(StartKind::Anchored)
      .kind(Some(AhoCorasickKind::DFA))
      .match_kind(MatchKind::LeftmostLongest)
      .build(byte_syns)
      .expect("static token patterns must build");
    PatternMatcher {
      patterns: tts,
      matcher,
    }
  }

  pub fn find(&self, lexer: &Lexer) -> Option<(TT, Match)> {
    self
      .matcher
      .find(Input::new(&lexer.source[lexer.next..]).anchored(Anchored::Yes))
      .map(|m| (self.patterns[m.pattern().as_usize()], Match(m.end())))
  }
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
  diags: Vec<LexDiag>,
}

impl<'a> Lexer<'a> {
  pub fn new(code: &'a str) -> Lexer<'a> {
    Lexer {
      source: code,
      next: 0,
      diags: Vec::new(),
    }
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  pub fn next(&self) -> usize {
    self.next
  }

  fn end(&self) -> usize {
    self.source.len()
  }

  fn remaining(&self) -> usize {
    self.end() - self.next
  }

  fn eof_range(&self) -> Loc {
    Loc(self.end(), self.end())
  }

  fn at_end(&self) -> bool {
    self.next >= self.end()
  }

  fn peek_or_eof(&self, n: usize) -> Option<char> {
    self.source[self.next..].chars().nth(n)
  }

  /// WARNING: Prefer checkpoints instead. Only use this if you know what you're doing.
  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  pub fn checkpoint(&self) -> LexerCheckpoint {
    LexerCheckpoint { next: self.next }
  }

  pub fn since_checkpoint(&self, checkpoint: LexerCheckpoint) -> Loc {
    Loc(checkpoint.next, self.next)
  }

  fn if_char(&self, c: char) -> Match {
    match self.source[self.next..].chars().next() {
      Some(first) if first == c => Match(c.len_utf8()),
      _ => Match(0),
    }
  }

  fn while_not_2_chars(&self, a: u8, b: u8) -> Match {
    Match(memchr2(a, b, self.source[self.next..].as_bytes()).unwrap_or(self.remaining()))
  }

  fn while_not_3_chars(&self, a: u8, b: u8, c: u8) -> Match {
    Match(memchr3(a, b, c, self.source[self.next..].as_bytes()).unwrap_or(self.remaining()))
  }

  fn while_chars(&self, chars: &CharFilter) -> Match {
    let mut len = 0;
    for ch in self.source[self.next..].chars() {
      if chars.has(ch) {
        len += ch.len_utf8();
      } else {
        break;
      }
    }
    Match(len)
  }

  fn consume(&mut self, m: Match) -> Match {
    self.next += m.len();
    m
  }

  fn skip_expect(&mut self, n: usize) {
    debug_assert!(self.next + n <= self.end());
    self.next = (self.next + n).min(self.end());
  }

  fn skip_char(&mut self) -> Option<char> {
    let c = self.peek_or_eof(0)?;
    self.next += c.len_utf8();
    Some(c)
  }

  fn report(&mut self, kind: DiagKind, loc: Loc) {
    self.diags.push(LexDiag { kind, loc });
  }

  fn drive(&mut self, preceded_by_line_terminator: bool, f: impl FnOnce(&mut Self) -> (TT, bool)) -> Token {
    let cp = self.checkpoint();
    let (typ, escaped) = f(self);
    Token {
      loc: self.since_checkpoint(cp),
      typ,
      preceded_by_line_terminator,
      escaped,
      diags: std::mem::take(&mut self.diags),
    }
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}

#[rustfmt::skip]
pub static OPERATORS_MAPPING: &[(TT, &str)] = &[
  (TT::Ampersand, "&"),
  (TT::AmpersandAmpersand, "&&"),
  (TT::AmpersandAmpersandEquals, "&&="),
  (TT::AmpersandEquals, "&="),
  (TT::Asterisk, "*"),
  (TT::AsteriskAsterisk, "**"),
  (TT::AsteriskAsteriskEquals, "**="),
  (TT::AsteriskEquals, "*="),
  (TT::At, "@"),
  (TT::Bar, "|"),
  (TT::BarBar, "||"),
  (TT::BarBarEquals, "||="),
  (TT::BarEquals, "|="),
  (TT::BraceClose, "}"),
  (TT::BraceOpen, "{"),
  (TT::BracketClose, "]"),
  (TT::BracketOpen, "["),
  (TT::Caret, "^"),
  (TT::CaretEquals, "^="),
  (TT::ChevronLeft, "<"),
  (TT::ChevronLeftChevronLeft, "<<"),
  (TT::ChevronLeftChevronLeftEquals, "<<="),
  (TT::ChevronLeftEquals, "<="),
  (TT::ChevronRight, ">"),
  (TT::ChevronRightChevronRight, ">>"),
  (TT::ChevronRightChevronRightChevronRight, ">>>"),
  (TT::ChevronRightChevronRightChevronRightEquals, ">>>="),
  (TT::ChevronRightChevronRightEquals, ">>="),
  (TT::ChevronRightEquals, ">="),
  (TT::Colon, ":"),
  (TT::Comma, ","),
  (TT::Dot, "."),
  (TT::DotDotDot, "..."),
  (TT::Equals, "="),
  (TT::EqualsChevronRight, "=>"),
  (TT::EqualsEquals, "=="),
  (TT::EqualsEqualsEquals, "==="),
  (TT::Exclamation, "!"),
  (TT::ExclamationEquals, "!="),
  (TT::ExclamationEqualsEquals, "!=="),
  (TT::Hyphen, "-"),
  (TT::HyphenEquals, "-="),
  (TT::HyphenHyphen, "--"),
  (TT::ParenthesisClose, ")"),
  (TT::ParenthesisOpen, "("),
  (TT::Percent, "%"),
  (TT::PercentEquals, "%="),
  (TT::Plus, "+"),
  (TT::PlusEquals, "+="),
  (TT::PlusPlus, "++"),
  (TT::PrivateMember, "#"),
  (TT::Question, "?"),
  (TT::QuestionDot, "?."),
  (TT::QuestionDotBracketOpen, "?.["),
  (TT::QuestionDotParenthesisOpen, "?.("),
  (TT::QuestionQuestion, "??"),
  (TT::QuestionQuestionEquals, "??="),
  (TT::Semicolon, ";"),
  (TT::Slash, "/"),
  (TT::SlashEquals, "/="),
  (TT::Tilde, "~"),
];

static SIG: Lazy<PatternMatcher> = Lazy::new(|| {
  let mut patterns: Vec<(TT, String)> = Vec::new();
  for &(k, v) in OPERATORS_MAPPING.iter() {
    patterns.push((k, v.into()));
  }
  for c in '0'..='9' {
    patterns.push((TT::LiteralNumber, c.to_string()));
  }
  patterns.push((TT::LiteralNumberBin, "0b".into()));
  patterns.push((TT::LiteralNumberBin, "0B".into()));
  patterns.push((TT::LiteralNumberHex, "0x".into()));
  patterns.push((TT::LiteralNumberHex, "0X".into()));
  patterns.push((TT::LiteralNumberOct, "0o".into()));
  patterns.push((TT::LiteralNumberOct, "0O".into()));
  // Prevent `.` immediately followed by a digit from being recognised as the `.` operator.
  for digit in '0'..='9' {
    patterns.push((TT::LiteralNumber, format!(".{}", digit)));
  }
  // Prevent `?` immediately followed by a decimal number from being recognised as the `?.` operator.
  for digit in '0'..='9' {
    patterns.push((TT::Question, format!("?.{}", digit)));
  }
  patterns.push((TT::ChevronLeftSlash, "</".into()));
  patterns.push((TT::LiteralString, "\"".into()));
  patterns.push((TT::LiteralString, "'".into()));
  patterns.push((TT::LiteralTemplatePartString, "`".into()));
  PatternMatcher::new(patterns)
});

static INSIG: Lazy<PatternMatcher> = Lazy::new(|| {
  PatternMatcher::new::<&str>(vec![
    (TT::LineTerminator, "\r"),
    (TT::LineTerminator, "\n"),
    (TT::LineTerminator, "\u{2028}"),
    (TT::LineTerminator, "\u{2029}"),
    (TT::Whitespace, "\x09"),
    (TT::Whitespace, "\x0b"),
    (TT::Whitespace, "\x0c"),
    (TT::Whitespace, "\x20"),
    (TT::Whitespace, "\u{00A0}"),
    (TT::Whitespace, "\u{1680}"),
    (TT::Whitespace, "\u{2000}"),
    (TT::Whitespace, "\u{2001}"),
    (TT::Whitespace, "\u{2002}"),
    (TT::Whitespace, "\u{2003}"),
    (TT::Whitespace, "\u{2004}"),
    (TT::Whitespace, "\u{2005}"),
    (TT::Whitespace, "\u{2006}"),
    (TT::Whitespace, "\u{2007}"),
    (TT::Whitespace, "\u{2008}"),
    (TT::Whitespace, "\u{2009}"),
    (TT::Whitespace, "\u{200A}"),
    (TT::Whitespace, "\u{202F}"),
    (TT::Whitespace, "\u{205F}"),
    (TT::Whitespace, "\u{3000}"),
    (TT::Whitespace, "\u{FEFF}"),
    (TT::CommentMultiline, "/*"),
    (TT::CommentSingle, "//"),
    (TT::CommentSingle, "<!--"),
    (TT::CommentSingle, "-->"),
  ])
});

/// Returns whether the comment includes a line terminator.
fn lex_multiline_comment(lexer: &mut Lexer<'_>) -> bool {
  let start = lexer.next();
  // Consume `/*`.
  lexer.skip_expect(2);
  let body = &lexer.source[lexer.next..];
  match body.find("*/") {
    Some(end) => {
      let contains_newline = body[..end].chars().any(is_line_terminator);
      lexer.skip_expect(end + 2);
      contains_newline
    }
    None => {
      let contains_newline = body.chars().any(is_line_terminator);
      lexer.report(DiagKind::UnclosedBlockComment, Loc(start, start + 2));
      lexer.skip_expect(body.len());
      contains_newline
    }
  }
}

fn lex_single_comment(lexer: &mut Lexer<'_>, prefix: Match) {
  // Consume the comment prefix (//, <!--, or -->).
  lexer.skip_expect(prefix.len());
  let rest = &lexer.source[lexer.next..];
  let len = rest.find(is_line_terminator).unwrap_or(rest.len());
  lexer.skip_expect(len);
}

/// Consumes `\uXXXX` or `\u{X…}` and returns the decoded character, or None if malformed.
fn lex_unicode_escape(lexer: &mut Lexer<'_>) -> Option<char> {
  // We're at '\', consume it
  lexer.skip_expect(1);
  if lexer.peek_or_eof(0) != Some('u') {
    return None;
  }
  lexer.skip_expect(1);
  let digits = if lexer.peek_or_eof(0) == Some('{') {
    lexer.skip_expect(1);
    let m = lexer.while_chars(&DIGIT_HEX);
    let start = lexer.next();
    lexer.consume(m);
    let digits = &lexer.source[start..lexer.next()];
    if lexer.peek_or_eof(0) != Some('}') {
      return None;
    }
    lexer.skip_expect(1);
    digits
  } else {
    let start = lexer.next();
    for _ in 0..4 {
      match lexer.peek_or_eof(0) {
        Some(c) if c.is_ascii_hexdigit() => lexer.skip_expect(1),
        _ => return None,
      }
    }
    &lexer.source[start..lexer.next()]
  };
  u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

/// Decodes the Unicode escapes in an identifier's spelling. Malformed escapes are dropped.
pub fn decode_identifier(raw: &str) -> Cow<'_, str> {
  if !raw.contains('\\') {
    return Cow::Borrowed(raw);
  }
  let mut lexer = Lexer::new(raw);
  let mut out = String::with_capacity(raw.len());
  while let Some(c) = lexer.peek_or_eof(0) {
    if c == '\\' {
      if let Some(decoded) = lex_unicode_escape(&mut lexer) {
        out.push(decoded);
      }
    } else {
      out.push(c);
      lexer.skip_expect(c.len_utf8());
    }
  }
  Cow::Owned(out)
}

/// Returns the token type and whether the spelling contained escapes.
fn lex_identifier(lexer: &mut Lexer<'_>, mode: LexMode) -> (TT, bool) {
  let start = lexer.next();
  let mut escaped = false;
  loop {
    lexer.consume(lexer.while_chars(if mode == LexMode::JsxTag {
      &ID_CONTINUE_JSX_ASCII
    } else {
      &ID_CONTINUE_ASCII
    }));
    match lexer.peek_or_eof(0) {
      Some('\\') => {
        let escape_start = lexer.next();
        escaped = true;
        if lex_unicode_escape(lexer).is_none() {
          lexer.report(DiagKind::InvalidUnicodeEscapeSequence, Loc(escape_start, lexer.next()));
        }
      }
      Some(c) if !c.is_ascii() && is_id_continue(c) => {
        lexer.skip_expect(c.len_utf8());
      }
      _ => break,
    }
  }
  let raw = &lexer.source[start..lexer.next()];
  if !escaped {
    return (KEYWORDS_MAPPING.get(raw).copied().unwrap_or(TT::Identifier), false);
  }
  let decoded = decode_identifier(raw);
  match KEYWORDS_MAPPING.get(decoded.as_ref()).copied() {
    // Escaped contextual keywords are ordinary identifiers. Escaped reserved words never act as
    // keywords either; they are reported once and then read as the name they spell.
    Some(tt) if UNRESERVED_KEYWORDS.contains(&tt) => (TT::Identifier, true),
    Some(_) => {
      lexer.report(DiagKind::KeywordsCannotContainEscapeSequences, Loc(start, lexer.next()));
      (TT::Identifier, true)
    }
    None => (TT::Identifier, true),
  }
}

fn lex_number(lexer: &mut Lexer<'_>) -> TT {
  let start = lexer.next();
  let first_char = lexer.peek_or_eof(0);
  lexer.consume(lexer.while_chars(&DIGIT));
  if !lexer.consume(lexer.if_char('n')).is_empty() {
    return TT::LiteralBigInt;
  }
  let integer_part = &lexer.source[start..lexer.next()];
  let is_legacy_octal = first_char == Some('0')
    && integer_part.len() > 1
    && integer_part.chars().all(|c| matches!(c, '0'..='7'));
  let mut has_decimal = false;
  if lexer.peek_or_eof(0) == Some('.') && !is_legacy_octal {
    has_decimal = true;
    lexer.skip_expect(1);
    lexer.consume(lexer.while_chars(&DIGIT));
  }
  if matches!(lexer.peek_or_eof(0), Some('e' | 'E')) {
    has_decimal = true;
    lexer.skip_expect(1);
    if matches!(lexer.peek_or_eof(0), Some('+' | '-')) {
      lexer.skip_expect(1);
    }
    lexer.consume(lexer.while_chars(&DIGIT));
  }
  if has_decimal && !lexer.consume(lexer.if_char('n')).is_empty() {
    lexer.report(DiagKind::BigIntLiteralContainsDecimalPoint, Loc(start, lexer.next()));
    return TT::LiteralBigInt;
  }
  TT::LiteralNumber
}

fn lex_radix_number(lexer: &mut Lexer<'_>, digits: &CharFilter) -> TT {
  lexer.skip_expect(2);
  lexer.consume(lexer.while_chars(digits));
  if !lexer.consume(lexer.if_char('n')).is_empty() {
    return TT::LiteralBigInt;
  }
  TT::LiteralNumber
}

fn lex_private_member(lexer: &mut Lexer<'_>) -> TT {
  let start = lexer.next();
  // Include the `#` in the token.
  lexer.skip_expect(1);
  match lexer.peek_or_eof(0) {
    Some(c) if is_id_start(c) || c == '\\' => {
      lex_identifier(lexer, LexMode::Standard);
      TT::PrivateMember
    }
    _ => {
      lexer.report(DiagKind::InvalidCharacter, Loc(start, start + 1));
      TT::Invalid
    }
  }
}

fn lex_regex(lexer: &mut Lexer<'_>) -> TT {
  let start = lexer.next();
  // Consume slash.
  lexer.skip_expect(1);
  let mut in_charset = false;
  loop {
    let Some(c) = lexer.peek_or_eof(0) else {
      lexer.report(DiagKind::UnclosedRegexp, Loc(start, lexer.next()));
      return TT::LiteralRegex;
    };
    if is_line_terminator(c) {
      lexer.report(DiagKind::UnclosedRegexp, Loc(start, lexer.next()));
      return TT::LiteralRegex;
    }
    lexer.skip_expect(c.len_utf8());
    match c {
      '\\' => {
        // Cannot escape line terminator.
        if let Some(escaped) = lexer.peek_or_eof(0).filter(|&e| !is_line_terminator(e)) {
          lexer.skip_expect(escaped.len_utf8());
        }
      }
      '/' if !in_charset => break,
      '[' => in_charset = true,
      ']' if in_charset => in_charset = false,
      _ => {}
    };
  }
  // Flags.
  lexer.consume(lexer.while_chars(&ID_CONTINUE_ASCII));
  TT::LiteralRegex
}

fn lex_string(lexer: &mut Lexer<'_>) -> TT {
  let start = lexer.next();
  let quote = lexer.source.as_bytes()[start];
  lexer.skip_expect(1);
  loop {
    lexer.consume(lexer.while_not_3_chars(b'\\', b'\n', quote));
    match lexer.peek_or_eof(0) {
      Some('\\') => {
        lexer.skip_expect(1);
        // Escaped characters include line continuations.
        match lexer.skip_char() {
          Some('\r') => {
            lexer.consume(lexer.if_char('\n'));
          }
          Some(_) => {}
          None => {
            lexer.report(DiagKind::UnclosedStringLiteral, Loc(start, lexer.next()));
            break;
          }
        }
      }
      Some(c) if c as u32 == quote as u32 => {
        lexer.skip_expect(1);
        break;
      }
      // A bare newline or end of input ends the literal.
      _ => {
        let mut end = lexer.next();
        // Don't include a trailing `\r` from a CRLF in the literal.
        if lexer.source.as_bytes().get(end.wrapping_sub(1)) == Some(&b'\r') && end > start + 1 {
          end -= 1;
          lexer.set_next(end);
        }
        lexer.report(DiagKind::UnclosedStringLiteral, Loc(start, end));
        break;
      }
    };
  }
  TT::LiteralString
}

// JSX attribute strings have no escapes and may span lines.
fn lex_jsx_string(lexer: &mut Lexer<'_>) -> TT {
  let start = lexer.next();
  let quote = lexer.source.as_bytes()[start];
  lexer.skip_expect(1);
  match memchr::memchr(quote, lexer.source[lexer.next..].as_bytes()) {
    Some(pos) => lexer.skip_expect(pos + 1),
    None => {
      lexer.report(DiagKind::UnclosedStringLiteral, Loc(start, lexer.end()));
      lexer.set_next(lexer.end());
    }
  };
  TT::LiteralString
}

/// Ends with `${` or backtick.
pub fn lex_template_string_continue(lexer: &mut Lexer<'_>, start: usize) -> TT {
  loop {
    lexer.consume(lexer.while_not_3_chars(b'\\', b'`', b'$'));
    match lexer.peek_or_eof(0) {
      Some('\\') => {
        lexer.skip_expect(1);
        lexer.skip_char();
      }
      Some('`') => {
        lexer.skip_expect(1);
        return TT::LiteralTemplatePartStringEnd;
      }
      Some('$') => {
        if lexer.peek_or_eof(1) == Some('{') {
          lexer.skip_expect(2);
          return TT::LiteralTemplatePartString;
        }
        lexer.skip_expect(1);
      }
      _ => {
        lexer.report(DiagKind::UnclosedTemplate, Loc(start, start + 1));
        return TT::LiteralTemplatePartStringEnd;
      }
    };
  }
}

fn lex_template(lexer: &mut Lexer<'_>) -> TT {
  let start = lexer.next();
  // Consume backtick.
  lexer.skip_expect(1);
  lex_template_string_continue(lexer, start)
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> Token {
  if mode == LexMode::JsxTextContent {
    return lexer.drive(false, |lexer| {
      lexer.consume(lexer.while_not_2_chars(b'{', b'<'));
      (TT::JsxTextContent, false)
    });
  };

  if mode == LexMode::TemplateStrContinue {
    return lexer.drive(false, |lexer| {
      let start = lexer.next();
      (lex_template_string_continue(lexer, start), false)
    });
  };

  // Skip whitespace and comments before the next significant token.
  let mut at_line_start = lexer.next() == 0;
  let mut preceded_by_line_terminator = false;
  if lexer.next() == 0 && lexer.source.starts_with("#!") {
    lex_single_comment(lexer, Match(2));
  }
  while let Some((tt, mat)) = INSIG.find(lexer) {
    // `-->` is only a comment at the start of a line.
    if tt == TT::CommentSingle && mat.len() == 3 && !at_line_start {
      break;
    }
    match tt {
      TT::LineTerminator => {
        lexer.consume(mat);
        at_line_start = true;
        preceded_by_line_terminator = true;
      }
      TT::Whitespace => {
        lexer.consume(mat);
      }
      TT::CommentMultiline => {
        let comment_has_line_terminator = lex_multiline_comment(lexer);
        if comment_has_line_terminator {
          at_line_start = true;
        }
        preceded_by_line_terminator |= comment_has_line_terminator;
      }
      TT::CommentSingle => {
        lex_single_comment(lexer, mat);
      }
      _ => unreachable!(),
    };
  }

  if lexer.at_end() {
    return Token {
      loc: lexer.eof_range(),
      typ: TT::EOF,
      preceded_by_line_terminator,
      escaped: false,
      diags: std::mem::take(&mut lexer.diags),
    };
  };

  lexer.drive(preceded_by_line_terminator, |lexer| {
    let c = lexer.peek_or_eof(0).unwrap_or('\0');
    if is_id_start(c) || c == '\\' {
      return lex_identifier(lexer, mode);
    }
    if mode == LexMode::JsxTag && (c == '"' || c == '\'') {
      return (lex_jsx_string(lexer), false);
    }
    let typ = match SIG.find(lexer) {
      Some((TT::LiteralNumber, _)) => lex_number(lexer),
      Some((TT::LiteralNumberBin, _)) => lex_radix_number(lexer, &DIGIT_BIN),
      Some((TT::LiteralNumberHex, _)) => lex_radix_number(lexer, &DIGIT_HEX),
      Some((TT::LiteralNumberOct, _)) => lex_radix_number(lexer, &DIGIT_OCT),
      Some((TT::LiteralString, _)) => lex_string(lexer),
      Some((TT::LiteralTemplatePartString, _)) => lex_template(lexer),
      Some((TT::PrivateMember, _)) => lex_private_member(lexer),
      Some((TT::Slash | TT::SlashEquals, _)) if mode == LexMode::SlashIsRegex => lex_regex(lexer),
      Some((mut typ, mut mat)) => {
        if typ == TT::Question && mat.len() != 1 {
          // We've matched `?.[0-9]`.
          mat = mat.prefix(1);
        };
        // `>` always closes a JSX tag on its own, e.g. `<a>=</a>`.
        if mode == LexMode::JsxTag && c == '>' {
          typ = TT::ChevronRight;
          mat = mat.prefix(1);
        };
        lexer.consume(mat);
        typ
      }
      None => {
        let start = lexer.next();
        lexer.skip_char();
        lexer.report(DiagKind::InvalidCharacter, Loc(start, lexer.next()));
        TT::Invalid
      }
    };
    (typ, false)
  })
}
