use crate::lex::decode_identifier;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::TT;
use crate::token::TT::*;
use diagnostics_js::DiagKind;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(t.typ, expected, "in {:?}", code);
  }
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(EOF, t.typ);
}

fn diags_of(code: &str, mode: LexMode) -> Vec<(DiagKind, Loc)> {
  let mut lexer = Lexer::new(code);
  let mut out = Vec::new();
  loop {
    let t = lex_next(&mut lexer, mode);
    out.extend(t.diags.iter().map(|d| (d.kind, d.loc)));
    if t.typ == EOF {
      break;
    }
  }
  out
}

#[test]
fn test_lex_keywords() {
  check("class", [KeywordClass]);
  check("instanceof", [KeywordInstanceof]);
  check("interface", [KeywordInterface]);
  check("undefined", [KeywordUndefinedType]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("$_a b_", [Identifier, Identifier]);
  check("café", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check("929", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check(". 929", [Dot, LiteralNumber]);
  check(". 929.2.", [Dot, LiteralNumber, Dot]);
  check(".929.2..", [LiteralNumber, LiteralNumber, Dot, Dot]);
  check("?.929", [Question, LiteralNumber]);
  check("?..929", [QuestionDot, LiteralNumber]);
  check("1e10 1_000", [LiteralNumber, LiteralNumber]);
}

#[test]
fn test_lex_literal_bigints() {
  check("1n", [LiteralBigInt]);
  check("0x800faceb00cn", [LiteralBigInt]);
  check("0b110101010n", [LiteralBigInt]);
  check("0o12077n", [LiteralBigInt]);
}

#[test]
fn test_bigint_with_decimal_point_is_reported() {
  let mut lexer = Lexer::new("1.5n");
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, LiteralBigInt);
  assert_eq!(t.diags[0].kind, DiagKind::BigIntLiteralContainsDecimalPoint);
  assert_eq!(t.diags[0].loc, Loc(0, 4));
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check("\"a\\\"b\"", [LiteralString]);
  check("'line\\\ncontinued'", [LiteralString]);
}

#[test]
fn test_unclosed_string_stops_at_newline() {
  let mut lexer = Lexer::new("'hello\nworld");
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, LiteralString);
  assert_eq!(t.loc, Loc(0, 6));
  assert_eq!(t.diags[0].kind, DiagKind::UnclosedStringLiteral);
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, Identifier);
  assert!(t.preceded_by_line_terminator);
}

#[test]
fn test_lex_import_statement() {
  check("import * as a from \"./a\";", [
    KeywordImport,
    Asterisk,
    KeywordAs,
    Identifier,
    KeywordFrom,
    LiteralString,
    Semicolon,
  ]);
}

#[test]
fn test_lex_operators_longest_match() {
  check("a >>>= b", [
    Identifier,
    ChevronRightChevronRightChevronRightEquals,
    Identifier,
  ]);
  check("a?.[0] ?? b", [
    Identifier,
    QuestionDotBracketOpen,
    LiteralNumber,
    BracketClose,
    QuestionQuestion,
    Identifier,
  ]);
  check("x => x", [Identifier, EqualsChevronRight, Identifier]);
}

#[test]
fn test_comments_and_line_terminators() {
  let mut lexer = Lexer::new("a /* x\n */ b // c\nd\u{2028}e");
  let a = lex_next(&mut lexer, LexMode::Standard);
  assert!(!a.preceded_by_line_terminator);
  let b = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(b.typ, Identifier);
  assert!(b.preceded_by_line_terminator);
  let d = lex_next(&mut lexer, LexMode::Standard);
  assert!(d.preceded_by_line_terminator);
  let e = lex_next(&mut lexer, LexMode::Standard);
  assert!(e.preceded_by_line_terminator);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, EOF);
}

#[test]
fn test_shebang_is_skipped() {
  check("#!/usr/bin/env node\nfoo", [Identifier]);
}

#[test]
fn test_unclosed_block_comment() {
  assert_eq!(diags_of("a /* never closed", LexMode::Standard), vec![(
    DiagKind::UnclosedBlockComment,
    Loc(2, 4)
  )]);
}

#[test]
fn test_invalid_character_recovers() {
  let mut lexer = Lexer::new("a ¤ b");
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
  let bad = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(bad.typ, Invalid);
  assert_eq!(bad.diags[0].kind, DiagKind::InvalidCharacter);
  assert_eq!(bad.loc, Loc(2, 4));
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
}

#[test]
fn test_slash_depends_on_mode() {
  let mut lexer = Lexer::new("/ab+c/gi");
  assert_eq!(lex_next(&mut lexer, LexMode::SlashIsRegex).typ, LiteralRegex);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, EOF);

  let mut lexer = Lexer::new("/[/]/");
  let t = lex_next(&mut lexer, LexMode::SlashIsRegex);
  assert_eq!((t.typ, t.loc), (LiteralRegex, Loc(0, 5)));

  check("a / b", [Identifier, Slash, Identifier]);
}

#[test]
fn test_unclosed_regexp() {
  assert_eq!(diags_of("/abc\n", LexMode::SlashIsRegex), vec![(
    DiagKind::UnclosedRegexp,
    Loc(0, 4)
  )]);
}

#[test]
fn test_templates() {
  let mut lexer = Lexer::new("`a${b}c`");
  let head = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!((head.typ, head.loc), (LiteralTemplatePartString, Loc(0, 4)));
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, BraceClose);
  let tail = lex_next(&mut lexer, LexMode::TemplateStrContinue);
  assert_eq!((tail.typ, tail.loc), (LiteralTemplatePartStringEnd, Loc(6, 8)));
}

#[test]
fn test_unclosed_template() {
  assert_eq!(diags_of("`abc", LexMode::Standard), vec![(
    DiagKind::UnclosedTemplate,
    Loc(0, 1)
  )]);
}

#[test]
fn test_escaped_identifiers() {
  let mut lexer = Lexer::new("\\u0061b");
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, Identifier);
  assert!(t.escaped);
  assert!(t.diags.is_empty());
  assert_eq!(decode_identifier(&lexer[t.loc]), "ab");
  assert_eq!(decode_identifier("\\u{63}d"), "cd");
}

#[test]
fn test_escaped_reserved_keyword_is_reported() {
  let mut lexer = Lexer::new("\\u0069f");
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, Identifier);
  assert!(t.escaped);
  assert_eq!(t.diags[0].kind, DiagKind::KeywordsCannotContainEscapeSequences);

  // Contextual keywords stay plain identifiers.
  let mut lexer = Lexer::new("\\u006cet");
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, Identifier);
  assert!(t.diags.is_empty());
}

#[test]
fn test_invalid_unicode_escape() {
  assert_eq!(diags_of("a\\u00zz", LexMode::Standard)[0].0, DiagKind::InvalidUnicodeEscapeSequence);
}

#[test]
fn test_jsx_modes() {
  let mut lexer = Lexer::new("data-x='a\nb'>text {");
  let name = lex_next(&mut lexer, LexMode::JsxTag);
  assert_eq!((name.typ, name.loc), (Identifier, Loc(0, 6)));
  assert_eq!(lex_next(&mut lexer, LexMode::JsxTag).typ, Equals);
  let value = lex_next(&mut lexer, LexMode::JsxTag);
  assert_eq!((value.typ, value.loc), (LiteralString, Loc(7, 12)));
  assert_eq!(lex_next(&mut lexer, LexMode::JsxTag).typ, ChevronRight);
  let text = lex_next(&mut lexer, LexMode::JsxTextContent);
  assert_eq!((text.typ, text.loc), (JsxTextContent, Loc(13, 18)));
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, BraceOpen);
}

#[test]
fn test_jsx_tag_close_does_not_merge() {
  let mut lexer = Lexer::new(">=");
  assert_eq!(lex_next(&mut lexer, LexMode::JsxTag).typ, ChevronRight);
}
