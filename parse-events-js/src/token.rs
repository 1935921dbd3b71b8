use crate::loc::Loc;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use diagnostics_js::DiagKind;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // Special token used to represent the end of the source code. Easier than using and handling Option everywhere.
  EOF,
  // An unrecognised character or malformed literal. The lexer has already attached a diagnostic to the token.
  Invalid,
  // These are only used by lexer.
  CommentMultiline,
  CommentSingle,
  LineTerminator,
  LiteralNumberBin,
  LiteralNumberHex,
  LiteralNumberOct,
  Whitespace,

  At,
  Ampersand,
  AmpersandAmpersand,
  AmpersandAmpersandEquals,
  AmpersandEquals,
  Asterisk,
  AsteriskAsterisk,
  AsteriskAsteriskEquals,
  AsteriskEquals,
  Bar,
  BarBar,
  BarBarEquals,
  BarEquals,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  Caret,
  CaretEquals,
  ChevronLeft,
  ChevronLeftChevronLeft,
  ChevronLeftChevronLeftEquals,
  ChevronLeftEquals,
  ChevronLeftSlash,
  ChevronRight,
  ChevronRightChevronRight,
  ChevronRightChevronRightChevronRight,
  ChevronRightChevronRightChevronRightEquals,
  ChevronRightChevronRightEquals,
  ChevronRightEquals,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  EqualsEquals,
  EqualsEqualsEquals,
  Exclamation,
  ExclamationEquals,
  ExclamationEqualsEquals,
  Hyphen,
  HyphenEquals,
  HyphenHyphen,
  Identifier,
  JsxTextContent,
  KeywordAs,
  KeywordAsync,
  KeywordAwait,
  KeywordBreak,
  KeywordCase,
  KeywordCatch,
  KeywordClass,
  KeywordConst,
  KeywordConstructor,
  KeywordContinue,
  KeywordDebugger,
  KeywordDefault,
  KeywordDelete,
  KeywordDo,
  KeywordElse,
  KeywordEnum,
  KeywordExport,
  KeywordExtends,
  KeywordFinally,
  KeywordFor,
  KeywordFrom,
  KeywordFunction,
  KeywordGet,
  KeywordIf,
  KeywordImport,
  KeywordIn,
  KeywordInstanceof,
  KeywordLet,
  KeywordNew,
  KeywordOf,
  KeywordOut,
  KeywordReturn,
  KeywordSet,
  KeywordStatic,
  KeywordSuper,
  KeywordSwitch,
  KeywordThis,
  KeywordThrow,
  KeywordTry,
  KeywordTypeof,
  KeywordVar,
  KeywordVoid,
  KeywordWhile,
  KeywordWith,
  KeywordYield,
  // TypeScript keywords
  KeywordAbstract,
  KeywordAccessor,
  KeywordAny,
  KeywordAsserts,
  KeywordBigIntType,
  KeywordBooleanType,
  KeywordDeclare,
  KeywordGlobal,
  KeywordImplements,
  KeywordInfer,
  KeywordInterface,
  KeywordIs,
  KeywordKeyof,
  KeywordModule,
  KeywordNamespace,
  KeywordNever,
  KeywordNumberType,
  KeywordObjectType,
  KeywordOverride,
  KeywordPrivate,
  KeywordProtected,
  KeywordPublic,
  KeywordReadonly,
  KeywordSatisfies,
  KeywordStringType,
  KeywordSymbolType,
  KeywordType,
  KeywordUndefinedType,
  KeywordUnique,
  KeywordUnknown,
  LiteralBigInt,
  LiteralFalse,
  LiteralNull,
  LiteralNumber,
  LiteralRegex,
  LiteralString,
  // A template chunk ending in `${`.
  LiteralTemplatePartString,
  // A template chunk ending in a backtick.
  LiteralTemplatePartStringEnd,
  LiteralTrue,
  ParenthesisClose,
  ParenthesisOpen,
  Percent,
  PercentEquals,
  Plus,
  PlusEquals,
  PlusPlus,
  PrivateMember,
  Question,
  QuestionDot,
  QuestionDotBracketOpen,
  QuestionDotParenthesisOpen,
  QuestionQuestion,
  QuestionQuestionEquals,
  Semicolon,
  Slash,
  SlashEquals,
  Tilde,
}

pub static KEYWORDS_MAPPING: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, TT>::new();
  map.insert("abstract", TT::KeywordAbstract);
  map.insert("accessor", TT::KeywordAccessor);
  map.insert("any", TT::KeywordAny);
  map.insert("as", TT::KeywordAs);
  map.insert("asserts", TT::KeywordAsserts);
  map.insert("async", TT::KeywordAsync);
  map.insert("await", TT::KeywordAwait);
  map.insert("bigint", TT::KeywordBigIntType);
  map.insert("boolean", TT::KeywordBooleanType);
  map.insert("break", TT::KeywordBreak);
  map.insert("case", TT::KeywordCase);
  map.insert("catch", TT::KeywordCatch);
  map.insert("class", TT::KeywordClass);
  map.insert("const", TT::KeywordConst);
  map.insert("constructor", TT::KeywordConstructor);
  map.insert("continue", TT::KeywordContinue);
  map.insert("debugger", TT::KeywordDebugger);
  map.insert("declare", TT::KeywordDeclare);
  map.insert("default", TT::KeywordDefault);
  map.insert("delete", TT::KeywordDelete);
  map.insert("do", TT::KeywordDo);
  map.insert("else", TT::KeywordElse);
  map.insert("enum", TT::KeywordEnum);
  map.insert("export", TT::KeywordExport);
  map.insert("extends", TT::KeywordExtends);
  map.insert("false", TT::LiteralFalse);
  map.insert("finally", TT::KeywordFinally);
  map.insert("for", TT::KeywordFor);
  map.insert("from", TT::KeywordFrom);
  map.insert("function", TT::KeywordFunction);
  map.insert("get", TT::KeywordGet);
  map.insert("global", TT::KeywordGlobal);
  map.insert("if", TT::KeywordIf);
  map.insert("implements", TT::KeywordImplements);
  map.insert("import", TT::KeywordImport);
  map.insert("in", TT::KeywordIn);
  map.insert("infer", TT::KeywordInfer);
  map.insert("instanceof", TT::KeywordInstanceof);
  map.insert("interface", TT::KeywordInterface);
  map.insert("is", TT::KeywordIs);
  map.insert("keyof", TT::KeywordKeyof);
  map.insert("let", TT::KeywordLet);
  map.insert("module", TT::KeywordModule);
  map.insert("namespace", TT::KeywordNamespace);
  map.insert("never", TT::KeywordNever);
  map.insert("new", TT::KeywordNew);
  map.insert("null", TT::LiteralNull);
  map.insert("number", TT::KeywordNumberType);
  map.insert("object", TT::KeywordObjectType);
  map.insert("of", TT::KeywordOf);
  map.insert("out", TT::KeywordOut);
  map.insert("override", TT::KeywordOverride);
  map.insert("private", TT::KeywordPrivate);
  map.insert("protected", TT::KeywordProtected);
  map.insert("public", TT::KeywordPublic);
  map.insert("readonly", TT::KeywordReadonly);
  map.insert("return", TT::KeywordReturn);
  map.insert("satisfies", TT::KeywordSatisfies);
  map.insert("set", TT::KeywordSet);
  map.insert("static", TT::KeywordStatic);
  map.insert("string", TT::KeywordStringType);
  map.insert("super", TT::KeywordSuper);
  map.insert("switch", TT::KeywordSwitch);
  map.insert("symbol", TT::KeywordSymbolType);
  map.insert("this", TT::KeywordThis);
  map.insert("throw", TT::KeywordThrow);
  map.insert("true", TT::LiteralTrue);
  map.insert("try", TT::KeywordTry);
  map.insert("type", TT::KeywordType);
  map.insert("typeof", TT::KeywordTypeof);
  map.insert("undefined", TT::KeywordUndefinedType);
  map.insert("unique", TT::KeywordUnique);
  map.insert("unknown", TT::KeywordUnknown);
  map.insert("var", TT::KeywordVar);
  map.insert("void", TT::KeywordVoid);
  map.insert("while", TT::KeywordWhile);
  map.insert("with", TT::KeywordWith);
  map.insert("yield", TT::KeywordYield);
  map
});

// These can be used as parameter and variable names.
pub static UNRESERVED_KEYWORDS: Lazy<HashSet<TT>> = Lazy::new(|| {
  let mut set = HashSet::<TT>::new();
  set.insert(TT::KeywordAs);
  set.insert(TT::KeywordAsync);
  set.insert(TT::KeywordAwait);
  set.insert(TT::KeywordConstructor);
  set.insert(TT::KeywordFrom);
  set.insert(TT::KeywordGet);
  set.insert(TT::KeywordLet);
  set.insert(TT::KeywordOf);
  set.insert(TT::KeywordOut);
  set.insert(TT::KeywordSet);
  set.insert(TT::KeywordStatic);
  set.insert(TT::KeywordYield);
  // TypeScript contextual keywords
  set.insert(TT::KeywordAbstract);
  set.insert(TT::KeywordAccessor);
  set.insert(TT::KeywordAny);
  set.insert(TT::KeywordAsserts);
  set.insert(TT::KeywordBigIntType);
  set.insert(TT::KeywordBooleanType);
  set.insert(TT::KeywordDeclare);
  set.insert(TT::KeywordGlobal);
  set.insert(TT::KeywordImplements);
  set.insert(TT::KeywordInfer);
  set.insert(TT::KeywordInterface);
  set.insert(TT::KeywordIs);
  set.insert(TT::KeywordKeyof);
  set.insert(TT::KeywordModule);
  set.insert(TT::KeywordNamespace);
  set.insert(TT::KeywordNever);
  set.insert(TT::KeywordNumberType);
  set.insert(TT::KeywordObjectType);
  set.insert(TT::KeywordOverride);
  set.insert(TT::KeywordPrivate);
  set.insert(TT::KeywordProtected);
  set.insert(TT::KeywordPublic);
  set.insert(TT::KeywordReadonly);
  set.insert(TT::KeywordSatisfies);
  set.insert(TT::KeywordStringType);
  set.insert(TT::KeywordSymbolType);
  set.insert(TT::KeywordType);
  set.insert(TT::KeywordUndefinedType);
  set.insert(TT::KeywordUnique);
  set.insert(TT::KeywordUnknown);
  set
});

impl TT {
  /// Whether a token of this type can name a binding or be referenced as a variable.
  pub fn is_identifier_like(self) -> bool {
    self == TT::Identifier || UNRESERVED_KEYWORDS.contains(&self)
  }

  /// Whether this token can be used as a property name after `.` or in an object literal key.
  pub fn is_identifier_name(self) -> bool {
    // Keyword variants are declared contiguously.
    self == TT::Identifier
      || (TT::KeywordAs..=TT::KeywordUnknown).contains(&self)
      || matches!(self, TT::LiteralFalse | TT::LiteralNull | TT::LiteralTrue)
  }
}

/// A problem found while lexing a token. The parser reports it the first time the token is consumed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LexDiag {
  pub kind: DiagKind,
  pub loc: Loc,
}

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  // Whether one or more whitespace characters appear immediately before this token, and at least
  // one of those whitespace characters is a line terminator.
  pub preceded_by_line_terminator: bool,
  pub typ: TT,
  // Whether the token's spelling contains Unicode escapes; its text must then be decoded.
  pub escaped: bool,
  pub diags: Vec<LexDiag>,
}
