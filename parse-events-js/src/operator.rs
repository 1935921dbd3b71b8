use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalOr,
  MemberAccess,
  Multiplication,
  NullishCoalescing,
  OptionalChainingCall,
  OptionalChainingComputedMemberAccess,
  OptionalChainingMemberAccess,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  // TypeScript `as` and `satisfies`.
  TypeAssertion,
  // Unary.
  Await,
  BitwiseNot,
  Delete,
  LogicalNot,
  New,
  PrefixDecrement,
  PrefixIncrement,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentExponentiation
        | OperatorName::AssignmentLogicalAnd
        | OperatorName::AssignmentLogicalOr
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentNullishCoalescing
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Clone, Copy, Debug)]
pub struct Operator {
  pub name: OperatorName,
  pub associativity: Associativity,
  pub precedence: u8,
}

pub const PRECEDENCE_COMMA: u8 = 1;
pub const PRECEDENCE_ASSIGNMENT: u8 = 2;
pub const PRECEDENCE_UNARY: u8 = 15;
pub const PRECEDENCE_MEMBER: u8 = 18;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let table: &[(OperatorName, Associativity, u8)] = &[
    (Comma, Left, PRECEDENCE_COMMA),
    (Assignment, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentAddition, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentBitwiseAnd, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentBitwiseLeftShift, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentBitwiseOr, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentBitwiseRightShift, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentBitwiseUnsignedRightShift, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentBitwiseXor, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentDivision, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentExponentiation, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentLogicalAnd, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentLogicalOr, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentMultiplication, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentNullishCoalescing, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentRemainder, Right, PRECEDENCE_ASSIGNMENT),
    (AssignmentSubtraction, Right, PRECEDENCE_ASSIGNMENT),
    (Yield, Right, PRECEDENCE_ASSIGNMENT),
    (Conditional, Right, 3),
    (NullishCoalescing, Left, 4),
    (LogicalOr, Left, 4),
    (LogicalAnd, Left, 5),
    (BitwiseOr, Left, 6),
    (BitwiseXor, Left, 7),
    (BitwiseAnd, Left, 8),
    (Equality, Left, 9),
    (Inequality, Left, 9),
    (StrictEquality, Left, 9),
    (StrictInequality, Left, 9),
    (GreaterThan, Left, 10),
    (GreaterThanOrEqual, Left, 10),
    (In, Left, 10),
    (Instanceof, Left, 10),
    (LessThan, Left, 10),
    (LessThanOrEqual, Left, 10),
    (TypeAssertion, Left, 10),
    (BitwiseLeftShift, Left, 11),
    (BitwiseRightShift, Left, 11),
    (BitwiseUnsignedRightShift, Left, 11),
    (Addition, Left, 12),
    (Subtraction, Left, 12),
    (Division, Left, 13),
    (Multiplication, Left, 13),
    (Remainder, Left, 13),
    (Exponentiation, Right, 14),
    (Await, Right, PRECEDENCE_UNARY),
    (BitwiseNot, Right, PRECEDENCE_UNARY),
    (Delete, Right, PRECEDENCE_UNARY),
    (LogicalNot, Right, PRECEDENCE_UNARY),
    (PrefixDecrement, Right, PRECEDENCE_UNARY),
    (PrefixIncrement, Right, PRECEDENCE_UNARY),
    (Typeof, Right, PRECEDENCE_UNARY),
    (UnaryNegation, Right, PRECEDENCE_UNARY),
    (UnaryPlus, Right, PRECEDENCE_UNARY),
    (Void, Right, PRECEDENCE_UNARY),
    (New, Right, 17),
    (Call, Left, PRECEDENCE_MEMBER),
    (ComputedMemberAccess, Left, PRECEDENCE_MEMBER),
    (MemberAccess, Left, PRECEDENCE_MEMBER),
    (OptionalChainingCall, Left, PRECEDENCE_MEMBER),
    (OptionalChainingComputedMemberAccess, Left, PRECEDENCE_MEMBER),
    (OptionalChainingMemberAccess, Left, PRECEDENCE_MEMBER),
  ];
  let mut map = HashMap::<OperatorName, Operator>::new();
  for &(name, associativity, precedence) in table {
    map.insert(name, Operator { name, associativity, precedence });
  }
  map
});

#[rustfmt::skip]
pub static MULTARY_OPERATOR_MAPPING: Lazy<HashMap<TT, &'static Operator>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static Operator>::new();
  map.insert(TT::Plus, &OPERATORS[&OperatorName::Addition]);
  map.insert(TT::Equals, &OPERATORS[&OperatorName::Assignment]);
  map.insert(TT::PlusEquals, &OPERATORS[&OperatorName::AssignmentAddition]);
  map.insert(TT::AmpersandEquals, &OPERATORS[&OperatorName::AssignmentBitwiseAnd]);
  map.insert(TT::ChevronLeftChevronLeftEquals, &OPERATORS[&OperatorName::AssignmentBitwiseLeftShift]);
  map.insert(TT::BarEquals, &OPERATORS[&OperatorName::AssignmentBitwiseOr]);
  map.insert(TT::ChevronRightChevronRightEquals, &OPERATORS[&OperatorName::AssignmentBitwiseRightShift]);
  map.insert(TT::ChevronRightChevronRightChevronRightEquals, &OPERATORS[&OperatorName::AssignmentBitwiseUnsignedRightShift]);
  map.insert(TT::CaretEquals, &OPERATORS[&OperatorName::AssignmentBitwiseXor]);
  map.insert(TT::SlashEquals, &OPERATORS[&OperatorName::AssignmentDivision]);
  map.insert(TT::AsteriskAsteriskEquals, &OPERATORS[&OperatorName::AssignmentExponentiation]);
  map.insert(TT::AmpersandAmpersandEquals, &OPERATORS[&OperatorName::AssignmentLogicalAnd]);
  map.insert(TT::BarBarEquals, &OPERATORS[&OperatorName::AssignmentLogicalOr]);
  map.insert(TT::AsteriskEquals, &OPERATORS[&OperatorName::AssignmentMultiplication]);
  map.insert(TT::QuestionQuestionEquals, &OPERATORS[&OperatorName::AssignmentNullishCoalescing]);
  map.insert(TT::PercentEquals, &OPERATORS[&OperatorName::AssignmentRemainder]);
  map.insert(TT::HyphenEquals, &OPERATORS[&OperatorName::AssignmentSubtraction]);
  map.insert(TT::Ampersand, &OPERATORS[&OperatorName::BitwiseAnd]);
  map.insert(TT::ChevronLeftChevronLeft, &OPERATORS[&OperatorName::BitwiseLeftShift]);
  map.insert(TT::Bar, &OPERATORS[&OperatorName::BitwiseOr]);
  map.insert(TT::ChevronRightChevronRight, &OPERATORS[&OperatorName::BitwiseRightShift]);
  map.insert(TT::ChevronRightChevronRightChevronRight, &OPERATORS[&OperatorName::BitwiseUnsignedRightShift]);
  map.insert(TT::Caret, &OPERATORS[&OperatorName::BitwiseXor]);
  map.insert(TT::ParenthesisOpen, &OPERATORS[&OperatorName::Call]);
  map.insert(TT::Comma, &OPERATORS[&OperatorName::Comma]);
  map.insert(TT::BracketOpen, &OPERATORS[&OperatorName::ComputedMemberAccess]);
  map.insert(TT::Question, &OPERATORS[&OperatorName::Conditional]);
  map.insert(TT::Slash, &OPERATORS[&OperatorName::Division]);
  map.insert(TT::EqualsEquals, &OPERATORS[&OperatorName::Equality]);
  map.insert(TT::AsteriskAsterisk, &OPERATORS[&OperatorName::Exponentiation]);
  map.insert(TT::ChevronRight, &OPERATORS[&OperatorName::GreaterThan]);
  map.insert(TT::ChevronRightEquals, &OPERATORS[&OperatorName::GreaterThanOrEqual]);
  map.insert(TT::KeywordIn, &OPERATORS[&OperatorName::In]);
  map.insert(TT::ExclamationEquals, &OPERATORS[&OperatorName::Inequality]);
  map.insert(TT::KeywordInstanceof, &OPERATORS[&OperatorName::Instanceof]);
  map.insert(TT::ChevronLeft, &OPERATORS[&OperatorName::LessThan]);
  map.insert(TT::ChevronLeftEquals, &OPERATORS[&OperatorName::LessThanOrEqual]);
  map.insert(TT::AmpersandAmpersand, &OPERATORS[&OperatorName::LogicalAnd]);
  map.insert(TT::BarBar, &OPERATORS[&OperatorName::LogicalOr]);
  map.insert(TT::Dot, &OPERATORS[&OperatorName::MemberAccess]);
  map.insert(TT::Asterisk, &OPERATORS[&OperatorName::Multiplication]);
  map.insert(TT::QuestionQuestion, &OPERATORS[&OperatorName::NullishCoalescing]);
  map.insert(TT::QuestionDot, &OPERATORS[&OperatorName::OptionalChainingMemberAccess]);
  map.insert(TT::QuestionDotBracketOpen, &OPERATORS[&OperatorName::OptionalChainingComputedMemberAccess]);
  map.insert(TT::QuestionDotParenthesisOpen, &OPERATORS[&OperatorName::OptionalChainingCall]);
  map.insert(TT::Percent, &OPERATORS[&OperatorName::Remainder]);
  map.insert(TT::EqualsEqualsEquals, &OPERATORS[&OperatorName::StrictEquality]);
  map.insert(TT::ExclamationEqualsEquals, &OPERATORS[&OperatorName::StrictInequality]);
  map.insert(TT::Hyphen, &OPERATORS[&OperatorName::Subtraction]);
  map.insert(TT::KeywordAs, &OPERATORS[&OperatorName::TypeAssertion]);
  map.insert(TT::KeywordSatisfies, &OPERATORS[&OperatorName::TypeAssertion]);
  map
});

#[rustfmt::skip]
pub static UNARY_OPERATOR_MAPPING: Lazy<HashMap<TT, &'static Operator>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static Operator>::new();
  // `yield`, `await` and `new` are handled manually.
  map.insert(TT::Tilde, &OPERATORS[&OperatorName::BitwiseNot]);
  map.insert(TT::KeywordDelete, &OPERATORS[&OperatorName::Delete]);
  map.insert(TT::Exclamation, &OPERATORS[&OperatorName::LogicalNot]);
  map.insert(TT::HyphenHyphen, &OPERATORS[&OperatorName::PrefixDecrement]);
  map.insert(TT::PlusPlus, &OPERATORS[&OperatorName::PrefixIncrement]);
  map.insert(TT::Hyphen, &OPERATORS[&OperatorName::UnaryNegation]);
  map.insert(TT::Plus, &OPERATORS[&OperatorName::UnaryPlus]);
  map.insert(TT::KeywordTypeof, &OPERATORS[&OperatorName::Typeof]);
  map.insert(TT::KeywordVoid, &OPERATORS[&OperatorName::Void]);
  map
});
