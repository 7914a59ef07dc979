use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
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
  AssignmentMultiplication,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Comma,
  Conditional,
  Delete,
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
  LogicalNot,
  LogicalOr,
  Multiplication,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    OPERATORS.get(&self).is_some_and(|o| o.precedence == PRECEDENCE_ASSIGNMENT)
  }

  pub fn is_update(self) -> bool {
    matches!(
      self,
      OperatorName::PostfixDecrement
        | OperatorName::PostfixIncrement
        | OperatorName::PrefixDecrement
        | OperatorName::PrefixIncrement
    )
  }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Debug)]
pub struct Operator {
  pub name: OperatorName,
  pub precedence: u8,
  pub associativity: Associativity,
}

pub const PRECEDENCE_COMMA: u8 = 1;
pub const PRECEDENCE_ASSIGNMENT: u8 = 2;
pub const PRECEDENCE_CONDITIONAL: u8 = 3;
pub const PRECEDENCE_UNARY: u8 = 15;
pub const PRECEDENCE_UPDATE: u8 = 16;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let mut map = HashMap::<OperatorName, Operator>::new();
  let mut add = |name: OperatorName, precedence: u8, associativity: Associativity| {
    map.insert(name, Operator { name, precedence, associativity });
  };
  add(Comma, PRECEDENCE_COMMA, Left);

  add(Assignment, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentAddition, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseAnd, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseLeftShift, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseOr, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseRightShift, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseUnsignedRightShift, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseXor, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentDivision, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentExponentiation, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentMultiplication, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentRemainder, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentSubtraction, PRECEDENCE_ASSIGNMENT, Right);
  add(Yield, PRECEDENCE_ASSIGNMENT, Right);

  add(Conditional, PRECEDENCE_CONDITIONAL, Right);

  add(LogicalOr, 4, Left);
  add(LogicalAnd, 5, Left);
  add(BitwiseOr, 6, Left);
  add(BitwiseXor, 7, Left);
  add(BitwiseAnd, 8, Left);

  add(Equality, 9, Left);
  add(Inequality, 9, Left);
  add(StrictEquality, 9, Left);
  add(StrictInequality, 9, Left);

  add(GreaterThan, 10, Left);
  add(GreaterThanOrEqual, 10, Left);
  add(In, 10, Left);
  add(Instanceof, 10, Left);
  add(LessThan, 10, Left);
  add(LessThanOrEqual, 10, Left);

  add(BitwiseLeftShift, 11, Left);
  add(BitwiseRightShift, 11, Left);
  add(BitwiseUnsignedRightShift, 11, Left);

  add(Addition, 12, Left);
  add(Subtraction, 12, Left);

  add(Division, 13, Left);
  add(Multiplication, 13, Left);
  add(Remainder, 13, Left);

  add(Exponentiation, 14, Right);

  add(Await, PRECEDENCE_UNARY, Right);
  add(BitwiseNot, PRECEDENCE_UNARY, Right);
  add(Delete, PRECEDENCE_UNARY, Right);
  add(LogicalNot, PRECEDENCE_UNARY, Right);
  add(PrefixDecrement, PRECEDENCE_UNARY, Right);
  add(PrefixIncrement, PRECEDENCE_UNARY, Right);
  add(Typeof, PRECEDENCE_UNARY, Right);
  add(UnaryNegation, PRECEDENCE_UNARY, Right);
  add(UnaryPlus, PRECEDENCE_UNARY, Right);
  add(Void, PRECEDENCE_UNARY, Right);

  add(PostfixDecrement, PRECEDENCE_UPDATE, Left);
  add(PostfixIncrement, PRECEDENCE_UPDATE, Left);
  map
});
