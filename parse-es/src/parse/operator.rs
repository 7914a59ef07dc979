use crate::operator::OperatorName;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;

// `in` is included; callers skip it where it isn't allowed.
#[rustfmt::skip]
pub static BINARY_OPERATOR_MAPPING: Lazy<HashMap<TT, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<TT, OperatorName>::new();
  map.insert(TT::Plus, OperatorName::Addition);
  map.insert(TT::Ampersand, OperatorName::BitwiseAnd);
  map.insert(TT::ChevronLeftChevronLeft, OperatorName::BitwiseLeftShift);
  map.insert(TT::Bar, OperatorName::BitwiseOr);
  map.insert(TT::ChevronRightChevronRight, OperatorName::BitwiseRightShift);
  map.insert(TT::ChevronRightChevronRightChevronRight, OperatorName::BitwiseUnsignedRightShift);
  map.insert(TT::Caret, OperatorName::BitwiseXor);
  map.insert(TT::Slash, OperatorName::Division);
  map.insert(TT::EqualsEquals, OperatorName::Equality);
  map.insert(TT::ChevronRight, OperatorName::GreaterThan);
  map.insert(TT::ChevronRightEquals, OperatorName::GreaterThanOrEqual);
  map.insert(TT::KeywordIn, OperatorName::In);
  map.insert(TT::ExclamationEquals, OperatorName::Inequality);
  map.insert(TT::KeywordInstanceof, OperatorName::Instanceof);
  map.insert(TT::ChevronLeft, OperatorName::LessThan);
  map.insert(TT::ChevronLeftEquals, OperatorName::LessThanOrEqual);
  map.insert(TT::AmpersandAmpersand, OperatorName::LogicalAnd);
  map.insert(TT::BarBar, OperatorName::LogicalOr);
  map.insert(TT::Asterisk, OperatorName::Multiplication);
  map.insert(TT::Percent, OperatorName::Remainder);
  map.insert(TT::EqualsEqualsEquals, OperatorName::StrictEquality);
  map.insert(TT::ExclamationEqualsEquals, OperatorName::StrictInequality);
  map.insert(TT::Hyphen, OperatorName::Subtraction);
  map
});

#[rustfmt::skip]
pub static PREFIX_OPERATOR_MAPPING: Lazy<HashMap<TT, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<TT, OperatorName>::new();
  // `await` is handled manually as it depends on context.
  map.insert(TT::Tilde, OperatorName::BitwiseNot);
  map.insert(TT::KeywordDelete, OperatorName::Delete);
  map.insert(TT::Exclamation, OperatorName::LogicalNot);
  map.insert(TT::HyphenHyphen, OperatorName::PrefixDecrement);
  map.insert(TT::PlusPlus, OperatorName::PrefixIncrement);
  map.insert(TT::KeywordTypeof, OperatorName::Typeof);
  map.insert(TT::Hyphen, OperatorName::UnaryNegation);
  map.insert(TT::Plus, OperatorName::UnaryPlus);
  map.insert(TT::KeywordVoid, OperatorName::Void);
  map
});

#[rustfmt::skip]
pub static ASSIGNMENT_OPERATOR_MAPPING: Lazy<HashMap<TT, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<TT, OperatorName>::new();
  map.insert(TT::Equals, OperatorName::Assignment);
  map.insert(TT::PlusEquals, OperatorName::AssignmentAddition);
  map.insert(TT::AmpersandEquals, OperatorName::AssignmentBitwiseAnd);
  map.insert(TT::ChevronLeftChevronLeftEquals, OperatorName::AssignmentBitwiseLeftShift);
  map.insert(TT::BarEquals, OperatorName::AssignmentBitwiseOr);
  map.insert(TT::ChevronRightChevronRightEquals, OperatorName::AssignmentBitwiseRightShift);
  map.insert(TT::ChevronRightChevronRightChevronRightEquals, OperatorName::AssignmentBitwiseUnsignedRightShift);
  map.insert(TT::CaretEquals, OperatorName::AssignmentBitwiseXor);
  map.insert(TT::SlashEquals, OperatorName::AssignmentDivision);
  map.insert(TT::AsteriskAsteriskEquals, OperatorName::AssignmentExponentiation);
  map.insert(TT::AsteriskEquals, OperatorName::AssignmentMultiplication);
  map.insert(TT::PercentEquals, OperatorName::AssignmentRemainder);
  map.insert(TT::HyphenEquals, OperatorName::AssignmentSubtraction);
  map
});
