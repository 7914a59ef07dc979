use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::loc::SourcePos;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of syntax errors produced by the scanner and the parser.
///
/// Diagnostic codes (prefix `PS`) are assigned per variant and are stable:
/// - `PS0001`: [`SyntaxErrorType::UnexpectedToken`]
/// - `PS0002`: [`SyntaxErrorType::UnexpectedIllegal`]
/// - `PS0003`: [`SyntaxErrorType::UnexpectedNumber`]
/// - `PS0004`: [`SyntaxErrorType::UnexpectedString`]
/// - `PS0005`: [`SyntaxErrorType::UnexpectedIdentifier`]
/// - `PS0006`: [`SyntaxErrorType::UnexpectedReservedWord`]
/// - `PS0007`: [`SyntaxErrorType::UnexpectedTemplate`]
/// - `PS0008`: [`SyntaxErrorType::UnexpectedEnd`]
/// - `PS0009`: [`SyntaxErrorType::InvalidTokenContext`]
/// - `PS0010`: [`SyntaxErrorType::LineTerminatorAfterThrow`]
/// - `PS0011`: [`SyntaxErrorType::LineTerminatorAfterArrowParameters`]
/// - `PS0012`: [`SyntaxErrorType::UnterminatedRegex`]
/// - `PS0013`: [`SyntaxErrorType::InvalidRegexFlags`]
/// - `PS0014`: [`SyntaxErrorType::InvalidRegex`]
/// - `PS0015`: [`SyntaxErrorType::InvalidAssignmentTarget`]
/// - `PS0016`: [`SyntaxErrorType::InvalidForInTarget`]
/// - `PS0017`: [`SyntaxErrorType::InvalidForOfTarget`]
/// - `PS0018`: [`SyntaxErrorType::MultipleDefaultsInSwitch`]
/// - `PS0019`: [`SyntaxErrorType::TryStatementHasNoCatchOrFinally`]
/// - `PS0020`: [`SyntaxErrorType::IllegalReturn`]
/// - `PS0021`: [`SyntaxErrorType::IllegalArrowFunctionParameters`]
/// - `PS0022`: [`SyntaxErrorType::InvalidForInInitializer`]
/// - `PS0023`: [`SyntaxErrorType::InvalidForOfInitializer`]
/// - `PS0024`: [`SyntaxErrorType::IllegalPropertyInitializer`]
/// - `PS0025`: [`SyntaxErrorType::UnexpectedArrow`]
/// - `PS0026`: [`SyntaxErrorType::UninitializedBindingPatternInForInit`]
/// - `PS0027`: [`SyntaxErrorType::AwaitInAsyncArrowParameters`]
/// - `PS0028`: [`SyntaxErrorType::StrictReservedWord`]
/// - `PS0029`: [`SyntaxErrorType::UnexpectedObjectBinding`]
/// - `PS0030`: [`SyntaxErrorType::InvalidRest`]
/// - `PS0031`: [`SyntaxErrorType::StrictOctalEscape`]
/// - `PS0032`: [`SyntaxErrorType::StrictOctalLiteral`]
/// - `PS0033`: [`SyntaxErrorType::StrictNoctalLiteral`]
/// - `PS0034`: [`SyntaxErrorType::InvalidUpdateTarget`]
/// - `PS0035`: [`SyntaxErrorType::OnlyMethodsInClasses`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  UnexpectedToken,
  // Produced by the scanner; the location covers the offending character.
  UnexpectedIllegal,
  UnexpectedNumber,
  UnexpectedString,
  UnexpectedIdentifier,
  UnexpectedReservedWord,
  UnexpectedTemplate,
  UnexpectedEnd,
  InvalidTokenContext,
  LineTerminatorAfterThrow,
  LineTerminatorAfterArrowParameters,
  UnterminatedRegex,
  InvalidRegexFlags,
  InvalidRegex,
  InvalidAssignmentTarget,
  InvalidForInTarget,
  InvalidForOfTarget,
  MultipleDefaultsInSwitch,
  TryStatementHasNoCatchOrFinally,
  IllegalReturn,
  IllegalArrowFunctionParameters,
  InvalidForInInitializer,
  InvalidForOfInitializer,
  IllegalPropertyInitializer,
  UnexpectedArrow,
  UninitializedBindingPatternInForInit,
  AwaitInAsyncArrowParameters,
  StrictReservedWord,
  UnexpectedObjectBinding,
  InvalidRest,
  StrictOctalEscape,
  StrictOctalLiteral,
  StrictNoctalLiteral,
  InvalidUpdateTarget,
  OnlyMethodsInClasses,
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
  // Filled in by the entry points once the source is known.
  pub position: Option<SourcePos>,
  pub message: Option<String>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
      position: None,
      message: None,
    }
  }

  /// Resolves the line/column position and the catalogue message against the parsed source.
  pub fn resolve(mut self, source: &str, lines: &LineIndex) -> SyntaxError {
    let start = self.loc.0.min(source.len());
    let end = self.loc.1.clamp(start, source.len());
    let text = source.get(start..end).unwrap_or("");
    self.position = Some(lines.position(start));
    self.message = Some(self.typ.message(text));
    self
  }

  pub fn offset(&self) -> usize {
    self.loc.0
  }

  pub fn line(&self) -> Option<usize> {
    self.position.map(|p| p.line)
  }

  pub fn column(&self) -> Option<usize> {
    self.position.map(|p| p.column)
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match (&self.message, &self.position) {
      (Some(msg), Some(pos)) => write!(f, "{} ({}:{})", msg, pos.line, pos.column),
      (Some(msg), None) => write!(f, "{}", msg),
      _ => write!(f, "{:?} [token={:?}]", self.typ, self.actual_token),
    }
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

fn escape_char(c: char) -> String {
  match c {
    '\n' => "\\n".into(),
    '\r' => "\\r".into(),
    '\t' => "\\t".into(),
    '"' => "\\\"".into(),
    '\\' => "\\\\".into(),
    '\u{2028}' => "\\u2028".into(),
    '\u{2029}' => "\\u2029".into(),
    c => c.to_string(),
  }
}

impl SyntaxErrorType {
  /// Stable diagnostic code for this syntax error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::UnexpectedToken => "PS0001",
      SyntaxErrorType::UnexpectedIllegal => "PS0002",
      SyntaxErrorType::UnexpectedNumber => "PS0003",
      SyntaxErrorType::UnexpectedString => "PS0004",
      SyntaxErrorType::UnexpectedIdentifier => "PS0005",
      SyntaxErrorType::UnexpectedReservedWord => "PS0006",
      SyntaxErrorType::UnexpectedTemplate => "PS0007",
      SyntaxErrorType::UnexpectedEnd => "PS0008",
      SyntaxErrorType::InvalidTokenContext => "PS0009",
      SyntaxErrorType::LineTerminatorAfterThrow => "PS0010",
      SyntaxErrorType::LineTerminatorAfterArrowParameters => "PS0011",
      SyntaxErrorType::UnterminatedRegex => "PS0012",
      SyntaxErrorType::InvalidRegexFlags => "PS0013",
      SyntaxErrorType::InvalidRegex => "PS0014",
      SyntaxErrorType::InvalidAssignmentTarget => "PS0015",
      SyntaxErrorType::InvalidForInTarget => "PS0016",
      SyntaxErrorType::InvalidForOfTarget => "PS0017",
      SyntaxErrorType::MultipleDefaultsInSwitch => "PS0018",
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => "PS0019",
      SyntaxErrorType::IllegalReturn => "PS0020",
      SyntaxErrorType::IllegalArrowFunctionParameters => "PS0021",
      SyntaxErrorType::InvalidForInInitializer => "PS0022",
      SyntaxErrorType::InvalidForOfInitializer => "PS0023",
      SyntaxErrorType::IllegalPropertyInitializer => "PS0024",
      SyntaxErrorType::UnexpectedArrow => "PS0025",
      SyntaxErrorType::UninitializedBindingPatternInForInit => "PS0026",
      SyntaxErrorType::AwaitInAsyncArrowParameters => "PS0027",
      SyntaxErrorType::StrictReservedWord => "PS0028",
      SyntaxErrorType::UnexpectedObjectBinding => "PS0029",
      SyntaxErrorType::InvalidRest => "PS0030",
      SyntaxErrorType::StrictOctalEscape => "PS0031",
      SyntaxErrorType::StrictOctalLiteral => "PS0032",
      SyntaxErrorType::StrictNoctalLiteral => "PS0033",
      SyntaxErrorType::InvalidUpdateTarget => "PS0034",
      SyntaxErrorType::OnlyMethodsInClasses => "PS0035",
    }
  }

  /// Human-readable message describing this syntax error. `text` is the source text at the error location.
  pub fn message(&self, text: &str) -> String {
    match self {
      SyntaxErrorType::UnexpectedToken => format!("Unexpected token \"{}\"", text),
      SyntaxErrorType::UnexpectedIllegal => match text.chars().next() {
        Some(c) => format!("Unexpected \"{}\"", escape_char(c)),
        None => "Unexpected end of input".into(),
      },
      SyntaxErrorType::UnexpectedNumber => "Unexpected number".into(),
      SyntaxErrorType::UnexpectedString => "Unexpected string".into(),
      SyntaxErrorType::UnexpectedIdentifier => "Unexpected identifier".into(),
      SyntaxErrorType::UnexpectedReservedWord => "Unexpected reserved word".into(),
      SyntaxErrorType::UnexpectedTemplate => "Unexpected template".into(),
      SyntaxErrorType::UnexpectedEnd => "Unexpected end of input".into(),
      SyntaxErrorType::InvalidTokenContext => {
        format!("\"{}\" may not be used as an identifier in this context", text)
      }
      SyntaxErrorType::LineTerminatorAfterThrow => "Illegal newline after throw".into(),
      SyntaxErrorType::LineTerminatorAfterArrowParameters => {
        "Illegal newline after arrow parameters".into()
      }
      SyntaxErrorType::UnterminatedRegex => "Invalid regular expression: missing /".into(),
      SyntaxErrorType::InvalidRegexFlags => "Invalid regular expression flags".into(),
      SyntaxErrorType::InvalidRegex => "Invalid regular expression".into(),
      SyntaxErrorType::InvalidAssignmentTarget => "Invalid left-hand side in assignment".into(),
      SyntaxErrorType::InvalidForInTarget => "Invalid left-hand side in for-in".into(),
      SyntaxErrorType::InvalidForOfTarget => "Invalid left-hand side in for-of".into(),
      SyntaxErrorType::MultipleDefaultsInSwitch => {
        "More than one default clause in switch statement".into()
      }
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => "Missing catch or finally after try".into(),
      SyntaxErrorType::IllegalReturn => "Illegal return statement".into(),
      SyntaxErrorType::IllegalArrowFunctionParameters => {
        "Illegal arrow function parameter list".into()
      }
      SyntaxErrorType::InvalidForInInitializer => {
        "Invalid variable declaration in for-in statement".into()
      }
      SyntaxErrorType::InvalidForOfInitializer => {
        "Invalid variable declaration in for-of statement".into()
      }
      SyntaxErrorType::IllegalPropertyInitializer => "Illegal property initializer".into(),
      SyntaxErrorType::UnexpectedArrow => "Arrows may not appear in this position".into(),
      SyntaxErrorType::UninitializedBindingPatternInForInit => {
        "Binding pattern appears without initializer in for statement init".into()
      }
      SyntaxErrorType::AwaitInAsyncArrowParameters => {
        "Async arrow parameters may not contain \"await\"".into()
      }
      SyntaxErrorType::StrictReservedWord => "Use of future reserved word in strict mode".into(),
      SyntaxErrorType::UnexpectedObjectBinding => {
        "Unexpected ObjectBinding in place of Expression".into()
      }
      SyntaxErrorType::InvalidRest => "Invalid rest".into(),
      SyntaxErrorType::StrictOctalEscape => "Unexpected legacy octal escape sequence: \\".into(),
      SyntaxErrorType::StrictOctalLiteral => "Unexpected legacy octal integer literal".into(),
      SyntaxErrorType::StrictNoctalLiteral => "Unexpected noctal integer literal".into(),
      SyntaxErrorType::InvalidUpdateTarget => {
        "Increment/decrement target must be an identifier or member expression".into()
      }
      SyntaxErrorType::OnlyMethodsInClasses => "Only methods are allowed in classes".into(),
    }
  }
}
