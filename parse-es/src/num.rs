use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

/// How a numeric literal was written, which matters for strict mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumericLiteralKind {
  Decimal,
  Hex,
  Octal,
  Binary,
  // `017`: leading zero followed by octal digits only.
  LegacyOctal,
  // `089`: leading zero followed by digits that include 8 or 9.
  Noctal,
}

impl NumericLiteralKind {
  pub fn of(raw: &str) -> NumericLiteralKind {
    let bytes = raw.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
      return NumericLiteralKind::Decimal;
    };
    match bytes[1] {
      b'x' | b'X' => NumericLiteralKind::Hex,
      b'o' | b'O' => NumericLiteralKind::Octal,
      b'b' | b'B' => NumericLiteralKind::Binary,
      b'0'..=b'9' => {
        if bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
          NumericLiteralKind::LegacyOctal
        } else {
          NumericLiteralKind::Noctal
        }
      }
      _ => NumericLiteralKind::Decimal,
    }
  }
}

fn from_radix_digits(digits: &str, radix: u32) -> Option<f64> {
  if digits.is_empty() {
    return None;
  };
  let mut value = 0f64;
  for c in digits.chars() {
    value = value * radix as f64 + c.to_digit(radix)? as f64;
  }
  Some(value)
}

impl JsNumber {
  /// Computes the value of a numeric literal's raw source text. Returns None for malformed text.
  pub fn from_literal(raw: &str) -> Option<JsNumber> {
    let value = match NumericLiteralKind::of(raw) {
      NumericLiteralKind::Hex => from_radix_digits(&raw[2..], 16)?,
      NumericLiteralKind::Octal => from_radix_digits(&raw[2..], 8)?,
      NumericLiteralKind::Binary => from_radix_digits(&raw[2..], 2)?,
      NumericLiteralKind::LegacyOctal => from_radix_digits(&raw[1..], 8)?,
      NumericLiteralKind::Noctal | NumericLiteralKind::Decimal => {
        // Rust's float parser accepts `1.`, `.5` and exponents, which covers every decimal literal form.
        raw.parse::<f64>().ok()?
      }
    };
    Some(JsNumber(value))
  }
}

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.0.is_nan() {
      write!(f, "NaN")
    } else if self.0.is_infinite() {
      write!(f, "{}Infinity", if self.0 < 0.0 { "-" } else { "" })
    } else {
      write!(f, "{}", self.0)
    }
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}
