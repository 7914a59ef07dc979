use crate::char::is_line_terminator;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Serialize;
use std::cmp::{max, min};
use std::ops::{Add, AddAssign};

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

/// A resolved position: 1-based line, 0-based column counted in characters, and the byte offset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct SourcePos {
  pub line: usize,
  pub column: usize,
  pub offset: usize,
}

/// Start and end positions of a node, recorded when a parse is asked for locations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct SourceSpan {
  pub start: SourcePos,
  pub end: SourcePos,
}

/// Byte offsets of every line start, for converting offsets into line/column pairs.
///
/// CRLF counts as a single line break; lone CR, LF, U+2028 and U+2029 each end a line.
pub struct LineIndex<'a> {
  source: &'a str,
  line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
  pub fn new(source: &'a str) -> LineIndex<'a> {
    let mut line_starts = vec![0];
    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
      if !is_line_terminator(c) {
        continue;
      };
      if c == '\r' && chars.peek().is_some_and(|&(_, n)| n == '\n') {
        chars.next();
        line_starts.push(i + 2);
      } else {
        line_starts.push(i + c.len_utf8());
      };
    }
    LineIndex {
      source,
      line_starts,
    }
  }

  pub fn position(&self, offset: usize) -> SourcePos {
    let offset = min(offset, self.source.len());
    let line_idx = match self.line_starts.binary_search(&offset) {
      Ok(i) => i,
      Err(i) => i - 1,
    };
    let line_start = self.line_starts[line_idx];
    let column = self
      .source
      .get(line_start..offset)
      .map(|s| s.chars().count())
      .unwrap_or(offset - line_start);
    SourcePos {
      line: line_idx + 1,
      column,
      offset,
    }
  }

  pub fn span(&self, loc: Loc) -> SourceSpan {
    SourceSpan {
      start: self.position(loc.0),
      end: self.position(loc.1),
    }
  }
}
