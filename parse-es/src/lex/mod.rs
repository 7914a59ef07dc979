use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::is_line_terminator;
use crate::char::CharFilter;
use crate::char::DIGIT;
use crate::char::DIGIT_BIN;
use crate::char::DIGIT_HEX;
use crate::char::DIGIT_OCT;
use crate::char::ECMASCRIPT_LINE_TERMINATORS;
use crate::char::ECMASCRIPT_WHITESPACE;
use crate::char::ID_CONTINUE;
use crate::char::ID_START_CHARSTR;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use memchr::memchr3;
use once_cell::sync::Lazy;

#[cfg(test)]
mod tests;
pub mod tokenizer;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LexMode {
  // A leading `/` starts a regular expression literal. Used where only a primary expression may appear.
  SlashIsRegex,
  Standard,
  // Continue a template literal after the `}` closing a substitution.
  TemplateStrContinue,
}

/// A saved scan position. Restoring it resumes scanning exactly as if nothing had been scanned since.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
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

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

struct PatternMatcher {
  patterns: Vec<TT>,
  matcher: AhoCorasick,
  anchored: bool,
}

impl PatternMatcher {
  pub fn new<D: AsRef<str>>(anchored: bool, patterns: Vec<(TT, D)>) -> Self {
    let (tts, syns): (Vec<_>, Vec<_>) = patterns.into_iter().unzip();
    let byte_syns: Vec<Vec<u8>> = syns.iter().map(|s| s.as_ref().as_bytes().to_vec()).collect();
    let matcher = AhoCorasickBuilder::new()
      .start_kind(if anchored {
        StartKind::Anchored
      } else {
        StartKind::Unanchored
      })
      .kind(Some(AhoCorasickKind::DFA))
      .match_kind(MatchKind::LeftmostLongest)
      .build(byte_syns)
      .unwrap();
    PatternMatcher {
      patterns: tts,
      matcher,
      anchored,
    }
  }

  pub fn find(&self, lexer: &Lexer) -> Option<(TT, Match)> {
    self
      .matcher
      .find(Input::new(&lexer.source[lexer.next..]).anchored(if self.anchored {
        Anchored::Yes
      } else {
        Anchored::No
      }))
      .map(|m| (self.patterns[m.pattern().as_usize()], Match(m.end())))
  }
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
  // `<!--` and `-->` comments are only recognised in scripts.
  html_comments: bool,
}

impl<'a> Lexer<'a> {
  pub fn new(code: &'a str) -> Lexer<'a> {
    Lexer {
      source: code,
      next: 0,
      html_comments: true,
    }
  }

  pub fn with_html_comments(mut self, enabled: bool) -> Lexer<'a> {
    self.html_comments = enabled;
    self
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

  pub fn source_range(&self) -> Loc {
    Loc(0, self.end())
  }

  fn eof_range(&self) -> Loc {
    Loc(self.end(), self.end())
  }

  pub fn at_end(&self) -> bool {
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

  pub fn apply_checkpoint(&mut self, checkpoint: LexerCheckpoint) {
    self.next = checkpoint.next;
  }

  fn if_char(&self, c: char) -> Match {
    match self.peek_or_eof(0) {
      Some(n) if n == c => Match(c.len_utf8()),
      _ => Match(0),
    }
  }

  fn while_not_3_chars(&self, a: char, b: char, c: char) -> Match {
    debug_assert!(a.is_ascii() && b.is_ascii() && c.is_ascii());
    Match(
      memchr3(a as u8, b as u8, c as u8, self.source[self.next..].as_bytes())
        .unwrap_or(self.remaining()),
    )
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
    self.next += n;
  }

  // The error covers the character at the cursor, or is empty at the end of input.
  fn illegal(&self) -> SyntaxError {
    let len = self.peek_or_eof(0).map_or(0, |c| c.len_utf8());
    Loc(self.next, self.next + len).error(SyntaxErrorType::UnexpectedIllegal, None)
  }

  fn drive(
    &mut self,
    preceded_by_line_terminator: bool,
    trivia: Loc,
    f: impl FnOnce(&mut Self) -> SyntaxResult<TT>,
  ) -> SyntaxResult<Token> {
    let cp = self.checkpoint();
    let typ = f(self)?;
    Ok(Token {
      loc: self.since_checkpoint(cp),
      trivia,
      preceded_by_line_terminator,
      typ,
    })
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}

impl<'a> Index<Match> for Lexer<'a> {
  type Output = str;

  fn index(&self, m: Match) -> &Self::Output {
    &self.source[self.next - m.len()..self.next]
  }
}

#[rustfmt::skip]
pub static OPERATORS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static str>::new();
  map.insert(TT::Ampersand, "&");
  map.insert(TT::AmpersandAmpersand, "&&");
  map.insert(TT::AmpersandEquals, "&=");
  map.insert(TT::Asterisk, "*");
  map.insert(TT::AsteriskAsterisk, "**");
  map.insert(TT::AsteriskAsteriskEquals, "**=");
  map.insert(TT::AsteriskEquals, "*=");
  map.insert(TT::Bar, "|");
  map.insert(TT::BarBar, "||");
  map.insert(TT::BarEquals, "|=");
  map.insert(TT::BraceClose, "}");
  map.insert(TT::BraceOpen, "{");
  map.insert(TT::BracketClose, "]");
  map.insert(TT::BracketOpen, "[");
  map.insert(TT::Caret, "^");
  map.insert(TT::CaretEquals, "^=");
  map.insert(TT::ChevronLeft, "<");
  map.insert(TT::ChevronLeftChevronLeft, "<<");
  map.insert(TT::ChevronLeftChevronLeftEquals, "<<=");
  map.insert(TT::ChevronLeftEquals, "<=");
  map.insert(TT::ChevronRight, ">");
  map.insert(TT::ChevronRightChevronRight, ">>");
  map.insert(TT::ChevronRightChevronRightChevronRight, ">>>");
  map.insert(TT::ChevronRightChevronRightChevronRightEquals, ">>>=");
  map.insert(TT::ChevronRightChevronRightEquals, ">>=");
  map.insert(TT::ChevronRightEquals, ">=");
  map.insert(TT::Colon, ":");
  map.insert(TT::Comma, ",");
  map.insert(TT::Dot, ".");
  map.insert(TT::DotDotDot, "...");
  map.insert(TT::Equals, "=");
  map.insert(TT::EqualsChevronRight, "=>");
  map.insert(TT::EqualsEquals, "==");
  map.insert(TT::EqualsEqualsEquals, "===");
  map.insert(TT::Exclamation, "!");
  map.insert(TT::ExclamationEquals, "!=");
  map.insert(TT::ExclamationEqualsEquals, "!==");
  map.insert(TT::Hyphen, "-");
  map.insert(TT::HyphenEquals, "-=");
  map.insert(TT::HyphenHyphen, "--");
  map.insert(TT::ParenthesisClose, ")");
  map.insert(TT::ParenthesisOpen, "(");
  map.insert(TT::Percent, "%");
  map.insert(TT::PercentEquals, "%=");
  map.insert(TT::Plus, "+");
  map.insert(TT::PlusEquals, "+=");
  map.insert(TT::PlusPlus, "++");
  map.insert(TT::Question, "?");
  map.insert(TT::Semicolon, ";");
  map.insert(TT::Slash, "/");
  map.insert(TT::SlashEquals, "/=");
  map.insert(TT::Tilde, "~");
  map
});

pub static KEYWORDS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static str>::new();
  map.insert(TT::KeywordAs, "as");
  map.insert(TT::KeywordAsync, "async");
  map.insert(TT::KeywordAwait, "await");
  map.insert(TT::KeywordBreak, "break");
  map.insert(TT::KeywordCase, "case");
  map.insert(TT::KeywordCatch, "catch");
  map.insert(TT::KeywordClass, "class");
  map.insert(TT::KeywordConst, "const");
  map.insert(TT::KeywordContinue, "continue");
  map.insert(TT::KeywordDebugger, "debugger");
  map.insert(TT::KeywordDefault, "default");
  map.insert(TT::KeywordDelete, "delete");
  map.insert(TT::KeywordDo, "do");
  map.insert(TT::KeywordElse, "else");
  map.insert(TT::KeywordEnum, "enum");
  map.insert(TT::KeywordExport, "export");
  map.insert(TT::KeywordExtends, "extends");
  map.insert(TT::KeywordFinally, "finally");
  map.insert(TT::KeywordFor, "for");
  map.insert(TT::KeywordFrom, "from");
  map.insert(TT::KeywordFunction, "function");
  map.insert(TT::KeywordGet, "get");
  map.insert(TT::KeywordIf, "if");
  map.insert(TT::KeywordImport, "import");
  map.insert(TT::KeywordIn, "in");
  map.insert(TT::KeywordInstanceof, "instanceof");
  map.insert(TT::KeywordLet, "let");
  map.insert(TT::KeywordNew, "new");
  map.insert(TT::KeywordOf, "of");
  map.insert(TT::KeywordReturn, "return");
  map.insert(TT::KeywordSet, "set");
  map.insert(TT::KeywordStatic, "static");
  map.insert(TT::KeywordSuper, "super");
  map.insert(TT::KeywordSwitch, "switch");
  map.insert(TT::KeywordTarget, "target");
  map.insert(TT::KeywordThis, "this");
  map.insert(TT::KeywordThrow, "throw");
  map.insert(TT::KeywordTry, "try");
  map.insert(TT::KeywordTypeof, "typeof");
  map.insert(TT::KeywordVar, "var");
  map.insert(TT::KeywordVoid, "void");
  map.insert(TT::KeywordWhile, "while");
  map.insert(TT::KeywordWith, "with");
  map.insert(TT::KeywordYield, "yield");
  map.insert(TT::LiteralFalse, "false");
  map.insert(TT::LiteralNull, "null");
  map.insert(TT::LiteralTrue, "true");
  map
});

pub static KEYWORD_STRS: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  HashMap::<&'static str, TT>::from_iter(KEYWORDS_MAPPING.iter().map(|(&tt, &s)| (s, tt)))
});

static SIG: Lazy<PatternMatcher> = Lazy::new(|| {
  let mut patterns: Vec<(TT, String)> = Vec::new();
  for (&k, &v) in OPERATORS_MAPPING.iter() {
    patterns.push((k, v.into()));
  }
  // Keywords are recognised after the whole identifier has been lexed, so only the start is matched here.
  for c in ID_START_CHARSTR.chars() {
    patterns.push((TT::Identifier, c.to_string()));
  }
  patterns.push((TT::Identifier, "\\".into()));
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
  patterns.push((TT::LiteralString, "\"".into()));
  patterns.push((TT::LiteralString, "'".into()));
  patterns.push((TT::LiteralTemplatePartString, "`".into()));

  PatternMatcher::new(true, patterns)
});

static ML_COMMENT: Lazy<PatternMatcher> = Lazy::new(|| {
  let mut patterns = vec![(TT::CommentMultilineEnd, "*/".to_string())];
  for c in ECMASCRIPT_LINE_TERMINATORS {
    patterns.push((TT::LineTerminator, c.to_string()));
  }
  PatternMatcher::new(false, patterns)
});

static INSIG: Lazy<PatternMatcher> = Lazy::new(|| {
  let mut patterns = vec![(TT::LineTerminator, "\r\n".to_string())];
  for c in ECMASCRIPT_LINE_TERMINATORS {
    patterns.push((TT::LineTerminator, c.to_string()));
  }
  for c in ECMASCRIPT_WHITESPACE {
    patterns.push((TT::Whitespace, c.to_string()));
  }
  patterns.push((TT::CommentMultiline, "/*".into()));
  patterns.push((TT::CommentSingle, "//".into()));
  patterns.push((TT::CommentSingle, "<!--".into()));
  patterns.push((TT::CommentSingle, "-->".into()));
  PatternMatcher::new(true, patterns)
});

/// Returns whether the comment includes a line terminator.
fn lex_multiline_comment(lexer: &mut Lexer<'_>) -> SyntaxResult<bool> {
  // Consume `/*`.
  lexer.skip_expect(2);
  let mut contains_newline = false;
  loop {
    let Some((tt, mat)) = ML_COMMENT.find(lexer) else {
      lexer.next = lexer.end();
      return Err(lexer.illegal());
    };
    lexer.consume(mat);
    if tt == TT::CommentMultilineEnd {
      break;
    };
    contains_newline = true;
  }
  Ok(contains_newline)
}

// The terminating line terminator is not part of the comment.
fn lex_single_comment(lexer: &mut Lexer<'_>, prefix: Match) {
  lexer.consume(prefix);
  let rest = &lexer.source[lexer.next..];
  let len = rest.find(is_line_terminator).unwrap_or(rest.len());
  lexer.consume(Match(len));
}

/// Skips whitespace, line terminators and comments. Returns whether a line terminator was skipped.
fn lex_insignificant(lexer: &mut Lexer<'_>) -> SyntaxResult<bool> {
  // `-->` only starts a comment at the start of a line, ignoring whitespace and comments.
  let mut at_line_start = lexer.next == 0;
  let mut preceded_by_line_terminator = false;
  while let Some((tt, mat)) = INSIG.find(lexer) {
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
        if lex_multiline_comment(lexer)? {
          at_line_start = true;
          preceded_by_line_terminator = true;
        };
      }
      _ => {
        let prefix = &lexer.source[lexer.next..lexer.next + mat.len()];
        let html = prefix != "//";
        if html && (!lexer.html_comments || prefix == "-->" && !at_line_start) {
          break;
        };
        lex_single_comment(lexer, mat);
      }
    };
  }
  Ok(preceded_by_line_terminator)
}

/// Parses the code point of a `\u` escape. `i` is the index just after the `u`. Returns the code point and the index after the escape.
pub(crate) fn parse_unicode_escape(raw: &str, i: usize) -> Option<(u32, usize)> {
  let rest = raw.get(i..)?;
  if let Some(braced) = rest.strip_prefix('{') {
    let close = braced.find('}')?;
    let digits = &braced[..close];
    if digits.is_empty() {
      return None;
    };
    let mut value = 0u32;
    for d in digits.chars() {
      value = value * 16 + d.to_digit(16)?;
      if value > 0x10FFFF {
        return None;
      };
    }
    Some((value, i + close + 2))
  } else {
    let digits = rest.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
      return None;
    };
    Some((u32::from_str_radix(digits, 16).ok()?, i + 4))
  }
}

/// Decodes the name of an identifier that contains `\u` escapes. Every resulting code point must be a valid identifier start or part.
pub fn cook_identifier(raw: &str, offset: usize) -> SyntaxResult<String> {
  let mut name = String::with_capacity(raw.len());
  let mut i = 0;
  while let Some(c) = raw[i..].chars().next() {
    let decoded = if c == '\\' {
      raw[i..]
        .starts_with("\\u")
        .then(|| parse_unicode_escape(raw, i + 2))
        .flatten()
        .and_then(|(cp, end)| char::from_u32(cp).map(|c| (c, end)))
    } else {
      Some((c, i + c.len_utf8()))
    };
    let illegal = || Loc(offset + i, offset + i + c.len_utf8()).error(SyntaxErrorType::UnexpectedIllegal, None);
    let (c, end) = decoded.ok_or_else(illegal)?;
    let valid = if name.is_empty() {
      is_id_start(c)
    } else {
      is_id_continue(c)
    };
    if !valid {
      return Err(illegal());
    };
    name.push(c);
    i = end;
  }
  Ok(name)
}

/// The decoded value of a string literal or template part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cooked {
  pub value: String,
  // The first legacy octal escape (e.g. `\07`), which strict code forbids.
  pub octal: Option<Loc>,
}

/// Decodes the escapes in the body of a string literal or template part. `offset` is the position of `raw` in the source.
///
/// Templates normalise CR and CRLF to LF and reject legacy octal escapes.
pub fn cook(raw: &str, offset: usize, template: bool) -> SyntaxResult<Cooked> {
  let bytes = raw.as_bytes();
  let mut value = String::with_capacity(raw.len());
  let mut octal = None;
  let illegal = |at: usize| {
    let len = raw[at..].chars().next().map_or(0, |c| c.len_utf8());
    Loc(offset + at, offset + at + len).error(SyntaxErrorType::UnexpectedIllegal, None)
  };
  let mut i = 0;
  while let Some(c) = raw[i..].chars().next() {
    i += c.len_utf8();
    if c == '\r' && template {
      if bytes.get(i) == Some(&b'\n') {
        i += 1;
      };
      value.push('\n');
      continue;
    };
    if c != '\\' {
      value.push(c);
      continue;
    };
    let esc_start = i - 1;
    let Some(e) = raw[i..].chars().next() else {
      return Err(illegal(i));
    };
    i += e.len_utf8();
    match e {
      'n' => value.push('\n'),
      'r' => value.push('\r'),
      't' => value.push('\t'),
      'b' => value.push('\u{8}'),
      'f' => value.push('\u{c}'),
      'v' => value.push('\u{b}'),
      // Line continuations produce nothing.
      '\r' => {
        if bytes.get(i) == Some(&b'\n') {
          i += 1;
        };
      }
      '\n' | '\u{2028}' | '\u{2029}' => {}
      'x' => {
        let byte = raw
          .get(i..i + 2)
          .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))
          .and_then(|h| u8::from_str_radix(h, 16).ok())
          .ok_or_else(|| illegal(i))?;
        value.push(char::from(byte));
        i += 2;
      }
      'u' => {
        let (cp, end) = parse_unicode_escape(raw, i).ok_or_else(|| illegal(i))?;
        i = end;
        if (0xD800..=0xDBFF).contains(&cp) && raw[i..].starts_with("\\u") {
          if let Some((lo, end)) = parse_unicode_escape(raw, i + 2).filter(|(lo, _)| (0xDC00..=0xDFFF).contains(lo)) {
            let combined = 0x10000 + ((cp - 0xD800) << 10) + (lo - 0xDC00);
            value.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            i = end;
            continue;
          };
        };
        // Lone surrogates cannot be represented in a Rust string.
        value.push(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
      }
      '0'..='7' => {
        // Up to three digits when the first is 0-3, otherwise up to two.
        let max_len = if e <= '3' { 3 } else { 2 };
        let mut code = e as u32 - '0' as u32;
        let mut len = 1;
        while len < max_len {
          match bytes.get(i) {
            Some(&d @ b'0'..=b'7') => {
              code = code * 8 + (d - b'0') as u32;
              i += 1;
              len += 1;
            }
            _ => break,
          };
        }
        if len > 1 || e != '0' {
          if template {
            return Err(illegal(esc_start));
          };
          octal.get_or_insert(Loc(offset + esc_start, offset + i));
        };
        value.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
      }
      '8' | '9' => return Err(illegal(i - 1)),
      other => value.push(other),
    };
  }
  Ok(Cooked { value, octal })
}

fn lex_identifier(lexer: &mut Lexer<'_>) -> SyntaxResult<TT> {
  let start = lexer.next;
  let mut escaped = false;
  loop {
    lexer.consume(lexer.while_chars(&ID_CONTINUE));
    match lexer.peek_or_eof(0) {
      Some('\\') => {
        let end = lexer.source[lexer.next..]
          .starts_with("\\u")
          .then(|| parse_unicode_escape(lexer.source, lexer.next + 2))
          .flatten()
          .map(|(_, end)| end)
          .ok_or_else(|| lexer.illegal())?;
        escaped = true;
        lexer.next = end;
      }
      Some(c) if !c.is_ascii() && (is_id_continue(c) || lexer.next == start) => {
        lexer.skip_expect(c.len_utf8());
      }
      _ => break,
    };
  }
  let raw = &lexer.source[start..lexer.next];
  if escaped {
    // Escaped keywords are identifiers; the parser rejects them where they would be reserved.
    cook_identifier(raw, start)?;
    return Ok(TT::Identifier);
  };
  Ok(KEYWORD_STRS.get(raw).copied().unwrap_or(TT::Identifier))
}

// A numeric literal must not run straight into an identifier or another digit.
fn check_number_end(lexer: &Lexer<'_>) -> SyntaxResult<()> {
  match lexer.peek_or_eof(0) {
    Some(c) if is_id_start(c) || c == '\\' || DIGIT.has(c) => Err(lexer.illegal()),
    _ => Ok(()),
  }
}

fn lex_decimal_suffix(lexer: &mut Lexer<'_>) -> SyntaxResult<()> {
  if !lexer.consume(lexer.if_char('.')).is_empty() {
    lexer.consume(lexer.while_chars(&DIGIT));
  };
  if matches!(lexer.peek_or_eof(0), Some('e' | 'E')) {
    lexer.skip_expect(1);
    if matches!(lexer.peek_or_eof(0), Some('+' | '-')) {
      lexer.skip_expect(1);
    };
    if lexer.consume(lexer.while_chars(&DIGIT)).is_empty() {
      return Err(lexer.illegal());
    };
  };
  Ok(())
}

fn lex_number(lexer: &mut Lexer<'_>) -> SyntaxResult<TT> {
  if lexer.peek_or_eof(0) == Some('0') && lexer.peek_or_eof(1).is_some_and(|c| DIGIT.has(c)) {
    // Legacy octal (`017`) or noctal (`089`). Only the latter may have a fraction or exponent.
    let digits = lexer.consume(lexer.while_chars(&DIGIT));
    let octal = lexer[digits].bytes().all(|b| b < b'8');
    if lexer.peek_or_eof(0).is_some_and(is_id_continue) {
      return Err(lexer.illegal());
    };
    if !octal {
      lex_decimal_suffix(lexer)?;
    };
  } else {
    lexer.consume(lexer.while_chars(&DIGIT));
    lex_decimal_suffix(lexer)?;
  };
  check_number_end(lexer)?;
  Ok(TT::LiteralNumber)
}

fn lex_radix_number(lexer: &mut Lexer<'_>, digits: &CharFilter) -> SyntaxResult<TT> {
  lexer.skip_expect(2);
  if lexer.consume(lexer.while_chars(digits)).is_empty() {
    return Err(lexer.illegal());
  };
  check_number_end(lexer)?;
  Ok(TT::LiteralNumber)
}

fn lex_regex(lexer: &mut Lexer<'_>) -> SyntaxResult<TT> {
  let start = lexer.next;
  let unterminated = |lexer: &Lexer<'_>| {
    Loc(start, lexer.next).error(SyntaxErrorType::UnterminatedRegex, Some(TT::LiteralRegex))
  };
  // Consume slash.
  lexer.skip_expect(1);
  let mut in_charset = false;
  loop {
    let c = match lexer.peek_or_eof(0) {
      Some(c) if !is_line_terminator(c) => c,
      _ => return Err(unterminated(lexer)),
    };
    lexer.skip_expect(c.len_utf8());
    match c {
      '\\' => {
        // Cannot escape line terminator.
        let escaped = match lexer.peek_or_eof(0) {
          Some(c) if !is_line_terminator(c) => c,
          _ => return Err(unterminated(lexer)),
        };
        lexer.skip_expect(escaped.len_utf8());
      }
      '/' if !in_charset => break,
      '[' => in_charset = true,
      ']' => in_charset = false,
      _ => {}
    };
  }
  // Flags are validated by the parser.
  loop {
    match lexer.peek_or_eof(0) {
      Some('\\') => {
        return Err(Loc(start, lexer.next + 1).error(SyntaxErrorType::InvalidRegexFlags, Some(TT::LiteralRegex)));
      }
      Some(c) if is_id_continue(c) => lexer.skip_expect(c.len_utf8()),
      _ => break,
    };
  }
  Ok(TT::LiteralRegex)
}

fn lex_string(lexer: &mut Lexer<'_>) -> SyntaxResult<TT> {
  let quote = if lexer.source.as_bytes()[lexer.next] == b'"' { '"' } else { '\'' };
  lexer.skip_expect(1);
  let body_start = lexer.next;
  loop {
    match lexer.peek_or_eof(0) {
      None => return Err(lexer.illegal()),
      Some(c) if c == quote => break,
      Some('\\') => {
        lexer.skip_expect(1);
        match lexer.peek_or_eof(0) {
          None => return Err(lexer.illegal()),
          Some('\r') if lexer.peek_or_eof(1) == Some('\n') => lexer.skip_expect(2),
          Some(c) => lexer.skip_expect(c.len_utf8()),
        };
      }
      Some(c) if is_line_terminator(c) => return Err(lexer.illegal()),
      Some(c) => lexer.skip_expect(c.len_utf8()),
    };
  }
  cook(&lexer.source[body_start..lexer.next], body_start, false)?;
  lexer.skip_expect(1);
  Ok(TT::LiteralString)
}

/// Ends with `${` or backtick.
pub fn lex_template_string_continue(lexer: &mut Lexer<'_>) -> SyntaxResult<TT> {
  let body_start = lexer.next;
  let typ = loop {
    lexer.consume(lexer.while_not_3_chars('\\', '`', '$'));
    match lexer.peek_or_eof(0) {
      None => return Err(lexer.illegal()),
      Some('\\') => {
        lexer.skip_expect(1);
        if let Some(c) = lexer.peek_or_eof(0) {
          lexer.skip_expect(c.len_utf8());
        };
      }
      Some('`') => break TT::LiteralTemplatePartStringEnd,
      Some(_) => {
        if lexer.peek_or_eof(1) == Some('{') {
          break TT::LiteralTemplatePartString;
        };
        lexer.skip_expect(1);
      }
    };
  };
  cook(&lexer.source[body_start..lexer.next], body_start, true)?;
  lexer.skip_expect(if typ == TT::LiteralTemplatePartStringEnd { 1 } else { 2 });
  Ok(typ)
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> SyntaxResult<Token> {
  if mode == LexMode::TemplateStrContinue {
    let trivia = Loc(lexer.next, lexer.next);
    return lexer.drive(false, trivia, lex_template_string_continue);
  };

  let trivia_start = lexer.next;
  let preceded_by_line_terminator = lex_insignificant(lexer)?;
  let trivia = Loc(trivia_start, lexer.next);

  if lexer.at_end() {
    return Ok(Token {
      loc: lexer.eof_range(),
      trivia,
      preceded_by_line_terminator,
      typ: TT::EOF,
    });
  };

  lexer.drive(preceded_by_line_terminator, trivia, |lexer| {
    if let Some(c) = lexer.peek_or_eof(0).filter(|c| !c.is_ascii()) {
      return if is_id_start(c) {
        lex_identifier(lexer)
      } else {
        Err(lexer.illegal())
      };
    };

    let Some((tt, mat)) = SIG.find(lexer) else {
      return Err(lexer.illegal());
    };
    match tt {
      TT::Identifier => lex_identifier(lexer),
      TT::LiteralNumber => lex_number(lexer),
      TT::LiteralNumberBin => lex_radix_number(lexer, &DIGIT_BIN),
      TT::LiteralNumberHex => lex_radix_number(lexer, &DIGIT_HEX),
      TT::LiteralNumberOct => lex_radix_number(lexer, &DIGIT_OCT),
      TT::LiteralString => lex_string(lexer),
      TT::LiteralTemplatePartString => {
        // Consume backtick.
        lexer.skip_expect(1);
        lex_template_string_continue(lexer)
      }
      TT::Slash | TT::SlashEquals if mode == LexMode::SlashIsRegex => lex_regex(lexer),
      typ => {
        lexer.consume(mat);
        Ok(typ)
      }
    }
  })
}
