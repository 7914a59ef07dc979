use crate::error::SyntaxErrorType;
use crate::lex::cook;
use crate::lex::cook_identifier;
use crate::lex::lex_next;
use crate::lex::tokenizer::Tokenizer;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::TT;
use crate::token::TT::*;
use crate::SourceType;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer, LexMode::Standard).unwrap();
    assert_eq!(t.typ, expected, "in {:?}", code);
  }
  let t = lex_next(&mut lexer, LexMode::Standard).unwrap();
  assert_eq!(EOF, t.typ);
}

fn check_illegal(code: &str) {
  let mut lexer = Lexer::new(code);
  loop {
    match lex_next(&mut lexer, LexMode::Standard) {
      Ok(t) if t.typ == EOF => panic!("expected {:?} to fail", code),
      Ok(_) => {}
      Err(err) => {
        assert_eq!(err.typ, SyntaxErrorType::UnexpectedIllegal, "in {:?}", code);
        break;
      }
    };
  }
}

fn tokenize_types(code: &str) -> Vec<TT> {
  Tokenizer::new(code, SourceType::Script)
    .map(|t| t.unwrap().typ)
    .collect()
}

#[test]
fn test_lex_keywords() {
  check("class", [KeywordClass]);
  check("instanceof", [KeywordInstanceof]);
  check("classy", [Identifier]);
  check("let yield", [KeywordLet, KeywordYield]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("$_a", [Identifier]);
  check("café ünïcode", [Identifier, Identifier]);
  check("\\u0061b", [Identifier]);
  check("a\\u{62}", [Identifier]);
  // Escaped keywords are plain identifiers.
  check("v\\u0061r", [Identifier]);
  check_illegal("a\\u0020");
  check_illegal("\\u0031a");
  check_illegal("\\x61");
}

#[test]
fn test_lex_unicode_identifiers() {
  // U+212E and U+00B7 are only identifier characters through Other_ID_Start and Other_ID_Continue.
  check("\u{212E} = 1", [Identifier, Equals, LiteralNumber]);
  check("x\u{00B7}y", [Identifier]);
  check("\\u212E", [Identifier]);
  // Combining marks and joiners continue an identifier but can't start one.
  check("a\u{0301}", [Identifier]);
  check("a\u{200D}b", [Identifier]);
  check_illegal("\u{0301}a");
  // Alphabetic symbols that aren't ID_Start.
  check_illegal("\u{24B6}");
  check_illegal("\u{2603}");
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check("929", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check(". 929", [Dot, LiteralNumber]);
  check(". 929.2.", [Dot, LiteralNumber, Dot]);
  check(".929.2..", [LiteralNumber, LiteralNumber, Dot, Dot]);
  check("1.e5 1e-5 0x1F 0o17 0b11", [LiteralNumber, LiteralNumber, LiteralNumber, LiteralNumber, LiteralNumber]);
  check("017 089 09.5", [LiteralNumber, LiteralNumber, LiteralNumber]);
  check("07.5", [LiteralNumber, LiteralNumber]);
  check_illegal("3in x");
  check_illegal("0x");
  check_illegal("0b12");
  check_illegal("0o8");
  check_illegal("1e");
  check_illegal("08e1");
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check("\"a\\\"b\"", [LiteralString]);
  check("'line\\\ncontinued'", [LiteralString]);
  check("'crlf\\\r\ncontinued'", [LiteralString]);
  check_illegal("'hello world\n'");
  check_illegal("'unterminated");
  check_illegal("'\\x4'");
  check_illegal("'\\u{110000}'");
  check_illegal("'\\8'");
}

#[test]
fn test_lex_punctuators() {
  check(">>>= **= => ...", [ChevronRightChevronRightChevronRightEquals, AsteriskAsteriskEquals, EqualsChevronRight, DotDotDot]);
  check("a--> b", [Identifier, HyphenHyphen, ChevronRight, Identifier]);
  check_illegal("#");
  check_illegal("@x");
}

#[test]
fn test_lex_comments() {
  check("a /* x */ b // c", [Identifier, Identifier]);
  check("<!-- html\n--> also a comment\nx", [Identifier]);
  check_illegal("/* never closed");

  let mut lexer = Lexer::new("a /*\n*/ b").with_html_comments(false);
  lex_next(&mut lexer, LexMode::Standard).unwrap();
  let b = lex_next(&mut lexer, LexMode::Standard).unwrap();
  assert!(b.preceded_by_line_terminator);
  assert_eq!(b.trivia, Loc(1, 8));

  let mut lexer = Lexer::new("x <!-- y").with_html_comments(false);
  let types: Vec<_> = (0..5).map(|_| lex_next(&mut lexer, LexMode::Standard).unwrap().typ).collect();
  assert_eq!(types, vec![Identifier, ChevronLeft, Exclamation, HyphenHyphen, Identifier]);
}

#[test]
fn test_lex_line_terminator_flag() {
  let mut lexer = Lexer::new("a\u{2028}b c");
  assert!(!lex_next(&mut lexer, LexMode::Standard).unwrap().preceded_by_line_terminator);
  assert!(lex_next(&mut lexer, LexMode::Standard).unwrap().preceded_by_line_terminator);
  assert!(!lex_next(&mut lexer, LexMode::Standard).unwrap().preceded_by_line_terminator);
}

#[test]
fn test_lex_regex_mode() {
  let mut lexer = Lexer::new("/a[/]b\\//gi");
  let t = lex_next(&mut lexer, LexMode::SlashIsRegex).unwrap();
  assert_eq!(t.typ, LiteralRegex);
  assert_eq!(t.loc, Loc(0, 11));

  let mut lexer = Lexer::new("/a/");
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).unwrap().typ, Slash);

  let mut lexer = Lexer::new("/abc\n/");
  let err = lex_next(&mut lexer, LexMode::SlashIsRegex).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedRegex);

  let mut lexer = Lexer::new("/a/g\\u0061");
  let err = lex_next(&mut lexer, LexMode::SlashIsRegex).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidRegexFlags);
}

#[test]
fn test_lex_templates() {
  check("`plain`", [LiteralTemplatePartStringEnd]);
  check("`a${", [LiteralTemplatePartString]);
  check_illegal("`never closed");
  check_illegal("`\\01`");

  let mut lexer = Lexer::new("`a${b}c`");
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).unwrap().typ, LiteralTemplatePartString);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).unwrap().typ, Identifier);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).unwrap().typ, BraceClose);
  let tail = lex_next(&mut lexer, LexMode::TemplateStrContinue).unwrap();
  assert_eq!(tail.typ, LiteralTemplatePartStringEnd);
  assert_eq!(tail.loc, Loc(6, 8));
}

#[test]
fn test_cook_escapes() {
  let cooked = cook("a\\n\\x41\\u0042\\u{1F600}\\uD83D\\uDE00", 0, false).unwrap();
  assert_eq!(cooked.value, "a\nAB\u{1F600}\u{1F600}");
  assert_eq!(cooked.octal, None);

  let cooked = cook("x\\0y", 0, false).unwrap();
  assert_eq!(cooked.value, "x\0y");
  assert_eq!(cooked.octal, None);

  let cooked = cook("\\101\\08", 10, false).unwrap();
  assert_eq!(cooked.value, "A\u{0}8");
  assert_eq!(cooked.octal, Some(Loc(10, 14)));

  assert_eq!(cook("a\r\nb", 0, true).unwrap().value, "a\nb");
  assert_eq!(cook("\\0", 0, true).unwrap().value, "\0");
}

#[test]
fn test_cook_identifier() {
  assert_eq!(cook_identifier("\\u0061b\\u{63}", 0).unwrap(), "abc");
  assert!(cook_identifier("\\u0030", 0).is_err());
}

#[test]
fn test_tokenizer_regex_heuristic() {
  assert_eq!(tokenize_types("a / b / c"), vec![Identifier, Slash, Identifier, Slash, Identifier, EOF]);
  assert_eq!(
    tokenize_types("if (1) /x/.test(a)"),
    vec![KeywordIf, ParenthesisOpen, LiteralNumber, ParenthesisClose, LiteralRegex, Dot, Identifier, ParenthesisOpen, Identifier, ParenthesisClose, EOF],
  );
  assert_eq!(tokenize_types("(a) / 2"), vec![ParenthesisOpen, Identifier, ParenthesisClose, Slash, LiteralNumber, EOF]);
  assert_eq!(tokenize_types("x = /=/g"), vec![Identifier, Equals, LiteralRegex, EOF]);
  assert_eq!(tokenize_types("{} /foo/"), vec![BraceOpen, BraceClose, LiteralRegex, EOF]);
  assert_eq!(tokenize_types("x = {} / 2"), vec![Identifier, Equals, BraceOpen, BraceClose, Slash, LiteralNumber, EOF]);
  // The regex attempt fails, so the slash is a division.
  assert_eq!(tokenize_types("return / 2"), vec![KeywordReturn, Slash, LiteralNumber, EOF]);
}

#[test]
fn test_tokenizer_templates() {
  assert_eq!(
    tokenize_types("`a${ {b: 1}.b }c${d}e`"),
    vec![
      LiteralTemplatePartString,
      BraceOpen,
      Identifier,
      Colon,
      LiteralNumber,
      BraceClose,
      Dot,
      Identifier,
      BraceClose,
      LiteralTemplatePartString,
      Identifier,
      BraceClose,
      LiteralTemplatePartStringEnd,
      EOF,
    ],
  );
}

#[test]
fn test_tokenizer_snapshot_and_peek() {
  let mut tokenizer = Tokenizer::new("a b", SourceType::Script);
  let peeked = tokenizer.peek().unwrap();
  let snapshot = tokenizer.snapshot();
  let first = tokenizer.advance().unwrap();
  assert_eq!(peeked.loc, first.loc);
  tokenizer.restore(snapshot);
  assert_eq!(tokenizer.advance().unwrap().loc, first.loc);
  assert_eq!(tokenizer.advance().unwrap().typ, Identifier);
  assert!(!tokenizer.at_end());
  assert_eq!(tokenizer.advance().unwrap().typ, EOF);
  assert!(tokenizer.at_end());
}

#[test]
fn test_tokens_and_trivia_reconstruct_source() {
  let source = "/* lead */ let x = `a${ y /2 }b`; // tail\n if (x) /re/g.test(x) \r\n";
  let mut rebuilt = String::new();
  for token in Tokenizer::new(source, SourceType::Script) {
    let token = token.unwrap();
    rebuilt.push_str(&source[token.trivia.0..token.trivia.1]);
    rebuilt.push_str(&source[token.loc.0..token.loc.1]);
  }
  assert_eq!(rebuilt, source);
}
