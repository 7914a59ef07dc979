use parse_es::error::SyntaxErrorType;
use parse_es::token::TT;
use parse_es::tokenize;
use parse_es::SourceType;

fn types(source: &str, source_type: SourceType) -> Vec<TT> {
  tokenize(source, source_type)
    .unwrap()
    .into_iter()
    .map(|t| t.typ)
    .collect()
}

fn rebuild(source: &str) -> String {
  let mut rebuilt = String::new();
  for token in tokenize(source, SourceType::Script).unwrap() {
    rebuilt.push_str(&source[token.trivia.0..token.trivia.1]);
    rebuilt.push_str(&source[token.loc.0..token.loc.1]);
  }
  rebuilt
}

#[test]
fn tokens_and_trivia_cover_the_whole_source() {
  for source in [
    "",
    "   \n\t",
    "a",
    "// only a comment",
    "function f() {\n  return /[/]/.test('日本') /* 💩 */ ? 1 : 2;\n}\n",
    "<!-- legacy\nx = y\n--> tail\n",
    "`${`${a}`}` + '\\u{1F4A9}'",
    "var a = 1\r\nvar b = 0x1F\u{2028}var c = .5e-3\n",
  ] {
    assert_eq!(rebuild(source), source, "{source:?}");
  }
}

#[test]
fn output_ends_with_a_single_eof() {
  let tokens = tokenize("a;", SourceType::Script).unwrap();
  assert_eq!(tokens.len(), 3);
  assert_eq!(tokens[2].typ, TT::EOF);
  assert_eq!(tokens[2].loc.0, 2);
  assert_eq!(types("", SourceType::Script), vec![TT::EOF]);
}

#[test]
fn slash_after_operand_is_division() {
  assert_eq!(types("a++ / 2", SourceType::Script), vec![
    TT::Identifier,
    TT::PlusPlus,
    TT::Slash,
    TT::LiteralNumber,
    TT::EOF
  ]);
  assert_eq!(types("this /= 2", SourceType::Script), vec![
    TT::KeywordThis,
    TT::SlashEquals,
    TT::LiteralNumber,
    TT::EOF
  ]);
  assert_eq!(types("x[0] / y", SourceType::Script), vec![
    TT::Identifier,
    TT::BracketOpen,
    TT::LiteralNumber,
    TT::BracketClose,
    TT::Slash,
    TT::Identifier,
    TT::EOF
  ]);
}

#[test]
fn slash_after_operator_or_keyword_is_regex() {
  assert_eq!(types("typeof /x/", SourceType::Script), vec![
    TT::KeywordTypeof,
    TT::LiteralRegex,
    TT::EOF
  ]);
  assert_eq!(types("a = b ? /c/ : /d/", SourceType::Script), vec![
    TT::Identifier,
    TT::Equals,
    TT::Identifier,
    TT::Question,
    TT::LiteralRegex,
    TT::Colon,
    TT::LiteralRegex,
    TT::EOF
  ]);
  assert_eq!(types("while (x) /y/g.exec(z)", SourceType::Script)[4], TT::LiteralRegex);
}

#[test]
fn failed_regex_scan_falls_back_to_division() {
  assert_eq!(types("var yield = 4; yield / 2", SourceType::Script), vec![
    TT::KeywordVar,
    TT::KeywordYield,
    TT::Equals,
    TT::LiteralNumber,
    TT::Semicolon,
    TT::KeywordYield,
    TT::Slash,
    TT::LiteralNumber,
    TT::EOF
  ]);
}

#[test]
fn line_terminator_flag() {
  let tokens = tokenize("a /* \n */ b // c\nd e", SourceType::Script).unwrap();
  let flags: Vec<_> = tokens.iter().map(|t| t.preceded_by_line_terminator).collect();
  assert_eq!(flags, [false, true, true, false, false]);
}

#[test]
fn html_comments_depend_on_source_type() {
  assert_eq!(types("<!-- x\ny", SourceType::Script), vec![TT::Identifier, TT::EOF]);
  assert_eq!(types("x\n--> y\nz", SourceType::Script), vec![
    TT::Identifier,
    TT::Identifier,
    TT::EOF
  ]);
  assert_eq!(types("a <!--b", SourceType::Module), vec![
    TT::Identifier,
    TT::ChevronLeft,
    TT::Exclamation,
    TT::HyphenHyphen,
    TT::Identifier,
    TT::EOF
  ]);
}

#[test]
fn scan_errors_are_resolved() {
  let err = tokenize("a\n'unterminated", SourceType::Script).unwrap_err();
  assert_eq!(err.line(), Some(2));
  assert!(err.message.is_some());
  let err = tokenize("a @", SourceType::Script).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedIllegal);
  assert_eq!(err.message.as_deref(), Some("Unexpected \"@\""));
  assert_eq!(err.column(), Some(2));
}
