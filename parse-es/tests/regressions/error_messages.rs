use parse_es::error::SyntaxErrorType;
use parse_es::parse;
use parse_es::parse_module;

fn message(source: &str) -> String {
  let err = parse(source).unwrap_err();
  err.message.expect("entry points resolve the message")
}

#[test]
fn unexpected_tokens_are_classified() {
  assert_eq!(message("a = )"), "Unexpected token \")\"");
  assert_eq!(message("x = 1 2"), "Unexpected number");
  assert_eq!(message("x = 'a' 'b'"), "Unexpected string");
  assert_eq!(message("x y"), "Unexpected identifier");
  assert_eq!(message("if (a"), "Unexpected end of input");
  assert_eq!(message("var a = 1 +"), "Unexpected end of input");
}

#[test]
fn illegal_characters_are_quoted() {
  let err = parse("a # b").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedIllegal);
  assert_eq!(err.message.as_deref(), Some("Unexpected \"#\""));
  assert_eq!((err.line(), err.column()), (Some(1), Some(2)));
  assert_eq!(err.to_string(), "Unexpected \"#\" (1:2)");
}

#[test]
fn statement_level_errors() {
  assert_eq!(message("return 1"), "Illegal return statement");
  assert_eq!(message("try {}"), "Missing catch or finally after try");
  assert_eq!(
    message("switch (a) { default: default: }"),
    "More than one default clause in switch statement"
  );
  assert_eq!(message("throw\n1"), "Illegal newline after throw");
  assert_eq!(message("class A { x }"), "Only methods are allowed in classes");
}

#[test]
fn for_head_errors() {
  assert_eq!(
    message("for (var a = 1 of b);"),
    "Invalid variable declaration in for-of statement"
  );
  assert_eq!(
    message("for (let a = 1 in b);"),
    "Invalid variable declaration in for-in statement"
  );
  assert_eq!(
    message("for (var [a];;);"),
    "Binding pattern appears without initializer in for statement init"
  );
  assert_eq!(message("for (a + b in c);"), "Invalid left-hand side in for-in");
  assert_eq!(message("for (a + b of c);"), "Invalid left-hand side in for-of");
}

#[test]
fn regular_expression_errors() {
  assert_eq!(message("/a"), "Invalid regular expression: missing /");
  assert_eq!(message("x = /a\n/"), "Invalid regular expression: missing /");
  assert_eq!(message("/a/gg"), "Invalid regular expression flags");
  assert_eq!(message("/a/x"), "Invalid regular expression flags");
  assert_eq!(message("/(/"), "Invalid regular expression");
  assert_eq!(message("/a{2,1}/"), "Invalid regular expression");
  parse("/a{2,1/").unwrap();
  assert_eq!(
    parse("/a{2,1/u").unwrap_err().typ,
    SyntaxErrorType::InvalidRegex
  );
}

#[test]
fn errors_carry_codes_and_positions() {
  let err = parse("let a;\nlet b;\n  return;").unwrap_err();
  assert_eq!(err.typ.code(), "PS0020");
  assert_eq!(err.offset(), 16);
  assert_eq!(err.line(), Some(3));
  assert_eq!(err.column(), Some(2));
  assert_eq!(err.to_string(), "Illegal return statement (3:2)");
  assert_eq!(
    format!("{err:?}"),
    "Illegal return statement (3:2) around loc [16:22]"
  );
}

#[test]
fn columns_count_characters() {
  let err = parse("'é€' #").unwrap_err();
  assert_eq!(err.offset(), 8);
  assert_eq!(err.column(), Some(5));
}

#[test]
fn module_only_errors() {
  let err = parse_module("var await;").unwrap_err();
  assert_eq!(err.line(), Some(1));
  assert!(err.message.is_some());
  let err = parse("export var a;").unwrap_err();
  assert_eq!(err.offset(), 0);
}
