use parse_es::ast::expr::Expr;
use parse_es::ast::stmt::Stmt;
use parse_es::error::SyntaxErrorType;
use parse_es::parse;

#[test]
fn asi_splits_identifiers_only_across_line_terminators() {
  let parsed = parse("a\nb").expect("expected ASI split");
  assert_eq!(parsed.stx.body.len(), 2);
  assert!(matches!(parsed.stx.body[0].stx.as_ref(), Stmt::Expr(_)));
  assert!(matches!(parsed.stx.body[1].stx.as_ref(), Stmt::Expr(_)));

  let err = parse("a b").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedIdentifier);
}

#[test]
fn asi_inserts_before_closing_brace_and_end_of_input() {
  parse("{ a } b").unwrap();
  parse("function f() { return 1 }").unwrap();
  parse("x = 1").unwrap();
}

#[test]
fn postfix_update_is_not_continued_across_line_terminator() {
  let parsed = parse("a\n++\nb").unwrap();
  assert_eq!(parsed.stx.body.len(), 2);
  let Stmt::Expr(second) = parsed.stx.body[1].stx.as_ref() else {
    panic!("expected expression statement");
  };
  assert!(matches!(second.stx.expr.stx.as_ref(), Expr::Unary(_)));
}

#[test]
fn return_value_is_not_continued_across_line_terminator() {
  let parsed = parse("function f() { return\n1 }").unwrap();
  let Stmt::FunctionDecl(decl) = parsed.stx.body[0].stx.as_ref() else {
    panic!("expected function declaration");
  };
  let parse_es::ast::func::FuncBody::Block(body) = &decl.stx.function.stx.body else {
    panic!("expected block body");
  };
  assert_eq!(body.len(), 2);
  let Stmt::Return(ret) = body[0].stx.as_ref() else {
    panic!("expected return statement");
  };
  assert!(ret.stx.value.is_none());
}

#[test]
fn labelled_jumps_are_not_continued_across_line_terminator() {
  let parsed = parse("a: while (1) { break\na; }").unwrap();
  let Stmt::Label(label) = parsed.stx.body[0].stx.as_ref() else {
    panic!("expected label");
  };
  let Stmt::While(w) = label.stx.statement.stx.as_ref() else {
    panic!("expected while");
  };
  let Stmt::Block(block) = w.stx.body.stx.as_ref() else {
    panic!("expected block");
  };
  let Stmt::Break(brk) = block.stx.body[0].stx.as_ref() else {
    panic!("expected break");
  };
  assert_eq!(brk.stx.label, None);
}

#[test]
fn throw_requires_operand_on_same_line() {
  let err = parse("throw\nnew Error()").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterThrow);
  parse("throw new Error()").unwrap();
}

#[test]
fn arrow_requires_parameters_on_same_line() {
  let err = parse("(a)\n=> a").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterArrowParameters);
}

#[test]
fn do_while_terminates_without_semicolon() {
  let parsed = parse("do {} while (false) x").unwrap();
  assert_eq!(parsed.stx.body.len(), 2);
}

#[test]
fn call_continues_across_line_terminator() {
  let parsed = parse("a = b\n(c)").unwrap();
  assert_eq!(parsed.stx.body.len(), 1);
}

#[test]
fn for_header_semicolons_are_never_inserted() {
  assert!(parse("for (a\nb;;) {}").is_err());
  assert!(parse("for (;;\n) {}").is_ok());
}
