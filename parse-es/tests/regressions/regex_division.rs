use parse_es::ast::expr::Expr;
use parse_es::ast::node::Node;
use parse_es::ast::stmt::Stmt;
use parse_es::operator::OperatorName;
use parse_es::parse;

fn expr_stmts(source: &str) -> Vec<Node<Expr>> {
  parse(source)
    .unwrap()
    .stx
    .body
    .into_iter()
    .map(|s| match *s.stx {
      Stmt::Expr(e) => e.stx.expr,
      other => panic!("expected expression statement, got {other:?}"),
    })
    .collect()
}

fn is_regex(expr: &Expr, pattern: &str, flags: &str) -> bool {
  matches!(expr, Expr::LitRegex(r) if r.stx.pattern == pattern && r.stx.flags == flags)
}

#[test]
fn division_chain_is_left_associative() {
  let exprs = expr_stmts("a / b / c");
  let Expr::Binary(outer) = exprs[0].stx.as_ref() else {
    panic!("expected division");
  };
  assert_eq!(outer.stx.operator, OperatorName::Division);
  assert!(matches!(outer.stx.left.stx.as_ref(), Expr::Binary(_)));
  assert!(matches!(outer.stx.right.stx.as_ref(), Expr::Id(_)));
}

#[test]
fn slash_on_next_line_continues_the_expression() {
  let exprs = expr_stmts("x = a\n/b/g");
  assert_eq!(exprs.len(), 1);
  let Expr::Assign(assign) = exprs[0].stx.as_ref() else {
    panic!("expected assignment");
  };
  assert!(matches!(assign.stx.value.stx.as_ref(), Expr::Binary(_)));
}

#[test]
fn regex_at_statement_start() {
  let exprs = expr_stmts("/=/.test(a)");
  let Expr::Call(call) = exprs[0].stx.as_ref() else {
    panic!("expected call");
  };
  let Expr::Member(member) = call.stx.callee.stx.as_ref() else {
    panic!("expected member");
  };
  assert!(is_regex(&member.stx.left.stx, "=", ""));

  let top = parse("{}\n/b/i.exec(c)").unwrap();
  assert_eq!(top.stx.body.len(), 2);
  assert!(matches!(top.stx.body[0].stx.as_ref(), Stmt::Block(_)));
  assert!(matches!(top.stx.body[1].stx.as_ref(), Stmt::Expr(_)));
}

#[test]
fn regex_in_operand_positions() {
  let exprs = expr_stmts("typeof /a/; !/b/m; [/c/, /d/]; f(/e/y); x = y ? /f/ : /g/u;");
  assert_eq!(exprs.len(), 5);
  let Expr::Unary(typeof_) = exprs[0].stx.as_ref() else {
    panic!("expected unary");
  };
  assert!(is_regex(&typeof_.stx.argument.stx, "a", ""));
  let Expr::Unary(not) = exprs[1].stx.as_ref() else {
    panic!("expected unary");
  };
  assert!(is_regex(&not.stx.argument.stx, "b", "m"));
}

#[test]
fn regex_after_return_and_yield() {
  parse("function f() { return /a/.test(b); }").unwrap();
  parse("function* g() { yield /a/; yield\n/b/; }").unwrap();
  parse("var yield = 4; x = yield / 2 / 1;").unwrap();
}

#[test]
fn regex_bodies_may_contain_slashes_in_classes_and_escapes() {
  let exprs = expr_stmts("/[/]\\//g");
  assert!(is_regex(&exprs[0].stx, "[/]\\/", "g"));
}

#[test]
fn object_and_parenthesised_operands_divide() {
  let exprs = expr_stmts("x = {} / 1; (a) / 2; a++ / 3; `t` / 4");
  assert_eq!(exprs.len(), 4);
  for expr in &exprs[1..] {
    assert!(matches!(expr.stx.as_ref(), Expr::Binary(b) if b.stx.operator == OperatorName::Division));
  }
}

#[test]
fn compound_division_assignment() {
  let exprs = expr_stmts("a /= 2");
  let Expr::Assign(assign) = exprs[0].stx.as_ref() else {
    panic!("expected assignment");
  };
  assert_eq!(assign.stx.operator, OperatorName::AssignmentDivision);
}
