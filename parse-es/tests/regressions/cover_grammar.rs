use parse_es::ast::expr::pat::Pat;
use parse_es::ast::expr::Expr;
use parse_es::ast::stmt::Stmt;
use parse_es::ast::node::Node;
use parse_es::ast::stx::TopLevel;
use parse_es::error::SyntaxErrorType;
use parse_es::parse;

fn first_expr(top: &Node<TopLevel>) -> &Expr {
  match top.stx.body[0].stx.as_ref() {
    Stmt::Expr(e) => e.stx.expr.stx.as_ref(),
    other => panic!("expected expression statement, got {other:?}"),
  }
}

#[test]
fn array_literal_becomes_pattern_when_assigned() {
  let top = parse("[a, , b = 1, ...c] = d").unwrap();
  let Expr::Assign(assign) = first_expr(&top) else {
    panic!("expected assignment");
  };
  let Pat::Arr(arr) = assign.stx.target.stx.as_ref() else {
    panic!("expected array pattern");
  };
  assert_eq!(arr.stx.elements.len(), 3);
  assert!(arr.stx.elements[1].is_none());
  assert!(arr.stx.elements[2].as_ref().is_some_and(|e| e.default_value.is_some()));
  assert!(arr.stx.rest.is_some());
}

#[test]
fn object_literal_becomes_pattern_when_assigned() {
  let top = parse("({a, b: c.d, [e]: f = 2} = g)").unwrap();
  let Expr::Assign(assign) = first_expr(&top) else {
    panic!("expected assignment");
  };
  let Pat::Obj(obj) = assign.stx.target.stx.as_ref() else {
    panic!("expected object pattern");
  };
  assert_eq!(obj.stx.properties.len(), 3);
  assert!(obj.stx.properties[0].stx.shorthand);
  assert!(matches!(obj.stx.properties[1].stx.target.stx.as_ref(), Pat::Member(_)));
  assert!(obj.stx.properties[2].stx.default_value.is_some());
}

#[test]
fn rest_element_must_be_last() {
  let err = parse("[...a, b] = c").unwrap_err();
  assert!(matches!(
    err.typ,
    SyntaxErrorType::InvalidAssignmentTarget | SyntaxErrorType::InvalidRest
  ));
  parse("[a, ...b] = c").unwrap();
}

#[test]
fn shorthand_initializer_requires_a_pattern_context() {
  let err = parse("x = {a = 1};").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::IllegalPropertyInitializer);
  parse("x = ({a = 1}) => a;").unwrap();
  parse("x = [{a = 1}] = [{}];").unwrap();
}

#[test]
fn parenthesised_list_becomes_arrow_parameters() {
  let top = parse("(a, [b], {c} = {}, ...d) => 0").unwrap();
  let Expr::ArrowFunc(arrow) = first_expr(&top) else {
    panic!("expected arrow function");
  };
  let params = &arrow.stx.func.stx.parameters;
  assert_eq!(params.len(), 4);
  assert!(params[0].stx.is_simple());
  assert!(params[2].stx.default_value.is_some());
  assert!(params[3].stx.rest);
  assert!(!arrow.stx.func.stx.has_simple_parameters());
}

#[test]
fn non_binding_items_cannot_be_arrow_parameters() {
  let err = parse("(a + b) => 0").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::IllegalArrowFunctionParameters);
  assert!(parse("(a.b) => 0").is_err());
  assert!(parse("(1) => 0").is_err());
}

#[test]
fn invalid_assignment_targets_are_rejected() {
  let err = parse("a + 1 = 2").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
  let err = parse("[a] += 1").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
  parse("a.b += 1").unwrap();
  parse("(a) = 1").unwrap();
}

#[test]
fn update_operands_must_be_simple_targets() {
  let err = parse("++(a + b)").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidUpdateTarget);
  let err = parse("f()++").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidUpdateTarget);
  parse("++a.b; a[0]--").unwrap();
}

#[test]
fn unary_operand_of_exponentiation_must_be_parenthesised() {
  let err = parse("-1 ** 2").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedToken);
  parse("(-1) ** 2").unwrap();
  parse("a++ ** 2").unwrap();
}

#[test]
fn async_call_or_arrow() {
  assert!(matches!(first_expr(&parse("async(a, b)").unwrap()), Expr::Call(_)));
  assert!(matches!(first_expr(&parse("async(a, b) => a").unwrap()), Expr::ArrowFunc(_)));
  assert!(matches!(first_expr(&parse("async a => a").unwrap()), Expr::ArrowFunc(_)));
}
