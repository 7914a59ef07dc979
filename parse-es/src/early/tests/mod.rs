use crate::early::EarlyError;
use crate::early::EarlyErrorKind;
use crate::early::LabelledFunctionParent;
use crate::loc::Loc;
use crate::parse_module;
use crate::parse_script;
use crate::validate;

fn script(source: &str) -> Vec<EarlyError> {
  validate(&parse_script(source).unwrap())
}

fn module(source: &str) -> Vec<EarlyError> {
  validate(&parse_module(source).unwrap())
}

fn script_kinds(source: &str) -> Vec<EarlyErrorKind> {
  script(source).into_iter().map(|e| e.kind).collect()
}

fn module_kinds(source: &str) -> Vec<EarlyErrorKind> {
  module(source).into_iter().map(|e| e.kind).collect()
}

#[test]
fn test_valid_programs_have_no_errors() {
  for source in [
    "var a = 1; a++;",
    "while (1) { break; }",
    "a: while (1) { continue a; }",
    "a: b: while (1) { continue a; }",
    "a: { break a; }",
    "switch (x) { case 1: break; }",
    "function f(a, a) {}",
    "var x; var x;",
    "function f() {} function f() {}",
    "function f() { var f; }",
    "try {} catch (e) { var e; }",
    "class A extends B { constructor() { super(); } }",
    "class A { m() { return super.x; } }",
    "({ m() { return super.x; } })",
    "function f() { return new.target; }",
    "function f() { () => new.target; }",
    "eval = 1; arguments++;",
    "var yield, let, static;",
    "function* g() { yield 1; }",
    "async function f() { await 1; }",
    "if (a) function f() {}",
    "({ __proto__: a, __proto__() {} })",
    "a: a2: ;",
    "a: ; a: ;",
  ] {
    assert_eq!(script_kinds(source), vec![], "{}", source);
  }
}

#[test]
fn test_free_break() {
  let errors = script("break;");
  assert_eq!(errors, vec![EarlyError::new(Loc(0, 6), EarlyErrorKind::FreeBreak)]);
  assert_eq!(
    errors[0].message(),
    "Break statement must be nested within an iteration statement or a switch statement"
  );
}

#[test]
fn test_free_continue() {
  assert_eq!(script_kinds("continue;"), vec![EarlyErrorKind::FreeContinue]);
  assert_eq!(script_kinds("switch (a) { default: continue; }"), vec![
    EarlyErrorKind::FreeContinue
  ]);
  assert_eq!(script_kinds("while (1) { function f() { break; } }"), vec![
    EarlyErrorKind::FreeBreak
  ]);
}

#[test]
fn test_unbound_labels() {
  assert_eq!(script_kinds("while (1) { break a; }"), vec![
    EarlyErrorKind::UnboundBreak("a".into())
  ]);
  assert_eq!(script_kinds("a: { continue a; }"), vec![
    EarlyErrorKind::UnboundContinue("a".into())
  ]);
  assert_eq!(script_kinds("a: while (1) { function f() { break a; } }"), vec![
    EarlyErrorKind::UnboundBreak("a".into())
  ]);
}

#[test]
fn test_duplicate_label() {
  assert_eq!(script_kinds("a: { a: ; }"), vec![EarlyErrorKind::DuplicateLabel(
    "a".into()
  )]);
}

#[test]
fn test_strict_binding() {
  let errors = script("'use strict'; var eval = 1;");
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].loc, Loc(18, 22));
  assert_eq!(
    errors[0].message(),
    "The identifier \"eval\" must not be in binding position in strict mode"
  );
  assert_eq!(script_kinds("var eval = 1;"), vec![]);
}

#[test]
fn test_strict_errors_follow_function_directive() {
  assert_eq!(script_kinds("function f() { 'use strict'; var arguments; }"), vec![
    EarlyErrorKind::BindingIdentifierStrict("arguments".into())
  ]);
  assert_eq!(script_kinds("function eval() { 'use strict'; }"), vec![
    EarlyErrorKind::BindingIdentifierStrict("eval".into())
  ]);
  assert_eq!(script_kinds("function f(a, a) { 'use strict'; }"), vec![
    EarlyErrorKind::DuplicateBinding("a".into())
  ]);
  // The directive of an inner function doesn't reach outer code.
  assert_eq!(
    script_kinds("var eval; function f() { 'use strict'; }"),
    vec![]
  );
}

#[test]
fn test_strict_targets_and_references() {
  assert_eq!(script_kinds("'use strict'; eval = 1;"), vec![
    EarlyErrorKind::TargetIdentifierStrict("eval".into())
  ]);
  assert_eq!(script_kinds("'use strict'; arguments--;"), vec![
    EarlyErrorKind::TargetIdentifierStrict("arguments".into())
  ]);
  assert_eq!(script_kinds("'use strict'; implements;"), vec![
    EarlyErrorKind::IdentifierExpressionStrict("implements".into())
  ]);
  assert_eq!(script_kinds("'use strict'; delete a;"), vec![
    EarlyErrorKind::DeleteIdentifierStrict
  ]);
  assert_eq!(script_kinds("'use strict'; with (a) {}"), vec![
    EarlyErrorKind::WithStrict
  ]);
}

#[test]
fn test_duplicate_lexical() {
  let errors = script("let x; let x;");
  assert_eq!(errors, vec![EarlyError::new(
    Loc(11, 12),
    EarlyErrorKind::DuplicateBinding("x".into())
  )]);
  assert_eq!(errors[0].message(), "Duplicate binding \"x\"");
  assert_eq!(script_kinds("let x; var x;"), vec![
    EarlyErrorKind::DuplicateBinding("x".into())
  ]);
  assert_eq!(script_kinds("{ const x = 1; { var x; } }"), vec![
    EarlyErrorKind::DuplicateBinding("x".into())
  ]);
  assert_eq!(script_kinds("{ function f() {} let f; }"), vec![
    EarlyErrorKind::DuplicateBinding("f".into())
  ]);
  assert_eq!(script_kinds("{ let x; } { let x; }"), vec![]);
  assert_eq!(script_kinds("function f(a) { let a; }"), vec![
    EarlyErrorKind::DuplicateBinding("a".into())
  ]);
  assert_eq!(script_kinds("for (let i;;) { var i; }"), vec![
    EarlyErrorKind::DuplicateBinding("i".into())
  ]);
  assert_eq!(script_kinds("switch (a) { case 1: let b; case 2: let b; }"), vec![
    EarlyErrorKind::DuplicateBinding("b".into())
  ]);
}

#[test]
fn test_parameters() {
  assert_eq!(script_kinds("(a, a) => 1"), vec![EarlyErrorKind::DuplicateBinding(
    "a".into()
  )]);
  assert_eq!(script_kinds("function f(a, [a]) {}"), vec![
    EarlyErrorKind::DuplicateBinding("a".into())
  ]);
  assert_eq!(script_kinds("function f(a = 1) { 'use strict'; }"), vec![
    EarlyErrorKind::UseStrictWithNonSimpleParameters
  ]);
  assert_eq!(script_kinds("function* g(a = yield) {}"), vec![
    EarlyErrorKind::YieldInGeneratorParameters
  ]);
  assert_eq!(script_kinds("async function f(a = await 1) {}"), vec![
    EarlyErrorKind::AwaitInAsyncParameters
  ]);
  assert_eq!(script_kinds("function* g() { (a = yield) => 1; }"), vec![
    EarlyErrorKind::YieldInArrowParameters
  ]);
}

#[test]
fn test_catch_parameter() {
  assert_eq!(script_kinds("try {} catch (e) { let e; }"), vec![
    EarlyErrorKind::DuplicateBinding("e".into())
  ]);
  assert_eq!(script_kinds("try {} catch ([e, e]) {}"), vec![
    EarlyErrorKind::DuplicateBinding("e".into())
  ]);
  assert_eq!(script_kinds("try {} catch (e) { for (var e of []) ; }"), vec![
    EarlyErrorKind::DuplicateBinding("e".into())
  ]);
  assert_eq!(script_kinds("try {} catch (e) { for (var e in {}) ; }"), vec![]);
  // Only a plain identifier parameter may be redeclared by `var`.
  for source in [
    "try {} catch ([e]) { var e; }",
    "try {} catch ({e}) { for (var e in x); }",
    "try {} catch ({a: [e]}) { { var e = 1; } }",
    "try {} catch ([e]) { for (var e of []) ; }",
  ] {
    assert_eq!(
      script_kinds(source),
      vec![EarlyErrorKind::DuplicateBinding("e".into())],
      "{}",
      source
    );
  }
  assert_eq!(script_kinds("try {} catch ([e]) { var f; }"), vec![]);
  assert_eq!(script_kinds("try {} catch ([e]) { function g() { var e; } }"), vec![]);
  let errors = script("try {} catch ([e]) { var e; }");
  assert_eq!(errors[0].loc, Loc(25, 26));
}

#[test]
fn test_long_operator_chain() {
  let source = vec!["a"; 10_000].join(" + ");
  assert_eq!(script_kinds(&source), vec![]);
  let source = format!("'use strict'; {} + (delete x)", vec!["a"; 10_000].join(" * "));
  assert_eq!(script_kinds(&source), vec![
    EarlyErrorKind::DeleteIdentifierStrict
  ]);
}

#[test]
fn test_super() {
  let errors = script("function f(){ super(); }");
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].kind, EarlyErrorKind::SuperCall);
  assert_eq!(script_kinds("class A { constructor() { super(); } }"), vec![
    EarlyErrorKind::SuperCall
  ]);
  assert_eq!(script_kinds("class A extends B { m() { super(); } }"), vec![
    EarlyErrorKind::SuperCall
  ]);
  assert_eq!(
    script_kinds("class A extends B { constructor() { () => super(); } }"),
    vec![]
  );
  assert_eq!(script_kinds("function f() { super.x; }"), vec![
    EarlyErrorKind::SuperProperty
  ]);
  assert_eq!(script_kinds("super.x;"), vec![EarlyErrorKind::SuperProperty]);
}

#[test]
fn test_class_elements() {
  assert_eq!(script_kinds("class A { constructor() {} constructor() {} }"), vec![
    EarlyErrorKind::DuplicateConstructor
  ]);
  assert_eq!(script_kinds("class A { get constructor() {} }"), vec![
    EarlyErrorKind::SpecialConstructor
  ]);
  assert_eq!(script_kinds("class A { *constructor() {} }"), vec![
    EarlyErrorKind::SpecialConstructor
  ]);
  assert_eq!(script_kinds("class A { static prototype() {} }"), vec![
    EarlyErrorKind::StaticPrototypeMethod
  ]);
  assert_eq!(script_kinds("class A { static constructor() {} prototype() {} }"), vec![]);
  // Class bodies are strict.
  assert_eq!(script_kinds("class A { m(eval) {} }"), vec![
    EarlyErrorKind::BindingIdentifierStrict("eval".into())
  ]);
}

#[test]
fn test_labelled_function_bodies() {
  assert_eq!(script_kinds("while (1) a: function f() {}"), vec![
    EarlyErrorKind::LabelledFunctionBody(LabelledFunctionParent::While)
  ]);
  let errors = script("if (1) a: function f() {}");
  assert_eq!(errors.len(), 1);
  assert_eq!(
    errors[0].message(),
    "The consequent of an if statement must not be a labeled function declaration"
  );
  assert_eq!(script_kinds("do a: function f() {} while (0)"), vec![
    EarlyErrorKind::LabelledFunctionBody(LabelledFunctionParent::DoWhile)
  ]);
  assert_eq!(script_kinds("'use strict'; a: function f() {}"), vec![
    EarlyErrorKind::LabelledFunctionStrict
  ]);
}

#[test]
fn test_statement_restrictions() {
  assert_eq!(script_kinds("const a;"), vec![EarlyErrorKind::ConstWithoutInitializer]);
  assert_eq!(script_kinds("for (const a;;) ;"), vec![
    EarlyErrorKind::ConstWithoutInitializer
  ]);
  assert_eq!(script_kinds("for (const a of b) ;"), vec![]);
  assert_eq!(script_kinds("let [let] = a;"), vec![EarlyErrorKind::LexicalLetBinding]);
  assert_eq!(script_kinds("'use strict'; if (a) function f() {}"), vec![
    EarlyErrorKind::FunctionDeclarationInIfStrict
  ]);
  assert_eq!(script_kinds("'use strict'; yield: ;"), vec![
    EarlyErrorKind::YieldLabelStrict
  ]);
}

#[test]
fn test_expression_restrictions() {
  assert_eq!(script_kinds("({ __proto__: 1, '__proto__': 2 })"), vec![
    EarlyErrorKind::DuplicateProto
  ]);
  assert_eq!(script_kinds("new.target"), vec![
    EarlyErrorKind::NewTargetOutsideFunction
  ]);
  assert_eq!(script_kinds("() => new.target"), vec![
    EarlyErrorKind::NewTargetOutsideFunction
  ]);
}

#[test]
fn test_module_exports() {
  let errors = module("export {a}; export {a as b};");
  assert_eq!(errors.len(), 2);
  assert!(errors
    .iter()
    .all(|e| e.kind == EarlyErrorKind::UndeclaredExport("a".into())));
  assert_eq!(module_kinds("var a; export {a}; export {a as b};"), vec![]);
  assert_eq!(module_kinds("var a, b; export {a}; export {b as a};"), vec![
    EarlyErrorKind::DuplicateExport("a".into())
  ]);
  assert_eq!(
    module_kinds("export default 1; export default function () {}"),
    vec![EarlyErrorKind::DuplicateExport("default".into())]
  );
  assert_eq!(module_kinds("export function f() {} export let f2, f;"), vec![
    EarlyErrorKind::DuplicateBinding("f".into()),
    EarlyErrorKind::DuplicateExport("f".into()),
  ]);
  assert_eq!(module_kinds("export {x} from 'm'; export * from 'n';"), vec![]);
  assert_eq!(module_kinds("import {a} from 'm'; export {a};"), vec![]);
}

#[test]
fn test_reserved_word_local_exports() {
  let errors = module("export {default};");
  assert_eq!(errors, vec![EarlyError::new(
    Loc(8, 15),
    EarlyErrorKind::ReservedWordExport("default".into())
  )]);
  assert_eq!(
    errors[0].message(),
    "Reserved word \"default\" cannot be exported as a local binding"
  );
  assert_eq!(module_kinds("export {if as x, null, await};"), vec![
    EarlyErrorKind::ReservedWordExport("if".into()),
    EarlyErrorKind::ReservedWordExport("null".into()),
    EarlyErrorKind::ReservedWordExport("await".into()),
  ]);
  // Re-exports name the other module's bindings, and aliases may be any name.
  assert_eq!(module_kinds("export {default} from 'm';"), vec![]);
  assert_eq!(module_kinds("var a; export {a as default};"), vec![]);
}

#[test]
fn test_module_code_is_strict() {
  assert_eq!(module_kinds("var eval;"), vec![EarlyErrorKind::BindingIdentifierStrict(
    "eval".into()
  )]);
  assert_eq!(module_kinds("import {a as a} from 'm'; let a;"), vec![
    EarlyErrorKind::DuplicateBinding("a".into())
  ]);
}

#[test]
fn test_errors_are_ordered_by_position() {
  let errors = script("break; continue; let x; let x;");
  let starts = errors.iter().map(|e| e.loc.0).collect::<Vec<_>>();
  let mut sorted = starts.clone();
  sorted.sort();
  assert_eq!(starts, sorted);
  assert_eq!(errors.len(), 3);
}
