use parse_es::early::EarlyErrorKind;
use parse_es::loc::Loc;
use parse_es::parse;
use parse_es::parse_module;
use parse_es::parse_with_options;
use parse_es::validate;
use parse_es::ParseOptions;
use parse_es::SourceType;
use serde_json::json;

const LIBRARY: &str = r#"
'use strict';
var cache = Object.create(null);
function memo(key, compute) {
  if (key in cache) return cache[key];
  for (let i = 0, n = 3; i < n; i++) {
    try {
      return cache[key] = compute(key);
    } catch (err) {
      if (i === n - 1) throw err;
      continue;
    }
  }
}
class Store extends Base {
  constructor(...items) {
    super(items);
    this.items = items;
  }
  static of(a, b = a) { return new Store(a, b); }
  get size() { return this.items.length; }
  *[Symbol.iterator]() { yield* this.items; }
}
outer: for (const [k, v] of Object.entries(cache)) {
  switch (typeof v) {
    case 'function': continue outer;
    default: break outer;
  }
}
async function load(url) {
  const { body = '' } = await fetch(url);
  return (x => x.trim())(body);
}
"#;

#[test]
fn realistic_strict_script_has_no_early_errors() {
  let top = parse(LIBRARY).unwrap();
  assert_eq!(validate(&top), vec![]);
}

#[test]
fn illegal_break_is_reported_once() {
  let errors = validate(&parse("break;").unwrap());
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].kind, EarlyErrorKind::FreeBreak);
  assert_eq!(errors[0].loc, Loc(0, 6));
}

#[test]
fn strict_conditional_errors_are_promoted_by_the_directive() {
  let kinds = |src: &str| -> Vec<EarlyErrorKind> {
    validate(&parse(src).unwrap()).into_iter().map(|e| e.kind).collect()
  };
  assert_eq!(kinds("var eval = 1;"), vec![]);
  assert_eq!(kinds("'use strict'; var eval = 1;"), vec![
    EarlyErrorKind::BindingIdentifierStrict("eval".into())
  ]);
  assert_eq!(kinds("with (a) {} function f() { 'use strict'; }"), vec![]);
  assert_eq!(kinds("function f() { 'use strict'; with (a) {} }"), vec![
    EarlyErrorKind::WithStrict
  ]);
}

#[test]
fn duplicate_lexical_binding_points_at_second_declaration() {
  let errors = validate(&parse("{ let x; let x; }").unwrap());
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].kind, EarlyErrorKind::DuplicateBinding("x".into()));
  assert_eq!(errors[0].loc, Loc(13, 14));
  assert_eq!(errors[0].message(), "Duplicate binding \"x\"");
  assert_eq!(
    errors[0].to_string(),
    "Duplicate binding \"x\" around loc [13:14]"
  );
}

#[test]
fn super_call_outside_derived_constructor() {
  let errors = validate(&parse("function f(){ super(); }").unwrap());
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].kind, EarlyErrorKind::SuperCall);
}

#[test]
fn undeclared_exports_do_not_count_as_duplicates() {
  let errors = validate(&parse_module("export {a}; export {a as b};").unwrap());
  assert!(!errors.is_empty());
  assert!(errors
    .iter()
    .all(|e| e.kind == EarlyErrorKind::UndeclaredExport("a".into())));
  assert_eq!(errors[0].message(), "Exported binding \"a\" is not declared");
}

#[test]
fn yield_and_await_in_parameters() {
  let kinds = |src: &str| -> Vec<EarlyErrorKind> {
    validate(&parse(src).unwrap()).into_iter().map(|e| e.kind).collect()
  };
  assert_eq!(kinds("function* g(a = yield) {}"), vec![
    EarlyErrorKind::YieldInGeneratorParameters
  ]);
  assert_eq!(kinds("function* g() { (a = yield) => a; }"), vec![
    EarlyErrorKind::YieldInArrowParameters
  ]);
  assert_eq!(kinds("async function f(a = await 1) {}"), vec![
    EarlyErrorKind::AwaitInAsyncParameters
  ]);
  assert_eq!(kinds("function f(a = 1) { 'use strict'; }"), vec![
    EarlyErrorKind::UseStrictWithNonSimpleParameters
  ]);
}

#[test]
fn diagnostics_do_not_depend_on_locations() {
  let source = "let a; { const b; } a: a: ; break;";
  let plain = validate(&parse(source).unwrap());
  let spanned = validate(
    &parse_with_options(source, ParseOptions {
      source_type: SourceType::Script,
      locations: true,
    })
    .unwrap(),
  );
  assert_eq!(plain, spanned);
  assert_eq!(plain, validate(&parse(source).unwrap()));
  assert_eq!(plain.len(), 3);
}

#[test]
fn diagnostics_serialize() {
  let errors = validate(&parse("continue; while (1) break a;").unwrap());
  assert_eq!(
    serde_json::to_value(&errors).unwrap(),
    json!([
      { "loc": [0, 9], "kind": "FreeContinue" },
      { "loc": [20, 28], "kind": { "UnboundBreak": "a" } },
    ])
  );
}
