use crate::parse_module;
use crate::parse_script;
use crate::util::test::evaluate_test_input_files;
use serde_json::Value;

fn parse_script_and_serialize(input: String) -> Value {
  let node = parse_script(&input).unwrap();
  serde_json::to_value(&node.stx.body).unwrap()
}

fn parse_module_and_serialize(input: String) -> Value {
  let node = parse_module(&input).unwrap();
  serde_json::to_value(&node.stx.body).unwrap()
}

#[test]
fn test_parse_script_statements() {
  evaluate_test_input_files("parse/tests/stmt/script", parse_script_and_serialize);
}

#[test]
fn test_parse_module_statements() {
  evaluate_test_input_files("parse/tests/stmt/module", parse_module_and_serialize);
}
