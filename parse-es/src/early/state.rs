use super::EarlyError;
use super::EarlyErrorKind;
use crate::loc::Loc;
use ahash::HashSet;
use ahash::HashSetExt;
use std::iter::Sum;
use std::ops::Add;

/// Names with the locations they occur at, in source order. The same name may appear more than once.
#[derive(Clone, Debug, Default)]
pub struct Names(Vec<(String, Loc)>);

impl Names {
  pub fn insert(&mut self, name: impl Into<String>, loc: Loc) {
    self.0.push((name.into(), loc));
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.iter().any(|(n, _)| n == name)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Loc)> {
    self.0.iter().map(|(n, l)| (n.as_str(), *l))
  }

  pub fn remove(&mut self, name: &str) {
    self.0.retain(|(n, _)| n != name);
  }

  pub fn append(&mut self, other: Names) {
    self.0.extend(other.0);
  }

  /// Restores source order after merging names collected separately.
  pub fn sort(&mut self) {
    self.0.sort_by_key(|(_, l)| l.0);
  }

  /// Every occurrence after the first of each name.
  pub fn repeats(&self) -> Vec<(&str, Loc)> {
    let mut seen = HashSet::new();
    self
      .0
      .iter()
      .filter(|(n, _)| !seen.insert(n.as_str()))
      .map(|(n, l)| (n.as_str(), *l))
      .collect()
  }
}

/// Everything the checks need to know about a subtree that its ancestors can still act on.
///
/// States of sibling subtrees combine with `+` in source order. Transforms consume the state and return the adjusted one.
#[derive(Clone, Debug, Default)]
pub struct EarlyErrorState {
  pub errors: Vec<EarlyError>,
  // Only errors if the surrounding code is strict; promoted by `enforce_strict`.
  pub strict_errors: Vec<EarlyError>,

  pub used_label_names: Vec<String>,
  pub free_break: Vec<Loc>,
  pub free_continue: Vec<Loc>,
  pub free_labelled_break: Names,
  pub free_labelled_continue: Names,

  pub new_target: Vec<Loc>,

  // Bindings not yet assigned to a kind by their declaration.
  pub bound: Names,
  // The lexical names of the immediately enclosed block, kept for catch clauses.
  pub previous_lexical: Names,
  pub lexical: Names,
  // Function declarations directly in a block or function body.
  pub function_names: Names,
  pub var: Names,
  pub for_of_var: Names,

  pub exported_names: Names,
  pub exported_bindings: Names,

  pub super_calls: Vec<Loc>,
  pub super_calls_in_constructor: Vec<Loc>,
  pub super_properties: Vec<Loc>,
  pub yields: Vec<Loc>,
  pub awaits: Vec<Loc>,
}

impl Add for EarlyErrorState {
  type Output = EarlyErrorState;

  fn add(mut self, rhs: Self) -> Self::Output {
    self.errors.extend(rhs.errors);
    self.strict_errors.extend(rhs.strict_errors);
    self.used_label_names.extend(rhs.used_label_names);
    self.free_break.extend(rhs.free_break);
    self.free_continue.extend(rhs.free_continue);
    self.free_labelled_break.append(rhs.free_labelled_break);
    self.free_labelled_continue.append(rhs.free_labelled_continue);
    self.new_target.extend(rhs.new_target);
    self.bound.append(rhs.bound);
    self.previous_lexical.append(rhs.previous_lexical);
    self.lexical.append(rhs.lexical);
    self.function_names.append(rhs.function_names);
    self.var.append(rhs.var);
    self.for_of_var.append(rhs.for_of_var);
    self.exported_names.append(rhs.exported_names);
    self.exported_bindings.append(rhs.exported_bindings);
    self.super_calls.extend(rhs.super_calls);
    self.super_calls_in_constructor.extend(rhs.super_calls_in_constructor);
    self.super_properties.extend(rhs.super_properties);
    self.yields.extend(rhs.yields);
    self.awaits.extend(rhs.awaits);
    self
  }
}

impl Sum for EarlyErrorState {
  fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(EarlyErrorState::default(), |a, b| a + b)
  }
}

impl EarlyErrorState {
  pub fn add_error(mut self, loc: Loc, kind: EarlyErrorKind) -> Self {
    self.errors.push(EarlyError::new(loc, kind));
    self
  }

  pub fn add_strict_error(mut self, loc: Loc, kind: EarlyErrorKind) -> Self {
    self.strict_errors.push(EarlyError::new(loc, kind));
    self
  }

  pub fn enforce_strict(mut self) -> Self {
    self.errors.append(&mut self.strict_errors);
    self
  }

  pub fn add_errors(self, locs: &[Loc], kind: EarlyErrorKind) -> Self {
    locs
      .iter()
      .fold(self, |s, loc| s.add_error(*loc, kind.clone()))
  }

  // Bindings.

  pub fn bind_name(mut self, name: &str, loc: Loc) -> Self {
    self.bound.insert(name, loc);
    self
  }

  pub fn clear_bound_names(mut self) -> Self {
    self.bound = Names::default();
    self
  }

  pub fn observe_lexical_declaration(mut self) -> Self {
    let bound = std::mem::take(&mut self.bound);
    self.lexical.append(bound);
    self
  }

  pub fn observe_var_declaration(mut self) -> Self {
    let bound = std::mem::take(&mut self.bound);
    self.var.append(bound);
    self
  }

  pub fn record_for_of_vars(mut self) -> Self {
    self.for_of_var.append(self.var.clone());
    self
  }

  pub fn observe_lexical_boundary(mut self) -> Self {
    self.previous_lexical = std::mem::take(&mut self.lexical);
    self.function_names = Names::default();
    self
  }

  pub fn observe_var_boundary(mut self) -> Self {
    self.lexical = Names::default();
    self.previous_lexical = Names::default();
    self.function_names = Names::default();
    self.var = Names::default();
    self.for_of_var = Names::default();
    self
  }

  /// A function declaration ends its own var scope, then binds its name in the enclosing one.
  pub fn observe_function_declaration(self) -> Self {
    let mut s = self.observe_var_boundary();
    let bound = std::mem::take(&mut s.bound);
    s.function_names.append(bound);
    s
  }

  /// Block-level function declarations behave as lexical declarations.
  pub fn function_names_are_lexical(mut self) -> Self {
    let names = std::mem::take(&mut self.function_names);
    self.lexical.append(names);
    self.lexical.sort();
    self
  }

  fn repeated_lexical_names(&self) -> Vec<(String, Loc)> {
    self
      .lexical
      .repeats()
      .into_iter()
      .map(|(n, l)| (n.to_string(), l))
      .collect()
  }

  pub fn enforce_duplicate_lexically_declared_names(self) -> Self {
    let repeats = self.repeated_lexical_names();
    repeats.into_iter().fold(self, |s, (name, loc)| {
      s.add_error(loc, EarlyErrorKind::DuplicateBinding(name))
    })
  }

  /// Repeated parameter names. Simple parameter lists of plain functions only forbid them in strict code.
  pub fn enforce_duplicate_parameters(self, strict_only: bool) -> Self {
    let repeats = self.repeated_lexical_names();
    repeats.into_iter().fold(self, |s, (name, loc)| {
      let kind = EarlyErrorKind::DuplicateBinding(name);
      if strict_only {
        s.add_strict_error(loc, kind)
      } else {
        s.add_error(loc, kind)
      }
    })
  }

  /// Reports each lexical name that also occurs in `other`.
  pub fn enforce_conflicting_lexically_declared_names(self, other: &Names) -> Self {
    let conflicts = self
      .lexical
      .iter()
      .filter(|(n, _)| other.contains(n))
      .map(|(n, l)| (n.to_string(), l))
      .collect::<Vec<_>>();
    conflicts.into_iter().fold(self, |s, (name, loc)| {
      s.add_error(loc, EarlyErrorKind::DuplicateBinding(name))
    })
  }

  // Labels and jumps.

  pub fn add_free_break(mut self, loc: Loc) -> Self {
    self.free_break.push(loc);
    self
  }

  pub fn add_free_continue(mut self, loc: Loc) -> Self {
    self.free_continue.push(loc);
    self
  }

  pub fn add_free_labelled_break(mut self, label: &str, loc: Loc) -> Self {
    self.free_labelled_break.insert(label, loc);
    self
  }

  pub fn add_free_labelled_continue(mut self, label: &str, loc: Loc) -> Self {
    self.free_labelled_continue.insert(label, loc);
    self
  }

  pub fn clear_free_break(mut self) -> Self {
    self.free_break.clear();
    self
  }

  pub fn clear_free_continue(mut self) -> Self {
    self.free_continue.clear();
    self
  }

  /// A label around an iteration statement binds both `break` and `continue`; any other statement only `break`.
  pub fn observe_label(mut self, label: &str, iteration: bool) -> Self {
    self.free_labelled_break.remove(label);
    if iteration {
      self.free_labelled_continue.remove(label);
    };
    self.used_label_names.push(label.to_string());
    self
  }

  pub fn clear_used_label_names(mut self) -> Self {
    self.used_label_names.clear();
    self
  }

  pub fn enforce_free_break_and_continue(self) -> Self {
    let free_break = self.free_break.clone();
    let free_continue = self.free_continue.clone();
    let labelled_break = self
      .free_labelled_break
      .iter()
      .map(|(n, l)| (n.to_string(), l))
      .collect::<Vec<_>>();
    let labelled_continue = self
      .free_labelled_continue
      .iter()
      .map(|(n, l)| (n.to_string(), l))
      .collect::<Vec<_>>();
    let mut s = self
      .add_errors(&free_break, EarlyErrorKind::FreeBreak)
      .add_errors(&free_continue, EarlyErrorKind::FreeContinue);
    for (label, loc) in labelled_break {
      s = s.add_error(loc, EarlyErrorKind::UnboundBreak(label));
    }
    for (label, loc) in labelled_continue {
      s = s.add_error(loc, EarlyErrorKind::UnboundContinue(label));
    }
    s.free_break.clear();
    s.free_continue.clear();
    s.free_labelled_break = Names::default();
    s.free_labelled_continue = Names::default();
    s
  }

  // Function context.

  pub fn observe_new_target(mut self, loc: Loc) -> Self {
    self.new_target.push(loc);
    self
  }

  pub fn clear_new_target(mut self) -> Self {
    self.new_target.clear();
    self
  }

  pub fn enforce_new_target(self) -> Self {
    let locs = self.new_target.clone();
    let mut s = self.add_errors(&locs, EarlyErrorKind::NewTargetOutsideFunction);
    s.new_target.clear();
    s
  }

  pub fn observe_super_call(mut self, loc: Loc) -> Self {
    self.super_calls.push(loc);
    self
  }

  pub fn observe_super_property(mut self, loc: Loc) -> Self {
    self.super_properties.push(loc);
    self
  }

  /// Super calls directly in a class constructor are allowed if the class has a heritage.
  pub fn observe_constructor_method(mut self) -> Self {
    let calls = std::mem::take(&mut self.super_calls);
    self.super_calls_in_constructor.extend(calls);
    self
  }

  pub fn clear_super_calls_in_constructor(mut self) -> Self {
    self.super_calls_in_constructor.clear();
    self
  }

  pub fn clear_super_properties(mut self) -> Self {
    self.super_properties.clear();
    self
  }

  pub fn enforce_super_calls_in_constructor(self) -> Self {
    let locs = self.super_calls_in_constructor.clone();
    let mut s = self.add_errors(&locs, EarlyErrorKind::SuperCall);
    s.super_calls_in_constructor.clear();
    s
  }

  pub fn enforce_super_calls(self) -> Self {
    let locs = self
      .super_calls
      .iter()
      .chain(self.super_calls_in_constructor.iter())
      .copied()
      .collect::<Vec<_>>();
    let mut s = self.add_errors(&locs, EarlyErrorKind::SuperCall);
    s.super_calls.clear();
    s.super_calls_in_constructor.clear();
    s
  }

  pub fn enforce_super_properties(self) -> Self {
    let locs = self.super_properties.clone();
    let mut s = self.add_errors(&locs, EarlyErrorKind::SuperProperty);
    s.super_properties.clear();
    s
  }

  pub fn observe_yield(mut self, loc: Loc) -> Self {
    self.yields.push(loc);
    self
  }

  pub fn observe_await(mut self, loc: Loc) -> Self {
    self.awaits.push(loc);
    self
  }

  pub fn clear_yields(mut self) -> Self {
    self.yields.clear();
    self
  }

  pub fn clear_awaits(mut self) -> Self {
    self.awaits.clear();
    self
  }

  // Modules.

  pub fn export_name(mut self, name: &str, loc: Loc) -> Self {
    self.exported_names.insert(name, loc);
    self
  }

  pub fn export_binding(mut self, name: &str, loc: Loc) -> Self {
    self.exported_bindings.insert(name, loc);
    self
  }

  /// Exported declarations export every name they declare under the same name.
  pub fn export_declared_names(mut self) -> Self {
    for (name, loc) in self.lexical.iter().chain(self.var.iter()) {
      self.exported_names.insert(name, loc);
    }
    self
  }

  pub fn enforce_duplicate_exported_names(self) -> Self {
    let repeats = self
      .exported_names
      .repeats()
      .into_iter()
      .map(|(n, l)| (n.to_string(), l))
      .collect::<Vec<_>>();
    repeats.into_iter().fold(self, |s, (name, loc)| {
      s.add_error(loc, EarlyErrorKind::DuplicateExport(name))
    })
  }

  pub fn enforce_exported_bindings_declared(self) -> Self {
    let undeclared = self
      .exported_bindings
      .iter()
      .filter(|(n, _)| !self.lexical.contains(n) && !self.var.contains(n))
      .map(|(n, l)| (n.to_string(), l))
      .collect::<Vec<_>>();
    let mut s = undeclared.into_iter().fold(self, |s, (name, loc)| {
      s.add_error(loc, EarlyErrorKind::UndeclaredExport(name))
    });
    s.exported_bindings = Names::default();
    s
  }
}
