use crate::table::snapshot::EnvSnapshot;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

/// A single substitution: every occurrence of `value` becomes `reference`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
	/// Variable name, e.g. `HOME`.
	pub name: OsString,

	/// Literal value searched for in the input.
	pub value: OsString,

	/// Compact form written in place of the value, e.g. `$HOME`.
	pub reference: OsString,
}

impl Rule {
	fn new(name: &OsStr, value: &OsStr) -> Self {
		let mut reference = OsString::from("$");
		reference.push(name);

		Rule {
			name: name.to_os_string(),
			value: value.to_os_string(),
			reference,
		}
	}
}

/// Substitution rules in application order, plus the lookups built alongside them.
///
/// Rules are ordered longest value first, then shortest name first. That order
/// is fixed at construction and is the order rules are applied to each line.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
	rules: Vec<Rule>,

	/// Literal value -> index into `rules`.
	by_value: HashMap<OsString, usize>,

	/// Reference -> `NAME=` prefix marking a line that assigns that variable.
	guards: HashMap<OsString, OsString>,
}

impl RuleSet {
	/// Rules in application order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// The assignment guard (`NAME=`) for a reference such as `$NAME`.
	pub fn guard(&self, reference: impl AsRef<OsStr>) -> Option<&OsStr> {
		self.guards.get(reference.as_ref()).map(OsString::as_os_str)
	}

	/// Whether `line` is an assignment of the variable behind `rule`.
	pub fn is_assignment(&self, rule: &Rule, line: &[u8]) -> bool {
		self.guard(&rule.reference)
			.is_some_and(|guard| line.starts_with(guard.as_encoded_bytes()))
	}

	fn push(&mut self, name: &OsStr, value: &OsStr) {
		let rule = Rule::new(name, value);

		let mut guard = name.to_os_string();
		guard.push("=");

		self.by_value.insert(rule.value.clone(), self.rules.len());
		self.guards.insert(rule.reference.clone(), guard);
		self.rules.push(rule);
	}
}

/// Length in characters. Bytes that are not valid UTF-8 count one each.
fn char_len(s: &OsStr) -> usize {
	s.as_encoded_bytes()
		.utf8_chunks()
		.map(|chunk| chunk.valid().chars().count() + chunk.invalid().len())
		.sum()
}

/// Build the ordered rule set from an environment snapshot.
///
/// A variable becomes a rule only if its value is longer than its name and no
/// earlier (longer-valued or shorter-named) variable already claimed the same
/// value. Lengths are counted in characters.
pub fn build_rule_set(env: &EnvSnapshot) -> RuleSet {
	let mut candidates: Vec<(&OsStr, &OsStr, usize, usize)> = env
		.iter()
		.map(|(name, value)| (name, value, char_len(name), char_len(value)))
		.collect();

	// Name as the last key keeps the order total regardless of snapshot iteration order.
	candidates.sort_by_key(|&(name, _, name_len, value_len)| (Reverse(value_len), name_len, name));

	let mut set = RuleSet::default();
	for (name, value, name_len, value_len) in candidates {
		if value_len > name_len && !set.by_value.contains_key(value) {
			set.push(name, value);
		}
	}

	tracing::debug!(
		variables = env.len(),
		rules = set.len(),
		"built replacement table"
	);

	set
}
