use crate::error::{EnvReplaceError, Result};
use crate::table::Rule;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::io::Write;

/// Header line printed before the list of consumed rules.
pub const SUMMARY_HEADER: &str = "[env-replace] environment variables found in output:";

/// Rules that changed at least one line, keyed by reference (`$NAME`).
///
/// Iteration is sorted by reference, which is the order the summary is printed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumedRules {
	by_reference: BTreeMap<OsString, OsString>,
}

impl ConsumedRules {
	/// Record that `rule` fired. Returns true the first time a rule is seen.
	pub fn record(&mut self, rule: &Rule) -> bool {
		if self.by_reference.contains_key(&rule.reference) {
			return false;
		}
		self.by_reference.insert(rule.reference.clone(), rule.value.clone());
		true
	}

	/// The literal value recorded for a reference.
	pub fn get(&self, reference: impl AsRef<OsStr>) -> Option<&OsStr> {
		self.by_reference
			.get(reference.as_ref())
			.map(OsString::as_os_str)
	}

	pub fn len(&self) -> usize {
		self.by_reference.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_reference.is_empty()
	}

	/// (reference, value) pairs sorted by reference.
	pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
		self.by_reference
			.iter()
			.map(|(k, v)| (k.as_os_str(), v.as_os_str()))
	}
}

/// Write the trailing summary as shell `export` hints.
///
/// Nothing is written when no rule fired. Values are emitted verbatim as raw
/// bytes, without shell quoting.
pub fn write_summary<W: Write>(consumed: &ConsumedRules, output: &mut W) -> Result<()> {
	if consumed.is_empty() {
		return Ok(());
	}

	let write = |output: &mut W| -> std::io::Result<()> {
		writeln!(output)?;
		writeln!(output, "{SUMMARY_HEADER}")?;
		for (reference, value) in consumed.iter() {
			let reference = reference.as_encoded_bytes();
			let name = reference.strip_prefix(b"$").unwrap_or(reference);
			output.write_all(b"export ")?;
			output.write_all(name)?;
			output.write_all(b"=")?;
			output.write_all(value.as_encoded_bytes())?;
			output.write_all(b"\n")?;
		}
		output.flush()
	};

	write(output).map_err(|source| EnvReplaceError::WriteOutput { source })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::table::{EnvSnapshot, build_rule_set};

	fn rules(pairs: &[(&str, &str)]) -> Vec<Rule> {
		build_rule_set(&EnvSnapshot::from_pairs(pairs.iter().copied()))
			.rules()
			.to_vec()
	}

	#[test]
	fn test_record_first_fire_wins() {
		let rules = rules(&[("HOME", "/home/alice")]);
		let mut consumed = ConsumedRules::default();

		assert!(consumed.record(&rules[0]));
		assert!(!consumed.record(&rules[0]));
		assert_eq!(consumed.len(), 1);
		assert_eq!(consumed.get("$HOME"), Some(OsStr::new("/home/alice")));
	}

	#[test]
	fn test_empty_summary_writes_nothing() {
		let mut out = Vec::new();
		write_summary(&ConsumedRules::default(), &mut out).unwrap();
		assert!(out.is_empty());
	}

	#[test]
	fn test_summary_format_sorted_by_name() {
		let rules = rules(&[
			("ZETA", "/var/lib/zeta"),
			("HOME", "/home/alice"),
			("ALPHA", "/opt/alpha/x"),
		]);
		let mut consumed = ConsumedRules::default();
		for rule in &rules {
			consumed.record(rule);
		}

		let mut out = Vec::new();
		write_summary(&consumed, &mut out).unwrap();

		assert_eq!(
			String::from_utf8(out).unwrap(),
			"\n\
			[env-replace] environment variables found in output:\n\
			export ALPHA=/opt/alpha/x\n\
			export HOME=/home/alice\n\
			export ZETA=/var/lib/zeta\n"
		);
	}

	#[test]
	fn test_summary_values_not_quoted() {
		let rules = rules(&[("GREETING", "hello world; rm -rf")]);
		let mut consumed = ConsumedRules::default();
		consumed.record(&rules[0]);

		let mut out = Vec::new();
		write_summary(&consumed, &mut out).unwrap();

		assert!(
			String::from_utf8(out)
				.unwrap()
				.ends_with("export GREETING=hello world; rm -rf\n")
		);
	}

	#[cfg(unix)]
	#[test]
	fn test_summary_writes_raw_bytes() {
		use std::os::unix::ffi::OsStrExt;

		let set = build_rule_set(&EnvSnapshot::from_pairs([(
			OsStr::new("BIN"),
			OsStr::from_bytes(b"/data/\xff\xfe"),
		)]));
		let mut consumed = ConsumedRules::default();
		consumed.record(&set.rules()[0]);

		let mut out = Vec::new();
		write_summary(&consumed, &mut out).unwrap();

		assert!(out.ends_with(b"export BIN=/data/\xff\xfe\n"));
	}
}
