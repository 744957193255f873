use crate::rewrite::summary::ConsumedRules;
use crate::table::RuleSet;
use memchr::memmem::Finder;
use std::borrow::Cow;

/// Replace every non-overlapping occurrence of `needle` in `haystack`, left to right.
///
/// Returns the input unchanged (borrowed) when there is nothing to replace.
pub fn replace_all<'h>(haystack: &'h [u8], needle: &[u8], replacement: &[u8]) -> Cow<'h, [u8]> {
	replace_with(haystack, &Finder::new(needle), replacement)
}

fn replace_with<'h>(
	haystack: &'h [u8],
	finder: &Finder<'_>,
	replacement: &[u8],
) -> Cow<'h, [u8]> {
	let needle_len = finder.needle().len();
	if needle_len == 0 {
		return Cow::Borrowed(haystack);
	}

	let mut matches = finder.find_iter(haystack).peekable();
	if matches.peek().is_none() {
		return Cow::Borrowed(haystack);
	}

	let mut out = Vec::with_capacity(haystack.len());
	let mut last = 0;
	for start in matches {
		out.extend_from_slice(&haystack[last..start]);
		out.extend_from_slice(replacement);
		last = start + needle_len;
	}
	out.extend_from_slice(&haystack[last..]);

	Cow::Owned(out)
}

/// Applies a rule set to individual lines.
///
/// Holds one precompiled substring searcher per rule so the per-line loop does
/// no setup work.
#[derive(Debug)]
pub struct Rewriter<'a> {
	rules: &'a RuleSet,
	finders: Vec<Finder<'a>>,
}

impl<'a> Rewriter<'a> {
	pub fn new(rules: &'a RuleSet) -> Self {
		let finders = rules
			.rules()
			.iter()
			.map(|rule| Finder::new(rule.value.as_encoded_bytes()))
			.collect();

		Rewriter { rules, finders }
	}

	/// Rewrite one line (terminator included), recording rules that changed it.
	///
	/// Rules are applied in order, each to the output of the previous one. A rule
	/// is skipped for a line that starts with its `NAME=` guard.
	pub fn rewrite_line(&self, line: &[u8], consumed: &mut ConsumedRules) -> Vec<u8> {
		let mut current = line.to_vec();

		for (rule, finder) in self.rules.rules().iter().zip(&self.finders) {
			if self.rules.is_assignment(rule, &current) {
				continue;
			}

			let reference = rule.reference.as_encoded_bytes();
			let replaced = match replace_with(&current, finder, reference) {
				Cow::Borrowed(_) => continue,
				Cow::Owned(replaced) => replaced,
			};

			if replaced != current {
				if consumed.record(rule) {
					tracing::trace!(reference = ?rule.reference, "first substitution");
				}
				current = replaced;
			}
		}

		current
	}
}
