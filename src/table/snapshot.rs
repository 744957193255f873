use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

/// An immutable view of the environment, taken once before any input is read.
///
/// Names and values are kept as OS strings, so entries that are not valid
/// UTF-8 still take part in substitution.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
	vars: HashMap<OsString, OsString>,
}

impl EnvSnapshot {
	/// Snapshot the current process environment.
	pub fn from_process() -> Self {
		EnvSnapshot {
			vars: std::env::vars_os().collect(),
		}
	}

	/// Build a snapshot from explicit name/value pairs (useful for testing).
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<OsString>,
		V: Into<OsString>,
	{
		EnvSnapshot {
			vars: pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	/// Number of variables in the snapshot.
	pub fn len(&self) -> usize {
		self.vars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vars.is_empty()
	}

	/// Iterate over (name, value) pairs in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
		self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
	}
}
