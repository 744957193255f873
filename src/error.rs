/// Library-level structured errors for env-replace.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum EnvReplaceError {
	#[error("Failed to read input stream")]
	ReadInput {
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write output stream")]
	WriteOutput {
		#[source]
		source: std::io::Error,
	},
}

impl EnvReplaceError {
	/// Whether the downstream reader went away (e.g. `env-replace | head`).
	pub fn is_broken_pipe(&self) -> bool {
		match self {
			EnvReplaceError::WriteOutput { source } => {
				source.kind() == std::io::ErrorKind::BrokenPipe
			}
			EnvReplaceError::ReadInput { .. } => false,
		}
	}
}

/// Result type alias using EnvReplaceError.
pub type Result<T> = std::result::Result<T, EnvReplaceError>;

#[cfg(test)]
mod tests {
	use super::*;
	use std::io;

	#[test]
	fn test_broken_pipe_detection() {
		let err = EnvReplaceError::WriteOutput {
			source: io::Error::from(io::ErrorKind::BrokenPipe),
		};
		assert!(err.is_broken_pipe());

		let err = EnvReplaceError::WriteOutput {
			source: io::Error::from(io::ErrorKind::PermissionDenied),
		};
		assert!(!err.is_broken_pipe());

		let err = EnvReplaceError::ReadInput {
			source: io::Error::from(io::ErrorKind::BrokenPipe),
		};
		assert!(!err.is_broken_pipe());
	}
}
