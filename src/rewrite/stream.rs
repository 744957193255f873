use crate::error::{EnvReplaceError, Result};
use crate::rewrite::line::Rewriter;
use crate::rewrite::summary::{ConsumedRules, write_summary};
use crate::table::RuleSet;
use std::io::{BufRead, Write};

/// What happened during one pass over an input stream.
#[derive(Debug, Clone, Default)]
pub struct RewriteReport {
	/// Lines read (a final unterminated line counts).
	pub lines: usize,

	/// Lines whose content changed.
	pub rewritten_lines: usize,

	/// Rules that fired at least once.
	pub consumed: ConsumedRules,
}

/// Rewrite `input` into `output` line by line, then append the summary.
///
/// Lines are handled as raw bytes with their terminators intact. Each line is
/// written before the next one is read. The summary is written only after the
/// input is exhausted, and only if some rule fired.
pub fn rewrite_stream<R, W>(rules: &RuleSet, mut input: R, output: &mut W) -> Result<RewriteReport>
where
	R: BufRead,
	W: Write,
{
	let rewriter = Rewriter::new(rules);
	let mut report = RewriteReport::default();
	let mut line = Vec::new();

	loop {
		line.clear();
		let read = input
			.read_until(b'\n', &mut line)
			.map_err(|source| EnvReplaceError::ReadInput { source })?;
		if read == 0 {
			break;
		}

		report.lines += 1;
		let rewritten = rewriter.rewrite_line(&line, &mut report.consumed);
		if rewritten != line {
			report.rewritten_lines += 1;
		}

		output
			.write_all(&rewritten)
			.map_err(|source| EnvReplaceError::WriteOutput { source })?;
	}

	write_summary(&report.consumed, output)?;
	output
		.flush()
		.map_err(|source| EnvReplaceError::WriteOutput { source })?;

	tracing::debug!(
		lines = report.lines,
		rewritten = report.rewritten_lines,
		consumed = report.consumed.len(),
		"finished rewriting input"
	);

	Ok(report)
}
