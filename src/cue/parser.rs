use tracing::trace;

use super::{
	commands,
	error::{
		ErrorCtx,
		ErrorKind,
	},
	tokenizer::tokenize,
	Cue,
	Error,
	File,
	Track,
};

/// The document under construction and the position commands apply to.
///
/// `file` indexes `cue.files`; `track` indexes that file's tracks.
#[derive(Debug, Default)]
pub(super) struct Builder {
	pub(super) cue: Cue,
	pub(super) file: Option<usize>,
	pub(super) track: Option<usize>,
}

impl Builder {
	pub(super) fn current_file_mut(&mut self) -> Option<&mut File> {
		let f = self.file?;
		self.cue.files.get_mut(f)
	}

	pub(super) fn current_track_mut(&mut self) -> Option<&mut Track> {
		let (f, t) = (self.file?, self.track?);
		self.cue.files.get_mut(f)?.tracks.get_mut(t)
	}

	pub(super) fn open_file(&mut self, file: File) {
		self.cue.files.push(file);
		self.file = Some(self.cue.files.len() - 1);
		self.track = None;
	}
}

/// Incremental cuesheet parser.
///
/// Lines are fed one at a time. [Parser::feed] takes the parser by value, so
/// a failed line drops the partially built document with it.
#[derive(Debug, Default)]
pub struct Parser {
	builder: Builder,
	ln: usize,
}

impl Parser {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of non-blank lines consumed so far.
	pub fn lines_read(&self) -> usize {
		self.ln
	}

	pub fn feed(mut self, line: &str) -> Result<Self, Error> {
		let line = line.trim();
		if line.is_empty() {
			return Ok(self);
		}

		self.ln += 1;
		let ln = self.ln;

		let (name, params) = tokenize(line).line(ln)?;
		let cmd = commands::lookup(name).line(ln)?;
		cmd.arity.check(cmd.name, params.len()).line(ln)?;

		trace!(line = ln, command = cmd.name, ?params, "dispatching");
		(cmd.handler)(&mut self.builder, &params)
			.map_err(|source| ErrorKind::Command {
				command: cmd.name,
				source,
			})
			.line(ln)?;

		Ok(self)
	}

	pub fn finish(self) -> Cue {
		self.builder.cue
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cue::{
		CommandError,
		DataType,
		DispatchError,
		FileType,
		TokenizeError,
	};

	fn feed_all(lines: &[&str]) -> Result<Parser, Error> {
		lines.iter().try_fold(Parser::new(), |p, l| p.feed(l))
	}

	#[test]
	fn blank_lines_do_not_count() {
		let e = feed_all(&["", "  ", "REM a", "\t", "FOO bar"]).unwrap_err();
		assert_eq!(e.line(), 2);
		assert_eq!(
			e.kind(),
			&ErrorKind::Dispatch(DispatchError::UnknownCommand("FOO".into()))
		);
		assert_eq!(e.to_string(), "Line 2. Unknown command 'FOO'");
	}

	#[test]
	fn tokenize_errors_carry_line_number() {
		let e = feed_all(&["REM ok", r"TITLE bad\"]).unwrap_err();
		assert_eq!(e.line(), 2);
		assert_eq!(e.kind(), &ErrorKind::Tokenize(TokenizeError::UnfinishedEscape));
	}

	#[test]
	fn command_names_are_case_sensitive() {
		let e = feed_all(&["title x"]).unwrap_err();
		assert_eq!(
			e.kind(),
			&ErrorKind::Dispatch(DispatchError::UnknownCommand("title".into()))
		);
	}

	#[test]
	fn arity_is_checked_before_handlers_run() {
		let e = feed_all(&["FILE a.wav"]).unwrap_err();
		assert_eq!(
			e.kind(),
			&ErrorKind::Dispatch(DispatchError::ParamCountMismatch {
				command: "FILE",
				actual: 1,
				expected: 2,
			})
		);
		let e = feed_all(&["CATALOG"]).unwrap_err();
		assert_eq!(
			e.kind(),
			&ErrorKind::Dispatch(DispatchError::ParamCountMismatch {
				command: "CATALOG",
				actual: 0,
				expected: 1,
			})
		);
	}

	#[test]
	fn file_resets_current_track() {
		let p = feed_all(&["FILE a.bin BINARY", "TRACK 1 MODE1/2352", "FILE b.wav WAVE"]).unwrap();
		assert_eq!(p.lines_read(), 3);
		assert_eq!(p.builder.file, Some(1));
		assert_eq!(p.builder.track, None);

		let cue = p.feed("TITLE Disc").unwrap().finish();
		assert_eq!(cue.title.as_deref(), Some("Disc"));
		assert_eq!(cue.files[0].file_type, FileType::Binary);
		assert_eq!(cue.files[0].tracks[0].data_type, DataType::Mode1_2352);
		assert_eq!(cue.files[0].tracks[0].title, None);
	}

	#[test]
	fn handler_errors_name_the_command() {
		let e = feed_all(&["CATALOG 12345"]).unwrap_err();
		assert_eq!(e.command(), Some("CATALOG"));
		assert_eq!(
			e.command_error(),
			Some(&CommandError::InvalidCatalog("12345".into()))
		);
	}
}
