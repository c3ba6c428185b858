use thiserror::Error;

/// A line could not be split into a command and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
	#[error("Unfinished escape sequence")]
	UnfinishedEscape,
	#[error("Unsupported escape sequence '{0}'")]
	UnsupportedEscape(String),
}

/// A tokenized line does not match any registered command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
	#[error("Unknown command '{0}'")]
	UnknownCommand(String),
	#[error("Command {command}: received {actual} parameters but {expected} expected")]
	ParamCountMismatch {
		command: &'static str,
		actual: usize,
		expected: usize,
	},
}

/// A command was recognized but its parameters or position are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
	#[error("{0} is not valid catalog number")]
	InvalidCatalog(String),
	#[error("Unknown file type {0}")]
	UnknownFileType(String),
	#[error("Unknown track datatype {0}")]
	UnknownDataType(String),
	#[error("Unknown track flag {0}")]
	UnknownFlag(String),
	#[error("{0} is not valid ISRC number")]
	InvalidIsrc(String),
	#[error("Failed to parse track number parameter {0}. Value should be in 1..99 range.")]
	InvalidTrackNumber(String),
	#[error("Unexpected TRACK command. FILE command expected first.")]
	FileRequiredBeforeTrack,
	#[error("TRACK command should appear before FLAGS command")]
	TrackRequiredBeforeFlags,
	#[error("TRACK command should appear before ISRC command")]
	TrackRequiredBeforeIsrc,
	#[error("Expected track number {expected}, but {actual} received.")]
	TrackSequenceError { expected: u8, actual: u8 },

	#[error("TRACK command should appear before INDEX command")]
	TrackRequiredBeforeIndex,
	#[error("TRACK command should appear before PREGAP command")]
	TrackRequiredBeforePregap,
	#[error("TRACK command should appear before POSTGAP command")]
	TrackRequiredBeforePostgap,
	#[error("Failed to parse index number parameter {0}. Value should be in 0..99 range.")]
	InvalidIndexNumber(String),
	#[error("Expected index number {expected}, but {actual} received.")]
	IndexSequenceError { expected: String, actual: u8 },
	#[error("{0} is not valid mm:ss:ff time")]
	InvalidTimestamp(String),
	#[error("PREGAP command should appear before any INDEX command of the track")]
	PregapAfterIndex,
	#[error("POSTGAP command should appear after the INDEX commands of the track")]
	PostgapBeforeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
	#[error(transparent)]
	Tokenize(#[from] TokenizeError),
	#[error(transparent)]
	Dispatch(#[from] DispatchError),
	#[error("Failed to parse {command} command. {source}")]
	Command {
		command: &'static str,
		source: CommandError,
	},
}

/// The first error of a parse, tagged with the 1-based number of the
/// non-blank line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}. {kind}")]
pub struct Error {
	line: usize,
	kind: ErrorKind,
}

impl Error {
	pub fn line(&self) -> usize {
		self.line
	}

	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Name of the command whose handler failed, if the line got that far.
	pub fn command(&self) -> Option<&'static str> {
		match &self.kind {
			ErrorKind::Command { command, .. } => Some(*command),
			ErrorKind::Dispatch(DispatchError::ParamCountMismatch { command, .. }) => {
				Some(*command)
			}
			_ => None,
		}
	}

	/// The handler error, if any.
	pub fn command_error(&self) -> Option<&CommandError> {
		match &self.kind {
			ErrorKind::Command { source, .. } => Some(source),
			_ => None,
		}
	}
}

pub trait ErrorCtx<T> {
	fn line(self, ln: usize) -> Result<T, Error>;
}

impl<T, E> ErrorCtx<T> for Result<T, E>
where
	E: Into<ErrorKind>,
{
	fn line(self, ln: usize) -> Result<T, Error> {
		self.map_err(|e| Error {
			line: ln,
			kind: e.into(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokenize_errors_have_no_command_prefix() {
		let e = Err::<(), _>(TokenizeError::UnfinishedEscape)
			.line(3)
			.unwrap_err();
		assert_eq!(e.to_string(), "Line 3. Unfinished escape sequence");
		assert_eq!(e.command(), None);
	}

	#[test]
	fn handler_errors_name_the_command() {
		let e = Err::<(), _>(ErrorKind::Command {
			command: "CATALOG",
			source: CommandError::InvalidCatalog("12345".into()),
		})
		.line(1)
		.unwrap_err();

		assert_eq!(
			e.to_string(),
			"Line 1. Failed to parse CATALOG command. 12345 is not valid catalog number"
		);
		assert_eq!(e.command(), Some("CATALOG"));
		assert_eq!(
			e.command_error(),
			Some(&CommandError::InvalidCatalog("12345".into()))
		);
	}

	#[test]
	fn param_count_mismatch_reports_both_counts() {
		let e = Err::<(), _>(DispatchError::ParamCountMismatch {
			command: "FILE",
			actual: 1,
			expected: 2,
		})
		.line(7)
		.unwrap_err();
		assert_eq!(
			e.to_string(),
			"Line 7. Command FILE: received 1 parameters but 2 expected"
		);
	}
}
