use std::fmt;

use tracing::debug;

use super::{
	error::{
		CommandError,
		DispatchError,
	},
	fields::{
		self,
		DataType,
		FileType,
		Flag,
		Msf,
	},
	parser::Builder,
	Cue,
	File,
	Index,
	Track,
};

/// Number of parameters a command takes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
	Exactly(usize),
	/// Zero or more.
	Variadic,
}

impl Arity {
	pub fn check(self, command: &'static str, actual: usize) -> Result<(), DispatchError> {
		match self {
			Self::Exactly(expected) if expected != actual => {
				Err(DispatchError::ParamCountMismatch {
					command,
					actual,
					expected,
				})
			}
			_ => Ok(()),
		}
	}
}

type Handler = fn(&mut Builder, &[String]) -> Result<(), CommandError>;

/// An entry of the command table.
pub struct Command {
	pub name: &'static str,
	pub arity: Arity,
	pub(super) handler: Handler,
}

impl fmt::Debug for Command {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Command")
			.field("name", &self.name)
			.field("arity", &self.arity)
			.finish_non_exhaustive()
	}
}

macro_rules! commands {
	[$($name:literal => ($arity:expr, $handler:ident),)+] => {
		&[$(Command { name: $name, arity: $arity, handler: $handler },)+]
	};
}

use Arity::{
	Exactly,
	Variadic,
};

// Sorted by name for binary search.
static COMMANDS: &[Command] = commands![
	"CATALOG" => (Exactly(1), catalog),
	"CDTEXTFILE" => (Exactly(1), cd_text_file),
	"FILE" => (Exactly(2), file),
	"FLAGS" => (Variadic, flags),
	"INDEX" => (Exactly(2), index),
	"ISRC" => (Exactly(1), isrc),
	"PERFORMER" => (Exactly(1), performer),
	"POSTGAP" => (Exactly(1), postgap),
	"PREGAP" => (Exactly(1), pregap),
	"REM" => (Variadic, rem),
	"SONGWRITER" => (Exactly(1), songwriter),
	"TITLE" => (Exactly(1), title),
	"TRACK" => (Exactly(2), track),
];

/// Finds the table entry for a command name. Matching is case-sensitive.
pub fn lookup(name: &str) -> Result<&'static Command, DispatchError> {
	COMMANDS
		.binary_search_by(|c| c.name.cmp(name))
		.map(|i| &COMMANDS[i])
		.map_err(|_| DispatchError::UnknownCommand(name.to_string()))
}

/// All registered commands, in name order.
pub fn registry() -> &'static [Command] {
	COMMANDS
}

fn catalog(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	b.cue.catalog = Some(fields::catalog(&p[0])?);
	Ok(())
}

fn cd_text_file(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	b.cue.cd_text_file = Some(p[0].clone());
	Ok(())
}

fn file(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	let file_type = p[1].parse::<FileType>()?;
	debug!(file = %p[0], %file_type, "opening file");

	b.open_file(File {
		name: p[0].clone(),
		file_type,
		tracks: Vec::new(),
	});
	Ok(())
}

fn track(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	let file = b
		.current_file_mut()
		.ok_or(CommandError::FileRequiredBeforeTrack)?;
	let number = fields::track_number(&p[0])?;
	let data_type = p[1].parse::<DataType>()?;

	let expected = file.tracks.last().map_or(1, |t| t.number + 1);
	if number != expected {
		return Err(CommandError::TrackSequenceError {
			expected,
			actual: number,
		});
	}

	debug!(file = %file.name, number, %data_type, "opening track");
	file.tracks.push(Track::new(number, data_type));
	let i = file.tracks.len() - 1;
	b.track = Some(i);
	Ok(())
}

fn flags(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	let track = b
		.current_track_mut()
		.ok_or(CommandError::TrackRequiredBeforeFlags)?;
	let flags = p
		.iter()
		.map(|s| s.parse::<Flag>())
		.collect::<Result<Vec<_>, _>>()?;

	track.flags.extend(flags);
	Ok(())
}

fn isrc(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	let track = b
		.current_track_mut()
		.ok_or(CommandError::TrackRequiredBeforeIsrc)?;
	track.isrc = Some(fields::isrc(&p[0])?);
	Ok(())
}

fn index(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	let track = b
		.current_track_mut()
		.ok_or(CommandError::TrackRequiredBeforeIndex)?;
	let number = fields::index_number(&p[0])?;
	let position = p[1].parse::<Msf>()?;

	match track.indexes.last() {
		Some(prev) if number != prev.number + 1 => {
			return Err(CommandError::IndexSequenceError {
				expected: (prev.number + 1).to_string(),
				actual: number,
			});
		}
		None if number > 1 => {
			return Err(CommandError::IndexSequenceError {
				expected: "0 or 1".into(),
				actual: number,
			});
		}
		_ => (),
	}

	track.indexes.push(Index { number, position });
	Ok(())
}

fn pregap(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	let track = b
		.current_track_mut()
		.ok_or(CommandError::TrackRequiredBeforePregap)?;
	if !track.indexes.is_empty() {
		return Err(CommandError::PregapAfterIndex);
	}

	track.pregap = Some(p[0].parse()?);
	Ok(())
}

fn postgap(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	let track = b
		.current_track_mut()
		.ok_or(CommandError::TrackRequiredBeforePostgap)?;
	if track.indexes.is_empty() {
		return Err(CommandError::PostgapBeforeIndex);
	}

	track.postgap = Some(p[0].parse()?);
	Ok(())
}

// Performer, title and songwriter belong to the open track, or to the disc
// before the first track of the current file.
fn set_text(
	b: &mut Builder,
	value: &str,
	on_track: fn(&mut Track) -> &mut Option<String>,
	on_disc: fn(&mut Cue) -> &mut Option<String>,
) {
	let value = fields::text(value);
	match b.current_track_mut() {
		Some(t) => *on_track(t) = Some(value),
		None => *on_disc(&mut b.cue) = Some(value),
	}
}

fn performer(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	set_text(b, &p[0], |t| &mut t.performer, |c| &mut c.performer);
	Ok(())
}

fn title(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	set_text(b, &p[0], |t| &mut t.title, |c| &mut c.title);
	Ok(())
}

fn songwriter(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	set_text(b, &p[0], |t| &mut t.songwriter, |c| &mut c.songwriter);
	Ok(())
}

fn rem(b: &mut Builder, p: &[String]) -> Result<(), CommandError> {
	b.cue.comments.push(p.join(" "));
	Ok(())
}
