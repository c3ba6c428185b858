mod commands;
mod error;
mod fields;
mod parser;
mod tokenizer;

pub use self::{
	commands::{
		lookup,
		registry,
		Arity,
		Command,
	},
	error::{
		CommandError,
		DispatchError,
		Error,
		ErrorKind,
		TokenizeError,
	},
	fields::{
		DataType,
		FileType,
		Flag,
		Msf,
		FRAMES_PER_SECOND,
		MAX_TEXT_LEN,
	},
	parser::Parser,
	tokenizer::tokenize,
};

/// A parsed cuesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cue {
	/// 13 digit media catalog number.
	pub catalog: Option<String>,
	pub performer: Option<String>,
	pub title: Option<String>,
	pub songwriter: Option<String>,
	pub cd_text_file: Option<String>,
	/// `REM` lines in order of appearance.
	pub comments: Vec<String>,
	pub files: Vec<File>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	pub name: String,
	pub file_type: FileType,
	pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
	pub number: u8,
	pub data_type: DataType,
	pub title: Option<String>,
	pub performer: Option<String>,
	pub songwriter: Option<String>,
	pub isrc: Option<String>,
	pub flags: Vec<Flag>,
	pub pregap: Option<Msf>,
	pub indexes: Vec<Index>,
	pub postgap: Option<Msf>,
}

/// An `INDEX` point, relative to the start of the containing file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Index {
	pub number: u8,
	pub position: Msf,
}

impl Cue {
	pub fn tracks(&self) -> impl Iterator<Item = (&File, &Track)> {
		self.files
			.iter()
			.flat_map(|f| f.tracks.iter().map(move |t| (f, t)))
	}
}

impl Track {
	pub fn new(number: u8, data_type: DataType) -> Self {
		Self {
			number,
			data_type,
			title: None,
			performer: None,
			songwriter: None,
			isrc: None,
			flags: Vec::new(),
			pregap: None,
			indexes: Vec::new(),
			postgap: None,
		}
	}

	/// Position of `INDEX 01`, where the track proper begins.
	pub fn start(&self) -> Option<Msf> {
		self.indexes
			.iter()
			.find(|i| i.number == 1)
			.map(|i| i.position)
	}
}

/// Parses a whole cuesheet.
pub fn parse(cuesheet: &str) -> Result<Cue, Error> {
	parse_lines(cuesheet.lines())
}

/// Parses a cuesheet from any source of lines, stopping at the first error.
pub fn parse_lines<I>(lines: I) -> Result<Cue, Error>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	lines
		.into_iter()
		.try_fold(Parser::new(), |p, line| p.feed(line.as_ref()))
		.map(Parser::finish)
}
