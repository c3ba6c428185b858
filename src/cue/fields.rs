use std::{
	fmt,
	str::FromStr,
};

use super::error::CommandError;

/// Maximum length, in characters, of the free-text fields.
pub const MAX_TEXT_LEN: usize = 80;

pub const FRAMES_PER_SECOND: u32 = 75;

macro_rules! keyword_enum {
	(
		$(#[$meta:meta])*
		pub enum $name:ident : $err:ident {
			$($(#[$vmeta:meta])* $variant:ident => $kw:literal,)+
		}
	) => {
		$(#[$meta])*
		#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$($(#[$vmeta])* $variant,)+
		}

		impl $name {
			pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

			/// The keyword as written in a cuesheet.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $kw,)+
				}
			}
		}

		impl FromStr for $name {
			type Err = CommandError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($kw => Ok(Self::$variant),)+
					_ => Err(CommandError::$err(s.to_string())),
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}
	};
}

keyword_enum! {
	/// Storage format of a `FILE`.
	pub enum FileType: UnknownFileType {
		/// Intel binary, least significant byte first.
		Binary => "BINARY",
		/// Motorola binary, most significant byte first.
		Motorola => "MOTOROLA",
		Aiff => "AIFF",
		Wave => "WAVE",
		Mp3 => "MP3",
	}
}

keyword_enum! {
	/// Sector layout of a `TRACK`.
	pub enum DataType: UnknownDataType {
		Audio => "AUDIO",
		/// Karaoke CD+G.
		Cdg => "CDG",
		Mode1_2048 => "MODE1/2048",
		Mode1_2352 => "MODE1/2352",
		Mode2_2336 => "MODE2/2336",
		Mode2_2352 => "MODE2/2352",
		Cdi2336 => "CDI/2336",
		Cdi2352 => "CDI/2352",
	}
}

keyword_enum! {
	/// Sub-code flag of a track.
	pub enum Flag: UnknownFlag {
		/// Digital copy permitted.
		Dcp => "DCP",
		/// Four channel audio.
		FourCh => "4CH",
		/// Pre-emphasis enabled.
		Pre => "PRE",
		/// Serial copy management system.
		Scms => "SCMS",
	}
}

/// Validates a 13 digit UPC/EAN media catalog number.
pub fn catalog(s: &str) -> Result<String, CommandError> {
	if s.len() == 13 && s.bytes().all(|c| c.is_ascii_digit()) {
		Ok(s.to_string())
	} else {
		Err(CommandError::InvalidCatalog(s.to_string()))
	}
}

/// Validates an ISRC: 5 alphanumeric characters followed by 7 digits.
pub fn isrc(s: &str) -> Result<String, CommandError> {
	let b = s.as_bytes();
	if b.len() == 12
		&& b[..5].iter().all(u8::is_ascii_alphanumeric)
		&& b[5..].iter().all(u8::is_ascii_digit)
	{
		Ok(s.to_string())
	} else {
		Err(CommandError::InvalidIsrc(s.to_string()))
	}
}

pub fn track_number(s: &str) -> Result<u8, CommandError> {
	s.parse::<u8>()
		.ok()
		.filter(|n| (1..=99).contains(n))
		.ok_or_else(|| CommandError::InvalidTrackNumber(s.to_string()))
}

pub fn index_number(s: &str) -> Result<u8, CommandError> {
	s.parse::<u8>()
		.ok()
		.filter(|&n| n <= 99)
		.ok_or_else(|| CommandError::InvalidIndexNumber(s.to_string()))
}

/// Cuts `s` down to at most [MAX_TEXT_LEN] characters.
pub fn text(s: &str) -> String {
	match s.char_indices().nth(MAX_TEXT_LEN) {
		Some((i, _)) => s[..i].to_string(),
		None => s.to_string(),
	}
}

/// A disc position or duration in minutes, seconds and frames.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Msf {
	pub minutes: u8,
	pub seconds: u8,
	pub frames: u8,
}

impl Msf {
	pub fn total_frames(self) -> u32 {
		(u32::from(self.minutes) * 60 + u32::from(self.seconds)) * FRAMES_PER_SECOND
			+ u32::from(self.frames)
	}
}

impl FromStr for Msf {
	type Err = CommandError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || CommandError::InvalidTimestamp(s.to_string());
		let mut fields = [0_u8; 3];
		let mut parts = s.split(':');

		for (field, max) in fields.iter_mut().zip([99, 59, 74]) {
			let part = parts.next().ok_or_else(invalid)?;
			if part.is_empty() || part.len() > 2 || !part.bytes().all(|c| c.is_ascii_digit()) {
				return Err(invalid());
			}

			*field = part
				.parse::<u8>()
				.ok()
				.filter(|&n| n <= max)
				.ok_or_else(invalid)?;
		}

		if parts.next().is_some() {
			return Err(invalid());
		}

		let [minutes, seconds, frames] = fields;
		Ok(Self {
			minutes,
			seconds,
			frames,
		})
	}
}

impl fmt::Display for Msf {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"{:02}:{:02}:{:02}",
			self.minutes, self.seconds, self.frames
		)
	}
}
