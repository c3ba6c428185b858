//! Parser for CUE sheets, the text format describing the files and tracks
//! of a disc image.
//!
//! ```
//! let cue = cuesheet::parse(
//! 	"TITLE \"Album\"\nFILE \"disc.wav\" WAVE\nTRACK 01 AUDIO\nTITLE \"Intro\"",
//! )
//! .unwrap();
//!
//! assert_eq!(cue.title.as_deref(), Some("Album"));
//! assert_eq!(cue.files[0].tracks[0].title.as_deref(), Some("Intro"));
//! ```

pub mod cue;
pub mod source;

pub use cue::{
	parse,
	parse_lines,
	Cue,
	Error,
};
