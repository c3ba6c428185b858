//! Reading cuesheets from disk.
//!
//! Cuesheets are often written in a legacy code page, so the encoding is
//! guessed from the content before the text is handed to [crate::cue::parse].

use std::{
	fs,
	path::Path,
};

use anyhow::{
	anyhow,
	Result,
};
use encoding_rs::Encoding;
use tracing::debug;

use crate::cue::{
	self,
	Cue,
};

/// Decodes raw cuesheet bytes to text. A byte order mark wins over detection.
pub fn decode(data: &[u8]) -> String {
	let guess = match Encoding::for_bom(data) {
		Some((encoding, _)) => encoding,
		None => {
			let mut detect = chardetng::EncodingDetector::new();
			detect.feed(data, true);
			detect.guess(None, true)
		}
	};

	let (text, encoding, has_replacement) = guess.decode(data);
	debug!(
		encoding = encoding.name(),
		has_replacement, "decoded cuesheet"
	);
	text.into_owned()
}

/// Reads and parses the cuesheet at `p`.
pub fn read(p: &Path) -> Result<Cue> {
	let data = fs::read(p).map_err(|e| anyhow!("error reading {}: {}", p.display(), e))?;
	cue::parse(&decode(&data)).map_err(|e| anyhow!("error parsing {}: {}", p.display(), e))
}
