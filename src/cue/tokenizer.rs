use std::mem;

use super::error::TokenizeError;

fn escaped(c: char) -> Result<char, TokenizeError> {
	match c {
		'"' => Ok('"'),
		'\'' => Ok('\''),
		'\\' => Ok('\\'),
		'n' => Ok('\n'),
		't' => Ok('\t'),
		_ => Err(TokenizeError::UnsupportedEscape(format!("\\{c}"))),
	}
}

/// Splits a line into its command name and parameters.
///
/// The command is the first word. The rest of the line is split on runs of
/// whitespace, except while quoted. Either `'` or `"` toggles quoting
/// wherever it appears, so `'a b"` is one parameter and `PA"RAM'3` reads as
/// `PARAM3`. Backslash escapes are decoded in place.
pub fn tokenize(line: &str) -> Result<(&str, Vec<String>), TokenizeError> {
	let line = line.trim();
	let Some(i) = line.find(char::is_whitespace) else {
		return Ok((line, Vec::new()));
	};

	let (cmd, rest) = line.split_at(i);
	let mut params = Vec::new();
	let mut param = String::new();
	let mut quoted = false;
	let mut chars = rest.trim().chars().peekable();

	while let Some(c) = chars.next() {
		match c {
			c if !quoted && c.is_whitespace() => {
				params.push(mem::take(&mut param));
				while chars.next_if(|c| c.is_whitespace()).is_some() {}
			}
			'\\' => {
				let esc = chars.next().ok_or(TokenizeError::UnfinishedEscape)?;
				param.push(escaped(esc)?);
			}
			'\'' | '"' => quoted = !quoted,
			_ => param.push(c),
		}
	}

	params.push(param);
	Ok((cmd, params))
}
