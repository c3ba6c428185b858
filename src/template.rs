use std::fmt::Write;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Token {
	Lit(usize, usize),
	Var(usize, usize),
}

/// A line of text with `<var>` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
	template: String,
	tokens: Vec<Token>,
}

impl Template {
	pub fn new<S>(template: S) -> Self
	where
		S: Into<String>,
	{
		let template = template.into();
		let s = template.as_str();
		let mut tokens = Vec::with_capacity(8);
		let mut i = 0;

		while i < s.len() {
			let remaining = &s[i..];
			match remaining.find('<') {
				None => {
					tokens.push(Token::Lit(i, s.len()));
					break;
				}
				Some(0) => match remaining.find('>') {
					Some(end) => {
						tokens.push(Token::Var(i + 1, i + end));
						i += end + 1;
					}
					// An unclosed `<` is literal text.
					None => {
						tokens.push(Token::Lit(i, s.len()));
						break;
					}
				},
				Some(n) => {
					tokens.push(Token::Lit(i, i + n));
					i += n;
				}
			}
		}

		Self { template, tokens }
	}

	pub fn vars(&self) -> impl Iterator<Item = &'_ str> {
		self.tokens.iter().filter_map(|t| match *t {
			Token::Var(start, end) => self.template.get(start..end),
			Token::Lit(..) => None,
		})
	}

	pub fn expand<'a, F>(&'a self, mut f: F) -> String
	where
		F: FnMut(&mut String, &'a str),
	{
		let mut buf = String::with_capacity(self.template.len() * 2);
		for &t in &self.tokens {
			match t {
				Token::Lit(start, end) => buf.push_str(&self.template[start..end]),
				Token::Var(start, end) => f(&mut buf, &self.template[start..end]),
			}
		}

		buf
	}
}

/// Pushes `val` if present, `-` otherwise.
pub fn push_or_dash<T: std::fmt::Display>(buf: &mut String, val: Option<T>) {
	match val {
		Some(v) => _ = write!(buf, "{v}"),
		None => buf.push('-'),
	}
}
