/// Named track line templates.
#[derive(Copy, Clone, Debug, Default, clap::ValueEnum)]
pub enum Preset {
	Short,
	#[default]
	Tracklist,
	Timings,
	Isrc,
	Tsv,
}

impl Preset {
	pub const fn template(self) -> &'static str {
		use Preset::*;
		match self {
			Short => "<no>. <title>",
			Tracklist => "<no>. <artist> - <title>",
			Timings => "<no>  <pregap>  <start>  <postgap>  <title>",
			Isrc => "<no>  <isrc>  <flags>",
			Tsv => "<file>\t<no>\t<type>\t<start>\t<artist>\t<title>\t<songwriter>\t<isrc>\t<flags>",
		}
	}
}

#[cfg(test)]
mod tests {
	use clap::ValueEnum;

	use super::*;
	use crate::{
		template::Template,
		TEMPLATE_VARS,
	};

	#[test]
	fn presets_only_use_known_vars() {
		for p in Preset::value_variants() {
			let t = Template::new(p.template());
			for var in t.vars() {
				assert!(TEMPLATE_VARS.contains(&var), "{p:?} uses <{var}>");
			}
		}
	}
}
