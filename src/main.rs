mod preset;
mod template;

use std::{
	fmt::Write,
	io,
	path::{
		Path,
		PathBuf,
	},
};

use anyhow::{
	bail,
	ensure,
	Result,
};
use clap::Parser;
use cuesheet::{
	cue::{
		Cue,
		File,
		Track,
	},
	source,
};
use jwalk::WalkDir;
use rayon::prelude::*;
use tracing::{
	error,
	info,
};
use tracing_subscriber::EnvFilter;

use crate::{
	preset::Preset,
	template::{
		push_or_dash,
		Template,
	},
};

const TEMPLATE_VARS: &[&str] = &[
	"no",
	"title",
	"artist",
	"performer",
	"songwriter",
	"album",
	"isrc",
	"type",
	"flags",
	"file",
	"pregap",
	"start",
	"postgap",
];

#[derive(Parser)]
/// Parses and validates cuesheets, printing their track lists.
#[command(version)]
struct Args {
	/// Path to a cuesheet file or a directory
	#[arg(group = "action")]
	path: Option<PathBuf>,
	/// Maximum number of cuesheets parsed in parallel; defaults to about half the available logical CPU cores
	#[arg(short, long)]
	jobs: Option<usize>,

	/// Only validate; print nothing for sheets that parse
	#[arg(short, long)]
	check: bool,

	/// Template for each printed track line
	#[arg(short, long, value_parser = parse_template, conflicts_with = "preset")]
	template: Option<Template>,
	/// Named track line template (defaults to tracklist)
	#[arg(short, long)]
	preset: Option<Preset>,

	/// Log more; repeat for debug output. RUST_LOG overrides this
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Print help for the template syntax
	#[arg(long, group = "action")]
	template_help: bool,
	/// Show available presets
	#[arg(long, group = "action")]
	list_presets: bool,
}

fn parse_template(s: &str) -> Result<Template> {
	let template = Template::new(s);
	for s in template.vars() {
		if !TEMPLATE_VARS.contains(&s) {
			bail!("unrecognized template variable: <{s}>\nrun with --template-help for usage");
		}
	}

	Ok(template)
}

#[cold]
fn show_template_help() {
	println!(
		"\
Each track is printed as one line built from a template.
Variables inside angle brackets <> are replaced with values; missing values print as -.
Allowed variables:
  - <no>: Track number, padded with zeroes to two digits
  - <title>: Track title
  - <artist>: Track performer, or the disc performer if the track has none
  - <performer>: Track performer
  - <songwriter>: Track songwriter
  - <album>: Disc title
  - <isrc>: Track ISRC code
  - <type>: Track data type, such as AUDIO or MODE1/2352
  - <flags>: Track flags separated by spaces
  - <file>: Name of the file containing the track
  - <pregap>, <start>, <postgap>: PREGAP, INDEX 01 and POSTGAP times as mm:ss:ff

Any other variable is an error\
"
	);
}

fn list_presets() {
	use clap::ValueEnum;
	for p in Preset::value_variants() {
		println!(
			"{}: {}",
			p.to_possible_value().unwrap().get_name(),
			p.template().escape_default(),
		);
	}
}

fn init_logging(verbose: u8) {
	let default = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn find_cues(path: &Path) -> Vec<PathBuf> {
	WalkDir::new(path)
		.skip_hidden(false)
		.follow_links(true)
		.into_iter()
		.filter_map(|res| match res {
			Ok(entry)
				if entry.file_type.is_file()
					&& Path::new(&entry.file_name)
						.extension()
						.is_some_and(|s| s.eq_ignore_ascii_case("cue")) =>
			{
				Some(entry.parent_path.join(entry.file_name))
			}
			Ok(_) => None,
			Err(e) => {
				error!("{e}");
				None
			}
		})
		.collect()
}

fn track_line(template: &Template, cue: &Cue, file: &File, track: &Track) -> String {
	template.expand(|buf, var| match var {
		"no" => _ = write!(buf, "{:02}", track.number),
		"title" => push_or_dash(buf, track.title.as_deref()),
		"artist" => push_or_dash(
			buf,
			track.performer.as_deref().or(cue.performer.as_deref()),
		),
		"performer" => push_or_dash(buf, track.performer.as_deref()),
		"songwriter" => push_or_dash(buf, track.songwriter.as_deref()),
		"album" => push_or_dash(buf, cue.title.as_deref()),
		"isrc" => push_or_dash(buf, track.isrc.as_deref()),
		"type" => buf.push_str(track.data_type.as_str()),
		"flags" if track.flags.is_empty() => buf.push('-'),
		"flags" => {
			let flags = track.flags.iter().map(|f| f.as_str()).collect::<Vec<_>>();
			buf.push_str(&flags.join(" "));
		}
		"file" => buf.push_str(&file.name),
		"pregap" => push_or_dash(buf, track.pregap),
		"start" => push_or_dash(buf, track.start()),
		"postgap" => push_or_dash(buf, track.postgap),
		_ => unreachable!(),
	})
}

fn print_cue<W: io::Write>(
	out: &mut W,
	p: &Path,
	cue: &Cue,
	template: &Template,
) -> io::Result<()> {
	writeln!(out, "{}", p.display())?;

	let disc = [
		("CATALOG", &cue.catalog),
		("PERFORMER", &cue.performer),
		("TITLE", &cue.title),
		("SONGWRITER", &cue.songwriter),
		("CDTEXTFILE", &cue.cd_text_file),
	];
	for (field, val) in disc {
		if let Some(val) = val {
			writeln!(out, "  {field}: {val}")?;
		}
	}
	for rem in &cue.comments {
		writeln!(out, "  REM {rem}")?;
	}

	for (file, track) in cue.tracks() {
		writeln!(out, "    {}", track_line(template, cue, file, track))?;
	}

	Ok(())
}

/// Prints every parsed sheet, unless only checking, and logs every failure.
/// Returns the number of failed sheets.
fn report<W: io::Write>(
	out: &mut W,
	paths: &[PathBuf],
	results: Vec<Result<Cue>>,
	template: &Template,
	check: bool,
) -> io::Result<usize> {
	let mut failed = 0;
	for (p, res) in paths.iter().zip(results) {
		match res {
			Ok(cue) => {
				info!(
					path = %p.display(),
					files = cue.files.len(),
					tracks = cue.tracks().count(),
					"parsed"
				);
				if !check {
					print_cue(out, p, &cue, template)?;
				}
			}
			Err(e) => {
				error!("{e}");
				failed += 1;
			}
		}
	}

	Ok(failed)
}

fn run() -> Result<()> {
	let mut args = Args::parse();
	if args.template_help {
		show_template_help();
		return Ok(());
	} else if args.list_presets {
		list_presets();
		return Ok(());
	}

	init_logging(args.verbose);

	let Some(path) = args.path.take() else {
		bail!("no path given\nrun with --help for usage");
	};
	if !path.exists() {
		bail!("file or directory does not exist: {}", path.display());
	}

	if let Some(n) = args.jobs.or_else(|| {
		std::thread::available_parallelism()
			.ok()
			.map(|n| n.get() / 2 + 1)
	}) {
		let _ = rayon::ThreadPoolBuilder::new()
			.num_threads(n)
			.build_global();
	}

	let paths = find_cues(&path);
	ensure!(!paths.is_empty(), "no .cue files found");
	info!(count = paths.len(), "parsing cuesheets");

	// Every sheet gets its own parser; only the command table is shared.
	let results = paths
		.par_iter()
		.map(|p| source::read(p))
		.collect::<Vec<_>>();

	let template = args
		.template
		.take()
		.unwrap_or_else(|| Template::new(args.preset.unwrap_or_default().template()));

	let failed = report(
		&mut io::stdout().lock(),
		&paths,
		results,
		&template,
		args.check,
	)?;

	ensure!(
		failed == 0,
		"{failed} of {} cuesheets failed to parse",
		paths.len()
	);
	Ok(())
}

fn main() {
	if let Err(e) = run() {
		eprintln!("error: {e:?}");
		std::process::exit(1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SHEET: &str = r#"
PERFORMER "Disc Artist"
TITLE "Album"
FILE "one.wav" WAVE
  TRACK 01 AUDIO
    TITLE "Intro"
    FLAGS DCP PRE
    PREGAP 00:02:00
    INDEX 01 00:00:00
  TRACK 02 AUDIO
    TITLE "Song"
    PERFORMER "Guest"
    ISRC USABC1234567
    INDEX 00 03:10:00
    INDEX 01 03:12:15
"#;

	#[test]
	fn template_vars_are_validated() {
		assert!(parse_template("<no> <title>").is_ok());
		let e = parse_template("<no> <year>").unwrap_err().to_string();
		assert!(e.starts_with("unrecognized template variable: <year>"));
	}

	#[test]
	fn track_lines() {
		let cue = cuesheet::parse(SHEET).unwrap();
		let lines = cue
			.tracks()
			.map(|(f, t)| {
				track_line(
					&Template::new(Preset::Tsv.template()),
					&cue,
					f,
					t,
				)
			})
			.collect::<Vec<_>>();

		assert_eq!(
			lines,
			[
				"one.wav\t01\tAUDIO\t00:00:00\tDisc Artist\tIntro\t-\t-\tDCP PRE",
				"one.wav\t02\tAUDIO\t03:12:15\tGuest\tSong\t-\tUSABC1234567\t-",
			]
		);
	}

	#[test]
	fn gaps_and_album() {
		let cue = cuesheet::parse(SHEET).unwrap();
		let t = Template::new("<album>|<pregap>|<postgap>|<performer>");
		let (f, tr) = cue.tracks().next().unwrap();
		assert_eq!(track_line(&t, &cue, f, tr), "Album|00:02:00|-|-");
	}

	fn cue_tree() -> (tempfile::TempDir, Vec<PathBuf>) {
		let dir = tempfile::tempdir().unwrap();
		let root = dir.path();
		std::fs::create_dir(root.join("sub")).unwrap();
		std::fs::write(root.join("a.cue"), SHEET).unwrap();
		std::fs::write(root.join("sub").join("B.CUE"), "TRACK 1 AUDIO\n").unwrap();
		std::fs::write(root.join("c.txt"), SHEET).unwrap();

		let mut paths = find_cues(root);
		paths.sort();
		(dir, paths)
	}

	#[test]
	fn finds_cue_files_recursively_ignoring_case() {
		let (dir, paths) = cue_tree();
		let mut want = vec![dir.path().join("a.cue"), dir.path().join("sub").join("B.CUE")];
		want.sort();
		assert_eq!(paths, want);
	}

	#[test]
	fn report_prints_parsed_sheets_and_counts_failures() {
		let (_dir, paths) = cue_tree();
		let results = paths.iter().map(|p| source::read(p)).collect();
		let template = Template::new(Preset::Short.template());

		let mut out = Vec::<u8>::new();
		let failed = report(&mut out, &paths, results, &template, false).unwrap();
		assert_eq!(failed, 1);

		let out = String::from_utf8(out).unwrap();
		assert!(out.contains("a.cue\n"));
		assert!(out.contains("  PERFORMER: Disc Artist\n"));
		assert!(out.contains("    01. Intro\n"));
		assert!(out.contains("    02. Song\n"));
		assert!(!out.contains("B.CUE"));
	}

	#[test]
	fn check_mode_prints_nothing() {
		let (_dir, paths) = cue_tree();
		let results = paths.iter().map(|p| source::read(p)).collect();
		let template = Template::new(Preset::Short.template());

		let mut out = Vec::<u8>::new();
		let failed = report(&mut out, &paths, results, &template, true).unwrap();
		assert_eq!(failed, 1);
		assert!(out.is_empty());
	}
}
