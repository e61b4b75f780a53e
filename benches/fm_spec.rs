/*!
# Benchmark: `paisley::CommandSpec`
*/

use brunch::{
	Bench,
	benches,
};
use paisley::{
	Binding,
	CommandLine,
	CommandSpec,
	Describer,
	Model,
	SpecError,
	Tag,
};

#[derive(Default)]
/// # A Typical Model.
struct Settings {
	verbose: Binding<bool>,
	quiet: Binding<bool>,
	threads: Binding<usize>,
	name: Binding<Option<String>>,
	paths: Binding<Vec<String>>,
}

impl Model for Settings {
	fn describe(&self, d: &mut Describer<'_>) -> Result<(), SpecError> {
		d.option(&self.verbose, &Tag::new().short('v').long("verbose,negatable"))?;
		d.option(&self.quiet, &Tag::new().short('q').long("quiet"))?;
		d.option(&self.threads, &Tag::new().short('t').long("threads").placeholder("NUM"))?;
		d.option(&self.name, &Tag::new().short('n').long("name").placeholder("NAME"))?;
		d.positional(&self.paths, &Tag::new().placeholder("PATH"))
	}
}

/// # A Typical Argument Vector.
fn argument() -> Vec<String> {
	[
		"-qv",
		"--threads=4",
		"--name",
		"val",
		"/foo/bar",
		"/bar/baz",
	].iter().map(ToString::to_string).collect()
}

benches!(
	Bench::new("paisley::CommandSpec::extract()")
		.run(|| CommandSpec::extract("bench", "", &Settings::default()).is_ok()),

	Bench::spacer(),

	Bench::new("paisley::CommandLine::parse(6)")
		.run_seeded_with(
			|| (
				CommandLine::new("bench", "", "", Settings::default()),
				argument(),
			),
			|(mut cli, args)| cli.parse(&args).is_ok(),
		),
);
