/*!
# Benchmark: `paisley::FlagTable`
*/

use brunch::{
	Bench,
	benches,
};
use paisley::{
	Binding,
	FlagTable,
};

/// # Build a Populated Table.
fn table() -> FlagTable {
	let mut out = FlagTable::new();
	let verbose = Binding::new(false);
	let quiet = Binding::new(false);
	let threads = Binding::new(0_usize);
	let name = Binding::new(String::new());

	let idx = out.register(&verbose, Some('v'), "verbose", "").unwrap();
	out.register_negated(idx).unwrap();
	out.register(&quiet, Some('q'), "quiet", "").unwrap();
	out.register(&threads, Some('t'), "threads", "").unwrap();
	out.register(&name, Some('n'), "name", "").unwrap();
	out
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
	Bench::new("paisley::FlagTable::register(x5)")
		.run(table),

	Bench::spacer(),

	Bench::new("paisley::FlagTable::scan(6)")
		.run_seeded_with(
			|| (table(), argument()),
			|(mut t, args)| t.scan(&args, false).is_ok(),
		),
);
