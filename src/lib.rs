/*!
# Paisley

[![docs.rs](https://img.shields.io/docsrs/paisley.svg?style=flat-square&label=docs.rs)](https://docs.rs/paisley/)
[![changelog](https://img.shields.io/crates/v/paisley.svg?style=flat-square&label=changelog&color=9b59b6)](https://github.com/Blobfolio/paisley/blob/master/CHANGELOG.md)<br>
[![crates.io](https://img.shields.io/crates/v/paisley.svg?style=flat-square&label=crates.io)](https://crates.io/crates/paisley)
[![ci](https://img.shields.io/github/actions/workflow/status/Blobfolio/paisley/ci.yaml?style=flat-square&label=ci)](https://github.com/Blobfolio/paisley/actions)
[![deps.rs](https://deps.rs/repo/github/blobfolio/paisley/status.svg?style=flat-square&label=deps.rs)](https://deps.rs/repo/github/blobfolio/paisley)<br>
[![license](https://img.shields.io/badge/license-wtfpl-ff1493?style=flat-square)](https://en.wikipedia.org/wiki/WTFPL)
[![contributions welcome](https://img.shields.io/badge/PRs-welcome-brightgreen.svg?style=flat-square&label=contributions)](https://github.com/Blobfolio/paisley/issues)

This crate provides a declarative, model-driven CLI argument parser: you
describe your program's options, positionals, and subcommands once — as
plain bindings on a settings struct — and [`CommandLine`] handles the
POSIX/GNU token grammar, type conversion, and subcommand routing for you.

The description doubles as data: the extracted [`CommandSpec`] tree exposes
every name, placeholder, description, and default, ready for whatever usage
renderer you care to point at it.

The grammar is the conventional one — `-abc` clustering, `--key=val`,
`--key val`, derived `--no-key` negation, and end-of-command (`--`)
arguments — because anything else breaks muscle memory.



## Example

```
use paisley::{Binding, CommandLine, Describer, Model, SpecError, Tag};

#[derive(Default)]
/// # Configuration.
struct Settings {
    verbose: Binding<bool>,
    threads: Binding<usize>,
    paths: Binding<Vec<String>>,
}

impl Model for Settings {
    fn describe(&self, d: &mut Describer<'_>) -> Result<(), SpecError> {
        d.option(
            &self.verbose,
            &Tag::new().short('v').long("verbose,negatable")
                .description("Print extra information."),
        )?;
        d.option(
            &self.threads,
            &Tag::new().short('t').long("threads").placeholder("NUM")
                .description("Use this many threads."),
        )?;
        d.positional(
            &self.paths,
            &Tag::new().placeholder("PATH").description("Files to process."),
        )
    }
}

let mut cli = CommandLine::new(
    "demo",
    "A demo program.",
    "1.0.0",
    Settings::default(),
);

// Normally you'd use cli.parse_env(), but for demonstration purposes:
let args: Vec<String> = ["-v", "--threads=4", "one.txt", "two.txt"]
    .iter()
    .map(ToString::to_string)
    .collect();

let settings = cli.parse(&args).unwrap();
assert!(settings.verbose.get());
assert_eq!(settings.threads.get(), 4);
assert_eq!(settings.paths.get(), ["one.txt", "two.txt"]);
```

Subcommands are just nested models, declared via [`Describer::command`];
the first free argument routes the remainder of the command line to the
matching child.
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]



mod cli;
mod error;
mod flag;
mod spec;
mod value;

pub use cli::CommandLine;
pub use error::{
	PaisleyError,
	ParseError,
	SpecError,
	ValueError,
};
pub use flag::{
	Flag,
	FlagTable,
};
pub use spec::{
	CommandSpec,
	Describer,
	Model,
	OptionSpec,
	PositionalSpec,
	Tag,
};
pub use value::{
	Binding,
	Positional,
	Scalar,
	Text,
	Value,
};
