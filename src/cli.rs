/*!
# Paisley: Command Line.

[`CommandLine`] is the process-facing wrapper tying a [`Model`] to the
machinery underneath: it extracts the [`CommandSpec`] tree (once, lazily)
and runs argument vectors through it, handing back the model for
inspection.

Most programs only ever need [`CommandLine::parse_env`].
*/

use crate::{
	CommandSpec,
	Model,
	PaisleyError,
};



/// # Command Line.
///
/// The program-level entry point: name the program, hand over a model, and
/// parse.
///
/// ```
/// use paisley::{Binding, CommandLine, Describer, Model, SpecError, Tag};
///
/// #[derive(Default)]
/// struct Settings {
///     verbose: Binding<bool>,
/// }
///
/// impl Model for Settings {
///     fn describe(&self, d: &mut Describer<'_>) -> Result<(), SpecError> {
///         d.option(&self.verbose, &Tag::new().short('v').long("verbose"))
///     }
/// }
///
/// let mut cli = CommandLine::new("demo", "A demo program.", "1.0.0", Settings::default());
/// let settings = cli.parse(&["-v".to_owned()]).unwrap();
/// assert!(settings.verbose.get());
/// ```
pub struct CommandLine<M: Model> {
	/// # Program Name.
	name: String,

	/// # Program Description.
	description: String,

	/// # Program Version.
	version: String,

	/// # The Model.
	model: M,

	/// # Extracted Specification.
	///
	/// Populated on first use and kept for the life of the instance.
	spec: Option<CommandSpec>,
}

impl<M: Model> CommandLine<M> {
	#[must_use]
	/// # New Command Line.
	///
	/// Extraction is deferred until the first [`parse`](CommandLine::parse)
	/// or [`spec`](CommandLine::spec) call, so a broken description
	/// surfaces there rather than here.
	pub fn new(name: &str, description: &str, version: &str, model: M) -> Self {
		Self {
			name: name.to_owned(),
			description: description.to_owned(),
			version: version.to_owned(),
			model,
			spec: None,
		}
	}

	/// # Parse an Argument Vector.
	///
	/// `args` should *not* include the program name; pass
	/// `&std::env::args().skip(1).collect::<Vec<_>>()` or use
	/// [`parse_env`](CommandLine::parse_env), which does exactly that.
	///
	/// On success the parsed values have already been written through the
	/// model's bindings; the model itself is returned for convenience.
	///
	/// ## Errors
	///
	/// Returns a [`SpecError`](crate::SpecError) (wrapped) if this is the
	/// first parse and the description turns out to be structurally
	/// invalid, or a [`ParseError`](crate::ParseError) (wrapped) if `args`
	/// doesn't line up with the spec.
	pub fn parse(&mut self, args: &[String]) -> Result<&M, PaisleyError> {
		self.build()?.parse(args)?;
		Ok(&self.model)
	}

	/// # Parse the Process Arguments.
	///
	/// Same as [`parse`](CommandLine::parse), sourced from
	/// [`std::env::args`] (minus the leading program name).
	///
	/// ## Errors
	///
	/// Same as [`parse`](CommandLine::parse).
	pub fn parse_env(&mut self) -> Result<&M, PaisleyError> {
		let args: Vec<String> = std::env::args().skip(1).collect();
		self.parse(&args)
	}

	/// # The Specification Tree.
	///
	/// Extract (if not already extracted) and return the full
	/// [`CommandSpec`] tree, e.g. for rendering usage text.
	///
	/// ## Errors
	///
	/// Returns an error if the description is structurally invalid.
	pub fn spec(&mut self) -> Result<&CommandSpec, PaisleyError> {
		self.build().map(|s| &*s)
	}

	/// # Build (or Fetch) the Specification.
	fn build(&mut self) -> Result<&mut CommandSpec, PaisleyError> {
		if let Some(spec) = self.spec.take() { Ok(self.spec.insert(spec)) }
		else {
			let spec = CommandSpec::extract(
				&self.name,
				&self.description,
				&self.model,
			)?;
			Ok(self.spec.insert(spec))
		}
	}
}

/// # Getters.
impl<M: Model> CommandLine<M> {
	#[must_use]
	/// # Program Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Program Description.
	pub fn description(&self) -> &str { &self.description }

	#[must_use]
	/// # Program Version.
	pub fn version(&self) -> &str { &self.version }

	#[must_use]
	/// # The Model.
	pub const fn model(&self) -> &M { &self.model }
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		Binding,
		Describer,
		ParseError,
		SpecError,
		Tag,
	};

	/// # Helper: Stringify a Token List.
	fn argv(raw: &[&str]) -> Vec<String> {
		raw.iter().map(ToString::to_string).collect()
	}

	#[derive(Default)]
	/// # Top-Level Model.
	struct Prune {
		dry_run: Binding<bool>,
		keep: Binding<u32>,
		paths: Binding<Vec<String>>,
	}

	impl Model for Prune {
		fn describe(&self, d: &mut Describer<'_>) -> Result<(), SpecError> {
			d.option(&self.dry_run, &Tag::new().short('d').long("dry-run,negatable").description("Pretend."))?;
			d.option(&self.keep, &Tag::new().short('k').long("keep").placeholder("N").description("Keep this many."))?;
			d.positional(&self.paths, &Tag::new().placeholder("PATH").description("Paths to prune."))
		}
	}

	#[derive(Default)]
	/// # A Model With a Subcommand.
	struct Tool {
		verbose: Binding<bool>,
		archive: Archive,
	}

	impl Model for Tool {
		fn describe(&self, d: &mut Describer<'_>) -> Result<(), SpecError> {
			d.option(&self.verbose, &Tag::new().short('v').long("verbose").description("Keep talking."))?;
			d.command("archive", "Archive instead of deleting.", &self.archive)
		}
	}

	#[derive(Default)]
	/// # Subcommand Model.
	struct Archive {
		dest: Binding<Option<String>>,
	}

	impl Model for Archive {
		fn describe(&self, d: &mut Describer<'_>) -> Result<(), SpecError> {
			d.option(&self.dest, &Tag::new().long("dest").placeholder("DIR").description("Destination."))
		}
	}

	#[test]
	fn t_parse() {
		let mut cli = CommandLine::new("prune", "Prune things.", "1.2.3", Prune::default());
		assert_eq!(cli.name(), "prune");
		assert_eq!(cli.description(), "Prune things.");
		assert_eq!(cli.version(), "1.2.3");

		let model = cli.parse(&argv(&["-d", "--keep", "3", "a", "b"])).unwrap();
		assert!(model.dry_run.get());
		assert_eq!(model.keep.get(), 3);
		assert_eq!(model.paths.get(), ["a", "b"]);
	}

	#[test]
	fn t_parse_dispatch() {
		let mut cli = CommandLine::new("tool", "", "", Tool::default());
		let model = cli.parse(&argv(&["-v", "archive", "--dest", "/tmp"])).unwrap();
		assert!(model.verbose.get());
		assert_eq!(model.archive.dest.get(), Some("/tmp".to_owned()));

		// A free argument that isn't a subcommand is an error when
		// subcommands exist.
		let mut cli = CommandLine::new("tool", "", "", Tool::default());
		assert_eq!(
			cli.parse(&argv(&["shred"])).map(|_| ()).unwrap_err(),
			PaisleyError::Parse(ParseError::UnknownCommand("shred".to_owned())),
		);
	}

	#[test]
	fn t_parse_errors() {
		let mut cli = CommandLine::new("prune", "", "", Prune::default());
		assert_eq!(
			cli.parse(&argv(&["--nope"])).map(|_| ()).unwrap_err(),
			PaisleyError::Parse(ParseError::UnknownFlag("--nope".to_owned())),
		);

		// Earlier errors don't poison later parses.
		let model = cli.parse(&argv(&["-k", "7"])).unwrap();
		assert_eq!(model.keep.get(), 7);
	}

	#[test]
	fn t_spec_access() {
		let mut cli = CommandLine::new("prune", "Prune things.", "", Prune::default());
		let spec = cli.spec().unwrap();
		assert_eq!(spec.name(), "prune");
		assert_eq!(spec.options().len(), 2);
		assert_eq!(spec.positionals().len(), 1);

		// Option metadata is all there for a help renderer.
		let keep = spec.option("keep").unwrap();
		assert_eq!(keep.placeholder(), "N");
		assert_eq!(keep.default(), "0");

		// Subcommand trees come through too.
		let mut cli = CommandLine::new("tool", "", "", Tool::default());
		let spec = cli.spec().unwrap();
		assert!(spec.subcommand("archive").is_some());
	}

	#[test]
	fn t_spec_error() {
		/// # A Broken Description.
		struct Broken(Binding<bool>);
		impl Model for Broken {
			fn describe(&self, d: &mut Describer<'_>) -> Result<(), SpecError> {
				d.option(&self.0, &Tag::new())
			}
		}

		let mut cli = CommandLine::new("x", "", "", Broken(Binding::new(false)));
		assert_eq!(
			cli.parse(&[]).map(|_| ()).unwrap_err(),
			PaisleyError::Spec(SpecError::UnnamedOption),
		);
	}
}
