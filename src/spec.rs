/*!
# Paisley: Specification Extraction.

This module turns a declarative description — a [`Model`] implementation
declaring its options, positionals, and subcommands through a
[`Describer`] — into a validated [`CommandSpec`] tree.

Extraction is all-or-nothing: the first structural problem aborts the whole
build with a [`SpecError`], because a broken description is a bug in the
program, not something to limp along with. Particular care goes to
*recursive* command types; a model that references its own type, directly
or through an intermediate model, would otherwise describe an infinitely
deep command tree, so type identities are tracked through the walk and
repeats are rejected.
*/

use crate::{
	FlagTable,
	PaisleyError,
	ParseError,
	Positional,
	SpecError,
	Value,
};
use std::{
	any::{
		type_name,
		TypeId,
	},
	collections::{
		BTreeMap,
		BTreeSet,
	},
	fmt,
};



/// # Describable Model.
///
/// The declarative description at the heart of the crate: a model declares
/// each of its CLI-relevant fields — options, positionals, subcommands —
/// through the [`Describer`] passed to it, in whatever order they should
/// appear in help text.
///
/// Fields that aren't declared simply aren't part of the CLI surface;
/// that's a feature, not an error.
///
/// See the [crate docs](crate) for a worked example.
pub trait Model: 'static {
	/// # Declare the CLI Surface.
	///
	/// ## Errors
	///
	/// Implementations should simply chain the describer calls with `?`;
	/// any error means the description itself is broken.
	fn describe(&self, d: &mut Describer<'_>) -> Result<(), SpecError>;
}



#[derive(Debug, Clone, Default)]
/// # Field Metadata.
///
/// The per-field metadata accompanying each [`Describer`] declaration:
/// names, placeholder, description. Only the pieces that apply need
/// setting.
///
/// The long name accepts a trailing `,negatable` modifier — e.g.
/// `"verbose,negatable"` — which additionally derives a `no-` alias for
/// boolean options.
pub struct Tag {
	/// # Shorthand Character.
	short: Option<char>,

	/// # Long Name (Possibly With Modifiers).
	long: String,

	/// # Value Placeholder (For Usage Text).
	placeholder: String,

	/// # Description.
	description: String,
}

impl Tag {
	#[must_use]
	/// # New (Empty) Tag.
	pub fn new() -> Self { Self::default() }

	#[must_use]
	/// # With a Shorthand Character.
	pub const fn short(mut self, ch: char) -> Self {
		self.short = Some(ch);
		self
	}

	#[must_use]
	/// # With a Long Name.
	///
	/// Dashless, e.g. `"verbose"` rather than `"--verbose"`. Append
	/// `,negatable` to also derive a `no-` alias (booleans only).
	pub fn long(mut self, name: &str) -> Self {
		name.clone_into(&mut self.long);
		self
	}

	#[must_use]
	/// # With a Value Placeholder.
	pub fn placeholder(mut self, placeholder: &str) -> Self {
		placeholder.clone_into(&mut self.placeholder);
		self
	}

	#[must_use]
	/// # With a Description.
	pub fn description(mut self, description: &str) -> Self {
		description.clone_into(&mut self.description);
		self
	}

	/// # Split the Long Name From Its Modifiers.
	///
	/// Returns the bare name and whether `,negatable` was among the
	/// modifiers. (Unrecognized modifiers are ignored.)
	fn split_long(&self) -> (&str, bool) {
		match self.long.split_once(',') {
			None => (self.long.as_str(), false),
			Some((name, rest)) => (name, rest.split(',').any(|m| m == "negatable")),
		}
	}
}



/// # Option Specification.
///
/// One bindable flag, as extracted from the description. Structurally
/// immutable once built; only the [`changed`](OptionSpec::changed) marker
/// moves afterwards.
pub struct OptionSpec {
	/// # Shorthand Character.
	short: Option<char>,

	/// # Long Name (Sans Dashes).
	long: String,

	/// # Negated Name.
	///
	/// Derived as `no-<long>`, but only for negatable booleans; empty
	/// otherwise.
	negated: String,

	/// # Value Placeholder.
	placeholder: String,

	/// # Description.
	description: String,

	/// # Required?
	///
	/// True when the bound storage has no optional/default semantics.
	/// (Metadata for usage rendering; not enforced at parse time.)
	required: bool,

	/// # Boolean-Shaped?
	is_bool: bool,

	/// # Negatable?
	negatable: bool,

	/// # Default Value (Textual).
	default: String,

	/// # Bound Value Codec.
	value: Box<dyn Value>,

	/// # Assigned During the Last Parse?
	changed: bool,
}

impl OptionSpec {
	#[must_use]
	/// # Shorthand Character.
	pub const fn short(&self) -> Option<char> { self.short }

	#[must_use]
	/// # Long Name (Sans Dashes).
	pub fn long(&self) -> &str { &self.long }

	#[must_use]
	/// # Negated Name (Sans Dashes).
	///
	/// Empty unless the option is negatable.
	pub fn negated(&self) -> &str { &self.negated }

	#[must_use]
	/// # Value Placeholder.
	pub fn placeholder(&self) -> &str { &self.placeholder }

	#[must_use]
	/// # Description.
	pub fn description(&self) -> &str { &self.description }

	#[must_use]
	/// # Required?
	pub const fn required(&self) -> bool { self.required }

	#[must_use]
	/// # Boolean-Shaped?
	pub const fn is_bool(&self) -> bool { self.is_bool }

	#[must_use]
	/// # Negatable?
	pub const fn negatable(&self) -> bool { self.negatable }

	#[must_use]
	/// # Default Value (Textual).
	pub fn default(&self) -> &str { &self.default }

	#[must_use]
	/// # Assigned During the Last Parse?
	pub const fn changed(&self) -> bool { self.changed }

	/// # All Registered Names.
	///
	/// Short, long, and negated, in that order, skipping the unset.
	fn names(&self) -> Vec<String> {
		let mut out = Vec::with_capacity(3);
		if let Some(ch) = self.short { out.push(ch.to_string()); }
		if ! self.long.is_empty() { out.push(self.long.clone()); }
		if ! self.negated.is_empty() { out.push(self.negated.clone()); }
		out
	}
}



/// # Positional Specification.
///
/// One positional slot: a single string, or (terminally) a sequence that
/// drains the remainder.
pub struct PositionalSpec {
	/// # Value Placeholder.
	placeholder: String,

	/// # Description.
	description: String,

	/// # Required?
	required: bool,

	/// # Consumes All Remaining Tokens?
	repeated: bool,

	/// # Bound Value Codec.
	value: Box<dyn Value>,

	/// # Assigned During the Last Parse?
	changed: bool,
}

impl PositionalSpec {
	#[must_use]
	/// # Value Placeholder.
	pub fn placeholder(&self) -> &str { &self.placeholder }

	#[must_use]
	/// # Description.
	pub fn description(&self) -> &str { &self.description }

	#[must_use]
	/// # Required?
	pub const fn required(&self) -> bool { self.required }

	#[must_use]
	/// # Consumes All Remaining Tokens?
	pub const fn repeated(&self) -> bool { self.repeated }

	#[must_use]
	/// # Assigned During the Last Parse?
	pub const fn changed(&self) -> bool { self.changed }
}



/// # Command Specification.
///
/// One node in the command tree: its options, positionals, and
/// subcommands, in declaration order, with by-name indexes over the lot.
///
/// Nodes are built once — bottom-up, during extraction — and owned
/// exclusively by their parents; the root belongs to the
/// [`CommandLine`](crate::CommandLine).
pub struct CommandSpec {
	/// # Command Name.
	name: String,

	/// # Description.
	description: String,

	/// # Options (Declaration Order).
	options: Vec<OptionSpec>,

	/// # Option Lookup (Name → Index).
	///
	/// Short, long, and negated names all land here, pointing at the same
	/// entry.
	options_by_name: BTreeMap<String, usize>,

	/// # Subcommands (Declaration Order).
	subcommands: Vec<CommandSpec>,

	/// # Subcommand Lookup (Name → Index).
	subcommands_by_name: BTreeMap<String, usize>,

	/// # Positionals (Declaration Order).
	positionals: Vec<PositionalSpec>,

	/// # Flag Table.
	///
	/// Instantiated (from the options) on first parse, reset and reused
	/// thereafter.
	table: Option<FlagTable>,
}

impl fmt::Debug for CommandSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandSpec")
			.field("name", &self.name)
			.field("description", &self.description)
			.finish_non_exhaustive()
	}
}

impl CommandSpec {
	/// # New (Empty) Node.
	fn new(name: &str, description: &str) -> Self {
		Self {
			name: name.to_owned(),
			description: description.to_owned(),
			options: Vec::new(),
			options_by_name: BTreeMap::new(),
			subcommands: Vec::new(),
			subcommands_by_name: BTreeMap::new(),
			positionals: Vec::new(),
			table: None,
		}
	}

	/// # Extract a Specification.
	///
	/// Walk `model`'s description and build the full command tree.
	///
	/// ## Errors
	///
	/// Any structural problem — bad or duplicate names, negation on a
	/// non-boolean, a recursive command type, a positional declared after
	/// a repeated one — aborts the whole build.
	pub fn extract<M: Model>(name: &str, description: &str, model: &M)
	-> Result<Self, SpecError> {
		let mut visited = BTreeSet::new();
		visited.insert(TypeId::of::<M>());

		let mut spec = Self::new(name, description);
		model.describe(&mut Describer {
			spec: &mut spec,
			visited: &mut visited,
		})?;
		Ok(spec)
	}
}

/// # Parsing.
impl CommandSpec {
	/// # Parse an Argument Vector.
	///
	/// Run this node's flag table over `args`, then either hand the
	/// remainder to the matching subcommand or bind the residual tokens
	/// to this node's positional slots.
	pub(crate) fn parse(&mut self, args: &[String]) -> Result<(), PaisleyError> {
		// The table materializes on first parse and sticks around.
		let table =
			if let Some(t) = self.table.take() { self.table.insert(t) }
			else {
				let mut t = FlagTable::new();
				for opt in &self.options {
					let idx = t.register(
						opt.value.as_ref(),
						opt.short,
						&opt.long,
						&opt.description,
					)?;
					if opt.negatable { t.register_negated(idx)?; }
				}
				self.table.insert(t)
			};

		table.reset();
		let dispatch = ! self.subcommands.is_empty();
		let handoff = table.scan(args, dispatch)?;

		// Note what got set.
		for &idx in table.touched() { self.options[idx].changed = true; }

		// Route to a subcommand?
		if let Some((cmd, rest)) = handoff {
			let Some(&child) = self.subcommands_by_name.get(&cmd) else {
				return Err(ParseError::UnknownCommand(cmd).into());
			};
			return self.subcommands[child].parse(&rest);
		}

		// Otherwise the positionals are ours to bind, in order.
		let mut tokens = table.args().iter();
		for pos in &mut self.positionals {
			if pos.repeated {
				for token in tokens.by_ref() {
					assign_positional(pos, token)?;
				}
			}
			else if let Some(token) = tokens.next() {
				assign_positional(pos, token)?;
			}
			else { break; }
		}

		Ok(())
	}
}

/// # Introspection.
impl CommandSpec {
	#[must_use]
	/// # Command Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Description.
	pub fn description(&self) -> &str { &self.description }

	#[must_use]
	/// # Options (Declaration Order).
	pub fn options(&self) -> &[OptionSpec] { &self.options }

	#[must_use]
	/// # Positionals (Declaration Order).
	pub fn positionals(&self) -> &[PositionalSpec] { &self.positionals }

	#[must_use]
	/// # Subcommands (Declaration Order).
	pub fn subcommands(&self) -> &[CommandSpec] { &self.subcommands }

	#[must_use]
	/// # Look Up an Option by (Dashless) Name.
	///
	/// Short, long, and negated names all resolve.
	pub fn option(&self, name: &str) -> Option<&OptionSpec> {
		self.options_by_name.get(name).map(|&idx| &self.options[idx])
	}

	#[must_use]
	/// # Look Up a Subcommand by Name.
	pub fn subcommand(&self, name: &str) -> Option<&Self> {
		self.subcommands_by_name.get(name).map(|&idx| &self.subcommands[idx])
	}

	#[must_use]
	/// # Residual Positional Arguments.
	///
	/// Every un-flagged token the last parse collected at this node,
	/// including any overflow beyond the declared positional slots. Empty
	/// if this node hasn't parsed anything.
	pub fn args(&self) -> &[String] {
		self.table.as_ref().map_or(&[], FlagTable::args)
	}
}



/// # Bind One Positional Token.
///
/// String-shaped codecs can't actually reject anything, but the codec
/// contract says what it says.
fn assign_positional(pos: &mut PositionalSpec, token: &str)
-> Result<(), PaisleyError> {
	pos.value.assign(token)
		.map_err(|source| ParseError::InvalidValue {
			flag: pos.placeholder.clone(),
			value: token.to_owned(),
			source,
		})?;
	pos.changed = true;
	Ok(())
}



/// # Specification Describer.
///
/// The other half of [`Model`]: models call these methods, in declaration
/// order, to populate the [`CommandSpec`] under construction.
pub struct Describer<'a> {
	/// # Node Under Construction.
	spec: &'a mut CommandSpec,

	/// # Visited Command Types.
	///
	/// One shared set for the whole extraction; a type already here is a
	/// recursion and gets rejected.
	visited: &'a mut BTreeSet<TypeId>,
}

impl Describer<'_> {
	/// # Declare an Option.
	///
	/// The codec's own shape drives classification: boolean-ness decides
	/// value consumption, optional-ness decides the `required` metadata.
	///
	/// ## Errors
	///
	/// Returns an error if the tag carries no name at all, a name is
	/// malformed, `,negatable` was requested for a non-boolean, or any of
	/// the names (short, long, or derived `no-` alias) collide with an
	/// option already declared on this node.
	pub fn option(&mut self, value: &dyn Value, tag: &Tag) -> Result<(), SpecError> {
		let (long, negatable) = tag.split_long();
		let is_bool = value.is_bool();

		if tag.short.is_none() && long.is_empty() {
			return Err(SpecError::UnnamedOption);
		}
		if negatable && ! is_bool {
			return Err(SpecError::NotNegatable(long.to_owned()));
		}
		if let Some(ch) = tag.short {
			if matches!(ch, '-' | '=') {
				return Err(SpecError::BadFlagName(ch.to_string()));
			}
		}
		if ! long.is_empty() && (long.starts_with('-') || long.contains('=')) {
			return Err(SpecError::BadFlagName(long.to_owned()));
		}

		let opt = OptionSpec {
			short: tag.short,
			long: long.to_owned(),
			negated: if negatable { format!("no-{long}") } else { String::new() },
			// Booleans take no value, so a placeholder would just confuse.
			placeholder: if is_bool { String::new() } else { tag.placeholder.clone() },
			description: tag.description.clone(),
			required: ! value.is_optional(),
			is_bool,
			negatable,
			default: value.render_default(),
			value: value.duplicate(),
			changed: false,
		};

		// Every name joins one shared namespace per node.
		let idx = self.spec.options.len();
		for name in opt.names() {
			if self.spec.options_by_name.contains_key(&name) {
				return Err(SpecError::DuplicateFlag(name));
			}
			self.spec.options_by_name.insert(name, idx);
		}
		self.spec.options.push(opt);
		Ok(())
	}

	/// # Declare a Positional.
	///
	/// Positionals fill in declaration order; a sequence-shaped one drains
	/// every remaining token and therefore has to come last.
	///
	/// ## Errors
	///
	/// Returns an error if a repeated positional was already declared.
	pub fn positional(&mut self, value: &dyn Positional, tag: &Tag)
	-> Result<(), SpecError> {
		if self.spec.positionals.last().is_some_and(PositionalSpec::repeated) {
			return Err(SpecError::TrailingPositional);
		}

		self.spec.positionals.push(PositionalSpec {
			placeholder: tag.placeholder.clone(),
			description: tag.description.clone(),
			required: ! value.is_optional(),
			repeated: value.repeated(),
			value: value.duplicate(),
			changed: false,
		});
		Ok(())
	}

	/// # Declare a Subcommand.
	///
	/// Recurse into `child`'s description, building it as a subcommand of
	/// the current node.
	///
	/// ## Errors
	///
	/// Returns an error if the name is empty or starts with a dash, if a
	/// subcommand of that name already exists on this node, or if the
	/// child's *type* has already been described anywhere along the way —
	/// a recursive command type describes an infinitely deep tree, so the
	/// walk refuses it outright rather than looping.
	pub fn command<M: Model>(&mut self, name: &str, description: &str, child: &M)
	-> Result<(), SpecError> {
		if name.is_empty() || name.starts_with('-') {
			return Err(SpecError::BadCommandName(name.to_owned()));
		}

		// Check the name before bothering with recursion.
		if self.spec.subcommands_by_name.contains_key(name) {
			return Err(SpecError::DuplicateCommand(name.to_owned()));
		}

		// And the cycle guard before anything else.
		if ! self.visited.insert(TypeId::of::<M>()) {
			return Err(SpecError::RecursiveCommand(type_name::<M>()));
		}

		let mut sub = CommandSpec::new(name, description);
		child.describe(&mut Describer {
			spec: &mut sub,
			visited: self.visited,
		})?;

		let idx = self.spec.subcommands.len();
		self.spec.subcommands_by_name.insert(name.to_owned(), idx);
		self.spec.subcommands.push(sub);
		Ok(())
	}
}
