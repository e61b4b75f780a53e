/*!
# Paisley: Flag Table.

One [`FlagTable`] per command node: a flat registry mapping long names and
single-character shorthands to [`Flag`] records, plus the scanner that runs
a raw argument vector against it.

Negation is a registration-time concern, not a parse-time one. A negatable
boolean registers a second `no-<name>` entry pointing at the *same* flag
with an invert marker; assignment through that alias flips the parsed
boolean before the write, so `--flag` and `--no-flag` can never disagree
about which cell they're talking to.
*/

use crate::{
	ParseError,
	Scalar,
	SpecError,
	Value,
};
use std::collections::{
	BTreeMap,
	BTreeSet,
};



/// # Registered Flag.
///
/// One bindable flag: its names, its help-text fodder, and the codec that
/// writes parsed values through to the caller's storage.
pub struct Flag {
	/// # Shorthand Character.
	short: Option<char>,

	/// # Long Name (Sans Dashes).
	long: String,

	/// # Description.
	description: String,

	/// # Default (Textual).
	///
	/// Captured from the codec at registration time, before parsing has a
	/// chance to overwrite the storage.
	default: String,

	/// # Value Codec.
	value: Box<dyn Value>,
}

impl Flag {
	#[must_use]
	/// # Shorthand Character.
	pub const fn short(&self) -> Option<char> { self.short }

	#[must_use]
	/// # Long Name (Sans Dashes).
	///
	/// Empty for shorthand-only flags.
	pub fn long(&self) -> &str { &self.long }

	#[must_use]
	/// # Description.
	pub fn description(&self) -> &str { &self.description }

	#[must_use]
	/// # Default Value (Textual).
	pub fn default(&self) -> &str { &self.default }

	#[must_use]
	/// # Boolean-Shaped?
	pub fn is_bool(&self) -> bool { self.value.is_bool() }

	#[must_use]
	/// # Preferred Display Name (With Dashes).
	pub fn display_name(&self) -> String {
		if self.long.is_empty() {
			self.short.map_or_else(String::new, |c| format!("-{c}"))
		}
		else { format!("--{}", self.long) }
	}
}



#[derive(Debug, Clone, Copy)]
/// # Name Alias.
///
/// What a registered name actually points at: a flag index, and whether
/// boolean assignments through this particular name are inverted.
struct Alias {
	/// # Flag Index.
	idx: usize,

	/// # Invert on Assign?
	invert: bool,
}



#[derive(Default)]
/// # Flag Table.
///
/// The per-command registry and scanner. Registration happens once, during
/// the spec build; scanning happens per invocation, writing recognized
/// values through their bindings and pooling everything else as positional
/// arguments.
///
/// ## Examples
///
/// ```
/// use paisley::{Binding, FlagTable};
///
/// let verbose = Binding::new(false);
/// let jobs: Binding<Option<u32>> = Binding::new(None);
///
/// let mut table = FlagTable::new();
/// table.register(&verbose, Some('v'), "verbose", "Keep talking.").unwrap();
/// table.register(&jobs, Some('j'), "jobs", "Worker count.").unwrap();
///
/// let args: Vec<String> = ["-v", "--jobs=8", "in.txt"]
///     .iter().map(ToString::to_string).collect();
/// table.scan(&args, false).unwrap();
///
/// assert!(verbose.get());
/// assert_eq!(jobs.get(), Some(8));
/// assert_eq!(table.args(), ["in.txt"]);
/// ```
pub struct FlagTable {
	/// # The Flags Themselves.
	flags: Vec<Flag>,

	/// # Long Names (and Negated Aliases).
	formal: BTreeMap<String, Alias>,

	/// # Shorthand Characters.
	shorthands: BTreeMap<char, Alias>,

	/// # Flags Assigned During the Current Scan.
	actual: BTreeSet<usize>,

	/// # Residual Positional Arguments.
	args: Vec<String>,
}

/// # Registration.
impl FlagTable {
	#[must_use]
	/// # New (Empty) Table.
	pub fn new() -> Self { Self::default() }

	/// # Register a Flag.
	///
	/// Record a new flag backed by (a duplicate handle of) `value`,
	/// returning its index for use with [`FlagTable::register_negated`].
	///
	/// ## Errors
	///
	/// Misuse here means a bug in the program's own description rather
	/// than anything a user did, so it is meant to be caught at startup:
	/// * Neither a short nor long name was provided;
	/// * The short name is `-` or `=`;
	/// * The long name starts with `-` or contains `=`;
	/// * Either name was already registered;
	pub fn register(
		&mut self,
		value: &dyn Value,
		short: Option<char>,
		long: &str,
		description: &str,
	) -> Result<usize, SpecError> {
		if short.is_none() && long.is_empty() {
			return Err(SpecError::UnnamedOption);
		}
		if let Some(ch) = short {
			if matches!(ch, '-' | '=') {
				return Err(SpecError::BadFlagName(ch.to_string()));
			}
			if self.shorthands.contains_key(&ch) {
				return Err(SpecError::DuplicateFlag(ch.to_string()));
			}
		}
		if ! long.is_empty() {
			if long.starts_with('-') || long.contains('=') {
				return Err(SpecError::BadFlagName(long.to_owned()));
			}
			if self.formal.contains_key(long) {
				return Err(SpecError::DuplicateFlag(long.to_owned()));
			}
		}

		let idx = self.flags.len();
		self.flags.push(Flag {
			short,
			long: long.to_owned(),
			description: description.to_owned(),
			default: value.render_default(),
			value: value.duplicate(),
		});
		if let Some(ch) = short {
			self.shorthands.insert(ch, Alias { idx, invert: false });
		}
		if ! long.is_empty() {
			self.formal.insert(long.to_owned(), Alias { idx, invert: false });
		}
		Ok(idx)
	}

	/// # Register a Negated Alias.
	///
	/// Install `no-<long>` as an inverting alias for the flag at `idx`, so
	/// `--no-thing` writes `false` (and `--no-thing=false` writes `true`)
	/// through the same cell as `--thing`.
	///
	/// ## Errors
	///
	/// Returns an error if the index is bogus, the flag is not a
	/// long-named boolean, or the derived name collides.
	pub fn register_negated(&mut self, idx: usize) -> Result<(), SpecError> {
		let flag = self.flags.get(idx)
			.ok_or(SpecError::UnnamedOption)?;
		if flag.long.is_empty() || ! flag.value.is_bool() {
			return Err(SpecError::NotNegatable(flag.display_name()));
		}

		let negated = format!("no-{}", flag.long);
		if self.formal.contains_key(&negated) {
			return Err(SpecError::DuplicateFlag(negated));
		}
		self.formal.insert(negated, Alias { idx, invert: true });
		Ok(())
	}
}

/// # Scanning.
impl FlagTable {
	/// # Scan an Argument Vector.
	///
	/// Work through `args` token by token, writing recognized flag values
	/// through their bindings and pooling everything else into the
	/// positional list (retrievable via [`FlagTable::args`]).
	///
	/// The grammar is the conventional POSIX/GNU one — `-abc` clustering,
	/// `--flag=value`, `--flag value`, and `--` end-of-flags — because
	/// anything else breaks muscle memory.
	///
	/// When `dispatch` is true the scan instead *stops* at the first free
	/// argument (before any `--`), returning it along with the unconsumed
	/// remainder so the caller can route both to a subcommand.
	///
	/// ## Errors
	///
	/// Scanning stops at the first error; no aggregation is attempted.
	/// Storage already written by earlier tokens stays written.
	pub fn scan(&mut self, args: &[String], dispatch: bool)
	-> Result<Option<(String, Vec<String>)>, ParseError> {
		let mut idx = 0;
		while idx < args.len() {
			let token = args[idx].as_str();
			idx += 1;

			// Too short to be a flag, or undashed: a positional, or the
			// subcommand handoff if we're routing.
			if token.len() < 2 || ! token.starts_with('-') {
				if dispatch {
					return Ok(Some((token.to_owned(), args[idx..].to_vec())));
				}
				self.args.push(token.to_owned());
				continue;
			}

			// End-of-flags: everything else passes through verbatim.
			if token == "--" {
				self.args.extend(args[idx..].iter().cloned());
				break;
			}

			// Long or short, then back around.
			idx = match token.strip_prefix("--") {
				Some(body) => self.scan_long(token, body, args, idx)?,
				None => self.scan_cluster(token, args, idx)?,
			};
		}

		Ok(None)
	}

	/// # Reset Scan State.
	///
	/// Clear the positional pool and assignment records ahead of a fresh
	/// scan. Registered flags (and their bindings) are unaffected.
	pub fn reset(&mut self) {
		self.actual.clear();
		self.args.clear();
	}

	/// # Handle One Long Flag.
	///
	/// `body` is the token minus its `--` prefix; `idx` points at the next
	/// unconsumed token, and the (possibly advanced) position is returned.
	fn scan_long(&mut self, token: &str, body: &str, args: &[String], idx: usize)
	-> Result<usize, ParseError> {
		if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
			return Err(ParseError::BadSyntax(token.to_owned()));
		}

		// Split any inline value off first.
		let (name, inline) = match body.split_once('=') {
			Some((n, v)) => (n, Some(v)),
			None => (body, None),
		};

		let Some(alias) = self.formal.get(name).copied() else {
			return Err(ParseError::UnknownFlag(format!("--{name}")));
		};
		let display = format!("--{name}");

		// Booleans never eat the next token, but do honor inline values.
		if self.flags[alias.idx].value.is_bool() {
			self.assign(alias, &display, inline.unwrap_or("true"))?;
		}
		else if let Some(v) = inline {
			self.assign(alias, &display, v)?;
		}
		// No inline value; the next token (whatever it looks like) is it.
		else if idx < args.len() {
			let v = args[idx].clone();
			self.assign(alias, &display, &v)?;
			return Ok(idx + 1);
		}
		else {
			return Err(ParseError::NeedsValue(display));
		}

		Ok(idx)
	}

	/// # Handle One Short Cluster.
	///
	/// `-x`, `-xyz`, `-x=value`, `-xyz=value`. Every character but the
	/// last must be a boolean shorthand; the last resolves its value the
	/// same way a long flag would.
	fn scan_cluster(&mut self, token: &str, args: &[String], idx: usize)
	-> Result<usize, ParseError> {
		let body = &token[1..];
		if body.starts_with('=') {
			return Err(ParseError::BadSyntax(token.to_owned()));
		}

		let (cluster, inline) = match body.split_once('=') {
			Some((c, v)) => (c, Some(v)),
			None => (body, None),
		};

		let shorts: Vec<char> = cluster.chars().collect();
		for (k, ch) in shorts.iter().copied().enumerate() {
			let display = format!("-{ch}");
			let Some(alias) = self.shorthands.get(&ch).copied() else {
				return Err(ParseError::UnknownFlag(display));
			};

			// Mid-cluster flags can't take values, so they'd better not
			// want any.
			if k + 1 < shorts.len() {
				if ! self.flags[alias.idx].value.is_bool() {
					return Err(ParseError::NeedsValue(display));
				}
				self.assign(alias, &display, "true")?;
				continue;
			}

			// The last one resolves like a long flag.
			if self.flags[alias.idx].value.is_bool() {
				self.assign(alias, &display, inline.unwrap_or("true"))?;
			}
			else if let Some(v) = inline {
				self.assign(alias, &display, v)?;
			}
			else if idx < args.len() {
				let v = args[idx].clone();
				self.assign(alias, &display, &v)?;
				return Ok(idx + 1);
			}
			else {
				return Err(ParseError::NeedsValue(display));
			}
		}

		Ok(idx)
	}

	/// # Assign a Raw Value.
	///
	/// Push `raw` through the codec — inverting first for negated aliases —
	/// and record the hit, or dress the codec's complaint up with the
	/// offending name and value.
	fn assign(&mut self, alias: Alias, name: &str, raw: &str)
	-> Result<(), ParseError> {
		let flag = &mut self.flags[alias.idx];
		let res =
			if alias.invert {
				// The alias owns the inversion: parse the boolean as
				// given, then store its opposite.
				<bool as Scalar>::parse(raw).and_then(|b|
					flag.value.assign(if b { "false" } else { "true" })
				)
			}
			else { flag.value.assign(raw) };

		match res {
			Ok(()) => {
				self.actual.insert(alias.idx);
				Ok(())
			},
			Err(source) => Err(ParseError::InvalidValue {
				flag: name.to_owned(),
				value: raw.to_owned(),
				source,
			}),
		}
	}
}

/// # Introspection.
impl FlagTable {
	#[must_use]
	/// # All Registered Flags (Declaration Order).
	pub fn flags(&self) -> &[Flag] { &self.flags }

	#[must_use]
	/// # Residual Positional Arguments.
	///
	/// The tokens the last scan left over, in order.
	pub fn args(&self) -> &[String] { &self.args }

	/// # Flags Assigned During the Last Scan.
	pub fn actual(&self) -> impl Iterator<Item = &Flag> {
		self.actual.iter().map(|&idx| &self.flags[idx])
	}

	#[must_use]
	/// # Look Up a Flag by Name.
	///
	/// Names are dashless: single characters search the shorthands,
	/// anything longer the formal (and negated) names.
	pub fn get(&self, name: &str) -> Option<&Flag> {
		if let Some(alias) = self.formal.get(name) {
			return Some(&self.flags[alias.idx]);
		}

		let mut chars = name.chars();
		let ch = chars.next()?;
		if chars.next().is_none() {
			self.shorthands.get(&ch).map(|alias| &self.flags[alias.idx])
		}
		else { None }
	}

	/// # Indices Assigned During the Last Scan.
	pub(crate) fn touched(&self) -> &BTreeSet<usize> { &self.actual }
}
