/*!
# Paisley: Errors.

Two classes of failure live here, with very different audiences:

* [`SpecError`] — the description itself is broken. These are bugs in the
  CLI author's code, caught once during the one-time spec build, before any
  user input is looked at.
* [`ParseError`] — the user typed something the spec can't digest. These are
  per-invocation and recoverable; print usage and move on.

[`ValueError`] is the little cousin raised by value codecs, and
[`PaisleyError`] the top-level sum returned by
[`CommandLine::parse`](crate::CommandLine::parse).
*/

use std::{
	error::Error,
	fmt,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Value Assignment Error.
///
/// Returned by [`Value::assign`](crate::Value::assign) when a raw token
/// can't be written into the bound storage.
///
/// Numeric codecs distinguish *syntax* failures — not a number at all —
/// from *range* failures — a perfectly-formed number that doesn't fit —
/// because callers may want to word their guidance differently for each.
pub enum ValueError {
	/// # Malformed Input.
	Parse,

	/// # Out of Range.
	Range,

	/// # Delegated Failure.
	///
	/// Whatever a [`Text`](crate::Text) codec's underlying `FromStr`
	/// implementation had to say for itself.
	Other(String),
}

impl Error for ValueError {}

impl fmt::Display for ValueError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Parse => f.write_str("parse error"),
			Self::Range => f.write_str("value out of range"),
			Self::Other(s) => f.write_str(s),
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Specification Error.
///
/// The description handed to [`CommandLine`](crate::CommandLine) is
/// structurally invalid. There is no partial or degraded spec; the first
/// such error aborts the whole build.
pub enum SpecError {
	/// # Bad Command Name.
	///
	/// Subcommand names must be non-empty and cannot start with a dash.
	BadCommandName(String),

	/// # Bad Flag Name.
	///
	/// Short names are a single character other than `-`/`=`; long names
	/// cannot start with `-` or contain `=`.
	BadFlagName(String),

	/// # Duplicate Subcommand Name.
	DuplicateCommand(String),

	/// # Duplicate Option Name.
	///
	/// Short, long, and derived `no-` names all share one namespace per
	/// command node.
	DuplicateFlag(String),

	/// # Negation on a Non-Boolean.
	///
	/// The `,negatable` modifier only makes sense for boolean storage.
	NotNegatable(String),

	/// # Recursive Command Type.
	///
	/// A command model references its own type, directly or through an
	/// intermediate model. The payload is the offending type name.
	RecursiveCommand(&'static str),

	/// # Positional After a Repeated Positional.
	///
	/// A repeated positional drains every remaining token, so it has to
	/// come last.
	TrailingPositional,

	/// # Unnamed Option.
	///
	/// Options require a short and/or long name.
	UnnamedOption,
}

impl Error for SpecError {}

impl fmt::Display for SpecError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::BadCommandName(s) => write!(f, "invalid command name: {s:?}"),
			Self::BadFlagName(s) => write!(f, "invalid flag name: {s:?}"),
			Self::DuplicateCommand(s) => write!(f, "duplicated subcommand name: {s:?}"),
			Self::DuplicateFlag(s) => write!(f, "duplicated option name: {s:?}"),
			Self::NotNegatable(s) => write!(f, "flag {s:?} is not a boolean and cannot be negated"),
			Self::RecursiveCommand(s) => write!(f, "command type {s} is referenced recursively"),
			Self::TrailingPositional => f.write_str("positionals cannot follow a repeated positional"),
			Self::UnnamedOption => f.write_str("options require a short and/or long name"),
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Parse Error.
///
/// The argument vector didn't line up with the spec. Parsing stops at the
/// first such error; there is no aggregation. Each variant names the exact
/// offending token or flag so callers can say something actionable.
pub enum ParseError {
	/// # Bad Flag Syntax.
	///
	/// A dashed token that doesn't scan as a flag at all, like `--=foo` or
	/// `-=x`. The payload is the raw token.
	BadSyntax(String),

	/// # Invalid Value.
	///
	/// A value was supplied, but the codec spat it back out.
	InvalidValue {
		/// # Flag Name (With Dashes).
		flag: String,

		/// # Rejected Value.
		value: String,

		/// # Codec Complaint.
		source: ValueError,
	},

	/// # Flag Needs an Argument.
	///
	/// A non-boolean flag reached the end of the stream — or the middle of
	/// a short cluster — without a value to call its own.
	NeedsValue(String),

	/// # No Such Command.
	///
	/// Subcommands were declared, but the first free argument doesn't match
	/// any of them.
	UnknownCommand(String),

	/// # Flag Provided But Not Defined.
	UnknownFlag(String),
}

impl Error for ParseError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		if let Self::InvalidValue { source, .. } = self { Some(source) }
		else { None }
	}
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::BadSyntax(s) => write!(f, "bad flag syntax: {s}"),
			Self::InvalidValue { flag, value, source } =>
				write!(f, "invalid value {value:?} for flag {flag}: {source}"),
			Self::NeedsValue(s) => write!(f, "flag needs an argument: {s}"),
			Self::UnknownCommand(s) => write!(f, "no such command: {s:?}"),
			Self::UnknownFlag(s) => write!(f, "flag provided but not defined: {s}"),
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Top-Level Error.
///
/// This is the return type for [`CommandLine::parse`](crate::CommandLine::parse),
/// which can fail either way: the spec build runs lazily on first parse, so
/// a broken description and a broken argument vector surface through the
/// same call.
pub enum PaisleyError {
	/// # Parse Error.
	Parse(ParseError),

	/// # Specification Error.
	Spec(SpecError),
}

impl Error for PaisleyError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Parse(e) => Some(e),
			Self::Spec(e) => Some(e),
		}
	}
}

impl fmt::Display for PaisleyError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Parse(e) => e.fmt(f),
			Self::Spec(e) => e.fmt(f),
		}
	}
}

impl From<ParseError> for PaisleyError {
	#[inline]
	fn from(src: ParseError) -> Self { Self::Parse(src) }
}

impl From<SpecError> for PaisleyError {
	#[inline]
	fn from(src: SpecError) -> Self { Self::Spec(src) }
}

impl PaisleyError {
	#[must_use]
	/// # Suggested Exit Code.
	///
	/// Parse errors are user errors and map to the conventional `2`; spec
	/// errors are bugs in the program itself and map to `70` (EX_SOFTWARE).
	/// Whether and how to act on this is entirely up to the caller.
	pub const fn exit_code(&self) -> i32 {
		match self {
			Self::Parse(_) => 2,
			Self::Spec(_) => 70,
		}
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_display() {
		assert_eq!(
			ParseError::UnknownFlag("--nope".to_owned()).to_string(),
			"flag provided but not defined: --nope",
		);
		assert_eq!(
			ParseError::NeedsValue("-n".to_owned()).to_string(),
			"flag needs an argument: -n",
		);
		assert_eq!(
			ParseError::InvalidValue {
				flag: "--jobs".to_owned(),
				value: "lots".to_owned(),
				source: ValueError::Parse,
			}.to_string(),
			"invalid value \"lots\" for flag --jobs: parse error",
		);
		assert_eq!(
			SpecError::DuplicateFlag("v".to_owned()).to_string(),
			"duplicated option name: \"v\"",
		);
	}

	#[test]
	fn t_exit_code() {
		assert_eq!(
			PaisleyError::from(ParseError::BadSyntax("--=x".to_owned())).exit_code(),
			2,
		);
		assert_eq!(
			PaisleyError::from(SpecError::UnnamedOption).exit_code(),
			70,
		);
	}
}
