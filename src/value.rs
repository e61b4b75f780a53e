/*!
# Paisley: Values and Bindings.

Options and positionals write their results straight into caller-owned
storage. The caller creates a [`Binding`] for each slot, keeps a clone for
reading the answer back out, and hands a reference to the describer; the
library only ever writes *through* the handle, never owning the data in any
meaningful sense.

On top of the bindings sit the codecs: [`Scalar`] supplies per-kind
parse/render, and the object-safe [`Value`] trait exposes the fixed
capability set the flag table needs. New kinds are added by implementing
[`Scalar`] (or wrapping in [`Text`]); nothing else in the crate ever
type-switches on concrete kinds.
*/

use crate::ValueError;
use std::{
	cell::RefCell,
	fmt,
	num::IntErrorKind,
	rc::Rc,
	str::FromStr,
};



#[derive(Debug, Default)]
/// # Shared Storage Handle.
///
/// A cheap, clonable handle to one caller-owned storage cell. All clones
/// view the same cell, so a copy kept by the caller sees whatever parsing
/// wrote through the copy held by the spec.
///
/// Being [`Rc`]-based, bindings are strictly single-threaded; a spec tree
/// can't be shared across threads, which is the intended model anyway.
///
/// ## Examples
///
/// ```
/// use paisley::Binding;
///
/// let mine = Binding::new(0_u32);
/// let theirs = mine.clone();
///
/// theirs.set(5);
/// assert_eq!(mine.get(), 5);
/// ```
pub struct Binding<T>(Rc<RefCell<T>>);

impl<T> Clone for Binding<T> {
	#[inline]
	fn clone(&self) -> Self { Self(Rc::clone(&self.0)) }
}

impl<T> Binding<T> {
	#[must_use]
	/// # New Binding.
	///
	/// Create a new cell seeded with `value`, which doubles as the default
	/// for help-rendering purposes.
	pub fn new(value: T) -> Self { Self(Rc::new(RefCell::new(value))) }

	/// # Replace the Stored Value.
	pub fn set(&self, value: T) { *self.0.borrow_mut() = value; }
}

impl<T: Clone> Binding<T> {
	#[must_use]
	/// # Copy of the Stored Value.
	pub fn get(&self) -> T { self.0.borrow().clone() }
}



/// # Scalar Codec.
///
/// One textual parse/format pair per supported scalar kind, all sharing a
/// uniform contract: `parse` turns a raw token into a value or a
/// [`ValueError`], `render` produces the canonical textual form.
///
/// Numeric kinds must report malformed syntax as [`ValueError::Parse`] and
/// out-of-range magnitude as [`ValueError::Range`]; these are different
/// conversations to have with a user.
pub trait Scalar: Sized {
	/// # Boolean-Shaped?
	///
	/// Only the boolean kind answers true. The parser uses this to decide
	/// whether a following token is consumed as a value or left alone.
	const IS_BOOL: bool = false;

	/// # Parse From Text.
	///
	/// ## Errors
	///
	/// Returns an error if the raw text cannot be converted.
	fn parse(raw: &str) -> Result<Self, ValueError>;

	/// # Canonical Textual Form.
	fn render(&self) -> String;
}

impl Scalar for bool {
	const IS_BOOL: bool = true;

	/// # Parse From Text.
	///
	/// Only the canonical `true`/`false` spellings are accepted.
	///
	/// ## Errors
	///
	/// Returns an error for anything else.
	fn parse(raw: &str) -> Result<Self, ValueError> {
		raw.parse::<Self>().map_err(|_| ValueError::Parse)
	}

	fn render(&self) -> String { self.to_string() }
}

impl Scalar for String {
	/// # Parse From Text.
	///
	/// Strings assign verbatim; this cannot fail.
	///
	/// ## Errors
	///
	/// None, but the signature is what it is.
	fn parse(raw: &str) -> Result<Self, ValueError> { Ok(raw.to_owned()) }

	fn render(&self) -> String { self.clone() }
}

/// # Helper: Integer Scalars.
macro_rules! scalar_int {
	($($ty:ty),+ $(,)?) => ($(
		impl Scalar for $ty {
			/// # Parse From Text.
			///
			/// ## Errors
			///
			/// Malformed input is a parse error; a well-formed number too
			/// big or small for the type is a range error.
			fn parse(raw: &str) -> Result<Self, ValueError> {
				raw.parse::<Self>().map_err(|e| match e.kind() {
					IntErrorKind::PosOverflow | IntErrorKind::NegOverflow =>
						ValueError::Range,
					_ => ValueError::Parse,
				})
			}

			fn render(&self) -> String { self.to_string() }
		}
	)+);
}

scalar_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// # Helper: Float Scalars.
macro_rules! scalar_float {
	($($ty:ty),+ $(,)?) => ($(
		impl Scalar for $ty {
			/// # Parse From Text.
			///
			/// ## Errors
			///
			/// Malformed input is a parse error. Overflowing magnitude
			/// saturates to infinity during conversion, so a non-infinite
			/// spelling that comes back infinite is reported as a range
			/// error instead.
			fn parse(raw: &str) -> Result<Self, ValueError> {
				let parsed = raw.parse::<Self>().map_err(|_| ValueError::Parse)?;
				if parsed.is_infinite() && ! spelled_infinite(raw) {
					Err(ValueError::Range)
				}
				else { Ok(parsed) }
			}

			fn render(&self) -> String { self.to_string() }
		}
	)+);
}

scalar_float!(f32, f64);

/// # Literally Spelled "Infinity"?
///
/// Distinguish an intentional `inf` from an overflowed finite spelling.
fn spelled_infinite(raw: &str) -> bool {
	let raw = raw.trim_start_matches(&['+', '-'][..]);
	raw.eq_ignore_ascii_case("inf") || raw.eq_ignore_ascii_case("infinity")
}



/// # Bound Value.
///
/// The object-safe capability set the flag table and spec tree work
/// against: render the current (default) value, assign from raw text, and
/// answer the two shape questions registration cares about.
///
/// Implementations are provided for [`Binding<T>`] over any [`Scalar`]
/// (required storage), [`Binding<Option<T>>`] (optional storage, i.e. the
/// field has no meaningful default), [`Binding<Vec<String>>`] (repeated
/// positional storage), and the [`Text`] delegate.
pub trait Value {
	/// # Textual Form of the Current Value.
	///
	/// This is captured at registration time so usage text can show the
	/// default even after parsing has scribbled over the storage.
	fn render_default(&self) -> String;

	/// # Parse and Store.
	///
	/// Parse `raw` and write the result through the binding, in place.
	///
	/// ## Errors
	///
	/// Returns an error if the text cannot be parsed; the storage is left
	/// untouched in that case.
	fn assign(&mut self, raw: &str) -> Result<(), ValueError>;

	/// # Boolean-Shaped?
	///
	/// Boolean flags never consume a following bare token as their value,
	/// but accept an explicit `=value` for scripting.
	fn is_bool(&self) -> bool { false }

	/// # Optional Storage?
	///
	/// True when omission is fine, i.e. the storage is `Option`- or
	/// sequence-shaped. (Required-ness is metadata for usage rendering;
	/// it is not enforced at parse time.)
	fn is_optional(&self) -> bool { false }

	/// # Duplicate the Handle.
	///
	/// A boxed clone viewing the same storage cell, so the spec tree and
	/// its flag table can both hold the codec.
	fn duplicate(&self) -> Box<dyn Value>;
}

impl<T: Scalar + 'static> Value for Binding<T> {
	fn render_default(&self) -> String { self.0.borrow().render() }

	fn assign(&mut self, raw: &str) -> Result<(), ValueError> {
		let parsed = T::parse(raw)?;
		self.set(parsed);
		Ok(())
	}

	fn is_bool(&self) -> bool { T::IS_BOOL }

	fn duplicate(&self) -> Box<dyn Value> { Box::new(self.clone()) }
}

impl<T: Scalar + 'static> Value for Binding<Option<T>> {
	fn render_default(&self) -> String {
		match self.0.borrow().as_ref() {
			Some(v) => v.render(),
			None => String::new(),
		}
	}

	fn assign(&mut self, raw: &str) -> Result<(), ValueError> {
		let parsed = T::parse(raw)?;
		self.set(Some(parsed));
		Ok(())
	}

	fn is_bool(&self) -> bool { T::IS_BOOL }

	fn is_optional(&self) -> bool { true }

	fn duplicate(&self) -> Box<dyn Value> { Box::new(self.clone()) }
}

impl Value for Binding<Vec<String>> {
	fn render_default(&self) -> String { self.0.borrow().join(" ") }

	/// # Parse and Store.
	///
	/// Sequence storage appends rather than replaces; each assignment adds
	/// one more token to the pile.
	///
	/// ## Errors
	///
	/// None; tokens append verbatim.
	fn assign(&mut self, raw: &str) -> Result<(), ValueError> {
		self.0.borrow_mut().push(raw.to_owned());
		Ok(())
	}

	fn is_optional(&self) -> bool { true }

	fn duplicate(&self) -> Box<dyn Value> { Box::new(self.clone()) }
}



/// # Text-Marshalable Value.
///
/// A delegate codec for any type that can speak for itself through
/// [`FromStr`]/[`Display`](fmt::Display), the equivalent of binding a
/// custom type directly. Failures surface as [`ValueError::Other`] with
/// whatever message the delegate reported.
///
/// ## Examples
///
/// ```
/// use paisley::{Binding, Text, Value};
/// use std::net::IpAddr;
///
/// let bind: Binding<IpAddr> = Binding::new(IpAddr::from([127, 0, 0, 1]));
/// let mut codec = Text::new(&bind);
///
/// assert_eq!(codec.render_default(), "127.0.0.1");
/// assert!(codec.assign("10.0.0.1").is_ok());
/// assert_eq!(bind.get(), IpAddr::from([10, 0, 0, 1]));
/// assert!(codec.assign("not-an-ip").is_err());
/// ```
pub struct Text<T>(Binding<T>);

impl<T> Text<T>
where T: FromStr + fmt::Display + 'static, T::Err: fmt::Display {
	#[must_use]
	/// # New Text Codec.
	pub fn new(binding: &Binding<T>) -> Self { Self(binding.clone()) }
}

impl<T> Value for Text<T>
where T: FromStr + fmt::Display + 'static, T::Err: fmt::Display {
	fn render_default(&self) -> String { self.0.0.borrow().to_string() }

	fn assign(&mut self, raw: &str) -> Result<(), ValueError> {
		let parsed = raw.parse::<T>()
			.map_err(|e| ValueError::Other(e.to_string()))?;
		self.0.set(parsed);
		Ok(())
	}

	fn duplicate(&self) -> Box<dyn Value> { Box::new(Self(self.0.clone())) }
}



/// # Positional-Capable Value.
///
/// Positional slots only come in two shapes: a single string, or a string
/// sequence that drains every remaining token. This marker narrows the
/// describer's positional surface to exactly those.
pub trait Positional: Value {
	/// # Consumes All Remaining Tokens?
	fn repeated(&self) -> bool { false }
}

impl Positional for Binding<String> {}

impl Positional for Binding<Option<String>> {}

impl Positional for Binding<Vec<String>> {
	fn repeated(&self) -> bool { true }
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_binding() {
		let a = Binding::new(String::from("hello"));
		let b = a.clone();
		b.set(String::from("world"));
		assert_eq!(a.get(), "world");

		// Defaults derive where the inner type allows.
		let c = Binding::<u8>::default();
		assert_eq!(c.get(), 0);
	}

	#[test]
	fn t_bool() {
		assert_eq!(bool::parse("true"), Ok(true));
		assert_eq!(bool::parse("false"), Ok(false));

		// Only the canonical spellings count.
		for raw in ["TRUE", "True", "1", "t", "yes", ""] {
			assert_eq!(bool::parse(raw), Err(ValueError::Parse), "{raw:?} parsed?!");
		}

		assert!(true.render() == "true" && false.render() == "false");
	}

	#[test]
	fn t_int() {
		assert_eq!(u8::parse("255"), Ok(255));
		assert_eq!(i64::parse("-1"), Ok(-1));

		// Syntax vs range.
		assert_eq!(u8::parse("apples"), Err(ValueError::Parse));
		assert_eq!(u8::parse(""), Err(ValueError::Parse));
		assert_eq!(u8::parse("256"), Err(ValueError::Range));
		assert_eq!(i8::parse("-129"), Err(ValueError::Range));
		assert_eq!(u32::parse("-1"), Err(ValueError::Parse));
	}

	#[test]
	fn t_float() {
		assert_eq!(f64::parse("1.5"), Ok(1.5));
		assert_eq!(f64::parse("apples"), Err(ValueError::Parse));

		// Overflow is a range error, but a literal infinity is fine.
		assert_eq!(f64::parse("1e999"), Err(ValueError::Range));
		assert_eq!(f32::parse("3.5e38"), Err(ValueError::Range));
		assert!(f64::parse("inf").is_ok_and(f64::is_infinite));
		assert!(f64::parse("-Infinity").is_ok_and(f64::is_infinite));
	}

	#[test]
	fn t_value_required() {
		let bind = Binding::new(false);
		let mut val: Box<dyn Value> = bind.duplicate();

		assert!(val.is_bool());
		assert!(! val.is_optional());
		assert_eq!(val.render_default(), "false");

		val.assign("true").unwrap();
		assert!(bind.get());

		// Failed assignments leave the storage alone.
		assert_eq!(val.assign("maybe"), Err(ValueError::Parse));
		assert!(bind.get());
	}

	#[test]
	fn t_value_optional() {
		let bind: Binding<Option<u32>> = Binding::new(None);
		let mut val: Box<dyn Value> = bind.duplicate();

		assert!(! val.is_bool());
		assert!(val.is_optional());
		assert_eq!(val.render_default(), "");

		val.assign("42").unwrap();
		assert_eq!(bind.get(), Some(42));
		assert_eq!(val.render_default(), "42");
	}

	#[test]
	fn t_value_sequence() {
		let bind: Binding<Vec<String>> = Binding::default();
		let mut val: Box<dyn Value> = bind.duplicate();

		val.assign("one").unwrap();
		val.assign("two").unwrap();
		assert_eq!(bind.get(), ["one", "two"]);
		assert!(val.is_optional());
	}
}
