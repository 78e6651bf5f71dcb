//! Storage shapes and the raw transport between slots and descriptors.

use folio_primitives::{Color, NodeId, Nullable};

use crate::value::{AttrType, AttrValue, Scalar};

/// How a slot stores its attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
	/// The value is stored directly.
	Plain,
	/// The value is wrapped in a [`Nullable`].
	Nullable,
	/// An optional handle to a child node or collection.
	Child,
}

/// A slot's content as read or written by an [`Accessor`](crate::Accessor).
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
	Plain(AttrValue),
	Nullable { value: AttrValue, set: bool },
	Child(Option<NodeId>),
}

impl RawValue {
	pub fn shape(&self) -> Shape {
		match self {
			RawValue::Plain(_) => Shape::Plain,
			RawValue::Nullable { .. } => Shape::Nullable,
			RawValue::Child(_) => Shape::Child,
		}
	}

	/// Name of the carried value's type, for mismatch reports.
	pub fn type_name(&self) -> &'static str {
		match self {
			RawValue::Plain(value) | RawValue::Nullable { value, .. } => value.type_name(),
			RawValue::Child(_) => "node",
		}
	}
}

/// Rust types that can back an attribute slot.
///
/// `to_raw` and `from_raw` are the boxing and unboxing steps of the accessor
/// write path; `from_raw` returns the rejected input on mismatch.
pub trait Storage: Sized + Send + Sync + 'static {
	const SHAPE: Shape;

	/// Declared scalar type, `None` for child slots.
	fn value_type() -> Option<AttrType>;

	fn to_raw(&self) -> RawValue;

	fn from_raw(raw: RawValue) -> Result<Self, RawValue>;
}

#[doc(hidden)]
#[macro_export]
macro_rules! __plain_storage {
	($($ty:ty),* $(,)?) => {
		$(
			impl $crate::Storage for $ty {
				const SHAPE: $crate::Shape = $crate::Shape::Plain;

				fn value_type() -> ::std::option::Option<$crate::AttrType> {
					::std::option::Option::Some(<$ty as $crate::Scalar>::attr_type())
				}

				fn to_raw(&self) -> $crate::RawValue {
					$crate::RawValue::Plain(<$ty as $crate::Scalar>::into_value(self.clone()))
				}

				fn from_raw(raw: $crate::RawValue) -> ::std::result::Result<Self, $crate::RawValue> {
					match raw {
						$crate::RawValue::Plain(value) => {
							<$ty as $crate::Scalar>::from_value(value).map_err($crate::RawValue::Plain)
						}
						other => ::std::result::Result::Err(other),
					}
				}
			}
		)*
	};
}

__plain_storage!(bool, i64, i32, u32, f64, String, Color);

impl<T: Scalar> Storage for Nullable<T> {
	const SHAPE: Shape = Shape::Nullable;

	fn value_type() -> Option<AttrType> {
		Some(T::attr_type())
	}

	fn to_raw(&self) -> RawValue {
		RawValue::Nullable {
			value: self.stored().clone().into_value(),
			set: self.is_set(),
		}
	}

	fn from_raw(raw: RawValue) -> Result<Self, RawValue> {
		match raw {
			RawValue::Nullable { value, set } => T::from_value(value)
				.map(|v| Nullable::from_parts(v, set))
				.map_err(|value| RawValue::Nullable { value, set }),
			other => Err(other),
		}
	}
}

impl Storage for Option<NodeId> {
	const SHAPE: Shape = Shape::Child;

	fn value_type() -> Option<AttrType> {
		None
	}

	fn to_raw(&self) -> RawValue {
		RawValue::Child(*self)
	}

	fn from_raw(raw: RawValue) -> Result<Self, RawValue> {
		match raw {
			RawValue::Child(id) => Ok(id),
			other => Err(other),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nullable_keeps_flag_and_value() {
		let mut n = Nullable::new(12i32);
		n.set_null();
		let raw = n.to_raw();
		assert_eq!(
			raw,
			RawValue::Nullable {
				value: AttrValue::Int(12),
				set: false
			}
		);
		assert_eq!(Nullable::<i32>::from_raw(raw), Ok(n));
	}

	#[test]
	fn wrong_shape_is_rejected() {
		let raw = RawValue::Plain(AttrValue::Int(1));
		assert_eq!(Nullable::<i64>::from_raw(raw.clone()), Err(raw.clone()));
		assert_eq!(Option::<NodeId>::from_raw(raw.clone()), Err(raw));
	}

	#[test]
	fn wrong_scalar_is_rejected() {
		let raw = RawValue::Plain(AttrValue::from("12"));
		assert_eq!(i64::from_raw(raw.clone()), Err(raw));
	}
}
