//! Attribute values as they cross the descriptor boundary.

use std::fmt;

use folio_primitives::{Color, NodeId};

/// Static metadata for an enum declared with [`attr_enum!`](crate::attr_enum).
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EnumInfo {
	pub name: &'static str,
	pub variants: &'static [&'static str],
}

/// A type-erased enum value: the enum's metadata plus the variant ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
	info: &'static EnumInfo,
	ordinal: u32,
}

impl EnumValue {
	pub const fn new(info: &'static EnumInfo, ordinal: u32) -> Self {
		Self { info, ordinal }
	}

	pub fn info(&self) -> &'static EnumInfo {
		self.info
	}

	pub fn ordinal(&self) -> u32 {
		self.ordinal
	}

	/// Variant name, or `"?"` for an ordinal outside the declared variants.
	pub fn name(&self) -> &'static str {
		self.info.variants.get(self.ordinal as usize).copied().unwrap_or("?")
	}

	pub fn is(&self, info: &EnumInfo) -> bool {
		self.info.name == info.name
	}
}

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	Enum(EnumValue),
	Color(Color),
	/// A nested child node or collection.
	Node(NodeId),
}

impl AttrValue {
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			AttrValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			AttrValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			AttrValue::Float(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			AttrValue::String(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_node(&self) -> Option<NodeId> {
		match self {
			AttrValue::Node(id) => Some(*id),
			_ => None,
		}
	}

	/// Returns true if this value matches the given type.
	pub fn matches_type(&self, ty: AttrType) -> bool {
		match (self, ty) {
			(AttrValue::Enum(e), AttrType::Enum(info)) => e.is(info),
			_ => matches!(
				(self, ty),
				(AttrValue::Bool(_), AttrType::Bool)
					| (AttrValue::Int(_), AttrType::Int)
					| (AttrValue::Float(_), AttrType::Float)
					| (AttrValue::String(_), AttrType::String)
					| (AttrValue::Color(_), AttrType::Color)
			),
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			AttrValue::Bool(_) => "bool",
			AttrValue::Int(_) => "int",
			AttrValue::Float(_) => "float",
			AttrValue::String(_) => "string",
			AttrValue::Enum(e) => e.info.name,
			AttrValue::Color(_) => "color",
			AttrValue::Node(_) => "node",
		}
	}

	/// `Some(is_unset)` for values that carry their own nullable state.
	pub fn null_state(&self) -> Option<bool> {
		match self {
			AttrValue::Color(c) => Some(c.is_empty()),
			_ => None,
		}
	}

	/// Soft-unsets a value that carries nullable state. Returns false when the
	/// value has no such state.
	pub fn mark_unset(&mut self) -> bool {
		match self {
			AttrValue::Color(c) => {
				c.clear();
				true
			}
			_ => false,
		}
	}
}

impl fmt::Display for AttrValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AttrValue::Bool(v) => write!(f, "{v}"),
			AttrValue::Int(v) => write!(f, "{v}"),
			AttrValue::Float(v) => write!(f, "{v}"),
			AttrValue::String(v) => write!(f, "{v:?}"),
			AttrValue::Enum(e) => f.write_str(e.name()),
			AttrValue::Color(c) => write!(f, "{c}"),
			AttrValue::Node(id) => write!(f, "{id}"),
		}
	}
}

impl From<bool> for AttrValue {
	fn from(v: bool) -> Self {
		AttrValue::Bool(v)
	}
}

impl From<i64> for AttrValue {
	fn from(v: i64) -> Self {
		AttrValue::Int(v)
	}
}

impl From<i32> for AttrValue {
	fn from(v: i32) -> Self {
		AttrValue::Int(v.into())
	}
}

impl From<u32> for AttrValue {
	fn from(v: u32) -> Self {
		AttrValue::Int(v.into())
	}
}

impl From<f64> for AttrValue {
	fn from(v: f64) -> Self {
		AttrValue::Float(v)
	}
}

impl From<String> for AttrValue {
	fn from(v: String) -> Self {
		AttrValue::String(v)
	}
}

impl From<&str> for AttrValue {
	fn from(v: &str) -> Self {
		AttrValue::String(v.to_string())
	}
}

impl From<Color> for AttrValue {
	fn from(v: Color) -> Self {
		AttrValue::Color(v)
	}
}

impl From<EnumValue> for AttrValue {
	fn from(v: EnumValue) -> Self {
		AttrValue::Enum(v)
	}
}

impl From<NodeId> for AttrValue {
	fn from(v: NodeId) -> Self {
		AttrValue::Node(v)
	}
}

/// Declared type of a scalar attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
	Bool,
	Int,
	Float,
	String,
	Enum(&'static EnumInfo),
	Color,
}

impl AttrType {
	/// A freshly constructed value of this type.
	pub fn default_value(self) -> AttrValue {
		match self {
			AttrType::Bool => AttrValue::Bool(false),
			AttrType::Int => AttrValue::Int(0),
			AttrType::Float => AttrValue::Float(0.0),
			AttrType::String => AttrValue::String(String::new()),
			AttrType::Enum(info) => AttrValue::Enum(EnumValue::new(info, 0)),
			AttrType::Color => AttrValue::Color(Color::EMPTY),
		}
	}
}

impl fmt::Display for AttrType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AttrType::Bool => f.write_str("bool"),
			AttrType::Int => f.write_str("int"),
			AttrType::Float => f.write_str("float"),
			AttrType::String => f.write_str("string"),
			AttrType::Enum(info) => f.write_str(info.name),
			AttrType::Color => f.write_str("color"),
		}
	}
}

/// Rust types that can be stored in a scalar attribute slot.
///
/// `from_value` hands the value back on mismatch so callers can report what
/// they actually received.
pub trait Scalar: Clone + Default + Send + Sync + 'static {
	fn attr_type() -> AttrType;

	fn into_value(self) -> AttrValue;

	fn from_value(value: AttrValue) -> Result<Self, AttrValue>;
}

impl Scalar for bool {
	fn attr_type() -> AttrType {
		AttrType::Bool
	}

	fn into_value(self) -> AttrValue {
		AttrValue::Bool(self)
	}

	fn from_value(value: AttrValue) -> Result<Self, AttrValue> {
		value.as_bool().ok_or(value)
	}
}

impl Scalar for i64 {
	fn attr_type() -> AttrType {
		AttrType::Int
	}

	fn into_value(self) -> AttrValue {
		AttrValue::Int(self)
	}

	fn from_value(value: AttrValue) -> Result<Self, AttrValue> {
		value.as_int().ok_or(value)
	}
}

impl Scalar for i32 {
	fn attr_type() -> AttrType {
		AttrType::Int
	}

	fn into_value(self) -> AttrValue {
		AttrValue::Int(self.into())
	}

	fn from_value(value: AttrValue) -> Result<Self, AttrValue> {
		match value.as_int().map(i32::try_from) {
			Some(Ok(v)) => Ok(v),
			_ => Err(value),
		}
	}
}

impl Scalar for u32 {
	fn attr_type() -> AttrType {
		AttrType::Int
	}

	fn into_value(self) -> AttrValue {
		AttrValue::Int(self.into())
	}

	fn from_value(value: AttrValue) -> Result<Self, AttrValue> {
		match value.as_int().map(u32::try_from) {
			Some(Ok(v)) => Ok(v),
			_ => Err(value),
		}
	}
}

impl Scalar for f64 {
	fn attr_type() -> AttrType {
		AttrType::Float
	}

	fn into_value(self) -> AttrValue {
		AttrValue::Float(self)
	}

	fn from_value(value: AttrValue) -> Result<Self, AttrValue> {
		value.as_float().ok_or(value)
	}
}

impl Scalar for String {
	fn attr_type() -> AttrType {
		AttrType::String
	}

	fn into_value(self) -> AttrValue {
		AttrValue::String(self)
	}

	fn from_value(value: AttrValue) -> Result<Self, AttrValue> {
		match value {
			AttrValue::String(s) => Ok(s),
			other => Err(other),
		}
	}
}

impl Scalar for Color {
	fn attr_type() -> AttrType {
		AttrType::Color
	}

	fn into_value(self) -> AttrValue {
		AttrValue::Color(self)
	}

	fn from_value(value: AttrValue) -> Result<Self, AttrValue> {
		match value {
			AttrValue::Color(c) => Ok(c),
			other => Err(other),
		}
	}
}

/// Declares a fieldless enum usable as a scalar attribute.
///
/// The first variant is the default.
///
/// ```ignore
/// attr_enum! {
///     /// Horizontal paragraph alignment.
///     pub enum Alignment {
///         Left,
///         Center,
///         Right,
///     }
/// }
/// ```
#[macro_export]
macro_rules! attr_enum {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$(#[$fmeta:meta])* $first:ident
			$(, $(#[$vmeta:meta])* $rest:ident)* $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
		$vis enum $name {
			$(#[$fmeta])*
			#[default]
			$first,
			$($(#[$vmeta])* $rest,)*
		}

		impl $name {
			const ALL: &'static [Self] = &[Self::$first $(, Self::$rest)*];

			/// Enum metadata shared by every value of this type.
			pub fn enum_info() -> &'static $crate::EnumInfo {
				static INFO: $crate::EnumInfo = $crate::EnumInfo {
					name: stringify!($name),
					variants: &[stringify!($first) $(, stringify!($rest))*],
				};
				&INFO
			}
		}

		impl $crate::Scalar for $name {
			fn attr_type() -> $crate::AttrType {
				$crate::AttrType::Enum(Self::enum_info())
			}

			fn into_value(self) -> $crate::AttrValue {
				$crate::AttrValue::Enum($crate::EnumValue::new(Self::enum_info(), self as u32))
			}

			fn from_value(value: $crate::AttrValue) -> ::std::result::Result<Self, $crate::AttrValue> {
				match value {
					$crate::AttrValue::Enum(e) if e.is(Self::enum_info()) => {
						Self::ALL.get(e.ordinal() as usize).copied().ok_or(value)
					}
					other => Err(other),
				}
			}
		}

		$crate::__plain_storage!($name);

		impl ::std::convert::From<$name> for $crate::AttrValue {
			fn from(v: $name) -> Self {
				<$name as $crate::Scalar>::into_value(v)
			}
		}
	};
}
