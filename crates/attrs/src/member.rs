//! Handles to the storage behind an attribute.
//!
//! A [`Field`] projects straight into a node's struct. A [`Property`] routes
//! through getter/setter functions and inherits whatever validation the
//! setter performs. Both compile into an [`Accessor`].

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::accessor::Accessor;
use crate::error::{AttrError, ConfigError};
use crate::node::{Node, downcast, downcast_mut};
use crate::storage::{RawValue, Shape, Storage};
use crate::value::AttrType;

/// A bindable storage location that can be compiled into an [`Accessor`].
pub trait Binding: Send + Sync {
	/// Member name, as written in the node struct or its impl.
	fn name(&self) -> &'static str;

	fn shape(&self) -> Shape;

	fn value_type(&self) -> Option<AttrType>;

	/// Resolves the location into a read/write closure pair for attribute `attr`.
	fn compile(&self, attr: &'static str) -> Accessor;
}

/// A struct field of node type `N` holding `S`.
pub struct Field<N, S> {
	name: &'static str,
	get: fn(&N) -> &S,
	get_mut: fn(&mut N) -> &mut S,
}

impl<N, S> Field<N, S> {
	pub const fn new(name: &'static str, get: fn(&N) -> &S, get_mut: fn(&mut N) -> &mut S) -> Self {
		Self { name, get, get_mut }
	}
}

impl<N: Node, S: Storage> Binding for Field<N, S> {
	fn name(&self) -> &'static str {
		self.name
	}

	fn shape(&self) -> Shape {
		S::SHAPE
	}

	fn value_type(&self) -> Option<AttrType> {
		S::value_type()
	}

	fn compile(&self, attr: &'static str) -> Accessor {
		let get = self.get;
		let get_mut = self.get_mut;
		Accessor::new(
			self.name,
			Box::new(move |node: &dyn Node| -> Result<RawValue, AttrError> {
				Ok(get(downcast::<N>(node)?).to_raw())
			}),
			Box::new(move |node: &mut dyn Node, raw: RawValue| -> Result<(), AttrError> {
				let value = unbox::<S>(attr, raw)?;
				*get_mut(downcast_mut::<N>(node)?) = value;
				Ok(())
			}),
		)
	}
}

/// Setter of a [`Property`]. An `Err` rejects the value with a reason.
pub type Setter<N, S> = fn(&mut N, S) -> Result<(), String>;

/// A computed member of node type `N` exposed through accessor functions.
pub struct Property<N, S> {
	name: &'static str,
	get: fn(&N) -> S,
	set: Option<Setter<N, S>>,
	_marker: PhantomData<fn() -> S>,
}

impl<N, S> Property<N, S> {
	pub const fn new(name: &'static str, get: fn(&N) -> S, set: Setter<N, S>) -> Self {
		Self {
			name,
			get,
			set: Some(set),
			_marker: PhantomData,
		}
	}

	pub const fn read_only(name: &'static str, get: fn(&N) -> S) -> Self {
		Self {
			name,
			get,
			set: None,
			_marker: PhantomData,
		}
	}
}

impl<N: Node, S: Storage> Binding for Property<N, S> {
	fn name(&self) -> &'static str {
		self.name
	}

	fn shape(&self) -> Shape {
		S::SHAPE
	}

	fn value_type(&self) -> Option<AttrType> {
		S::value_type()
	}

	fn compile(&self, attr: &'static str) -> Accessor {
		let get = self.get;
		let set = self.set;
		let name = self.name;
		Accessor::new(
			self.name,
			Box::new(move |node: &dyn Node| -> Result<RawValue, AttrError> {
				Ok(get(downcast::<N>(node)?).to_raw())
			}),
			Box::new(move |node: &mut dyn Node, raw: RawValue| -> Result<(), AttrError> {
				let Some(set) = set else {
					return Err(AttrError::InvalidOperation(format!(
						"{attr}: property `{name}` is read-only"
					)));
				};
				let value = unbox::<S>(attr, raw)?;
				set(downcast_mut::<N>(node)?, value)
					.map_err(|reason| AttrError::Rejected { attr, reason })
			}),
		)
	}
}

fn unbox<S: Storage>(attr: &'static str, raw: RawValue) -> Result<S, AttrError> {
	S::from_raw(raw).map_err(|raw| AttrError::TypeMismatch {
		attr,
		expected: type_name::<S>().to_string(),
		got: raw.type_name(),
	})
}

/// The storage location behind a descriptor.
#[derive(Clone)]
pub enum Member {
	Field(Arc<dyn Binding>),
	Property(Arc<dyn Binding>),
	/// Metadata named a member that was never bound to a field or property.
	Unbound(&'static str),
}

impl Member {
	pub fn name(&self) -> &'static str {
		match self {
			Member::Field(b) | Member::Property(b) => b.name(),
			Member::Unbound(name) => name,
		}
	}

	pub fn is_field(&self) -> bool {
		matches!(self, Member::Field(_))
	}

	pub fn is_property(&self) -> bool {
		matches!(self, Member::Property(_))
	}

	pub(crate) fn compile(&self, owner: &'static str, attr: &'static str) -> Result<Accessor, ConfigError> {
		match self {
			Member::Field(b) | Member::Property(b) => Ok(b.compile(attr)),
			Member::Unbound(member) => Err(ConfigError::UnboundMember {
				owner,
				attr,
				member,
			}),
		}
	}
}

impl fmt::Debug for Member {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Member::Field(b) => f.debug_tuple("Field").field(&b.name()).finish(),
			Member::Property(b) => f.debug_tuple("Property").field(&b.name()).finish(),
			Member::Unbound(name) => f.debug_tuple("Unbound").field(name).finish(),
		}
	}
}

/// Builds a [`Field`] handle for a struct field.
///
/// ```ignore
/// let count = field!(Counter, count);
/// ```
#[macro_export]
macro_rules! field {
	($node:ty, $member:ident) => {
		$crate::Field::<$node, _>::new(
			stringify!($member),
			|n: &$node| &n.$member,
			|n: &mut $node| &mut n.$member,
		)
	};
}

/// Builds a [`Property`] handle from a getter and an optional setter.
///
/// ```ignore
/// let text = property!(Run, Run::text, Run::set_text);
/// let len = property!(Run, Run::len);
/// ```
#[macro_export]
macro_rules! property {
	($node:ty, $get:path) => {
		$crate::Property::<$node, _>::read_only(stringify!($get), $get)
	};
	($node:ty, $get:path, $set:path) => {
		$crate::Property::<$node, _>::new(stringify!($get), $get, $set)
	};
}
