//! Node types and their static metadata.

use std::any::{Any, type_name};
use std::fmt;

use folio_primitives::NodeId;

use crate::error::AttrError;
use crate::set::DescriptorSet;

/// An instance of a document object type.
///
/// Nodes own their attribute slots. Child nodes live in the owning
/// [`NodeTree`](crate::NodeTree) and are referenced from slots by [`NodeId`].
pub trait Node: Any + Send + Sync + fmt::Debug {
	fn kind(&self) -> &'static NodeKind;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;

	/// Items of a collection node. Plain nodes have none.
	fn items(&self) -> Option<&[NodeId]> {
		None
	}

	fn items_mut(&mut self) -> Option<&mut Vec<NodeId>> {
		None
	}
}

impl dyn Node {
	pub fn downcast_ref<N: Node>(&self) -> Option<&N> {
		self.as_any().downcast_ref()
	}

	pub fn downcast_mut<N: Node>(&mut self) -> Option<&mut N> {
		self.as_any_mut().downcast_mut()
	}
}

pub(crate) fn downcast<N: Node>(node: &dyn Node) -> Result<&N, AttrError> {
	let got = node.kind().name;
	node.downcast_ref().ok_or(AttrError::WrongNodeKind {
		expected: type_name::<N>(),
		got,
	})
}

pub(crate) fn downcast_mut<N: Node>(node: &mut dyn Node) -> Result<&mut N, AttrError> {
	let got = node.kind().name;
	node.downcast_mut().ok_or(AttrError::WrongNodeKind {
		expected: type_name::<N>(),
		got,
	})
}

/// Static metadata for a node type.
pub struct NodeKind {
	pub name: &'static str,
	/// Default-constructs a node of this kind.
	pub create: fn() -> Box<dyn Node>,
	/// The ordered attribute descriptors of this kind, built once.
	pub describe: fn() -> &'static DescriptorSet,
	/// Item kind for collection kinds.
	pub items: Option<&'static NodeKind>,
}

impl NodeKind {
	pub fn is_collection(&self) -> bool {
		self.items.is_some()
	}

	pub fn descriptors(&self) -> &'static DescriptorSet {
		(self.describe)()
	}
}

impl PartialEq for NodeKind {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for NodeKind {}

impl fmt::Debug for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NodeKind")
			.field("name", &self.name)
			.field("items", &self.items.map(|k| k.name))
			.finish()
	}
}

/// Generic collection node. Items are owned by the list.
#[derive(Debug)]
pub struct NodeList {
	kind: &'static NodeKind,
	items: Vec<NodeId>,
}

impl NodeList {
	pub fn new(kind: &'static NodeKind) -> Self {
		Self {
			kind,
			items: Vec::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl Node for NodeList {
	fn kind(&self) -> &'static NodeKind {
		self.kind
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn items(&self) -> Option<&[NodeId]> {
		Some(&self.items)
	}

	fn items_mut(&mut self) -> Option<&mut Vec<NodeId>> {
		Some(&mut self.items)
	}
}

/// Declares the static [`NodeKind`] of a struct and implements [`Node`] for it.
///
/// The struct must implement `Default`; `describe` names a function returning
/// the kind's [`DescriptorSet`].
#[macro_export]
macro_rules! node_kind {
	(
		$(#[$meta:meta])*
		$vis:vis static $ident:ident: $ty:ty = $name:literal, describe = $describe:path $(;)?
	) => {
		$(#[$meta])*
		$vis static $ident: $crate::NodeKind = $crate::NodeKind {
			name: $name,
			create: || ::std::boxed::Box::new(<$ty as ::std::default::Default>::default()),
			describe: $describe,
			items: ::std::option::Option::None,
		};

		impl $crate::Node for $ty {
			fn kind(&self) -> &'static $crate::NodeKind {
				&$ident
			}

			fn as_any(&self) -> &dyn ::std::any::Any {
				self
			}

			fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
				self
			}
		}
	};
}

/// Declares a collection kind backed by [`NodeList`].
#[macro_export]
macro_rules! list_kind {
	(
		$(#[$meta:meta])*
		$vis:vis static $ident:ident = $name:literal of $item:path $(;)?
	) => {
		$(#[$meta])*
		$vis static $ident: $crate::NodeKind = $crate::NodeKind {
			name: $name,
			create: || ::std::boxed::Box::new($crate::NodeList::new(&$ident)),
			describe: $crate::DescriptorSet::empty,
			items: ::std::option::Option::Some(&$item),
		};
	};
}
