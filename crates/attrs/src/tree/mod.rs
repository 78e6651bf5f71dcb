//! The owning node arena.
//!
//! Every node lives in a [`NodeTree`]. Ownership edges (parent to child) are
//! recorded in the owner's entry and drive transitive release; the child keeps
//! a non-owning back-reference to its parent as a plain [`NodeId`].

use slab::Slab;
use smallvec::SmallVec;

use folio_primitives::NodeId;

use crate::descriptor::{AccessMode, Descriptor};
use crate::error::AttrError;
use crate::node::{Node, NodeKind};
use crate::value::AttrValue;

#[cfg(test)]
mod tests;

struct Entry {
	generation: u32,
	parent: Option<NodeId>,
	children: SmallVec<[NodeId; 4]>,
	node: Box<dyn Node>,
}

/// Arena owning a forest of nodes.
#[derive(Default)]
pub struct NodeTree {
	nodes: Slab<Entry>,
	generation: u32,
}

impl NodeTree {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			nodes: Slab::with_capacity(capacity),
			generation: 0,
		}
	}

	/// Number of live nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Inserts a detached root node.
	pub fn insert(&mut self, node: Box<dyn Node>) -> NodeId {
		self.insert_entry(None, node)
	}

	/// Creates a detached root node of `kind`.
	pub fn create(&mut self, kind: &'static NodeKind) -> NodeId {
		self.insert((kind.create)())
	}

	fn insert_entry(&mut self, parent: Option<NodeId>, node: Box<dyn Node>) -> NodeId {
		self.generation = self.generation.wrapping_add(1);
		let generation = self.generation;
		let index = self.nodes.insert(Entry {
			generation,
			parent,
			children: SmallVec::new(),
			node,
		});
		NodeId::new(index as u32, generation)
	}

	fn entry(&self, id: NodeId) -> Result<&Entry, AttrError> {
		self.nodes
			.get(id.index() as usize)
			.filter(|e| e.generation == id.generation())
			.ok_or(AttrError::NodeNotFound(id))
	}

	fn entry_mut(&mut self, id: NodeId) -> Result<&mut Entry, AttrError> {
		self.nodes
			.get_mut(id.index() as usize)
			.filter(|e| e.generation == id.generation())
			.ok_or(AttrError::NodeNotFound(id))
	}

	pub fn contains(&self, id: NodeId) -> bool {
		self.entry(id).is_ok()
	}

	pub fn get(&self, id: NodeId) -> Result<&dyn Node, AttrError> {
		self.entry(id).map(|e| &*e.node)
	}

	pub fn get_mut(&mut self, id: NodeId) -> Result<&mut dyn Node, AttrError> {
		self.entry_mut(id).map(|e| &mut *e.node)
	}

	pub fn kind(&self, id: NodeId) -> Result<&'static NodeKind, AttrError> {
		self.get(id).map(|n| n.kind())
	}

	pub fn downcast<N: Node>(&self, id: NodeId) -> Result<&N, AttrError> {
		crate::node::downcast(self.get(id)?)
	}

	pub fn downcast_mut<N: Node>(&mut self, id: NodeId) -> Result<&mut N, AttrError> {
		crate::node::downcast_mut(self.get_mut(id)?)
	}

	/// The owner of `id`, or `None` for roots and unknown ids.
	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.entry(id).ok().and_then(|e| e.parent)
	}

	/// Nodes owned by `id`, in attachment order.
	pub fn children(&self, id: NodeId) -> Result<&[NodeId], AttrError> {
		self.entry(id).map(|e| e.children.as_slice())
	}

	/// Walks the owner chain upward, starting with the parent of `id`.
	pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		std::iter::successors(self.parent(id), move |&p| self.parent(p))
	}

	/// Inserts `node` as a child owned by `parent`.
	pub(crate) fn insert_child(&mut self, parent: NodeId, node: Box<dyn Node>) -> Result<NodeId, AttrError> {
		self.entry(parent)?;
		let child = self.insert_entry(Some(parent), node);
		self.entry_mut(parent)?.children.push(child);
		Ok(child)
	}

	/// Makes the detached root `child` owned by `parent`.
	pub(crate) fn adopt(&mut self, parent: NodeId, child: NodeId) -> Result<(), AttrError> {
		self.entry(parent)?;
		if let Some(owner) = self.entry(child)?.parent {
			return Err(AttrError::InvalidOperation(format!(
				"node {child} is already owned by {owner}"
			)));
		}
		if parent == child || self.ancestors(parent).any(|a| a == child) {
			return Err(AttrError::InvalidOperation(format!(
				"node {child} cannot own its ancestor {parent}"
			)));
		}
		self.entry_mut(child)?.parent = Some(parent);
		self.entry_mut(parent)?.children.push(child);
		Ok(())
	}

	/// Undoes [`Self::adopt`], leaving `child` a detached root.
	pub(crate) fn disown(&mut self, parent: NodeId, child: NodeId) {
		if let Ok(entry) = self.entry_mut(parent) {
			entry.children.retain(|c| *c != child);
		}
		if let Ok(entry) = self.entry_mut(child) {
			entry.parent = None;
		}
	}

	/// Drops `child` and everything it owns on behalf of its owner.
	pub(crate) fn release_owned(&mut self, parent: NodeId, child: NodeId) {
		if let Ok(entry) = self.entry_mut(parent) {
			entry.children.retain(|c| *c != child);
		}
		self.drop_subtree(child);
	}

	/// Releases a detached root and everything it owns.
	///
	/// Owned nodes are released through their owner: by replacing the slot
	/// that holds them or by removing them from their list.
	pub fn release(&mut self, id: NodeId) -> Result<(), AttrError> {
		if let Some(owner) = self.entry(id)?.parent {
			return Err(AttrError::InvalidOperation(format!(
				"node {id} is owned by {owner}; release it through its owner"
			)));
		}
		self.drop_subtree(id);
		Ok(())
	}

	fn drop_subtree(&mut self, root: NodeId) {
		let mut pending = vec![root];
		while let Some(id) = pending.pop() {
			if self.entry(id).is_err() {
				tracing::warn!(%id, "released node is already gone");
				continue;
			}
			let entry = self.nodes.remove(id.index() as usize);
			pending.extend(entry.children);
		}
	}

	/// Appends `item` to the collection `list`, which takes ownership of it.
	pub fn append(&mut self, list: NodeId, item: NodeId) -> Result<(), AttrError> {
		let list_kind = self.kind(list)?;
		let Some(item_kind) = list_kind.items else {
			return Err(AttrError::InvalidOperation(format!(
				"{} is not a collection",
				list_kind.name
			)));
		};
		let got = self.kind(item)?;
		if got != item_kind {
			return Err(AttrError::WrongNodeKind {
				expected: item_kind.name,
				got: got.name,
			});
		}
		self.adopt(list, item)?;
		if let Some(items) = self.get_mut(list)?.items_mut() {
			items.push(item);
		}
		Ok(())
	}

	/// Creates an item of the list's item kind and appends it.
	pub fn append_new(&mut self, list: NodeId) -> Result<NodeId, AttrError> {
		let list_kind = self.kind(list)?;
		let item_kind = list_kind.items.ok_or_else(|| {
			AttrError::InvalidOperation(format!("{} is not a collection", list_kind.name))
		})?;
		let item = self.insert_child(list, (item_kind.create)())?;
		if let Some(items) = self.get_mut(list)?.items_mut() {
			items.push(item);
		}
		Ok(item)
	}

	/// Items of a collection node.
	pub fn items(&self, list: NodeId) -> Result<&[NodeId], AttrError> {
		let node = self.get(list)?;
		node.items().ok_or_else(|| {
			AttrError::InvalidOperation(format!("{} is not a collection", node.kind().name))
		})
	}

	/// Removes and releases the item at `index`.
	pub fn remove_item(&mut self, list: NodeId, index: usize) -> Result<(), AttrError> {
		let node = self.get_mut(list)?;
		let name = node.kind().name;
		let items = node
			.items_mut()
			.ok_or_else(|| AttrError::InvalidOperation(format!("{name} is not a collection")))?;
		if index >= items.len() {
			return Err(AttrError::InvalidOperation(format!(
				"{name} has no item at index {index}"
			)));
		}
		let item = items.remove(index);
		self.release_owned(list, item);
		Ok(())
	}

	/// Whether a node reports itself unset: an empty collection, or a node
	/// whose every unsettable attribute is unset. Plain values without an
	/// unset state are not consulted, matching what [`Self::clear_node`] skips.
	pub fn node_is_null(&self, id: NodeId) -> Result<bool, AttrError> {
		let node = self.get(id)?;
		if let Some(items) = node.items() {
			return Ok(items.is_empty());
		}
		for descriptor in node.kind().descriptors() {
			if descriptor.null_state(self, id)? == Some(false) {
				return Ok(false);
			}
		}
		Ok(true)
	}

	/// The node's own unset routine: releases a collection's items, or marks
	/// every unsettable attribute unset. Nested children are cleared
	/// recursively and stay in place.
	pub fn clear_node(&mut self, id: NodeId) -> Result<(), AttrError> {
		let node = self.get_mut(id)?;
		let kind = node.kind();
		if let Some(items) = node.items_mut() {
			let items = std::mem::take(items);
			for item in items {
				self.release_owned(id, item);
			}
			return Ok(());
		}
		for descriptor in kind.descriptors() {
			match descriptor.set_null(self, id) {
				Ok(()) | Err(AttrError::NotNullable { .. }) => {}
				Err(err) => return Err(err),
			}
		}
		Ok(())
	}

	/// Looks up the descriptor of attribute `name` on `id`'s kind.
	pub fn descriptor(&self, id: NodeId, name: &str) -> Result<&'static Descriptor, AttrError> {
		let kind = self.kind(id)?;
		kind.descriptors()
			.get(name)
			.ok_or_else(|| AttrError::UnknownAttribute {
				kind: kind.name,
				attr: name.to_string(),
			})
	}

	pub fn get_attr(&mut self, id: NodeId, name: &str, mode: AccessMode) -> Result<Option<AttrValue>, AttrError> {
		self.descriptor(id, name)?.get_value(self, id, mode)
	}

	pub fn peek_attr(&self, id: NodeId, name: &str) -> Result<Option<AttrValue>, AttrError> {
		self.descriptor(id, name)?.peek_value(self, id)
	}

	pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<AttrValue>) -> Result<(), AttrError> {
		self.descriptor(id, name)?.set_value(self, id, value.into())
	}

	pub fn clear_attr(&mut self, id: NodeId, name: &str) -> Result<(), AttrError> {
		self.descriptor(id, name)?.set_null(self, id)
	}

	pub fn attr_is_null(&self, id: NodeId, name: &str) -> Result<bool, AttrError> {
		self.descriptor(id, name)?.is_null(self, id)
	}

	/// The nested node held by attribute `name`, materialized if absent.
	pub fn child_node(&mut self, id: NodeId, name: &str) -> Result<NodeId, AttrError> {
		let descriptor = self.descriptor(id, name)?;
		match descriptor.get_value(self, id, AccessMode::ReadWrite)? {
			Some(AttrValue::Node(child)) => Ok(child),
			Some(other) => Err(AttrError::TypeMismatch {
				attr: descriptor.name(),
				expected: descriptor.value_type().to_string(),
				got: other.type_name(),
			}),
			None => Err(AttrError::InvalidOperation(format!(
				"{}.{} holds no node",
				descriptor.owner(),
				descriptor.name()
			))),
		}
	}

	/// Attributes of `id` that are set, in declaration order.
	pub fn explicit_attrs(&self, id: NodeId) -> Result<Vec<(&'static str, AttrValue)>, AttrError> {
		let mut attrs = Vec::new();
		for descriptor in self.kind(id)?.descriptors() {
			if let Some(value) = descriptor.peek_value(self, id)? {
				attrs.push((descriptor.name(), value));
			}
		}
		Ok(attrs)
	}
}

impl std::fmt::Debug for NodeTree {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map()
			.entries(self.nodes.iter().map(|(index, e)| {
				(NodeId::new(index as u32, e.generation), (e.node.kind().name, e.parent))
			}))
			.finish()
	}
}
