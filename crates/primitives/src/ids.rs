use std::fmt;

/// Handle to a node owned by a node tree.
///
/// Carries the slot index and the generation the slot had when the node was
/// inserted, so a handle to a released node never aliases a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
	index: u32,
	generation: u32,
}

impl NodeId {
	pub const fn new(index: u32, generation: u32) -> Self {
		Self { index, generation }
	}

	#[inline]
	pub const fn index(self) -> u32 {
		self.index
	}

	#[inline]
	pub const fn generation(self) -> u32 {
		self.generation
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}v{}", self.index, self.generation)
	}
}
