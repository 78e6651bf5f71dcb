//! Compiled slot accessors and their publish-once cache.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::error::{AttrError, ConfigError};
use crate::node::Node;
use crate::storage::RawValue;

pub type ReadFn = Box<dyn Fn(&dyn Node) -> Result<RawValue, AttrError> + Send + Sync>;
pub type WriteFn = Box<dyn Fn(&mut dyn Node, RawValue) -> Result<(), AttrError> + Send + Sync>;

/// A resolved read/write pair bound to one storage member.
pub struct Accessor {
	member: &'static str,
	read: ReadFn,
	write: WriteFn,
}

impl Accessor {
	pub fn new(member: &'static str, read: ReadFn, write: WriteFn) -> Self {
		Self { member, read, write }
	}

	/// Name of the member this accessor targets.
	pub fn member(&self) -> &'static str {
		self.member
	}

	#[inline]
	pub fn read(&self, node: &dyn Node) -> Result<RawValue, AttrError> {
		(self.read)(node)
	}

	/// Stores `raw`. A conversion failure leaves the slot untouched.
	#[inline]
	pub fn write(&self, node: &mut dyn Node, raw: RawValue) -> Result<(), AttrError> {
		(self.write)(node, raw)
	}
}

impl fmt::Debug for Accessor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Accessor").field("member", &self.member).finish()
	}
}

/// Lazily compiled accessor slot.
///
/// Concurrent first users may each compile; the first to publish wins and
/// every caller continues with the published accessor. Accessors compiled
/// from the same member are interchangeable, so losing a race is harmless.
#[derive(Default)]
pub(crate) struct AccessorCell {
	slot: ArcSwapOption<Accessor>,
}

impl AccessorCell {
	pub(crate) fn get(&self) -> Option<Arc<Accessor>> {
		self.slot.load_full()
	}

	pub(crate) fn get_or_compile(
		&self,
		compile: impl FnOnce() -> Result<Accessor, ConfigError>,
	) -> Result<Arc<Accessor>, ConfigError> {
		if let Some(accessor) = self.slot.load_full() {
			return Ok(accessor);
		}

		let fresh = Arc::new(compile()?);
		tracing::trace!(member = fresh.member(), "compiled accessor");

		let previous = self
			.slot
			.compare_and_swap(&None::<Arc<Accessor>>, Some(Arc::clone(&fresh)));
		match &*previous {
			None => Ok(fresh),
			Some(winner) => {
				tracing::debug!(member = winner.member(), "accessor already published, discarding duplicate");
				Ok(Arc::clone(winner))
			}
		}
	}
}
