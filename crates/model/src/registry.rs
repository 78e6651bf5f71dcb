//! Index of every kind in the model.

use std::sync::LazyLock;

use folio_attrs::{ConfigError, NodeId, NodeKind, NodeTree};
use rustc_hash::FxHashMap as HashMap;

use crate::document::{BODY, DOCUMENT, SECTION, SECTIONS};
use crate::table::{BORDERS, CELL, CELLS, ROW, ROWS, TABLE, TABLES};
use crate::text::{FONT, PARAGRAPH, PARAGRAPH_FORMAT, PARAGRAPHS, RUN, RUNS};

/// All kinds, collections included, in dependency order from the root down.
pub static KINDS: &[&NodeKind] = &[
	&DOCUMENT,
	&SECTIONS,
	&SECTION,
	&BODY,
	&PARAGRAPHS,
	&PARAGRAPH,
	&PARAGRAPH_FORMAT,
	&RUNS,
	&RUN,
	&FONT,
	&TABLES,
	&TABLE,
	&ROWS,
	&ROW,
	&CELLS,
	&CELL,
	&BORDERS,
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static NodeKind>> =
	LazyLock::new(|| KINDS.iter().map(|&kind| (kind.name, kind)).collect());

/// Looks up a kind by name.
pub fn kind(name: &str) -> Option<&'static NodeKind> {
	BY_NAME.get(name).copied()
}

/// Creates a detached node of the named kind.
pub fn create(tree: &mut NodeTree, name: &str) -> Option<NodeId> {
	kind(name).map(|kind| tree.create(kind))
}

/// Compiles every accessor of every kind and returns how many there are.
///
/// Call once at startup to surface declaration errors before any document
/// is built.
pub fn precompile() -> Result<usize, ConfigError> {
	let mut accessors = 0;
	for kind in KINDS {
		let set = kind.descriptors();
		set.precompile()?;
		accessors += set.len();
	}
	tracing::debug!(kinds = KINDS.len(), accessors, "precompiled document model");
	Ok(accessors)
}
