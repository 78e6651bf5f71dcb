use folio_attrs::{AccessMode, AttrError, AttrValue, Behavior, Color, NodeTree};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::document::{add_paragraph, add_run, add_section, add_table, body, new_document, paragraph_text};
use crate::keys::{ALIGNMENT, BOLD, FONT_SIZE, LENGTH, ORIENTATION, SHADING, TEXT, TITLE};
use crate::registry::{self, KINDS};
use crate::{Alignment, Orientation, PARAGRAPH, RUN, SECTIONS};

#[test]
fn every_kind_declares_valid_attributes() {
	let accessors = registry::precompile().unwrap();
	let declared: usize = KINDS.iter().map(|k| k.descriptors().len()).sum();
	assert_eq!(accessors, declared);
	assert!(KINDS.iter().all(|k| k.descriptors().iter().all(|d| d.is_compiled())));
}

#[rstest]
#[case("Document", false)]
#[case("Sections", true)]
#[case("Paragraph", false)]
#[case("Cells", true)]
fn kinds_are_indexed_by_name(#[case] name: &str, #[case] collection: bool) {
	let kind = registry::kind(name).unwrap();
	assert_eq!(kind.name, name);
	assert_eq!(kind.is_collection(), collection);
}

#[test]
fn unknown_kinds_are_absent() {
	let mut tree = NodeTree::new();
	assert!(registry::kind("Chart").is_none());
	assert!(registry::create(&mut tree, "Chart").is_none());
	assert!(tree.is_empty());

	let run = registry::create(&mut tree, "Run").unwrap();
	assert_eq!(tree.kind(run).unwrap(), &RUN);
}

#[test]
fn collections_are_never_backed_by_properties() {
	for kind in KINDS {
		for descriptor in kind.descriptors() {
			if let Behavior::NestedCollection(_) = descriptor.behavior() {
				assert!(descriptor.member().is_field(), "{}.{}", kind.name, descriptor.name());
			}
		}
	}
}

#[test]
fn builders_wire_parents() {
	let mut tree = NodeTree::new();
	let doc = new_document(&mut tree, "Report").unwrap();
	let section = add_section(&mut tree, doc).unwrap();
	let body = body(&mut tree, section).unwrap();
	let paragraph = add_paragraph(&mut tree, body, "Hello").unwrap();
	add_run(&mut tree, paragraph, ", world").unwrap();

	assert_eq!(tree.kind(tree.parent(section).unwrap()).unwrap(), &SECTIONS);
	assert_eq!(tree.ancestors(paragraph).last(), Some(doc));
	assert_eq!(paragraph_text(&tree, paragraph).unwrap(), "Hello, world");
	assert_eq!(TITLE.get(&tree, doc).unwrap(), "Report");
}

#[test]
fn paragraph_text_does_not_materialize() {
	let mut tree = NodeTree::new();
	let paragraph = tree.create(&PARAGRAPH);
	assert_eq!(paragraph_text(&tree, paragraph).unwrap(), "");
	assert_eq!(tree.len(), 1);
}

#[test]
fn table_builder_fills_cells() {
	let mut tree = NodeTree::new();
	let body = tree.create(&crate::BODY);
	let table = add_table(&mut tree, body, 2, 3).unwrap();

	let rows = tree.child_node(table, "Rows").unwrap();
	assert_eq!(tree.items(rows).unwrap().len(), 2);
	let row_ids = tree.items(rows).unwrap().to_vec();
	for row in row_ids {
		let cells = tree.child_node(row, "Cells").unwrap();
		assert_eq!(tree.items(cells).unwrap().len(), 3);
	}
	// body, table list, table, row list, rows, cell lists, cells, paragraph lists, paragraphs
	assert_eq!(tree.len(), 1 + 1 + 1 + 1 + 2 + 2 + 6 + 6 + 6);
}

#[test]
fn font_size_is_validated() {
	let mut tree = NodeTree::new();
	let run = tree.create(&RUN);
	let font = tree.child_node(run, "Font").unwrap();

	assert_eq!(FONT_SIZE.peek(&tree, font).unwrap(), None);
	FONT_SIZE.set(&mut tree, font, 11.5).unwrap();
	assert_eq!(FONT_SIZE.get(&tree, font).unwrap(), 11.5);

	assert_eq!(
		FONT_SIZE.set(&mut tree, font, -1.0).unwrap_err(),
		AttrError::Rejected {
			attr: "Size",
			reason: "font size must be positive, got -1".to_string(),
		}
	);
	assert_eq!(FONT_SIZE.get(&tree, font).unwrap(), 11.5);

	FONT_SIZE.clear(&mut tree, font).unwrap();
	assert!(FONT_SIZE.is_null(&tree, font).unwrap());
}

#[test]
fn enum_attributes_default_to_first_variant() {
	let mut tree = NodeTree::new();
	let doc = new_document(&mut tree, "").unwrap();
	let section = add_section(&mut tree, doc).unwrap();

	assert_eq!(ORIENTATION.peek(&tree, section).unwrap(), None);
	assert_eq!(ORIENTATION.get(&tree, section).unwrap(), Orientation::Portrait);
	ORIENTATION.set(&mut tree, section, Orientation::Landscape).unwrap();
	assert_eq!(
		tree.peek_attr(section, "Orientation").unwrap().map(|v| v.to_string()),
		Some("Landscape".to_string())
	);

	let err = tree.set_attr(section, "Orientation", Alignment::Center).unwrap_err();
	assert!(matches!(err, AttrError::TypeMismatch { attr: "Orientation", .. }), "{err}");
}

#[test]
fn format_materializes_under_read_write_only() {
	let mut tree = NodeTree::new();
	let paragraph = tree.create(&PARAGRAPH);

	assert_eq!(tree.get_attr(paragraph, "Format", AccessMode::GetNull).unwrap(), None);
	let format = tree.child_node(paragraph, "Format").unwrap();
	assert_eq!(tree.parent(format), Some(paragraph));
	assert!(tree.attr_is_null(paragraph, "Format").unwrap());

	ALIGNMENT.set(&mut tree, format, Alignment::Justify).unwrap();
	assert!(!tree.attr_is_null(paragraph, "Format").unwrap());
	assert_eq!(
		tree.get_attr(paragraph, "Format", AccessMode::GetNull).unwrap(),
		Some(AttrValue::Node(format))
	);

	tree.clear_attr(paragraph, "Format").unwrap();
	assert_eq!(ALIGNMENT.peek(&tree, format).unwrap(), None);
	assert!(tree.contains(format));
}

#[test]
fn run_length_is_read_only() {
	let mut tree = NodeTree::new();
	let run = tree.create(&RUN);
	TEXT.set(&mut tree, run, "héllo".to_string()).unwrap();

	assert_eq!(LENGTH.get(&tree, run).unwrap(), 5);
	assert!(matches!(
		LENGTH.set(&mut tree, run, 1).unwrap_err(),
		AttrError::InvalidOperation(_)
	));
	assert!(matches!(
		LENGTH.clear(&mut tree, run).unwrap_err(),
		AttrError::NotNullable { attr: "Length" }
	));
}

#[test]
fn colors_unset_in_place() {
	let mut tree = NodeTree::new();
	let cell = tree.create(&crate::CELL);
	let run = tree.create(&RUN);
	let font = tree.child_node(run, "Font").unwrap();

	SHADING.set(&mut tree, cell, Color::rgb(0xEE, 0xEE, 0xEE)).unwrap();
	BOLD.set(&mut tree, font, true).unwrap();
	assert_eq!(SHADING.get(&tree, cell).unwrap().argb(), Some(0xFFEE_EEEE));

	SHADING.clear(&mut tree, cell).unwrap();
	assert!(SHADING.is_null(&tree, cell).unwrap());
	assert_eq!(SHADING.peek(&tree, cell).unwrap(), None);
	assert_eq!(BOLD.peek(&tree, font).unwrap(), Some(true));
}
