//! Document, section and body kinds, plus builders for the common shapes.

use folio_attrs::{
	AttrDecl, AttrError, AttrValue, DescriptorSet, NodeId, NodeTree, Nullable, descriptor_set,
	field, list_kind, node_kind,
};

use crate::style::Orientation;
use crate::table::TABLES;
use crate::text::PARAGRAPHS;

/// Root of a document tree.
#[derive(Debug, Default)]
pub struct Document {
	pub title: String,
	pub sections: Option<NodeId>,
}

node_kind!(pub static DOCUMENT: Document = "Document", describe = describe_document);

fn describe_document() -> &'static DescriptorSet {
	descriptor_set!("Document", [
		AttrDecl::field("Title", field!(Document, title)),
		AttrDecl::field("Sections", field!(Document, sections)).child(&SECTIONS),
	])
}

#[derive(Debug, Default)]
pub struct Section {
	pub orientation: Nullable<Orientation>,
	pub page_width: Nullable<f64>,
	pub page_height: Nullable<f64>,
	pub body: Option<NodeId>,
}

node_kind!(pub static SECTION: Section = "Section", describe = describe_section);
list_kind!(pub static SECTIONS = "Sections" of SECTION);

fn describe_section() -> &'static DescriptorSet {
	descriptor_set!("Section", [
		AttrDecl::field("Orientation", field!(Section, orientation)),
		AttrDecl::field("PageWidth", field!(Section, page_width)),
		AttrDecl::field("PageHeight", field!(Section, page_height)),
		AttrDecl::field("Body", field!(Section, body)).child(&BODY),
	])
}

/// Block container of a section.
#[derive(Debug, Default)]
pub struct Body {
	pub paragraphs: Option<NodeId>,
	pub tables: Option<NodeId>,
}

node_kind!(pub static BODY: Body = "Body", describe = describe_body);

fn describe_body() -> &'static DescriptorSet {
	descriptor_set!("Body", [
		AttrDecl::field("Paragraphs", field!(Body, paragraphs)).child(&PARAGRAPHS),
		AttrDecl::field("Tables", field!(Body, tables)).child(&TABLES),
	])
}

/// Creates a detached document root.
pub fn new_document(tree: &mut NodeTree, title: &str) -> Result<NodeId, AttrError> {
	let doc = tree.create(&DOCUMENT);
	tree.set_attr(doc, "Title", title)?;
	Ok(doc)
}

/// Appends an empty section and returns it.
pub fn add_section(tree: &mut NodeTree, doc: NodeId) -> Result<NodeId, AttrError> {
	let sections = tree.child_node(doc, "Sections")?;
	tree.append_new(sections)
}

/// The section's body, created on first use.
pub fn body(tree: &mut NodeTree, section: NodeId) -> Result<NodeId, AttrError> {
	tree.child_node(section, "Body")
}

/// Appends a paragraph to a body or cell. Non-empty `text` becomes its first run.
pub fn add_paragraph(tree: &mut NodeTree, container: NodeId, text: &str) -> Result<NodeId, AttrError> {
	let paragraphs = tree.child_node(container, "Paragraphs")?;
	let paragraph = tree.append_new(paragraphs)?;
	if !text.is_empty() {
		add_run(tree, paragraph, text)?;
	}
	Ok(paragraph)
}

pub fn add_run(tree: &mut NodeTree, paragraph: NodeId, text: &str) -> Result<NodeId, AttrError> {
	let runs = tree.child_node(paragraph, "Runs")?;
	let run = tree.append_new(runs)?;
	tree.set_attr(run, "Text", text)?;
	Ok(run)
}

/// Appends a `rows` by `cols` table with one empty paragraph per cell.
pub fn add_table(tree: &mut NodeTree, body: NodeId, rows: usize, cols: usize) -> Result<NodeId, AttrError> {
	let tables = tree.child_node(body, "Tables")?;
	let table = tree.append_new(tables)?;
	let row_list = tree.child_node(table, "Rows")?;
	for _ in 0..rows {
		let row = tree.append_new(row_list)?;
		let cells = tree.child_node(row, "Cells")?;
		for _ in 0..cols {
			let cell = tree.append_new(cells)?;
			add_paragraph(tree, cell, "")?;
		}
	}
	Ok(table)
}

/// Concatenated run text of a paragraph. Reads without materializing.
pub fn paragraph_text(tree: &NodeTree, paragraph: NodeId) -> Result<String, AttrError> {
	let mut text = String::new();
	let Some(AttrValue::Node(runs)) = tree.peek_attr(paragraph, "Runs")? else {
		return Ok(text);
	};
	for &run in tree.items(runs)? {
		if let Some(AttrValue::String(part)) = tree.peek_attr(run, "Text")? {
			text.push_str(&part);
		}
	}
	Ok(text)
}
