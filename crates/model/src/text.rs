//! Paragraphs, runs and their formatting.

use folio_attrs::{
	AttrDecl, Color, DescriptorSet, NodeId, Nullable, descriptor_set, field, list_kind, node_kind,
	property,
};

use crate::style::{Alignment, Underline};
use crate::table::BORDERS;

#[derive(Debug, Default)]
pub struct Paragraph {
	pub style: Nullable<String>,
	pub format: Option<NodeId>,
	pub runs: Option<NodeId>,
}

node_kind!(pub static PARAGRAPH: Paragraph = "Paragraph", describe = describe_paragraph);
list_kind!(pub static PARAGRAPHS = "Paragraphs" of PARAGRAPH);

fn describe_paragraph() -> &'static DescriptorSet {
	descriptor_set!("Paragraph", [
		AttrDecl::field("Style", field!(Paragraph, style)),
		AttrDecl::field("Format", field!(Paragraph, format)).child(&PARAGRAPH_FORMAT),
		AttrDecl::field("Runs", field!(Paragraph, runs)).child(&RUNS),
	])
}

#[derive(Debug, Default)]
pub struct ParagraphFormat {
	pub alignment: Nullable<Alignment>,
	pub left_indent: Nullable<f64>,
	pub space_after: Nullable<f64>,
	pub keep_together: Nullable<bool>,
	pub borders: Option<NodeId>,
}

node_kind!(pub static PARAGRAPH_FORMAT: ParagraphFormat = "ParagraphFormat", describe = describe_paragraph_format);

fn describe_paragraph_format() -> &'static DescriptorSet {
	descriptor_set!("ParagraphFormat", [
		AttrDecl::field("Alignment", field!(ParagraphFormat, alignment)),
		AttrDecl::field("LeftIndent", field!(ParagraphFormat, left_indent)),
		AttrDecl::field("SpaceAfter", field!(ParagraphFormat, space_after)),
		AttrDecl::field("KeepTogether", field!(ParagraphFormat, keep_together)),
		AttrDecl::field("Borders", field!(ParagraphFormat, borders)).child(&BORDERS),
	])
}

/// A span of text sharing one font.
#[derive(Debug, Default)]
pub struct Run {
	pub text: String,
	pub font: Option<NodeId>,
}

impl Run {
	fn char_count(&self) -> i64 {
		self.text.chars().count() as i64
	}
}

node_kind!(pub static RUN: Run = "Run", describe = describe_run);
list_kind!(pub static RUNS = "Runs" of RUN);

fn describe_run() -> &'static DescriptorSet {
	descriptor_set!("Run", [
		AttrDecl::field("Text", field!(Run, text)),
		AttrDecl::field("Font", field!(Run, font)).child(&FONT),
		AttrDecl::property("Length", property!(Run, Run::char_count)),
	])
}

#[derive(Debug, Default)]
pub struct Font {
	pub name: Nullable<String>,
	size: Nullable<f64>,
	pub bold: Nullable<bool>,
	pub italic: Nullable<bool>,
	pub underline: Nullable<Underline>,
	pub color: Color,
}

impl Font {
	pub fn size(&self) -> Nullable<f64> {
		self.size
	}

	/// Point size. Only finite positive sizes are accepted; unsetting always is.
	pub fn set_size(&mut self, size: Nullable<f64>) -> Result<(), String> {
		if let Some(&points) = size.get()
			&& (!points.is_finite() || points <= 0.0)
		{
			return Err(format!("font size must be positive, got {points}"));
		}
		self.size = size;
		Ok(())
	}
}

node_kind!(pub static FONT: Font = "Font", describe = describe_font);

fn describe_font() -> &'static DescriptorSet {
	descriptor_set!("Font", [
		AttrDecl::field("Name", field!(Font, name)),
		AttrDecl::property("Size", property!(Font, Font::size, Font::set_size)),
		AttrDecl::field("Bold", field!(Font, bold)),
		AttrDecl::field("Italic", field!(Font, italic)),
		AttrDecl::field("Underline", field!(Font, underline)),
		AttrDecl::field("Color", field!(Font, color)),
	])
}
