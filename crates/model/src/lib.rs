//! A small document object model built on `folio-attrs`.
//!
//! Every kind here declares its attributes through a [`DescriptorSet`]; the
//! rest of the crate (builders, typed keys, the outline printer) goes through
//! the descriptor operations only.
//!
//! [`DescriptorSet`]: folio_attrs::DescriptorSet

/// Document, section and body kinds.
pub mod document;
/// Typed keys for commonly used attributes.
pub mod keys;
/// Indented dump of explicitly set attributes.
pub mod outline;
/// Kind lookup by name and precompilation.
pub mod registry;
/// Enumerated style values.
pub mod style;
/// Table, row, cell and border kinds.
pub mod table;
/// Paragraph, run, font and paragraph format kinds.
pub mod text;

#[cfg(test)]
mod tests;

pub use document::{BODY, Body, DOCUMENT, Document, SECTION, SECTIONS, Section};
pub use outline::outline;
pub use style::{Alignment, LineStyle, Orientation, Underline, VerticalAlign};
pub use table::{BORDERS, Borders, CELL, CELLS, Cell, ROW, ROWS, Row, TABLE, TABLES, Table};
pub use text::{
	FONT, Font, PARAGRAPH, PARAGRAPH_FORMAT, PARAGRAPHS, Paragraph, ParagraphFormat, RUN, RUNS, Run,
};
