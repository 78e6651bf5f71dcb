//! Core value types for the folio document model: tri-state wrappers, colors and node handles.

/// ARGB colors with an empty state.
pub mod color;
/// Node handles.
pub mod ids;
/// The `Nullable<T>` tri-state wrapper.
pub mod nullable;

pub use color::{Color, ParseColorError};
pub use ids::NodeId;
pub use nullable::Nullable;
