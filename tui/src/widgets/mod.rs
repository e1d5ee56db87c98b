//! Widgets

pub mod text_block;

pub use text_block::{truncate_to_width, wrap_rows, StyledLine, TextBlock, TextBlockState};
