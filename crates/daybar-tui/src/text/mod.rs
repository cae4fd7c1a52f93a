//! Text utilities.
//!
//! - [`visual_width`], [`truncate_to_width`] - Unicode-aware cell widths

mod width;

pub use width::{pad_to_width, truncate_to_width, visual_width};
