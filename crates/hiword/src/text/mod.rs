//! Text pre-processing applied before segmentation.
//!
//! - [`ScriptNormalizer`] maps traditional Chinese characters to simplified ones
//! - [`sanitize`] blanks out characters outside the allowed charset

mod normalize;
mod sanitize;

pub use normalize::ScriptNormalizer;
pub use sanitize::{is_allowed_char, sanitize};
