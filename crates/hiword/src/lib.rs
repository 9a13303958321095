//! hiword - Statistical Keyword and Phrase Extraction for Chinese Text
//!
//! hiword ranks the words and multi-word phrases that characterize a document,
//! using in-document frequency, IDF weights and background frequencies from a
//! reference corpus. No training step is involved.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hiword::{ExtractorConfig, KeywordExtractor};
//!
//! # fn main() -> hiword::Result<()> {
//! let config = ExtractorConfig::discover()?
//!     .ok_or_else(|| hiword::HiwordError::validation("no hiword.toml found"))?;
//! let extractor = KeywordExtractor::from_config(config)?;
//!
//! for keyword in extractor.extract_keywords("人工智能的发展离不开人工智能的研究")? {
//!     println!("{}\t{:.3}", keyword.text, keyword.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Resources** (`resources`): dictionary, IDF table and stopwords behind the `Lexicon` trait
//! - **Text** (`text`): script normalization and character sanitization
//! - **Segmentation** (`segment`): pluggable tokenizers, jieba by default
//! - **Filters** (`filter`): composable noise-word predicates
//! - **Keywords** (`keywords`): short keyword selection, phrase detection, ranking
//!
//! # Features
//!
//! - `jieba` (default): Chinese segmentation through `jieba-rs`

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod filter;
pub mod keywords;
pub mod resources;
pub mod segment;
pub mod text;

pub use error::{HiwordError, Result};

pub use crate::core::config::{ExtractorConfig, ResourceConfig};
pub use keywords::{Document, ExtractedItem, Keyword, KeywordExtractor};
pub use resources::{LazyResources, LexicalResources, Lexicon};
