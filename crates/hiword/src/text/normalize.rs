use crate::resources::{parse_lines, read_resource};
use crate::{HiwordError, Result};
use ahash::AHashMap;
use std::borrow::Cow;
use std::path::Path;

const RESOURCE: &str = "script map";

/// Character-level traditional to simplified Chinese mapping.
///
/// Mapping is one character to one character, so text length in chars is
/// preserved. Characters without an entry pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct ScriptNormalizer {
    map: AHashMap<char, char>,
}

impl ScriptNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I: IntoIterator<Item = (char, char)>>(pairs: I) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    /// Load a map file with one `traditional simplified` pair per line.
    ///
    /// Lines whose fields are not single characters are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `HiwordError::ResourceLoad` if the file can't be read or a line
    /// has fewer than two fields.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_resource(RESOURCE, path.as_ref())?;
        let normalizer = Self::parse(&content)?;

        tracing::info!(
            "Loaded {} script mappings from {}",
            normalizer.len(),
            path.as_ref().display()
        );

        Ok(normalizer)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut map = AHashMap::new();

        parse_lines(content, |line_no, fields| {
            if fields.len() < 2 {
                return Err(HiwordError::resource_load(
                    RESOURCE,
                    format!("line {}: expected two characters", line_no),
                ));
            }

            match (single_char(fields[0]), single_char(fields[1])) {
                (Some(from), Some(to)) => {
                    map.insert(from, to);
                }
                _ => tracing::warn!("Skipping script map line {}: fields must be single characters", line_no),
            }
            Ok(())
        })?;

        Ok(Self { map })
    }

    /// Map every known character; borrows the input when nothing changes.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.chars().any(|c| self.map.contains_key(&c)) {
            return Cow::Borrowed(text);
        }

        Cow::Owned(text.chars().map(|c| self.map.get(&c).copied().unwrap_or(c)).collect())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
