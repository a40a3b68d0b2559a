// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Input list files.
//!
//! # Format
//! ```text
//! #softmax:0 pool_3:0
//! % comment
//! images/cat.raw
//! input:0:=images/dog.raw mask:0:=images/dog_mask.raw
//! ```
//!
//! - A line starting with `#` names the requested output layers.
//! - A line starting with `%` is a comment.
//! - Any other non-empty line is one batch element: either one path per
//!   network input in declaration order, or `name:=path` pairs.

use crate::IoError;
use std::path::{Path, PathBuf};

/// One file feeding one network input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    /// Input layer name, for `name:=path` entries.
    pub name: Option<String>,
    /// Raw file path.
    pub path: PathBuf,
}

/// One batch element: the files for every network input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEntry {
    /// Line number in the list (1-based).
    pub line: usize,
    /// Files, in the order the line lists them.
    pub items: Vec<InputItem>,
}

impl InputEntry {
    /// Whether the entry uses `name:=path` pairs.
    pub fn is_named(&self) -> bool {
        self.items.first().is_some_and(|i| i.name.is_some())
    }

    /// Resolves the file for the input at `index` named `name`.
    pub fn path_for(&self, index: usize, name: &str) -> Option<&Path> {
        if self.is_named() {
            self.items
                .iter()
                .find(|i| i.name.as_deref() == Some(name))
                .map(|i| i.path.as_path())
        } else {
            self.items.get(index).map(|i| i.path.as_path())
        }
    }
}

/// A parsed input list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputList {
    output_layers: Vec<String>,
    entries: Vec<InputEntry>,
}

impl InputList {
    /// Reads and parses an input list file.
    pub fn load(path: &Path) -> Result<Self, IoError> {
        let text = std::fs::read_to_string(path).map_err(|e| IoError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let list = Self::parse(&text)?;
        tracing::info!(
            "input list {}: {} element(s), {} requested output(s)",
            path.display(),
            list.entries.len(),
            list.output_layers.len(),
        );
        Ok(list)
    }

    /// Parses input list text. At least one element is required.
    pub fn parse(text: &str) -> Result<Self, IoError> {
        let mut list = Self::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix('#') {
                for name in rest.split_whitespace() {
                    if !list.output_layers.iter().any(|n| n == name) {
                        list.output_layers.push(name.to_string());
                    }
                }
                continue;
            }
            list.entries.push(parse_entry(line, trimmed)?);
        }
        if list.entries.is_empty() {
            return Err(IoError::InvalidInputList {
                line: 0,
                detail: "no input entries".into(),
            });
        }
        Ok(list)
    }

    /// Output layers requested by `#` lines. Empty means all.
    pub fn output_layers(&self) -> &[String] {
        &self.output_layers
    }

    /// Batch elements in file order.
    pub fn entries(&self) -> &[InputEntry] {
        &self.entries
    }

    /// Groups elements into batches of `batch_size`. The last batch may be
    /// shorter; it is padded with zeros when read.
    pub fn batches(&self, batch_size: usize) -> Result<Vec<&[InputEntry]>, IoError> {
        if batch_size == 0 {
            return Err(IoError::InvalidBatchSize);
        }
        Ok(self.entries.chunks(batch_size).collect())
    }
}

fn parse_entry(line: usize, text: &str) -> Result<InputEntry, IoError> {
    let items: Vec<InputItem> = text
        .split_whitespace()
        .map(|token| match token.split_once(":=") {
            Some((name, path)) => InputItem {
                name: Some(name.to_string()),
                path: PathBuf::from(path),
            },
            None => InputItem {
                name: None,
                path: PathBuf::from(token),
            },
        })
        .collect();

    let named = items.iter().filter(|i| i.name.is_some()).count();
    if named != 0 && named != items.len() {
        return Err(IoError::InvalidInputList {
            line,
            detail: "mixes 'name:=path' pairs with plain paths".into(),
        });
    }
    if let Some(bad) = items
        .iter()
        .find(|i| i.name.as_deref() == Some("") || i.path.as_os_str().is_empty())
    {
        return Err(IoError::InvalidInputList {
            line,
            detail: format!("incomplete pair for '{}'", bad.path.display()),
        });
    }
    Ok(InputEntry { line, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths() {
        let list = InputList::parse("a.raw\nb.raw\n").unwrap();
        assert_eq!(list.entries().len(), 2);
        assert_eq!(list.entries()[1].path_for(0, "x"), Some(Path::new("b.raw")));
        assert!(list.output_layers().is_empty());
    }

    #[test]
    fn test_output_layers_and_comments() {
        let text = "#softmax:0 pool:0\n% note\n\n#softmax:0\nimg.raw\n";
        let list = InputList::parse(text).unwrap();
        assert_eq!(list.output_layers(), &["softmax:0", "pool:0"]);
        assert_eq!(list.entries().len(), 1);
        assert_eq!(list.entries()[0].line, 5);
    }

    #[test]
    fn test_named_pairs() {
        let list = InputList::parse("input:0:=a.raw mask:=b.raw\n").unwrap();
        let e = &list.entries()[0];
        assert!(e.is_named());
        assert_eq!(e.path_for(5, "mask"), Some(Path::new("b.raw")));
        assert_eq!(e.path_for(0, "input:0"), Some(Path::new("a.raw")));
        assert_eq!(e.path_for(0, "other"), None);
    }

    #[test]
    fn test_mixed_line_rejected() {
        let err = InputList::parse("x:=a.raw b.raw\n").unwrap_err();
        assert!(matches!(err, IoError::InvalidInputList { line: 1, .. }));
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(InputList::parse("% only a comment\n#out\n").is_err());
    }

    #[test]
    fn test_batches() {
        let list = InputList::parse("a\nb\nc\nd\ne\n").unwrap();
        let batches = list.batches(2).unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].len(), 1);
        assert!(matches!(list.batches(0), Err(IoError::InvalidBatchSize)));
    }
}
