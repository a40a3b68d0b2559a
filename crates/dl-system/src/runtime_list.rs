// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Ordered runtime preference list.

use crate::{DlSystemError, Runtime};
use std::fmt;

/// An ordered, duplicate-free list of runtimes.
///
/// The engine tries entries front to back, so the order is the fallback
/// precedence. Uniqueness is enforced by [`RuntimeList::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeList {
    runtimes: Vec<Runtime>,
}

impl RuntimeList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a one-element list.
    pub fn single(runtime: Runtime) -> Self {
        Self {
            runtimes: vec![runtime],
        }
    }

    /// Appends `runtime`, rejecting it if it is already present.
    pub fn add(&mut self, runtime: Runtime) -> Result<(), DlSystemError> {
        if self.contains(runtime) {
            return Err(DlSystemError::DuplicateRuntime(runtime));
        }
        self.runtimes.push(runtime);
        Ok(())
    }

    /// Returns `true` if `runtime` is in the list.
    pub fn contains(&self, runtime: Runtime) -> bool {
        self.runtimes.contains(&runtime)
    }

    /// Number of runtimes in the list.
    pub fn len(&self) -> usize {
        self.runtimes.len()
    }

    /// Returns `true` if no runtime has been added.
    pub fn is_empty(&self) -> bool {
        self.runtimes.is_empty()
    }

    /// Highest-precedence runtime, if any.
    pub fn first(&self) -> Option<Runtime> {
        self.runtimes.first().copied()
    }

    /// Iterates in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = Runtime> + '_ {
        self.runtimes.iter().copied()
    }

    /// Returns the runtimes as a slice, in precedence order.
    pub fn as_slice(&self) -> &[Runtime] {
        &self.runtimes
    }
}

impl fmt::Display for RuntimeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, r) in self.runtimes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{r}")?;
        }
        write!(f, "]")
    }
}

/// Builds a list from an iterator, failing on the first duplicate.
impl TryFrom<Vec<Runtime>> for RuntimeList {
    type Error = DlSystemError;

    fn try_from(runtimes: Vec<Runtime>) -> Result<Self, Self::Error> {
        let mut list = Self::new();
        for r in runtimes {
            list.add(r)?;
        }
        Ok(list)
    }
}

impl<'a> IntoIterator for &'a RuntimeList {
    type Item = Runtime;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Runtime>>;

    fn into_iter(self) -> Self::IntoIter {
        self.runtimes.iter().copied()
    }
}
