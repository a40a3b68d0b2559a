// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Extension (user-defined operation) packages.
//!
//! Packages are registered before the engine is built. This workspace does
//! not execute custom operations; [`FsExtensionLoader`] only checks that
//! each package file is present and readable and remembers it.

use crate::RuntimeError;
use std::path::{Path, PathBuf};

/// Registers extension packages with the engine library.
pub trait ExtensionLoader {
    /// Registers one package.
    fn load(&mut self, package: &Path) -> Result<(), RuntimeError>;
}

/// Loader that validates package files on the local filesystem.
#[derive(Debug, Default)]
pub struct FsExtensionLoader {
    loaded: Vec<PathBuf>,
}

impl FsExtensionLoader {
    /// Creates a loader with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages registered so far, in registration order.
    pub fn loaded(&self) -> &[PathBuf] {
        &self.loaded
    }
}

impl ExtensionLoader for FsExtensionLoader {
    fn load(&mut self, package: &Path) -> Result<(), RuntimeError> {
        let failure = |detail: String| RuntimeError::ExtensionLoadFailure {
            package: package.display().to_string(),
            detail,
        };

        let meta = std::fs::metadata(package).map_err(|e| failure(e.to_string()))?;
        if !meta.is_file() {
            return Err(failure("not a regular file".into()));
        }
        std::fs::File::open(package).map_err(|e| failure(e.to_string()))?;

        if self.loaded.iter().any(|p| p == package) {
            tracing::warn!("extension package {} is already registered", package.display());
            return Ok(());
        }
        tracing::info!("registered extension package {}", package.display());
        self.loaded.push(package.to_path_buf());
        Ok(())
    }
}

/// Registers every package in a comma-separated list.
///
/// Blank entries are skipped, so an empty list is a no-op. Stops at the
/// first failure. Returns the number of packages registered.
pub fn load_extension_packages(
    loader: &mut dyn ExtensionLoader,
    csv: &str,
) -> Result<usize, RuntimeError> {
    let mut count = 0;
    for package in csv.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        loader.load(Path::new(package))?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_noop() {
        let mut loader = FsExtensionLoader::new();
        assert_eq!(load_extension_packages(&mut loader, "").unwrap(), 0);
        assert_eq!(load_extension_packages(&mut loader, " , ").unwrap(), 0);
        assert!(loader.loaded().is_empty());
    }

    #[test]
    fn test_loads_existing_packages() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("libUdoA.so");
        let b = dir.path().join("libUdoB.so");
        std::fs::write(&a, b"a").unwrap();
        std::fs::write(&b, b"b").unwrap();

        let mut loader = FsExtensionLoader::new();
        let csv = format!("{},{}", a.display(), b.display());
        assert_eq!(load_extension_packages(&mut loader, &csv).unwrap(), 2);
        assert_eq!(loader.loaded(), &[a, b]);
    }

    #[test]
    fn test_missing_package_fails() {
        let mut loader = FsExtensionLoader::new();
        let err = load_extension_packages(&mut loader, "/nonexistent/libUdo.so").unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::ExtensionLoadFailure { package, .. } if package == "/nonexistent/libUdo.so"
        ));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = FsExtensionLoader::new();
        assert!(loader.load(dir.path()).is_err());
    }
}
