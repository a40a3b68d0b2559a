// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Option merging and validation.
//!
//! ```text
//! CLI flags ──┐
//!             ├─► RawOptions ──► HarnessOptions::resolve ──► HarnessOptions
//! TOML file ──┘                  1. runtime selection
//!                                2. option values
//!                                3. file checks
//! ```
//!
//! Every check runs before the container is opened.

use crate::config::HarnessConfig;
use device_probe::RuntimeAvailability;
use dl_system::{BufferType, PlatformConfig, UserBufferSource};
use runtime_selector::{select_runtimes, RuntimeRequest, RuntimeSelection};
use std::path::{Path, PathBuf};

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "./output/";

/// Invalid option values and unusable input files.
#[derive(Debug, thiserror::Error)]
pub enum OptionError {
    #[error("buffer type '{0}' is not valid; expected USERBUFFER_FLOAT, USERBUFFER_TF8, USERBUFFER_TF16 or ITENSOR")]
    InvalidBufferMode(String),

    #[error("static quantization value '{0}' is not valid; expected 'true' or 'false'")]
    InvalidQuantizationToken(String),

    #[error("user buffer source '{value}' is not valid: {detail}")]
    InvalidUserBufferSource { value: String, detail: String },

    #[error("platform options '{0}' are not valid; expected 'key:value' pairs separated by ';'")]
    InvalidPlatformOptions(String),

    #[error("resizable dimension '{0}' is not valid; expected a positive integer")]
    InvalidResizableDim(String),

    #[error("{what} '{path}' is missing or unreadable")]
    MissingOrUnreadableFile { what: &'static str, path: String },
}

/// Option values as given, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    pub container: Option<PathBuf>,
    pub input_list: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub buffer_type: Option<String>,
    pub static_quantization: Option<String>,
    pub user_buffer_source: Option<String>,
    pub runtime: Option<String>,
    pub runtime_order: Option<String>,
    pub init_caching: bool,
    pub extension_packages: Option<String>,
    pub cpu_fixed_point: bool,
    pub resizable_dim: Option<String>,
    pub platform_options: Option<String>,
}

impl RawOptions {
    /// Fills unset values from a configuration file.
    ///
    /// If either runtime option was given here, both runtime keys of the
    /// file are ignored.
    pub fn merge(self, file: HarnessConfig) -> Self {
        let cli_runtime = self.runtime.is_some() || self.runtime_order.is_some();
        let (runtime, runtime_order) = if cli_runtime {
            (self.runtime, self.runtime_order)
        } else {
            (file.runtime, file.runtime_order)
        };
        Self {
            container: self.container.or(file.container),
            input_list: self.input_list.or(file.input_list),
            output_dir: self.output_dir.or(file.output_dir),
            buffer_type: self.buffer_type.or(file.buffer_type),
            static_quantization: self
                .static_quantization
                .or_else(|| file.static_quantization.map(|b| b.to_string())),
            user_buffer_source: self.user_buffer_source.or(file.user_buffer_source),
            runtime,
            runtime_order,
            init_caching: self.init_caching || file.init_caching.unwrap_or(false),
            extension_packages: self.extension_packages.or(file.extension_packages),
            cpu_fixed_point: self.cpu_fixed_point || file.cpu_fixed_point.unwrap_or(false),
            resizable_dim: self
                .resizable_dim
                .or_else(|| file.resizable_dim.map(|d| d.to_string())),
            platform_options: self.platform_options.or(file.platform_options),
        }
    }
}

/// Validated options for one run.
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    pub container: PathBuf,
    pub input_list: PathBuf,
    pub output_dir: PathBuf,
    pub selection: RuntimeSelection,
    pub buffer_type: BufferType,
    pub user_buffer_source: UserBufferSource,
    pub init_caching: bool,
    pub extension_packages: String,
    pub cpu_fixed_point: bool,
    pub resizable_dim: Option<usize>,
    pub platform_config: PlatformConfig,
}

impl HarnessOptions {
    /// Validates `raw` in order: runtime selection, option values, files.
    pub fn resolve(
        raw: RawOptions,
        availability: &dyn RuntimeAvailability,
    ) -> anyhow::Result<Self> {
        let request = RuntimeRequest {
            runtime: raw.runtime,
            runtime_order: raw.runtime_order,
            static_quantization: raw.static_quantization.as_deref() == Some("true"),
        };
        let selection = select_runtimes(&request, availability)?;

        let buffer_type = match raw.buffer_type.as_deref() {
            None => BufferType::default(),
            Some(s) => s
                .parse()
                .map_err(|_| OptionError::InvalidBufferMode(s.to_string()))?,
        };

        match raw.static_quantization.as_deref() {
            None | Some("true") | Some("false") => {}
            Some(other) => return Err(OptionError::InvalidQuantizationToken(other.to_string()).into()),
        }

        let user_buffer_source = resolve_buffer_source(buffer_type, raw.user_buffer_source.as_deref())?;
        let resizable_dim = resolve_resizable_dim(buffer_type, raw.resizable_dim.as_deref())?;

        let platform_config = match raw.platform_options.as_deref() {
            None => PlatformConfig::default(),
            Some(s) => s
                .parse()
                .map_err(|_| OptionError::InvalidPlatformOptions(s.to_string()))?,
        };

        let container = check_file("container", raw.container)?;
        let input_list = check_file("input list", raw.input_list)?;

        Ok(Self {
            container,
            input_list,
            output_dir: raw
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            selection,
            buffer_type,
            user_buffer_source,
            init_caching: raw.init_caching,
            extension_packages: raw.extension_packages.unwrap_or_default(),
            cpu_fixed_point: raw.cpu_fixed_point,
            resizable_dim,
            platform_config,
        })
    }
}

/// The source is only consulted for float user buffers.
fn resolve_buffer_source(
    buffer_type: BufferType,
    value: Option<&str>,
) -> Result<UserBufferSource, OptionError> {
    if buffer_type != BufferType::UserBufferFloat {
        if let Some(v) = value {
            tracing::debug!("user buffer source '{v}' ignored with {buffer_type}");
        }
        return Ok(UserBufferSource::default());
    }
    let Some(value) = value else {
        return Ok(UserBufferSource::default());
    };
    let source: UserBufferSource = value.parse().map_err(|_| OptionError::InvalidUserBufferSource {
        value: value.to_string(),
        detail: "expected CPUBUFFER or GLBUFFER".into(),
    })?;
    if source == UserBufferSource::GlBuffer {
        return Err(OptionError::InvalidUserBufferSource {
            value: value.to_string(),
            detail: "GL buffers are not supported by this build".into(),
        });
    }
    Ok(source)
}

fn resolve_resizable_dim(
    buffer_type: BufferType,
    value: Option<&str>,
) -> Result<Option<usize>, OptionError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let dim = value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&d| d > 0)
        .ok_or_else(|| OptionError::InvalidResizableDim(value.to_string()))?;
    if buffer_type == BufferType::ITensor {
        tracing::warn!("resizable dimension {dim} is not applicable with ITENSOR; ignoring it");
        return Ok(None);
    }
    Ok(Some(dim))
}

fn check_file(what: &'static str, path: Option<PathBuf>) -> Result<PathBuf, OptionError> {
    let missing = |p: &Path| OptionError::MissingOrUnreadableFile {
        what,
        path: p.display().to_string(),
    };
    let path = path.ok_or_else(|| missing(Path::new("")))?;
    let meta = std::fs::metadata(&path).map_err(|_| missing(&path))?;
    if !meta.is_file() {
        return Err(missing(&path));
    }
    std::fs::File::open(&path).map_err(|_| missing(&path))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use device_probe::FixedAvailability;
    use dl_system::Runtime;
    use runtime_selector::SelectionError;

    struct Files {
        _dir: tempfile::TempDir,
        container: PathBuf,
        list: PathBuf,
    }

    fn files() -> Files {
        let dir = tempfile::tempdir().unwrap();
        let container = dir.path().join("net.dlc");
        let list = dir.path().join("list.txt");
        std::fs::write(&container, "{}").unwrap();
        std::fs::write(&list, "a.raw\n").unwrap();
        Files {
            _dir: dir,
            container,
            list,
        }
    }

    fn raw(f: &Files) -> RawOptions {
        RawOptions {
            container: Some(f.container.clone()),
            input_list: Some(f.list.clone()),
            ..Default::default()
        }
    }

    fn resolve(raw: RawOptions) -> anyhow::Result<HarnessOptions> {
        HarnessOptions::resolve(raw, &FixedAvailability::all())
    }

    fn option_error(err: anyhow::Error) -> OptionError {
        err.downcast::<OptionError>().unwrap()
    }

    #[test]
    fn test_defaults() {
        let f = files();
        let o = resolve(raw(&f)).unwrap();
        assert_eq!(o.selection.order.as_slice(), &[Runtime::Cpu]);
        assert_eq!(o.buffer_type, BufferType::ITensor);
        assert_eq!(o.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(!o.selection.static_quantization);
        assert!(!o.init_caching);
        assert!(o.platform_config.is_empty());
    }

    #[test]
    fn test_quantization_tokens() {
        let f = files();
        let mut r = raw(&f);
        r.static_quantization = Some("true".into());
        assert!(resolve(r.clone()).unwrap().selection.static_quantization);
        r.static_quantization = Some("false".into());
        assert!(!resolve(r.clone()).unwrap().selection.static_quantization);
        r.static_quantization = Some("yes".into());
        assert!(matches!(
            option_error(resolve(r).unwrap_err()),
            OptionError::InvalidQuantizationToken(_)
        ));
    }

    #[test]
    fn test_invalid_buffer_type() {
        let f = files();
        let mut r = raw(&f);
        r.buffer_type = Some("itensor".into());
        assert!(matches!(
            option_error(resolve(r).unwrap_err()),
            OptionError::InvalidBufferMode(_)
        ));
    }

    #[test]
    fn test_gl_buffer_rejected_only_for_float_user_buffers() {
        let f = files();
        let mut r = raw(&f);
        r.user_buffer_source = Some("GLBUFFER".into());
        assert_eq!(resolve(r.clone()).unwrap().user_buffer_source, UserBufferSource::CpuBuffer);

        r.buffer_type = Some("USERBUFFER_FLOAT".into());
        assert!(matches!(
            option_error(resolve(r.clone()).unwrap_err()),
            OptionError::InvalidUserBufferSource { .. }
        ));

        r.user_buffer_source = Some("DMABUF".into());
        assert!(resolve(r).is_err());
    }

    #[test]
    fn test_resizable_dim() {
        let f = files();
        let mut r = raw(&f);
        r.buffer_type = Some("USERBUFFER_FLOAT".into());
        r.resizable_dim = Some("16".into());
        assert_eq!(resolve(r.clone()).unwrap().resizable_dim, Some(16));

        r.resizable_dim = Some("0".into());
        assert!(matches!(
            option_error(resolve(r.clone()).unwrap_err()),
            OptionError::InvalidResizableDim(_)
        ));

        r.resizable_dim = Some("-3".into());
        assert!(resolve(r.clone()).is_err());

        r.buffer_type = None;
        r.resizable_dim = Some("16".into());
        assert_eq!(resolve(r).unwrap().resizable_dim, None);
    }

    #[test]
    fn test_platform_options() {
        let f = files();
        let mut r = raw(&f);
        r.platform_options = Some("unsignedPD:ON".into());
        assert_eq!(resolve(r.clone()).unwrap().platform_config.get("unsignedPD"), Some("ON"));
        r.platform_options = Some("unsignedPD".into());
        assert!(matches!(
            option_error(resolve(r).unwrap_err()),
            OptionError::InvalidPlatformOptions(_)
        ));
    }

    #[test]
    fn test_missing_files() {
        let f = files();
        let mut r = raw(&f);
        r.container = None;
        assert!(matches!(
            option_error(resolve(r).unwrap_err()),
            OptionError::MissingOrUnreadableFile { what: "container", .. }
        ));

        let mut r = raw(&f);
        r.input_list = Some(PathBuf::from("/nonexistent/list.txt"));
        assert!(matches!(
            option_error(resolve(r).unwrap_err()),
            OptionError::MissingOrUnreadableFile { what: "input list", .. }
        ));
    }

    #[test]
    fn test_selection_checked_before_values_and_files() {
        let r = RawOptions {
            runtime: Some("gpu".into()),
            runtime_order: Some("cpu".into()),
            buffer_type: Some("bogus".into()),
            ..Default::default()
        };
        let err = resolve(r).unwrap_err();
        assert!(matches!(
            err.downcast::<SelectionError>().unwrap(),
            SelectionError::ConflictingRuntimeSelection { .. }
        ));
    }

    #[test]
    fn test_values_checked_before_files() {
        let r = RawOptions {
            static_quantization: Some("maybe".into()),
            ..Default::default()
        };
        assert!(matches!(
            option_error(resolve(r).unwrap_err()),
            OptionError::InvalidQuantizationToken(_)
        ));
    }

    #[test]
    fn test_merge_prefers_cli() {
        let cli = RawOptions {
            buffer_type: Some("ITENSOR".into()),
            ..Default::default()
        };
        let file = HarnessConfig {
            buffer_type: Some("USERBUFFER_TF8".into()),
            output_dir: Some(PathBuf::from("out")),
            static_quantization: Some(true),
            init_caching: Some(true),
            resizable_dim: Some(4),
            ..Default::default()
        };
        let m = cli.merge(file);
        assert_eq!(m.buffer_type.as_deref(), Some("ITENSOR"));
        assert_eq!(m.output_dir, Some(PathBuf::from("out")));
        assert_eq!(m.static_quantization.as_deref(), Some("true"));
        assert_eq!(m.resizable_dim.as_deref(), Some("4"));
        assert!(m.init_caching);
    }

    #[test]
    fn test_merge_runtime_keys_follow_one_source() {
        let file = HarnessConfig {
            runtime_order: Some("dsp,cpu".into()),
            ..Default::default()
        };
        let cli = RawOptions {
            runtime: Some("gpu".into()),
            ..Default::default()
        };
        let m = cli.merge(file.clone());
        assert_eq!(m.runtime.as_deref(), Some("gpu"));
        assert_eq!(m.runtime_order, None);

        let m = RawOptions::default().merge(file);
        assert_eq!(m.runtime_order.as_deref(), Some("dsp,cpu"));
    }
}
