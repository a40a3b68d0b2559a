// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Parsing of comma-separated runtime orders.

use crate::SelectionError;
use dl_system::{Runtime, RuntimeList};
use std::collections::HashSet;

/// Parses a comma-separated runtime order such as `"dsp,gpu,cpu"`.
///
/// `option` names the command-line option the list came from and is
/// echoed in errors.
///
/// Tokens are trimmed and compared case-insensitively. The whole list is
/// scanned for repeats before any unknown name is reported, so a list that
/// is both repetitive and contains unknown names reports the repetition.
/// Distinct aliases of one runtime (`cpu,cpu_float32`) count as a repeat.
///
/// # Examples
/// ```
/// use dl_system::Runtime;
/// use runtime_selector::{parse_runtime_order, SelectionError};
///
/// let list = parse_runtime_order("-l", "cpu,gpu,dsp").unwrap();
/// assert_eq!(list.as_slice(), &[Runtime::Cpu, Runtime::Gpu, Runtime::Dsp]);
///
/// let err = parse_runtime_order("-l", "cpu,tpu,cpu").unwrap_err();
/// assert!(matches!(err, SelectionError::DuplicateRuntimeToken { .. }));
/// ```
pub fn parse_runtime_order(option: &str, csv: &str) -> Result<RuntimeList, SelectionError> {
    let tokens: Vec<String> = csv
        .split(',')
        .map(|t| t.trim().to_ascii_lowercase())
        .collect();

    if let Some(token) = first_repeated(&tokens) {
        return Err(SelectionError::DuplicateRuntimeToken {
            option: option.to_string(),
            list: csv.to_string(),
            token: token.to_string(),
        });
    }

    let mut list = RuntimeList::new();
    for token in &tokens {
        let runtime =
            Runtime::from_name(token).ok_or_else(|| SelectionError::UnknownRuntimeToken {
                option: option.to_string(),
                token: token.clone(),
            })?;
        list.add(runtime)
            .map_err(|_| SelectionError::DuplicateRuntimeToken {
                option: option.to_string(),
                list: csv.to_string(),
                token: token.clone(),
            })?;
    }

    tracing::debug!("runtime order {option} '{csv}' -> {list}");
    Ok(list)
}

/// Returns the first non-empty token that repeats an earlier one.
///
/// Known names are compared by the runtime they resolve to, unknown names
/// by their text. Empty tokens are left for name resolution to reject.
fn first_repeated(tokens: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .find(|&t| {
            let key = Runtime::from_name(t).map_or(t, |r| r.as_str());
            !seen.insert(key)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let list = parse_runtime_order("-l", "dsp,cpu,gpu").unwrap();
        assert_eq!(list.as_slice(), &[Runtime::Dsp, Runtime::Cpu, Runtime::Gpu]);
    }

    #[test]
    fn test_single_entry() {
        let list = parse_runtime_order("-l", "aip_fixed8_tf").unwrap();
        assert_eq!(list.as_slice(), &[Runtime::AipFixedTf]);
    }

    #[test]
    fn test_whitespace_and_case() {
        let list = parse_runtime_order("-l", " GPU , Cpu ").unwrap();
        assert_eq!(list.as_slice(), &[Runtime::Gpu, Runtime::Cpu]);
    }

    #[test]
    fn test_duplicate_at_list_end() {
        let err = parse_runtime_order("-l", "cpu,gpu,cpu").unwrap_err();
        assert_eq!(
            err,
            SelectionError::DuplicateRuntimeToken {
                option: "-l".into(),
                list: "cpu,gpu,cpu".into(),
                token: "cpu".into(),
            }
        );
    }

    #[test]
    fn test_adjacent_duplicate_at_list_start() {
        let err = parse_runtime_order("-l", "gpu,gpu").unwrap_err();
        assert!(matches!(err, SelectionError::DuplicateRuntimeToken { token, .. } if token == "gpu"));
    }

    #[test]
    fn test_duplicate_wins_over_earlier_unknown() {
        let err = parse_runtime_order("-l", "tpu,cpu,npu,cpu").unwrap_err();
        assert!(matches!(err, SelectionError::DuplicateRuntimeToken { .. }));
    }

    #[test]
    fn test_duplicate_ignores_case() {
        let err = parse_runtime_order("-l", "dsp,DSP").unwrap_err();
        assert!(matches!(err, SelectionError::DuplicateRuntimeToken { .. }));
    }

    #[test]
    fn test_alias_duplicate() {
        let err = parse_runtime_order("-l", "cpu,cpu_float32").unwrap_err();
        assert!(
            matches!(err, SelectionError::DuplicateRuntimeToken { token, .. } if token == "cpu_float32")
        );
    }

    #[test]
    fn test_alias_duplicate_wins_over_unknown() {
        let err = parse_runtime_order("-l", "cpu,tpu,cpu_float32").unwrap_err();
        assert_eq!(
            err,
            SelectionError::DuplicateRuntimeToken {
                option: "-l".into(),
                list: "cpu,tpu,cpu_float32".into(),
                token: "cpu_float32".into(),
            }
        );
    }

    #[test]
    fn test_unknown_token() {
        let err = parse_runtime_order("-l", "cpu,tpu").unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownRuntimeToken {
                option: "-l".into(),
                token: "tpu".into(),
            }
        );
    }

    #[test]
    fn test_empty_tokens_are_unknown() {
        let err = parse_runtime_order("-l", "cpu,,gpu").unwrap_err();
        assert!(matches!(err, SelectionError::UnknownRuntimeToken { token, .. } if token.is_empty()));

        let err = parse_runtime_order("-l", ",,").unwrap_err();
        assert!(matches!(err, SelectionError::UnknownRuntimeToken { .. }));
    }

    #[test]
    fn test_option_name_is_echoed() {
        let err = parse_runtime_order("--runtime-order", "cpu,x").unwrap_err();
        assert!(err.to_string().contains("--runtime-order"));
    }
}
