// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Buffer modes: engine-managed tensors vs. caller-supplied user buffers.

use crate::DlSystemError;
use std::fmt;
use std::str::FromStr;

/// How input and output memory is handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferType {
    /// The engine owns its tensors.
    #[default]
    ITensor,
    /// Caller-owned buffers of 32-bit floats.
    UserBufferFloat,
    /// Caller-owned buffers of 8-bit TensorFlow-style quantized values.
    UserBufferTf8,
    /// Caller-owned buffers of 16-bit TensorFlow-style quantized values.
    UserBufferTf16,
}

impl BufferType {
    /// Returns the command-line spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            BufferType::ITensor => "ITENSOR",
            BufferType::UserBufferFloat => "USERBUFFER_FLOAT",
            BufferType::UserBufferTf8 => "USERBUFFER_TF8",
            BufferType::UserBufferTf16 => "USERBUFFER_TF16",
        }
    }

    /// Returns `true` when the caller supplies raw memory buffers.
    pub fn uses_user_buffers(self) -> bool {
        !matches!(self, BufferType::ITensor)
    }

    /// Bit width of the quantized encoding, for quantized user-buffer modes.
    pub fn bit_width(self) -> Option<u8> {
        match self {
            BufferType::UserBufferTf8 => Some(8),
            BufferType::UserBufferTf16 => Some(16),
            _ => None,
        }
    }

    /// Returns `true` for the quantized user-buffer modes.
    pub fn is_quantized(self) -> bool {
        self.bit_width().is_some()
    }
}

impl fmt::Display for BufferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BufferType {
    type Err = DlSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ITENSOR" => Ok(BufferType::ITensor),
            "USERBUFFER_FLOAT" => Ok(BufferType::UserBufferFloat),
            "USERBUFFER_TF8" => Ok(BufferType::UserBufferTf8),
            "USERBUFFER_TF16" => Ok(BufferType::UserBufferTf16),
            other => Err(DlSystemError::InvalidBufferType(other.to_string())),
        }
    }
}

/// Where user buffers live. Only consulted with [`BufferType::UserBufferFloat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserBufferSource {
    /// Plain host memory.
    #[default]
    CpuBuffer,
    /// OpenGL buffer objects shared with the GPU.
    GlBuffer,
}

impl UserBufferSource {
    /// Returns the command-line spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            UserBufferSource::CpuBuffer => "CPUBUFFER",
            UserBufferSource::GlBuffer => "GLBUFFER",
        }
    }
}

impl fmt::Display for UserBufferSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserBufferSource {
    type Err = DlSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CPUBUFFER" => Ok(UserBufferSource::CpuBuffer),
            "GLBUFFER" => Ok(UserBufferSource::GlBuffer),
            other => Err(DlSystemError::InvalidUserBufferSource {
                value: other.to_string(),
                detail: "expected CPUBUFFER or GLBUFFER".into(),
            }),
        }
    }
}
