// crates/langflow-mcp/src/file_guard.rs
// ============================================================================
// Module: File-Size Guard
// Description: Base64 upload validation with pre-decode size estimation.
// Purpose: Reject oversized uploads before allocating decode buffers.
// Dependencies: base64, thiserror
// ============================================================================

//! ## Overview
//! Uploads arrive as base64 text. [`FileSizeGuard::validate`] checks the text
//! grammar, rejects on the estimated decoded size, and only then decodes and
//! re-checks the real size. The estimate is an upper bound, so the decode step
//! never runs for payloads that are certain to exceed the ceiling.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine as _;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::GeneralPurpose;
use base64::engine::GeneralPurposeConfig;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default decoded-size ceiling (10 MiB).
pub const DEFAULT_MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Standard alphabet; padding optional, trailing bits tolerated.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Upload validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileGuardError {
    /// Text is not base64.
    #[error("Invalid base64 format")]
    InvalidFormat,
    /// Estimated decoded size exceeds the ceiling.
    #[error(
        "File size {estimated} bytes (estimated) exceeds maximum allowed size of {max_bytes} bytes"
    )]
    EstimatedTooLarge {
        /// Estimated decoded size.
        estimated: usize,
        /// Configured ceiling.
        max_bytes: usize,
    },
    /// Decoded size exceeds the ceiling.
    #[error("File size {actual} bytes exceeds maximum allowed size of {max_bytes} bytes")]
    TooLarge {
        /// Decoded size.
        actual: usize,
        /// Configured ceiling.
        max_bytes: usize,
    },
}

// ============================================================================
// SECTION: Guard
// ============================================================================

/// Validates and decodes base64 uploads against a size ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSizeGuard {
    /// Maximum decoded size in bytes.
    max_bytes: usize,
}

impl Default for FileSizeGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_BYTES)
    }
}

impl FileSizeGuard {
    /// Creates a guard with the given ceiling.
    #[must_use]
    pub const fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Returns the configured ceiling.
    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validates `encoded` and returns the decoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FileGuardError`] when the text is not base64 or the payload
    /// exceeds the ceiling.
    pub fn validate(&self, encoded: &str) -> Result<Vec<u8>, FileGuardError> {
        if !is_base64_text(encoded) {
            return Err(FileGuardError::InvalidFormat);
        }
        let estimated = estimated_decoded_len(encoded.len());
        if estimated > self.max_bytes {
            return Err(FileGuardError::EstimatedTooLarge { estimated, max_bytes: self.max_bytes });
        }
        let decoded = LENIENT.decode(encoded).map_err(|_| FileGuardError::InvalidFormat)?;
        self.check_len(decoded.len())?;
        Ok(decoded)
    }

    /// Checks a decoded length against the ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`FileGuardError::TooLarge`] when `actual` exceeds the ceiling.
    pub const fn check_len(&self, actual: usize) -> Result<(), FileGuardError> {
        if actual > self.max_bytes {
            return Err(FileGuardError::TooLarge { actual, max_bytes: self.max_bytes });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Upper bound of the decoded size for `encoded_len` base64 characters.
///
/// Equals `ceil(encoded_len * 3 / 4)` without overflow.
#[must_use]
pub const fn estimated_decoded_len(encoded_len: usize) -> usize {
    (encoded_len / 4) * 3 + ((encoded_len % 4) * 3).div_ceil(4)
}

/// Matches `^[A-Za-z0-9+/]*={0,2}$`.
fn is_base64_text(text: &str) -> bool {
    let body = text.trim_end_matches('=');
    let padding = text.len() - body.len();
    padding <= 2
        && body.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'+' || byte == b'/')
}

// ============================================================================
// SECTION: Tests
// ============================================================================
