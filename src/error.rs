/*++

Licensed under the Apache-2.0 license.

File Name:

    error.rs

Abstract:

    File contains the error taxonomy for the hardware crypto library.

--*/

use thiserror::Error;

use crate::hwcrypto::{Backend, Mode};

/// Errors surfaced by the crypto orchestration layer.
///
/// Selector errors ([`UnknownBackend`](HwCryptoError::UnknownBackend),
/// [`UnsupportedMode`](HwCryptoError::UnsupportedMode)) and malformed-input
/// errors are raised before any engine call; engine rejections and transport
/// failures can only occur after a valid selector was dispatched.
#[derive(Debug, Error)]
pub enum HwCryptoError {
    /// Unknown backend tag. Current policy only advertises the legacy
    /// cipher unit to callers.
    #[error("unknown aes_hwcrypt backend {0:?}; supported backends are: sej")]
    UnknownBackend(String),

    #[error("unknown aes_hwcrypt mode {0:?}")]
    UnknownMode(String),

    #[error("mode {mode} is not supported by the {backend} backend")]
    UnsupportedMode { backend: Backend, mode: Mode },

    /// The OTP fuse value was given as text but is not valid hex, or the
    /// decoded value is not 32 bytes.
    #[error("otp fuse value is not valid hex")]
    InvalidOtp(#[from] hex::FromHexError),

    #[error("otp fuse value must be 32 bytes, got {0}")]
    InvalidOtpLength(usize),

    /// The engine refused the operation (e.g. a busy coprocessor rejecting
    /// a CBC configuration). No output was produced.
    #[error("{backend} engine rejected the operation")]
    EngineRejected { backend: Backend },

    /// No MTEE unlock routine is known for this hardware revision.
    #[error("no mtee unlock routine for hardware revision {hwcode:#x}")]
    UnsupportedRevision { hwcode: u16 },

    /// The register backend was built without a bulk memory-write handle.
    #[error("register backend does not support memory writes")]
    WriteMemUnsupported,

    /// The underlying register transport failed. Propagated unmodified;
    /// retry policy belongs to the transport, not to this layer.
    #[error("register transport failure")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HwCryptoError {
    /// Wrap a transport-level failure.
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }
}
