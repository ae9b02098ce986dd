/*++

Licensed under the Apache-2.0 license.

File Name:

    sej.rs

Abstract:

    File contains the capability contract for the legacy SEJ cipher unit.

--*/

use crate::hwcrypto::CipherDirection;
use crate::CryptoResult;

/// Operations of the legacy symmetric-cipher unit.
///
/// The register-level sequences live in the engine implementation; this
/// layer only requires that the same inputs against the same physical
/// device state produce the same output. Key material returned here is
/// secret and must not be logged outside the explicit SST diagnostic path.
pub trait SejEngine {
    /// AES-128-CBC with the engine-internal key. `iv` overrides the engine
    /// default when given.
    fn aes128_cbc(
        &mut self,
        buf: &[u8],
        direction: CipherDirection,
        iv: Option<&[u32; 4]>,
    ) -> CryptoResult<Vec<u8>>;

    /// The vendor "secure algorithm with level" transform layered atop the
    /// base block cipher.
    fn sst_secure_algo_with_level(
        &mut self,
        buf: &[u8],
        direction: CipherDirection,
    ) -> CryptoResult<Vec<u8>>;

    /// Hardware metadata derivation, surfaced only on the SST diagnostic
    /// path.
    fn generate_hw_meta(
        &mut self,
        data: &[u8],
        direction: CipherDirection,
    ) -> CryptoResult<Vec<u8>>;

    /// RPMB authentication key from the unique device identifier and the
    /// OTP fuse value.
    fn generate_rpmb(&mut self, meid: &[u8], otp: &[u8; 32]) -> CryptoResult<Vec<u8>>;

    /// MTEE key, software flavor.
    fn generate_mtee(&mut self, otp: &[u8; 32]) -> CryptoResult<Vec<u8>>;

    /// MTEE key, hardware flavor.
    fn generate_mtee_hw(&mut self, otp: &[u8; 32]) -> CryptoResult<Vec<u8>>;
}

/// Return-value policy for the SST decrypt path.
///
/// The vendor code computes the metadata and SST values, prints both and
/// falls through without returning anything. `DiagnosticOnly` keeps that
/// behavior (empty result); `SecureAlgo` returns the SST value instead and
/// diverges from legacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SstDecryptOutput {
    #[default]
    DiagnosticOnly,
    SecureAlgo,
}
