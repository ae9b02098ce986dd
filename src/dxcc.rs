/*++

Licensed under the Apache-2.0 license.

File Name:

    dxcc.rs

Abstract:

    File contains the capability contract for the DXCC trusted
    key-derivation unit.

--*/

use crate::CryptoResult;

/// RPMB key-derivation variants of the trusted unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpmbKeyVariant {
    /// Vendor level tag 0.
    Default,
    /// File-disk-encryption flavor, vendor level tag 1.
    Fde,
    /// Second RPMB flavor, vendor level tag 2.
    Rpmb2,
}

/// Operations of the trusted-execution key-derivation unit.
///
/// Deterministic functions of (device identity, security state); variants
/// unsupported by a given hardware revision fail inside the engine rather
/// than silently returning nothing.
pub trait DxccEngine {
    fn rpmb_key(&mut self, variant: RpmbKeyVariant) -> CryptoResult<Vec<u8>>;

    /// RPMB key for the mobile isolated execution environment.
    fn rpmb_mitee_key(&mut self) -> CryptoResult<Vec<u8>>;

    /// File-based-encryption key for the iTrustee environment.
    fn itrustee_fbe_key(&mut self) -> CryptoResult<Vec<u8>>;

    fn provision_key(&mut self) -> CryptoResult<Vec<u8>>;

    /// SHA-256 through the unit's hashing primitive.
    fn sha256(&mut self, data: &[u8]) -> CryptoResult<Vec<u8>>;
}
