/*++

Licensed under the Apache-2.0 license.

File Name:

    gcpu.rs

Abstract:

    File contains the capability contract for the GCPU crypto coprocessor
    and the hardware-revision table for its MTEE unlock variants.

--*/

use crate::hwcrypto::CipherDirection;
use crate::CryptoResult;

/// Operations of the general-purpose crypto coprocessor.
///
/// Vendor contract: [`init`](GcpuEngine::init) then
/// [`acquire`](GcpuEngine::acquire) must be called, in that order, before
/// any cipher operation. Calling acquire without init is undefined.
pub trait GcpuEngine {
    fn init(&mut self) -> CryptoResult<()>;

    fn acquire(&mut self) -> CryptoResult<()>;

    /// Single-phase ECB block operation.
    fn aes_read_ecb(&mut self, data: &[u8], direction: CipherDirection) -> CryptoResult<Vec<u8>>;

    /// Configure the asynchronous CBC pipeline against the staging buffer
    /// at `addr`. Returns `Ok(false)` when the engine refuses the
    /// configuration (e.g. busy); the caller must not read output then.
    fn aes_setup_cbc(
        &mut self,
        addr: u32,
        data: &[u8],
        iv: Option<&[u32; 4]>,
        direction: CipherDirection,
    ) -> CryptoResult<bool>;

    /// Read back the CBC result staged at `addr`. Only valid after an
    /// accepted [`aes_setup_cbc`](GcpuEngine::aes_setup_cbc).
    fn aes_read_cbc(&mut self, addr: u32, direction: CipherDirection) -> CryptoResult<Vec<u8>>;

    /// Secure-boot unlock key derivation for the MT6735 family.
    fn mtee_unlock_mt6735(&mut self) -> CryptoResult<Vec<u8>>;

    /// Secure-boot unlock key derivation for the MT8167 family.
    fn mtee_unlock_mt8167(&mut self) -> CryptoResult<Vec<u8>>;

    /// Decrypt an MTEE image with the supplied seeds and wrapping keys.
    fn decrypt_mtee_img(
        &mut self,
        data: &[u8],
        keyseed: &[u8],
        ivseed: &[u8],
        aeskey1: &[u8],
        aeskey2: &[u8],
    ) -> CryptoResult<Vec<u8>>;

    /// Lift the address-range security blacklist through the coprocessor.
    fn disable_range_blacklist(&mut self) -> CryptoResult<()>;
}

/// MTEE unlock routine families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MteeUnlock {
    Mt6735,
    Mt8167,
}

// Revision tags with a known unlock routine. Revisions absent from this
// table have no MTEE unlock path.
const MTEE_UNLOCK_TABLE: &[(u16, MteeUnlock)] = &[
    (0x321, MteeUnlock::Mt6735),
    (0x8163, MteeUnlock::Mt8167),
    (0x8167, MteeUnlock::Mt8167),
    (0x8176, MteeUnlock::Mt8167),
];

/// Look up the MTEE unlock variant for a hardware revision tag.
pub fn mtee_unlock_for(hwcode: u16) -> Option<MteeUnlock> {
    MTEE_UNLOCK_TABLE
        .iter()
        .find(|(code, _)| *code == hwcode)
        .map(|(_, variant)| *variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mtee_unlock_table() {
        assert_eq!(mtee_unlock_for(0x321), Some(MteeUnlock::Mt6735));
        assert_eq!(mtee_unlock_for(0x8163), Some(MteeUnlock::Mt8167));
        assert_eq!(mtee_unlock_for(0x8167), Some(MteeUnlock::Mt8167));
        assert_eq!(mtee_unlock_for(0x8176), Some(MteeUnlock::Mt8167));
        assert_eq!(mtee_unlock_for(0x6735), None);
        assert_eq!(mtee_unlock_for(0), None);
    }
}
