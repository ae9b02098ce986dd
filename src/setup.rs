/*++

Licensed under the Apache-2.0 license.

File Name:

    setup.rs

Abstract:

    File contains the immutable device-profile descriptor shared by all
    crypto engine adapters.

--*/

use crate::io::RegisterIo;

/// Device profile for one SoC: engine register bases, identity regions and
/// the injected register transport.
///
/// Built once by the host tool before any engine use and shared by `&`
/// reference for the lifetime of the session. No adapter mutates it.
pub struct CryptoSetup {
    /// SoC hardware-revision tag (e.g. 0x321, 0x8167).
    pub hwcode: u16,
    /// Legacy cipher unit register base.
    pub sej_base: u32,
    /// Crypto coprocessor register base.
    pub gcpu_base: u32,
    /// Trusted key-derivation unit register base.
    pub dxcc_base: u32,
    /// Command-queue DMA controller register base.
    pub cqdma_base: u32,
    /// Fuse controller register base.
    pub efuse_base: u32,
    /// Staging buffer used by the GCPU CBC path.
    pub da_payload_addr: u32,
    /// AP DMA scratch region.
    pub ap_dma_mem: u32,
    /// Unique device identifier storage.
    pub meid_addr: u32,
    pub meid_len: u32,
    /// SoC identifier region.
    pub socid_addr: u32,
    /// Provisioning key region.
    pub prov_addr: u32,
    /// (base, length) ranges covered by the security blacklist.
    pub blacklist: Vec<(u32, u32)>,
    /// Register transport for this device connection.
    pub io: Box<dyn RegisterIo>,
}
