/*++

Licensed under the Apache-2.0 license.

File Name:

    cqdma.rs

Abstract:

    File contains the capability contract for the command-queue DMA
    controller.

--*/

use crate::CryptoResult;

/// The CQDMA controller participates only in lifting the address-range
/// security blacklist; it exposes no cipher modes.
pub trait CqdmaEngine {
    fn disable_range_blacklist(&mut self) -> CryptoResult<()>;
}
