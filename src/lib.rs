/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the MediaTek hardware crypto library.

--*/

mod cqdma;
mod dxcc;
mod error;
mod gcpu;
mod hwcrypto;
mod io;
mod seed;
mod sej;
mod setup;

pub type CryptoResult<T> = Result<T, HwCryptoError>;

pub use cqdma::CqdmaEngine;
pub use dxcc::{DxccEngine, RpmbKeyVariant};
pub use error::HwCryptoError;
pub use gcpu::{mtee_unlock_for, GcpuEngine, MteeUnlock};
pub use hwcrypto::{Backend, CipherDirection, HwCrypto, Mode, Otp};
pub use io::RegisterIo;
pub use seed::{derive_iv, derive_words, iv_bytes, sst_iv};
pub use sej::{SejEngine, SstDecryptOutput};
pub use setup::CryptoSetup;
