/*++

Licensed under the Apache-2.0 license.

File Name:

    io.rs

Abstract:

    File contains the raw register access contract supplied by the host
    transport.

--*/

use crate::{CryptoResult, HwCryptoError};

/// Raw 32-bit register access against the device address space.
///
/// Implementations are supplied by the host tool (USB preloader link,
/// DA session, emulator). Every method either completes synchronously or
/// reports a transport failure; this layer never retries.
pub trait RegisterIo {
    fn read32(&self, addr: u32) -> CryptoResult<u32>;

    fn write32(&self, addr: u32, value: u32) -> CryptoResult<()>;

    /// Bulk memory write used to populate staging buffers. Optional
    /// capability; transports without it keep the default.
    fn write_mem(&self, _addr: u32, _data: &[u8]) -> CryptoResult<()> {
        Err(HwCryptoError::WriteMemUnsupported)
    }

    /// Read-modify-write OR of `value` into the register at `addr`.
    fn or32(&self, addr: u32, value: u32) -> CryptoResult<()> {
        let cur = self.read32(addr)?;
        self.write32(addr, cur | value)
    }

    /// Read-modify-write AND of `value` into the register at `addr`.
    fn and32(&self, addr: u32, value: u32) -> CryptoResult<()> {
        let cur = self.read32(addr)?;
        self.write32(addr, cur & value)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct RamIo {
        mem: RefCell<HashMap<u32, u32>>,
    }

    impl RegisterIo for RamIo {
        fn read32(&self, addr: u32) -> CryptoResult<u32> {
            Ok(*self.mem.borrow().get(&addr).unwrap_or(&0))
        }

        fn write32(&self, addr: u32, value: u32) -> CryptoResult<()> {
            self.mem.borrow_mut().insert(addr, value);
            Ok(())
        }
    }

    #[test]
    fn test_or32_round_trip() {
        let io = RamIo::default();
        io.write32(0x1000, 0x0000_00f0).unwrap();
        io.or32(0x1000, 0x8000_0001).unwrap();
        assert_eq!(io.read32(0x1000).unwrap(), 0x8000_00f1);
    }

    #[test]
    fn test_and32_round_trip() {
        let io = RamIo::default();
        io.write32(0x2000, 0xffff_00ff).unwrap();
        io.and32(0x2000, 0x0f0f_0f0f).unwrap();
        assert_eq!(io.read32(0x2000).unwrap(), 0x0f0f_000f);
    }

    #[test]
    fn test_write_mem_defaults_to_unsupported() {
        let io = RamIo::default();
        assert!(matches!(
            io.write_mem(0x3000, &[1, 2, 3]),
            Err(HwCryptoError::WriteMemUnsupported)
        ));
    }
}
