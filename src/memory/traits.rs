//! Traits for values that can be moved across the bus

use crate::memory::Memory;

/// A value that can be loaded from and stored to memory.
///
/// Every implementation must go through the byte primitives on `Memory`, so
/// that write suppression and DMA triggering apply to wide accesses too.
pub trait Storable: Sized {
    fn load(mem: &Memory, address: u16) -> Self;

    fn store(self, mem: &mut Memory, address: u16);
}

impl Storable for u8 {
    fn load(mem: &Memory, address: u16) -> Self {
        mem.read_byte(address)
    }

    fn store(self, mem: &mut Memory, address: u16) {
        mem.write_byte(address, self)
    }
}

/// Words are little-endian; the high byte's address wraps at `0xFFFF`.
impl Storable for u16 {
    fn load(mem: &Memory, address: u16) -> Self {
        let lo = mem.read_byte(address);
        let hi = mem.read_byte(address.wrapping_add(1));

        u16::from_le_bytes([lo, hi])
    }

    fn store(self, mem: &mut Memory, address: u16) {
        let [lo, hi] = self.to_le_bytes();

        mem.write_byte(address, lo);
        mem.write_byte(address.wrapping_add(1), hi);
    }
}
