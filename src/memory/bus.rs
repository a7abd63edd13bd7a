//! The memory bus

use crate::memory::{Storable, DMA, OAM, OAM_LEN, ROM_END};
use log::debug;
use std::fmt;
use std::ops::Range;

const SIZE: usize = 0x10000;

/// The full 16-bit address space as one flat store.
///
/// Writes below `0x8000` are accepted and discarded; there is no bank
/// switching. A write to `0xFF46` performs an OAM DMA transfer.
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory").field("len", &self.bytes.len()).finish()
    }
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: vec![0; SIZE].into_boxed_slice(),
        }
    }

    pub fn read_byte(&self, address: u16) -> u8 {
        self.bytes[address as usize]
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        if address < ROM_END {
            return;
        }

        self.bytes[address as usize] = value;

        if address == DMA {
            self.oam_dma(value);
        }
    }

    /// Read a byte or a little-endian word.
    pub fn get<T: Storable>(&self, address: u16) -> T {
        T::load(self, address)
    }

    /// Write a byte or a little-endian word.
    pub fn set<T: Storable>(&mut self, address: u16, value: T) {
        value.store(self, address)
    }

    /// Copy an image into memory starting at `offset`, bypassing the ROM
    /// write suppression. Anything past `0xFFFF` is dropped.
    ///
    /// Returns the number of bytes copied.
    pub fn load(&mut self, offset: u16, image: &[u8]) -> usize {
        let start = offset as usize;
        let len = image.len().min(SIZE - start);

        self.bytes[start..start + len].copy_from_slice(&image[..len]);

        len
    }

    /// A read-only view of a range of the address space, clipped to its end.
    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        let end = range.end.min(SIZE);
        let start = range.start.min(end);

        &self.bytes[start..end]
    }

    fn oam_dma(&mut self, page: u8) {
        let source = (page as usize) << 8;
        let dest = OAM as usize;

        debug!("OAM DMA from {:04X}", source);

        self.bytes
            .copy_within(source..source + OAM_LEN, dest);
    }
}
