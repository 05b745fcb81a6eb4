//! The bus side of the matrix: a device handle that forwards register
//! writes to whichever bus implementation it was built with.

use std::io::Write;

use tracing::{debug, Span};

use crate::emu::display::MatrixDisplay;
use crate::emu::MatrixEmulator;

/// Bus address the matrix backpack answers on.
pub const MATRIX_ADDRESS: u16 = 0x70;

/// The two bus operations a matrix driver issues.
pub trait I2cBus {
    fn write_i2c_block_data(&mut self, address: u16, register: u32, data: &[u8]);
    fn write_byte_data(&mut self, address: u16, register: u32, value: u32);
}

/// There is only one device on the emulated bus, so the address is ignored.
impl<D: MatrixDisplay, W: Write> I2cBus for MatrixEmulator<D, W> {
    fn write_i2c_block_data(&mut self, _address: u16, register: u32, data: &[u8]) {
        self.write_block(register, data);
    }

    fn write_byte_data(&mut self, _address: u16, register: u32, value: u32) {
        self.write_byte(register, value);
    }
}

/// A bus that only logs what it is sent.
#[derive(Debug, Default)]
pub struct LogBus {
    writes: usize,
}

impl LogBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl I2cBus for LogBus {
    fn write_i2c_block_data(&mut self, address: u16, register: u32, data: &[u8]) {
        self.writes += 1;
        debug!(address, register, ?data, "write_i2c_block_data");
    }

    fn write_byte_data(&mut self, address: u16, register: u32, value: u32) {
        self.writes += 1;
        debug!(address, register, value, "write_byte_data");
    }
}

/// A device at one address on one bus.
pub struct Device<B: I2cBus> {
    address: u16,
    busnum: u32,
    bus: B,
    span: Span,
}

impl<B: I2cBus> Device<B> {
    pub fn new(address: u16, busnum: u32, bus: B) -> Self {
        Self {
            address,
            busnum,
            bus,
            span: tracing::debug_span!("i2c", bus = busnum, address = %format!("{address:#04X}")),
        }
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn busnum(&self) -> u32 {
        self.busnum
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Writes a block of bytes starting at `register`.
    pub fn write_list(&mut self, register: u32, data: &[u8]) {
        let _enter = self.span.enter();
        self.bus.write_i2c_block_data(self.address, register, data);
    }

    /// Writes an 8-bit value to `register`.
    pub fn write8(&mut self, register: u32, value: u32) {
        let _enter = self.span.enter();
        let value = value & 0xFF;
        self.bus.write_byte_data(self.address, register, value);
    }
}

/// Opens the device at `address`, on bus 0 unless `busnum` says otherwise.
pub fn get_i2c_device<B: I2cBus>(address: u16, busnum: Option<u32>, bus: B) -> Device<B> {
    Device::new(address, busnum.unwrap_or(0), bus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emu::display::{Glyphs, PlainDisplay};
    use crate::emu::PixelColor;

    #[derive(Default)]
    struct Recorder {
        bytes: Vec<(u16, u32, u32)>,
        blocks: Vec<(u16, u32, Vec<u8>)>,
    }

    impl I2cBus for Recorder {
        fn write_i2c_block_data(&mut self, address: u16, register: u32, data: &[u8]) {
            self.blocks.push((address, register, data.to_vec()));
        }

        fn write_byte_data(&mut self, address: u16, register: u32, value: u32) {
            self.bytes.push((address, register, value));
        }
    }

    #[test]
    fn device_defaults_to_bus_zero() {
        let dev = get_i2c_device(MATRIX_ADDRESS, None, LogBus::new());
        assert_eq!(dev.address(), 112);
        assert_eq!(dev.busnum(), 0);

        let dev = get_i2c_device(0x71, Some(1), LogBus::new());
        assert_eq!(dev.busnum(), 1);
    }

    #[test]
    fn device_forwards_with_its_address() {
        let mut dev = get_i2c_device(MATRIX_ADDRESS, None, Recorder::default());
        dev.write8(3, 0x1FF);
        dev.write_list(0, &[1, 2]);

        assert_eq!(dev.bus().bytes, vec![(0x70, 3, 0xFF)]);
        assert_eq!(dev.bus().blocks, vec![(0x70, 0, vec![1, 2])]);
    }

    #[test]
    fn log_bus_counts_writes() {
        let mut dev = get_i2c_device(MATRIX_ADDRESS, None, LogBus::new());
        dev.write8(0, 1);
        dev.write_list(0, &[]);
        assert_eq!(dev.bus().writes(), 2);
    }

    #[test]
    fn device_drives_matrix() {
        let emu = MatrixEmulator::with_sink(PlainDisplay::new(Glyphs::Letters), Vec::new());
        let mut dev = get_i2c_device(MATRIX_ADDRESS, None, emu);
        dev.write8(1, 0x102);
        dev.write8(0, 0x02);
        dev.write_list(0, &[0xFF; 8]);

        let grid = dev.bus().grid();
        assert_eq!(grid.pixel(0, 1), PixelColor::Yellow);
        assert_eq!(grid.pixel(0, 0), PixelColor::Off);
    }
}
