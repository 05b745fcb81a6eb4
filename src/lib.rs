//! Emulates a bi-colour 8x8 LED matrix driven through register writes,
//! drawing its state to a text console instead of LEDs.

pub mod bus;
pub mod config;
pub mod demo;
pub mod emu;
pub mod trace;

pub use bus::{get_i2c_device, Device, I2cBus, LogBus, MATRIX_ADDRESS};
pub use emu::display::{DisplayKind, Glyphs, MatrixDisplay};
pub use emu::{BusWord, Grid, MatrixEmulator, PixelColor, Plane, Register};
