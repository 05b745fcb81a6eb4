pub mod display;
pub mod fretboard;


use std::io::{Stdout, Write};

use tracing::{debug, trace, warn, Span};

pub const MATRIX_SIZE: usize = 8;

/// Only the low nibble of a register selects anything: 16 registers over
/// two planes is exactly the 8 rows of the matrix.
const REGISTER_MASK: u64 = 0x0F;
const VALUE_MASK: u64 = 0xFF;

/// Any primitive integer a driver may hand the bus. Only the low bits are
/// kept, two's complement for negative values.
pub trait BusWord: Copy {
    fn low_bits(self) -> u64;
}

macro_rules! impl_bus_word {
    ($($ty:ty),*) => {
        $(
            impl BusWord for $ty {
                fn low_bits(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_bus_word!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Colour of a single LED, stored as two plane bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelColor {
    #[default]
    Off,
    Green,
    Red,
    /// Both planes lit.
    Yellow,
}

impl PixelColor {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => PixelColor::Off,
            0b01 => PixelColor::Green,
            0b10 => PixelColor::Red,
            _ => PixelColor::Yellow,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            PixelColor::Off => 0b00,
            PixelColor::Green => 0b01,
            PixelColor::Red => 0b10,
            PixelColor::Yellow => 0b11,
        }
    }

    pub fn has_plane(self, plane: Plane) -> bool {
        self.bits() & plane.mask() != 0
    }

    /// Sets or clears one plane bit, keeping the other one.
    pub fn with_plane(self, plane: Plane, lit: bool) -> Self {
        let bits = if lit {
            self.bits() | plane.mask()
        } else {
            self.bits() & !plane.mask()
        };
        PixelColor::from_bits(bits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Green,
    Red,
}

impl Plane {
    pub fn mask(self) -> u8 {
        match self {
            Plane::Green => 0b01,
            Plane::Red => 0b10,
        }
    }
}

/// A register address split into the row and colour plane it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    pub row: usize,
    pub plane: Plane,
}

impl Register {
    pub fn decode(register: impl BusWord) -> Self {
        let register = register.low_bits() & REGISTER_MASK;
        let plane = if register % 2 == 0 {
            Plane::Green
        } else {
            Plane::Red
        };
        Self {
            row: (register / 2) as usize,
            plane,
        }
    }

}

/// The 8x8 pixel state, row-major, row 0 on top and column 0 on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[PixelColor; MATRIX_SIZE]; MATRIX_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixel(&self, row: usize, col: usize) -> PixelColor {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &[[PixelColor; MATRIX_SIZE]; MATRIX_SIZE] {
        &self.cells
    }

    /// Pixel at a 0-based row-major position, `None` past the last LED.
    pub fn linear(&self, index: usize) -> Option<PixelColor> {
        if index >= MATRIX_SIZE * MATRIX_SIZE {
            return None;
        }
        Some(self.cells[index / MATRIX_SIZE][index % MATRIX_SIZE])
    }

    /// Reads one plane of a row back as the byte that would produce it.
    pub fn plane_byte(&self, row: usize, plane: Plane) -> u8 {
        self.cells[row]
            .iter()
            .enumerate()
            .filter(|(_, pix)| pix.has_plane(plane))
            .fold(0, |byte, (col, _)| byte | (1 << col))
    }

    fn merge_plane(&mut self, register: Register, value: u8) {
        let row = &mut self.cells[register.row];
        for (col, pix) in row.iter_mut().enumerate() {
            let lit = value & (1 << col) != 0;
            *pix = pix.with_plane(register.plane, lit);
        }
    }
}

/// The matrix controller: owns the grid and redraws it through `D` into
/// `W` after every byte write.
pub struct MatrixEmulator<D: display::MatrixDisplay, W: Write = Stdout> {
    grid: Grid,
    display_dev: D,
    sink: W,
    span: Span,
}

impl<D: display::MatrixDisplay> MatrixEmulator<D, Stdout> {
    pub fn new(display_dev: D) -> Self {
        Self::with_sink(display_dev, std::io::stdout())
    }
}

impl<D: display::MatrixDisplay, W: Write> MatrixEmulator<D, W> {
    pub fn with_sink(display_dev: D, sink: W) -> Self {
        Self {
            grid: Grid::new(),
            display_dev,
            sink,
            span: tracing::debug_span!("matrix"),
        }
    }

    /// Block writes carry no pixel data on this device.
    pub fn write_block(&mut self, register: impl BusWord, data: &[u8]) {
        let _enter = self.span.enter();
        debug!(register = register.low_bits(), ?data, "block write ignored");
    }

    pub fn write_byte(&mut self, register: impl BusWord, value: impl BusWord) {
        let span = self.span.clone();
        let _enter = span.enter();
        let decoded = Register::decode(register);
        let value = (value.low_bits() & VALUE_MASK) as u8;
        trace!(
            register = register.low_bits(),
            value,
            row = decoded.row,
            plane = ?decoded.plane,
            "byte write"
        );

        self.grid.merge_plane(decoded, value);
        self.draw();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    fn draw(&mut self) {
        let frame = self.display_dev.render(&self.grid);
        let result = writeln!(self.sink, "{frame}").and_then(|_| self.sink.flush());
        if let Err(err) = result {
            warn!(%err, "failed to draw matrix");
        }
    }
}
