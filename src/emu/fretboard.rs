//! Redraws the 64 LEDs as a guitar neck: 6 strings by 11 frets.
//!
//! LEDs are wired along the neck string by string, so fret `f` of string `s`
//! is LED `s + 6 * (f - 1)` in row-major order. The last two positions of the
//! neck have no LED behind them and always show as off.

use std::fmt::Write;

use super::display::{Glyphs, MatrixDisplay};
use super::{Grid, PixelColor, MATRIX_SIZE};

pub const STRINGS: usize = 6;
pub const FRETS: usize = 11;

/// Row-major LED index of a string (0-based) and fret (1-based), if the
/// position is on the neck and an LED sits there.
pub fn fret_index(string: usize, fret: usize) -> Option<usize> {
    if string >= STRINGS || !(1..=FRETS).contains(&fret) {
        return None;
    }
    let index = string + STRINGS * (fret - 1);
    (index < MATRIX_SIZE * MATRIX_SIZE).then_some(index)
}

/// Grid coordinate of a string (0-based) and fret (1-based).
pub fn fret_position(string: usize, fret: usize) -> Option<(usize, usize)> {
    fret_index(string, fret).map(|index| (index / MATRIX_SIZE, index % MATRIX_SIZE))
}

#[derive(Debug)]
pub struct FretboardDisplay {
    glyphs: Glyphs,
}

impl FretboardDisplay {
    pub fn new(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }

    pub fn color_at(grid: &Grid, string: usize, fret: usize) -> PixelColor {
        fret_index(string, fret)
            .and_then(|index| grid.linear(index))
            .unwrap_or(PixelColor::Off)
    }
}

impl MatrixDisplay for FretboardDisplay {
    fn render(&self, grid: &Grid) -> String {
        let mut out = String::from("  ");
        for fret in 1..=FRETS {
            let _ = write!(out, "|{fret:^3}");
        }
        out.push_str("|\n");

        for string in 0..STRINGS {
            let _ = write!(out, "{string} ");
            for fret in 1..=FRETS {
                let glyph = self.glyphs.glyph(Self::color_at(grid, string, fret));
                let _ = write!(out, "|-{glyph}-");
            }
            out.push_str("|\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emu::MatrixEmulator;

    #[test]
    fn seventh_led_is_second_fret_of_first_string() {
        assert_eq!(fret_position(0, 2), Some((0, 6)));

        let mut emu = MatrixEmulator::with_sink(FretboardDisplay::new(Glyphs::Letters), Vec::new());
        emu.write_byte(0, 0b0100_0000);

        for string in 0..STRINGS {
            for fret in 1..=FRETS {
                let expected = if (string, fret) == (0, 2) {
                    PixelColor::Green
                } else {
                    PixelColor::Off
                };
                assert_eq!(FretboardDisplay::color_at(emu.grid(), string, fret), expected);
            }
        }
    }

    #[test]
    fn positions_follow_string_major_wiring() {
        assert_eq!(fret_position(0, 1), Some((0, 0)));
        assert_eq!(fret_position(5, 1), Some((0, 5)));
        assert_eq!(fret_position(2, 2), Some((1, 0)));
        assert_eq!(fret_position(3, 11), Some((7, 7)));
        assert_eq!(fret_position(4, 11), None);
        assert_eq!(fret_position(5, 11), None);
    }

    #[test]
    fn positions_off_the_neck_have_no_led() {
        assert_eq!(fret_position(0, 0), None);
        assert_eq!(fret_position(6, 1), None);
        assert_eq!(fret_position(0, 12), None);
        assert_eq!(fret_index(usize::MAX, usize::MAX), None);

        let mut emu = MatrixEmulator::with_sink(FretboardDisplay::new(Glyphs::Letters), Vec::new());
        emu.write_byte(0, 0xFF);
        emu.write_byte(1, 0xFF);
        assert_eq!(FretboardDisplay::color_at(emu.grid(), 0, 0), PixelColor::Off);
        assert_eq!(FretboardDisplay::color_at(emu.grid(), 6, 1), PixelColor::Off);
        assert_eq!(FretboardDisplay::color_at(emu.grid(), 0, 12), PixelColor::Off);
        assert_eq!(FretboardDisplay::color_at(emu.grid(), 0, 1), PixelColor::Yellow);
    }

    #[test]
    fn every_led_appears_exactly_once() {
        let mut seen = [[0; MATRIX_SIZE]; MATRIX_SIZE];
        for string in 0..STRINGS {
            for fret in 1..=FRETS {
                if let Some((row, col)) = fret_position(string, fret) {
                    seen[row][col] += 1;
                }
            }
        }
        assert!(seen.iter().flatten().all(|count| *count == 1));
    }

    #[test]
    fn render_places_glyph_on_string_line() {
        let mut emu = MatrixEmulator::with_sink(FretboardDisplay::new(Glyphs::Letters), Vec::new());
        emu.write_byte(1, 0b0100_0000);

        let out = FretboardDisplay::new(Glyphs::Letters).render(emu.grid());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 1 + STRINGS);
        assert_eq!(
            lines[0],
            "  | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |10 |11 |"
        );
        assert_eq!(
            lines[1],
            "0 |- -|-R-|- -|- -|- -|- -|- -|- -|- -|- -|- -|"
        );
        assert_eq!(
            lines[2],
            "1 |- -|- -|- -|- -|- -|- -|- -|- -|- -|- -|- -|"
        );
    }
}
