use std::fmt::Write;

use super::{Grid, PixelColor, MATRIX_SIZE};
use crate::emu::fretboard::FretboardDisplay;

/// A rendering strategy for the matrix. Renders are pure: the same grid
/// always gives the same text.
pub trait MatrixDisplay {
    fn render(&self, grid: &Grid) -> String;
}

impl<D: MatrixDisplay + ?Sized> MatrixDisplay for Box<D> {
    fn render(&self, grid: &Grid) -> String {
        (**self).render(grid)
    }
}

const ANSI_GREEN: &str = "\x1b[42m \x1b[0m";
const ANSI_RED: &str = "\x1b[41m \x1b[0m";
const ANSI_YELLOW: &str = "\x1b[43m \x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyphs {
    /// Coloured background blocks.
    Ansi,
    Letters,
}

impl Glyphs {
    pub fn glyph(self, color: PixelColor) -> &'static str {
        match (self, color) {
            (_, PixelColor::Off) => " ",
            (Glyphs::Ansi, PixelColor::Green) => ANSI_GREEN,
            (Glyphs::Ansi, PixelColor::Red) => ANSI_RED,
            (Glyphs::Ansi, PixelColor::Yellow) => ANSI_YELLOW,
            (Glyphs::Letters, PixelColor::Green) => "G",
            (Glyphs::Letters, PixelColor::Red) => "R",
            (Glyphs::Letters, PixelColor::Yellow) => "Y",
        }
    }
}

/// Width of `text` as it appears on a terminal, not counting ANSI CSI
/// escape sequences.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // parameters run until the final byte in @..=~
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

/// Pads `text` with trailing spaces up to `width` visible columns.
pub fn pad_visible(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(text));
    format!("{text}{}", " ".repeat(fill))
}

/// One line per row, one glyph per LED.
#[derive(Debug)]
pub struct PlainDisplay {
    glyphs: Glyphs,
}

impl PlainDisplay {
    pub fn new(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }
}

impl MatrixDisplay for PlainDisplay {
    fn render(&self, grid: &Grid) -> String {
        let mut out = String::new();
        grid.rows().iter().for_each(|row| {
            row.iter().for_each(|pix| out.push_str(self.glyphs.glyph(*pix)));
            out.push('\n');
        });
        out
    }
}

const CELL_WIDTH: usize = 1;

/// The grid inside a bordered table, headed by column indices.
#[derive(Debug)]
pub struct TableDisplay {
    glyphs: Glyphs,
}

impl TableDisplay {
    pub fn new(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }

    fn border(out: &mut String, fill: char) {
        out.push('+');
        for _ in 0..MATRIX_SIZE {
            out.push(fill);
            out.extend(std::iter::repeat(fill).take(CELL_WIDTH));
            out.push(fill);
            out.push('+');
        }
        out.push('\n');
    }

    fn line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
        out.push('|');
        for cell in cells {
            let _ = write!(out, " {} |", pad_visible(cell, CELL_WIDTH));
        }
        out.push('\n');
    }
}

impl MatrixDisplay for TableDisplay {
    fn render(&self, grid: &Grid) -> String {
        let mut out = String::new();
        let header: Vec<String> = (0..MATRIX_SIZE).map(|col| col.to_string()).collect();

        Self::border(&mut out, '-');
        Self::line(&mut out, header.iter().map(String::as_str));
        Self::border(&mut out, '=');
        for row in grid.rows() {
            Self::line(&mut out, row.iter().map(|pix| self.glyphs.glyph(*pix)));
        }
        Self::border(&mut out, '-');
        out
    }
}

/// Which display to drive the matrix with, chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Plain,
    Table,
    Fretboard,
}

impl DisplayKind {
    pub fn build(self, glyphs: Glyphs) -> Box<dyn MatrixDisplay> {
        match self {
            DisplayKind::Plain => Box::new(PlainDisplay::new(glyphs)),
            DisplayKind::Table => Box::new(TableDisplay::new(glyphs)),
            DisplayKind::Fretboard => Box::new(FretboardDisplay::new(glyphs)),
        }
    }
}
