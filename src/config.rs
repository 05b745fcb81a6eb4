use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::bus::MATRIX_ADDRESS;
use crate::demo::Pattern;
use crate::emu::display::{DisplayKind, Glyphs};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DisplayArg {
    Plain,
    Table,
    Fretboard,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GlyphArg {
    Ansi,
    Letters,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PatternArg {
    Sweep,
    Fill,
    Random,
}

/// Bi-colour 8x8 LED matrix emulator drawing to the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// How to draw the matrix
    #[arg(short, long, value_enum, default_value = "plain")]
    display: DisplayArg,

    /// Coloured blocks or G/R/Y letters
    #[arg(short, long, value_enum, default_value = "ansi")]
    glyphs: GlyphArg,

    /// Bus address of the device
    #[arg(long, default_value_t = MATRIX_ADDRESS)]
    address: u16,

    /// Bus number
    #[arg(long, default_value_t = 0)]
    bus: u32,

    /// Demo pattern to play when no trace file is given
    #[arg(short, long, value_enum, default_value = "sweep")]
    pattern: PatternArg,

    /// Number of writes for the random pattern
    #[arg(long, default_value_t = 64)]
    count: usize,

    /// Seed for the random pattern
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between writes, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Wait for a key press after every write
    #[arg(short, long)]
    step: bool,

    /// Only log bus writes instead of drawing the matrix
    #[arg(long)]
    log_only: bool,

    /// Register trace to replay: (register, value) byte pairs
    #[arg(value_name = "FILE")]
    trace: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Config {
    pub display: DisplayKind,
    pub glyphs: Glyphs,
    pub address: u16,
    pub busnum: u32,
    pub pattern: Pattern,
    pub count: usize,
    pub seed: Option<u64>,
    pub delay: Duration,
    pub step: bool,
    pub log_only: bool,
    pub trace_path: Option<PathBuf>,
}

impl Config {
    pub fn build() -> Result<Self, Box<dyn Error>> {
        Self::from_args(Args::parse())
    }

    fn from_args(args: Args) -> Result<Self, Box<dyn Error>> {
        if let Some(path) = &args.trace {
            if !path.is_file() {
                return Err(format!("trace file not found: {}", path.display()).into());
            }
        }

        Ok(Self {
            display: match args.display {
                DisplayArg::Plain => DisplayKind::Plain,
                DisplayArg::Table => DisplayKind::Table,
                DisplayArg::Fretboard => DisplayKind::Fretboard,
            },
            glyphs: match args.glyphs {
                GlyphArg::Ansi => Glyphs::Ansi,
                GlyphArg::Letters => Glyphs::Letters,
            },
            address: args.address,
            busnum: args.bus,
            pattern: match args.pattern {
                PatternArg::Sweep => Pattern::Sweep,
                PatternArg::Fill => Pattern::Fill,
                PatternArg::Random => Pattern::Random,
            },
            count: args.count,
            seed: args.seed,
            delay: Duration::from_millis(args.delay_ms),
            step: args.step,
            log_only: args.log_only,
            trace_path: args.trace,
        })
    }
}
