//! Command-line argument definitions for the barcodekit CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the symbology, the output file and its
//! format, an optional text label, configuration, and logging verbosity.

use clap::{Parser, ValueEnum};

use barcodekit::{
    ImageFormat,
    draw::{Alignment, Position},
};

/// Command-line arguments for the barcodekit tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Module data: '1' for a bar, '0' for a space. With --matrix, rows are
    /// separated by ';'.
    #[arg(help = "Module data to render")]
    pub data: String,

    /// Path to the output image
    #[arg(short, long, default_value = "out.png")]
    pub output: String,

    /// Treat the data as a module matrix instead of a row of bars
    #[arg(long)]
    pub matrix: bool,

    /// Pixels per module, overriding the configuration file
    #[arg(short, long)]
    pub scale: Option<i32>,

    /// Text of a label drawn next to the symbol
    #[arg(long)]
    pub label: Option<String>,

    /// Side of the symbol the label is drawn on
    #[arg(long, value_enum, default_value_t = LabelSide::Bottom)]
    pub label_position: LabelSide,

    /// Alignment of the label along its side
    #[arg(long, value_enum, default_value_t = LabelAlign::Center)]
    pub label_alignment: LabelAlign,

    /// Output format; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl From<LabelSide> for Position {
    fn from(side: LabelSide) -> Self {
        match side {
            LabelSide::Top => Position::Top,
            LabelSide::Right => Position::Right,
            LabelSide::Bottom => Position::Bottom,
            LabelSide::Left => Position::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelAlign {
    Left,
    Center,
    Right,
}

impl From<LabelAlign> for Alignment {
    fn from(align: LabelAlign) -> Self {
        match align {
            LabelAlign::Left => Alignment::Left,
            LabelAlign::Center => Alignment::Center,
            LabelAlign::Right => Alignment::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Png,
    #[value(alias = "jpg")]
    Jpeg,
    Gif,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Gif => ImageFormat::Gif,
        }
    }
}
