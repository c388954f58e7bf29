//! The standard PDF fonts used for headers and footers.
//!
//! Every PDF viewer ships Helvetica and Courier, so the notebook embeds no font files.
//! The catch is that these fonts only cover the Windows-1252 ("WinAnsi") repertoire:
//! text is encoded into that single-byte set before it's shown, and anything that doesn't
//! fit is replaced with `?` so the output stays well-formed.
//!
//! Glyph widths come from the Adobe font metrics and are needed to centre or
//! right-align text.

use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Debug)]
pub enum StandardFont {
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
    #[serde(rename = "Helvetica-Oblique")]
    HelveticaOblique,
    #[serde(rename = "Helvetica-BoldOblique")]
    HelveticaBoldOblique,
    #[serde(rename = "Courier")]
    Courier,
    #[serde(rename = "Courier-Bold")]
    CourierBold,
    #[serde(rename = "Courier-Oblique")]
    CourierOblique,
    #[serde(rename = "Courier-BoldOblique")]
    CourierBoldOblique,
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_font())
    }
}

/// Widths of WinAnsi codes 32..=126 for Helvetica and Helvetica-Oblique, in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Widths of WinAnsi codes 32..=126 for Helvetica-Bold and Helvetica-BoldOblique
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

impl StandardFont {
    pub fn all() -> &'static [StandardFont] {
        &[
            StandardFont::Helvetica,
            StandardFont::HelveticaBold,
            StandardFont::HelveticaOblique,
            StandardFont::HelveticaBoldOblique,
            StandardFont::Courier,
            StandardFont::CourierBold,
            StandardFont::CourierOblique,
            StandardFont::CourierBoldOblique,
        ]
    }

    /// The PostScript name written as the font's `/BaseFont`
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// The name the font is registered under in each page's resource dictionary
    pub fn resource_name(&self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"F1",
            StandardFont::HelveticaBold => b"F2",
            StandardFont::HelveticaOblique => b"F3",
            StandardFont::HelveticaBoldOblique => b"F4",
            StandardFont::Courier => b"F5",
            StandardFont::CourierBold => b"F6",
            StandardFont::CourierOblique => b"F7",
            StandardFont::CourierBoldOblique => b"F8",
        }
    }

    fn is_courier(&self) -> bool {
        matches!(
            self,
            StandardFont::Courier
                | StandardFont::CourierBold
                | StandardFont::CourierOblique
                | StandardFont::CourierBoldOblique
        )
    }

    /// Advance width of one encoded byte, in 1/1000 em
    fn glyph_width(&self, code: u8) -> u16 {
        if self.is_courier() {
            return 600;
        }
        let table = match self {
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => {
                &HELVETICA_BOLD_WIDTHS
            }
            _ => &HELVETICA_WIDTHS,
        };
        match code {
            32..=126 => table[(code - 32) as usize],
            // accented Latin letters are, near enough, as wide as their base glyphs
            _ => 556,
        }
    }

    /// Height of capital letters above the baseline, in points
    pub fn cap_height(&self, size: f32) -> f32 {
        let units = if self.is_courier() { 562.0 } else { 718.0 };
        size * units / 1000.0
    }
}

/// Encode text into WinAnsi bytes, substituting `?` for anything the standard fonts
/// can't show. Control characters (tabs, newlines) become spaces.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        if c.is_control() {
            bytes.push(b' ');
        } else if c.is_ascii() {
            bytes.push(c as u8);
        } else {
            let (encoded, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
            match encoded.as_ref() {
                [byte] if !unmappable => bytes.push(*byte),
                _ => bytes.push(b'?'),
            }
        }
    }
    bytes
}

/// Width of `text` when set in `font` at `size` points
pub fn width_of_text(text: &str, font: StandardFont, size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|code| font.glyph_width(code) as u32)
        .sum();
    units as f32 * size / 1000.0
}
