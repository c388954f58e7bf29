//! Page geometry shared by every page of the notebook.
//!
//! Settings are given in millimetres measured from the top-left corner of the page, the
//! way a ruler would be laid on paper. PDF coordinates are in points measured up from the
//! bottom-left corner, so everything is converted once here and the rest of the crate
//! works in PDF space.
//!
//! From top to bottom a page is: top margin, header band, header separator, ruled body,
//! footer separator, footer band, bottom margin. The body holds
//! `floor(body height / line spacing)` ruled lines, the first one a line spacing below the
//! header separator, so the last one never reaches past the footer separator.

use crate::sinks::pdf::config::{PageNumberStyle, Position};
use crate::sinks::pdf::fonts::StandardFont;

pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// How many ruled lines fit in a body of the given height
pub fn ruling_line_count(body_height_mm: f32, line_spacing_mm: f32) -> usize {
    if body_height_mm <= 0.0 || line_spacing_mm <= 0.0 {
        return 0;
    }
    (body_height_mm / line_spacing_mm).floor() as usize
}

/// Rectangle in PDF points, `x1 < x2` and `y1 < y2`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageGeometry {
    /// Page size in points
    pub size: (f32, f32),
    /// Band at the top of the page holding the header text
    pub header_band: Rect,
    /// Band at the bottom of the page holding the footer text
    pub footer_band: Rect,
    /// Space between the separators available for ruled lines
    pub body: Rect,
    /// Height of the body in millimetres, the measure the ruling is counted in
    pub body_height_mm: f32,
    /// Heights (in points) of every ruled line, top to bottom
    pub ruling: Vec<f32>,
}

impl PageGeometry {
    /// Lay out a page. `margins` are top, right, bottom, left, like CSS.
    pub fn new(
        (width_mm, height_mm): (f32, f32),
        (top, right, bottom, left): (f32, f32, f32, f32),
        header_height_mm: f32,
        footer_height_mm: f32,
        line_spacing_mm: f32,
    ) -> PageGeometry {
        let width = mm_to_pt(width_mm);
        let height = mm_to_pt(height_mm);
        let x1 = mm_to_pt(left);
        let x2 = width - mm_to_pt(right);

        // distances from the top edge, in mm
        let body_top_mm = top + header_height_mm;
        let body_bottom_mm = height_mm - bottom - footer_height_mm;
        let body_height_mm = body_bottom_mm - body_top_mm;

        let header_band = Rect {
            x1,
            x2,
            y1: height - mm_to_pt(body_top_mm),
            y2: height - mm_to_pt(top),
        };
        let footer_band = Rect {
            x1,
            x2,
            y1: mm_to_pt(bottom),
            y2: mm_to_pt(bottom + footer_height_mm),
        };
        let body = Rect {
            x1,
            x2,
            y1: footer_band.y2,
            y2: header_band.y1,
        };

        let ruling = (1..=ruling_line_count(body_height_mm, line_spacing_mm))
            .map(|i| height - mm_to_pt(body_top_mm + i as f32 * line_spacing_mm))
            // guard against rounding pushing the last line a hair past the separator
            .map(|y| y.max(body.y1))
            .collect();

        PageGeometry {
            size: (width, height),
            header_band,
            footer_band,
            body,
            body_height_mm,
            ruling,
        }
    }

    /// Height of the separator below the header band
    pub fn header_rule_y(&self) -> f32 {
        self.header_band.y1
    }

    /// Height of the separator above the footer band
    pub fn footer_rule_y(&self) -> f32 {
        self.footer_band.y2
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub grey: f32,
    pub thickness: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: StandardFont,
    pub size: f32,
    pub grey: f32,
    pub template: String,
    pub position: Position,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageNumbering {
    pub style: PageNumberStyle,
    pub position: Position,
}

/// Everything the generator needs to plan a page, validated from the [`PDF`] settings.
///
/// [`PDF`]: crate::sinks::pdf::config::PDF
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub geometry: PageGeometry,
    pub header: TextStyle,
    pub footer: TextStyle,
    pub footer_lowercase: bool,
    pub page_numbers: Option<PageNumbering>,
    /// Header and footer separators
    pub rule: Stroke,
    /// Ruled body lines
    pub ruling: Stroke,
    pub title: String,
    pub bookmarks: bool,
}
