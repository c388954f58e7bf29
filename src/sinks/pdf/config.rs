use crate::sinks::pdf::fonts::StandardFont;
use crate::sinks::pdf::layout::{Layout, PageGeometry, PageNumbering, Stroke, TextStyle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Horizontal placement of header, footer and page-number text.
///
/// `Outer` and `Inner` alternate with page parity so that text sits on the outside (or
/// binding side) of a printed, double-sided notebook.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug, Default)]
pub enum Position {
    Left,
    #[default]
    Centre,
    Right,
    Outer,
    Inner,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Position::Left => "Left",
            Position::Centre => "Centre",
            Position::Right => "Right",
            Position::Outer => "Outer (alternating)",
            Position::Inner => "Inner (alternating)",
        };
        write!(f, "{name}")
    }
}

impl Position {
    pub fn all() -> &'static [Position] {
        &[
            Position::Centre,
            Position::Outer,
            Position::Inner,
            Position::Left,
            Position::Right,
        ]
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug, Default)]
pub enum PageNumberStyle {
    #[default]
    Arabic,
    RomanLower,
    RomanUpper,
}

impl fmt::Display for PageNumberStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageNumberStyle::Arabic => "Arabic (1, 2, 3)",
            PageNumberStyle::RomanLower => "Roman (i, ii, iii)",
            PageNumberStyle::RomanUpper => "Roman (I, II, III)",
        };
        write!(f, "{name}")
    }
}

impl PageNumberStyle {
    pub fn all() -> &'static [PageNumberStyle] {
        &[
            PageNumberStyle::Arabic,
            PageNumberStyle::RomanLower,
            PageNumberStyle::RomanUpper,
        ]
    }
}

/// Layout settings that can't produce a sensible page
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("`{field}` must be between 0 and 1 (got {value})")]
    GreyOutOfRange { field: &'static str, value: f32 },

    #[error("margins leave no room for text: usable width is {width_mm} mm")]
    NoWidth { width_mm: f32 },

    #[error(
        "margins, header and footer leave no room for ruled lines: body height is {height_mm} mm"
    )]
    NoBody { height_mm: f32 },
}

/// PDF output configuration.
///
/// Lengths are in millimetres, the unit the ruling is specified in. Font sizes and stroke
/// thicknesses are in points, as is usual for type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PDF {
    /// Output PDF file path
    pub outfile: PathBuf,
    /// Title written into the document properties
    pub title: String,
    /// Page width in millimetres
    pub page_width_mm: f32,
    /// Page height in millimetres
    pub page_height_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    /// Height of the band at the top of each page holding the topic title
    pub header_height_mm: f32,
    /// Height of the band at the bottom of each page holding the footer
    pub footer_height_mm: f32,
    /// Vertical distance between ruled lines
    pub line_spacing_mm: f32,
    pub font_header: StandardFont,
    pub font_footer: StandardFont,
    pub font_size_header_pt: f32,
    pub font_size_footer_pt: f32,
    /// Header text; supports `{topic}`, `{n}`, `{total}`, `{topic_page}` and `{topic_pages}`
    pub header_template: String,
    /// Footer text; same placeholders as the header
    pub footer_template: String,
    pub header_position: Position,
    pub footer_position: Position,
    /// Print the topic in lower case in the footer
    pub footer_lowercase: bool,
    /// Print the running page number in the footer band
    pub footer_page_numbers: bool,
    pub page_number_style: PageNumberStyle,
    pub page_number_position: Position,
    /// Grey level (0 = black, 1 = white) of the header and footer separators
    pub rule_grey: f32,
    pub rule_thickness_pt: f32,
    /// Grey level of the ruled body lines
    pub ruling_grey: f32,
    pub ruling_thickness_pt: f32,
    /// Grey level of header and footer text
    pub text_grey: f32,
    /// Add a bookmark per topic to the PDF outline
    pub bookmarks: bool,
}

impl Default for PDF {
    fn default() -> Self {
        PDF {
            outfile: PathBuf::from("notebook.pdf"),
            title: "Notebook".to_string(),
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 5.0,
            margin_left_mm: 10.0,
            margin_right_mm: 10.0,
            header_height_mm: 10.0,
            footer_height_mm: 10.0,
            line_spacing_mm: 7.0,
            font_header: StandardFont::HelveticaBold,
            font_footer: StandardFont::HelveticaOblique,
            font_size_header_pt: 14.0,
            font_size_footer_pt: 10.0,
            header_template: "{topic}".to_string(),
            footer_template: "{topic}".to_string(),
            header_position: Position::Centre,
            footer_position: Position::Centre,
            footer_lowercase: false,
            footer_page_numbers: false,
            page_number_style: PageNumberStyle::Arabic,
            page_number_position: Position::Outer,
            rule_grey: 0.25,
            rule_thickness_pt: 0.75,
            ruling_grey: 0.75,
            ruling_thickness_pt: 0.25,
            text_grey: 0.0,
            bookmarks: true,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn grey(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::GreyOutOfRange { field, value })
    }
}

impl PDF {
    /// Check the settings and turn them into the page layout used by the generator
    pub fn layout(&self) -> Result<Layout, ConfigError> {
        let page_width = positive("page_width_mm", self.page_width_mm)?;
        let page_height = positive("page_height_mm", self.page_height_mm)?;
        let margin_top = non_negative("margin_top_mm", self.margin_top_mm)?;
        let margin_bottom = non_negative("margin_bottom_mm", self.margin_bottom_mm)?;
        let margin_left = non_negative("margin_left_mm", self.margin_left_mm)?;
        let margin_right = non_negative("margin_right_mm", self.margin_right_mm)?;
        let header_height = non_negative("header_height_mm", self.header_height_mm)?;
        let footer_height = non_negative("footer_height_mm", self.footer_height_mm)?;
        let line_spacing = positive("line_spacing_mm", self.line_spacing_mm)?;

        let width_mm = page_width - margin_left - margin_right;
        if width_mm <= 0.0 {
            return Err(ConfigError::NoWidth { width_mm });
        }
        let height_mm = page_height - margin_top - header_height - footer_height - margin_bottom;
        if height_mm <= 0.0 {
            return Err(ConfigError::NoBody { height_mm });
        }

        let geometry = PageGeometry::new(
            (page_width, page_height),
            (margin_top, margin_right, margin_bottom, margin_left),
            header_height,
            footer_height,
            line_spacing,
        );

        let header = TextStyle {
            font: self.font_header,
            size: positive("font_size_header_pt", self.font_size_header_pt)?,
            grey: grey("text_grey", self.text_grey)?,
            template: self.header_template.clone(),
            position: self.header_position,
        };
        let footer = TextStyle {
            font: self.font_footer,
            size: positive("font_size_footer_pt", self.font_size_footer_pt)?,
            grey: header.grey,
            template: self.footer_template.clone(),
            position: self.footer_position,
        };

        let page_numbers = self.footer_page_numbers.then_some(PageNumbering {
            style: self.page_number_style,
            position: self.page_number_position,
        });

        Ok(Layout {
            geometry,
            header,
            footer,
            footer_lowercase: self.footer_lowercase,
            page_numbers,
            rule: Stroke {
                grey: grey("rule_grey", self.rule_grey)?,
                thickness: non_negative("rule_thickness_pt", self.rule_thickness_pt)?,
            },
            ruling: Stroke {
                grey: grey("ruling_grey", self.ruling_grey)?,
                thickness: non_negative("ruling_thickness_pt", self.ruling_thickness_pt)?,
            },
            title: self.title.clone(),
            bookmarks: self.bookmarks,
        })
    }
}

/// Statistics from rendering a PDF, used for user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Number of topics that got at least one page
    pub topic_count: usize,
    /// Number of topics skipped because they asked for zero pages
    pub skipped_topics: usize,
}
