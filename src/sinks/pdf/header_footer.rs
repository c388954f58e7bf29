//! Header and footer text.
//!
//! Both bands are filled from templates. Templates support placeholders:
//! - `{topic}` - the topic the page belongs to
//! - `{n}` - running page number (formatted per page_number_style)
//! - `{total}` - total page count of the notebook
//! - `{topic_page}` - page number within the topic
//! - `{topic_pages}` - number of pages the topic spans
//!
//! Text is placed inside its band according to a [`Position`] and vertically centred on
//! the capital height of its font.

use crate::sinks::pdf::config::{PageNumberStyle, Position};
use crate::sinks::pdf::fonts::width_of_text;
use crate::sinks::pdf::layout::{Rect, TextStyle};

/// Where a page sits in the notebook, used to fill in templates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageContext<'t> {
    pub topic: &'t str,
    /// 1-based page number in the notebook
    pub number: usize,
    /// Total pages in the notebook
    pub total: usize,
    /// 1-based page number within the topic
    pub topic_page: usize,
    pub topic_pages: usize,
}

/// A run of text ready to be drawn, `coords` being the left end of its baseline
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub style: TextStyle,
    pub coords: (f32, f32),
}

/// Convert a number to Roman numerals.
fn to_roman(mut n: usize) -> String {
    if n == 0 {
        return n.to_string();
    }

    let numerals = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];

    let mut result = String::new();
    for (value, numeral) in numerals {
        while n >= value {
            result.push_str(numeral);
            n -= value;
        }
    }
    result
}

/// Format a page number according to the specified style.
pub fn format_page_number(n: usize, style: PageNumberStyle) -> String {
    match style {
        PageNumberStyle::Arabic => n.to_string(),
        PageNumberStyle::RomanLower => to_roman(n),
        PageNumberStyle::RomanUpper => to_roman(n).to_uppercase(),
    }
}

const PLACEHOLDERS: &[&str] = &["{topic_pages}", "{topic_page}", "{topic}", "{total}", "{n}"];

/// Expand a template string with the page's placeholder values.
///
/// Placeholders are matched in a single pass over the template, so braces inside the
/// substituted topic are copied as they are.
pub fn expand_template(
    template: &str,
    topic: &str,
    context: &PageContext,
    style: PageNumberStyle,
) -> String {
    let mut expanded = String::with_capacity(template.len() + topic.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        expanded.push_str(&rest[..start]);
        let tail = &rest[start..];
        match PLACEHOLDERS.iter().find(|p| tail.starts_with(**p)) {
            Some(&placeholder) => {
                match placeholder {
                    "{topic}" => expanded.push_str(topic),
                    "{n}" => expanded.push_str(&format_page_number(context.number, style)),
                    "{total}" => expanded.push_str(&format_page_number(context.total, style)),
                    "{topic_page}" => {
                        expanded.push_str(&format_page_number(context.topic_page, style))
                    }
                    _ => expanded.push_str(&format_page_number(context.topic_pages, style)),
                }
                rest = &tail[placeholder.len()..];
            }
            None => {
                expanded.push('{');
                rest = &tail[1..];
            }
        }
    }
    expanded.push_str(rest);
    expanded
}

/// Calculate the x-coordinate for text based on position and page parity.
pub fn calculate_x_position(position: Position, page_index: usize, band: &Rect, text_width: f32) -> f32 {
    // even indices are right-hand (recto) pages in a bound notebook
    let is_recto = page_index % 2 == 0;

    match position {
        Position::Outer => {
            if is_recto {
                band.x2 - text_width
            } else {
                band.x1
            }
        }
        Position::Inner => {
            if is_recto {
                band.x1
            } else {
                band.x2 - text_width
            }
        }
        Position::Centre => band.x1 + (band.width() - text_width) / 2.0,
        Position::Left => band.x1,
        Position::Right => band.x2 - text_width,
    }
}

/// Place `text` inside `band` using `style`'s font and position
pub fn place_text(
    text: String,
    style: &TextStyle,
    position: Position,
    page_index: usize,
    band: &Rect,
) -> TextSpan {
    let width = width_of_text(&text, style.font, style.size);
    let x = calculate_x_position(position, page_index, band, width);
    let y = band.y1 + (band.height() - style.font.cap_height(style.size)) / 2.0;

    TextSpan {
        text,
        style: TextStyle {
            position,
            ..style.clone()
        },
        coords: (x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::pdf::fonts::StandardFont;

    fn context(topic: &str) -> PageContext<'_> {
        PageContext {
            topic,
            number: 7,
            total: 12,
            topic_page: 2,
            topic_pages: 3,
        }
    }

    fn band() -> Rect {
        Rect {
            x1: 10.0,
            y1: 20.0,
            x2: 110.0,
            y2: 40.0,
        }
    }

    #[test]
    fn can_convert_to_roman_numerals() {
        assert_eq!(to_roman(1), "i");
        assert_eq!(to_roman(4), "iv");
        assert_eq!(to_roman(9), "ix");
        assert_eq!(to_roman(14), "xiv");
        assert_eq!(to_roman(42), "xlii");
        assert_eq!(to_roman(99), "xcix");
        assert_eq!(to_roman(399), "cccxcix");
        assert_eq!(to_roman(1984), "mcmlxxxiv");
        assert_eq!(to_roman(0), "0");
    }

    #[test]
    fn can_format_page_numbers() {
        assert_eq!(format_page_number(42, PageNumberStyle::Arabic), "42");
        assert_eq!(format_page_number(42, PageNumberStyle::RomanLower), "xlii");
        assert_eq!(format_page_number(42, PageNumberStyle::RomanUpper), "XLII");
    }

    #[test]
    fn can_expand_template() {
        let ctx = context("Lists");
        let result = expand_template(
            "{topic} ({topic_page}/{topic_pages}) - page {n} of {total}",
            ctx.topic,
            &ctx,
            PageNumberStyle::Arabic,
        );
        assert_eq!(result, "Lists (2/3) - page 7 of 12");
    }

    #[test]
    fn can_expand_template_with_roman() {
        let ctx = context("Lists");
        let result = expand_template("- {n} -", ctx.topic, &ctx, PageNumberStyle::RomanUpper);
        assert_eq!(result, "- VII -");
    }

    #[test]
    fn template_without_placeholders_is_verbatim() {
        let ctx = context("Lists");
        assert_eq!(
            expand_template("My notes", ctx.topic, &ctx, PageNumberStyle::Arabic),
            "My notes"
        );
    }

    #[test]
    fn placeholders_inside_the_topic_are_kept() {
        let ctx = context("Exercise {n} of {total}");
        let result = expand_template("{topic} - {n}", ctx.topic, &ctx, PageNumberStyle::Arabic);
        assert_eq!(result, "Exercise {n} of {total} - 7");
    }

    #[test]
    fn unknown_braces_are_left_alone() {
        let ctx = context("Sets");
        let result = expand_template("{topic} {x} {", ctx.topic, &ctx, PageNumberStyle::Arabic);
        assert_eq!(result, "Sets {x} {");
    }

    #[test]
    fn outer_and_inner_alternate_with_parity() {
        let band = band();
        assert_eq!(calculate_x_position(Position::Outer, 0, &band, 20.0), 90.0);
        assert_eq!(calculate_x_position(Position::Outer, 1, &band, 20.0), 10.0);
        assert_eq!(calculate_x_position(Position::Inner, 0, &band, 20.0), 10.0);
        assert_eq!(calculate_x_position(Position::Inner, 1, &band, 20.0), 90.0);
        assert_eq!(calculate_x_position(Position::Centre, 3, &band, 20.0), 50.0);
        assert_eq!(calculate_x_position(Position::Left, 3, &band, 20.0), 10.0);
        assert_eq!(calculate_x_position(Position::Right, 3, &band, 20.0), 90.0);
    }

    #[test]
    fn placed_text_sits_inside_its_band() {
        let style = TextStyle {
            font: StandardFont::HelveticaBold,
            size: 14.0,
            grey: 0.0,
            template: "{topic}".to_string(),
            position: Position::Centre,
        };
        let band = band();
        let span = place_text("Variables".to_string(), &style, Position::Centre, 0, &band);
        let width = width_of_text("Variables", StandardFont::HelveticaBold, 14.0);
        assert!((span.coords.0 - (60.0 - width / 2.0)).abs() < 1e-3);
        assert!(span.coords.1 > band.y1);
        assert!(span.coords.1 + StandardFont::HelveticaBold.cap_height(14.0) < band.y2);
    }
}
