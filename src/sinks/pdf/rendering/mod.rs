//! PDF serialisation.
//!
//! Writes a planned [`Document`] out with `pdf-writer`. Object IDs are allocated up
//! front in a fixed order (catalog, page tree, info, fonts, then a page and a content
//! stream per page, then the outline) and nothing time- or environment-dependent is
//! written, so identical documents serialise to identical bytes.
//!
//! Each page's content stream draws, in order: header separator, ruled lines, footer
//! separator, header text, footer text and the optional page number.

mod outline;

use crate::sinks::pdf::fonts::{encode_win_ansi, StandardFont};
use crate::sinks::pdf::generate::{Document, PagePosition, Rule};
use crate::sinks::pdf::header_footer::TextSpan;
use crate::sinks::pdf::layout::Layout;
use indicatif::ProgressBar;
use log::trace;
use pdf_writer::types::LineCapStyle;
use pdf_writer::{Content, Finish, Name, Pdf, Ref, Str, TextStr};
use std::collections::BTreeSet;

/// Serialise the document to PDF bytes, ticking `progress` once per page
pub fn write_pdf(doc: &Document, layout: &Layout, progress: &ProgressBar) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let info_id = alloc.bump();

    let fonts: Vec<(StandardFont, Ref)> = [layout.header.font, layout.footer.font]
        .into_iter()
        .collect::<BTreeSet<StandardFont>>()
        .into_iter()
        .map(|font| (font, alloc.bump()))
        .collect();

    // (page, content stream) for every page
    let page_ids: Vec<(Ref, Ref)> = doc
        .pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();

    let outline_id = if layout.bookmarks {
        let page_refs: Vec<Ref> = page_ids.iter().map(|(page, _)| *page).collect();
        outline::write_outline(&mut pdf, &mut alloc, doc, &page_refs)
    } else {
        None
    };

    let mut catalog = pdf.catalog(catalog_id);
    catalog.pages(page_tree_id);
    if let Some(outline_id) = outline_id {
        catalog.outlines(outline_id);
    }
    catalog.finish();

    pdf.document_info(info_id)
        .title(TextStr(&layout.title))
        .creator(TextStr(concat!(
            "topic-notebook v",
            env!("CARGO_PKG_VERSION")
        )));

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page, _)| *page))
        .count(page_ids.len() as i32);

    for (font, id) in fonts.iter() {
        pdf.type1_font(*id)
            .base_font(Name(font.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let (width, height) = doc.page_size;
    for (plan, (page_id, content_id)) in doc.pages.iter().zip(page_ids.iter()) {
        if matches!(plan.position, PagePosition::First | PagePosition::Only) {
            progress.set_message(plan.topic.clone());
        }
        trace!(
            "Writing page {} ({:?}, page {} of its topic)",
            plan.number,
            plan.topic,
            plan.topic_page
        );

        let mut page = pdf.page(*page_id);
        page.media_box(pdf_writer::Rect::new(0.0, 0.0, width, height));
        page.parent(page_tree_id);
        page.contents(*content_id);
        page.resources()
            .fonts()
            .pairs(fonts.iter().map(|(font, id)| (Name(font.resource_name()), *id)));
        page.finish();

        let mut content = Content::new();
        draw_rule(&mut content, &plan.header_rule);
        for line in plan.ruling.iter() {
            if !covered_by(line, &plan.footer_rule) {
                draw_rule(&mut content, line);
            }
        }
        draw_rule(&mut content, &plan.footer_rule);
        draw_text(&mut content, &plan.header);
        draw_text(&mut content, &plan.footer);
        if let Some(number) = &plan.page_number {
            draw_text(&mut content, number);
        }
        pdf.stream(*content_id, &content.finish());

        progress.inc(1);
    }

    pdf.finish()
}

/// A ruled line that lands on a drawn separator is hidden by it
fn covered_by(line: &Rule, separator: &Rule) -> bool {
    separator.stroke.thickness > 0.0 && (line.y - separator.y).abs() < 0.01
}

fn draw_rule(content: &mut Content, rule: &Rule) {
    if rule.stroke.thickness <= 0.0 {
        return;
    }
    content
        .set_stroke_gray(rule.stroke.grey)
        .set_line_cap(LineCapStyle::ButtCap)
        .set_line_width(rule.stroke.thickness)
        .move_to(rule.x1, rule.y)
        .line_to(rule.x2, rule.y)
        .stroke();
}

fn draw_text(content: &mut Content, span: &TextSpan) {
    if span.text.is_empty() {
        return;
    }
    let text = encode_win_ansi(&span.text);
    content
        .begin_text()
        .set_fill_gray(span.style.grey)
        .set_font(Name(span.style.font.resource_name()), span.style.size)
        .next_line(span.coords.0, span.coords.1)
        .show(Str(&text))
        .end_text();
}
