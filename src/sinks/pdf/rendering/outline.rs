//! PDF bookmarks: one flat outline entry per topic, pointing at its first page.

use crate::sinks::pdf::generate::Document;
use pdf_writer::{Finish, Pdf, Ref, TextStr};

/// Write the outline for `doc`, returning its ID, or `None` when there is nothing to
/// bookmark. `pages` holds the object ID of every page, in document order.
pub fn write_outline(pdf: &mut Pdf, alloc: &mut Ref, doc: &Document, pages: &[Ref]) -> Option<Ref> {
    let last = doc.sections.last()?;
    if pages.len() <= last.first_page {
        return None;
    }

    let outline_id = alloc.bump();
    let item_ids: Vec<Ref> = doc.sections.iter().map(|_| alloc.bump()).collect();

    let mut outline = pdf.outline(outline_id);
    outline
        .first(item_ids[0])
        .last(item_ids[item_ids.len() - 1])
        .count(item_ids.len() as i32);
    outline.finish();

    for (i, section) in doc.sections.iter().enumerate() {
        let mut item = pdf.outline_item(item_ids[i]);
        item.title(TextStr(&section.title)).parent(outline_id);
        if i > 0 {
            item.prev(item_ids[i - 1]);
        }
        if let Some(next) = item_ids.get(i + 1) {
            item.next(*next);
        }
        item.dest().page(pages[section.first_page]).fit();
        item.finish();
    }

    Some(outline_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::pdf::generate::Section;

    fn document(sections: Vec<Section>) -> Document {
        Document {
            page_size: (595.0, 842.0),
            pages: Vec::new(),
            sections,
        }
    }

    #[test]
    fn nothing_to_bookmark_writes_nothing() {
        let mut pdf = Pdf::new();
        let mut alloc = Ref::new(10);
        assert_eq!(write_outline(&mut pdf, &mut alloc, &document(Vec::new()), &[]), None);
        // no IDs were used up
        assert_eq!(alloc, Ref::new(10));
    }

    #[test]
    fn one_item_per_section() {
        let sections = vec![
            Section {
                title: "Variables".to_string(),
                first_page: 0,
            },
            Section {
                title: "Lists".to_string(),
                first_page: 2,
            },
        ];
        let pages = vec![Ref::new(1), Ref::new(2), Ref::new(3)];
        let mut pdf = Pdf::new();
        let mut alloc = Ref::new(10);
        let outline = write_outline(&mut pdf, &mut alloc, &document(sections), &pages);
        assert_eq!(outline, Some(Ref::new(10)));
        // outline + two items
        assert_eq!(alloc, Ref::new(13));

        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Prev 11 0 R"));
        assert!(text.contains("/Next 12 0 R"));
    }
}
