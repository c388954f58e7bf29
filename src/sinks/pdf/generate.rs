//! Turning topics into pages.
//!
//! [`generate`] walks the topics once, in order, and plans every page: header text, the
//! two separators, the ruled body lines and the footer text. The result is a plain
//! [`Document`] with no PDF types in it, which [`rendering`](super::rendering) then
//! serialises. Planning is deterministic, so the same topics always give the same
//! document.

use crate::sinks::pdf::header_footer::{expand_template, place_text, PageContext, TextSpan};
use crate::sinks::pdf::layout::{Layout, Stroke};
use crate::source::Topic;
use log::{debug, warn};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("invalid topic list: {0}")]
    InvalidInput(String),
}

/// Where a page falls within its topic's range
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PagePosition {
    /// The topic has a single page
    Only,
    First,
    Interior,
    Last,
}

impl PagePosition {
    fn of(topic_page: usize, topic_pages: usize) -> PagePosition {
        match (topic_page, topic_pages) {
            (_, 1) => PagePosition::Only,
            (1, _) => PagePosition::First,
            (p, n) if p == n => PagePosition::Last,
            _ => PagePosition::Interior,
        }
    }
}

/// A horizontal line from `x1` to `x2` at height `y`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub stroke: Stroke,
}

/// Everything drawn on one page
#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan {
    /// Title of the topic this page belongs to
    pub topic: String,
    /// 1-based page number in the notebook
    pub number: usize,
    /// 1-based page number within the topic
    pub topic_page: usize,
    pub position: PagePosition,
    pub header: TextSpan,
    pub header_rule: Rule,
    pub ruling: Vec<Rule>,
    pub footer_rule: Rule,
    pub footer: TextSpan,
    pub page_number: Option<TextSpan>,
}

/// A topic with at least one page, for the PDF outline
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    /// Index of the section's first page
    pub first_page: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// Page size in points
    pub page_size: (f32, f32),
    pub pages: Vec<PagePlan>,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Plan every page of the notebook.
///
/// Fails only when the topic list itself is unusable: empty, or containing a topic with a
/// blank title. Topics with zero pages are skipped, so a list made only of those yields an
/// empty document.
pub fn generate(topics: &[Topic], layout: &Layout) -> Result<Document, GenerateError> {
    if topics.is_empty() {
        return Err(GenerateError::InvalidInput(
            "no topics to generate pages for".to_string(),
        ));
    }
    if let Some(i) = topics.iter().position(|t| t.title.trim().is_empty()) {
        return Err(GenerateError::InvalidInput(format!(
            "topic #{} has an empty title",
            i + 1
        )));
    }

    let total: usize = topics.iter().map(|t| t.pages as usize).sum();
    let mut pages: Vec<PagePlan> = Vec::with_capacity(total);
    let mut sections: Vec<Section> = Vec::new();

    for topic in topics {
        if topic.pages == 0 {
            warn!("Topic {:?} asks for zero pages, skipping it", topic.title);
            continue;
        }

        let topic_pages = topic.pages as usize;
        sections.push(Section {
            title: topic.title.clone(),
            first_page: pages.len(),
        });

        for topic_page in 1..=topic_pages {
            let context = PageContext {
                topic: &topic.title,
                number: pages.len() + 1,
                total,
                topic_page,
                topic_pages,
            };
            debug!(
                "Adding page {} for topic {:?} ({topic_page}/{topic_pages})",
                context.number, topic.title
            );
            pages.push(plan_page(layout, &context));
        }
    }

    Ok(Document {
        page_size: layout.geometry.size,
        pages,
        sections,
    })
}

fn rule(layout: &Layout, y: f32, stroke: Stroke) -> Rule {
    Rule {
        x1: layout.geometry.body.x1,
        x2: layout.geometry.body.x2,
        y,
        stroke,
    }
}

fn plan_page(layout: &Layout, context: &PageContext) -> PagePlan {
    let geometry = &layout.geometry;
    let page_index = context.number - 1;
    let number_style = layout
        .page_numbers
        .map(|numbering| numbering.style)
        .unwrap_or_default();

    let header_text = expand_template(
        &layout.header.template,
        context.topic,
        context,
        number_style,
    );
    let header = place_text(
        header_text,
        &layout.header,
        layout.header.position,
        page_index,
        &geometry.header_band,
    );

    let footer_topic = if layout.footer_lowercase {
        context.topic.to_lowercase()
    } else {
        context.topic.to_string()
    };
    let footer_text = expand_template(
        &layout.footer.template,
        &footer_topic,
        context,
        number_style,
    );
    let footer = place_text(
        footer_text,
        &layout.footer,
        layout.footer.position,
        page_index,
        &geometry.footer_band,
    );

    let page_number = layout.page_numbers.map(|numbering| {
        place_text(
            expand_template("{n}", context.topic, context, numbering.style),
            &layout.footer,
            numbering.position,
            page_index,
            &geometry.footer_band,
        )
    });

    PagePlan {
        topic: context.topic.to_string(),
        number: context.number,
        topic_page: context.topic_page,
        position: PagePosition::of(context.topic_page, context.topic_pages),
        header,
        header_rule: rule(layout, geometry.header_rule_y(), layout.rule),
        ruling: geometry
            .ruling
            .iter()
            .map(|y| rule(layout, *y, layout.ruling))
            .collect(),
        footer_rule: rule(layout, geometry.footer_rule_y(), layout.rule),
        footer,
        page_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::pdf::config::{PageNumberStyle, PDF};

    fn layout() -> Layout {
        PDF::default().layout().expect("default layout is valid")
    }

    fn titles(document: &Document) -> Vec<&str> {
        document.pages.iter().map(|p| p.topic.as_str()).collect()
    }

    #[test]
    fn topics_expand_into_pages_in_order() {
        let topics = vec![Topic::new("Variables", 2), Topic::new("Lists", 3)];
        let document = generate(&topics, &layout()).expect("can generate");
        assert_eq!(document.pages.len(), 5);
        assert_eq!(
            titles(&document),
            vec!["Variables", "Variables", "Lists", "Lists", "Lists"]
        );
        let numbers: Vec<usize> = document.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn zero_page_topics_contribute_nothing() {
        let topics = vec![Topic::new("Intro", 0), Topic::new("Body", 2)];
        let document = generate(&topics, &layout()).expect("can generate");
        assert_eq!(titles(&document), vec!["Body", "Body"]);
        assert_eq!(
            document.sections,
            vec![Section {
                title: "Body".to_string(),
                first_page: 0,
            }]
        );
    }

    #[test]
    fn empty_topic_list_is_invalid() {
        assert!(matches!(
            generate(&[], &layout()),
            Err(GenerateError::InvalidInput(_))
        ));
    }

    #[test]
    fn blank_titles_are_invalid() {
        let topics = vec![Topic::new("Sets", 1), Topic::new("  ", 1)];
        assert_eq!(
            generate(&topics, &layout()),
            Err(GenerateError::InvalidInput(
                "topic #2 has an empty title".to_string()
            ))
        );
    }

    #[test]
    fn all_zero_page_topics_give_an_empty_document() {
        let topics = vec![Topic::new("A", 0), Topic::new("B", 0)];
        let document = generate(&topics, &layout()).expect("can generate");
        assert!(document.is_empty());
        assert!(document.sections.is_empty());
    }

    #[test]
    fn page_count_is_the_sum_of_topic_pages() {
        let cases: Vec<Vec<u32>> = vec![vec![1], vec![0, 0, 3], vec![4, 0, 1, 2], vec![10, 10]];
        for counts in cases {
            let topics: Vec<Topic> = counts
                .iter()
                .enumerate()
                .map(|(i, n)| Topic::new(format!("Topic {i}"), *n))
                .collect();
            let document = generate(&topics, &layout()).expect("can generate");
            let expected: u32 = counts.iter().sum();
            assert_eq!(document.pages.len(), expected as usize);
        }
    }

    #[test]
    fn title_appears_in_header_and_footer() {
        let topics = vec![Topic::new("Variables", 2), Topic::new("Lists", 1)];
        let document = generate(&topics, &layout()).expect("can generate");
        for page in document.pages.iter() {
            assert!(page.header.text.contains(&page.topic));
            assert!(page.footer.text.contains(&page.topic));
            assert!(page.page_number.is_none());
        }
    }

    #[test]
    fn titles_with_braces_are_printed_verbatim() {
        let topics = vec![
            Topic::new("Exercise {n} of {total}", 1),
            Topic::new("Set {topic_page}", 2),
        ];
        let document = generate(&topics, &layout()).expect("can generate");
        assert_eq!(document.pages[0].header.text, "Exercise {n} of {total}");
        assert_eq!(document.pages[0].footer.text, "Exercise {n} of {total}");
        for page in document.pages[1..].iter() {
            assert_eq!(page.header.text, "Set {topic_page}");
            assert_eq!(page.footer.text, "Set {topic_page}");
        }
    }

    #[test]
    fn every_page_carries_the_full_ruling() {
        let layout = layout();
        let expected = (layout.geometry.body_height_mm / 7.0).floor() as usize;
        let document = generate(&[Topic::new("Loops", 3)], &layout).expect("can generate");
        for page in document.pages.iter() {
            assert_eq!(page.ruling.len(), expected);
            for line in page.ruling.iter() {
                assert!(line.y < page.header_rule.y);
                assert!(line.y >= page.footer_rule.y);
                assert!(line.y > layout.geometry.footer_band.y2 - 1e-3);
                assert!(line.y < layout.geometry.header_band.y1);
            }
            assert!(page.header_rule.y > page.footer_rule.y);
            assert_eq!(page.header_rule.stroke, layout.rule);
        }
    }

    #[test]
    fn pages_know_their_position_in_the_topic() {
        let topics = vec![Topic::new("A", 1), Topic::new("B", 3)];
        let document = generate(&topics, &layout()).expect("can generate");
        let positions: Vec<PagePosition> = document.pages.iter().map(|p| p.position).collect();
        assert_eq!(
            positions,
            vec![
                PagePosition::Only,
                PagePosition::First,
                PagePosition::Interior,
                PagePosition::Last
            ]
        );
    }

    #[test]
    fn footer_can_carry_page_numbers() {
        let pdf = PDF {
            footer_page_numbers: true,
            page_number_style: PageNumberStyle::RomanLower,
            footer_lowercase: true,
            ..PDF::default()
        };
        let layout = pdf.layout().expect("layout is valid");
        let topics = vec![Topic::new("Variables", 2), Topic::new("Lists", 2)];
        let document = generate(&topics, &layout).expect("can generate");

        let numbers: Vec<&str> = document
            .pages
            .iter()
            .map(|p| p.page_number.as_ref().expect("page is numbered").text.as_str())
            .collect();
        assert_eq!(numbers, vec!["i", "ii", "iii", "iv"]);
        assert_eq!(document.pages[0].footer.text, "variables");
        assert_eq!(document.pages[0].header.text, "Variables");

        // outer numbers alternate sides
        let first = document.pages[0].page_number.as_ref().expect("numbered");
        let second = document.pages[1].page_number.as_ref().expect("numbered");
        assert!(first.coords.0 > second.coords.0);
    }

    #[test]
    fn generation_is_deterministic() {
        let topics = vec![Topic::new("Variables", 2), Topic::new("Lists", 3)];
        let layout = layout();
        assert_eq!(
            generate(&topics, &layout).expect("can generate"),
            generate(&topics, &layout).expect("can generate")
        );
    }
}
