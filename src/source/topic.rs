use std::fmt;

/// One notebook section: a title printed on every page and the number of pages it spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub title: String,
    pub pages: u32,
}

impl Topic {
    pub fn new<S: ToString>(title: S, pages: u32) -> Topic {
        Topic {
            title: title.to_string(),
            pages,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.pages == 1 { "page" } else { "pages" };
        write!(f, "{} ({} {plural})", self.title, self.pages)
    }
}
