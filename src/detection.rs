//! Auto-detection of table defaults for the config wizard.
//!
//! Peeks at the header row of a topic table to suggest the delimiter and which columns
//! hold titles, page counts and (optionally) ordering.

use std::path::Path;

/// Detected layout of a topic table.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DetectedColumns {
    pub delimiter: char,
    pub headers: Vec<String>,
    pub title: Option<usize>,
    pub pages: Option<usize>,
    pub order: Option<usize>,
}

const DELIMITERS: &[char] = &[',', ';', '\t', '|'];
const TITLE_NAMES: &[&str] = &["topic", "title", "name", "subject", "section", "temat"];
const PAGES_NAMES: &[&str] = &["pages", "page count", "page_count", "count", "strony"];
const ORDER_NAMES: &[&str] = &["order", "index", "position", "no", "#", "lp"];

/// Read the header row of `path` and guess its structure. Returns `None` if the file can't
/// be read or has no header.
pub fn detect_columns(path: &Path) -> Option<DetectedColumns> {
    let contents = std::fs::read_to_string(path).ok()?;
    let first_line = contents.lines().find(|line| !line.trim().is_empty())?;
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(first_line.as_bytes());
    let record = reader.records().next()?.ok()?;
    let headers: Vec<String> = record
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    Some(DetectedColumns {
        delimiter,
        title: find_any(&headers, TITLE_NAMES),
        pages: find_any(&headers, PAGES_NAMES),
        order: find_any(&headers, ORDER_NAMES),
        headers,
    })
}

/// The candidate delimiter appearing most often in the header line; `,` on a tie
pub fn detect_delimiter(line: &str) -> char {
    DELIMITERS
        .iter()
        .map(|d| (line.matches(*d).count(), *d))
        .filter(|(count, _)| *count > 0)
        .fold(None, |best: Option<(usize, char)>, candidate| match best {
            Some(best) if best.0 >= candidate.0 => Some(best),
            _ => Some(candidate),
        })
        .map(|(_, d)| d)
        .unwrap_or(',')
}

fn find_any(headers: &[String], names: &[&str]) -> Option<usize> {
    // earlier names are stronger signals, so search name by name
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn detect(contents: &str) -> Option<DetectedColumns> {
        let mut file = tempfile::NamedTempFile::new().expect("can create temp file");
        file.write_all(contents.as_bytes())
            .expect("can write temp file");
        detect_columns(file.path())
    }

    #[test]
    fn detects_delimiters() {
        assert_eq!(detect_delimiter("Topic,Pages"), ',');
        assert_eq!(detect_delimiter("Topic;Pages;Order"), ';');
        assert_eq!(detect_delimiter("Topic\tPages"), '\t');
        assert_eq!(detect_delimiter("Topic"), ',');
    }

    #[test]
    fn detects_standard_columns() {
        let detected = detect("Order;Topic;Pages\n1;Variables;2\n").expect("can detect");
        assert_eq!(detected.delimiter, ';');
        assert_eq!(detected.headers, vec!["Order", "Topic", "Pages"]);
        assert_eq!(detected.title, Some(1));
        assert_eq!(detected.pages, Some(2));
        assert_eq!(detected.order, Some(0));
    }

    #[test]
    fn prefers_stronger_names() {
        let detected = detect("Name,Title,Count\n").expect("can detect");
        // "title" ranks above "name"
        assert_eq!(detected.title, Some(1));
        assert_eq!(detected.pages, Some(2));
        assert_eq!(detected.order, None);
    }

    #[test]
    fn empty_or_missing_files_detect_nothing() {
        assert_eq!(detect(""), None);
        assert_eq!(detect_columns(Path::new("/definitely/not/here.csv")), None);
    }
}
