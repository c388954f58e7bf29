use crate::source::{SourceError, Topic, TopicSource};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

/// A delimited table with a header row naming its columns.
///
/// Columns are found by name, so their order in the file doesn't matter. The title and
/// page-count columns are required; the ordering column is used only when it's configured
/// *and* present in the header.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub path: PathBuf,
    pub delimiter: u8,
    pub title_column: String,
    pub pages_column: String,
    pub order_column: Option<String>,
    pub trim: bool,
}

struct Columns {
    title: usize,
    pages: usize,
    order: Option<usize>,
}

struct Row {
    topic: Topic,
    order: Option<i64>,
}

impl TopicSource for CsvTable {
    fn produce(&self) -> Result<Vec<Topic>, SourceError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::NotFound {
                    path: self.path.clone(),
                })
            }
            Err(source) => {
                return Err(SourceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(file);

        let headers = reader.headers().map_err(|e| self.classify(e))?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            // nothing at all, not even a header row
            return Err(SourceError::Empty {
                path: self.path.clone(),
            });
        }
        let columns = self.columns(&headers)?;

        let mut rows: Vec<Row> = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.classify(e))?;
            // header is line 1, so the first record is on line 2 unless quoting spans lines
            let line = record
                .position()
                .map(csv::Position::line)
                .unwrap_or(i as u64 + 2);

            if record.iter().all(|field| field.trim().is_empty()) {
                debug!("Skipping blank row on line {line}");
                continue;
            }

            rows.push(self.parse_row(&record, &columns, line)?);
        }

        if rows.is_empty() {
            return Err(SourceError::Empty {
                path: self.path.clone(),
            });
        }

        if columns.order.is_some() {
            // stable: rows with equal (or missing) order keep their file order
            rows.sort_by_key(|row| (row.order.is_none(), row.order));
        }

        info!("Read {} topic(s) from {}", rows.len(), self.path.display());
        Ok(rows.into_iter().map(|row| row.topic).collect())
    }
}

impl CsvTable {
    fn columns(&self, headers: &StringRecord) -> Result<Columns, SourceError> {
        let title = find_column(headers, &self.title_column)
            .ok_or_else(|| self.missing_column(&self.title_column, headers))?;
        let pages = find_column(headers, &self.pages_column)
            .ok_or_else(|| self.missing_column(&self.pages_column, headers))?;

        let order = self
            .order_column
            .as_deref()
            .and_then(|name| match find_column(headers, name) {
                Some(index) => Some(index),
                None => {
                    debug!("No `{name}` column, keeping topics in file order");
                    None
                }
            });

        Ok(Columns {
            title,
            pages,
            order,
        })
    }

    fn parse_row(
        &self,
        record: &StringRecord,
        columns: &Columns,
        line: u64,
    ) -> Result<Row, SourceError> {
        let title = record.get(columns.title).unwrap_or_default().trim();
        if title.is_empty() {
            return Err(self.malformed(line, "topic title is empty".to_string()));
        }

        let pages = record.get(columns.pages).unwrap_or_default().trim();
        let pages: u32 = pages.parse().map_err(|_| {
            self.malformed(
                line,
                format!(
                    "invalid page count {pages:?} for topic {title:?}: expected a non-negative integer"
                ),
            )
        })?;

        let order = match columns.order {
            Some(index) => {
                let order = record.get(index).unwrap_or_default().trim();
                if order.is_empty() {
                    None
                } else {
                    Some(order.parse::<i64>().map_err(|_| {
                        self.malformed(
                            line,
                            format!("invalid order {order:?} for topic {title:?}: expected an integer"),
                        )
                    })?)
                }
            }
            None => None,
        };

        Ok(Row {
            topic: Topic::new(title, pages),
            order,
        })
    }

    fn malformed(&self, line: u64, reason: String) -> SourceError {
        SourceError::Malformed {
            path: self.path.clone(),
            line,
            reason,
        }
    }

    fn missing_column(&self, name: &str, headers: &StringRecord) -> SourceError {
        let found = headers
            .iter()
            .map(|h| format!("`{h}`"))
            .collect::<Vec<String>>()
            .join(", ");
        self.malformed(
            1,
            format!("missing required column `{name}` (found columns: {found})"),
        )
    }

    fn classify(&self, e: csv::Error) -> SourceError {
        let line = e.position().map(csv::Position::line).unwrap_or(0);
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(source) => SourceError::Io {
                path: self.path.clone(),
                source,
            },
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => self.malformed(
                line,
                format!("expected {expected_len} fields but found {len}"),
            ),
            csv::ErrorKind::Utf8 { .. } => {
                self.malformed(line, "row is not valid UTF-8".to_string())
            }
            _ => self.malformed(line, message),
        }
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    let name = name.trim();
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
}
