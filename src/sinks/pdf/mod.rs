//! Ruled notebook PDFs.
//!
//! Rendering happens in three steps so that nothing touches the disk until the whole
//! notebook is known to be good:
//!
//! 1. [`PDF::layout`] validates the settings into a [`layout::Layout`];
//! 2. [`generate::generate`] plans every page of the notebook from the topic list;
//! 3. [`rendering::write_pdf`] serialises the plan in memory, and only then is the output
//!    file created and written.
//!
//! If writing fails part way the half-written file is removed again.

mod config;
mod fonts;
mod generate;
mod header_footer;
mod layout;
mod rendering;

pub use config::{PageNumberStyle, Position, RenderStats, PDF};
pub use fonts::StandardFont;

use generate::generate;

use crate::source::Topic;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to create output file {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PDF {
    pub fn render(&self, topics: &[Topic], progress: &ProgressBar) -> Result<RenderStats> {
        let layout = self
            .layout()
            .with_context(|| "Invalid page layout in the [pdf] configuration")?;
        info!(
            "Each page gets {} ruled line(s) {} mm apart",
            layout.geometry.ruling.len(),
            self.line_spacing_mm
        );

        let doc = generate(topics, &layout).with_context(|| "Failed to lay out the notebook")?;
        if doc.is_empty() {
            warn!("Every topic asks for zero pages, the notebook will be empty");
        }

        progress.set_length(doc.pages.len() as u64);
        let bytes = rendering::write_pdf(&doc, &layout, progress);
        progress.finish_with_message("Pages rendered");

        write_output(&self.outfile, &bytes)?;
        info!(
            "Wrote {} page(s), {} bytes to {}",
            doc.pages.len(),
            bytes.len(),
            self.outfile.display()
        );

        Ok(RenderStats {
            page_count: doc.pages.len(),
            topic_count: doc.sections.len(),
            skipped_topics: topics.iter().filter(|t| t.pages == 0).count(),
        })
    }
}

/// Write `bytes` to `path`, removing the file again if the write doesn't complete
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    let written = writer.write_all(bytes).and_then(|()| writer.flush());
    drop(writer);

    if let Err(source) = written {
        if let Err(e) = std::fs::remove_file(path) {
            warn!("Failed to remove partial output {}: {e}", path.display());
        }
        return Err(OutputError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}
