//! Interactive configuration wizard for creating `notebook.toml`.
//!
//! The wizard looks at the topic table's header row to suggest which columns to use,
//! then asks for the PDF output options. Anything it doesn't ask about keeps its default
//! and can be edited in the written file.

use crate::cli::DEFAULT_CONFIG;
use crate::detection::{detect_columns, DetectedColumns};
use crate::sinks::{PageNumberStyle, Position, StandardFont, PDF};
use crate::source::Source;
use anyhow::{anyhow, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use log::{log, Level};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration for a notebook.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Configuration {
    pub source: Source,
    pub pdf: PDF,
}

impl Configuration {
    /// Load the configuration at `path`, falling back to the defaults if there is none
    pub fn load(path: &Path) -> Result<Configuration> {
        if !path.exists() {
            log!(
                missing_config_level(path),
                "No {} found, using default settings",
                path.display()
            );
            return Ok(Configuration::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Only a missing file at the default location is expected; one named with `--config` isn't
fn missing_config_level(path: &Path) -> Level {
    if path == Path::new(DEFAULT_CONFIG) {
        Level::Info
    } else {
        Level::Warn
    }
}

/// Let the user pick one of the table's columns, pre-selecting the detected one
fn select_column(
    theme: &ColorfulTheme,
    prompt: &str,
    detected: &DetectedColumns,
    default: Option<usize>,
) -> Result<String> {
    let selection = FuzzySelect::with_theme(theme)
        .with_prompt(prompt)
        .items(&detected.headers)
        .default(default.unwrap_or(0))
        .interact()?;
    Ok(detected.headers[selection].clone())
}

/// Run the interactive configuration wizard.
///
/// Prompts the user for the topic table and PDF output options, then writes the
/// configuration to `config_path`.
pub fn run(config_path: &Path) -> Result<()> {
    let theme = ColorfulTheme::default();

    let input: String = Input::with_theme(&theme)
        .with_prompt("Topic table (CSV)")
        .default("topics.csv".to_string())
        .interact()
        .with_context(|| "Failed to obtain topic table path")?;
    let input = PathBuf::from(input);

    let source = match detect_columns(&input) {
        Some(detected) if !detected.headers.is_empty() => {
            println!("Columns: [{}]", detected.headers.join("], ["));

            let title_column =
                select_column(&theme, "Column with topic titles", &detected, detected.title)?;
            let pages_column =
                select_column(&theme, "Column with page counts", &detected, detected.pages)?;
            if title_column == pages_column {
                return Err(anyhow!(
                    "Titles and page counts can't both come from column `{title_column}`"
                ));
            }

            let order_column = if Confirm::with_theme(&theme)
                .with_prompt("Sort topics by another column?")
                .default(detected.order.is_some())
                .interact()?
            {
                Some(select_column(
                    &theme,
                    "Column to sort topics by",
                    &detected,
                    detected.order,
                )?)
            } else {
                None
            };

            Source {
                path: input,
                delimiter: detected.delimiter,
                title_column,
                pages_column,
                order_column,
                ..Source::default()
            }
        }
        _ => {
            println!(
                "Couldn't read a header row from {}, asking for column names instead",
                input.display()
            );
            let title_column: String = Input::with_theme(&theme)
                .with_prompt("Name of the topic title column")
                .default("Topic".to_string())
                .interact()?;
            let pages_column: String = Input::with_theme(&theme)
                .with_prompt("Name of the page count column")
                .default("Pages".to_string())
                .interact()?;
            Source {
                path: input,
                title_column,
                pages_column,
                ..Source::default()
            }
        }
    };

    let outfile: String = Input::with_theme(&theme)
        .with_prompt("Output pdf file")
        .default("notebook.pdf".to_string())
        .interact()?;
    let mut outfile = PathBuf::from(outfile);
    let ext = outfile
        .extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != *"pdf" {
        outfile.set_extension("pdf");
    }

    let title: String = Input::with_theme(&theme)
        .with_prompt("Notebook title (shown in the PDF properties)")
        .default("Notebook".to_string())
        .interact()?;

    let fonts = StandardFont::all();
    let default_font = fonts
        .iter()
        .position(|f| *f == PDF::default().font_header)
        .unwrap_or(0);
    let font_header = FuzzySelect::with_theme(&theme)
        .with_prompt("Header font")
        .items(fonts)
        .default(default_font)
        .interact()?;
    let font_header = fonts[font_header];

    let line_spacing_mm: f32 = Input::with_theme(&theme)
        .with_prompt("Distance between ruled lines in millimetres")
        .default(7.0)
        .validate_with(|input: &f32| {
            if input.is_finite() && *input > 0.0 {
                Ok(())
            } else {
                Err("Line spacing must be a positive number")
            }
        })
        .interact()?;

    let footer_page_numbers = Confirm::with_theme(&theme)
        .with_prompt("Print page numbers in the footer?")
        .default(false)
        .interact()?;
    let (page_number_style, page_number_position) = if footer_page_numbers {
        let style = FuzzySelect::with_theme(&theme)
            .with_prompt("Page number style")
            .items(PageNumberStyle::all())
            .default(0)
            .interact()?;
        let position = FuzzySelect::with_theme(&theme)
            .with_prompt("Page number position")
            .items(Position::all())
            .default(1)
            .interact()?;
        (PageNumberStyle::all()[style], Position::all()[position])
    } else {
        (PageNumberStyle::Arabic, Position::Outer)
    };

    let bookmarks = Confirm::with_theme(&theme)
        .with_prompt("Add a PDF bookmark for each topic?")
        .default(true)
        .interact()?;

    let pdf = PDF {
        outfile,
        title,
        font_header,
        line_spacing_mm,
        footer_page_numbers,
        page_number_style,
        page_number_position,
        bookmarks,
        ..PDF::default()
    };
    pdf.layout()
        .with_context(|| "The chosen settings don't produce a usable page")?;

    let config = Configuration { source, pdf };
    let config =
        toml::to_string_pretty(&config).with_context(|| "Failed to convert configuration to TOML")?;

    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!(
                "{} already exists, do you want to override it?",
                config_path.display()
            ))
            .interact()?
    {
        println!("Configuration:");
        println!("{}", config);
    } else {
        std::fs::write(config_path, config)
            .with_context(|| "Failed to write configuration file")?;
        println!("{} written!", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_means_defaults() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let config =
            Configuration::load(&dir.path().join("notebook.toml")).expect("can load defaults");
        assert_eq!(config, Configuration::default());
        assert_eq!(config.source.path, PathBuf::from("topics.csv"));
        assert_eq!(config.pdf.outfile, PathBuf::from("notebook.pdf"));
    }

    #[test]
    fn missing_named_config_is_a_warning() {
        assert_eq!(missing_config_level(Path::new(DEFAULT_CONFIG)), Level::Info);
        assert_eq!(missing_config_level(Path::new("school.toml")), Level::Warn);
        assert_eq!(
            missing_config_level(Path::new("configs/notebook.toml")),
            Level::Warn
        );
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("notebook.toml");
        let mut config = Configuration::default();
        config.source.delimiter = ';';
        config.pdf.footer_page_numbers = true;
        std::fs::write(
            &path,
            toml::to_string_pretty(&config).expect("can serialize configuration"),
        )
        .expect("can write config");

        assert_eq!(Configuration::load(&path).expect("can load config"), config);
    }

    #[test]
    fn sections_can_be_partial() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("notebook.toml");
        std::fs::write(&path, "[pdf]\nline_spacing_mm = 8.0\n").expect("can write config");

        let config = Configuration::load(&path).expect("can load config");
        assert_eq!(config.pdf.line_spacing_mm, 8.0);
        assert_eq!(config.source, Source::default());
    }

    #[test]
    fn broken_config_is_an_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("notebook.toml");
        std::fs::write(&path, "[pdf\nline_spacing_mm = ").expect("can write config");
        assert!(Configuration::load(&path).is_err());
    }
}
