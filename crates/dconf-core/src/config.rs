//! Loading of INI-like section/key/value documents
//!
//! Both the desired-state files and `dconf dump` output use the same
//! grammar:
//!
//! ```text
//! # comment
//! [org/gnome/desktop/interface]
//! clock-format='24h'
//! font-name: 'Cantarell 11'
//! ```
//!
//! Values are kept verbatim (no interpolation, no type interpretation) and
//! option names keep their case. Several documents can be overlaid; later
//! documents override options of earlier ones.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Options of one section, by name
pub type Section = BTreeMap<String, String>;

/// Sections of a document, by slash-delimited section name
pub type SectionMap = BTreeMap<String, Section>;

/// `[header]`: the header runs to the last closing bracket
static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<header>.+)\]").unwrap());

/// `key=value` or `key: value`, split on the first delimiter
static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<option>.*?)\s*[=:]\s*(?P<value>.*)$").unwrap());

const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

/// Parse a single document.
///
/// `document` names the source in error messages. Within one document a
/// section or an option may only be declared once.
pub fn parse_document(document: &str, text: &str) -> Result<SectionMap> {
    let mut parser = Parser::new(document);
    for (index, line) in text.lines().enumerate() {
        parser.feed(index + 1, line)?;
    }
    Ok(parser.finish())
}

/// Overlay `layer` on top of `base`.
///
/// Sections present in both are merged option by option, with `layer`
/// winning on identical option names.
pub fn overlay(base: &mut SectionMap, layer: SectionMap) {
    for (name, options) in layer {
        base.entry(name).or_default().extend(options);
    }
}

/// Parse `(name, text)` documents in order and overlay them.
pub fn load_documents<'a, I>(documents: I) -> Result<SectionMap>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut merged = SectionMap::new();
    for (name, text) in documents {
        let parsed = parse_document(name, text)?;
        tracing::debug!(document = name, sections = parsed.len(), "loaded document");
        overlay(&mut merged, parsed);
    }
    Ok(merged)
}

/// Read and overlay files in order.
///
/// Every file is read before any is parsed, so an unreadable file is
/// reported even when an earlier one is malformed.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<SectionMap> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        documents.push((path.display().to_string(), text));
    }
    load_documents(
        documents
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str())),
    )
}

/// Line-by-line parser state
struct Parser<'a> {
    document: &'a str,
    sections: SectionMap,
    /// Multi-line values are collected here and joined on finish
    values: BTreeMap<(String, String), Vec<String>>,
    section: Option<String>,
    option: Option<String>,
    indent: usize,
}

impl<'a> Parser<'a> {
    fn new(document: &'a str) -> Self {
        Self {
            document,
            sections: SectionMap::new(),
            values: BTreeMap::new(),
            section: None,
            option: None,
            indent: 0,
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) -> Result<()> {
        let trimmed = line.trim();

        if trimmed.starts_with(COMMENT_PREFIXES) {
            return Ok(());
        }

        if trimmed.is_empty() {
            // blank lines inside a continued value are kept
            if let Some(lines) = self.current_value() {
                lines.push(String::new());
            }
            return Ok(());
        }

        let indent = line.len() - line.trim_start().len();
        if self.option.is_some() && indent > self.indent {
            if let Some(lines) = self.current_value() {
                lines.push(trimmed.to_string());
            }
            return Ok(());
        }
        self.indent = indent;

        if let Some(caps) = SECTION_HEADER.captures(trimmed) {
            let name = caps["header"].to_string();
            if self.sections.contains_key(&name) {
                return Err(Error::parse(
                    self.document,
                    line_no,
                    format!("section [{name}] already declared"),
                ));
            }
            self.sections.insert(name.clone(), Section::new());
            self.section = Some(name);
            self.option = None;
            return Ok(());
        }

        let Some(section) = self.section.clone() else {
            return Err(Error::parse(
                self.document,
                line_no,
                format!("option outside of any section: {trimmed:?}"),
            ));
        };

        let Some(caps) = OPTION_LINE.captures(trimmed) else {
            return Err(Error::parse(
                self.document,
                line_no,
                format!("expected `key=value`, found {trimmed:?}"),
            ));
        };

        let option = caps["option"].trim_end().to_string();
        if option.is_empty() {
            return Err(Error::parse(self.document, line_no, "empty option name"));
        }

        let key = (section, option.clone());
        if self.values.contains_key(&key) {
            return Err(Error::parse(
                self.document,
                line_no,
                format!("option {option:?} already set in section [{}]", key.0),
            ));
        }
        self.values
            .insert(key, vec![caps["value"].trim().to_string()]);
        self.option = Some(option);
        Ok(())
    }

    fn current_value(&mut self) -> Option<&mut Vec<String>> {
        let key = (self.section.clone()?, self.option.clone()?);
        self.values.get_mut(&key)
    }

    fn finish(mut self) -> SectionMap {
        for ((section, option), lines) in self.values {
            let value = lines.join("\n").trim_end().to_string();
            self.sections.entry(section).or_default().insert(option, value);
        }
        self.sections
    }
}
