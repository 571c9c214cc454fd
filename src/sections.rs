//! Splits a generated script into named sections and joins them back.
//!
//! Parsing is line based. Any trimmed line containing one of the section
//! labels (case-sensitive substring match) switches the current section
//! and contributes no text. Other non-empty lines are appended to the
//! current section unless they start with `**` or `[`, which is how the
//! generator renders headings and placeholders. Text before the first
//! marker is dropped.
//!
//! Because detection is a substring test, a body line such as
//! "Our MAIN CONTENT today" is read as a section boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Hook,
    MainContent,
    CallToAction,
    Hashtags,
    FullCaption,
}

impl SectionKind {
    /// Document order, which is also marker priority within a line.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Hook,
        SectionKind::MainContent,
        SectionKind::CallToAction,
        SectionKind::Hashtags,
        SectionKind::FullCaption,
    ];

    /// Heading label, also used as the marker substring.
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Hook => "HOOK",
            SectionKind::MainContent => "MAIN CONTENT",
            SectionKind::CallToAction => "CALL TO ACTION",
            SectionKind::Hashtags => "HASHTAGS",
            SectionKind::FullCaption => "FULL CAPTION",
        }
    }

    /// Name used in stored section maps and edit patches.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Hook => "hook",
            SectionKind::MainContent => "mainContent",
            SectionKind::CallToAction => "callToAction",
            SectionKind::Hashtags => "hashtags",
            SectionKind::FullCaption => "fullCaption",
        }
    }

    /// The section a line switches to, if it contains a marker.
    pub fn detect(line: &str) -> Option<SectionKind> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| line.contains(kind.label()))
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| format!("Unknown script section: {}", s))
    }
}

/// The five named parts of a script. Any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptSections {
    pub hook: String,
    pub main_content: String,
    pub call_to_action: String,
    pub hashtags: String,
    pub full_caption: String,
}

impl ScriptSections {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Hook => &self.hook,
            SectionKind::MainContent => &self.main_content,
            SectionKind::CallToAction => &self.call_to_action,
            SectionKind::Hashtags => &self.hashtags,
            SectionKind::FullCaption => &self.full_caption,
        }
    }

    pub fn get_mut(&mut self, kind: SectionKind) -> &mut String {
        match kind {
            SectionKind::Hook => &mut self.hook,
            SectionKind::MainContent => &mut self.main_content,
            SectionKind::CallToAction => &mut self.call_to_action,
            SectionKind::Hashtags => &mut self.hashtags,
            SectionKind::FullCaption => &mut self.full_caption,
        }
    }

    pub fn set(&mut self, kind: SectionKind, text: impl Into<String>) {
        *self.get_mut(kind) = text.into();
    }

    pub fn is_empty(&self) -> bool {
        SectionKind::ALL
            .into_iter()
            .all(|kind| self.get(kind).is_empty())
    }

    /// Parses generated text; see the module docs for the rules.
    pub fn parse(text: &str) -> Self {
        parse_script(text)
    }

    /// Joins the non-empty sections back into one document.
    pub fn reconstruct(&self) -> String {
        reconstruct_script(self)
    }

    /// Display tokens of the hashtags section.
    pub fn hashtag_tokens(&self) -> Vec<String> {
        hashtag_tokens(&self.hashtags)
    }
}

pub fn parse_script(text: &str) -> ScriptSections {
    let mut sections = ScriptSections::default();
    let mut current: Option<SectionKind> = None;

    for line in text.lines() {
        let line = line.trim();

        if let Some(kind) = SectionKind::detect(line) {
            current = Some(kind);
            continue;
        }

        if line.is_empty() || line.starts_with("**") || line.starts_with('[') {
            continue;
        }

        if let Some(kind) = current {
            let section = sections.get_mut(kind);
            if !section.is_empty() {
                section.push('\n');
            }
            section.push_str(line);
        }
    }

    sections
}

/// Emits `**LABEL**` followed by the text for each non-empty section,
/// separated by blank lines. Empty sections are left out entirely.
pub fn reconstruct_script(sections: &ScriptSections) -> String {
    let blocks: Vec<String> = SectionKind::ALL
        .into_iter()
        .filter(|kind| !sections.get(*kind).is_empty())
        .map(|kind| format!("**{}**\n{}", kind.label(), sections.get(kind)))
        .collect();

    blocks.join("\n\n").trim().to_string()
}

/// Splits on runs of whitespace, commas and '#', prefixing each token with
/// a single '#'.
pub fn hashtag_tokens(hashtags: &str) -> Vec<String> {
    hashtags
        .split(|c: char| c.is_whitespace() || c == ',' || c == '#')
        .filter(|token| !token.is_empty())
        .map(|token| format!("#{}", token))
        .collect()
}
