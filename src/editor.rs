//! Editing a generated script section by section.
//!
//! Edits live in a sparse patch over the parsed baseline and only reach
//! the baseline when [`ScriptEditor::commit`] persists them.

use log::info;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::model::{NewScript, SavedScript, ScriptUpdate, Video, VideoSnapshot};
use crate::sections::{reconstruct_script, ScriptSections, SectionKind};
use crate::store::ScriptStore;
use crate::ReelError;

#[derive(Debug, Clone)]
pub struct ScriptEditor {
    original: String,
    baseline: ScriptSections,
    patch: BTreeMap<SectionKind, String>,
    saved_id: Option<Uuid>,
    source_video: Option<VideoSnapshot>,
}

impl ScriptEditor {
    /// Start from freshly generated text.
    pub fn from_generated(text: impl Into<String>, video: Option<&Video>) -> Self {
        let original = text.into();
        ScriptEditor {
            baseline: ScriptSections::parse(&original),
            original,
            patch: BTreeMap::new(),
            saved_id: None,
            source_video: video.map(VideoSnapshot::from),
        }
    }

    /// Reopen a saved script; its stored sections are the baseline.
    pub fn from_saved(script: &SavedScript) -> Self {
        ScriptEditor {
            original: script.content.clone(),
            baseline: script.script_sections.clone(),
            patch: BTreeMap::new(),
            saved_id: Some(script.id),
            source_video: script.original_video_data.clone(),
        }
    }

    pub fn baseline(&self) -> &ScriptSections {
        &self.baseline
    }

    pub fn patch(&self) -> &BTreeMap<SectionKind, String> {
        &self.patch
    }

    pub fn saved_id(&self) -> Option<Uuid> {
        self.saved_id
    }

    pub fn has_edits(&self) -> bool {
        !self.patch.is_empty()
    }

    pub fn edit(&mut self, kind: SectionKind, text: impl Into<String>) {
        self.patch.insert(kind, text.into());
    }

    /// Same as [`edit`](Self::edit) with the section given by its stored key.
    pub fn edit_named(&mut self, key: &str, text: impl Into<String>) -> Result<(), ReelError> {
        let kind = key.parse::<SectionKind>().map_err(ReelError::ValidationError)?;
        self.edit(kind, text);
        Ok(())
    }

    pub fn discard_edits(&mut self) {
        self.patch.clear();
    }

    /// Baseline with patched sections overriding.
    pub fn effective(&self) -> ScriptSections {
        let mut sections = self.baseline.clone();
        for (kind, text) in &self.patch {
            sections.set(*kind, text.clone());
        }
        sections
    }

    /// Full document for copying or export: the original text until
    /// something is edited, the reconstruction afterwards.
    pub fn content(&self) -> String {
        if self.has_edits() {
            reconstruct_script(&self.effective())
        } else {
            self.original.clone()
        }
    }

    /// Persists content and sections together, then folds the patch into
    /// the baseline. A new script needs a title; an existing one keeps its
    /// title unless a new one is given.
    pub async fn commit(
        &mut self,
        store: &dyn ScriptStore,
        user_id: &str,
        title: Option<&str>,
    ) -> Result<SavedScript, ReelError> {
        let sections = self.effective();
        let content = self.content();

        let saved = match self.saved_id {
            Some(id) => {
                let update = ScriptUpdate {
                    title: title.map(str::to_string),
                    content: Some(content.clone()),
                    script_sections: Some(sections.clone()),
                };
                store.update_script(user_id, id, update).await?
            }
            None => {
                let title = title
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        ReelError::ValidationError("Script title is required".to_string())
                    })?;
                let script = NewScript {
                    title: title.to_string(),
                    content: content.clone(),
                    script_sections: sections.clone(),
                    original_video_data: self.source_video.clone(),
                };
                store.insert_script(user_id, script).await?
            }
        };
        info!("Committed script {} ({} edited sections)", saved.id, self.patch.len());

        self.original = content;
        self.baseline = sections;
        self.patch.clear();
        self.saved_id = Some(saved.id);

        Ok(saved)
    }
}
