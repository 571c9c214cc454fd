//! Persistence seam for brands and saved scripts.
//!
//! Every call is scoped to the owning user; rows belonging to someone else
//! behave as if they did not exist.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{Brand, BrandDraft, BrandUpdate, NewScript, SavedScript, ScriptUpdate};
use crate::ReelError;

#[async_trait]
pub trait BrandStore: Send + Sync {
    /// Newest first
    async fn list_brands(&self, user_id: &str) -> Result<Vec<Brand>, ReelError>;
    async fn create_brand(&self, user_id: &str, draft: BrandDraft) -> Result<Brand, ReelError>;
    async fn update_brand(
        &self,
        user_id: &str,
        id: Uuid,
        update: BrandUpdate,
    ) -> Result<Brand, ReelError>;
    async fn delete_brand(&self, user_id: &str, id: Uuid) -> Result<(), ReelError>;
}

#[async_trait]
pub trait ScriptStore: Send + Sync {
    /// Newest first
    async fn list_scripts(&self, user_id: &str) -> Result<Vec<SavedScript>, ReelError>;
    async fn insert_script(&self, user_id: &str, script: NewScript)
        -> Result<SavedScript, ReelError>;
    /// Applies every present field of `update` in one write.
    async fn update_script(
        &self,
        user_id: &str,
        id: Uuid,
        update: ScriptUpdate,
    ) -> Result<SavedScript, ReelError>;
    async fn delete_script(&self, user_id: &str, id: Uuid) -> Result<(), ReelError>;
}

fn require_user(user_id: &str) -> Result<(), ReelError> {
    if user_id.trim().is_empty() {
        Err(ReelError::Unauthenticated)
    } else {
        Ok(())
    }
}

fn require_name(name: &str) -> Result<(), ReelError> {
    if name.trim().is_empty() {
        Err(ReelError::ValidationError(
            "Brand name cannot be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Process-local store, kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    brands: RwLock<Vec<Brand>>,
    scripts: RwLock<Vec<SavedScript>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BrandStore for MemoryStore {
    async fn list_brands(&self, user_id: &str) -> Result<Vec<Brand>, ReelError> {
        require_user(user_id)?;
        let brands = self.brands.read().await;
        Ok(brands
            .iter()
            .rev()
            .filter(|brand| brand.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_brand(&self, user_id: &str, draft: BrandDraft) -> Result<Brand, ReelError> {
        require_user(user_id)?;
        require_name(&draft.name)?;

        let now = Utc::now();
        let brand = Brand {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: draft.name,
            category: draft.category,
            target_audience: draft.target_audience,
            call_to_action: draft.call_to_action,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };
        debug!("Created brand {} for {}", brand.id, user_id);

        self.brands.write().await.push(brand.clone());
        Ok(brand)
    }

    async fn update_brand(
        &self,
        user_id: &str,
        id: Uuid,
        update: BrandUpdate,
    ) -> Result<Brand, ReelError> {
        require_user(user_id)?;
        if let Some(name) = &update.name {
            require_name(name)?;
        }

        let mut brands = self.brands.write().await;
        let brand = brands
            .iter_mut()
            .find(|brand| brand.id == id && brand.user_id == user_id)
            .ok_or_else(|| ReelError::NotFound(format!("brand {}", id)))?;

        if let Some(name) = update.name {
            brand.name = name;
        }
        if update.category.is_some() {
            brand.category = update.category;
        }
        if update.target_audience.is_some() {
            brand.target_audience = update.target_audience;
        }
        if update.call_to_action.is_some() {
            brand.call_to_action = update.call_to_action;
        }
        if update.description.is_some() {
            brand.description = update.description;
        }
        brand.updated_at = Utc::now();

        Ok(brand.clone())
    }

    async fn delete_brand(&self, user_id: &str, id: Uuid) -> Result<(), ReelError> {
        require_user(user_id)?;
        let mut brands = self.brands.write().await;
        let before = brands.len();
        brands.retain(|brand| !(brand.id == id && brand.user_id == user_id));
        if brands.len() == before {
            return Err(ReelError::NotFound(format!("brand {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ScriptStore for MemoryStore {
    async fn list_scripts(&self, user_id: &str) -> Result<Vec<SavedScript>, ReelError> {
        require_user(user_id)?;
        let scripts = self.scripts.read().await;
        Ok(scripts
            .iter()
            .rev()
            .filter(|script| script.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_script(
        &self,
        user_id: &str,
        script: NewScript,
    ) -> Result<SavedScript, ReelError> {
        require_user(user_id)?;

        let now = Utc::now();
        let saved = SavedScript {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: script.title,
            content: script.content,
            script_sections: script.script_sections,
            original_video_data: script.original_video_data,
            created_at: now,
            updated_at: now,
        };
        debug!("Saved script {} for {}", saved.id, user_id);

        self.scripts.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn update_script(
        &self,
        user_id: &str,
        id: Uuid,
        update: ScriptUpdate,
    ) -> Result<SavedScript, ReelError> {
        require_user(user_id)?;

        let mut scripts = self.scripts.write().await;
        let script = scripts
            .iter_mut()
            .find(|script| script.id == id && script.user_id == user_id)
            .ok_or_else(|| ReelError::NotFound(format!("script {}", id)))?;

        if let Some(title) = update.title {
            script.title = title;
        }
        if let Some(content) = update.content {
            script.content = content;
        }
        if let Some(sections) = update.script_sections {
            script.script_sections = sections;
        }
        script.updated_at = Utc::now();

        Ok(script.clone())
    }

    async fn delete_script(&self, user_id: &str, id: Uuid) -> Result<(), ReelError> {
        require_user(user_id)?;
        let mut scripts = self.scripts.write().await;
        let before = scripts.len();
        scripts.retain(|script| !(script.id == id && script.user_id == user_id));
        if scripts.len() == before {
            return Err(ReelError::NotFound(format!("script {}", id)));
        }
        Ok(())
    }
}
