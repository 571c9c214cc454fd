use async_trait::async_trait;
use reelscript::model::BrandDraft;
use reelscript::providers::{Generation, LlmProvider};
use reelscript::store::{BrandStore, MemoryStore, ScriptStore};
use reelscript::{ScriptEditor, ScriptRequest, SectionKind, Video};
use std::error::Error;
use std::sync::Arc;

const REPLY: &str = "**HOOK (First 3-5 seconds):**\n\
    Old hook\n\n\
    **MAIN CONTENT:**\n\
    Step one.\n\
    Step two.\n\n\
    **CALL TO ACTION:**\n\
    Follow for part two\n\n\
    **SUGGESTED HASHTAGS:**\n\
    #coffee #mornings\n\n\
    **FULL CAPTION:**\n\
    Your mornings, upgraded.";

struct CannedProvider;

#[async_trait]
impl LlmProvider for CannedProvider {
    fn provider_name(&self) -> &str {
        "canned"
    }

    async fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>> {
        Ok(Generation {
            text: REPLY.to_string(),
            usage: None,
        })
    }
}

fn template() -> Video {
    Video {
        id: "recMorning".to_string(),
        title: "3 habits that fixed my mornings".to_string(),
        author: "@morningcoach".to_string(),
        hook_type: "Question Hook".to_string(),
        industry: "Productivity".to_string(),
        viral_score: 9.2,
        views: 2_500_000,
        likes: 185_000,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_generate_edit_save_reopen() {
    let store = MemoryStore::new();
    let brand = store
        .create_brand(
            "alice",
            BrandDraft {
                name: "BrewCo".to_string(),
                target_audience: Some("Busy professionals aged 25-40".to_string()),
                call_to_action: Some("Order your first bag".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let video = template();
    let generated = ScriptRequest::builder()
        .video(video.clone())
        .brand_profile(&brand)
        .provider(Arc::new(CannedProvider))
        .generate()
        .await
        .unwrap();
    assert_eq!(generated.sections.hook, "Old hook");

    let mut editor = generated.into_editor(Some(&video));
    editor.edit(SectionKind::Hook, "New hook");

    let effective = editor.effective();
    assert_eq!(effective.hook, "New hook");
    assert_eq!(effective.main_content, "Step one.\nStep two.");
    assert_eq!(editor.baseline().hook, "Old hook");

    let saved = editor
        .commit(&store, "alice", Some("BrewCo morning reel"))
        .await
        .unwrap();
    assert!(saved.content.starts_with("**HOOK**\nNew hook\n\n**MAIN CONTENT**"));
    assert_eq!(saved.script_sections, effective);

    let snapshot = saved.original_video_data.clone().unwrap();
    assert_eq!(snapshot.title, video.title);
    assert_eq!(snapshot.viral_score, 9.2);

    let listed = store.list_scripts("alice").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved.id);

    let mut reopened = ScriptEditor::from_saved(&listed[0]);
    reopened.edit(SectionKind::CallToAction, "Order today");
    let updated = reopened.commit(&store, "alice", None).await.unwrap();

    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.title, "BrewCo morning reel");
    assert_eq!(updated.script_sections.hook, "New hook");
    assert_eq!(updated.script_sections.call_to_action, "Order today");
    assert_eq!(store.list_scripts("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unedited_script_is_saved_verbatim() {
    let store = MemoryStore::new();
    let mut editor = ScriptEditor::from_generated(REPLY, None);

    let saved = editor.commit(&store, "alice", Some("Verbatim")).await.unwrap();
    assert_eq!(saved.content, REPLY);
    assert!(saved.original_video_data.is_none());
}

#[tokio::test]
async fn test_other_users_cannot_touch_saved_scripts() {
    let store = MemoryStore::new();
    let mut editor = ScriptEditor::from_generated(REPLY, None);
    let saved = editor.commit(&store, "alice", Some("Mine")).await.unwrap();

    let mut intruder = ScriptEditor::from_saved(&saved);
    intruder.edit(SectionKind::Hook, "Hijacked");
    assert!(intruder.commit(&store, "bob", None).await.is_err());

    let stored = &store.list_scripts("alice").await.unwrap()[0];
    assert_eq!(stored.script_sections.hook, "Old hook");
}
