use crate::model::{CustomRequirements, Video};

/// The system prompt used for script generation.
///
/// Loaded from `prompt.txt` at compile time so it can be edited without
/// dealing with Rust string syntax.
pub const SCRIPT_SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// Reply layout the sectionizer expects.
pub const REPLY_FORMAT: &str = "\
**HOOK (First 3-5 seconds):**
[Write an attention-grabbing opening that uses the same hook type as the original viral video]

**MAIN CONTENT:**
[Write the main body of the script, incorporating the brand/product naturally]

**CALL TO ACTION:**
[Write a clear, compelling CTA that drives the desired action]

**SUGGESTED HASHTAGS:**
[Provide 8-12 relevant hashtags for maximum reach]

**FULL CAPTION:**
[Write the complete caption ready to post]";

fn push_optional(prompt: &mut String, label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        prompt.push_str(&format!("- {}: {}\n", label, value));
    }
}

/// Build the user prompt from the template video and the brand customization.
pub fn build_script_prompt(video: &Video, requirements: &CustomRequirements) -> String {
    let mut prompt = String::from("Based on this VIRAL VIDEO DATA:\n");
    prompt.push_str(&format!("- Title: {}\n", video.title));
    prompt.push_str(&format!("- Hook Type: {}\n", video.hook_type));
    prompt.push_str(&format!("- Industry: {}\n", video.industry));
    prompt.push_str(&format!("- Viral Score: {}/10\n", video.viral_score));
    prompt.push_str(&format!("- Views: {}\n", video.views));
    prompt.push_str(&format!(
        "- Engagement Rate: {:.1}%\n",
        video.engagement_rate()
    ));
    prompt.push_str(&format!("- Original Caption: {}\n", video.caption));
    push_optional(&mut prompt, "Original Script", &video.script);
    prompt.push_str(&format!("- Why This Works: {}\n", video.why_this_works));

    prompt.push_str("\nCREATE A CUSTOM SCRIPT with these requirements:\n");
    prompt.push_str(&format!(
        "- Target Audience: {}\n",
        requirements.target_audience
    ));
    prompt.push_str(&format!("- Brand/Product: {}\n", requirements.brand));
    push_optional(&mut prompt, "Brand Description", &requirements.brand_description);
    push_optional(&mut prompt, "Desired Call To Action", &requirements.call_to_action);
    prompt.push_str(&format!("- Duration: {}\n", requirements.duration));
    prompt.push_str(&format!("- Voice Tone: {}\n", requirements.voice_tone));
    push_optional(&mut prompt, "Additional Notes", &requirements.additional_notes);

    prompt.push_str(
        "\nIMPORTANT: Use the successful elements from the original viral video \
         (hook style, engagement tactics, viral triggers) but adapt them for the new brand/audience.\n",
    );
    prompt.push_str("\nFormat your response EXACTLY like this:\n\n");
    prompt.push_str(REPLY_FORMAT);
    prompt.push_str(&format!(
        "\n\nMake it {} appropriate and use a {} tone throughout.",
        requirements.duration, requirements.voice_tone
    ));

    prompt
}
