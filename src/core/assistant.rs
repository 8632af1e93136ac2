use crate::domain::ports::TextGenerator;
use crate::utils::error::{MarketError, Result};
use async_trait::async_trait;
use std::fmt;

pub const GIG_DESCRIPTION_FALLBACK: &str =
    "Failed to generate AI description. Please write manually.";
pub const PROPOSAL_FALLBACK: &str = "Failed to generate AI proposal.";
pub const PROFILE_TIP_FALLBACK: &str =
    "Add 'Unicode Nepali' and 'Next.js' to your skills to boost visibility by 40%.";

/// 生成文字；`fallback` 為是否使用了預設字串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub fallback: bool,
}

impl Suggestion {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fallback: false,
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fallback: true,
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub trait SuggestionResultExt {
    /// 失敗時記錄錯誤並換成呼叫端提供的字串
    fn or_fallback(self, fallback: &str) -> Suggestion;
}

impl SuggestionResultExt for Result<Suggestion> {
    fn or_fallback(self, fallback: &str) -> Suggestion {
        self.unwrap_or_else(|e| {
            tracing::error!("❌ AI generation error: {}", e);
            Suggestion::fallback(fallback)
        })
    }
}

/// 市集用的 AI 文案助手
pub struct Assistant<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> Assistant<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn generate_gig_description(
        &self,
        title: &str,
        category: &str,
        skills: &[String],
    ) -> Result<Suggestion> {
        let prompt = format!(
            "Generate a professional, persuasive gig description for a freelance platform in Nepal. \n\
             Title: {title}\n\
             Category: {category}\n\
             Key Skills: {skills}\n\
             Target Audience: Small to medium businesses in Nepal.\n\
             Style: Professional, encouraging, and localized for the Nepali market.",
            skills = skills.join(", ")
        );
        self.ask(&prompt, 0.7).await
    }

    pub async fn generate_proposal(
        &self,
        project_title: &str,
        project_desc: &str,
        freelancer_skills: &[String],
    ) -> Result<Suggestion> {
        let prompt = format!(
            "Write a winning project proposal for: \"{project_title}\".\n\
             Project Details: {project_desc}\n\
             My Skills: {skills}\n\
             Address the client professionally and explain why I am the best fit.",
            skills = freelancer_skills.join(", ")
        );
        self.ask(&prompt, 0.8).await
    }

    pub async fn optimize_profile(&self, current_bio: &str, skills: &[String]) -> Result<Suggestion> {
        let prompt = format!(
            "Analyze this freelancer profile bio and skills for the Nepali market.\n\
             Bio: \"{current_bio}\"\n\
             Skills: {skills}\n\n\
             Provide a single, short, actionable tip (max 20 words) to improve their profile \
             visibility to high-paying clients in Kathmandu.",
            skills = skills.join(", ")
        );
        self.ask(&prompt, 0.7).await
    }

    async fn ask(&self, prompt: &str, temperature: f32) -> Result<Suggestion> {
        tracing::debug!("🤖 Requesting generation ({} chars)", prompt.len());
        let text = self.generator.generate(prompt, temperature).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(MarketError::GenerationError {
                message: "empty response".to_string(),
            });
        }
        Ok(Suggestion::generated(text))
    }
}

/// 未設定 API key 時使用，所有請求都會失敗並改用預設字串
#[derive(Debug, Clone, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _prompt: &str, _temperature: f32) -> Result<String> {
        Err(MarketError::MissingConfigError {
            field: "assistant.api_key".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGenerator {
        reply: String,
        calls: Mutex<Vec<(String, f32)>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
            self.calls
                .lock()
                .map_err(|e| MarketError::GenerationError {
                    message: e.to_string(),
                })?
                .push((prompt.to_string(), temperature));
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn test_proposal_prompt_and_temperature() {
        let generator = RecordingGenerator {
            reply: "  Dear client, ...  ".to_string(),
            ..Default::default()
        };
        let assistant = Assistant::new(generator);
        let skills = vec!["React".to_string(), "TypeScript".to_string()];

        let suggestion = assistant
            .generate_proposal("Fintech wallet", "High-security wallet UI", &skills)
            .await
            .unwrap();
        assert_eq!(suggestion.text, "Dear client, ...");
        assert!(!suggestion.fallback);

        let calls = assistant.generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("\"Fintech wallet\""));
        assert!(calls[0].0.contains("My Skills: React, TypeScript"));
        assert_eq!(calls[0].1, 0.8);
    }

    #[tokio::test]
    async fn test_empty_reply_is_an_error() {
        let assistant = Assistant::new(RecordingGenerator::default());
        let result = assistant.optimize_profile("bio", &[]).await;
        assert!(matches!(result, Err(MarketError::GenerationError { .. })));
        assert_eq!(result.or_fallback(PROFILE_TIP_FALLBACK).text, PROFILE_TIP_FALLBACK);
    }

    #[tokio::test]
    async fn test_offline_generator_falls_back() {
        let assistant = Assistant::new(OfflineGenerator);
        let suggestion = assistant
            .generate_gig_description("Logo design", "design", &[])
            .await
            .or_fallback(GIG_DESCRIPTION_FALLBACK);
        assert!(suggestion.fallback);
        assert_eq!(suggestion.to_string(), GIG_DESCRIPTION_FALLBACK);
    }
}
