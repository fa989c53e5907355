//! Template-based marketing copy generation

use chrono::Local;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::platform::{topic_hashtag, truncate_with_ellipsis, Platform};
use super::templates::{
    fill, Tone, INSTAGRAM_HASHTAGS, LINKEDIN_CFO_OVERRIDE, LINKEDIN_HASHTAGS, LONG_FORM_CONTEXT,
    TWITTER_HASHTAGS,
};
use super::{parse_params, MarketingAction};
use crate::Result;

const WORDS_PER_MINUTE: usize = 200;

/// Arguments of `generate_content`
#[derive(Debug, Clone, Deserialize)]
pub struct ContentRequest {
    pub topic: String,
    pub audience: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default = "default_length")]
    pub length: String,
}

fn default_tone() -> String {
    "professional".to_string()
}

fn default_length() -> String {
    "medium".to_string()
}

impl ContentRequest {
    pub fn new(topic: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            audience: audience.into(),
            tone: default_tone(),
            platform: None,
            length: default_length(),
        }
    }

    pub fn tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn length(mut self, length: impl Into<String>) -> Self {
        self.length = length.into();
        self
    }
}

/// Keep the first sentence for short copy, append context for long copy
fn apply_length(content: String, length: &str, topic: &str, audience: &str) -> String {
    match length.trim().to_lowercase().as_str() {
        "short" => match content.find('.') {
            Some(end) if end > 0 => content[..=end].to_string(),
            _ => content,
        },
        "long" => content + &fill(LONG_FORM_CONTEXT, topic, audience),
        _ => content,
    }
}

fn reading_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

fn tags(topic: &str, rest: &[&str]) -> Vec<String> {
    std::iter::once(topic_hashtag(topic))
        .chain(rest.iter().map(|t| t.to_string()))
        .collect()
}

/// `generate_content`
#[derive(Debug, Default)]
pub struct ContentGenerator;

impl ContentGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, request: &ContentRequest) -> Value {
        let ContentRequest {
            topic,
            audience,
            tone,
            platform,
            length,
        } = request;

        let templates = Tone::from_label(tone).templates();
        let template = templates
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(templates[0]);

        let mut content = apply_length(fill(template, topic, audience), length, topic, audience);
        let mut hashtags: Vec<String> = Vec::new();
        let mut reading: Option<String> = None;

        match platform.as_deref().map(Platform::parse) {
            Some(Platform::LinkedIn) => {
                if LINKEDIN_CFO_OVERRIDE.matches(audience) {
                    content = LINKEDIN_CFO_OVERRIDE.body(length).to_string();
                    hashtags = tags(topic, LINKEDIN_CFO_OVERRIDE.hashtags);
                } else {
                    hashtags = tags(topic, LINKEDIN_HASHTAGS);
                }
                reading = Some("1-2 min read".to_string());
            }
            Some(Platform::Twitter) => {
                if let Some(cut) = truncate_with_ellipsis(&content, 280) {
                    content = cut;
                }
                hashtags = tags(topic, TWITTER_HASHTAGS);
            }
            Some(Platform::Instagram) => {
                hashtags = tags(topic, INSTAGRAM_HASHTAGS);
            }
            Some(Platform::Email) => {
                content = format!(
                    "Subject: New insights on {topic} for {audience}\n\nHello {audience} professional,\n\n{content}\n\nBest regards,\nYour Marketing Team"
                );
            }
            Some(Platform::Other(_)) | None => {}
        }

        let estimated_reading_time = reading.unwrap_or_else(|| reading_time(&content));
        debug!(
            "Generated {} chars of {:?} copy for {:?}",
            content.chars().count(),
            tone,
            platform
        );

        json!({
            "topic": topic,
            "audience": audience,
            "tone": tone,
            "platform": platform,
            "length": length,
            "content": content,
            "hashtags": hashtags,
            "estimated_reading_time": estimated_reading_time,
            "generation_date": Local::now().format("%Y-%m-%d %H:%M").to_string(),
        })
    }
}

impl MarketingAction for ContentGenerator {
    fn name(&self) -> &'static str {
        "generate_content"
    }

    fn description(&self) -> &str {
        "Generates marketing content based on specified parameters."
    }

    fn example(&self) -> Value {
        json!({
            "topic": "AI marketing",
            "audience": "CMOs",
            "tone": "professional",
            "platform": "LinkedIn",
            "length": "medium"
        })
    }

    fn execute(&self, params: &Map<String, Value>) -> Result<Value> {
        let request: ContentRequest = parse_params(self.name(), params)?;
        Ok(self.generate(&request))
    }
}
