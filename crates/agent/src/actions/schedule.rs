//! Content scheduling (simulated: returns a confirmation record)

use chrono::{DateTime, Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use super::platform::{truncate_with_ellipsis, Platform};
use super::{parse_params, MarketingAction};
use crate::{ActionError, Result};

const PREVIEW_CHARS: usize = 100;

/// Arguments of `schedule_content`
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    pub content: String,
    pub platform: String,
    pub publish_date: String,
    #[serde(default)]
    pub time_slot: Option<String>,
}

impl ScheduleRequest {
    pub fn new(
        content: impl Into<String>,
        platform: impl Into<String>,
        publish_date: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            platform: platform.into(),
            publish_date: publish_date.into(),
            time_slot: None,
        }
    }

    pub fn time_slot(mut self, slot: impl Into<String>) -> Self {
        self.time_slot = Some(slot.into());
        self
    }
}

fn parse_publish_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ActionError::Validation("Invalid date format. Use YYYY-MM-DD".to_string()))
}

fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

fn scheduling_id(now: DateTime<Local>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("sched_{}_{}", now.timestamp(), &suffix[..8])
}

/// `schedule_content`
#[derive(Debug, Default)]
pub struct ContentScheduler;

impl ContentScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Validate and confirm a publication; dates before `today` are rejected
    pub fn schedule(&self, request: &ScheduleRequest, today: NaiveDate) -> Result<Value> {
        let date = parse_publish_date(&request.publish_date)?;
        if date < today {
            return Err(ActionError::Validation(
                "Cannot schedule content in the past".to_string(),
            ));
        }

        let platform = Platform::parse(&request.platform);
        let time_slot = request
            .time_slot
            .clone()
            .filter(|slot| !slot.trim().is_empty())
            .unwrap_or_else(|| platform.default_time_slot().to_string());

        let mut content = request.content.clone();
        let mut warnings = Vec::new();
        if let Some(limit) = platform.char_limit() {
            if let Some(cut) = truncate_with_ellipsis(&content, limit) {
                warn!(
                    "Content for {} exceeds {} characters, truncating",
                    platform.display_name(),
                    limit
                );
                warnings.push(format!(
                    "Content exceeds {}'s {} character limit. It will be truncated.",
                    platform.display_name(),
                    limit
                ));
                content = cut;
            }
        }

        let now = Local::now();
        let id = scheduling_id(now);
        info!("Scheduled {} on {} at {}", id, request.platform, time_slot);

        Ok(json!({
            "status": "scheduled",
            "platform": request.platform,
            "publish_date": date.format("%Y-%m-%d").to_string(),
            "time_slot": time_slot,
            "content": content,
            "content_preview": preview(&content),
            "full_content_length": content.chars().count(),
            "warnings": warnings,
            "scheduling_id": id,
            "scheduled_at": now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }))
    }
}

impl MarketingAction for ContentScheduler {
    fn name(&self) -> &'static str {
        "schedule_content"
    }

    fn description(&self) -> &str {
        "Schedules content for publishing on the specified platform and date."
    }

    fn example(&self) -> Value {
        json!({
            "content": "Content to be posted",
            "platform": "LinkedIn",
            "publish_date": "2025-05-01",
            "time_slot": "9:00 AM"
        })
    }

    fn execute(&self, params: &Map<String, Value>) -> Result<Value> {
        let request: ScheduleRequest = parse_params(self.name(), params)?;
        self.schedule(&request, Local::now().date_naive())
    }
}
