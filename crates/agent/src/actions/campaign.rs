//! Campaign performance analysis over a read-only metrics dataset

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::{parse_params, MarketingAction};
use crate::{ActionError, Result};

/// Problems loading a replacement dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("campaign '{0}' metrics must be a JSON object")]
    NotAnObject(String),
}

/// Campaign id → metrics
#[derive(Debug, Clone, Default)]
pub struct CampaignDataset {
    campaigns: BTreeMap<String, Map<String, Value>>,
}

impl CampaignDataset {
    /// The demo fixture shipped with the agent
    pub fn builtin() -> Self {
        let mut campaigns = BTreeMap::new();

        campaigns.insert(
            "email_campaign_q1".to_string(),
            object(json!({
                "open_rate": 22.5,
                "click_rate": 3.8,
                "conversion_rate": 1.2,
                "total_sends": 15000,
                "top_performing_subject": "Transform your marketing with AI tools",
                "worst_performing_subject": "Newsletter: Marketing Updates for Q1",
                "peak_engagement_day": "Tuesday",
                "peak_engagement_time": "10:00 AM",
                "audience_segments": ["Marketing Managers", "Digital Marketers", "CMOs"],
                "content_themes": ["AI Marketing", "Marketing Automation", "ROI Optimization"]
            })),
        );

        campaigns.insert(
            "social_campaign_summer".to_string(),
            object(json!({
                "engagement_rate": 4.2,
                "click_through_rate": 2.1,
                "conversion_rate": 0.8,
                "total_impressions": 85000,
                "top_performing_platform": "LinkedIn",
                "worst_performing_platform": "Twitter",
                "top_performing_content": "Case study: How Company X increased leads by 300%",
                "audience_demographics": {"25-34": 40, "35-44": 35, "45-54": 20, "55+": 5},
                "hashtags": ["#MarketingTips", "#AIMarketing", "#LeadGeneration"]
            })),
        );

        campaigns.insert(
            "webinar_series_2023".to_string(),
            object(json!({
                "registration_rate": 8.3,
                "attendance_rate": 65.2,
                "conversion_rate": 12.5,
                "attendee_count": 520,
                "average_watch_time": "42 minutes",
                "top_question_themes": ["Implementation", "Integration", "Pricing"],
                "satisfaction_score": 4.7,
                "repeat_attendees": 28,
                "content_topics": ["AI Strategy", "Content Automation", "Marketing ROI"]
            })),
        );

        Self { campaigns }
    }

    /// Parse a JSON object of campaign id → metrics object
    pub fn from_json_str(content: &str) -> std::result::Result<Self, DatasetError> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(content)?;
        let mut campaigns = BTreeMap::new();
        for (id, metrics) in raw {
            match metrics {
                Value::Object(map) => {
                    campaigns.insert(id, map);
                }
                _ => return Err(DatasetError::NotAnObject(id)),
            }
        }
        Ok(Self { campaigns })
    }

    pub async fn from_file(path: &Path) -> std::result::Result<Self, DatasetError> {
        debug!("Loading campaign dataset from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&content)
    }

    pub fn get(&self, campaign_id: &str) -> Option<&Map<String, Value>> {
        self.campaigns.get(campaign_id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.campaigns.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Campaign family, inferred from its headline metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignKind {
    Email,
    Social,
    Webinar,
    Other,
}

impl CampaignKind {
    pub fn classify(metrics: &Map<String, Value>) -> Self {
        if metrics.contains_key("open_rate") {
            CampaignKind::Email
        } else if metrics.contains_key("engagement_rate") {
            CampaignKind::Social
        } else if metrics.contains_key("attendance_rate") {
            CampaignKind::Webinar
        } else {
            CampaignKind::Other
        }
    }
}

fn metric(metrics: &Map<String, Value>, key: &str) -> f64 {
    metrics.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Insights and recommendations derived from threshold rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Findings {
    fn insight(&mut self, text: impl Into<String>) {
        self.insights.push(text.into());
    }

    fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.push(text.into());
    }
}

pub fn evaluate(metrics: &Map<String, Value>) -> Findings {
    let mut findings = Findings::default();

    match CampaignKind::classify(metrics) {
        CampaignKind::Email => {
            if metric(metrics, "open_rate") > 20.0 {
                findings.insight("Open rate is above industry average (20%)");
            } else {
                findings.insight("Open rate is below industry average (20%)");
                findings.recommend("Improve subject lines and sender name");
            }

            if metric(metrics, "click_rate") < 4.0 {
                findings.insight("Click rate could be improved");
                findings.recommend("Review call-to-action clarity and placement");
            }
        }
        CampaignKind::Social => {
            if metric(metrics, "engagement_rate") > 3.0 {
                let platform = metrics
                    .get("top_performing_platform")
                    .and_then(Value::as_str)
                    .unwrap_or("social");
                findings.insight(format!("Strong engagement rate on {}", platform));
            } else {
                findings.insight("Engagement rate needs improvement");
                findings.recommend("Increase visual content and post at optimal times");
            }
        }
        CampaignKind::Webinar => {
            if metric(metrics, "attendance_rate") > 60.0 {
                findings.insight("Excellent attendance rate");
            } else {
                findings.insight("Attendance rate could be improved");
                findings.recommend("Send more reminder emails and add calendar invites");
            }
        }
        CampaignKind::Other => {}
    }

    if metric(metrics, "conversion_rate") < 2.0 {
        findings.insight("Conversion rate needs improvement");
        findings.recommend("Strengthen calls-to-action and landing page design");
    }

    findings
}

#[derive(Debug, Deserialize)]
struct AnalyzeParams {
    campaign_id: String,
}

/// `analyze_campaign_data`
pub struct CampaignAnalyzer {
    dataset: CampaignDataset,
}

impl CampaignAnalyzer {
    pub fn new(dataset: CampaignDataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &CampaignDataset {
        &self.dataset
    }

    pub fn analyze(&self, campaign_id: &str, today: NaiveDate) -> Result<Value> {
        let metrics =
            self.dataset
                .get(campaign_id)
                .ok_or_else(|| ActionError::CampaignNotFound {
                    campaign_id: campaign_id.to_string(),
                    available: self.dataset.ids(),
                })?;

        let findings = evaluate(metrics);

        Ok(json!({
            "campaign_id": campaign_id,
            "metrics": metrics,
            "insights": findings.insights,
            "recommendations": findings.recommendations,
            "analysis_date": today.format("%Y-%m-%d").to_string(),
        }))
    }
}

impl MarketingAction for CampaignAnalyzer {
    fn name(&self) -> &'static str {
        "analyze_campaign_data"
    }

    fn description(&self) -> &str {
        "Analyzes marketing campaign data and returns metrics, insights, and recommendations."
    }

    fn example(&self) -> Value {
        json!({ "campaign_id": "email_campaign_q1" })
    }

    fn execute(&self, params: &Map<String, Value>) -> Result<Value> {
        let params: AnalyzeParams = parse_params(self.name(), params)?;
        self.analyze(&params.campaign_id, Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_dataset() {
        let dataset = CampaignDataset::builtin();
        assert_eq!(dataset.len(), 3);
        assert_eq!(
            dataset.ids(),
            vec![
                "email_campaign_q1",
                "social_campaign_summer",
                "webinar_series_2023"
            ]
        );
    }

    #[test]
    fn test_classify() {
        let dataset = CampaignDataset::builtin();
        assert_eq!(
            CampaignKind::classify(dataset.get("email_campaign_q1").unwrap()),
            CampaignKind::Email
        );
        assert_eq!(
            CampaignKind::classify(dataset.get("social_campaign_summer").unwrap()),
            CampaignKind::Social
        );
        assert_eq!(
            CampaignKind::classify(dataset.get("webinar_series_2023").unwrap()),
            CampaignKind::Webinar
        );
        assert_eq!(CampaignKind::classify(&Map::new()), CampaignKind::Other);
    }

    #[test]
    fn test_metrics_without_conversion_rate_count_as_zero() {
        let findings = evaluate(&object(json!({"reach": 10})));
        assert_eq!(findings.insights, vec!["Conversion rate needs improvement"]);
    }

    #[test]
    fn test_from_json_str_rejects_non_objects() {
        assert!(matches!(
            CampaignDataset::from_json_str(r#"{"a": 5}"#),
            Err(DatasetError::NotAnObject(id)) if id == "a"
        ));
        assert!(matches!(
            CampaignDataset::from_json_str("[]"),
            Err(DatasetError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CampaignDataset::from_file(&dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }
}
