//! Publishing platforms and their conventions

/// A content destination, parsed case-insensitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    LinkedIn,
    Twitter,
    Instagram,
    Email,
    Other(String),
}

impl Platform {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "linkedin" => Platform::LinkedIn,
            "twitter" | "x" => Platform::Twitter,
            "instagram" => Platform::Instagram,
            "email" => Platform::Email,
            other => Platform::Other(other.to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter",
            Platform::Instagram => "Instagram",
            Platform::Email => "Email",
            Platform::Other(label) => label,
        }
    }

    /// Best-practice publishing slot when none is requested
    pub fn default_time_slot(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "9:00 AM",
            Platform::Twitter => "12:00 PM",
            Platform::Instagram => "6:00 PM",
            Platform::Email => "10:00 AM",
            Platform::Other(_) => "9:00 AM",
        }
    }

    /// Maximum post length in characters, if the platform has one
    pub fn char_limit(&self) -> Option<usize> {
        match self {
            Platform::Twitter => Some(280),
            Platform::Instagram => Some(2200),
            Platform::LinkedIn => Some(3000),
            Platform::Email | Platform::Other(_) => None,
        }
    }
}

/// Cut `text` to at most `limit` characters, ending in `...` when cut
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> Option<String> {
    if text.chars().count() <= limit {
        return None;
    }
    let kept: String = text.chars().take(limit.saturating_sub(3)).collect();
    Some(format!("{}...", kept))
}

/// `#Topic` tag built from the alphanumeric characters of a topic
pub fn topic_hashtag(topic: &str) -> String {
    let tag: String = topic.chars().filter(|c| c.is_alphanumeric()).collect();
    format!("#{}", tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platforms() {
        assert_eq!(Platform::parse("LinkedIn"), Platform::LinkedIn);
        assert_eq!(Platform::parse(" twitter "), Platform::Twitter);
        assert_eq!(Platform::parse("X"), Platform::Twitter);
        assert_eq!(Platform::parse("INSTAGRAM"), Platform::Instagram);
        assert_eq!(Platform::parse("email"), Platform::Email);
        assert_eq!(
            Platform::parse("Mastodon"),
            Platform::Other("mastodon".to_string())
        );
    }

    #[test]
    fn test_default_time_slots() {
        assert_eq!(Platform::LinkedIn.default_time_slot(), "9:00 AM");
        assert_eq!(Platform::Twitter.default_time_slot(), "12:00 PM");
        assert_eq!(Platform::Instagram.default_time_slot(), "6:00 PM");
        assert_eq!(Platform::Email.default_time_slot(), "10:00 AM");
        assert_eq!(
            Platform::Other("blog".to_string()).default_time_slot(),
            "9:00 AM"
        );
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 280), None);
        assert_eq!(truncate_with_ellipsis(&"x".repeat(280), 280), None);

        let cut = truncate_with_ellipsis(&"x".repeat(300), 280).unwrap();
        assert_eq!(cut.chars().count(), 280);
        assert!(cut.ends_with("..."));
        assert!(cut.starts_with(&"x".repeat(277)));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let cut = truncate_with_ellipsis(&"🚀".repeat(10), 5).unwrap();
        assert_eq!(cut, "🚀🚀...");
    }

    #[test]
    fn test_topic_hashtag() {
        assert_eq!(topic_hashtag("AI marketing"), "#AImarketing");
        assert_eq!(topic_hashtag("ROI: the basics"), "#ROIthebasics");
    }
}
