//! Content template catalog.
//!
//! Templates use `{topic}` and `{audience}` placeholders.

/// Voice of generated copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Casual,
    Enthusiastic,
}

impl Tone {
    /// Map a free-form tone label onto a template family
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "casual" | "conversational" | "friendly" | "approachable" => Tone::Casual,
            "enthusiastic" | "exciting" | "energetic" | "persuasive" | "engaging" => {
                Tone::Enthusiastic
            }
            // professional, formal, insightful, informative, educational, anything else
            _ => Tone::Professional,
        }
    }

    pub fn templates(&self) -> &'static [&'static str] {
        match self {
            Tone::Professional => PROFESSIONAL_TEMPLATES,
            Tone::Casual => CASUAL_TEMPLATES,
            Tone::Enthusiastic => ENTHUSIASTIC_TEMPLATES,
        }
    }
}

pub const PROFESSIONAL_TEMPLATES: &[&str] = &[
    "New research reveals that {topic} is transforming how {audience} approach strategic decisions. Organizations implementing these advanced solutions are seeing up to 40% higher engagement and 25% improved ROI. Learn the key implementation frameworks that industry leaders are using to maintain competitive advantage.",
    "In today's data-driven marketplace, {audience} need to leverage {topic} to stay ahead. Our analysis of 500+ industry leaders shows that early adopters are experiencing 3X faster optimization and significantly higher conversion rates. Here's the strategic roadmap for implementation that's generating measurable results.",
    "The convergence of {topic} with traditional frameworks presents unprecedented opportunities for {audience}. Forward-thinking organizations are reducing development cycles by 60% while improving precision metrics. Discover the implementation pathway that leading companies are following for sustainable growth.",
];

pub const CASUAL_TEMPLATES: &[&str] = &[
    "Have you been wondering how {topic} could transform your results? We've been testing these approaches with clients across industries, and the outcomes are honestly impressive. One client saw their engagement metrics double in just 6 weeks! Here's what we're learning that you can apply right away...",
    "Let's talk about {topic} - it's completely reshaping possibilities for {audience} everywhere. We've collected insights from dozens of successful implementations, and there's a clear pattern emerging among top performers. The best part? The implementation pathway is more accessible than most realize!",
    "The {topic} revolution isn't coming—it's already here, and {audience} who are jumping in now are seeing fantastic outcomes. We've been tracking early adopters, and they're reporting an average 45% improvement in effectiveness. Here's your roadmap to joining their ranks.",
];

pub const ENTHUSIASTIC_TEMPLATES: &[&str] = &[
    "🚀 BREAKTHROUGH ALERT! {topic} is absolutely TRANSFORMING how {audience} connect with their market! Latest research shows a STAGGERING 87% improvement in key metrics when properly implemented! Don't miss this opportunity to revolutionize your approach!",
    "🔥 GAME-CHANGER for {audience}! {topic} is redefining what's possible in today's landscape! Organizations implementing these approaches are seeing INCREDIBLE results—some reporting 3X HIGHER conversion rates! Here's how YOU can harness this power! 🔥",
    "⚡ ATTENTION {audience}! The {topic} revolution is creating MASSIVE opportunities that most are missing! Exclusive analysis shows early adopters outperforming competitors by 155%! Don't get left behind—these insights will TRANSFORM your strategy! ⚡",
];

/// Closing paragraph appended to long-form copy
pub const LONG_FORM_CONTEXT: &str = "\n\nOur team has analyzed the latest trends in {topic} and compiled actionable strategies specifically designed for {audience}. The data reveals that companies implementing these approaches are consistently outperforming market averages across key metrics. By adopting these evidence-based methodologies, you can position your organization at the forefront of industry developments while optimizing resource allocation and maximizing return on investment.";

pub const LINKEDIN_HASHTAGS: &[&str] = &[
    "#Leadership",
    "#DigitalTransformation",
    "#Innovation",
    "#B2BMarketing",
];

pub const TWITTER_HASHTAGS: &[&str] = &["#MarketingStrategy"];

pub const INSTAGRAM_HASHTAGS: &[&str] = &[
    "#MarketingTips",
    "#BusinessStrategy",
    "#DigitalMarketing",
    "#GrowthHacking",
];

/// Hand-written copy replacing the template body for one platform and
/// audience pairing
#[derive(Debug, Clone, Copy)]
pub struct AudienceOverride {
    pub audience_keyword: &'static str,
    pub short: &'static str,
    pub medium: &'static str,
    pub long: &'static str,
    pub hashtags: &'static [&'static str],
}

impl AudienceOverride {
    pub fn matches(&self, audience: &str) -> bool {
        audience
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == self.audience_keyword || word == format!("{}s", self.audience_keyword))
    }

    pub fn body(&self, length: &str) -> &'static str {
        match length.trim().to_lowercase().as_str() {
            "short" => self.short,
            "long" => self.long,
            _ => self.medium,
        }
    }
}

/// LinkedIn copy for finance leaders
pub const LINKEDIN_CFO_OVERRIDE: AudienceOverride = AudienceOverride {
    audience_keyword: "cfo",
    short: "AI is changing the role of the CFO. Here's how #CFOs can use it. #AIinFinance",
    medium: "CFOs are increasingly leveraging AI to drive strategic financial decisions. From automating routine tasks to providing predictive insights, AI empowers CFOs to optimize resource allocation, mitigate risks, and enhance overall financial performance. #CFO #AIinFinance #FinanceTransformation",
    long: "CFOs are at the forefront of digital transformation, with AI emerging as a crucial tool for strategic financial management. By automating routine tasks, AI frees up CFOs to focus on higher-level analysis and decision-making. Predictive analytics, powered by AI, enable CFOs to forecast financial performance with greater accuracy, identify potential risks, and optimize resource allocation. Moreover, AI facilitates enhanced data visualization, providing CFOs with clear, actionable insights to drive growth and profitability. #CFO #AIinFinance #FinanceTransformation #DigitalTransformation #FinancialLeadership",
    hashtags: &[
        "#CFO",
        "#AIinFinance",
        "#FinancialLeadership",
        "#DigitalTransformation",
        "#FinanceInnovation",
    ],
};

/// Substitute `{topic}` and `{audience}`
pub fn fill(template: &str, topic: &str, audience: &str) -> String {
    template
        .replace("{topic}", topic)
        .replace("{audience}", audience)
}
