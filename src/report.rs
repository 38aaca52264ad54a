use crate::decision::{Decision, DecisionResult, Threshold};
use crate::schema::REPORT_VERSION;
use chrono::{DateTime, TimeZone};
use colored::{ColoredString, Colorize};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Layout of `completed_at`, e.g. `2026-10-15 09:30:05`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Guidance {
    pub title: String,
    pub summary: String,
    pub indicators: Vec<String>,
    /// `Recommendation` for fake and uncertain decisions, `Note` for real ones.
    pub recommendation_label: String,
    pub recommendation: String,
}

/// Everything a front end needs to show for one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    pub version: String,
    pub decision: Decision,
    pub headline: String,
    pub headline_ar: String,
    pub icon: String,
    /// Hex color for the decision card and gauge.
    pub color: String,
    pub confidence: f64,
    pub confidence_display: String,
    pub prob_real: f64,
    pub prob_real_display: String,
    pub prob_fake: f64,
    pub prob_fake_display: String,
    pub threshold: f64,
    pub threshold_display: String,
    /// Character count of the analysed text, when there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chars: Option<usize>,
    /// Local time the analysis finished; absent for bare decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub guidance: Guidance,
}

struct Presentation {
    headline: &'static str,
    headline_ar: &'static str,
    icon: &'static str,
    color: &'static str,
}

fn presentation(decision: Decision) -> Presentation {
    match decision {
        Decision::Real => Presentation {
            headline: "Real News Detected",
            headline_ar: "تم اكتشاف خبر حقيقي",
            icon: "✅",
            color: "#10b981",
        },
        Decision::Fake => Presentation {
            headline: "Fake News Detected",
            headline_ar: "تم اكتشاف خبر مزيف",
            icon: "🚨",
            color: "#ef4444",
        },
        Decision::Uncertain => Presentation {
            headline: "Uncertain — Requires Review",
            headline_ar: "غير مؤكد — يحتاج إلى مراجعة",
            icon: "⚠️",
            color: "#f59e0b",
        },
    }
}

fn guidance(decision: Decision, threshold_display: &str) -> Guidance {
    let (title, summary, indicators, label, recommendation) = match decision {
        Decision::Uncertain => (
            "Low Confidence Alert".to_string(),
            format!(
                "The model's confidence is below the threshold ({}). This could indicate:",
                threshold_display
            ),
            [
                "Ambiguous or mixed content patterns",
                "Text characteristics falling between fake and real news patterns",
                "Unusual writing style or structure",
            ],
            "Recommendation",
            "Exercise caution and verify through additional trusted sources.",
        ),
        Decision::Fake => (
            "Fake News Indicators Detected".to_string(),
            "The analysis suggests patterns commonly associated with misinformation:".to_string(),
            [
                "Sensationalized language or claims",
                "Lack of credible source attribution",
                "Emotional manipulation tactics",
            ],
            "Recommendation",
            "Verify claims through official sources and fact-checking organizations.",
        ),
        Decision::Real => (
            "Authentic News Indicators Detected".to_string(),
            "The analysis suggests patterns commonly associated with legitimate news:".to_string(),
            [
                "Balanced and objective language",
                "Credible source references",
                "Factual presentation style",
            ],
            "Note",
            "Always maintain critical thinking and cross-reference important information.",
        ),
    };

    Guidance {
        title,
        summary,
        indicators: indicators.iter().map(|s| s.to_string()).collect(),
        recommendation_label: label.to_string(),
        recommendation: recommendation.to_string(),
    }
}

/// Fraction as a percentage, e.g. `0.9` with one decimal is `90.0%`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

pub fn format_probability(value: f64) -> String {
    format!("{:.4}", value)
}

impl Report {
    pub fn new(result: &DecisionResult, threshold: Threshold) -> Self {
        let p = presentation(result.label);
        let threshold_display = format_percent(threshold.value(), 0);
        Self {
            version: REPORT_VERSION.to_string(),
            decision: result.label,
            headline: p.headline.to_string(),
            headline_ar: p.headline_ar.to_string(),
            icon: p.icon.to_string(),
            color: p.color.to_string(),
            confidence: result.confidence,
            confidence_display: format_percent(result.confidence, 1),
            prob_real: result.prob_real,
            prob_real_display: format_probability(result.prob_real),
            prob_fake: result.prob_fake,
            prob_fake_display: format_probability(result.prob_fake),
            threshold: threshold.value(),
            guidance: guidance(result.label, &threshold_display),
            threshold_display,
            chars: None,
            completed_at: None,
        }
    }

    pub fn with_chars(mut self, chars: usize) -> Self {
        self.chars = Some(chars);
        self
    }

    pub fn with_completed_at<Tz>(mut self, at: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.completed_at = Some(at.format(TIMESTAMP_FORMAT).to_string());
        self
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Sorted `key = value` lines without decoration.
    pub fn render_raw(&self) -> String {
        let mut items: Vec<(&str, String)> = vec![
            ("confidence", self.confidence_display.clone()),
            ("decision", self.decision.to_string()),
            ("prob_fake", self.prob_fake_display.clone()),
            ("prob_real", self.prob_real_display.clone()),
            ("threshold", self.threshold_display.clone()),
        ];
        if let Some(chars) = self.chars {
            items.push(("chars", chars.to_string()));
        }
        if let Some(at) = &self.completed_at {
            items.push(("completed_at", at.clone()));
        }
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
            .into_iter()
            .map(|(k, v)| format!("{} = {}", k, v))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_human(&self, color: bool) -> String {
        let mut out = String::new();

        let headline = format!("{} {}", self.icon, self.headline);
        out.push_str(&paint(&headline, self.decision, color));
        out.push('\n');
        out.push_str("   ");
        out.push_str(&self.headline_ar);
        out.push_str("\n\n");

        out.push_str(&heading("Scores:", color));
        let mut rows = vec![
            ("confidence", self.confidence_display.clone()),
            ("real", self.prob_real_display.clone()),
            ("fake", self.prob_fake_display.clone()),
            ("threshold", self.threshold_display.clone()),
        ];
        if let Some(chars) = self.chars {
            rows.push(("characters", chars.to_string()));
        }
        for (k, v) in rows {
            out.push_str(&format!("\n  {} = {}", k, v));
        }
        out.push_str("\n\n");

        out.push_str(&heading(&self.guidance.title, color));
        out.push_str("\n  ");
        out.push_str(&self.guidance.summary);
        for indicator in &self.guidance.indicators {
            out.push_str("\n  - ");
            out.push_str(indicator);
        }
        out.push_str("\n  ");
        out.push_str(&self.guidance.recommendation_label);
        out.push_str(": ");
        out.push_str(&self.guidance.recommendation);

        if let Some(at) = &self.completed_at {
            out.push_str("\n\n🕒 Analysis completed at: ");
            out.push_str(at);
        }

        out
    }
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().cyan().to_string()
    } else {
        text.to_string()
    }
}

fn paint(text: &str, decision: Decision, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    let painted: ColoredString = match decision {
        Decision::Real => text.green(),
        Decision::Fake => text.red(),
        Decision::Uncertain => text.yellow(),
    };
    painted.bold().to_string()
}
