//! Dashboard snapshot models.
//!
//! The dashboard is four independent read-only sections: live metrics,
//! predictions, regional rankings and a campaign banner. Each has a
//! `from_json` normalizer that coalesces missing or malformed fields into the
//! display defaults once, right after parsing.

use serde::Serialize;
use serde_json::Value;

/// Severity bucket used to color a metric or ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Good,
    Moderate,
    Elevated,
    Severe,
    Cool,
}

/// The metrics the live-data endpoint reports, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricKind {
    AirQuality,
    WaterQuality,
    Temperature,
}

impl MetricKind {
    pub const ALL: [Self; 3] = [Self::AirQuality, Self::WaterQuality, Self::Temperature];

    /// JSON key of this metric in the live-data body.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::AirQuality => "aqi",
            Self::WaterQuality => "waterQuality",
            Self::Temperature => "temperature",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AirQuality => "Air Quality Index (AQI)",
            Self::WaterQuality => "River Water Quality",
            Self::Temperature => "Ambient Temperature",
        }
    }

    /// Monitoring location shown when the reading carries no details.
    #[must_use]
    pub const fn default_details(self) -> &'static str {
        match self {
            Self::AirQuality => "Roseau Capital Average",
            Self::WaterQuality => "Layou River Monitoring Point",
            Self::Temperature => "Canefield Airport Vicinity",
        }
    }

    /// Level of a reading with no leading number, the last band of each scale.
    #[must_use]
    pub const fn unreadable_level(self) -> Level {
        match self {
            Self::AirQuality => Level::Severe,
            Self::WaterQuality => Level::Elevated,
            Self::Temperature => Level::Moderate,
        }
    }

    /// Classifies a numeric reading.
    #[must_use]
    pub fn classify(self, value: f64) -> Level {
        match self {
            Self::AirQuality => {
                let aqi = value.trunc();
                if aqi <= 50.0 {
                    Level::Good
                } else if aqi <= 100.0 {
                    Level::Moderate
                } else if aqi <= 150.0 {
                    Level::Elevated
                } else {
                    Level::Severe
                }
            }
            Self::WaterQuality => {
                let purity = value.trunc();
                if purity >= 90.0 {
                    Level::Good
                } else if purity >= 70.0 {
                    Level::Moderate
                } else {
                    Level::Elevated
                }
            }
            Self::Temperature => {
                if value >= 28.0 {
                    Level::Elevated
                } else if value <= 22.0 {
                    Level::Cool
                } else {
                    Level::Moderate
                }
            }
        }
    }
}

/// A single live environmental reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveMetric {
    pub kind: MetricKind,
    pub name: &'static str,
    pub value: String,
    pub unit: String,
    pub details: String,
    pub level: Level,
}

impl LiveMetric {
    /// Extracts the known metrics from a live-data body.
    ///
    /// A metric whose entry is missing, or lacks `value` or `unit`, is left out.
    #[must_use]
    pub fn list_from_json(body: &Value) -> Vec<Self> {
        MetricKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let entry = body.get(kind.key())?;
                let value = display_scalar(entry.get("value")?)?;
                let unit = display_scalar(entry.get("unit")?)?;
                let details = text_field(entry, "details")
                    .unwrap_or_else(|| kind.default_details().to_string());
                let level = leading_number(&value).map_or(kind.unreadable_level(), |n| kind.classify(n));

                Some(Self {
                    kind,
                    name: kind.display_name(),
                    value,
                    unit,
                    details,
                    level,
                })
            })
            .collect()
    }
}

/// Icon shown next to a prediction card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PredictionIcon {
    #[default]
    Alert,
    Chart,
}

impl PredictionIcon {
    fn from_name(name: Option<&str>) -> Self {
        match name.map(str::to_ascii_lowercase).as_deref() {
            Some("chart") => Self::Chart,
            _ => Self::Alert,
        }
    }
}

/// An environmental forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub id: Option<String>,
    pub kind: String,
    pub prediction: String,
    pub location: String,
    pub timeframe: String,
    pub confidence: String,
    pub details: String,
    pub icon: PredictionIcon,
}

impl Prediction {
    /// Normalizes the predictions array. Non-object entries are dropped.
    #[must_use]
    pub fn list_from_json(body: &Value) -> Vec<Self> {
        body.as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.is_object())
                    .map(|entry| Self {
                        id: entry.get("id").and_then(display_scalar),
                        kind: text_field(entry, "type").unwrap_or_default(),
                        prediction: text_field(entry, "prediction").unwrap_or_default(),
                        location: text_field(entry, "location").unwrap_or_default(),
                        timeframe: text_field(entry, "timeframe").unwrap_or_default(),
                        confidence: entry
                            .get("confidence")
                            .and_then(display_scalar)
                            .unwrap_or_default(),
                        details: text_field(entry, "details").unwrap_or_default(),
                        icon: PredictionIcon::from_name(entry.get("iconName").and_then(Value::as_str)),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Direction a region's score is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    #[must_use]
    pub const fn arrow(self) -> char {
        match self {
            Self::Up => '▲',
            Self::Down => '▼',
            Self::Stable => '●',
        }
    }
}

/// Score band driving the ranking bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
}

impl ScoreBand {
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score < 50.0 {
            Self::Poor
        } else if score < 80.0 {
            Self::Fair
        } else {
            Self::Good
        }
    }
}

/// One row of the regional ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRanking {
    /// 1-based rank, taken from the row's position in the response.
    pub position: usize,
    pub id: Option<String>,
    pub name: String,
    pub details: String,
    /// Score clamped to `0..=100`.
    pub score: f64,
    /// The score as the API sent it, or `"N/A"`.
    pub raw_score: String,
    pub trend: Trend,
    pub band: ScoreBand,
}

impl RegionRanking {
    #[must_use]
    pub fn list_from_json(body: &Value) -> Vec<Self> {
        let Some(entries) = body.as_array() else {
            return Vec::new();
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let raw = entry.get("score").filter(|v| !v.is_null());
                let score = raw
                    .and_then(|v| match v {
                        Value::Number(n) => n.as_f64(),
                        Value::String(s) => s.trim().parse::<f64>().ok(),
                        _ => None,
                    })
                    .filter(|s| s.is_finite())
                    .unwrap_or(0.0)
                    .clamp(0.0, 100.0);

                let trend = match entry.get("trend").and_then(Value::as_str) {
                    Some("up") => Trend::Up,
                    Some("down") => Trend::Down,
                    _ => Trend::Stable,
                };

                Self {
                    position: index + 1,
                    id: entry.get("id").and_then(display_scalar),
                    name: text_field(entry, "name").unwrap_or_else(|| "N/A".to_string()),
                    details: text_field(entry, "details")
                        .unwrap_or_else(|| "No details available".to_string()),
                    score,
                    raw_score: raw.and_then(display_scalar).unwrap_or_else(|| "N/A".to_string()),
                    trend,
                    band: ScoreBand::for_score(score),
                }
            })
            .collect()
    }
}

/// Call-to-action banner. Every field falls back to the cleanup campaign copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignBanner {
    pub headline: String,
    pub description: String,
    pub cta_text: String,
    pub cta_link: String,
    pub text_color: String,
}

impl Default for CampaignBanner {
    fn default() -> Self {
        Self {
            headline: "Join Our Coastal Cleanup Campaign!".to_string(),
            description: "Help keep Dominica's beaches pristine. Join volunteers for our monthly cleanup."
                .to_string(),
            cta_text: "Register Now".to_string(),
            cta_link: "/register-cleanup".to_string(),
            text_color: "text-white".to_string(),
        }
    }
}

impl CampaignBanner {
    /// Overlays whatever the body provides on top of the defaults.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let defaults = Self::default();
        Self {
            headline: text_field(body, "headline").unwrap_or(defaults.headline),
            description: text_field(body, "description").unwrap_or(defaults.description),
            cta_text: text_field(body, "ctaText").unwrap_or(defaults.cta_text),
            cta_link: text_field(body, "ctaLink").unwrap_or(defaults.cta_link),
            text_color: text_field(body, "textColor").unwrap_or(defaults.text_color),
        }
    }
}

/// Non-empty string field.
fn text_field(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Strings and numbers rendered for display; anything else is absent.
fn display_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses the leading numeric part of a reading such as `"42"` or `"27.5°"`.
fn leading_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let end = raw
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(raw.len(), |(i, _)| i);
    raw[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metrics_without_value_or_unit_are_dropped() {
        let body = json!({
            "aqi": { "value": 42, "unit": "AQI" },
            "waterQuality": { "value": 88 },
            "temperature": { "value": "29.5", "unit": "°C", "details": "Portsmouth" }
        });
        let metrics = LiveMetric::list_from_json(&body);

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].kind, MetricKind::AirQuality);
        assert_eq!(metrics[0].details, "Roseau Capital Average");
        assert_eq!(metrics[0].level, Level::Good);
        assert_eq!(metrics[1].details, "Portsmouth");
        assert_eq!(metrics[1].level, Level::Elevated);
    }

    #[test]
    fn metric_thresholds() {
        assert_eq!(MetricKind::AirQuality.classify(100.0), Level::Moderate);
        assert_eq!(MetricKind::AirQuality.classify(150.9), Level::Elevated);
        assert_eq!(MetricKind::AirQuality.classify(151.0), Level::Severe);
        assert_eq!(MetricKind::WaterQuality.classify(90.0), Level::Good);
        assert_eq!(MetricKind::WaterQuality.classify(69.9), Level::Elevated);
        assert_eq!(MetricKind::Temperature.classify(22.0), Level::Cool);
        assert_eq!(MetricKind::Temperature.classify(25.0), Level::Moderate);
    }

    #[test]
    fn unreadable_values_take_the_last_band() {
        let body = json!({
            "aqi": { "value": "offline", "unit": "AQI" },
            "waterQuality": { "value": "--", "unit": "%" },
            "temperature": { "value": "n/a", "unit": "°C" }
        });
        let levels: Vec<Level> = LiveMetric::list_from_json(&body).iter().map(|m| m.level).collect();
        assert_eq!(levels, vec![Level::Severe, Level::Elevated, Level::Moderate]);
    }

    #[test]
    fn leading_number_ignores_suffixes() {
        assert_eq!(leading_number("27.5°"), Some(27.5));
        assert_eq!(leading_number("-3"), Some(-3.0));
        assert_eq!(leading_number("n/a"), None);
    }

    #[test]
    fn prediction_icon_defaults_to_alert() {
        let body = json!([
            { "type": "Flood Risk", "iconName": "CHART", "confidence": 0.8 },
            { "type": "Drought", "iconName": "sparkles" },
            "garbage"
        ]);
        let predictions = Prediction::list_from_json(&body);

        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].icon, PredictionIcon::Chart);
        assert_eq!(predictions[0].confidence, "0.8");
        assert_eq!(predictions[1].icon, PredictionIcon::Alert);
    }

    #[test]
    fn rankings_clamp_scores_and_fill_defaults() {
        let body = json!([
            { "name": "Roseau", "score": 130, "trend": "up" },
            { "score": "abc", "trend": "sideways" },
            { "name": "Portsmouth", "score": 65.5, "details": "North coast" },
            { "name": "Marigot" }
        ]);
        let rankings = RegionRanking::list_from_json(&body);

        assert_eq!(rankings[0].position, 1);
        assert_eq!(rankings[0].score, 100.0);
        assert_eq!(rankings[0].band, ScoreBand::Good);
        assert_eq!(rankings[1].name, "N/A");
        assert_eq!(rankings[1].details, "No details available");
        assert_eq!(rankings[1].score, 0.0);
        assert_eq!(rankings[1].raw_score, "abc");
        assert_eq!(rankings[1].trend, Trend::Stable);
        assert_eq!(rankings[2].band, ScoreBand::Fair);
        assert_eq!(rankings[3].raw_score, "N/A");
        assert_eq!(rankings[3].band, ScoreBand::Poor);
    }

    #[test]
    fn banner_overlays_provided_fields() {
        let banner = CampaignBanner::from_json(&json!({ "headline": "Plant a Tree", "ctaLink": "" }));
        assert_eq!(banner.headline, "Plant a Tree");
        assert_eq!(banner.cta_link, "/register-cleanup");
        assert_eq!(banner.cta_text, "Register Now");
    }
}
