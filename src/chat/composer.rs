//! Keyword routing, chart summarization, and reply composition.

use serde::Deserialize;

/// Fixed speaker prefix on every reply.
pub const REPLY_PREFIX: &str = "Astrologer";

/// One topic: its trigger keywords and its fixed guidance text.
struct Topic {
    keywords: &'static [&'static str],
    guidance: &'static str,
}

/// Topic table in routing priority order. The first topic whose keyword
/// appears in the lower-cased message wins.
const TOPICS: [Topic; 4] = [
    Topic {
        keywords: &["career", "work"],
        guidance: "Saturn rewards patient, structured effort right now. Build \
                   foundations rather than chasing quick wins, and let your \
                   tenth house show what you are building toward.",
    },
    Topic {
        keywords: &["love", "relationship"],
        guidance: "Venus asks for honesty about what you actually need from \
                   the people closest to you. Say the quiet thing plainly and \
                   watch what your seventh house reflects back.",
    },
    Topic {
        keywords: &["purpose", "life"],
        guidance: "The discomfort you feel near unfamiliar territory is a \
                   compass, not a warning. Follow the pull of your node and \
                   take one concrete step toward it this week.",
    },
    Topic {
        keywords: &["health", "wellbeing"],
        guidance: "Mind your rhythms: rest while the Moon runs dark, push as \
                   it waxes. Small consistent habits will serve you better \
                   than grand resets.",
    },
];

const GENERIC_PROMPT: &str = "Tell me what is on your mind: work, love, \
                              purpose, or wellbeing, and I will read what \
                              your chart suggests.";

/// A chart as echoed back by a chat client.
///
/// Deserialized leniently: every field is optional, and anything missing is
/// simply left out of the summary. Clients send back the positions response
/// wholesale, so unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatChart {
    pub planets: Vec<ChatPlanet>,
    pub angles: Option<ChatAngles>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatPlanet {
    pub name: String,
    pub degree: Option<f64>,
    pub sign: Option<String>,
    pub house: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatAngles {
    pub asc: Option<ChatAngle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatAngle {
    pub degree: Option<f64>,
    pub sign: Option<String>,
}

/// One-line chart summary: Sun, Moon, then ascendant, each as
/// `"<Body> <degree>° <sign> H<house-or-dash>"`.
///
/// Missing or degraded entries are omitted, never an error; the worst case
/// is an empty string.
pub fn summarize(chart: &ChatChart) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);

    for wanted in ["Sun", "Moon"] {
        let entry = chart
            .planets
            .iter()
            .find(|p| p.name == wanted)
            .and_then(|p| format_entry(wanted, p.degree, p.sign.as_deref(), p.house));
        if let Some(line) = entry {
            parts.push(line);
        }
    }

    if let Some(asc) = chart.angles.as_ref().and_then(|a| a.asc.as_ref()) {
        if let Some(line) = format_entry("Asc", asc.degree, asc.sign.as_deref(), None) {
            parts.push(line);
        }
    }

    parts.join(", ")
}

fn format_entry(
    name: &str,
    degree: Option<f64>,
    sign: Option<&str>,
    house: Option<u8>,
) -> Option<String> {
    let degree = degree.filter(|d| d.is_finite())?;
    let sign = sign?;
    let house = house.map_or_else(|| "-".to_string(), |h| h.to_string());
    Some(format!("{} {:.1}° {} H{}", name, degree, sign, house))
}

/// Route a message to its guidance text.
///
/// Total: every input maps to exactly one of the five fixed strings, checked
/// in table priority order.
pub fn route(message: &str) -> &'static str {
    let lowered = message.to_lowercase();
    for topic in &TOPICS {
        if topic.keywords.iter().any(|k| lowered.contains(k)) {
            return topic.guidance;
        }
    }
    GENERIC_PROMPT
}

/// Compose the full reply for a message and chart.
pub fn compose(message: &str, chart: &ChatChart) -> String {
    format!(
        "{}: I see your chart: {}. {} What would you like to explore next?",
        REPLY_PREFIX,
        summarize(chart),
        route(message)
    )
}

// ============================================================================
// Tests
// ============================================================================
