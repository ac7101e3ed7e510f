use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Delivery mode of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
    Hybrid,
}

impl FromStr for EventMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(format!(
                "invalid mode '{}', expected one of online, offline, hybrid",
                other
            )),
        }
    }
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Hybrid => "hybrid",
        };
        f.write_str(s)
    }
}

/// Scalar event fields collected from the submission form, already typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetails {
    pub title: String,
    pub overview: String,
    pub description: String,
    pub venue: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub mode: EventMode,
    pub audience: String,
    pub organizer: String,
}

/// A fully assembled event waiting for persistence. The `image` field is the
/// hosted URL returned by the media uploader, never raw bytes.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub details: EventDetails,
    pub image: String,
    pub tags: Vec<String>,
    pub agenda: Vec<String>,
}

impl NewEvent {
    /// Required string fields must be non-empty after trimming.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("title", &self.details.title),
            ("overview", &self.details.overview),
            ("description", &self.details.description),
            ("venue", &self.details.venue),
            ("location", &self.details.location),
            ("audience", &self.details.audience),
            ("organizer", &self.details.organizer),
            ("image", &self.image),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("empty required field(s): {}", missing.join(", ")))
        }
    }
}

/// Persisted event document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub title: String,
    pub overview: String,
    pub description: String,
    pub venue: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub mode: EventMode,
    pub audience: String,
    pub organizer: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub agenda: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Assign identity and creation time to a validated draft.
    pub fn from_draft(draft: NewEvent) -> Self {
        let NewEvent {
            details,
            image,
            tags,
            agenda,
        } = draft;

        Self {
            id: Uuid::new_v4(),
            title: details.title,
            overview: details.overview,
            description: details.description,
            venue: details.venue,
            location: details.location,
            date: details.date,
            time: details.time,
            mode: details.mode,
            audience: details.audience,
            organizer: details.organizer,
            image,
            tags,
            agenda,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_details() -> EventDetails {
        EventDetails {
            title: "RustConf".to_string(),
            overview: "Annual Rust conference".to_string(),
            description: "Two days of talks".to_string(),
            venue: "Convention Center".to_string(),
            location: "Portland".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            mode: EventMode::Hybrid,
            audience: "Developers".to_string(),
            organizer: "Rust Foundation".to_string(),
        }
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("online".parse::<EventMode>().unwrap(), EventMode::Online);
        assert_eq!("Hybrid".parse::<EventMode>().unwrap(), EventMode::Hybrid);
        assert!("in-person".parse::<EventMode>().is_err());
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EventMode::Offline).unwrap(),
            "\"offline\""
        );
        let parsed: EventMode = serde_json::from_str("\"hybrid\"").unwrap();
        assert_eq!(parsed, EventMode::Hybrid);
    }

    #[test]
    fn validate_accepts_complete_draft() {
        let draft = NewEvent {
            details: sample_details(),
            image: "https://res.cloudinary.com/demo/image/upload/v1/a.png".to_string(),
            tags: vec![],
            agenda: vec![],
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn validate_names_empty_fields() {
        let mut details = sample_details();
        details.title = "   ".to_string();
        details.venue = String::new();
        let draft = NewEvent {
            details,
            image: "https://example.com/a.png".to_string(),
            tags: vec![],
            agenda: vec![],
        };
        let err = draft.validate().unwrap_err();
        assert!(err.contains("title"));
        assert!(err.contains("venue"));
    }

    #[test]
    fn from_draft_assigns_identity_and_timestamp() {
        let draft = NewEvent {
            details: sample_details(),
            image: "https://example.com/a.png".to_string(),
            tags: vec!["rust".to_string()],
            agenda: vec!["Keynote".to_string()],
        };
        let event = Event::from_draft(draft);
        assert_eq!(event.title, "RustConf");
        assert_eq!(event.image, "https://example.com/a.png");
        assert_eq!(event.tags, vec!["rust".to_string()]);
        assert!(event.created_at <= Utc::now());
    }

    #[test]
    fn event_document_uses_underscore_id() {
        let draft = NewEvent {
            details: sample_details(),
            image: "https://example.com/a.png".to_string(),
            tags: vec![],
            agenda: vec![],
        };
        let event = Event::from_draft(draft);
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("id").is_none());
    }
}
