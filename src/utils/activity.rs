use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum ActivityType {
    Education,
    Recreational,
    Social,
    #[name = "DIY"]
    Diy,
    Charity,
    Cooking,
    Relaxation,
    Music,
    Busywork,
}

impl ActivityType {
    pub fn api_value(&self) -> &'static str {
        match self {
            ActivityType::Education => "education",
            ActivityType::Recreational => "recreational",
            ActivityType::Social => "social",
            ActivityType::Diy => "diy",
            ActivityType::Charity => "charity",
            ActivityType::Cooking => "cooking",
            ActivityType::Relaxation => "relaxation",
            ActivityType::Music => "music",
            ActivityType::Busywork => "busywork",
        }
    }
}

/// Filters for the activity source. Absent fields mean "no constraint",
/// they never turn into empty query values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivityQuery {
    pub activity_type: Option<ActivityType>,
    pub free: Option<bool>,
    pub solo: Option<bool>,
}

impl ActivityQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.free == Some(true) {
            params.push(("price", "0.0".to_string()));
        }
        if self.solo == Some(true) {
            params.push(("participants", "1".to_string()));
        }
        if let Some(activity_type) = self.activity_type {
            params.push(("type", activity_type.api_value().to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySuggestion {
    #[serde(rename = "activity")]
    pub title: String,
    #[serde(rename = "type")]
    pub category: String,
    pub participants: u32,
    pub link: Option<String>,
}

impl ActivitySuggestion {
    /// Category with the first letter capitalized, for embed fields.
    pub fn display_category(&self) -> String {
        let mut chars = self.category.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("activity request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("activity api returned status {0}")]
    Status(reqwest::StatusCode),
}

pub async fn fetch(
    client: &Client,
    base_url: &str,
    query: &ActivityQuery,
) -> Result<ActivitySuggestion, ActivityError> {
    let response = client.get(base_url).query(&query.params()).send().await?;

    if !response.status().is_success() {
        return Err(ActivityError::Status(response.status()));
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_means_empty_params() {
        assert!(ActivityQuery::default().params().is_empty());
    }

    #[test]
    fn free_only_sends_exactly_price() {
        let query = ActivityQuery {
            free: Some(true),
            ..Default::default()
        };
        assert_eq!(query.params(), vec![("price", "0.0".to_string())]);
    }

    #[test]
    fn false_and_absent_flags_send_nothing() {
        let query = ActivityQuery {
            free: Some(false),
            solo: None,
            activity_type: None,
        };
        assert!(query.params().is_empty());
    }

    #[test]
    fn all_filters_present() {
        let query = ActivityQuery {
            activity_type: Some(ActivityType::Diy),
            free: Some(true),
            solo: Some(true),
        };
        assert_eq!(
            query.params(),
            vec![
                ("price", "0.0".to_string()),
                ("participants", "1".to_string()),
                ("type", "diy".to_string()),
            ]
        );
    }

    #[test]
    fn decodes_response_with_link() {
        let suggestion: ActivitySuggestion = serde_json::from_str(
            r#"{"activity":"Learn Rust","type":"education","participants":1,"link":"https://www.rust-lang.org"}"#,
        )
        .unwrap();
        assert_eq!(suggestion.title, "Learn Rust");
        assert_eq!(suggestion.category, "education");
        assert_eq!(suggestion.participants, 1);
        assert_eq!(suggestion.link.as_deref(), Some("https://www.rust-lang.org"));
    }

    #[test]
    fn decodes_response_without_link() {
        let suggestion: ActivitySuggestion = serde_json::from_str(
            r#"{"activity":"Go for a walk","type":"recreational","participants":2}"#,
        )
        .unwrap();
        assert!(suggestion.link.is_none());
        assert_eq!(suggestion.display_category(), "Recreational");
    }
}
