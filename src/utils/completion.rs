use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token limit sent with every completion request.
pub const MAX_TOKENS: u32 = 100;

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

pub fn description_prompt(title: &str) -> String {
    format!(
        "Given activity, elaborate a bit in max 2 sentences about it. \nActivity: {title}\nSuggestion:"
    )
}

pub fn image_prompt(title: &str) -> String {
    format!(
        "Convert given activity into a description of an image in few words that can be used as a prompt to a text to image model. \nActivity: {title}\nImage Description:"
    )
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion api returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("completion api returned no choices")]
    NoChoices,
}

/// Runs one completion and returns the first choice's text, trimmed.
pub async fn complete(
    client: &Client,
    url: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String, CompletionError> {
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .json(&CompletionRequest {
            model,
            max_tokens: MAX_TOKENS,
            prompt,
        })
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(CompletionError::Status(response.status()));
    }

    let body: CompletionResponse = response.json().await?;
    first_choice(body)
}

fn first_choice(response: CompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text.trim().to_string())
        .ok_or(CompletionError::NoChoices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_prompt_is_fixed() {
        assert_eq!(
            description_prompt("Go for a walk"),
            "Given activity, elaborate a bit in max 2 sentences about it. \nActivity: Go for a walk\nSuggestion:"
        );
    }

    #[test]
    fn image_prompt_is_fixed() {
        assert_eq!(
            image_prompt("Go for a walk"),
            "Convert given activity into a description of an image in few words that can be used as a prompt to a text to image model. \nActivity: Go for a walk\nImage Description:"
        );
    }

    #[test]
    fn first_choice_is_trimmed() {
        let response: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"text":"  A calm stroll outside.  "}]}"#).unwrap();
        assert_eq!(first_choice(response).unwrap(), "A calm stroll outside.");
    }

    #[test]
    fn empty_choices_is_an_error() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_choice(response),
            Err(CompletionError::NoChoices)
        ));
    }

    #[test]
    fn request_body_shape() {
        let request = CompletionRequest {
            model: "text-davinci-003",
            max_tokens: MAX_TOKENS,
            prompt: "p",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "text-davinci-003", "max_tokens": 100, "prompt": "p"})
        );
    }
}
