use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image api returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Asks the image model for a picture of `prompt`, returns raw image bytes.
pub async fn generate(
    client: &Client,
    url: &str,
    api_token: &str,
    prompt: &str,
) -> Result<Vec<u8>, ImageError> {
    let response = client
        .post(url)
        .bearer_auth(api_token)
        .json(&serde_json::json!({ "inputs": prompt }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ImageError::Status(response.status()));
    }

    Ok(response.bytes().await?.to_vec())
}
