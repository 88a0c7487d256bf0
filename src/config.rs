use std::{io::Write, path::Path};

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub discord_token: String,
    pub openai_token: Option<String>,
    pub huggingface_token: Option<String>,
    pub openai_model: String,
    pub activity_api_url: String,
    pub completion_api_url: String,
    pub image_api_url: String,
    pub admin_list: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            openai_token: None,
            huggingface_token: None,
            openai_model: "text-davinci-003".into(),
            activity_api_url: "https://www.boredapi.com/api/activity".into(),
            completion_api_url: "https://api.openai.com/v1/completions".into(),
            image_api_url: "https://api-inference.huggingface.co/models/prompthero/openjourney-v4"
                .into(),
            admin_list: Vec::new(),
        }
    }
}

impl Config {
    pub async fn load_or_create(path: &str) -> tokio::io::Result<Self> {
        if Path::new(path).exists() {
            let data = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&data)?)
        } else {
            let discord_token = Self::ask("DISCORD TOKEN").await?;
            let openai_token = Self::ask_optional(
                "OPENAI TOKEN",
                Some("https://platform.openai.com/api-keys"),
            )
            .await?;
            let huggingface_token = Self::ask_optional(
                "HUGGINGFACE TOKEN",
                Some("https://huggingface.co/settings/tokens"),
            )
            .await?;

            let config = Self {
                discord_token,
                openai_token,
                huggingface_token,
                ..Default::default()
            };

            config.save(path).await?;
            Ok(config)
        }
    }

    async fn ask(prompt: &str) -> tokio::io::Result<String> {
        print!("{prompt} => ");
        std::io::stdout().flush().unwrap();

        let mut input = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut input)
            .await?;
        Ok(input.trim().to_owned())
    }

    async fn ask_optional(
        prompt: &str,
        help_url: Option<&str>,
    ) -> tokio::io::Result<Option<String>> {
        if let Some(url) = help_url {
            println!("{url}");
            println!("Keep empty to not set.");
        }

        let value = Self::ask(prompt).await?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    pub async fn save(&self, path: &str) -> tokio::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await
    }

    pub async fn reload(&mut self, path: &str) -> tokio::io::Result<()> {
        let data = tokio::fs::read_to_string(path).await?;
        *self = serde_json::from_str(&data)?;
        Ok(())
    }
}
