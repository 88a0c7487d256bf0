use poise::CreateReply;
use reqwest::Client;
use serenity::all::{Colour, CreateAttachment, CreateEmbed, CreateEmbedFooter};
use tracing::{error, warn};

use crate::{
    Context, Error,
    config::Config,
    utils::{
        activity::{self, ActivityQuery, ActivitySuggestion, ActivityType},
        bot::{self, error_text},
        completion, image,
    },
};

const ACCENT_COLOUR: u32 = 0x8CD867;
const PENDING_DESCRIPTION: &str = ":arrows_clockwise:";
const IMAGE_FILENAME: &str = "image.jpg";
const IMAGE_CREDIT: &str = "Image generated using open journey.";

/// Snapshot of the activity reply. Each stage of the command derives a new
/// snapshot from the previous one; rendering is a pure function of the
/// snapshot, and every send replaces the prior rendering entirely.
#[derive(Debug, Clone, PartialEq)]
struct ReplyView {
    title: String,
    link: Option<String>,
    description: Option<String>,
    category: String,
    participants: String,
    image: Option<Vec<u8>>,
    footer: Option<&'static str>,
}

impl ReplyView {
    fn from_suggestion(suggestion: &ActivitySuggestion) -> Self {
        Self {
            title: suggestion.title.clone(),
            link: suggestion.link.clone(),
            description: Some(PENDING_DESCRIPTION.to_string()),
            category: suggestion.display_category(),
            participants: suggestion.participants.to_string(),
            image: None,
            footer: None,
        }
    }

    fn with_description(mut self, text: String) -> Self {
        self.description = Some(text);
        self
    }

    fn without_description(mut self) -> Self {
        self.description = None;
        self
    }

    fn with_image(mut self, bytes: Vec<u8>) -> Self {
        self.image = Some(bytes);
        self.footer = Some(IMAGE_CREDIT);
        self
    }

    fn embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .colour(Colour::new(ACCENT_COLOUR))
            .title(self.title.as_str())
            .field("Type", self.category.as_str(), true)
            .field("Participants", self.participants.as_str(), true);
        if let Some(description) = &self.description {
            embed = embed.description(description.as_str());
        }
        if let Some(link) = &self.link {
            embed = embed.url(link.as_str());
        }
        if self.image.is_some() {
            embed = embed.image(format!("attachment://{IMAGE_FILENAME}"));
        }
        if let Some(footer) = self.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }
        embed
    }

    fn reply(&self) -> CreateReply {
        let mut reply = CreateReply::default().embed(self.embed());
        if let Some(bytes) = &self.image {
            reply = reply.attachment(CreateAttachment::bytes(bytes.clone(), IMAGE_FILENAME));
        }
        reply
    }
}

#[poise::command(slash_command)]
pub async fn bored(
    ctx: Context<'_>,
    #[rename = "type"]
    #[description = "Type of activity you want to do!"]
    activity_type: Option<ActivityType>,
    #[description = "Do you not want to spend?"] free: Option<bool>,
    #[description = "Do you want to do it alone?"] solo: Option<bool>,
    #[description = "Send the response directly to you?"] ephemeral: Option<bool>,
) -> Result<(), Error> {
    let ephemeral = bot::defer_based_on_ephemeral(ctx, ephemeral).await?;

    let query = ActivityQuery {
        activity_type,
        free,
        solo,
    };
    let config = ctx.data().config.read().await.clone();
    let client = Client::new();

    let suggestion = match activity::fetch(&client, &config.activity_api_url, &query).await {
        Ok(suggestion) => suggestion,
        Err(e) => {
            error!("Activity fetch failed: {}", e);
            error_text(&ctx, ephemeral, "Couldn't fetch an activity, try again later!").await;
            return Ok(());
        }
    };

    let mut view = ReplyView::from_suggestion(&suggestion);
    let reply = ctx.send(view.reply().ephemeral(ephemeral)).await?;

    match describe_activity(&client, &config, &suggestion.title).await {
        Ok(text) => {
            view = view.with_description(text);
            reply.edit(ctx, view.reply()).await?;
        }
        Err(e) => {
            // Degrade to title and fields only, the image stage needs the
            // description stage to have succeeded.
            error!("Description generation failed: {}", e);
            view = view.without_description();
            reply.edit(ctx, view.reply()).await?;
            return Ok(());
        }
    }

    match generate_activity_image(&client, &config, &suggestion.title).await {
        Ok(bytes) => {
            view = view.with_image(bytes);
            reply.edit(ctx, view.reply()).await?;
        }
        Err(e) => {
            // Reply stays at its text-only state.
            error!("Image generation failed: {}", e);
        }
    }

    Ok(())
}

async fn describe_activity(client: &Client, config: &Config, title: &str) -> Result<String, Error> {
    let Some(api_key) = config.openai_token.as_deref() else {
        warn!("No openai token configured");
        return Err("no openai token configured".into());
    };

    Ok(completion::complete(
        client,
        &config.completion_api_url,
        api_key,
        &config.openai_model,
        &completion::description_prompt(title),
    )
    .await?)
}

async fn generate_activity_image(
    client: &Client,
    config: &Config,
    title: &str,
) -> Result<Vec<u8>, Error> {
    let Some(api_key) = config.openai_token.as_deref() else {
        return Err("no openai token configured".into());
    };
    let Some(hf_token) = config.huggingface_token.as_deref() else {
        warn!("No huggingface token configured");
        return Err("no huggingface token configured".into());
    };

    let prompt = completion::complete(
        client,
        &config.completion_api_url,
        api_key,
        &config.openai_model,
        &completion::image_prompt(title),
    )
    .await?;

    let bytes = image::generate(client, &config.image_api_url, hf_token, &prompt).await?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> ActivitySuggestion {
        serde_json::from_str(
            r#"{"activity":"Go for a walk","type":"recreational","participants":2}"#,
        )
        .unwrap()
    }

    #[test]
    fn first_view_shows_pending_placeholder() {
        let view = ReplyView::from_suggestion(&walk());
        assert_eq!(view.title, "Go for a walk");
        assert_eq!(view.category, "Recreational");
        assert_eq!(view.participants, "2");
        assert_eq!(view.description.as_deref(), Some(PENDING_DESCRIPTION));
        assert!(view.link.is_none());
        assert!(view.image.is_none());
        assert!(view.footer.is_none());
    }

    #[test]
    fn link_is_carried_into_the_view() {
        let mut suggestion = walk();
        suggestion.link = Some("https://example.com/walking".into());
        let view = ReplyView::from_suggestion(&suggestion);
        assert_eq!(view.link.as_deref(), Some("https://example.com/walking"));
    }

    #[test]
    fn description_replaces_placeholder() {
        let view = ReplyView::from_suggestion(&walk())
            .with_description("A calm stroll outside.".to_string());
        assert_eq!(view.description.as_deref(), Some("A calm stroll outside."));
        assert!(view.image.is_none());
        assert!(view.footer.is_none());
    }

    #[test]
    fn failed_description_clears_placeholder() {
        let view = ReplyView::from_suggestion(&walk()).without_description();
        assert!(view.description.is_none());
        assert!(view.image.is_none());
        assert!(view.footer.is_none());
    }

    #[test]
    fn image_attaches_bytes_and_credit() {
        let view = ReplyView::from_suggestion(&walk())
            .with_description("A calm stroll outside.".to_string())
            .with_image(vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(view.description.as_deref(), Some("A calm stroll outside."));
        assert_eq!(view.image.as_deref(), Some(&[0xFF, 0xD8, 0xFF][..]));
        assert_eq!(view.footer, Some(IMAGE_CREDIT));
    }

    #[test]
    fn snapshots_do_not_alias() {
        let first = ReplyView::from_suggestion(&walk());
        let second = first.clone().with_description("text".to_string());
        assert_eq!(first.description.as_deref(), Some(PENDING_DESCRIPTION));
        assert_ne!(first, second);
    }
}
