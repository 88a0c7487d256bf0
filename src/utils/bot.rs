use poise::CreateReply;

use crate::{Context, Error};

/// Defers the response either ephemerally or normally, based on `direct`.
/// Returns `true` if ephemeral defer was used, otherwise `false`.
pub async fn defer_based_on_ephemeral(
    ctx: Context<'_>,
    direct: Option<bool>,
) -> Result<bool, Error> {
    match direct.unwrap_or(false) {
        true => {
            ctx.defer_ephemeral()
                .await
                .map_err(|e| Box::new(e) as Error)?;
            Ok(true)
        }
        false => {
            ctx.defer().await.map_err(|e| Box::new(e) as Error)?;
            Ok(false)
        }
    }
}

pub async fn is_admin(ctx: Context<'_>) -> Result<bool, Error> {
    let author_id = ctx.author().id.to_string();
    Ok(ctx
        .data()
        .config
        .read()
        .await
        .admin_list
        .contains(&author_id))
}

pub async fn error_text(ctx: &Context<'_>, ephemeral: bool, text: &str) {
    if let Err(e) = ctx
        .send(CreateReply::default().content(text).ephemeral(ephemeral))
        .await
    {
        tracing::error!("Failed to send error reply: {}", e);
    }
}
