mod commands;
mod config;
mod utils;

use serenity::all::{ClientBuilder, GatewayIntents};
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::config::Config;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

pub struct Data {
    pub config: RwLock<Config>,
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {:?}", error),
        error => {
            error!("ERROR: {:#?}", error.to_string());
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::load_or_create("config.json")
        .await
        .expect("FAILED TO LOAD CONFIG!");
    let token = config.discord_token.clone();

    let opt = poise::FrameworkOptions {
        commands: vec![commands::bored::bored(), commands::misc::reload_settings()],
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: None,
            ..Default::default()
        },
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                info!("STARTING COMMAND: {}", ctx.command().qualified_name);
            })
        },
        post_command: |ctx| {
            Box::pin(async move {
                info!("FINISHED COMMAND: {}", ctx.command().qualified_name);
            })
        },
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("LOGGED IN AS: {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Data {
                    config: RwLock::new(config),
                })
            })
        })
        .options(opt)
        .build();

    let intents = GatewayIntents::non_privileged();

    let client = ClientBuilder::new(token, intents)
        .framework(framework)
        .await;

    client.unwrap().start().await.unwrap();
}
