use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use rusty_collectors::{CollectorHub, MessageEvent, ReactionEvent};
use rusty_commands::handle_message;
use rusty_core::{Config, Context};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    let config = Config::from_env()?;
    info!(?config, "configuration loaded");

    // One HTTP client and one collector hub shared by every command
    let http = Arc::new(Client::new(config.token.clone()));
    let collectors = Arc::new(CollectorHub::new());
    let ctx = Context::new(Arc::clone(&http), Arc::clone(&collectors), config.session_options());

    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::GUILD_MESSAGE_REACTIONS
        | Intents::DIRECT_MESSAGES
        | Intents::DIRECT_MESSAGE_REACTIONS
        | Intents::MESSAGE_CONTENT;

    let mut shard = Shard::new(ShardId::new(0, 1), config.token, intents);

    info!("Rusty is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("Rusty has successfully awoken!");
            }

            Event::ReactionAdd(reaction) => {
                collectors.dispatch_reaction(&ReactionEvent::from(&reaction.0));
            }
            Event::ReactionRemove(reaction) => {
                collectors.dispatch_reaction_remove(&ReactionEvent::from(&reaction.0));
            }
            Event::MessageDelete(deleted) => {
                collectors.message_deleted(deleted.id);
            }
            Event::MessageDeleteBulk(deleted) => {
                for id in deleted.ids {
                    collectors.message_deleted(id);
                }
            }

            Event::MessageCreate(msg) => {
                collectors.dispatch_message(&MessageEvent::from(&msg.0));

                // Prompts await user reactions, so commands must not block this loop
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "command failed");
                    }
                });
            }
            _ => {}
        }
    }

    Ok(())
}
