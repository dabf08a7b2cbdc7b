use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicI64, Ordering},
};

use twilight_model::gateway::payload::incoming::MessageCreate;

use rusty_collectors::{
    BotMessage, CollectorBinding, PageContent, QuestionOptions, ReactionMap, question,
};
use rusty_core::Context;

use super::post;
use crate::CommandMeta;
use crate::embed::build_embed;

pub const META: CommandMeta = CommandMeta {
    name: "counter",
    desc: "A counter you drive with reactions.",
    category: "interactive",
    usage: "!counter [start]",
};

fn render(value: i64) -> anyhow::Result<PageContent> {
    let embed = build_embed("Counter", format!("**{value}**\n\n🔼 +1 • 🔽 -1 • 🛑 stop"))?;
    Ok(PageContent::embed(embed))
}

fn with_step(
    map: ReactionMap,
    key: &'static str,
    message: &Arc<dyn BotMessage>,
    value: &Arc<AtomicI64>,
    delta: i64,
) -> ReactionMap {
    let message = Arc::clone(message);
    let value = Arc::clone(value);
    map.on(key, move |_| {
        let message = Arc::clone(&message);
        let value = Arc::clone(&value);
        async move {
            let next = value.fetch_add(delta, Ordering::SeqCst).saturating_add(delta);
            message.edit(&render(next)?).await
        }
    })
}

/// Post a counter and adjust it as the author presses 🔼 or 🔽. 🛑 ends it.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(start) = arg1.map_or(Some(0), |raw| raw.parse::<i64>().ok()) else {
        let usage = format!("Usage: `{}`", META.usage);
        ctx.http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let message = post(&ctx, msg.channel_id, &render(start)?).await?;
    let value = Arc::new(AtomicI64::new(start));
    let session: Arc<OnceLock<CollectorBinding>> = Arc::new(OnceLock::new());

    let stopper = Arc::clone(&session);
    let reactions = with_step(ReactionMap::new(), "🔼", &message, &value, 1);
    let reactions = with_step(reactions, "🔽", &message, &value, -1).on("🛑", move |_| {
        let stopper = Arc::clone(&stopper);
        async move {
            if let Some(binding) = stopper.get() {
                binding.stop();
            }
            Ok(())
        }
    });

    let binding = question(
        &ctx.collectors,
        QuestionOptions::new(message, msg.author.id, reactions)
            .collector(ctx.session)
            .delete_reaction(true)
            .delete_all_on_end(true),
    )
    .await?;
    let _ = session.set(binding);

    Ok(())
}
