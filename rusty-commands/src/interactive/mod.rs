pub mod confirm;
pub mod counter;
pub mod menu;
pub mod paginate;

use std::sync::Arc;

use rusty_collectors::{BotMessage, PageContent, TwilightMessage};
use rusty_core::Context;
use twilight_model::id::{Id, marker::ChannelMarker};

/// Post `page` and return it as the message a session will drive.
pub(crate) async fn post(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    page: &PageContent,
) -> anyhow::Result<Arc<dyn BotMessage>> {
    let message = TwilightMessage::send(Arc::clone(&ctx.http), channel_id, page).await?;
    Ok(Arc::new(message))
}
