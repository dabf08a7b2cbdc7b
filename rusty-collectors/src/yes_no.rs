//! One-shot yes/no prompt answered with a reaction.

use tracing::{debug, warn};

use crate::controller::react_all;
use crate::error::CollectorError;
use crate::filter::ReactionFilter;
use crate::hub::CollectorHub;
use crate::options::YesNoOptions;

/// Ask a yes/no question on the bot message.
///
/// Resolves `true` only when the first collected reaction is the "yes" key.
/// Nothing collected before the collector's limits is a "no". Failing to clean
/// up the reactions afterwards is logged and does not discard the answer.
pub async fn yes_no_question(
    hub: &CollectorHub,
    options: YesNoOptions,
) -> Result<bool, CollectorError> {
    options.validate()?;
    let YesNoOptions {
        message,
        user_id,
        reactions,
        collector: collector_options,
        delete_reaction,
        delete_all_on_end,
    } = options;

    let filter = ReactionFilter::new(user_id, reactions.iter().cloned());
    let mut collector = hub.reaction_collector(
        message.id(),
        move |event| filter.matches(event),
        collector_options.max(1),
    );

    react_all(message.as_ref(), &reactions).await?;

    let answer = collector.next().await;
    let reason = collector.end_reason();
    drop(collector);

    let Some(event) = answer else {
        debug!(?reason, message_id = message.id().get(), "yes/no question got no answer");
        return Ok(false);
    };

    let message_id = message.id().get();
    if delete_reaction
        && let Err(source) = message.remove_reaction(&event.key, user_id).await
    {
        warn!(?source, message_id, "failed to remove yes/no answer reaction");
    }
    if delete_all_on_end
        && let Err(source) = message.clear_reactions().await
    {
        warn!(?source, message_id, "failed to clear yes/no reactions");
    }

    Ok(reactions.first() == Some(&event.key))
}
