use std::time::Duration;

use twilight_model::gateway::payload::incoming::MessageCreate;

use rusty_collectors::{PageContent, YesNoOptions, yes_no_question};
use rusty_core::{Context, parse::parse_duration};

use super::post;
use crate::CommandMeta;
use crate::embed::build_embed;

pub const META: CommandMeta = CommandMeta {
    name: "confirm",
    desc: "Ask yourself a yes/no question and wait for the answer.",
    category: "interactive",
    usage: "!confirm [timeout] <question>",
};

/// Split an optional leading timeout off the question text.
fn split_timeout(arg1: Option<&str>, arg_tail: Option<&str>) -> (Option<Duration>, Option<String>) {
    match (arg1, arg1.and_then(parse_duration)) {
        (_, Some(timeout)) => (Some(timeout), arg_tail.map(ToOwned::to_owned)),
        (Some(first), None) => {
            let question = match arg_tail {
                Some(tail) => format!("{first} {tail}"),
                None => first.to_owned(),
            };
            (None, Some(question))
        }
        (None, None) => (None, None),
    }
}

/// Post a yes/no prompt, await the author's answer and report it.
///
/// No answer before the timeout counts as "no".
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let (timeout, question) = split_timeout(arg1, arg_tail);
    let Some(question) = question else {
        let usage = format!("Usage: `{}`", META.usage);
        ctx.http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let prompt = PageContent::embed(build_embed("Confirm", &question)?);
    let message = post(&ctx, msg.channel_id, &prompt).await?;

    let collector = match timeout {
        Some(timeout) => ctx.session.time(timeout),
        None => ctx.session,
    };
    let confirmed = yes_no_question(
        &ctx.collectors,
        YesNoOptions::new(message.clone(), msg.author.id).collector(collector),
    )
    .await?;

    let verdict = if confirmed { "Confirmed ✅" } else { "Cancelled ❌" };
    let result = PageContent::embed(build_embed(verdict, question)?);
    message.edit(&result).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_duration_becomes_the_timeout() {
        assert_eq!(
            split_timeout(Some("30s"), Some("Ship it?")),
            (Some(Duration::from_secs(30)), Some("Ship it?".to_owned()))
        );
        assert_eq!(split_timeout(Some("2m"), None), (Some(Duration::from_secs(120)), None));
    }

    #[test]
    fn other_words_belong_to_the_question() {
        assert_eq!(
            split_timeout(Some("Ship"), Some("it now?")),
            (None, Some("Ship it now?".to_owned()))
        );
        assert_eq!(split_timeout(None, None), (None, None));
    }
}
