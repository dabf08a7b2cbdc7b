use twilight_model::gateway::payload::incoming::MessageCreate;

use rusty_collectors::{PageContent, PaginatorOptions, paginator};
use rusty_core::Context;

use super::post;
use crate::CommandMeta;
use crate::embed::paginate_lines;

pub const META: CommandMeta = CommandMeta {
    name: "paginate",
    desc: "Page through a `|`-separated list with reactions.",
    category: "interactive",
    usage: "!paginate [wrap] <item | item | ...>",
};

const ITEMS_PER_PAGE: usize = 5;

/// Split the raw arguments into the wrap flag and the list items.
fn parse_items(arg1: Option<&str>, arg_tail: Option<&str>) -> (bool, Vec<String>) {
    let wrap = arg1.is_some_and(|first| first.eq_ignore_ascii_case("wrap"));
    let raw = match (wrap, arg1, arg_tail) {
        (true, _, tail) => tail.unwrap_or_default().to_owned(),
        (false, Some(first), Some(tail)) => format!("{first} {tail}"),
        (false, Some(first), None) => first.to_owned(),
        (false, None, _) => String::new(),
    };

    let items = raw
        .split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .enumerate()
        .map(|(index, item)| format!("{}. {item}", index + 1))
        .collect();

    (wrap, items)
}

/// Show the list five items per page; ◀️ and ▶️ flip pages.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let (wrap, items) = parse_items(arg1, arg_tail);
    if items.is_empty() {
        let usage = format!("Usage: `{}`", META.usage);
        ctx.http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    }

    let pages: Vec<PageContent> = paginate_lines("List", &items, ITEMS_PER_PAGE, None)?
        .into_iter()
        .map(PageContent::embed)
        .collect();
    let Some(first) = pages.first() else {
        return Ok(());
    };
    let message = post(&ctx, msg.channel_id, first).await?;

    paginator(
        &ctx.collectors,
        PaginatorOptions::new(message, msg.author.id, pages)
            .collector(ctx.session)
            .wrap(wrap),
    )
    .await?;

    Ok(())
}
