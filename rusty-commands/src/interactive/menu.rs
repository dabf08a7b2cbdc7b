use twilight_model::gateway::payload::incoming::MessageCreate;

use rusty_collectors::{MenuOptions, Page, PageContent, PageTree, menu};
use rusty_core::Context;

use super::post;
use crate::CommandMeta;
use crate::embed::build_embed;

pub const META: CommandMeta = CommandMeta {
    name: "menu",
    desc: "Open an interactive guide navigated with reactions.",
    category: "interactive",
    usage: "!menu",
};

const BACK: &str = "↩️";

fn page(title: &str, body: &str) -> anyhow::Result<Page> {
    Ok(Page::new(PageContent::embed(build_embed(title, body)?)))
}

fn home() -> anyhow::Result<PageContent> {
    let embed = build_embed(
        "Guide",
        "📖 Read the guide\n⚙️ Set a greeting\n❌ Close this menu",
    )?;
    Ok(PageContent::embed(embed))
}

/// The page tree behind `!menu`.
pub fn guide_tree() -> anyhow::Result<PageTree> {
    let chapters = page("Chapters", "1️⃣ Collectors\n2️⃣ Menus\n\n↩️ Back")?
        .with_id("chapters")
        .with_reactions(["1️⃣", "2️⃣", BACK])
        .with_back_emoji(BACK)
        .with_child(
            "1️⃣",
            page(
                "Collectors",
                "A collector listens for reactions on one message until it hits \
                 its time, idle or item limit.",
            )?
            .with_id("collectors")
            .with_reactions([BACK])
            .with_back_emoji(BACK),
        )
        .with_child(
            "2️⃣",
            page(
                "Menus",
                "A menu walks a tree of pages. Each reaction moves you one page \
                 deeper and ↩️ takes you back.",
            )?
            .with_id("menus")
            .with_reactions([BACK])
            .with_back_emoji(BACK),
        );

    let greeting = page("Greeting", "Type the greeting you want to see.\n\n↩️ Back")?
        .with_id("greeting")
        .with_reactions([BACK])
        .with_back_emoji(BACK)
        .on_message(|controller, received| async move {
            let reply = build_embed("Greeting", format!("Hello, {}!", received.content))?;
            controller.message().edit(&PageContent::embed(reply)).await
        });

    let closed = page("Guide closed", "Run `!menu` to open it again.")?
        .with_id("closed")
        .clear_reactions(true)
        .on_react(|controller, _| async move {
            controller.stop();
            Ok(())
        });

    Ok(PageTree::new()
        .with("📖", chapters)
        .with("⚙️", greeting)
        .with("❌", closed))
}

/// Post the guide and hand it to a menu session for the author.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let pages = guide_tree()?;
    let message = post(&ctx, msg.channel_id, &home()?).await?;

    menu(
        &ctx.collectors,
        MenuOptions::new(message, msg.author.id, pages).collector(ctx.session),
    )
    .await?;

    Ok(())
}
