use twilight_model::gateway::payload::incoming::MessageCreate;

use rusty_collectors::{PageContent, PaginatorOptions, paginator};
use rusty_core::Context;

use crate::embed::build_paginated_embed;
use crate::interactive::post;
use crate::{COMMANDS, CommandMeta};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

const HELP_TITLE: &str = "Available Commands";
const HELP_FOOTER: &str = "◀️ ▶️ to switch category";

/// Categories in display order.
fn categories() -> Vec<&'static str> {
    let mut categories: Vec<&str> = COMMANDS.iter().map(|command| command.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One description per category, commands sorted by name.
fn category_description(category: &str) -> String {
    let mut commands: Vec<&CommandMeta> = COMMANDS
        .iter()
        .filter(|command| command.category == category)
        .collect();
    commands.sort_unstable_by(|left, right| left.name.cmp(right.name));

    let lines: Vec<String> = commands
        .iter()
        .map(|command| format!("• !{} - {}", command.name, command.desc))
        .collect();

    format!("**{}**\n{}", display_category(category), lines.join("\n"))
}

fn unknown_category_message(wanted: &str, categories: &[&str]) -> String {
    format!(
        "Unknown category `{wanted}`. Available: {}",
        categories
            .iter()
            .map(|category| format!("`{category}`"))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

/// Render the command catalog, one category per page.
///
/// A category argument opens the paginator on that category's page instead of
/// the first one.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let categories = categories();
    let wanted = arg1.map(str::to_ascii_lowercase);

    let selected = match wanted.as_deref() {
        Some(wanted) => match categories.iter().find(|category| **category == wanted) {
            Some(category) => vec![*category],
            None => {
                let out = unknown_category_message(wanted, &categories);
                ctx.http.create_message(msg.channel_id).content(&out).await?;
                return Ok(());
            }
        },
        None => categories,
    };

    let total = selected.len();
    let pages = selected
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let embed = build_paginated_embed(
                HELP_TITLE,
                category_description(category),
                index + 1,
                total,
                (total > 1).then_some(HELP_FOOTER),
            )?;
            Ok(PageContent::embed(embed))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let Some(first) = pages.first() else {
        ctx.http
            .create_message(msg.channel_id)
            .content("No commands available.")
            .await?;
        return Ok(());
    };
    let message = post(&ctx, msg.channel_id, first).await?;

    if pages.len() > 1 {
        paginator(
            &ctx.collectors,
            PaginatorOptions::new(message, msg.author.id, pages).collector(ctx.session),
        )
        .await?;
    }

    Ok(())
}
