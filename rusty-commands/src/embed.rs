use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Build a plain embed with the bot's styling.
pub fn build_embed(title: &str, description: impl Into<String>) -> anyhow::Result<Embed> {
    let embed = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description)
        .validate()?
        .build();

    Ok(embed)
}

/// Build one page of a paginated embed, with a `Page x/y` footer when there
/// is more than one page.
pub fn build_paginated_embed(
    title: &str,
    description: impl Into<String>,
    page: usize,
    total_pages: usize,
    footer_note: Option<&str>,
) -> anyhow::Result<Embed> {
    let page = page.max(1);
    let total_pages = total_pages.max(1);

    let footer_text = match (total_pages > 1, footer_note.filter(|note| !note.is_empty())) {
        (true, Some(note)) => format!("Page {page}/{total_pages} • {note}"),
        (true, None) => format!("Page {page}/{total_pages}"),
        (false, Some(note)) => note.to_owned(),
        (false, None) => String::new(),
    };

    let builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    let embed = if footer_text.is_empty() {
        builder.validate()?.build()
    } else {
        let footer = EmbedFooterBuilder::new(footer_text).build();
        builder.footer(footer).validate()?.build()
    };

    Ok(embed)
}

/// Chunk `lines` into one embed per page, `per_page` lines each.
pub fn paginate_lines(
    title: &str,
    lines: &[String],
    per_page: usize,
    footer_note: Option<&str>,
) -> anyhow::Result<Vec<Embed>> {
    let total = total_pages(lines.len(), per_page);

    lines
        .chunks(per_page.max(1))
        .enumerate()
        .map(|(index, chunk)| {
            build_paginated_embed(title, chunk.join("\n"), index + 1, total, footer_note)
        })
        .collect()
}
