pub mod embed;
pub mod interactive;
pub mod utility;

use tracing::debug;
use twilight_model::gateway::payload::incoming::MessageCreate;

use rusty_core::{COMMAND_PREFIX, Context};

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    interactive::menu::META,
    interactive::paginate::META,
    interactive::counter::META,
    interactive::confirm::META,
    // Add new commands here
];

/// A prefixed command split into its lowercase name and trimmed arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: String,
    pub arg1: Option<&'a str>,
    pub arg_tail: Option<&'a str>,
}

/// Split `!name first rest...` into its parts. `None` when the prefix is missing.
pub fn parse_invocation(content: &str) -> Option<Invocation<'_>> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let name = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let (arg1, arg_tail) = match rest {
        Some(value) => {
            let mut args = value.splitn(2, char::is_whitespace);
            let first = args.next().filter(|arg| !arg.is_empty());
            let tail = args
                .next()
                .map(str::trim)
                .filter(|remaining| !remaining.is_empty());

            (first, tail)
        }
        None => (None, None),
    };

    Some(Invocation {
        name,
        arg1,
        arg_tail,
    })
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.clone();
    let Some(Invocation {
        name,
        arg1,
        arg_tail,
    }) = parse_invocation(&content)
    else {
        return Ok(());
    };

    debug!(command = %name, author = msg.author.id.get(), "dispatching command");
    match name.as_str() {
        "ping" => utility::ping::run(ctx, msg).await?,
        "help" => utility::help::run(ctx, msg, arg1).await?,
        "usage" => utility::usage::run(ctx, msg, arg1).await?,

        "menu" => interactive::menu::run(ctx, msg).await?,
        "paginate" => interactive::paginate::run(ctx, msg, arg1, arg_tail).await?,
        "counter" => interactive::counter::run(ctx, msg, arg1).await?,
        "confirm" => interactive::confirm::run(ctx, msg, arg1, arg_tail).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}
