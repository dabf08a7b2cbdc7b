use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{COMMANDS, CommandMeta};
use rusty_core::{COMMAND_PREFIX, Context};

pub const META: CommandMeta = CommandMeta {
    name: "usage",
    desc: "Show usage syntax for a specific command.",
    category: "utility",
    usage: "!usage <command>",
};

/// Reply text for `!usage`, given its optional argument.
fn usage_reply(arg1: Option<&str>) -> String {
    let Some(raw_name) = arg1 else {
        return format!("Usage: `{}`", META.usage);
    };

    let lookup = raw_name
        .trim()
        .trim_start_matches(COMMAND_PREFIX)
        .to_ascii_lowercase();

    match COMMANDS.iter().find(|command| command.name == lookup) {
        Some(command) => format!("Usage: `{}`", command.usage),
        None => format!("Unknown command: `{lookup}`"),
    }
}

/// Show usage for a specific command.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let out = usage_reply(arg1);
    ctx.http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}
