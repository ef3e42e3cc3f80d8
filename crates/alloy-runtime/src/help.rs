//! The built-in `help` command.
//!
//! `!help` lists every registered command as `<usage> - <summary>`;
//! `!help NAME` prints the usage of every command named `NAME` followed by the
//! first one's description. Output is delivered according to `help.response`.

use crate::handler::CommandContext;
use crate::message::Reply;
use alloy_command::help::{render_detail, render_listing};

/// Group the built-in help command is registered under.
pub const HELP_GROUP: &str = "builtin.help";

/// Handler of the built-in help command.
pub async fn show_help(ctx: CommandContext) -> Vec<Reply> {
    let prefix = ctx.prefix();
    let lines = match ctx.args().get(0) {
        Some(name) => render_detail(ctx.dispatcher(), name, prefix),
        None => render_listing(ctx.dispatcher().commands().map(|c| &**c), prefix),
    };
    lines.into_iter().map(|line| ctx.respond(line)).collect()
}
