//! Command Bot Example
//!
//! A console bot showing how Alloy commands are defined, matched and answered.
//! Every line typed on stdin is handled as a chat message from `--sender`,
//! optionally posted in `--channel`; the replies are printed back.
//!
//! # Commands
//!
//! ```text
//! !echo TEXT               - repeats TEXT
//! !ping                    - pong
//! !roll <dice>             - rolls dice written as 2d6
//! !paint [red|green|blue]  - paints the wall
//! !remind me TEXT          - a literal word followed by free text
//! !grant NAME (LEVEL)      - operators only, alias !g
//! !help (COMMAND)          - built in
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --package command-bot -- --sender alice --channel "#lobby"
//! ```
//!
//! Operators come from `alloy.toml` (or `--config`):
//!
//! ```toml
//! [commands]
//! operators = ["alice"]
//! ```

use std::path::PathBuf;

use alloy::prelude::*;
use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(about = "Type chat messages, get command replies")]
struct Args {
    /// Configuration file to load instead of ./alloy.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Nickname the messages are sent as
    #[arg(short, long, default_value = "console")]
    sender: String,

    /// Channel the messages are posted in; private messages when omitted
    #[arg(long)]
    channel: Option<String>,
}

// ============================================================================
// Handler Functions
// ============================================================================

async fn echo(ctx: CommandContext) -> String {
    ctx.args().value("text").unwrap_or_default().to_string()
}

async fn ping(_ctx: CommandContext) -> &'static str {
    "Pong!"
}

/// Reports the range of a dice expression such as `3d6`.
async fn roll(ctx: CommandContext) -> Result<String> {
    let dice = ctx.args().value("dice").unwrap_or_default();
    let (count, sides) = dice
        .split_once('d')
        .ok_or_else(|| anyhow::anyhow!("malformed dice {dice:?}"))?;
    let count: u64 = count.parse()?;
    let sides: u64 = sides.parse()?;
    if count == 0 || sides == 0 {
        return Ok(format!("{} can't roll {dice}", ctx.sender()));
    }
    Ok(format!(
        "{} rolls {dice}: somewhere between {count} and {}",
        ctx.sender(),
        count.saturating_mul(sides)
    ))
}

async fn paint(ctx: CommandContext) -> String {
    format!("The wall is now {}", ctx.args().get(0).unwrap_or_default())
}

/// Reminders go to the sender privately.
async fn remind(ctx: CommandContext) -> Reply {
    ctx.query(format!(
        "Reminder noted: {}",
        ctx.args().value("message").unwrap_or_default()
    ))
}

async fn grant(ctx: CommandContext) -> Result<String> {
    let name = ctx.args().value("name").unwrap_or_default();
    let level: u32 = ctx.args().parse("level")?.unwrap_or(1);
    info!(operator = %ctx.sender(), %name, level, "Access granted");
    Ok(format!("{name} now has level {level}"))
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn register_commands(builder: &mut RuntimeBuilder) -> Result<()> {
    builder.register(
        "misc",
        Command::builder("echo")
            .argument(ArgumentSpec::required("text", TypeTag::Text))
            .summary("Repeats the text")
            .build()?,
        echo,
    )?;
    builder.register(
        "misc",
        Command::builder("ping").summary("Pong!").build()?,
        ping,
    )?;
    builder.register(
        "misc",
        Command::builder("roll")
            .argument(ArgumentSpec::required(
                "dice",
                ArgumentFormat::pattern("[0-9]+d[0-9]+"),
            ))
            .summary("Rolls dice written as 2d6")
            .build()?,
        roll,
    )?;
    builder.register(
        "misc",
        Command::builder("remind")
            .argument(ArgumentSpec::required("me", ArgumentFormat::literal("me")))
            .argument(ArgumentSpec::required("message", TypeTag::Text))
            .summary("Sends you a reminder")
            .build()?,
        remind,
    )?;

    builder.command(
        "fun",
        "paint",
        vec![ArgumentSpec::required(
            "color",
            ArgumentFormat::choices(["red", "green", "blue"]),
        )],
        CommandOptions {
            summary: Some("Paints the wall".into()),
            ..Default::default()
        },
        paint,
    )?;

    builder.register(
        "admin",
        Command::builder("grant")
            .argument(ArgumentSpec::required("name", TypeTag::String))
            .argument(ArgumentSpec::optional("level", TypeTag::Integer))
            .alias("g")
            .summary("Grants access")
            .description("Grants a certain level of access to the user")
            .op_command(true)
            .build()?,
        grant,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = CommandRuntime::builder();
    if let Some(path) = &args.config {
        builder = builder.config_file(path);
    }
    register_commands(&mut builder)?;

    // Logging is initialized from the loaded config here
    let runtime = builder.build()?;
    let stats = runtime.stats();
    info!(
        groups = stats.groups,
        commands = stats.commands,
        sender = %args.sender,
        "Type a message, Ctrl+D to quit"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let message = match &args.channel {
            Some(channel) => IncomingMessage::in_channel(channel, &args.sender, text),
            None => IncomingMessage::private(&args.sender, text),
        };

        match runtime.handle_message(message).await {
            Ok(replies) => {
                for reply in replies {
                    println!("[{} -> {}] {}", reply.target, reply.recipient, reply.text);
                }
            }
            Err(e) => error!("Failed to handle {text:?}: {e}"),
        }
    }

    Ok(())
}
