//! Terminal adapter: stdin lines in, replies on stdout.
//!
//! Every line is handled as its own task, the way a chat network delivers
//! messages independently. `/user <name>` changes who is speaking.

use std::sync::Arc;

use anyhow::Result;
use gurucore::{IncomingMessage, ScriptRegistry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

/// Prints the replies of `registry` to one message.
pub async fn say(registry: &ScriptRegistry, message: IncomingMessage) {
    for reply in registry.hear(&message).await {
        println!("{}", reply.render(&message.sender));
    }
}

/// What a console line means.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    SwitchUser(&'a str),
    Message(&'a str),
    Blank,
}

fn parse_line(line: &str) -> Line<'_> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() {
        return Line::Blank;
    }
    match trimmed.strip_prefix("/user ") {
        Some(name) if !name.trim().is_empty() => Line::SwitchUser(name.trim()),
        _ => Line::Message(trimmed),
    }
}

/// Runs the interactive shell until stdin closes.
pub async fn run_shell(registry: Arc<ScriptRegistry>, user: String) -> Result<()> {
    let mut sender = user;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = JoinSet::new();

    log::info!("Shell ready, speaking as '{}'. Ctrl-D to quit.", sender);

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Line::Blank => {}
            Line::SwitchUser(name) => {
                sender = name.to_string();
                log::info!("Now speaking as '{}'", sender);
            }
            Line::Message(text) => {
                let registry = Arc::clone(&registry);
                let message = IncomingMessage::new(sender.clone(), text);
                tasks.spawn(async move { say(&registry, message).await });
            }
        }

        // Reap finished tasks so the set doesn't grow without bound.
        while let Some(joined) = tasks.try_join_next() {
            if let Err(e) = joined {
                log::error!("Message task failed: {}", e);
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            log::error!("Message task failed: {}", e);
        }
    }

    Ok(())
}
