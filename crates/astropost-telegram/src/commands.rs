// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot command handling.
//!
//! The agent recognizes a single `/start` command and replies with a
//! fixed greeting. Everything else is ignored.

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;

/// Greeting returned for `/start`.
pub const START_GREETING: &str = "🔮 Astrology forecast bot is up and running!";

/// Commands recognized by the bot.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Greet the user and confirm the bot is alive.
    Start,
}

/// Spawns the long-polling command dispatcher on a background task.
///
/// Consumes a clone of the bot; the dispatcher runs until the process
/// exits. Non-command updates are silently ignored.
pub fn spawn_dispatcher(bot: Bot) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!("starting Telegram command dispatcher");

        let handler = Update::filter_message()
            .filter_command::<Command>()
            .endpoint(|bot: Bot, msg: Message, cmd: Command| async move {
                match cmd {
                    Command::Start => {
                        bot.send_message(msg.chat.id, START_GREETING).await?;
                    }
                }
                respond(())
            });

        Dispatcher::builder(bot, handler)
            .default_handler(|_| async {}) // Silently ignore non-command updates
            .build()
            .dispatch()
            .await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_command_parses() {
        let cmd = Command::parse("/start", "astropost_bot").expect("should parse");
        assert_eq!(cmd, Command::Start);
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Command::parse("/stop", "astropost_bot").is_err());
    }

    #[test]
    fn greeting_is_nonempty_and_fixed() {
        assert!(START_GREETING.contains("running"));
    }
}
