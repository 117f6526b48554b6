//! Command handlers
//!
//! Flow per metered command: block check, argument check, quota check,
//! provider call, quota increment. Admin commands skip the quota path and
//! silently ignore non-admin callers.

use teloxide::prelude::*;
use teloxide::types::{InputFile, User};
use tracing::error;
use url::Url;

use super::commands::Command;
use super::relay::TelegramRelay;
use super::AppState;
use crate::error::{BotError, Result};
use crate::providers::ImageOutput;

const BLOCKED_MSG: &str = "❌ You are blocked.";

pub async fn dispatch(bot: &Bot, state: &AppState, msg: &Message, cmd: Command) -> Result<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    match cmd {
        Command::Start => start(bot, state, msg, &user).await,
        Command::Chat(args) => chat(bot, state, msg, user_id, &args).await,
        Command::Img(args) => img(bot, state, msg, user_id, &args).await,
        Command::Video(args) => video(bot, state, msg, user_id, &args).await,
        Command::Stats => stats(bot, state, msg, user_id).await,
        Command::Block(args) => block(bot, state, msg, user_id, &args, true).await,
        Command::Unblock(args) => block(bot, state, msg, user_id, &args, false).await,
        Command::Setlimit(args) => setlimit(bot, state, msg, user_id, &args).await,
        Command::Broadcast => broadcast(bot, state, msg, user_id).await,
    }
}

async fn start(bot: &Bot, state: &AppState, msg: &Message, user: &User) -> Result<()> {
    let user_id = user.id.0 as i64;

    state
        .store
        .add_user(
            user_id,
            user.username.as_deref().unwrap_or(""),
            &user.full_name(),
        )
        .await?;

    if state.moderation.is_blocked(user_id).await? {
        bot.send_message(msg.chat.id, BLOCKED_MSG).await?;
        return Ok(());
    }

    let text = start_message(&user.first_name, state.is_admin(user_id));
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Shared gate for chat/img/video. Returns the trimmed prompt once the
/// block, argument and quota checks all pass; otherwise the refusal has
/// already been sent.
async fn check_metered(
    bot: &Bot,
    state: &AppState,
    msg: &Message,
    user_id: i64,
    cmd_name: &str,
    args: &str,
) -> Result<Option<String>> {
    if state.moderation.is_blocked(user_id).await? {
        bot.send_message(msg.chat.id, BLOCKED_MSG).await?;
        return Ok(None);
    }

    let prompt = args.trim();
    if prompt.is_empty() {
        bot.send_message(msg.chat.id, usage_hint(cmd_name)).await?;
        return Ok(None);
    }

    if !state.quota.can_use(user_id, cmd_name).await? {
        bot.send_message(msg.chat.id, limit_message(cmd_name)).await?;
        return Ok(None);
    }

    Ok(Some(prompt.to_string()))
}

async fn chat(bot: &Bot, state: &AppState, msg: &Message, user_id: i64, args: &str) -> Result<()> {
    let Some(prompt) = check_metered(bot, state, msg, user_id, "chat", args).await? else {
        return Ok(());
    };

    let answer = match state.text.complete(&prompt).await {
        Ok(answer) => answer,
        Err(e) => {
            error!("completion failed: {e}");
            bot.send_message(msg.chat.id, "AI error.").await?;
            return Ok(());
        }
    };

    state.quota.record_use(user_id, "chat").await?;
    bot.send_message(msg.chat.id, answer).await?;
    Ok(())
}

async fn img(bot: &Bot, state: &AppState, msg: &Message, user_id: i64, args: &str) -> Result<()> {
    let Some(prompt) = check_metered(bot, state, msg, user_id, "img", args).await? else {
        return Ok(());
    };

    bot.send_message(msg.chat.id, "🖼 Generating image...").await?;

    let output = match state.image.generate(&prompt).await {
        Ok(output) => output,
        Err(e) => {
            error!("image generation failed: {e}");
            bot.send_message(msg.chat.id, "Image generation failed.").await?;
            return Ok(());
        }
    };

    state.quota.record_use(user_id, "img").await?;

    let photo = match output {
        ImageOutput::Url(url) => {
            let url = url
                .parse::<Url>()
                .map_err(|e| BotError::Provider(format!("bad image url: {e}")))?;
            InputFile::url(url)
        }
        ImageOutput::File(path) => InputFile::file(path),
    };
    bot.send_photo(msg.chat.id, photo).await?;
    Ok(())
}

async fn video(bot: &Bot, state: &AppState, msg: &Message, user_id: i64, args: &str) -> Result<()> {
    let Some(prompt) = check_metered(bot, state, msg, user_id, "video", args).await? else {
        return Ok(());
    };

    bot.send_message(msg.chat.id, "🎬 Generating video... (slow)").await?;

    let descriptor = match state.video.generate(&prompt).await {
        Ok(descriptor) => descriptor,
        Err(e) => {
            error!("video generation failed: {e}");
            bot.send_message(msg.chat.id, "Video generation failed.").await?;
            return Ok(());
        }
    };

    state.quota.record_use(user_id, "video").await?;
    bot.send_message(msg.chat.id, format!("Result:\n{descriptor}")).await?;
    Ok(())
}

async fn stats(bot: &Bot, state: &AppState, msg: &Message, user_id: i64) -> Result<()> {
    if !state.is_admin(user_id) {
        return Ok(());
    }

    let stats = state.moderation.stats().await?;
    bot.send_message(
        msg.chat.id,
        format!("📊 Stats\nUsers: {}\nBlocked: {}", stats.total, stats.blocked),
    )
    .await?;
    Ok(())
}

async fn block(
    bot: &Bot,
    state: &AppState,
    msg: &Message,
    user_id: i64,
    args: &str,
    blocked: bool,
) -> Result<()> {
    if !state.is_admin(user_id) {
        return Ok(());
    }

    let Some(target) = parse_user_id(args) else {
        let hint = if blocked { "Use: /block <id>" } else { "Use: /unblock <id>" };
        bot.send_message(msg.chat.id, hint).await?;
        return Ok(());
    };

    state.moderation.set_blocked(target, blocked).await?;
    let reply = if blocked { "User blocked." } else { "User unblocked." };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn setlimit(bot: &Bot, state: &AppState, msg: &Message, user_id: i64, args: &str) -> Result<()> {
    if !state.is_admin(user_id) {
        return Ok(());
    }

    let Some((cmd, value)) = parse_limit_args(args) else {
        bot.send_message(msg.chat.id, "Use: /setlimit <chat|img|video> <number>")
            .await?;
        return Ok(());
    };

    state.moderation.set_limit(&cmd, value).await?;
    bot.send_message(msg.chat.id, "Limit updated.").await?;
    Ok(())
}

async fn broadcast(bot: &Bot, state: &AppState, msg: &Message, user_id: i64) -> Result<()> {
    if !state.is_admin(user_id) {
        return Ok(());
    }

    let Some(source) = msg.reply_to_message() else {
        bot.send_message(msg.chat.id, "Reply to a message with /broadcast")
            .await?;
        return Ok(());
    };

    let relay = TelegramRelay::new(bot.clone(), msg.chat.id, source.id);
    let report = state.broadcaster.broadcast(&relay).await?;

    bot.send_message(
        msg.chat.id,
        format!(
            "Broadcast done.\nSent: {}\nFailed+Blocked: {}",
            report.sent, report.failed_and_blocked
        ),
    )
    .await?;
    Ok(())
}

fn start_message(first_name: &str, admin: bool) -> String {
    let mut text = format!(
        "👋 Hello {first_name}\n\n\
         🤖 JARVIS AI\nMade by Hawsi-Bhai\n\n\
         Commands:\n\
         /chat <question>\n\
         /img <prompt>\n\
         /video <prompt>\n"
    );

    if admin {
        text.push_str(
            "\n🛠 Admin:\n\
             /stats\n\
             /block <id>\n\
             /unblock <id>\n\
             /setlimit <chat|img|video> <number>\n\
             Reply to any msg: /broadcast\n",
        );
    }

    text
}

fn usage_hint(cmd_name: &str) -> &'static str {
    match cmd_name {
        "chat" => "Use: /chat your question",
        "img" => "Use: /img description",
        "video" => "Use: /video description",
        _ => "Missing arguments.",
    }
}

fn limit_message(cmd_name: &str) -> &'static str {
    match cmd_name {
        "chat" => "❌ Daily chat limit reached.",
        "img" => "❌ Daily image limit reached.",
        "video" => "❌ Daily video limit reached.",
        _ => "❌ Daily limit reached.",
    }
}

fn parse_user_id(args: &str) -> Option<i64> {
    args.trim().parse().ok()
}

fn parse_limit_args(args: &str) -> Option<(String, i64)> {
    let mut parts = args.split_whitespace();
    let cmd = parts.next()?.to_string();
    let value = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((cmd, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_message_plain_user() {
        let text = start_message("Alice", false);
        assert!(text.contains("Hello Alice"));
        assert!(text.contains("/chat <question>"));
        assert!(!text.contains("Admin"));
    }

    #[test]
    fn test_start_message_admin() {
        let text = start_message("Alice", true);
        assert!(text.contains("🛠 Admin:"));
        assert!(text.contains("/broadcast"));
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id(" 42 "), Some(42));
        assert_eq!(parse_user_id("-7"), Some(-7));
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id(""), None);
    }

    #[test]
    fn test_parse_limit_args() {
        assert_eq!(parse_limit_args("img 10"), Some(("img".to_string(), 10)));
        assert_eq!(parse_limit_args("  chat   3 "), Some(("chat".to_string(), 3)));
        assert_eq!(parse_limit_args("img"), None);
        assert_eq!(parse_limit_args("img ten"), None);
        assert_eq!(parse_limit_args("img 10 extra"), None);
        assert_eq!(parse_limit_args(""), None);
    }

    #[test]
    fn test_usage_hints_and_limit_messages() {
        assert_eq!(usage_hint("chat"), "Use: /chat your question");
        assert_eq!(limit_message("img"), "❌ Daily image limit reached.");
        assert_eq!(limit_message("video"), "❌ Daily video limit reached.");
    }
}
