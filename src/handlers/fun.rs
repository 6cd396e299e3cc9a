//! Novelty commands.

use super::{Context, Handler};
use crate::error::HandlerResult;
use crate::invocation::Invocation;
use async_trait::async_trait;
use rand::Rng;

const ANSWERS: &[&str] = &[
    "I don't think you want to know.",
    "Yes",
    "No",
    "Ask again later",
    "It'll never happen",
    "If you think so",
    "Signs point to maybe",
];

/// Answer a question with a random canned response.
///
/// Replies in the channel when there is one, otherwise directly to the
/// sender's nick.
pub struct EightBallHandler;

impl EightBallHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EightBallHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for EightBallHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let target = inv.channel.as_deref().unwrap_or(&inv.sender.nick);
        let answer = ANSWERS[rand::thread_rng().gen_range(0..ANSWERS.len())];
        let text = format!("{}: {}", inv.sender.nick, answer);
        ctx.bot.privmsg(target, &text).await?;
        Ok(())
    }
}
