//! Telegram transport
//!
//! Binds the conversation engine to the Bot API through teloxide long
//! polling. The dispatcher handles updates of one chat sequentially.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, KeyboardButton, KeyboardMarkup, KeyboardRemove, ReplyMarkup};
use tracing::{error, info, warn};

use crate::WeatherBotError;
use crate::config::BotConfig;
use crate::conversation::{
    Command, ConversationEngine, ConversationId, InMemorySessionStore, Reply, ReplyKeyboard,
    ReplySink, day_choice_labels,
};
use crate::weather::AccuWeatherClient;

pub type TelegramEngine = ConversationEngine<AccuWeatherClient, InMemorySessionStore>;

/// Sends replies as Telegram messages
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send(&self, conversation: ConversationId, reply: Reply) -> crate::Result<()> {
        let request = self.bot.send_message(ChatId(conversation.0), reply.text);
        let request = match reply_markup(reply.keyboard) {
            Some(markup) => request.reply_markup(markup),
            None => request,
        };

        request
            .await
            .map_err(|e| WeatherBotError::chat(e.to_string()))?;
        Ok(())
    }
}

fn reply_markup(keyboard: ReplyKeyboard) -> Option<ReplyMarkup> {
    match keyboard {
        ReplyKeyboard::Unchanged => None,
        ReplyKeyboard::Remove => Some(ReplyMarkup::KeyboardRemove(KeyboardRemove::new())),
        ReplyKeyboard::DayChoice => Some(ReplyMarkup::Keyboard(day_choice_keyboard())),
    }
}

fn day_choice_keyboard() -> KeyboardMarkup {
    let row: Vec<KeyboardButton> = day_choice_labels()
        .into_iter()
        .map(KeyboardButton::new)
        .collect();
    KeyboardMarkup::new(vec![row]).resize_keyboard()
}

fn bot_commands() -> Vec<BotCommand> {
    Command::ALL
        .iter()
        .map(|(command, description)| BotCommand::new(command.name(), *description))
        .collect()
}

/// Run the bot until Ctrl-C.
pub async fn run(config: &BotConfig) -> Result<()> {
    let token = config
        .telegram
        .token
        .clone()
        .context("Telegram bot token is not configured")?;

    let gateway = AccuWeatherClient::new(&config.weather)?;
    let engine: Arc<TelegramEngine> =
        Arc::new(ConversationEngine::new(gateway, InMemorySessionStore::new()));

    let bot = Bot::new(token);
    if let Err(e) = bot.set_my_commands(bot_commands()).await {
        warn!("Failed to register the command menu: {}", e);
    }

    let handler = Update::filter_message().endpoint(on_message);

    info!("Starting Telegram long polling");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Telegram dispatcher stopped");
    Ok(())
}

async fn on_message(bot: Bot, msg: Message, engine: Arc<TelegramEngine>) -> ResponseResult<()> {
    let conversation = ConversationId(msg.chat.id.0);
    let sink = TelegramSink::new(bot);

    if let Err(e) = engine
        .handle_message(conversation, msg.text(), &sink)
        .await
    {
        error!(conversation = %conversation, "Failed to handle message: {}", e);
    }
    Ok(())
}
