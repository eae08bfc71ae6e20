//! Inbound event dispatch
//!
//! Inbound platform events form a closed set of variants, each drained by its
//! own worker loop over a bounded queue. Ordering is FIFO within one kind;
//! nothing is promised across kinds.

use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChosenInlineResult, InlineQuery, Message};
use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::handlers;
use crate::services::ServiceFactory;

/// The closed set of inbound platform events the bot reacts to.
#[derive(Debug)]
pub enum InboundEvent {
    CommandMessage(Message),
    InlineLookup(InlineQuery),
    ChosenResult(ChosenInlineResult),
    ButtonCallback(CallbackQuery),
}

/// One bounded queue per inbound event kind, one worker per queue.
pub struct DispatchQueues {
    commands: mpsc::Sender<Message>,
    inline: mpsc::Sender<InlineQuery>,
    chosen: mpsc::Sender<ChosenInlineResult>,
    callbacks: mpsc::Sender<CallbackQuery>,
}

impl DispatchQueues {
    /// Create the queues and spawn their worker tasks.
    pub fn spawn(
        bot: Bot,
        services: ServiceFactory,
        bot_username: String,
        capacity: usize,
    ) -> Self {
        let (commands_tx, mut commands_rx) = mpsc::channel::<Message>(capacity);
        let (inline_tx, mut inline_rx) = mpsc::channel::<InlineQuery>(capacity);
        let (chosen_tx, mut chosen_rx) = mpsc::channel::<ChosenInlineResult>(capacity);
        let (callbacks_tx, mut callbacks_rx) = mpsc::channel::<CallbackQuery>(capacity);

        {
            let bot = bot.clone();
            let services = services.clone();
            tokio::spawn(async move {
                while let Some(msg) = commands_rx.recv().await {
                    if let Err(e) =
                        handlers::commands::handle_message(&bot, msg, &services, &bot_username)
                            .await
                    {
                        error!(error = %e, "Error handling command message");
                    }
                }
            });
        }

        {
            let bot = bot.clone();
            let services = services.clone();
            tokio::spawn(async move {
                while let Some(query) = inline_rx.recv().await {
                    if let Err(e) =
                        handlers::inline::handle_inline_query(&bot, query, &services).await
                    {
                        error!(error = %e, "Error handling inline query");
                    }
                }
            });
        }

        {
            let services = services.clone();
            tokio::spawn(async move {
                while let Some(result) = chosen_rx.recv().await {
                    if let Err(e) =
                        handlers::inline::handle_chosen_result(result, &services).await
                    {
                        error!(error = %e, "Error handling chosen inline result");
                    }
                }
            });
        }

        tokio::spawn(async move {
            while let Some(query) = callbacks_rx.recv().await {
                if let Err(e) =
                    handlers::callbacks::handle_callback_query(&bot, query, &services).await
                {
                    error!(error = %e, "Error handling callback query");
                }
            }
        });

        Self {
            commands: commands_tx,
            inline: inline_tx,
            chosen: chosen_tx,
            callbacks: callbacks_tx,
        }
    }

    /// Route an inbound event onto its queue. Blocks when the queue is full,
    /// which backpressures the update listener.
    pub async fn enqueue(&self, event: InboundEvent) {
        let closed = match event {
            InboundEvent::CommandMessage(msg) => self.commands.send(msg).await.is_err(),
            InboundEvent::InlineLookup(query) => self.inline.send(query).await.is_err(),
            InboundEvent::ChosenResult(result) => self.chosen.send(result).await.is_err(),
            InboundEvent::ButtonCallback(query) => self.callbacks.send(query).await.is_err(),
        };
        if closed {
            warn!("Dropping inbound event: worker queue closed");
        }
    }
}
