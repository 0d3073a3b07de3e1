//! Routes commands, chat content and button presses into the session manager and queues the
//! menus shown after each step.

use std::sync::Arc;

use anon_core::{InboundContent, Menu, PreferenceDimension, Result, UserId};
use matchmaking::{notices, EndOutcome, RelayOutcome, SessionManager};
use relay::RelayQueue;
use tracing::{debug, warn};

use crate::action::MenuAction;
use crate::command::Command;
use crate::keyboard;
use crate::pending::PendingInput;

pub struct ChatHandler {
    sessions: Arc<SessionManager>,
    queue: RelayQueue,
    pending: PendingInput,
}

impl ChatHandler {
    pub fn new(sessions: Arc<SessionManager>, queue: RelayQueue) -> Self {
        Self {
            sessions,
            queue,
            pending: PendingInput::new(),
        }
    }

    pub async fn handle_command(&self, user_id: UserId, command: Command) -> Result<()> {
        match command {
            Command::Start => {
                self.pending.cancel(user_id);
                let record = self.sessions.on_start(user_id).await?;
                self.queue.menu(
                    user_id,
                    keyboard::MAIN_MENU_TEXT,
                    Menu::Main {
                        is_active: record.active,
                    },
                );
            }
            Command::End => {
                if let EndOutcome::Ended { partner } = self.sessions.on_end_session(user_id).await? {
                    debug!(user_id, partner_id = partner, "Chat ended by command");
                }
                self.show_main_menu(user_id).await?;
            }
            Command::Unknown(name) => {
                debug!(user_id, command = %name, "Unknown command");
                self.queue.text(user_id, keyboard::UNKNOWN_COMMAND);
            }
        }
        Ok(())
    }

    /// Chat content. A pending free-text preference takes priority over relaying.
    pub async fn handle_content(&self, user_id: UserId, content: InboundContent) -> Result<()> {
        if let InboundContent::Text(text) = &content {
            if let Some(dimension) = self.pending.take(user_id) {
                self.sessions
                    .on_set_preference(user_id, dimension, text)
                    .await?;
                return self.show_settings(user_id).await;
            }
        }

        if self.sessions.on_incoming_message(user_id, content).await? == RelayOutcome::NotInChat {
            self.show_main_menu(user_id).await?;
        }
        Ok(())
    }

    /// Raw callback data from a button press. Unrecognized data gets the unknown-command notice.
    pub async fn handle_callback(&self, user_id: UserId, data: &str) -> Result<()> {
        match data.parse::<MenuAction>() {
            Ok(action) => self.handle_action(user_id, action).await,
            Err(e) => {
                warn!(user_id, error = %e, "Unrecognized callback data");
                self.queue.text(user_id, keyboard::UNKNOWN_COMMAND);
                Ok(())
            }
        }
    }

    pub async fn handle_action(&self, user_id: UserId, action: MenuAction) -> Result<()> {
        if !matches!(action, MenuAction::Edit(PreferenceDimension::Country)) {
            self.pending.cancel(user_id);
        }

        match action {
            MenuAction::ShowActive => {
                let count = self.sessions.active_user_count().await?;
                self.queue.text(user_id, notices::active_users(count));
                self.show_main_menu(user_id).await
            }
            MenuAction::ToggleActive => {
                let is_active = self.sessions.on_toggle_active(user_id).await?;
                self.queue
                    .menu(user_id, keyboard::MAIN_MENU_TEXT, Menu::Main { is_active });
                Ok(())
            }
            MenuAction::Settings => self.show_settings(user_id).await,
            MenuAction::BackToMain => self.show_main_menu(user_id).await,
            MenuAction::FindMatch => {
                self.sessions.on_request_match(user_id).await?;
                Ok(())
            }
            MenuAction::Edit(PreferenceDimension::Country) => {
                self.pending.expect(user_id, PreferenceDimension::Country);
                self.queue.menu(
                    user_id,
                    keyboard::COUNTRY_PROMPT,
                    Menu::AwaitingInput(PreferenceDimension::Country),
                );
                Ok(())
            }
            MenuAction::Edit(PreferenceDimension::Language) => {
                self.queue
                    .menu(user_id, keyboard::LANGUAGE_PROMPT, Menu::LanguagePicker);
                Ok(())
            }
            MenuAction::Edit(PreferenceDimension::Gender) => {
                self.queue
                    .menu(user_id, keyboard::GENDER_PROMPT, Menu::GenderPicker);
                Ok(())
            }
            MenuAction::Clear(dimension) => {
                self.sessions.on_clear_preference(user_id, dimension).await?;
                self.show_settings(user_id).await
            }
            MenuAction::Choose(dimension, value) => {
                self.sessions
                    .on_set_preference(user_id, dimension, &value)
                    .await?;
                self.show_settings(user_id).await
            }
        }
    }

    async fn show_main_menu(&self, user_id: UserId) -> Result<()> {
        let record = self.sessions.user(user_id).await?;
        self.queue.menu(
            user_id,
            keyboard::MAIN_MENU_TEXT,
            Menu::Main {
                is_active: record.active,
            },
        );
        Ok(())
    }

    async fn show_settings(&self, user_id: UserId) -> Result<()> {
        let record = self.sessions.user(user_id).await?;
        self.queue.menu(
            user_id,
            keyboard::SETTINGS_TEXT,
            Menu::Settings(record.preferences),
        );
        Ok(())
    }
}
