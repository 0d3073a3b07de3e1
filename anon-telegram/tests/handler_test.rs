//! ChatHandler flows against the in-memory store, inspecting the relay queue.

use std::sync::Arc;

use anon_core::{
    ChatLimits, InboundContent, Menu, Outbound, Payload, PreferenceDimension, UserRecord,
};
use anon_telegram::{keyboard, ChatHandler, Command};
use chrono::Utc;
use matchmaking::{notices, SessionManager};
use relay::{relay_channel, RelayReceiver};
use storage::{InMemoryUserStore, UserStore};

struct Harness {
    store: Arc<InMemoryUserStore>,
    handler: ChatHandler,
    outbox: RelayReceiver,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryUserStore::new());
    let (queue, outbox) = relay_channel();
    let sessions = Arc::new(SessionManager::new(
        store.clone(),
        queue.clone(),
        ChatLimits::default(),
    ));
    Harness {
        store,
        handler: ChatHandler::new(sessions, queue),
        outbox,
    }
}

async fn seed_pair(store: &InMemoryUserStore, a: i64, b: i64) {
    let mut first = UserRecord::new(a);
    first.active = true;
    first.pair_with(b, Utc::now());
    let mut second = UserRecord::new(b);
    second.active = true;
    second.pair_with(a, Utc::now());
    store.put_many(&[first, second]).await.unwrap();
}

/// (text, menu) pairs queued for `user_id`.
fn texts_for(items: &[Outbound], user_id: i64) -> Vec<(String, Option<Menu>)> {
    items
        .iter()
        .filter(|o| o.destination == user_id)
        .filter_map(|o| match &o.payload {
            Payload::Text { text, menu } => Some((text.clone(), menu.clone())),
            _ => None,
        })
        .collect()
}

/// **Test: /start queues the welcome text followed by the main menu.**
///
/// **Setup:** New user.
/// **Action:** `handle_command(1, Start)`.
/// **Expected:** Welcome (no menu), then main menu showing offline status.
#[tokio::test]
async fn test_start_sends_welcome_then_menu() {
    let mut h = harness();

    h.handler.handle_command(1, Command::Start).await.unwrap();

    let texts = texts_for(&h.outbox.drain(), 1);
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], (notices::WELCOME.to_string(), None));
    assert_eq!(
        texts[1],
        (
            keyboard::MAIN_MENU_TEXT.to_string(),
            Some(Menu::Main { is_active: false })
        )
    );
}

/// **Test: Toggle button flips status and re-renders the main menu.**
///
/// **Setup:** New user.
/// **Action:** callback `toggle_active`, then `show_active`.
/// **Expected:** Main menu with online status; active count text "Active users: 1".
#[tokio::test]
async fn test_toggle_and_show_active() {
    let mut h = harness();

    h.handler.handle_callback(1, "toggle_active").await.unwrap();
    h.handler.handle_callback(1, "show_active").await.unwrap();

    let texts = texts_for(&h.outbox.drain(), 1);
    assert_eq!(texts[0].1, Some(Menu::Main { is_active: true }));
    assert_eq!(texts[1].0, "Active users: 1");
    assert_eq!(texts[2].1, Some(Menu::Main { is_active: true }));
}

/// **Test: Country is captured from the next text, even while paired.**
///
/// **Setup:** U1/U2 paired.
/// **Action:** U1 presses `set_country`, then sends "Canada".
/// **Expected:** Prompt shown; country stored; settings menu shown; nothing relayed to U2.
#[tokio::test]
async fn test_country_input_takes_priority_over_relay() {
    let mut h = harness();
    seed_pair(&h.store, 1, 2).await;

    h.handler.handle_callback(1, "set_country").await.unwrap();
    h.handler
        .handle_content(1, InboundContent::Text("Canada".to_string()))
        .await
        .unwrap();

    let items = h.outbox.drain();
    let texts = texts_for(&items, 1);
    assert_eq!(
        texts[0],
        (
            keyboard::COUNTRY_PROMPT.to_string(),
            Some(Menu::AwaitingInput(PreferenceDimension::Country))
        )
    );
    assert_eq!(texts[1].0, keyboard::SETTINGS_TEXT);
    assert!(items.iter().all(|o| o.destination != 2));
    assert_eq!(
        h.store.get(1).await.unwrap().preferences.country.as_deref(),
        Some("Canada")
    );

    h.handler
        .handle_content(1, InboundContent::Text("hello".to_string()))
        .await
        .unwrap();
    let relayed = texts_for(&h.outbox.drain(), 2);
    assert_eq!(relayed, vec![("Anonymous: hello".to_string(), None)]);
}

/// **Test: Leaving the country prompt via another button cancels the capture.**
///
/// **Setup:** U1/U2 paired.
/// **Action:** `set_country`, then `settings`, then text "hi".
/// **Expected:** "hi" is relayed to U2; country remains unset.
#[tokio::test]
async fn test_other_button_cancels_pending_input() {
    let mut h = harness();
    seed_pair(&h.store, 1, 2).await;

    h.handler.handle_callback(1, "set_country").await.unwrap();
    h.handler.handle_callback(1, "settings").await.unwrap();
    h.handler
        .handle_content(1, InboundContent::Text("hi".to_string()))
        .await
        .unwrap();

    assert_eq!(
        texts_for(&h.outbox.drain(), 2),
        vec![("Anonymous: hi".to_string(), None)]
    );
    assert!(h.store.get(1).await.unwrap().preferences.country.is_none());
}

/// **Test: Picker choice and clear update preferences and re-show settings.**
///
/// **Setup:** New user.
/// **Action:** `set_language`, `lang_german`, `gender_female`, `clear_language`.
/// **Expected:** Language picker shown; final stored preferences have gender only.
#[tokio::test]
async fn test_picker_and_clear() {
    let mut h = harness();

    h.handler.handle_callback(1, "set_language").await.unwrap();
    h.handler.handle_callback(1, "lang_german").await.unwrap();
    h.handler.handle_callback(1, "gender_female").await.unwrap();
    h.handler.handle_callback(1, "clear_language").await.unwrap();

    let texts = texts_for(&h.outbox.drain(), 1);
    assert_eq!(
        texts[0],
        (keyboard::LANGUAGE_PROMPT.to_string(), Some(Menu::LanguagePicker))
    );
    let prefs = h.store.get(1).await.unwrap().preferences;
    assert_eq!(prefs.language, None);
    assert_eq!(prefs.gender.as_deref(), Some("Female"));
    assert_eq!(texts.last().unwrap().1, Some(Menu::Settings(prefs)));
}

/// **Test: Unknown callback data and unknown commands get the unknown-command notice.**
#[tokio::test]
async fn test_unknown_inputs() {
    let mut h = harness();

    h.handler.handle_callback(1, "bogus").await.unwrap();
    h.handler
        .handle_command(1, Command::Unknown("help".to_string()))
        .await
        .unwrap();

    let texts = texts_for(&h.outbox.drain(), 1);
    assert_eq!(
        texts,
        vec![
            (keyboard::UNKNOWN_COMMAND.to_string(), None),
            (keyboard::UNKNOWN_COMMAND.to_string(), None),
        ]
    );
}

/// **Test: /end and plain text outside a chat fall back to the main menu.**
///
/// **Setup:** Idle user.
/// **Action:** `/end`, then text.
/// **Expected:** "You are not in a chat!" and main menu; text is not relayed, main menu again.
#[tokio::test]
async fn test_idle_user_gets_main_menu() {
    let mut h = harness();

    h.handler.handle_command(1, Command::End).await.unwrap();
    h.handler
        .handle_content(1, InboundContent::Text("anyone?".to_string()))
        .await
        .unwrap();

    let texts = texts_for(&h.outbox.drain(), 1);
    assert_eq!(texts[0], (notices::NOT_IN_CHAT.to_string(), None));
    assert_eq!(texts[1].1, Some(Menu::Main { is_active: false }));
    assert_eq!(texts[2].1, Some(Menu::Main { is_active: false }));
    assert_eq!(texts.len(), 3);
}

/// **Test: Find Match button pairs two active users.**
///
/// **Setup:** U1 and U2 toggled active.
/// **Action:** U1 presses `find_match`.
/// **Expected:** Both receive the session-start text.
#[tokio::test]
async fn test_find_match_button() {
    let mut h = harness();
    h.handler.handle_callback(1, "toggle_active").await.unwrap();
    h.handler.handle_callback(2, "toggle_active").await.unwrap();
    h.outbox.drain();

    h.handler.handle_callback(1, "find_match").await.unwrap();

    let items = h.outbox.drain();
    for user in [1, 2] {
        assert!(texts_for(&items, user)
            .iter()
            .any(|(t, _)| t == notices::CHAT_STARTED));
    }
    assert_eq!(h.store.get(2).await.unwrap().current_partner, Some(1));
}
