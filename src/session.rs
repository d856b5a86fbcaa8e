// src/session.rs

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::{LAST_UPDATE_SLOT_KEY, SELECTION_SLOT_KEY};
use crate::error::AppError;
use crate::models::resource::Resource;

/// Tab-scoped string slots backing the transient hand-off channel.
///
/// Values are JSON-encoded strings, so every read goes back through the typed
/// parse boundary. Slots live for the session only; nothing here is durable.
#[derive(Debug, Default)]
pub struct SessionSlots {
    slots: Mutex<HashMap<String, String>>,
}

impl SessionSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: &str, value: String) {
        self.lock().insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.lock().remove(key)
    }

    /// Stores the resource chosen on the catalog page for the detail page.
    pub fn set_selection(&self, resource: &Resource) -> Result<(), AppError> {
        let json = serde_json::to_string(resource)?;
        self.set(SELECTION_SLOT_KEY, json);
        Ok(())
    }

    /// Reads the hand-off slot. An unreadable value is logged and treated as
    /// missing, which the detail page handles as an empty selection.
    pub fn selection(&self) -> Option<Resource> {
        let raw = self.get(SELECTION_SLOT_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(resource) => Some(resource),
            Err(err) => {
                tracing::warn!("selection slot holds an unreadable resource: {err}");
                None
            }
        }
    }

    /// Stamps the moment of the last successful submission.
    pub fn stamp_last_update(&self) {
        self.set(LAST_UPDATE_SLOT_KEY, Utc::now().to_rfc3339());
    }

    /// Consumes the last-update stamp, if any. The catalog reloads once per
    /// stamp when the tab regains focus.
    pub fn take_last_update(&self) -> Option<String> {
        self.remove(LAST_UPDATE_SLOT_KEY)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Advisory payload broadcast to other open pages after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum UpdateMessage {
    #[serde(rename = "recursosActualizados")]
    ResourcesUpdated,
}

/// Broadcast-style channel for cross-page update notices. Delivery is best
/// effort: consumers may reload on receipt but nothing enforces it.
#[derive(Debug, Clone)]
pub struct UpdateNotifier {
    tx: broadcast::Sender<UpdateMessage>,
}

impl UpdateNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UpdateMessage> {
        self.tx.subscribe()
    }

    pub fn resources_updated(&self) {
        // No listeners is fine; the notice is advisory.
        let _ = self.tx.send(UpdateMessage::ResourcesUpdated);
    }
}

impl Default for UpdateNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_message_carries_localized_tag() {
        let json = serde_json::to_value(UpdateMessage::ResourcesUpdated).unwrap();
        assert_eq!(json, serde_json::json!({ "tipo": "recursosActualizados" }));
    }

    #[test]
    fn corrupt_selection_reads_as_missing() {
        let slots = SessionSlots::new();
        slots.set(SELECTION_SLOT_KEY, "{not json".to_string());
        assert!(slots.selection().is_none());
    }

    #[test]
    fn last_update_stamp_is_consumed_on_read() {
        let slots = SessionSlots::new();
        assert!(slots.take_last_update().is_none());

        slots.stamp_last_update();
        assert!(slots.take_last_update().is_some());
        assert!(slots.take_last_update().is_none());
    }

    #[tokio::test]
    async fn notifier_delivers_to_subscribers() {
        let notifier = UpdateNotifier::new();
        let mut rx = notifier.subscribe();
        notifier.resources_updated();
        assert_eq!(rx.recv().await.unwrap(), UpdateMessage::ResourcesUpdated);
    }
}
