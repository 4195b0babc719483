use crate::{language::Language, logging::Logger, theme::Theme};
use serde_json::json;
use std::{cell::RefCell, collections::HashMap, rc::Rc};
use thiserror::Error;

pub const LANGUAGE_KEY: &str = "preferred-language";
pub const THEME_KEY: &str = "preferred-theme";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("preference storage rejected write to {key}: {reason}")]
    WriteRejected { key: String, reason: String },
}

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone)]
pub struct Preferences {
    store: Rc<dyn PreferenceStore>,
    logger: Logger,
}

impl Preferences {
    pub fn new(store: Rc<dyn PreferenceStore>, logger: Logger) -> Self {
        Self { store, logger }
    }

    pub fn stored_language(&self) -> Option<String> {
        self.store.get(LANGUAGE_KEY)
    }

    pub fn persist_language(&self, language: Language) {
        self.write(LANGUAGE_KEY, language.as_str());
    }

    pub fn stored_theme(&self) -> Option<String> {
        self.store.get(THEME_KEY)
    }

    pub fn persist_theme(&self, theme: Theme) {
        self.write(THEME_KEY, theme.as_str());
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            self.logger.warn(
                "preference_write_failed",
                json!({ "key": key, "error": err.to_string() }),
            );
        }
    }
}
