//! View/navigation shell
//!
//! Four mutually exclusive screens plus an orthogonal detail overlay for one
//! selected item. The overlay survives tab changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Library,
    Add,
    Vibe,
    Profile,
}

impl Screen {
    /// Screens that list items and can open the detail overlay
    pub fn can_open_detail(&self) -> bool {
        matches!(self, Screen::Library | Screen::Vibe)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Item detail cannot be opened from the {0:?} screen")]
    DetailNotAvailable(Screen),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shell {
    active: Screen,
    selected: Option<String>,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    /// Id of the item under detail inspection
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.active = screen;
    }

    pub fn open_detail(&mut self, item_id: impl Into<String>) -> Result<(), ShellError> {
        if !self.active.can_open_detail() {
            return Err(ShellError::DetailNotAvailable(self.active));
        }
        self.selected = Some(item_id.into());
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Closes the overlay if it shows the removed item
    pub fn item_removed(&mut self, item_id: &str) {
        if self.selected.as_deref() == Some(item_id) {
            self.selected = None;
        }
    }

    pub fn sign_out(&mut self) {
        self.selected = None;
        self.active = Screen::Library;
    }
}
