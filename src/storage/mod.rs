//! Client-side persisted state: visualization history and theme preference.

pub mod history;
pub mod kv;
pub mod theme;

pub use history::{HISTORY_KEY, HistoryEntry, HistoryStore, MAX_HISTORY_ITEMS};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use theme::{Palette, THEME_KEY, Theme, ThemeStore};
