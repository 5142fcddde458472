pub mod config;
pub mod drag;
pub mod filter;
pub mod i18n;
pub mod persistence;
pub mod prefs;
pub mod session;
pub mod store;
pub mod task;

pub use config::AppConfig;
pub use persistence::{
  KeyValueStore,
  MemoryStore
};
pub use session::{
  Action,
  Outcome,
  Session,
  Slot
};
