pub mod files;
pub mod store;

pub use files::{ensure_data_dir, get_data_dir, init_local_data_dir, FileStore};
pub use store::{Store, ALL_KEYS, MOOD_KEY, MOOD_LOG_KEY, SELECTED_SECONDS_KEY, TASKS_KEY};
