pub mod app;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod copy_state;
pub mod dataset;
pub mod keybindings;
pub mod logging;
pub mod resolver;
pub mod selection;
pub mod session;
pub mod ui;
pub mod utils;

pub use copy_state::{COPY_FEEDBACK_DELAY, CopyKey, CopyOutcome, CopyTracker};
pub use dataset::{Dataset, DatasetError};
pub use resolver::{resolve_framework_command, resolve_library_command};
pub use selection::Selection;
pub use session::{Session, Slot};
