pub mod event;
pub mod mode;
pub mod section;
pub mod state;

pub use mode::Mode;
pub use section::Section;
pub use state::AppState;
