use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Pick, // Default: move between sections, select, copy
    Help, // Help overlay is open
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Pick => write!(f, "PICK"),
            Mode::Help => write!(f, "HELP"),
        }
    }
}
