use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// All bindable actions in the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Within a section
    MoveLeft,
    MoveRight,

    // Between sections
    NextSection,
    PrevSection,
    FirstSection,
    LastSection,

    Select,
    Copy,

    // UI
    ToggleHelp,
    CloseHelp,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::FirstSection => "first_section",
            Action::LastSection => "last_section",
            Action::Select => "select",
            Action::Copy => "copy",
            Action::ToggleHelp => "toggle_help",
            Action::CloseHelp => "close_help",
            Action::Quit => "quit",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "move_left" => Ok(Action::MoveLeft),
            "move_right" => Ok(Action::MoveRight),
            "next_section" => Ok(Action::NextSection),
            "prev_section" => Ok(Action::PrevSection),
            "first_section" => Ok(Action::FirstSection),
            "last_section" => Ok(Action::LastSection),
            "select" => Ok(Action::Select),
            "copy" => Ok(Action::Copy),
            "toggle_help" => Ok(Action::ToggleHelp),
            "close_help" => Ok(Action::CloseHelp),
            "quit" => Ok(Action::Quit),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        let modifiers = match event.code {
            // Terminals disagree on whether these carry SHIFT
            KeyCode::BackTab | KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
            _ => event.modifiers,
        };
        Self {
            code: event.code,
            modifiers,
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("A");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S");
        }

        let key_str = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "S-Tab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };

        parts.push(&key_str);

        if parts.len() > 1 || key_str.len() > 1 {
            write!(f, "<{}>", parts.join("-"))
        } else {
            write!(f, "{}", key_str)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequence(pub Vec<KeyBinding>);

impl KeySequence {
    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }
}

/// Parse key sequence: "y", "gg", "<C-c>", "<C-w><C-w>", "g g", etc.
impl FromStr for KeySequence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut keys = Vec::new();
        let mut chars = s.trim().chars();

        while let Some(c) = chars.next() {
            match c {
                ' ' => continue,
                '<' => {
                    let mut bracket_content = String::from('<');
                    for c in chars.by_ref() {
                        bracket_content.push(c);
                        if c == '>' {
                            break;
                        }
                    }
                    keys.push(bracket_content.parse::<KeyBinding>()?);
                }
                c => keys.push(KeyBinding::new(KeyCode::Char(c), KeyModifiers::NONE)),
            }
        }

        if keys.is_empty() {
            return Err("Empty key sequence".to_string());
        }

        if keys.len() > 2 {
            return Err("Key sequences longer than 2 are not supported".to_string());
        }

        Ok(KeySequence(keys))
    }
}

impl FromStr for KeyBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
            return parse_bracket_notation(inner);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(KeyBinding::new(KeyCode::Char(c), KeyModifiers::NONE)),
            _ => Err(format!("Invalid key binding: {}", s)),
        }
    }
}

fn parse_bracket_notation(s: &str) -> Result<KeyBinding, String> {
    let parts: Vec<&str> = s.split('-').collect();

    let mut modifiers = KeyModifiers::NONE;
    let mut key_part = "";

    for (i, part) in parts.iter().enumerate() {
        if i == parts.len() - 1 {
            key_part = part;
        } else {
            match part.to_uppercase().as_str() {
                "C" | "CTRL" | "CONTROL" => modifiers |= KeyModifiers::CONTROL,
                "A" | "ALT" | "M" | "META" => modifiers |= KeyModifiers::ALT,
                "S" | "SHIFT" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
    }

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let s_lower = s.to_lowercase();

    match s_lower.as_str() {
        "space" => Ok(KeyCode::Char(' ')),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "enter" | "return" | "cr" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        f if f.starts_with('f') && f.len() > 1 => {
            let n: u8 = f[1..].parse().map_err(|_| format!("Invalid F key: {}", s))?;
            Ok(KeyCode::F(n))
        }
        _ => {
            // Single characters keep their case: "G" and "g" differ.
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(KeyCode::Char(c)),
                _ => Err(format!("Unknown key: {}", s)),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLookupResult {
    Action(Action),
    Pending,
    None,
}

#[derive(Debug, Clone)]
pub struct KeybindingCache {
    picker_single: HashMap<KeyBinding, Action>,
    picker_sequences: HashMap<KeyBinding, HashMap<KeyBinding, Action>>,
    picker_sequence_starters: HashSet<KeyBinding>,

    help_single: HashMap<KeyBinding, Action>,
}

impl KeybindingCache {
    pub fn from_config(config: &KeybindingsConfig) -> Self {
        let mut picker_single = HashMap::new();
        let mut picker_sequences: HashMap<KeyBinding, HashMap<KeyBinding, Action>> = HashMap::new();
        let mut picker_sequence_starters = HashSet::new();

        for (key_str, action_str) in &config.picker {
            match (key_str.parse::<KeySequence>(), action_str.parse::<Action>()) {
                (Ok(seq), Ok(action)) if seq.is_single() => {
                    picker_single.insert(seq.0[0], action);
                }
                (Ok(seq), Ok(action)) => {
                    picker_sequence_starters.insert(seq.0[0]);
                    picker_sequences
                        .entry(seq.0[0])
                        .or_default()
                        .insert(seq.0[1], action);
                }
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!(key = %key_str, action = %action_str, "Ignoring keybinding: {}", e);
                }
            }
        }

        let mut help_single = HashMap::new();
        for (key_str, action_str) in &config.help {
            if let (Ok(seq), Ok(action)) = (key_str.parse::<KeySequence>(), action_str.parse::<Action>()) {
                if seq.is_single() {
                    help_single.insert(seq.0[0], action);
                }
            }
        }

        Self {
            picker_single,
            picker_sequences,
            picker_sequence_starters,
            help_single,
        }
    }

    pub fn lookup_picker(&self, event: &KeyEvent, pending: Option<KeyBinding>) -> KeyLookupResult {
        let binding = KeyBinding::from_event(event);

        if let Some(first_key) = pending {
            if let Some(&action) = self
                .picker_sequences
                .get(&first_key)
                .and_then(|second_map| second_map.get(&binding))
            {
                return KeyLookupResult::Action(action);
            }
            return KeyLookupResult::None;
        }

        if self.picker_sequence_starters.contains(&binding) {
            return KeyLookupResult::Pending;
        }

        if let Some(&action) = self.picker_single.get(&binding) {
            return KeyLookupResult::Action(action);
        }

        KeyLookupResult::None
    }

    /// Single-key action for `first`, used when a pending sequence times out.
    pub fn picker_single_action(&self, first: KeyBinding) -> Option<Action> {
        self.picker_single.get(&first).copied()
    }

    pub fn get_help_action(&self, event: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.help_single.get(&binding).copied()
    }
}

impl Default for KeybindingCache {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_picker_bindings")]
    pub picker: HashMap<String, String>,

    #[serde(default = "default_help_bindings")]
    pub help: HashMap<String, String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            picker: default_picker_bindings(),
            help: default_help_bindings(),
        }
    }
}

impl KeybindingsConfig {
    /// Keep user entries, fill in every default key the user did not rebind.
    pub fn merge_with_defaults(mut self) -> Self {
        for (key, action) in default_picker_bindings() {
            self.picker.entry(key).or_insert(action);
        }
        for (key, action) in default_help_bindings() {
            self.help.entry(key).or_insert(action);
        }
        self
    }
}

fn default_picker_bindings() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("h".to_string(), "move_left".to_string());
    m.insert("l".to_string(), "move_right".to_string());
    m.insert("<Left>".to_string(), "move_left".to_string());
    m.insert("<Right>".to_string(), "move_right".to_string());
    m.insert("j".to_string(), "next_section".to_string());
    m.insert("k".to_string(), "prev_section".to_string());
    m.insert("<Down>".to_string(), "next_section".to_string());
    m.insert("<Up>".to_string(), "prev_section".to_string());
    m.insert("<Tab>".to_string(), "next_section".to_string());
    m.insert("<BackTab>".to_string(), "prev_section".to_string());
    m.insert("gg".to_string(), "first_section".to_string());
    m.insert("G".to_string(), "last_section".to_string());
    m.insert("<Enter>".to_string(), "select".to_string());
    m.insert("<Space>".to_string(), "select".to_string());
    m.insert("y".to_string(), "copy".to_string());
    m.insert("c".to_string(), "copy".to_string());
    m.insert("?".to_string(), "toggle_help".to_string());
    m.insert("q".to_string(), "quit".to_string());

    m
}

fn default_help_bindings() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("?".to_string(), "close_help".to_string());
    m.insert("<Esc>".to_string(), "close_help".to_string());
    m.insert("q".to_string(), "close_help".to_string());

    m
}
