//! Key mapping and action dispatch system for sprig
//!
//! Defines key to an action, parsing from the config, and enum variants
//! for all navigation, focus and system actions used by sprig.

use crate::config::Keys;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, focus, or system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    Nav(NavAction),
    Focus(FocusAction),
    System(SystemAction),
}

/// Tree cursor and selection actions. In preview focus the movement ones scroll instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NavAction {
    Select,
    Up,
    Down,
    Expand,
    Collapse,
    Top,
    Bottom,
    PageUp,
    PageDown,
}

/// Actions handled by the focus state machine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FocusAction {
    Toggle,
    Edit,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SystemAction {
    Help,
    Quit,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built in the config
#[derive(Debug)]
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the `[keys]` config section
    #[rustfmt::skip]
    pub fn from_config(keys: &Keys) -> Self {
        let mut map = HashMap::new();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use FocusAction as F;
        use SystemAction as S;

        // NavActions
        bind!(keys.select(),        Action::Nav(N::Select));
        bind!(keys.up(),            Action::Nav(N::Up));
        bind!(keys.down(),          Action::Nav(N::Down));
        bind!(keys.expand(),        Action::Nav(N::Expand));
        bind!(keys.collapse(),      Action::Nav(N::Collapse));
        bind!(keys.top(),           Action::Nav(N::Top));
        bind!(keys.bottom(),        Action::Nav(N::Bottom));
        bind!(keys.page_up(),       Action::Nav(N::PageUp));
        bind!(keys.page_down(),     Action::Nav(N::PageDown));

        // FocusActions
        bind!(keys.toggle_focus(),  Action::Focus(F::Toggle));
        bind!(keys.edit(),          Action::Focus(F::Edit));

        // SystemActions
        bind!(keys.help(),          Action::System(S::Help));
        bind!(keys.quit(),          Action::System(S::Quit));

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    // A lone "+" or "-" is the key itself, not a separator.
    if input == "+" || input == "-" {
        return Some(Key {
            code: KeyCode::Char(input.chars().next()?),
            modifiers,
        });
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" | "return" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "pageup" | "pgup" => code = Some(KeyCode::PageUp),
            "pagedown" | "pgdn" => code = Some(KeyCode::PageDown),
            "delete" | "del" => code = Some(KeyCode::Delete),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, ?action, "ignoring unparsable key binding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
        Some(Key { code, modifiers })
    }

    #[test]
    fn parses_named_and_modified_keys() {
        assert_eq!(parse_key("Enter"), key(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(parse_key("Space"), key(KeyCode::Char(' '), KeyModifiers::NONE));
        assert_eq!(parse_key("PageDown"), key(KeyCode::PageDown, KeyModifiers::NONE));
        assert_eq!(parse_key("Home"), key(KeyCode::Home, KeyModifiers::NONE));
        assert_eq!(parse_key("Ctrl+u"), key(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(parse_key("<c-d>"), key(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(parse_key("<m-x>"), key(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(parse_key("shift+n"), key(KeyCode::Char('N'), KeyModifiers::SHIFT));
        assert_eq!(parse_key("F5"), key(KeyCode::F(5), KeyModifiers::NONE));
        assert_eq!(parse_key("G"), key(KeyCode::Char('G'), KeyModifiers::NONE));
        assert_eq!(parse_key("-"), key(KeyCode::Char('-'), KeyModifiers::NONE));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_key("hyper+x"), None);
        assert_eq!(parse_key("<q-x>"), None);
        assert_eq!(parse_key("ctrl+"), None);
    }

    #[test]
    fn default_bindings_resolve() {
        let keymap = Keymap::from_config(&Keys::default());
        let press = |code, modifiers| keymap.lookup(KeyEvent::new(code, modifiers));

        assert_eq!(
            press(KeyCode::Enter, KeyModifiers::NONE),
            Some(Action::Nav(NavAction::Select))
        );
        assert_eq!(
            press(KeyCode::Char('d'), KeyModifiers::CONTROL),
            Some(Action::Nav(NavAction::PageDown))
        );
        assert_eq!(
            press(KeyCode::Tab, KeyModifiers::NONE),
            Some(Action::Focus(FocusAction::Toggle))
        );
        assert_eq!(
            press(KeyCode::Char('e'), KeyModifiers::NONE),
            Some(Action::Focus(FocusAction::Edit))
        );
        assert_eq!(
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::System(SystemAction::Quit))
        );
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::NONE), None);
    }

    #[test]
    fn shifted_chars_fall_back_to_plain_binding() {
        let keymap = Keymap::from_config(&Keys::default());
        assert_eq!(
            keymap.lookup(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Action::Nav(NavAction::Bottom))
        );
        assert_eq!(
            keymap.lookup(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(Action::System(SystemAction::Help))
        );
    }
}
