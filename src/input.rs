use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::coord::{Intents, Orientation};

/// Everything the player asked for during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub intents: Intents,
    pub start: bool,
    pub quit: bool,
}

impl TickInput {
    /// Folds one key press into this tick's input.
    ///
    /// Terminals report presses rather than held keys, so every direction
    /// pressed within the tick counts as held for it.
    pub fn apply(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                self.intents.insert(Orientation::North)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.intents.insert(Orientation::West)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.intents.insert(Orientation::South)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.intents.insert(Orientation::East)
            }
            KeyCode::Char(' ') => self.start = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }
}

/// Collects key presses until `period` has elapsed.
pub fn poll_tick(period: Duration) -> io::Result<TickInput> {
    let deadline = Instant::now() + period;
    let mut input = TickInput::default();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(input);
        }
        if event::poll(remaining)? {
            if let Event::Key(key) = event::read()? {
                input.apply(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_direction_keys() {
        let mut input = TickInput::default();
        input.apply(press(KeyCode::Char('w')));
        input.apply(press(KeyCode::Right));
        assert!(input.intents.contains(Orientation::North));
        assert!(input.intents.contains(Orientation::East));
        assert!(!input.intents.contains(Orientation::South));
        assert!(!input.start);
        assert!(!input.quit);
    }

    #[test]
    fn test_start_and_quit_keys() {
        let mut input = TickInput::default();
        input.apply(press(KeyCode::Char(' ')));
        assert!(input.start);
        assert!(!input.quit);

        let mut input = TickInput::default();
        input.apply(press(KeyCode::Esc));
        assert!(input.quit);

        let mut input = TickInput::default();
        input.apply(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(input.quit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut input = TickInput::default();
        input.apply(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(input.intents.is_empty());
    }

    #[test]
    fn test_unmapped_keys_do_nothing() {
        let mut input = TickInput::default();
        input.apply(press(KeyCode::Char('x')));
        input.apply(press(KeyCode::Enter));
        assert_eq!(input, TickInput::default());
    }
}
