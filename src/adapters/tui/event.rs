use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Keyboard input, lightly classified. Printable characters stay generic;
/// the app decides whether a char is text for a focused input or a command.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Quit,
    ToggleAuthScreen,
    Character(char),
    Backspace,
    Enter,
    Escape,
    Tab,
    BackTab,
    Up,
    Down,
    Tick,
}

pub struct EventHandler {
    should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self { should_quit: false }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn next_event(&mut self) -> Result<AppEvent> {
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key_event) => Ok(self.handle_key_event(key_event)),
                _ => Ok(AppEvent::Tick),
            }
        } else {
            Ok(AppEvent::Tick)
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> AppEvent {
        match key_event {
            // Global quit with Ctrl+C
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.should_quit = true;
                AppEvent::Quit
            }

            // Switch between login and signup
            KeyEvent {
                code: KeyCode::Char('s'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => AppEvent::ToggleAuthScreen,

            KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            } => AppEvent::Escape,

            KeyEvent {
                code: KeyCode::Tab,
                modifiers: KeyModifiers::NONE,
                ..
            } => AppEvent::Tab,

            KeyEvent {
                code: KeyCode::BackTab,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => AppEvent::BackTab,

            KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE,
                ..
            } => AppEvent::Enter,

            KeyEvent {
                code: KeyCode::Up,
                modifiers: KeyModifiers::NONE,
                ..
            } => AppEvent::Up,

            KeyEvent {
                code: KeyCode::Down,
                modifiers: KeyModifiers::NONE,
                ..
            } => AppEvent::Down,

            KeyEvent {
                code: KeyCode::Backspace,
                modifiers: KeyModifiers::NONE,
                ..
            } => AppEvent::Backspace,

            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE,
                ..
            } => AppEvent::Character(c),

            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::SHIFT,
                ..
            } => AppEvent::Character(c.to_uppercase().next().unwrap_or(c)),

            _ => AppEvent::Tick,
        }
    }
}
