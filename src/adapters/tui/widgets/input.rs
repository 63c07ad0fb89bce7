use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Single-line text input with a border, placeholder and optional masking.
/// Used for search, the new-todo form, edit overlays and the auth screens.
pub struct InputField {
    title: String,
    placeholder: String,
    text: String,
    cursor: usize, // char index, not bytes
    is_focused: bool,
    masked: bool,
}

impl InputField {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            placeholder: placeholder.into(),
            text: String::new(),
            cursor: 0,
            is_focused: false,
            masked: false,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = self.byte_offset(self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            let byte_pos = self.byte_offset(self.cursor - 1);
            self.text.remove(byte_pos);
            self.cursor -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);

        let display: String = if self.masked {
            "*".repeat(self.text.chars().count())
        } else {
            self.text.clone()
        };

        let (content, style) = if display.is_empty() {
            (
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (display, Style::default())
        };

        let paragraph = Paragraph::new(content).block(block).style(style);
        frame.render_widget(paragraph, area);

        if self.is_focused {
            let cursor_x = area.x + 1 + self.cursor as u16;
            if cursor_x < area.x + area.width - 1 {
                frame.set_cursor_position(ratatui::layout::Position {
                    x: cursor_x,
                    y: area.y + 1,
                });
            }
        }
    }
}
