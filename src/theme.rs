use ratatui::style::{Color, Modifier, Style};

use crate::models::NoticeLevel;

pub struct Theme {
    pub focus_border: Color,
    pub blurred_border: Color,
    pub text_secondary: Color,

    // Specific components
    pub item_hover: Style,
    pub item_editable: Style,
    pub item_selected: Style,
    pub item_cursor: Style,
    pub button: Style,
    pub button_disabled: Style,
    pub button_danger: Style,
    pub pending: Style,
    pub footer: Style,
    pub popup_title: Style,
    pub popup_border: Style,
    pub popup_text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            blurred_border: Color::DarkGray,
            text_secondary: Color::Gray,

            item_hover: Style::default().fg(Color::White),
            item_editable: Style::default().fg(Color::Gray),
            item_selected: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            item_cursor: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            button: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            button_danger: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            pending: Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            popup_title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            popup_border: Style::default().bg(Color::Black),
            popup_text: Style::default().fg(Color::White),
        }
    }
}

impl Theme {
    pub fn notice(&self, level: NoticeLevel) -> Style {
        match level {
            NoticeLevel::Info => Style::default().fg(Color::Green),
            NoticeLevel::Warning => Style::default().fg(Color::Yellow),
            NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}
