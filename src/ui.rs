use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::CollectionKind;
use crate::projection::{ItemView, ViewProjection};
use crate::theme::Theme;

fn render_item_line(item: &ItemView, edit_mode: bool, theme: &Theme) -> Line<'static> {
    let marker = match (edit_mode, item.selected) {
        (false, _) => "   ",
        (true, false) => "[ ]",
        (true, true) => "[x]",
    };
    let label_style = if item.selected {
        theme.item_selected
    } else if item.editable {
        theme.item_editable
    } else {
        theme.item_hover
    };
    let detail = match &item.event_id {
        Some(event_id) => format!("  #{} · event {event_id}", item.id),
        None => format!("  #{}", item.id),
    };
    Line::from(vec![
        Span::raw(format!("{marker} ")),
        Span::styled(item.label.clone(), label_style),
        Span::styled(
            detail,
            Style::default().fg(theme.text_secondary).add_modifier(Modifier::DIM),
        ),
    ])
}

/// Renders the album view from the controller's projection.
pub fn render_album<A>(f: &mut Frame, app: &App<A>, theme: &Theme) {
    let view = ViewProjection::project(&app.controller);
    let context = app.controller.context();
    let edit_mode = view.delete_selected.is_some();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(3),    // images
            Constraint::Length(3), // buttons
            Constraint::Length(3), // footer
        ])
        .split(f.area());

    // Header
    let mut header = vec![Span::styled(
        format!("Album {} – Event {}", context.album_id, context.event_id),
        theme.popup_title,
    )];
    if context.kind == CollectionKind::AllItems {
        header.push(Span::raw(" (all photos)"));
    }
    if edit_mode {
        header.push(Span::styled("  EDIT MODE", theme.button_danger));
    }
    if app.pending > 0 {
        header.push(Span::styled(
            format!("  {} request(s) pending…", app.pending),
            theme.pending,
        ));
    }
    let header = Paragraph::new(Line::from(header)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.blurred_border)),
    );
    f.render_widget(header, chunks[0]);

    // Images
    let list_block = Block::default()
        .title(format!("Images ({})", view.items.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.focus_border));
    if view.items.is_empty() {
        let placeholder = Paragraph::new("This album has no images.")
            .block(list_block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_secondary));
        f.render_widget(placeholder, chunks[1]);
    } else {
        let items: Vec<ListItem> = view
            .items
            .iter()
            .map(|item| ListItem::new(render_item_line(item, edit_mode, theme)))
            .collect();
        // the hover highlight only exists outside edit mode
        let highlight = if edit_mode {
            Style::default()
        } else {
            theme.item_cursor
        };
        let list = List::new(items)
            .block(list_block)
            .highlight_symbol("→")
            .highlight_style(highlight);
        let mut state = ListState::default();
        state.select(Some(app.cursor));
        f.render_stateful_widget(list, chunks[1], &mut state);
    }

    // Buttons
    let mut buttons = vec![Span::styled(
        format!("[e] {}", view.edit_button_label),
        theme.button,
    )];
    if view.delete_collection_visible {
        buttons.push(Span::raw("   "));
        buttons.push(Span::styled("[D] Delete Album", theme.button_danger));
    }
    if let Some(button) = view.delete_selected {
        let style = if button.enabled {
            theme.button_danger
        } else {
            theme.button_disabled
        };
        buttons.push(Span::raw("   "));
        buttons.push(Span::styled(
            format!("[d] Delete Selected ({})", button.count),
            style,
        ));
    }
    let buttons =
        Paragraph::new(Line::from(buttons)).block(Block::default().borders(Borders::ALL));
    f.render_widget(buttons, chunks[2]);

    // Footer
    let footer_text = if edit_mode {
        "↑/↓ or j/k Navigation | <Space> Select | d Delete selected | e Leave edit mode | r Reload | q Quit"
    } else {
        "↑/↓ or j/k Navigation | e Edit mode | D Remove album | r Reload | q Quit"
    };
    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL))
        .style(theme.footer);
    f.render_widget(footer, chunks[3]);

    // Notice popup
    if app.popup.visible {
        if let Some(notice) = &app.popup.notice {
            let popup_area = centered_rect(60, 20, f.area());
            f.render_widget(Clear, popup_area);
            let block = Block::default()
                .title(Span::styled(
                    format!("Notice {}", app.popup.timestamp),
                    theme.popup_title,
                ))
                .borders(Borders::ALL)
                .style(theme.popup_border);
            let para = Paragraph::new(vec![
                Line::from(Span::styled(notice.text.clone(), theme.notice(notice.level))),
                Line::from(""),
                Line::from(Span::styled("Press Esc to close", theme.footer)),
            ])
            .block(block)
            .wrap(Wrap { trim: true });
            f.render_widget(para, popup_area);
        }
    }

    // Confirmation popup
    if let Some(confirm) = &app.confirm {
        let popup_area = centered_rect(60, 25, f.area());
        f.render_widget(Clear, popup_area);
        let block = Block::default()
            .title(Span::styled("Confirm", theme.popup_title))
            .borders(Borders::ALL)
            .style(theme.popup_border);
        let para = Paragraph::new(vec![
            Line::from(Span::styled(confirm.prompt.clone(), theme.popup_text)),
            Line::from(""),
            Line::from(Span::styled("y = yes, n/Esc = no", theme.footer)),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        f.render_widget(para, popup_area);
    }
}

/// Centers a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r)[1];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical)[1]
}
