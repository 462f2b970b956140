use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::layout::centered_rect;

/// One drawer entry: the page label plus a short note (dimensions, or
/// "missing" for a broken asset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbCard {
    pub label: String,
    pub note: String,
}

pub fn draw_loading_overlay(frame: &mut Frame<'_>, area: Rect, page_count: usize) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup_width = area.width.min(34);
    let popup_height = area.height.min(5);
    let popup = centered_rect(area, popup_width, popup_height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title("Loading")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let message = Paragraph::new(format!("Preloading {page_count} pages..."))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    frame.render_widget(message, inner);
}

/// Right-hand jump list. The selected card is highlighted; activation is
/// handled by the command layer, this only draws.
pub fn draw_drawer(frame: &mut Frame<'_>, area: Rect, cards: &[ThumbCard], selected: usize) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let panel_width = area.width.min(32);
    let panel = Rect::new(
        area.x + area.width - panel_width,
        area.y,
        panel_width,
        area.height,
    );
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .title(" Pages ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let max_cards = inner.height as usize;
    let selected = selected.min(cards.len().saturating_sub(1));
    // Keep the selection visible: scroll the window so it stays centered-ish.
    let start = if cards.len() <= max_cards || selected < max_cards / 2 {
        0
    } else if selected >= cards.len() - max_cards / 2 {
        cards.len().saturating_sub(max_cards)
    } else {
        selected.saturating_sub(max_cards / 2)
    };

    let mut lines = Vec::new();
    for (offset, card) in cards.iter().skip(start).take(max_cards).enumerate() {
        let index = start + offset;
        let is_selected = index == selected;
        let marker = if is_selected { " ┃ " } else { "   " };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::White)),
            Span::raw(card.label.clone()),
            Span::raw("  "),
            Span::styled(card.note.clone(), Style::default().fg(Color::DarkGray)),
        ];
        let used: usize = 3 + card.label.chars().count() + 2 + card.note.chars().count();
        spans.push(Span::raw(
            " ".repeat((inner.width as usize).saturating_sub(used)),
        ));

        let line_style = if is_selected {
            Style::default().bg(Color::Rgb(45, 45, 50))
        } else {
            Style::default()
        };
        lines.push(Line::from(spans).style(line_style));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn draw_help_overlay(frame: &mut Frame<'_>, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup_width = area.width.min(46);
    let popup_height = area.height.min(14);
    let popup = centered_rect(area, popup_width, popup_height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let rows = [
        ("t", "open pages drawer"),
        ("h", "open this help"),
        ("f", "toggle fullscreen"),
        ("s", "start reading (fullscreen + resume)"),
        ("+ / =", "zoom in"),
        ("-", "zoom out"),
        ("0", "reset zoom"),
        ("j / k", "scroll"),
        ("g / G", "first / last page"),
        ("Esc", "close overlays"),
        ("q", "quit"),
    ];
    let lines: Vec<Line<'_>> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::raw(" "),
                Span::styled(format!("{key:<7}"), Style::default().bold()),
                Span::raw(*what),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
