use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Gauge, Paragraph};

use super::layout::UiLayout;

/// Everything the chrome needs, computed by the reader per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub title: String,
    pub counter: String,
    pub mode_tag: &'static str,
    pub hint: &'static str,
    pub zoom: f32,
    /// Progress through the book, 0..=100.
    pub progress_percent: f32,
    pub status_message: String,
}

pub fn draw_chrome(frame: &mut Frame<'_>, layout: UiLayout, hud: &HudView) {
    if layout.header.height > 0 {
        let header = format!(
            "{} | {} | {} | zoom {:.2}x",
            hud.title, hud.counter, hud.mode_tag, hud.zoom
        );
        frame.render_widget(Paragraph::new(header), layout.header);
    }

    if layout.progress.height > 0 {
        let ratio = (hud.progress_percent as f64 / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .ratio(ratio)
            .label(format!("{:.0}%", hud.progress_percent))
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black));
        frame.render_widget(gauge, layout.progress);
    }

    if layout.footer.height > 0 {
        let footer = if hud.status_message.is_empty() {
            format!("{} | t thumbs  h help  f fullscreen  q quit", hud.hint)
        } else {
            format!(
                "{} | {} | t thumbs  h help  f fullscreen  q quit",
                hud.hint, hud.status_message
            )
        };
        frame.render_widget(
            Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
            layout.footer,
        );
    }
}

/// Drawn only while fullscreen is actually active, over the column's last
/// row; driven by observed fullscreen state, never by the request.
pub fn draw_exit_fullscreen_hint(frame: &mut Frame<'_>, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let hint_row = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    frame.render_widget(
        Paragraph::new("f exit fullscreen")
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        hint_row,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::ui::split_layout;

    use super::{HudView, draw_chrome, draw_exit_fullscreen_hint};

    fn hud() -> HudView {
        HudView {
            title: "Demo Comic".to_string(),
            counter: "4 / 6".to_string(),
            mode_tag: "SCROLL",
            hint: "Scroll to read",
            zoom: 1.3,
            progress_percent: 60.0,
            status_message: String::new(),
        }
    }

    #[test]
    fn chrome_shows_counter_mode_and_progress() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");

        terminal
            .draw(|frame| {
                let layout = split_layout(Rect::new(0, 0, 60, 10), false);
                draw_chrome(frame, layout, &hud());
            })
            .expect("draw should pass");

        let rendered = terminal.backend().to_string();
        assert!(rendered.contains("4 / 6"));
        assert!(rendered.contains("SCROLL"));
        assert!(rendered.contains("60%"));
        assert!(rendered.contains("zoom 1.30x"));
    }

    #[test]
    fn fullscreen_frame_has_no_chrome_but_shows_exit_hint() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");

        terminal
            .draw(|frame| {
                let layout = split_layout(Rect::new(0, 0, 60, 10), true);
                draw_chrome(frame, layout, &hud());
                draw_exit_fullscreen_hint(frame, layout.column);
            })
            .expect("draw should pass");

        let rendered = terminal.backend().to_string();
        assert!(!rendered.contains("SCROLL"));
        assert!(rendered.contains("f exit fullscreen"));
    }
}
