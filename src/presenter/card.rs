use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::traits::{PagePresenter, PresentSpec};

/// Text-only fallback: every page is a bordered card with its label and
/// pixel dimensions. Also the presenter used by draw tests, since it needs
/// no tty capabilities.
#[derive(Debug, Default)]
pub struct CardPresenter;

impl PagePresenter for CardPresenter {
    fn name(&self) -> &'static str {
        "card"
    }

    fn cell_size_px(&self) -> Option<(u16, u16)> {
        None
    }

    fn draw_page(&mut self, frame: &mut Frame<'_>, area: Rect, spec: &PresentSpec<'_>) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let border_style = if spec.revealed {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(format!(" {} ", spec.label))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let body = if spec.asset.is_broken() {
            "image unavailable".to_string()
        } else {
            format!(
                "{}x{} px @ {:.2}x",
                spec.asset.width, spec.asset.height, spec.zoom
            )
        };
        let style = if spec.revealed {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(body).alignment(Alignment::Center).style(style),
            inner,
        );
    }

    fn invalidate(&mut self) {}
}
