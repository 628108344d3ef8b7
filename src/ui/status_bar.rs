use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBar<'a> {
    pub count: usize,
    pub pending: usize,
    /// Storage file, or `None` when nothing is persisted.
    pub storage: Option<&'a str>,
    pub hints: &'a str,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::STATUS_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        let sep = || {
            Span::styled(
                "\u{2502}",
                Style::default().fg(theme::BORDER_COLOR).bg(theme::STATUS_BG),
            )
        };

        let mut spans = vec![
            Span::styled(format!(" {} repositórios ", self.count), bg),
            sep(),
        ];

        if self.pending > 0 {
            spans.push(Span::styled(
                format!(" buscando {}\u{2026} ", self.pending),
                Style::default()
                    .fg(theme::FOCUS_BORDER)
                    .bg(theme::STATUS_BG)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(sep());
        }

        let storage = match self.storage {
            Some(path) => format!(" salvo em {path} "),
            None => " sem persistência ".to_string(),
        };
        spans.push(Span::styled(
            storage,
            Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG),
        ));
        spans.push(sep());
        spans.push(Span::styled(
            format!(" {}", self.hints),
            Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG),
        ));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
