use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

pub const TITLE: &str = "Explore repositórios no Github";

pub struct HeaderBar<'a> {
    /// Shown after the title, e.g. the open repository on the details screen.
    pub context: Option<&'a str>,
}

impl<'a> Widget for HeaderBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::HEADER_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        let mut spans = vec![
            Span::styled(
                " github explorer",
                Style::default()
                    .fg(theme::ACCENT)
                    .bg(theme::HEADER_BG)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " \u{2503} ",
                Style::default().fg(theme::SEPARATOR).bg(theme::HEADER_BG),
            ),
            Span::styled(TITLE, Style::default().bg(theme::HEADER_BG)),
        ];

        if let Some(ctx) = self.context {
            spans.push(Span::styled(
                format!(" \u{203a} {ctx}"),
                Style::default().fg(theme::ACCENT).bg(theme::HEADER_BG),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let right = "? ajuda ";
        let right_w = UnicodeWidthStr::width(right);
        let area_w = area.width as usize;
        if area_w > right_w + 40 {
            let right_x = area.x + (area_w - right_w) as u16;
            let right_span = Span::styled(
                right,
                Style::default().fg(theme::DIM_TEXT).bg(theme::HEADER_BG),
            );
            buf.set_line(right_x, area.y, &Line::from(right_span), right_w as u16);
        }
    }
}
