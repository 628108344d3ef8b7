use crate::ui::{theme, truncate_with_ellipsis};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

const PLACEHOLDER: &str = "Digite o nome do repositório";
const BUTTON: &str = " Pesquisar ";

/// Input box plus the inline error line below it. Needs four rows.
pub struct SearchForm<'a> {
    pub input: &'a str,
    pub error: Option<&'a str>,
    pub focused: bool,
    pub searching: bool,
}

impl<'a> Widget for SearchForm<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let border_style = if self.error.is_some() {
            Style::default().fg(theme::ERROR_FG)
        } else if self.focused {
            Style::default().fg(theme::FOCUS_BORDER)
        } else {
            Style::default().fg(theme::BORDER_COLOR)
        };

        let box_area = Rect::new(area.x, area.y, area.width, 3);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(box_area);
        block.render(box_area, buf);

        let button = if self.searching { " \u{2026} " } else { BUTTON };
        let button_w = UnicodeWidthStr::width(button) as u16;
        let text_w = inner.width.saturating_sub(button_w + 1) as usize;

        let line = if self.input.is_empty() && !self.focused {
            Line::from(Span::styled(
                truncate_with_ellipsis(PLACEHOLDER, text_w),
                Style::default().fg(theme::DIM_TEXT),
            ))
        } else {
            // keep the tail visible while typing past the box width
            let shown = tail_fitting(self.input, text_w.saturating_sub(1));
            let mut spans = vec![Span::raw(shown.to_string())];
            if self.focused {
                spans.push(Span::styled(
                    "\u{258c}",
                    Style::default().fg(theme::FOCUS_BORDER),
                ));
            }
            Line::from(spans)
        };
        buf.set_line(inner.x, inner.y, &line, text_w as u16);

        if inner.width > button_w {
            let bx = inner.right() - button_w;
            buf.set_line(
                bx,
                inner.y,
                &Line::from(Span::styled(
                    button,
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )),
                button_w,
            );
        }

        if let Some(err) = self.error {
            if area.height > 3 {
                let line = Line::from(Span::styled(
                    format!(" {err}"),
                    Style::default().fg(theme::ERROR_FG),
                ));
                buf.set_line(area.x, area.y + 3, &line, area.width);
            }
        }
    }
}

fn tail_fitting(s: &str, max: usize) -> &str {
    if UnicodeWidthStr::width(s) <= max {
        return s;
    }
    let mut w = 0;
    for (idx, ch) in s.char_indices().rev() {
        w += unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if w > max {
            return &s[idx + ch.len_utf8()..];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    fn render(form: SearchForm) -> String {
        let area = Rect::new(0, 0, 60, 4);
        let mut buf = Buf::empty(area);
        form.render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn shows_placeholder_when_idle() {
        let text = render(SearchForm {
            input: "",
            error: None,
            focused: false,
            searching: false,
        });
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("Pesquisar"));
    }

    #[test]
    fn shows_inline_error() {
        let text = render(SearchForm {
            input: "",
            error: Some("Digite o autor/nome do repositório."),
            focused: true,
            searching: false,
        });
        assert!(text.contains("Digite o autor/nome do repositório."));
    }

    #[test]
    fn tail_fitting_keeps_the_end() {
        assert_eq!(tail_fitting("facebook/react", 5), "react");
        assert_eq!(tail_fitting("abc", 5), "abc");
    }
}
