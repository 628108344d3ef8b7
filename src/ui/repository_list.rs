use crate::github::types::Repository;
use crate::ui::{theme, truncate_with_ellipsis};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Rows each entry takes: name, description, gap.
pub const ENTRY_HEIGHT: usize = 3;

const CHEVRON: &str = "\u{203a}";

pub struct RepositoryList<'a> {
    pub repositories: &'a [Repository],
    pub selected: usize,
    /// Index of the first visible entry.
    pub scroll: usize,
    pub focused: bool,
}

impl<'a> Widget for RepositoryList<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let border_style = if self.focused {
            Style::default().fg(theme::FOCUS_BORDER)
        } else {
            Style::default().fg(theme::BORDER_COLOR)
        };

        let block = Block::default()
            .title(format!(" Repositórios ({}) ", self.repositories.len()))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 4 || inner.height == 0 {
            return;
        }

        if self.repositories.is_empty() {
            let line = Line::from(Span::styled(
                " Nenhum repositório ainda",
                Style::default().fg(theme::DIM_TEXT),
            ));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        let text_w = inner.width.saturating_sub(3) as usize;
        let visible = (inner.height as usize).div_ceil(ENTRY_HEIGHT);

        for (i, repo) in self
            .repositories
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible)
        {
            let top = inner.y + ((i - self.scroll) * ENTRY_HEIGHT) as u16;
            let is_selected = i == self.selected;

            if is_selected {
                let sel_bg = if self.focused {
                    theme::SELECTED_BG
                } else {
                    theme::UNFOCUSED_SEL_BG
                };
                for y in top..(top + 2).min(inner.bottom()) {
                    for x in inner.x..inner.right() {
                        buf[(x, y)].set_style(Style::default().bg(sel_bg));
                    }
                }
            }

            let name_line = Line::from(vec![
                Span::styled(
                    truncate_with_ellipsis(&repo.full_name, text_w),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  @{}", repo.owner.login),
                    Style::default().fg(theme::OWNER_FG),
                ),
            ]);
            buf.set_line(inner.x + 1, top, &name_line, text_w as u16);
            buf.set_line(
                inner.right() - 2,
                top,
                &Line::from(Span::styled(CHEVRON, Style::default().fg(theme::ACCENT))),
                1,
            );

            if top + 1 < inner.bottom() {
                let desc = Line::from(Span::styled(
                    truncate_with_ellipsis(repo.description(), text_w),
                    Style::default().fg(theme::DIM_TEXT),
                ));
                buf.set_line(inner.x + 1, top + 1, &desc, text_w as u16);
            }
        }
    }
}

/// First visible entry so that `selected` fits in `height` rows.
pub fn scroll_for(selected: usize, scroll: usize, height: usize) -> usize {
    let visible = (height / ENTRY_HEIGHT).max(1);
    if selected < scroll {
        selected
    } else if selected >= scroll + visible {
        selected + 1 - visible
    } else {
        scroll
    }
}
