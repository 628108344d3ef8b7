use crate::app::{DetailsState, DetailsView};
use crate::ui::{theme, truncate_with_ellipsis};
use unicode_width::UnicodeWidthStr;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

pub const DETAILS_FAILED: &str = "Erro ao carregar detalhes do repositório";

pub struct DetailPanel<'a> {
    pub view: &'a DetailsView,
    /// First visible issue.
    pub issue_scroll: usize,
}

impl<'a> Widget for DetailPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let repo = &self.view.repository;
        let block = Block::default()
            .title(format!(" {} ", repo.full_name))
            .title_style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::FOCUS_BORDER));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 10 {
            return;
        }

        let label_style = Style::default().fg(theme::ACCENT);
        let x = inner.x + 1;
        let w = inner.width.saturating_sub(2);
        let mut lines: Vec<Line> = vec![
            Line::from(vec![
                Span::styled("Dono    ", label_style),
                Span::raw(repo.owner.login.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Avatar  ", label_style),
                Span::styled(repo.owner.avatar_url.as_str(), Style::default().fg(theme::DIM_TEXT)),
            ]),
            Line::from(vec![
                Span::styled("Rota    ", label_style),
                Span::raw(repo.route()),
            ]),
            Line::default(),
            Line::from(Span::raw(repo.description())),
            Line::default(),
        ];

        match &self.view.state {
            DetailsState::Loading => {
                lines.push(Line::from(Span::styled(
                    "Carregando\u{2026}",
                    Style::default().fg(theme::DIM_TEXT),
                )));
            }
            DetailsState::Failed => {
                lines.push(Line::from(Span::styled(
                    DETAILS_FAILED,
                    Style::default().fg(theme::ERROR_FG),
                )));
            }
            DetailsState::Loaded(details) => {
                let stat = Style::default().fg(theme::STAT_FG).add_modifier(Modifier::BOLD);
                lines.push(Line::from(vec![
                    Span::styled(details.stats.stargazers_count.to_string(), stat),
                    Span::raw(" estrelas   "),
                    Span::styled(details.stats.forks_count.to_string(), stat),
                    Span::raw(" forks   "),
                    Span::styled(details.stats.open_issues_count.to_string(), stat),
                    Span::raw(" issues abertas"),
                ]));
                lines.push(Line::default());
                if details.issues.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "Nenhuma issue aberta",
                        Style::default().fg(theme::DIM_TEXT),
                    )));
                }
                for issue in details.issues.iter().skip(self.issue_scroll) {
                    let title_w = issue_title_width(w as usize, &issue.user.login);
                    lines.push(Line::from(vec![
                        Span::styled("\u{203a} ", label_style),
                        Span::raw(truncate_with_ellipsis(&issue.title, title_w)),
                        Span::styled(
                            format!("  @{}", issue.user.login),
                            Style::default().fg(theme::OWNER_FG),
                        ),
                    ]));
                    lines.push(Line::from(Span::styled(
                        format!("  {}", issue.html_url),
                        Style::default().fg(theme::DIM_TEXT),
                    )));
                }
            }
        }

        for (i, line) in lines.iter().take(inner.height as usize).enumerate() {
            buf.set_line(x, inner.y + i as u16, line, w);
        }
    }
}

/// Columns left for an issue title next to its `› ` marker and `  @login`.
fn issue_title_width(line_w: usize, login: &str) -> usize {
    line_w.saturating_sub(UnicodeWidthStr::width(login) + 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::{
        Issue, IssueAuthor, Owner, Repository, RepositoryDetails, RepositoryStats,
    };
    use crate::ui::buffer_text;

    fn view(state: DetailsState) -> DetailsView {
        DetailsView {
            repository: Repository {
                full_name: "facebook/react".to_string(),
                description: Some("A library for UIs".to_string()),
                owner: Owner {
                    login: "facebook".to_string(),
                    avatar_url: "https://avatars.example/u/69631".to_string(),
                },
            },
            state,
        }
    }

    fn render(view: &DetailsView) -> String {
        let area = Rect::new(0, 0, 70, 16);
        let mut buf = Buf::empty(area);
        DetailPanel {
            view,
            issue_scroll: 0,
        }
        .render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn loading_shows_record_and_route() {
        let text = render(&view(DetailsState::Loading));
        assert!(text.contains("/repositories/facebook/react"));
        assert!(text.contains("A library for UIs"));
        assert!(text.contains("Carregando"));
    }

    #[test]
    fn loaded_shows_stats_and_issues() {
        let text = render(&view(DetailsState::Loaded(RepositoryDetails {
            stats: RepositoryStats {
                stargazers_count: 42,
                forks_count: 7,
                open_issues_count: 1,
            },
            issues: vec![Issue {
                title: "Hooks misfire".to_string(),
                html_url: "https://github.com/facebook/react/issues/1".to_string(),
                user: IssueAuthor {
                    login: "octocat".to_string(),
                },
                pull_request: None,
            }],
        })));
        assert!(text.contains("42 estrelas"));
        assert!(text.contains("Dono"));
        assert!(text.contains("Hooks misfire"));
        assert!(text.contains("@octocat"));
        assert!(text.contains("issues/1"));
    }

    #[test]
    fn issue_title_width_counts_columns() {
        assert_eq!(issue_title_width(40, "octocat"), 28);
        // three wide characters take six columns but nine bytes
        assert_eq!(issue_title_width(40, "\u{65e5}\u{672c}\u{8a9e}"), 29);
        assert_eq!(issue_title_width(4, "octocat"), 0);
    }

    #[test]
    fn failure_message() {
        assert!(render(&view(DetailsState::Failed)).contains(DETAILS_FAILED));
    }
}
