use crate::dashboard::Dashboard;
use crate::event::AppEvent;
use crate::github::types::{RepoName, Repository, RepositoryDetails};
use crate::ui::{
    detail_panel::DetailPanel,
    header_bar::HeaderBar,
    help_panel::HelpPanel,
    input::{self, Action, KeyContext},
    repository_list::{self, RepositoryList},
    search_form::SearchForm,
    status_bar::StatusBar,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsState {
    Loading,
    Loaded(RepositoryDetails),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub repository: Repository,
    pub state: DetailsState,
}

/// Network work the event loop has to start on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(RepoName),
    LoadDetails(String),
}

pub struct App {
    pub dashboard: Dashboard,
    pub storage_label: Option<String>,

    pub focus: Focus,
    pub list_selected: usize,
    pub list_scroll: usize,
    pub details: Option<DetailsView>,
    pub issue_scroll: usize,
    pub show_help: bool,

    pub pending_searches: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, storage_label: Option<String>) -> Self {
        Self {
            dashboard,
            storage_label,
            focus: Focus::Input,
            list_selected: 0,
            list_scroll: 0,
            details: None,
            issue_scroll: 0,
            show_help: false,
            pending_searches: 0,
            should_quit: false,
        }
    }

    fn key_context(&self) -> KeyContext {
        if self.details.is_some() {
            KeyContext::Details
        } else if self.focus == Focus::Input {
            KeyContext::Editing
        } else {
            KeyContext::Browsing
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::Key(key) => {
                let action = input::map_key(key, self.key_context());
                self.handle_action(action)
            }
            AppEvent::Resize => None,
            AppEvent::SearchFinished(result) => {
                self.pending_searches = self.pending_searches.saturating_sub(1);
                self.dashboard.finish_search(result);
                None
            }
            AppEvent::DetailsFinished { full_name, result } => {
                if let Some(view) = self.details.as_mut() {
                    if view.repository.full_name == full_name && view.state == DetailsState::Loading {
                        view.state = match result {
                            Ok(details) => DetailsState::Loaded(details),
                            Err(e) => {
                                log::debug!("details for {full_name} failed: {e}");
                                DetailsState::Failed
                            }
                        };
                    }
                }
                None
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Option<Command> {
        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::InputChar(_) | Action::None => {}
                _ => self.show_help = false,
            }
            return None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::InputChar(c) => self.dashboard.input_push(c),
            Action::InputBackspace => self.dashboard.input_backspace(),
            Action::Submit => {
                let name = self.dashboard.begin_search()?;
                self.pending_searches += 1;
                return Some(Command::Search(name));
            }
            Action::FocusInput => self.focus = Focus::Input,
            Action::FocusList => self.focus = Focus::List,
            Action::ScrollDown => {
                if self.details.is_some() {
                    self.issue_scroll += 1;
                } else if self.list_selected + 1 < self.dashboard.repositories().len() {
                    self.list_selected += 1;
                }
            }
            Action::ScrollUp => {
                if self.details.is_some() {
                    self.issue_scroll = self.issue_scroll.saturating_sub(1);
                } else {
                    self.list_selected = self.list_selected.saturating_sub(1);
                }
            }
            Action::Select => return self.open_details(),
            Action::Back => {
                if self.details.take().is_none() {
                    self.focus = Focus::Input;
                }
            }
            Action::Help => self.show_help = true,
            Action::None => {}
        }
        None
    }

    fn open_details(&mut self) -> Option<Command> {
        let repository = self.dashboard.repositories().get(self.list_selected)?.clone();
        let full_name = repository.full_name.clone();
        self.details = Some(DetailsView {
            repository,
            state: DetailsState::Loading,
        });
        self.issue_scroll = 0;
        Some(Command::LoadDetails(full_name))
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(size);

        let context = self.details.as_ref().map(|d| d.repository.full_name.as_str());
        frame.render_widget(HeaderBar { context }, chunks[0]);

        if let Some(view) = &self.details {
            if let DetailsState::Loaded(details) = &view.state {
                self.issue_scroll = self.issue_scroll.min(details.issues.len().saturating_sub(1));
            }
            let panel = DetailPanel {
                view,
                issue_scroll: self.issue_scroll,
            };
            frame.render_widget(panel, chunks[1]);
        } else {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(1)])
                .split(chunks[1]);

            let form = SearchForm {
                input: self.dashboard.input(),
                error: self.dashboard.input_error(),
                focused: self.focus == Focus::Input,
                searching: self.pending_searches > 0,
            };
            frame.render_widget(form, body[0]);

            let count = self.dashboard.repositories().len();
            self.list_selected = self.list_selected.min(count.saturating_sub(1));
            let list_height = body[1].height.saturating_sub(2) as usize;
            self.list_scroll =
                repository_list::scroll_for(self.list_selected, self.list_scroll, list_height);

            let list = RepositoryList {
                repositories: self.dashboard.repositories(),
                selected: self.list_selected,
                scroll: self.list_scroll,
                focused: self.focus == Focus::List,
            };
            frame.render_widget(list, body[1]);
        }

        let hints = match self.key_context() {
            KeyContext::Editing => "Enter pesquisar  Tab lista",
            KeyContext::Browsing => "Enter detalhes  Tab busca  q sair",
            KeyContext::Details => "Esc voltar  q sair",
        };
        let status = StatusBar {
            count: self.dashboard.repositories().len(),
            pending: self.pending_searches,
            storage: self.storage_label.as_deref(),
            hints,
        };
        frame.render_widget(status, chunks[2]);

        if self.show_help {
            frame.render_widget(HelpPanel, size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{EMPTY_INPUT_ERROR, LOOKUP_FAILED_ERROR};
    use crate::error::ExplorerError;
    use crate::github::types::{Owner, RepositoryStats};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(app.handle_event(key(KeyCode::Char(c))), None);
        }
    }

    fn repo(name: &str) -> Repository {
        Repository {
            full_name: name.to_string(),
            description: None,
            owner: Owner {
                login: name.split('/').next().unwrap_or_default().to_string(),
                avatar_url: "https://avatars.example/u/1".to_string(),
            },
        }
    }

    fn app() -> App {
        App::new(Dashboard::new(None), None)
    }

    #[test]
    fn empty_submit_issues_no_command() {
        let mut app = app();
        assert_eq!(app.handle_event(key(KeyCode::Enter)), None);
        assert_eq!(app.pending_searches, 0);
        assert_eq!(app.dashboard.input_error(), Some(EMPTY_INPUT_ERROR));
    }

    #[test]
    fn submit_then_success_appends() {
        let mut app = app();
        type_text(&mut app, "facebook/react");

        let cmd = app.handle_event(key(KeyCode::Enter));
        assert_eq!(
            cmd,
            Some(Command::Search("facebook/react".parse().unwrap()))
        );
        assert_eq!(app.pending_searches, 1);

        app.handle_event(AppEvent::SearchFinished(Ok(repo("facebook/react"))));
        assert_eq!(app.pending_searches, 0);
        assert_eq!(app.dashboard.repositories().len(), 1);
        assert_eq!(app.dashboard.input(), "");
        assert_eq!(app.dashboard.input_error(), None);
    }

    #[test]
    fn failed_search_sets_error() {
        let mut app = app();
        type_text(&mut app, "nobody/nothing");
        app.handle_event(key(KeyCode::Enter));
        app.handle_event(AppEvent::SearchFinished(Err(ExplorerError::GitHub(
            "404".to_string(),
        ))));
        assert!(app.dashboard.repositories().is_empty());
        assert_eq!(app.dashboard.input_error(), Some(LOOKUP_FAILED_ERROR));
    }

    #[test]
    fn overlapping_searches_are_all_tracked() {
        let mut app = app();
        type_text(&mut app, "a/b");
        assert!(app.handle_event(key(KeyCode::Enter)).is_some());
        assert!(app.handle_event(key(KeyCode::Enter)).is_some());
        assert_eq!(app.pending_searches, 2);

        app.handle_event(AppEvent::SearchFinished(Ok(repo("a/b"))));
        app.handle_event(AppEvent::SearchFinished(Ok(repo("a/b"))));
        assert_eq!(app.pending_searches, 0);
        assert_eq!(app.dashboard.repositories().len(), 2);
    }

    #[test]
    fn select_opens_details_and_back_closes() {
        let mut app = app();
        app.dashboard.finish_search(Ok(repo("facebook/react")));
        app.dashboard.finish_search(Ok(repo("rust-lang/rust")));

        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::List);
        app.handle_event(key(KeyCode::Char('j')));
        let cmd = app.handle_event(key(KeyCode::Enter));
        assert_eq!(cmd, Some(Command::LoadDetails("rust-lang/rust".to_string())));
        assert_eq!(
            app.details.as_ref().map(|d| &d.state),
            Some(&DetailsState::Loading)
        );

        app.handle_event(key(KeyCode::Esc));
        assert!(app.details.is_none());
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn select_on_empty_list_does_nothing() {
        let mut app = app();
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.handle_event(key(KeyCode::Enter)), None);
        assert!(app.details.is_none());
    }

    #[test]
    fn stale_details_are_ignored() {
        let mut app = app();
        app.dashboard.finish_search(Ok(repo("facebook/react")));
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(key(KeyCode::Enter));

        let details = RepositoryDetails {
            stats: RepositoryStats {
                stargazers_count: 1,
                forks_count: 2,
                open_issues_count: 0,
            },
            issues: Vec::new(),
        };
        app.handle_event(AppEvent::DetailsFinished {
            full_name: "someone/else".to_string(),
            result: Ok(details.clone()),
        });
        assert_eq!(
            app.details.as_ref().map(|d| &d.state),
            Some(&DetailsState::Loading)
        );

        app.handle_event(AppEvent::DetailsFinished {
            full_name: "facebook/react".to_string(),
            result: Ok(details.clone()),
        });
        assert_eq!(
            app.details.as_ref().map(|d| &d.state),
            Some(&DetailsState::Loaded(details))
        );
    }

    #[test]
    fn details_failure_is_shown() {
        let mut app = app();
        app.dashboard.finish_search(Ok(repo("facebook/react")));
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(key(KeyCode::Enter));
        app.handle_event(AppEvent::DetailsFinished {
            full_name: "facebook/react".to_string(),
            result: Err(ExplorerError::GitHub("boom".to_string())),
        });
        assert_eq!(
            app.details.as_ref().map(|d| &d.state),
            Some(&DetailsState::Failed)
        );
    }

    #[test]
    fn help_swallows_the_next_key() {
        let mut app = app();
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_event(key(KeyCode::Char('j')));
        assert!(!app.show_help);
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn quit_letter_is_typed_while_editing() {
        let mut app = app();
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.dashboard.input(), "q");
    }

    #[test]
    fn renders_dashboard() {
        let mut app = app();
        app.dashboard.finish_search(Ok(repo("facebook/react")));
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let text = crate::ui::buffer_text(terminal.backend().buffer());
        assert!(text.contains("Explore repositórios no Github"));
        assert!(text.contains("facebook/react"));
        assert!(text.contains("sem persistência"));
    }
}
