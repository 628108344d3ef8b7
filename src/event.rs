use crate::error::Result;
use crate::github::types::{Repository, RepositoryDetails};
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    SearchFinished(Result<Repository>),
    DetailsFinished {
        full_name: String,
        result: Result<RepositoryDetails>,
    },
}
