use crate::consts;
use crate::game::Game;
use crossterm::event::{poll, read};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

#[derive(Clone, Debug)]
pub(crate) struct App {
    state: AppState,
}

impl App {
    pub(crate) fn new(game: Game) -> App {
        App {
            state: AppState::Game(Box::new(game)),
        }
    }

    /// Run the frame loop until the user quits: wait up to one frame period
    /// for input, advance the game by the real time elapsed, and redraw.
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        let mut last_frame = Instant::now();
        while let AppState::Game(ref mut game) = self.state {
            terminal.draw(|frame| game.draw(frame))?;
            if poll(consts::FRAME_PERIOD)? {
                if let Some(state) = game.handle_event(read()?) {
                    self.state = state;
                    continue;
                }
            }
            let now = Instant::now();
            game.update(now.saturating_duration_since(last_frame));
            last_frame = now;
        }
        log::info!("Quitting");
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub(crate) enum AppState {
    Game(Box<Game>),
    Quit,
}
