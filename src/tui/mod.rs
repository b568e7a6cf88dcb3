pub mod app;
pub mod draw;
pub mod outbreak_app;

use crate::tui::app::App;
use crate::tui::draw::{draw_app, draw_outbreak};
use crate::tui::outbreak_app::OutbreakApp;
use crossterm::event::{Event, KeyEvent};
use ratatui::{DefaultTerminal, Frame};
use std::io;
use std::time::Duration;

/// A full-terminal view driven by key presses.
pub trait Screen {
    fn is_running(&self) -> bool;
    fn handle_key(&mut self, key: KeyEvent);
    fn draw(&self, frame: &mut Frame);
}

impl Screen for App {
    fn is_running(&self) -> bool {
        self.running
    }

    fn handle_key(&mut self, key: KeyEvent) {
        App::handle_key(self, key)
    }

    fn draw(&self, frame: &mut Frame) {
        draw_app(frame, self)
    }
}

impl Screen for OutbreakApp {
    fn is_running(&self) -> bool {
        self.running
    }

    fn handle_key(&mut self, key: KeyEvent) {
        OutbreakApp::handle_key(self, key)
    }

    fn draw(&self, frame: &mut Frame) {
        draw_outbreak(frame, self)
    }
}

/// Runs `screen` until the user quits. The terminal is restored even when
/// drawing fails.
pub fn run<S: Screen>(mut screen: S) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut screen);
    ratatui::restore();
    result
}

fn event_loop<S: Screen>(terminal: &mut DefaultTerminal, screen: &mut S) -> io::Result<()> {
    while screen.is_running() {
        terminal.draw(|frame| screen.draw(frame))?;

        if crossterm::event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = crossterm::event::read()? {
                screen.handle_key(key);
            }
        }
    }
    Ok(())
}
