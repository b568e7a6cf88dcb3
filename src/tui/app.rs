use crate::graph::airport::Airport;
use crate::session::session::{FlightSession, PathOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Source,
    Destination,
    Duration,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Source, Field::Destination, Field::Duration];

    fn index(self) -> usize {
        match self {
            Field::Source => 0,
            Field::Destination => 1,
            Field::Duration => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Source => "Source Airport:",
            Field::Destination => "Destination Airport:",
            Field::Duration => "Flight Duration:",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

pub struct App {
    pub session: FlightSession,
    pub running: bool,
    focus: Field,
    inputs: [String; 3],
    status: Option<Status>,
    show_listing: bool,
    last_path: Vec<Airport>,
}

impl App {
    pub fn new(session: FlightSession) -> Self {
        Self {
            session,
            running: true,
            focus: Field::Source,
            inputs: Default::default(),
            status: None,
            show_listing: false,
            last_path: Vec::new(),
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn input(&self, field: Field) -> &str {
        &self.inputs[field.index()]
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn show_listing(&self) -> bool {
        self.show_listing
    }

    pub fn last_path(&self) -> &[Airport] {
        &self.last_path
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.show_listing {
            self.show_listing = false;
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,
            KeyCode::Char('p') if ctrl => self.calculate_shortest_path(),
            KeyCode::Char('l') if ctrl => self.display_flights(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => self.add_flight(),
            KeyCode::Backspace => {
                self.inputs[self.focus.index()].pop();
            }
            KeyCode::Char(c) if !ctrl => self.inputs[self.focus.index()].push(c),
            _ => {}
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    /// Fields are cleared whatever the outcome.
    fn add_flight(&mut self) {
        let [source, destination, duration] = std::mem::take(&mut self.inputs);
        if source.trim().is_empty() || destination.trim().is_empty() || duration.trim().is_empty()
        {
            self.set_status(StatusKind::Warning, "Please enter all flight details.");
        } else {
            match self
                .session
                .add_flight_from_input(&source, &destination, &duration)
            {
                Ok(_) => {
                    self.last_path.clear();
                    self.set_status(StatusKind::Info, "Flight details added successfully.");
                }
                Err(e) => self.set_status(StatusKind::Error, e.to_string()),
            }
        }
        self.focus = Field::Source;
    }

    fn display_flights(&mut self) {
        if self.session.flight_listing().is_some() {
            self.show_listing = true;
        } else {
            self.set_status(StatusKind::Info, "No flight details to display.");
        }
    }

    fn calculate_shortest_path(&mut self) {
        let source = self.input(Field::Source).trim().to_string();
        let destination = self.input(Field::Destination).trim().to_string();
        if source.is_empty() || destination.is_empty() {
            self.set_status(
                StatusKind::Warning,
                "Please enter source and destination airports.",
            );
            return;
        }

        let outcome = self.session.shortest_path(&source, &destination);
        let kind = match &outcome {
            PathOutcome::Found(_) => StatusKind::Info,
            PathOutcome::NoPath => StatusKind::Warning,
            PathOutcome::NegativeCycle(_) => StatusKind::Error,
        };
        self.set_status(kind, outcome.to_string());
        self.last_path = outcome.path().map(<[Airport]>::to_vec).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        text.chars().for_each(|c| press(app, KeyCode::Char(c)));
    }

    fn enter_flight(app: &mut App, source: &str, destination: &str, duration: &str) {
        type_text(app, source);
        press(app, KeyCode::Tab);
        type_text(app, destination);
        press(app, KeyCode::Tab);
        type_text(app, duration);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_enter_adds_flight_and_clears_form() {
        let mut app = App::new(FlightSession::new());
        enter_flight(&mut app, "WAW", "JFK", "9");

        assert_eq!(1, app.session.graph().flight_count());
        assert_eq!("", app.input(Field::Source));
        assert_eq!("", app.input(Field::Duration));
        assert_eq!(Field::Source, app.focus());
        assert_eq!(StatusKind::Info, app.status().unwrap().kind);
    }

    #[test]
    fn test_incomplete_form_warns() {
        let mut app = App::new(FlightSession::new());
        type_text(&mut app, "WAW");
        press(&mut app, KeyCode::Enter);

        assert!(app.session.graph().is_empty());
        let status = app.status().unwrap();
        assert_eq!(StatusKind::Warning, status.kind);
        assert_eq!("Please enter all flight details.", status.text);
        assert_eq!("", app.input(Field::Source));
    }

    #[test]
    fn test_bad_duration_is_an_error() {
        let mut app = App::new(FlightSession::new());
        enter_flight(&mut app, "WAW", "JFK", "soon");

        assert!(app.session.graph().is_empty());
        assert_eq!(StatusKind::Error, app.status().unwrap().kind);
    }

    #[test]
    fn test_shortest_path_is_reported_and_kept() {
        let mut app = App::new(FlightSession::new());
        enter_flight(&mut app, "A", "B", "5");
        enter_flight(&mut app, "B", "C", "5");
        enter_flight(&mut app, "A", "C", "20");

        type_text(&mut app, "A");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "C");
        ctrl(&mut app, 'p');

        assert_eq!("Shortest Path: A -> B -> C", app.status().unwrap().text);
        assert_eq!(3, app.last_path().len());
        assert_eq!("A", app.input(Field::Source));
    }

    #[test]
    fn test_missing_endpoints_warn_before_searching() {
        let mut app = App::new(FlightSession::new());
        ctrl(&mut app, 'p');

        assert_eq!(
            "Please enter source and destination airports.",
            app.status().unwrap().text
        );
    }

    #[test]
    fn test_listing_toggles_and_any_key_closes_it() {
        let mut app = App::new(FlightSession::new());
        ctrl(&mut app, 'l');
        assert!(!app.show_listing());
        assert_eq!("No flight details to display.", app.status().unwrap().text);

        enter_flight(&mut app, "A", "B", "1");
        ctrl(&mut app, 'l');
        assert!(app.show_listing());

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_listing());
        assert!(app.running);
    }

    #[test]
    fn test_focus_cycles_and_escape_quits() {
        let mut app = App::new(FlightSession::new());
        press(&mut app, KeyCode::BackTab);
        assert_eq!(Field::Duration, app.focus());
        press(&mut app, KeyCode::Tab);
        assert_eq!(Field::Source, app.focus());

        press(&mut app, KeyCode::Esc);
        assert!(!app.running);
    }
}
