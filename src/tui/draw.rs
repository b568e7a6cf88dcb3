use crate::epidemic::contact::{ContactGraph, NodeId};
use crate::epidemic::outbreak::{Health, Outbreak};
use crate::layout::circular::circular_layout;
use crate::tui::app::{App, Field, Status, StatusKind};
use crate::tui::outbreak_app::OutbreakApp;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Cell, Clear, Padding, Paragraph, Row, Table, Wrap};

const MAP_WIDTH: f64 = 600.0;
const MAP_HEIGHT: f64 = 400.0;
const NODE_RADIUS: f64 = 6.0;

pub fn draw_app(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_map(app), body[0]);
    frame.render_widget(build_flight_table(app), body[1]);
    frame.render_widget(build_form(app), chunks[2]);
    frame.render_widget(build_status(app.status()), chunks[3]);

    if app.show_listing() {
        let area = popup_area(frame.area(), 60, 70);
        frame.render_widget(Clear, area);
        frame.render_widget(build_listing(app), area);
    }
}

/// Each hint renders as a bold key followed by a dim label.
fn key_hints(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::raw(format!(" {} ", key)).style(Style::default().bold()),
                Span::raw(*label).style(Style::default().add_modifier(Modifier::DIM)),
            ]
        })
        .collect()
}

fn build_header(app: &'_ App) -> Block<'_> {
    let graph = app.session.graph();
    let mut spans = vec![
        Span::raw(" Flightgraph ").style(Style::default().bold().cyan()),
        Span::raw("—").style(Style::default().add_modifier(Modifier::DIM)),
        Span::raw(" Airports: ").style(Style::default().add_modifier(Modifier::DIM)),
        Span::raw(format!("{}", graph.airport_count())).style(Style::default().bold()),
        Span::raw(" Flights: ").style(Style::default().add_modifier(Modifier::DIM)),
        Span::raw(format!("{}", graph.flight_count())).style(Style::default().bold()),
        Span::raw(" "),
    ];
    spans.extend(key_hints(&[
        ("Enter", "add"),
        ("Ctrl-P", "path"),
        ("Ctrl-L", "list"),
        ("Tab", "next"),
        ("Esc", "quit"),
    ]));
    spans.push(Span::raw(" "));
    Block::new()
        .title(Line::from(spans))
        .title_alignment(Alignment::Center)
}

fn on_path(app: &App, source: &str, destination: &str) -> bool {
    app.last_path()
        .windows(2)
        .any(|w| w[0].name() == source && w[1].name() == destination)
}

fn build_map(app: &'_ App) -> Canvas<'_, impl Fn(&mut Context<'_>) + '_> {
    let graph = app.session.graph();
    let positions = circular_layout(graph.airport_count(), MAP_WIDTH, MAP_HEIGHT);

    Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![
                    Span::from(" Network ").style(Style::default().bold()),
                ])),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, MAP_WIDTH])
        .y_bounds([0.0, MAP_HEIGHT])
        .paint(move |ctx| {
            graph.flights().iter().for_each(|f| {
                let from = positions[f.source().index()];
                let to = positions[f.destination().index()];
                let highlighted = on_path(
                    app,
                    graph.airport(f.source()).name(),
                    graph.airport(f.destination()).name(),
                );
                ctx.draw(&CanvasLine::new(
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    if highlighted { Color::Yellow } else { Color::Gray },
                ));
            });
            ctx.layer();
            graph.airports().iter().enumerate().for_each(|(i, airport)| {
                let p = positions[i];
                ctx.draw(&Circle {
                    x: p.x,
                    y: p.y,
                    radius: 10.0,
                    color: Color::Red,
                });
                ctx.print(p.x, p.y + 20.0, airport.name().to_string());
            });
        })
}

fn build_flight_table(app: &'_ App) -> Table<'_> {
    let graph = app.session.graph();

    Table::new(
        graph.flights().iter().map(|f| {
            let source = graph.airport(f.source()).name();
            let destination = graph.airport(f.destination()).name();
            let style = if on_path(app, source, destination) {
                Style::default().yellow().bold()
            } else if f.duration() < 0.0 {
                Style::default().light_red()
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(f.id().index().to_string()),
                Cell::from(source.to_owned()),
                Cell::from(destination.to_owned()),
                Cell::from(format!("{:>8}", f.duration())),
            ])
            .style(style)
        }),
        [
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Min(8),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new([
            Cell::from("ID"),
            Cell::from("Source"),
            Cell::from("Destination"),
            Cell::from("Duration"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Flights ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_form(app: &'_ App) -> Paragraph<'_> {
    let lines = Field::ALL
        .iter()
        .map(|field| {
            let focused = *field == app.focus();
            let label_style = if focused {
                Style::default().bold().yellow()
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            Line::from(vec![
                Span::raw(format!("{:<22}", field.label())).style(label_style),
                Span::raw(app.input(*field).to_owned()),
                Span::raw(if focused { "▏" } else { "" }),
            ])
        })
        .collect::<Vec<Line>>();

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Flight ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_status(status: Option<&Status>) -> Paragraph<'_> {
    match status {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Info => Style::default().green(),
                StatusKind::Warning => Style::default().yellow(),
                StatusKind::Error => Style::default().red().bold(),
            };
            Paragraph::new(Span::raw(status.text.as_str()).style(style))
        }
        None => Paragraph::new(""),
    }
}

fn build_listing(app: &'_ App) -> Paragraph<'_> {
    Paragraph::new(app.session.flight_listing().unwrap_or_default())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![
                    Span::from(" Flight Details ").style(Style::default().bold()),
                ]))
                .padding(Padding::horizontal(1)),
        )
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn draw_outbreak(frame: &mut Frame, app: &OutbreakApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    frame.render_widget(build_outbreak_header(app), chunks[0]);
    frame.render_widget(build_contact_map(app), body[0]);
    frame.render_widget(build_round_table(app), body[1]);
    frame.render_widget(build_status(app.status()), chunks[2]);
}

fn build_outbreak_header(app: &'_ OutbreakApp) -> Block<'_> {
    let settings = app.settings();
    let mut spans = vec![
        Span::raw(" Outbreak ").style(Style::default().bold().cyan()),
        Span::raw("—").style(Style::default().add_modifier(Modifier::DIM)),
        Span::raw(" Nodes: ").style(Style::default().add_modifier(Modifier::DIM)),
        Span::raw(format!("{}", settings.nodes)).style(Style::default().bold()),
        Span::raw(" Degree: ").style(Style::default().add_modifier(Modifier::DIM)),
        Span::raw(format!("{}", settings.degree)).style(Style::default().bold()),
        Span::raw(" Transmission: ").style(Style::default().add_modifier(Modifier::DIM)),
        Span::raw(format!("{}", settings.transmission)).style(Style::default().bold()),
        Span::raw(" "),
    ];
    spans.extend(key_hints(&[
        ("g", "graph"),
        ("t", "tree"),
        ("i", "infect"),
        ("s", "simulate"),
        ("n", "one round"),
        ("q", "quit"),
    ]));
    spans.push(Span::raw(" "));
    Block::new()
        .title(Line::from(spans))
        .title_alignment(Alignment::Center)
}

fn health_color(outbreak: Option<&Outbreak>, id: NodeId) -> Color {
    match outbreak.map(|o| o.state(id)) {
        Some(Health::Infected) => Color::Red,
        _ => Color::Green,
    }
}

/// Shows the spanning tree once it exists, the full contact graph before that.
fn build_contact_map(app: &'_ OutbreakApp) -> Canvas<'_, impl Fn(&mut Context<'_>) + '_> {
    let graph = app.outbreak().map(Outbreak::graph).or(app.graph());
    let positions = circular_layout(
        graph.map_or(0, ContactGraph::node_count),
        MAP_WIDTH,
        MAP_HEIGHT,
    );
    let title = if app.outbreak().is_some() {
        " Spanning Tree "
    } else {
        " Contact Graph "
    };

    Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![
                    Span::from(title).style(Style::default().bold()),
                ])),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, MAP_WIDTH])
        .y_bounds([0.0, MAP_HEIGHT])
        .paint(move |ctx| {
            let Some(graph) = graph else {
                ctx.print(MAP_WIDTH / 2.0 - 60.0, MAP_HEIGHT / 2.0, "No graph available.");
                return;
            };
            graph.edges().for_each(|(a, b)| {
                let from = positions[a.index()];
                let to = positions[b.index()];
                ctx.draw(&CanvasLine::new(from.x, from.y, to.x, to.y, Color::Gray));
            });
            ctx.layer();
            positions.iter().enumerate().for_each(|(i, p)| {
                ctx.draw(&Circle {
                    x: p.x,
                    y: p.y,
                    radius: NODE_RADIUS,
                    color: health_color(app.outbreak(), NodeId(i)),
                });
                ctx.print(p.x, p.y + 2.0 * NODE_RADIUS, i.to_string());
            });
        })
}

fn build_round_table(app: &'_ OutbreakApp) -> Table<'_> {
    let (healthy, infected) = app
        .outbreak()
        .map_or((0, 0), |o| (o.healthy_count(), o.infected_count()));

    Table::new(
        app.counts().iter().enumerate().map(|(round, count)| {
            Row::new(vec![
                Cell::from(format!("{:>5}", round + 1)),
                Cell::from(format!("{:>8}", count)),
            ])
        }),
        [Constraint::Length(6), Constraint::Min(9)],
    )
    .header(
        Row::new([Cell::from("Round"), Cell::from("Infected")])
            .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Healthy: ").style(Style::default().add_modifier(Modifier::DIM)),
                Span::from(healthy.to_string()).style(Style::default().green().bold()),
                Span::from(" Infected: ").style(Style::default().add_modifier(Modifier::DIM)),
                Span::from(infected.to_string()).style(Style::default().red().bold()),
                Span::raw(" "),
            ]))
            .padding(Padding::horizontal(1)),
    )
}
