use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::super::panel::{Panel, PanelId};
use super::super::views::{ViewId, ViewState};
use super::App;

pub(super) fn draw(frame: &mut Frame, app: &mut App) {
    match app.view.id() {
        ViewId::NoConfig => {
            draw_no_config(frame, app);
            return;
        }
        ViewId::Onboarding => {
            if let ViewState::Onboarding(view) = &app.view {
                view.render(frame);
            }
            return;
        }
        ViewId::Operation => {
            draw_operation(frame, app);
            return;
        }
        _ => {}
    }

    draw_dashboard(frame, app);

    // Modal views float over the dashboard.
    match &app.view {
        ViewState::Menu(view) => view.render(frame),
        ViewState::Confirm(view) => view.render(frame),
        ViewState::ConfigList(view) => view.render(frame),
        ViewState::External(view) => view.render(frame),
        ViewState::Machine(view) => view.render(frame),
        ViewState::Conflict(view) => view.render(frame),
        _ => {}
    }
}

fn draw_dashboard(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Length(9),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let thirds = [
        Constraint::Percentage(33),
        Constraint::Percentage(34),
        Constraint::Percentage(33),
    ];
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(thirds)
        .split(rows[0]);
    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(thirds)
        .split(rows[1]);

    let placements: [(PanelId, Rect); 7] = [
        (PanelId::Summary, top[0]),
        (PanelId::Health, top[1]),
        (PanelId::Overrides, top[2]),
        (PanelId::Configs, mid[0]),
        (PanelId::External, mid[1]),
        (PanelId::Details, mid[2]),
        (PanelId::Output, rows[2]),
    ];
    for (id, area) in placements {
        app.panels.get_mut(id).render(frame, area);
    }

    frame.render_widget(footer_line(app), rows[3]);
}

fn footer_line(app: &App) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        format!(" {:?} ", app.focus.current()),
        Style::default().fg(Color::Black).bg(Color::Yellow),
    )];
    let hints = if app.op_active {
        "operation running..."
    } else {
        "tab focus  enter act  s sync  S sync+deps  d doctor  u update  i install  m menu  r refresh  q quit"
    };
    spans.push(Span::styled(
        format!(" {hints}"),
        Style::default().fg(Color::Gray),
    ));
    Paragraph::new(Line::from(spans))
}

/// Full-screen operation log: the Output panel stretched over the whole
/// terminal while a worker runs.
fn draw_operation(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(frame.area());

    app.panels.get_mut(PanelId::Output).render(frame, rows[0]);

    let hint = if app.op_active {
        "working... (scroll with up/down)"
    } else {
        "finished - esc to go back"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::Gray))),
        rows[1],
    );
}

fn draw_no_config(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(frame.area());

    let mut lines = vec![
        Line::from(Span::styled(
            "plait",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(err) = &app.repo_err {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "i: set up a new repository   q: quit",
        Style::default().fg(Color::Gray),
    )));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);
}
