//! Ratatui-based car price form.
//!
//! The left panel holds the form fields (every choice comes from the catalog);
//! the right panel shows the message for the last submission.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};

use crate::app::pipeline::Session;
use crate::domain::Outcome;
use crate::error::AppError;
use crate::models::{LinearModel, PriceEstimator};

mod form;

use form::{Field, FormState};

/// Start the form over an already-loaded session.
pub fn run(session: &Session<LinearModel>) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let subtitle = model_subtitle(session);
    let mut app = App::new(session, subtitle);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App<'a, E> {
    session: &'a Session<E>,
    form: FormState,
    model_line: String,
    kms_input: String,
    editing_kms: bool,
    outcome: Option<Outcome>,
    status: String,
}

impl<'a, E: PriceEstimator> App<'a, E> {
    fn new(session: &'a Session<E>, model_line: String) -> Self {
        Self {
            form: FormState::new(&session.catalog),
            session,
            model_line,
            kms_input: String::new(),
            editing_kms: false,
            outcome: None,
            status: "Ready.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_kms {
            self.handle_kms_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.form.select_prev(),
            KeyCode::Down | KeyCode::Tab => self.form.select_next(),
            KeyCode::Left => self.form.adjust(&self.session.catalog, -1),
            KeyCode::Right => self.form.adjust(&self.session.catalog, 1),
            KeyCode::Enter => match self.form.selected {
                Field::Kms => {
                    self.editing_kms = true;
                    self.kms_input = self.form.kms.to_string();
                    self.status = "Editing kilometres. Enter to apply, Esc to cancel.".to_string();
                }
                Field::Submit => self.submit(),
                _ => self.form.select_next(),
            },
            KeyCode::Char('p') => self.submit(),
            _ => {}
        }

        false
    }

    fn handle_kms_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_kms = false;
                self.status = "Kilometres edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_kms = false;
                self.apply_kms_input();
            }
            KeyCode::Backspace => {
                self.kms_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || (c == '-' && self.kms_input.is_empty()) {
                    self.kms_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_kms_input(&mut self) {
        let trimmed = self.kms_input.trim();
        match trimmed.parse::<i64>() {
            Ok(kms) => {
                self.form.kms = kms;
                self.status = format!("kilometres: {kms}");
            }
            Err(e) => {
                self.status = format!("Invalid kilometres '{trimmed}': {e}");
            }
        }
    }

    fn submit(&mut self) {
        let Some(input) = self.form.input() else {
            self.status = "No car choices available.".to_string();
            return;
        };
        let outcome = self.session.submit(&input);
        self.status = match &outcome {
            Outcome::Estimate { .. } => "Prediction complete.".to_string(),
            Outcome::Warning(_) => "Input rejected.".to_string(),
            Outcome::Error(_) => "Prediction failed.".to_string(),
        };
        self.outcome = Some(outcome);
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Car Price Predictor",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from("Enter your car details below to estimate its current market value."),
            Line::from(Span::styled(&self.model_line, Style::default().fg(Color::Gray))),
        ];

        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = Field::ALL
            .iter()
            .map(|&field| match field {
                Field::Submit => ListItem::new(format!("[ {} ]", field.label()))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Field::Kms if self.editing_kms => {
                    ListItem::new(format!("{:<18} {}_", field.label(), self.kms_input))
                }
                _ => ListItem::new(format!("{:<18} ‹ {} ›", field.label(), self.form.value(field))),
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Car details").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.form.selected.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Estimate").borders(Borders::ALL);

        let (text, style) = match &self.outcome {
            None => (
                "Press Enter on [ Predict Price ] (or p) to estimate.".to_string(),
                Style::default().fg(Color::Gray),
            ),
            Some(outcome) => {
                let color = match outcome {
                    Outcome::Estimate { .. } => Color::Blue,
                    Outcome::Warning(_) => Color::Yellow,
                    Outcome::Error(_) => Color::Red,
                };
                (
                    crate::report::render_outcome(outcome),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            }
        };

        let p = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ change  Enter edit kms / predict  p predict  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn model_subtitle(session: &Session<LinearModel>) -> String {
    let info = session.estimator.info();
    let trained = info
        .trained_at
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "model: {} ~ linear ({} features) | trained: {trained} | catalog: {} companies",
        info.target,
        info.n_features,
        session.catalog.companies().len(),
    )
}
