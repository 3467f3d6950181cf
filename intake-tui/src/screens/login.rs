//! Login screen

use crossterm::event::{KeyCode, KeyEvent};
use intake_lib::IntakeClient;
use intake_lib::identity::Identity;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;

use crate::app::NetSender;
use crate::app::spawn_create_user;
use crate::widgets::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    RollNumber,
    Name,
}

/// Collects a roll number and name, registers the user, and hands the
/// identity to the form screen on success.
pub struct LoginScreen {
    roll_number: String,
    name: String,
    focus: Focus,
    roll_error: Option<&'static str>,
    name_error: Option<&'static str>,
    api_error: Option<&'static str>,
    submitting: bool,
    spinner: Spinner,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            roll_number: String::new(),
            name: String::new(),
            focus: Focus::RollNumber,
            roll_error: None,
            name_error: None,
            api_error: None,
            submitting: false,
            spinner: Spinner::new(),
        }
    }

    /// Marks the in-flight registration as failed and re-enables input.
    pub fn registration_failed(&mut self) {
        self.submitting = false;
        self.api_error = Some("An unexpected error occurred. Please try again.");
    }

    pub fn on_key(&mut self, key: KeyEvent, client: &IntakeClient, tx: &NetSender) {
        // Input is disabled while the registration call is in flight.
        if self.submitting {
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                self.focus = match self.focus {
                    Focus::RollNumber => Focus::Name,
                    Focus::Name => Focus::RollNumber,
                };
            }
            KeyCode::Char(c) => {
                self.api_error = None;
                match self.focus {
                    Focus::RollNumber => {
                        self.roll_number.push(c);
                        self.roll_error = None;
                    }
                    Focus::Name => {
                        self.name.push(c);
                        self.name_error = None;
                    }
                }
            }
            KeyCode::Backspace => match self.focus {
                Focus::RollNumber => {
                    self.roll_number.pop();
                }
                Focus::Name => {
                    self.name.pop();
                }
            },
            KeyCode::Enter => self.submit(client, tx),
            _ => {}
        }
    }

    fn submit(&mut self, client: &IntakeClient, tx: &NetSender) {
        let roll_number = self.roll_number.trim();
        let name = self.name.trim();

        self.roll_error = roll_number
            .is_empty()
            .then_some("Roll Number is required");
        self.name_error = name.is_empty().then_some("Name is required");
        if self.roll_error.is_some() || self.name_error.is_some() {
            return;
        }

        self.submitting = true;
        self.api_error = None;
        spawn_create_user(client, tx, Identity::new(roll_number, name));
    }

    pub fn render(&self, frame: &mut Frame, tick: u64) {
        let area = centered_rect(52, 14, frame.area());
        let block = Block::bordered().title(" Student Login ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(2), // banner
            Constraint::Length(3), // roll number
            Constraint::Length(3), // name
            Constraint::Length(1), // spacer
            Constraint::Length(1), // button
            Constraint::Min(0),
        ])
        .split(inner);

        if let Some(banner) = self.api_error {
            frame.render_widget(
                Paragraph::new(banner).style(Style::default().fg(Color::Red)),
                rows[0],
            );
        }

        self.render_input(
            frame,
            rows[1],
            "Roll Number",
            &self.roll_number,
            "Enter your roll number",
            self.focus == Focus::RollNumber,
            self.roll_error,
        );
        self.render_input(
            frame,
            rows[2],
            "Name",
            &self.name,
            "Enter your name",
            self.focus == Focus::Name,
            self.name_error,
        );

        let button = if self.submitting {
            Line::from(vec![
                Span::raw(self.spinner.frame(tick)),
                Span::raw(" Logging in…"),
            ])
        } else {
            Line::from(Span::styled(
                "[ Login ]",
                Style::default().add_modifier(Modifier::BOLD),
            ))
        };
        frame.render_widget(
            Paragraph::new(button).alignment(Alignment::Center),
            rows[4],
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn render_input(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        placeholder: &str,
        focused: bool,
        error: Option<&'static str>,
    ) {
        let marker = if focused { "› " } else { "  " };
        let mut lines = vec![Line::from(Span::styled(
            label.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        let value_line = if value.is_empty() {
            Line::from(vec![
                Span::raw(marker),
                Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
            ])
        } else {
            let mut spans = vec![Span::raw(marker), Span::raw(value.to_string())];
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
            }
            Line::from(spans)
        };
        lines.push(value_line);

        if let Some(error) = error {
            lines.push(Line::from(Span::styled(
                error,
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(Paragraph::new(Text::from(lines)), area);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Centers a fixed-size rect inside `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}
