//! Wizard screen: loading, filling, and submitting the fetched form

use crossterm::event::{KeyCode, KeyEvent};
use intake_lib::model::FieldKind;
use intake_lib::model::FormField;
use intake_lib::model::FormSchema;
use intake_lib::model::Submission;
use intake_lib::model::Value;
use intake_lib::session::FormSession;
use intake_lib::session::Step;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Block;
use ratatui::widgets::Gauge;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;

use crate::widgets::Spinner;

/// What the app should do after a key was handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormOutcome {
    /// Return to the login screen.
    pub back_to_login: bool,
}

/// The form screen in one of its four phases.
pub enum FormScreen {
    /// Schema fetch in flight.
    Loading { spinner: Spinner },
    /// Schema fetch failed; manual recovery only.
    Failed { message: String },
    /// Schema loaded, wizard running.
    Ready(Box<Wizard>),
    /// Session submitted; terminal state.
    Submitted { form_title: String },
}

impl FormScreen {
    pub fn loading() -> Self {
        FormScreen::Loading {
            spinner: Spinner::new(),
        }
    }

    /// Switches to the wizard once the schema arrived.
    pub fn loaded(&mut self, schema: FormSchema) {
        *self = FormScreen::Ready(Box::new(Wizard::new(schema)));
    }

    /// Switches to the error panel after a failed fetch.
    pub fn failed(&mut self, message: &str) {
        *self = FormScreen::Failed {
            message: message.to_string(),
        };
    }

    pub fn on_key(&mut self, key: KeyEvent) -> FormOutcome {
        match self {
            FormScreen::Loading { .. } | FormScreen::Submitted { .. } => FormOutcome::default(),
            FormScreen::Failed { .. } => FormOutcome {
                back_to_login: key.code == KeyCode::Esc,
            },
            FormScreen::Ready(wizard) => {
                if let Some(submission) = wizard.on_key(key) {
                    report_submission(&submission);
                    let form_title = wizard.session.schema().form_title.clone();
                    *self = FormScreen::Submitted { form_title };
                }
                FormOutcome::default()
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, tick: u64) {
        match self {
            FormScreen::Loading { spinner } => {
                let line = Line::from(vec![
                    Span::raw(spinner.frame(tick)),
                    Span::raw(" Loading form…"),
                ]);
                frame.render_widget(
                    Paragraph::new(line).alignment(Alignment::Center),
                    middle_row(frame.area()),
                );
            }
            FormScreen::Failed { message } => {
                let lines = vec![
                    Line::from(Span::styled(
                        message.clone(),
                        Style::default().fg(Color::Red),
                    )),
                    Line::default(),
                    Line::from(Span::styled(
                        "Press Esc to return to login",
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                frame.render_widget(
                    Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
                    middle_row(frame.area()),
                );
            }
            FormScreen::Submitted { form_title } => {
                let lines = vec![
                    Line::from(Span::styled(
                        "Form submitted successfully!",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                    Line::from(format!("Thank you for completing '{form_title}'.")),
                    Line::from(Span::styled(
                        "Press Ctrl+Q to exit",
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                frame.render_widget(
                    Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
                    middle_row(frame.area()),
                );
            }
            FormScreen::Ready(wizard) => wizard.render(frame),
        }
    }
}

/// Writes the collected values to the submission sink (the log).
fn report_submission(submission: &Submission) {
    match serde_json::to_string(submission.values()) {
        Ok(json) => log::info!("Form '{}' submitted: {json}", submission.form_id()),
        Err(e) => log::warn!("submitted values not serializable: {e}"),
    }
}

/// Vertically centered band for short status messages.
fn middle_row(area: Rect) -> Rect {
    let rows = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .split(area);
    rows[1]
}

// =============================================================================
// Wizard
// =============================================================================

/// The running wizard: a form session plus the view state over it.
pub struct Wizard {
    session: FormSession,
    /// Selected row: a field index, or `field_count()` for the controls.
    cursor: usize,
    /// Selected slot within the controls row.
    button: usize,
    /// Option cursor within a checkbox group.
    opt_cursor: usize,
    scroll: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Prev,
    Forward,
}

impl Wizard {
    fn new(schema: FormSchema) -> Self {
        Self {
            session: FormSession::new(schema),
            cursor: 0,
            button: 0,
            opt_cursor: 0,
            scroll: 0,
        }
    }

    fn field_count(&self) -> usize {
        self.session.current_section().map_or(0, |s| s.fields.len())
    }

    fn controls(&self) -> Vec<Control> {
        let mut controls = Vec::new();
        if !self.session.is_first_section() {
            controls.push(Control::Prev);
        }
        controls.push(Control::Forward);
        controls
    }

    fn current_field(&self) -> Option<FormField> {
        self.session
            .current_section()
            .and_then(|s| s.fields.get(self.cursor))
            .cloned()
    }

    /// Moves the row cursor, blurring the field being left.
    fn select(&mut self, target: usize) {
        let target = target.min(self.field_count());
        if target == self.cursor {
            return;
        }
        if let Some(field) = self.current_field() {
            self.session.blur(&field.field_id);
        }
        self.cursor = target;
        self.opt_cursor = 0;
    }

    /// Resets the view after the active section changed.
    fn reset_view(&mut self) {
        self.cursor = 0;
        self.button = 0;
        self.opt_cursor = 0;
        self.scroll = 0;
    }

    fn put(&mut self, field_id: &str, value: impl Into<Value>) {
        if let Err(e) = self.session.set_value(field_id, value) {
            log::debug!("set_value rejected: {e}");
        }
    }

    /// Handles a key; returns the submission once the session submits.
    fn on_key(&mut self, key: KeyEvent) -> Option<Submission> {
        let count = self.field_count();
        match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.select(self.cursor.saturating_sub(1));
            }
            KeyCode::Down | KeyCode::Tab => {
                self.select(self.cursor + 1);
            }
            KeyCode::Left => {
                if self.cursor == count {
                    self.button = self.button.saturating_sub(1);
                } else if let Some(field) = self.current_field() {
                    if field.is_multi_choice() {
                        self.opt_cursor = self.opt_cursor.saturating_sub(1);
                    } else if field.is_choice() {
                        self.cycle_choice(&field, -1);
                    }
                }
            }
            KeyCode::Right => {
                if self.cursor == count {
                    self.button = (self.button + 1).min(self.controls().len() - 1);
                } else if let Some(field) = self.current_field() {
                    if field.is_multi_choice() {
                        self.opt_cursor = (self.opt_cursor + 1).min(field.options().len() - 1);
                    } else if field.is_choice() {
                        self.cycle_choice(&field, 1);
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.current_field() {
                    self.edit(&field, c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field() {
                    if field.kind.is_text_like() {
                        let mut text = self.text_of(&field);
                        text.pop();
                        self.put(&field.field_id, text);
                    }
                }
            }
            KeyCode::Enter => {
                if self.cursor == count {
                    return self.activate();
                }
                match self.current_field() {
                    Some(field) if field.kind == FieldKind::Textarea => {
                        let mut text = self.text_of(&field);
                        text.push('\n');
                        self.put(&field.field_id, text);
                    }
                    _ => self.select(self.cursor + 1),
                }
            }
            _ => {}
        }
        None
    }

    /// Applies a typed character to the selected field.
    fn edit(&mut self, field: &FormField, c: char) {
        if field.kind.is_text_like() {
            let mut text = self.text_of(field);
            text.push(c);
            self.put(&field.field_id, text);
            return;
        }
        if c != ' ' {
            return;
        }
        if field.is_boolean_toggle() {
            let flag = self
                .session
                .value_or_default(field)
                .as_bool()
                .unwrap_or(false);
            self.put(&field.field_id, !flag);
        } else if field.is_multi_choice() {
            self.toggle_option(field);
        } else if field.is_choice() {
            self.cycle_choice(field, 1);
        }
    }

    fn text_of(&self, field: &FormField) -> String {
        match self.session.value_or_default(field) {
            Value::Text(s) => s,
            _ => String::new(),
        }
    }

    /// Cycles a single-choice field through its options, wrapping.
    fn cycle_choice(&mut self, field: &FormField, dir: i64) {
        let options = field.options();
        if options.is_empty() {
            return;
        }
        let len = options.len() as i64;
        let current = self.session.value(&field.field_id).and_then(Value::as_text);
        let next = match options.iter().position(|o| Some(o.value.as_str()) == current) {
            Some(i) => (i as i64 + dir).rem_euclid(len) as usize,
            // Nothing chosen yet: Right starts at the first option,
            // Left at the last.
            None if dir > 0 => 0,
            None => options.len() - 1,
        };
        let value = options[next].value.clone();
        self.put(&field.field_id, value);
    }

    /// Toggles the option under the option cursor of a checkbox group.
    fn toggle_option(&mut self, field: &FormField) {
        let options = field.options();
        let Some(option) = options.get(self.opt_cursor) else {
            return;
        };
        let mut chosen = match self.session.value_or_default(field) {
            Value::Choices(c) => c,
            _ => Vec::new(),
        };
        match chosen.iter().position(|v| v == &option.value) {
            Some(i) => {
                chosen.remove(i);
            }
            None => chosen.push(option.value.clone()),
        }
        self.put(&field.field_id, chosen);
    }

    /// Activates the selected control.
    fn activate(&mut self) -> Option<Submission> {
        let controls = self.controls();
        let control = controls.get(self.button.min(controls.len() - 1))?;
        match control {
            Control::Prev => {
                if self.session.prev() == Step::Moved {
                    self.reset_view();
                }
            }
            Control::Forward => {
                if self.session.is_last_section() {
                    match self.session.submit() {
                        Ok(submission) => return Some(submission),
                        Err(e) => log::debug!("submit blocked: {e}"),
                    }
                } else if self.session.next() == Step::Moved {
                    self.reset_view();
                }
            }
        }
        None
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render(&mut self, frame: &mut Frame) {
        let schema = self.session.schema();
        let rows = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

        // Header: title, id, version.
        let header = vec![
            Line::from(Span::styled(
                schema.form_title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Form ID: {} · Version: {}", schema.form_id, schema.version),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(Text::from(header)).block(Block::bordered()),
            rows[0],
        );

        // Progress over sections.
        let index = self.session.section_index();
        let section_count = self.session.section_count();
        let ratio = if section_count == 0 {
            1.0
        } else {
            (index + 1) as f64 / section_count as f64
        };
        frame.render_widget(
            Gauge::default()
                .ratio(ratio)
                .label(format!("Section {} of {}", index + 1, section_count))
                .gauge_style(Style::default().fg(Color::Blue)),
            rows[1],
        );

        // Body: the active section.
        let title = self
            .session
            .current_section()
            .map(|s| format!(" {} ", s.title))
            .unwrap_or_default();
        let body_block = Block::bordered().title(title);
        let body_area = body_block.inner(rows[2]);
        let (lines, field_lines, controls_line) = self.body_lines();
        self.adjust_scroll(&field_lines, controls_line, body_area.height);
        frame.render_widget(body_block, rows[2]);
        frame.render_widget(
            Paragraph::new(Text::from(lines))
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            body_area,
        );

        // Footer hints.
        frame.render_widget(
            Paragraph::new(Span::styled(
                "↑/↓ field · type to edit · Space toggle · ←/→ choose · Enter activate · Ctrl+Q quit",
                Style::default().fg(Color::DarkGray),
            )),
            rows[3],
        );
    }

    /// Builds the body lines plus the starting line of every field and
    /// of the controls row, for scroll tracking.
    fn body_lines(&self) -> (Vec<Line<'static>>, Vec<usize>, usize) {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut field_lines = Vec::new();

        let section = self.session.current_section().cloned();
        if let Some(section) = &section {
            if let Some(description) = &section.description {
                lines.push(Line::from(Span::styled(
                    description.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(Line::default());
            }

            for (i, field) in section.fields.iter().enumerate() {
                field_lines.push(lines.len());
                let selected = i == self.cursor;
                self.push_field_lines(&mut lines, field, selected);
                lines.push(Line::default());
            }
        }

        let controls_line = lines.len();
        lines.push(self.controls_row());
        (lines, field_lines, controls_line)
    }

    fn push_field_lines(&self, lines: &mut Vec<Line<'static>>, field: &FormField, selected: bool) {
        let marker = if selected { "› " } else { "  " };
        let mut label = vec![
            Span::raw(marker),
            Span::styled(
                field.label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if field.required {
            label.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        lines.push(Line::from(label));

        let value = self.session.value_or_default(field);
        match (&field.kind, &value) {
            (FieldKind::Dropdown, Value::Text(chosen)) => {
                let display = field
                    .options()
                    .iter()
                    .find(|o| &o.value == chosen)
                    .map(|o| o.label.clone());
                let mut spans = vec![Span::raw("    ▾ ")];
                match display {
                    Some(label) => spans.push(Span::raw(label)),
                    None => spans.push(Span::styled(
                        field
                            .placeholder
                            .clone()
                            .unwrap_or_else(|| "Select an option".to_string()),
                        Style::default().fg(Color::DarkGray),
                    )),
                }
                if selected {
                    spans.push(Span::styled(
                        "  ←/→ change",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                lines.push(Line::from(spans));
            }
            (FieldKind::Radio, Value::Text(chosen)) => {
                for option in field.options() {
                    let dot = if &option.value == chosen { "(•)" } else { "( )" };
                    lines.push(Line::from(format!("    {dot} {}", option.label)));
                }
            }
            (FieldKind::Checkbox, Value::Choices(chosen)) => {
                for (j, option) in field.options().iter().enumerate() {
                    let mark = if chosen.contains(&option.value) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    let cursor = if selected && j == self.opt_cursor {
                        "  › "
                    } else {
                        "    "
                    };
                    lines.push(Line::from(format!("{cursor}{mark} {}", option.label)));
                }
            }
            (FieldKind::Checkbox, Value::Bool(flag)) => {
                let mark = if *flag { "[x]" } else { "[ ]" };
                let mut spans = vec![Span::raw(format!("    {mark}"))];
                if selected {
                    spans.push(Span::styled(
                        "  Space to toggle",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                lines.push(Line::from(spans));
            }
            (_, Value::Text(text)) if text.is_empty() => {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        field.placeholder.clone().unwrap_or_default(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    if selected {
                        Span::styled("▏", Style::default().fg(Color::Cyan))
                    } else {
                        Span::raw("")
                    },
                ]));
            }
            (_, Value::Text(text)) => {
                let rendered: Vec<&str> = text.split('\n').collect();
                let last = rendered.len() - 1;
                for (j, part) in rendered.iter().enumerate() {
                    let mut spans = vec![Span::raw("    "), Span::raw(part.to_string())];
                    if selected && j == last {
                        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
                    }
                    lines.push(Line::from(spans));
                }
            }
            _ => {}
        }

        if let Some(error) = self.session.error(&field.field_id) {
            lines.push(Line::from(Span::styled(
                format!("    ✗ {error}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    fn controls_row(&self) -> Line<'static> {
        let on_controls = self.cursor == self.field_count();
        let controls = self.controls();
        let mut spans = vec![Span::raw("  ")];
        for (i, control) in controls.iter().enumerate() {
            let caption = match control {
                Control::Prev => "[ Previous ]",
                Control::Forward => {
                    if self.session.is_last_section() {
                        "[ Submit ]"
                    } else {
                        "[ Next ]"
                    }
                }
            };
            let style = if on_controls && i == self.button.min(controls.len() - 1) {
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(caption, style));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    }

    /// Keeps the selected row inside the body viewport.
    fn adjust_scroll(&mut self, field_lines: &[usize], controls_line: usize, height: u16) {
        let target = if self.cursor < field_lines.len() {
            field_lines[self.cursor]
        } else {
            controls_line
        } as u16;
        let height = height.max(1);
        if target < self.scroll {
            self.scroll = target;
        } else if target + 2 >= self.scroll + height {
            self.scroll = (target + 3).saturating_sub(height);
        }
    }
}
