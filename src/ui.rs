use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mortgage_calc::{rows, Field, Form, LoanInputs, RowKind, DEFAULT_BASE_URL};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

pub struct App {
    pub form: Form,
    pub fields_state: TableState,
    pub show_link: bool,
    /// Set when the user asks for a share link; printed after the UI closes
    pub copied_link: Option<String>,
}

impl App {
    pub fn new(inputs: LoanInputs) -> Self {
        let mut fields_state = TableState::default();
        fields_state.select(Some(0));

        Self {
            form: Form::new(inputs),
            fields_state,
            show_link: false,
            copied_link: None,
        }
    }

    pub fn next_field(&mut self) {
        self.form.focus_next();
        self.sync_selection();
    }

    pub fn previous_field(&mut self) {
        self.form.focus_previous();
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        let index = Field::ALL.iter().position(|f| *f == self.form.focused);
        self.fields_state.select(index);
    }

    pub fn share(&mut self) {
        self.copied_link = Some(self.form.share_link(DEFAULT_BASE_URL));
        self.show_link = true;
    }

    pub fn handle_char(&mut self, c: char) {
        match (self.form.focused.slider(), c) {
            (Some(_), '+') => self.form.increment(),
            (Some(_), '-') => self.form.decrement(),
            (Some(_), _) => {}
            (None, c) => self.form.push_char(c),
        }
        self.show_link = false;
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("terminal UI failed: {:?}", err);
        return Err(err.into());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Tab | KeyCode::Down => app.next_field(),
                KeyCode::BackTab | KeyCode::Up => app.previous_field(),
                KeyCode::Right => app.form.increment(),
                KeyCode::Left => app.form.decrement(),
                KeyCode::Backspace => app.form.pop_char(),
                KeyCode::Char('s') => app.share(),
                KeyCode::Char('r') => {
                    app.form.reset();
                    app.show_link = false;
                }
                KeyCode::Char(c) => app.handle_char(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Form + results
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(40), // Inputs
            Constraint::Min(0),     // Results
        ])
        .split(chunks[0]);

    render_form(f, content_chunks[0], app);
    render_results(f, content_chunks[1], app);
    render_status_bar(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &mut App) {
    let inputs = *app.form.inputs();

    let field_rows = Field::ALL.iter().map(|field| {
        let value = app.form.display_value(*field);
        let value_cell = match field.slider() {
            Some(_) => Cell::from(format!("◀ {} ▶", value)).style(Style::default().fg(Color::Cyan)),
            None => Cell::from(value).style(Style::default().fg(Color::White)),
        };

        Row::new(vec![Cell::from(field.label(&inputs)), value_cell]).height(1)
    });

    let table = Table::new(field_rows, [Constraint::Length(20), Constraint::Length(16)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Inputs "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.fields_state);
}

fn slider_hint(slider: Option<mortgage_calc::Slider>) -> String {
    match slider {
        Some(s) => format!("{}..{} step {}", s.min, s.max, s.step),
        None => String::new(),
    }
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["", "Amount"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let inputs = app.form.inputs();
    let summary = app.form.summary();

    let table_rows = rows(inputs, summary).into_iter().map(|row| {
        let color = match row.kind {
            RowKind::PaymentMinusRent if summary.net_monthly_cost(inputs.rent) > 0.0 => Color::Red,
            RowKind::PaymentMinusRent => Color::Green,
            RowKind::AnnualYield => Color::Cyan,
            _ => Color::White,
        };

        Row::new(vec![
            Cell::from(row.label),
            Cell::from(format!("{:>16}", row.value)).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(table_rows, [Constraint::Length(26), Constraint::Length(18)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Results "),
        );

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let (true, Some(link)) = (app.show_link, app.copied_link.as_deref()) {
        status_spans.push(Span::styled(" Link: ", Style::default().fg(Color::Green)));
        status_spans.push(Span::raw(link.to_string()));
    } else {
        let hint = slider_hint(app.form.focused.slider());
        if !hint.is_empty() {
            status_spans.push(Span::styled(
                format!(" {} ", hint),
                Style::default().fg(Color::Cyan),
            ));
            status_spans.push(Span::raw(" | "));
        }
        status_spans.push(Span::styled("Tab/↑↓", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Field | "));
        status_spans.push(Span::styled("←/→", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Adjust | "));
        status_spans.push(Span::styled("s", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Share | "));
        status_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Reset | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_navigation_tracks_selection() {
        let mut app = App::new(LoanInputs::default());
        app.next_field();
        app.next_field();
        assert_eq!(app.form.focused, Field::DownCoefficient);
        assert_eq!(app.fields_state.selected(), Some(2));

        app.previous_field();
        app.previous_field();
        app.previous_field();
        assert_eq!(app.form.focused, Field::YearsLoan);
        assert_eq!(app.fields_state.selected(), Some(4));
    }

    #[test]
    fn test_plus_minus_on_slider() {
        let mut app = App::new(LoanInputs::default());
        app.previous_field();
        app.handle_char('-');
        assert_eq!(app.form.inputs().years_loan, 19.0);
        app.handle_char('+');
        app.handle_char('+');
        assert_eq!(app.form.inputs().years_loan, 20.0);
    }

    #[test]
    fn test_share_remembers_link() {
        let mut app = App::new(LoanInputs::default());
        app.share();
        assert!(app.show_link);
        assert_eq!(
            app.copied_link.as_deref(),
            Some("http://localhost:3000?downCoefficient=0.3&fullCostAvr=130&interestRate=11&rent=770000&yearsLoan=20")
        );

        app.handle_char('1');
        assert!(!app.show_link);
    }
}
