// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;
use supplierdesk_app::{
    ApiCall, COLUMNS, CallFailure, CallOutcome, ControllerState, FormField, NoticeLevel,
    Operation, PendingCall, SortKey,
};

const DISABLE_MARKER: &str = "[Disable]";

/// Executes backend calls for the UI.
///
/// `spawn_call` must eventually send exactly one `CallCompleted` for the
/// call it was given. The default runs the call inline.
pub trait AppRuntime {
    fn execute(&mut self, call: &ApiCall) -> Result<CallOutcome, CallFailure>;

    fn spawn_call(&mut self, pending: PendingCall, tx: Sender<InternalEvent>) -> Result<()> {
        let result = self.execute(&pending.call);
        tx.send(InternalEvent::CallCompleted { pending, result })
            .map_err(|_| anyhow!("call completion channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    CallCompleted {
        pending: PendingCall,
        result: Result<CallOutcome, CallFailure>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Nav,
    Form,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    mode: InputMode,
    field_index: usize,
    selected_row: usize,
    help_visible: bool,
    in_flight: usize,
}

impl ViewData {
    fn focused_field(&self) -> FormField {
        FormField::ALL[self.field_index % FormField::ALL.len()]
    }
}

pub fn run_app<R: AppRuntime>(state: &mut ControllerState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    let initial = state.dispatch(Operation::List(SortKey::Id));
    issue_calls(state, runtime, &mut view_data, &internal_tx, initial);

    let mut result = Ok(());
    loop {
        process_internal_events(state, runtime, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn issue_calls<R: AppRuntime>(
    state: &mut ControllerState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    calls: Vec<PendingCall>,
) {
    for pending in calls {
        let call = pending.call.describe();
        view_data.in_flight = view_data.in_flight.saturating_add(1);
        if let Err(error) = runtime.spawn_call(pending, tx.clone()) {
            tracing::error!(%call, error = %format!("{error:#}"), "could not start backend call");
            view_data.in_flight = view_data.in_flight.saturating_sub(1);
            state.notices.error(format!("{call} failed to start: {error:#}"));
        }
    }
}

/// Applies completions in arrival order and issues their follow-ups.
fn process_internal_events<R: AppRuntime>(
    state: &mut ControllerState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::CallCompleted { pending, result } => {
                view_data.in_flight = view_data.in_flight.saturating_sub(1);
                let follow_up = state.complete(&pending, result);
                clamp_selection(state, view_data);
                issue_calls(state, runtime, view_data, tx, follow_up);
            }
        }
    }
}

fn clamp_selection(state: &ControllerState, view_data: &mut ViewData) {
    view_data.selected_row = match state.table.len() {
        0 => 0,
        len => view_data.selected_row.min(len - 1),
    };
}

fn handle_key_event<R: AppRuntime>(
    state: &mut ControllerState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.mode == InputMode::Form {
        handle_form_key(state, view_data, key);
        return false;
    }

    let operation = match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::NONE) => Some(Operation::Create),
        (KeyCode::Char('u'), KeyModifiers::NONE) => Some(Operation::Update),
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(Operation::Retrieve),
        (KeyCode::Char('d'), KeyModifiers::NONE) => Some(Operation::Delete),
        (KeyCode::Char('n'), KeyModifiers::NONE) => Some(Operation::Clear),
        (KeyCode::Char('/'), _) => Some(Operation::Search),
        (KeyCode::Char('l'), KeyModifiers::NONE) => Some(Operation::List(state.last_sort)),
        (KeyCode::Char(digit @ '1'..='4'), KeyModifiers::NONE) => {
            let index = digit as usize - '1' as usize;
            SortKey::ALL.get(index).copied().map(Operation::List)
        }
        (KeyCode::Char('x'), KeyModifiers::NONE) => {
            disable_selected_row(state, runtime, view_data, internal_tx);
            None
        }
        (KeyCode::Char('j') | KeyCode::Down, _) => {
            move_selection(state, view_data, 1);
            None
        }
        (KeyCode::Char('k') | KeyCode::Up, _) => {
            move_selection(state, view_data, -1);
            None
        }
        (KeyCode::Enter, _) => {
            if !state.load_row(view_data.selected_row) {
                state.notices.error("no supplier row selected");
            }
            None
        }
        (KeyCode::Char('i'), KeyModifiers::NONE) => {
            view_data.mode = InputMode::Form;
            None
        }
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            None
        }
        _ => None,
    };

    if let Some(operation) = operation {
        let calls = state.dispatch(operation);
        issue_calls(state, runtime, view_data, internal_tx, calls);
    }
    false
}

fn handle_form_key(state: &mut ControllerState, view_data: &mut ViewData, key: KeyEvent) {
    let field = view_data.focused_field();
    match key.code {
        KeyCode::Esc | KeyCode::Enter => view_data.mode = InputMode::Nav,
        KeyCode::Tab => move_field_cursor(view_data, 1),
        KeyCode::BackTab => move_field_cursor(view_data, -1),
        KeyCode::Backspace => state.form.pop_char(field),
        KeyCode::Char(' ') if !field.is_text() => state.form.toggle_availability(),
        KeyCode::Char(value)
            if field.is_text()
                && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            state.form.push_char(field, value);
        }
        _ => {}
    }
}

fn move_field_cursor(view_data: &mut ViewData, delta: isize) {
    let len = FormField::ALL.len() as isize;
    let next = (view_data.field_index as isize + delta).rem_euclid(len);
    view_data.field_index = next as usize;
}

fn move_selection(state: &ControllerState, view_data: &mut ViewData, delta: isize) {
    let len = state.table.len();
    if len == 0 {
        view_data.selected_row = 0;
        return;
    }
    let next = view_data.selected_row as isize + delta;
    view_data.selected_row = next.clamp(0, len as isize - 1) as usize;
}

fn disable_selected_row<R: AppRuntime>(
    state: &mut ControllerState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(row) = state.table.rows().get(view_data.selected_row) else {
        state.notices.error("no supplier row selected");
        return;
    };
    let Some(affordance) = row.disable.clone() else {
        let id = row.record.id;
        state
            .notices
            .error(format!("supplier {id} is already unavailable"));
        return;
    };
    let calls = state.request_disable(&affordance);
    issue_calls(state, runtime, view_data, internal_tx, calls);
}

fn render(frame: &mut ratatui::Frame<'_>, state: &ControllerState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(FormField::ALL.len() as u16 + 2),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(title_text(state, view_data))
        .block(Block::default().title("supplierdesk").borders(Borders::ALL));
    frame.render_widget(title, layout[0]);

    let form_style = if view_data.mode == InputMode::Form {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let form = Paragraph::new(form_panel_text(state, view_data)).block(
        Block::default()
            .title("supplier")
            .borders(Borders::ALL)
            .border_style(form_style),
    );
    frame.render_widget(form, layout[1]);

    render_table(frame, layout[2], state, view_data);

    let status_color = match state.notices.current().map(|notice| notice.level) {
        Some(NoticeLevel::Error) => Color::Red,
        Some(NoticeLevel::Info) | None => Color::Yellow,
    };
    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(status_color))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &ControllerState,
    view_data: &ViewData,
) {
    let header = Row::new(COLUMNS.iter().copied().chain([""]).map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = table_row_texts(state)
        .into_iter()
        .enumerate()
        .map(|(index, cells)| {
            let mut style = Style::default();
            if state.table.rows()[index].is_unavailable() {
                style = style.fg(Color::DarkGray);
            }
            if index == view_data.selected_row && view_data.mode == InputMode::Nav {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            Row::new(cells.into_iter().map(Cell::from)).style(style)
        });

    let widths = [
        Constraint::Length(6),
        Constraint::Min(12),
        Constraint::Min(16),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(DISABLE_MARKER.len() as u16),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(format!("suppliers ({})", state.table.len()))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn title_text(state: &ControllerState, view_data: &ViewData) -> String {
    let mut title = format!("sort: {} | rows: {}", state.last_sort.as_str(), state.table.len());
    if view_data.in_flight > 0 {
        title.push_str(&format!(" | pending: {}", view_data.in_flight));
    }
    title
}

fn form_panel_text(state: &ControllerState, view_data: &ViewData) -> String {
    FormField::ALL
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = view_data.mode == InputMode::Form && index == view_data.field_index;
            let marker = if focused { '>' } else { ' ' };
            let value = match field {
                FormField::Available => format!("({})", state.form.availability.label()),
                _ => state.form.text(*field),
            };
            format!("{marker} {:<13}{value}", field.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table_row_texts(state: &ControllerState) -> Vec<Vec<String>> {
    state
        .table
        .rows()
        .iter()
        .map(|row| {
            let marker = if row.disable.is_some() {
                DISABLE_MARKER
            } else {
                ""
            };
            row.cells()
                .into_iter()
                .chain([marker.to_owned()])
                .collect()
        })
        .collect()
}

fn status_text(state: &ControllerState, view_data: &ViewData) -> String {
    let (mode, hints) = match view_data.mode {
        InputMode::Nav => (
            "NAV",
            "c/u/r/d crud | / search | l list | 1-4 sort | x disable | n clear | i edit | ? help | ctrl+q",
        ),
        InputMode::Form => ("FORM", "tab/shift+tab field | space toggle | esc nav"),
    };
    match state.notices.text() {
        Some(notice) => format!("{mode} | {notice} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: c create | u update | r retrieve | d delete | n clear form\n\
nav: / search by form | l list | 1 id 2 name 3 email 4 address sort\n\
nav: j/k move | enter load row into form | x disable selected row | i edit form\n\
form: type to edit | backspace erase | tab/shift+tab field | space toggle available | esc nav"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, InputMode, InternalEvent, ViewData, form_panel_text, handle_key_event,
        help_overlay_text, issue_calls, process_internal_events, status_text, table_row_texts,
        title_text,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc;
    use supplierdesk_app::{
        ApiCall, Availability, CallFailure, CallOutcome, ControllerState, Operation, PendingCall,
        SortKey, SupplierId, SupplierPayload,
    };
    use supplierdesk_testkit::FakeBackend;

    #[derive(Debug, Default)]
    struct TestRuntime {
        backend: FakeBackend,
        held: bool,
        parked: Vec<PendingCall>,
    }

    impl TestRuntime {
        fn with_suppliers(names: &[(&str, bool)]) -> Self {
            let runtime = Self::default();
            for (index, (name, available)) in names.iter().enumerate() {
                runtime.backend.insert(SupplierPayload {
                    name: (*name).to_owned(),
                    email: format!("s{index}@x.com"),
                    address: format!("{index} Rd"),
                    phone_number: None,
                    available: *available,
                    products: Vec::new(),
                });
            }
            runtime
        }
    }

    impl AppRuntime for TestRuntime {
        fn execute(&mut self, call: &ApiCall) -> Result<CallOutcome, CallFailure> {
            call.execute(&self.backend)
        }

        fn spawn_call(
            &mut self,
            pending: PendingCall,
            tx: mpsc::Sender<InternalEvent>,
        ) -> anyhow::Result<()> {
            if self.held {
                self.parked.push(pending);
                return Ok(());
            }
            let result = self.execute(&pending.call);
            tx.send(InternalEvent::CallCompleted { pending, result })
                .map_err(|_| anyhow::anyhow!("closed"))
        }
    }

    struct Harness {
        state: ControllerState,
        runtime: TestRuntime,
        view_data: ViewData,
        tx: mpsc::Sender<InternalEvent>,
        rx: mpsc::Receiver<InternalEvent>,
    }

    impl Harness {
        fn new(runtime: TestRuntime) -> Self {
            let (tx, rx) = mpsc::channel();
            let mut harness = Self {
                state: ControllerState::default(),
                runtime,
                view_data: ViewData::default(),
                tx,
                rx,
            };
            let initial = harness.state.dispatch(Operation::List(SortKey::Id));
            harness.issue(initial);
            harness
        }

        fn issue(&mut self, calls: Vec<PendingCall>) {
            issue_calls(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                calls,
            );
            self.pump();
        }

        fn pump(&mut self) {
            process_internal_events(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                &self.rx,
            );
        }

        fn key(&mut self, code: KeyCode) -> bool {
            self.key_with(code, KeyModifiers::NONE)
        }

        fn key_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
            let quit = handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                KeyEvent::new(code, modifiers),
            );
            self.pump();
            quit
        }

        fn type_text(&mut self, text: &str) {
            for value in text.chars() {
                self.key(KeyCode::Char(value));
            }
        }
    }

    #[test]
    fn ctrl_q_quits() {
        let mut harness = Harness::new(TestRuntime::default());
        assert!(!harness.key(KeyCode::Char('q')));
        assert!(harness.key_with(KeyCode::Char('q'), KeyModifiers::CONTROL));
    }

    #[test]
    fn startup_lists_suppliers_by_id() {
        let harness = Harness::new(TestRuntime::with_suppliers(&[("Acme", true), ("Bolt", false)]));
        assert_eq!(harness.state.table.len(), 2);
        assert_eq!(harness.runtime.backend.calls(), vec!["GET /suppliers?sort_by=id"]);
        assert_eq!(harness.view_data.in_flight, 0);
    }

    #[test]
    fn typing_in_form_then_create_submits_and_refreshes() {
        let mut harness = Harness::new(TestRuntime::default());

        harness.key(KeyCode::Char('i'));
        assert_eq!(harness.view_data.mode, InputMode::Form);
        harness.key(KeyCode::Tab);
        harness.type_text("Acme");
        harness.key(KeyCode::Tab);
        harness.type_text("a@x.com");
        harness.key(KeyCode::Tab);
        harness.type_text("1 Rd");
        harness.key(KeyCode::Esc);
        assert_eq!(harness.view_data.mode, InputMode::Nav);

        harness.key(KeyCode::Char('c'));

        assert_eq!(harness.state.form.id, "1");
        assert_eq!(harness.state.notices.text(), Some("Success"));
        assert_eq!(harness.state.table.len(), 1);
        assert_eq!(
            harness.runtime.backend.calls(),
            vec![
                "GET /suppliers?sort_by=id",
                "POST /suppliers",
                "GET /suppliers?sort_by=id",
            ]
        );
    }

    #[test]
    fn backspace_and_shift_tab_edit_previous_field() {
        let mut harness = Harness::new(TestRuntime::default());
        harness.key(KeyCode::Char('i'));
        harness.key(KeyCode::BackTab);
        assert_eq!(harness.view_data.field_index, 5);

        harness.key(KeyCode::Char(' '));
        assert_eq!(harness.state.form.availability, Availability::Unavailable);
        harness.key(KeyCode::Char('z'));
        assert_eq!(harness.state.form.availability, Availability::Unavailable);

        harness.key(KeyCode::BackTab);
        harness.type_text("555-01");
        harness.key(KeyCode::Backspace);
        assert_eq!(harness.state.form.phone_number, "555-0");
    }

    #[test]
    fn number_keys_sort_the_table() {
        let mut harness = Harness::new(TestRuntime::with_suppliers(&[
            ("Zeta", true),
            ("Alpha", true),
        ]));

        harness.key(KeyCode::Char('2'));
        assert_eq!(harness.state.last_sort, SortKey::Name);
        assert_eq!(harness.state.table.rows()[0].record.name, "Alpha");

        harness.key(KeyCode::Char('l'));
        assert_eq!(
            harness.runtime.backend.calls().last().map(String::as_str),
            Some("GET /suppliers?sort_by=name")
        );
    }

    #[test]
    fn x_disables_selected_available_row() {
        let mut harness = Harness::new(TestRuntime::with_suppliers(&[
            ("Acme", false),
            ("Bolt", true),
        ]));

        harness.key(KeyCode::Char('x'));
        assert_eq!(
            harness.state.notices.text(),
            Some("supplier 1 is already unavailable")
        );

        harness.key(KeyCode::Char('j'));
        harness.key(KeyCode::Char('x'));
        assert_eq!(harness.state.notices.text(), Some("Supplier unavailable!"));
        assert!(harness.state.table.rows().iter().all(|row| row.disable.is_none()));
        assert_eq!(
            harness
                .runtime
                .backend
                .record(SupplierId::new(2))
                .map(|record| record.available),
            Some(false)
        );
    }

    #[test]
    fn enter_loads_selected_row_without_backend_call() {
        let mut harness = Harness::new(TestRuntime::with_suppliers(&[
            ("Acme", true),
            ("Bolt", true),
        ]));
        harness.key(KeyCode::Down);
        harness.key(KeyCode::Down);
        assert_eq!(harness.view_data.selected_row, 1);

        harness.key(KeyCode::Enter);
        assert_eq!(harness.state.form.name, "Bolt");
        assert_eq!(harness.runtime.backend.calls().len(), 1);
    }

    #[test]
    fn selection_is_clamped_after_rows_disappear() {
        let mut harness = Harness::new(TestRuntime::with_suppliers(&[
            ("Acme", true),
            ("Bolt", true),
        ]));
        harness.key(KeyCode::Char('j'));
        harness.key(KeyCode::Enter);
        harness.key(KeyCode::Char('d'));

        assert_eq!(harness.state.table.len(), 1);
        assert_eq!(harness.view_data.selected_row, 0);
        assert_eq!(
            harness.state.notices.text(),
            Some("Supplier has been Deleted!")
        );
    }

    #[test]
    fn retrieve_without_id_reports_requirement() {
        let mut harness = Harness::new(TestRuntime::default());
        harness.key(KeyCode::Char('r'));
        assert!(
            status_text(&harness.state, &harness.view_data).contains("supplier id is required")
        );
        assert_eq!(harness.runtime.backend.calls().len(), 1);
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let mut harness = Harness::new(TestRuntime::default());
        harness.key(KeyCode::Char('?'));
        assert!(harness.view_data.help_visible);

        harness.key(KeyCode::Char('n'));
        assert_eq!(harness.runtime.backend.calls().len(), 1);

        harness.key(KeyCode::Esc);
        assert!(!harness.view_data.help_visible);
        assert!(help_overlay_text().contains("x disable"));
    }

    #[test]
    fn out_of_order_completions_keep_newest_list() {
        let mut harness = Harness::new(TestRuntime::with_suppliers(&[
            ("Zeta", true),
            ("Alpha", true),
        ]));
        harness.runtime.held = true;
        harness.key(KeyCode::Char('2'));
        harness.key(KeyCode::Char('1'));
        assert_eq!(harness.view_data.in_flight, 2);

        let mut parked = std::mem::take(&mut harness.runtime.parked);
        parked.reverse();
        for pending in parked {
            let result = pending.call.execute(&harness.runtime.backend);
            harness
                .tx
                .send(InternalEvent::CallCompleted { pending, result })
                .expect("channel open");
        }
        harness.pump();

        assert_eq!(harness.view_data.in_flight, 0);
        assert_eq!(harness.state.table.rows()[0].record.name, "Zeta");
        assert!(title_text(&harness.state, &harness.view_data).contains("sort: id"));
    }

    #[test]
    fn panels_render_form_and_disable_markers() {
        let mut harness = Harness::new(TestRuntime::with_suppliers(&[
            ("Acme", true),
            ("Bolt", false),
        ]));
        harness.key(KeyCode::Enter);
        harness.key(KeyCode::Char('i'));

        let form = form_panel_text(&harness.state, &harness.view_data);
        assert!(form.starts_with("> id"));
        assert!(form.contains("Acme"));
        assert!(form.contains("(available)"));

        let rows = table_row_texts(&harness.state);
        assert_eq!(rows[0].last().map(String::as_str), Some("[Disable]"));
        assert_eq!(rows[1].last().map(String::as_str), Some(""));
        assert!(status_text(&harness.state, &harness.view_data).starts_with("FORM"));
    }
}
