//! Application state and input handling.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use daybar_engine::{
    format_clock, ClickDisambiguator, ClickGesture, Config, LunchToggle, MarkerId, TimelineError,
    TimelineModel, MAX_MARKERS, MIN_MARKERS,
};
use ratatui::layout::Rect;
use tracing::{debug, warn};

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::event::{key_to_action, Action};
use crate::layout::{AppLayout, MIN_HEIGHT, MIN_WIDTH};
use crate::theme::Theme;
use crate::widgets::{keep_visible, EditField, EditorState};

/// Percent moved by an arrow key.
const NUDGE_STEP: f64 = 1.0;
/// Percent moved by a shifted arrow key.
const FAST_NUDGE_STEP: f64 = 5.0;

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Bar,
    Table,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Bar => Self::Table,
            Self::Table => Self::Bar,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Table => "Table",
        }
    }
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// One-line feedback shown above the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: MessageLevel,
}

/// A marker being dragged with the mouse.
#[derive(Debug, Clone, Copy)]
struct DragState {
    marker: MarkerId,
    /// Marker column minus the column it was grabbed at.
    offset: i32,
}

/// Main application state.
pub struct App {
    pub model: TimelineModel,
    pub focus: Focus,
    /// Marker whose handle is highlighted; its row (if any) is the selected row.
    pub selected_marker: MarkerId,
    /// First visible table row.
    pub table_offset: usize,
    /// Inline editor, when a row's text is being edited.
    pub editor: Option<EditorState>,
    pub message: Option<StatusMessage>,
    pub theme: Theme,
    /// Current terminal size.
    pub terminal_size: (u16, u16),
    /// Should the app quit?
    pub should_quit: bool,
    clicks: ClickDisambiguator<MarkerId>,
    drag: Option<DragState>,
    clipboard: Box<dyn ClipboardSink>,
}

impl App {
    /// Create an app around a model.
    pub fn new(
        model: TimelineModel,
        click_window: Duration,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let selected_marker = model
            .rows()
            .first()
            .map(|row| row.marker)
            .or_else(|| model.sorted_ids().first().copied())
            .unwrap_or(MarkerId(1));

        Self {
            model,
            focus: Focus::default(),
            selected_marker,
            table_offset: 0,
            editor: None,
            message: None,
            theme: Theme::from_env(),
            terminal_size: (80, 24), // Default, updated on first render
            should_quit: false,
            clicks: ClickDisambiguator::new(click_window),
            drag: None,
            clipboard,
        }
    }

    /// Create an app from configuration, using the system clipboard.
    pub fn from_config(config: &Config) -> Result<Self, TimelineError> {
        let model = TimelineModel::from_config(config)?;
        Ok(Self::new(
            model,
            config.click_window(),
            Box::new(SystemClipboard::new()),
        ))
    }

    /// Check if terminal is too small.
    pub fn is_too_small(&self) -> bool {
        self.terminal_size.0 < MIN_WIDTH || self.terminal_size.1 < MIN_HEIGHT
    }

    /// Layout for the current terminal size.
    pub fn layout(&self) -> AppLayout {
        AppLayout::new(Rect::new(0, 0, self.terminal_size.0, self.terminal_size.1))
    }

    /// Index of the selected row, if the selected marker closes one.
    pub fn selected_row(&self) -> Option<usize> {
        self.row_index_of(self.selected_marker)
    }

    fn row_index_of(&self, marker: MarkerId) -> Option<usize> {
        self.model.rows().iter().position(|row| row.marker == marker)
    }

    /// Handle terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.sync_view();
    }

    /// Handle a key press. The editor, when open, takes every key.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.editor.is_some() {
            self.handle_editor_key(key);
            return;
        }

        self.handle_action(key_to_action(key));
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Esc => {
                self.editor = None;
                self.info("Edit cancelled");
            }
            KeyCode::Tab => {
                let next = match editor.field {
                    EditField::Problem => Some(EditField::Solution),
                    EditField::Solution => None,
                };
                let marker = editor.marker;
                self.commit_edit();
                if let Some(field) = next {
                    self.start_edit(marker, field);
                }
            }
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Delete => editor.delete(),
            KeyCode::Left => editor.move_left(),
            KeyCode::Right => editor.move_right(),
            KeyCode::Home => editor.move_home(),
            KeyCode::End => editor.move_end(),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                editor.insert(ch);
            }
            _ => {}
        }
    }

    /// Apply a navigation or command action.
    pub fn handle_action(&mut self, action: Action) {
        debug!(?action, focus = ?self.focus, "Handling action");

        match action {
            Action::Quit => self.should_quit = true,
            Action::AddMarker => self.add_marker(),
            Action::RemoveMarker => self.remove_marker(),
            Action::SwitchFocus => {
                self.focus = self.focus.toggle();
                if self.focus == Focus::Table && self.selected_row().is_none() {
                    self.select_row(0);
                }
            }
            Action::Up => self.step_selection(-1),
            Action::Down => self.step_selection(1),
            Action::Left => self.nudge(-NUDGE_STEP),
            Action::Right => self.nudge(NUDGE_STEP),
            Action::FastLeft => self.nudge(-FAST_NUDGE_STEP),
            Action::FastRight => self.nudge(FAST_NUDGE_STEP),
            Action::EditProblem => self.edit_current(EditField::Problem),
            Action::EditSolution => self.edit_current(EditField::Solution),
            Action::ToggleLunch => {
                if let Some(marker) = self.current_row_marker() {
                    self.toggle_lunch(marker);
                }
            }
            Action::ToggleFlag => {
                if let Some(marker) = self.current_row_marker() {
                    self.toggle_flag(marker);
                }
            }
            Action::TogglePolicy => {
                let policy = self.model.policy().toggle();
                self.model.set_policy(policy);
                self.info(format!("First row: {}", policy.label()));
            }
            Action::Export => self.export_to_clipboard(),
            Action::Select => match self.focus {
                Focus::Bar => {
                    if self.selected_row().is_some() {
                        self.focus = Focus::Table;
                    }
                }
                Focus::Table => self.edit_current(EditField::Problem),
            },
            Action::Back => self.message = None,
            Action::None => {}
        }

        self.sync_view();
    }

    /// Handle a mouse event at `now`.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.is_too_small() {
            return;
        }
        let layout = self.layout();
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.bar_hit(column, row) {
                    self.grab_marker(column);
                } else if let Some(line) = layout.ordinal_hit(column, row) {
                    self.click_ordinal(self.table_offset + line, now);
                } else if let Some(line) = self.table_line_hit(column, row) {
                    let index = self.table_offset + line;
                    if index < self.model.rows().len() {
                        self.focus = Focus::Table;
                        self.select_row(index);
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(drag) = self.drag {
                    let geometry = layout.bar_geometry();
                    let position = geometry.position_at(i32::from(column) + drag.offset);
                    self.move_marker(drag.marker, position);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(drag) = self.drag.take() {
                    debug!(marker = %drag.marker, "Drag finished");
                }
            }
            MouseEventKind::ScrollUp => self.step_selection(-1),
            MouseEventKind::ScrollDown => self.step_selection(1),
            _ => {}
        }

        self.sync_view();
    }

    /// Fire a pending single click whose window has closed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(gesture) = self.clicks.poll(now) {
            self.apply_gesture(gesture);
            self.sync_view();
        }
    }

    /// Time until a pending click fires, used to shorten the poll timeout.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.clicks.time_until_fire(now)
    }

    fn apply_gesture(&mut self, gesture: ClickGesture<MarkerId>) {
        debug!(?gesture, "Row number clicked");
        match gesture {
            ClickGesture::Single(marker) => self.toggle_lunch(marker),
            ClickGesture::Double(marker) => self.toggle_flag(marker),
        }
    }

    fn table_line_hit(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.layout().table_inner();
        let first = inner.y + 1;
        let inside = column >= inner.x
            && column < inner.x + inner.width
            && row >= first
            && row < inner.y + inner.height;
        inside.then(|| (row - first) as usize)
    }

    fn click_ordinal(&mut self, index: usize, now: Instant) {
        let Some(marker) = self.model.rows().get(index).map(|row| row.marker) else {
            return;
        };
        self.focus = Focus::Table;
        self.selected_marker = marker;
        if let Some(flushed) = self.clicks.click(marker, now) {
            self.apply_gesture(flushed);
        }
    }

    /// Select the marker under `column`, preferring the latest inserted on ties.
    fn grab_marker(&mut self, column: u16) {
        let geometry = self.layout().bar_geometry();
        let mut best: Option<(u16, MarkerId, u16)> = None;
        for marker in self.model.markers() {
            let at = geometry.column_of(marker.position());
            let distance = at.abs_diff(column);
            let closer = match best {
                Some((best_distance, _, _)) => distance <= best_distance,
                None => true,
            };
            if distance <= 1 && closer {
                best = Some((distance, marker.id(), at));
            }
        }

        if let Some((_, marker, at)) = best {
            self.focus = Focus::Bar;
            self.selected_marker = marker;
            self.drag = Some(DragState {
                marker,
                offset: i32::from(at) - i32::from(column),
            });
            debug!(%marker, column, "Grabbed marker");
        }
    }

    fn current_row_marker(&mut self) -> Option<MarkerId> {
        if self.selected_row().is_some() {
            return Some(self.selected_marker);
        }
        self.warn(format!("Marker {} opens the day and has no row", self.selected_marker));
        None
    }

    fn select_row(&mut self, index: usize) {
        if let Some(row) = self.model.rows().get(index) {
            self.selected_marker = row.marker;
        }
    }

    fn step_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Table => {
                let rows = self.model.rows().len();
                if rows == 0 {
                    return;
                }
                let current = self.selected_row().unwrap_or(0);
                let next = current.saturating_add_signed(delta).min(rows - 1);
                self.select_row(next);
            }
            Focus::Bar => {
                let order = self.model.sorted_ids();
                let Some(current) = order.iter().position(|&id| id == self.selected_marker) else {
                    return;
                };
                let next = current.saturating_add_signed(delta).min(order.len() - 1);
                self.selected_marker = order[next];
            }
        }
    }

    fn add_marker(&mut self) {
        match self.model.add_marker() {
            Some(id) => {
                self.selected_marker = id;
                self.info(format!("Added marker {id}"));
            }
            None => self.warn(format!("Maximum of {MAX_MARKERS} markers reached")),
        }
    }

    fn remove_marker(&mut self) {
        match self.model.remove_marker() {
            Some(removed) => {
                if removed.id() == self.selected_marker {
                    if let Some(last) = self.model.markers().last() {
                        self.selected_marker = last.id();
                    }
                }
                if self.editor.as_ref().is_some_and(|e| e.marker == removed.id()) {
                    self.editor = None;
                }
                self.info(format!("Removed marker {}", removed.id()));
            }
            None => self.warn(format!("At least {MIN_MARKERS} markers required")),
        }
    }

    fn nudge(&mut self, delta: f64) {
        let id = self.selected_marker;
        if let Some(position) = self.model.marker(id).map(daybar_engine::Marker::position) {
            self.move_marker(id, position + delta);
        }
    }

    fn move_marker(&mut self, id: MarkerId, position: f64) {
        match self.model.move_marker(id, position) {
            Ok(outcome) if !outcome.cancelled_lunch.is_empty() => {
                self.warn("Lunch break cancelled - marker moved");
            }
            Ok(_) => {}
            Err(e) => self.error(e.to_string()),
        }
    }

    fn toggle_lunch(&mut self, marker: MarkerId) {
        let lunch = *self.model.lunch();
        match self.model.toggle_lunch_break(marker) {
            Ok(LunchToggle::Enabled { start: Some(_), .. }) => self.info(format!(
                "Lunch break {} - {}",
                format_clock(lunch.start_hour),
                format_clock(lunch.end_hour)
            )),
            Ok(LunchToggle::Enabled { start: None, .. }) => {
                self.warn("Lunch break set, no room for a start marker");
            }
            Ok(LunchToggle::Disabled) => self.info("Lunch break removed"),
            Err(e) => self.error(e.to_string()),
        }
    }

    fn toggle_flag(&mut self, marker: MarkerId) {
        match self.model.toggle_flag(marker) {
            Ok(true) => self.info("Row flagged"),
            Ok(false) => self.info("Row unflagged"),
            Err(e) => self.error(e.to_string()),
        }
    }

    fn edit_current(&mut self, field: EditField) {
        if let Some(marker) = self.current_row_marker() {
            self.start_edit(marker, field);
        }
    }

    fn start_edit(&mut self, marker: MarkerId, field: EditField) {
        let Some(existing) = self.model.marker(marker).map(|m| {
            let annotation = m.annotation();
            match field {
                EditField::Problem => annotation.problem.clone(),
                EditField::Solution => annotation.solution.clone(),
            }
        }) else {
            return;
        };
        self.focus = Focus::Table;
        self.selected_marker = marker;
        self.editor = Some(EditorState::new(marker, field, existing));
    }

    fn commit_edit(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        let (marker, field) = (editor.marker, editor.field);
        let text = editor.into_content();
        let result = match field {
            EditField::Problem => self.model.set_problem(marker, text),
            EditField::Solution => self.model.set_solution(marker, text),
        };
        match result {
            Ok(()) => self.info(format!("{} saved", field.label())),
            Err(e) => self.error(e.to_string()),
        }
    }

    /// Copy the rows as tab-separated text.
    pub fn export_to_clipboard(&mut self) {
        let rows = self.model.rows().len();
        let text = self.model.export_tsv();
        match self.clipboard.set_text(&text) {
            Ok(()) => self.info(format!("Copied {rows} rows to clipboard")),
            Err(e) => {
                warn!(error = %e, "Clipboard write failed");
                self.error(format!("Failed to copy data to clipboard: {e}"));
            }
        }
    }

    /// Keep the selected row inside the visible table window.
    fn sync_view(&mut self) {
        let visible = self.layout().visible_rows();
        let rows = self.model.rows().len();
        match self.selected_row() {
            Some(selected) => {
                self.table_offset = keep_visible(self.table_offset, selected, visible);
            }
            None => self.table_offset = self.table_offset.min(rows.saturating_sub(1)),
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.set_message(text, MessageLevel::Info);
    }

    fn warn(&mut self, text: impl Into<String>) {
        self.set_message(text, MessageLevel::Warning);
    }

    fn error(&mut self, text: impl Into<String>) {
        self.set_message(text, MessageLevel::Error);
    }

    fn set_message(&mut self, text: impl Into<String>, level: MessageLevel) {
        self.message = Some(StatusMessage {
            text: text.into(),
            level,
        });
    }
}
