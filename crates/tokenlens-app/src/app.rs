#![forbid(unsafe_code)]

//! Application model: screens, update logic, and chrome rendering.
//!
//! Two screens. The editor holds the text input with its live token count
//! and the saved-texts list; the visualization screen hosts the
//! [`AttentionView`]. All service calls are synchronous and their failures
//! land on the status line — logged, never retried, never fatal.

use tokenlens_client::{ApiClient, Scorer, TextRecord};
use tokenlens_core::attention::AttentionMatrix;
use tokenlens_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use tokenlens_core::geometry::Rect;
use tokenlens_core::token::{TOKEN_BUDGET, check_budget, token_count, tokenize};
use tokenlens_render::Buffer;
use tokenlens_widgets::attention_view::{AttentionView, AttentionViewState};
use tokenlens_widgets::{StatefulWidget, draw_text_span};

use crate::theme::Theme;

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Editor,
    Visualize,
}

/// Which editor pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

/// One open visualization session: the data is replaced wholesale when a
/// new text is visualized and dropped when the session closes.
#[derive(Debug, Clone)]
pub struct Visualization {
    pub tokens: Vec<String>,
    pub attention: AttentionMatrix,
}

/// The application state.
pub struct App {
    pub screen: Screen,
    pub focus: Focus,
    pub input: String,
    /// Record id being edited in the input field, if any.
    pub editing: Option<i64>,
    pub saved: Vec<TextRecord>,
    pub selected_row: usize,
    pub status: Option<String>,
    pub running: bool,
    viz: Option<Visualization>,
    view_state: AttentionViewState,
    theme: Theme,
    client: Option<ApiClient>,
    scorer: Box<dyn Scorer>,
    width: u16,
    height: u16,
}

impl App {
    /// Create the app. `client` is `None` in offline mode, which disables
    /// the saved-texts operations.
    pub fn new(client: Option<ApiClient>, scorer: Box<dyn Scorer>, theme: Theme) -> Self {
        Self {
            screen: Screen::Editor,
            focus: Focus::Input,
            input: String::new(),
            editing: None,
            saved: Vec::new(),
            selected_row: 0,
            status: None,
            running: true,
            viz: None,
            view_state: AttentionViewState::new(),
            theme,
            client,
            scorer,
            width: 0,
            height: 0,
        }
    }

    /// Record the terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// The open visualization, if any.
    pub fn visualization(&self) -> Option<&Visualization> {
        self.viz.as_ref()
    }

    fn viz_area(&self) -> Rect {
        // Title above, hint/status line below.
        Rect::new(0, 1, self.width, self.height.saturating_sub(2))
    }

    /// Route one input event.
    pub fn update(&mut self, event: Event) {
        if let Event::Resize { width, height } = event {
            self.resize(width, height);
            return;
        }
        match self.screen {
            Screen::Editor => self.update_editor(event),
            Screen::Visualize => self.update_visualize(event),
        }
    }

    fn update_editor(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if is_quit(&key) {
            self.running = false;
            return;
        }
        match key.code {
            KeyCode::Escape => {
                if self.editing.is_some() {
                    self.cancel_edit();
                } else {
                    self.running = false;
                }
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::List,
                    Focus::List => Focus::Input,
                };
            }
            _ => match self.focus {
                Focus::Input => self.update_input(&key),
                Focus::List => self.update_list(&key),
            },
        }
    }

    fn update_input(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char('s') if key.ctrl() => self.save_input(),
            KeyCode::Char(c) if !key.ctrl() => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => {
                if self.editing.is_some() {
                    self.submit_edit();
                } else {
                    let text = self.input.clone();
                    self.open_visualization(&text);
                }
            }
            _ => {}
        }
    }

    fn update_list(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_row + 1 < self.saved.len() {
                    self.selected_row += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('v') => {
                if let Some(record) = self.saved.get(self.selected_row) {
                    let text = record.text.clone();
                    self.open_visualization(&text);
                }
            }
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('r') => self.refresh_saved(),
            _ => {}
        }
    }

    fn update_visualize(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if is_quit(&key) {
                self.running = false;
                return;
            }
            if key.code == KeyCode::Escape || key.is_char('q') {
                self.close_visualization();
                return;
            }
        }
        let area = self.viz_area();
        if let Some(viz) = &self.viz {
            let view = attention_view(viz, &self.theme);
            view.handle_event(&mut self.view_state, &event, area);
        }
    }

    /// Score a text and open the visualization screen for it.
    pub fn open_visualization(&mut self, text: &str) {
        if let Err(err) = check_budget(text) {
            self.status = Some(err.to_string());
            return;
        }
        match self.scorer.score(text) {
            Ok(attention) => {
                let tokens = tokenize(text);
                if attention.n() != tokens.len() {
                    tracing::warn!(
                        tokens = tokens.len(),
                        matrix = attention.n(),
                        "scorer returned a mismatched matrix"
                    );
                    self.status = Some("scoring service returned a mismatched matrix".into());
                    return;
                }
                self.viz = Some(Visualization { tokens, attention });
                self.view_state.reset();
                self.screen = Screen::Visualize;
                self.status = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "scoring failed");
                self.status = Some(format!("scoring failed: {err}"));
            }
        }
    }

    /// Close the visualization and drop its data and selection state.
    pub fn close_visualization(&mut self) {
        self.viz = None;
        self.view_state.reset();
        self.screen = Screen::Editor;
    }

    /// Reload the saved-texts list.
    pub fn refresh_saved(&mut self) {
        let Some(client) = &self.client else {
            self.status = Some("offline: saved texts unavailable".into());
            return;
        };
        match client.list_texts() {
            Ok(records) => {
                self.saved = records;
                self.selected_row = self.selected_row.min(self.saved.len().saturating_sub(1));
            }
            Err(err) => {
                tracing::warn!(error = %err, "listing texts failed");
                self.status = Some(format!("loading saved texts failed: {err}"));
            }
        }
    }

    fn save_input(&mut self) {
        if let Err(err) = check_budget(&self.input) {
            self.status = Some(err.to_string());
            return;
        }
        let Some(client) = &self.client else {
            self.status = Some("offline: cannot save".into());
            return;
        };
        match client.create_text(&self.input) {
            Ok(record) => {
                self.status = Some(format!("saved as #{}", record.id));
                self.input.clear();
                self.refresh_saved();
            }
            Err(err) => {
                tracing::warn!(error = %err, "saving failed");
                self.status = Some(format!("saving failed: {err}"));
            }
        }
    }

    fn begin_edit(&mut self) {
        if let Some(record) = self.saved.get(self.selected_row) {
            self.editing = Some(record.id);
            self.input = record.text.clone();
            self.focus = Focus::Input;
            self.status = Some("editing — Enter to update, Esc to cancel".into());
        }
    }

    fn cancel_edit(&mut self) {
        self.editing = None;
        self.input.clear();
        self.status = None;
    }

    fn submit_edit(&mut self) {
        if let Err(err) = check_budget(&self.input) {
            self.status = Some(err.to_string());
            return;
        }
        let Some(id) = self.editing else { return };
        let Some(client) = &self.client else {
            self.status = Some("offline: cannot update".into());
            return;
        };
        match client.update_text(id, &self.input) {
            Ok(_) => {
                self.status = Some(format!("updated #{id}"));
                self.editing = None;
                self.input.clear();
                self.refresh_saved();
            }
            Err(err) => {
                tracing::warn!(error = %err, id, "updating failed");
                self.status = Some(format!("updating failed: {err}"));
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(record) = self.saved.get(self.selected_row) else {
            return;
        };
        let id = record.id;
        let Some(client) = &self.client else {
            self.status = Some("offline: cannot delete".into());
            return;
        };
        match client.delete_text(id) {
            Ok(()) => {
                self.status = Some(format!("deleted #{id}"));
                self.refresh_saved();
            }
            Err(err) => {
                tracing::warn!(error = %err, id, "deleting failed");
                self.status = Some(format!("deleting failed: {err}"));
            }
        }
    }

    /// Render the active screen.
    pub fn render(&mut self, buf: &mut Buffer) {
        match self.screen {
            Screen::Editor => self.render_editor(buf),
            Screen::Visualize => {
                let area = self.viz_area();
                draw_text_span(buf, 1, 0, "tokenlens", self.theme.title, self.width);
                if let Some(viz) = &self.viz {
                    let view = attention_view(viz, &self.theme);
                    view.render(area, buf, &mut self.view_state);
                }
                let hint = "hover a token for its edges · click for scores · Esc to close";
                self.draw_bottom_line(buf, hint);
            }
        }
    }

    fn render_editor(&self, buf: &mut Buffer) {
        let w = self.width;
        let theme = &self.theme;
        draw_text_span(buf, 1, 0, "tokenlens — self-attention visualizer", theme.title, w);

        let prompt = if self.editing.is_some() { "Edit: " } else { "Text: " };
        let end = draw_text_span(buf, 1, 2, prompt, theme.hint, w);
        let end = draw_text_span(buf, end, 2, &self.input, theme.input, w);
        if self.focus == Focus::Input {
            draw_text_span(buf, end, 2, "▏", theme.input, w);
        }

        let count = token_count(&self.input);
        let counter_style = if count > TOKEN_BUDGET {
            theme.status
        } else {
            theme.hint
        };
        let counter = format!("Tokens: {count} / {TOKEN_BUDGET}");
        draw_text_span(buf, 1, 3, &counter, counter_style, w);

        draw_text_span(buf, 1, 5, "Saved texts", theme.title, w);
        if self.saved.is_empty() {
            draw_text_span(buf, 3, 6, "No saved texts yet.", theme.hint, w);
        }
        let list_bottom = self.height.saturating_sub(2);
        for (index, record) in self.saved.iter().enumerate() {
            let y = 6 + index as u16;
            if y >= list_bottom {
                break;
            }
            let style = if self.focus == Focus::List && index == self.selected_row {
                theme.list_selected
            } else {
                theme.input
            };
            let line = format!("{:>4} │ {}", record.id, record.text);
            draw_text_span(buf, 3, y, &line, style, w);
        }

        let hint = match self.focus {
            Focus::Input => "Enter: visualize · Ctrl+S: save · Tab: list · Esc: quit",
            Focus::List => "Enter/v: view · e: edit · d: delete · r: refresh · Tab: input",
        };
        self.draw_bottom_line(buf, hint);
    }

    fn draw_bottom_line(&self, buf: &mut Buffer, hint: &str) {
        let y = self.height.saturating_sub(1);
        match &self.status {
            Some(status) => {
                draw_text_span(buf, 1, y, status, self.theme.status, self.width);
            }
            None => {
                draw_text_span(buf, 1, y, hint, self.theme.hint, self.width);
            }
        }
    }
}

fn attention_view<'a>(viz: &'a Visualization, theme: &Theme) -> AttentionView<'a> {
    AttentionView::new(&viz.tokens, &viz.attention)
        .edge_hue(theme.edge_hue)
        .token_style(theme.token)
        .hover_style(theme.token_hover)
        .selected_style(theme.token_selected)
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(Modifiers::CTRL)
}
