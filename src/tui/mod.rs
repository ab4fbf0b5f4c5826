//! Ratatui-based terminal lab.
//!
//! Left: scatter of the dataset with the current line. Right: parameter
//! sliders, live metrics and a scrollable panel holding either the last AI
//! analysis or the knowledge base. A modal dialog edits the AI settings.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ai::{AnalysisClient, AnalysisError, AnalysisJobs, AnalysisOutcome, AnalysisRequest, AnalysisService};
use crate::ai::provider::{ModelId, Provider};
use crate::app::RegressionState;
use crate::data::{Dataset, X_LABEL, Y_LABEL};
use crate::domain::FitParameters;
use crate::error::AppError;
use crate::report::{format_equation, metric_rows};
use crate::settings::{AiSettings, KeyValueStore, mask_key};

mod knowledge;
mod plotters_chart;
pub mod view;

use knowledge::TOPICS;
use plotters_chart::RegressionChart;
use view::{ChartView, INTERCEPT_SLIDER, SLOPE_SLIDER, SliderSpec, clip_segment};

/// Multiplier applied to the step for `[` / `]`.
const COARSE_STEPS: i32 = 10;
const SCROLL_LINES: u16 = 5;

/// Start the terminal lab.
pub fn run(initial: FitParameters, store: Box<dyn KeyValueStore>) -> Result<(), AppError> {
    let service: Arc<dyn AnalysisService> = Arc::new(AnalysisClient::new()?);
    let mut app = App::new(initial, store, service);

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Slope,
    Intercept,
}

impl Param {
    fn spec(self) -> SliderSpec {
        match self {
            Param::Slope => SLOPE_SLIDER,
            Param::Intercept => INTERCEPT_SLIDER,
        }
    }

    fn value(self, params: FitParameters) -> f64 {
        match self {
            Param::Slope => params.slope,
            Param::Intercept => params.intercept,
        }
    }

    fn with(self, params: FitParameters, value: f64) -> FitParameters {
        match self {
            Param::Slope => FitParameters::new(value, params.intercept),
            Param::Intercept => FitParameters::new(params.slope, value),
        }
    }
}

/// What the right-hand text panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Analysis,
    Knowledge(usize),
}

#[derive(Debug, Clone, PartialEq)]
enum AnalysisView {
    Empty,
    Pending(Provider),
    Report(String),
    Failed(AnalysisError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogField {
    Provider,
    Model,
    Key,
}

impl DialogField {
    fn next(self) -> Self {
        match self {
            DialogField::Provider => DialogField::Model,
            DialogField::Model => DialogField::Key,
            DialogField::Key => DialogField::Provider,
        }
    }

    fn prev(self) -> Self {
        match self {
            DialogField::Provider => DialogField::Key,
            DialogField::Model => DialogField::Provider,
            DialogField::Key => DialogField::Model,
        }
    }
}

#[derive(Debug, Clone)]
struct SettingsDialog {
    provider: Provider,
    model: ModelId,
    key_input: String,
    field: DialogField,
    notice: Option<String>,
}

impl SettingsDialog {
    fn new(current: Option<&AiSettings>, notice: Option<String>) -> Self {
        match current {
            Some(s) => Self {
                provider: s.provider(),
                model: s.model(),
                key_input: s.api_key().to_string(),
                field: DialogField::Key,
                notice,
            },
            None => Self {
                provider: Provider::Gemini,
                model: Provider::Gemini.default_model(),
                key_input: String::new(),
                field: DialogField::Key,
                notice,
            },
        }
    }

    /// Switching provider selects its first model and drops the typed key.
    fn cycle_provider(&mut self) {
        self.provider = self.provider.next();
        self.model = self.provider.default_model();
        self.key_input.clear();
    }
}

struct App {
    state: RegressionState,
    view: ChartView,
    selected: Param,
    show_residuals: bool,
    store: Box<dyn KeyValueStore>,
    settings: Option<AiSettings>,
    dialog: Option<SettingsDialog>,
    panel: Panel,
    analysis: AnalysisView,
    scroll: u16,
    jobs: AnalysisJobs,
    status: String,
}

impl App {
    fn new(initial: FitParameters, store: Box<dyn KeyValueStore>, service: Arc<dyn AnalysisService>) -> Self {
        let (settings, status) = match AiSettings::load(store.as_ref()) {
            Ok(Some(s)) => {
                let status = format!("{} ready.", s.provider().display_name());
                (Some(s), status)
            }
            Ok(None) => (None, "Press s to configure AI analysis.".to_string()),
            Err(e) => {
                warn!("ignoring unreadable settings: {e}");
                (None, format!("Settings unreadable: {e}"))
            }
        };

        Self {
            state: RegressionState::new(Dataset::galton(), initial),
            view: ChartView::default(),
            selected: Param::Slope,
            show_residuals: false,
            store,
            settings,
            dialog: None,
            panel: Panel::Analysis,
            analysis: AnalysisView::Empty,
            scroll: 0,
            jobs: AnalysisJobs::new(service),
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                needs_redraw = self.poll_analysis();
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    self.poll_analysis();
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

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.dialog.is_some() {
            self.handle_dialog_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.selected = Param::Slope,
            KeyCode::Down => self.selected = Param::Intercept,
            KeyCode::Left => self.step(-1),
            KeyCode::Right => self.step(1),
            KeyCode::Char('[') => self.step(-COARSE_STEPS),
            KeyCode::Char(']') => self.step(COARSE_STEPS),
            KeyCode::Char('a') => match self.state.auto_fit() {
                Ok(fit) => self.status = format!("Least-squares fit: {}", format_equation(fit)),
                Err(e) => self.status = e.to_string(),
            },
            KeyCode::Char('+') | KeyCode::Char('=') => self.view.zoom_in(),
            KeyCode::Char('-') => self.view.zoom_out(),
            KeyCode::Char('h') => self.view.pan(-1.0, 0.0),
            KeyCode::Char('l') => self.view.pan(1.0, 0.0),
            KeyCode::Char('j') => self.view.pan(0.0, -1.0),
            KeyCode::Char('k') => self.view.pan(0.0, 1.0),
            KeyCode::Char('0') => self.view.reset(),
            KeyCode::Char('r') => {
                self.show_residuals = !self.show_residuals;
                self.status = if self.show_residuals {
                    "Showing residuals.".to_string()
                } else {
                    "Residuals hidden.".to_string()
                };
            }
            KeyCode::Char('i') => self.request_analysis(),
            KeyCode::Char('s') => self.dialog = Some(SettingsDialog::new(self.settings.as_ref(), None)),
            KeyCode::Char('c') => {
                self.status = match self.clear_settings() {
                    Ok(()) => "AI settings cleared.".to_string(),
                    Err(e) => format!("Failed to clear AI settings: {e}"),
                };
            }
            KeyCode::Char('b') => {
                self.panel = match self.panel {
                    Panel::Analysis => Panel::Knowledge(0),
                    Panel::Knowledge(_) => Panel::Analysis,
                };
                self.scroll = 0;
            }
            KeyCode::Tab => {
                if let Panel::Knowledge(i) = self.panel {
                    self.panel = Panel::Knowledge((i + 1) % TOPICS.len());
                    self.scroll = 0;
                }
            }
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(SCROLL_LINES),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(SCROLL_LINES),
            _ => {}
        }
        false
    }

    fn step(&mut self, steps: i32) {
        let params = self.state.parameters();
        let spec = self.selected.spec();
        let value = spec.step_by(self.selected.value(params), steps);
        self.state.set_parameters(self.selected.with(params, value));
    }

    fn handle_dialog_key(&mut self, code: KeyCode) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };

        match code {
            KeyCode::Esc => {
                self.dialog = None;
                self.status = "Settings unchanged.".to_string();
            }
            KeyCode::Enter => self.submit_dialog(),
            KeyCode::Tab | KeyCode::Down => dialog.field = dialog.field.next(),
            KeyCode::BackTab | KeyCode::Up => dialog.field = dialog.field.prev(),
            KeyCode::Left | KeyCode::Right => match dialog.field {
                DialogField::Provider => dialog.cycle_provider(),
                DialogField::Model => dialog.model = dialog.model.next_for_provider(),
                DialogField::Key => {}
            },
            KeyCode::Backspace if dialog.field == DialogField::Key => {
                dialog.key_input.pop();
            }
            KeyCode::Char(c) if dialog.field == DialogField::Key && !c.is_control() => {
                dialog.key_input.push(c);
            }
            _ => {}
        }
    }

    fn submit_dialog(&mut self) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };

        let settings = match AiSettings::new(&dialog.key_input, dialog.provider, Some(dialog.model)) {
            Ok(s) => s,
            Err(e) => {
                dialog.notice = Some(e.to_string());
                return;
            }
        };
        if let Err(e) = settings.save(self.store.as_mut()) {
            dialog.notice = Some(e.to_string());
            return;
        }

        self.status = format!(
            "Saved {} / {}.",
            settings.provider().display_name(),
            settings.model().id()
        );
        self.settings = Some(settings);
        self.dialog = None;
    }

    /// Forget the in-memory settings and remove them from the store.
    fn clear_settings(&mut self) -> Result<(), AppError> {
        self.settings = None;
        AiSettings::clear(self.store.as_mut()).inspect_err(|e| warn!("failed to clear settings: {e}"))
    }

    fn request_analysis(&mut self) {
        let Some(settings) = &self.settings else {
            self.dialog = Some(SettingsDialog::new(
                None,
                Some("Configure an API key to request an analysis.".to_string()),
            ));
            return;
        };

        let request = AnalysisRequest {
            params: self.state.parameters(),
            metrics: self.state.metrics(),
            dataset: self.state.dataset().clone(),
            provider: settings.provider(),
            model: settings.model(),
            api_key: settings.api_key().to_string(),
        };
        let provider = request.provider;
        self.jobs.submit(request);
        self.analysis = AnalysisView::Pending(provider);
        self.panel = Panel::Analysis;
        self.scroll = 0;
        self.status = format!("Asking {}...", provider.display_name());
    }

    /// Apply a finished analysis, if any. Returns `true` when something changed.
    fn poll_analysis(&mut self) -> bool {
        match self.jobs.poll() {
            Some(outcome) => {
                self.apply_outcome(outcome);
                true
            }
            None => false,
        }
    }

    fn apply_outcome(&mut self, outcome: AnalysisOutcome) {
        self.scroll = 0;
        match outcome {
            Ok(report) => {
                self.analysis = AnalysisView::Report(report);
                self.status = "Analysis ready.".to_string();
            }
            Err(err) => {
                self.status = match &err {
                    AnalysisError::Credential(_) => {
                        let cleared = self.clear_settings();
                        self.dialog = Some(SettingsDialog::new(
                            None,
                            Some("API key invalid or expired. Please enter a new key.".to_string()),
                        ));
                        match cleared {
                            Ok(()) => "API key invalid or expired; settings cleared.".to_string(),
                            Err(e) => format!("API key invalid or expired; failed to clear settings: {e}"),
                        }
                    }
                    AnalysisError::Quota(_) => "API quota exhausted. Try again later or switch model.".to_string(),
                    AnalysisError::Network(_) => "Network connection failed. Check your connection.".to_string(),
                    AnalysisError::Unclassified(raw) => raw.clone(),
                };
                self.analysis = AnalysisView::Failed(err);
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if let Some(dialog) = &self.dialog {
            draw_dialog(frame, size, dialog);
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let badge = match &self.settings {
            Some(s) => Span::styled(
                format!("{} READY", s.provider().short_name()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("AI not configured", Style::default().fg(Color::DarkGray)),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("reglab", Style::default().fg(Color::Cyan)),
                Span::raw(" | Galton parent/child heights | "),
                badge,
            ]),
            Line::from(Span::styled(
                format!(
                    "{} | n={}",
                    format_equation(self.state.parameters()),
                    self.state.dataset().len()
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(area);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Length(8), Constraint::Min(0)])
            .split(columns[1]);

        self.draw_chart(frame, columns[0]);
        self.draw_controls(frame, right[0]);
        self.draw_metrics(frame, right[1]);
        self.draw_panel(frame, right[2]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Parent vs child height").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let series = chart_series(&self.state, &self.view, self.show_residuals);
        let (chart_rect, insets) = chart_layout(inner);
        let widget = RegressionChart {
            points: &series.points,
            line: series.line,
            residuals: &series.residuals,
            x_bounds: self.view.x,
            y_bounds: self.view.y,
            x_label: X_LABEL,
            y_label: Y_LABEL,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, self.view.x, self.view.y);
        }
    }

    fn draw_controls(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let params = self.state.parameters();
        let bar_width = usize::from(area.width.saturating_sub(26));

        let mut lines = Vec::new();
        for param in [Param::Slope, Param::Intercept] {
            let spec = param.spec();
            let value = param.value(params);
            let selected = param == self.selected;
            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{} {:<9} {:>8.4} {}",
                    if selected { "»" } else { " " },
                    spec.label,
                    value,
                    spec.bar(value, bar_width)
                ),
                style,
            )));
        }
        lines.push(Line::from(Span::styled(
            "a: least-squares fit   r: residuals",
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().title("Line").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_metrics(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let metrics = self.state.metrics();
        let lines: Vec<Line> = metric_rows(&metrics)
            .into_iter()
            .map(|(label, value)| Line::from(format!("{label:<12}{value:>12.4}")))
            .collect();

        let p = Paragraph::new(Text::from(lines)).block(Block::default().title("Metrics").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (title, text) = match self.panel {
            Panel::Knowledge(i) => {
                let topic = &TOPICS[i];
                (
                    format!("Knowledge {}/{}: {}", i + 1, TOPICS.len(), topic.title),
                    Text::from(topic.body),
                )
            }
            Panel::Analysis => ("AI analysis".to_string(), self.analysis_text()),
        };

        let p = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn analysis_text(&self) -> Text<'_> {
        match &self.analysis {
            AnalysisView::Empty => Text::styled(
                "Press i to ask the configured model for an analysis of the current line.",
                Style::default().fg(Color::Gray),
            ),
            AnalysisView::Pending(provider) => Text::styled(
                format!("Waiting for {}...", provider.display_name()),
                Style::default().fg(Color::Yellow),
            ),
            AnalysisView::Report(report) => Text::from(report.as_str()),
            AnalysisView::Failed(err) => Text::from(vec![
                Line::from(Span::styled(
                    err.label(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(err.message()),
            ]),
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ param  ←/→ step  [/] x10  a fit  +/- zoom  hjkl pan  0 view  i analyze  s settings  c clear  b notes  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_dialog(frame: &mut ratatui::Frame<'_>, area: Rect, dialog: &SettingsDialog) {
    let rect = centered_rect(area, 64, 12);
    frame.render_widget(Clear, rect);

    let field_style = |field: DialogField| {
        if dialog.field == field {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default()
        }
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Provider: < {} >", dialog.provider.display_name()),
            field_style(DialogField::Provider),
        )),
        Line::from(Span::styled(
            format!("Model:    < {} >", dialog.model.id()),
            field_style(DialogField::Model),
        )),
        Line::from(Span::styled(
            format!("API key:  {}_", mask_key(&dialog.key_input)),
            field_style(DialogField::Key),
        )),
        Line::from(Span::styled(
            format!("          {}", dialog.provider.key_format_hint()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    if let Some(notice) = &dialog.notice {
        lines.push(Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tab field  ←/→ change  Enter save  Esc cancel",
        Style::default().fg(Color::Gray),
    )));

    let p = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("AI settings").borders(Borders::ALL));
    frame.render_widget(p, rect);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

struct ChartSeries {
    points: Vec<(f64, f64)>,
    line: Option<[(f64, f64); 2]>,
    residuals: Vec<[(f64, f64); 2]>,
}

/// Points inside the view, the clipped line and (optionally) clipped residual segments.
fn chart_series(state: &RegressionState, view: &ChartView, with_residuals: bool) -> ChartSeries {
    let params = state.parameters();
    let points = state
        .dataset()
        .points()
        .iter()
        .filter(|p| view.contains(p.x, p.y))
        .map(|p| (p.x, p.y))
        .collect();

    let residuals = if with_residuals {
        state
            .residuals()
            .iter()
            .filter_map(|r| clip_segment((r.point.x, r.point.y), (r.point.x, r.fitted), view))
            .collect()
    } else {
        Vec::new()
    };

    ChartSeries {
        points,
        line: view.line_segment(params),
        residuals,
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 6,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{x_val:.1}");
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.0}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(X_LABEL)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(Y_LABEL).style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: chart.x,
        y: inner.y,
        width: chart.width,
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
