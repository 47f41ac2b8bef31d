//! Interactive terminal dashboard.
//!
//! Layout, top to bottom: title bar, KPI row with the state selector, a 2x2
//! chart grid (products, months, channels, issues) and the footer. A side
//! panel listing every state is collapsed until `s` is pressed.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset as ChartSeries,
    GraphType, List, ListItem, ListState, Paragraph,
};
use ratatui::{Frame, Terminal};

use crate::aggregation::{CategoryTotal, DashboardView, IssueGroup, MonthTotal, StateFilter};
use crate::config::{DASHBOARD_TITLE, EVENT_POLL_MS, FOOTER_TEXT};
use crate::models::Dataset;

use super::format::{format_compact, format_number, truncate_label};
use super::layout::{layout_issue_tree, pie_slices, polar_point, slice_share, Area, Insets};


const ACCENT: Color = Color::Rgb(99, 110, 250);
const SIDE_PANEL_WIDTH: u16 = 26;

/// Series colors, reused cyclically.
const PALETTE: [Color; 8] = [
    Color::Rgb(99, 110, 250),
    Color::Rgb(239, 85, 59),
    Color::Rgb(0, 204, 150),
    Color::Rgb(171, 99, 250),
    Color::Rgb(255, 161, 90),
    Color::Rgb(25, 211, 243),
    Color::Rgb(255, 102, 146),
    Color::Rgb(182, 232, 128),
];


/// Dashboard state: the loaded table, the selector and the current view.
pub struct App<'a> {
    dataset: &'a Dataset,
    source: String,
    options: Vec<StateFilter>,
    selected: usize,
    view: DashboardView,
    side_panel_open: bool,
    panel_cursor: usize,
    should_quit: bool,
}


impl<'a> App<'a> {
    /// Compute the initial view. Fails on an unknown state or a bad date column.
    pub fn new(
        dataset: &'a Dataset,
        initial: StateFilter,
        source: impl Into<String>,
    ) -> crate::error::Result<Self> {
        let view = DashboardView::compute(dataset, &initial)?;
        let options = DashboardView::options(dataset);
        let selected = options.iter().position(|o| *o == initial).unwrap_or(0);

        Ok(Self {
            dataset,
            source: source.into(),
            options,
            selected,
            view,
            side_panel_open: false,
            panel_cursor: selected,
            should_quit: false,
        })
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn selection(&self) -> &StateFilter {
        &self.options[self.selected]
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn side_panel_open(&self) -> bool {
        self.side_panel_open
    }

    /// Switch to the option at `index` and recompute the view.
    pub fn select(&mut self, index: usize) -> crate::error::Result<()> {
        if index >= self.options.len() || index == self.selected {
            return Ok(());
        }

        self.view = DashboardView::compute(self.dataset, &self.options[index])?;
        self.selected = index;
        self.panel_cursor = index;
        Ok(())
    }

    pub fn next_state(&mut self) -> crate::error::Result<()> {
        let len = self.options.len();
        self.select((self.selected + 1) % len)
    }

    pub fn previous_state(&mut self) -> crate::error::Result<()> {
        let len = self.options.len();
        self.select((self.selected + len - 1) % len)
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> crate::error::Result<()> {
        let len = self.options.len();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc if self.side_panel_open => self.side_panel_open = false,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('l') => self.next_state()?,
            KeyCode::Left | KeyCode::Char('h') => self.previous_state()?,
            KeyCode::Char('s') => {
                self.side_panel_open = !self.side_panel_open;
                self.panel_cursor = self.selected;
            }
            KeyCode::Down | KeyCode::Char('j') if self.side_panel_open => {
                self.panel_cursor = (self.panel_cursor + 1) % len;
            }
            KeyCode::Up | KeyCode::Char('k') if self.side_panel_open => {
                self.panel_cursor = (self.panel_cursor + len - 1) % len;
            }
            KeyCode::Enter if self.side_panel_open => self.select(self.panel_cursor)?,
            _ => {}
        }

        Ok(())
    }
}


/// Run the dashboard until the user quits.
pub fn run_dashboard(dataset: &Dataset, initial: StateFilter, source: &str) -> Result<()> {
    let mut app = App::new(dataset, initial, source)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}


fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }
    }

    Ok(())
}


/// Draw one frame.
pub fn draw(f: &mut Frame, app: &App) {
    let mut area = f.area();

    if app.side_panel_open() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDE_PANEL_WIDTH), Constraint::Min(0)])
            .split(area);
        render_side_panel(f, columns[0], app);
        area = columns[1];
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(5), // KPI row
            Constraint::Min(0),    // Charts
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(f, rows[0], app);
    render_kpi_row(f, rows[1], app);
    render_charts(f, rows[2], app.view());
    render_footer(f, rows[3]);
}


fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![Span::styled(
        DASHBOARD_TITLE,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )]);
    let subtitle = Line::from(Span::styled(
        format!(
            "{} · {} rows · {} complaints",
            app.source,
            format_number(app.dataset.len() as u64),
            app.dataset
                .total_count()
                .map(format_number)
                .unwrap_or_else(|_| "n/a".to_string()),
        ),
        Style::default().add_modifier(Modifier::DIM),
    ));

    let header = Paragraph::new(vec![title, subtitle])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}


fn render_kpi_row(f: &mut Frame, area: Rect, app: &App) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let kpis = &app.view().kpis;
    let value_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    render_metric(f, cells[0], "Total Complaints", format_number(kpis.total), value_style, None);
    render_metric(f, cells[1], "Closed Complaints", format_number(kpis.closed), value_style, None);

    match kpis.timely_percentage() {
        Ok(pct) => render_metric(
            f,
            cells[2],
            "% Timely Responded",
            format!("{pct:.2}%"),
            value_style,
            None,
        ),
        Err(_) => render_metric(
            f,
            cells[2],
            "% Timely Responded",
            "n/a".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Some("no complaints in selection"),
        ),
    }

    render_metric(f, cells[3], "In Progress Complaints", format_number(kpis.in_progress), value_style, None);
    render_selector(f, cells[4], app);
}


fn render_metric(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    style: Style,
    note: Option<&str>,
) {
    let mut lines = vec![Line::from(Span::styled(value, style))];
    if let Some(note) = note {
        lines.push(Line::from(Span::styled(
            note.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
        )));
    }

    let card = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(card, area);
}


fn render_selector(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(ACCENT)),
        Span::styled(
            app.selection().label().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(ACCENT)),
    ]);
    let hint = Line::from(Span::styled(
        format!("{} of {}", app.selected + 1, app.options.len()),
        Style::default().add_modifier(Modifier::DIM),
    ));

    let selector = Paragraph::new(vec![line, hint]).alignment(Alignment::Center).block(
        Block::default()
            .title("Select State Filter")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(selector, area);
}


fn render_side_panel(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = if i == app.selected {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(option.label().to_string(), style))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("States")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.panel_cursor));
    f.render_stateful_widget(list, area, &mut state);
}


fn render_charts(f: &mut Frame, area: Rect, view: &DashboardView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_product_chart(f, top[0], &view.charts.by_product);
    render_month_chart(f, top[1], &view.charts.by_month);
    render_channel_chart(f, bottom[0], &view.charts.by_channel);
    render_issue_treemap(f, bottom[1], &view.charts.by_issue);
}


fn chart_block(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}


fn render_empty(f: &mut Frame, area: Rect, block: Block, message: &str) {
    let paragraph = Paragraph::new(Span::styled(
        message.to_string(),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(paragraph, area);
}


/// Horizontal bars, one per product.
fn render_product_chart(f: &mut Frame, area: Rect, totals: &[CategoryTotal]) {
    let block = chart_block("Number of Complaints by Product");
    if totals.is_empty() {
        render_empty(f, area, block, "No product data");
        return;
    }

    let bars: Vec<Bar> = totals
        .iter()
        .map(|t| {
            Bar::default()
                .value(t.count)
                .label(Line::from(truncate_label(&t.label, 22)))
                .text_value(format_compact(t.count))
                .style(Style::default().fg(ACCENT))
                .value_style(Style::default().fg(Color::White).bg(ACCENT))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}


/// Line with point markers over the monthly totals.
fn render_month_chart(f: &mut Frame, area: Rect, months: &[MonthTotal]) {
    let block = chart_block("Number of Complaints Over Time (Month Year)");
    if months.is_empty() {
        render_empty(f, area, block, "No dated complaints");
        return;
    }

    let points: Vec<(f64, f64)> = months
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.count as f64))
        .collect();
    let max_count = months.iter().map(|m| m.count).max().unwrap_or(0).max(1);
    let last = (months.len() - 1).max(1) as f64;

    let series = vec![
        ChartSeries::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(ACCENT))
            .data(&points),
        ChartSeries::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White))
            .data(&points),
    ];

    let first_label = months[0].month.format("%b %Y").to_string();
    let last_label = months[months.len() - 1].month.format("%b %Y").to_string();

    let chart = Chart::new(series)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([0.0, last])
                .labels(vec![Span::raw(first_label), Span::raw(last_label)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([0.0, max_count as f64 * 1.1])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format_compact(max_count / 2)),
                    Span::raw(format_compact(max_count)),
                ]),
        );
    f.render_widget(chart, area);
}


/// Pie of submission channels with a percentage legend.
fn render_channel_chart(f: &mut Frame, area: Rect, totals: &[CategoryTotal]) {
    let block = chart_block("Number of Complaints by Submitted Via Channel");
    if totals.is_empty() {
        render_empty(f, area, block, "No channel data");
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let counts: Vec<u64> = totals.iter().map(|t| t.count).collect();
    let slices = pie_slices(&counts);
    let sectors: Vec<(Vec<(f64, f64)>, Color)> = slices
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| (sector_points(start, end), PALETTE[i % PALETTE.len()]))
        .collect();

    // Braille dots are roughly square, so match the bounds to the dot grid
    let dots_wide = halves[0].width.max(1) as f64 * 2.0;
    let dots_high = halves[0].height.max(1) as f64 * 4.0;
    let (x_span, y_span) = if dots_wide >= dots_high {
        (dots_wide / dots_high, 1.0)
    } else {
        (1.0, dots_high / dots_wide)
    };

    let pie = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_span, x_span])
        .y_bounds([-y_span, y_span])
        .paint(|ctx| {
            for (coords, color) in &sectors {
                ctx.draw(&Points { coords, color: *color });
            }
        });
    f.render_widget(pie, halves[0]);

    let legend: Vec<Line> = totals
        .iter()
        .zip(&slices)
        .enumerate()
        .map(|(i, (t, (start, end)))| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(PALETTE[i % PALETTE.len()])),
                Span::raw(truncate_label(&t.label, 16)),
                Span::styled(
                    format!(" {:.1}%", slice_share(*start, *end)),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(legend), halves[1]);
}


/// Sample points filling one pie sector of the unit circle.
fn sector_points(start: f64, end: f64) -> Vec<(f64, f64)> {
    const RADIAL_STEP: f64 = 0.03;
    const ANGULAR_STEP: f64 = 0.015;

    let mut points = Vec::new();
    let mut radius = RADIAL_STEP;
    while radius <= 1.0 {
        let mut angle = start;
        while angle < end {
            points.push(polar_point(0.0, 0.0, radius, angle));
            angle += ANGULAR_STEP;
        }
        radius += RADIAL_STEP;
    }
    points
}


/// Two-level treemap: bordered issue tiles holding filled sub-issue tiles.
fn render_issue_treemap(f: &mut Frame, area: Rect, groups: &[IssueGroup]) {
    let block = chart_block("Number of Complaints by Issue and Sub-Issue");
    if groups.is_empty() {
        render_empty(f, area, block, "No issue data");
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let bounds = Area::new(
        inner.x as f64,
        inner.y as f64,
        inner.width as f64,
        inner.height as f64,
    );

    for tile in layout_issue_tree(groups, bounds, Insets::uniform(1.0)) {
        let rect = to_cell_rect(tile.area);
        if rect.width < 3 || rect.height < 2 {
            continue;
        }

        let group = &groups[tile.issue];
        let color = PALETTE[tile.issue % PALETTE.len()];
        let issue_block = Block::default()
            .title(truncate_label(&group.issue, rect.width.saturating_sub(2) as usize))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        f.render_widget(issue_block, rect);

        for (j, (child, sub)) in tile.children.iter().zip(&group.sub_issues).enumerate() {
            let cell = to_cell_rect(*child);
            if cell.width == 0 || cell.height == 0 {
                continue;
            }
            let shade = PALETTE[(tile.issue + j) % PALETTE.len()];
            let label = format!("{} {}", sub.label, format_compact(sub.count));
            let leaf = Paragraph::new(truncate_label(&label, cell.width as usize))
                .style(Style::default().bg(shade).fg(Color::Black));
            f.render_widget(leaf, cell);
        }
    }
}


/// Snap a layout area to whole terminal cells.
fn to_cell_rect(area: Area) -> Rect {
    let x0 = area.x.round().max(0.0);
    let y0 = area.y.round().max(0.0);
    let x1 = (area.x + area.width).round().max(x0);
    let y1 = (area.y + area.height).round().max(y0);

    Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16)
}


fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled(FOOTER_TEXT, Style::default().add_modifier(Modifier::DIM)),
        Span::raw("   "),
        Span::styled("←/→", Style::default().fg(ACCENT)),
        Span::raw(" state  "),
        Span::styled("s", Style::default().fg(ACCENT)),
        Span::raw(" state list  "),
        Span::styled("q", Style::default().fg(ACCENT)),
        Span::raw(" quit"),
    ]);
    f.render_widget(Paragraph::new(footer), area);
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComplaintRecord;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn row(state: &str, response: &str, timely: &str, count: u64) -> ComplaintRecord {
        ComplaintRecord {
            state: state.to_string(),
            company_response: response.to_string(),
            timely: timely.to_string(),
            product: "Mortgage".to_string(),
            submitted_via: "Web".to_string(),
            issue: "Escrow".to_string(),
            sub_issue: "Late".to_string(),
            month_year: "01/03/2023".to_string(),
            count,
            line: 2,
        }
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            row("CA", "Closed with explanation", "Yes", 5),
            row("CA", "In Progress", "No", 3),
            row("NY", "Closed", "Yes", 2),
        ])
    }

    #[test]
    fn test_cycle_states() {
        let data = sample();
        let mut app = App::new(&data, StateFilter::All, "test").unwrap();
        assert_eq!(app.view().kpis.total, 10);

        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.selection().label(), "CA");
        assert_eq!(app.view().kpis.total, 8);
        assert_eq!(app.view().kpis.closed, 5);
        assert_eq!(app.view().kpis.in_progress, 3);

        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.selection(), &StateFilter::All);

        app.handle_key(key(KeyCode::Left)).unwrap();
        assert_eq!(app.selection().label(), "NY");
        assert_eq!(app.view().kpis.total, 2);
    }

    #[test]
    fn test_side_panel_selection() {
        let data = sample();
        let mut app = App::new(&data, StateFilter::All, "test").unwrap();
        assert!(!app.side_panel_open());

        app.handle_key(key(KeyCode::Char('s'))).unwrap();
        assert!(app.side_panel_open());

        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(app.selection(), &StateFilter::All);

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.selection().label(), "NY");

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(!app.side_panel_open());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_quit_keys() {
        let data = sample();
        let mut app = App::new(&data, StateFilter::All, "test").unwrap();
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit());

        let mut app = App::new(&data, StateFilter::All, "test").unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_charts_unchanged_by_selection() {
        let data = sample();
        let mut app = App::new(&data, StateFilter::All, "test").unwrap();
        let before = app.view().charts.clone();
        app.next_state().unwrap();
        assert_eq!(app.view().charts, before);
    }

    #[test]
    fn test_unknown_initial_state() {
        let data = sample();
        assert!(App::new(&data, StateFilter::State("WA".to_string()), "test").is_err());
    }

    #[test]
    fn test_draw_frame() {
        let data = sample();
        let mut app = App::new(&data, StateFilter::State("CA".to_string()), "fixture").unwrap();
        app.handle_key(key(KeyCode::Char('s'))).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Consumer Financial Complaints Dashboard"));
        assert!(text.contains("Total Complaints"));
        assert!(text.contains("62.50%"));
        assert!(text.contains("Designed by"));
    }

    #[test]
    fn test_to_cell_rect_rounds() {
        let rect = to_cell_rect(Area::new(1.4, 2.6, 3.3, 1.2));
        assert_eq!(rect, Rect::new(1, 3, 4, 1));
    }

    #[test]
    fn test_sector_points_stay_in_circle() {
        let points = sector_points(0.0, 1.0);
        assert!(!points.is_empty());
        assert!(points.iter().all(|(x, y)| x * x + y * y <= 1.0 + 1e-9));
    }
}
