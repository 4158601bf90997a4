use crate::document::ResultsDocument;
use crate::errors::DashboardError;
use crate::format::bar_cells;
use crate::hotkeys::dashboard_controls_legend;
use crate::sections::models::SELECTED_MARKER;
use crate::sections::{
    build_footer, build_section, AgentsSection, ArtifactEntry, EvaluationSection, FooterSection,
    ModelsSection, OverviewSection, Section,
};
use crate::types::{AgentStatus, ModelStatus, Tab};
use crate::view::ViewState;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::{Frame, Terminal};

pub const TITLE: &str = "Fraud Detection System — Results";
pub const HEADER_HEIGHT: u16 = 2;
pub const TAB_BAR_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 12;
pub const SUMMARY_HEIGHT: u16 = 1;
pub const ADVISORY_HEIGHT: u16 = 6;

pub const OVERVIEW_TITLE: &str = "Summary";
pub const MODELS_TITLE: &str = "Model Comparison (Test Set)";
pub const EVALUATION_TITLE: &str = "Confusion Matrix";
pub const METRICS_TITLE: &str = "Evaluation Metrics";
pub const AGENTS_TITLE: &str = "Agent Execution Pipeline";
pub const TOPOLOGY_TITLE: &str = "Pipeline Flow";
pub const FILES_TITLE: &str = "Generated Files";

const FEATURE_NAME_WIDTH: usize = 8;
const BAR_LABEL_WIDTH: usize = 8;
const METRIC_NAME_WIDTH: usize = 11;

/// Everything one frame needs, derived up front so drawing cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFrame {
    pub active: Tab,
    pub subtitle: String,
    pub section: Section,
    pub footer: FooterSection,
}

impl DashboardFrame {
    pub fn build(doc: &ResultsDocument, state: ViewState) -> Result<Self, DashboardError> {
        let subtitle = if doc
            .agents
            .iter()
            .all(|agent| agent.status == AgentStatus::Success)
        {
            "Multi-Agent Pipeline Successfully Executed"
        } else {
            "Multi-Agent Pipeline Finished With Issues"
        };
        Ok(Self {
            active: state.active_tab(),
            subtitle: subtitle.to_string(),
            section: build_section(doc, state.active_tab())?,
            footer: build_footer(doc),
        })
    }
}

pub fn render_dashboard(
    doc: &ResultsDocument,
    state: ViewState,
    width: u16,
    height: u16,
) -> Result<String, DashboardError> {
    if width == 0 || height == 0 {
        return Ok(String::new());
    }
    let view = DashboardFrame::build(doc, state)?;
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).map_err(|e| DashboardError::Render(e.to_string()))?;
    terminal
        .draw(|frame| draw_frame(frame, &view))
        .map_err(|e| DashboardError::Render(e.to_string()))?;
    Ok(buffer_to_string(terminal.backend().buffer()))
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

pub fn draw_frame(frame: &mut Frame<'_>, view: &DashboardFrame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
            Constraint::Length(SUMMARY_HEIGHT),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], &view.subtitle);
    draw_tab_bar(frame, chunks[1], view.active);
    match &view.section {
        Section::Overview(section) => draw_overview(frame, chunks[2], section),
        Section::Models(section) => draw_models(frame, chunks[2], section),
        Section::Evaluation(section) => draw_evaluation(frame, chunks[2], section),
        Section::Agents(section) => draw_agents(frame, chunks[2], section),
    }
    draw_files(frame, chunks[3], &view.footer);
    frame.render_widget(
        Paragraph::new(view.footer.summary.clone())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, subtitle: &str) {
    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_tab_bar(frame: &mut Frame<'_>, area: Rect, active: Tab) {
    let titles = Tab::ALL
        .iter()
        .map(|tab| format!("{} {}", tab.index() + 1, tab.label()))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(active.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(dashboard_controls_legend()),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_overview(frame: &mut Frame<'_>, area: Rect, section: &OverviewSection) {
    let block = Block::default().borders(Borders::ALL).title(OVERVIEW_TITLE);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    for (card, column) in section.cards.iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                card.value.clone(),
                Style::default().fg(card.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.caption.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(card.title)),
            *column,
        );
    }

    frame.render_widget(
        Paragraph::new(section.dataset_line.clone())
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
        rows[1],
    );
}

fn draw_models(frame: &mut Frame<'_>, area: Rect, section: &ModelsSection) {
    let table_height = u16::try_from(section.rows.len())
        .unwrap_or(u16::MAX)
        .saturating_add(3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(table_height), Constraint::Min(0)])
        .split(area);

    let header = Row::new(["Model", "Accuracy", "Precision", "Recall", "ROC-AUC", "Status"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let rows = section
        .rows
        .iter()
        .map(|row| {
            let label = if row.selected {
                Line::from(vec![
                    Span::raw(row.label.clone()),
                    Span::styled(
                        format!(" {SELECTED_MARKER}"),
                        Style::default().fg(Color::LightBlue),
                    ),
                ])
            } else {
                Line::from(row.label.clone())
            };
            let status_style = match row.status {
                ModelStatus::Selected => Style::default().fg(Color::Green),
                ModelStatus::Trained => Style::default().fg(Color::DarkGray),
            };
            Row::new(vec![
                Cell::from(label),
                Cell::from(row.accuracy.clone()),
                Cell::from(row.precision.clone()).style(Style::default().fg(Color::Yellow)),
                Cell::from(row.recall.clone()).style(Style::default().fg(Color::Green)),
                Cell::from(row.roc_auc.clone()).style(Style::default().fg(Color::Cyan)),
                Cell::from(row.status.label()).style(status_style),
            ])
        })
        .collect::<Vec<_>>();
    let widths = [
        Constraint::Min(30),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(9),
    ];
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(MODELS_TITLE)),
        chunks[0],
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(section.feature_heading.clone());
    let inner = block.inner(chunks[1]);
    let track = track_width(inner.width, FEATURE_NAME_WIDTH);
    let lines = section
        .features
        .iter()
        .map(|feature| {
            bar_line(
                &feature.name,
                FEATURE_NAME_WIDTH,
                feature.width_percent,
                track,
                Color::Blue,
                &feature.importance_label,
            )
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
}

fn draw_evaluation(frame: &mut Frame<'_>, area: Rect, section: &EvaluationSection) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(ADVISORY_HEIGHT)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let matrix_block = Block::default().borders(Borders::ALL).title(EVALUATION_TITLE);
    let matrix_inner = matrix_block.inner(columns[0]);
    frame.render_widget(matrix_block, columns[0]);
    let grid = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(matrix_inner);
    for (row_idx, cells) in section.cells.chunks(2).enumerate() {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(grid[row_idx]);
        for (cell, half) in cells.iter().zip(halves.iter()) {
            let color = if cell.correct { Color::Green } else { Color::Red };
            let lines = vec![
                Line::from(Span::styled(
                    cell.value.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(cell.label, Style::default().fg(Color::Gray))),
            ];
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL)),
                *half,
            );
        }
    }
    let rates = vec![
        rate_line("Detection Rate", &section.detection_rate, Color::Green),
        rate_line("False Positive Rate", &section.false_positive_rate, Color::Yellow),
        rate_line("Missed Frauds", &section.missed_frauds, Color::Red),
    ];
    frame.render_widget(Paragraph::new(rates), grid[2]);

    let metrics_block = Block::default().borders(Borders::ALL).title(METRICS_TITLE);
    let metrics_inner = metrics_block.inner(columns[1]);
    let track = track_width(metrics_inner.width, METRIC_NAME_WIDTH);
    let mut lines = Vec::with_capacity(section.metrics.len() * 2);
    for metric in &section.metrics {
        lines.push(bar_line(
            metric.metric.label(),
            METRIC_NAME_WIDTH,
            metric.width_percent,
            track,
            metric.color,
            &metric.value_label,
        ));
        lines.push(Line::default());
    }
    frame.render_widget(Paragraph::new(lines).block(metrics_block), columns[1]);

    let advisory = Paragraph::new(section.advisory.body)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!("⚠ {}", section.advisory.title)),
        );
    frame.render_widget(advisory, rows[1]);
}

fn draw_agents(frame: &mut Frame<'_>, area: Rect, section: &AgentsSection) {
    let list_height = u16::try_from(section.rows.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(list_height), Constraint::Min(0)])
        .split(area);

    let lines = section
        .rows
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(
                    format!("{:>2}. ", row.position),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!("{:<16}", row.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {:<30}", row.output),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!(" {:>6}  ", row.elapsed),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(row.pill.clone(), Style::default().fg(status_color(row.status))),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(AGENTS_TITLE)),
        chunks[0],
    );

    let topology = section
        .topology
        .iter()
        .map(|line| Line::from(line.clone()))
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(topology)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title(TOPOLOGY_TITLE)),
        chunks[1],
    );
}

fn draw_files(frame: &mut Frame<'_>, area: Rect, footer: &FooterSection) {
    let block = Block::default().borders(Borders::ALL).title(FILES_TITLE);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(artifact_lines("outputs/intermediate/", &footer.intermediate)),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(artifact_lines("outputs/final/", &footer.outputs)),
        columns[1],
    );
}

fn artifact_lines(heading: &'static str, entries: &[ArtifactEntry]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        heading,
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    ))];
    for (idx, entry) in entries.iter().enumerate() {
        let branch = if idx + 1 == entries.len() { "└──" } else { "├──" };
        let mut spans = vec![
            Span::styled(
                format!("{branch} {:<32}", entry.path),
                Style::default().fg(Color::Gray),
            ),
            Span::styled("✓", Style::default().fg(Color::Green)),
        ];
        if let Some(note) = &entry.note {
            spans.push(Span::styled(
                format!(" ({note})"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn rate_line(label: &'static str, value: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<22}"), Style::default().fg(Color::Gray)),
        Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn track_width(inner_width: u16, name_width: usize) -> usize {
    usize::from(inner_width).saturating_sub(name_width + BAR_LABEL_WIDTH + 2)
}

fn bar_line(
    name: &str,
    name_width: usize,
    width_percent: f64,
    track: usize,
    color: Color,
    label: &str,
) -> Line<'static> {
    let filled = bar_cells(width_percent, track);
    let label_width = BAR_LABEL_WIDTH;
    Line::from(vec![
        Span::styled(format!("{name:<name_width$} "), Style::default().fg(Color::Gray)),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(track - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(" {label:>label_width$}")),
    ])
}

fn status_color(status: AgentStatus) -> Color {
    match status {
        AgentStatus::Success => Color::Green,
        AgentStatus::Failure => Color::Red,
        AgentStatus::Skipped => Color::DarkGray,
        AgentStatus::Running => Color::Cyan,
        AgentStatus::Pending => Color::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::{render_dashboard, AGENTS_TITLE, EVALUATION_TITLE, MODELS_TITLE, OVERVIEW_TITLE};
    use crate::document::bundled_document;
    use crate::types::Tab;
    use crate::view::ViewState;

    fn frame_for(tab: Tab) -> String {
        let mut state = ViewState::default();
        state.select(tab);
        render_dashboard(&bundled_document().expect("doc"), state, 120, 48).expect("render")
    }

    #[test]
    fn each_tab_renders_only_its_own_section() {
        let markers = [
            (Tab::Overview, OVERVIEW_TITLE),
            (Tab::Models, MODELS_TITLE),
            (Tab::Evaluation, EVALUATION_TITLE),
            (Tab::Agents, AGENTS_TITLE),
        ];
        for (tab, own) in markers {
            let frame = frame_for(tab);
            assert!(frame.contains(own), "{tab:?} frame missing '{own}'");
            for (other, marker) in markers {
                if other != tab {
                    assert!(
                        !frame.contains(marker),
                        "{tab:?} frame leaked '{marker}' from {other:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn footer_renders_on_every_tab() {
        for tab in Tab::ALL {
            let frame = frame_for(tab);
            assert!(frame.contains("Generated Files"));
            assert!(frame.contains("7 Agents"));
        }
    }

    #[test]
    fn zero_sized_viewport_renders_nothing() {
        let doc = bundled_document().expect("doc");
        let frame = render_dashboard(&doc, ViewState::default(), 0, 0).expect("render");
        assert!(frame.is_empty());
    }
}
