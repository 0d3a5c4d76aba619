use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Sparkline};

use crate::Config;
use crate::summary::{TodaySnapshot, WindowReport};
use crate::tui::widgets::color::parse_color;

/// Render the Summary tab: today's metrics, the time-allocation chart,
/// the vocabulary trend, and the research timeline
pub fn render_summary(
    f: &mut Frame,
    area: Rect,
    snapshot: Option<&TodaySnapshot>,
    window: Option<&WindowReport>,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let dim = Style::default().fg(parse_color(&active_theme.tab_bg));
    let accent = Style::default().fg(parse_color(&active_theme.highlight_bg));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Today's snapshot
            Constraint::Length(9),  // Time allocation chart
            Constraint::Length(4),  // Vocabulary trend
            Constraint::Min(3),     // Research timeline
        ])
        .split(area);

    render_snapshot(f, chunks[0], snapshot, fg_color, dim);
    render_time_chart(f, chunks[1], window, fg_color, accent);
    render_vocab_trend(f, chunks[2], window, fg_color, accent);
    render_timeline(f, chunks[3], window, fg_color, dim);
}

fn render_snapshot(
    f: &mut Frame,
    area: Rect,
    snapshot: Option<&TodaySnapshot>,
    fg: ratatui::style::Color,
    dim: Style,
) {
    let mut lines: Vec<Line> = Vec::new();

    match snapshot.and_then(|s| s.log.as_ref()) {
        Some(log) => {
            lines.push(Line::from(vec![
                Span::raw("Info Diet "),
                Span::styled(
                    format!("{} min", log.info_minutes()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("   GRE Vocab "),
                Span::styled(
                    log.gre_vocab_count.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "   GRE Practice V:{} R:{}",
                    log.gre_verbal_count, log.gre_reading_count
                )),
            ]));
            lines.push(Line::from(format!(
                "LeetCode E:{} M:{} H:{}",
                log.lc_easy_count, log.lc_medium_count, log.lc_hard_count
            )));
        }
        None => lines.push(Line::from("No data logged today yet.")),
    }

    if let Some(snapshot) = snapshot {
        if !snapshot.research.is_empty() {
            lines.push(Line::from(Span::styled(
                "Research today",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for entry in snapshot.research.iter().take(2) {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {}: ", entry.title)),
                    Span::styled(entry.preview.clone(), dim),
                ]));
            }
        }
        if !snapshot.ideas.is_empty() {
            lines.push(Line::from(Span::styled(
                "Ideas today",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for entry in snapshot.ideas.iter().take(2) {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {}: ", entry.title)),
                    Span::styled(entry.preview.clone(), dim),
                ]));
            }
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Today's Snapshot")
            .style(Style::default().fg(fg)),
    );
    f.render_widget(paragraph, area);
}

fn render_time_chart(
    f: &mut Frame,
    area: Rect,
    window: Option<&WindowReport>,
    fg: ratatui::style::Color,
    accent: Style,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Time Allocation (past 3 days)")
        .style(Style::default().fg(fg));

    let Some(report) = window.filter(|w| w.has_log_data()) else {
        let empty = Paragraph::new("No data in the past 3 days.").block(block);
        f.render_widget(empty, area);
        return;
    };

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(3)
        .bar_gap(1)
        .group_gap(2)
        .bar_style(accent)
        .value_style(Style::default().fg(fg).add_modifier(Modifier::BOLD));

    for point in &report.time {
        // Group per date; MM-DD keeps the labels narrow
        let label = point.date.get(5..).unwrap_or(&point.date).to_string();
        let group = BarGroup::default().label(Line::from(label)).bars(&[
            Bar::default().value(point.newsletter),
            Bar::default().value(point.video),
            Bar::default().value(point.wechat),
        ]);
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}

fn render_vocab_trend(
    f: &mut Frame,
    area: Rect,
    window: Option<&WindowReport>,
    fg: ratatui::style::Color,
    accent: Style,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("GRE Vocabulary Trend")
        .style(Style::default().fg(fg));

    let Some(report) = window.filter(|w| w.has_log_data()) else {
        let empty = Paragraph::new("No data in the past 3 days.").block(block);
        f.render_widget(empty, area);
        return;
    };

    let sparkline = Sparkline::default()
        .block(block)
        .style(accent)
        .data(report.vocab.iter().map(|p| p.words));
    f.render_widget(sparkline, area);
}

fn render_timeline(
    f: &mut Frame,
    area: Rect,
    window: Option<&WindowReport>,
    fg: ratatui::style::Color,
    dim: Style,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Research Timeline")
        .style(Style::default().fg(fg));

    let entries = window.map(|w| w.research.as_slice()).unwrap_or(&[]);
    if entries.is_empty() {
        let empty = Paragraph::new("No research logs in the past 3 days.").block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for entry in entries {
        lines.push(Line::from(vec![
            Span::styled(
                entry.date.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", entry.title)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.preview),
            dim,
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(paragraph, area);
}
