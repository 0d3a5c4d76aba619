use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::app::HistoryState;
use crate::tui::widgets::color::parse_color;

/// Render the full note history for a project or idea as a scrollable
/// overlay, most recent entry first
pub fn render_history(f: &mut Frame, area: Rect, history: &HistoryState, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let dim = Style::default().fg(parse_color(&active_theme.tab_bg));

    let popup = popup_area(area, 70, 70);
    f.render_widget(Clear, popup);

    let mut lines: Vec<Line> = Vec::new();
    if history.entries.is_empty() {
        lines.push(Line::from("No entries yet."));
    }
    for (date, content) in &history.entries {
        lines.push(Line::from(Span::styled(
            date.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  {}", content)));
        lines.push(Line::from(Span::styled(
            "─".repeat(popup.width.saturating_sub(4) as usize),
            dim,
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("History: {}", history.title))
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: false })
        .scroll((history.scroll, 0));

    f.render_widget(paragraph, popup);
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
