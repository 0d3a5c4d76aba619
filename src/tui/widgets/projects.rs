use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::Config;
use crate::models::{ResearchLog, ResearchProject};
use crate::summary::truncate_preview;
use crate::tui::widgets::color::parse_color;

const PREVIEW_LEN: usize = 60;

/// Render the Projects tab: active projects first, archived below, each
/// with its latest log as a preview line
pub fn render_projects(
    f: &mut Frame,
    area: Rect,
    projects: &[ResearchProject],
    previews: &HashMap<String, ResearchLog>,
    selected: usize,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let dim = Style::default().fg(parse_color(&active_theme.tab_bg));
    let highlight = Style::default()
        .fg(parse_color(&active_theme.highlight_fg))
        .bg(parse_color(&active_theme.highlight_bg));

    let active_count = projects.iter().filter(|p| p.is_active).count();

    let items: Vec<ListItem> = projects
        .iter()
        .map(|project| {
            let mut title_spans = vec![Span::styled(
                project.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if !project.is_active {
                title_spans.push(Span::styled(" [archived]", dim));
            }

            let preview = project
                .id
                .as_deref()
                .and_then(|id| previews.get(id))
                .map(|log| {
                    format!(
                        "  Last ({}): {}",
                        log.date,
                        truncate_preview(&log.content, PREVIEW_LEN)
                    )
                })
                .unwrap_or_else(|| "  No logs yet".to_string());

            ListItem::new(vec![
                Line::from(title_spans),
                Line::from(Span::styled(preview, dim)),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Projects ({} active)", active_count))
                .style(Style::default().fg(fg_color)),
        )
        .highlight_style(highlight)
        .highlight_symbol("> ");

    if projects.is_empty() {
        let empty = ratatui::widgets::Paragraph::new("No projects yet. Press n to create one.")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Projects")
                    .style(Style::default().fg(fg_color)),
            );
        f.render_widget(empty, area);
        return;
    }

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}
