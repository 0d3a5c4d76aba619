use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::Config;
use crate::models::{Idea, IdeaUpdate};
use crate::summary::truncate_preview;
use crate::tui::widgets::color::parse_color;

const PREVIEW_LEN: usize = 60;

/// Render the Ideas tab: active ideas first, done ideas below, each with
/// its status badge and latest update preview
pub fn render_ideas(
    f: &mut Frame,
    area: Rect,
    ideas: &[Idea],
    previews: &HashMap<String, IdeaUpdate>,
    selected: usize,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let dim = Style::default().fg(parse_color(&active_theme.tab_bg));
    let highlight = Style::default()
        .fg(parse_color(&active_theme.highlight_fg))
        .bg(parse_color(&active_theme.highlight_bg));

    let items: Vec<ListItem> = ideas
        .iter()
        .map(|idea| {
            let title_line = Line::from(vec![
                Span::styled(
                    idea.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(format!("[{}]", idea.status.as_str()), dim),
            ]);

            let preview = idea
                .id
                .as_deref()
                .and_then(|id| previews.get(id))
                .map(|update| {
                    format!(
                        "  Last ({}): {}",
                        update.created_date(),
                        truncate_preview(&update.content, PREVIEW_LEN)
                    )
                })
                .unwrap_or_else(|| "  No updates yet".to_string());

            ListItem::new(vec![title_line, Line::from(Span::styled(preview, dim))])
        })
        .collect();

    if ideas.is_empty() {
        let empty = ratatui::widgets::Paragraph::new("No ideas yet. Press n to create one.")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Ideas")
                    .style(Style::default().fg(fg_color)),
            );
        f.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Ideas ({})", ideas.len()))
                .style(Style::default().fg(fg_color)),
        )
        .highlight_style(highlight)
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}
