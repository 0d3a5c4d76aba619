use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::Config;
use crate::session::SessionState;
use crate::summary::truncate_preview;
use crate::tui::app::DailyRow;
use crate::tui::widgets::color::parse_color;

const NOTE_PREVIEW_LEN: usize = 40;

/// Render the Daily tab: one interactive row per habit field
pub fn render_daily(
    f: &mut Frame,
    area: Rect,
    session: &SessionState,
    selected: usize,
    heading: &str,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let dim = Style::default().fg(parse_color(&active_theme.tab_bg));
    let highlight = Style::default()
        .fg(parse_color(&active_theme.highlight_fg))
        .bg(parse_color(&active_theme.highlight_bg));

    let items: Vec<ListItem> = DailyRow::ALL
        .iter()
        .map(|row| {
            let line = match row {
                DailyRow::Channel(channel) => {
                    let marker = if session.done(*channel) { "[x]" } else { "[ ]" };
                    let note = truncate_preview(session.note(*channel), NOTE_PREVIEW_LEN);
                    let mut spans = vec![Span::raw(format!(
                        "{} {:<18} {:>4} min  ",
                        marker,
                        channel.label(),
                        session.minutes(*channel)
                    ))];
                    if !note.is_empty() {
                        spans.push(Span::styled(note, dim));
                    }
                    Line::from(spans)
                }
                DailyRow::Counter(counter) => Line::from(format!(
                    "    {:<18} {:>4}       step {}",
                    counter.label(),
                    session.count(*counter),
                    counter.step()
                )),
                DailyRow::CodingNote => {
                    let note = session.log().lc_notes.as_str();
                    let preview = if note.is_empty() {
                        "(no notes)".to_string()
                    } else {
                        truncate_preview(note, NOTE_PREVIEW_LEN)
                    };
                    Line::from(vec![
                        Span::raw(format!("    {:<18} ", "LeetCode Notes")),
                        Span::styled(preview, dim),
                    ])
                }
            };
            ListItem::new(line)
        })
        .collect();

    let title = format!(
        "{}  (info {} min, LC {})",
        heading,
        session.log().info_minutes(),
        session.log().lc_total()
    );

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(fg_color)),
        )
        .highlight_style(highlight.add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}
