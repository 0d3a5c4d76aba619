use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::parse_color;

/// Render the help overlay listing the configured key bindings
pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup = popup_area(area, 60, 80);
    f.render_widget(Clear, popup);

    let kb = &config.key_bindings;
    let rows: Vec<(&str, &str)> = vec![
        (kb.quit.as_str(), "Quit"),
        (kb.help.as_str(), "Toggle this help"),
        (kb.refresh.as_str(), "Refresh current tab"),
        ("Left/Right, 1-4", "Switch tabs"),
        (kb.list_down.as_str(), "Move down"),
        (kb.list_up.as_str(), "Move up"),
        (kb.toggle_done.as_str(), "Toggle done (Daily channels)"),
        (kb.increment.as_str(), "Increment minutes/counter"),
        (kb.decrement.as_str(), "Decrement minutes/counter"),
        (kb.edit_note.as_str(), "Edit note (Daily)"),
        (kb.new.as_str(), "New project/idea"),
        (kb.add_entry.as_str(), "Add log/update to selection"),
        (kb.set_status.as_str(), "Cycle idea status"),
        (kb.archive.as_str(), "Archive project"),
        (kb.delete.as_str(), "Delete project/idea"),
        (kb.select.as_str(), "Show history"),
    ];

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Key Bindings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (binding, action) in rows {
        lines.push(Line::from(format!("{:<16} {}", binding, action)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Press any key to close"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color));

    f.render_widget(paragraph, popup);
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
