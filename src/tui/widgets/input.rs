use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::app::InputState;
use crate::tui::widgets::color::parse_color;

/// Render the single-line input prompt as a centered popup, with the
/// terminal cursor placed inside it
pub fn render_input(f: &mut Frame, area: Rect, input: &InputState, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup = popup_area(area, 70, 3);
    f.render_widget(Clear, popup);

    let inner_width = popup.width.saturating_sub(2) as usize;

    // Keep the cursor visible by scrolling the buffer horizontally
    let scroll = input.cursor.saturating_sub(inner_width.saturating_sub(1));
    let visible: String = input.buffer.chars().skip(scroll).collect();

    let paragraph = Paragraph::new(visible)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(input.purpose.prompt_title())
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(paragraph, popup);

    let cursor_x = popup.x + 1 + (input.cursor - scroll) as u16;
    f.set_cursor_position(Position::new(cursor_x.min(popup.x + popup.width - 2), popup.y + 1));
}

/// Centered rect with a percentage width and fixed height
fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
