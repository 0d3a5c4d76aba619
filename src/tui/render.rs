use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::{App, Mode, Tab};
use crate::tui::layout::Layout;
use crate::tui::widgets::{
    color::parse_color,
    confirm_delete::render_confirm_delete,
    daily::render_daily,
    help::render_help,
    history::render_history,
    ideas::render_ideas,
    input::render_input,
    projects::render_projects,
    status_bar::render_status_bar,
    summary_view::render_summary,
    tabs::render_tabs,
};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    // Outer border with the app title centered in the top edge
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Life OS")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_tabs(f, layout.tabs_area, app.ui.current_tab, &app.config);

    match app.ui.current_tab {
        Tab::Daily => {
            let heading = app.today_heading();
            render_daily(
                f,
                layout.main_area,
                &app.session,
                app.ui.daily_index,
                &heading,
                &app.config,
            );
        }
        Tab::Projects => {
            render_projects(
                f,
                layout.main_area,
                &app.projects,
                &app.project_previews,
                app.ui.project_index,
                &app.config,
            );
        }
        Tab::Ideas => {
            render_ideas(
                f,
                layout.main_area,
                &app.ideas,
                &app.idea_previews,
                app.ui.idea_index,
                &app.config,
            );
        }
        Tab::Summary => {
            render_summary(
                f,
                layout.main_area,
                app.snapshot.as_ref(),
                app.window.as_ref(),
                &app.config,
            );
        }
    }

    // Overlays render on top of the tab content
    match app.ui.mode {
        Mode::Input => {
            if let Some(input) = &app.input {
                render_input(f, layout.inner_area, input, &app.config);
            }
        }
        Mode::ConfirmDelete => {
            if let Some(pending) = &app.modal.pending_delete {
                render_confirm_delete(
                    f,
                    layout.inner_area,
                    pending,
                    app.modal.selection,
                    &app.config,
                );
            }
        }
        Mode::History => {
            if let Some(history) = &app.history {
                render_history(f, layout.inner_area, history, &app.config);
            }
        }
        Mode::Help => render_help(f, layout.inner_area, &app.config),
        Mode::View => {}
    }

    let hints = key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &hints,
        &app.config,
    );
}

/// Key hints for the status bar, by mode and tab
fn key_hints(app: &App) -> Vec<&'static str> {
    match app.ui.mode {
        Mode::Input => vec!["Enter save", "Esc cancel"],
        Mode::ConfirmDelete => vec!["Enter confirm", "Esc cancel"],
        Mode::History => vec!["j/k scroll", "Esc close"],
        Mode::Help => vec!["any key closes"],
        Mode::View => match app.ui.current_tab {
            Tab::Daily => vec![
                "j/k move",
                "Space toggle",
                "+/- adjust",
                "e note",
                "1-4 tabs",
                "F1 help",
                "q quit",
            ],
            Tab::Projects => vec![
                "j/k move",
                "n new",
                "l log",
                "Enter history",
                "a archive",
                "d delete",
                "r refresh",
                "q quit",
            ],
            Tab::Ideas => vec![
                "j/k move",
                "n new",
                "l note",
                "s status",
                "Enter history",
                "d delete",
                "q quit",
            ],
            Tab::Summary => vec!["r refresh", "1-4 tabs", "F1 help", "q quit"],
        },
    }
}
