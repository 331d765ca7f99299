//! TUI rendering module.
//!
//! - `layout` - Width calculations and text utilities
//! - `table` - Summary table lines (header, rows, placeholder)
//! - `report` - The report region widget, shared with page export
//! - `status` - Header, status bar, state panel and help
//! - `menus` - Project picker and assignee filter

pub mod layout;
mod menus;
pub mod report;
mod status;
pub mod table;

// Re-export the main draw function
pub use self::draw::draw;

mod draw {

    use super::menus::{draw_assignee_menu, draw_project_picker};
    use super::report::ReportRegion;
    use super::status::{draw_header, draw_help_popup, draw_state_panel, draw_status_bar};
    use crate::tui::App;
    use ratatui::{
        layout::{Constraint, Direction, Layout},
        Frame,
    };

    /// Main draw function - renders the entire TUI.
    pub fn draw(f: &mut Frame, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Report region
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        draw_header(f, app, chunks[0]);

        match ReportRegion::new(&app.report, &app.assignee_table, &app.status_table) {
            Some(region) => f.render_widget(region.with_focus(app.focus), chunks[1]),
            None => draw_state_panel(f, app, chunks[1]),
        }

        draw_status_bar(f, app, chunks[2]);

        // Overlays
        if app.show_help() {
            draw_help_popup(f);
        }

        if app.show_project_picker() {
            draw_project_picker(f, app);
        }

        if app.show_assignee_menu() {
            draw_assignee_menu(f, app);
        }
    }
}
