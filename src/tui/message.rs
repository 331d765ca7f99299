//! Message enum for Elm Architecture (TEA) pattern.
//!
//! All possible user actions in the application are represented as messages.
//! This enables unidirectional data flow and testable update logic.

use crate::data::aggregate::AssigneeFilter;

/// All possible user actions in the application.
///
/// Messages are dispatched from key events and processed by the `App::update()` method.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────────────────────
    // App lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Quit the application
    Quit,
    /// Re-fetch the current project's work
    Retry,
    /// Re-fetch the project list
    ReloadProjects,

    // ─────────────────────────────────────────────────────────────────────────
    // Report selection
    // ─────────────────────────────────────────────────────────────────────────
    /// Select a project by id and start loading its sprint
    SelectProject(String),
    /// Replace the assignee row filter
    SetAssigneeFilter(AssigneeFilter),

    // ─────────────────────────────────────────────────────────────────────────
    // Tables
    // ─────────────────────────────────────────────────────────────────────────
    /// Move keyboard focus to the other summary table
    FocusNextTable,
    /// Move the column cursor right
    NextColumn,
    /// Move the column cursor left
    PrevColumn,
    /// Toggle sort on the column under the cursor
    SortByCursor,
    /// Toggle sort on a column by 0-based index
    SortColumn(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the project picker
    OpenProjectPicker,
    /// Open the assignee filter menu
    OpenAssigneeMenu,
    /// Toggle help modal
    ToggleHelp,
    /// Move the menu selection up
    MenuUp,
    /// Move the menu selection down
    MenuDown,
    /// Confirm the highlighted menu entry
    MenuConfirm,
    /// Close current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────
    /// Write the report page to the configured path
    Export,

    /// No operation (for unhandled keys)
    None,
}
