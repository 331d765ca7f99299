//! Tests for the fixed-size page export
//!
//! The page is the report region drawn into an off-screen buffer, so these
//! check page geometry plus the text that must survive the trip.

mod test_utils;

use chrono::{Local, TimeZone};
use sprintboard::data::aggregate::AssigneeFilter;
use sprintboard::data::report::ReportViewModel;
use sprintboard::data::table::{assignee_table, status_table, COL_TOTAL_CARDS};
use sprintboard::data::Project;
use sprintboard::export::{export_report, render_page, PAGE_HEIGHT, PAGE_WIDTH};
use test_utils::{sample_issues, snapshot};
use unicode_width::UnicodeWidthStr;

const EMPTY: &str = "No data available";

fn ready_report(issues: Vec<sprintboard::data::Issue>) -> ReportViewModel {
    let mut vm = ReportViewModel::new();
    vm.set_projects(Ok(vec![Project {
        id: "10".to_string(),
        name: "Checkout".to_string(),
    }]));
    let ticket = vm.select_project("10");
    vm.apply_fetch(&ticket, Ok(snapshot("10", issues)));
    vm
}

fn generated_at() -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid local time")
}

mod page {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_geometry() {
        let vm = ready_report(sample_issues());
        let page = render_page(&vm, &assignee_table(EMPTY), &status_table(EMPTY), generated_at())
            .expect("page");
        assert_eq!(page.lines().len(), PAGE_HEIGHT as usize);
        assert!(page
            .lines()
            .iter()
            .all(|line| line.width() <= PAGE_WIDTH as usize));
    }

    #[test]
    fn test_page_contents() {
        let vm = ready_report(sample_issues());
        let text = render_page(&vm, &assignee_table(EMPTY), &status_table(EMPTY), generated_at())
            .expect("page")
            .to_text();

        assert!(text.starts_with("Sprint Overview Summary Report"));
        assert!(text.contains("Generated 2026-03-14 09:30"));
        assert!(text.contains("Checkout"));
        assert!(text.contains("Sprint 42"));
        assert!(text.contains("Sprint No: 42 · Release 2026-03-02 → 2026-03-16"));
        assert!(text.contains("Completed 40%"));
        assert!(text.contains("Workload by Assignee"));
        assert!(text.contains("Cards by Status"));
        assert!(text.contains("Ana"));
        assert!(text.contains("1/2"));
        assert!(text.contains("IN PROGRESS"));
        // Cancelled work never reaches the page
        assert!(!text.contains("CANCELADO"));
    }

    #[test]
    fn test_page_reflects_sort_state() {
        let vm = ready_report(sample_issues());
        let mut assignees = assignee_table(EMPTY);
        assignees.toggle_sort(COL_TOTAL_CARDS);
        assignees.toggle_sort(COL_TOTAL_CARDS);
        let page = render_page(&vm, &assignees, &status_table(EMPTY), generated_at()).expect("page");

        let position = |name: &str| {
            page.lines()
                .iter()
                .position(|l| l.contains(&format!(" {} ", name)))
                .unwrap_or_else(|| panic!("{} not on page", name))
        };
        assert!(position("Ana") < position("Ben"));
        assert!(page.to_text().contains('▼'));
    }

    #[test]
    fn test_filtered_assignee_keeps_status_table() {
        let mut vm = ready_report(sample_issues());
        vm.set_assignee_filter(AssigneeFilter::Named("Ben".to_string()));
        let text = render_page(&vm, &assignee_table(EMPTY), &status_table(EMPTY), generated_at())
            .expect("page")
            .to_text();
        assert!(text.contains("Assignee: Ben"));
        assert!(!text.contains("Ana"));
        assert!(text.contains("DONE"));
    }

    #[test]
    fn test_empty_sprint_shows_placeholders() {
        let vm = ready_report(Vec::new());
        let text = render_page(&vm, &assignee_table(EMPTY), &status_table(EMPTY), generated_at())
            .expect("page")
            .to_text();
        assert_eq!(text.matches(EMPTY).count(), 2);
    }

    #[test]
    fn test_sprint_without_details_has_no_details_line() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("10");
        let mut bare = snapshot("10", sample_issues());
        bare.sprint.number = None;
        bare.sprint.start_date = None;
        bare.sprint.end_date = None;
        vm.apply_fetch(&ticket, Ok(bare));

        let text = render_page(&vm, &assignee_table(EMPTY), &status_table(EMPTY), generated_at())
            .expect("page")
            .to_text();
        assert!(text.contains("Sprint 42"));
        assert!(!text.contains("Sprint No:"));
    }

    #[test]
    fn test_no_page_unless_ready() {
        let mut vm = ReportViewModel::new();
        assert!(render_page(&vm, &assignee_table(EMPTY), &status_table(EMPTY), generated_at()).is_none());
        vm.select_project("10");
        assert!(render_page(&vm, &assignee_table(EMPTY), &status_table(EMPTY), generated_at()).is_none());
    }
}

mod files {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_writes_page_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("sprint.txt");
        let vm = ready_report(sample_issues());

        let written = export_report(&vm, &assignee_table(EMPTY), &status_table(EMPTY), &path).unwrap();
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), PAGE_HEIGHT as usize);
        assert!(content.contains("Workload by Assignee"));
    }

    #[test]
    fn test_export_fails_without_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprint.txt");
        let vm = ReportViewModel::new();

        let err = export_report(&vm, &assignee_table(EMPTY), &status_table(EMPTY), &path).unwrap_err();
        assert!(err.to_string().contains("No report to export"));
        assert!(!path.exists());
    }
}
