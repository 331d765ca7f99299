//! Tests for the report view model state machine
//!
//! Covers selection, last-write-wins fetch tickets, error states, retry,
//! and the assignee filter's effect on derived rows.

mod test_utils;

use sprintboard::data::aggregate::AssigneeFilter;
use sprintboard::data::report::{ReportState, ReportViewModel};
use sprintboard::data::Project;
use sprintboard::error::{DataError, FetchError, ReportError};
use test_utils::{issue, sample_issues, snapshot};

fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
    }
}

mod lifecycle {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_empty() {
        let vm = ReportViewModel::new();
        assert_eq!(vm.state(), &ReportState::Empty);
        assert!(vm.assignee_rows().is_empty());
        assert!(vm.status_rows().is_empty());
        assert_eq!(vm.selected_project(), None);
    }

    #[test]
    fn test_select_enters_loading() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("10");
        assert_eq!(ticket.project_id, "10");
        assert!(vm.is_loading());
        assert_eq!(vm.state().label(), "Loading");
        assert_eq!(vm.selected_project(), Some("10"));
    }

    #[test]
    fn test_success_enters_ready_with_derived_rows() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("10");
        assert!(vm.apply_fetch(&ticket, Ok(snapshot("10", sample_issues()))));

        let ready = vm.ready().expect("ready");
        assert_eq!(ready.snapshot.sprint.name, "Sprint 42");
        assert_eq!(vm.active_cards(), 4);
        assert_eq!(vm.assignee_rows().len(), 3);
        assert_eq!(vm.status_rows().len(), 3);
        assert_eq!(vm.assignee_names(), vec!["Ana", "Ben", "Unassigned"]);
    }

    #[test]
    fn test_empty_sprint_is_ready_not_failed() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("10");
        vm.apply_fetch(&ticket, Ok(snapshot("10", Vec::new())));
        assert!(vm.ready().is_some());
        assert!(vm.assignee_rows().is_empty());
        assert_eq!(vm.active_cards(), 0);
    }

    #[test]
    fn test_reselecting_drops_previous_snapshot() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("10");
        vm.apply_fetch(&ticket, Ok(snapshot("10", sample_issues())));
        vm.select_project("20");
        assert!(vm.ready().is_none());
        assert!(vm.assignee_rows().is_empty());
    }
}

mod stale_results {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_older_ticket_cannot_overwrite_newer_selection() {
        let mut vm = ReportViewModel::new();
        let first = vm.select_project("A");
        let second = vm.select_project("B");

        // B resolves first, then the slow A response arrives
        assert!(vm.apply_fetch(&second, Ok(snapshot("B", vec![issue("1", "DONE", Some("Ben"), 0)]))));
        assert!(!vm.apply_fetch(&first, Ok(snapshot("A", sample_issues()))));

        let ready = vm.ready().expect("ready");
        assert_eq!(ready.snapshot.project_id, "B");
        assert_eq!(vm.assignee_names(), vec!["Ben"]);
    }

    #[test]
    fn test_stale_error_does_not_fail_loading_state() {
        let mut vm = ReportViewModel::new();
        let first = vm.select_project("A");
        let _second = vm.select_project("B");
        assert!(!vm.apply_fetch(&first, Err(FetchError::Status { status: 500 }.into())));
        assert!(vm.is_loading());
    }

    #[test]
    fn test_same_project_reselected_uses_newest_ticket() {
        let mut vm = ReportViewModel::new();
        let first = vm.select_project("A");
        let second = vm.select_project("A");
        assert_ne!(first, second);
        assert!(!vm.apply_fetch(&first, Ok(snapshot("A", sample_issues()))));
        assert!(vm.apply_fetch(&second, Ok(snapshot("A", Vec::new()))));
        assert!(vm.assignee_rows().is_empty());
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("A");
        assert!(vm.apply_fetch(&ticket, Ok(snapshot("A", sample_issues()))));
        assert!(!vm.apply_fetch(&ticket, Err(FetchError::Status { status: 500 }.into())));
        assert!(vm.ready().is_some());
    }
}

mod failures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fetch_error_enters_failed() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("10");
        vm.apply_fetch(&ticket, Err(FetchError::Transport("connection refused".to_string()).into()));

        let error = vm.error().expect("error");
        assert_eq!(error.code(), "FETCH_FAILED");
        assert!(error.is_retryable());
        assert!(vm.assignee_rows().is_empty());
        assert!(vm.status_rows().is_empty());
    }

    #[test]
    fn test_no_active_sprint_is_distinct() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("10");
        vm.apply_fetch(
            &ticket,
            Err(ReportError::NoActiveSprint {
                project_id: "10".to_string(),
            }),
        );
        match vm.state() {
            ReportState::Failed { project_id, error } => {
                assert_eq!(project_id, "10");
                assert_eq!(error.code(), "NO_ACTIVE_SPRINT");
                assert!(!error.is_retryable());
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_data_error_is_reported() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("10");
        vm.apply_fetch(&ticket, Err(DataError::new("PRJ-1", "missing status").into()));
        let error = vm.error().expect("error");
        assert_eq!(error.code(), "DATA_ERROR");
        assert!(error.to_string().contains("PRJ-1"));
    }

    #[test]
    fn test_retry_reissues_ticket_for_same_project() {
        let mut vm = ReportViewModel::new();
        assert!(vm.retry().is_none());

        let ticket = vm.select_project("10");
        vm.apply_fetch(&ticket, Err(FetchError::Status { status: 503 }.into()));
        let retry = vm.retry().expect("retry ticket");
        assert_eq!(retry.project_id, "10");
        assert!(retry.generation > ticket.generation);
        assert!(vm.is_loading());

        assert!(vm.apply_fetch(&retry, Ok(snapshot("10", sample_issues()))));
        assert!(vm.ready().is_some());
    }
}

mod assignee_filter {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_only_affects_assignee_rows() {
        let mut vm = ReportViewModel::new();
        let ticket = vm.select_project("10");
        vm.apply_fetch(&ticket, Ok(snapshot("10", sample_issues())));
        let statuses_before = vm.status_rows().to_vec();

        vm.set_assignee_filter(AssigneeFilter::Named("Ana".to_string()));
        assert_eq!(vm.assignee_rows().len(), 1);
        assert_eq!(vm.assignee_rows()[0].assignee, "Ana");
        assert_eq!(vm.status_rows(), statuses_before.as_slice());
        assert_eq!(vm.active_cards(), 4);
        // The menu still lists everyone
        assert_eq!(vm.assignee_names().len(), 3);

        vm.set_assignee_filter(AssigneeFilter::All);
        assert_eq!(vm.assignee_rows().len(), 3);
    }

    #[test]
    fn test_filter_set_before_load_applies_on_ready() {
        let mut vm = ReportViewModel::new();
        vm.set_assignee_filter(AssigneeFilter::Named("Ben".to_string()));
        let ticket = vm.select_project("10");
        vm.apply_fetch(&ticket, Ok(snapshot("10", sample_issues())));
        assert_eq!(vm.assignee_rows().len(), 1);
        assert_eq!(vm.assignee_rows()[0].assignee, "Ben");
    }
}

mod projects {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_projects_sorted_by_name() {
        let mut vm = ReportViewModel::new();
        vm.set_projects(Ok(vec![
            project("3", "zeta"),
            project("1", "Alpha"),
            project("2", "beta"),
        ]));
        let names: Vec<&str> = vm.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
        assert_eq!(vm.project_name("2"), Some("beta"));
        assert_eq!(vm.project_name("9"), None);
    }

    #[test]
    fn test_project_list_error_keeps_previous_list() {
        let mut vm = ReportViewModel::new();
        vm.set_projects(Ok(vec![project("1", "Alpha")]));
        vm.set_projects(Err(FetchError::Status { status: 502 }));
        assert_eq!(vm.projects().len(), 1);
        assert!(vm.projects_error().is_some());

        vm.set_projects(Ok(vec![project("1", "Alpha")]));
        assert!(vm.projects_error().is_none());
    }
}
