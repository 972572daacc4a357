use chrono::NaiveDate;
use rcheckin::core::report::{
    AttendanceSource, CheckInEntry, ReportOptions, TOTAL_LABEL, TicketInfo, execute,
};
use rcheckin::errors::AppResult;
use rcheckin::models::report::FieldType;

/// In-memory store: (event, ticket, date) check-ins plus ticket details.
#[derive(Default)]
struct FakeStore {
    check_ins: Vec<(String, String, Option<NaiveDate>)>,
    tickets: Vec<TicketInfo>,
}

impl FakeStore {
    fn ticket(mut self, name: &str, attendee: Option<&str>) -> Self {
        self.tickets.push(TicketInfo {
            name: name.to_string(),
            attendee_name: attendee.map(str::to_string),
            attendee_email: attendee.map(|a| format!("{}@example.com", a.to_lowercase())),
            ticket_type: Some("Normal".to_string()),
        });
        self
    }

    fn check_in(mut self, event: &str, ticket: &str, date: Option<&str>) -> Self {
        self.check_ins.push((
            event.to_string(),
            ticket.to_string(),
            date.map(|d| d.parse().expect("valid date")),
        ));
        self
    }
}

impl AttendanceSource for FakeStore {
    fn check_in_dates(&self, event: &str) -> AppResult<Vec<NaiveDate>> {
        let mut dates: Vec<NaiveDate> = self
            .check_ins
            .iter()
            .filter(|(e, _, _)| e == event)
            .filter_map(|(_, _, d)| *d)
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    fn submitted_check_ins(&self, event: &str) -> AppResult<Vec<CheckInEntry>> {
        Ok(self
            .check_ins
            .iter()
            .filter(|(e, _, _)| e == event)
            .map(|(_, t, d)| CheckInEntry {
                ticket: t.clone(),
                date: *d,
            })
            .collect())
    }

    fn tickets_by_ids(&self, ids: &[String]) -> AppResult<Vec<TicketInfo>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| ids.contains(&t.name))
            .cloned()
            .collect())
    }
}

fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

fn two_day_store() -> FakeStore {
    FakeStore::default()
        .ticket("T1", Some("Bob"))
        .ticket("T2", Some("alice"))
        .check_in("EV1", "T1", Some("2025-01-01"))
        .check_in("EV1", "T1", Some("2025-01-02"))
        .check_in("EV1", "T2", Some("2025-01-01"))
}

#[test]
fn test_two_day_example() {
    let rep = execute(&two_day_store(), Some("EV1"), &ReportOptions::default()).unwrap();

    assert_eq!(rep.date_axis, vec![day("2025-01-01"), day("2025-01-02")]);

    let labels: Vec<&str> = rep.columns.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "Ticket",
            "Attendee Name",
            "Attendee Email",
            "Ticket Type",
            "1 Jan",
            "2 Jan"
        ]
    );
    assert_eq!(rep.columns[4].fieldname, "day_0");
    assert_eq!(rep.columns[5].fieldtype, FieldType::Check);
    assert_eq!(rep.columns[0].options.as_deref(), Some("Event Ticket"));

    // alice sorts before Bob (case-insensitive)
    assert_eq!(rep.rows[0].ticket, "T2");
    assert_eq!(rep.rows[0].attendance, vec![true, false]);
    assert_eq!(rep.rows[1].ticket, "T1");
    assert_eq!(rep.rows[1].attendance, vec![true, true]);

    let chart = rep.chart.as_ref().expect("chart");
    assert_eq!(chart.values(), &[2, 1]);
    assert_eq!(chart.data.labels, ["1 Jan", "2 Jan"]);
    assert_eq!(chart.chart_type, "bar");
    assert_eq!(chart.colors, ["#4F46E5"]);

    let summary: Vec<(usize, &str)> = rep
        .summary
        .iter()
        .map(|s| (s.value, s.label.as_str()))
        .collect();
    assert_eq!(
        summary,
        [(2, "1 Jan 2025"), (1, "2 Jan 2025"), (2, TOTAL_LABEL)]
    );
    assert!(rep.summary.iter().all(|s| s.datatype == "Int"));
}

#[test]
fn test_chart_matches_summary_and_rows() {
    let rep = execute(&two_day_store(), Some("EV1"), &ReportOptions::default()).unwrap();
    let values = rep.chart.as_ref().unwrap().values().to_vec();

    for (i, v) in values.iter().enumerate() {
        let present = rep.rows.iter().filter(|r| r.attendance[i]).count();
        assert_eq!(*v, present);
        assert_eq!(rep.summary[i].value, present);
    }
    assert_eq!(rep.summary.last().unwrap().value, rep.rows.len());
}

#[test]
fn test_event_without_check_ins() {
    let store = FakeStore::default().ticket("T1", Some("Bob"));
    let rep = execute(&store, Some("EV1"), &ReportOptions::default()).unwrap();

    assert_eq!(rep.columns.len(), 4);
    assert!(rep.rows.is_empty());
    assert!(rep.chart.is_none());
    assert!(rep.summary.is_empty());
}

#[test]
fn test_missing_or_blank_event_is_empty() {
    let store = two_day_store();

    for event in [None, Some(""), Some("   ")] {
        let rep = execute(&store, event, &ReportOptions::default()).unwrap();
        assert!(rep.columns.is_empty());
        assert!(rep.rows.is_empty());
        assert!(rep.chart.is_none());
        assert!(rep.summary.is_empty());
    }
}

#[test]
fn test_duplicate_same_day_check_ins_count_once() {
    let store = FakeStore::default()
        .ticket("T1", Some("Bob"))
        .check_in("EV1", "T1", Some("2025-02-01"))
        .check_in("EV1", "T1", Some("2025-02-01"));

    let rep = execute(&store, Some("EV1"), &ReportOptions::default()).unwrap();
    assert_eq!(rep.rows.len(), 1);
    assert_eq!(rep.rows[0].attendance, vec![true]);
    assert_eq!(rep.rows[0].days_attended(), 1);
    assert_eq!(rep.chart.unwrap().values(), &[1]);
}

#[test]
fn test_missing_name_sorts_first() {
    let store = FakeStore::default()
        .ticket("T1", Some("zed"))
        .ticket("T2", None)
        .ticket("T3", Some("Amy"))
        .check_in("EV1", "T1", Some("2025-02-01"))
        .check_in("EV1", "T2", Some("2025-02-01"))
        .check_in("EV1", "T3", Some("2025-02-01"));

    let rep = execute(&store, Some("EV1"), &ReportOptions::default()).unwrap();
    let order: Vec<&str> = rep.rows.iter().map(|r| r.ticket.as_str()).collect();
    assert_eq!(order, ["T2", "T3", "T1"]);
}

#[test]
fn test_equal_names_keep_store_order() {
    let store = FakeStore::default()
        .ticket("T1", Some("Sam"))
        .ticket("T2", Some("sam"))
        .check_in("EV1", "T2", Some("2025-02-01"))
        .check_in("EV1", "T1", Some("2025-02-01"));

    let rep = execute(&store, Some("EV1"), &ReportOptions::default()).unwrap();
    let order: Vec<&str> = rep.rows.iter().map(|r| r.ticket.as_str()).collect();
    assert_eq!(order, ["T1", "T2"]);
}

#[test]
fn test_undated_check_in_counts_as_attendee() {
    let store = FakeStore::default()
        .ticket("T1", Some("Bob"))
        .ticket("T2", Some("Cleo"))
        .check_in("EV1", "T1", Some("2025-02-01"))
        .check_in("EV1", "T2", None);

    let rep = execute(&store, Some("EV1"), &ReportOptions::default()).unwrap();
    assert_eq!(rep.rows.len(), 2);
    assert_eq!(rep.rows[1].ticket, "T2");
    assert_eq!(rep.rows[1].attendance, vec![false]);
    assert_eq!(rep.summary.last().unwrap().value, 2);
    assert_eq!(rep.chart.unwrap().values(), &[1]);
}

#[test]
fn test_only_undated_check_ins_has_no_chart() {
    let store = FakeStore::default()
        .ticket("T1", Some("Bob"))
        .check_in("EV1", "T1", None);

    let rep = execute(&store, Some("EV1"), &ReportOptions::default()).unwrap();
    assert_eq!(rep.rows.len(), 1);
    assert!(rep.rows[0].attendance.is_empty());
    assert!(rep.chart.is_none());
    assert_eq!(rep.summary.len(), 1);
    assert_eq!(rep.summary[0].label, TOTAL_LABEL);
}

#[test]
fn test_other_events_and_unknown_tickets_ignored() {
    let store = two_day_store()
        .ticket("T9", Some("Other"))
        .check_in("EV2", "T9", Some("2025-03-01"))
        .check_in("EV1", "GHOST", Some("2025-01-03"));

    let rep = execute(&store, Some("EV1"), &ReportOptions::default()).unwrap();
    let tickets: Vec<&str> = rep.rows.iter().map(|r| r.ticket.as_str()).collect();
    assert_eq!(tickets, ["T2", "T1"]);
    // the orphan check-in still contributes its day to the axis
    assert_eq!(rep.date_axis.len(), 3);
    assert_eq!(rep.chart.unwrap().values(), &[2, 1, 0]);
}

#[test]
fn test_chart_color_option() {
    let opts = ReportOptions {
        chart_color: "#FF0000".to_string(),
    };
    let rep = execute(&two_day_store(), Some("EV1"), &opts).unwrap();
    assert_eq!(rep.chart.unwrap().colors, ["#FF0000"]);
}

#[test]
fn test_row_serializes_day_flags_as_numbers() {
    let rep = execute(&two_day_store(), Some("EV1"), &ReportOptions::default()).unwrap();
    let v = serde_json::to_value(&rep).unwrap();

    assert_eq!(v["rows"][0]["day_0"], 1);
    assert_eq!(v["rows"][0]["day_1"], 0);
    assert_eq!(v["rows"][0]["attendee_name"], "alice");
    assert_eq!(v["chart"]["data"]["datasets"][0]["name"], "Attendees");
    assert!(v.get("date_axis").is_none());
    assert!(v["columns"][1].get("options").is_none());
}
