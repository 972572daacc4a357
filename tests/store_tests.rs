use chrono::NaiveDate;
use rcheckin::core::checkin::CheckInLogic;
use rcheckin::core::coupon::{CouponLogic, NewCoupon};
use rcheckin::core::event::EventLogic;
use rcheckin::core::proposal::ProposalLogic;
use rcheckin::core::report::{ReportOptions, execute};
use rcheckin::core::ticket::TicketLogic;
use rcheckin::db::initialize::init_db;
use rcheckin::db::pool::DbPool;
use rcheckin::errors::AppError;
use rcheckin::models::check_in::CheckInOutcome;
use rcheckin::models::coupon::{CouponCheck, DiscountType};
use rcheckin::models::doc_status::DocStatus;
use rcheckin::models::event::NewEvent;
use rcheckin::models::proposal::{NewProposal, ProposalStatus};
use rcheckin::models::ticket::NewTicket;
use rcheckin::utils::slug::slugify;

fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

fn fresh_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("migrate");
    pool
}

fn add_event(pool: &mut DbPool, title: &str) -> String {
    EventLogic::create(
        pool,
        NewEvent {
            title: title.to_string(),
            start_date: Some(day("2025-01-01")),
            end_date: Some(day("2025-01-03")),
            is_published: true,
            ..NewEvent::default()
        },
    )
    .expect("create event")
    .name
}

fn book(pool: &mut DbPool, event: &str, name: &str) -> String {
    book_with_coupon(pool, event, name, None).expect("book ticket")
}

fn book_with_coupon(
    pool: &mut DbPool,
    event: &str,
    name: &str,
    coupon: Option<&str>,
) -> Result<String, AppError> {
    TicketLogic::book(
        pool,
        NewTicket {
            event: event.to_string(),
            attendee_name: name.to_string(),
            attendee_email: format!("{}@example.com", name.to_lowercase()),
            ticket_type: None,
            coupon_code: coupon.map(str::to_string),
        },
        "Normal",
    )
    .map(|t| t.name)
}

fn coupon(code: &str, event: &str, granted: i64) -> NewCoupon {
    NewCoupon {
        code: code.to_string(),
        event: event.to_string(),
        discount_type: DiscountType::Percentage,
        discount_amt: 20.0,
        coupons_granted: granted,
        valid_from: None,
        valid_to: None,
    }
}

#[test]
fn test_event_defaults_and_route() {
    let mut pool = fresh_pool();
    let name = add_event(&mut pool, "Rust Meetup: Q4_2025!");
    assert_eq!(name, "EV001");

    let ev = EventLogic::get(&mut pool, &name).unwrap();
    assert_eq!(ev.route.as_deref(), Some("rust-meetup-q4-2025"));
    assert_eq!(ev.default_ticket_type.as_deref(), Some("Normal"));

    // same title → same slug → rejected
    let dup = EventLogic::create(
        &mut pool,
        NewEvent {
            title: "Rust meetup q4 2025".to_string(),
            start_date: Some(day("2025-02-01")),
            is_published: true,
            ..NewEvent::default()
        },
    );
    assert!(matches!(dup, Err(AppError::Duplicate(_))));
}

#[test]
fn test_event_requires_title_and_ordered_dates() {
    let mut pool = fresh_pool();

    let no_title = EventLogic::create(
        &mut pool,
        NewEvent {
            title: "  ".to_string(),
            start_date: Some(day("2025-01-01")),
            ..NewEvent::default()
        },
    );
    assert!(matches!(no_title, Err(AppError::Validation(_))));

    let backwards = EventLogic::create(
        &mut pool,
        NewEvent {
            title: "Backwards".to_string(),
            start_date: Some(day("2025-01-02")),
            end_date: Some(day("2025-01-01")),
            ..NewEvent::default()
        },
    );
    assert!(matches!(backwards, Err(AppError::Validation(_))));
}

#[test]
fn test_ticket_type_must_exist() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Typed");

    let vip = TicketLogic::book(
        &mut pool,
        NewTicket {
            event: ev.clone(),
            attendee_name: "Ann".to_string(),
            attendee_email: "ann@example.com".to_string(),
            ticket_type: Some("VIP".to_string()),
            coupon_code: None,
        },
        "Normal",
    );
    assert!(matches!(vip, Err(AppError::TicketTypeNotFound { .. })));

    EventLogic::add_ticket_type(&mut pool, &ev, "VIP").unwrap();
    assert!(matches!(
        EventLogic::add_ticket_type(&mut pool, &ev, "VIP"),
        Err(AppError::Duplicate(_))
    ));
}

#[test]
fn test_invalid_email_rejected() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Mail");

    let res = TicketLogic::book(
        &mut pool,
        NewTicket {
            event: ev,
            attendee_name: "Ann".to_string(),
            attendee_email: "not-an-email".to_string(),
            ticket_type: None,
            coupon_code: None,
        },
        "Normal",
    );
    assert!(matches!(res, Err(AppError::Validation(_))));
}

#[test]
fn test_second_check_in_same_day() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Door");
    let t = book(&mut pool, &ev, "Bob");

    let first = CheckInLogic::mark(&mut pool, &t, day("2025-01-01")).unwrap();
    assert_eq!(first, CheckInOutcome::CheckedIn("CI001".to_string()));

    let again = CheckInLogic::mark(&mut pool, &t, day("2025-01-01")).unwrap();
    assert_eq!(again, CheckInOutcome::AlreadyCheckedIn);

    // another day is a new check-in
    let next = CheckInLogic::mark(&mut pool, &t, day("2025-01-02")).unwrap();
    assert_eq!(next, CheckInOutcome::CheckedIn("CI002".to_string()));

    let v = CheckInLogic::verify(&mut pool, &t, day("2025-01-01"))
        .unwrap()
        .expect("ticket exists");
    assert!(v.checked_in);
    assert_eq!(v.attendee_name, "Bob");

    let v = CheckInLogic::verify(&mut pool, &t, day("2025-01-03"))
        .unwrap()
        .expect("ticket exists");
    assert!(!v.checked_in);

    assert!(
        CheckInLogic::verify(&mut pool, "T999", day("2025-01-01"))
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_cancelled_ticket_cannot_check_in() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Cancelled");
    let t = book(&mut pool, &ev, "Bob");

    let cancelled = TicketLogic::cancel(&mut pool, &t).unwrap();
    assert_eq!(cancelled.status, DocStatus::Cancelled);

    let res = CheckInLogic::mark(&mut pool, &t, day("2025-01-01"));
    assert!(matches!(res, Err(AppError::TicketCancelled(_))));

    // cancelling twice fails
    assert!(matches!(
        TicketLogic::cancel(&mut pool, &t),
        Err(AppError::NotSubmitted { .. })
    ));
}

#[test]
fn test_report_from_sqlite() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Two Days");
    let other = add_event(&mut pool, "Elsewhere");

    let bob = book(&mut pool, &ev, "Bob");
    let alice = book(&mut pool, &ev, "alice");
    let _never = book(&mut pool, &ev, "Carol");
    let outsider = book(&mut pool, &other, "Zed");

    CheckInLogic::mark(&mut pool, &bob, day("2025-01-01")).unwrap();
    CheckInLogic::mark(&mut pool, &bob, day("2025-01-02")).unwrap();
    CheckInLogic::mark(&mut pool, &alice, day("2025-01-01")).unwrap();
    CheckInLogic::mark(&mut pool, &outsider, day("2025-01-05")).unwrap();

    let rep = execute(&pool, Some(&ev), &ReportOptions::default()).unwrap();

    assert_eq!(rep.date_axis, vec![day("2025-01-01"), day("2025-01-02")]);
    let tickets: Vec<&str> = rep.rows.iter().map(|r| r.ticket.as_str()).collect();
    assert_eq!(tickets, [alice.as_str(), bob.as_str()]);
    assert_eq!(rep.rows[0].ticket_type.as_deref(), Some("Normal"));
    assert_eq!(rep.chart.as_ref().unwrap().values(), &[2, 1]);
    assert_eq!(rep.summary.last().unwrap().value, 2);
}

#[test]
fn test_cancelled_check_in_excluded_from_report() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Undo");
    let bob = book(&mut pool, &ev, "Bob");

    let CheckInOutcome::CheckedIn(ci) =
        CheckInLogic::mark(&mut pool, &bob, day("2025-01-01")).unwrap()
    else {
        panic!("expected a new check-in");
    };
    CheckInLogic::cancel(&mut pool, &ci).unwrap();

    let rep = execute(&pool, Some(&ev), &ReportOptions::default()).unwrap();
    assert!(rep.rows.is_empty());
    assert!(rep.date_axis.is_empty());
    assert!(rep.chart.is_none());
    assert!(rep.summary.is_empty());
    assert_eq!(rep.columns.len(), 4);

    // after a cancel the same day can be checked in again
    let again = CheckInLogic::mark(&mut pool, &bob, day("2025-01-01")).unwrap();
    assert!(matches!(again, CheckInOutcome::CheckedIn(_)));
}

#[test]
fn test_coupon_usage_limit() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Coupons");

    CouponLogic::create(&mut pool, coupon("ONCE", &ev, 1)).unwrap();
    assert!(matches!(
        CouponLogic::create(&mut pool, coupon("ONCE", &ev, 5)),
        Err(AppError::Duplicate(_))
    ));

    book_with_coupon(&mut pool, &ev, "Ann", Some("ONCE")).unwrap();

    let second = book_with_coupon(&mut pool, &ev, "Ben", Some("ONCE"));
    assert!(matches!(second, Err(AppError::CouponUsedUp(_))));

    match CouponLogic::validate(&mut pool, "ONCE", day("2025-01-01")).unwrap() {
        CouponCheck::Rejected(msg) => assert!(msg.contains("fully used")),
        other => panic!("unexpected {other:?}"),
    }

    // claimed coupons cannot be deleted
    assert!(CouponLogic::delete(&mut pool, "ONCE").is_err());
}

#[test]
fn test_coupon_validity_window() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Window");

    let mut c = coupon("SPRING", &ev, 0);
    c.valid_from = Some(day("2025-03-01"));
    c.valid_to = Some(day("2025-03-31"));
    CouponLogic::create(&mut pool, c).unwrap();

    let early = CouponLogic::validate(&mut pool, "SPRING", day("2025-02-28")).unwrap();
    assert!(matches!(early, CouponCheck::Rejected(m) if m.contains("not active yet")));

    let late = CouponLogic::validate(&mut pool, "SPRING", day("2025-04-01")).unwrap();
    assert!(matches!(late, CouponCheck::Rejected(m) if m == "Coupon has expired."));

    let ok = CouponLogic::validate(&mut pool, "SPRING", day("2025-03-15")).unwrap();
    assert!(matches!(ok, CouponCheck::Valid { .. }));

    let unknown = CouponLogic::validate(&mut pool, "NOPE", day("2025-03-15")).unwrap();
    assert!(matches!(unknown, CouponCheck::Rejected(m) if m == "Invalid coupon code."));

    let mut bad = coupon("BACKWARDS", &ev, 0);
    bad.valid_from = Some(day("2025-03-31"));
    bad.valid_to = Some(day("2025-03-01"));
    assert!(CouponLogic::create(&mut pool, bad).is_err());

    // unclaimed coupons can go
    CouponLogic::delete(&mut pool, "SPRING").unwrap();
}

#[test]
fn test_coupon_from_other_event_rejected() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Mine");
    let other = add_event(&mut pool, "Theirs");

    CouponLogic::create(&mut pool, coupon("THEIRS", &other, 0)).unwrap();
    let res = book_with_coupon(&mut pool, &ev, "Ann", Some("THEIRS"));
    assert!(matches!(res, Err(AppError::Validation(_))));
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("Rust Meetup: Q4_2025!"), "rust-meetup-q4-2025");
    assert_eq!(slugify("  --Hello   World--  "), "hello-world");
    assert_eq!(slugify("!!!"), "");
}

fn propose(pool: &mut DbPool, title: &str, host: Option<&str>) -> String {
    ProposalLogic::create(
        pool,
        NewProposal {
            title: title.to_string(),
            start_date: Some(day("2025-05-10")),
            end_date: Some(day("2025-05-11")),
            category: None,
            host: host.map(str::to_string),
        },
    )
    .expect("create proposal")
    .name
}

#[test]
fn test_ticket_list_keeps_booking_order_past_999() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Big Conf");

    for i in 0..1005 {
        book(&mut pool, &ev, &format!("Guest{}", i));
    }

    let tickets = TicketLogic::list(&mut pool, &ev).unwrap();
    assert_eq!(tickets.len(), 1005);
    assert_eq!(tickets[100].name, "T101");
    assert_eq!(tickets[999].name, "T1000");
    assert_eq!(tickets[1004].name, "T1005");
}

#[test]
fn test_category_slug_and_event_link() {
    let mut pool = fresh_pool();

    let cat = EventLogic::add_category(&mut pool, "Open Source_Days", None, Some("Talks"))
        .unwrap();
    assert_eq!(cat.slug, "open-source-days");
    assert_eq!(cat.description.as_deref(), Some("Talks"));

    let dup = EventLogic::add_category(&mut pool, "open source days", None, None);
    assert!(matches!(dup, Err(AppError::Duplicate(_))));

    // lookup by slug stores the category name
    let ev = EventLogic::create(
        &mut pool,
        NewEvent {
            title: "OSD 2025".to_string(),
            start_date: Some(day("2025-06-01")),
            category: Some("open-source-days".to_string()),
            ..NewEvent::default()
        },
    )
    .unwrap();
    assert_eq!(ev.category.as_deref(), Some("Open Source_Days"));

    let unknown = EventLogic::create(
        &mut pool,
        NewEvent {
            title: "Nowhere".to_string(),
            start_date: Some(day("2025-06-01")),
            category: Some("nope".to_string()),
            ..NewEvent::default()
        },
    );
    assert!(matches!(unknown, Err(AppError::CategoryNotFound(_))));
}

#[test]
fn test_proposal_submit_needs_decision() {
    let mut pool = fresh_pool();
    let p = propose(&mut pool, "Undecided", Some("Hosts Inc"));

    let res = ProposalLogic::submit(&mut pool, &p);
    assert!(matches!(res, Err(AppError::Validation(_))));

    ProposalLogic::review(&mut pool, &p).unwrap();
    let res = ProposalLogic::submit(&mut pool, &p);
    assert!(matches!(res, Err(AppError::Validation(_))));

    let stored = ProposalLogic::get(&mut pool, &p).unwrap();
    assert_eq!(stored.status, ProposalStatus::InReview);
    assert_eq!(stored.doc_status, DocStatus::Draft);
}

#[test]
fn test_approved_proposal_without_host_creates_nothing() {
    let mut pool = fresh_pool();
    let p = propose(&mut pool, "Hostless", None);

    ProposalLogic::approve(&mut pool, &p, None).unwrap();
    let res = ProposalLogic::submit(&mut pool, &p);
    assert!(matches!(res, Err(AppError::Validation(_))));

    assert!(EventLogic::list(&mut pool).unwrap().is_empty());
    let stored = ProposalLogic::get(&mut pool, &p).unwrap();
    assert_eq!(stored.status, ProposalStatus::Approved);
    assert_eq!(stored.doc_status, DocStatus::Draft);
}

#[test]
fn test_approved_proposal_submit_creates_event() {
    let mut pool = fresh_pool();
    EventLogic::add_category(&mut pool, "Meetups", None, None).unwrap();

    let p = ProposalLogic::create(
        &mut pool,
        NewProposal {
            title: "Rust Nights".to_string(),
            start_date: Some(day("2025-05-10")),
            end_date: None,
            category: Some("meetups".to_string()),
            host: None,
        },
    )
    .unwrap()
    .name;
    assert_eq!(p, "EPR001");

    ProposalLogic::approve(&mut pool, &p, Some("Ferris")).unwrap();
    let submitted = ProposalLogic::submit(&mut pool, &p).unwrap();

    assert_eq!(submitted.status, ProposalStatus::EventCreated);
    assert_eq!(submitted.doc_status, DocStatus::Submitted);
    assert_eq!(submitted.host.as_deref(), Some("Ferris"));
    assert_eq!(submitted.event.as_deref(), Some("EV001"));

    let ev = EventLogic::get(&mut pool, "EV001").unwrap();
    assert_eq!(ev.title, "Rust Nights");
    assert_eq!(ev.proposal.as_deref(), Some("EPR001"));
    assert_eq!(ev.category.as_deref(), Some("Meetups"));
    assert_eq!(ev.default_ticket_type.as_deref(), Some("Normal"));
    assert!(!ev.is_published);

    // submitted proposals are frozen
    assert!(matches!(
        ProposalLogic::submit(&mut pool, &p),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        ProposalLogic::reject(&mut pool, &p),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_rejected_proposal_submit_creates_no_event() {
    let mut pool = fresh_pool();
    let p = propose(&mut pool, "Not this year", Some("Someone"));

    ProposalLogic::reject(&mut pool, &p).unwrap();
    let submitted = ProposalLogic::submit(&mut pool, &p).unwrap();

    assert_eq!(submitted.status, ProposalStatus::Rejected);
    assert_eq!(submitted.doc_status, DocStatus::Submitted);
    assert!(submitted.event.is_none());
    assert!(EventLogic::list(&mut pool).unwrap().is_empty());
}

#[test]
fn test_missing_proposal() {
    let mut pool = fresh_pool();
    assert!(matches!(
        ProposalLogic::approve(&mut pool, "EPR404", Some("x")),
        Err(AppError::ProposalNotFound(_))
    ));
}
