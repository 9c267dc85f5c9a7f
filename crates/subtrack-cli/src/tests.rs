//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use subtrack_core::{BillingCycle, Portfolio, Settings, SortKey, SubscriptionDraft};

use crate::cli::ViewArgs;
use crate::commands::{self, truncate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Portfolio with two categories and three subscriptions
fn setup_portfolio() -> Portfolio {
    let mut portfolio = Portfolio::new();
    let streaming = portfolio.add_category("Streaming").unwrap();
    let work = portfolio.add_category("Work").unwrap();

    for (name, cost, cycle, category, start) in [
        ("Netflix", 15.49, BillingCycle::Monthly, Some(streaming), date(2024, 1, 5)),
        ("Hulu", 7.99, BillingCycle::Monthly, Some(streaming), date(2024, 3, 1)),
        ("Slack", 96.0, BillingCycle::Yearly, Some(work), date(2023, 6, 10)),
    ] {
        portfolio
            .add_subscription(SubscriptionDraft {
                service_name: name.to_string(),
                cost,
                billing_cycle: cycle,
                category_id: category,
                auto_renews: true,
                start_date: start,
            })
            .unwrap();
    }
    portfolio
}

fn view() -> ViewArgs {
    ViewArgs {
        sort: "start_date".to_string(),
        ..Default::default()
    }
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("this is a long name", 10), "this is...");
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_multibyte() {
    // Counts characters, never splits one
    assert_eq!(truncate("Café Crème Club", 8), "Café ...");
}

#[test]
fn test_resolve_today() {
    assert_eq!(
        commands::resolve_today(Some("2024-04-10")).unwrap(),
        date(2024, 4, 10)
    );
    assert!(commands::resolve_today(None).is_ok());
    assert!(commands::resolve_today(Some("04/10/2024")).is_err());
}

#[test]
fn test_resolve_category() {
    let portfolio = setup_portfolio();
    assert_eq!(commands::resolve_category(&portfolio, "streaming").unwrap(), 1);
    assert_eq!(commands::resolve_category(&portfolio, "2").unwrap(), 2);
    assert!(commands::resolve_category(&portfolio, "none").is_err());
    assert!(commands::resolve_category(&portfolio, "Gaming").is_err());
}

#[test]
fn test_build_query_category_none_is_not_a_keyword() {
    let mut portfolio = setup_portfolio();
    let args = ViewArgs {
        category: Some("none".to_string()),
        ..view()
    };
    // No category called "None" yet, so the filter cannot silently switch off
    assert!(commands::build_query(&portfolio, &args, 1, 10).is_err());

    let none_id = portfolio.add_category("None").unwrap();
    let query = commands::build_query(&portfolio, &args, 1, 10).unwrap();
    assert_eq!(query.category_filter, Some(none_id));
}

#[test]
fn test_cmd_update_category_named_none() {
    let mut portfolio = setup_portfolio();
    let none_id = portfolio.add_category("None").unwrap();

    commands::cmd_update(&mut portfolio, 2, None, None, None, Some("none"), None, None).unwrap();
    assert_eq!(
        portfolio.get_subscription(2).unwrap().subscription.category_id,
        Some(none_id)
    );
}

#[test]
fn test_build_query() {
    let portfolio = setup_portfolio();
    let args = ViewArgs {
        search: Some("net".to_string()),
        category: Some("Streaming".to_string()),
        cycle: Some("monthly".to_string()),
        sort: "cost".to_string(),
    };
    let query = commands::build_query(&portfolio, &args, 3, 5).unwrap();
    assert_eq!(query.search_text, "net");
    assert_eq!(query.category_filter, Some(1));
    assert_eq!(query.billing_cycle_filter, Some(BillingCycle::Monthly));
    assert_eq!(query.sort_key, SortKey::Cost);
    assert_eq!(query.page_index, 3);
    assert_eq!(query.page_size, 5);
}

#[test]
fn test_build_query_rejects_bad_input() {
    let portfolio = setup_portfolio();

    let bad_sort = ViewArgs {
        sort: "price".to_string(),
        ..Default::default()
    };
    assert!(commands::build_query(&portfolio, &bad_sort, 1, 10).is_err());

    let bad_cycle = ViewArgs {
        cycle: Some("Weekly".to_string()),
        ..view()
    };
    assert!(commands::build_query(&portfolio, &bad_cycle, 1, 10).is_err());
}

#[test]
fn test_build_query_empty_sort_uses_default() {
    let portfolio = setup_portfolio();
    let query = commands::build_query(&portfolio, &ViewArgs::default(), 1, 10).unwrap();
    assert_eq!(query.sort_key, SortKey::StartDate);
}

// ========== Snapshot File Tests ==========

#[test]
fn test_init_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subs.json");

    commands::cmd_init(&path, false).unwrap();
    let portfolio = commands::open_portfolio(&path).unwrap();
    assert!(portfolio.subscriptions().is_empty());
    assert!(portfolio.categories().is_empty());

    // Refuses to clobber without --force
    assert!(commands::cmd_init(&path, false).is_err());
    assert!(commands::cmd_init(&path, true).is_ok());
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::open_portfolio(&dir.path().join("missing.json"));
    assert!(result.is_err());
}

#[test]
fn test_open_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"categories": [], "subscriptions": [{"id": 1, "service_name": "X", "cost": -1,
            "billing_cycle": "Monthly", "start_date": "2024-01-01"}]}"#,
    )
    .unwrap();
    assert!(commands::open_portfolio(&path).is_err());
}

#[test]
fn test_save_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subs.json");
    let portfolio = setup_portfolio();

    commands::save_portfolio(&path, &portfolio).unwrap();
    let reopened = commands::open_portfolio(&path).unwrap();
    assert_eq!(reopened.subscriptions(), portfolio.subscriptions());
    assert_eq!(reopened.categories(), portfolio.categories());
}

#[test]
fn test_reopen_keeps_deleted_ids_retired() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subs.json");
    let mut portfolio = setup_portfolio();
    commands::cmd_delete(&mut portfolio, 3).unwrap();
    commands::cmd_category_delete(&mut portfolio, "Work").unwrap();
    commands::save_portfolio(&path, &portfolio).unwrap();

    let mut reopened = commands::open_portfolio(&path).unwrap();
    let id = commands::cmd_add(
        &mut reopened,
        &Settings::default(),
        "Zoom",
        14.99,
        "Monthly",
        None,
        Some("2024-01-01"),
        true,
    )
    .unwrap();
    assert_eq!(id, 4);
    assert_eq!(commands::cmd_category_add(&mut reopened, "Office").unwrap(), 3);
}

#[test]
fn test_load_settings_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::load_settings(Some(&dir.path().join("nope.toml"))).is_err());

    let path = dir.path().join("subtrack.toml");
    std::fs::write(&path, "[query]\npage_size = 3\n").unwrap();
    let settings = commands::load_settings(Some(&path)).unwrap();
    assert_eq!(settings.page_size, 3);
    assert_eq!(settings.horizon_days, Settings::default().horizon_days);
}

// ========== Subscription Command Tests ==========

#[test]
fn test_cmd_list() {
    let portfolio = setup_portfolio();
    let settings = Settings::default();
    assert!(commands::cmd_list(&portfolio, &settings, &view(), 1, None, false).is_ok());
    assert!(commands::cmd_list(&portfolio, &settings, &view(), 1, Some(2), true).is_ok());
    // Past the end clamps to the last page
    assert!(commands::cmd_list(&portfolio, &settings, &view(), 9, Some(2), false).is_ok());
}

#[test]
fn test_cmd_list_rejects_bad_page() {
    let portfolio = setup_portfolio();
    let settings = Settings::default();
    assert!(commands::cmd_list(&portfolio, &settings, &view(), 1, Some(0), false).is_err());
}

#[test]
fn test_cmd_list_empty() {
    let result = commands::cmd_list(
        &Portfolio::new(),
        &Settings::default(),
        &view(),
        1,
        None,
        false,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_add() {
    let mut portfolio = setup_portfolio();
    let id = commands::cmd_add(
        &mut portfolio,
        &Settings::default(),
        "Gym",
        90.0,
        "quarterly",
        Some("work"),
        Some("2024-02-01"),
        false,
    )
    .unwrap();
    assert_eq!(id, 4);

    let added = portfolio.get_subscription(id).unwrap();
    assert_eq!(added.subscription.billing_cycle, BillingCycle::Quarterly);
    assert_eq!(added.subscription.category_id, Some(2));
    assert!(!added.subscription.auto_renews);
    assert_eq!(added.monthly_cost, 30.0);
}

#[test]
fn test_cmd_add_invalid() {
    let mut portfolio = setup_portfolio();
    let settings = Settings::default();
    assert!(commands::cmd_add(&mut portfolio, &settings, "X", 0.0, "Monthly", None, None, true)
        .is_err());
    assert!(commands::cmd_add(&mut portfolio, &settings, "X", 5.0, "Weekly", None, None, true)
        .is_err());
    assert!(
        commands::cmd_add(&mut portfolio, &settings, "X", 5.0, "Monthly", Some("Nope"), None, true)
            .is_err()
    );
    assert_eq!(portfolio.subscriptions().len(), 3);
}

#[test]
fn test_cmd_update_partial() {
    let mut portfolio = setup_portfolio();
    commands::cmd_update(
        &mut portfolio,
        1,
        None,
        Some(17.99),
        None,
        Some("none"),
        None,
        Some(false),
    )
    .unwrap();

    let sub = portfolio.get_subscription(1).unwrap();
    assert_eq!(sub.service_name(), "Netflix");
    assert_eq!(sub.subscription.cost, 17.99);
    assert_eq!(sub.subscription.category_id, None);
    assert!(!sub.subscription.auto_renews);
    assert_eq!(sub.subscription.start_date, date(2024, 1, 5));
    assert!((sub.annualized_cost - 215.88).abs() < 1e-9);
}

#[test]
fn test_cmd_update_missing() {
    let mut portfolio = setup_portfolio();
    let result = commands::cmd_update(&mut portfolio, 99, Some("X"), None, None, None, None, None);
    assert!(result.is_err());
}

#[test]
fn test_cmd_delete() {
    let mut portfolio = setup_portfolio();
    assert!(commands::cmd_delete(&mut portfolio, 2).is_ok());
    assert!(portfolio.get_subscription(2).is_none());
    assert!(commands::cmd_delete(&mut portfolio, 2).is_err());
}

#[test]
fn test_cmd_preview() {
    let settings = Settings::default();
    assert!(commands::cmd_preview(&settings, 120.0, "Quarterly").is_ok());
    assert!(commands::cmd_preview(&settings, -1.0, "Monthly").is_err());
    assert!(commands::cmd_preview(&settings, 10.0, "Daily").is_err());
}

#[test]
fn test_export_csv() {
    let portfolio = setup_portfolio();
    let csv = commands::export_csv(&portfolio, portfolio.subscriptions()).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "id,service_name,category,billing_cycle,cost,monthly_cost,annualized_cost,auto_renews,start_date"
    );
    assert_eq!(
        lines[3],
        "3,Slack,Work,Yearly,96.00,8.00,96.00,true,2023-06-10"
    );
}

#[test]
fn test_export_csv_quotes_commas() {
    let mut portfolio = Portfolio::new();
    portfolio
        .add_subscription(SubscriptionDraft {
            service_name: "News, Daily".to_string(),
            cost: 5.0,
            billing_cycle: BillingCycle::Monthly,
            category_id: None,
            auto_renews: true,
            start_date: date(2024, 1, 1),
        })
        .unwrap();
    let csv = commands::export_csv(&portfolio, portfolio.subscriptions()).unwrap();
    assert!(csv.contains("\"News, Daily\",Uncategorized"));
}

#[test]
fn test_cmd_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let portfolio = setup_portfolio();
    let args = ViewArgs {
        category: Some("Streaming".to_string()),
        sort: "cost".to_string(),
        ..Default::default()
    };

    commands::cmd_export(&portfolio, &args, Some(path.clone())).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let rows: Vec<_> = content.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("1,Netflix"));
    assert!(rows[1].starts_with("2,Hulu"));
}

// ========== Category Command Tests ==========

#[test]
fn test_cmd_categories() {
    let portfolio = setup_portfolio();
    assert!(commands::cmd_categories(&portfolio, &Settings::default()).is_ok());
    assert!(commands::cmd_categories(&Portfolio::new(), &Settings::default()).is_ok());
}

#[test]
fn test_cmd_category_add() {
    let mut portfolio = setup_portfolio();
    assert_eq!(commands::cmd_category_add(&mut portfolio, "Fitness").unwrap(), 3);
    assert!(commands::cmd_category_add(&mut portfolio, "fitness").is_err());
    assert!(commands::cmd_category_add(&mut portfolio, "  ").is_err());
}

#[test]
fn test_cmd_category_rename() {
    let mut portfolio = setup_portfolio();
    commands::cmd_category_rename(&mut portfolio, "Work", "Office").unwrap();
    assert_eq!(portfolio.category_name(Some(2)), "Office");
    assert!(commands::cmd_category_rename(&mut portfolio, "Gaming", "X").is_err());
    assert!(commands::cmd_category_rename(&mut portfolio, "Office", "streaming").is_err());
}

#[test]
fn test_cmd_category_delete() {
    let mut portfolio = setup_portfolio();
    commands::cmd_category_delete(&mut portfolio, "1").unwrap();
    assert!(portfolio.get_category(1).is_none());
    assert_eq!(
        portfolio.category_name(portfolio.get_subscription(1).unwrap().subscription.category_id),
        "Uncategorized"
    );
    assert!(commands::cmd_category_delete(&mut portfolio, "1").is_err());
}

// ========== Dashboard / Renewal Tests ==========

#[test]
fn test_cmd_dashboard() {
    let portfolio = setup_portfolio();
    let result = commands::cmd_dashboard(&portfolio, &Settings::default(), date(2024, 4, 1));
    assert!(result.is_ok());
}

#[test]
fn test_cmd_dashboard_empty() {
    let result = commands::cmd_dashboard(&Portfolio::new(), &Settings::default(), date(2024, 4, 1));
    assert!(result.is_ok());
}

#[test]
fn test_cmd_renewals() {
    let portfolio = setup_portfolio();
    let settings = Settings::default();
    assert!(commands::cmd_renewals(&portfolio, &settings, None, date(2024, 4, 1)).is_ok());
    assert!(commands::cmd_renewals(&portfolio, &settings, Some(0), date(2024, 4, 1)).is_ok());
    assert!(commands::cmd_renewals(&Portfolio::new(), &settings, Some(7), date(2024, 4, 1)).is_ok());
}
