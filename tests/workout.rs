//! Workout view tests: navigation, completion recording and the
//! remote-store failure page.

mod common;

use axum::http::{StatusCode, header};
use common::{
    auth_cookie, body_string, create_test_app, date, get, identity, location, lori, post_form,
    stored_cell,
};

#[tokio::test]
async fn test_authorized_user_sees_todays_workout() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    let response = get(&app.router, "/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Welcome, Lori Smith!"));
    assert!(html.contains("Sunday, March 01, 2026"));
    assert!(html.contains("Rest Day"));
    assert!(html.contains("Not Completed"));
    assert!(html.contains("Click Submit to write your workout completion status to Google Sheets."));
    assert!(html.contains(r#"value="prior" disabled"#));
    assert!(!html.contains(r#"value="next" disabled"#));

    Ok(())
}

#[tokio::test]
async fn test_next_day_renders_markdown_workout() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    let response = post_form(&app.router, "/navigate", Some(&cookie), &[("action", "next")]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let html = body_string(get(&app.router, "/", Some(&cookie)).await).await;
    assert!(html.contains("Monday, March 02, 2026"));
    assert!(html.contains("<strong>6 x 2 min</strong>"));
    assert!(html.contains(r#"value="next" disabled"#));
    assert!(!html.contains(r#"value="prior" disabled"#));

    Ok(())
}

#[tokio::test]
async fn test_navigation_stops_at_schedule_boundary() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    post_form(&app.router, "/navigate", Some(&cookie), &[("action", "prior")]).await;

    let html = body_string(get(&app.router, "/", Some(&cookie)).await).await;
    assert!(html.contains("Sunday, March 01, 2026"));
    assert!(html.contains(r#"value="prior" disabled"#));

    Ok(())
}

#[tokio::test]
async fn test_today_returns_after_navigating() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    post_form(&app.router, "/navigate", Some(&cookie), &[("action", "next")]).await;
    post_form(&app.router, "/navigate", Some(&cookie), &[("action", "today")]).await;

    let html = body_string(get(&app.router, "/", Some(&cookie)).await).await;
    assert!(html.contains("Sunday, March 01, 2026"));

    Ok(())
}

#[tokio::test]
async fn test_unscheduled_today_shows_no_workout() -> anyhow::Result<()> {
    let app = create_test_app(date(2, 28));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    let html = body_string(get(&app.router, "/", Some(&cookie)).await).await;
    assert!(html.contains("Saturday, February 28, 2026"));
    assert!(html.contains("No workout is scheduled for this day."));
    assert!(!html.contains("Did you complete the workout?"));
    assert!(html.contains(r#"value="prior" disabled"#));
    assert!(!html.contains(r#"value="next" disabled"#));
    assert!(html.contains("Click Submit to write your workout completion status to Google Sheets."));

    Ok(())
}

#[tokio::test]
async fn test_status_line_persists_on_unscheduled_day() -> anyhow::Result<()> {
    let app = create_test_app(date(2, 28));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    post_form(&app.router, "/navigate", Some(&cookie), &[("action", "next")]).await;
    post_form(&app.router, "/complete", Some(&cookie), &[("completed", "yes")]).await;
    post_form(&app.router, "/navigate", Some(&cookie), &[("action", "today")]).await;

    let html = body_string(get(&app.router, "/", Some(&cookie)).await).await;
    assert!(html.contains("No workout is scheduled for this day."));
    assert!(html.contains("for Sunday, March 01, 2026 has been written to Google Sheets."));

    Ok(())
}

#[tokio::test]
async fn test_sessions_navigate_independently() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let lori_cookie = auth_cookie(&app.config, &lori(), "lori-session");
    let jonathan = identity("jonathan@example.com", "Jonathan Smith", "Jonathan");
    let jonathan_cookie = auth_cookie(&app.config, &jonathan, "jonathan-session");

    post_form(&app.router, "/navigate", Some(&lori_cookie), &[("action", "next")]).await;

    let html = body_string(get(&app.router, "/", Some(&jonathan_cookie)).await).await;
    assert!(html.contains("Sunday, March 01, 2026"));
    assert!(html.contains("Welcome, Jonathan Smith!"));
    assert!(html.contains("Completed"));

    Ok(())
}

#[tokio::test]
async fn test_kinda_records_partial_completion_with_explanation() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    let response = post_form(
        &app.router,
        "/complete",
        Some(&cookie),
        &[("completed", "kinda"), ("explanation", "walked instead")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.gateway.writes(), 1);

    assert_eq!(
        stored_cell(&app.gateway, "3/1/2026", "Lori Completed"),
        "Partially Completed"
    );
    assert_eq!(
        stored_cell(&app.gateway, "3/1/2026", "Lori Comment"),
        "walked instead"
    );
    assert_eq!(
        stored_cell(&app.gateway, "3/1/2026", "Jonathan Completed"),
        "Completed"
    );
    assert_eq!(
        stored_cell(&app.gateway, "3/2/2026", "Miriam Comment"),
        "felt great"
    );

    let html = body_string(get(&app.router, "/", Some(&cookie)).await).await;
    assert!(html.contains("Partially Completed"));
    assert!(html.contains("walked instead"));
    assert!(html.contains("for Sunday, March 01, 2026 has been written to Google Sheets."));

    Ok(())
}

#[tokio::test]
async fn test_yes_discards_explanation() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    post_form(
        &app.router,
        "/complete",
        Some(&cookie),
        &[("completed", "yes"), ("explanation", "not saved")],
    )
    .await;

    assert_eq!(
        stored_cell(&app.gateway, "3/1/2026", "Lori Completed"),
        "Completed"
    );
    assert_eq!(stored_cell(&app.gateway, "3/1/2026", "Lori Comment"), "");

    Ok(())
}

#[tokio::test]
async fn test_kinda_without_explanation_is_rejected() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    let response = post_form(
        &app.router,
        "/complete",
        Some(&cookie),
        &[("completed", "kinda"), ("explanation", "")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body_string(response)
            .await
            .contains("Please explain what you were able to complete.")
    );
    assert_eq!(app.gateway.writes(), 0);

    Ok(())
}

#[tokio::test]
async fn test_unscheduled_user_cannot_record() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let guest = identity("guest@example.com", "Guest Person", "Guest");
    let cookie = auth_cookie(&app.config, &guest, "guest-session");

    let html = body_string(get(&app.router, "/", Some(&cookie)).await).await;
    assert!(html.contains("Guest is not on the training plan"));
    assert!(!html.contains("Did you complete the workout?"));

    let response = post_form(&app.router, "/complete", Some(&cookie), &[("completed", "yes")]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(response).await.contains("unknown user Guest"));
    assert_eq!(app.gateway.writes(), 0);

    Ok(())
}

#[tokio::test]
async fn test_unreachable_sheet_offers_retry() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");
    app.gateway.set_unavailable(true);

    let response = get(&app.router, "/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_string(response).await.contains("Try again"));

    app.gateway.set_unavailable(false);

    let response = get(&app.router, "/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_failed_write_keeps_previous_status() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));
    let cookie = auth_cookie(&app.config, &lori(), "lori-session");

    get(&app.router, "/", Some(&cookie)).await;
    app.gateway.set_unavailable(true);

    let response = post_form(&app.router, "/complete", Some(&cookie), &[("completed", "yes")]).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    app.gateway.set_unavailable(false);

    let html = body_string(get(&app.router, "/", Some(&cookie)).await).await;
    assert!(html.contains("Not Completed"));
    assert!(html.contains("Click Submit to write your workout completion status to Google Sheets."));
    assert_eq!(
        stored_cell(&app.gateway, "3/1/2026", "Lori Completed"),
        ""
    );

    Ok(())
}

#[tokio::test]
async fn test_pages_are_not_cached() -> anyhow::Result<()> {
    let app = create_test_app(date(3, 1));

    let response = get(&app.router, "/", None).await;
    let cache_control = response.headers()[header::CACHE_CONTROL].to_str()?;
    assert!(cache_control.contains("no-store"));

    let response = get(&app.router, "/static/app.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cache_control = response.headers()[header::CACHE_CONTROL].to_str()?;
    assert!(cache_control.starts_with("public"));

    let response = get(&app.router, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app.router, "/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
