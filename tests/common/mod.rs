#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;
use trailhead::{Clock, Config, auth::Identity};
use trailhead_schedule::{
    SheetRepository, Table, Worksheets, gateway::MemoryGateway, DEFAULT_CALENDAR_WORKSHEET,
};

pub const HEADER: [&str; 9] = [
    "Date",
    "Day of the Week",
    "Workout",
    "Lori Completed",
    "Lori Comment",
    "Jonathan Completed",
    "Jonathan Comment",
    "Miriam Completed",
    "Miriam Comment",
];

pub struct TestApp {
    pub router: Router,
    pub gateway: Arc<MemoryGateway>,
    pub config: Config,
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

pub fn test_config() -> Config {
    Config::load(Some("tests/fixtures/test.toml".to_string())).unwrap()
}

pub fn fixed_clock(today: NaiveDate) -> Clock {
    Arc::new(move || today)
}

/// 3/1/2026 and 3/2/2026 only.
pub fn march_calendar() -> Table {
    let rows = vec![
        vec![
            "3/1/2026", "Sunday", "Rest Day", "", "", "Completed", "", "", "",
        ],
        vec![
            "3/2/2026",
            "Monday",
            "Hill repeats: **6 x 2 min**",
            "Not Completed",
            "",
            "",
            "",
            "Completed",
            "felt great",
        ],
    ];

    Table::new(
        HEADER.iter().map(|c| c.to_string()).collect(),
        rows.into_iter()
            .map(|row| row.into_iter().map(String::from).collect())
            .collect(),
    )
}

pub fn create_test_app(today: NaiveDate) -> TestApp {
    let config = test_config();
    let gateway = Arc::new(
        MemoryGateway::new().with_table(DEFAULT_CALENDAR_WORKSHEET, march_calendar()),
    );
    let repository = SheetRepository::new(
        gateway.clone(),
        Worksheets::default(),
        config.schedule.users.clone(),
    );

    let router = trailhead::create_app(config.clone(), Arc::new(repository), fixed_clock(today));

    TestApp {
        router,
        gateway,
        config,
    }
}

pub fn lori() -> Identity {
    Identity {
        email: "lori@example.com".to_string(),
        name: "Lori Smith".to_string(),
        given_name: "Lori".to_string(),
    }
}

pub fn identity(email: &str, name: &str, given_name: &str) -> Identity {
    Identity {
        email: email.to_string(),
        name: name.to_string(),
        given_name: given_name.to_string(),
    }
}

/// `Cookie` header value for a signed-in browser session.
pub fn auth_cookie(config: &Config, identity: &Identity, sid: &str) -> String {
    let cookie = trailhead::auth::build_cookie(&config.auth, identity, sid).unwrap();
    format!("{}={}", cookie.name(), cookie.value())
}

pub async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    router
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(
    router: &Router,
    uri: &str,
    cookie: Option<&str>,
    form: &[(&str, &str)],
) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    let body = serde_urlencoded::to_string(form).unwrap();

    router
        .clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// The cell under `column` for `date_key` in the stored calendar sheet.
pub fn stored_cell(gateway: &MemoryGateway, date_key: &str, column: &str) -> String {
    let table = gateway.table(DEFAULT_CALENDAR_WORKSHEET).unwrap();
    let date_index = table.column("Date").unwrap();
    let column_index = table.column(column).unwrap();

    table
        .rows
        .iter()
        .find(|row| row[date_index] == date_key)
        .map(|row| row[column_index].clone())
        .unwrap()
}
