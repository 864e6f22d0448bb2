use super::*;
use async_trait::async_trait;
use axum::{extract::State, routing::post, Json, Router};
use clap::CommandFactory;
use registration::RelayError;
use shared::protocol::RegistrationSubmission;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const CATALOG: &str = r#"
[[events]]
id = "open-day"
title = "Open Day"
subtitle = "Come along"
date = "Saturday, 7 March 2026"
time = "10:00 AM"
location = "Hall"
description = "An open day."
image = "/open.png"
status = "upcoming"
registration_open = true

[[events]]
id = "closed-day"
title = "Closed Day"
subtitle = "Full"
date = "Sunday, 8 March 2026"
time = "10:00 AM"
location = "Hall"
description = "No more seats."
image = "/closed.png"
status = "upcoming"

[[events]]
id = "linked-day"
title = "Linked Day"
subtitle = "Tickets elsewhere"
date = "Monday, 9 March 2026"
time = "10:00 AM"
location = "Hall"
description = "Book through the ticketing site."
image = "/linked.png"
status = "upcoming"
registration_open = true
registration_link = "https://tickets.example.org/linked-day"
"#;

#[derive(Default)]
struct FakeRelay {
    reject: bool,
    calls: Mutex<Vec<RegistrationSubmission>>,
}

#[async_trait]
impl RegistrationRelay for FakeRelay {
    async fn submit_registration(
        &self,
        submission: &RegistrationSubmission,
    ) -> Result<(), RelayError> {
        self.calls.lock().expect("calls").push(submission.clone());
        if self.reject {
            Err(RelayError::Rejected("invalid access key".into()))
        } else {
            Ok(())
        }
    }
}

fn catalog() -> Catalog {
    Catalog::from_toml_str(CATALOG).expect("catalog")
}

fn register_args(event_id: &str) -> RegisterArgs {
    RegisterArgs {
        event_id: event_id.into(),
        name: "Kavitha".into(),
        email: "kavitha@example.com".into(),
        phone: "0400000000".into(),
        attendees: AttendeeCount::Two,
        requirements: "Vegetarian".into(),
        access_key: "cli-key".into(),
        endpoint: None,
    }
}

async fn spawn_relay_stub(
    reply: &'static str,
) -> (String, Arc<Mutex<Vec<serde_json::Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(
            "/submit",
            post(
                move |State(received): State<Arc<Mutex<Vec<serde_json::Value>>>>,
                      Json(body): Json<serde_json::Value>| async move {
                    received.lock().expect("received").push(body);
                    reply
                },
            ),
        )
        .with_state(received.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}/submit"), received)
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn list_accepts_status_filter() {
    let cli = Cli::try_parse_from(["tools", "list", "--status", "ongoing"]).expect("parse");
    assert!(matches!(
        cli.command,
        Command::List {
            status: Some(EventStatus::Ongoing)
        }
    ));
    assert!(Cli::try_parse_from(["tools", "list", "--status", "cancelled"]).is_err());
}

#[test]
fn register_defaults_to_one_attendee() {
    let cli = Cli::try_parse_from([
        "tools",
        "--catalog",
        "events.toml",
        "register",
        "pongal-2026",
        "--name",
        "Kavitha",
        "--email",
        "kavitha@example.com",
        "--phone",
        "0400000000",
        "--access-key",
        "key",
    ])
    .expect("parse");
    assert_eq!(cli.catalog.as_deref(), Some(std::path::Path::new("events.toml")));
    match cli.command {
        Command::Register(args) => {
            assert_eq!(args.event_id, "pongal-2026");
            assert_eq!(args.attendees, AttendeeCount::One);
            assert!(args.requirements.is_empty());
            assert!(args.endpoint.is_none());
        }
        other => panic!("expected register, got {other:?}"),
    }
}

#[test]
fn register_parses_five_plus_attendees() {
    let cli = Cli::try_parse_from([
        "tools",
        "register",
        "pongal-2026",
        "--name",
        "Kavitha",
        "--email",
        "kavitha@example.com",
        "--phone",
        "0400000000",
        "--attendees",
        "5+",
        "--access-key",
        "key",
    ])
    .expect("parse");
    assert!(matches!(
        cli.command,
        Command::Register(RegisterArgs {
            attendees: AttendeeCount::FivePlus,
            ..
        })
    ));
}

#[test]
fn build_requires_output_directory() {
    assert!(Cli::try_parse_from(["tools", "build"]).is_err());
    let cli = Cli::try_parse_from(["tools", "build", "--out", "dist", "--assets", "public"])
        .expect("parse");
    match cli.command {
        Command::Build {
            out,
            assets,
            registration_base,
        } => {
            assert_eq!(out, PathBuf::from("dist"));
            assert_eq!(assets, Some(PathBuf::from("public")));
            assert_eq!(registration_base, "");
        }
        other => panic!("expected build, got {other:?}"),
    }
}

#[tokio::test]
async fn register_relays_form_for_open_event() {
    let relay = FakeRelay::default();
    let line = register(&catalog(), register_args("open-day"), &relay)
        .await
        .expect("registered");
    assert_eq!(line, "Registered for Open Day.");

    let calls = relay.calls.lock().expect("calls");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].event, "Open Day");
    assert_eq!(calls[0].attendees, AttendeeCount::Two);
    assert_eq!(calls[0].special_requirements.as_deref(), Some("Vegetarian"));
}

#[tokio::test]
async fn register_refuses_closed_linked_and_unknown_events() {
    let relay = FakeRelay::default();
    let closed = register(&catalog(), register_args("closed-day"), &relay)
        .await
        .expect_err("closed");
    assert!(closed.to_string().contains("not open"));

    let linked = register(&catalog(), register_args("linked-day"), &relay)
        .await
        .expect_err("linked");
    assert!(linked
        .to_string()
        .contains("https://tickets.example.org/linked-day"));

    let unknown = register(&catalog(), register_args("no-such-day"), &relay)
        .await
        .expect_err("unknown");
    assert!(unknown.to_string().contains("no-such-day"));

    assert!(relay.calls.lock().expect("calls").is_empty());
}

#[tokio::test]
async fn register_rejects_invalid_email_before_relaying() {
    let relay = FakeRelay::default();
    let args = RegisterArgs {
        email: "kavitha-at-example".into(),
        ..register_args("open-day")
    };
    let err = register(&catalog(), args, &relay)
        .await
        .expect_err("invalid email");
    assert!(err.to_string().contains("kavitha-at-example"));
    assert!(relay.calls.lock().expect("calls").is_empty());
}

#[tokio::test]
async fn register_surfaces_fixed_message_on_relay_failure() {
    let relay = FakeRelay {
        reject: true,
        ..FakeRelay::default()
    };
    let err = register(&catalog(), register_args("open-day"), &relay)
        .await
        .expect_err("rejected");
    assert_eq!(err.to_string(), registration::SUBMISSION_FAILED_MESSAGE);
}

#[tokio::test]
async fn register_posts_through_configured_endpoint() {
    let (endpoint, received) = spawn_relay_stub(r#"{"success":true}"#).await;
    let args = RegisterArgs {
        endpoint: Some(endpoint),
        ..register_args("open-day")
    };
    let relay = args.relay();

    let line = register(&catalog(), args, &relay).await.expect("registered");
    assert_eq!(line, "Registered for Open Day.");

    let bodies = received.lock().expect("received");
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["access_key"], "cli-key");
    assert_eq!(bodies[0]["event"], "Open Day");
    assert_eq!(bodies[0]["attendees"], "2");
}
