//! Dashboard sections and the chat conversation over a scripted server.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{json, raw, FakeTransport, Harness};
use serde_json::json;

use green_atlas::api::request::{CHAT_PATH, LIVE_DATA_PATH};
use green_atlas::domain::chat::GREETING;
use green_atlas::ui::{ChatView, DashboardView, Screen, SectionBody, SectionView, Tone};
use green_atlas::{AppState, Event};

fn dashboard(state: &AppState) -> DashboardView {
    match state.compute_viewmodel(100).screen {
        Screen::Dashboard(view) => view,
        other => panic!("expected dashboard screen, got {other:?}"),
    }
}

fn chat(state: &AppState) -> ChatView {
    match state.compute_viewmodel(100).screen {
        Screen::Chat(view) => view,
        other => panic!("expected chat screen, got {other:?}"),
    }
}

fn section<'a>(view: &'a DashboardView, title: &str) -> &'a SectionView {
    view.sections
        .iter()
        .find(|s| s.title == title)
        .unwrap_or_else(|| panic!("no section titled {title}"))
}

fn lines(section: &SectionView) -> Vec<(String, Tone)> {
    match &section.body {
        SectionBody::Lines(lines) => lines.iter().map(|l| (l.text.clone(), l.tone)).collect(),
        other => panic!("expected lines in {}, got {other:?}", section.title),
    }
}

fn live_body() -> serde_json::Value {
    json!({
        "aqi": { "value": 42, "unit": "AQI", "details": "Roseau" },
        "waterQuality": { "value": "75", "unit": "% purity" },
        "temperature": { "value": 29.5, "unit": "°C", "details": "Canefield" }
    })
}

fn dashboard_server(live_calls: Arc<AtomicUsize>) -> Arc<FakeTransport> {
    FakeTransport::new(move |_, request| match request.path {
        LIVE_DATA_PATH => {
            if live_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                json(200, &live_body())
            } else {
                raw(504, "Gateway Timeout", "")
            }
        }
        "/api/predictions" => json(
            200,
            &json!([{
                "type": "Flood Risk",
                "prediction": "High",
                "location": "Layou Valley",
                "timeframe": "Next 48 hours",
                "confidence": "85%",
                "details": "Heavy rainfall expected.",
                "iconName": "alert"
            }]),
        ),
        "/api/rankings" => json(
            200,
            &json!([
                { "name": "Roseau", "score": 88, "trend": "up" },
                { "name": "Portsmouth", "score": "41", "trend": "down" }
            ]),
        ),
        "/api/banner" => raw(204, "No Content", ""),
        other => panic!("unexpected path {other}"),
    })
}

#[tokio::test]
async fn dashboard_loads_every_section() {
    let mut harness = Harness::new(dashboard_server(Arc::new(AtomicUsize::new(0))));
    harness.send(Event::ShowDashboard).await;

    let view = dashboard(&harness.state);
    assert_eq!(view.sections.len(), 4);

    let live = lines(section(&view, "Current Environmental Snapshot"));
    assert_eq!(
        live[0],
        ("Air Quality Index (AQI): 42 AQI (Roseau)".to_string(), Tone::Good)
    );
    assert_eq!(
        live[1],
        ("River Water Quality: 75 % purity (Layou River Monitoring Point)".to_string(), Tone::Moderate)
    );
    assert_eq!(live[2].1, Tone::Elevated);

    let predictions = lines(section(&view, "Environmental Predictions"));
    assert_eq!(predictions[0].0, "[!] Flood Risk - Layou Valley (Next 48 hours)");

    let rankings = lines(section(&view, "Regional Rankings"));
    assert_eq!(rankings.len(), 2);
    assert!(rankings[0].0.starts_with("1. Roseau ▲"));
    assert_eq!(rankings[0].1, Tone::Good);
    assert!(rankings[1].0.ends_with("Score: 41"));
    assert_eq!(rankings[1].1, Tone::Severe);

    let banner = lines(section(&view, "Campaign"));
    assert_eq!(banner[0].0, "Join Our Coastal Cleanup Campaign!");
    assert_eq!(banner[2].0, "Register Now -> /register-cleanup");

    let frame = green_atlas::ui::render(&harness.state, 100);
    assert!(frame.contains("Join Our Coastal Cleanup Campaign!"));
}

#[tokio::test]
async fn one_failing_section_does_not_affect_the_others() {
    let transport = FakeTransport::new(|_, request| match request.path {
        "/api/rankings" => json(500, &json!({ "error": "ranking service down" })),
        "/api/banner" => json(200, &json!({ "headline": "Plant a Mangrove" })),
        _ => json(200, &json!([])),
    });
    let mut harness = Harness::new(transport);
    harness.send(Event::ShowDashboard).await;

    let view = dashboard(&harness.state);
    assert_eq!(
        section(&view, "Regional Rankings").body,
        SectionBody::Error("ranking service down".into())
    );
    assert_eq!(lines(section(&view, "Campaign"))[0].0, "Plant a Mangrove");
    assert_eq!(
        lines(section(&view, "Environmental Predictions"))[0].0,
        "No predictions available."
    );
}

#[tokio::test]
async fn failed_live_poll_keeps_the_last_reading() {
    let live_calls = Arc::new(AtomicUsize::new(0));
    let mut harness = Harness::new(dashboard_server(Arc::clone(&live_calls)));
    harness.send(Event::ShowDashboard).await;
    harness.send(Event::PollLiveData).await;

    assert_eq!(live_calls.load(Ordering::SeqCst), 2);
    let view = dashboard(&harness.state);
    let live = section(&view, "Current Environmental Snapshot");
    assert_eq!(live.stale_error.as_deref(), Some("Gateway Timeout"));
    assert_eq!(lines(live).len(), 3);
}

#[tokio::test]
async fn live_poll_is_ignored_off_the_dashboard() {
    let live_calls = Arc::new(AtomicUsize::new(0));
    let mut harness = Harness::new(dashboard_server(Arc::clone(&live_calls)));
    harness.send(Event::ShowDashboard).await;
    harness.send(Event::ShowChat).await;
    harness.send(Event::PollLiveData).await;

    assert_eq!(live_calls.load(Ordering::SeqCst), 1);

    // Returning does not reload sections that were already fetched.
    harness.send(Event::ShowDashboard).await;
    assert_eq!(live_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn chat_shows_trimmed_replies() {
    let transport = FakeTransport::new(|_, request| match request.path {
        CHAT_PATH => json(200, &json!({ "reply": "  The Layou River reads 75% purity today.  " })),
        other => panic!("unexpected path {other}"),
    });
    let mut harness = Harness::new(Arc::clone(&transport));
    harness.send(Event::ShowChat).await;
    harness.send(Event::SendChat("Is the river safe?".into())).await;

    let sent = transport.requests_to(CHAT_PATH);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, Some(json!({ "message": "Is the river safe?" })));

    let view = chat(&harness.state);
    let texts: Vec<&str> = view.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![GREETING, "Is the river safe?", "The Layou River reads 75% purity today."]
    );
    assert!(view.lines[1].from_user);
    assert!(!view.typing);
}

#[tokio::test]
async fn chat_errors_become_bot_messages() {
    let transport = FakeTransport::new(|_, request| match request.body.as_ref().and_then(|b| b["message"].as_str()) {
        Some("first") => json(200, &json!({ "error": "model offline" })),
        Some("second") => raw(503, "Service Unavailable", "<html></html>"),
        _ => json(200, &json!({})),
    });
    let mut harness = Harness::new(transport);
    harness.send(Event::ShowChat).await;
    harness.send(Event::SendChat("first".into())).await;
    harness.send(Event::SendChat("second".into())).await;
    harness.send(Event::SendChat("third".into())).await;
    harness.send(Event::SendChat("   ".into())).await;

    let view = chat(&harness.state);
    let bot: Vec<&str> = view
        .lines
        .iter()
        .filter(|l| !l.from_user)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(
        bot,
        vec![
            GREETING,
            "Error: model offline",
            "Error: Network response was not ok: Service Unavailable",
            "Sorry, I couldn't understand that.",
        ]
    );
    assert_eq!(view.lines.len(), 7);
}

#[tokio::test]
async fn unanswered_chat_shows_typing_indicator() {
    let transport = FakeTransport::new(|_, _| json(200, &json!({ "reply": "ok" })));
    let mut harness = Harness::new(transport);
    harness.send(Event::ShowChat).await;

    let pending = harness.send_unanswered(&Event::SendChat("hello".into()));
    assert_eq!(pending.len(), 1);
    assert!(chat(&harness.state).typing);

    let reply = harness.dispatcher.handle_message(pending[0].clone()).await;
    harness.send(Event::ApiResponse(reply)).await;
    assert!(!chat(&harness.state).typing);
}
