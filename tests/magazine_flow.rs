//! End-to-end list behavior: events in, requests out, responses applied.

mod common;

use common::{json, page_body, raw, FakeTransport, Harness};
use serde_json::json;

use green_atlas::api::request::ARTICLES_PATH;
use green_atlas::app::state::{NO_ARTICLES_MESSAGE, NO_MATCHES_MESSAGE};
use green_atlas::domain::{SortDirection, SortField, SortKey};
use green_atlas::ui::{ListBody, MagazineView, Screen};
use green_atlas::{AppState, Event};

fn magazine(state: &AppState) -> MagazineView {
    match state.compute_viewmodel(100).screen {
        Screen::Magazine(view) => view,
        other => panic!("expected magazine screen, got {other:?}"),
    }
}

fn item_titles(view: &MagazineView) -> Vec<String> {
    match &view.list {
        ListBody::Items(items) => items.iter().map(|item| item.title.clone()).collect(),
        other => panic!("expected items, got {other:?}"),
    }
}

/// Categories `Climate` and `Oceans`, no tags, and a three-page article list.
fn healthy_server() -> std::sync::Arc<FakeTransport> {
    FakeTransport::new(|_, request| match request.path {
        "/api/categories" => json(200, &json!([{ "id": 1, "name": "Climate" }, { "id": 2, "name": "Oceans" }])),
        "/api/tags" => json(200, &json!([])),
        ARTICLES_PATH => {
            let page: u64 = request.param("page").unwrap_or("0").parse().unwrap();
            json(200, &page_body(&format!("Page{page} Article"), 6, 3, 13))
        }
        other => panic!("unexpected path {other}"),
    })
}

#[tokio::test]
async fn mount_loads_filters_then_first_page() {
    let mut harness = Harness::new(healthy_server());
    harness.send(Event::ShowMagazine).await;

    let urls = harness.transport.urls();
    assert_eq!(urls.len(), 3);
    assert!(urls[..2].contains(&"http://atlas.test/api/categories".to_string()));
    assert!(urls[..2].contains(&"http://atlas.test/api/tags".to_string()));
    assert_eq!(urls[2], "http://atlas.test/api/articles?page=0&size=6&sort=createdAt%2Cdesc");

    let view = magazine(&harness.state);
    assert_eq!(item_titles(&view).len(), 6);
    assert_eq!(view.filter_bar.categories, vec!["Climate", "Oceans"]);
    assert!(view.filter_bar.tags.is_empty());
    assert!(view.filter_errors.is_empty());

    let pager = view.pager.expect("three pages need a pager");
    assert_eq!(pager.indicator, "Page 1 of 3");
    assert!(!pager.has_previous);
    assert!(pager.has_next);
}

#[tokio::test]
async fn paging_walks_forward_and_stops_at_the_ends() {
    let mut harness = Harness::new(healthy_server());
    harness.send(Event::ShowMagazine).await;

    harness.send(Event::PreviousPage).await;
    assert_eq!(harness.transport.requests_to(ARTICLES_PATH).len(), 1);

    harness.send(Event::NextPage).await;
    harness.send(Event::NextPage).await;
    let view = magazine(&harness.state);
    assert_eq!(view.pager.as_ref().unwrap().indicator, "Page 3 of 3");
    assert!(!view.pager.as_ref().unwrap().has_next);
    assert_eq!(item_titles(&view)[0], "Page2 Article 1");

    harness.send(Event::NextPage).await;
    assert_eq!(harness.transport.requests_to(ARTICLES_PATH).len(), 3);
}

#[tokio::test]
async fn changing_any_criterion_returns_to_first_page() {
    let mut harness = Harness::new(healthy_server());
    harness.send(Event::ShowMagazine).await;
    harness.send(Event::NextPage).await;

    harness.send(Event::SearchInput("  coral reef ".into())).await;
    harness.send(Event::SubmitSearch).await;
    harness
        .send(Event::SelectSort(SortKey::new(SortField::Title, SortDirection::Asc)))
        .await;

    let requests = harness.transport.requests_to(ARTICLES_PATH);
    let search = &requests[2];
    assert_eq!(search.param("page"), Some("0"));
    assert_eq!(search.param("search"), Some("coral reef"));

    let sorted = &requests[3];
    assert_eq!(sorted.param("page"), Some("0"));
    assert_eq!(sorted.param("sort"), Some("title,asc"));
    assert_eq!(sorted.param("search"), Some("coral reef"));
    assert_eq!(sorted.param("categoryName"), None);
}

#[tokio::test]
async fn structured_error_message_is_shown_verbatim() {
    let transport = FakeTransport::new(|_, request| match request.path {
        ARTICLES_PATH => json(404, &json!({ "message": "not found" })),
        _ => json(200, &json!([])),
    });
    let mut harness = Harness::new(transport);
    harness.send(Event::ShowMagazine).await;

    let view = magazine(&harness.state);
    assert_eq!(view.list, ListBody::Error("not found".into()));
    assert!(view.pager.is_none());
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_status_text() {
    let transport = FakeTransport::new(|_, request| match request.path {
        ARTICLES_PATH => raw(500, "Internal Server Error", "<html>oops</html>"),
        _ => json(200, &json!([])),
    });
    let mut harness = Harness::new(transport);
    harness.send(Event::ShowMagazine).await;

    assert_eq!(
        magazine(&harness.state).list,
        ListBody::Error("Internal Server Error".into())
    );
}

#[tokio::test]
async fn failed_list_is_retried_by_the_next_action() {
    let transport = FakeTransport::new(|_, request| match (request.path, request.param("tagName")) {
        (ARTICLES_PATH, None) => raw(503, "Service Unavailable", ""),
        (ARTICLES_PATH, Some(_)) => json(200, &page_body("Coastal", 2, 1, 2)),
        _ => json(200, &json!([{ "name": "coast" }])),
    });
    let mut harness = Harness::new(transport);
    harness.send(Event::ShowMagazine).await;
    assert_eq!(magazine(&harness.state).list, ListBody::Error("Service Unavailable".into()));

    harness.send(Event::SelectTag(Some("coast".into()))).await;
    let view = magazine(&harness.state);
    assert_eq!(item_titles(&view), vec!["Coastal 1", "Coastal 2"]);
    assert!(view.pager.is_none());
}

#[tokio::test]
async fn only_the_latest_request_is_applied() {
    let transport = FakeTransport::new(|_, request| match request.path {
        ARTICLES_PATH if request.param("tagName").is_some() => json(200, &page_body("Newer", 1, 1, 1)),
        ARTICLES_PATH => json(200, &page_body("Older", 3, 1, 3)),
        "/api/categories" => json(200, &json!([{ "name": "Climate" }])),
        _ => json(200, &json!([{ "name": "coast" }])),
    });
    let mut harness = Harness::new(transport);
    harness.send(Event::ShowMagazine).await;

    let q1 = harness.send_unanswered(&Event::SelectCategory(Some("Climate".into())));
    let q2 = harness.send_unanswered(&Event::SelectTag(Some("coast".into())));
    assert_eq!(q1.len(), 1);
    assert_eq!(q2.len(), 1);

    // Q2 completes first, then the slower Q1.
    let r2 = harness.dispatcher.handle_message(q2[0].clone()).await;
    let r1 = harness.dispatcher.handle_message(q1[0].clone()).await;
    harness.send(Event::ApiResponse(r2)).await;
    harness.send(Event::ApiResponse(r1)).await;

    assert_eq!(item_titles(&magazine(&harness.state)), vec!["Newer 1"]);
}

#[tokio::test]
async fn filter_lists_fail_independently() {
    let transport = FakeTransport::new(|_, request| match request.path {
        "/api/categories" => raw(502, "Bad Gateway", ""),
        "/api/tags" => json(200, &json!([{ "name": "coast" }, { "name": "rainforest" }])),
        _ => json(200, &page_body("Story", 1, 1, 1)),
    });
    let mut harness = Harness::new(transport);
    harness.send(Event::ShowMagazine).await;

    let view = magazine(&harness.state);
    assert_eq!(view.filter_errors, vec!["Error loading filters: Bad Gateway".to_string()]);
    assert!(view.filter_bar.categories.is_empty());
    assert_eq!(view.filter_bar.tags, vec!["coast", "rainforest"]);
    assert_eq!(item_titles(&view), vec!["Story 1"]);
}

#[tokio::test]
async fn criteria_chosen_while_filters_load_go_into_the_first_fetch() {
    let mut harness = Harness::new(healthy_server());

    let mount = harness.send_unanswered(&Event::ShowMagazine);
    assert_eq!(mount.len(), 1);
    assert!(harness
        .send_unanswered(&Event::SelectSort(SortKey::new(SortField::Title, SortDirection::Asc)))
        .is_empty());
    harness.send_unanswered(&Event::SearchInput("reef".into()));
    assert!(harness.send_unanswered(&Event::SubmitSearch).is_empty());

    let filters = harness.dispatcher.handle_message(mount[0].clone()).await;
    harness.send(Event::ApiResponse(filters)).await;

    let requests = harness.transport.requests_to(ARTICLES_PATH);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].param("sort"), Some("title,asc"));
    assert_eq!(requests[0].param("search"), Some("reef"));
}

#[tokio::test]
async fn filter_selection_waits_for_loaded_options() {
    let mut harness = Harness::new(healthy_server());

    let mount = harness.send_unanswered(&Event::ShowMagazine);
    assert!(harness
        .send_unanswered(&Event::SelectCategory(Some("Climate".into())))
        .is_empty());
    let view = magazine(&harness.state);
    assert!(view.filter_bar.options_loading);
    assert_eq!(view.filter_bar.notice.as_deref(), Some("Categories are still loading"));

    let filters = harness.dispatcher.handle_message(mount[0].clone()).await;
    harness.send(Event::ApiResponse(filters)).await;
    assert_eq!(harness.transport.requests_to(ARTICLES_PATH)[0].param("categoryName"), None);

    harness.send(Event::SelectTag(Some("coast".into()))).await;
    assert_eq!(
        magazine(&harness.state).filter_bar.notice.as_deref(),
        Some("No tags available")
    );

    harness.send(Event::SelectCategory(Some("oceans".into()))).await;
    let requests = harness.transport.requests_to(ARTICLES_PATH);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].param("categoryName"), Some("Oceans"));
    assert!(magazine(&harness.state).filter_bar.notice.is_none());
}

#[tokio::test]
async fn unknown_category_is_refused_and_options_are_shown() {
    let mut harness = Harness::new(healthy_server());
    harness.send(Event::ShowMagazine).await;
    harness.send(Event::SelectCategory(Some("NoSuchCategory".into()))).await;

    assert_eq!(harness.transport.requests_to(ARTICLES_PATH).len(), 1);
    assert!(harness
        .transport
        .urls()
        .iter()
        .all(|url| !url.contains("categoryName")));

    let frame = green_atlas::ui::render(&harness.state, 100);
    assert!(frame.contains("Categories: Climate, Oceans"));
    assert!(frame.contains("Unknown category: NoSuchCategory"));
    assert_eq!(magazine(&harness.state).filter_bar.category, "All Categories");
}

#[tokio::test]
async fn responses_after_leaving_the_list_are_dropped() {
    let mut harness = Harness::new(healthy_server());
    harness.send(Event::ShowMagazine).await;

    let pending = harness.send_unanswered(&Event::NextPage);
    harness.send(Event::ShowChat).await;

    let late = harness.dispatcher.handle_message(pending[0].clone()).await;
    harness.send(Event::ApiResponse(late)).await;

    assert!(!harness.state.magazine.is_mounted());
    assert!(harness.state.magazine.page.is_empty());
}

#[tokio::test]
async fn empty_results_message_depends_on_active_filters() {
    let transport = FakeTransport::new(|_, request| match request.path {
        ARTICLES_PATH => json(200, &json!({ "content": [], "totalPages": 0, "totalElements": 0 })),
        _ => json(200, &json!([])),
    });
    let mut harness = Harness::new(transport);
    harness.send(Event::ShowMagazine).await;
    assert_eq!(
        magazine(&harness.state).list,
        ListBody::Empty(NO_ARTICLES_MESSAGE.to_string())
    );

    harness.send(Event::SearchInput("glacier".into())).await;
    harness.send(Event::SubmitSearch).await;
    let view = magazine(&harness.state);
    assert_eq!(view.list, ListBody::Empty(NO_MATCHES_MESSAGE.to_string()));
    assert!(view.pager.is_none());

    harness.send(Event::ClearAll).await;
    let last = harness.transport.requests_to(ARTICLES_PATH).pop().unwrap();
    assert_eq!(last.param("search"), None);
}
