//! Integration tests for the product feed lifecycle: category selection,
//! first page, load more, and stale responses, against a mock API server.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shopfront::api::{ApiClient, ClientOptions};
use shopfront::app::{App, AppEvent};
use shopfront::catalog::{FeedController, FeedOutcome, SortKey};
use shopfront::motion::MotionControl;
use shopfront::ui;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product(id: &str, name: &str, rating: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "views": 10,
        "status": "active",
        "featured": false,
        "categoryIds": ["a"],
        "imageUrl": format!("/images/{id}.jpg"),
        "rating": rating,
        "categories": [{"id": "a", "name": "Fish"}]
    })
}

fn page(data: Vec<Value>, page: u32, total_pages: u32, total: u64) -> Value {
    json!({
        "data": data,
        "pagination": {
            "page": page,
            "limit": 2,
            "total": total,
            "totalPages": total_pages,
            "hasNextPage": page < total_pages,
            "hasPrevPage": page > 1
        }
    })
}

async fn mount_categories(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "a", "name": "Fish"}, {"id": "b", "name": "Meat"}]
        })))
        .mount(server)
        .await;
}

async fn mount_fish_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("categoryId", "a"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![product("0a1", "Salmon", 4.0), product("0a2", "Cod", 4.8)],
            1,
            2,
            3,
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("categoryId", "a"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![product("0a3", "Tuna", 4.9)],
            2,
            2,
            3,
        )))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_category_first_page_then_load_more() {
    let server = MockServer::start().await;
    mount_categories(&server).await;
    mount_fish_pages(&server).await;

    let api = ApiClient::new(&server.uri(), ClientOptions::default()).unwrap();
    let categories = api.fetch_categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Fish");

    let mut feed = FeedController::new(2);
    let ticket = feed.set_category(Some(categories[0].id.clone()));
    let result = api.fetch_products(&ticket.query()).await;
    assert_eq!(feed.apply(&ticket, result), FeedOutcome::Replaced { count: 2 });
    assert_eq!(feed.showing(), (2, 3));

    let ticket = feed.load_more().expect("second page available");
    assert_eq!(ticket.page, 2);
    // A second trigger while the request is in flight issues nothing
    assert!(feed.load_more().is_none());

    let result = api.fetch_products(&ticket.query()).await;
    assert_eq!(
        feed.apply(&ticket, result),
        FeedOutcome::Appended { added: 1, skipped: 0 }
    );

    let names: Vec<&str> = feed.state().records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Salmon", "Cod", "Tuna"]);
    let page_state = feed.state().page.unwrap();
    assert_eq!(page_state.page, 2);
    assert!(!page_state.has_next);
    assert!(feed.load_more().is_none());

    let record = &feed.state().records[2];
    assert_eq!(record.category, "Fish");
    assert_eq!(record.price_label(), "$24.99");
    assert_eq!(record.tag, "Fish");

    // Sorting is a view over the same records
    feed.set_sort(SortKey::Rating);
    let by_rating: Vec<&str> = feed.view().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(by_rating, vec!["Tuna", "Cod", "Salmon"]);
    assert_eq!(feed.state().page.unwrap().page, 2);

    // categories, page 1, page 2 and nothing more
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_all_categories_omits_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param_is_missing("categoryId"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![product("1", "Ribeye", 4.2)],
            1,
            1,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri(), ClientOptions::default()).unwrap();
    let mut feed = FeedController::new(12);
    let ticket = feed.load_initial();
    let result = api.fetch_products(&ticket.query()).await;
    assert_eq!(feed.apply(&ticket, result), FeedOutcome::Replaced { count: 1 });
    assert!(!feed.can_load_more());
}

#[tokio::test]
async fn test_server_error_keeps_records() {
    let server = MockServer::start().await;
    mount_fish_pages(&server).await;

    let api = ApiClient::new(&server.uri(), ClientOptions::default()).unwrap();
    let mut feed = FeedController::new(2);
    let ticket = feed.set_category(Some("a".into()));
    let result = api.fetch_products(&ticket.query()).await;
    feed.apply(&ticket, result);

    // Switching to a category the server fails on leaves the old list up
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("categoryId", "b"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let ticket = feed.set_category(Some("b".into()));
    let result = api.fetch_products(&ticket.query()).await;
    assert!(matches!(feed.apply(&ticket, result), FeedOutcome::Failed(_)));
    assert_eq!(feed.state().records.len(), 2);
    assert!(!feed.state().loading);
    // The failed listing has no pagination to continue from
    assert!(feed.load_more().is_none());
}

#[tokio::test]
async fn test_spawned_loads_report_through_channel() {
    let server = MockServer::start().await;
    mount_categories(&server).await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![product("1", "Ribeye", 4.2), product("2", "Brisket", 4.7)],
            1,
            1,
            2,
        )))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri(), ClientOptions::default()).unwrap();
    let (control, pref) = MotionControl::new(true);
    let mut app = App::new(api, 2, control, pref);
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    ui::spawn_categories_load(&mut app, &tx);
    let ticket = app.feed.load_initial();
    ui::spawn_feed_load(&mut app, ticket, &tx);

    for _ in 0..2 {
        match rx.recv().await.expect("event") {
            AppEvent::CategoriesLoaded(result) => app.apply_categories(result),
            AppEvent::ProductsLoaded { ticket, result } => {
                assert_eq!(
                    app.apply_feed_result(&ticket, result),
                    FeedOutcome::Replaced { count: 2 }
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    assert_eq!(app.categories.len(), 2);
    assert!(!app.categories_loading);
    assert_eq!(app.selected_record().unwrap().name, "Ribeye");
}

#[tokio::test]
async fn test_superseded_request_is_ignored() {
    let server = MockServer::start().await;
    mount_fish_pages(&server).await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("categoryId", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![product("0b1", "Lamb", 4.1)],
            1,
            1,
            1,
        )))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri(), ClientOptions::default()).unwrap();
    let mut feed = FeedController::new(2);
    let fish = feed.set_category(Some("a".into()));
    let meat = feed.set_category(Some("b".into()));

    // Responses arrive out of order: the newer one first
    let meat_result = api.fetch_products(&meat.query()).await;
    let fish_result = api.fetch_products(&fish.query()).await;
    assert_eq!(feed.apply(&meat, meat_result), FeedOutcome::Replaced { count: 1 });
    assert_eq!(feed.apply(&fish, fish_result), FeedOutcome::Stale);

    let names: Vec<&str> = feed.state().records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Lamb"]);
}
