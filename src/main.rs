use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod data;
mod dom;
mod html;
mod listeners;
mod page;
mod refresh;
mod render;
mod routes;
mod toggle;

use config::Config;
use data::HttpApi;
use page::Page;
use refresh::Generation;

#[derive(Clone)]
pub struct AppState {
    page: Arc<Mutex<Page>>,
    api: Arc<HttpApi>,
    generation: Generation,
}

impl AppState {
    /// Builds the page, loads the author selector and renders the empty
    /// placeholder.
    async fn init(config: &Config) -> Self {
        let api = HttpApi::new(&config.api_base);
        let generation = Generation::default();

        let mut page = Page::new(config.default_user);
        page::init_page(&mut page, &api).await;
        refresh::refresh_posts(&mut page, &api, Some(&[]), &generation.begin()).await;

        Self {
            page: Arc::new(Mutex::new(page)),
            api: Arc::new(api),
            generation,
        }
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/click/:post", post(routes::click))
        .route("/main", get(routes::main_region))
        .route("/select", post(routes::select_default))
        .route("/select/:value", post(routes::select))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("postboard=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("reading posts from {}", config.api_base);

    let state = AppState::init(&config).await;

    let listener = TcpListener::bind(&config.addr).await?;
    tracing::info!("serving on {}", config.addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        extract::{Path as ReqPath, Query},
        Json,
    };
    use serde_json::json;
    use tokio::sync::Notify;

    use crate::dom::{Event, Selector};

    use super::*;

    async fn spawn(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    /// Holds the posts request of one author until released.
    #[derive(Clone, Default)]
    struct Hold {
        user: Option<u32>,
        arrived: Arc<Notify>,
        release: Arc<Notify>,
    }

    fn upstream(hold: Hold) -> Router {
        let user = |id: u32| {
            json!({
                "id": id,
                "name": format!("Author {id}"),
                "company": { "name": format!("Company {id}"), "catchPhrase": "Synergy" }
            })
        };

        Router::new()
            .route("/users", get(move || async move { Json(json!([user(1), user(2)])) }))
            .route(
                "/users/:id",
                get(move |ReqPath(id): ReqPath<u32>| async move { Json(user(id)) }),
            )
            .route(
                "/posts",
                get(move |Query(query): Query<Vec<(String, String)>>| {
                    let hold = hold.clone();
                    async move {
                        let user: u32 = query[0].1.parse().unwrap();
                        if hold.user == Some(user) {
                            hold.arrived.notify_one();
                            hold.release.notified().await;
                        }
                        Json(json!([
                            { "userId": user, "id": user * 10, "title": "First", "body": "..." },
                            { "userId": user, "id": user * 10 + 1, "title": "Second", "body": "..." }
                        ]))
                    }
                }),
            )
            .route(
                "/posts/:id/comments",
                get(|ReqPath(id): ReqPath<u32>| async move {
                    Json(json!([
                        { "postId": id, "id": 1, "name": "Reader", "email": "reader@example.com", "body": "Nice" }
                    ]))
                }),
            )
    }

    fn config(api_base: String) -> Config {
        Config {
            api_base,
            default_user: data::UserId(1),
            addr: "127.0.0.1:0".into(),
        }
    }

    async fn post_text(client: reqwest::Client, url: String) -> String {
        client.post(url).send().await.unwrap().text().await.unwrap()
    }

    #[tokio::test]
    async fn serves_selection_and_toggle() {
        let upstream = spawn(upstream(Hold::default())).await;
        let server = spawn(app(AppState::init(&config(upstream)).await)).await;
        let client = reqwest::Client::new();

        let home = client.get(format!("{server}/")).send().await.unwrap().text().await.unwrap();
        assert!(home.contains(r#"<option value="2">Author 2</option>"#));
        assert!(home.contains("Select an Employee to display their posts."));

        let main = post_text(client.clone(), format!("{server}/select/2")).await;
        assert!(main.contains("Post ID: 20"));
        assert!(main.contains("Post ID: 21"));
        assert!(!main.contains("default-text"));

        let toggled = client.post(format!("{server}/click/20")).send().await.unwrap();
        assert_eq!(toggled.status(), reqwest::StatusCode::OK);
        let main = toggled.text().await.unwrap();
        assert!(main.contains(r#"<button data-post-id="20">Hide Comments</button>"#));
        assert!(main.contains(r#"<section data-post-id="20" class="comments visible">"#));

        let missing = client.post(format!("{server}/click/99")).send().await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

        let main = post_text(client.clone(), format!("{server}/select")).await;
        assert!(main.contains("Post ID: 10"));
        assert!(main.contains(r#"<button data-post-id="10">Show Comments</button>"#));
    }

    #[tokio::test]
    async fn later_selection_wins_over_one_in_flight() {
        let hold = Hold {
            user: Some(1),
            ..Hold::default()
        };
        let upstream = spawn(upstream(hold.clone())).await;
        let state = AppState::init(&config(upstream)).await;
        let server = spawn(app(state.clone())).await;
        let client = reqwest::Client::new();
        let started = state.generation.current();

        let first = tokio::spawn(post_text(client.clone(), format!("{server}/select/1")));
        hold.arrived.notified().await;

        let second = tokio::spawn(post_text(client.clone(), format!("{server}/select/2")));
        // The second request takes its ticket before it waits on the page.
        while state.generation.current() < started + 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        hold.release.notify_one();

        let first = first.await.unwrap();
        let second = second.await.unwrap();
        assert!(first.contains("default-text"));
        assert!(!first.contains("Post ID: 10"));
        assert!(second.contains("Post ID: 20"));

        let main = client.get(format!("{server}/main")).send().await.unwrap().text().await.unwrap();
        assert!(main.contains("Post ID: 20"));
        assert!(main.contains("Post ID: 21"));
        assert!(!main.contains("Post ID: 10"));
        assert!(!main.contains("Post ID: 11"));

        let page = state.page.lock().await;
        let buttons = page.doc.query_selector_all(page.main, &Selector::tag("button"));
        assert_eq!(buttons.len(), 2);
        for button in buttons {
            assert_eq!(page.doc.listeners(button, Event::Click).len(), 1);
        }
        assert_eq!(page.listeners.len(), 2);
    }
}
