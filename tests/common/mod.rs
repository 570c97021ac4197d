#![allow(dead_code)]

use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use shortlink::routes::routes;
use shortlink::state::AppState;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const CODE_LENGTH: usize = 6;

/// In-memory app state; the returned repository lets tests inspect stored rows.
pub fn create_memory_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let state = AppState::new(repo.clone() as Arc<dyn LinkRepository>, CODE_LENGTH);
    (state, repo)
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    let repo: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    AppState::new(repo, CODE_LENGTH)
}

/// Full route table over an in-memory store, without rate limiting.
pub fn memory_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let (state, repo) = create_memory_state();
    let server = TestServer::new(routes().with_state(state)).unwrap();
    (server, repo)
}

pub fn pg_server(pool: PgPool) -> TestServer {
    TestServer::new(routes().with_state(create_pg_state(pool))).unwrap()
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO links (code, target_url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_deleted_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (code, target_url, deleted_at) VALUES ($1, $2, NOW()) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn total_clicks(pool: &PgPool, id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT total_clicks FROM links WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts a fixed peer address so per-IP middleware can run without a socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Route table behind the per-IP rate limiter.
pub fn rate_limited_router(state: AppState, per_second: u64, burst: u32) -> Router {
    routes()
        .layer(shortlink::api::middleware::rate_limit::layer(per_second, burst))
        .with_state(state)
        .layer(MockConnectInfoLayer)
}
