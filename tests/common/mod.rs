#![allow(dead_code)]

use actix_web::dev::ServerHandle;
use actix_web::http::header::{HeaderMap, HeaderName};
use actix_web::web::{self, Data};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use reqwest::Url;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use atcoder_multi_charts::configure_routes;
use atcoder_multi_charts::controller::history::{HistorySource, ProxyHistorySource};
use atcoder_multi_charts::controller::proxy::{ProxyConfig, UpstreamClient};

/// Two rated contests (1/1 and 6/1) with an unrated one in between.
pub const ALICE_HISTORY: &str = r#"[
{"IsRated":true,"Place":2100,"OldRating":0,"NewRating":1200,"Performance":1500,"InnerPerformance":1500,"ContestScreenName":"abc284.contest.atcoder.jp","ContestName":"AtCoder Beginner Contest 284","ContestNameEn":"AtCoder Beginner Contest 284","EndTime":"2023-01-01T22:40:00+09:00"},
{"IsRated":false,"Place":800,"OldRating":1200,"NewRating":1200,"Performance":1900,"InnerPerformance":1900,"ContestScreenName":"arc157.contest.atcoder.jp","ContestName":"AtCoder Regular Contest 157","ContestNameEn":"AtCoder Regular Contest 157","EndTime":"2023-03-01T23:00:00+09:00"},
{"IsRated":true,"Place":950,"OldRating":1200,"NewRating":1400,"Performance":1800,"InnerPerformance":1800,"ContestScreenName":"abc304.contest.atcoder.jp","ContestName":"AtCoder Beginner Contest 304","ContestNameEn":"AtCoder Beginner Contest 304","EndTime":"2023-06-01T22:40:00+09:00"}
]"#;

pub const BOB_HISTORY: &str = r#"[
{"IsRated":true,"Place":5000,"OldRating":0,"NewRating":300,"Performance":700,"InnerPerformance":700,"ContestScreenName":"abc284.contest.atcoder.jp","ContestName":"AtCoder Beginner Contest 284","ContestNameEn":"AtCoder Beginner Contest 284","EndTime":"2023-01-01T22:40:00+09:00"},
{"IsRated":true,"Place":4000,"OldRating":300,"NewRating":500,"Performance":900,"InnerPerformance":900,"ContestScreenName":"abc290.contest.atcoder.jp","ContestName":"AtCoder Beginner Contest 290","ContestNameEn":"AtCoder Beginner Contest 290","EndTime":"2023-02-19T22:40:00+09:00"}
]"#;

/// What the stub saw of one incoming request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
}

impl SeenRequest {
    pub fn header(&self, name: HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

type SeenLog = Mutex<Vec<SeenRequest>>;

pub struct StubUpstream {
    pub base: Url,
    pub hits: Arc<AtomicUsize>,
    seen: Arc<SeenLog>,
    handle: ServerHandle,
}

impl StubUpstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("seen log").clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn stub_history(
    req: HttpRequest,
    path: web::Path<String>,
    hits: Data<AtomicUsize>,
    seen: Data<SeenLog>,
) -> HttpResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    seen.lock().expect("seen log").push(SeenRequest {
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        headers: req.headers().clone(),
    });
    match path.into_inner().as_str() {
        "alice" => HttpResponse::Ok()
            .content_type("application/json")
            .body(ALICE_HISTORY),
        "bob" => HttpResponse::Ok()
            .content_type("application/json")
            .body(BOB_HISTORY),
        "ghost" => HttpResponse::Ok().content_type("application/json").body("[]"),
        "broken" => HttpResponse::Ok().content_type("text/html").body("<html>maintenance</html>"),
        "drifted" => HttpResponse::Ok()
            .content_type("application/json")
            .body(r#"[{"IsRated":true,"Rating":1200}]"#),
        "busy" => HttpResponse::ServiceUnavailable().finish(),
        _ => HttpResponse::NotFound().body("no such user"),
    }
}

/// Stand-in for atcoder.jp on an ephemeral loopback port. It also answers
/// `/api/users/{username}` so it can sit behind the dashboard as its proxy.
pub fn start_stub_upstream() -> std::io::Result<StubUpstream> {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_data = Data::from(Arc::clone(&hits));
    let seen: Arc<SeenLog> = Arc::new(Mutex::new(Vec::new()));
    let seen_data = Data::from(Arc::clone(&seen));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(hits_data.clone())
            .app_data(seen_data.clone())
            .route("/users/{username}/history/json", web::get().to(stub_history))
            .route("/api/users/{username}", web::get().to(stub_history))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok(StubUpstream {
        base: Url::parse(&format!("http://{addr}")).expect("loopback url"),
        hits,
        seen,
        handle,
    })
}

/// A loopback url nothing is listening on.
pub fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("loopback url")
}

pub fn upstream_data(upstream_base: Url, delay: Duration) -> Data<UpstreamClient> {
    Data::new(
        UpstreamClient::new(ProxyConfig {
            upstream_base,
            delay,
        })
        .expect("http client"),
    )
}

pub fn source_data(proxy_base: Url) -> Data<dyn HistorySource> {
    let source: Arc<dyn HistorySource> =
        Arc::new(ProxyHistorySource::new(proxy_base).expect("http client"));
    Data::from(source)
}

/// Runs the full app on a loopback port so the dashboard can reach its proxy.
pub fn start_app(upstream_base: Url) -> std::io::Result<(Url, ServerHandle)> {
    let upstream = upstream_data(upstream_base, Duration::ZERO);
    // The proxy route never touches the history source.
    let source = source_data(closed_port_url());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(upstream.clone())
            .app_data(source.clone())
            .configure(configure_routes)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((
        Url::parse(&format!("http://{addr}")).expect("loopback url"),
        handle,
    ))
}
