//! Real HTTP server over in-memory storage for behavioural suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping [`ServerFixture`] stops the
//! server even if a step panics.

use std::net::TcpListener;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use marketplace::Trace;
use marketplace::domain::ListingService;
use marketplace::domain::TRACE_ID_HEADER;
use marketplace::domain::ports::FixtureLoginService;
use marketplace::inbound::http::state::{HttpState, HttpStatePorts};
use marketplace::inbound::http::users::{current_user, login, logout};
use marketplace::inbound::http::validation::{json_config, path_config, query_config};
use marketplace::inbound::http::{listings, taxonomy};
use marketplace::outbound::persistence::InMemoryDocumentRepository;
use mockable::DefaultClock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// One recorded HTTP exchange.
#[derive(Debug, Clone)]
pub(crate) struct Reply {
    pub(crate) status: u16,
    pub(crate) trace_id: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) set_cookie: Option<String>,
    pub(crate) body: Value,
}

pub(crate) struct ServerFixture {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    handle: ServerHandle,
}

impl Drop for ServerFixture {
    fn drop(&mut self) {
        let handle = self.handle.clone();
        self.local.block_on(&self.runtime, async move {
            handle.stop(true).await;
        });
    }
}

impl ServerFixture {
    /// Start a server on an ephemeral port.
    pub(crate) fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = LocalSet::new();
        let (base_url, handle) = local
            .block_on(&runtime, async { spawn_server(in_memory_state()) })
            .expect("server should start");
        Self {
            runtime,
            local,
            base_url,
            handle,
        }
    }

    /// Send `method path` with an optional JSON payload and session cookie.
    pub(crate) fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
        cookie: Option<&str>,
    ) -> Reply {
        let url = format!("{}{path}", self.base_url);
        self.local.block_on(&self.runtime, async move {
            let mut request = Client::default().request(method, url);
            if let Some(cookie) = cookie {
                request = request.insert_header((header::COOKIE, cookie.to_owned()));
            }
            let mut response = match payload {
                Some(payload) => request.send_json(payload).await,
                None => request.send().await,
            }
            .expect("request should complete");

            let text_header = |name: &str| {
                response
                    .headers()
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned)
            };
            let status = response.status().as_u16();
            let trace_id = text_header(TRACE_ID_HEADER);
            let location = text_header(header::LOCATION.as_str());
            let set_cookie = text_header(header::SET_COOKIE.as_str());
            let bytes = response.body().await.expect("response body");
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("JSON body")
            };
            Reply {
                status,
                trace_id,
                location,
                set_cookie,
                body,
            }
        })
    }

    /// Sign in and return the `name=value` cookie pair.
    pub(crate) fn sign_in(&self, email: &str, password: &str) -> String {
        let payload = serde_json::json!({ "email": email, "password": password });
        let reply = self.send(Method::POST, "/api/v1/login", Some(&payload), None);
        assert_eq!(reply.status, 200, "login should succeed: {:?}", reply.body);
        reply
            .set_cookie
            .as_deref()
            .and_then(|raw| raw.split(';').next())
            .map(str::to_owned)
            .expect("session cookie")
    }
}

fn in_memory_state() -> HttpState {
    let listings = Arc::new(ListingService::new(
        Arc::new(InMemoryDocumentRepository::default()),
        Arc::new(DefaultClock),
    ));
    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        listings: listings.clone(),
        listings_query: listings,
    })
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

fn spawn_server(state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(session_middleware(key.clone()))
            .service(login)
            .service(logout)
            .service(current_user)
            .configure(taxonomy::configure)
            .configure(listings::configure);

        App::new()
            .app_data(data.clone())
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}
