use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use std::{future::Future, sync::Arc};

use crate::{CredentialVerifier, ServerError, StaticCredentials, transactions};
use engine::Engine;

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl ServerState {
    /// State accepting the default credentials.
    pub fn new(engine: Engine) -> Self {
        Self::with_verifier(engine, StaticCredentials::default())
    }

    pub fn with_verifier(engine: Engine, verifier: impl CredentialVerifier + 'static) -> Self {
        Self {
            engine: Arc::new(engine),
            verifier: Arc::new(verifier),
        }
    }
}

/// Every request must carry a Basic `Authorization` header accepted by the
/// state's verifier. A missing or undecodable header counts as a failure.
async fn auth(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(credentials) = request.headers().typed_get::<Authorization<Basic>>() else {
        tracing::debug!("{} {}: missing or malformed credentials", request.method(), request.uri());
        return Err(ServerError::Unauthorized);
    };

    if !state
        .verifier
        .verify(credentials.username(), credentials.password())
    {
        tracing::debug!("{} {}: rejected credentials", request.method(), request.uri());
        return Err(ServerError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Answer CORS preflight requests without authentication.
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    next.run(request).await
}

async fn endpoint_not_found() -> ServerError {
    ServerError::EndpointNotFound
}

fn cors_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/",
            get(transactions::missing_id)
                .put(transactions::missing_id)
                .delete(transactions::missing_id),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .put(transactions::update)
                .delete(transactions::delete),
        )
        .fallback(endpoint_not_found)
        .method_not_allowed_fallback(endpoint_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth))
        .layer(middleware::from_fn(preflight))
        .layer(TraceLayer::new_for_http())
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            ALLOWED_METHODS,
        ))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            ALLOWED_HEADERS,
        ))
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` completes.
pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!("  GET    /transactions       - list all transactions");
    tracing::info!("  GET    /transactions/{{id}}  - get one transaction");
    tracing::info!("  POST   /transactions       - create a transaction");
    tracing::info!("  PUT    /transactions/{{id}}  - update a transaction");
    tracing::info!("  DELETE /transactions/{{id}}  - delete a transaction");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
