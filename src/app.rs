use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::UserInput;
use crate::auth::{Authenticator, ADMIN_USERNAME};
use crate::config::{AdminBootstrap, SecurityConfig};
use crate::database::Backend;
use crate::handlers::{protected, public};
use crate::middleware::basic_auth_middleware;
use crate::services::{ComplaintService, ServiceResult, UserService};

/// Everything a request handler needs, wired once at startup
#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub complaints: ComplaintService,
    pub users: UserService,
    pub authenticator: Authenticator,
    pub realm: String,
}

impl AppState {
    pub fn new(backend: Backend, realm: impl Into<String>) -> Self {
        let complaint_store = backend.complaint_store();
        let user_store = backend.user_store();

        Self {
            complaints: ComplaintService::new(complaint_store, user_store.clone()),
            users: UserService::new(user_store.clone()),
            authenticator: Authenticator::new(user_store),
            realm: realm.into(),
            backend,
        }
    }

    /// Create the `admin` account from configuration if it does not exist yet
    pub async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> ServiceResult<()> {
        let input = UserInput {
            username: ADMIN_USERNAME.to_string(),
            email: admin.email.clone(),
            password: admin.password.clone(),
        };

        match self.users.ensure(input).await? {
            Some(user) => tracing::info!("Bootstrapped admin user (id {})", user.id),
            None => tracing::debug!("Admin user already present, bootstrap skipped"),
        }
        Ok(())
    }
}

/// Build the full router: open routes plus the Basic-protected API
pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    let router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if security.enable_cors {
        router.layer(cors_layer(&security.cors_origins))
    } else {
        router
    }
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/home", get(public::home))
        // Documentation
        .route("/v3/api-docs", get(public::api_docs))
        .route("/v3/api-docs/*path", get(public::api_docs))
        .route("/swagger-ui.html", get(public::api_docs))
        .route("/swagger-ui/*path", get(public::api_docs))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{complaints, users};

    let complaint_routes = Router::new()
        .route("/", get(complaints::list).post(complaints::create))
        .route(
            "/:id",
            get(complaints::get)
                .put(complaints::update)
                .delete(complaints::delete),
        );

    let user_routes = Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/me", get(users::whoami));

    // Everything under each prefix, matched or not, sits behind the auth layer
    Router::new()
        .nest("/api/complaints", guarded(complaint_routes, state.clone()))
        .nest("/api/users", guarded(user_routes, state))
}

fn guarded(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router
        .fallback(protected::not_found)
        .layer(middleware::from_fn_with_state(state, basic_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
