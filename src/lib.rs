pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
    Router,
};

use crate::services::{
    application_service::ApplicationService, job_service::JobService, user_service::UserService,
};
use crate::store::Store;
use crate::utils::uploads::BlobStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub blob_store: BlobStore,
}

impl AppState {
    pub fn new(store: Store, blob_store: BlobStore) -> Self {
        let user_service = UserService::new(store.users.clone());
        let job_service = JobService::new(store.jobs.clone());
        let application_service =
            ApplicationService::new(store.jobs.clone(), store.applications.clone());

        Self {
            store,
            user_service,
            job_service,
            application_service,
            blob_store,
        }
    }
}

/// The API router, shared by `main` and the integration tests. Transport
/// layers (static uploads, CORS, tracing, body limits) are added by the
/// binary.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout));

    let protected = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route("/api/auth/profile", put(routes::auth::update_profile))
        .route(
            "/api/auth/profile-image",
            put(routes::auth::upload_profile_image),
        )
        .route("/api/auth/resume", put(routes::auth::upload_resume))
        .route(
            "/api/jobs",
            get(routes::job::list_active_jobs).post(routes::job::create_job),
        )
        .route("/api/jobs/me", get(routes::job::list_my_jobs))
        .route(
            "/api/jobs/:id",
            get(routes::job::get_job)
                .put(routes::job::update_job)
                .delete(routes::job::delete_job),
        )
        .route("/api/jobs/:id/close", patch(routes::job::close_job))
        .route(
            "/api/jobs/:id/applications",
            post(routes::application::apply).get(routes::application::list_applications_for_job),
        )
        .route(
            "/api/applications/me",
            get(routes::application::list_my_applications),
        )
        .route(
            "/api/applications/recruiter",
            get(routes::application::list_recruiter_applications),
        )
        .route(
            "/api/applications/:id",
            patch(routes::application::update_application_status),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    public.merge(protected).with_state(state)
}
