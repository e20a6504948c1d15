use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;

use caremap_auth::TokenService;

use crate::domain::service::{AccountsService, DoctorsService, MappingsService, PatientsService};
use crate::infra::storage::repos::{
    SeaOrmDoctorsRepository, SeaOrmMappingsRepository, SeaOrmPatientsRepository,
    SeaOrmUsersRepository,
};

use super::handlers;

/// Concrete service types as wired against SeaORM.
pub type Accounts = AccountsService<SeaOrmUsersRepository>;
pub type Patients = PatientsService<SeaOrmPatientsRepository, SeaOrmMappingsRepository>;
pub type Doctors = DoctorsService<SeaOrmDoctorsRepository, SeaOrmMappingsRepository>;
pub type Mappings =
    MappingsService<SeaOrmMappingsRepository, SeaOrmPatientsRepository, SeaOrmDoctorsRepository>;

/// Wire repositories and services against `db` and return the module's
/// router. The `/mappings/{id}` path reads the id as a patient id on GET
/// and as a mapping id on DELETE.
pub fn build_router(db: &DatabaseConnection, tokens: &Arc<TokenService>) -> Router {
    let users_repo = Arc::new(SeaOrmUsersRepository::new(db.clone()));
    let patients_repo = Arc::new(SeaOrmPatientsRepository::new(db.clone()));
    let doctors_repo = Arc::new(SeaOrmDoctorsRepository::new(db.clone()));
    let mappings_repo = Arc::new(SeaOrmMappingsRepository::new(db.clone()));

    let accounts = Arc::new(AccountsService::new(users_repo, tokens.clone()));
    let patients = Arc::new(PatientsService::new(
        patients_repo.clone(),
        mappings_repo.clone(),
    ));
    let doctors = Arc::new(DoctorsService::new(
        doctors_repo.clone(),
        mappings_repo.clone(),
    ));
    let mappings = Arc::new(MappingsService::new(
        mappings_repo,
        patients_repo,
        doctors_repo,
    ));

    Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/token/refresh", post(handlers::refresh_token))
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route(
            "/patients/{id}",
            get(handlers::get_patient)
                .put(handlers::update_patient)
                .patch(handlers::patch_patient)
                .delete(handlers::delete_patient),
        )
        .route(
            "/doctors",
            get(handlers::list_doctors).post(handlers::create_doctor),
        )
        .route(
            "/doctors/{id}",
            get(handlers::get_doctor)
                .put(handlers::update_doctor)
                .patch(handlers::patch_doctor)
                .delete(handlers::delete_doctor),
        )
        .route(
            "/mappings",
            get(handlers::list_mappings).post(handlers::create_mapping),
        )
        .route(
            "/mappings/{id}",
            get(handlers::patient_doctors).delete(handlers::delete_mapping),
        )
        .layer(Extension(accounts))
        .layer(Extension(patients))
        .layer(Extension(doctors))
        .layer(Extension(mappings))
        .layer(Extension(tokens.clone()))
}
