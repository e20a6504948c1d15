use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    response::IntoResponse,
};
use caremap_errors::Problem;
use http::StatusCode;
use uuid::Uuid;

use caremap_auth::axum_ext::Authn;

use super::dto::{
    AccessTokenDto, CreateDoctorRequest, CreateMappingRequest, CreatePatientRequest, DoctorDto,
    LoginRequest, MappingDto, MappingRefDto, PatchDoctorRequest, PatchPatientRequest, PatientDto,
    RefreshRequest, RegisterRequest, RegisteredUserDto, TokenPairDto, UpdateDoctorRequest,
    UpdatePatientRequest,
};
use super::error::ApiResult;
use super::routes::{Accounts, Doctors, Mappings, Patients};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisteredUserDto),
        (status = 400, description = "Duplicate email or invalid input", body = Problem),
    ),
)]
pub async fn register(
    Extension(accounts): Extension<Arc<Accounts>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = accounts.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(RegisteredUserDto::from(user))))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPairDto),
        (status = 401, description = "Bad credentials", body = Problem),
    ),
)]
pub async fn login(
    Extension(accounts): Extension<Arc<Accounts>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenPairDto>> {
    let pair = accounts.login(&req.email, &req.password).await?;
    Ok(Json(TokenPairDto {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

#[utoipa::path(
    post,
    path = "/auth/token/refresh",
    tag = "auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenDto),
        (status = 401, description = "Invalid or expired refresh token", body = Problem),
    ),
)]
pub async fn refresh_token(
    Extension(accounts): Extension<Arc<Accounts>>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<AccessTokenDto>> {
    let access = accounts.refresh(&req.refresh).await?;
    Ok(Json(AccessTokenDto { access }))
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/patients",
    tag = "patients",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "The requester's patients, newest first", body = [PatientDto]),
        (status = 401, description = "Missing or invalid token", body = Problem),
    ),
)]
pub async fn list_patients(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Patients>>,
) -> ApiResult<Json<Vec<PatientDto>>> {
    let patients = svc.list(user.id).await?;
    Ok(Json(patients.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/patients",
    tag = "patients",
    security(("bearer_token" = [])),
    request_body = CreatePatientRequest,
    responses(
        (status = 201, description = "Patient created, owned by the requester", body = PatientDto),
        (status = 400, description = "Invalid input", body = Problem),
    ),
)]
pub async fn create_patient(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Patients>>,
    Json(req): Json<CreatePatientRequest>,
) -> ApiResult<impl IntoResponse> {
    let patient = svc.create(user.id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(PatientDto::from(patient))))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    tag = "patients",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = PatientDto),
        (status = 404, description = "Absent or owned by another user", body = Problem),
    ),
)]
pub async fn get_patient(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Patients>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PatientDto>> {
    let patient = svc.get(user.id, id).await?;
    Ok(Json(patient.into()))
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    tag = "patients",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Patient id")),
    request_body = UpdatePatientRequest,
    responses(
        (status = 200, description = "Patient replaced", body = PatientDto),
        (status = 400, description = "Invalid input", body = Problem),
        (status = 404, description = "Absent or owned by another user", body = Problem),
    ),
)]
pub async fn update_patient(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Patients>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePatientRequest>,
) -> ApiResult<Json<PatientDto>> {
    let patient = svc.update(user.id, id, req.into()).await?;
    Ok(Json(patient.into()))
}

#[utoipa::path(
    patch,
    path = "/patients/{id}",
    tag = "patients",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Patient id")),
    request_body = PatchPatientRequest,
    responses(
        (status = 200, description = "Patient updated", body = PatientDto),
        (status = 400, description = "Invalid input", body = Problem),
        (status = 404, description = "Absent or owned by another user", body = Problem),
    ),
)]
pub async fn patch_patient(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Patients>>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchPatientRequest>,
) -> ApiResult<Json<PatientDto>> {
    let patient = svc.patch(user.id, id, req.into()).await?;
    Ok(Json(patient.into()))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    tag = "patients",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 400, description = "Patient still has mappings", body = Problem),
        (status = 404, description = "Absent or owned by another user", body = Problem),
    ),
)]
pub async fn delete_patient(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Patients>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    svc.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Doctors
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/doctors",
    tag = "doctors",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "All doctors, newest first", body = [DoctorDto]),
        (status = 401, description = "Missing or invalid token", body = Problem),
    ),
)]
pub async fn list_doctors(
    Authn(_user): Authn,
    Extension(svc): Extension<Arc<Doctors>>,
) -> ApiResult<Json<Vec<DoctorDto>>> {
    let doctors = svc.list().await?;
    Ok(Json(doctors.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/doctors",
    tag = "doctors",
    security(("bearer_token" = [])),
    request_body = CreateDoctorRequest,
    responses(
        (status = 201, description = "Doctor created", body = DoctorDto),
        (status = 400, description = "Invalid input", body = Problem),
    ),
)]
pub async fn create_doctor(
    Authn(_user): Authn,
    Extension(svc): Extension<Arc<Doctors>>,
    Json(req): Json<CreateDoctorRequest>,
) -> ApiResult<impl IntoResponse> {
    let doctor = svc.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(DoctorDto::from(doctor))))
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    tag = "doctors",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "The doctor", body = DoctorDto),
        (status = 404, description = "No such doctor", body = Problem),
    ),
)]
pub async fn get_doctor(
    Authn(_user): Authn,
    Extension(svc): Extension<Arc<Doctors>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DoctorDto>> {
    let doctor = svc.get(id).await?;
    Ok(Json(doctor.into()))
}

#[utoipa::path(
    put,
    path = "/doctors/{id}",
    tag = "doctors",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Doctor id")),
    request_body = UpdateDoctorRequest,
    responses(
        (status = 200, description = "Doctor replaced", body = DoctorDto),
        (status = 400, description = "Invalid input", body = Problem),
        (status = 404, description = "No such doctor", body = Problem),
    ),
)]
pub async fn update_doctor(
    Authn(_user): Authn,
    Extension(svc): Extension<Arc<Doctors>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDoctorRequest>,
) -> ApiResult<Json<DoctorDto>> {
    let doctor = svc.update(id, req.into()).await?;
    Ok(Json(doctor.into()))
}

#[utoipa::path(
    patch,
    path = "/doctors/{id}",
    tag = "doctors",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Doctor id")),
    request_body = PatchDoctorRequest,
    responses(
        (status = 200, description = "Doctor updated", body = DoctorDto),
        (status = 400, description = "Invalid input", body = Problem),
        (status = 404, description = "No such doctor", body = Problem),
    ),
)]
pub async fn patch_doctor(
    Authn(_user): Authn,
    Extension(svc): Extension<Arc<Doctors>>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchDoctorRequest>,
) -> ApiResult<Json<DoctorDto>> {
    let doctor = svc.patch(id, req.into()).await?;
    Ok(Json(doctor.into()))
}

#[utoipa::path(
    delete,
    path = "/doctors/{id}",
    tag = "doctors",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Doctor id")),
    responses(
        (status = 204, description = "Doctor deleted"),
        (status = 400, description = "Doctor still has mappings", body = Problem),
        (status = 404, description = "No such doctor", body = Problem),
    ),
)]
pub async fn delete_doctor(
    Authn(_user): Authn,
    Extension(svc): Extension<Arc<Doctors>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    svc.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Mappings
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/mappings",
    tag = "mappings",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Mappings over the requester's patients, newest first", body = [MappingDto]),
        (status = 401, description = "Missing or invalid token", body = Problem),
    ),
)]
pub async fn list_mappings(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Mappings>>,
) -> ApiResult<Json<Vec<MappingDto>>> {
    let mappings = svc.list(user.id).await?;
    Ok(Json(mappings.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/mappings",
    tag = "mappings",
    security(("bearer_token" = [])),
    request_body = CreateMappingRequest,
    responses(
        (status = 201, description = "Mapping created", body = MappingRefDto),
        (status = 400, description = "Foreign patient, unknown reference, or duplicate pair", body = Problem),
    ),
)]
pub async fn create_mapping(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Mappings>>,
    Json(req): Json<CreateMappingRequest>,
) -> ApiResult<impl IntoResponse> {
    let mapping = svc.create(user.id, req.patient, req.doctor).await?;
    Ok((StatusCode::CREATED, Json(MappingRefDto::from(mapping))))
}

#[utoipa::path(
    get,
    path = "/mappings/{id}",
    tag = "mappings",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Distinct doctors mapped to the patient", body = [DoctorDto]),
        (status = 404, description = "Patient absent or owned by another user", body = Problem),
    ),
)]
pub async fn patient_doctors(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Mappings>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<DoctorDto>>> {
    let doctors = svc.doctors_for_patient(user.id, id).await?;
    Ok(Json(doctors.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    delete,
    path = "/mappings/{id}",
    tag = "mappings",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Mapping id")),
    responses(
        (status = 204, description = "Mapping removed"),
        (status = 404, description = "Mapping absent or patient owned by another user", body = Problem),
    ),
)]
pub async fn delete_mapping(
    Authn(user): Authn,
    Extension(svc): Extension<Arc<Mappings>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    svc.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
