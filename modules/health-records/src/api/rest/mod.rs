pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;


use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI document for the module's REST surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::register,
        handlers::login,
        handlers::refresh_token,
        handlers::list_patients,
        handlers::create_patient,
        handlers::get_patient,
        handlers::update_patient,
        handlers::patch_patient,
        handlers::delete_patient,
        handlers::list_doctors,
        handlers::create_doctor,
        handlers::get_doctor,
        handlers::update_doctor,
        handlers::patch_doctor,
        handlers::delete_doctor,
        handlers::list_mappings,
        handlers::create_mapping,
        handlers::patient_doctors,
        handlers::delete_mapping,
    ),
    components(schemas(
        caremap_errors::Problem,
        dto::RegisterRequest,
        dto::RegisteredUserDto,
        dto::LoginRequest,
        dto::TokenPairDto,
        dto::RefreshRequest,
        dto::AccessTokenDto,
        dto::Gender,
        dto::PatientDto,
        dto::CreatePatientRequest,
        dto::UpdatePatientRequest,
        dto::PatchPatientRequest,
        dto::DoctorDto,
        dto::CreateDoctorRequest,
        dto::UpdateDoctorRequest,
        dto::PatchDoctorRequest,
        dto::CreateMappingRequest,
        dto::MappingRefDto,
        dto::MappingDto,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and token issuing"),
        (name = "patients", description = "Owner-scoped patient records"),
        (name = "doctors", description = "Shared doctor records"),
        (name = "mappings", description = "Patient-doctor mappings"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
