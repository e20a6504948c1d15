//! Wire types for the REST surface. Converted from/to domain models at
//! the handler boundary; domain types never serialize directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::model;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    /// Minimum 8 characters; never echoed back.
    pub password: String,
}

impl From<RegisterRequest> for model::Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

/// The deliberately small registration response: id, name, email only.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<model::User> for RegisteredUserDto {
    fn from(user: model::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPairDto {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenDto {
    pub access: String,
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl From<Gender> for model::Gender {
    fn from(g: Gender) -> Self {
        match g {
            Gender::Male => Self::Male,
            Gender::Female => Self::Female,
            Gender::Other => Self::Other,
        }
    }
}

impl From<model::Gender> for Gender {
    fn from(g: model::Gender) -> Self {
        match g {
            model::Gender::Male => Self::Male,
            model::Gender::Female => Self::Female,
            model::Gender::Other => Self::Other,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PatientDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<model::Patient> for PatientDto {
    fn from(p: model::Patient) -> Self {
        Self {
            id: p.id,
            name: p.name,
            age: p.age,
            gender: p.gender.into(),
            address: p.address,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientRequest {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    #[serde(default)]
    pub address: String,
}

impl From<CreatePatientRequest> for model::NewPatient {
    fn from(req: CreatePatientRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender.into(),
            address: req.address,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePatientRequest {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    #[serde(default)]
    pub address: String,
}

impl From<UpdatePatientRequest> for model::PatientUpdate {
    fn from(req: UpdatePatientRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender.into(),
            address: req.address,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PatchPatientRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub address: Option<String>,
}

impl From<PatchPatientRequest> for model::PatientPatch {
    fn from(req: PatchPatientRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender.map(Into::into),
            address: req.address,
        }
    }
}

// ---------------------------------------------------------------------------
// Doctors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, ToSchema)]
pub struct DoctorDto {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<model::Doctor> for DoctorDto {
    fn from(d: model::Doctor) -> Self {
        Self {
            id: d.id,
            name: d.name,
            specialization: d.specialization,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub specialization: String,
}

impl From<CreateDoctorRequest> for model::NewDoctor {
    fn from(req: CreateDoctorRequest) -> Self {
        Self {
            name: req.name,
            specialization: req.specialization,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDoctorRequest {
    pub name: String,
    pub specialization: String,
}

impl From<UpdateDoctorRequest> for model::DoctorUpdate {
    fn from(req: UpdateDoctorRequest) -> Self {
        Self {
            name: req.name,
            specialization: req.specialization,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PatchDoctorRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

impl From<PatchDoctorRequest> for model::DoctorPatch {
    fn from(req: PatchDoctorRequest) -> Self {
        Self {
            name: req.name,
            specialization: req.specialization,
        }
    }
}

// ---------------------------------------------------------------------------
// Mappings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMappingRequest {
    pub patient: Uuid,
    pub doctor: Uuid,
}

/// A freshly created mapping, references by id.
#[derive(Debug, Serialize, ToSchema)]
pub struct MappingRefDto {
    pub id: Uuid,
    pub patient: Uuid,
    pub doctor: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<model::Mapping> for MappingRefDto {
    fn from(m: model::Mapping) -> Self {
        Self {
            id: m.id,
            patient: m.patient_id,
            doctor: m.doctor_id,
            created_at: m.created_at,
        }
    }
}

/// A mapping as listed, with patient and doctor details inlined.
#[derive(Debug, Serialize, ToSchema)]
pub struct MappingDto {
    pub id: Uuid,
    pub patient: PatientDto,
    pub doctor: DoctorDto,
    pub created_at: DateTime<Utc>,
}

impl From<model::MappingDetail> for MappingDto {
    fn from(m: model::MappingDetail) -> Self {
        Self {
            id: m.id,
            patient: m.patient.into(),
            doctor: m.doctor.into(),
            created_at: m.created_at,
        }
    }
}
