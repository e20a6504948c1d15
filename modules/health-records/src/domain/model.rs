//! Domain models. Plain data, no HTTP or storage types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account. Users are created at registration and never
/// updated or deleted by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    /// Also the unique login identifier (email-as-username convention).
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Registration input as received from the caller, password still plain.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        })
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

/// A patient record, owned exclusively by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub address: String,
}

/// Full replacement of a patient's mutable fields (PUT semantics).
#[derive(Debug, Clone)]
pub struct PatientUpdate {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub address: String,
}

/// Partial update (PATCH semantics); absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
}

/// A doctor record, shared across the system and owned by nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
}

#[derive(Debug, Clone)]
pub struct DoctorUpdate {
    pub name: String,
    pub specialization: String,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorPatch {
    pub name: Option<String>,
    pub specialization: Option<String>,
}

/// The join entity associating one patient with one doctor.
/// The (patient, doctor) pair is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A mapping with the referenced patient and doctor inlined, as served by
/// the mapping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDetail {
    pub id: Uuid,
    pub patient: Patient,
    pub doctor: Doctor,
    pub created_at: DateTime<Utc>,
}
