//! Row-to-domain conversions.

use crate::domain::error::DomainError;
use crate::domain::model::{Doctor, Mapping, Patient, User};

use super::entity::{doctors, mappings, patients, users};

impl From<users::Model> for User {
    fn from(m: users::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            name: m.name,
            password_hash: m.password_hash,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<doctors::Model> for Doctor {
    fn from(m: doctors::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            specialization: m.specialization,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<mappings::Model> for Mapping {
    fn from(m: mappings::Model) -> Self {
        Self {
            id: m.id,
            patient_id: m.patient_id,
            doctor_id: m.doctor_id,
            created_at: m.created_at,
        }
    }
}

/// Fallible because the stored gender string has to parse back into the
/// enumeration; a row that does not is corrupt.
pub(crate) fn patient_from_model(m: patients::Model) -> Result<Patient, DomainError> {
    let gender = m
        .gender
        .parse()
        .map_err(|()| DomainError::database(format!("unknown stored gender '{}'", m.gender)))?;
    Ok(Patient {
        id: m.id,
        owner_id: m.owner_id,
        name: m.name,
        age: m.age,
        gender,
        address: m.address,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}
