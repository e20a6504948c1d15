//! In-memory repository fakes shared by the service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{
    Doctor, DoctorPatch, DoctorUpdate, Gender, Mapping, MappingDetail, NewDoctor, NewPatient,
    NewUser, Patient, PatientPatch, PatientUpdate, User,
};
use crate::domain::repos::{
    DoctorsRepository, MappingsRepository, PatientsRepository, UsersRepository,
};

pub(crate) fn user(email: &str, password_hash: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        name: "Alice".to_owned(),
        password_hash: password_hash.to_owned(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn patient(owner: Uuid, name: &str) -> Patient {
    let now = Utc::now();
    Patient {
        id: Uuid::new_v4(),
        owner_id: owner,
        name: name.to_owned(),
        age: 30,
        gender: Gender::Female,
        address: String::new(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn doctor(name: &str) -> Doctor {
    let now = Utc::now();
    Doctor {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        specialization: "Diagnostics".to_owned(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) struct InMemoryUsers(Mutex<Vec<User>>);

impl InMemoryUsers {
    pub(crate) fn new() -> Arc<Self> {
        Self::with(Vec::new())
    }

    pub(crate) fn with(users: Vec<User>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(users)))
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.0.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.0.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        self.0.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

pub(crate) struct InMemoryPatients(Mutex<Vec<Patient>>);

impl InMemoryPatients {
    pub(crate) fn new() -> Arc<Self> {
        Self::with(Vec::new())
    }

    pub(crate) fn with(patients: Vec<Patient>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(patients)))
    }
}

#[async_trait]
impl PatientsRepository for InMemoryPatients {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Patient>, DomainError> {
        let mut rows: Vec<Patient> = self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.owner_id == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_for_owner(&self, owner: Uuid, id: Uuid) -> Result<Option<Patient>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id && p.owner_id == owner)
            .cloned())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Patient>, DomainError> {
        Ok(self.0.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, owner: Uuid, patient: NewPatient) -> Result<Patient, DomainError> {
        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            owner_id: owner,
            name: patient.name,
            age: patient.age,
            gender: patient.gender,
            address: patient.address,
            created_at: now,
            updated_at: now,
        };
        self.0.lock().unwrap().push(patient.clone());
        Ok(patient)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        update: PatientUpdate,
    ) -> Result<Option<Patient>, DomainError> {
        let mut rows = self.0.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|p| p.id == id && p.owner_id == owner) else {
            return Ok(None);
        };
        row.name = update.name;
        row.age = update.age;
        row.gender = update.gender;
        row.address = update.address;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn patch(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: PatientPatch,
    ) -> Result<Option<Patient>, DomainError> {
        let mut rows = self.0.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|p| p.id == id && p.owner_id == owner) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(age) = patch.age {
            row.age = age;
        }
        if let Some(gender) = patch.gender {
            row.gender = gender;
        }
        if let Some(address) = patch.address {
            row.address = address;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.0.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| !(p.id == id && p.owner_id == owner));
        Ok(rows.len() < before)
    }
}

pub(crate) struct InMemoryDoctors(Mutex<Vec<Doctor>>);

impl InMemoryDoctors {
    pub(crate) fn new() -> Arc<Self> {
        Self::with(Vec::new())
    }

    pub(crate) fn with(doctors: Vec<Doctor>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(doctors)))
    }
}

#[async_trait]
impl DoctorsRepository for InMemoryDoctors {
    async fn list(&self) -> Result<Vec<Doctor>, DomainError> {
        let mut rows = self.0.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Doctor>, DomainError> {
        Ok(self.0.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn create(&self, doctor: NewDoctor) -> Result<Doctor, DomainError> {
        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: doctor.name,
            specialization: doctor.specialization,
            created_at: now,
            updated_at: now,
        };
        self.0.lock().unwrap().push(doctor.clone());
        Ok(doctor)
    }

    async fn update(&self, id: Uuid, update: DoctorUpdate) -> Result<Option<Doctor>, DomainError> {
        let mut rows = self.0.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        row.name = update.name;
        row.specialization = update.specialization;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn patch(&self, id: Uuid, patch: DoctorPatch) -> Result<Option<Doctor>, DomainError> {
        let mut rows = self.0.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(specialization) = patch.specialization {
            row.specialization = specialization;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.0.lock().unwrap();
        let before = rows.len();
        rows.retain(|d| d.id != id);
        Ok(rows.len() < before)
    }
}

pub(crate) struct InMemoryMappings {
    rows: Mutex<Vec<Mapping>>,
    patients: Arc<InMemoryPatients>,
    doctors: Arc<InMemoryDoctors>,
}

impl InMemoryMappings {
    pub(crate) fn new(patients: Arc<InMemoryPatients>, doctors: Arc<InMemoryDoctors>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(Vec::new()),
            patients,
            doctors,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl MappingsRepository for InMemoryMappings {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<MappingDetail>, DomainError> {
        let rows = self.rows.lock().unwrap().clone();
        let mut details = Vec::new();
        for row in rows {
            let Some(patient) = self.patients.get(row.patient_id).await? else {
                continue;
            };
            if patient.owner_id != owner {
                continue;
            }
            let doctor = self
                .doctors
                .get(row.doctor_id)
                .await?
                .ok_or_else(|| DomainError::database("mapping references missing doctor"))?;
            details.push(MappingDetail {
                id: row.id,
                patient,
                doctor,
                created_at: row.created_at,
            });
        }
        details.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(details)
    }

    async fn get_for_owner(&self, owner: Uuid, id: Uuid) -> Result<Option<Mapping>, DomainError> {
        let row = self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned();
        let Some(row) = row else { return Ok(None) };
        match self.patients.get(row.patient_id).await? {
            Some(patient) if patient.owner_id == owner => Ok(Some(row)),
            _ => Ok(None),
        }
    }

    async fn exists(&self, patient_id: Uuid, doctor_id: Uuid) -> Result<bool, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.patient_id == patient_id && m.doctor_id == doctor_id))
    }

    async fn create(&self, patient_id: Uuid, doctor_id: Uuid) -> Result<Mapping, DomainError> {
        let mapping = Mapping {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(mapping.clone());
        Ok(mapping)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        Ok(rows.len() < before)
    }

    async fn doctors_for_patient(&self, patient_id: Uuid) -> Result<Vec<Doctor>, DomainError> {
        let doctor_ids: Vec<Uuid> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.patient_id == patient_id)
            .map(|m| m.doctor_id)
            .collect();
        let mut doctors = Vec::new();
        for id in doctor_ids {
            if let Some(doctor) = self.doctors.get(id).await? {
                if !doctors.iter().any(|d: &Doctor| d.id == doctor.id) {
                    doctors.push(doctor);
                }
            }
        }
        Ok(doctors)
    }

    async fn count_for_patient(&self, patient_id: Uuid) -> Result<u64, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.patient_id == patient_id)
            .count() as u64)
    }

    async fn count_for_doctor(&self, doctor_id: Uuid) -> Result<u64, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.doctor_id == doctor_id)
            .count() as u64)
    }
}
