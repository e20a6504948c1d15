use std::sync::Arc;

use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Gender, NewPatient, PatientPatch, PatientUpdate};
use crate::domain::repos::MappingsRepository;
use crate::domain::service::PatientsService;
use crate::domain::service::patients::PATIENT_DELETE_PROTECTED;
use crate::domain::service::test_support::{
    InMemoryDoctors, InMemoryMappings, InMemoryPatients, doctor, patient,
};

type Service = PatientsService<InMemoryPatients, InMemoryMappings>;

fn service(patients: Arc<InMemoryPatients>) -> (Service, Arc<InMemoryMappings>) {
    let mappings = InMemoryMappings::new(patients.clone(), InMemoryDoctors::new());
    (PatientsService::new(patients, mappings.clone()), mappings)
}

fn new_patient(name: &str, age: i32) -> NewPatient {
    NewPatient {
        name: name.to_owned(),
        age,
        gender: Gender::Female,
        address: "12 Main St".to_owned(),
    }
}

#[tokio::test]
async fn create_attaches_requesting_owner() {
    let owner = Uuid::new_v4();
    let (svc, _) = service(InMemoryPatients::new());

    let created = svc.create(owner, new_patient("Jane", 30)).await.unwrap();

    assert_eq!(created.owner_id, owner);
    assert_eq!(created.name, "Jane");
}

#[tokio::test]
async fn create_rejects_negative_age() {
    let (svc, _) = service(InMemoryPatients::new());

    assert!(matches!(
        svc.create(Uuid::new_v4(), new_patient("Jane", -1)).await,
        Err(DomainError::Validation { field, .. }) if field == "age"
    ));
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let (svc, _) = service(InMemoryPatients::new());

    assert!(matches!(
        svc.create(Uuid::new_v4(), new_patient("   ", 30)).await,
        Err(DomainError::Validation { field, .. }) if field == "name"
    ));
}

#[tokio::test]
async fn get_hides_other_users_patients() {
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let jane = patient(owner, "Jane");
    let (svc, _) = service(InMemoryPatients::with(vec![jane.clone()]));

    assert_eq!(svc.get(owner, jane.id).await.unwrap().id, jane.id);
    assert!(matches!(
        svc.get(stranger, jane.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn list_is_scoped_to_owner() {
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();
    let (svc, _) = service(InMemoryPatients::with(vec![
        patient(owner, "Jane"),
        patient(other, "Bob"),
    ]));

    let listed = svc.list(owner).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Jane");
}

#[tokio::test]
async fn update_replaces_fields_and_misses_foreign_rows() {
    let owner = Uuid::new_v4();
    let jane = patient(owner, "Jane");
    let (svc, _) = service(InMemoryPatients::with(vec![jane.clone()]));

    let update = PatientUpdate {
        name: "Janet".to_owned(),
        age: 31,
        gender: Gender::Female,
        address: String::new(),
    };
    let updated = svc.update(owner, jane.id, update.clone()).await.unwrap();
    assert_eq!(updated.name, "Janet");
    assert_eq!(updated.age, 31);

    assert!(matches!(
        svc.update(Uuid::new_v4(), jane.id, update).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn patch_keeps_absent_fields() {
    let owner = Uuid::new_v4();
    let jane = patient(owner, "Jane");
    let (svc, _) = service(InMemoryPatients::with(vec![jane.clone()]));

    let patched = svc
        .patch(
            owner,
            jane.id,
            PatientPatch {
                age: Some(42),
                ..PatientPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(patched.age, 42);
    assert_eq!(patched.name, "Jane");
}

#[tokio::test]
async fn patch_validates_provided_fields() {
    let owner = Uuid::new_v4();
    let jane = patient(owner, "Jane");
    let (svc, _) = service(InMemoryPatients::with(vec![jane.clone()]));

    assert!(matches!(
        svc.patch(
            owner,
            jane.id,
            PatientPatch {
                age: Some(-3),
                ..PatientPatch::default()
            },
        )
        .await,
        Err(DomainError::Validation { field, .. }) if field == "age"
    ));
}

#[tokio::test]
async fn delete_is_blocked_while_mapped() {
    let owner = Uuid::new_v4();
    let jane = patient(owner, "Jane");
    let patients = InMemoryPatients::with(vec![jane.clone()]);
    let (svc, mappings) = service(patients);

    let house = doctor("House");
    let mapping = mappings.create(jane.id, house.id).await.unwrap();

    let err = svc.delete(owner, jane.id).await.unwrap_err();
    match err {
        DomainError::Conflict(message) => assert_eq!(message, PATIENT_DELETE_PROTECTED),
        other => panic!("expected conflict, got {other:?}"),
    }
    // The record persists.
    assert!(svc.get(owner, jane.id).await.is_ok());

    // Once the mapping is gone the delete goes through.
    mappings.delete(mapping.id).await.unwrap();
    svc.delete(owner, jane.id).await.unwrap();
    assert!(matches!(
        svc.get(owner, jane.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_of_foreign_patient_is_not_found() {
    let owner = Uuid::new_v4();
    let jane = patient(owner, "Jane");
    let (svc, _) = service(InMemoryPatients::with(vec![jane.clone()]));

    assert!(matches!(
        svc.delete(Uuid::new_v4(), jane.id).await,
        Err(DomainError::NotFound { .. })
    ));
}
