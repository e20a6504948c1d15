pub mod doctors_repo;
pub mod mappings_repo;
pub mod patients_repo;
pub mod users_repo;

pub use doctors_repo::SeaOrmDoctorsRepository;
pub use mappings_repo::SeaOrmMappingsRepository;
pub use patients_repo::SeaOrmPatientsRepository;
pub use users_repo::SeaOrmUsersRepository;
