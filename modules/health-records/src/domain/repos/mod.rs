pub mod doctors_repo;
pub mod mappings_repo;
pub mod patients_repo;
pub mod users_repo;

pub use doctors_repo::DoctorsRepository;
pub use mappings_repo::MappingsRepository;
pub use patients_repo::PatientsRepository;
pub use users_repo::UsersRepository;
