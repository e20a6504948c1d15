pub mod accounts;
pub mod doctors;
pub mod mappings;
pub mod patients;

pub use accounts::AccountsService;
pub use doctors::DoctorsService;
pub use mappings::MappingsService;
pub use patients::PatientsService;

#[cfg(test)]
mod accounts_test;
#[cfg(test)]
mod patients_test;
#[cfg(test)]
pub(crate) mod test_support;
