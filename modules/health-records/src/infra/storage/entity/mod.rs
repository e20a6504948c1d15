pub mod doctors;
pub mod mappings;
pub mod patients;
pub mod users;
