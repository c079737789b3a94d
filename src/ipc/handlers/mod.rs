pub mod core;
pub mod students;
pub mod teachers;
