pub mod education;
pub mod finance;
pub mod workforce;
