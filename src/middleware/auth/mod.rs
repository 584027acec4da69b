pub mod access;
pub mod failure;
