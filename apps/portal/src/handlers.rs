pub mod appointment_form;
pub mod appointments;
pub mod auth;
pub mod billing;
pub mod clinical;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod records;

#[cfg(test)]
mod tests;
