pub mod auth;
pub mod company;
pub mod dashboard;
pub mod material;
pub mod transaction;
