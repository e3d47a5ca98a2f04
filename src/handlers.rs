pub mod auth;
pub mod companies;
pub mod dashboard;
pub mod materials;
pub mod purchases;
pub mod sales;
