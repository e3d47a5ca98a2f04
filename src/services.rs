pub mod auth;
pub mod company_service;
pub mod dashboard_service;
pub mod lifecycle;
pub mod material_service;
pub mod purchase_service;
pub mod sale_service;
