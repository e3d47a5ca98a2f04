pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod material_repo;
pub use material_repo::MaterialRepository;
pub mod purchase_repo;
pub use purchase_repo::PurchaseRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
