// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CompanyRepository, DashboardRepository, MaterialRepository, PurchaseRepository,
        SaleRepository,
    },
    services::{
        auth::AuthService, company_service::CompanyService, dashboard_service::DashboardService,
        material_service::MaterialService, purchase_service::PurchaseService,
        sale_service::SaleService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub company_service: CompanyService,
    pub material_service: MaterialService,
    pub purchase_service: PurchaseService,
    pub sale_service: SaleService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Carrega as configurações e monta o gráfico de dependências.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        // Os repositórios são injetados explicitamente nos serviços: nada
        // de singletons escondidos em estado de módulo.
        let company_repo = CompanyRepository::new(db_pool.clone());
        let material_repo = MaterialRepository::new(db_pool.clone());
        let purchase_repo = PurchaseRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(company_repo.clone(), jwt_secret, db_pool.clone());
        let company_service = CompanyService::new(company_repo.clone(), db_pool.clone());
        let material_service =
            MaterialService::new(material_repo.clone(), company_repo.clone(), db_pool.clone());
        let purchase_service =
            PurchaseService::new(purchase_repo, material_repo.clone(), db_pool.clone());
        let sale_service = SaleService::new(
            sale_repo,
            material_repo,
            company_repo,
            db_pool.clone(),
        );
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            auth_service,
            company_service,
            material_service,
            purchase_service,
            sale_service,
            dashboard_service,
        })
    }
}
