//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de empresas (protegidas)
    let company_routes = Router::new()
        .route("/", get(handlers::companies::get_all_companies))
        .route(
            "/me",
            get(handlers::auth::get_me)
                .patch(handlers::companies::update_my_company)
                .delete(handlers::companies::delete_my_company),
        )
        .route("/{id}", get(handlers::companies::get_company))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let material_routes = Router::new()
        .route(
            "/",
            post(handlers::materials::create_material)
                .get(handlers::materials::get_all_materials),
        )
        .route(
            "/{id}",
            get(handlers::materials::get_material)
                .patch(handlers::materials::update_material)
                .delete(handlers::materials::delete_material),
        )
        .route(
            "/company/{id}",
            get(handlers::materials::get_company_materials),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Compras: criação pelo comprador, transições pelo vendedor.
    let purchase_routes = Router::new()
        .route(
            "/",
            post(handlers::purchases::create_purchase)
                .get(handlers::purchases::get_all_purchases),
        )
        .route(
            "/{id}",
            get(handlers::purchases::get_purchase)
                .patch(handlers::purchases::update_purchase)
                .delete(handlers::purchases::delete_purchase),
        )
        .route("/{id}/approve", patch(handlers::purchases::approve_purchase))
        .route("/{id}/deny", patch(handlers::purchases::deny_purchase))
        .route("/{id}/cancel", patch(handlers::purchases::cancel_purchase))
        .route(
            "/{id}/complete",
            patch(handlers::purchases::complete_purchase),
        )
        .route(
            "/{id}/status",
            patch(handlers::purchases::update_purchase_status),
        )
        .route(
            "/company/{id}",
            get(handlers::purchases::get_company_purchases),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Vendas: endpoints próprios, espelhando as compras.
    let sale_routes = Router::new()
        .route(
            "/",
            post(handlers::sales::create_sale).get(handlers::sales::get_all_sales),
        )
        .route(
            "/{id}",
            get(handlers::sales::get_sale)
                .patch(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        )
        .route("/{id}/approve", patch(handlers::sales::approve_sale))
        .route("/{id}/deny", patch(handlers::sales::deny_sale))
        .route("/{id}/cancel", patch(handlers::sales::cancel_sale))
        .route("/{id}/complete", patch(handlers::sales::complete_sale))
        .route("/{id}/status", patch(handlers::sales::update_sale_status))
        .route("/company/{id}", get(handlers::sales::get_company_sales))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/{companyId}", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/companies", company_routes)
        .nest("/api/materials", material_routes)
        .nest("/api/purchases", purchase_routes)
        .nest("/api/sales", sale_routes)
        .nest("/api/dashboard", dashboard_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
