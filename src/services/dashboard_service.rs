// src/services/dashboard_service.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardSummary, DashboardTotals},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self, company_id: Uuid) -> Result<DashboardSummary, AppError> {
        let totals = self.repo.get_totals(company_id).await?;
        Ok(build_summary(totals))
    }
}

fn build_summary(totals: DashboardTotals) -> DashboardSummary {
    DashboardSummary {
        total_purchases: totals.total_purchases,
        total_spent: totals.total_spent,
        total_sales: totals.total_sales,
        total_revenue: totals.total_revenue,
        active_materials: totals.active_materials,
        last_purchase_date: format_last_purchase_date(totals.last_purchase_at),
    }
}

// dd/mm/aaaa, ou string vazia quando a empresa nunca concluiu uma compra.
fn format_last_purchase_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn formata_a_data_da_ultima_compra() {
        let data = Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap();
        assert_eq!(format_last_purchase_date(Some(data)), "07/03/2024");
    }

    #[test]
    fn sem_compra_concluida_vira_string_vazia() {
        assert_eq!(format_last_purchase_date(None), "");
    }

    #[test]
    fn resumo_repassa_os_totais_sem_recalcular() {
        // 2 compras concluídas (100 + 50); a pendente de 30 já não veio
        // do banco. 3 vendas de qualquer status somando 60.
        let totals = DashboardTotals {
            total_purchases: 2,
            total_spent: dec!(150),
            total_sales: 3,
            total_revenue: dec!(60),
            active_materials: 4,
            last_purchase_at: None,
        };
        let summary = build_summary(totals);
        assert_eq!(summary.total_purchases, 2);
        assert_eq!(summary.total_spent, dec!(150));
        assert_eq!(summary.total_sales, 3);
        assert_eq!(summary.total_revenue, dec!(60));
        assert_eq!(summary.active_materials, 4);
        assert_eq!(summary.last_purchase_date, "");
    }
}
