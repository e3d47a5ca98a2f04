// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Representa uma empresa vinda do banco de dados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub phone: Option<String>,
    pub description: Option<String>,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub company_id: Uuid,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub is_main: bool,
    pub created_at: DateTime<Utc>,
}

// Dados para registro de uma nova empresa
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 14, message = "O CNPJ é obrigatório."))]
    pub cnpj: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    pub phone: Option<String>,
    pub description: Option<String>,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(nested, length(min = 1, message = "Informe ao menos um endereço."))]
    pub addresses: Vec<AddressPayload>,
}

impl RegisterCompanyPayload {
    // Regra: exatamente um endereço marcado como principal.
    pub fn validate_main_address(&self) -> Result<(), ValidationError> {
        let main_count = self.addresses.iter().filter(|a| a.is_main).count();
        if main_count != 1 {
            let mut err = ValidationError::new("MainAddressRequired");
            err.message = Some("Exatamente um endereço deve ser o principal.".into());
            return Err(err);
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    #[validate(length(min = 1, message = "A rua é obrigatória."))]
    pub street: String,
    #[validate(length(min = 1, message = "O número é obrigatório."))]
    pub number: String,
    pub complement: Option<String>,
    #[validate(length(min = 1, message = "O bairro é obrigatório."))]
    pub district: String,
    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub city: String,
    #[validate(length(min = 2, max = 2, message = "Use a sigla do estado (ex: SP)."))]
    pub state: String,
    #[validate(length(min = 8, message = "O CEP é obrigatório."))]
    pub zip_code: String,
    #[serde(default)]
    pub is_main: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endereco(is_main: bool) -> AddressPayload {
        AddressPayload {
            street: "Rua das Caldeiras".into(),
            number: "120".into(),
            complement: None,
            district: "Distrito Industrial".into(),
            city: "Joinville".into(),
            state: "SC".into(),
            zip_code: "89205-000".into(),
            is_main,
        }
    }

    fn payload(addresses: Vec<AddressPayload>) -> RegisterCompanyPayload {
        RegisterCompanyPayload {
            name: "Metalúrgica Aurora".into(),
            cnpj: "12.345.678/0001-90".into(),
            email: "contato@aurora.ind.br".into(),
            phone: None,
            description: None,
            password: "segredo1".into(),
            addresses,
        }
    }

    #[test]
    fn exatamente_um_endereco_principal() {
        assert!(payload(vec![endereco(true), endereco(false)])
            .validate_main_address()
            .is_ok());
        assert!(payload(vec![endereco(false)]).validate_main_address().is_err());
        assert!(payload(vec![endereco(true), endereco(true)])
            .validate_main_address()
            .is_err());
    }
}

// Empresa com seus endereços carregados (resposta de GET /companies/{id})
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyWithAddresses {
    #[serde(flatten)]
    pub company: Company,
    pub addresses: Vec<Address>,
}
