// src/db/client_repo.rs

use chrono::Utc;

use crate::{
    common::{error::AppError, pagination::Page},
    db::{is_blank, is_blank_opt, memory::MemoryTable, ClientRepository},
    models::client::{Client, TipoPessoa},
};

#[derive(Debug)]
pub struct InMemoryClientRepository {
    table: MemoryTable<Client>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("clientes"),
        }
    }
}

impl Default for InMemoryClientRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(client: &Client) -> Result<(), AppError> {
    if is_blank(&client.nome) || is_blank(&client.email) {
        return Err(AppError::Validation("nome e email são obrigatórios".into()));
    }

    match client.tipo_pessoa {
        TipoPessoa::Fisica if is_blank_opt(client.cpf.as_deref()) => {
            return Err(AppError::Validation(
                "CPF é obrigatório para pessoa física".into(),
            ));
        }
        TipoPessoa::Juridica if is_blank_opt(client.cnpj.as_deref()) => {
            return Err(AppError::Validation(
                "CNPJ é obrigatório para pessoa jurídica".into(),
            ));
        }
        _ => {}
    }

    if client.empresa_id <= 0 {
        return Err(AppError::Validation("empresa inválida".into()));
    }
    Ok(())
}

fn not_found() -> AppError {
    AppError::NotFound("cliente não encontrado".into())
}

fn matches_query(client: &Client, query: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(query);

    contains(client.nome.as_str())
        || contains(client.email.as_str())
        || client.cpf.as_deref().is_some_and(contains)
        || client.cnpj.as_deref().is_some_and(contains)
}

impl ClientRepository for InMemoryClientRepository {
    fn create(&self, mut client: Client) -> Result<Client, AppError> {
        validate(&client)?;

        let mut table = self.table.write()?;
        client.id = table.issue_id();
        client.data_criacao = Utc::now();

        table.records.insert(client.id, client.clone());
        Ok(client)
    }

    fn get_by_id(&self, id: i64, empresa_id: i64) -> Result<Client, AppError> {
        let table = self.table.read()?;
        table
            .records
            .get(&id)
            .filter(|c| c.empresa_id == empresa_id)
            .cloned()
            .ok_or_else(not_found)
    }

    fn update(&self, mut client: Client) -> Result<Client, AppError> {
        let mut table = self.table.write()?;

        let existing = table.records.get(&client.id).ok_or_else(not_found)?;

        if existing.empresa_id != client.empresa_id {
            tracing::warn!(
                "Tentativa de alterar cliente {} da empresa {} pela empresa {}",
                client.id,
                existing.empresa_id,
                client.empresa_id
            );
            return Err(AppError::CrossTenantViolation);
        }

        validate(&client)?;

        client.data_criacao = existing.data_criacao;

        table.records.insert(client.id, client.clone());
        Ok(client)
    }

    fn delete(&self, id: i64, empresa_id: i64) -> Result<(), AppError> {
        let mut table = self.table.write()?;

        let existing = table.records.get(&id).ok_or_else(not_found)?;

        if existing.empresa_id != empresa_id {
            tracing::warn!(
                "Tentativa de remover cliente {} da empresa {} pela empresa {}",
                id,
                existing.empresa_id,
                empresa_id
            );
            return Err(AppError::CrossTenantViolation);
        }

        table.records.remove(&id);
        Ok(())
    }

    fn list(&self, empresa_id: i64, page: Page) -> Result<Vec<Client>, AppError> {
        let table = self.table.read()?;
        Ok(page.apply(
            table
                .records
                .values()
                .filter(|c| c.empresa_id == empresa_id)
                .cloned(),
        ))
    }

    fn search(&self, empresa_id: i64, query: &str, page: Page) -> Result<Vec<Client>, AppError> {
        let query = query.to_lowercase();
        let table = self.table.read()?;
        Ok(page.apply(
            table
                .records
                .values()
                .filter(|c| c.empresa_id == empresa_id && matches_query(c, &query))
                .cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pessoa_fisica(nome: &str, empresa_id: i64) -> Client {
        Client {
            id: 0,
            nome: nome.into(),
            tipo_pessoa: TipoPessoa::Fisica,
            cpf: Some("12345678900".into()),
            cnpj: None,
            email: format!("{}@cliente.com", nome.to_lowercase()),
            telefone: String::new(),
            endereco: String::new(),
            status: true,
            data_criacao: Utc::now(),
            empresa_id,
            observacoes: None,
            ultima_compra: None,
        }
    }

    #[test]
    fn created_client_is_visible_only_to_its_tenant() {
        let repo = InMemoryClientRepository::new();
        let c = repo.create(pessoa_fisica("Ana", 1)).unwrap();
        assert!(c.id > 0);
        assert_eq!(repo.get_by_id(c.id, 1).unwrap(), c);
        assert!(matches!(repo.get_by_id(c.id, 2).unwrap_err(), AppError::NotFound(_)));
    }

    #[test]
    fn cpf_required_for_pessoa_fisica() {
        let repo = InMemoryClientRepository::new();
        let mut c = pessoa_fisica("Ana", 1);
        c.cpf = Some("".into());
        assert!(matches!(repo.create(c).unwrap_err(), AppError::Validation(_)));
    }

    #[test]
    fn cnpj_required_for_pessoa_juridica() {
        let repo = InMemoryClientRepository::new();
        let mut c = pessoa_fisica("Loja", 1);
        c.tipo_pessoa = TipoPessoa::Juridica;
        assert!(matches!(repo.create(c.clone()).unwrap_err(), AppError::Validation(_)));
        c.cnpj = Some("12345678000199".into());
        assert!(repo.create(c).is_ok());
    }

    #[test]
    fn tenant_must_be_positive() {
        let repo = InMemoryClientRepository::new();
        assert!(matches!(
            repo.create(pessoa_fisica("Ana", 0)).unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn cross_tenant_update_and_delete_leave_record_untouched() {
        let repo = InMemoryClientRepository::new();
        let original = repo.create(pessoa_fisica("Ana", 1)).unwrap();

        let mut hijack = original.clone();
        hijack.empresa_id = 2;
        hijack.nome = "Hijacked".into();
        assert!(matches!(repo.update(hijack).unwrap_err(), AppError::CrossTenantViolation));
        assert!(matches!(
            repo.delete(original.id, 2).unwrap_err(),
            AppError::CrossTenantViolation
        ));

        assert_eq!(repo.get_by_id(original.id, 1).unwrap(), original);
    }

    #[test]
    fn update_keeps_creation_timestamp() {
        let repo = InMemoryClientRepository::new();
        let original = repo.create(pessoa_fisica("Ana", 1)).unwrap();
        let mut changed = original.clone();
        changed.nome = "Ana Paula".into();
        changed.data_criacao = Utc::now() + chrono::Duration::days(1);
        let updated = repo.update(changed).unwrap();
        assert_eq!(updated.data_criacao, original.data_criacao);
        assert_eq!(updated.nome, "Ana Paula");
    }

    #[test]
    fn list_pages_after_tenant_filter() {
        let repo = InMemoryClientRepository::new();
        for i in 0..5 {
            repo.create(pessoa_fisica(&format!("A{i}"), 1)).unwrap();
            repo.create(pessoa_fisica(&format!("B{i}"), 2)).unwrap();
        }

        let full = repo.list(1, Page::new(0, 0)).unwrap();
        assert_eq!(full.len(), 5);

        let first = repo.list(1, Page::new(1, 0)).unwrap();
        let next_two = repo.list(1, Page::new(2, 1)).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(next_two.len(), 2);
        assert!(next_two.iter().all(|c| c.id != first[0].id));
        assert_eq!(first[0], full[0]);
        assert_eq!(next_two, full[1..3].to_vec());
        assert!(full.iter().all(|c| c.empresa_id == 1));
    }

    #[test]
    fn search_is_case_insensitive_and_tenant_scoped() {
        let repo = InMemoryClientRepository::new();
        repo.create(pessoa_fisica("Mariana", 1)).unwrap();
        repo.create(pessoa_fisica("Mario", 2)).unwrap();
        let mut loja = pessoa_fisica("Loja", 1);
        loja.tipo_pessoa = TipoPessoa::Juridica;
        loja.cpf = None;
        loja.cnpj = Some("98765432000111".into());
        repo.create(loja).unwrap();

        let by_name = repo.search(1, "MARI", Page::default()).unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].nome, "Mariana");

        let by_cnpj = repo.search(1, "654320", Page::default()).unwrap();
        assert_eq!(by_cnpj.len(), 1);
        assert_eq!(by_cnpj[0].nome, "Loja");

        let by_email = repo.search(1, "@cliente.com", Page::new(1, 1)).unwrap();
        assert_eq!(by_email.len(), 1);
    }
}
