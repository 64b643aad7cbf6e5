// src/db/company_repo.rs

use chrono::{Months, Utc};

use crate::{
    common::{error::AppError, pagination::Page},
    db::{is_blank, memory::MemoryTable, CompanyRepository},
    models::company::{Company, DEFAULT_MAX_USERS, DEFAULT_MODULES, DEFAULT_PLAN},
};

#[derive(Debug)]
pub struct InMemoryCompanyRepository {
    table: MemoryTable<Company>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("empresas"),
        }
    }
}

impl Default for InMemoryCompanyRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(company: &Company) -> Result<(), AppError> {
    if is_blank(&company.nome) || is_blank(&company.cnpj) || is_blank(&company.email) {
        return Err(AppError::Validation(
            "nome, CNPJ e email são obrigatórios".into(),
        ));
    }
    Ok(())
}

fn not_found() -> AppError {
    AppError::NotFound("empresa não encontrada".into())
}

// Plano básico: 5 usuários, clientes + financeiro.
fn apply_plan_defaults(company: &mut Company) {
    if is_blank(&company.plano) {
        company.plano = DEFAULT_PLAN.to_string();
    }
    if company.max_usuarios <= 0 {
        company.max_usuarios = DEFAULT_MAX_USERS;
    }
    if company.modulos.is_empty() {
        company.modulos = DEFAULT_MODULES.iter().map(|m| m.to_string()).collect();
    }
}

impl CompanyRepository for InMemoryCompanyRepository {
    fn create(&self, mut company: Company) -> Result<Company, AppError> {
        validate(&company)?;

        let mut table = self.table.write()?;

        if table.records.values().any(|e| e.cnpj == company.cnpj) {
            return Err(AppError::DuplicateKey("CNPJ já cadastrado".into()));
        }

        let now = Utc::now();
        company.id = table.issue_id();
        company.data_criacao = now;
        apply_plan_defaults(&mut company);
        if company.data_expira.is_none() {
            company.data_expira = now.checked_add_months(Months::new(12));
        }

        table.records.insert(company.id, company.clone());
        Ok(company)
    }

    fn get_by_id(&self, id: i64) -> Result<Company, AppError> {
        let table = self.table.read()?;
        table.records.get(&id).cloned().ok_or_else(not_found)
    }

    fn update(&self, mut company: Company) -> Result<Company, AppError> {
        let mut table = self.table.write()?;

        let existing = table.records.get(&company.id).ok_or_else(not_found)?;

        validate(&company)?;

        if table
            .records
            .values()
            .any(|e| e.cnpj == company.cnpj && e.id != company.id)
        {
            return Err(AppError::DuplicateKey(
                "CNPJ já cadastrado em outra empresa".into(),
            ));
        }

        company.data_criacao = existing.data_criacao;
        if company.data_expira.is_none() {
            company.data_expira = existing.data_expira;
        }

        table.records.insert(company.id, company.clone());
        Ok(company)
    }

    fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut table = self.table.write()?;
        table.records.remove(&id).map(|_| ()).ok_or_else(not_found)
    }

    fn list(&self, page: Page) -> Result<Vec<Company>, AppError> {
        let table = self.table.read()?;
        Ok(page.apply(table.records.values().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(nome: &str, cnpj: &str) -> Company {
        Company {
            id: 0,
            nome: nome.into(),
            cnpj: cnpj.into(),
            endereco: String::new(),
            telefone: String::new(),
            email: "contato@empresa.com".into(),
            status: true,
            data_criacao: Utc::now(),
            plano: String::new(),
            data_expira: None,
            logo_url: None,
            modulos: vec![],
            max_usuarios: 0,
        }
    }

    #[test]
    fn create_fills_plan_defaults() {
        let repo = InMemoryCompanyRepository::new();
        let e = repo.create(company("Padaria", "111")).unwrap();
        assert_eq!(e.plano, DEFAULT_PLAN);
        assert_eq!(e.max_usuarios, DEFAULT_MAX_USERS);
        assert_eq!(e.modulos, vec!["clientes", "financeiro"]);
        assert!(e.data_expira.unwrap() > e.data_criacao);
    }

    #[test]
    fn explicit_plan_is_kept() {
        let repo = InMemoryCompanyRepository::new();
        let mut input = company("Padaria", "111");
        input.plano = "premium".into();
        input.max_usuarios = 50;
        input.modulos = vec!["estoque".into()];
        let e = repo.create(input).unwrap();
        assert_eq!(e.plano, "premium");
        assert_eq!(e.max_usuarios, 50);
        assert_eq!(e.modulos, vec!["estoque"]);
    }

    #[test]
    fn cnpj_is_unique_on_create_and_update() {
        let repo = InMemoryCompanyRepository::new();
        let a = repo.create(company("A", "111")).unwrap();
        repo.create(company("B", "222")).unwrap();

        assert!(matches!(
            repo.create(company("C", "111")).unwrap_err(),
            AppError::DuplicateKey(_)
        ));

        let mut collide = a.clone();
        collide.cnpj = "222".into();
        assert!(matches!(repo.update(collide).unwrap_err(), AppError::DuplicateKey(_)));
    }

    #[test]
    fn tax_id_is_required() {
        let repo = InMemoryCompanyRepository::new();
        assert!(matches!(
            repo.create(company("A", " ")).unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn update_keeps_creation_and_expiration_when_absent() {
        let repo = InMemoryCompanyRepository::new();
        let a = repo.create(company("A", "111")).unwrap();
        let mut changed = company("A LTDA", "111");
        changed.id = a.id;
        let updated = repo.update(changed).unwrap();
        assert_eq!(updated.data_criacao, a.data_criacao);
        assert_eq!(updated.data_expira, a.data_expira);
        assert_eq!(updated.nome, "A LTDA");
    }

    #[test]
    fn update_does_not_reapply_plan_defaults() {
        let repo = InMemoryCompanyRepository::new();
        let mut input = company("Padaria", "111");
        input.plano = "premium".into();
        input.max_usuarios = 50;
        input.modulos = vec!["estoque".into()];
        let created = repo.create(input).unwrap();

        let mut changed = created.clone();
        changed.nome = "Padaria Central".into();
        let updated = repo.update(changed).unwrap();
        assert_eq!(updated.plano, "premium");
        assert_eq!(updated.max_usuarios, 50);
        assert_eq!(updated.modulos, vec!["estoque"]);
    }

    #[test]
    fn list_is_stable() {
        let repo = InMemoryCompanyRepository::new();
        for i in 0..4 {
            repo.create(company(&format!("E{i}"), &format!("{i}"))).unwrap();
        }
        let first = repo.list(Page::default()).unwrap();
        let second = repo.list(Page::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(repo.list(Page::new(2, 3)).unwrap().len(), 1);
    }
}
