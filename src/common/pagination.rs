// src/common/pagination.rs

use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: usize = 100;

/// Janela de paginação já normalizada (limit > 0, offset >= 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    /// `limit <= 0` vira o padrão de 100; offset negativo vira 0.
    pub fn new(limit: i64, offset: i64) -> Self {
        let limit = if limit <= 0 { DEFAULT_LIMIT } else { limit as usize };
        let offset = offset.max(0) as usize;
        Self { limit, offset }
    }

    /// Aplica offset/limit sobre um iterador já filtrado.
    pub fn apply<T, I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

// Query string de listagem: ?limit=&offset=
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit.unwrap_or(0), self.offset.unwrap_or(0))
    }
}

// Query string de busca: ?q=&limit=&offset=
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SearchQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit.unwrap_or(0), self.offset.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_limit_uses_default() {
        assert_eq!(Page::new(0, 0).limit, DEFAULT_LIMIT);
        assert_eq!(Page::new(-5, 0).limit, DEFAULT_LIMIT);
        assert_eq!(Page::new(7, 0).limit, 7);
    }

    #[test]
    fn negative_offset_is_clamped() {
        assert_eq!(Page::new(10, -3).offset, 0);
    }

    #[test]
    fn apply_skips_then_takes() {
        let page = Page::new(2, 1);
        assert_eq!(page.apply(1..=5), vec![2, 3]);
        assert!(Page::new(2, 10).apply(1..=5).is_empty());
    }
}
