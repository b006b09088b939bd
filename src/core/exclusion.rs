use std::collections::HashSet;
use std::fmt;

use super::{CleanerError, Normalizer};
use crate::models::Table;

/// Posição (não nome) da coluna de telefones nas listas de exclusão.
pub const EXCLUSION_PHONE_COLUMN_INDEX: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionList {
    Blocklist,
    DoNotDisturb,
}

impl ExclusionList {
    pub const ALL: [ExclusionList; 2] = [ExclusionList::Blocklist, ExclusionList::DoNotDisturb];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Blocklist => "Blocklist",
            Self::DoNotDisturb => "Não Perturbe",
        }
    }
}

impl fmt::Display for ExclusionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Telefones normalizados de uma lista de exclusão. Nunca contém a string vazia.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    phones: HashSet<String>,
}

impl ExclusionSet {
    pub fn from_phones<'a>(raw: impl IntoIterator<Item = &'a str>) -> Self {
        let mut phones: HashSet<String> = Normalizer::normalize_all(raw).into_iter().collect();
        phones.remove("");
        Self { phones }
    }

    /// Lê a segunda coluna da tabela de exclusão, qualquer que seja o nome dela.
    pub fn from_table(table: &Table, list: ExclusionList) -> Result<Self, CleanerError> {
        let column = table.column_at(EXCLUSION_PHONE_COLUMN_INDEX).ok_or_else(|| {
            CleanerError::MissingExclusionColumn {
                list: list.label().to_string(),
                columns: table.column_count(),
            }
        })?;

        Ok(Self::from_phones(column))
    }

    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }

    pub fn contains(&self, phone: &str) -> bool {
        self.phones.contains(phone)
    }
}

pub struct ExclusionFilter;

impl ExclusionFilter {
    /// Remove as linhas com algum `telefone_*` presente no conjunto.
    /// Devolve quantas linhas foram removidas.
    pub fn apply(table: &mut Table, phone_columns: &[String], excluded: &ExclusionSet) -> usize {
        if excluded.is_empty() {
            return 0;
        }

        let indices: Vec<usize> = phone_columns
            .iter()
            .filter_map(|name| table.column_index(name))
            .collect();

        table.retain_rows(|row| !indices.iter().any(|&i| excluded.contains(&row[i])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclusion_table(phones: &[&str]) -> Table {
        let rows = phones
            .iter()
            .map(|p| vec!["Fulano".to_string(), p.to_string()])
            .collect();
        Table::new(vec!["nome".to_string(), "numero".to_string()], rows)
    }

    #[test]
    fn test_set_is_normalized_without_empty() {
        let table = exclusion_table(&["(11) 99999-0000", "11999990000", "", " - "]);
        let set = ExclusionSet::from_table(&table, ExclusionList::Blocklist).unwrap();

        assert_eq!(set.len(), 1);
        assert!(set.contains("11999990000"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_second_column_is_positional() {
        let table = Table::new(
            vec!["telefone".to_string(), "qualquer".to_string()],
            vec![vec!["111".to_string(), "222".to_string()]],
        );
        let set = ExclusionSet::from_table(&table, ExclusionList::DoNotDisturb).unwrap();

        assert!(set.contains("222"));
        assert!(!set.contains("111"));
    }

    #[test]
    fn test_single_column_list_is_rejected() {
        let table = Table::new(vec!["telefone".to_string()], vec![vec!["111".to_string()]]);
        let err = ExclusionSet::from_table(&table, ExclusionList::Blocklist).unwrap_err();

        assert!(matches!(err, CleanerError::MissingExclusionColumn { columns: 1, .. }));
    }

    #[test]
    fn test_exact_match_only() {
        let mut table = Table::new(
            vec!["telefone_1".to_string()],
            vec![vec!["5511999990000".to_string()], vec!["11999990000".to_string()]],
        );
        let set = ExclusionSet::from_phones(["11999990000"]);
        let removed = ExclusionFilter::apply(&mut table, &["telefone_1".to_string()], &set);

        assert_eq!(removed, 1);
        assert_eq!(table.value(0, "telefone_1"), Some("5511999990000"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(ExclusionList::Blocklist.to_string(), "Blocklist");
        assert_eq!(ExclusionList::DoNotDisturb.to_string(), "Não Perturbe");
    }
}
