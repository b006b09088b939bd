use super::CleanerError;
use crate::models::Table;

pub const PHONE_LIST_COLUMN: &str = "telefones";

/// Colunas aceitas na planilha principal, na ordem em que ficam após a projeção.
pub const TARGET_COLUMNS: [&str; 4] = ["cnpj", "razao_social", "email", PHONE_LIST_COLUMN];

pub struct ColumnProjector;

impl ColumnProjector {
    /// Mantém apenas as colunas de `TARGET_COLUMNS` que existem na tabela.
    /// Sem `telefones` não há o que processar.
    pub fn project(table: &Table) -> Result<Table, CleanerError> {
        if !table.has_column(PHONE_LIST_COLUMN) {
            return Err(CleanerError::MissingColumn(PHONE_LIST_COLUMN.to_string()));
        }

        let existing: Vec<&str> = TARGET_COLUMNS
            .iter()
            .copied()
            .filter(|name| table.has_column(name))
            .collect();

        table
            .select(&existing)
            .map_err(|_| CleanerError::MissingColumn(PHONE_LIST_COLUMN.to_string()))
    }
}
