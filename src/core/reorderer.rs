use anyhow::Result;

use crate::models::Table;

pub struct ColumnReorderer;

impl ColumnReorderer {
    /// `razao_social`, telefones, `cnpj`, `email`
    pub fn desired_order(phone_columns: &[String]) -> Vec<String> {
        let mut order = vec!["razao_social".to_string()];
        order.extend(phone_columns.iter().cloned());
        order.push("cnpj".to_string());
        order.push("email".to_string());
        order
    }

    /// Colunas do modelo que existem, na ordem do modelo, seguidas das
    /// demais na ordem em que já estavam. Nenhuma coluna é descartada.
    pub fn plan(columns: &[String], desired: &[String]) -> Vec<String> {
        let mut order: Vec<String> = desired
            .iter()
            .filter(|name| columns.contains(name))
            .cloned()
            .collect();

        let remaining: Vec<String> = columns
            .iter()
            .filter(|name| !order.contains(name))
            .cloned()
            .collect();
        order.extend(remaining);

        order
    }

    pub fn reorder(table: &Table, phone_columns: &[String]) -> Result<Table> {
        let order = Self::plan(table.columns(), &Self::desired_order(phone_columns));
        let names: Vec<&str> = order.iter().map(String::as_str).collect();
        table.select(&names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reorder_with_leftover_column() {
        let columns = names(&["email", "cnpj", "telefone_2", "razao_social", "telefone_1", "extra"]);
        let table = Table::new(columns.clone(), vec![columns.clone()]);

        let reordered = ColumnReorderer::reorder(&table, &names(&["telefone_1", "telefone_2"])).unwrap();

        assert_eq!(
            reordered.columns(),
            &["razao_social", "telefone_1", "telefone_2", "cnpj", "email", "extra"]
        );
        // o valor acompanha a coluna
        assert_eq!(reordered.value(0, "extra"), Some("extra"));
        assert_eq!(reordered.value(0, "cnpj"), Some("cnpj"));
    }

    #[test]
    fn test_missing_template_columns_are_skipped() {
        let order = ColumnReorderer::plan(
            &names(&["telefone_1", "outra", "razao_social"]),
            &ColumnReorderer::desired_order(&names(&["telefone_1"])),
        );
        assert_eq!(order, vec!["razao_social", "telefone_1", "outra"]);
    }

    #[test]
    fn test_plan_never_drops_columns() {
        let columns = names(&["z", "y", "email", "x"]);
        let mut order = ColumnReorderer::plan(&columns, &ColumnReorderer::desired_order(&[]));
        assert_eq!(order, vec!["email", "z", "y", "x"]);

        order.sort();
        let mut expected = columns.clone();
        expected.sort();
        assert_eq!(order, expected);
    }
}
