use anyhow::{bail, Context, Result};

/// Tabela em memória com largura fixa: toda linha tem exatamente um valor por coluna.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Linhas curtas são completadas com string vazia; valores excedentes são descartados.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column_at(&self, index: usize) -> Option<Vec<&str>> {
        if index >= self.columns.len() {
            return None;
        }

        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        self.column_index(name).and_then(|index| self.column_at(index))
    }

    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let index = self.column_index(name)?;
        self.rows.get(row).map(|r| r[index].as_str())
    }

    /// Monta uma nova tabela apenas com as colunas pedidas, na ordem pedida.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let indices = names
            .iter()
            .map(|name| {
                self.column_index(name)
                    .with_context(|| format!("coluna inexistente: {}", name))
            })
            .collect::<Result<Vec<_>>>()?;

        let columns = names.iter().map(|n| n.to_string()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Table { columns, rows })
    }

    pub fn map_column(&mut self, name: &str, f: impl Fn(&str) -> String) -> Result<()> {
        let index = self
            .column_index(name)
            .with_context(|| format!("coluna inexistente: {}", name))?;

        for row in &mut self.rows {
            row[index] = f(&row[index]);
        }

        Ok(())
    }

    /// Remove a coluna e devolve seus valores, linha a linha.
    pub fn drop_column(&mut self, name: &str) -> Option<Vec<String>> {
        let index = self.column_index(name)?;
        self.columns.remove(index);

        Some(self.rows.iter_mut().map(|row| row.remove(index)).collect())
    }

    pub fn append_column(&mut self, name: impl Into<String>, values: Vec<String>) -> Result<()> {
        let name = name.into();

        if self.has_column(&name) {
            bail!("coluna duplicada: {}", name);
        }
        if values.len() != self.rows.len() {
            bail!(
                "coluna {} tem {} valores, a tabela tem {} linhas",
                name,
                values.len(),
                self.rows.len()
            );
        }

        self.columns.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }

        Ok(())
    }

    /// Mantém somente as linhas aceitas pelo predicado e devolve quantas saíram.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[String]) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![
                vec!["1".to_string(), "2".to_string(), "3".to_string()],
                vec!["4".to_string(), "5".to_string()],
            ],
        )
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = sample();
        assert_eq!(table.rows()[1], vec!["4", "5", ""]);
        assert_eq!(table.value(1, "c"), Some(""));
    }

    #[test]
    fn test_select_reorders_and_rejects_unknown() {
        let table = sample();
        let selected = table.select(&["c", "a"]).unwrap();
        assert_eq!(selected.columns(), &["c", "a"]);
        assert_eq!(selected.rows()[0], vec!["3", "1"]);

        assert!(table.select(&["a", "z"]).is_err());
    }

    #[test]
    fn test_drop_and_append_column() {
        let mut table = sample();
        let dropped = table.drop_column("b").unwrap();
        assert_eq!(dropped, vec!["2", "5"]);
        assert_eq!(table.columns(), &["a", "c"]);

        table
            .append_column("d", vec!["x".to_string(), "y".to_string()])
            .unwrap();
        assert_eq!(table.column("d").unwrap(), vec!["x", "y"]);

        assert!(table.append_column("e", vec![String::new()]).is_err());
        assert!(table.append_column("a", vec![String::new(), String::new()]).is_err());
    }

    #[test]
    fn test_retain_rows_counts_removed() {
        let mut table = sample();
        let removed = table.retain_rows(|row| row[0] != "1");
        assert_eq!(removed, 1);
        assert_eq!(table.row_count(), 1);
    }
}
