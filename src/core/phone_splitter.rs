use anyhow::{Context, Result};

use super::projector::PHONE_LIST_COLUMN;
use super::Normalizer;
use crate::models::Table;
use crate::utils::is_blank;

pub const PHONE_COLUMN_PREFIX: &str = "telefone_";

pub fn phone_column_name(position: usize) -> String {
    format!("{}{}", PHONE_COLUMN_PREFIX, position)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitOutcome {
    /// `telefone_1` .. `telefone_N`, na ordem
    pub phone_columns: Vec<String>,
    /// Linhas sem nenhum telefone utilizável
    pub dropped_rows: usize,
}

impl SplitOutcome {
    pub fn max_phones(&self) -> usize {
        self.phone_columns.len()
    }
}

pub struct PhoneSplitter;

impl PhoneSplitter {
    /// Normaliza `telefones`, descarta as linhas vazias e troca a coluna por
    /// `telefone_1..N`, onde N é o maior número de telefones de uma linha.
    pub fn split(table: &mut Table) -> Result<SplitOutcome> {
        table.map_column(PHONE_LIST_COLUMN, Normalizer::normalize)?;

        let index = table
            .column_index(PHONE_LIST_COLUMN)
            .with_context(|| format!("coluna inexistente: {}", PHONE_LIST_COLUMN))?;
        let dropped_rows = table.retain_rows(|row| !is_blank(&row[index]));

        let lists = table
            .drop_column(PHONE_LIST_COLUMN)
            .with_context(|| format!("coluna inexistente: {}", PHONE_LIST_COLUMN))?;

        let pieces: Vec<Vec<String>> = lists
            .iter()
            .map(|list| list.split(',').map(|p| p.trim().to_string()).collect())
            .collect();

        let max_phones = pieces.iter().map(Vec::len).max().unwrap_or(0);

        let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(pieces.len()); max_phones];
        for row in pieces {
            let count = row.len();
            for (position, phone) in row.into_iter().enumerate() {
                columns[position].push(phone);
            }
            for column in columns.iter_mut().skip(count) {
                column.push(String::new());
            }
        }

        let mut phone_columns = Vec::with_capacity(max_phones);
        for (position, values) in columns.into_iter().enumerate() {
            let name = phone_column_name(position + 1);
            table.append_column(name.clone(), values)?;
            phone_columns.push(name);
        }

        Ok(SplitOutcome {
            phone_columns,
            dropped_rows,
        })
    }
}
