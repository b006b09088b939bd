use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::{ByteRecord, ReaderBuilder};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::Normalizer;
use crate::models::Table;
use crate::utils::{is_spreadsheet_file, UTF8_BOM};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Delimited(u8),
}

#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    pub format: SourceFormat,
    /// Linhas descartadas por terem número de campos diferente do cabeçalho
    pub skipped_rows: usize,
}

pub struct TableLoader;

impl TableLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<LoadedTable> {
        let path_ref = path.as_ref();

        if is_spreadsheet_file(path_ref) {
            Self::load_spreadsheet(path_ref)
        } else {
            Self::load_delimited(path_ref)
        }
    }

    /// Primeira aba, primeira linha como cabeçalho.
    pub fn load_spreadsheet<P: AsRef<Path>>(path: P) -> Result<LoadedTable> {
        let path_ref = path.as_ref();
        let file_path = path_ref.to_string_lossy().to_string();

        let mut workbook = open_workbook_auto(path_ref)
            .with_context(|| format!("não foi possível abrir a planilha: {}", file_path))?;

        let range = workbook
            .worksheet_range_at(0)
            .with_context(|| format!("a planilha não tem abas: {}", file_path))?
            .with_context(|| format!("não foi possível ler a primeira aba: {}", file_path))?;

        Ok(LoadedTable {
            table: Self::range_to_table(&range),
            format: SourceFormat::Spreadsheet,
            skipped_rows: 0,
        })
    }

    /// O `Range` do calamine começa na primeira célula usada; as colunas à
    /// esquerda dela voltam como células vazias para que as posições contem
    /// a partir da coluna A.
    fn range_to_table(range: &Range<Data>) -> Table {
        let leading_columns = range.start().map_or(0, |(_, col)| col as usize);

        let mut rows = range.rows().map(|row| {
            std::iter::repeat_n(String::new(), leading_columns)
                .chain(row.iter().map(Normalizer::cell_to_string))
                .collect::<Vec<_>>()
        });

        let headers = rows.next().unwrap_or_default();

        Table::new(Self::header_names(headers), rows.collect())
    }

    /// Tenta `;` primeiro; volta para `,` se o resultado tiver uma única coluna
    /// ou se a leitura com `;` falhar.
    pub fn load_delimited<P: AsRef<Path>>(path: P) -> Result<LoadedTable> {
        let path_ref = path.as_ref();
        let content = fs::read(path_ref)
            .with_context(|| format!("não foi possível ler o arquivo: {}", path_ref.display()))?;

        match Self::parse_delimited(&content, b';') {
            Ok(loaded) if loaded.table.column_count() == 1 => Self::parse_delimited(&content, b','),
            Ok(loaded) => Ok(loaded),
            Err(e) => {
                tracing::debug!("leitura com ';' falhou ({}), tentando ','", e);
                Self::parse_delimited(&content, b',')
            }
        }
    }

    pub fn parse_delimited(content: &[u8], delimiter: u8) -> Result<LoadedTable> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(content);

        let headers = reader
            .byte_headers()
            .context("não foi possível ler o cabeçalho")?
            .clone();

        let mut rows = Vec::new();
        let mut skipped_rows = 0;

        for (index, result) in reader.byte_records().enumerate() {
            match result {
                Ok(record) => rows.push(Self::record_to_strings(&record)),
                Err(e) if matches!(e.kind(), csv::ErrorKind::UnequalLengths { .. }) => {
                    skipped_rows += 1;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("erro na linha {}", index + 2));
                }
            }
        }

        Ok(LoadedTable {
            table: Table::new(Self::header_names(Self::record_to_strings(&headers)), rows),
            format: SourceFormat::Delimited(delimiter),
            skipped_rows,
        })
    }

    fn record_to_strings(record: &ByteRecord) -> Vec<String> {
        record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect()
    }

    /// Cabeçalhos vazios viram `Unnamed: N`; repetidos ganham sufixo `.1`, `.2`, ...
    fn header_names(raw: Vec<String>) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut names = Vec::with_capacity(raw.len());

        for (index, name) in raw.into_iter().enumerate() {
            let base = if name.is_empty() {
                format!("Unnamed: {}", index)
            } else {
                name
            };

            let mut candidate = base.clone();
            while let Some(count) = seen.get_mut(&candidate) {
                *count += 1;
                candidate = format!("{}.{}", base, count);
            }

            seen.insert(candidate.clone(), 0);
            names.push(candidate);
        }

        names
    }
}
