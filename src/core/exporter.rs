use anyhow::{Context, Result};
use csv::WriterBuilder;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{Config, RunLog, Table};
use crate::utils::{is_csv_file, log_path_for, UTF8_BOM};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nada foi gravado (tabela vazia ou destino não escolhido)
    Skipped,
    Saved(PathBuf),
    Failed,
}

impl SaveOutcome {
    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            Self::Saved(path) => Some(path),
            _ => None,
        }
    }
}

pub struct Exporter;

impl Exporter {
    /// Grava a tabela final no destino escolhido. Nunca propaga erro:
    /// o resultado é registrado no log e devolvido como `SaveOutcome`.
    pub fn export(table: &Table, destination: Option<&Path>, log: &mut RunLog) -> SaveOutcome {
        if table.is_empty() {
            log.warn("Nenhum dado restou após os filtros. Nenhum arquivo será salvo.");
            return SaveOutcome::Skipped;
        }

        let Some(path) = destination else {
            log.warn("Nenhum local selecionado. O arquivo não foi salvo.");
            return SaveOutcome::Skipped;
        };

        match Self::write_table(table, path) {
            Ok(()) => {
                log.info(format!("Arquivo final salvo com sucesso em: {}", path.display()));
                SaveOutcome::Saved(path.to_path_buf())
            }
            Err(e) => {
                log.error(format!("Erro ao salvar o arquivo: {:#}", e));
                SaveOutcome::Failed
            }
        }
    }

    pub fn write_table(table: &Table, path: &Path) -> Result<()> {
        if is_csv_file(path) {
            Self::write_csv(table, path)
        } else {
            Self::write_xlsx(table, path)
        }
    }

    /// `;` como separador, UTF-8 com BOM, sem coluna de índice.
    pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
        let mut file = File::create(path)
            .with_context(|| format!("não foi possível criar o arquivo: {}", path.display()))?;
        file.write_all(UTF8_BOM)?;

        let mut writer = WriterBuilder::new().delimiter(b';').from_writer(file);
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;

        Ok(())
    }

    pub fn write_xlsx(table: &Table, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        Self::write_headers(worksheet, table.columns())?;

        for (row_index, row) in table.rows().iter().enumerate() {
            let row_number = u32::try_from(row_index + 1).context("linhas demais para uma planilha")?;
            for (col, value) in row.iter().enumerate() {
                worksheet.write_string(row_number, Self::column_number(col)?, value)?;
            }
        }

        Self::apply_formatting(worksheet, table.columns())?;

        workbook
            .save(path)
            .with_context(|| format!("não foi possível salvar o arquivo: {}", path.display()))?;

        Ok(())
    }

    fn write_headers(worksheet: &mut Worksheet, columns: &[String]) -> Result<()> {
        let header_format = Format::new()
            .set_bold()
            .set_background_color("#4472C4")
            .set_font_color(Color::White)
            .set_border(FormatBorder::Thin);

        for (col, header) in columns.iter().enumerate() {
            worksheet.write_string_with_format(0, Self::column_number(col)?, header, &header_format)?;
        }

        Ok(())
    }

    fn column_number(col: usize) -> Result<u16> {
        u16::try_from(col).with_context(|| format!("colunas demais para uma planilha: {}", col + 1))
    }

    fn column_width(name: &str) -> f64 {
        match name {
            "razao_social" => 40.0,
            "email" => 30.0,
            "cnpj" => 20.0,
            n if n.starts_with("telefone_") => 16.0,
            _ => 18.0,
        }
    }

    fn apply_formatting(worksheet: &mut Worksheet, columns: &[String]) -> Result<()> {
        if columns.is_empty() {
            return Ok(());
        }

        for (col, name) in columns.iter().enumerate() {
            worksheet.set_column_width(Self::column_number(col)?, Self::column_width(name))?;
        }

        worksheet.set_freeze_panes(1, 0)?;
        worksheet.autofilter(0, 0, 0, Self::column_number(columns.len() - 1)?)?;

        Ok(())
    }

    /// Log ao lado do arquivo salvo; nome padrão quando nada foi salvo;
    /// nome de erro quando a gravação falhou.
    pub fn log_path(outcome: &SaveOutcome, config: &Config) -> PathBuf {
        match outcome {
            SaveOutcome::Saved(path) => log_path_for(path),
            SaveOutcome::Skipped => config.default_log_file.clone(),
            SaveOutcome::Failed => config.error_log_file.clone(),
        }
    }

    pub fn write_log(log: &RunLog, path: &Path) -> Result<()> {
        fs::write(path, log.render())
            .with_context(|| format!("não foi possível gravar o log: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_table() -> Table {
        Table::new(
            vec!["razao_social".to_string(), "telefone_1".to_string(), "cnpj".to_string()],
            vec![vec!["Açaí; Ltda".to_string(), "11999990000".to_string(), "123".to_string()]],
        )
    }

    #[test]
    fn test_log_path_per_outcome() {
        let config = Config::default();

        assert_eq!(
            Exporter::log_path(&SaveOutcome::Saved(PathBuf::from("out/leads.csv")), &config),
            PathBuf::from("out/leads_log.txt")
        );
        assert_eq!(
            Exporter::log_path(&SaveOutcome::Skipped, &config),
            PathBuf::from("automacao_log.txt")
        );
        assert_eq!(
            Exporter::log_path(&SaveOutcome::Failed, &config),
            PathBuf::from("automacao_log_ERRO.txt")
        );
    }

    #[test]
    fn test_empty_table_is_not_written() {
        let mut log = RunLog::new();
        let table = Table::new(vec!["razao_social".to_string()], Vec::new());

        let outcome = Exporter::export(&table, Some(Path::new("nunca.xlsx")), &mut log);

        assert_eq!(outcome, SaveOutcome::Skipped);
        assert!(log.contains("Nenhum dado restou"));
        assert!(!Path::new("nunca.xlsx").exists());
    }

    #[test]
    fn test_missing_destination_is_skipped() {
        let mut log = RunLog::new();
        let outcome = Exporter::export(&final_table(), None, &mut log);

        assert_eq!(outcome, SaveOutcome::Skipped);
        assert!(log.contains("Nenhum local selecionado"));
    }

    #[test]
    fn test_csv_has_bom_and_semicolons() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saida.csv");

        Exporter::write_csv(&final_table(), &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("razao_social;telefone_1;cnpj"));
        assert_eq!(lines.next(), Some("\"Açaí; Ltda\";11999990000;123"));
    }

    #[test]
    fn test_column_number_out_of_range_is_an_error() {
        assert_eq!(Exporter::column_number(0).unwrap(), 0);
        assert_eq!(Exporter::column_number(65535).unwrap(), u16::MAX);
        assert!(Exporter::column_number(65536).is_err());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nao_existe").join("saida.csv");
        let mut log = RunLog::new();

        let outcome = Exporter::export(&final_table(), Some(&path), &mut log);

        assert_eq!(outcome, SaveOutcome::Failed);
        assert!(log.contains("Erro ao salvar o arquivo"));
    }
}
