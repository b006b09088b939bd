use std::borrow::Cow;
use std::path::PathBuf;

use super::{
    CleanerError, ColumnProjector, ColumnReorderer, ExclusionFilter, ExclusionList, ExclusionSet,
    Exporter, PhoneSplitter, SaveOutcome, SourceFormat, TableLoader,
};
use crate::gui::{FilePicker, InputKind};
use crate::models::{Config, RunLog, Table};
use crate::utils::{file_display_name, generate_output_filename_with_source};

/// Contagens de cada etapa da limpeza.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanReport {
    pub loaded_rows: usize,
    pub rows_without_phone: usize,
    pub phone_columns: Vec<String>,
    pub removed_by_blocklist: usize,
    pub removed_by_do_not_disturb: usize,
    pub remaining_rows: usize,
}

impl CleanReport {
    pub fn total_removed(&self) -> usize {
        self.rows_without_phone + self.removed_by_blocklist + self.removed_by_do_not_disturb
    }

    fn record_removed(&mut self, list: ExclusionList, removed: usize) {
        match list {
            ExclusionList::Blocklist => self.removed_by_blocklist = removed,
            ExclusionList::DoNotDisturb => self.removed_by_do_not_disturb = removed,
        }
    }
}

/// Estado final de uma execução, sucesso ou não.
#[derive(Debug)]
pub struct RunSummary {
    pub report: Option<CleanReport>,
    pub save: SaveOutcome,
    pub log_path: PathBuf,
    pub log_written: bool,
    pub error: Option<CleanerError>,
    pub log: RunLog,
}

pub struct Processor {
    config: Config,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execução completa: seleção e leitura dos arquivos, limpeza,
    /// gravação do resultado e do log. O log é gravado mesmo quando uma
    /// condição fatal interrompe a limpeza.
    pub fn run(&self, picker: &mut dyn FilePicker) -> RunSummary {
        let mut log = RunLog::new();
        log.info("Iniciando o processo...");

        let (report, save, error) = match self.clean_with_picker(picker, &mut log) {
            Ok((table, report, source_name)) => {
                log.info(format!("Total de linhas restantes: {}", table.row_count()));
                let save = Self::save(&table, &source_name, picker, &mut log);
                (Some(report), save, None)
            }
            Err(e) => {
                if e.is_cancellation() {
                    log.warn(format!("{}. Encerrando.", e));
                } else {
                    log.error(format!("{}. Encerrando.", e));
                }
                (None, SaveOutcome::Failed, Some(e))
            }
        };

        let log_path = Exporter::log_path(&save, &self.config);
        let log_written = match Exporter::write_log(&log, &log_path) {
            Ok(()) => {
                log.info(format!("Log de execução salvo em: {}", log_path.display()));
                true
            }
            Err(e) => {
                log.error(format!("Falha ao salvar o arquivo de log: {:#}", e));
                false
            }
        };

        log.info("--- Execução Finalizada ---");

        RunSummary {
            report,
            save,
            log_path,
            log_written,
            error,
            log,
        }
    }

    fn clean_with_picker(
        &self,
        picker: &mut dyn FilePicker,
        log: &mut RunLog,
    ) -> Result<(Table, CleanReport, String), CleanerError> {
        let (contacts, contacts_path) = Self::load_input(picker, InputKind::Contacts, log)?;
        let source_name = contacts_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "contatos".to_string());

        // as listas só são pedidas depois que a planilha principal passou pela projeção
        let (table, report) = Self::clean_with(&contacts, log, |list, log| {
            Self::load_input(&mut *picker, InputKind::Exclusion(list), log).map(|(table, _)| Cow::Owned(table))
        })?;

        Ok((table, report, source_name))
    }

    /// Limpeza sem E/S, com as tabelas já carregadas.
    pub fn clean(
        contacts: &Table,
        blocklist: &Table,
        do_not_disturb: &Table,
        log: &mut RunLog,
    ) -> Result<(Table, CleanReport), CleanerError> {
        Self::clean_with(contacts, log, |list, _| {
            Ok(Cow::Borrowed(match list {
                ExclusionList::Blocklist => blocklist,
                ExclusionList::DoNotDisturb => do_not_disturb,
            }))
        })
    }

    fn clean_with<'a, F>(
        contacts: &Table,
        log: &mut RunLog,
        mut exclusion_for: F,
    ) -> Result<(Table, CleanReport), CleanerError>
    where
        F: FnMut(ExclusionList, &mut RunLog) -> Result<Cow<'a, Table>, CleanerError>,
    {
        let (mut table, mut report) = Self::prepare_contacts(contacts, log)?;

        for list in ExclusionList::ALL {
            let exclusion = exclusion_for(list, log)?;
            let removed = Self::apply_exclusion(&mut table, &report.phone_columns, &exclusion, list, log)?;
            report.record_removed(list, removed);
        }

        log.info("Processamento de filtros concluído.");
        let reordered = ColumnReorderer::reorder(&table, &report.phone_columns);
        let table = Self::settle_reorder(table, reordered, log);
        report.remaining_rows = table.row_count();

        Ok((table, report))
    }

    fn load_input(
        picker: &mut dyn FilePicker,
        kind: InputKind,
        log: &mut RunLog,
    ) -> Result<(Table, PathBuf), CleanerError> {
        log.info(format!("Por favor, selecione o arquivo: {}...", kind.title()));

        let path = picker
            .pick_input(kind)
            .ok_or_else(|| CleanerError::SelectionCancelled(kind.description().to_string()))?;

        let loaded = TableLoader::load(&path).map_err(|source| CleanerError::Load {
            path: path.clone(),
            source,
        })?;

        let format = match loaded.format {
            SourceFormat::Spreadsheet => "planilha".to_string(),
            SourceFormat::Delimited(d) => format!("texto separado por '{}'", d as char),
        };
        log.info(format!(
            "Arquivo '{}' carregado ({}, {} linhas).",
            file_display_name(&path),
            format,
            loaded.table.row_count()
        ));

        if loaded.skipped_rows > 0 {
            log.warn(format!(
                "{} linhas malformadas ignoradas em '{}'.",
                loaded.skipped_rows,
                file_display_name(&path)
            ));
        }

        Ok((loaded.table, path))
    }

    /// Projeção das colunas e separação dos telefones.
    pub fn prepare_contacts(contacts: &Table, log: &mut RunLog) -> Result<(Table, CleanReport), CleanerError> {
        let mut table = ColumnProjector::project(contacts)?;
        log.info(format!("Colunas filtradas: {}", table.columns().join(", ")));

        log.info("Separando telefones em colunas dinâmicas...");
        let outcome = PhoneSplitter::split(&mut table).map_err(CleanerError::PhoneSplit)?;

        if outcome.dropped_rows > 0 {
            log.info(format!("{} linhas sem telefone descartadas.", outcome.dropped_rows));
        }
        match outcome.phone_columns.last() {
            Some(last) => log.info(format!(
                "Telefones divididos em {} colunas (de 'telefone_1' a '{}').",
                outcome.max_phones(),
                last
            )),
            None => log.warn("Nenhum telefone encontrado na planilha principal."),
        }
        log.info(format!("Total de leads para verificar: {}", table.row_count()));

        let report = CleanReport {
            loaded_rows: contacts.row_count(),
            rows_without_phone: outcome.dropped_rows,
            phone_columns: outcome.phone_columns,
            ..CleanReport::default()
        };

        Ok((table, report))
    }

    pub fn apply_exclusion(
        table: &mut Table,
        phone_columns: &[String],
        exclusion: &Table,
        list: ExclusionList,
        log: &mut RunLog,
    ) -> Result<usize, CleanerError> {
        log.info(format!("Extraindo telefones da lista '{}' (segunda coluna)...", list));
        let excluded = ExclusionSet::from_table(exclusion, list)?;
        log.info(format!("Carregados {} telefones únicos da lista '{}'.", excluded.len(), list));

        let removed = ExclusionFilter::apply(table, phone_columns, &excluded);
        log.info(format!("Filtro '{}' aplicado. {} linhas removidas.", list, removed));

        Ok(removed)
    }

    /// Falha na reordenação mantém a tabela como estava.
    pub fn settle_reorder(table: Table, reordered: anyhow::Result<Table>, log: &mut RunLog) -> Table {
        match reordered {
            Ok(reordered) => {
                log.info(format!("Colunas reordenadas para: {}", reordered.columns().join(", ")));
                reordered
            }
            Err(e) => {
                log.error(format!("Não foi possível reordenar as colunas: {:#}", e));
                table
            }
        }
    }

    fn save(table: &Table, source_name: &str, picker: &mut dyn FilePicker, log: &mut RunLog) -> SaveOutcome {
        // sem dados não há por que perguntar o destino
        let destination = if table.is_empty() {
            None
        } else {
            picker.pick_output(&generate_output_filename_with_source(source_name))
        };

        Exporter::export(table, destination.as_deref(), log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn table() -> Table {
        Table::new(
            vec!["cnpj".to_string(), "razao_social".to_string()],
            vec![vec!["111".to_string(), "Alfa".to_string()]],
        )
    }

    #[test]
    fn test_failed_reorder_keeps_previous_table() {
        let mut log = RunLog::new();

        let kept = Processor::settle_reorder(table(), Err(anyhow!("coluna inexistente: email")), &mut log);

        assert_eq!(kept, table());
        assert!(log.contains("Não foi possível reordenar as colunas: coluna inexistente: email"));
    }

    #[test]
    fn test_successful_reorder_is_used() {
        let mut log = RunLog::new();
        let reordered = table().select(&["razao_social", "cnpj"]);

        let result = Processor::settle_reorder(table(), reordered, &mut log);

        assert_eq!(result.columns(), &["razao_social", "cnpj"]);
        assert!(log.contains("Colunas reordenadas para: razao_social, cnpj"));
    }

    #[test]
    fn test_split_error_keeps_its_message() {
        let mut contacts = table();

        let error = PhoneSplitter::split(&mut contacts).map_err(CleanerError::PhoneSplit).unwrap_err();

        assert!(!error.is_cancellation());
        assert!(error.to_string().contains("coluna inexistente: telefones"), "{}", error);
    }

    #[test]
    fn test_exclusion_lists_are_requested_after_contacts_are_checked() {
        let contacts = Table::new(vec!["telefone".to_string()], vec![vec!["11999990000".to_string()]]);
        let mut requested = Vec::new();
        let mut log = RunLog::new();

        let result = Processor::clean_with(&contacts, &mut log, |list, _| {
            requested.push(list);
            Ok(Cow::Owned(table()))
        });

        assert!(matches!(result, Err(CleanerError::MissingColumn(_))));
        assert!(requested.is_empty());
    }
}
