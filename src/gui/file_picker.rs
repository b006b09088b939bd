use std::path::PathBuf;

use crate::core::ExclusionList;
use crate::models::Config;

const CONTACT_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];
const CSV_EXTENSIONS: &[&str] = &["csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Contacts,
    Exclusion(ExclusionList),
}

impl InputKind {
    pub fn title(&self) -> String {
        match self {
            Self::Contacts => "Selecione a planilha principal (Excel/CSV)".to_string(),
            Self::Exclusion(list) => format!("Selecione o arquivo '{}' (CSV)", list),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Contacts => "planilha principal",
            Self::Exclusion(list) => list.label(),
        }
    }

    fn filter(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Contacts => ("Planilhas", CONTACT_EXTENSIONS),
            Self::Exclusion(_) => ("Arquivos CSV", CSV_EXTENSIONS),
        }
    }
}

/// Origem dos caminhos de entrada e saída.
pub trait FilePicker {
    fn pick_input(&mut self, kind: InputKind) -> Option<PathBuf>;

    fn pick_output(&mut self, suggested_name: &str) -> Option<PathBuf>;
}

/// Diálogos nativos do sistema.
#[derive(Debug, Default)]
pub struct DialogPicker;

impl FilePicker for DialogPicker {
    fn pick_input(&mut self, kind: InputKind) -> Option<PathBuf> {
        let (filter_name, extensions) = kind.filter();

        rfd::FileDialog::new()
            .set_title(kind.title())
            .add_filter(filter_name, extensions)
            .add_filter("Todos os arquivos", &["*"])
            .pick_file()
    }

    fn pick_output(&mut self, suggested_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Salvar arquivo final")
            .set_file_name(suggested_name)
            .add_filter("Arquivo Excel", &["xlsx"])
            .add_filter("Arquivo CSV", &["csv"])
            .save_file()
    }
}

/// Caminhos vindos da linha de comando ou do arquivo de configuração.
/// Com `use_dialogs`, o que faltar é perguntado pelo diálogo.
#[derive(Debug, Default)]
pub struct PresetPicker {
    contacts: Option<PathBuf>,
    blocklist: Option<PathBuf>,
    do_not_disturb: Option<PathBuf>,
    output: Option<PathBuf>,
    fallback: Option<DialogPicker>,
}

impl PresetPicker {
    pub fn from_config(config: &Config) -> Self {
        Self {
            contacts: config.input.clone(),
            blocklist: config.blocklist.clone(),
            do_not_disturb: config.do_not_disturb.clone(),
            output: config.output.clone(),
            fallback: config.use_dialogs.then_some(DialogPicker),
        }
    }

    pub fn new(
        contacts: impl Into<PathBuf>,
        blocklist: impl Into<PathBuf>,
        do_not_disturb: impl Into<PathBuf>,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            contacts: Some(contacts.into()),
            blocklist: Some(blocklist.into()),
            do_not_disturb: Some(do_not_disturb.into()),
            output,
            fallback: None,
        }
    }
}

impl FilePicker for PresetPicker {
    fn pick_input(&mut self, kind: InputKind) -> Option<PathBuf> {
        let preset = match kind {
            InputKind::Contacts => self.contacts.take(),
            InputKind::Exclusion(ExclusionList::Blocklist) => self.blocklist.take(),
            InputKind::Exclusion(ExclusionList::DoNotDisturb) => self.do_not_disturb.take(),
        };

        match (preset, self.fallback.as_mut()) {
            (Some(path), _) => Some(path),
            (None, Some(dialog)) => dialog.pick_input(kind),
            (None, None) => None,
        }
    }

    fn pick_output(&mut self, suggested_name: &str) -> Option<PathBuf> {
        match (self.output.take(), self.fallback.as_mut()) {
            (Some(path), _) => Some(path),
            (None, Some(dialog)) => dialog.pick_output(suggested_name),
            (None, None) => None,
        }
    }
}
