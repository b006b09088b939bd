use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub blocklist: Option<PathBuf>,
    pub do_not_disturb: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Abre o seletor de arquivos para os caminhos que não foram informados.
    pub use_dialogs: bool,
    pub default_log_file: PathBuf,
    pub error_log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            blocklist: None,
            do_not_disturb: None,
            output: None,
            use_dialogs: true,
            default_log_file: PathBuf::from("automacao_log.txt"),
            error_log_file: PathBuf::from("automacao_log_ERRO.txt"),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref)
            .with_context(|| format!("não foi possível ler a configuração: {}", path_ref.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("configuração inválida: {}", path_ref.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"input": "contatos.csv", "use_dialogs": false}"#).unwrap();

        assert_eq!(config.input, Some(PathBuf::from("contatos.csv")));
        assert!(!config.use_dialogs);
        assert!(config.blocklist.is_none());
        assert_eq!(config.default_log_file, PathBuf::from("automacao_log.txt"));
    }
}
