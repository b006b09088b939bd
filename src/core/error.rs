use std::path::PathBuf;
use thiserror::Error;

/// Condições que encerram a execução antes de qualquer arquivo de dados ser gravado.
#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("nenhum arquivo selecionado para: {0}")]
    SelectionCancelled(String),

    #[error("a coluna '{0}' é essencial e não foi encontrada")]
    MissingColumn(String),

    #[error("a lista '{list}' não tem segunda coluna (colunas encontradas: {columns})")]
    MissingExclusionColumn { list: String, columns: usize },

    #[error("falha ao separar os telefones: {0:#}")]
    PhoneSplit(#[source] anyhow::Error),

    #[error("erro ao ler o arquivo {}: {:#}", .path.display(), .source)]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl CleanerError {
    /// Cancelamento é escolha do usuário, não falha.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::SelectionCancelled(_))
    }
}
