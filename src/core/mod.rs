mod error;
mod exclusion;
mod exporter;
mod normalizer;
mod phone_splitter;
mod projector;
mod processor;
mod reorderer;
mod table_loader;

pub use error::CleanerError;
pub use exclusion::{ExclusionFilter, ExclusionList, ExclusionSet, EXCLUSION_PHONE_COLUMN_INDEX};
pub use exporter::{Exporter, SaveOutcome};
pub use normalizer::Normalizer;
pub use phone_splitter::{phone_column_name, PhoneSplitter, SplitOutcome};
pub use processor::{CleanReport, Processor, RunSummary};
pub use projector::{ColumnProjector, PHONE_LIST_COLUMN, TARGET_COLUMNS};
pub use reorderer::ColumnReorderer;
pub use table_loader::{LoadedTable, SourceFormat, TableLoader};
