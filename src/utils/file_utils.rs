use std::path::{Path, PathBuf};

pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn has_extension(path: &Path, candidates: &[&str]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            candidates.iter().any(|c| ext.eq_ignore_ascii_case(c))
        })
        .unwrap_or(false)
}

pub fn is_spreadsheet_file(path: &Path) -> bool {
    has_extension(path, &SPREADSHEET_EXTENSIONS)
}

pub fn is_csv_file(path: &Path) -> bool {
    has_extension(path, &["csv"])
}

pub fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// `pasta/contatos.xlsx` -> `pasta/contatos_log.txt`
pub fn log_path_for(output_path: &Path) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    output_path.with_file_name(format!("{}_log.txt", stem))
}

pub fn generate_output_filename_with_source(source_name: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("{}_limpo_{}.xlsx", source_name, timestamp)
}
