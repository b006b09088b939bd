use calamine::Data;

use crate::utils::strip_phone_punctuation;

pub struct Normalizer;

impl Normalizer {
    /// Remove `(`, `)`, `-` e espaços. Não valida o número.
    pub fn normalize(value: &str) -> String {
        strip_phone_punctuation(value)
    }

    pub fn normalize_all<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        values.into_iter().map(Self::normalize).collect()
    }

    /// Converte uma célula de planilha em texto. Números inteiros guardados
    /// como ponto flutuante saem sem a parte decimal.
    pub fn cell_to_string(data: &Data) -> String {
        match data {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Float(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    format!("{}", f)
                }
            }
            Data::Int(i) => format!("{}", i),
            Data::Bool(b) => format!("{}", b),
            Data::DateTime(dt) => format!("{}", dt),
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Error(e) => format!("{:?}", e),
        }
    }
}
