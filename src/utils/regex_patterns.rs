use regex::Regex;
use std::sync::LazyLock;

/// Pontuação e espaços removidos dos telefones: parênteses, hífen e qualquer espaço em branco
pub static PHONE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()\s-]").unwrap());

/// Valor vazio ou só com espaços
pub static BLANK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*$").unwrap());

pub fn strip_phone_punctuation(s: &str) -> String {
    PHONE_PUNCTUATION.replace_all(s, "").into_owned()
}

pub fn is_blank(s: &str) -> bool {
    BLANK.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation() {
        assert_eq!(strip_phone_punctuation("(11) 99999-0000"), "11999990000");
        assert_eq!(strip_phone_punctuation("11\t9999\u{a0}0000"), "1199990000");
        assert_eq!(strip_phone_punctuation("+55 11 3333-4444"), "+551133334444");
    }

    #[test]
    fn punctuation_keeps_list_separator() {
        assert_eq!(strip_phone_punctuation("(11) 1111-1111, (22) 2222-2222"), "1111111111,2222222222");
    }

    #[test]
    fn blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" 1 "));
    }
}
