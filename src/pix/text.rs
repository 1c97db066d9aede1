use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const MAX_NAME_LEN: usize = 25;
pub const MAX_CITY_LEN: usize = 15;
pub const MAX_TX_ID_LEN: usize = 25;

pub const DEFAULT_NAME: &str = "Recebedor";
pub const DEFAULT_CITY: &str = "Cidade";
pub const DEFAULT_TX_ID: &str = "***";

/// Reduce free text to the ASCII alphabet the payload allows.
///
/// Accents are decomposed and dropped, anything other than ASCII letters,
/// digits and spaces is removed, and the result is cut to `max_len`.
/// Outer spaces are trimmed so that running this twice changes nothing.
pub fn normalize_text(value: Option<&str>, max_len: usize) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let filtered: String = value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    // ASCII only from here, so byte and char offsets agree
    let trimmed = filtered.trim();
    let cut = &trimmed[..trimmed.len().min(max_len)];
    cut.trim_end().to_string()
}

/// Merchant name with the receiver fallback
pub fn merchant_name(value: Option<&str>) -> String {
    or_default(normalize_text(value, MAX_NAME_LEN), DEFAULT_NAME)
}

/// Merchant city with the generic fallback
pub fn merchant_city(value: Option<&str>) -> String {
    or_default(normalize_text(value, MAX_CITY_LEN), DEFAULT_CITY)
}

/// Transaction id: ASCII alphanumerics only, no spaces
pub fn sanitize_tx_id(value: Option<&str>) -> String {
    let cleaned: String = value
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_TX_ID_LEN)
        .collect();
    or_default(cleaned, DEFAULT_TX_ID)
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_degrade_to_base_letters() {
        assert_eq!(normalize_text(Some("São Paulo"), 15), "Sao Paulo");
        assert_eq!(normalize_text(Some("Brasília"), 15), "Brasilia");
        assert_eq!(normalize_text(Some("Múltiplos Serviços"), 25), "Multiplos Servicos");
        assert_eq!(normalize_text(Some("Ação Ñandú"), 25), "Acao Nandu");
    }

    #[test]
    fn test_symbols_removed_and_truncated() {
        assert_eq!(normalize_text(Some("Netflix & Co. (BR)"), 25), "Netflix  Co BR");
        assert_eq!(
            normalize_text(Some("Streams Control Compartilhado Ltda"), 25),
            "Streams Control Compartil"
        );
        assert_eq!(normalize_text(Some("tab\tand\nnewline"), 25), "tabandnewline");
    }

    #[test]
    fn test_empty_or_absent_is_empty() {
        assert_eq!(normalize_text(None, 25), "");
        assert_eq!(normalize_text(Some(""), 25), "");
        assert_eq!(normalize_text(Some("@#$%"), 25), "");
        assert_eq!(normalize_text(Some("   "), 25), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Fulano de Tal",
            "  São João del-Rei  ",
            "ab cd",
            "Ünïcödé ñ ç",
            "Streams Control Compartilhado Ltda",
            "x y z w v u t s r q p o n m",
            "",
            "東京",
        ];
        for sample in samples {
            for max_len in [3, 15, 25] {
                let once = normalize_text(Some(sample), max_len);
                let twice = normalize_text(Some(once.as_str()), max_len);
                assert_eq!(once, twice, "sample {sample:?} max {max_len}");
            }
        }
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(merchant_name(None), "Recebedor");
        assert_eq!(merchant_name(Some("!!!")), "Recebedor");
        assert_eq!(merchant_city(Some("")), "Cidade");
        assert_eq!(merchant_city(Some("Recife")), "Recife");
    }

    #[test]
    fn test_tx_id() {
        assert_eq!(sanitize_tx_id(None), "***");
        assert_eq!(sanitize_tx_id(Some("***")), "***");
        assert_eq!(sanitize_tx_id(Some("LOTE_03_2026")), "LOTE032026");
        assert_eq!(sanitize_tx_id(Some("pedido 42")), "pedido42");
        assert_eq!(sanitize_tx_id(Some("A".repeat(40).as_str())), "A".repeat(25));
    }
}
