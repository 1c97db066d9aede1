use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declared type of a Pix key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyType {
    Cpf,
    Cnpj,
    Phone,
    Random,
    Email,
    /// A label we do not recognize; the key passes through untouched
    Other(String),
    /// No label given; the key type is inferred
    #[default]
    Unspecified,
}

impl KeyType {
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
            return Self::Unspecified;
        };
        match label.to_lowercase().as_str() {
            "cpf" => Self::Cpf,
            "cnpj" => Self::Cnpj,
            "phone" | "celular" | "telefone" => Self::Phone,
            "random" | "aleatoria" | "evp" => Self::Random,
            "email" | "e-mail" => Self::Email,
            _ => Self::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::Phone => "phone",
            Self::Random => "random",
            Self::Email => "email",
            Self::Other(label) => label,
            Self::Unspecified => "",
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for KeyType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for KeyType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_label(label.as_deref()))
    }
}

fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Rewrite a raw key into the form the DICT registry stores.
pub fn normalize_key(key: &str, key_type: &KeyType) -> String {
    let key = key.trim();

    match key_type {
        KeyType::Cpf | KeyType::Cnpj => digits(key),
        KeyType::Phone => {
            let rest = digits(key);
            if key.starts_with('+') {
                format!("+{rest}")
            } else {
                rest
            }
        }
        KeyType::Random | KeyType::Email | KeyType::Other(_) => key.to_string(),
        KeyType::Unspecified => {
            // Punctuated 11/14 digit keys are a formatted CPF/CNPJ
            let only_digits = digits(key);
            let punctuated = key.contains(['.', '-', '/']);
            if matches!(only_digits.len(), 11 | 14) && punctuated && !key.contains('@') {
                only_digits
            } else {
                key.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_case_insensitive() {
        assert_eq!(KeyType::from_label(Some("CPF")), KeyType::Cpf);
        assert_eq!(KeyType::from_label(Some("Cnpj")), KeyType::Cnpj);
        assert_eq!(KeyType::from_label(Some("Celular")), KeyType::Phone);
        assert_eq!(KeyType::from_label(Some("telefone")), KeyType::Phone);
        assert_eq!(KeyType::from_label(Some("EMAIL")), KeyType::Email);
        assert_eq!(KeyType::from_label(Some("random")), KeyType::Random);
        assert_eq!(KeyType::from_label(Some("  ")), KeyType::Unspecified);
        assert_eq!(KeyType::from_label(None), KeyType::Unspecified);
        assert_eq!(
            KeyType::from_label(Some("pager")),
            KeyType::Other("pager".to_string())
        );
    }

    #[test]
    fn test_cpf_and_cnpj_strip_to_digits() {
        assert_eq!(normalize_key("123.456.789-09", &KeyType::Cpf), "12345678909");
        assert_eq!(
            normalize_key(" 12.345.678/0001-95 ", &KeyType::Cnpj),
            "12345678000195"
        );
    }

    #[test]
    fn test_phone_keeps_only_leading_plus() {
        assert_eq!(normalize_key("(11) 91234-5678", &KeyType::Phone), "11912345678");
        assert_eq!(
            normalize_key("+55 (11) 91234-5678", &KeyType::Phone),
            "+5511912345678"
        );
        assert_eq!(normalize_key("55+11 91234", &KeyType::Phone), "551191234");
    }

    #[test]
    fn test_other_types_pass_through_trimmed() {
        assert_eq!(
            normalize_key("  fulano@example.com ", &KeyType::Email),
            "fulano@example.com"
        );
        let evp = "123e4567-e89b-12d3-a456-426614174000";
        assert_eq!(normalize_key(evp, &KeyType::Random), evp);
        assert_eq!(
            normalize_key("123.456.789-09", &KeyType::Other("pager".into())),
            "123.456.789-09"
        );
    }

    #[test]
    fn test_unspecified_infers_formatted_documents() {
        assert_eq!(normalize_key("123.456.789-09", &KeyType::Unspecified), "12345678909");
        assert_eq!(
            normalize_key("12.345.678/0001-95", &KeyType::Unspecified),
            "12345678000195"
        );
        // bare digits carry no punctuation hint
        assert_eq!(normalize_key("12345678909", &KeyType::Unspecified), "12345678909");
        // wrong digit count
        assert_eq!(normalize_key("123.456-78", &KeyType::Unspecified), "123.456-78");
        // emails are never rewritten
        assert_eq!(
            normalize_key("123.456.789-09@mail.com", &KeyType::Unspecified),
            "123.456.789-09@mail.com"
        );
    }

    #[test]
    fn test_non_blank_key_stays_non_blank() {
        assert_eq!(normalize_key(" abc ", &KeyType::Unspecified), "abc");
    }

    #[test]
    fn test_deserialize_from_optional_label() {
        let ty: KeyType = serde_json::from_str("\"Telefone\"").unwrap();
        assert_eq!(ty, KeyType::Phone);
        let ty: KeyType = serde_json::from_str("null").unwrap();
        assert_eq!(ty, KeyType::Unspecified);
        assert_eq!(serde_json::to_string(&KeyType::Cnpj).unwrap(), "\"cnpj\"");
    }
}
