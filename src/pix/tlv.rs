use super::PixError;

/// Largest value a two-digit length prefix can describe
pub const MAX_VALUE_LEN: usize = 99;

/// A single tag-length-value field of the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvField {
    pub tag: String,
    pub value: String,
}

/// Encode `tag ++ len ++ value`.
///
/// The length is the character count of `value` as given, so nested blocks
/// must be encoded before being passed in. Values over 99 characters are
/// rejected rather than overflowing the length prefix.
pub fn encode_field(tag: &str, value: &str) -> Result<String, PixError> {
    let len = value.chars().count();
    if len > MAX_VALUE_LEN {
        return Err(PixError::ValueTooLong {
            tag: tag.to_string(),
            len,
        });
    }
    Ok(format!("{tag}{len:02}{value}"))
}

/// Read a flat sequence of fields back out of `text`.
pub fn decode_fields(text: &str) -> Result<Vec<TlvField>, PixError> {
    let chars: Vec<char> = text.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if pos + 4 > chars.len() {
            return Err(PixError::Malformed(format!(
                "truncated field header at offset {pos}"
            )));
        }
        let tag: String = chars[pos..pos + 2].iter().collect();
        let len_str: String = chars[pos + 2..pos + 4].iter().collect();
        if !tag.chars().all(|c| c.is_ascii_digit()) {
            return Err(PixError::Malformed(format!("invalid tag {tag:?}")));
        }
        let len: usize = len_str
            .parse()
            .ok()
            .filter(|_| len_str.chars().all(|c| c.is_ascii_digit()))
            .ok_or_else(|| PixError::Malformed(format!("invalid length {len_str:?} for tag {tag}")))?;

        let start = pos + 4;
        let end = start + len;
        if end > chars.len() {
            return Err(PixError::Malformed(format!(
                "value of tag {tag} runs past end of input"
            )));
        }

        fields.push(TlvField {
            tag,
            value: chars[start..end].iter().collect(),
        });
        pos = end;
    }

    Ok(fields)
}

/// First field carrying `tag`
pub fn find<'a>(fields: &'a [TlvField], tag: &str) -> Option<&'a TlvField> {
    fields.iter().find(|f| f.tag == tag)
}
