use uuid::Uuid;

use super::{FieldErrors, FormData};

pub const DESCRIPTION_MAX_LENGTH: usize = 256;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_INTEGER: &str = "Enter a whole number.";
pub const MSG_INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Submitted value with surrounding whitespace removed; missing fields are empty
pub fn raw<'a>(data: &'a FormData, name: &str) -> &'a str {
    data.get(name).map(|v| v.trim()).unwrap_or("")
}

/// Value shown in a bound form: exactly what was submitted
pub fn submitted(data: Option<&FormData>, name: &str) -> Option<String> {
    data.map(|d| d.get(name).cloned().unwrap_or_default())
}

pub fn clean_char(
    data: &FormData,
    name: &str,
    max_length: usize,
    required: bool,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = raw(data, name);
    if value.is_empty() {
        if required {
            errors.add(name, MSG_REQUIRED);
            return None;
        }
        return Some(String::new());
    }

    let length = value.chars().count();
    if length > max_length {
        errors.add(
            name,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                max_length, length
            ),
        );
        return None;
    }

    Some(value.to_string())
}

/// Free text; never fails
pub fn clean_text(data: &FormData, name: &str) -> String {
    raw(data, name).to_string()
}

/// `Some(None)` for a blank optional field, `None` when invalid
pub fn clean_integer(
    data: &FormData,
    name: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> Option<Option<i32>> {
    let value = raw(data, name);
    if value.is_empty() {
        if required {
            errors.add(name, MSG_REQUIRED);
            return None;
        }
        return Some(None);
    }

    match value.parse::<i32>() {
        Ok(n) => Some(Some(n)),
        Err(_) => {
            errors.add(name, MSG_INTEGER);
            None
        }
    }
}

/// Required reference to another record; existence is checked by the caller
pub fn clean_reference(data: &FormData, name: &str, errors: &mut FieldErrors) -> Option<Uuid> {
    let value = raw(data, name);
    if value.is_empty() {
        errors.add(name, MSG_REQUIRED);
        return None;
    }

    match Uuid::parse_str(value) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(name, MSG_INVALID_CHOICE);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_clean_char_required_and_length() {
        let mut errors = FieldErrors::default();
        let form = data(&[("description", "   "), ("title", "abcdef")]);

        assert_eq!(clean_char(&form, "description", 10, true, &mut errors), None);
        assert_eq!(errors.get("description"), [MSG_REQUIRED.to_string()]);

        assert_eq!(clean_char(&form, "title", 3, true, &mut errors), None);
        assert!(errors.get("title")[0].contains("at most 3 characters"));

        let mut errors = FieldErrors::default();
        assert_eq!(
            clean_char(&form, "title", 10, true, &mut errors),
            Some("abcdef".to_string())
        );
        assert_eq!(clean_char(&form, "missing", 10, false, &mut errors), Some(String::new()));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_clean_integer() {
        let mut errors = FieldErrors::default();
        let form = data(&[("year", "1971"), ("bad", "19x1"), ("blank", "")]);

        assert_eq!(clean_integer(&form, "year", false, &mut errors), Some(Some(1971)));
        assert_eq!(clean_integer(&form, "blank", false, &mut errors), Some(None));
        assert!(errors.is_empty());

        assert_eq!(clean_integer(&form, "bad", false, &mut errors), None);
        assert_eq!(clean_integer(&form, "blank", true, &mut errors), None);
        assert_eq!(errors.get("bad"), [MSG_INTEGER.to_string()]);
        assert_eq!(errors.get("blank"), [MSG_REQUIRED.to_string()]);
    }

    #[test]
    fn test_clean_reference_tolerates_malformed_ids() {
        let mut errors = FieldErrors::default();
        let id = Uuid::new_v4();
        let form = data(&[("artist", &id.to_string()), ("album", "not-a-uuid")]);

        assert_eq!(clean_reference(&form, "artist", &mut errors), Some(id));
        assert_eq!(clean_reference(&form, "album", &mut errors), None);
        assert_eq!(errors.get("album"), [MSG_INVALID_CHOICE.to_string()]);
    }
}
