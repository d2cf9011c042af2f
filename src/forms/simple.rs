use super::fields::{clean_integer, submitted};
use super::{BoundField, FieldErrors, FormData, FormView, Widget};

pub const VALUE_MIN: i32 = 1;
pub const VALUE_MAX: i32 = 10;
pub const MSG_OUT_OF_RANGE: &str = "This value is not acceptable.";

/// Stand-alone demo form with a single bounded integer
pub struct SimpleForm {
    data: Option<FormData>,
    errors: FieldErrors,
    value: Option<i32>,
}

impl SimpleForm {
    pub fn new(data: Option<FormData>) -> Self {
        Self {
            data,
            errors: FieldErrors::default(),
            value: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    pub fn is_valid(&mut self) -> bool {
        let Some(data) = &self.data else {
            return false;
        };

        self.errors.clear();
        self.value = match clean_integer(data, "value", true, &mut self.errors).flatten() {
            Some(value) if !(VALUE_MIN..=VALUE_MAX).contains(&value) => {
                self.errors.add("value", MSG_OUT_OF_RANGE);
                None
            }
            other => other,
        };
        self.value.is_some()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The validated value
    pub fn value(&self) -> Option<i32> {
        self.value
    }

    /// Nothing is persisted; acknowledges a validated submission
    pub fn save(&self) -> bool {
        self.value.is_some()
    }

    pub fn view(&self) -> FormView {
        FormView {
            is_bound: self.is_bound(),
            fields: vec![BoundField {
                name: "value",
                label: "value",
                widget: Widget::Number,
                required: true,
                help_text: Some("Enter a value between 1 and 10"),
                value: submitted(self.data.as_ref(), "value").unwrap_or_default(),
                errors: self.errors.get("value").to_vec(),
            }],
        }
    }
}
