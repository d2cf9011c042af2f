use maud::{html, Markup};
use uuid::Uuid;

use crate::crud::{
    urls::{add_url, change_url, clone_url, delete_url},
    EntityDescriptor,
};
use crate::forms::{BoundField, FormView, Widget};

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary";

pub fn notification(message: &str, notification_type: &str) -> Markup {
    let (bg_color, text_color, icon) = match notification_type {
        "success" => ("bg-green-50", "text-green-800", "✓"),
        "error" => ("bg-red-50", "text-red-800", "✗"),
        "info" => ("bg-blue-50", "text-blue-800", "ℹ"),
        _ => ("bg-gray-50", "text-gray-800", "•"),
    };

    html! {
        div class={(format!("p-4 rounded-md {} {}", bg_color, text_color))} {
            div class="flex items-center" {
                span class="font-bold mr-2" { (icon) }
                span { (message) }
            }
        }
    }
}

/// "Add" button opening the add form in the modal
pub fn add_button(descriptor: &EntityDescriptor) -> Markup {
    html! {
        button
            class="px-4 py-2 bg-primary hover:bg-green-600 text-white font-semibold rounded-md"
            hx-get=(add_url(descriptor))
            hx-target="#modal"
            hx-swap="innerHTML" {
            "Add " (descriptor.verbose_name().to_lowercase())
        }
    }
}

/// Change, clone and delete actions for one record
pub fn object_actions(descriptor: &EntityDescriptor, id: Uuid, display: &str) -> Markup {
    html! {
        div class="flex space-x-2 text-sm" {
            button
                class="text-primary hover:underline"
                hx-get=(change_url(descriptor, id))
                hx-target="#modal"
                hx-swap="innerHTML" {
                "change"
            }
            button
                class="text-gray-600 hover:underline"
                hx-post=(clone_url(descriptor, id))
                hx-swap="none"
                hx-on="htmx:afterRequest: window.location.reload()" {
                "clone"
            }
            button
                class="text-red-600 hover:underline"
                hx-post=(delete_url(descriptor, id))
                hx-confirm=(format!("Delete {} \"{}\"?", descriptor.verbose_name().to_lowercase(), display))
                hx-swap="none"
                hx-on="htmx:afterRequest: window.location.reload()" {
                "delete"
            }
        }
    }
}

fn field_input(field: &BoundField) -> Markup {
    html! {
        @match &field.widget {
            Widget::Text { max_length } => {
                input
                    type="text"
                    id=(format!("id_{}", field.name))
                    name=(field.name)
                    value=(field.value)
                    maxlength=(max_length)
                    required[field.required]
                    class=(INPUT_CLASS);
            }
            Widget::TextArea => {
                textarea
                    id=(format!("id_{}", field.name))
                    name=(field.name)
                    rows="4"
                    class=(INPUT_CLASS) {
                    (field.value)
                }
            }
            Widget::Number => {
                input
                    type="number"
                    id=(format!("id_{}", field.name))
                    name=(field.name)
                    value=(field.value)
                    required[field.required]
                    class=(INPUT_CLASS);
            }
            Widget::Select(choices) => {
                select
                    id=(format!("id_{}", field.name))
                    name=(field.name)
                    required[field.required]
                    class=(INPUT_CLASS) {
                    option value="" { "---------" }
                    @for choice in choices {
                        option value=(choice.value) selected[choice.value == field.value] {
                            (choice.label)
                        }
                    }
                }
            }
        }
    }
}

/// All fields of a form, each with its label, help text and errors
pub fn form_fields(form: &FormView) -> Markup {
    html! {
        @for field in &form.fields {
            div class={(format!("mb-4{}", if field.errors.is_empty() { "" } else { " has-error" }))} {
                label for=(format!("id_{}", field.name)) class="block text-sm font-medium text-gray-700 mb-2" {
                    (field.label)
                    @if field.required { " *" }
                }
                (field_input(field))
                @if let Some(help) = field.help_text {
                    p class="text-xs text-gray-500 mt-1" { (help) }
                }
                @for error in &field.errors {
                    p class="text-sm text-red-600 mt-1 field-error" { (error) }
                }
            }
        }
    }
}

/// A form posting to `action`; HTMX swaps the response in place
pub fn form_block(form: &FormView, action: &str) -> Markup {
    html! {
        form method="post" action=(action) hx-post=(action) hx-target="this" hx-swap="outerHTML" {
            (form_fields(form))
            div class="form-submit-row flex justify-end" {
                button
                    type="submit"
                    class="px-4 py-2 bg-primary hover:bg-green-600 text-white font-semibold rounded-md" {
                    "Save"
                }
            }
        }
    }
}
