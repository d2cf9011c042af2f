use maud::{html, Markup, DOCTYPE};

use super::components::notification;

pub fn base_layout(title: &str, message: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class="h-full" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - Music Catalog" }

                // Compiled TailwindCSS
                link rel="stylesheet" href="/static/css/output.css";

                // HTMX for modal forms and inline actions
                script src="https://unpkg.com/htmx.org@1.9.10" {}
            }
            body class="h-full bg-gray-50" {
                div class="min-h-full" {
                    (nav_bar())

                    main class="container mx-auto px-4 py-8" {
                        // Flash message carried over a redirect
                        div id="notification-area" class="mb-4" {
                            @if let Some(message) = message {
                                (notification(message, "success"))
                            }
                        }

                        (content)
                    }

                    (footer())
                }

                // Generic modal, filled by HTMX with form fragments
                div id="modal" {}
            }
        }
    }
}

fn nav_bar() -> Markup {
    html! {
        nav class="bg-white shadow-sm" {
            div class="container mx-auto px-4" {
                div class="flex justify-between items-center h-16" {
                    a href="/" class="flex items-center space-x-3" {
                        span class="text-xl font-bold text-gray-900" { "Music Catalog" }
                    }

                    div class="flex space-x-4" {
                        a href="/artists" class="text-gray-700 hover:text-primary px-3 py-2 rounded-md text-sm font-medium" {
                            "Artists"
                        }
                        a href="/artists-and-albums" class="text-gray-700 hover:text-primary px-3 py-2 rounded-md text-sm font-medium" {
                            "Artists & Albums"
                        }
                        a href="/songs" class="text-gray-700 hover:text-primary px-3 py-2 rounded-md text-sm font-medium" {
                            "Songs"
                        }
                        a href="/simple-form" class="text-gray-700 hover:text-primary px-3 py-2 rounded-md text-sm font-medium" {
                            "Simple form"
                        }
                        a href="/about" class="text-gray-700 hover:text-primary px-3 py-2 rounded-md text-sm font-medium" {
                            "About"
                        }
                    }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer class="bg-white border-t border-gray-200 mt-12" {
            div class="container mx-auto px-4 py-6" {
                div class="text-center text-gray-600 text-sm" {
                    "Music Catalog - artists, albums and songs"
                }
            }
        }
    }
}
