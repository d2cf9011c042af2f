use maud::{html, Markup};

use super::components::{add_button, form_block, notification, object_actions};
use super::layout::base_layout;
use crate::crud::EntityDescriptor;
use crate::db::entities::{album, artist, song};
use crate::db::record::Record;
use crate::forms::FormView;

pub fn index_page(message: Option<&str>) -> Markup {
    base_layout(
        "Home",
        message,
        html! {
            div class="mb-8" {
                h1 class="text-3xl font-bold text-gray-900" { "Music Catalog" }
                p class="text-gray-600 mt-2" {
                    "Add, change, clone and delete artists, albums and songs from modal forms."
                }
            }
            ul class="list-disc ml-6 space-y-2" {
                li { a href="/artists" class="text-primary hover:underline" { "Artists" } }
                li { a href="/artists-and-albums" class="text-primary hover:underline" { "Artists and albums" } }
                li { a href="/songs" class="text-primary hover:underline" { "Songs" } }
                li { a href="/simple-form" class="text-primary hover:underline" { "A simple validated form" } }
                li { a href="/modal-demo" class="text-primary hover:underline" { "Modal content demos" } }
            }
        },
    )
}

pub fn about_page() -> Markup {
    base_layout(
        "About",
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-4" { "About" }
            p class="text-gray-600" {
                "Every entity type is edited through the same generic views. "
                "Each action requires the matching add, change or delete permission."
            }
        },
    )
}

fn artist_rows(descriptor: &EntityDescriptor, artists: &[artist::Model]) -> Markup {
    html! {
        @if artists.is_empty() {
            p class="text-gray-600 py-6" { "No artists yet." }
        } @else {
            table class="min-w-full bg-white rounded-lg shadow-sm" {
                thead {
                    tr {
                        th class="px-4 py-2 text-left" { "Artist" }
                        th class="px-4 py-2 text-left" { "Notes" }
                        th class="px-4 py-2" {}
                    }
                }
                tbody {
                    @for artist in artists {
                        tr class="hover:bg-gray-50" id=(format!("artist-{}", artist.id)) {
                            td class="px-4 py-2 font-medium" { (artist.to_string()) }
                            td class="px-4 py-2 text-gray-600" { (artist.notes) }
                            td class="px-4 py-2" {
                                (object_actions(descriptor, artist.id, &artist.to_string()))
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn artists_page(
    descriptor: &EntityDescriptor,
    artists: &[artist::Model],
    message: Option<&str>,
) -> Markup {
    let title = descriptor.kind.verbose_name_plural();
    base_layout(
        title,
        message,
        html! {
            div class="flex justify-between items-center mb-6" {
                h1 class="text-3xl font-bold text-gray-900" { (title) }
                (add_button(descriptor))
            }
            (artist_rows(descriptor, artists))
        },
    )
}

pub fn artists_and_albums_page(
    artist_descriptor: &EntityDescriptor,
    album_descriptor: &EntityDescriptor,
    artists: &[artist::Model],
    albums: &[(album::Model, Option<artist::Model>)],
    message: Option<&str>,
) -> Markup {
    base_layout(
        "Artists and albums",
        message,
        html! {
            div class="grid grid-cols-1 lg:grid-cols-2 gap-8" {
                section {
                    div class="flex justify-between items-center mb-4" {
                        h2 class="text-xl font-semibold text-gray-900" { (artist_descriptor.kind.verbose_name_plural()) }
                        (add_button(artist_descriptor))
                    }
                    (artist_rows(artist_descriptor, artists))
                }
                section {
                    div class="flex justify-between items-center mb-4" {
                        h2 class="text-xl font-semibold text-gray-900" { (album_descriptor.kind.verbose_name_plural()) }
                        (add_button(album_descriptor))
                    }
                    @if albums.is_empty() {
                        p class="text-gray-600 py-6" { "No albums yet." }
                    } @else {
                        table class="min-w-full bg-white rounded-lg shadow-sm" {
                            tbody {
                                @for (album, artist) in albums {
                                    tr class="hover:bg-gray-50" id=(format!("album-{}", album.id)) {
                                        td class="px-4 py-2 font-medium" {
                                            a href=(format!("/albums/{}", album.id)) class="hover:underline" { (album.to_string()) }
                                        }
                                        td class="px-4 py-2 text-gray-600" {
                                            @if let Some(artist) = artist { (artist.to_string()) }
                                        }
                                        td class="px-4 py-2 text-gray-500" {
                                            @if let Some(year) = album.year { (year) }
                                        }
                                        td class="px-4 py-2" {
                                            (object_actions(album_descriptor, album.id, &album.to_string()))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn song_rows(descriptor: &EntityDescriptor, songs: &[(song::Model, Option<album::Model>)]) -> Markup {
    html! {
        @if songs.is_empty() {
            p class="text-gray-600 py-6" { "No songs yet." }
        } @else {
            table class="min-w-full bg-white rounded-lg shadow-sm" {
                thead {
                    tr {
                        th class="px-4 py-2 text-right w-12" { "#" }
                        th class="px-4 py-2 text-left" { "Song" }
                        th class="px-4 py-2 text-left" { "Album" }
                        th class="px-4 py-2" {}
                    }
                }
                tbody {
                    @for (song, album) in songs {
                        tr class="hover:bg-gray-50" id=(format!("song-{}", song.id)) {
                            td class="px-4 py-2 text-right text-gray-500" { (song.position) }
                            td class="px-4 py-2 font-medium" { (song.to_string()) }
                            td class="px-4 py-2 text-gray-600" {
                                @if let Some(album) = album { (album.to_string()) }
                            }
                            td class="px-4 py-2" {
                                (object_actions(descriptor, song.id, &song.to_string()))
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn songs_page(
    descriptor: &EntityDescriptor,
    songs: &[(song::Model, Option<album::Model>)],
    message: Option<&str>,
) -> Markup {
    let title = descriptor.kind.verbose_name_plural();
    base_layout(
        title,
        message,
        html! {
            div class="flex justify-between items-center mb-6" {
                h1 class="text-3xl font-bold text-gray-900" { (title) }
                (add_button(descriptor))
            }
            (song_rows(descriptor, songs))
        },
    )
}

pub fn album_detail_page(
    song_descriptor: &EntityDescriptor,
    album: &album::Model,
    artist: Option<&artist::Model>,
    songs: Vec<song::Model>,
) -> Markup {
    let rows: Vec<(song::Model, Option<album::Model>)> =
        songs.into_iter().map(|s| (s, Some(album.clone()))).collect();

    base_layout(
        &album.to_string(),
        None,
        html! {
            div class="mb-6" {
                a href="/artists-and-albums" class="text-primary hover:underline" { "← Back" }
            }
            div class="bg-white rounded-lg shadow-sm p-6 mb-8" {
                h1 class="text-3xl font-bold text-gray-900" { (album.to_string()) }
                @if let Some(artist) = artist {
                    p class="text-gray-600 mt-2" { (artist.to_string()) }
                }
                @if let Some(year) = album.year {
                    p class="text-gray-500 mt-1" { (year) }
                }
            }
            div class="flex justify-between items-center mb-4" {
                h2 class="text-xl font-semibold text-gray-900" { "Songs" }
                (add_button(song_descriptor))
            }
            (song_rows(song_descriptor, &rows))
        },
    )
}

fn form_heading(descriptor: &EntityDescriptor, instance: Option<&Record>) -> String {
    match instance {
        Some(record) => format!("Change {} \"{}\"", descriptor.verbose_name().to_lowercase(), record),
        None => format!("Add {}", descriptor.verbose_name().to_lowercase()),
    }
}

/// Form fragment for the modal
///
/// `saved` is set once a submission was accepted, so the client can close
/// the modal.
pub fn generic_form_inner(
    descriptor: &EntityDescriptor,
    form: Option<&FormView>,
    action: &str,
    instance: Option<&Record>,
    saved: Option<&Record>,
) -> Markup {
    html! {
        div class="modal-content bg-white rounded-lg shadow-xl p-6"
            data-saved-id=[saved.map(|r| r.id().to_string())] {
            h2 class="text-xl font-bold text-gray-900 mb-4" { (form_heading(descriptor, instance.or(saved))) }
            @if let Some(record) = saved {
                (notification(&format!("Saved \"{}\".", record), "success"))
            }
            @if let Some(form) = form {
                (form_block(form, action))
            }
        }
    }
}

/// Stand-alone page version of the generic form
pub fn generic_form_page(
    descriptor: &EntityDescriptor,
    form: &FormView,
    action: &str,
    instance: Option<&Record>,
    message: Option<&str>,
) -> Markup {
    base_layout(
        &form_heading(descriptor, instance),
        message,
        html! {
            div class="max-w-xl" {
                h1 class="text-2xl font-bold text-gray-900 mb-6" { (form_heading(descriptor, instance)) }
                (form_block(form, action))
            }
        },
    )
}

pub fn simple_form_inner(form: &FormView, accepted: bool) -> Markup {
    html! {
        div class="modal-content bg-white rounded-lg shadow-xl p-6" {
            @if accepted {
                (notification("Form has been validated", "success"))
            }
            (form_block(form, "/simple-form"))
        }
    }
}

pub fn simple_form_page(form: &FormView, message: Option<&str>) -> Markup {
    base_layout(
        "Simple form",
        message,
        html! {
            div class="max-w-xl" {
                h1 class="text-2xl font-bold text-gray-900 mb-6" { "Simple form" }
                (form_block(form, "/simple-form"))
            }
        },
    )
}

pub fn simple_content_inner(text: &str) -> Markup {
    html! {
        div class="modal-content bg-white rounded-lg shadow-xl p-6" {
            h2 class="text-xl font-semibold text-gray-900 mb-4" { "Simple content" }
            p class="text-gray-700" { (text) }
        }
    }
}

pub fn simple_content_page(text: &str) -> Markup {
    base_layout(
        "Simple content",
        None,
        html! {
            div class="max-w-xl" {
                h1 class="text-2xl font-bold text-gray-900 mb-6" { "Simple content" }
                p class="text-gray-700" { (text) }
            }
        },
    )
}

fn modal_button(label: &str, url: &str) -> Markup {
    html! {
        button class="px-4 py-2 bg-primary hover:bg-green-600 text-white font-semibold rounded-md"
            hx-get=(url)
            hx-target="#modal"
            hx-swap="innerHTML" {
            (label)
        }
    }
}

/// Each button loads one endpoint into the layout's modal
pub fn modal_demo_page() -> Markup {
    base_layout(
        "Modal demos",
        None,
        html! {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { "Modal demos" }
            div class="flex flex-wrap gap-4" {
                (modal_button("Plain text", "/simple-content"))
                (modal_button("Forbidden", "/simple-content-forbidden"))
                (modal_button("Page or fragment", "/simple-content2"))
                (modal_button("Form", "/simple-form"))
            }
        },
    )
}
