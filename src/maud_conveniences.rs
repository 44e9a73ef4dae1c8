use maud::{DOCTYPE, Escaper, Markup, PreEscaped, Render, html};
use std::fmt::Write;

pub fn render_page(markup: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8" {}
                meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                title { "Course Admin" }
            }
            body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                nav class="w-full max-w-4xl flex flex-row space-x-4 p-4" {
                    a href="/courses" class="hover:text-blue-300 underline" {"All Courses"}
                    a href="/courses/new" class="hover:text-blue-300 underline" {"New Course"}
                }
                (markup)
            }
        }
    }
}

pub fn render_table<const N: usize>(
    overall_title: &'static str,
    titles: [&'static str; N],
    items: Vec<[Markup; N]>,
) -> Markup {
    html! {
        div class="container mx-auto" {
            (title(overall_title))
            div class="overflow-x-auto" {
                table class="min-w-full bg-gray-800 rounded shadow-md" {
                    thead class="bg-gray-700" {
                        tr {
                            @for title in titles {
                                th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                            }
                        }
                    }
                    tbody {
                        @if items.is_empty() {
                            tr {
                                td colspan=(N) class="py-2 px-4 italic text-gray-400" {"Nothing here yet."}
                            }
                        }
                        @for row in items {
                            tr {
                                @for col in row {
                                    td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn escape(s: impl AsRef<str>) -> PreEscaped<String> {
    let mut output = String::new();
    Escaper::new(&mut output).write_str(s.as_ref()).unwrap(); //this method always succeeds - strange api!
    PreEscaped(output)
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn errors_list<'a>(errors: impl IntoIterator<Item = &'a str>) -> Markup {
    html! {
        div role="alert" class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" {
            strong class="font-bold" {"Please fix the following:"}
            ul class="list-disc list-inside" {
                @for error in errors {
                    li {(error)}
                }
            }
        }
    }
}

pub fn field_error(error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = error {
            p class="text-red-400 text-sm mt-1" {(error)}
        }
    }
}

pub fn form_element(id: &'static str, label: &'static str, element: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (element)
        }
    }
}

pub fn simple_form_element(
    id: &'static str,
    label: &'static str,
    required: bool,
    input_type: Option<&'static str>,
    value: Option<&str>,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input id=(id) name=(id) type=(input_type.unwrap_or("text")) required[required] value=[value] class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
        },
    )
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-green-500 hover:bg-green-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}
