use maud::{html, Markup, DOCTYPE};

use super::{
    api::TodoApi,
    view::{Filter, TodoView},
};
use crate::models::Todo;

const APP_ID: &str = "app";

pub fn page<A: TodoApi>(view: &TodoView<A>) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "todos" }
                script src="https://unpkg.com/htmx.org@1.9.10" {}
                script src="https://cdn.tailwindcss.com" {}
            }
            body class="bg-gray-100 font-sans leading-normal tracking-normal" {
                div class="container mx-auto p-8 max-w-xl" {
                    h1 class="text-4xl text-center text-gray-700 mb-6" { "todos" }
                    (app(view))
                }
            }
        }
    }
}

/// The swappable part of the page; every htmx request re-renders it whole.
pub fn app<A: TodoApi>(view: &TodoView<A>) -> Markup {
    html! {
        div id=(APP_ID) hx-target={ "#" (APP_ID) } hx-swap="outerHTML" {
            (new_todo_html(view.all_completed(), view.input()))
            div class="flex flex-col gap-2 my-3" {
                @for todo in view.visible() {
                    @if view.editing() == Some(todo.id) {
                        (edit_todo_html(todo))
                    } @else {
                        (todo_html(todo))
                    }
                }
            }
            @if view.item_count() > 0 {
                (footer_html(view.item_count(), view.filter()))
            }
        }
    }
}

// === Components ===
// toggle-all button plus the new todo input
fn new_todo_html(all_completed: bool, input: &str) -> Markup {
    html! {
        div class="relative flex" {
            button class={ "px-3 " @if all_completed { "text-red-600" } @else { "text-black" } }
                hx-post="/toggle-all" { "v" }
            form class="flex-grow" hx-post="/add" {
                input class="w-full rounded p-2" type="text" name="name"
                    placeholder="What needs to be done?" value=(input) autofocus;
            }
        }
    }
}

// a single line item in the todo list
fn todo_html(todo: &Todo) -> Markup {
    html! {
        div class="flex justify-between items-center bg-white rounded-lg shadow my-1 py-2 px-4"
            hx-post=(format!("/edit/{}", todo.id)) hx-trigger="dblclick" {
            label class="flex-grow" {
                input type="checkbox" class="mr-2" checked[todo.is_completed]
                    hx-post=(format!("/toggle/{}", todo.id)) hx-trigger="change";
                span class={ @if todo.is_completed { "line-through" } @else { "" } } { (todo.name) }
            }
            button class="text-red-500 hover:text-red-700 font-bold px-2"
                hx-post=(format!("/remove/{}", todo.id)) { "X" }
        }
    }
}

// inline editor, committed with Enter and dropped with Escape
fn edit_todo_html(todo: &Todo) -> Markup {
    html! {
        form class="my-1" hx-post=(format!("/commit/{}", todo.id)) {
            input class="w-full rounded p-2" type="text" name="name" value=(todo.name) autofocus
                hx-post="/cancel-edit" hx-trigger="keyup[key=='Escape']";
        }
    }
}

fn footer_html(count: usize, current: Filter) -> Markup {
    let noun = if count > 1 { "items" } else { "item" };
    html! {
        div class="flex justify-between items-center py-2" {
            span { (count) " " (noun) " left!" }
            div class="flex gap-2" {
                @for filter in Filter::ALL {
                    button class={ @if filter == current { "font-bold" } @else { "font-normal" } }
                        hx-post=(format!("/filter/{}", filter)) { (filter.label()) }
                }
            }
            button hx-post="/clear-completed" { "Clear completed" }
        }
    }
}
