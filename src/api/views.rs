//! HTML rendering for the list pages.
//!
//! Markup is intentionally plain. Every piece of user input goes through
//! [`escape`] before it is written into a page.

use std::fmt::Write;

use crate::session::Flash;
use crate::todo::{sort_items_for_display, TodoList};

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flash: &Flash, body: &str) -> String {
    let mut page = String::new();
    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n",
        escape(title)
    );
    if let Some(error) = &flash.error {
        let _ = writeln!(page, "<div class=\"flash error\"><p>{}</p></div>", escape(error));
    }
    if let Some(success) = &flash.success {
        let _ = writeln!(
            page,
            "<div class=\"flash success\"><p>{}</p></div>",
            escape(success)
        );
    }
    page.push_str(body);
    page.push_str("</body>\n</html>\n");
    page
}

fn delete_form(action: &str, label: &str) -> String {
    format!(
        "<form action=\"{action}\" method=\"post\" class=\"delete\">\
         <button type=\"submit\">{label}</button></form>"
    )
}

/// Index of all lists, already in display order.
pub fn lists_page(flash: &Flash, lists: &[&TodoList]) -> String {
    let mut body = String::from("<h2>My Lists</h2>\n<ul id=\"lists\">\n");
    for list in lists {
        let _ = writeln!(
            body,
            "<li class=\"{state}\"><a href=\"/lists/{id}\"><h3>{name}</h3>\
             <p>{progress}</p></a></li>",
            state = list.completion_state(),
            id = list.id(),
            name = escape(list.name()),
            progress = list.progress(),
        );
    }
    body.push_str("</ul>\n<a href=\"/lists/new\">New List</a>\n");
    layout("Todo Lists", flash, &body)
}

/// Form for creating a list, pre-filled with `name`.
pub fn new_list_page(flash: &Flash, name: &str) -> String {
    let body = format!(
        "<h2>Enter the name for your new list:</h2>\n\
         <form action=\"/lists\" method=\"post\">\n\
         <input name=\"list_name\" placeholder=\"List Name\" type=\"text\" value=\"{}\">\n\
         <button type=\"submit\">Save</button>\n\
         <a href=\"/lists\">Cancel</a>\n</form>\n",
        escape(name)
    );
    layout("New List", flash, &body)
}

/// A single list with its items, open ones first.
pub fn list_page(flash: &Flash, list: &TodoList, draft: &str) -> String {
    let id = list.id();
    let mut body = format!(
        "<section id=\"todos\" class=\"{state}\">\n<header>\n<h2>{name}</h2>\n\
         <p class=\"progress\">{progress}</p>\n\
         <form action=\"/lists/{id}/finish\" method=\"post\">\
         <button type=\"submit\">Complete All</button></form>\n\
         <a href=\"/lists/{id}/edit\">Edit List</a>\n</header>\n<ul>\n",
        state = list.completion_state(),
        name = escape(list.name()),
        progress = list.progress(),
    );

    for item in sort_items_for_display(list) {
        let class = if item.completed { "complete" } else { "" };
        let _ = writeln!(
            body,
            "<li class=\"{class}\">\
             <form action=\"/lists/{id}/todos/{item_id}\" method=\"post\" class=\"check\">\
             <button type=\"submit\">Toggle</button></form>\
             <h3>{name}</h3>{delete}</li>",
            item_id = item.id,
            name = escape(&item.name),
            delete = delete_form(&format!("/lists/{id}/remove/{}", item.id), "Delete"),
        );
    }

    let _ = write!(
        body,
        "</ul>\n</section>\n\
         <form action=\"/lists/{id}/todos\" method=\"post\">\n\
         <label for=\"todo\">Enter a new todo item:</label>\n\
         <input name=\"todo\" id=\"todo\" placeholder=\"Something to do\" type=\"text\" value=\"{}\">\n\
         <button type=\"submit\">Add</button>\n</form>\n\
         <a href=\"/lists\">All Lists</a>\n",
        escape(draft)
    );
    layout(list.name(), flash, &body)
}

/// Rename form for a list, pre-filled with `name`.
pub fn edit_list_page(flash: &Flash, list: &TodoList, name: &str) -> String {
    let id = list.id();
    let body = format!(
        "<h2>Editing '{current}'</h2>\n\
         <form action=\"/lists/{id}/edit\" method=\"post\">\n\
         <input name=\"list_name\" type=\"text\" value=\"{name}\">\n\
         <button type=\"submit\">Save</button>\n\
         <a href=\"/lists/{id}\">Cancel</a>\n</form>\n{delete}\n",
        current = escape(list.name()),
        name = escape(name),
        delete = delete_form(&format!("/lists/{id}/delete"), "Delete List"),
    );
    layout("Edit List", flash, &body)
}
