//! Plain-text output.

use libris_core::date::form_value;
use libris_core::{Author, Book};
use libris_forms::FieldErrorSet;

pub fn authors(authors: &[Author]) {
    if authors.is_empty() {
        println!("No authors found.");
        return;
    }
    for author in authors {
        println!("{}  {}", author.id, author.full_name);
    }
}

pub fn books(books: &[Book]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }
    for book in books {
        let author = book.author_name.as_deref().unwrap_or("-");
        println!("{}  {}  ({author})", book.id, book.title);
    }
}

pub fn author(author: &Author) {
    println!("{}", author.full_name);
    field("Nationality", author.nationality.as_deref());
    field(
        "Born",
        author.date_of_birth.as_deref().map(form_value).as_deref(),
    );
    field("Biography", author.biography.as_deref());
    if !author.books.is_empty() {
        println!("Books:");
        for book in &author.books {
            println!("  {}  {}", book.id, book.title);
        }
    }
}

pub fn book(book: &Book) {
    println!("{}", book.title);
    field("Author", book.author_name.as_deref());
    field("Genre", Some(book.genre.label()));
    field("Published", Some(form_value(&book.published_date).as_str()));
    field("ISBN", Some(book.isbn.as_str()));
    field("Pages", Some(book.page_count.to_string().as_str()));
    field("Publisher", Some(book.publisher.as_str()));
    field("Available", Some(if book.is_available { "yes" } else { "no" }));
    field("Description", book.description.as_deref());
}

pub fn field_errors(errors: &FieldErrorSet) {
    for (field, message) in errors.iter() {
        eprintln!("  {field}: {message}");
    }
}

fn field(label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        println!("  {label}: {value}");
    }
}
