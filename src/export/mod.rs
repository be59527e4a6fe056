//! Exporting rendered content out of the application

mod clipboard;

pub use clipboard::copy_html_to_clipboard;
