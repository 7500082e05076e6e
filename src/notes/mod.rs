/*!
 * Notes module for persistent vocabulary notes.
 *
 * This module provides SQLite-based persistence for the list of notes a
 * reader keeps per article.
 */

pub mod connection;
pub mod repository;
pub mod schema;

pub use connection::DatabaseConnection;
pub use repository::NotesRepository;
