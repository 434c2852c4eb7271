// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Book creation and page progress.

use crate::models::{Book, BookStatus, NewBook};

/// Next free book ID for a shelf.
pub fn next_book_id(books: &[Book]) -> u64 {
    books.iter().map(|b| b.id).max().unwrap_or(0) + 1
}

/// Create a book at page zero with status `reading`.
///
/// Input is expected to be validated (`total_pages > 0`).
pub fn add_book(id: u64, input: NewBook) -> Book {
    tracing::info!(
        id,
        title = %input.title,
        total_pages = input.total_pages,
        deadline = %input.deadline,
        "Adding book"
    );

    Book {
        id,
        title: input.title,
        author: input.author,
        total_pages: input.total_pages,
        current_page: 0,
        deadline: input.deadline,
        status: BookStatus::Reading,
        finished_at: None,
    }
}

/// Move a book to `current_page`, clamped to `[0, total_pages]`.
///
/// Reaching the last page marks the book completed. Otherwise a paused book
/// stays paused and a completed book goes back to reading.
pub fn progress_book(book: &Book, current_page: i64) -> Book {
    let total = i64::from(book.total_pages);
    let clamped = u32::try_from(current_page.clamp(0, total)).unwrap_or(book.total_pages);

    let status = if clamped == book.total_pages {
        BookStatus::Completed
    } else if book.status == BookStatus::Completed {
        BookStatus::Reading
    } else {
        book.status
    };

    if i64::from(clamped) != current_page {
        tracing::debug!(
            id = book.id,
            requested = current_page,
            clamped,
            "Clamped book progress"
        );
    }

    Book {
        current_page: clamped,
        status,
        ..book.clone()
    }
}

/// Pause a book that is being read. Completed books are returned unchanged.
pub fn pause_book(book: &Book) -> Book {
    match book.status {
        BookStatus::Reading => Book {
            status: BookStatus::Paused,
            ..book.clone()
        },
        _ => book.clone(),
    }
}

/// Resume a paused book.
pub fn resume_book(book: &Book) -> Book {
    match book.status {
        BookStatus::Paused => Book {
            status: BookStatus::Reading,
            ..book.clone()
        },
        _ => book.clone(),
    }
}
