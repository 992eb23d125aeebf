//! Paged result display with interactive navigation.

mod controller;
mod state;

pub use controller::{PageContent, PageController, PageSource, PaginationError};
pub use state::{page_count, Direction, NavInput, PageState, SessionStatus};

#[cfg(test)]
pub use controller::MockPageSource;
