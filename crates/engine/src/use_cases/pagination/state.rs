//! Page navigation state and its pure transition function.

use std::cmp::Ordering;

/// Number of pages needed for `total_items`; never less than one.
pub fn page_count(total_items: u64, page_size: u64) -> usize {
    let page_size = page_size.max(1);
    let pages = total_items.div_ceil(page_size).max(1);
    usize::try_from(pages).unwrap_or(usize::MAX)
}

/// Navigation input from the invoking user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    First,
    Previous,
    Next,
    Last,
    /// Zero-based page to jump to
    Jump(usize),
    Stop,
    /// No input arrived before the idle timeout
    Timeout,
}

impl NavInput {
    /// Parse a chat message; `None` for anything that isn't navigation.
    ///
    /// Page numbers are typed 1-based (`page 3` or just `3`).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().to_lowercase();
        match text.as_str() {
            "first" | "<<" => Some(Self::First),
            "prev" | "previous" | "<" => Some(Self::Previous),
            "next" | ">" => Some(Self::Next),
            "last" | ">>" => Some(Self::Last),
            "stop" => Some(Self::Stop),
            other => {
                let number = other.strip_prefix("page").unwrap_or(other).trim();
                number
                    .parse::<usize>()
                    .ok()
                    .map(|page| Self::Jump(page.saturating_sub(1)))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn between(from: usize, to: usize) -> Option<Self> {
        match to.cmp(&from) {
            Ordering::Less => Some(Self::Backward),
            Ordering::Greater => Some(Self::Forward),
            Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Terminated,
}

/// Where a paged session currently stands.
///
/// `index` always lies in `0..total_pages`, and `total_pages` is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    index: usize,
    total_pages: usize,
    /// Direction in which the last render came back empty
    blocked: Option<Direction>,
    status: SessionStatus,
}

impl PageState {
    /// Start on `requested`, clamped into range.
    pub fn new(total_pages: usize, requested: i64) -> Self {
        let total_pages = total_pages.max(1);
        let last = total_pages - 1;
        let index = if requested < 0 {
            0
        } else {
            usize::try_from(requested).unwrap_or(usize::MAX).min(last)
        };
        Self {
            index,
            total_pages,
            blocked: None,
            status: SessionStatus::Active,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_terminated(&self) -> bool {
        self.status == SessionStatus::Terminated
    }

    pub fn blocked(&self) -> Option<Direction> {
        self.blocked
    }

    fn last(&self) -> usize {
        self.total_pages - 1
    }

    /// Apply one input. Out-of-range moves clamp, and moving further in a
    /// blocked direction leaves the state unchanged.
    pub fn apply(self, input: NavInput) -> Self {
        if self.is_terminated() {
            return self;
        }
        let target = match input {
            NavInput::Stop | NavInput::Timeout => {
                return Self {
                    status: SessionStatus::Terminated,
                    ..self
                };
            }
            NavInput::First => 0,
            NavInput::Previous => self.index.saturating_sub(1),
            NavInput::Next => self.index.saturating_add(1).min(self.last()),
            NavInput::Last => self.last(),
            NavInput::Jump(page) => page.min(self.last()),
        };
        match Direction::between(self.index, target) {
            None => self,
            Some(direction) if self.blocked == Some(direction) => self,
            Some(_) => Self {
                index: target,
                ..self
            },
        }
    }

    /// Direction of the move from `previous` to this state, if any.
    pub fn moved_from(&self, previous: &PageState) -> Option<Direction> {
        Direction::between(previous.index, self.index)
    }

    /// Record that the current page rendered with content.
    pub fn mark_rendered(self) -> Self {
        Self {
            blocked: None,
            ..self
        }
    }

    /// Record that the current page came back empty after moving `direction`.
    pub fn mark_empty(self, direction: Direction) -> Self {
        Self {
            blocked: Some(direction),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_at_least_one() {
        assert_eq!(page_count(0, 20), 1);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(5, 0), 5);
    }

    #[test]
    fn initial_index_clamps_to_nearest_boundary() {
        for requested in [-100, -1] {
            assert_eq!(PageState::new(5, requested).index(), 0);
        }
        for requested in [5, 6, 1_000, i64::MAX] {
            assert_eq!(PageState::new(5, requested).index(), 4);
        }
        for requested in 0..5 {
            assert_eq!(PageState::new(5, requested).index(), requested as usize);
        }
    }

    #[test]
    fn zero_pages_becomes_one() {
        let state = PageState::new(0, 3);
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn moving_past_bounds_is_a_no_op() {
        let first = PageState::new(3, 0);
        assert_eq!(first.apply(NavInput::Previous), first);

        let last = PageState::new(3, 2);
        assert_eq!(last.apply(NavInput::Next), last);
    }

    #[test]
    fn navigation_moves_index() {
        let state = PageState::new(10, 4);
        assert_eq!(state.apply(NavInput::Next).index(), 5);
        assert_eq!(state.apply(NavInput::Previous).index(), 3);
        assert_eq!(state.apply(NavInput::First).index(), 0);
        assert_eq!(state.apply(NavInput::Last).index(), 9);
        assert_eq!(state.apply(NavInput::Jump(7)).index(), 7);
        assert_eq!(state.apply(NavInput::Jump(70)).index(), 9);
    }

    #[test]
    fn blocked_direction_suppresses_further_moves() {
        let state = PageState::new(10, 4).mark_empty(Direction::Forward);
        assert_eq!(state.apply(NavInput::Next), state);
        assert_eq!(state.apply(NavInput::Last), state);
        assert_eq!(state.apply(NavInput::Jump(8)), state);

        let back = state.apply(NavInput::Previous);
        assert_eq!(back.index(), 3);
        assert_eq!(back.mark_rendered().blocked(), None);
    }

    #[test]
    fn terminated_is_absorbing() {
        let state = PageState::new(4, 1).apply(NavInput::Timeout);
        assert!(state.is_terminated());
        assert_eq!(state.apply(NavInput::Next), state);
        assert_eq!(state.apply(NavInput::First).index(), 1);
    }

    #[test]
    fn stop_terminates_without_moving() {
        let state = PageState::new(4, 2).apply(NavInput::Stop);
        assert_eq!(state.status(), SessionStatus::Terminated);
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn parses_navigation_text() {
        assert_eq!(NavInput::parse("next"), Some(NavInput::Next));
        assert_eq!(NavInput::parse(" PREV "), Some(NavInput::Previous));
        assert_eq!(NavInput::parse(">>"), Some(NavInput::Last));
        assert_eq!(NavInput::parse("page 3"), Some(NavInput::Jump(2)));
        assert_eq!(NavInput::parse("1"), Some(NavInput::Jump(0)));
        assert_eq!(NavInput::parse("0"), Some(NavInput::Jump(0)));
        assert_eq!(NavInput::parse("stop"), Some(NavInput::Stop));
        assert_eq!(NavInput::parse("hello"), None);
        assert_eq!(NavInput::parse("page"), None);
    }

    #[test]
    fn moved_from_reports_direction() {
        let a = PageState::new(5, 2);
        assert_eq!(a.apply(NavInput::Next).moved_from(&a), Some(Direction::Forward));
        assert_eq!(a.apply(NavInput::First).moved_from(&a), Some(Direction::Backward));
        assert_eq!(a.moved_from(&a), None);
    }
}
