//! Sort Directives

use std::{cmp::Ordering, fmt};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,

    /// Largest first
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

/// Active sort field, direction and position in the header-click cycle.
///
/// Clicking the same header walks ascending, descending, unsorted and back to
/// ascending. Clicking a different header always starts ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortDirective {
    field: Option<String>,
    direction: SortDirection,
    cycle: u8,
}

impl SortDirective {
    /// No active field; rows keep fetch order.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Directive after a single click on `field`.
    pub fn ascending(field: &str) -> Self {
        Self::unsorted().clicked(field)
    }

    /// Directive after two clicks on `field`.
    pub fn descending(field: &str) -> Self {
        Self::unsorted().clicked(field).clicked(field)
    }

    /// Advance the directive for a click on the `field` header.
    pub fn click(&mut self, field: &str) {
        match self.field.as_deref() {
            Some(active) if active == field && self.cycle == 2 => {
                self.field = None;
                self.cycle = 0;
            }
            Some(active) if active == field => {
                self.direction = self.direction.flipped();
                self.cycle = 2;
            }
            _ => {
                self.field = Some(field.to_string());
                self.direction = SortDirection::Ascending;
                self.cycle = 1;
            }
        }
    }

    /// By-value form of [`SortDirective::click`].
    #[must_use]
    pub fn clicked(mut self, field: &str) -> Self {
        self.click(field);
        self
    }

    /// Active field, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Current direction. Meaningless while no field is active.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Click-cycle position: `0` unsorted, `1` first click, `2` second click.
    pub fn cycle(&self) -> u8 {
        self.cycle
    }

    /// Whether a field is active.
    pub fn is_active(&self) -> bool {
        self.field.is_some()
    }
}
