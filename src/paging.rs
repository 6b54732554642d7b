//! Pagination model rendered by the paging converters
//!
//! A minimal, owned take on "a page of query results": a [`Pageable`]
//! request, its [`Sort`], and the [`Slice`] or [`Page`] returned for it.
//! Content is held as already-captured [`LogValue`]s.

use crate::interpolation::value::{AsLogValue, LogValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.direction)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: orders.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_sorted(&self) -> bool {
        !self.orders.is_empty()
    }
}

/// `UNSORTED`, or the orders joined by a bare comma: `name: ASC,age: DESC`
impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.orders.is_empty() {
            return write!(f, "UNSORTED");
        }
        for (i, order) in self.orders.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", order)?;
        }
        Ok(())
    }
}

/// A page request: zero-based page index, page size and sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pageable {
    #[default]
    Unpaged,
    Paged { page: usize, size: usize, sort: Sort },
}

impl Pageable {
    pub fn of(page: usize, size: usize) -> Self {
        Pageable::Paged {
            page,
            size,
            sort: Sort::unsorted(),
        }
    }

    pub fn sorted(page: usize, size: usize, sort: Sort) -> Self {
        Pageable::Paged { page, size, sort }
    }

    pub fn is_paged(&self) -> bool {
        matches!(self, Pageable::Paged { .. })
    }

    pub fn offset(&self) -> u64 {
        match self {
            Pageable::Paged { page, size, .. } => (*page as u64).saturating_mul(*size as u64),
            Pageable::Unpaged => 0,
        }
    }
}

impl fmt::Display for Pageable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pageable::Unpaged => write!(f, "UNPAGED"),
            Pageable::Paged { page, size, sort } => {
                write!(f, "Page request [number: {}, size {}, sort: {}]", page, size, sort)
            }
        }
    }
}

/// A window of results without knowledge of the total count
#[derive(Debug, Clone)]
pub struct Slice {
    content: Vec<LogValue>,
    pageable: Pageable,
    has_next: bool,
}

impl Slice {
    pub fn new(content: Vec<LogValue>, pageable: Pageable, has_next: bool) -> Self {
        Self {
            content,
            pageable,
            has_next,
        }
    }

    pub fn from_items<T: AsLogValue>(items: &[T], pageable: Pageable, has_next: bool) -> Self {
        Self::new(items.iter().map(AsLogValue::as_log_value).collect(), pageable, has_next)
    }

    pub fn content(&self) -> &[LogValue] {
        &self.content
    }

    pub fn pageable(&self) -> &Pageable {
        &self.pageable
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = match self.pageable {
            Pageable::Paged { page, .. } => page + 1,
            Pageable::Unpaged => 1,
        };
        write!(f, "Slice {} containing {} elements", number, self.content.len())
    }
}

/// A window of results with the total element count
#[derive(Debug, Clone)]
pub struct Page {
    content: Vec<LogValue>,
    pageable: Pageable,
    total_elements: u64,
}

impl Page {
    /// The total is raised to cover the content when it would otherwise
    /// fall short of `offset + content.len()`.
    pub fn new(content: Vec<LogValue>, pageable: Pageable, total_elements: u64) -> Self {
        let total_elements = match &pageable {
            Pageable::Paged { size, .. }
                if !content.is_empty()
                    && pageable.offset().saturating_add(*size as u64) > total_elements =>
            {
                pageable.offset().saturating_add(content.len() as u64)
            }
            _ => total_elements,
        };
        Self {
            content,
            pageable,
            total_elements,
        }
    }

    pub fn from_items<T: AsLogValue>(items: &[T], pageable: Pageable, total_elements: u64) -> Self {
        Self::new(
            items.iter().map(AsLogValue::as_log_value).collect(),
            pageable,
            total_elements,
        )
    }

    pub fn content(&self) -> &[LogValue] {
        &self.content
    }

    pub fn pageable(&self) -> &Pageable {
        &self.pageable
    }

    /// Zero-based page index
    pub fn number(&self) -> usize {
        match self.pageable {
            Pageable::Paged { page, .. } => page,
            Pageable::Unpaged => 0,
        }
    }

    /// Requested page size, or the content length when unpaged
    pub fn size(&self) -> usize {
        match self.pageable {
            Pageable::Paged { size, .. } => size,
            Pageable::Unpaged => self.content.len(),
        }
    }

    pub fn sort(&self) -> Sort {
        match &self.pageable {
            Pageable::Paged { sort, .. } => sort.clone(),
            Pageable::Unpaged => Sort::unsorted(),
        }
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        match self.size() {
            0 => 1,
            size => self.total_elements.div_ceil(size as u64),
        }
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {} of {} containing {} elements",
            self.number() + 1,
            self.total_pages(),
            self.content.len()
        )
    }
}

impl AsLogValue for Pageable {
    fn as_log_value(&self) -> LogValue {
        LogValue::Pageable(self.clone())
    }
}

impl AsLogValue for Slice {
    fn as_log_value(&self) -> LogValue {
        LogValue::Slice(Arc::new(self.clone()))
    }
}

impl AsLogValue for Page {
    fn as_log_value(&self) -> LogValue {
        LogValue::Page(Arc::new(self.clone()))
    }
}
