// Paginated envelope and page requests
//
// Page<T> reproduces the envelope the backend returns for every list
// endpoint. Page numbers are zero-based.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default sort applied to list requests
pub const DEFAULT_SORT_PROPERTY: &str = "createdAt";

// ============================================================================
// Envelope
// ============================================================================

/// Sort flags carried twice in the envelope (top level and inside `pageable`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortInfo {
    pub empty: bool,
    pub sorted: bool,
    pub unsorted: bool,
}

impl SortInfo {
    pub fn sorted() -> Self {
        Self {
            empty: false,
            sorted: true,
            unsorted: false,
        }
    }

    pub fn unsorted() -> Self {
        Self {
            empty: true,
            sorted: false,
            unsorted: true,
        }
    }
}

/// Request echo inside the envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page_number: u32,
    pub page_size: u32,
    pub sort: SortInfo,
    pub offset: u64,
    pub paged: bool,
    pub unpaged: bool,
}

/// Paginated response envelope shared by every resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub pageable: Pageable,
    pub last: bool,
    pub total_pages: u32,
    pub total_elements: u64,
    pub first: bool,
    pub size: u32,
    pub number: u32,
    pub sort: SortInfo,
    pub number_of_elements: u32,
    pub empty: bool,
}

impl<T> Page<T> {
    /// Build an envelope for one page of content out of `total_elements`.
    ///
    /// `content` must already be the slice for `request`; use
    /// [`Page::paginate`] to slice a full collection.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size();
        let number = request.page();
        let total_pages =
            u32::try_from(total_elements.div_ceil(u64::from(size))).unwrap_or(u32::MAX);
        let sort = if request.sort().is_some() {
            SortInfo::sorted()
        } else {
            SortInfo::unsorted()
        };
        let number_of_elements = content.len() as u32;

        Self {
            pageable: Pageable {
                page_number: number,
                page_size: size,
                sort,
                offset: request.offset(),
                paged: true,
                unpaged: false,
            },
            last: u64::from(number) + 1 >= u64::from(total_pages),
            total_pages,
            total_elements,
            first: number == 0,
            size,
            number,
            sort,
            number_of_elements,
            empty: content.is_empty(),
            content,
        }
    }

    /// Slice `all` according to `request` and wrap the result
    pub fn paginate(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size() as usize)
            .collect();
        Self::new(content, request, total)
    }

    /// Convert the content while keeping the metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            pageable: self.pageable,
            last: self.last,
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            first: self.first,
            size: self.size,
            number: self.number,
            sort: self.sort,
            number_of_elements: self.number_of_elements,
            empty: self.empty,
        }
    }

    /// Content length matches `numberOfElements` and fits in `size`
    pub fn is_consistent(&self) -> bool {
        self.content.len() == self.number_of_elements as usize
            && self.content.len() <= self.size as usize
            && self.empty == self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        !self.last
    }

    pub fn has_previous(&self) -> bool {
        !self.first
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

/// Errors produced when parsing a sort expression
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortParseError {
    #[error("sort property is empty")]
    EmptyProperty,

    #[error("unknown sort direction: {0}")]
    UnknownDirection(String),
}

/// Sort clause, serialized as `property,direction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
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

impl Default for Sort {
    fn default() -> Self {
        Self::desc(DEFAULT_SORT_PROPERTY)
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.property, self.direction)
    }
}

impl FromStr for Sort {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (property, direction) = match s.split_once(',') {
            Some((p, d)) => (p.trim(), d.trim()),
            None => (s.trim(), "asc"),
        };
        if property.is_empty() {
            return Err(SortParseError::EmptyProperty);
        }
        let direction = match direction.to_lowercase().as_str() {
            "asc" => Direction::Asc,
            "desc" => Direction::Desc,
            other => return Err(SortParseError::UnknownDirection(other.to_string())),
        };
        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }
}

/// Page/size/sort triple sent as query parameters on list calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Option<Sort>,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 10;

    /// Create a request sorted by `createdAt,desc`. A size of zero is raised to one.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Some(Sort::default()),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn unsorted(mut self) -> Self {
        self.sort = None;
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Query parameters in the order the backend documents them
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.to_string()));
        }
        pairs
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}
