//! Offset pagination primitives shared by backend query handlers.
//!
//! A [`PageRequest`] is always clamped or validated before a handler touches
//! storage, so page numbers start at one and page sizes never exceed the
//! configured [`PageLimits`]. [`Paged`] is the page-of-items payload that query
//! handlers place inside their result envelope; it never holds more items than
//! its page size.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building [`PageLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageLimitsError {
    /// Either bound was zero.
    #[error("page limits must be at least 1")]
    Zero,
    /// The default page size was larger than the maximum.
    #[error("default page size {default_size} exceeds maximum {max_size}")]
    DefaultExceedsMax {
        /// Requested default page size.
        default_size: u32,
        /// Requested maximum page size.
        max_size: u32,
    },
}

/// Errors raised by the strict [`PageRequest::try_new`] constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers are one-based.
    #[error("page number must be at least 1")]
    ZeroPageNumber,
    /// Empty pages cannot be requested.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The page size exceeded the configured maximum.
    #[error("page size {requested} exceeds maximum {max}")]
    PageSizeTooLarge {
        /// Page size supplied by the caller.
        requested: u32,
        /// Largest permitted page size.
        max: u32,
    },
}

/// Bounds applied to requested page sizes.
///
/// # Examples
/// ```
/// use pagination::PageLimits;
///
/// let limits = PageLimits::try_new(20, 50).expect("valid limits");
/// assert_eq!(limits.default_size(), 20);
/// assert_eq!(limits.max_size(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLimits {
    default_size: u32,
    max_size: u32,
}

impl PageLimits {
    /// Ten items per page unless asked otherwise, never more than one hundred.
    pub const DEFAULT: Self = Self {
        default_size: 10,
        max_size: 100,
    };

    /// Build limits, rejecting zero bounds and defaults above the maximum.
    ///
    /// # Errors
    /// Returns [`PageLimitsError`] when either bound is zero or the default
    /// exceeds the maximum.
    pub const fn try_new(default_size: u32, max_size: u32) -> Result<Self, PageLimitsError> {
        if default_size == 0 || max_size == 0 {
            return Err(PageLimitsError::Zero);
        }
        if default_size > max_size {
            return Err(PageLimitsError::DefaultExceedsMax {
                default_size,
                max_size,
            });
        }
        Ok(Self {
            default_size,
            max_size,
        })
    }

    /// Page size used when the caller does not supply one.
    #[must_use]
    pub const fn default_size(&self) -> u32 {
        self.default_size
    }

    /// Largest page size a caller may receive.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Same maximum with a feature-specific default, clamped into
    /// `1..=max_size`.
    #[must_use]
    pub fn with_default_size(self, default_size: u32) -> Self {
        Self {
            default_size: default_size.clamp(1, self.max_size),
            max_size: self.max_size,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A validated one-based page request.
///
/// ## Invariants
/// - `page_number >= 1`.
/// - `1 <= page_size <= limits.max_size()` for the limits it was built with.
///
/// # Examples
/// ```
/// use pagination::{PageLimits, PageRequest};
///
/// let request = PageRequest::clamped(Some(0), Some(500), PageLimits::DEFAULT);
/// assert_eq!(request.page_number(), 1);
/// assert_eq!(request.page_size(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Clamp caller-supplied values into a usable request.
    ///
    /// Missing values fall back to page one and the default size; zero values
    /// are raised to one and oversized pages are capped at the maximum.
    #[must_use]
    pub fn clamped(page_number: Option<u32>, page_size: Option<u32>, limits: PageLimits) -> Self {
        Self {
            page_number: page_number.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(limits.default_size)
                .clamp(1, limits.max_size),
        }
    }

    /// Strict constructor rejecting values that [`Self::clamped`] would adjust.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] for zero values or oversized pages.
    pub const fn try_new(
        page_number: u32,
        page_size: u32,
        limits: PageLimits,
    ) -> Result<Self, PageRequestError> {
        if page_number == 0 {
            return Err(PageRequestError::ZeroPageNumber);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        if page_size > limits.max_size {
            return Err(PageRequestError::PageSizeTooLarge {
                requested: page_size,
                max: limits.max_size,
            });
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// First page at the default size for `limits`.
    #[must_use]
    pub const fn first(limits: PageLimits) -> Self {
        Self {
            page_number: 1,
            page_size: limits.default_size,
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items skipped before this page starts.
    #[must_use]
    pub fn offset(&self) -> usize {
        let skipped =
            u64::from(self.page_number.saturating_sub(1)).saturating_mul(u64::from(self.page_size));
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    /// Page size as a collection length.
    #[must_use]
    pub fn limit(&self) -> usize {
        usize::try_from(self.page_size).unwrap_or(usize::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(PageLimits::DEFAULT)
    }
}

/// Raw paging parameters as supplied by a caller.
///
/// Query intents carry this unresolved form; handlers resolve it against
/// their configured [`PageLimits`] before reading.
///
/// # Examples
/// ```
/// use pagination::{PageLimits, PageQuery};
///
/// let query: PageQuery = serde_json::from_str(r#"{"pageSize": 5}"#).expect("valid query");
/// let request = query.resolve(PageLimits::DEFAULT);
/// assert_eq!((request.page_number(), request.page_size()), (1, 5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Requested one-based page number.
    pub page_number: Option<u32>,
    /// Requested page size.
    pub page_size: Option<u32>,
}

impl PageQuery {
    /// Request an explicit page.
    #[must_use]
    pub const fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }

    /// Clamp into a [`PageRequest`]; see [`PageRequest::clamped`].
    #[must_use]
    pub fn resolve(self, limits: PageLimits) -> PageRequest {
        PageRequest::clamped(self.page_number, self.page_size, limits)
    }
}

/// One page of items plus the totals needed to render pagination controls.
///
/// ## Invariants
/// - `items.len() <= page_size`.
/// - `page_number >= 1` and `page_size >= 1`, inherited from [`PageRequest`].
/// - `total_count >= items.len()`.
///
/// # Examples
/// ```
/// use pagination::{PageLimits, PageRequest, Paged};
///
/// let request = PageRequest::clamped(Some(2), Some(10), PageLimits::DEFAULT);
/// let page = Paged::from_window(request, 1..=25);
/// assert_eq!(page.items(), (11..=20).collect::<Vec<_>>().as_slice());
/// assert_eq!(page.total_count(), 25);
/// assert!(page.has_next_page());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    items: Vec<T>,
    total_count: u64,
    page_number: u32,
    page_size: u32,
}

impl<T> Paged<T> {
    /// Wrap an already windowed set of items.
    ///
    /// Surplus items beyond the page size are dropped, and a `total_count`
    /// smaller than the number of retained items is raised to match.
    #[must_use]
    pub fn new(request: PageRequest, mut items: Vec<T>, total_count: u64) -> Self {
        items.truncate(request.limit());
        let retained = u64::try_from(items.len()).unwrap_or(u64::MAX);
        Self {
            items,
            total_count: total_count.max(retained),
            page_number: request.page_number,
            page_size: request.page_size,
        }
    }

    /// Count a full ordered sequence and keep only the requested window.
    #[must_use]
    pub fn from_window<I>(request: PageRequest, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let offset = request.offset();
        let limit = request.limit();
        let mut total_count: u64 = 0;
        let mut window = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            total_count = total_count.saturating_add(1);
            if index >= offset && window.len() < limit {
                window.push(item);
            }
        }
        Self::new(request, window, total_count)
    }

    /// An empty page for `request`.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(request, Vec::new(), 0)
    }

    /// Items on this page, in order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of items across every page.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// One-based page number.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Page size that was applied.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of pages needed to show `total_count` items.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.page_size as u64)
    }

    /// Whether a later page holds more items.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        (self.page_number as u64) < self.total_pages()
    }

    /// Transform every item while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Paged<U>
    where
        F: FnMut(T) -> U,
    {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 10)]
    #[case(Some(0), Some(0), 1, 1)]
    #[case(Some(3), Some(25), 3, 25)]
    #[case(Some(2), Some(1_000), 2, 100)]
    fn clamped_requests_respect_limits(
        #[case] page_number: Option<u32>,
        #[case] page_size: Option<u32>,
        #[case] expected_number: u32,
        #[case] expected_size: u32,
    ) {
        let request = PageRequest::clamped(page_number, page_size, PageLimits::DEFAULT);
        assert_eq!(request.page_number(), expected_number);
        assert_eq!(request.page_size(), expected_size);
    }

    #[rstest]
    #[case(0, 10, PageRequestError::ZeroPageNumber)]
    #[case(1, 0, PageRequestError::ZeroPageSize)]
    #[case(1, 101, PageRequestError::PageSizeTooLarge { requested: 101, max: 100 })]
    fn strict_requests_reject_out_of_range_values(
        #[case] page_number: u32,
        #[case] page_size: u32,
        #[case] expected: PageRequestError,
    ) {
        let error = PageRequest::try_new(page_number, page_size, PageLimits::DEFAULT)
            .expect_err("out of range values must fail");
        assert_eq!(error, expected);
    }

    #[rstest]
    #[case(0, 10, PageLimitsError::Zero)]
    #[case(10, 0, PageLimitsError::Zero)]
    #[case(50, 20, PageLimitsError::DefaultExceedsMax { default_size: 50, max_size: 20 })]
    fn invalid_limits_are_rejected(
        #[case] default_size: u32,
        #[case] max_size: u32,
        #[case] expected: PageLimitsError,
    ) {
        assert_eq!(PageLimits::try_new(default_size, max_size), Err(expected));
    }

    #[rstest]
    fn feature_default_is_clamped_to_maximum() {
        let limits = PageLimits::try_new(10, 30)
            .expect("valid limits")
            .with_default_size(50);
        assert_eq!(limits.default_size(), 30);
    }

    #[rstest]
    fn page_queries_deserialise_and_resolve() {
        let query: PageQuery =
            serde_json::from_str(r#"{"pageNumber": 0, "pageSize": 250}"#).expect("query parses");
        let request = query.resolve(PageLimits::DEFAULT);
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), 100);
        assert_eq!(PageQuery::default().resolve(PageLimits::DEFAULT), PageRequest::default());
    }

    #[rstest]
    fn offset_skips_previous_pages() {
        let request = PageRequest::clamped(Some(3), Some(20), PageLimits::DEFAULT);
        assert_eq!(request.offset(), 40);
    }

    #[rstest]
    fn offset_saturates_for_huge_page_numbers() {
        let request = PageRequest::clamped(Some(u32::MAX), Some(100), PageLimits::DEFAULT);
        assert!(request.offset() > 0);
    }

    #[rstest]
    #[case(1, 10, 25, 10, true)]
    #[case(3, 10, 25, 5, false)]
    #[case(4, 10, 25, 0, false)]
    fn windows_respect_page_size(
        #[case] page_number: u32,
        #[case] page_size: u32,
        #[case] total: u32,
        #[case] expected_len: usize,
        #[case] expected_next: bool,
    ) {
        let request = PageRequest::clamped(Some(page_number), Some(page_size), PageLimits::DEFAULT);
        let page = Paged::from_window(request, 0..total);
        assert_eq!(page.items().len(), expected_len);
        assert!(page.items().len() <= page.page_size() as usize);
        assert_eq!(page.total_count(), u64::from(total));
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.has_next_page(), expected_next);
    }

    #[rstest]
    fn new_truncates_surplus_items() {
        let request = PageRequest::clamped(Some(1), Some(2), PageLimits::DEFAULT);
        let page = Paged::new(request, vec!['a', 'b', 'c'], 1);
        assert_eq!(page.items(), ['a', 'b']);
        assert_eq!(page.total_count(), 2);
    }

    #[rstest]
    fn empty_page_has_no_pages() {
        let page: Paged<u8> = Paged::empty(PageRequest::default());
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next_page());
    }

    #[rstest]
    fn map_preserves_metadata() {
        let request = PageRequest::clamped(Some(2), Some(2), PageLimits::DEFAULT);
        let page = Paged::from_window(request, 1..=5).map(|value| value * 10);
        assert_eq!(page.items(), [30, 40]);
        assert_eq!(page.page_number(), 2);
        assert_eq!(page.total_count(), 5);
    }

    #[rstest]
    fn serialises_as_camel_case() {
        let request = PageRequest::clamped(Some(1), Some(2), PageLimits::DEFAULT);
        let page = Paged::from_window(request, ["x"]);
        let json = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(
            json,
            serde_json::json!({
                "items": ["x"],
                "totalCount": 1,
                "pageNumber": 1,
                "pageSize": 2,
            })
        );
    }
}
