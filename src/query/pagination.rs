// SPDX-License-Identifier: AGPL-3.0-or-later

//! Pagination parameters and their translation into `limit`/`offset`.

use std::num::NonZeroU64;

/// 1-based page selection of a list-like action.
///
/// Both components are non-zero by construction; a zeroth page or an empty
/// page size cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number, starting at 1.
    pub page: NonZeroU64,

    /// Records per page.
    pub per_page: NonZeroU64,
}

impl Pagination {
    /// Page selection from raw numbers, `None` when either is zero.
    pub fn new(page: u64, per_page: u64) -> Option<Self> {
        Some(Self {
            page: NonZeroU64::new(page)?,
            per_page: NonZeroU64::new(per_page)?,
        })
    }

    /// Value of the `limit` argument.
    pub(crate) fn limit(&self) -> u64 {
        self.per_page.get()
    }

    /// Value of the `offset` argument.
    pub(crate) fn offset(&self) -> u64 {
        (self.page.get() - 1) * self.per_page.get()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Pagination;

    #[rstest]
    #[case::first_page(1, 10, 10, 0)]
    #[case::tenth_page(10, 10, 10, 90)]
    #[case::uneven_page_size(3, 7, 7, 14)]
    fn translates_pages_into_limit_and_offset(
        #[case] page: u64,
        #[case] per_page: u64,
        #[case] limit: u64,
        #[case] offset: u64,
    ) {
        let pagination = Pagination::new(page, per_page).unwrap();

        assert_eq!(pagination.limit(), limit);
        assert_eq!(pagination.offset(), offset);
    }

    #[rstest]
    #[case::zero_page(0, 10)]
    #[case::zero_page_size(1, 0)]
    fn rejects_zero_components(#[case] page: u64, #[case] per_page: u64) {
        assert!(Pagination::new(page, per_page).is_none());
    }
}
