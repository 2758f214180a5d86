use crate::api::Pagination;

/// Pagination position of the accumulated product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageState {
    /// Build from a response's pagination object.
    ///
    /// `has_next` is `page < total_pages` whenever the server reports a page
    /// count, whatever its flag says. A server that omits `totalPages` is
    /// trusted on its flag alone.
    pub fn from_pagination(p: &Pagination, requested_page: u32, page_size: u32) -> Self {
        let page = if p.page == 0 { requested_page } else { p.page };
        let has_next = if p.total_pages == 0 {
            p.has_next_page
        } else {
            page < p.total_pages
        };
        Self {
            page,
            page_size: if p.limit == 0 { page_size } else { p.limit },
            total: p.total,
            total_pages: p.total_pages,
            has_next,
            has_prev: p.has_prev_page || page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: u32, total_pages: u32, has_next: bool) -> Pagination {
        Pagination {
            page,
            limit: 12,
            total: u64::from(total_pages) * 12,
            total_pages,
            has_next_page: has_next,
            has_prev_page: page > 1,
        }
    }

    #[test]
    fn test_has_next_mid_listing() {
        let state = PageState::from_pagination(&pagination(1, 3, true), 1, 12);
        assert!(state.has_next);
        assert!(!state.has_prev);
        assert_eq!(state.total, 36);
    }

    #[test]
    fn test_counts_override_inconsistent_flag() {
        let state = PageState::from_pagination(&pagination(3, 3, true), 3, 12);
        assert!(!state.has_next);
        assert!(state.has_prev);
    }

    #[test]
    fn test_counts_override_false_flag() {
        let state = PageState::from_pagination(&pagination(1, 3, false), 1, 12);
        assert!(state.has_next);

        let state = PageState::from_pagination(&pagination(2, 3, false), 2, 12);
        assert!(state.has_next);
        assert!(state.has_prev);
    }

    #[test]
    fn test_missing_fields_fall_back_to_request() {
        let p = Pagination {
            has_next_page: true,
            ..Default::default()
        };
        let state = PageState::from_pagination(&p, 2, 12);
        assert_eq!(state.page, 2);
        assert_eq!(state.page_size, 12);
        assert!(state.has_next);
        assert!(state.has_prev);
    }
}
