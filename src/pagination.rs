/// A bounded slice of an ordered result set, plus the navigation
/// metadata the rendering layer needs.
#[derive(Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i32,
    pub total_items: i64,
    pub total_pages: i32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: i32, total_items: i64, total_pages: i32) -> Self {
        Page {
            items,
            number,
            total_items,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Where a requested page actually lands: its clamped 1-based number and
/// the offset/limit to fetch it with.
pub struct PageRequest {
    pub number: i32,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Clone, Copy)]
pub struct Paginator {
    per_page: i64,
}

impl Paginator {
    pub fn new(per_page: i64) -> Self {
        Paginator {
            per_page: per_page.max(1),
        }
    }

    /// Total number of pages needed to display `total_items`. An empty
    /// result set still has one (empty) page.
    pub fn total_pages(&self, total_items: i64) -> i32 {
        ((total_items + self.per_page - 1) / self.per_page).max(1) as i32
    }

    /// A missing page number means the first page; any out-of-range number
    /// falls back to the last page instead of erroring.
    pub fn resolve(&self, total_items: i64, page: Option<i32>) -> PageRequest {
        let total_pages = self.total_pages(total_items);
        let number = match page {
            None => 1,
            Some(p) if p >= 1 && p <= total_pages => p,
            Some(_) => total_pages,
        };
        PageRequest {
            number,
            offset: (i64::from(number) - 1) * self.per_page,
            limit: self.per_page,
        }
    }

    /// Paginates a sequence that is already in memory. Feeds backed by the
    /// data store go through `resolve` instead, so that only one page is
    /// ever loaded.
    pub fn paginate<T: Clone>(&self, items: &[T], page: Option<i32>) -> Page<T> {
        let total_items = items.len() as i64;
        let req = self.resolve(total_items, page);
        let start = req.offset.min(total_items) as usize;
        let end = (req.offset + req.limit).min(total_items) as usize;
        Page::new(
            items[start..end].to_vec(),
            req.number,
            total_items,
            self.total_pages(total_items),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::{json, to_value};

    #[test]
    fn pages_cover_the_sequence_exactly() {
        let items: Vec<i32> = (0..13).collect();
        let paginator = Paginator::new(5);

        let mut seen = Vec::new();
        for number in 1..=paginator.total_pages(items.len() as i64) {
            let page = paginator.paginate(&items, Some(number));
            assert!(page.len() <= 5);
            seen.extend(page.items);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn missing_page_number_is_the_first_page() {
        let paginator = Paginator::new(10);
        let items: Vec<i32> = (0..13).collect();
        let page = paginator.paginate(&items, None);
        assert_eq!(page.number, 1);
        assert_eq!(page.len(), 10);
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn out_of_range_numbers_fall_back_to_the_last_page() {
        let paginator = Paginator::new(10);
        let items: Vec<i32> = (0..13).collect();

        for out_of_range in [0, -1, 3, 42] {
            let page = paginator.paginate(&items, Some(out_of_range));
            assert_eq!(page.number, 2);
            assert_eq!(page.items, (10..13).collect::<Vec<_>>());
            assert!(page.has_previous());
            assert!(!page.has_next());
        }
    }

    #[test]
    fn an_empty_sequence_has_one_empty_page() {
        let paginator = Paginator::new(10);
        let page = paginator.paginate::<i32>(&[], Some(7));
        assert_eq!(page.number, 1);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn serializes_for_the_template_context() {
        let page = Paginator::new(2).paginate(&["a", "b", "c"], None);
        assert_json_eq!(
            to_value(&page).unwrap(),
            json!({
                "items": ["a", "b"],
                "number": 1,
                "total_items": 3,
                "total_pages": 2,
            })
        );
    }
}
