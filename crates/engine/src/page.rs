//! Page-number pagination.
//!
//! The envelope mirrors what clients already consume: totals, the current
//! window and the content itself. Page numbers are 1-based.

use crate::{EngineError, ResultEngine};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone, Copy, Debug)]
pub struct PageRequest {
    pub page_number: u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page_number: Option<u64>, page_size: Option<u64>) -> ResultEngine<Self> {
        let page_number = page_number.unwrap_or(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_number == 0 {
            return Err(EngineError::InvalidInput(
                "page_number starts at 1".to_string(),
            ));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(EngineError::InvalidInput(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Page<T> {
    pub total_elements: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble the envelope from a fetched window.
    pub fn new(request: PageRequest, total_elements: u64, content: Vec<T>) -> Self {
        let total_pages = total_elements.div_ceil(request.page_size);
        Self {
            total_elements,
            total_pages,
            page_size: request.page_size,
            current_page: request.page_number,
            content,
        }
    }

    pub fn elements_number(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1 && self.total_elements > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.total_elements == 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page_size: self.page_size,
            current_page: self.current_page,
            content: self.content.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_validates_bounds() {
        assert!(PageRequest::new(Some(0), None).is_err());
        assert!(PageRequest::new(None, Some(0)).is_err());
        assert!(PageRequest::new(None, Some(MAX_PAGE_SIZE + 1)).is_err());
        let request = PageRequest::new(None, None).unwrap();
        assert_eq!(request.page_number, 1);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn envelope_flags() {
        let request = PageRequest {
            page_number: 2,
            page_size: 10,
        };
        let page = Page::new(request, 25, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous());
        assert!(page.has_next());
        assert!(!page.is_empty());

        let empty: Page<i32> = Page::new(PageRequest::default(), 0, Vec::new());
        assert!(empty.is_empty());
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
    }
}
