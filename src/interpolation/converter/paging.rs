//! Converters for paged query results

use super::{iterable::IterableToStringConverter, FieldListBuilder, ToStringConverter};
use crate::interpolation::value::LogValue;
use crate::paging::Pageable;
use std::sync::Arc;

/// `[page=..,size=..,sort=..,numberOfElements=..,content=[..]]`;
/// page, size and sort only when the slice was requested paged
pub struct SliceToStringConverter {
    iterable: Arc<IterableToStringConverter>,
}

impl SliceToStringConverter {
    pub fn new(iterable: Arc<IterableToStringConverter>) -> Self {
        Self { iterable }
    }
}

impl ToStringConverter for SliceToStringConverter {
    fn supports(&self, value: &LogValue) -> bool {
        matches!(value, LogValue::Slice(_))
    }

    fn convert(&self, value: &LogValue) -> String {
        let LogValue::Slice(slice) = value else {
            return value.to_string();
        };

        let mut builder = FieldListBuilder::new();
        if let Pageable::Paged { page, size, sort } = slice.pageable() {
            builder.append("page", page).append("size", size).append("sort", sort);
        }
        builder
            .append("numberOfElements", slice.number_of_elements())
            .append("content", self.iterable.render_items(slice.content()))
            .finish()
    }

    fn name(&self) -> &str {
        "slice"
    }
}

/// Like [`SliceToStringConverter`] with `totalElements` and `totalPages`
/// after the sort
pub struct PageToStringConverter {
    iterable: Arc<IterableToStringConverter>,
}

impl PageToStringConverter {
    pub fn new(iterable: Arc<IterableToStringConverter>) -> Self {
        Self { iterable }
    }
}

impl ToStringConverter for PageToStringConverter {
    fn supports(&self, value: &LogValue) -> bool {
        matches!(value, LogValue::Page(_))
    }

    fn convert(&self, value: &LogValue) -> String {
        let LogValue::Page(page) = value else {
            return value.to_string();
        };

        let mut builder = FieldListBuilder::new();
        if page.pageable().is_paged() {
            builder
                .append("page", page.number())
                .append("size", page.size())
                .append("sort", page.sort())
                .append("totalElements", page.total_elements())
                .append("totalPages", page.total_pages());
        }
        builder
            .append("numberOfElements", page.number_of_elements())
            .append("content", self.iterable.render_items(page.content()))
            .finish()
    }

    fn name(&self) -> &str {
        "page"
    }
}

/// `[page=..,size=..,sort=..]` or `[UNPAGED]`
pub struct PageableToStringConverter;

impl ToStringConverter for PageableToStringConverter {
    fn supports(&self, value: &LogValue) -> bool {
        matches!(value, LogValue::Pageable(_))
    }

    fn convert(&self, value: &LogValue) -> String {
        let LogValue::Pageable(pageable) = value else {
            return value.to_string();
        };

        let mut builder = FieldListBuilder::new();
        match pageable {
            Pageable::Paged { page, size, sort } => {
                builder.append("page", page).append("size", size).append("sort", sort);
            }
            Pageable::Unpaged => {
                builder.append_value("UNPAGED");
            }
        }
        builder.finish()
    }

    fn name(&self) -> &str {
        "pageable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConverterProperties;
    use crate::interpolation::converter::ConverterChain;
    use crate::interpolation::value::AsLogValue;
    use crate::paging::{Order, Page, Slice, Sort};

    fn chain() -> ConverterChain {
        ConverterChain::new(&ConverterProperties::default()).unwrap()
    }

    #[test]
    fn test_paged_page() {
        let page = Page::from_items(&[1, 2, 3], Pageable::sorted(0, 10, Sort::by([Order::asc("id")])), 3);
        assert_eq!(
            chain().render(&page.as_log_value()),
            "[page=0,size=10,sort=id: ASC,totalElements=3,totalPages=1,numberOfElements=3,content=[1, 2, 3]]"
        );
    }

    #[test]
    fn test_unpaged_page_and_slice() {
        let page = Page::from_items(&[1, 2, 3], Pageable::Unpaged, 3);
        assert_eq!(
            chain().render(&page.as_log_value()),
            "[numberOfElements=3,content=[1, 2, 3]]"
        );

        let slice = Slice::from_items(&["a"], Pageable::Unpaged, false);
        assert_eq!(
            chain().render(&slice.as_log_value()),
            "[numberOfElements=1,content=[a]]"
        );
    }

    #[test]
    fn test_paged_slice() {
        let slice = Slice::from_items(&[1, 2, 3], Pageable::of(2, 3), true);
        assert_eq!(
            chain().render(&slice.as_log_value()),
            "[page=2,size=3,sort=UNSORTED,numberOfElements=3,content=[1, 2, 3]]"
        );
    }

    #[test]
    fn test_pageable() {
        let chain = chain();
        assert_eq!(chain.render(&Pageable::Unpaged.as_log_value()), "[UNPAGED]");
        assert_eq!(
            chain.render(&Pageable::sorted(0, 20, Sort::by([Order::asc("id")])).as_log_value()),
            "[page=0,size=20,sort=id: ASC]"
        );
    }
}
