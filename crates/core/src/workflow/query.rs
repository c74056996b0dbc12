//! Query and pagination facade shared by every list endpoint.

use std::cmp::Ordering;

use api_shared::{ListParams, Paginated};
use chrono::{DateTime, Utc};

/// Field a list can be ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Id,
    CreatedAt,
    UpdatedAt,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl SortOrder {
    /// Parses `field[,asc|,desc]`. Unrecognised input falls back to ID ascending.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(',').map(str::trim);
        let key = match parts.next() {
            Some("id") => SortKey::Id,
            Some("fechaCreacion") => SortKey::CreatedAt,
            Some("fechaActualizacion") => SortKey::UpdatedAt,
            _ => return Self::default(),
        };
        let descending = match parts.next() {
            None | Some("") => false,
            Some(dir) if dir.eq_ignore_ascii_case("asc") => false,
            Some(dir) if dir.eq_ignore_ascii_case("desc") => true,
            Some(_) => return Self::default(),
        };
        Self { key, descending }
    }

    /// Compares two rows; ties on timestamps break by ID ascending.
    pub fn compare<T: Sortable>(&self, a: &T, b: &T) -> Ordering {
        let primary = match self.key {
            SortKey::Id => a.sort_id().cmp(&b.sort_id()),
            SortKey::CreatedAt => a.sort_created_at().cmp(&b.sort_created_at()),
            SortKey::UpdatedAt => a.sort_updated_at().cmp(&b.sort_updated_at()),
        };
        let primary = if self.descending {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(|| a.sort_id().cmp(&b.sort_id()))
    }
}

/// Rows that can be ordered by [`SortOrder`].
pub trait Sortable {
    fn sort_id(&self) -> u64;
    fn sort_created_at(&self) -> DateTime<Utc>;
    fn sort_updated_at(&self) -> DateTime<Utc>;
}

/// A normalised list request.
///
/// Construction never fails: bad paging input is coerced the same way the list endpoints always
/// have, `page < 0` or unparseable to 0 and `size <= 0` or unparseable to the default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    status: Option<String>,
    search: Option<String>,
    page: usize,
    size: usize,
    sort: SortOrder,
}

impl ListQuery {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            status: None,
            search: None,
            page,
            size: size.max(1),
            sort: SortOrder::default(),
        }
    }

    pub fn from_params(params: &ListParams, default_size: usize) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 0)
            .and_then(|p| usize::try_from(p).ok())
            .unwrap_or(0);

        let size = params
            .size
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|s| *s > 0)
            .and_then(|s| usize::try_from(s).ok())
            .unwrap_or(default_size);

        let mut query = Self::new(page, size);
        if let Some(status) = params.estado.as_deref() {
            query = query.with_status(status);
        }
        if let Some(search) = params.q.as_deref() {
            query = query.with_search(search);
        }
        if let Some(sort) = params.sort.as_deref() {
            query = query.with_sort(SortOrder::parse(sort));
        }
        query
    }

    /// Exact-match status filter. Blank input means "no filter".
    pub fn with_status(mut self, status: &str) -> Self {
        let status = status.trim();
        self.status = (!status.is_empty()).then(|| status.to_owned());
        self
    }

    /// Free-text filter. Blank input means "no filter".
    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_lowercase());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Lowercased search needle.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Slices `rows` (already filtered and ordered) according to `query`.
    ///
    /// `start = page * size`; past the end yields an empty page with the correct total.
    pub fn slice(rows: Vec<T>, query: &ListQuery) -> Self {
        let total = rows.len();
        let start = query.page.saturating_mul(query.size);
        let items = if start >= total {
            Vec::new()
        } else {
            let end = start.saturating_add(query.size).min(total);
            rows.into_iter().skip(start).take(end - start).collect()
        };

        Self {
            page: query.page,
            size: query.size,
            total,
            items,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            size: self.size,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }

    pub fn into_paginated(self) -> Paginated<T> {
        Paginated {
            page: self.page,
            size: self.size,
            total: self.total,
            items: self.items,
        }
    }
}
