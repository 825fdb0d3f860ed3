//! Paging and sorting primitives for listing queries.

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// A sortable property of an entity.
///
/// Implementations map API property names onto fixed SQL columns so that
/// user input never reaches the query text.
pub trait SortProperty: Copy + Default + Send + Sync + 'static {
    /// Parses an API property name (e.g. `publicationDate`).
    fn parse(name: &str) -> Option<Self>;

    /// Fully qualified SQL column.
    fn column(&self) -> &'static str;
}

/// Requested ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort<P> {
    pub property: P,
    pub direction: Direction,
}

impl<P: SortProperty> Sort<P> {
    /// Parses `property` or `property,asc|desc`.
    ///
    /// Returns `None` for unknown properties or directions.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(',').map(str::trim);
        let property = P::parse(parts.next()?)?;
        let direction = match parts.next() {
            None => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(_) => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            property,
            direction,
        })
    }

    /// `ORDER BY` clause body, with the id as a stable tie-breaker.
    pub fn order_by(&self, id_column: &str) -> String {
        format!(
            "{} {}, {} {}",
            self.property.column(),
            self.direction.as_sql(),
            id_column,
            self.direction.as_sql()
        )
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<P> {
    pub page: u32,
    pub size: u32,
    pub sort: Sort<P>,
}

impl<P: SortProperty> PageRequest<P> {
    pub fn new(page: u32, size: u32, sort: Sort<P>) -> Self {
        Self { page, size, sort }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }
}

/// Sortable publication properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationSort {
    #[default]
    Id,
    Title,
    PublicationDate,
}

impl SortProperty for PublicationSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "publicationDate" => Some(Self::PublicationDate),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Id => "p.id",
            Self::Title => "p.title",
            Self::PublicationDate => "p.publication_date",
        }
    }
}

/// Sortable rubric properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RubricSort {
    #[default]
    Id,
    Name,
}

impl SortProperty for RubricSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Id => "r.id",
            Self::Name => "r.name",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_with_direction() {
        let sort = Sort::<PublicationSort>::parse("publicationDate,desc").unwrap();
        assert_eq!(sort.property, PublicationSort::PublicationDate);
        assert_eq!(sort.direction, Direction::Desc);
    }

    #[test]
    fn test_parse_sort_defaults_to_ascending() {
        let sort = Sort::<RubricSort>::parse("name").unwrap();
        assert_eq!(sort.property, RubricSort::Name);
        assert_eq!(sort.direction, Direction::Asc);
    }

    #[test]
    fn test_parse_sort_rejects_unknown() {
        assert!(Sort::<RubricSort>::parse("title").is_none());
        assert!(Sort::<RubricSort>::parse("id,sideways").is_none());
        assert!(Sort::<RubricSort>::parse("id,asc,extra").is_none());
        assert!(Sort::<PublicationSort>::parse("p.id; DROP TABLE rubric").is_none());
    }

    #[test]
    fn test_order_by() {
        let sort = Sort {
            property: PublicationSort::Title,
            direction: Direction::Desc,
        };
        assert_eq!(sort.order_by("p.id"), "p.title DESC, p.id DESC");
    }

    #[test]
    fn test_offset_and_limit() {
        let request = PageRequest::new(3, 20, Sort::<RubricSort>::default());
        assert_eq!(request.offset(), 60);
        assert_eq!(request.limit(), 20);
    }
}
