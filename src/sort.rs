//! Composite sort keys and the sort engine.
//!
//! A [`SortSpec`] is an ordered list of [`SortField`]s plus one
//! [`SortDirection`]. Records are compared field by field in spec order; the
//! first field that differs decides. Descending reverses the whole composite
//! comparison, and since the sort is stable, records that are equal on every
//! chosen field keep their fetch order either way.

use std::{cmp::Ordering, fmt};

use crate::{Error, Res};

/// A playable track of a playlist, flattened for sorting.
///
/// `name`, `artist` and `album` are lower-cased when the record is built so
/// comparisons never allocate. `release_date` and `added_at` stay plain strings
/// and are compared as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub uri: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub release_date: String,
    pub popularity: u32,
    pub added_at: String,
}

/// A comparable value extracted from a [`TrackRecord`].
///
/// A given field always yields the same variant, so the derived ordering only
/// ever compares text with text and numbers with numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Artist,
    Album,
    ReleaseDate,
    AddedAt,
    Popularity,
    Name,
}

impl SortField {
    /// All fields in menu order.
    pub const ALL: [SortField; 6] = [
        SortField::Artist,
        SortField::Album,
        SortField::ReleaseDate,
        SortField::AddedAt,
        SortField::Popularity,
        SortField::Name,
    ];

    /// Human readable label used in menus.
    pub fn label(self) -> &'static str {
        match self {
            SortField::Artist => "Artist",
            SortField::Album => "Album",
            SortField::ReleaseDate => "Release date",
            SortField::AddedAt => "Date added",
            SortField::Popularity => "Popularity",
            SortField::Name => "Track name (alphabetical)",
        }
    }

    /// Looks up a field by its 1-based menu number.
    pub fn from_menu_number(number: usize) -> Option<SortField> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn value(self, record: &TrackRecord) -> SortValue<'_> {
        match self {
            SortField::Artist => SortValue::Text(&record.artist),
            SortField::Album => SortValue::Text(&record.album),
            SortField::ReleaseDate => SortValue::Text(&record.release_date),
            SortField::AddedAt => SortValue::Text(&record.added_at),
            SortField::Popularity => SortValue::Number(record.popularity),
            SortField::Name => SortValue::Text(&record.name),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    fields: Vec<SortField>,
    direction: SortDirection,
}

impl SortSpec {
    /// Builds a spec from fields in priority order.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSortSpec`] if `fields` is empty or names a field twice.
    pub fn new(fields: Vec<SortField>, direction: SortDirection) -> Res<Self> {
        if fields.is_empty() {
            return Err(Error::InvalidSortSpec(
                "at least one field is required".to_string(),
            ));
        }

        for (i, field) in fields.iter().enumerate() {
            if fields[..i].contains(field) {
                return Err(Error::InvalidSortSpec(format!(
                    "{} was chosen more than once",
                    field
                )));
            }
        }

        Ok(Self { fields, direction })
    }

    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Compares two records on the composite key, honouring the direction.
    pub fn compare(&self, a: &TrackRecord, b: &TrackRecord) -> Ordering {
        let ordering = self
            .fields
            .iter()
            .map(|field| field.value(a).cmp(&field.value(b)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal);

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(|f| f.label()).collect();
        write!(f, "{} ({})", names.join(" > "), self.direction)
    }
}

/// Sorts records by the composite key of `spec`.
///
/// Uses a stable sort: records with equal keys on every chosen field keep their
/// relative input order, in both directions.
pub fn sort_tracks(mut records: Vec<TrackRecord>, spec: &SortSpec) -> Vec<TrackRecord> {
    records.sort_by(|a, b| spec.compare(a, b));
    records
}
