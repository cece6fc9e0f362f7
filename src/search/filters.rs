//! Typed filter schema for search.
//!
//! Filters use a fixed, enumerated set of recognized fields with typed
//! accepted-value sets, validated at the boundary. Unknown field names are
//! rejected with an explicit error, never silently ignored. An empty
//! accepted set for a field means "no constraint on that field".

use std::collections::BTreeSet;

use crate::corpus::Publication;
use crate::error::{Result, SbkError};

/// The recognized filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Category,
    Organism,
    Mission,
    Tag,
    Year,
}

impl FilterField {
    pub const ALL: &'static [Self] = &[
        Self::Category,
        Self::Organism,
        Self::Mission,
        Self::Tag,
        Self::Year,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Organism => "organism",
            Self::Mission => "mission",
            Self::Tag => "tag",
            Self::Year => "year",
        }
    }

    /// Parse a field name, rejecting anything outside the schema.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "category" => Ok(Self::Category),
            "organism" => Ok(Self::Organism),
            "mission" => Ok(Self::Mission),
            "tag" | "tags" => Ok(Self::Tag),
            "year" => Ok(Self::Year),
            _ => Err(SbkError::InvalidFilterField {
                field: name.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

/// Accepted-value sets per field. A publication passes when every
/// constrained field's value intersects the corresponding set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    categories: BTreeSet<String>,
    organisms: BTreeSet<String>,
    missions: BTreeSet<String>,
    tags: BTreeSet<String>,
    years: BTreeSet<i32>,
}

impl SearchFilters {
    /// Create new empty filters (match everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    #[must_use]
    pub fn with_organism(mut self, organism: impl Into<String>) -> Self {
        self.organisms.insert(organism.into());
        self
    }

    #[must_use]
    pub fn with_mission(mut self, mission: impl Into<String>) -> Self {
        self.missions.insert(mission.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.years.insert(year);
        self
    }

    /// Add an accepted value by field name. This is the boundary used by
    /// callers holding untyped field/value pairs; unknown fields and
    /// unparseable year values error out here.
    pub fn insert(&mut self, field: &str, value: &str) -> Result<()> {
        match FilterField::parse(field)? {
            FilterField::Category => {
                self.categories.insert(value.to_string());
            }
            FilterField::Organism => {
                self.organisms.insert(value.to_string());
            }
            FilterField::Mission => {
                self.missions.insert(value.to_string());
            }
            FilterField::Tag => {
                self.tags.insert(value.to_string());
            }
            FilterField::Year => {
                let year = value.parse::<i32>().map_err(|_| SbkError::InvalidFilterValue {
                    field: "year".to_string(),
                    value: value.to_string(),
                })?;
                self.years.insert(year);
            }
        }
        Ok(())
    }

    /// Check if no constraints are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.organisms.is_empty()
            && self.missions.is_empty()
            && self.tags.is_empty()
            && self.years.is_empty()
    }

    /// Check whether a publication satisfies all constrained fields.
    ///
    /// Single-valued fields must be a member of the accepted set; the
    /// multi-valued tag field passes on any intersection. A constrained
    /// field whose value is unknown never passes.
    #[must_use]
    pub fn matches(&self, publication: &Publication) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&publication.category) {
            return false;
        }

        if !self.organisms.is_empty() {
            match publication.organism {
                Some(ref organism) if self.organisms.contains(organism) => {}
                _ => return false,
            }
        }

        if !self.missions.is_empty() {
            match publication.mission {
                Some(ref mission) if self.missions.contains(mission) => {}
                _ => return false,
            }
        }

        if !self.years.is_empty() {
            match publication.year {
                Some(year) if self.years.contains(&year) => {}
                _ => return false,
            }
        }

        if !self.tags.is_empty() && publication.tags.is_disjoint(&self.tags) {
            return false;
        }

        true
    }
}
