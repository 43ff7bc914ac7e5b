//! Turns optional filter criteria into a [QuerySpec] for the movement store.

use serde::Deserialize;
use time::{Date, Duration, PrimitiveDateTime, Time};

use crate::{
    Error,
    movement::{FORM_DATE_FORMAT, Movement, MovementType},
};

/// The filter value that matches every movement type.
pub const ALL_MOVEMENT_TYPES: &str = "all";

/// How many days back the home view reaches.
pub const HOME_VIEW_DAYS: i64 = 7;

/// Which movement types a query matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Every type, including unknown ones.
    #[default]
    All,
    /// Exactly this type.
    Only(MovementType),
}

impl TypeFilter {
    /// Read a filter value, where `all` means no constraint.
    pub fn from_param(value: &str) -> Self {
        if value == ALL_MOVEMENT_TYPES {
            TypeFilter::All
        } else {
            TypeFilter::Only(MovementType::from(value))
        }
    }

    /// The filter value as sent in a query string.
    pub fn as_str(&self) -> &str {
        match self {
            TypeFilter::All => ALL_MOVEMENT_TYPES,
            TypeFilter::Only(movement_type) => movement_type.as_str(),
        }
    }
}

/// A description of which movements to fetch from the store.
///
/// All present constraints must hold. A movement's date is compared as
/// midnight at the start of that day, and both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySpec {
    /// Only movements on or after this moment.
    pub start: Option<PrimitiveDateTime>,
    /// Only movements on or before this moment.
    pub end: Option<PrimitiveDateTime>,
    /// Only movements whose description contains this text, case sensitive.
    pub description: Option<String>,
    /// Only movements of this type.
    pub movement_type: TypeFilter,
}

impl QuerySpec {
    /// The query used for the home page: the last seven days up to `now`, any type.
    pub fn home_view(now: PrimitiveDateTime) -> Self {
        Self {
            start: Some(now - Duration::days(HOME_VIEW_DAYS)),
            end: Some(now),
            description: None,
            movement_type: TypeFilter::All,
        }
    }

    /// Whether `movement` satisfies every constraint of this query.
    ///
    /// The store evaluates the same conditions in SQL.
    pub fn matches(&self, movement: &Movement) -> bool {
        let date = movement.movement_date.midnight();

        self.start.is_none_or(|start| date >= start)
            && self.end.is_none_or(|end| date <= end)
            && self
                .description
                .as_deref()
                .is_none_or(|text| movement.description.contains(text))
            && match &self.movement_type {
                TypeFilter::All => true,
                TypeFilter::Only(movement_type) => &movement.movement_type == movement_type,
            }
    }
}

/// The earliest day whose midnight is not before `bound`.
///
/// Returns `None` if that day would be past the last representable date.
pub fn first_day_on_or_after(bound: PrimitiveDateTime) -> Option<Date> {
    if bound.time() == Time::MIDNIGHT {
        Some(bound.date())
    } else {
        bound.date().next_day()
    }
}

/// Parsed filter criteria, every one optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// The first day to include.
    pub start_date: Option<Date>,
    /// The last day to include.
    pub end_date: Option<Date>,
    /// Text that descriptions must contain.
    pub description: Option<String>,
    /// A movement type, or `all`.
    pub movement_type: Option<String>,
}

/// Build the store query for `criteria`.
///
/// Dates are taken as midnight. A missing type or the value `all` leaves the
/// type unconstrained, any other value must match exactly.
pub fn build_filter_query(criteria: FilterCriteria) -> QuerySpec {
    QuerySpec {
        start: criteria.start_date.map(Date::midnight),
        end: criteria.end_date.map(Date::midnight),
        description: criteria.description.filter(|text| !text.is_empty()),
        movement_type: criteria
            .movement_type
            .as_deref()
            .map(TypeFilter::from_param)
            .unwrap_or_default(),
    }
}

/// The raw query string of a filter request.
///
/// Empty values are treated the same as missing ones.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterParams {
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: Option<String>,
    /// Text that descriptions must contain.
    #[serde(default)]
    pub description: Option<String>,
    /// A movement type, or `all`.
    #[serde(default)]
    pub movement_type: Option<String>,
}

impl TryFrom<FilterParams> for FilterCriteria {
    type Error = Error;

    /// # Errors
    /// Returns [Error::InvalidFilterDate] if a date is not in `YYYY-MM-DD` format.
    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: parse_filter_date(params.start_date)?,
            end_date: parse_filter_date(params.end_date)?,
            description: non_empty(params.description),
            movement_type: non_empty(params.movement_type),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn parse_filter_date(raw: Option<String>) -> Result<Option<Date>, Error> {
    match non_empty(raw) {
        None => Ok(None),
        Some(raw) => Date::parse(&raw, FORM_DATE_FORMAT)
            .map(Some)
            .map_err(|_| Error::InvalidFilterDate(raw)),
    }
}

#[cfg(test)]
mod build_filter_query_tests {
    use time::macros::{date, datetime};

    use crate::movement::MovementType;

    use super::{FilterCriteria, QuerySpec, TypeFilter, build_filter_query, first_day_on_or_after};

    #[test]
    fn first_day_of_a_bound() {
        assert_eq!(
            first_day_on_or_after(datetime!(2024-01-03 00:00)),
            Some(date!(2024-01-03))
        );
        assert_eq!(
            first_day_on_or_after(datetime!(2024-01-03 12:00)),
            Some(date!(2024-01-04))
        );
    }

    #[test]
    fn no_criteria_imposes_no_constraints() {
        assert_eq!(
            build_filter_query(FilterCriteria::default()),
            QuerySpec::default()
        );
    }

    #[test]
    fn all_imposes_no_type_constraint() {
        let query = build_filter_query(FilterCriteria {
            movement_type: Some("all".to_owned()),
            ..Default::default()
        });

        assert_eq!(query.movement_type, TypeFilter::All);
    }

    #[test]
    fn other_types_constrain_exactly() {
        let cases = [
            ("incomes", MovementType::Incomes),
            ("expenses", MovementType::Expenses),
            ("ALL", MovementType::Other("ALL".to_owned())),
        ];

        for (value, want) in cases {
            let query = build_filter_query(FilterCriteria {
                movement_type: Some(value.to_owned()),
                ..Default::default()
            });

            assert_eq!(query.movement_type, TypeFilter::Only(want));
        }
    }

    #[test]
    fn dates_become_midnight_bounds() {
        let query = build_filter_query(FilterCriteria {
            start_date: Some(date!(2024-01-01)),
            end_date: Some(date!(2024-01-31)),
            description: Some("rent".to_owned()),
            movement_type: None,
        });

        assert_eq!(query.start, Some(datetime!(2024-01-01 00:00)));
        assert_eq!(query.end, Some(datetime!(2024-01-31 00:00)));
        assert_eq!(query.description.as_deref(), Some("rent"));
    }

    #[test]
    fn home_view_covers_the_last_seven_days() {
        let query = QuerySpec::home_view(datetime!(2024-01-10 12:00));

        assert_eq!(query.start, Some(datetime!(2024-01-03 12:00)));
        assert_eq!(query.end, Some(datetime!(2024-01-10 12:00)));
        assert_eq!(query.description, None);
        assert_eq!(query.movement_type, TypeFilter::All);
    }
}
