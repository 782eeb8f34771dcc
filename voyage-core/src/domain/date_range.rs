use chrono::{DateTime, Utc};

use crate::{DateRangeError, date_range_error::OrderingSnafu, hours_between};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start_bound: Bound,
    end_bound: Bound,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Inclusive,
    Exclusive,
}

impl DateRange {
    /// A range excluding both ends, which must contain at least one instant between them.
    pub fn open(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<DateRange, DateRangeError> {
        if start >= end {
            OrderingSnafu { start, end }.fail()
        } else {
            Ok(Self::from_parts(start, end, Bound::Exclusive, Bound::Exclusive))
        }
    }

    pub(crate) fn from_parts(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        start_bound: Bound,
        end_bound: Bound,
    ) -> DateRange {
        DateRange {
            start_bound,
            end_bound,
            start,
            end,
        }
    }

    pub fn contains(&self, val: DateTime<Utc>) -> bool {
        let after_start = match self.start_bound {
            Bound::Inclusive => val >= self.start,
            Bound::Exclusive => val > self.start,
        };
        let before_end = match self.end_bound {
            Bound::Inclusive => val <= self.end,
            Bound::Exclusive => val < self.end,
        };
        after_start && before_end
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_hours(&self) -> f64 {
        hours_between(self.start, self.end)
    }
}
