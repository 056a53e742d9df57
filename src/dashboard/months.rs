//! Calendar month arithmetic for the dashboard aggregations.

use time::{Date, Month};

/// A calendar month in a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    /// The month that `date` falls in.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        let month = self.month.next();
        let year = if month == Month::January {
            self.year + 1
        } else {
            self.year
        };

        Self { year, month }
    }

    pub fn previous(self) -> Self {
        let month = self.month.previous();
        let year = if month == Month::December {
            self.year - 1
        } else {
            self.year
        };

        Self { year, month }
    }

    /// The first day of the month formatted like a stored transaction date, e.g. "2025-03-01".
    pub fn first_day(&self) -> String {
        format!("{}-01", self.key())
    }

    /// The "YYYY-MM" prefix shared by the dates in this month.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, u8::from(self.month))
    }

    /// The three letter English abbreviation of the month.
    pub fn label(&self) -> &'static str {
        match self.month {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        }
    }
}

/// The `count` months ending with `current`, oldest first.
pub(super) fn trailing_months(current: YearMonth, count: usize) -> Vec<YearMonth> {
    let mut months: Vec<YearMonth> = std::iter::successors(Some(current), |month| {
        Some(month.previous())
    })
    .take(count)
    .collect();
    months.reverse();

    months
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use super::{YearMonth, trailing_months};

    #[test]
    fn next_and_previous_wrap_years() {
        let december = YearMonth {
            year: 2024,
            month: Month::December,
        };
        let january = YearMonth {
            year: 2025,
            month: Month::January,
        };

        assert_eq!(december.next(), january);
        assert_eq!(january.previous(), december);
    }

    #[test]
    fn formats_key_and_first_day() {
        let month = YearMonth::containing(date!(2025 - 03 - 17));

        assert_eq!(month.key(), "2025-03");
        assert_eq!(month.first_day(), "2025-03-01");
        assert_eq!(month.label(), "Mar");
    }

    #[test]
    fn trailing_months_are_chronological() {
        let months = trailing_months(YearMonth::containing(date!(2025 - 02 - 10)), 12);

        let labels: Vec<&str> = months.iter().map(YearMonth::label).collect();
        assert_eq!(
            labels,
            ["Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]
        );
        assert_eq!(months[0].key(), "2024-03");
        assert_eq!(months[11].key(), "2025-02");
    }
}
