//! Date cursor behind the day view, kept in sync with `?day=&month=&year=`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::format::format_long_date;

#[derive(Debug, Default, Deserialize, Serialize)]
struct DayQuery {
    day: Option<u32>,
    month: Option<u32>,
    year: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCursor(NaiveDate);

impl DayCursor {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Reads the date from a query string (with or without the leading
    /// `?`). Missing fields come from `today`; an impossible date such as
    /// February 30 falls back to `today` as a whole.
    pub fn from_query(query: &str, today: NaiveDate) -> Self {
        let query = query.trim_start_matches('?');
        let parsed: DayQuery = serde_urlencoded::from_str(query).unwrap_or_default();

        let date = NaiveDate::from_ymd_opt(
            parsed.year.unwrap_or_else(|| today.year()),
            parsed.month.unwrap_or_else(|| today.month()),
            parsed.day.unwrap_or_else(|| today.day()),
        );

        Self(date.unwrap_or(today))
    }

    pub fn to_query(&self) -> String {
        let query = DayQuery {
            day: Some(self.0.day()),
            month: Some(self.0.month()),
            year: Some(self.0.year()),
        };
        serde_urlencoded::to_string(&query).unwrap_or_default()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn prev(&self) -> Self {
        Self(self.0.pred_opt().unwrap_or(self.0))
    }

    pub fn next(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    /// `YYYY-MM-DD` as the API expects it.
    pub fn api_date(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    pub fn label(&self) -> String {
        format_long_date(self.0)
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.0 == today
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Day numbers of the cursor's month, for the month strip.
    pub fn days_in_month(&self) -> Vec<NaiveDate> {
        let Some(first) = self.0.with_day(1) else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .collect()
    }
}

/// The day on screen and which page of its transactions is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DaySelection {
    pub cursor: DayCursor,
    pub page: u32,
}

impl DaySelection {
    pub fn new(cursor: DayCursor) -> Self {
        Self { cursor, page: 0 }
    }

    /// Moving to a different day starts again at the first page.
    pub fn go_to(self, cursor: DayCursor) -> Self {
        if cursor == self.cursor {
            self
        } else {
            Self::new(cursor)
        }
    }

    pub fn next_page(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }

    pub fn prev_page(self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{DayCursor, DaySelection};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_rolls_over_month_and_year() {
        assert_eq!(DayCursor::new(date(2024, 1, 31)).next().date(), date(2024, 2, 1));
        assert_eq!(DayCursor::new(date(2023, 12, 31)).next().date(), date(2024, 1, 1));
    }

    #[test]
    fn prev_lands_on_leap_day() {
        assert_eq!(DayCursor::new(date(2024, 3, 1)).prev().date(), date(2024, 2, 29));
        assert_eq!(DayCursor::new(date(2023, 3, 1)).prev().date(), date(2023, 2, 28));
    }

    #[test]
    fn query_fields_fall_back_to_today() {
        let today = date(2024, 5, 17);

        assert_eq!(DayCursor::from_query("", today).date(), today);
        assert_eq!(DayCursor::from_query("?day=3", today).date(), date(2024, 5, 3));
        assert_eq!(
            DayCursor::from_query("?day=9&month=2&year=2023", today).date(),
            date(2023, 2, 9)
        );
    }

    #[test]
    fn invalid_query_falls_back_to_today() {
        let today = date(2024, 5, 17);

        assert_eq!(DayCursor::from_query("?day=30&month=2", today).date(), today);
        assert_eq!(DayCursor::from_query("?day=abc", today).date(), today);
        assert_eq!(DayCursor::from_query("?month=13", today).date(), today);
    }

    #[test]
    fn query_string_survives_a_reload() {
        let cursor = DayCursor::new(date(2024, 2, 29));
        let query = cursor.to_query();

        assert_eq!(query, "day=29&month=2&year=2024");
        assert_eq!(DayCursor::from_query(&query, date(2020, 1, 1)), cursor);
    }

    #[test]
    fn api_date_and_label() {
        let cursor = DayCursor::new(date(2024, 1, 1));

        assert_eq!(cursor.api_date(), "2024-01-01");
        assert_eq!(cursor.label(), "Monday, January 1, 2024");
        assert!(cursor.is_today(date(2024, 1, 1)));
        assert!(!cursor.next().is_today(date(2024, 1, 1)));
    }

    #[test]
    fn month_strip_covers_whole_month() {
        let days = DayCursor::new(date(2024, 2, 10)).days_in_month();

        assert_eq!(days.len(), 29);
        assert_eq!(days[0], date(2024, 2, 1));
        assert_eq!(days[28], date(2024, 2, 29));
    }

    #[test]
    fn changing_day_resets_the_page() {
        let selection = DaySelection::new(DayCursor::new(date(2024, 1, 31)))
            .next_page()
            .next_page();
        assert_eq!(selection.page, 2);

        let moved = selection.go_to(selection.cursor.next());

        assert_eq!(moved.cursor.date(), date(2024, 2, 1));
        assert_eq!(moved.page, 0);
        assert_eq!(selection.go_to(selection.cursor).page, 2);
        assert_eq!(moved.prev_page().page, 0);
    }
}
