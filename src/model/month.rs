use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Calendar month. Records keep their month as free text; this type only
/// gives that text a calendar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Month {
    #[strum(to_string = "January", serialize = "Jan")]
    January = 1,
    #[strum(to_string = "February", serialize = "Feb")]
    February,
    #[strum(to_string = "March", serialize = "Mar")]
    March,
    #[strum(to_string = "April", serialize = "Apr")]
    April,
    #[strum(to_string = "May")]
    May,
    #[strum(to_string = "June", serialize = "Jun")]
    June,
    #[strum(to_string = "July", serialize = "Jul")]
    July,
    #[strum(to_string = "August", serialize = "Aug")]
    August,
    #[strum(to_string = "September", serialize = "Sep", serialize = "Sept")]
    September,
    #[strum(to_string = "October", serialize = "Oct")]
    October,
    #[strum(to_string = "November", serialize = "Nov")]
    November,
    #[strum(to_string = "December", serialize = "Dec")]
    December,
}

impl Month {
    pub fn parse(name: &str) -> Option<Self> {
        Month::from_str(name.trim()).ok()
    }

    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn from_number(number: u32) -> Option<Self> {
        Month::iter().find(|m| m.number() == number)
    }

    pub fn of(date: NaiveDate) -> Self {
        // month() is always 1..=12
        Month::from_number(date.month()).unwrap_or(Month::January)
    }

    pub fn all() -> impl Iterator<Item = Month> {
        Month::iter()
    }
}

/// First three characters of a stored month name ("January" -> "Jan").
pub fn abbreviate(name: &str) -> String {
    name.chars().take(3).collect()
}

/// Orders month names by calendar position; unknown names go last,
/// alphabetically among themselves.
pub fn compare_month_names(a: &str, b: &str) -> Ordering {
    match (Month::parse(a), Month::parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// First day of the month `back` months before `date`'s month.
pub fn months_before(date: NaiveDate, back: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - back as i32;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(date)
}
