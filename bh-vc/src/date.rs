// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The `yyyy-MM-dd'T'HH:mm:ss'Z'` representation of credential dates and its
//! conversion to and from JWT `NumericDate` values.

use chrono::{DateTime, Datelike as _, NaiveDateTime, TimeZone as _, Utc};

use crate::NumericDate;

/// The only accepted layout of `issuanceDate` and `expirationDate`: UTC,
/// whole seconds, literal `Z`.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format the given instant, dropping any fraction of a second.
///
/// Returns [`None`] for instants whose year cannot be written with four
/// digits.
pub(crate) fn format_date(date: &DateTime<Utc>) -> Option<String> {
    if !(0..=9999).contains(&date.year()) {
        return None;
    }

    Some(date.format(DATE_FORMAT).to_string())
}

/// Parse a date in the strict [`DATE_FORMAT`].
pub(crate) fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, DATE_FORMAT).ok()?;

    Some(Utc.from_utc_datetime(&naive))
}

pub(crate) fn to_numeric_date(date: &DateTime<Utc>) -> NumericDate {
    date.timestamp()
}

pub(crate) fn from_numeric_date(seconds: NumericDate) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

#[cfg(test)]
mod tests {
    use chrono::Timelike as _;

    use super::*;

    #[test]
    fn format_uses_literal_z_and_whole_seconds() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let with_millis = date.with_nanosecond(250_000_000).unwrap();

        assert_eq!(format_date(&date).unwrap(), "2024-01-01T00:00:00Z");
        assert_eq!(format_date(&with_millis).unwrap(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn five_digit_year_is_unformattable() {
        let date = Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(format_date(&date), None);
    }

    #[test]
    fn parse_is_strict() {
        assert_eq!(
            parse_date("2024-02-01T00:00:00Z"),
            Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("2024-02-01T00:00:00+01:00"), None);
        assert_eq!(parse_date("2024-02-01T00:00:00.5Z"), None);
        assert_eq!(parse_date("2024-02-01"), None);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn numeric_date_is_unix_seconds() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(to_numeric_date(&date), 1_704_067_200);
        assert_eq!(from_numeric_date(1_704_067_200), Some(date));
    }
}
