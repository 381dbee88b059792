// Day keys, inclusive date ranges and the consolidation of selected days into ranges.
// The backend expresses every pricing and availability rule as a list of
// `{StartDate, EndDate}` spans, while the calendar works with single days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    #[error("Invalid date key '{0}': expected YYYY-MM-DD")]
    InvalidDateKey(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: DayKey, end: DayKey },

    #[error("Missing {0}")]
    MissingBound(&'static str),

    #[error(transparent)]
    InvalidKey(#[from] DateKeyError),
}

// A calendar day, serialized as `YYYY-MM-DD`.
// Backed by a `NaiveDate` so day arithmetic never goes through timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    // Strict parse: four-digit year, two-digit month and day, dash separated.
    pub fn parse(key: &str) -> Result<Self, DateKeyError> {
        let bytes = key.as_bytes();
        let well_shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !well_shaped {
            return Err(DateKeyError::InvalidDateKey(key.to_string()));
        }

        NaiveDate::parse_from_str(key, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DateKeyError::InvalidDateKey(key.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    // Whole days from `self` to `other`; negative when `other` is earlier.
    pub fn days_until(&self, other: &DayKey) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DayKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

// Wire shape of a range. Requests use PascalCase, room payloads coming back
// from the API use camelCase. Both spellings are separate fields so the
// struct also works when flattened into a range payload.
#[derive(Debug, Deserialize)]
struct RawDateRange {
    #[serde(rename = "StartDate", default)]
    start_pascal: Option<DayKey>,
    #[serde(rename = "startDate", default)]
    start_camel: Option<DayKey>,
    #[serde(rename = "EndDate", default)]
    end_pascal: Option<DayKey>,
    #[serde(rename = "endDate", default)]
    end_camel: Option<DayKey>,
}

// Inclusive, contiguous span of days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    #[serde(rename = "StartDate")]
    start: DayKey,
    #[serde(rename = "EndDate")]
    end: DayKey,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = RangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        let start = raw
            .start_pascal
            .or(raw.start_camel)
            .ok_or(RangeError::MissingBound("StartDate"))?;
        let end = raw
            .end_pascal
            .or(raw.end_camel)
            .ok_or(RangeError::MissingBound("EndDate"))?;
        DateRange::new(start, end)
    }
}

impl DateRange {
    pub fn new(start: DayKey, end: DayKey) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(day: DayKey) -> Self {
        Self { start: day, end: day }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, RangeError> {
        Self::new(DayKey::parse(start)?, DayKey::parse(end)?)
    }

    pub fn start(&self) -> DayKey {
        self.start
    }

    pub fn end(&self) -> DayKey {
        self.end
    }

    pub fn contains(&self, day: &DayKey) -> bool {
        self.start <= *day && *day <= self.end
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn len_days(&self) -> i64 {
        self.start.days_until(&self.end) + 1
    }

    pub fn days(&self) -> impl Iterator<Item = DayKey> {
        let end = self.end;
        self.start
            .date()
            .iter_days()
            .take_while(move |d| *d <= end.date())
            .map(DayKey)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

// Collapse a set of days into the minimal ascending list of contiguous ranges.
// Duplicates are ignored. Each day is compared with the previous day in
// sorted order: a difference of exactly one day extends the open range,
// anything larger closes it.
pub fn consolidate<I>(days: I) -> Vec<DateRange>
where
    I: IntoIterator<Item = DayKey>,
{
    let sorted: BTreeSet<DayKey> = days.into_iter().collect();
    let mut iter = sorted.into_iter();

    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut start = first;
    let mut prev = first;

    for day in iter {
        if prev.days_until(&day) != 1 {
            ranges.push(DateRange { start, end: prev });
            start = day;
        }
        prev = day;
    }
    ranges.push(DateRange { start, end: prev });

    ranges
}

// Parse day keys and consolidate them. Fails on the first malformed key.
pub fn consolidate_keys<I, S>(keys: I) -> Result<Vec<DateRange>, DateKeyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let days = keys
        .into_iter()
        .map(|k| DayKey::parse(k.as_ref()))
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(consolidate(days))
}

// Every day covered by the given ranges.
pub fn expand_ranges<'a, I>(ranges: I) -> BTreeSet<DayKey>
where
    I: IntoIterator<Item = &'a DateRange>,
{
    ranges.into_iter().flat_map(|r| r.days()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn key(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn pairs(ranges: &[DateRange]) -> Vec<(String, String)> {
        ranges
            .iter()
            .map(|r| (r.start().to_string(), r.end().to_string()))
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_ranges() {
        assert!(consolidate(Vec::<DayKey>::new()).is_empty());
        assert!(consolidate_keys(Vec::<&str>::new()).unwrap().is_empty());
    }

    #[test_case(&["2024-03-10"], &[("2024-03-10", "2024-03-10")]; "single day")]
    #[test_case(&["2024-03-10", "2024-03-11", "2024-03-12"], &[("2024-03-10", "2024-03-12")]; "contiguous run")]
    #[test_case(&["2024-03-10", "2024-03-11", "2024-03-20"], &[("2024-03-10", "2024-03-11"), ("2024-03-20", "2024-03-20")]; "two disjoint runs")]
    #[test_case(&["2024-01-31", "2024-02-01"], &[("2024-01-31", "2024-02-01")]; "month boundary")]
    #[test_case(&["2023-12-31", "2024-01-01"], &[("2023-12-31", "2024-01-01")]; "year boundary")]
    #[test_case(&["2024-02-28", "2024-02-29", "2024-03-01"], &[("2024-02-28", "2024-03-01")]; "leap day")]
    #[test_case(&["2023-02-28", "2023-03-01"], &[("2023-02-28", "2023-03-01")]; "non leap february")]
    #[test_case(&["2024-03-12", "2024-03-10", "2024-03-11", "2024-03-10"], &[("2024-03-10", "2024-03-12")]; "unsorted with duplicate")]
    fn test_consolidate_keys(input: &[&str], expected: &[(&str, &str)]) {
        let ranges = consolidate_keys(input).unwrap();
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(s, e)| (s.to_string(), e.to_string()))
            .collect();
        assert_eq!(pairs(&ranges), expected);
    }

    #[test_case("2024-3-10"; "unpadded month")]
    #[test_case("2024-02-30"; "impossible day")]
    #[test_case("10/03/2024"; "wrong format")]
    #[test_case(""; "empty")]
    #[test_case("2024-03-10T00:00:00"; "timestamp")]
    fn test_invalid_keys_fail_fast(bad: &str) {
        let result = consolidate_keys(["2024-03-10", bad]);
        assert_eq!(result, Err(DateKeyError::InvalidDateKey(bad.to_string())));
    }

    #[test]
    fn test_date_range_rejects_end_before_start() {
        let err = DateRange::parse("2024-03-12", "2024-03-10").unwrap_err();
        assert!(matches!(err, RangeError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_range_helpers() {
        let range = DateRange::parse("2024-02-27", "2024-03-02").unwrap();
        assert_eq!(range.len_days(), 5);
        assert!(range.contains(&key("2024-02-29")));
        assert!(!range.contains(&key("2024-03-03")));
        assert_eq!(range.days().count(), 5);
        assert!(range.overlaps(&DateRange::single(key("2024-03-02"))));
        assert!(!range.overlaps(&DateRange::single(key("2024-03-03"))));
        assert_eq!(range.to_string(), "2024-02-27..=2024-03-02");
    }

    #[test]
    fn test_range_serializes_with_pascal_case_fields() {
        let range = DateRange::parse("2024-03-10", "2024-03-12").unwrap();
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"StartDate": "2024-03-10", "EndDate": "2024-03-12"})
        );
    }

    #[test]
    fn test_range_deserializes_camel_case_and_validates() {
        let range: DateRange =
            serde_json::from_str(r#"{"startDate":"2024-03-10","endDate":"2024-03-11"}"#).unwrap();
        assert_eq!(range.start(), key("2024-03-10"));

        let bad = serde_json::from_str::<DateRange>(
            r#"{"StartDate":"2024-03-11","EndDate":"2024-03-10"}"#,
        );
        assert!(bad.is_err());

        let missing = serde_json::from_str::<DateRange>(r#"{"StartDate":"2024-03-11"}"#);
        assert!(missing.unwrap_err().to_string().contains("Missing EndDate"));
    }

    fn arb_days() -> impl Strategy<Value = Vec<DayKey>> {
        let base = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        proptest::collection::vec(0i64..500, 0..120).prop_map(move |offsets| {
            offsets
                .into_iter()
                .map(|o| DayKey::new(base + chrono::Duration::days(o)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn coverage_matches_input(days in arb_days()) {
            let ranges = consolidate(days.clone());
            let expected: BTreeSet<DayKey> = days.into_iter().collect();
            prop_assert_eq!(expand_ranges(&ranges), expected);
        }

        #[test]
        fn ranges_are_ordered_and_separated(days in arb_days()) {
            let ranges = consolidate(days);
            for pair in ranges.windows(2) {
                prop_assert!(pair[0].start() <= pair[0].end());
                prop_assert!(pair[0].end().days_until(&pair[1].start()) >= 2);
            }
        }

        #[test]
        fn input_order_is_irrelevant(mut days in arb_days()) {
            let forward = consolidate(days.clone());
            days.reverse();
            prop_assert_eq!(consolidate(days), forward);
        }

        #[test]
        fn consolidation_is_idempotent(days in arb_days()) {
            let once = consolidate(days);
            let twice = consolidate(expand_ranges(&once));
            prop_assert_eq!(once, twice);
        }
    }
}
