// Pricing calendar: the set of days the operator has ticked, how existing room
// rules map onto days, and turning a selection into a room update.

use crate::date_ranges::{consolidate, DateRange, DayKey};
use crate::models::{ExcludedDateRange, PriceDecreaseRange, PriceIncreaseRange, Room, UpdateRoomRequest};
use crate::validation::{MAX_DECREASE_PERCENT, MAX_INCREASE_PERCENT};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

// Days currently ticked in the calendar view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySelection {
    days: BTreeSet<DayKey>,
}

impl DaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_days<I: IntoIterator<Item = DayKey>>(days: I) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    // Ticking a day fills the gap between the earliest and latest selected day,
    // so a second tick always produces one continuous block. Unticking removes
    // that single day only and may split the block.
    pub fn toggle(&mut self, day: DayKey, checked: bool) {
        if !checked {
            self.days.remove(&day);
            return;
        }

        self.days.insert(day);
        if self.days.len() > 1 {
            if let (Some(first), Some(last)) = (self.first(), self.last()) {
                if let Ok(span) = DateRange::new(first, last) {
                    self.days.extend(span.days());
                }
            }
        }
    }

    // Replace the selection with every day of `span` (drag selection).
    pub fn select_span(&mut self, span: DateRange) {
        self.days = span.days().collect();
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn contains(&self, day: &DayKey) -> bool {
        self.days.contains(day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first(&self) -> Option<DayKey> {
        self.days.first().copied()
    }

    pub fn last(&self) -> Option<DayKey> {
        self.days.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayKey> {
        self.days.iter()
    }

    pub fn to_ranges(&self) -> Vec<DateRange> {
        consolidate(self.days.iter().copied())
    }
}

impl FromIterator<DayKey> for DaySelection {
    fn from_iter<I: IntoIterator<Item = DayKey>>(iter: I) -> Self {
        Self::from_days(iter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
    PriceIncrease,
    PriceDecrease,
    Excluded,
}

// One room rule as drawn on the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMark {
    pub kind: RangeKind,
    pub range: DateRange,
    pub value: Option<f64>,
    pub range_id: Option<i64>,
}

// Exclusions first, then increases, then decreases.
pub fn room_marks(room: &Room) -> Vec<CalendarMark> {
    let excluded = room.excluded_date_ranges.iter().map(|r| CalendarMark {
        kind: RangeKind::Excluded,
        range: r.range,
        value: None,
        range_id: r.id,
    });
    let increases = room.price_increase_ranges.iter().map(|r| CalendarMark {
        kind: RangeKind::PriceIncrease,
        range: r.range,
        value: Some(r.increase_value),
        range_id: r.id,
    });
    let decreases = room.price_decrease_ranges.iter().map(|r| CalendarMark {
        kind: RangeKind::PriceDecrease,
        range: r.range,
        value: Some(r.decrease_value),
        range_id: r.id,
    });

    excluded.chain(increases).chain(decreases).collect()
}

// Rules of a room that cover one particular day; the first matching range of
// each kind wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayMarks {
    pub increase: Option<CalendarMark>,
    pub decrease: Option<CalendarMark>,
    pub excluded: Option<CalendarMark>,
}

impl DayMarks {
    pub fn is_excluded(&self) -> bool {
        self.excluded.is_some()
    }

    pub fn is_plain(&self) -> bool {
        self.increase.is_none() && self.decrease.is_none() && self.excluded.is_none()
    }
}

pub fn day_marks(room: &Room, day: &DayKey) -> DayMarks {
    let mut marks = DayMarks::default();
    for mark in room_marks(room) {
        if !mark.range.contains(day) {
            continue;
        }
        let slot = match mark.kind {
            RangeKind::PriceIncrease => &mut marks.increase,
            RangeKind::PriceDecrease => &mut marks.decrease,
            RangeKind::Excluded => &mut marks.excluded,
        };
        if slot.is_none() {
            *slot = Some(mark);
        }
    }
    marks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentDirection {
    Increase,
    Decrease,
}

impl AdjustmentDirection {
    pub fn opposite(&self) -> Self {
        match self {
            AdjustmentDirection::Increase => AdjustmentDirection::Decrease,
            AdjustmentDirection::Decrease => AdjustmentDirection::Increase,
        }
    }

    pub fn max_percent(&self) -> f64 {
        match self {
            AdjustmentDirection::Increase => MAX_INCREASE_PERCENT,
            AdjustmentDirection::Decrease => MAX_DECREASE_PERCENT,
        }
    }
}

impl fmt::Display for AdjustmentDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentDirection::Increase => write!(f, "increase"),
            AdjustmentDirection::Decrease => write!(f, "decrease"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdjustmentError {
    #[error("No days selected")]
    EmptySelection,

    #[error("{direction} value must be greater than 0 and at most {max} percent, got {value}")]
    InvalidValue {
        direction: AdjustmentDirection,
        value: f64,
        max: f64,
    },

    #[error("{} selected day(s) already have a {} applied", .days.len(), .direction.opposite())]
    Conflict {
        direction: AdjustmentDirection,
        days: Vec<DayKey>,
    },
}

// Selected days that already carry a price rule in the opposite direction.
pub fn find_conflicts(
    selection: &DaySelection,
    room: &Room,
    direction: AdjustmentDirection,
) -> Vec<DayKey> {
    let opposite: Vec<DateRange> = match direction {
        AdjustmentDirection::Increase => room.price_decrease_ranges.iter().map(|r| r.range).collect(),
        AdjustmentDirection::Decrease => room.price_increase_ranges.iter().map(|r| r.range).collect(),
    };

    selection
        .iter()
        .filter(|day| opposite.iter().any(|r| r.contains(day)))
        .copied()
        .collect()
}

// A percentage price change to apply to the selected days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceAdjustment {
    direction: AdjustmentDirection,
    percent: f64,
}

impl PriceAdjustment {
    pub fn new(direction: AdjustmentDirection, percent: f64) -> Result<Self, AdjustmentError> {
        let max = direction.max_percent();
        // Whole percents only; the fraction is dropped after the bounds check.
        let whole = percent.trunc();
        if !(percent > 0.0 && percent <= max && whole >= 1.0) {
            return Err(AdjustmentError::InvalidValue {
                direction,
                value: percent,
                max,
            });
        }
        Ok(Self {
            direction,
            percent: whole,
        })
    }

    pub fn increase(percent: f64) -> Result<Self, AdjustmentError> {
        Self::new(AdjustmentDirection::Increase, percent)
    }

    pub fn decrease(percent: f64) -> Result<Self, AdjustmentError> {
        Self::new(AdjustmentDirection::Decrease, percent)
    }

    pub fn direction(&self) -> AdjustmentDirection {
        self.direction
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    // Build the room update carrying one range per contiguous block of the
    // selection. When the current room is known, days already adjusted in
    // the other direction are rejected.
    pub fn to_update(
        &self,
        selection: &DaySelection,
        room: Option<&Room>,
    ) -> Result<UpdateRoomRequest, AdjustmentError> {
        if selection.is_empty() {
            return Err(AdjustmentError::EmptySelection);
        }

        if let Some(room) = room {
            let days = find_conflicts(selection, room, self.direction);
            if !days.is_empty() {
                return Err(AdjustmentError::Conflict {
                    direction: self.direction,
                    days,
                });
            }
        }

        let ranges = selection.to_ranges();
        let mut update = UpdateRoomRequest::default();
        match self.direction {
            AdjustmentDirection::Increase => {
                update.price_increase_ranges = ranges
                    .into_iter()
                    .map(|r| PriceIncreaseRange::new(r, self.percent))
                    .collect();
            }
            AdjustmentDirection::Decrease => {
                update.price_decrease_ranges = ranges
                    .into_iter()
                    .map(|r| PriceDecreaseRange::new(r, self.percent))
                    .collect();
            }
        }
        Ok(update)
    }
}

// Room update marking every selected day unavailable.
pub fn exclusion_update(selection: &DaySelection) -> Result<UpdateRoomRequest, AdjustmentError> {
    if selection.is_empty() {
        return Err(AdjustmentError::EmptySelection);
    }
    Ok(UpdateRoomRequest {
        excluded_date_ranges: selection
            .to_ranges()
            .into_iter()
            .map(ExcludedDateRange::from)
            .collect(),
        ..Default::default()
    })
}
