//! Calendar arithmetic: which weekday a month starts on, and how its days fall into weeks.
//!
//! Everything here is pure and independent of `egui`, so it can be tested without a [`egui::Context`].

use chrono::{Datelike as _, Local, Months, NaiveDate};

/// Number of columns in a calendar week.
pub const DAYS_PER_WEEK: usize = 7;

/// Weekday names in grid column order, Sunday first.
pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Three-letter abbreviation of a weekday name, as shown in the grid header.
pub fn weekday_abbreviation(name: &str) -> &str {
    name.get(..3).unwrap_or(name)
}

/// Weekday of the 1st of the month, `0` being Sunday and `6` Saturday.
///
/// `month0` is 0-based. Returns `None` for a month outside of what [`NaiveDate`] can represent.
pub fn first_weekday_index(year: i32, month0: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, 1)?;
    Some(first.weekday().num_days_from_sunday())
}

/// Number of days in the given month, leap years included.
///
/// `month0` is 0-based.
pub fn days_in_month(year: i32, month0: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, 1)?;
    let days = match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // December of the last year chrono knows about.
        None => 31,
    };
    Some(days)
}

// ----------------------------------------------------------------------------

/// A date picked by the user.
///
/// Unlike [`DisplayedMonth`], `month` is 1-based here, matching the formatted text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SelectedDate {
    pub year: i32,

    /// 1-12
    pub month: u32,

    /// Day of the month, starting at 1.
    pub date: u32,
}

impl SelectedDate {
    /// `None` if the triple does not name a real day.
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.date)
    }
}

impl From<NaiveDate> for SelectedDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            date: date.day(),
        }
    }
}

impl std::fmt::Display for SelectedDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.date)
    }
}

// ----------------------------------------------------------------------------

/// Identifies one rendered day cell of the calendar grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DayCellId {
    pub year: i32,

    /// 0-11
    pub month0: u32,

    /// Day of the month, starting at 1.
    pub day: u32,
}

impl DayCellId {
    /// The date you get by clicking this cell.
    pub fn selected_date(self) -> SelectedDate {
        SelectedDate {
            year: self.year,
            month: self.month0 + 1,
            date: self.day,
        }
    }
}

/// Which day cell shows the "selected" visual state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SelectionMarker {
    /// The cell that was last marked, if any.
    pub cell: Option<DayCellId>,

    /// Only `true` while [`Self::cell`] is part of the displayed month.
    pub is_selected: bool,
}

impl SelectionMarker {
    pub fn selected(cell: DayCellId) -> Self {
        Self {
            cell: Some(cell),
            is_selected: true,
        }
    }

    /// Should this cell be drawn as selected?
    pub fn is_cell_selected(&self, cell: DayCellId) -> bool {
        self.is_selected && self.cell == Some(cell)
    }
}

// ----------------------------------------------------------------------------

/// The month currently rendered in the calendar grid.
///
/// Independent of the selection: the user may browse months without picking a day.
/// The fields are private so that [`Self::days_in_month`] always agrees with the year and month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MonthKey", into = "MonthKey"))]
pub struct DisplayedMonth {
    year: i32,
    month0: u32,
    days_in_month: u32,
}

impl DisplayedMonth {
    /// `month0` is 0-based. Returns `None` for an invalid month.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        let days_in_month = days_in_month(year, month0)?;
        Some(Self {
            year,
            month0,
            days_in_month,
        })
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
            days_in_month: days_in_month(date.year(), date.month0()).unwrap_or(31),
        }
    }

    /// The current month in the local timezone.
    pub fn today() -> Self {
        Self::containing(Local::now().date_naive())
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-11
    #[inline]
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// 1-12
    #[inline]
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    #[inline]
    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    /// English name of the month, e.g. `"January"`.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    /// Weekday of the 1st, `0` being Sunday.
    pub fn first_weekday_index(&self) -> u32 {
        first_weekday_index(self.year, self.month0).unwrap_or(0)
    }

    /// The given day of this month, if it exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month(), day)
    }

    /// The grid cell for `day`, if this month has such a day.
    pub fn cell(&self, day: u32) -> Option<DayCellId> {
        (1..=self.days_in_month).contains(&day).then_some(DayCellId {
            year: self.year,
            month0: self.month0,
            day,
        })
    }

    pub fn contains(&self, date: SelectedDate) -> bool {
        date.year == self.year && date.month == self.month()
    }

    pub fn contains_cell(&self, cell: DayCellId) -> bool {
        cell.year == self.year && cell.month0 == self.month0 && cell.day <= self.days_in_month
    }

    /// The following month, wrapping December into January of the next year.
    pub fn next(&self) -> Self {
        self.add_months(1)
    }

    /// The preceding month, wrapping January into December of the previous year.
    pub fn previous(&self) -> Self {
        self.add_months(-1)
    }

    /// Move by `delta` months.
    ///
    /// Saturates at the ends of the range chrono can represent.
    pub fn add_months(&self, delta: i32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month0) + i64::from(delta);
        let year = i32::try_from(total.div_euclid(12));
        let month0 = total.rem_euclid(12) as u32;
        year.ok()
            .and_then(|year| Self::new(year, month0))
            .unwrap_or(*self)
    }
}

impl Default for DisplayedMonth {
    fn default() -> Self {
        Self::today()
    }
}

/// The serialized form of a [`DisplayedMonth`]; the day count is recomputed on load.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize, serde::Serialize)]
struct MonthKey {
    year: i32,
    month0: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<MonthKey> for DisplayedMonth {
    type Error = String;

    fn try_from(key: MonthKey) -> Result<Self, Self::Error> {
        Self::new(key.year, key.month0)
            .ok_or_else(|| format!("invalid month {}-{}", key.year, key.month0.saturating_add(1)))
    }
}

#[cfg(feature = "serde")]
impl From<DisplayedMonth> for MonthKey {
    fn from(month: DisplayedMonth) -> Self {
        Self {
            year: month.year,
            month0: month.month0,
        }
    }
}

// ----------------------------------------------------------------------------

/// One position in the calendar grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarCell {
    /// Placeholder before the 1st of the month.
    Blank,

    /// Day of the month, starting at 1.
    Day(u32),
}

/// Lay out a month as weeks of [`DAYS_PER_WEEK`] cells.
///
/// The month starts with one [`CalendarCell::Blank`] per weekday preceding the 1st,
/// followed by the days in order. The last week is not padded.
///
/// ```
/// use egui_date_picker::{CalendarCell, DisplayedMonth, month_grid};
///
/// // 2021-01-01 was a Friday.
/// let january = DisplayedMonth::new(2021, 0).unwrap();
/// let weeks = month_grid(&january);
/// assert_eq!(weeks.len(), 6);
/// assert_eq!(weeks[0][5], CalendarCell::Day(1));
/// ```
pub fn month_grid(month: &DisplayedMonth) -> Vec<Vec<CalendarCell>> {
    let blanks = std::iter::repeat_n(CalendarCell::Blank, month.first_weekday_index() as usize);
    let days = (1..=month.days_in_month()).map(CalendarCell::Day);
    let cells: Vec<CalendarCell> = blanks.chain(days).collect();
    cells.chunks(DAYS_PER_WEEK).map(<[_]>::to_vec).collect()
}
