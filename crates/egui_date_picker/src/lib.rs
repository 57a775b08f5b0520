//! A date input for [`egui`](https://github.com/emilk/egui): a text field with a calendar popup.
//!
//! The text and the calendar are kept in sync: picking a day writes it into the text
//! using a [`chrono::format::strftime`] pattern, and typing a date in that pattern selects it.
//!
//! ```
//! # egui::__run_test_ui(|ui| {
//! let mut date = "2021-01-01".to_owned();
//! ui.add(egui_date_picker::DatePicker::new(&mut date));
//! # });
//! ```
//!
//! The pieces are usable on their own as well:
//! [`CalendarGrid`] draws a month, [`MonthNavigator`] pages through months,
//! and [`month_grid`] does the underlying layout without any ui.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

#![forbid(unsafe_code)]

mod calendar;
mod format;
mod grid;
mod navigator;
mod picker;
mod state;

pub use crate::{
    calendar::{
        CalendarCell, DAYS_PER_WEEK, DayCellId, DisplayedMonth, SelectedDate, SelectionMarker,
        WEEKDAY_NAMES, days_in_month, first_weekday_index, month_grid, weekday_abbreviation,
    },
    format::{DEFAULT_FORMAT, DateFormat, DateFormatError, ParseDateError},
    grid::CalendarGrid,
    navigator::MonthNavigator,
    picker::{DatePicker, DatePickerOutput},
    state::DatePickerState,
};
