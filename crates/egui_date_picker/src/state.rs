use chrono::{Datelike as _, Duration, NaiveDate};
use egui::{Context, Id};

use crate::{DateFormat, DayCellId, DisplayedMonth, ParseDateError, SelectedDate, SelectionMarker};

/// The state of a [`crate::DatePicker`], kept in egui memory between frames.
///
/// Only temporary memory is used, so nothing survives a restart of the app.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// let mut value = String::new();
/// let output = egui_date_picker::DatePicker::new(&mut value).show(ui);
/// if let Some(mut state) = egui_date_picker::DatePickerState::load(ui.ctx(), output.id) {
///     state.open_calendar();
///     state.store(ui.ctx(), output.id);
/// }
/// # });
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DatePickerState {
    selected: Option<SelectedDate>,
    displayed: DisplayedMonth,
    marker: SelectionMarker,
    error_message: Option<String>,
    calendar_open: bool,

    /// Day of the displayed month that arrow keys move around.
    cursor: Option<u32>,

    /// The host's text as of the end of the last frame.
    /// A mismatch means the host changed it behind our back.
    last_value: Option<String>,
}

impl DatePickerState {
    /// Start out showing `displayed`, with nothing selected.
    pub fn new(displayed: DisplayedMonth) -> Self {
        Self {
            displayed,
            ..Default::default()
        }
    }

    pub fn load(ctx: &Context, id: Id) -> Option<Self> {
        ctx.data_mut(|d| d.get_temp(id))
    }

    pub fn store(self, ctx: &Context, id: Id) {
        ctx.data_mut(|d| d.insert_temp(id, self));
    }

    // ------------------------------------------------------------------------
    // Accessors:

    pub fn selected(&self) -> Option<SelectedDate> {
        self.selected
    }

    pub fn displayed_month(&self) -> DisplayedMonth {
        self.displayed
    }

    pub fn marker(&self) -> SelectionMarker {
        self.marker
    }

    /// Set after text that does not parse was typed, with validation turned on.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_calendar_open(&self) -> bool {
        self.calendar_open
    }

    /// The day with keyboard focus, if the calendar is open.
    pub fn keyboard_cursor(&self) -> Option<u32> {
        self.cursor.filter(|_| self.calendar_open)
    }

    // ------------------------------------------------------------------------
    // Selection:

    /// The user clicked the cell for `day` of the displayed month.
    ///
    /// Selects it, closes the calendar, and returns the text to show in the input.
    /// `None` if the displayed month has no such day.
    pub fn select_day(&mut self, day: u32, format: &DateFormat) -> Option<String> {
        let cell = self.displayed.cell(day)?;
        let date = self.displayed.date(day)?;

        self.selected = Some(cell.selected_date());
        self.marker = SelectionMarker::selected(cell);
        self.error_message = None;
        self.close_calendar();

        log::debug!("Picked {date} from the calendar");
        Some(format.format(date))
    }

    /// The user edited the text field.
    ///
    /// On success the selection and the displayed month follow the typed date.
    /// On failure the previous selection is kept, and with `validation` on a message is shown.
    /// Blank text clears the message and leaves the selection alone.
    ///
    /// # Errors
    /// The parse error, which has already been turned into a message if `validation` is set.
    pub fn on_text_changed(
        &mut self,
        text: &str,
        format: &DateFormat,
        validation: bool,
    ) -> Result<SelectedDate, ParseDateError> {
        self.last_value = Some(text.to_owned());

        match format.parse(text) {
            Ok(date) => {
                self.select_date(date);
                self.error_message = None;
                Ok(SelectedDate::from(date))
            }
            Err(err) => {
                self.error_message = match &err {
                    ParseDateError::Empty => None,
                    ParseDateError::Mismatch { hint, .. } if validation => {
                        Some(format!("Please enter a date as {hint}"))
                    }
                    ParseDateError::Mismatch { .. } => None,
                };
                log::trace!("Ignoring typed text: {err}");
                Err(err)
            }
        }
    }

    /// Pick up a value the host assigned directly.
    ///
    /// Parses silently: an unparsable value leaves the state as it is.
    pub fn sync_external(&mut self, text: &str, format: &DateFormat) {
        self.last_value = Some(text.to_owned());
        if let Ok(date) = format.parse(text) {
            self.select_date(date);
            self.error_message = None;
        }
    }

    /// Returns `true` if `text` differs from what the picker saw at the end of the last frame.
    pub fn value_changed_externally(&self, text: &str) -> bool {
        self.last_value.as_deref() != Some(text)
    }

    pub(crate) fn remember_value(&mut self, text: &str) {
        if self.last_value.as_deref() != Some(text) {
            self.last_value = Some(text.to_owned());
        }
    }

    fn select_date(&mut self, date: NaiveDate) {
        self.selected = Some(SelectedDate::from(date));
        self.show_month(DisplayedMonth::containing(date));
    }

    // ------------------------------------------------------------------------
    // Navigation:

    /// Show another month. Does not change the selected date.
    pub fn show_month(&mut self, month: DisplayedMonth) {
        if month != self.displayed {
            log::debug!("Showing {} {}", month.month_name(), month.year());
        }
        self.displayed = month;
        self.refresh_marker();
        if let Some(cursor) = self.cursor {
            self.cursor = Some(cursor.min(month.days_in_month()));
        }
    }

    pub fn show_next_month(&mut self) {
        self.show_month(self.displayed.next());
    }

    pub fn show_previous_month(&mut self) {
        self.show_month(self.displayed.previous());
    }

    /// Keep the marker pointing into the displayed month.
    fn refresh_marker(&mut self) {
        self.marker = match self.selected {
            Some(selected) if self.displayed.contains(selected) => self
                .displayed
                .cell(selected.date)
                .map_or_else(SelectionMarker::default, SelectionMarker::selected),
            _ => SelectionMarker {
                cell: self.marker.cell,
                is_selected: false,
            },
        };
    }

    // ------------------------------------------------------------------------
    // Visibility:

    pub fn toggle_calendar(&mut self) {
        if self.calendar_open {
            self.close_calendar();
        } else {
            self.open_calendar();
        }
    }

    /// Opens the calendar, putting the keyboard cursor on the selected day if it is visible.
    pub fn open_calendar(&mut self) {
        if !self.calendar_open {
            log::debug!("Opening calendar");
        }
        self.calendar_open = true;
        self.cursor = Some(match self.selected {
            Some(selected) if self.displayed.contains(selected) => selected.date,
            _ => 1,
        });
    }

    pub fn close_calendar(&mut self) {
        if self.calendar_open {
            log::debug!("Closing calendar");
        }
        self.calendar_open = false;
        self.cursor = None;
    }

    /// Escape was pressed. Returns `true` if this closed the calendar,
    /// in which case focus should go back to the text field.
    pub fn on_escape(&mut self) -> bool {
        let was_open = self.calendar_open;
        self.close_calendar();
        was_open
    }

    // ------------------------------------------------------------------------
    // Keyboard navigation:

    /// Move the keyboard cursor by `days`, following it into neighboring months.
    pub fn move_cursor(&mut self, days: i64) {
        if !self.calendar_open {
            return;
        }
        let day = self.cursor.unwrap_or(1);
        let Some(target) = self
            .displayed
            .date(day)
            .and_then(|date| date.checked_add_signed(Duration::days(days)))
        else {
            return;
        };

        let month = DisplayedMonth::containing(target);
        if month != self.displayed {
            self.show_month(month);
        }
        self.cursor = Some(target.day());
    }

    /// Select the day under the keyboard cursor, as if it had been clicked.
    pub fn activate_cursor(&mut self, format: &DateFormat) -> Option<String> {
        let day = self.keyboard_cursor()?;
        self.select_day(day, format)
    }

    /// The cell under the keyboard cursor.
    pub fn cursor_cell(&self) -> Option<DayCellId> {
        self.keyboard_cursor()
            .and_then(|day| self.displayed.cell(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn january_2021() -> DatePickerState {
        DatePickerState::new(DisplayedMonth::new(2021, 0).unwrap())
    }

    fn date(year: i32, month: u32, date: u32) -> SelectedDate {
        SelectedDate { year, month, date }
    }

    #[test]
    fn clicking_a_day_selects_it() {
        let format = DateFormat::default();
        let mut state = january_2021();
        state.open_calendar();

        let text = state.select_day(1, &format);
        assert_eq!(text.as_deref(), Some("2021-01-01"));
        assert_eq!(state.selected(), Some(date(2021, 1, 1)));

        let cell = state.displayed_month().cell(1).unwrap();
        assert_eq!(state.marker(), SelectionMarker::selected(cell));
        assert!(!state.is_calendar_open());
    }

    #[test]
    fn clicking_a_missing_day_does_nothing() {
        let mut state = DatePickerState::new(DisplayedMonth::new(2021, 1).unwrap());
        assert_eq!(state.select_day(29, &DateFormat::default()), None);
        assert_eq!(state.selected(), None);
        assert_eq!(state.marker(), SelectionMarker::default());
    }

    #[test]
    fn typing_a_valid_date() {
        let format = DateFormat::new("%d/%m/%Y").unwrap();
        let mut state = january_2021();

        assert_eq!(
            state.on_text_changed("12/03/2022", &format, true),
            Ok(date(2022, 3, 12))
        );
        assert_eq!(state.selected(), Some(date(2022, 3, 12)));
        assert_eq!(state.displayed_month(), DisplayedMonth::new(2022, 2).unwrap());
        assert!(state.marker().is_selected);
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn typing_garbage_keeps_the_selection() {
        let format = DateFormat::default();
        let mut state = january_2021();
        state.select_day(15, &format);

        assert!(state.on_text_changed("2021-01-1x", &format, true).is_err());
        assert_eq!(state.selected(), Some(date(2021, 1, 15)));
        assert_eq!(
            state.error_message(),
            Some("Please enter a date as YYYY-MM-DD")
        );

        // Fixing the text clears the message:
        assert!(state.on_text_changed("2021-01-16", &format, true).is_ok());
        assert_eq!(state.error_message(), None);
        assert_eq!(state.selected(), Some(date(2021, 1, 16)));
    }

    #[test]
    fn no_message_without_validation() {
        let format = DateFormat::default();
        let mut state = january_2021();
        assert!(state.on_text_changed("tomorrow", &format, false).is_err());
        assert_eq!(state.error_message(), None);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn blank_text_clears_the_message() {
        let format = DateFormat::default();
        let mut state = january_2021();
        assert!(state.on_text_changed("2021", &format, true).is_err());
        assert!(state.error_message().is_some());

        assert_eq!(
            state.on_text_changed("", &format, true),
            Err(ParseDateError::Empty)
        );
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn navigation_keeps_the_selection() {
        let format = DateFormat::default();
        let mut state = DatePickerState::new(DisplayedMonth::new(2021, 11).unwrap());
        state.select_day(24, &format);

        state.show_next_month();
        assert_eq!(state.displayed_month(), DisplayedMonth::new(2022, 0).unwrap());
        assert_eq!(state.selected(), Some(date(2021, 12, 24)));
        assert!(!state.marker().is_selected);

        state.show_previous_month();
        assert!(state.marker().is_selected);
        assert_eq!(state.marker().cell.map(|cell| cell.day), Some(24));
    }

    #[test]
    fn external_values_sync_silently() {
        let format = DateFormat::default();
        let mut state = january_2021();
        assert!(state.value_changed_externally("2020-02-29"));

        state.sync_external("2020-02-29", &format);
        assert_eq!(state.selected(), Some(date(2020, 2, 29)));
        assert!(!state.value_changed_externally("2020-02-29"));

        state.sync_external("not a date", &format);
        assert_eq!(state.selected(), Some(date(2020, 2, 29)));
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn escape_closes() {
        let mut state = january_2021();
        assert!(!state.on_escape());

        state.toggle_calendar();
        assert!(state.is_calendar_open());
        assert!(state.on_escape());
        assert!(!state.is_calendar_open());
    }

    #[test]
    fn cursor_starts_on_the_selection() {
        let format = DateFormat::default();
        let mut state = january_2021();
        state.open_calendar();
        assert_eq!(state.keyboard_cursor(), Some(1));

        state.select_day(20, &format);
        state.open_calendar();
        assert_eq!(state.keyboard_cursor(), Some(20));

        state.close_calendar();
        assert_eq!(state.keyboard_cursor(), None);
    }

    #[test]
    fn cursor_crosses_month_boundaries() {
        let format = DateFormat::default();
        let mut state = january_2021();
        state.open_calendar();

        state.move_cursor(-1);
        assert_eq!(state.displayed_month(), DisplayedMonth::new(2020, 11).unwrap());
        assert_eq!(state.keyboard_cursor(), Some(31));

        state.move_cursor(7);
        assert_eq!(state.displayed_month(), DisplayedMonth::new(2021, 0).unwrap());
        assert_eq!(state.keyboard_cursor(), Some(7));

        assert_eq!(state.activate_cursor(&format).as_deref(), Some("2021-01-07"));
        assert_eq!(state.selected(), Some(date(2021, 1, 7)));
        assert!(!state.is_calendar_open());
    }

    #[test]
    fn cursor_ignored_while_closed() {
        let mut state = january_2021();
        state.move_cursor(3);
        assert_eq!(state.keyboard_cursor(), None);
        assert_eq!(state.activate_cursor(&DateFormat::default()), None);
    }
}
