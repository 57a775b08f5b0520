use chrono::Local;
use egui::{
    Area, Button, Frame, Id, Key, Modifiers, Order, Response, RichText, TextEdit, Ui, UiKind,
    Widget,
};

use crate::{
    CalendarGrid, DEFAULT_FORMAT, DateFormat, DatePickerState, MonthNavigator, SelectedDate,
};

/// Width of the calendar popup.
const CALENDAR_WIDTH: f32 = 230.0;

/// The result of showing a [`DatePicker`].
pub struct DatePickerOutput {
    /// The response of the text field.
    ///
    /// Marked as changed when the text was edited or a day was picked.
    pub response: Response,

    /// The valid date text handed to the host this frame, if any.
    pub emitted: Option<String>,

    /// Where the picker keeps its [`DatePickerState`].
    pub id: Id,

    /// The state as of the end of this frame.
    pub state: DatePickerState,
}

impl DatePickerOutput {
    pub fn selected(&self) -> Option<SelectedDate> {
        self.state.selected()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    pub fn is_calendar_open(&self) -> bool {
        self.state.is_calendar_open()
    }
}

/// A text field for a date, with a button that opens a calendar to pick it from.
///
/// The text is owned by the caller and always holds whatever is in the field.
/// Picking a day writes the date into it in the configured [`format`](Self::format);
/// typing a date in that format selects it in the calendar.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// # let mut birthday = String::new();
/// let output = egui_date_picker::DatePicker::new(&mut birthday)
///     .id_salt("birthday")
///     .format("%d.%m.%Y")
///     .show(ui);
/// if output.emitted.is_some() {
///     // `birthday` now holds a valid date.
/// }
/// # });
/// ```
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct DatePicker<'a> {
    value: &'a mut String,
    id_salt: Option<Id>,
    format: String,
    validation: bool,
    application_mode: bool,
    year_arrows: bool,
    highlight_weekends: bool,
    highlight_today: bool,
    desired_width: Option<f32>,
    on_change: Option<Box<dyn FnMut(&str) + 'a>>,
}

impl<'a> DatePicker<'a> {
    pub fn new(value: &'a mut String) -> Self {
        Self {
            value,
            id_salt: None,
            format: DEFAULT_FORMAT.to_owned(),
            validation: true,
            application_mode: false,
            year_arrows: false,
            highlight_weekends: true,
            highlight_today: true,
            desired_width: None,
            on_change: None,
        }
    }

    /// Must be set if multiple date pickers are in the same Ui.
    #[inline]
    pub fn id_salt(mut self, id_salt: impl std::hash::Hash) -> Self {
        self.id_salt = Some(Id::new(id_salt));
        self
    }

    /// How dates are written in the text field. (Default: `%Y-%m-%d`)
    ///
    /// See [`chrono::format::strftime`] for valid formats.
    /// A format that cannot represent a whole date is logged and replaced by the default.
    #[inline]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Show a message under the field while its text is not a valid date. (Default: true)
    #[inline]
    pub fn validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    /// Let arrow keys move between days while the calendar is open,
    /// and Enter or Space pick the day. (Default: false)
    #[inline]
    pub fn application_mode(mut self, application_mode: bool) -> Self {
        self.application_mode = application_mode;
        self
    }

    /// Show arrows that move the calendar a whole year. (Default: false)
    #[inline]
    pub fn year_arrows(mut self, year_arrows: bool) -> Self {
        self.year_arrows = year_arrows;
        self
    }

    /// Tint Saturdays and Sundays in the calendar. (Default: true)
    #[inline]
    pub fn highlight_weekends(mut self, highlight_weekends: bool) -> Self {
        self.highlight_weekends = highlight_weekends;
        self
    }

    /// Encircle today's date in the calendar. (Default: true)
    #[inline]
    pub fn highlight_today(mut self, highlight_today: bool) -> Self {
        self.highlight_today = highlight_today;
        self
    }

    /// Width of the text field.
    #[inline]
    pub fn desired_width(mut self, desired_width: f32) -> Self {
        self.desired_width = Some(desired_width);
        self
    }

    /// Called with the text whenever a valid date was picked or typed.
    #[inline]
    pub fn on_change(mut self, on_change: impl FnMut(&str) + 'a) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn show(self, ui: &mut Ui) -> DatePickerOutput {
        let Self {
            value,
            id_salt,
            format,
            validation,
            application_mode,
            year_arrows,
            highlight_weekends,
            highlight_today,
            desired_width,
            mut on_change,
        } = self;

        let format = DateFormat::new(format).unwrap_or_else(|err| {
            log::warn!("{err}; using {DEFAULT_FORMAT} instead");
            DateFormat::default()
        });

        let id = ui.make_persistent_id(id_salt);
        let text_id = id.with("text");
        let mut state = DatePickerState::load(ui.ctx(), id).unwrap_or_default();

        if state.value_changed_externally(value) {
            state.sync_external(value, &format);
        }

        // A date that was picked or typed this frame, to hand to the host.
        let mut emitted = None;

        ui.label(RichText::new(format.hint()).italics().small());

        let row = ui.horizontal(|ui| {
            let icon_hover = if state.is_calendar_open() {
                "Close calendar"
            } else {
                "Open calendar"
            };
            let icon = ui
                .add(Button::new("📆").selected(state.is_calendar_open()))
                .on_hover_text(icon_hover);
            if icon.clicked() {
                state.toggle_calendar();
            }

            let mut text_edit = TextEdit::singleline(&mut *value)
                .id(text_id)
                .hint_text(format.hint());
            if let Some(desired_width) = desired_width {
                text_edit = text_edit.desired_width(desired_width);
            }
            let text_response = text_edit.show(ui).response;

            (icon, text_response)
        });
        let (icon, mut response) = row.inner;

        if response.changed() && state.on_text_changed(value, &format, validation).is_ok() {
            // Parsing ignores surrounding whitespace, so the host gets the date without it.
            emitted = Some(value.trim().to_owned());
        }

        if state.is_calendar_open() {
            if application_mode
                && !response.has_focus()
                && let Some(text) = handle_calendar_keys(ui, &mut state, &format)
            {
                emitted = Some(text);
            }

            let today = highlight_today.then(|| Local::now().date_naive());
            let area = Area::new(id.with("calendar"))
                .kind(UiKind::Picker)
                .order(Order::Foreground)
                .fixed_pos(row.response.rect.left_bottom())
                .show(ui.ctx(), |ui| {
                    Frame::popup(ui.style())
                        .show(ui, |ui| {
                            ui.set_min_width(CALENDAR_WIDTH);

                            let mut month = state.displayed_month();
                            if ui
                                .add(MonthNavigator::new(&mut month).year_arrows(year_arrows))
                                .changed()
                            {
                                state.show_month(month);
                            }

                            let marker = state.marker();
                            let cursor = if application_mode {
                                state.keyboard_cursor()
                            } else {
                                None
                            };
                            CalendarGrid::new(state.displayed_month(), &marker)
                                .id_salt(id.with("grid"))
                                .keyboard_cursor(cursor)
                                .today(today)
                                .highlight_weekends(highlight_weekends)
                                .show(ui)
                                .inner
                        })
                        .inner
                });

            if let Some(cell) = area.inner
                && let Some(text) = state.select_day(cell.day, &format)
            {
                emitted = Some(text);
            }

            if state.is_calendar_open() {
                if ui.input(|i| i.key_pressed(Key::Escape)) {
                    if state.on_escape() {
                        ui.memory_mut(|mem| mem.request_focus(text_id));
                    }
                } else if area.response.clicked_elsewhere() && !icon.clicked() {
                    state.close_calendar();
                }
            }
        }

        if let Some(text) = &emitted {
            if *value != *text {
                value.clone_from(text);
            }
            response.mark_changed();
            if let Some(on_change) = &mut on_change {
                on_change(text);
            }
        }

        if let Some(message) = state.error_message() {
            ui.label(RichText::new(message).color(ui.visuals().error_fg_color));
        }

        state.remember_value(value);
        state.clone().store(ui.ctx(), id);

        DatePickerOutput {
            response,
            emitted,
            id,
            state,
        }
    }
}

impl Widget for DatePicker<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui).response
    }
}

/// Arrow keys move the cursor, Enter and Space pick the day under it.
fn handle_calendar_keys(
    ui: &Ui,
    state: &mut DatePickerState,
    format: &DateFormat,
) -> Option<String> {
    let moves = [
        (Key::ArrowLeft, -1),
        (Key::ArrowRight, 1),
        (Key::ArrowUp, -7),
        (Key::ArrowDown, 7),
    ];
    for (key, days) in moves {
        if ui.input_mut(|i| i.consume_key(Modifiers::NONE, key)) {
            state.move_cursor(days);
        }
    }

    let enter = ui.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Enter));
    let space = ui.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Space));
    if enter || space {
        state.activate_cursor(format)
    } else {
        None
    }
}
