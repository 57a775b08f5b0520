use chrono::NaiveDate;
use egui::{
    Button, Color32, Grid, Id, InnerResponse, RichText, Sense, StrokeKind, Ui, Vec2, vec2,
};

use crate::{
    CalendarCell, DAYS_PER_WEEK, DayCellId, DisplayedMonth, SelectionMarker, WEEKDAY_NAMES,
    month_grid, weekday_abbreviation,
};

/// Side length of one day button.
const CELL_SIZE: f32 = 28.0;

/// The weekday header and the days of one month, one row per week.
///
/// Clicking a day does not change anything by itself;
/// the clicked cell is returned from [`Self::show`] for the caller to act on.
#[must_use = "You should call .show()"]
pub struct CalendarGrid<'a> {
    month: DisplayedMonth,
    marker: &'a SelectionMarker,
    id_salt: Id,
    keyboard_cursor: Option<u32>,
    today: Option<NaiveDate>,
    highlight_weekends: bool,
}

impl<'a> CalendarGrid<'a> {
    pub fn new(month: DisplayedMonth, marker: &'a SelectionMarker) -> Self {
        Self {
            month,
            marker,
            id_salt: Id::new("calendar_grid"),
            keyboard_cursor: None,
            today: None,
            highlight_weekends: true,
        }
    }

    /// Must be set if multiple grids are in the same Ui.
    #[inline]
    pub fn id_salt(mut self, id_salt: impl std::hash::Hash) -> Self {
        self.id_salt = Id::new(id_salt);
        self
    }

    /// Outline this day, which has keyboard focus.
    #[inline]
    pub fn keyboard_cursor(mut self, day: Option<u32>) -> Self {
        self.keyboard_cursor = day;
        self
    }

    /// Encircle this date if it is in the displayed month.
    #[inline]
    pub fn today(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }

    /// Tint Saturdays and Sundays. (Default: true)
    #[inline]
    pub fn highlight_weekends(mut self, highlight_weekends: bool) -> Self {
        self.highlight_weekends = highlight_weekends;
        self
    }

    /// Returns the cell that was clicked this frame, if any.
    pub fn show(self, ui: &mut Ui) -> InnerResponse<Option<DayCellId>> {
        let Self {
            month,
            marker,
            id_salt,
            keyboard_cursor,
            today,
            highlight_weekends,
        } = self;

        let weeks = month_grid(&month);

        Grid::new(id_salt)
            .num_columns(DAYS_PER_WEEK)
            .min_col_width(CELL_SIZE)
            .spacing(vec2(2.0, 2.0))
            .show(ui, |ui| {
                let mut clicked = None;

                for name in WEEKDAY_NAMES {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(weekday_abbreviation(name)).weak())
                            .on_hover_text(name);
                    });
                }
                ui.end_row();

                for week in weeks {
                    for (column, cell) in week.into_iter().enumerate() {
                        match cell {
                            CalendarCell::Blank => {
                                ui.allocate_exact_size(Vec2::splat(CELL_SIZE), Sense::hover());
                            }
                            CalendarCell::Day(day) => {
                                let Some(cell) = month.cell(day) else {
                                    continue;
                                };
                                let is_weekend = column == 0 || column == DAYS_PER_WEEK - 1;
                                if day_button(
                                    ui,
                                    &month,
                                    cell,
                                    marker.is_cell_selected(cell),
                                    highlight_weekends && is_weekend,
                                    keyboard_cursor == Some(day),
                                    today,
                                ) {
                                    clicked = Some(cell);
                                }
                            }
                        }
                    }
                    ui.end_row();
                }

                clicked
            })
    }
}

/// Returns `true` if clicked.
fn day_button(
    ui: &mut Ui,
    month: &DisplayedMonth,
    cell: DayCellId,
    selected: bool,
    weekend: bool,
    has_cursor: bool,
    today: Option<NaiveDate>,
) -> bool {
    let date = month.date(cell.day);

    let mut button = Button::new(cell.day.to_string())
        .selected(selected)
        .min_size(Vec2::splat(CELL_SIZE));
    if weekend && !selected {
        button = button.fill(if ui.visuals().dark_mode {
            Color32::DARK_RED
        } else {
            Color32::LIGHT_RED
        });
    }

    let mut response = ui.add(button);
    if let Some(date) = date {
        response = response.on_hover_text(date.format("%A %B %-d %Y").to_string());
    }

    if has_cursor {
        let stroke = ui.visuals().widgets.active.fg_stroke;
        ui.painter()
            .rect_stroke(response.rect.expand(1.0), 4.0, stroke, StrokeKind::Outside);
    }

    if date.is_some() && date == today {
        let stroke = ui.visuals().widgets.inactive.fg_stroke;
        ui.painter()
            .circle_stroke(response.rect.center(), 0.4 * CELL_SIZE, stroke);
    }

    response.clicked()
}
