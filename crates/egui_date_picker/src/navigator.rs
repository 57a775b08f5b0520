use egui::{Button, Label, Response, RichText, Ui, Widget, vec2};

use crate::DisplayedMonth;

/// Arrows to page through months, with the month and year in between.
///
/// The response is marked as changed when the month changed.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// let mut month = egui_date_picker::DisplayedMonth::new(2021, 0).unwrap();
/// if ui.add(egui_date_picker::MonthNavigator::new(&mut month)).changed() {
///     println!("Now showing {} {}", month.month_name(), month.year());
/// }
/// # });
/// ```
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct MonthNavigator<'a> {
    month: &'a mut DisplayedMonth,
    year_arrows: bool,
}

impl<'a> MonthNavigator<'a> {
    pub fn new(month: &'a mut DisplayedMonth) -> Self {
        Self {
            month,
            year_arrows: false,
        }
    }

    /// Also show arrows that move a whole year. (Default: false)
    #[inline]
    pub fn year_arrows(mut self, year_arrows: bool) -> Self {
        self.year_arrows = year_arrows;
        self
    }
}

impl Widget for MonthNavigator<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self { month, year_arrows } = self;
        let before = *month;

        let mut response = ui
            .horizontal(|ui| {
                if year_arrows
                    && ui
                        .add(Button::new("<<"))
                        .on_hover_text("Previous year")
                        .clicked()
                {
                    *month = month.add_months(-12);
                }
                if ui
                    .add(Button::new("<"))
                    .on_hover_text("Previous month")
                    .clicked()
                {
                    *month = month.previous();
                }

                let title = format!("{} {}", month.month_name(), month.year());
                ui.add_sized(
                    vec2(120.0, ui.spacing().interact_size.y),
                    Label::new(RichText::new(title).strong()),
                );

                if ui
                    .add(Button::new(">"))
                    .on_hover_text("Next month")
                    .clicked()
                {
                    *month = month.next();
                }
                if year_arrows
                    && ui
                        .add(Button::new(">>"))
                        .on_hover_text("Next year")
                        .clicked()
                {
                    *month = month.add_months(12);
                }
            })
            .response;

        if *month != before {
            response.mark_changed();
        }
        response
    }
}
