//! Shared colors and formatting for the views.

use eframe::egui::Color32;
use rust_decimal::Decimal;
use shared::Category;

pub const INCOME_GREEN: Color32 = Color32::from_rgb(22, 163, 74);
pub const EXPENSE_RED: Color32 = Color32::from_rgb(220, 38, 38);
pub const BALANCE_BLUE: Color32 = Color32::from_rgb(37, 99, 235);
pub const BALANCE_ORANGE: Color32 = Color32::from_rgb(234, 88, 12);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(153, 27, 27);
pub const ERROR_FILL: Color32 = Color32::from_rgb(254, 226, 226);

/// One color per category, matching the breakdown legend.
pub fn category_color(category: Category) -> Color32 {
    match category {
        Category::Housing => Color32::from_rgb(59, 130, 246),
        Category::Food => Color32::from_rgb(34, 197, 94),
        Category::Transport => Color32::from_rgb(234, 179, 8),
        Category::Utilities => Color32::from_rgb(168, 85, 247),
        Category::Health => Color32::from_rgb(239, 68, 68),
        Category::Entertainment => Color32::from_rgb(236, 72, 153),
        Category::Other => Color32::from_rgb(107, 114, 128),
    }
}

/// Render a currency amount with the app's locale symbol.
pub fn money(amount: Decimal) -> String {
    format!("£{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_always_shows_two_places() {
        assert_eq!(money(dec!(1200)), "£1200.00");
        assert_eq!(money(dec!(9.5)), "£9.50");
        assert_eq!(money(dec!(0)), "£0.00");
    }
}
