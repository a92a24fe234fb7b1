//! Pango markup rendering of a quote.

use tickerbar_core::Quote;

use crate::config::Colors;

const UP_ICON: &str = "▲";
const DOWN_ICON: &str = "▼";

/// Label and template inputs for one rendered quote.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub format: &'a str,
    pub name: &'a str,
    pub timeframe: &'a str,
    pub colors: &'a Colors,
}

/// Renders `quote` into `<span color='...'>...</span>`.
///
/// Placeholders: `{symbol}` (the display name), `{price}`, `{change}`,
/// `{timeframe}` and `{icon}`. When the template has no `{timeframe}` the
/// timeframe is appended to the name as ` (tf)`.
pub fn render(view: &View<'_>, quote: &Quote) -> String {
    let change = quote.change_percent;
    let (icon, color) = if quote.is_down() {
        (DOWN_ICON, &view.colors.down)
    } else if change == 0.0 {
        (UP_ICON, &view.colors.neutral)
    } else {
        (UP_ICON, &view.colors.up)
    };

    let timeframe = escape_markup(view.timeframe);
    let mut name = escape_markup(view.name);
    if !timeframe.is_empty() && !view.format.contains("{timeframe}") {
        name = format!("{name} ({timeframe})");
    }

    let text = view
        .format
        .replace("{symbol}", &name)
        .replace("{price}", &format!("{:.2}", quote.price))
        .replace("{change}", &format!("{change:.2}"))
        .replace("{timeframe}", &timeframe)
        .replace("{icon}", icon);

    format!("<span color='{color}'>{text}</span>")
}

fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
