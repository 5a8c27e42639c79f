//! Terminal output. Layout is built as plain text; colors come from the
//! theme palette and are applied only when printing.

use crossterm::style::{Color, StyledContent, Stylize, style};
use std::fmt::Display;
use weatherdash_core::{
    CurrentConditions, Dashboard, DailyForecast, ForecastView, Palette, RecentSearches, Rgb,
    Swatch, ThemePreference,
};

const CARD_WIDTH: usize = 60;
const CELL_WIDTH: usize = 12;

fn color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }
}

fn paint<D: Display>(text: D, swatch: Swatch) -> StyledContent<D> {
    style(text).with(color(swatch.foreground)).on(color(swatch.background))
}

fn print_line(text: &str, swatch: Swatch) {
    println!("{}", paint(format!(" {text:<width$}", width = CARD_WIDTH - 1), swatch));
}

pub fn print_dashboard(dash: &Dashboard) {
    let palette = dash.palette();
    let card = palette.card;

    let title = dash.current().map(|c| c.city_name.as_str()).unwrap_or("Search for a city");
    print_line("", card);
    print_line(title, card);
    print_line("", card);

    if let Some(err) = dash.error() {
        println!(" {}", style(err).with(Color::Red).bold());
    }

    if let Some(current) = dash.current() {
        for line in current_lines(current) {
            print_line(&line, card);
        }
        print_line("", card);
        print_forecast(dash.forecast(), &palette);
    }

    print_recent(dash.recent(), dash.theme());
}

fn print_forecast(view: &ForecastView, palette: &Palette) {
    print_line("5-Day Forecast:", palette.card);
    match view {
        ForecastView::Ready(days) if !days.is_empty() => {
            for row in forecast_rows(days) {
                println!(" {}", paint(row, palette.forecast_cell));
            }
        }
        _ => println!(" {}", style("No forecast data available").with(color(palette.muted))),
    }
}

pub fn print_recent(recent: &RecentSearches, theme: ThemePreference) {
    let palette = theme.palette();
    println!();
    println!(" {}", style("Recent Searches:").bold());

    if recent.is_empty() {
        println!(" {}", style("No recent searches").with(color(palette.muted)));
        return;
    }

    for (idx, city) in recent.iter().enumerate() {
        println!(" {}", paint(format!(" {}. {city} ", idx + 1), palette.button));
    }
}

pub fn print_theme(theme: ThemePreference) {
    let palette = theme.palette();
    println!("{}", paint(format!(" Theme: {theme} "), palette.page));
}

pub fn print_loading(dash: &Dashboard, city: &str) {
    if !dash.is_loading() {
        return;
    }
    let muted = color(dash.palette().muted);
    println!(" {}", style(format!("Loading weather for {city}...")).with(muted));
}

pub fn current_lines(current: &CurrentConditions) -> Vec<String> {
    vec![
        format!("{}°C  {}", round_temp(current.temperature_c), capitalize(&current.description)),
        format!("Icon: {}", current.icon_url()),
        format!("Humidity: {}%", current.humidity_pct),
        format!("Wind: {} m/s", current.wind_speed),
    ]
}

/// Three rows (weekday, temperature, description), one fixed-width cell per day.
pub fn forecast_rows(days: &[DailyForecast]) -> [String; 3] {
    let mut weekday = String::new();
    let mut temp = String::new();
    let mut description = String::new();

    for day in days {
        weekday.push_str(&cell(&day.date.format("%a").to_string()));
        temp.push_str(&cell(&format!("{}°C", round_temp(day.sample.temperature_c))));
        description.push_str(&cell(&day.sample.description));
    }

    [weekday, temp, description]
}

fn cell(text: &str) -> String {
    let clipped: String = text.chars().take(CELL_WIDTH - 1).collect();
    format!("{clipped:^width$}", width = CELL_WIDTH)
}

fn round_temp(celsius: f64) -> i64 {
    celsius.round() as i64
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use weatherdash_core::ForecastSample;

    fn day(date: (i32, u32, u32), temp: f64, description: &str) -> DailyForecast {
        DailyForecast {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
            sample: ForecastSample {
                timestamp_unix: 0,
                temperature_c: temp,
                description: description.into(),
                icon_id: "01d".into(),
            },
        }
    }

    #[test]
    fn current_lines_round_and_capitalize() {
        let current = CurrentConditions {
            city_name: "London".into(),
            temperature_c: 14.6,
            description: "broken clouds".into(),
            icon_id: "04d".into(),
            humidity_pct: 77,
            wind_speed: 5.1,
        };

        let lines = current_lines(&current);
        assert_eq!(lines[0], "15°C  Broken clouds");
        assert_eq!(lines[1], "Icon: https://openweathermap.org/img/wn/04d@2x.png");
        assert_eq!(lines[2], "Humidity: 77%");
        assert_eq!(lines[3], "Wind: 5.1 m/s");
    }

    #[test]
    fn forecast_rows_have_one_cell_per_day() {
        // 2024-03-10 is a Sunday.
        let days = [
            day((2024, 3, 10), -0.4, "snow"),
            day((2024, 3, 11), 2.5, "very heavy freezing rain"),
        ];
        let [weekday, temp, description] = forecast_rows(&days);

        assert_eq!(weekday.chars().count(), 2 * CELL_WIDTH);
        assert!(weekday.contains("Sun"));
        assert!(weekday.contains("Mon"));
        assert!(temp.contains("0°C"));
        assert!(!temp.contains("-0°C"));
        assert!(temp.contains("3°C"));
        assert_eq!(description.chars().count(), 2 * CELL_WIDTH);
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclaircies"), "Éclaircies");
    }
}
