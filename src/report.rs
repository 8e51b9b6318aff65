//! Plain-text rendering of forecast series

use std::fmt::Write;

use crate::models::{ForecastRecord, ForecastSeries};

/// Render the report for one city: a header line, then one block per day.
#[must_use]
pub fn format_city_report(city_name: &str, series: &ForecastSeries) -> String {
    let mut report = format!("Прогноз погоды для города {city_name}.\n\n");
    for (day, record) in series.days.iter().enumerate() {
        write_day(&mut report, day + 1, record);
    }
    report
}

fn write_day(report: &mut String, day: usize, record: &ForecastRecord) {
    // Writing into a String cannot fail.
    let _ = writeln!(report, "День {day}.\n");
    let _ = writeln!(report, "Температура (°C): {:.2}", record.temperature);
    let _ = writeln!(report, "Влажность (%): {:.2}", record.humidity);
    let _ = writeln!(report, "Скорость ветра (км/ч): {:.2}", record.wind_speed);
    let _ = writeln!(
        report,
        "Вероятность осадков (%): {:.2}",
        record.precipitation_probability
    );
    report.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationKey;

    fn series(days: Vec<ForecastRecord>) -> ForecastSeries {
        ForecastSeries {
            location: LocationKey::new("294021"),
            days,
        }
    }

    #[test]
    fn test_single_day_report() {
        let report = format_city_report(
            "Москва",
            &series(vec![ForecastRecord {
                temperature: 12.346,
                humidity: 60.0,
                wind_speed: 16.09,
                precipitation_probability: 7.0,
            }]),
        );

        assert_eq!(
            report,
            "Прогноз погоды для города Москва.\n\n\
             День 1.\n\n\
             Температура (°C): 12.35\n\
             Влажность (%): 60.00\n\
             Скорость ветра (км/ч): 16.09\n\
             Вероятность осадков (%): 7.00\n\n"
        );
    }

    #[test]
    fn test_days_are_numbered_from_one() {
        let record = ForecastRecord {
            temperature: -1.5,
            humidity: 40.0,
            wind_speed: 3.2,
            precipitation_probability: 0.0,
        };
        let report = format_city_report("Казань", &series(vec![record; 3]));

        assert!(report.starts_with("Прогноз погоды для города Казань.\n\n"));
        assert!(report.contains("День 1.\n\n"));
        assert!(report.contains("День 2.\n\n"));
        assert!(report.contains("День 3.\n\n"));
        assert!(!report.contains("День 4."));
        assert_eq!(report.matches("Температура (°C): -1.50\n").count(), 3);
    }

    #[test]
    fn test_empty_series_is_header_only() {
        let report = format_city_report("Тверь", &series(Vec::new()));
        assert_eq!(report, "Прогноз погоды для города Тверь.\n\n");
    }
}
