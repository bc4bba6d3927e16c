//! Visit scheduling helpers shared by both contact forms.

use chrono::{Datelike, NaiveDate};

use crate::message::NOT_INFORMED;

const MAX_IDENTIFIER_DIGITS: usize = 11;

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Technician visit windows, inclusive, as zero-padded `HH:MM`.
pub const VISIT_WINDOWS: [(&str, &str); 2] = [("08:30", "11:30"), ("14:00", "18:00")];

pub const VISIT_WINDOW_MESSAGE: &str =
    "Horários disponíveis para técnico e suporte: 08:30–11:30 e 14:00–18:00.";

/// Inputs of type `time` always produce zero-padded values, so plain string
/// ordering matches clock ordering.
pub fn is_time_allowed(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    VISIT_WINDOWS
        .iter()
        .any(|&(start, end)| value >= start && value <= end)
}

/// Keeps the first 11 ASCII digits of a CPF or phone field.
pub fn sanitize_digits(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_IDENTIFIER_DIGITS)
        .collect()
}

/// Renders `YYYY-MM-DD` as `05 de março de 2024`.
pub fn format_visit_date(value: &str) -> String {
    if value.is_empty() {
        return NOT_INFORMED.to_string();
    }
    let mut parts = value.split('-').map(parse_component);
    let (Some(year), Some(month), Some(day)) = (
        parts.next().flatten(),
        parts.next().flatten(),
        parts.next().flatten(),
    ) else {
        return value.to_string();
    };
    let Some(date) = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
    else {
        return value.to_string();
    };
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}

fn parse_component(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

/// Renders `HH:MM` with its period of day: `09:05 da manhã`.
pub fn format_visit_time(value: &str) -> String {
    if value.is_empty() {
        return NOT_INFORMED.to_string();
    }
    let mut parts = value.splitn(3, ':');
    let hour_raw = parts.next().unwrap_or_default();
    let minute = parts.next().unwrap_or("00");
    let hour = hour_raw.trim().parse::<i64>().ok();
    let hour_text = match hour {
        Some(hour) => format!("{hour:02}"),
        None => hour_raw.to_string(),
    };
    let period = match hour {
        Some(hour) if hour < 12 => "da manhã",
        Some(hour) if hour >= 18 => "da noite",
        _ => "da tarde",
    };
    format!("{hour_text}:{minute} {period}")
}
