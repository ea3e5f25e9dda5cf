// Menu bar: static menu titles and the clock

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::time::Duration;

pub const MENU_ITEMS: [&str; 6] = ["🍎", "File", "Edit", "View", "Special", "Help"];

/// How often the clock is re-read
pub const CLOCK_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuBarView {
    pub items: Vec<String>,
    pub time: String,
}

/// Clock text: two-digit hour and minute
pub fn format_clock<Tz: TimeZone>(now: &DateTime<Tz>, twenty_four_hour: bool) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if twenty_four_hour {
        now.format("%H:%M").to_string()
    } else {
        now.format("%I:%M %p").to_string()
    }
}

pub fn current_time(twenty_four_hour: bool) -> String {
    format_clock(&Local::now(), twenty_four_hour)
}

pub fn menu_bar(twenty_four_hour: bool) -> MenuBarView {
    MenuBarView {
        items: MENU_ITEMS.iter().map(|i| i.to_string()).collect(),
        time: current_time(twenty_four_hour),
    }
}
