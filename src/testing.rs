// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Test-only utilities.

use chrono::{NaiveDate, NaiveDateTime};

pub fn make_day(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day)
    .unwrap_or_else(|| panic!("Invalid date: {year}-{month}-{day}"))
}

pub fn make_date_naive(
  year: i32,
  month: u32,
  day: u32,
  hour: u32,
  min: u32,
  sec: u32,
) -> NaiveDateTime {
  make_day(year, month, day)
    .and_hms_opt(hour, min, sec)
    .unwrap_or_else(|| panic!("Invalid time: {hour}:{min}:{sec}"))
}
