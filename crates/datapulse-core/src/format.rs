use std::fmt::Display;

use chrono::{
  DateTime,
  Datelike,
  TimeZone
};

use crate::task::DataTask;

pub const NO_DATA_LABEL: &str =
  "No data yet";
pub const NO_TIME_HINT: &str =
  "Press refresh";
pub const REFRESH_LABEL: &str = "Refresh";
pub const REFRESHING_LABEL: &str =
  "Refreshing...";
pub const EMPTY_TABLE_HINT: &str =
  "No data sources yet. Press \"Add data source\".";

/// Date and time lines of a status card.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct CardStamp {
  pub date: String,
  pub time: String
}

/// Formats a refresh stamp in the zone it
/// is given; callers convert to local
/// time first.
pub fn card_stamp<Tz>(
  at: Option<&DateTime<Tz>>
) -> Option<CardStamp>
where
  Tz: TimeZone,
  Tz::Offset: Display
{
  let at = at?;
  Some(CardStamp {
    date: at
      .format("%-d %B %Y")
      .to_string(),
    time: at.format("%H:%M").to_string()
  })
}

/// Everything a status card renders,
/// already in the operator's zone.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct CardView {
  pub title:        String,
  pub date:         String,
  pub time:         String,
  /// `false` while the date and time
  /// lines hold the placeholders.
  pub stamped:      bool,
  pub button_label: &'static str,
  pub disabled:     bool
}

pub fn card_view<Tz>(
  task: &DataTask,
  refreshing: bool,
  zone: &Tz
) -> CardView
where
  Tz: TimeZone,
  Tz::Offset: Display
{
  let local = task
    .last_updated
    .map(|at| at.with_timezone(zone));
  let (date, time, stamped) =
    match card_stamp(local.as_ref()) {
      | Some(stamp) => {
        (stamp.date, stamp.time, true)
      }
      | None => (
        NO_DATA_LABEL.to_string(),
        NO_TIME_HINT.to_string(),
        false
      )
    };

  CardView {
    title: task.title.clone(),
    date,
    time,
    stamped,
    button_label: if refreshing {
      REFRESHING_LABEL
    } else {
      REFRESH_LABEL
    },
    disabled: refreshing
  }
}

/// The single placeholder row of an empty
/// management table.
pub fn table_placeholder(
  tasks: &[DataTask]
) -> Option<&'static str> {
  tasks
    .is_empty()
    .then_some(EMPTY_TABLE_HINT)
}

pub fn copyright_line<Tz>(
  now: &DateTime<Tz>
) -> String
where
  Tz: TimeZone
{
  format!(
    "Data Status Dashboard © {}",
    now.year()
  )
}
