//! Vertical placement of shift cards on the hour grid.

use chrono::Timelike;
use chrono_tz::Tz;
use rota_core::types::Shift;
use serde::Serialize;

pub const GRID_START_HOUR: u32 = 6;
pub const GRID_END_HOUR: u32 = 23;
pub const PIXELS_PER_HOUR: f64 = 60.0;
pub const MIN_SHIFT_HEIGHT: f64 = 30.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Dimensions of the hour grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridMetrics {
    pub start_hour: u32,
    pub end_hour: u32,
    pub pixels_per_hour: f64,
    pub min_height: f64,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            start_hour: GRID_START_HOUR,
            end_hour: GRID_END_HOUR,
            pixels_per_hour: PIXELS_PER_HOUR,
            min_height: MIN_SHIFT_HEIGHT,
        }
    }
}

/// Pixel offset and height of a shift card within its day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftPosition {
    pub top: f64,
    pub height: f64,
}

/// A shift card ready to draw; later cards stack above earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionedShift<'a> {
    pub shift: &'a Shift,
    pub position: ShiftPosition,
    pub z_index: u32,
}

impl GridMetrics {
    /// Total pixel height of the grid body.
    #[must_use]
    pub fn grid_height(&self) -> f64 {
        f64::from(self.end_hour.saturating_sub(self.start_hour)) * self.pixels_per_hour
    }

    /// Gutter labels `HH:00` for every hour line, inclusive of both ends.
    #[must_use]
    pub fn hour_labels(&self) -> Vec<String> {
        (self.start_hour..=self.end_hour)
            .map(|hour| format!("{hour:02}:00"))
            .collect()
    }

    /// ## Summary
    /// Maps a shift's local start and end to a top offset and height.
    ///
    /// Top is clamped to zero for shifts starting before the grid, and
    /// height never drops below `min_height`. An end on a later local day
    /// counts the full wall-clock span, so overnight shifts stay positive.
    #[must_use]
    pub fn position(&self, shift: &Shift, tz: Tz) -> ShiftPosition {
        let start = shift.start_time.with_timezone(&tz).naive_local();
        let end = shift.end_time.with_timezone(&tz).naive_local();

        let start_hours = f64::from(start.num_seconds_from_midnight()) / SECONDS_PER_HOUR;
        let span_seconds = (end - start)
            .num_seconds()
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        let span_seconds = i32::try_from(span_seconds).unwrap_or_default();
        let span_hours = f64::from(span_seconds) / SECONDS_PER_HOUR;

        let top = (start_hours - f64::from(self.start_hour)) * self.pixels_per_hour;
        let height = span_hours * self.pixels_per_hour;

        ShiftPosition {
            top: top.max(0.0),
            height: height.max(self.min_height),
        }
    }

    /// ## Summary
    /// Positions every shift of one day column in render order.
    ///
    /// Overlapping shifts are not split into columns; each later card gets a
    /// higher z-index and is drawn on top.
    #[must_use]
    pub fn layout_day<'a>(&self, shifts: &[&'a Shift], tz: Tz) -> Vec<PositionedShift<'a>> {
        (1u32..)
            .zip(shifts.iter().copied())
            .map(|(z_index, shift)| PositionedShift {
                shift,
                position: self.position(shift, tz),
                z_index,
            })
            .collect()
    }
}

/// Positions `shift` on the default 06:00 to 23:00 grid at 60 px per hour.
#[must_use]
pub fn calculate_shift_position(shift: &Shift, tz: Tz) -> ShiftPosition {
    GridMetrics::default().position(shift, tz)
}
