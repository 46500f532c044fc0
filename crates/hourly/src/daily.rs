//! Assembly of daily, hourly-resolved forcing records for BEPS.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use ndarray::Array3;
use pluvia_calendar::{is_leap_day, unique_days};
use pluvia_timeseries::{EndBound, TimeSeries, Variable, select};
use tracing::{debug, info};

use crate::error::HourlyError;
use crate::interp::interpolate_linear;
use crate::precip::interpolate_precip;

/// Offset of degrees Celsius from Kelvin.
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Output hours of a daily record.
pub const OUTPUT_HOURS: [i64; 24] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
];

/// Source accumulation interval of precipitation, in hours.
const PRECIP_INTERVAL_HOURS: i64 = 3;

/// The five forcing variables on a shared grid.
#[derive(Debug, Clone)]
pub struct ForcingSet {
    precip: TimeSeries,
    temp: TimeSeries,
    rh: TimeSeries,
    swd: TimeSeries,
    wind: TimeSeries,
}

impl ForcingSet {
    /// Creates a forcing set.
    ///
    /// Units: precipitation in mm per 3 hours, temperature in degrees
    /// Celsius, relative humidity in percent, radiation in W/m2, wind in m/s.
    ///
    /// # Errors
    ///
    /// Returns [`HourlyError::GridMismatch`] if any grid differs from the
    /// precipitation grid.
    pub fn new(
        precip: TimeSeries,
        temp: TimeSeries,
        rh: TimeSeries,
        swd: TimeSeries,
        wind: TimeSeries,
    ) -> Result<Self, HourlyError> {
        let set = Self {
            precip,
            temp,
            rh,
            swd,
            wind,
        };
        let expected = set.precip.grid_shape();
        for variable in Variable::ALL {
            let got = set.get(variable).grid_shape();
            if got != expected {
                return Err(HourlyError::GridMismatch {
                    variable,
                    expected,
                    got,
                });
            }
        }
        Ok(set)
    }

    /// Returns the series of `variable`.
    pub fn get(&self, variable: Variable) -> &TimeSeries {
        match variable {
            Variable::Precip => &self.precip,
            Variable::Temp => &self.temp,
            Variable::RelHum => &self.rh,
            Variable::Shortwave => &self.swd,
            Variable::Wind => &self.wind,
        }
    }

    /// Returns the grid shape `(lat, lon)`.
    pub fn grid_shape(&self) -> (usize, usize) {
        self.precip.grid_shape()
    }
}

/// Half-open range of days `[start, end)` to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl ExperimentPeriod {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns [`HourlyError::InvalidPeriod`] unless `start < end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, HourlyError> {
        if start >= end {
            return Err(HourlyError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the first day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the exclusive end day.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if `day` lies in the period.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }
}

/// Hourly forcing of one day in BEPS units.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    date: NaiveDate,
    precip: Array3<f64>,
    temp: Array3<f64>,
    rh: Array3<f64>,
    swd: Array3<f64>,
    wind: Array3<f64>,
}

impl DailyRecord {
    /// Returns the day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the output hours, relative to 00:00 of the day.
    pub fn hours(&self) -> &'static [i64] {
        &OUTPUT_HOURS
    }

    /// Returns the `[24, lat, lon]` field of `variable`.
    ///
    /// Units: precipitation mm/h, temperature K, relative humidity as a
    /// fraction, radiation W/m2, wind m/s.
    pub fn get(&self, variable: Variable) -> &Array3<f64> {
        match variable {
            Variable::Precip => &self.precip,
            Variable::Temp => &self.temp,
            Variable::RelHum => &self.rh,
            Variable::Shortwave => &self.swd,
            Variable::Wind => &self.wind,
        }
    }
}

/// Returns the days to write: the distinct precipitation days without the
/// first and last (margin) days, restricted to `period`.
///
/// # Errors
///
/// Returns [`HourlyError::MisalignedStart`] if any series does not start at
/// 00:00.
pub fn experiment_days(
    forcing: &ForcingSet,
    period: &ExperimentPeriod,
) -> Result<Vec<NaiveDate>, HourlyError> {
    for variable in Variable::ALL {
        if let Some(time) = forcing.get(variable).first_time() {
            if time.hour() != 0 {
                return Err(HourlyError::MisalignedStart { variable, time });
            }
        }
    }
    let days = unique_days(forcing.get(Variable::Precip).times());
    if days.len() < 3 {
        return Ok(Vec::new());
    }
    Ok(days[1..days.len() - 1]
        .iter()
        .copied()
        .filter(|d| period.contains(*d))
        .collect())
}

/// Builds the hourly record of `day`.
///
/// Non-precipitation variables use the samples in `[D 00:00, D+1 00:00]`,
/// precipitation additionally the sample three hours before. An end that
/// falls on February 29 moves to March 1.
///
/// # Errors
///
/// Returns [`HourlyError::OutOfRange`] or [`HourlyError::EmptyInput`] when the
/// samples around `day` do not cover all output hours.
pub fn daily_record(forcing: &ForcingSet, day: NaiveDate) -> Result<DailyRecord, HourlyError> {
    let start = day.and_time(NaiveTime::default());
    let mut end = start + TimeDelta::days(1);
    if is_leap_day(end) {
        end += TimeDelta::days(1);
    }

    let targets: Vec<f64> = OUTPUT_HOURS.iter().map(|&h| h as f64).collect();
    let linear = |variable: Variable| -> Result<Array3<f64>, HourlyError> {
        let sel = select(forcing.get(variable), start, end, EndBound::Inclusive);
        let offsets: Vec<f64> = hour_offsets(sel.times(), start)
            .into_iter()
            .map(|h| h as f64)
            .collect();
        interpolate_linear(&targets, &offsets, sel.values())
    };

    let precip_sel = select(
        forcing.get(Variable::Precip),
        start - TimeDelta::hours(PRECIP_INTERVAL_HOURS),
        end,
        EndBound::Inclusive,
    );
    let precip = interpolate_precip(
        &OUTPUT_HOURS,
        &hour_offsets(precip_sel.times(), start),
        precip_sel.values(),
        PRECIP_INTERVAL_HOURS,
    )?;

    let record = DailyRecord {
        date: day,
        precip,
        temp: linear(Variable::Temp)? + CELSIUS_TO_KELVIN,
        rh: linear(Variable::RelHum)? / 100.0,
        swd: linear(Variable::Shortwave)?,
        wind: linear(Variable::Wind)?,
    };
    debug!(%day, "built daily record");
    Ok(record)
}

/// Builds the records of every experiment day.
///
/// # Errors
///
/// Propagates the errors of [`experiment_days`] and [`daily_record`].
pub fn build_daily_records(
    forcing: &ForcingSet,
    period: &ExperimentPeriod,
) -> Result<Vec<DailyRecord>, HourlyError> {
    let days = experiment_days(forcing, period)?;
    let records = days
        .iter()
        .map(|&day| daily_record(forcing, day))
        .collect::<Result<Vec<_>, _>>()?;
    info!(days = records.len(), "built daily records");
    Ok(records)
}

fn hour_offsets(times: &[NaiveDateTime], origin: NaiveDateTime) -> Vec<i64> {
    times.iter().map(|t| (*t - origin).num_hours()).collect()
}
