//! Integration tests for reading forcing variables and the land/sea mask.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use pluvia_io::{IoError, MaskConfig, ReaderConfig, read_land_sea_mask, read_variable};
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Helper: programmatic NetCDF fixture builder
// ---------------------------------------------------------------------------

/// Minimal MSWEP-style file: `time`, `lat`, `lon` and one 3-D variable.
struct FixtureBuilder {
    nt: usize,
    lats: Vec<f64>,
    lons: Vec<f64>,
    /// Time offsets in `units`.
    offsets: Vec<f64>,
    units: String,
    calendar: Option<String>,
    var_name: String,
    /// Optional `latitude` coordinate on its own `y` dimension.
    alt_lats: Option<Vec<f64>>,
    /// Flat data in `[t, lat, lon]` order.
    data: Vec<f64>,
}

impl FixtureBuilder {
    /// Three-hourly steps from 2000-01-01 00:00 in fractional days.
    fn new(nt: usize, ny: usize, nx: usize) -> Self {
        Self {
            nt,
            lats: (0..ny).map(|j| -5.0 + 0.1 * j as f64).collect(),
            lons: (0..nx).map(|i| 30.0 + 0.1 * i as f64).collect(),
            offsets: (0..nt).map(|t| 36524.0 + 0.125 * t as f64).collect(),
            units: "days since 1900-01-01".into(),
            calendar: Some("gregorian".into()),
            var_name: "precipitation".into(),
            alt_lats: None,
            data: (0..nt * ny * nx).map(|k| (k % 7) as f64 * 0.25).collect(),
        }
    }

    fn with_calendar(mut self, calendar: &str) -> Self {
        self.calendar = Some(calendar.into());
        self
    }

    fn with_alt_lats(mut self, lats: Vec<f64>) -> Self {
        self.alt_lats = Some(lats);
        self
    }

    fn with_value(mut self, index: usize, value: f64) -> Self {
        self.data[index] = value;
        self
    }

    fn write(&self, dir: &Path) -> PathBuf {
        let path = dir.join("forcing.nc");
        let mut file = netcdf::create(&path).expect("create NetCDF file");

        file.add_dimension("time", self.nt).expect("add dim time");
        file.add_dimension("lat", self.lats.len()).expect("add dim lat");
        file.add_dimension("lon", self.lons.len()).expect("add dim lon");

        {
            let mut var = file.add_variable::<f64>("lon", &["lon"]).expect("add lon");
            var.put_values(&self.lons, ..).expect("put lon");
        }
        {
            let mut var = file.add_variable::<f64>("lat", &["lat"]).expect("add lat");
            var.put_values(&self.lats, ..).expect("put lat");
        }
        if let Some(alt) = &self.alt_lats {
            file.add_dimension("y", alt.len()).expect("add dim y");
            let mut var = file.add_variable::<f64>("latitude", &["y"]).expect("add latitude");
            var.put_values(alt, ..).expect("put latitude");
        }
        {
            let mut var = file.add_variable::<f64>("time", &["time"]).expect("add time");
            var.put_values(&self.offsets, ..).expect("put time");
            var.put_attribute("units", self.units.as_str()).expect("time units");
            if let Some(calendar) = &self.calendar {
                var.put_attribute("calendar", calendar.as_str()).expect("time calendar");
            }
        }
        {
            let mut var = file
                .add_variable::<f32>(&self.var_name, &["time", "lat", "lon"])
                .expect("add data variable");
            let data: Vec<f32> = self.data.iter().map(|&v| v as f32).collect();
            var.put_values(&data, ..).expect("put data");
        }
        path
    }
}

fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

/// Writes a water-percentage mask with the given dimensions.
fn write_mask(dir: &Path, dims: &[(&str, usize)], water: &[f64]) -> PathBuf {
    let path = dir.join("mask.nc");
    let mut file = netcdf::create(&path).expect("create mask file");
    for (name, len) in dims {
        file.add_dimension(name, *len).expect("add dim");
    }
    let names: Vec<&str> = dims.iter().map(|(n, _)| *n).collect();
    let mut var = file
        .add_variable::<f64>("landseamask", &names)
        .expect("add mask");
    var.put_values(water, ..).expect("put mask");
    path
}

// ---------------------------------------------------------------------------
// read_variable
// ---------------------------------------------------------------------------

#[test]
fn reads_series_and_grid() {
    let dir = tempdir().unwrap();
    let fixture = FixtureBuilder::new(16, 2, 3);
    let path = fixture.write(dir.path());

    let (series, grid) = read_variable(&path, "precipitation", &ReaderConfig::default()).unwrap();
    assert_eq!(series.len(), 16);
    assert_eq!(series.grid_shape(), (2, 3));
    assert_eq!(grid.shape(), (2, 3));
    assert_eq!(grid.lon(), fixture.lons.as_slice());

    assert_eq!(series.first_time(), Some(dt(2000, 1, 1, 0)));
    assert_eq!(series.times()[1], dt(2000, 1, 1, 3));
    assert_eq!(series.last_time(), Some(dt(2000, 1, 2, 21)));

    // Row-major [t, lat, lon].
    assert_eq!(series.values()[[1, 1, 2]], fixture.data[6 + 3 + 2]);
}

#[test]
fn sentinel_values_are_preserved() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(8, 1, 2)
        .with_value(4, 9.96921e36)
        .write(dir.path());

    let (series, _) = read_variable(&path, "precipitation", &ReaderConfig::default()).unwrap();
    assert!(series.values()[[2, 0, 0]] > 1e9);
}

#[test]
fn missing_variable() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(4, 1, 1).write(dir.path());

    let err = read_variable(&path, "air_temperature", &ReaderConfig::default()).unwrap_err();
    match err {
        IoError::MissingVariable { name, .. } => assert_eq!(name, "air_temperature"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn coordinate_length_mismatch() {
    let dir = tempdir().unwrap();
    // A second latitude coordinate on a dimension of another length.
    let path = FixtureBuilder::new(4, 2, 2)
        .with_alt_lats(vec![1.0, 2.0, 3.0])
        .write(dir.path());
    let config = ReaderConfig::default().with_lat_aliases(["latitude"]);

    match read_variable(&path, "precipitation", &config).unwrap_err() {
        IoError::DimensionMismatch {
            name,
            expected,
            got,
        } => {
            assert_eq!(name, "lat");
            assert_eq!((expected, got), (2, 3));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_gregorian_calendar_rejected() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(4, 1, 1)
        .with_calendar("noleap")
        .write(dir.path());

    assert!(matches!(
        read_variable(&path, "precipitation", &ReaderConfig::default()),
        Err(IoError::InvalidTime { .. })
    ));
}

#[test]
fn latitude_alias_is_honoured() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(4, 2, 1)
        .with_alt_lats(vec![7.0, 8.0])
        .write(dir.path());

    let (_, default_grid) =
        read_variable(&path, "precipitation", &ReaderConfig::default()).unwrap();
    assert_eq!(default_grid.lat()[0], -5.0);

    let config = ReaderConfig::default().with_lat_aliases(["latitude", "lat"]);
    let (_, grid) = read_variable(&path, "precipitation", &config).unwrap();
    assert_eq!(grid.lat(), &[7.0, 8.0]);
}

// ---------------------------------------------------------------------------
// read_land_sea_mask
// ---------------------------------------------------------------------------

#[test]
fn mask_threshold_and_flip() {
    let dir = tempdir().unwrap();
    // North row is all water, south row is land except one coastal cell.
    let path = write_mask(
        dir.path(),
        &[("lat", 2), ("lon", 3)],
        &[100.0, 100.0, 100.0, 0.0, 50.0, 75.0],
    );

    let flipped = read_land_sea_mask(&path, &MaskConfig::default()).unwrap();
    assert_eq!(flipped.shape(), (2, 3));
    assert_eq!(flipped.n_ocean(), 4);
    assert!(!flipped.is_ocean(0, 0));
    // Exactly at the threshold is land.
    assert!(!flipped.is_ocean(0, 1));
    assert!(flipped.is_ocean(0, 2));
    assert!(flipped.is_ocean(1, 0));

    let raw = read_land_sea_mask(&path, &MaskConfig::default().with_flip_lat(false)).unwrap();
    assert!(raw.is_ocean(0, 0));
    assert!(!raw.is_ocean(1, 0));
}

#[test]
fn mask_with_leading_singleton_dimension() {
    let dir = tempdir().unwrap();
    let path = write_mask(
        dir.path(),
        &[("time", 1), ("lat", 1), ("lon", 2)],
        &[10.0, 90.0],
    );

    let mask = read_land_sea_mask(&path, &MaskConfig::default().with_flip_lat(false)).unwrap();
    assert_eq!(mask.shape(), (1, 2));
    assert!(!mask.is_ocean(0, 0));
    assert!(mask.is_ocean(0, 1));
}

#[test]
fn mask_with_unexpected_rank() {
    let dir = tempdir().unwrap();
    let path = write_mask(dir.path(), &[("time", 2), ("lat", 1), ("lon", 1)], &[0.0, 0.0]);

    assert!(matches!(
        read_land_sea_mask(&path, &MaskConfig::default()),
        Err(IoError::DimensionMismatch { .. })
    ));
}
