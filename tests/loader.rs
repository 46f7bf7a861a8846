use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use stock_dashboard::config::Entity;
use stock_dashboard::data::{DataLoader, DataProcessor, DateRange};
use stock_dashboard::DashboardError;
use tempfile::TempDir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn entity() -> Entity {
    Entity::new("Alpha (AAA)", "df_AAA.csv", "Alpha Corp.")
}

#[test]
fn test_load_normalizes_headers_and_sorts() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "df_AAA.csv",
        " Date ,CLOSE ,Volume\n2024-01-03,3.5,100\n2024-01-01,1.5,100\n2024-01-02,2.5,100\n",
    );

    let series = DataLoader::new(dir.path()).load_series(&entity()).unwrap();
    assert_eq!(series.name(), "Alpha (AAA)");
    assert_eq!(series.closes(), vec![1.5, 2.5, 3.5]);
    let dates: Vec<NaiveDate> = series.points().iter().map(|p| p.date).collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(dates[0], d(2024, 1, 1));
}

#[test]
fn test_load_drops_unparseable_rows() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "df_AAA.csv",
        "date,close\n2024-01-01,10\nnot-a-date,11\n2024-01-03,\n2024-01-04,13\n",
    );

    let series = DataLoader::new(dir.path()).load_series(&entity()).unwrap();
    assert_eq!(series.closes(), vec![10.0, 13.0]);
}

#[test]
fn test_load_accepts_timestamps_with_offsets() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "df_AAA.csv",
        "Date,Open,Close\n2024-02-02 00:00:00-05:00,1,5\n2024-02-01 00:00:00-05:00,1,4\n",
    );

    let series = DataLoader::new(dir.path()).load_series(&entity()).unwrap();
    assert_eq!(
        series.full_range(),
        Some(DateRange::new(d(2024, 2, 1), d(2024, 2, 2)).unwrap())
    );
    assert_eq!(series.closes(), vec![4.0, 5.0]);
}

#[test]
fn test_missing_close_column() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "df_AAA.csv", "date,open\n2024-01-01,1\n");

    let err = DataLoader::new(dir.path()).load_series(&entity()).unwrap_err();
    match err {
        DashboardError::MissingColumn { column, file } => {
            assert_eq!(column, "close");
            assert_eq!(file, "df_AAA.csv");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = DataLoader::new(dir.path()).load_series(&entity()).unwrap_err();
    assert!(matches!(err, DashboardError::FileNotFound(_)));
    assert!(err.is_warning());
}

#[test]
fn test_filter_loaded_series() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "df_AAA.csv",
        "date,close\n2024-01-01,1\n2024-01-02,2\n2024-01-03,3\n2024-01-04,4\n2024-01-05,5\n",
    );
    let series = DataLoader::new(dir.path()).load_series(&entity()).unwrap();

    let full = series.full_range().unwrap();
    assert_eq!(DataProcessor::filter_by_range(&series, &full), series);

    let sub = DateRange::new(d(2024, 1, 2), d(2024, 1, 4)).unwrap();
    let filtered = DataProcessor::filter_by_range(&series, &sub);
    assert_eq!(filtered.closes(), vec![2.0, 3.0, 4.0]);
    assert!(filtered.points().iter().all(|p| sub.contains(p.date)));
    assert_eq!(series.len(), 5);
}

#[test]
fn test_forecast_with_all_columns() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "forecast_AAA.csv",
        "Date, Real_Close ,Predicted_Close\n2024-01-02,20,18\n2024-01-01,10,12\n2024-01-03,30,33\n",
    );

    let record = DataLoader::new(dir.path()).load_forecast(&entity()).unwrap();
    assert_eq!(record.real(), vec![10.0, 20.0, 30.0]);
    assert_eq!(record.predicted(), vec![12.0, 18.0, 33.0]);
    assert_eq!(record.table.columns, vec!["date", "real_close", "predicted_close"]);
    assert_eq!(record.table.rows.len(), 3);
}

#[test]
fn test_forecast_schema_error_lists_found_columns() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "forecast_AAA.csv",
        "date,real_close\n2024-01-01,10\n",
    );

    let err = DataLoader::new(dir.path()).load_forecast(&entity()).unwrap_err();
    match err {
        DashboardError::Schema { missing, found } => {
            assert_eq!(missing, vec!["predicted_close".to_string()]);
            assert_eq!(found, vec!["date".to_string(), "real_close".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_logo_is_file_not_found() {
    let dir = TempDir::new().unwrap();
    let err = DataLoader::new(dir.path()).load_logo(&entity()).unwrap_err();
    assert!(matches!(err, DashboardError::FileNotFound(_)));
}

#[test]
fn test_logo_is_decoded() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("logos")).unwrap();
    let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
    img.save(dir.path().join("logos").join("AAA.png")).unwrap();

    let logo = DataLoader::new(dir.path()).load_logo(&entity()).unwrap();
    assert_eq!((logo.width(), logo.height()), (4, 3));
}
