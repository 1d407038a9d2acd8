use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use plotters::prelude::*;
use plotters::style::FontTransform;

use crate::error::TrackerError;
use crate::models::chart::align;
use crate::models::{Asset, PricePoint};
use crate::registry::Registry;
use crate::services::sample_service;

pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 600;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Removes the backing bitmap file when dropped, on success and error paths alike
struct TempImage {
    path: PathBuf,
}

impl TempImage {
    fn new_in(dir: &Path) -> Self {
        let path = dir.join(format!("price_chart_{}.png", uuid::Uuid::new_v4()));
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempImage {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Render the chart for the asset called `name`, one point per day ending today
pub fn render(registry: &Registry, name: &str) -> Result<Vec<u8>, TrackerError> {
    let asset = registry.lookup(name)?;
    let dates = sample_service::generate_dates(asset.prices.len());
    render_asset(asset, &dates, CHART_WIDTH, CHART_HEIGHT)
}

/// Render an asset's prices against `dates` as PNG bytes
pub fn render_asset(
    asset: &Asset,
    dates: &[NaiveDate],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, TrackerError> {
    render_asset_in(&std::env::temp_dir(), asset, dates, width, height)
}

/// Same as `render_asset`, with the scratch bitmap placed in `dir`
fn render_asset_in(
    dir: &Path,
    asset: &Asset,
    dates: &[NaiveDate],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, TrackerError> {
    let points = align(dates, &asset.prices);

    if points.len() < 2 {
        return Err(TrackerError::InsufficientData(format!(
            "not enough price data to chart {} (minimum 2 points required)",
            asset.name
        )));
    }

    with_temp_image(dir, |path| draw_chart(path, &asset.name, &points, width, height))
}

/// Run `draw` against a fresh bitmap path in `dir` and return the PNG it wrote.
/// The file is gone once this returns, whatever `draw` did.
fn with_temp_image<F>(dir: &Path, draw: F) -> Result<Vec<u8>, TrackerError>
where
    F: FnOnce(&Path) -> Result<(), TrackerError>,
{
    let image = TempImage::new_in(dir);
    draw(image.path())?;

    let image_data = fs::read(image.path())
        .map_err(|e| TrackerError::Chart(format!("Failed to read chart file: {}", e)))?;

    if !image_data.starts_with(&PNG_SIGNATURE) {
        return Err(TrackerError::Chart("backend produced a non-PNG image".to_string()));
    }

    Ok(image_data)
}

fn to_datetime(date: NaiveDate) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc)
}

/// Draw into a bitmap at `path`. The drawing area lives only for this call.
fn draw_chart(
    path: &Path,
    name: &str,
    points: &[PricePoint],
    width: u32,
    height: u32,
) -> Result<(), TrackerError> {
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| TrackerError::Chart(format!("Failed to fill canvas: {}", e)))?;

    // Find price range
    let min_price = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);

    // Pad the range; a flat series still needs a non-empty axis
    let price_range = max_price - min_price;
    let padding = (price_range * 0.1).max(max_price.abs() * 0.01).max(0.01);
    let y_min = (min_price - padding).max(0.0);
    let y_max = max_price + padding;

    let x_min = to_datetime(points[0].date);
    let x_max = to_datetime(points[points.len() - 1].date);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Price of {} over the last {} days", name, points.len()),
            ("sans-serif", 30.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(100)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| TrackerError::Chart(format!("Failed to build chart: {}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Price ($)")
        .x_labels(points.len().min(15))
        .x_label_formatter(&|d: &DateTime<Utc>| d.format("%Y-%m-%d").to_string())
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_formatter(&|p: &f64| format!("{:.2}", p))
        .draw()
        .map_err(|e| TrackerError::Chart(format!("Failed to draw mesh: {}", e)))?;

    let series: Vec<(DateTime<Utc>, f64)> = points
        .iter()
        .map(|p| (to_datetime(p.date), p.price))
        .collect();

    chart
        .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
        .map_err(|e| TrackerError::Chart(format!("Failed to draw line: {}", e)))?;

    chart
        .draw_series(series.iter().map(|(x, y)| Circle::new((*x, *y), 4, BLUE.filled())))
        .map_err(|e| TrackerError::Chart(format!("Failed to draw points: {}", e)))?;

    root.present()
        .map_err(|e| TrackerError::Chart(format!("Failed to render chart: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::new(vec![
            Asset::new("Bitcoin", "BTC", 1.1e12, sample_service::generate_prices(30)),
            Asset::new("Flat", "FLT", 1.0, vec![5.0; 10]),
            Asset::new("Lonely", "ONE", 1.0, vec![5.0]),
        ])
    }

    #[test]
    fn test_render_known_asset_is_png() {
        let bytes = render(&registry(), "bitcoin").unwrap();
        assert!(bytes.len() > PNG_SIGNATURE.len());
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_render_flat_series() {
        let bytes = render(&registry(), "Flat").unwrap();
        assert!(bytes.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn test_render_unknown_asset() {
        assert!(matches!(
            render(&registry(), "Monopoly Money"),
            Err(TrackerError::NotFound(_))
        ));
    }

    #[test]
    fn test_render_single_point() {
        assert!(matches!(
            render(&registry(), "lonely"),
            Err(TrackerError::InsufficientData(_))
        ));
    }

    /// A private scratch directory, removed at the end of the test
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("chart_test_{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn file_count(&self) -> usize {
            fs::read_dir(&self.0).unwrap().count()
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_temp_image_removed_on_drop() {
        let scratch = ScratchDir::new();
        let image = TempImage::new_in(&scratch.0);
        fs::write(image.path(), b"x").unwrap();
        let path = image.path().to_path_buf();
        assert!(path.exists());
        drop(image);
        assert!(!path.exists());
    }

    #[test]
    fn test_render_leaves_no_file_behind() {
        let scratch = ScratchDir::new();
        let asset = Asset::new("Bitcoin", "BTC", 1.1e12, vec![100.0, 110.0, 90.0]);
        let dates = sample_service::generate_dates(asset.prices.len());

        let bytes = render_asset_in(&scratch.0, &asset, &dates, 400, 300).unwrap();

        assert!(bytes.starts_with(&PNG_SIGNATURE));
        assert_eq!(scratch.file_count(), 0);
    }

    #[test]
    fn test_failed_draw_leaves_no_file_behind() {
        let scratch = ScratchDir::new();

        let result = with_temp_image(&scratch.0, |path| {
            fs::write(path, b"partial").unwrap();
            Err(TrackerError::Chart("Failed to draw line".to_string()))
        });

        assert!(matches!(result, Err(TrackerError::Chart(_))));
        assert_eq!(scratch.file_count(), 0);
    }

    #[test]
    fn test_non_png_output_is_rejected_and_removed() {
        let scratch = ScratchDir::new();

        let result = with_temp_image(&scratch.0, |path| {
            fs::write(path, b"GIF89a").map_err(|e| TrackerError::Chart(e.to_string()))
        });

        assert!(matches!(result, Err(TrackerError::Chart(_))));
        assert_eq!(scratch.file_count(), 0);
    }
}
