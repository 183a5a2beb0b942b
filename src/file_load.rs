use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

use crate::atlas::record::PointRecord;
use crate::error::{AtlasError, Result};

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const ELEVATION: &str = "Elevation (m)";
pub const NAME: &str = "Volcano Name";
pub const COUNTRY: &str = "Country";
pub const TYPE: &str = "Type";
pub const TYPE_CATEGORY: &str = "TypeCategory";
pub const STATUS: &str = "Status";
pub const LAST_ERUPTION: &str = "Last Known Eruption";

fn read_frame(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

fn parse_number(cell: Option<&str>) -> f64 {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| AtlasError::MissingColumn(name.to_string()))?;
    let values = column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(parse_number)
        .collect();
    Ok(values)
}

/// Absent columns decode as empty strings.
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let Ok(column) = df.column(name) else {
        tracing::warn!("record source has no {name:?} column");
        return Ok(vec![String::new(); df.height()]);
    };
    let values = column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|cell| cell.unwrap_or_default().to_string())
        .collect();
    Ok(values)
}

/// Decodes every row of the CSV at `path`, in file order.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<PointRecord>> {
    let path = path.as_ref();
    let df = read_frame(path)?;

    let latitude = numeric_column(&df, LATITUDE)?;
    let longitude = numeric_column(&df, LONGITUDE)?;
    let elevation = numeric_column(&df, ELEVATION)?;
    let mut name = text_column(&df, NAME)?.into_iter();
    let mut country = text_column(&df, COUNTRY)?.into_iter();
    let mut volcano_type = text_column(&df, TYPE)?.into_iter();
    let mut type_category = text_column(&df, TYPE_CATEGORY)?.into_iter();
    let mut status = text_column(&df, STATUS)?.into_iter();
    let mut last_eruption = text_column(&df, LAST_ERUPTION)?.into_iter();

    let records: Vec<PointRecord> = (0..df.height())
        .map(|i| PointRecord {
            latitude: latitude[i],
            longitude: longitude[i],
            elevation: elevation[i],
            name: name.next().unwrap_or_default(),
            country: country.next().unwrap_or_default(),
            volcano_type: volcano_type.next().unwrap_or_default(),
            type_category: type_category.next().unwrap_or_default(),
            status: status.next().unwrap_or_default(),
            last_eruption: last_eruption.next().unwrap_or_default(),
        })
        .collect();

    let skipped = records.iter().filter(|r| !r.is_plottable()).count();
    tracing::info!(
        "loaded {} records from {} ({skipped} unplottable)",
        records.len(),
        path.display()
    );
    Ok(records)
}

pub async fn load_records_async(path: PathBuf) -> anyhow::Result<Arc<Vec<PointRecord>>> {
    let records = task::spawn_blocking(move || load_records(path)).await??;
    Ok(Arc::new(records))
}

pub fn load_map_image(path: impl AsRef<Path>) -> Result<image::RgbImage> {
    let path = path.as_ref();
    let image = image::open(path)?.to_rgb8();
    tracing::info!(
        "loaded map image {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

pub async fn load_map_image_async(path: PathBuf) -> anyhow::Result<Arc<image::RgbImage>> {
    let image = task::spawn_blocking(move || load_map_image(path)).await??;
    Ok(Arc::new(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    const HEADER: &str = "Volcano Name,Country,Type,TypeCategory,Status,Last Known Eruption,Latitude,Longitude,Elevation (m)";

    #[test]
    fn decodes_rows_in_file_order() {
        let file = csv(&format!(
            "{HEADER}\nEtna,Italy,Stratovolcano,Stratovolcano,Historical,2023,37.748,14.999,3357\n\
             Kilauea,United States,Shield,Shield,Historical,2024,19.421,-155.287,1222\n"
        ));
        let records = load_records(file.path()).expect("load");
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            PointRecord {
                latitude: 37.748,
                longitude: 14.999,
                elevation: 3357.0,
                name: "Etna".to_string(),
                country: "Italy".to_string(),
                volcano_type: "Stratovolcano".to_string(),
                type_category: "Stratovolcano".to_string(),
                status: "Historical".to_string(),
                last_eruption: "2023".to_string(),
            }
        );
        assert_eq!(records[1].name, "Kilauea");
        assert_eq!(records[1].longitude, -155.287);
    }

    #[test]
    fn bad_numeric_cells_become_nan() {
        let file = csv(&format!(
            "{HEADER}\nA,X,T,C,S,E,unknown,10,100\nB,X,T,C,S,E,5,,100\nC,X,T,C,S,E,5,10,-1500\n"
        ));
        let records = load_records(file.path()).expect("load");
        assert!(records[0].latitude.is_nan());
        assert!(records[1].longitude.is_nan());
        assert!(!records[0].is_plottable());
        assert!(!records[1].is_plottable());
        assert!(records[2].is_plottable());
        assert_eq!(records[2].elevation, -1500.0);
    }

    #[test]
    fn missing_text_column_decodes_as_empty() {
        let file = csv("Volcano Name,Latitude,Longitude,Elevation (m)\nFuji,35.36,138.73,3776\n");
        let records = load_records(file.path()).expect("load");
        assert_eq!(records[0].name, "Fuji");
        assert_eq!(records[0].country, "");
        assert_eq!(records[0].last_eruption, "");
    }

    #[test]
    fn missing_numeric_column_is_an_error() {
        let file = csv("Volcano Name,Latitude,Longitude\nFuji,35.36,138.73\n");
        match load_records(file.path()) {
            Err(AtlasError::MissingColumn(name)) => assert_eq!(name, ELEVATION),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn missing_map_image_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(load_map_image(dir.path().join("absent.png")).is_err());
    }
}
