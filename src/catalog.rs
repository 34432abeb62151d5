//! Catalogue loading: `satellites-api.json` in, a vector of ready-to-propagate
//! satellites out. Ingestion itself carries no algorithmic weight — it only
//! exists to supply inputs to the screening pipeline.

use crate::error::{Result, ScreenError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sgp4::{Constants, Elements};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogueRecord {
    #[serde(rename = "OBJECT_ID")]
    object_id: String,
    #[serde(rename = "TLE_LINE1")]
    tle_line1: String,
    #[serde(rename = "TLE_LINE2")]
    tle_line2: String,
}

/// One catalogue entry, ready for repeated SGP4 propagation. The catalogue
/// index (position of this satellite in the loaded `Vec`) is its identity
/// throughout the pipeline; it is not stored on the struct itself.
pub struct Satellite {
    pub object_id: String,
    pub tle_line1: String,
    pub tle_line2: String,
    pub elements: Elements,
    pub constants: Constants,
    pub loaded_at: DateTime<Utc>,
}

/// Load and parse the catalogue at `path`. A missing or malformed file is a
/// fatal startup error. Entries whose TLE fails to parse or whose SGP4
/// constants fail to initialize are dropped with a warning; the load only
/// fails outright if every entry is dropped this way.
pub fn load_catalogue<P: AsRef<Path>>(path: P) -> Result<Vec<Satellite>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ScreenError::CatalogueIo {
        path: path.display().to_string(),
        source,
    })?;

    let records: Vec<CatalogueRecord> = serde_json::from_str(&text)?;
    tracing::info!("loaded {} catalogue records from {}", records.len(), path.display());

    let now = Utc::now();
    let mut satellites = Vec::with_capacity(records.len());

    for record in records {
        let elements = match Elements::from_tle(
            Some(record.object_id.clone()),
            record.tle_line1.as_bytes(),
            record.tle_line2.as_bytes(),
        ) {
            Ok(elements) => elements,
            Err(err) => {
                tracing::warn!(
                    "skipping satellite {} due to TLE parse error: {}",
                    record.object_id,
                    err
                );
                continue;
            }
        };

        let constants = match Constants::from_elements(&elements) {
            Ok(constants) => constants,
            Err(err) => {
                tracing::warn!(
                    "skipping satellite {} due to SGP4 init error: {}",
                    record.object_id,
                    err
                );
                continue;
            }
        };

        satellites.push(Satellite {
            object_id: record.object_id,
            tle_line1: record.tle_line1,
            tle_line2: record.tle_line2,
            elements,
            constants,
            loaded_at: now,
        });
    }

    tracing::info!("{} satellites usable after TLE/SGP4 validation", satellites.len());

    if satellites.is_empty() {
        return Err(ScreenError::NoSatelliteData);
    }

    Ok(satellites)
}
