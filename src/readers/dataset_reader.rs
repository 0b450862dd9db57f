use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::Result;
use crate::models::RawObservation;

/// Reads the long-format historical sensor export.
///
/// The export carries one measurement per row with columns
/// `datetime, lat, lon, parameter, value` (plus ignored metadata columns).
/// Rows whose parameter has no breakpoint table, or whose value is not
/// finite, are dropped.
pub struct DatasetReader;

impl DatasetReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_observations(&self, path: &Path) -> Result<Vec<RawObservation>> {
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut observations = Vec::new();
        let mut skipped = 0usize;

        for record in reader.deserialize::<RawObservation>() {
            let observation = record?;
            if observation.is_usable() {
                observations.push(observation);
            } else {
                skipped += 1;
            }
        }

        debug!(
            kept = observations.len(),
            skipped, "finished reading observations"
        );

        Ok(observations)
    }
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::aqi::Pollutant;

    #[test]
    fn test_read_observations_keeps_pollutant_rows() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "location_id,sensors_id,location,datetime,lat,lon,parameter,units,value"
        )?;
        writeln!(
            temp_file,
            "226,552,\"Delhi, Anand Vihar\",2023-07-15T10:00:00+05:30,28.6469,77.3160,pm25,µg/m³,42.5"
        )?;
        writeln!(
            temp_file,
            "226,553,\"Delhi, Anand Vihar\",2023-07-15T10:00:00+05:30,28.6469,77.3160,pm10,µg/m³,118.0"
        )?;
        writeln!(
            temp_file,
            "226,560,\"Delhi, Anand Vihar\",2023-07-15T10:00:00+05:30,28.6469,77.3160,temperature,c,34.0"
        )?;

        let reader = DatasetReader::new();
        let observations = reader.read_observations(temp_file.path())?;

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].pollutant(), Some(Pollutant::Pm25));
        assert_eq!(observations[0].value, 42.5);
        assert_eq!(observations[1].pollutant(), Some(Pollutant::Pm10));

        Ok(())
    }

    #[test]
    fn test_read_observations_without_metadata_columns() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "datetime,lat,lon,parameter,value")?;
        writeln!(temp_file, "2023-07-15T10:00:00+05:30,19.0760,72.8777,o3,15.5")?;

        let reader = DatasetReader::new();
        let observations = reader.read_observations(temp_file.path())?;

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].lat, 19.0760);
        assert_eq!(observations[0].pollutant(), Some(Pollutant::O3));

        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let reader = DatasetReader::new();
        let result = reader.read_observations(Path::new("/nonexistent/readings.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unparseable_value_is_an_error() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "datetime,lat,lon,parameter,value")?;
        writeln!(temp_file, "2023-07-15T10:00:00+05:30,19.0760,72.8777,o3,n/a")?;

        let reader = DatasetReader::new();
        assert!(reader.read_observations(temp_file.path()).is_err());

        Ok(())
    }
}
