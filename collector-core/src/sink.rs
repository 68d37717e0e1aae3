use std::{
    fs::{self, OpenOptions},
    path::Path,
};

use csv::WriterBuilder;
use tracing::info;

use crate::{
    error::{CollectorError, Result},
    model::WeatherRecord,
};

/// Append one record to the CSV log at `path`.
///
/// Missing parent directories are created. A file that does not exist yet
/// gets the header row first; an existing file is only ever appended to,
/// so its prior contents survive intact.
pub fn append_record(path: &Path, record: &WeatherRecord) -> Result<()> {
    ensure_parent_dir(path)?;

    let is_new = !path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| CollectorError::FileOpen(path.to_path_buf(), err))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    if is_new {
        writer
            .write_record(WeatherRecord::FIELDS)
            .map_err(|err| CollectorError::CsvWrite(path.to_path_buf(), err))?;
    }

    writer
        .serialize(record)
        .map_err(|err| CollectorError::CsvWrite(path.to_path_buf(), err))?;
    writer
        .flush()
        .map_err(|err| CollectorError::Flush(path.to_path_buf(), err))?;

    info!("Data saved to {}", path.display());

    Ok(())
}

/// Create `path`'s parent directories. A bare filename has an empty parent
/// component, which is not a directory to create.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent)
            .map_err(|err| CollectorError::DirCreate(parent.to_path_buf(), err))?;
    }

    Ok(())
}
