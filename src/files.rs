//! Reading source arrays and writing converted arrays to disk.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, TimeZone};
use log::{debug, info};

use crate::Error;

pub const OUTPUT_PREFIX: &str = "parsed_markers_";
pub const OUTPUT_EXTENSION: &str = "txt";

/// Read the whole source file into a string.
pub fn read_source(path: &Path) -> Result<String, Error> {
    info!("Reading from file {}", path.display());
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Output file name for a conversion started at `timestamp`, e.g.
/// `parsed_markers_2021-03-04T20:15:00+01:00.txt`.
pub fn output_file_name<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!(
        "{}{}.{}",
        OUTPUT_PREFIX,
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        OUTPUT_EXTENSION
    )
}

/// Write `contents` plus a trailing newline to `dir/file_name`.
///
/// A file with the same name is deleted first.
pub fn write_output(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, Error> {
    let path = dir.join(file_name);

    match fs::remove_file(&path) {
        Ok(()) => info!("Deleted pre-existing file with same name"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No file with same name found, creating...");
        }
        Err(source) => return Err(Error::Write { path, source }),
    }

    let write = |path: &Path| -> io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "{}", contents)?;
        file.sync_all()
    };
    if let Err(source) = write(&path) {
        return Err(Error::Write { path, source });
    }

    info!("Created output file {}", path.display());
    Ok(path)
}

/// Write `contents` to a timestamped output file in `dir`.
pub fn write_timestamped<Tz: TimeZone>(
    dir: &Path,
    timestamp: &DateTime<Tz>,
    contents: &str,
) -> Result<PathBuf, Error>
where
    Tz::Offset: fmt::Display,
{
    write_output(dir, &output_file_name(timestamp), contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{FixedOffset, Utc};

    use crate::{convert, OutputFormat};

    #[test]
    fn test_output_file_name() {
        let utc = Utc.with_ymd_and_hms(2021, 3, 4, 19, 15, 0).unwrap();
        assert_eq!(
            output_file_name(&utc),
            "parsed_markers_2021-03-04T19:15:00Z.txt"
        );

        let cet = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2021, 3, 4, 20, 15, 0)
            .unwrap();
        assert_eq!(
            output_file_name(&cet),
            "parsed_markers_2021-03-04T20:15:00+01:00.txt"
        );
    }

    #[test]
    fn test_read_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sqf");
        match read_source(&path) {
            Err(Error::Read { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_write_output() {
        let _ = env_logger::try_init();
        let dir = tempfile::tempdir().unwrap();
        let path = write_output(dir.path(), "out.txt", "[[],[]]").unwrap();
        assert_eq!(path, dir.path().join("out.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[[],[]]\n");
    }

    #[test]
    fn test_write_output_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("out.txt"), "stale contents that are longer").unwrap();
        let path = write_output(dir.path(), "out.txt", "[[],[]]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[[],[]]\n");
    }

    #[test]
    fn test_write_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap();
        let path = write_timestamped(dir.path(), &now, "[[],[]]").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "parsed_markers_2022-01-02T03:04:05Z.txt"
        );
    }

    #[test]
    fn test_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("markers.sqf");
        fs::write(&source, "[\n  [\"TRP1\", \"123.4\", \"56.7\"]\n]\n").unwrap();

        let text = read_source(&source).unwrap();
        let converted = convert(&text, OutputFormat::Padded).unwrap();
        let path = write_output(dir.path(), "out.txt", &converted).unwrap();
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "[[],[[\"TRP1\",\"00123\",\"00056\"]]]\n"
        );
    }

    #[test]
    fn test_malformed_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("markers.sqf");
        fs::write(&source, r#"[["TRP1","abc","56.7"]]"#).unwrap();

        let text = read_source(&source).unwrap();
        let result = convert(&text, OutputFormat::Padded)
            .and_then(|converted| write_timestamped(dir.path(), &Utc::now(), &converted));
        assert!(matches!(result, Err(Error::InvalidCoordinate { .. })));

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("markers.sqf")]);
    }
}
