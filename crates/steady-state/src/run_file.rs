//! Run files and result files
//!
//! A run file is a JSON array of arrays of numbers; every inner array is the
//! sample sequence of one run of the same benchmark:
//!
//! ```json
//! [[12.1, 11.9, 12.4, ...], [12.0, 12.2, 11.8, ...]]
//! ```
//!
//! Results go to a sibling file with the same stem and the output extension,
//! one line appended per run.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SteadyStateError};

/// Parsed contents of one run file
#[derive(Debug, Clone, PartialEq)]
pub struct RunFile {
    pub path: PathBuf,
    pub runs: Vec<Vec<f64>>,
}

impl RunFile {
    /// Read and parse a run file.
    ///
    /// # Errors
    ///
    /// Fails with [`SteadyStateError::Io`] if the file cannot be read and
    /// with [`SteadyStateError::Parse`] if it is not an array of numeric
    /// arrays. No partial data is returned.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SteadyStateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse run file content; `path` is only used for error messages.
    ///
    /// # Example
    ///
    /// ```
    /// use steady_state::run_file::RunFile;
    ///
    /// let file = RunFile::parse("bench.json", "[[1.0, 2.5], [3, 4]]").unwrap();
    /// assert_eq!(file.runs, vec![vec![1.0, 2.5], vec![3.0, 4.0]]);
    /// assert!(RunFile::parse("bench.json", "[[1.0, null]]").is_err());
    /// ```
    pub fn parse<P: AsRef<Path>>(path: P, content: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        match serde_json::from_str::<Vec<Vec<f64>>>(content) {
            Ok(runs) => Ok(RunFile { path, runs }),
            Err(source) => Err(SteadyStateError::Parse { path, source }),
        }
    }
}

/// Result file path for `input`: same directory and stem, new extension.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use steady_state::run_file::output_path;
///
/// assert_eq!(
///     output_path(Path::new("/data/bench.json"), "txt"),
///     PathBuf::from("/data/bench.txt")
/// );
/// ```
pub fn output_path(input: &Path, output_extension: &str) -> PathBuf {
    input.with_extension(output_extension)
}

/// Append `line` and a newline to `path`, creating the file if needed.
///
/// Earlier content is kept. The handle is closed before returning, whether
/// the write succeeded or not.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let io_err = |source| SteadyStateError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    writeln!(file, "{}", line).map_err(io_err)
}

/// List the files in `dir` whose extension is `extension`, sorted by path.
///
/// Sub-directories and files with other extensions are skipped.
pub fn list_run_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let io_err = |source| SteadyStateError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            paths.push(path);
        } else {
            debug!("Skipping {}: not a .{} file", path.display(), extension);
        }
    }

    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_runs() {
        let file = RunFile::parse("a.json", "[[1, 2.5, -3e2], [], [0.125]]").unwrap();
        assert_eq!(file.path, PathBuf::from("a.json"));
        assert_eq!(file.runs.len(), 3);
        assert_eq!(file.runs[0], vec![1.0, 2.5, -300.0]);
        assert!(file.runs[1].is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for content in ["", "{}", "[1, 2, 3]", "[[1, \"2\"]]", "[[1, 2]", "[[null]]"] {
            let err = RunFile::parse("bad.json", content).unwrap_err();
            assert!(matches!(err, SteadyStateError::Parse { .. }), "{content:?}");
            assert!(err.to_string().contains("bad.json"));
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = RunFile::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SteadyStateError::Io { .. }));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(&path, "[[1.5, 2.5]]").unwrap();

        let file = RunFile::load(&path).unwrap();
        assert_eq!(file.runs, vec![vec![1.5, 2.5]]);
    }

    #[test]
    fn test_output_path_replaces_extension() {
        assert_eq!(
            output_path(Path::new("runs/x.y.json"), "txt"),
            PathBuf::from("runs/x.y.txt")
        );
    }

    #[test]
    fn test_append_line_preserves_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bench.txt");
        fs::write(&path, "previous\n").unwrap();

        append_line(&path, "1200").unwrap();
        append_line(&path, "").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "previous\n1200\n\n");
    }

    #[test]
    fn test_append_line_reports_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("bench.txt");
        assert!(matches!(
            append_line(&path, "1"),
            Err(SteadyStateError::Io { .. })
        ));
    }

    #[test]
    fn test_list_run_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = list_run_files(dir.path(), "json").unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.json"), dir.path().join("b.json")]
        );
    }

    #[test]
    fn test_list_run_files_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(list_run_files(&dir.path().join("absent"), "json").is_err());
    }
}
