use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;
use ndarray::{Array2, ArrayView1};
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::point::{Centroid, Point};

/// Field separator used for every table this crate reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    pub delimiter: u8,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Represents a numerical table loaded from a delimited text file
#[derive(Debug, Clone)]
pub struct DataSet {
    pub data: Array2<f64>,
    pub source: PathBuf,
}

impl DataSet {
    /// Read a header-less delimited file into a DataSet.
    ///
    /// Every row must have the same number of columns and every field must
    /// parse as a number. Blank lines are skipped.
    pub fn from_delimited<P: AsRef<Path>>(path: P, format: &CsvFormat) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut rdr = ReaderBuilder::new()
            .delimiter(format.delimiter)
            .has_headers(false)
            .trim(Trim::All)
            .from_reader(file);

        let mut flat: Vec<f64> = Vec::new();
        let mut nrows = 0;
        let mut ncols = 0;

        for result in rdr.records() {
            let record = result.map_err(|source| Error::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            ncols = record.len();
            flat.try_reserve(ncols)?;
            for (col, field) in record.iter().enumerate() {
                let value = field.parse::<f64>().map_err(|_| Error::Parse {
                    path: path.to_path_buf(),
                    row: nrows + 1,
                    column: col + 1,
                    field: field.to_string(),
                })?;
                flat.push(value);
            }
            nrows += 1;
        }

        if nrows == 0 || ncols == 0 {
            return Err(Error::Empty(path.to_path_buf()));
        }

        let found = flat.len() / nrows;
        let data = Array2::from_shape_vec((nrows, ncols), flat)
            .map_err(|_| Error::DimensionMismatch { expected: ncols, found })?;
        debug!("read {} rows x {} columns from {:?}", nrows, ncols, path);

        Ok(Self {
            data,
            source: path.to_path_buf(),
        })
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// One unassigned [`Point`] per row.
    pub fn to_points(&self) -> Result<Vec<Point>> {
        let mut points = Vec::new();
        points.try_reserve_exact(self.nrows())?;
        points.extend(self.data.outer_iter().map(|row| Point::new(row.to_owned())));
        Ok(points)
    }

    /// One [`Centroid`] per row, checked against the points' dimension.
    pub fn to_centroids(&self, dimensions: usize) -> Result<Vec<Centroid>> {
        if self.ncols() != dimensions {
            return Err(Error::DimensionMismatch {
                expected: dimensions,
                found: self.ncols(),
            });
        }
        let mut centroids = Vec::new();
        centroids.try_reserve_exact(self.nrows())?;
        centroids.extend(self.data.outer_iter().map(|row| Centroid::new(row.to_owned())));
        Ok(centroids)
    }
}

/// `<data>.clusters.csv` next to the input file
pub fn clusters_path<P: AsRef<Path>>(data: P) -> PathBuf {
    with_suffix(data.as_ref(), ".clusters.csv")
}

/// `<data>.centroids.csv` next to the input file
pub fn centroids_path<P: AsRef<Path>>(data: P) -> PathBuf {
    with_suffix(data.as_ref(), ".centroids.csv")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn row_fields(values: ArrayView1<'_, f64>) -> impl Iterator<Item = String> + '_ {
    values.into_iter().map(|v| v.to_string())
}

/// Write every point followed by its cluster index, with a `dim1,..,cluster` header.
pub fn write_clusters<P: AsRef<Path>>(path: P, points: &[Point], format: &CsvFormat) -> Result<()> {
    let path = path.as_ref();
    let dims = points.first().map_or(0, Point::dimensions);

    let mut header: Vec<String> = (1..=dims).map(|d| format!("dim{}", d)).collect();
    header.push("cluster".to_string());

    let mut rows = Vec::with_capacity(points.len());
    for point in points {
        let mut fields: Vec<String> = row_fields(point.values()).collect();
        fields.push(point.cluster.map_or_else(String::new, |c| c.to_string()));
        rows.push(fields);
    }
    write_table(path, Some(header), rows, format)
}

/// Write one header-less row per centroid, readable again as a centroid source.
pub fn write_centroids<P: AsRef<Path>>(path: P, centroids: &[Centroid], format: &CsvFormat) -> Result<()> {
    let rows = centroids
        .iter()
        .map(|c| row_fields(c.values()).collect())
        .collect();
    write_table(path.as_ref(), None, rows, format)
}

fn write_table(
    path: &Path,
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    format: &CsvFormat,
) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut wtr = WriterBuilder::new()
        .delimiter(format.delimiter)
        .from_writer(file);

    let csv_err = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };
    if let Some(header) = header {
        wtr.write_record(&header).map_err(csv_err)?;
    }
    for row in rows {
        wtr.write_record(&row).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_table(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_comma_table() {
        let file = temp_table("1.0,2.0,3.0\n4, 5 ,6\n\n-7.5,8e1,9\n");
        let ds = DataSet::from_delimited(file.path(), &CsvFormat::default()).unwrap();
        assert_eq!(ds.nrows(), 3);
        assert_eq!(ds.ncols(), 3);
        assert_eq!(ds.data[[1, 1]], 5.0);
        assert_eq!(ds.data[[2, 1]], 80.0);

        let points = ds.to_points().unwrap();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.cluster.is_none() && p.dimensions() == 3));
    }

    #[test]
    fn test_read_tab_table() {
        let file = temp_table("0\t1\n2\t3\n");
        let format = CsvFormat { delimiter: b'\t' };
        let ds = DataSet::from_delimited(file.path(), &format).unwrap();
        assert_eq!(ds.data.shape(), &[2, 2]);
    }

    #[test]
    fn test_malformed_tables_are_input_errors() {
        let format = CsvFormat::default();

        let ragged = temp_table("1,2\n3\n");
        let err = DataSet::from_delimited(ragged.path(), &format).unwrap_err();
        assert!(matches!(err, Error::Csv { .. }));

        let text = temp_table("1,2\n3,abc\n");
        let err = DataSet::from_delimited(text.path(), &format).unwrap_err();
        assert!(matches!(err, Error::Parse { row: 2, column: 2, .. }));

        let empty = temp_table("");
        let err = DataSet::from_delimited(empty.path(), &format).unwrap_err();
        assert!(matches!(err, Error::Empty(_)));

        let err = DataSet::from_delimited("/definitely/not/here.csv", &format).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_centroid_width_must_match() {
        let file = temp_table("1,2\n3,4\n");
        let ds = DataSet::from_delimited(file.path(), &CsvFormat::default()).unwrap();
        assert_eq!(ds.to_centroids(2).unwrap().len(), 2);
        let err = ds.to_centroids(3).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 3, found: 2 }));
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(clusters_path("data/points.csv"), PathBuf::from("data/points.csv.clusters.csv"));
        assert_eq!(centroids_path("points.csv"), PathBuf::from("points.csv.centroids.csv"));
    }

    #[test]
    fn test_write_clusters_layout() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let mut points = vec![Point::from_slice(&[0.5, 1.0]), Point::from_slice(&[2.0, -3.25])];
        points[0].cluster = Some(1);
        points[1].cluster = Some(0);

        write_clusters(&out, &points, &CsvFormat::default()).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, "dim1,dim2,cluster\n0.5,1,1\n2,-3.25,0\n");
    }

    #[test]
    fn test_written_centroids_read_back_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("centroids.csv");
        let centroids = vec![
            Centroid::from_slice(&[1.0 / 3.0, 2.0e-7]),
            Centroid::from_slice(&[-123456.789, 0.1 + 0.2]),
        ];

        write_centroids(&out, &centroids, &CsvFormat::default()).unwrap();
        let ds = DataSet::from_delimited(&out, &CsvFormat::default()).unwrap();
        assert_eq!(ds.to_centroids(2).unwrap(), centroids);
    }
}
