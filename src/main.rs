//main.rs
use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use kmeans_lloyd::{
    centroids_path, clusters_path, write_centroids, write_clusters, ClusterEngine, Clustering, CsvFormat,
    DataSet, EngineConfig, Error, DEFAULT_MAX_ITERATIONS,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(version = "0.1.0", author = "Stefan L. <stefan.lang@med.lu.se>")]
#[clap(about = "Cluster the rows of a delimited file with Lloyd's k-means")]
struct Opts {
    /// Delimited file with one point per row and no header
    data_file: PathBuf,

    /// Number of clusters (ignored when a centroid file is given)
    #[clap(allow_negative_numbers = true)]
    k: i64,

    /// Maximum number of iterations
    #[clap(default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Delimited file with the initial centroids, one per row
    centroid_file: Option<PathBuf>,

    /// Field delimiter of the input and output tables
    #[clap(short, long, default_value_t = ',')]
    delimiter: char,
}

impl Opts {
    fn format(&self) -> anyhow::Result<CsvFormat> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        Ok(CsvFormat {
            delimiter: self.delimiter as u8,
        })
    }

    /// Where the initial centroids come from, checked before any file is read.
    fn seeding(&self) -> Result<Seeding, Error> {
        if let Some(path) = &self.centroid_file {
            return Ok(Seeding::File(path.clone()));
        }
        match usize::try_from(self.k) {
            Ok(k) if k > 0 => Ok(Seeding::Evenly(k)),
            _ => Err(Error::Config("Number of clusters must be positive".into())),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Seeding {
    File(PathBuf),
    Evenly(usize),
}

fn print_report(result: &Clustering) {
    for (i, centroid) in result.centroids.iter().enumerate() {
        let center = centroid
            .values()
            .iter()
            .map(|v| format!("{:.2}", v))
            .collect::<Vec<_>>()
            .join(", ");
        println!("\nCluster {}:", i);
        println!("Center: ({})", center);
        println!("Points in cluster: {}", centroid.count());
    }
    println!("\nInertia: {:.4}", result.inertia());
}

fn run(opts: Opts) -> anyhow::Result<()> {
    let format = opts.format()?;
    let seeding = opts.seeding()?;

    let ds = DataSet::from_delimited(&opts.data_file, &format)?;
    println!(
        "Read {} points with {} dimensions from {}",
        ds.nrows(),
        ds.ncols(),
        opts.data_file.display()
    );
    let points = ds.to_points()?;

    let config = EngineConfig {
        max_iterations: opts.max_iterations,
    };
    let engine = match seeding {
        Seeding::File(centroid_file) => {
            println!("Reading initial centroids from {}", centroid_file.display());
            let centroids = DataSet::from_delimited(&centroid_file, &format)?.to_centroids(ds.ncols())?;
            println!("Using {} centroids from file", centroids.len());
            ClusterEngine::new(points, centroids, config)?
        }
        Seeding::Evenly(k) => {
            println!("Initializing {} centroids automatically", k);
            ClusterEngine::with_seeding(points, k, config)?
        }
    };

    let result = engine.run();
    print_report(&result);

    let clusters_out = clusters_path(&opts.data_file);
    write_clusters(&clusters_out, &result.points, &format)
        .with_context(|| format!("saving cluster assignments for {}", opts.data_file.display()))?;
    println!("\nResults saved to {}", clusters_out.display());

    let centroids_out = centroids_path(&opts.data_file);
    write_centroids(&centroids_out, &result.centroids, &format)
        .with_context(|| format!("saving centroids for {}", opts.data_file.display()))?;
    println!("Final centroids saved to {}", centroids_out.display());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            // usage errors exit with 1, --help and --version with 0
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    run(opts)
}
