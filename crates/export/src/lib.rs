//! Export helpers for body-position snapshots in CSV and JSON form.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Open an export target. `-` selects stdout; missing parent directories of a file
/// target are created first.
pub fn open_output(path: &Path) -> io::Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdout().lock()));
    }
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)?,
        _ => {}
    }
    Ok(Box::new(BufWriter::new(File::create(path)?)))
}

pub mod snapshot {
    use serde::Serialize;

    /// Position (and, in N-body mode, velocity) of one body at one instant.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct BodySample {
        pub name: String,
        pub body_type: String,
        pub parent: Option<String>,
        pub position: [f64; 3],
        #[serde(skip_serializing_if = "Option::is_none")]
        pub velocity: Option<[f64; 3]>,
    }

    /// Every body of a system at one simulated time.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Snapshot {
        pub system: String,
        pub time: f64,
        pub mode: String,
        pub bodies: Vec<BodySample>,
    }
}

pub mod csv {
    use std::io::{self, Write};

    use crate::snapshot::Snapshot;

    pub const HEADER: [&str; 12] = [
        "system", "time", "mode", "body", "type", "parent", "x", "y", "z", "vx", "vy", "vz",
    ];

    /// One row per body per snapshot, under a fixed header. Fields that need it
    /// (names with commas or quotes) are quoted.
    pub struct SnapshotCsvWriter<W: Write> {
        inner: ::csv::Writer<W>,
    }

    impl<W: Write> SnapshotCsvWriter<W> {
        /// Wrap `output` and write the header row.
        pub fn new(output: W) -> ::csv::Result<Self> {
            let mut inner = ::csv::WriterBuilder::new().from_writer(output);
            inner.write_record(HEADER)?;
            Ok(Self { inner })
        }

        /// Append every body of `snapshot`. Velocity columns stay empty outside N-body mode.
        pub fn write_snapshot(&mut self, snapshot: &Snapshot) -> ::csv::Result<()> {
            let time = format!("{:.6}", snapshot.time);
            for body in &snapshot.bodies {
                let [x, y, z] = body.position.map(|c| format!("{c:.9}"));
                let [vx, vy, vz] = match body.velocity {
                    Some(velocity) => velocity.map(|c| format!("{c:.9}")),
                    None => Default::default(),
                };
                self.inner.write_record([
                    snapshot.system.as_str(),
                    time.as_str(),
                    snapshot.mode.as_str(),
                    body.name.as_str(),
                    body.body_type.as_str(),
                    body.parent.as_deref().unwrap_or(""),
                    x.as_str(),
                    y.as_str(),
                    z.as_str(),
                    vx.as_str(),
                    vy.as_str(),
                    vz.as_str(),
                ])?;
            }
            Ok(())
        }

        pub fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }

        /// Flush and hand back the underlying writer.
        pub fn into_inner(self) -> io::Result<W> {
            self.inner.into_inner().map_err(|err| err.into_error())
        }
    }
}

pub mod json {
    use std::io::Write;

    use serde_json::to_writer_pretty;

    use crate::snapshot::Snapshot;

    /// Write a sequence of snapshots as a pretty-printed JSON array.
    pub fn write_snapshots<W: Write>(writer: W, snapshots: &[Snapshot]) -> serde_json::Result<()> {
        to_writer_pretty(writer, snapshots)
    }
}
