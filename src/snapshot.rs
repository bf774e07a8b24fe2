//! Routing-table snapshots and the RIB dump record decoder.
//!
//! A dump holds one route per line, fields separated by `|`:
//!
//! ```text
//! =|10.0.0.0/8|3356 174 64512|192.0.2.1|...
//! ```
//!
//! Field 1 is the destination prefix and field 2 the AS path. Anything after
//! the AS path is ignored.

use std::{collections::HashMap, io::BufRead};

use tracing::{debug, warn};

use crate::{
    config::RecordPolicy,
    error::{Error, Result},
};

/// Ordered AS identifiers of one announcement. Tokens are kept verbatim so that
/// AS sets like `{64512,64513}` survive decoding.
pub type AsPath = Vec<String>;

/// Point-in-time mapping destination -> AS path.
///
/// Destinations keep the order in which they were first seen in the source. A
/// later record for a known destination replaces its path in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    source_id: String,
    routes: Vec<(String, AsPath)>,
    index: HashMap<String, usize>,
    skipped_records: usize,
}

impl Snapshot {
    pub fn new(source_id: impl Into<String>) -> Self {
        Snapshot {
            source_id: source_id.into(),
            ..Default::default()
        }
    }

    /// Builds a snapshot from `(destination, path)` pairs.
    ///
    /// ```
    /// use rib_stability::Snapshot;
    ///
    /// let snap = Snapshot::from_routes("t0", vec![("10.0.0.0/8", vec![3356, 174])]);
    /// assert_eq!(snap.get("10.0.0.0/8").unwrap(), &["3356", "174"]);
    /// ```
    pub fn from_routes<I, D, P, A>(source_id: impl Into<String>, routes: I) -> Self
    where
        I: IntoIterator<Item = (D, P)>,
        D: Into<String>,
        P: IntoIterator<Item = A>,
        A: ToString,
    {
        let mut snapshot = Snapshot::new(source_id);
        for (destination, path) in routes {
            let path = path.into_iter().map(|asn| asn.to_string()).collect();
            snapshot.insert(destination.into(), path);
        }
        snapshot
    }

    /// Decodes a RIB dump. Malformed records are skipped and counted, or abort
    /// the load, depending on `policy`.
    pub fn from_reader(
        source_id: impl Into<String>,
        mut reader: impl BufRead,
        policy: RecordPolicy,
    ) -> Result<Self> {
        let mut snapshot = Snapshot::new(source_id);
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| Error::io(&snapshot.source_id, e))?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let decoded = match std::str::from_utf8(&buf) {
                Ok(line) => decode_record(line),
                Err(_) => Err("record is not valid UTF-8".to_string()),
            };

            match decoded {
                Ok(Some((destination, path))) => snapshot.insert(destination, path),
                Ok(None) => {}
                Err(reason) => match policy {
                    RecordPolicy::Strict => {
                        return Err(Error::MalformedRecord {
                            source_id: snapshot.source_id,
                            line: line_no,
                            reason,
                        })
                    }
                    RecordPolicy::Skip => {
                        debug!(source = %snapshot.source_id, line = line_no, %reason, "skipping record");
                        snapshot.skipped_records += 1;
                    }
                },
            }
        }

        if snapshot.skipped_records > 0 {
            warn!(
                source = %snapshot.source_id,
                skipped = snapshot.skipped_records,
                "skipped malformed records"
            );
        }

        Ok(snapshot)
    }

    fn insert(&mut self, destination: String, path: AsPath) {
        match self.index.get(&destination) {
            Some(&i) => self.routes[i].1 = path,
            None => {
                self.index.insert(destination.clone(), self.routes.len());
                self.routes.push((destination, path));
            }
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, destination: &str) -> Option<&AsPath> {
        self.index.get(destination).map(|&i| &self.routes[i].1)
    }

    pub fn contains(&self, destination: &str) -> bool {
        self.index.contains_key(destination)
    }

    /// Routes in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AsPath)> {
        self.routes.iter().map(|(d, p)| (d.as_str(), p))
    }

    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(d, _)| d.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &AsPath> {
        self.routes.iter().map(|(_, p)| p)
    }

    /// Number of records dropped as malformed while loading.
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }
}

/// Decodes one dump line.
///
/// Returns `Ok(None)` for lines that carry no record (blank lines, `#`
/// comments) and `Err(reason)` for lines that should carry one but do not.
/// A `#` line is a comment even when it has three fields, and an empty
/// destination field is malformed rather than an empty-string key.
pub fn decode_record(line: &str) -> std::result::Result<Option<(String, AsPath)>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields = line.split('|').collect::<Vec<&str>>();
    if fields.len() < 3 {
        return Err(format!(
            "expected at least 3 '|'-separated fields, found {}",
            fields.len()
        ));
    }

    let destination = fields[1].trim();
    if destination.is_empty() {
        return Err("empty destination field".to_string());
    }

    let path = fields[2].split_whitespace().map(String::from).collect();

    Ok(Some((destination.to_string(), path)))
}
