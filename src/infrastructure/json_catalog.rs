use crate::domain::course::Course;
use crate::error::{LearnHubError, Result};
use crate::infrastructure::in_memory::StaticCatalog;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads a catalog from a JSON array of course records.
///
/// The file is read once; the result is served like the built-in catalog.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<StaticCatalog> {
    let file = File::open(path.as_ref())?;
    let catalog = read_catalog(BufReader::new(file))?;
    tracing::info!(path = %path.as_ref().display(), "loaded course catalog");
    Ok(catalog)
}

/// Parses a catalog from any `Read` source, rejecting duplicate ids.
pub fn read_catalog<R: Read>(source: R) -> Result<StaticCatalog> {
    let courses: Vec<Course> = serde_json::from_reader(source)?;

    let mut seen = HashSet::new();
    for course in &courses {
        if !seen.insert(course.id.as_str()) {
            return Err(LearnHubError::CatalogError(format!(
                "duplicate course id '{}'",
                course.id
            )));
        }
    }

    Ok(StaticCatalog::from_courses(courses))
}
