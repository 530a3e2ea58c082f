use crate::models::MovieRecord;

/// Metadata fields that feed the feature blob, in concatenation order
pub const FEATURE_FIELDS: [&str; 4] = ["keywords", "cast", "genres", "director"];

/// Combines a movie's metadata into a single text blob
///
/// Fields are joined with single spaces in [`FEATURE_FIELDS`] order. An empty
/// field contributes no tokens, so a record with no metadata yields a blob
/// that vectorizes to the zero vector.
pub fn compose(record: &MovieRecord) -> String {
    [
        record.keywords.as_str(),
        record.cast.as_str(),
        record.genres.as_str(),
        record.director.as_str(),
    ]
    .join(" ")
}

/// Composes one blob per record, preserving corpus order
pub fn compose_corpus(records: &[MovieRecord]) -> Vec<String> {
    records.iter().map(compose).collect()
}
