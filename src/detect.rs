//! Change detection over a commit's file list.

use crate::github::CommitFile;

/// Status value that counts as a modification. Added, removed and renamed
/// files never trigger the webhook, even when their path matches the
/// watched file.
const MODIFIED: &str = "modified";

/// Returns the filenames with status "modified", in their original order.
pub fn modified_filenames(files: &[CommitFile]) -> Vec<String> {
    files
        .iter()
        .filter(|file| file.status == MODIFIED)
        .map(|file| file.filename.clone())
        .collect()
}

/// Returns true if the watched file is among the modified filenames.
/// Case-sensitive, full path match.
pub fn watched_file_modified(modified: &[String], watched_file: &str) -> bool {
    !watched_file.is_empty() && modified.iter().any(|name| name == watched_file)
}
