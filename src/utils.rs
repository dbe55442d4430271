use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One scanned regular file: where it lives, how big it is, and its
/// content fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size: u64,
    pub hash: String,
}

pub fn format_human_elapsed(elapsed: std::time::Duration) -> String {
    let elapsed_secs = elapsed.as_secs();
    let elapsed_subsec_millis = elapsed.subsec_millis();
    if elapsed_secs >= 3600 {
        // Format as h:mm:ss
        let hours = elapsed_secs / 3600;
        let minutes = (elapsed_secs % 3600) / 60;
        let seconds = elapsed_secs % 60;
        format!("{hours}:{minutes:02}:{seconds:02}.{elapsed_subsec_millis:03} (h:mm:ss.mmm)")
    } else if elapsed_secs >= 60 {
        // Format as m:ss
        let minutes = elapsed_secs / 60;
        let seconds = elapsed_secs % 60;
        format!("{minutes}:{seconds:02}.{elapsed_subsec_millis:03} (m:ss.mmm)")
    } else {
        // Format as s.mmm
        format!("{}.{:03} seconds", elapsed_secs, elapsed_subsec_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn formats_sub_minute_durations_as_seconds() {
        assert_eq!(format_human_elapsed(Duration::from_millis(1500)), "1.500 seconds");
    }

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(
            format_human_elapsed(Duration::from_secs(75)),
            "1:15.000 (m:ss.mmm)"
        );
        assert_eq!(
            format_human_elapsed(Duration::from_secs(3 * 3600 + 62)),
            "3:01:02.000 (h:mm:ss.mmm)"
        );
    }
}
