/// Point sets at least this large are rotated in parallel.
pub const PARALLEL_THRESHOLD: usize = 100_000;

/// Points per parallel work unit.
pub const CHUNK_SIZE: usize = 25_000;

/// Field delimiter for coordinate tables.
pub const TABLE_DELIMITER: char = ',';

/// Lines starting with this prefix are ignored when reading tables.
pub const TABLE_COMMENT_PREFIX: char = '#';

/// Progress bar refresh interval, in points.
pub const PROGRESS_UPDATE_INTERVAL: usize = 50_000;

/// Progress bar template for point loading.
pub const LOAD_PROGRESS_TEMPLATE: &str =
    "[{bar:40.cyan/blue}] {pos}/{len} points ({percent}%) {msg}";

/// Progress bar template for point writing.
pub const WRITE_PROGRESS_TEMPLATE: &str =
    "[{bar:40.green/blue}] {pos}/{len} points ({percent}%) {msg}";

/// Progress bar fill characters.
pub const PROGRESS_CHARS: &str = "▉▊▋▌▍▎▏ ";
