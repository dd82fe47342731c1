//! Shared constants for file formats, configuration, and logging.

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "AITIA_LOG";

/// Filter used when `AITIA_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "aitia=info";

/// Project-level config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "aitia.toml";

/// User-level config directory under the home directory.
pub const USER_CONFIG_DIR: &str = ".aitia";

/// Header written for observation tables. Readers only check the column count.
pub const OBSERVATION_HEADER: [&str; 3] = ["case:concept:name", "observation", "time:timestamp"];

/// Header of the epsilon result table.
pub const RESULT_HEADER: [&str; 5] = ["cause", "effect", "w-start", "w-end", "epsilon"];

/// Token written in place of an undefined epsilon.
pub const DEFAULT_UNDEFINED_MARKER: &str = "None";

/// Default field delimiter for both tables.
pub const DEFAULT_DELIMITER: char = ',';
