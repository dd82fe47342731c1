//! Table codecs at the edges of the engine: the three-column observation
//! table consumed at ingestion and the epsilon result table produced at the end.

mod csv;
pub mod observations;
pub mod results;

pub use observations::{load_index, load_observations, read_observations, write_observations};
pub use results::{read_results, save_results, write_results};
