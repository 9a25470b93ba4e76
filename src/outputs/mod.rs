//! Output writers.
//!
//! - [`json`]: writes the article collection to a timestamped JSON file
//!
//! ```text
//! ./
//! └── cnn_lite_202405060708.json
//! ```

pub mod json;
