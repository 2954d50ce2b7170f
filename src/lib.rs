//! Stream reducers and regression-fit metrics.
//!
//! - [`streaming`]: single-pass line processors (mean, run-length counts,
//!   nested-field extraction) that read any `BufRead`
//! - [`metrics`]: goodness-of-fit statistics over prediction vectors
//! - [`linear_model`]: ordinary least squares, used to produce predictions
//!   worth scoring
//!
//! ```rust
//! use coursework::metrics;
//! use ndarray::array;
//!
//! let y_true = array![1.0, 2.0, 3.0, 4.0];
//! let y_pred = array![2.0, 2.0, 2.0, 2.0];
//! assert_eq!(metrics::mean_absolute_error(&y_true, &y_pred).unwrap(), 1.0);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod cli;
pub mod error;
pub mod linalg;
pub mod linear_model;
pub mod logging;
pub mod metrics;
pub mod streaming;

pub use error::{CourseworkError, Result};
pub use linear_model::LinearRegression;
pub use metrics::{MetricsReport, ModelScore};
pub use streaming::{Mode, SkipReason, StreamConfig, StreamReport};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
