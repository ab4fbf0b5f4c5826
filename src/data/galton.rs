//! The reference dataset: a 20-pair sample of Galton's parent/child heights.
//!
//! `x` is the mid-parent height and `y` the adult child height, in inches.

use crate::domain::{DataPoint, FitParameters};

pub const GALTON_HEIGHTS: [DataPoint; 20] = [
    DataPoint::new(64.0, 63.0),
    DataPoint::new(64.5, 66.0),
    DataPoint::new(65.0, 65.0),
    DataPoint::new(65.5, 65.5),
    DataPoint::new(66.0, 67.0),
    DataPoint::new(66.5, 66.5),
    DataPoint::new(67.0, 68.0),
    DataPoint::new(67.5, 67.0),
    DataPoint::new(68.0, 69.5),
    DataPoint::new(68.5, 68.5),
    DataPoint::new(69.0, 69.0),
    DataPoint::new(69.5, 70.0),
    DataPoint::new(70.0, 69.5),
    DataPoint::new(70.5, 70.5),
    DataPoint::new(71.0, 72.0),
    DataPoint::new(71.5, 71.0),
    DataPoint::new(72.0, 71.0),
    DataPoint::new(72.5, 72.5),
    DataPoint::new(73.0, 73.0),
    DataPoint::new(74.0, 72.0),
];

/// Starting line shown before the user touches anything.
pub const INITIAL_PARAMS: FitParameters = FitParameters::new(0.5, 30.0);

/// Axis labels used by the chart, plot and prompt.
pub const X_LABEL: &str = "parent height (in)";
pub const Y_LABEL: &str = "child height (in)";
