//! Chart viewport, line clipping and slider geometry for the terminal lab.

use crate::domain::FitParameters;

pub const DEFAULT_X_RANGE: [f64; 2] = [58.0, 76.0];
pub const DEFAULT_Y_RANGE: [f64; 2] = [55.0, 80.0];

/// Extra x extent on each side of the view used when drawing the fitted line.
const LINE_OVERHANG: f64 = 5.0;
const ZOOM_IN: f64 = 0.9;
const ZOOM_OUT: f64 = 1.1;
const PAN_FRACTION: f64 = 0.1;
const MIN_SPAN: f64 = 1e-3;

/// Visible data-space window of the scatter chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartView {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Default for ChartView {
    fn default() -> Self {
        Self {
            x: DEFAULT_X_RANGE,
            y: DEFAULT_Y_RANGE,
        }
    }
}

impl ChartView {
    pub fn zoom_in(&mut self) {
        self.scale(ZOOM_IN);
    }

    pub fn zoom_out(&mut self) {
        self.scale(ZOOM_OUT);
    }

    /// Shift by a fraction of the current span; positive moves right / up.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let sx = (self.x[1] - self.x[0]) * dx * PAN_FRACTION;
        let sy = (self.y[1] - self.y[0]) * dy * PAN_FRACTION;
        self.x = [self.x[0] + sx, self.x[1] + sx];
        self.y = [self.y[0] + sy, self.y[1] + sy];
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x[0] && x <= self.x[1] && y >= self.y[0] && y <= self.y[1]
    }

    /// Endpoints of the fitted line as drawn: evaluated over the view x-range
    /// widened on both sides, then clipped to the view box.
    pub fn line_segment(&self, params: FitParameters) -> Option<[(f64, f64); 2]> {
        let x0 = self.x[0] - LINE_OVERHANG;
        let x1 = self.x[1] + LINE_OVERHANG;
        clip_segment((x0, params.predict(x0)), (x1, params.predict(x1)), self)
    }

    fn scale(&mut self, factor: f64) {
        self.x = scale_range(self.x, factor);
        self.y = scale_range(self.y, factor);
    }
}

fn scale_range(range: [f64; 2], factor: f64) -> [f64; 2] {
    let center = (range[0] + range[1]) / 2.0;
    let half = ((range[1] - range[0]) * factor / 2.0).max(MIN_SPAN / 2.0);
    [center - half, center + half]
}

/// Liang-Barsky clipping of the segment `a -> b` against the view box.
pub fn clip_segment(a: (f64, f64), b: (f64, f64), view: &ChartView) -> Option<[(f64, f64); 2]> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let edges = [
        (-dx, a.0 - view.x[0]),
        (dx, view.x[1] - a.0),
        (-dy, a.1 - view.y[0]),
        (dy, view.y[1] - a.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    if !(t0.is_finite() && t1.is_finite()) {
        return None;
    }
    Some([(a.0 + t0 * dx, a.1 + t0 * dy), (a.0 + t1 * dx, a.1 + t1 * dy)])
}

/// Range and granularity of one parameter slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub const SLOPE_SLIDER: SliderSpec = SliderSpec {
    label: "Slope",
    min: 0.0,
    max: 2.0,
    step: 0.01,
};

pub const INTERCEPT_SLIDER: SliderSpec = SliderSpec {
    label: "Intercept",
    min: 0.0,
    max: 100.0,
    step: 0.1,
};

impl SliderSpec {
    /// Move `value` by `steps` increments, snapped to the step grid and clamped.
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        let ticks = (value / self.step).round() + f64::from(steps);
        let snapped = (ticks * self.step).clamp(self.min, self.max);
        // Drop binary noise such as 0.51000000000000001.
        (snapped / self.step).round() * self.step
    }

    /// Position of `value` along the slider in `[0, 1]`.
    pub fn fraction(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Text gauge such as `[=====|-----]` for `width` inner cells.
    pub fn bar(&self, value: f64, width: usize) -> String {
        if width == 0 {
            return "[]".to_string();
        }
        let pos = (self.fraction(value) * (width - 1) as f64).round() as usize;
        let mut out = String::with_capacity(width + 2);
        out.push('[');
        for i in 0..width {
            out.push(match i.cmp(&pos) {
                std::cmp::Ordering::Less => '=',
                std::cmp::Ordering::Equal => '|',
                std::cmp::Ordering::Greater => '-',
            });
        }
        out.push(']');
        out
    }
}
