use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};

pub struct Math {}
impl Math {
    pub fn round_float_to_n_decimals(number: f64, decimals: i32) -> f64 {
        let multiplier = 10.0_f64.powi(decimals);
        (number * multiplier).round() / multiplier
    }

    pub fn mean(nums: &[f64]) -> f64 {
        let sum: f64 = nums.iter().sum();
        let len = nums.len() as f64;
        sum / len
    }

    pub fn variance(nums: &[f64]) -> f64 {
        let mean = Math::mean(nums);
        let mut sum = 0.0;
        for num in nums {
            sum += (num - mean).powi(2);
        }

        sum / nums.len() as f64
    }

    /// # slope of an ordinary least squares fit
    /// fits `y = intercept + slope * x` over the given `(x, y)` points.
    ///
    /// ## Arguments
    /// * `points` - the `(x, y)` samples
    ///
    /// ## Returns
    /// * `Some(f64)` - the slope of the fitted line
    /// * `None` - fewer than two points, or all `x` values identical
    pub fn linear_regression_slope(points: &[(f64, f64)]) -> Option<f64> {
        if points.len() < 2 {
            return None;
        }

        let xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
        if Math::variance(&xs) <= f64::EPSILON {
            return None;
        }

        let records = Array2::from_shape_vec((points.len(), 1), xs).ok()?;
        let targets = Array1::from_vec(points.iter().map(|(_, y)| *y).collect());
        let dataset = Dataset::new(records, targets);

        let fitted = LinearRegression::new().fit(&dataset).ok()?;
        let slope = fitted.params()[0];

        if slope.is_finite() {
            Some(slope)
        } else {
            None
        }
    }
}
