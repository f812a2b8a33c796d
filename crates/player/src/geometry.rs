// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};

/// Horizontal extent of the progress bar in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left:  f64,
    pub width: f64,
}

impl Bounds {
    pub const fn new(left: f64, width: f64) -> Self { Self { left, width } }

    /// Fraction (0.0 to 1.0) of the bar at client x-coordinate `x`.
    ///
    /// Returns `None` for a collapsed or unmeasured bar.
    pub fn fraction_at(&self, x: f64) -> Option<f64> {
        if !(self.width.is_finite() && self.width > 0.0) || !x.is_finite() {
            return None;
        }
        Some(((x - self.left) / self.width).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_half() {
        let bar = Bounds::new(40.0, 400.0);
        assert!((bar.fraction_at(240.0).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn outside_points_clamp() {
        let bar = Bounds::new(40.0, 400.0);
        assert!(bar.fraction_at(0.0).unwrap().abs() < f64::EPSILON);
        assert!((bar.fraction_at(1000.0).unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn collapsed_bar_has_no_fraction() {
        assert_eq!(Bounds::new(0.0, 0.0).fraction_at(10.0), None);
        assert_eq!(Bounds::new(0.0, f64::NAN).fraction_at(10.0), None);
    }
}
