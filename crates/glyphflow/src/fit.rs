//! Font-size fitting against the measurement oracle.
//!
//! The solver walks sizes linearly from the maximum down to the minimum
//! and returns the first size whose benchmark string the oracle reports as
//! fitting both axes. The linear order is contractual, not an
//! implementation detail: when several sizes would fit, the largest wins,
//! and a non-monotonic oracle still gets probed in a predictable order. Do
//! not swap in a binary search.
//!
//! When nothing in range fits, the solver degrades to the minimum size
//! rather than failing.

use glyphflow_core::{FONT_SIZE_MAX, Font, MeasureOracle, Size};
use tracing::trace;

use crate::error::{Error, Result};

/// Benchmark string probed by the solver at each candidate size.
pub const BENCHMARK_TEXT: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ abcdefghijklmnopqrstuvwxyz";

/// Fixed font used for the line-advance probe in flow layout.
///
/// One benchmark font for every group keeps multi-font paragraphs
/// vertically aligned.
pub const BENCHMARK_FONT: Font = Font::new(0);

/// Find the largest size in `[min_size, max_size]` that fits `bounds`.
///
/// Preconditions (fatal): `min_size <= max_size` and both within the legal
/// range. Bottoms out at `min_size` when no size fits.
pub fn solve(
    oracle: &dyn MeasureOracle,
    bounds: Size,
    font: Font,
    min_size: u32,
    max_size: u32,
) -> Result<u32> {
    if min_size > max_size {
        return Err(Error::FontSizeRange {
            min: min_size,
            max: max_size,
        });
    }
    if max_size > FONT_SIZE_MAX {
        return Err(Error::FontSizeOutOfRange { size: max_size });
    }

    let mut size = max_size;
    loop {
        let fits_width = oracle.fits(BENCHMARK_TEXT, size, font, bounds);
        let measured = oracle.measure(BENCHMARK_TEXT, size, font, bounds);
        if fits_width && measured.height <= bounds.height {
            trace!(size, "fit solver settled");
            return Ok(size);
        }
        if size == min_size {
            trace!(size, "fit solver bottomed out at minimum");
            return Ok(min_size);
        }
        size -= 1;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use glyphflow_core::FixedMetricsOracle;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn result_always_within_bounds(
            min in 0u32..50,
            span in 0u32..50,
            width in 1.0f32..2000.0,
            height in 1.0f32..2000.0,
        ) {
            let max = min + span;
            let oracle = FixedMetricsOracle::new();
            let size = solve(&oracle, Size::new(width, height), Font::default(), min, max).unwrap();
            prop_assert!(size >= min);
            prop_assert!(size <= max);
        }
    }
}
