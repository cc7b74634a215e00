//! "Nice" tick generation for continuous axes.
//!
//! Increments are 1, 2 or 5 times a power of ten, chosen so roughly `count`
//! ticks fall inside the domain. Ticks are computed from integer multiples of
//! the increment, which keeps values like `0.3` free of accumulated error.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Upper bound on requested and generated ticks per axis.
pub const MAX_TICK_COUNT: usize = 1_000;

/// Integer tick bounds plus the increment; a negative increment means
/// "divide by `-inc`", used for sub-unit steps to avoid float drift.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10_f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let step = 10_f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Tick values for the domain `[start, stop]` (either orientation).
///
/// `count` is clamped to [`MAX_TICK_COUNT`].
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let count = count.min(MAX_TICK_COUNT);
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) || !inc.is_finite() || inc == 0.0 {
        return Vec::new();
    }

    // 1-2-5 rounding can overshoot `count` slightly, never by this much.
    let n = ((i2 - i1 + 1.0) as usize).min(MAX_TICK_COUNT * 2);
    let mut ticks: Vec<f64> = (0..n)
        .map(|index| {
            let multiple = i1 + index as f64;
            if inc < 0.0 { multiple / -inc } else { multiple * inc }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Distance between consecutive ticks for `[start, stop]` with `count` ticks.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let count = count.min(MAX_TICK_COUNT);
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return 0.0;
    }
    let (lo, hi) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let (_, _, inc) = tick_spec(lo, hi, count as f64);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}
