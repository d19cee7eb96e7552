use std::ops::Range;

use tracing::trace;

pub const DEFAULT_MOVING_AVERAGE_SPAN: usize = 5;

/// Replaces every sample by the mean of a centered window of `span` raw samples.
///
/// Near the ends the window is clipped to the series instead of wrapping or
/// reflecting, so edge values average fewer samples. The length never changes.
pub fn moving_average(values: &mut [f64], span: usize) {
    if span <= 1 || values.len() < 2 {
        return;
    }
    let right = span / 2;
    let left = span - 1 - right;

    let mut prefix = Vec::with_capacity(values.len() + 1);
    prefix.push(0.0);
    let mut running = 0.0;
    for value in values.iter() {
        running += value;
        prefix.push(running);
    }

    let last = values.len() - 1;
    for (index, value) in values.iter_mut().enumerate() {
        let from = index.saturating_sub(left);
        let to = (index + right).min(last);
        *value = (prefix[to + 1] - prefix[from]) / (to + 1 - from) as f64;
    }
}

/// Output of [`shrink`]: the resampled x axis and one column per y series.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    pub x: Vec<f64>,
    pub ys: Vec<Vec<f64>>,
}

/// Downsamples to exactly `count` points while keeping peaks and troughs visible.
///
/// The x axis becomes `count` equally spaced values from the first to the
/// last input x. Endpoints are copied verbatim. Every interior bucket
/// collects the not yet consumed input points up to its x and emits its
/// minimum when the previous output lies above the bucket, its maximum otherwise.
/// Inputs with no more than `count` points (or `count == 0`) are returned unchanged.
pub fn shrink<S: AsRef<[f64]>>(x: &[f64], ys: &[S], count: usize) -> Resampled {
    let len = x.len();
    if len <= count || count == 0 {
        return Resampled {
            x: x.to_vec(),
            ys: ys.iter().map(|y| y.as_ref().to_vec()).collect(),
        };
    }
    if count == 1 {
        return Resampled {
            x: vec![x[0]],
            ys: ys.iter().map(|y| y.as_ref()[..1].to_vec()).collect(),
        };
    }

    let x_out = equally_spaced(x[0], x[len - 1], count);
    let buckets = bucket_ranges(x, &x_out);
    let ys_out = ys
        .iter()
        .map(|y| shrink_column(y.as_ref(), &buckets, count))
        .collect();

    trace!(from = len, to = count, "series shrunk");
    Resampled { x: x_out, ys: ys_out }
}

fn equally_spaced(first: f64, last: f64, count: usize) -> Vec<f64> {
    let step = (last - first) / (count - 1) as f64;
    let mut out: Vec<f64> = (0..count).map(|index| first + index as f64 * step).collect();
    out[count - 1] = last;
    out
}

/// Input index ranges feeding the interior buckets `1..count - 1`.
///
/// The first and the last input point are reserved for the endpoints.
fn bucket_ranges(x: &[f64], x_out: &[f64]) -> Vec<Range<usize>> {
    let last = x.len() - 1;
    let mut cursor = 1;
    x_out[1..x_out.len() - 1]
        .iter()
        .map(|limit| {
            let from = cursor;
            while cursor < last && x[cursor] <= *limit {
                cursor += 1;
            }
            from..cursor
        })
        .collect()
}

fn shrink_column(y: &[f64], buckets: &[Range<usize>], count: usize) -> Vec<f64> {
    // Columns not aligned with the x axis cannot be bucketed.
    if y.len() <= count || buckets.last().is_some_and(|bucket| bucket.end >= y.len()) {
        return y.to_vec();
    }
    let mut out = Vec::with_capacity(count);
    out.push(y[0]);

    for (offset, bucket) in buckets.iter().enumerate() {
        let index = offset + 1;
        let previous = out[index - 1];
        let Some((min, max)) = extrema(&y[bucket.clone()]) else {
            out.push(previous);
            continue;
        };

        // No trend before the first bucket: starting inside its span takes the middle.
        let value = if previous > max {
            min
        } else if index == 1 && previous >= min {
            (min + max) / 2.0
        } else {
            max
        };
        out.push(value);
    }

    out.push(y[y.len() - 1]);
    out
}

fn extrema(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(min, max), value| {
        (min.min(value), max.max(value))
    }))
}
