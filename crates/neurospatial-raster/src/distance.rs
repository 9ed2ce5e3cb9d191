//! Exact Euclidean distance to the nearest label
//!
//! Separable squared distance transform: a forward/backward scan down each
//! column gives the vertical distance to the nearest labeled pixel, then
//! each row takes the lower envelope of the column parabolas. Both passes
//! are linear in the number of pixels, so the whole transform is O(W·H).

use neurospatial_core::LabelMap;

/// Squared distance of a pixel that has no labeled pixel anywhere.
pub const UNREACHABLE: u64 = u64::MAX;

/// Squared Euclidean distance from every pixel to the nearest nonzero pixel
///
/// Labeled pixels hold 0. An empty map holds [`UNREACHABLE`] everywhere.
pub fn squared_distance_to_labels(map: &LabelMap) -> Vec<u64> {
    let (w, h) = (map.width() as usize, map.height() as usize);
    let data = map.data();

    // Vertical distance to the nearest labeled pixel in the same column
    let mut column: Vec<Option<u64>> = vec![None; w * h];
    for x in 0..w {
        let mut last: Option<usize> = None;
        for y in 0..h {
            if data[y * w + x] != 0 {
                last = Some(y);
            }
            column[y * w + x] = last.map(|ly| (y - ly) as u64);
        }
        let mut next: Option<usize> = None;
        for y in (0..h).rev() {
            if data[y * w + x] != 0 {
                next = Some(y);
            }
            if let Some(ny) = next {
                let below = (ny - y) as u64;
                let slot = &mut column[y * w + x];
                *slot = Some(slot.map_or(below, |above| above.min(below)));
            }
        }
    }

    let mut out = vec![UNREACHABLE; w * h];
    let mut envelope = LowerEnvelope::with_capacity(w);
    for y in 0..h {
        let row = &column[y * w..(y + 1) * w];
        envelope.fill(row, &mut out[y * w..(y + 1) * w]);
    }
    out
}

/// Lower envelope of parabolas `(x - q)² + g(q)²` over one row
struct LowerEnvelope {
    /// Apex positions of the parabolas on the envelope
    sites: Vec<usize>,
    /// Left boundary of each envelope segment
    bounds: Vec<f64>,
}

impl LowerEnvelope {
    fn with_capacity(n: usize) -> Self {
        Self {
            sites: Vec::with_capacity(n),
            bounds: Vec::with_capacity(n + 1),
        }
    }

    fn fill(&mut self, g: &[Option<u64>], out: &mut [u64]) {
        self.sites.clear();
        self.bounds.clear();
        let f = |q: usize| g[q].map(|d| d * d);

        for (q, fq) in (0..g.len()).filter_map(|q| f(q).map(|fq| (q, fq))) {
            loop {
                let Some(&p) = self.sites.last() else {
                    self.sites.push(q);
                    self.bounds.push(f64::NEG_INFINITY);
                    break;
                };
                let fp = f(p).unwrap_or(0);
                let s = intersection(p, fp, q, fq);
                if self.sites.len() > 1 && s <= self.bounds[self.bounds.len() - 1] {
                    self.sites.pop();
                    self.bounds.pop();
                    continue;
                }
                self.sites.push(q);
                self.bounds.push(s);
                break;
            }
        }

        if self.sites.is_empty() {
            out.fill(UNREACHABLE);
            return;
        }

        let mut k = 0;
        for (x, slot) in out.iter_mut().enumerate() {
            while k + 1 < self.sites.len() && self.bounds[k + 1] <= x as f64 {
                k += 1;
            }
            let q = self.sites[k];
            let dx = x.abs_diff(q) as u64;
            *slot = dx * dx + f(q).unwrap_or(0);
        }
    }
}

/// Abscissa where the parabolas rooted at `p` and `q` (`p < q`) cross.
fn intersection(p: usize, fp: u64, q: usize, fq: u64) -> f64 {
    let (p, q) = (p as f64, q as f64);
    ((fq as f64 + q * q) - (fp as f64 + p * p)) / (2.0 * (q - p))
}
