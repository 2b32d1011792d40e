// File: crates/dash-core/src/scale.rs
// Summary: Linear domain-to-pixel scale with inversion, clamping and tick generation.

/// Maps a numeric domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub clamp: bool,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self { domain: (0.0, 1.0), range: (0.0, 1.0), clamp: false }
    }
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range, clamp: false }
    }

    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    pub fn set_domain(&mut self, lo: f64, hi: f64) {
        self.domain = (lo, hi);
    }

    pub fn set_range(&mut self, lo: f64, hi: f64) {
        self.range = (lo, hi);
    }

    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        // Degenerate domains map everything to the range start.
        let mut t = if span.abs() < 1e-12 { 0.0 } else { (v - d0) / span };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        r0 + t * (r1 - r0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        let mut t = if span.abs() < 1e-12 { 0.0 } else { (px - r0) / span };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        d0 + t * (d1 - d0)
    }

    /// Roughly `count` round-valued ticks inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let step = tick_step(lo, hi, count);
        if !step.is_finite() || step <= 0.0 {
            return vec![lo];
        }
        let start = (lo / step).ceil();
        let stop = (hi / step).floor();
        let mut out = Vec::new();
        let mut i = start;
        while i <= stop {
            out.push(i * step);
            i += 1.0;
        }
        out
    }
}

/// Step between ticks: a power of ten times 1, 2 or 5.
pub fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let span = hi - lo;
    if count == 0 || span <= 0.0 {
        return f64::NAN;
    }
    let raw = span / count as f64;
    let mut step = 10f64.powf(raw.log10().floor());
    let err = raw / step;
    if err >= 7.07 {
        step *= 10.0;
    } else if err >= 3.16 {
        step *= 5.0;
    } else if err >= 1.41 {
        step *= 2.0;
    }
    step
}
