//! Dense grid of normalized terrain heights.

/// A `rows × cols` grid of height samples stored row-major.
///
/// The first index is the row of the grid, matching the `[row, col]` layout
/// terrain stores hand out. Samples are nominally in `[0, 1]` but are never
/// clamped, so intensity scaling or authoring tools may push them outside.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Heightfield {
    /// Creates a flat heightfield filled with `0.0`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a square, flat heightfield.
    pub fn square(resolution: usize) -> Self {
        Self::new(resolution, resolution)
    }

    /// Builds a heightfield by evaluating `f(row, col)` for every sample.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Edge length of a square heightfield (its column count).
    pub fn resolution(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major sample storage.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) out of bounds");
        self.data[row * self.cols + col]
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Copies the overlapping part of `src` into `self` with its first sample
    /// at `(row, col)`. Samples of `src` falling outside `self` are dropped.
    pub fn blit(&mut self, row: usize, col: usize, src: &Heightfield) {
        let rows = src.rows.min(self.rows.saturating_sub(row));
        let cols = src.cols.min(self.cols.saturating_sub(col));
        for r in 0..rows {
            let dst_start = (row + r) * self.cols + col;
            let src_start = r * src.cols;
            self.data[dst_start..dst_start + cols]
                .copy_from_slice(&src.data[src_start..src_start + cols]);
        }
    }

    /// Extracts a `rows × cols` window starting at `(row, col)`, clamped to
    /// the grid bounds.
    pub fn region(&self, row: usize, col: usize, rows: usize, cols: usize) -> Heightfield {
        let rows = rows.min(self.rows.saturating_sub(row));
        let cols = cols.min(self.cols.saturating_sub(col));
        Heightfield::from_fn(rows, cols, |r, c| self.get(row + r, col + c))
    }

    /// Bilinearly interpolated height at normalized coordinates.
    ///
    /// `u` runs along the columns and `v` along the rows; `(0, 0)` is the
    /// first sample and `(1, 1)` the last one. Coordinates are clamped to
    /// `[0, 1]`.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> f32 {
        let x = u.clamp(0.0, 1.0) * (self.cols.saturating_sub(1)) as f32;
        let y = v.clamp(0.0, 1.0) * (self.rows.saturating_sub(1)) as f32;

        let c0 = x.floor() as usize;
        let r0 = y.floor() as usize;
        let c1 = (c0 + 1).min(self.cols - 1);
        let r1 = (r0 + 1).min(self.rows - 1);

        let fx = x - c0 as f32;
        let fy = y - r0 as f32;

        let h00 = self.get(r0, c0);
        let h10 = self.get(r0, c1);
        let h01 = self.get(r1, c0);
        let h11 = self.get(r1, c1);

        let h0 = h00 * (1.0 - fx) + h10 * fx;
        let h1 = h01 * (1.0 - fx) + h11 * fx;

        h0 * (1.0 - fy) + h1 * fy
    }

    /// Resizes the grid to `rows × cols`, keeping the samples that still fit
    /// and zero-filling the rest.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let mut resized = Heightfield::new(rows, cols);
        resized.blit(0, 0, self);
        *self = resized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilinear_hits_samples_at_grid_points() {
        let field = Heightfield::from_fn(3, 3, |r, c| (r * 3 + c) as f32);
        assert_eq!(field.sample_bilinear(0.0, 0.0), 0.0);
        assert_eq!(field.sample_bilinear(1.0, 0.0), 2.0);
        assert_eq!(field.sample_bilinear(0.0, 1.0), 6.0);
        assert_eq!(field.sample_bilinear(0.5, 0.5), 4.0);
    }

    #[test]
    fn bilinear_interpolates_between_samples() {
        let field = Heightfield::from_fn(2, 2, |_, c| c as f32);
        assert!((field.sample_bilinear(0.25, 0.7) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut field = Heightfield::from_fn(3, 3, |r, c| (r + c) as f32);
        field.resize(2, 4);
        assert_eq!(field.get(1, 1), 2.0);
        assert_eq!(field.get(1, 3), 0.0);
    }

    #[test]
    fn blit_clips_to_bounds() {
        let mut field = Heightfield::square(3);
        field.blit(2, 2, &Heightfield::from_fn(2, 2, |_, _| 1.0));
        assert_eq!(field.get(2, 2), 1.0);
        assert_eq!(field.data().iter().filter(|h| **h == 1.0).count(), 1);
    }
}
