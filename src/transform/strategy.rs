use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::texture::Shape;

/// Row dispatch strategy shared by every transform.
///
/// Each output row only depends on the immutable input, so rows can be
/// computed in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Resolved to [Strategy::Seq] or [Strategy::Par] on prepare.
    #[default]
    Auto,
    /// Single threaded, row by row.
    Seq,
    /// Rows distributed on the rayon thread pool.
    Par,
}

impl Strategy {
    /// Detect best-fit strategy for an image shape.
    pub fn auto(shape_hint: Shape) -> Self {
        let (width, height) = shape_hint;
        let count = width * height;

        if width < 450 || count < 202500 || rayon::current_num_threads() == 1 {
            return Strategy::Seq;
        }
        Strategy::Par
    }

    /// Replace [Strategy::Auto] with a concrete strategy.
    pub fn resolve(self, shape_hint: Shape) -> Self {
        match self {
            Strategy::Auto => Strategy::auto(shape_hint),
            strategy => strategy,
        }
    }

    /// Run `row_fn(y, row)` over every `width` sized row of `out_buf`.
    ///
    /// Empty buffers (zero width or height) are a no-op.
    #[inline]
    pub fn for_each_row<T, F>(self, out_buf: &mut [T], width: usize, row_fn: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        if width == 0 || out_buf.is_empty() {
            return;
        }
        match self {
            Strategy::Par => out_buf
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| row_fn(y, row)),
            Strategy::Seq | Strategy::Auto => out_buf
                .chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| row_fn(y, row)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Auto => "auto",
            Strategy::Seq => "seq",
            Strategy::Par => "par",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
