use crate::prelude::TextureTransform;
use crate::texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice};

/// Extension trait that enables pipeline chaining
pub trait PipeableTransform: TextureTransform + Sized {
    /// Chain this transform with another, creating a pipeline
    ///
    /// The intermediate buffer between the two transforms is allocated on
    /// [TextureTransform::prepare] with the input shape, and reused while the
    /// shape stays the same.
    ///
    /// # Example
    /// ```ignore
    /// // Create a pipeline: RGBA -> Grayscale -> Dithered
    /// let mut pipeline = Grayscale::default().pipe(OrderedDither::new(4, 2)?);
    ///
    /// // Use it as a single transform
    /// let output = pipeline.process(&input);
    /// ```
    fn pipe<T>(self, next: T) -> Pipeline<Self::Input, Self::Output, T::Output, Self, T>
    where
        T: TextureTransform<Input = Self::Output>,
        Self::Output: Default + Clone,
    {
        Pipeline::new(self, next)
    }
}

// Blanket implementation: all TextureTransforms are automatically pipeable
impl<T: TextureTransform> PipeableTransform for T {}

/// A pipeline that chains two transforms: A -> B -> C
///
/// The intermediate buffer B is owned by this struct and reused across invocations.
/// This allows efficient chaining without allocating intermediate buffers on each call.
///
/// Exposes only A -> C, hiding the intermediate type B.
pub struct Pipeline<A, B, C, T1, T2>
where
    T1: TextureTransform<Input = A, Output = B>,
    T2: TextureTransform<Input = B, Output = C>,
{
    t1: T1,
    t2: T2,
    b: Texture<B>,
}

impl<A, B, C, T1, T2> Pipeline<A, B, C, T1, T2>
where
    T1: TextureTransform<Input = A, Output = B>,
    T2: TextureTransform<Input = B, Output = C>,
    B: Default + Clone,
{
    /// Create a new transform pipeline, intermediate buffer is allocated on prepare
    pub fn new(t1: T1, t2: T2) -> Self {
        Self {
            t1,
            t2,
            b: Texture::new(0, 0),
        }
    }
}

impl<A, B, C, T1, T2> TextureTransform for Pipeline<A, B, C, T1, T2>
where
    T1: TextureTransform<Input = A, Output = B>,
    T2: TextureTransform<Input = B, Output = C>,
    B: Default + Clone,
{
    type Input = A;
    type Output = C;

    #[inline(always)]
    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, A>,
        output: TextureMutSlice<'o, C>,
    ) -> (TextureSlice<'i, A>, TextureMutSlice<'o, C>) {
        if self.b.shape() != input.shape() {
            self.prepare(input.shape(), output.shape());
        }
        let (input, _) = self.t1.apply(input, self.b.as_texture_mut_slice());
        let (_, output) = self.t2.apply(self.b.as_texture_slice(), output);
        (input, output)
    }

    #[inline(always)]
    fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
        if self.b.shape() != in_shape {
            self.b = Texture::with_shape(in_shape);
        }
        let b_shape = self.b.shape();
        self.t1.prepare(in_shape, b_shape);
        self.t2.prepare(b_shape, out_shape);
    }
}
