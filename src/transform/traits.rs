use crate::texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice};

/// Core trait for applying a transform to data.
///
/// Uses associated types for Input/Output to ensure type safety when chaining.
/// Lifetimes are method-local, allowing flexible borrowing without lifetime hell.
///
/// Implementations read only from `input` and write every pixel of `output`;
/// both are expected to share the same shape.
pub trait TextureTransform: Sized {
    type Input;
    type Output;

    /// Apply the transform from input texture to output texture
    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    );

    /// Preparation step that can inspect data shape before transformation
    fn prepare(&mut self, in_shape: Shape, out_shape: Shape);

    /// Allocate an output texture with the input shape and fill it.
    fn process(&mut self, input: &Texture<Self::Input>) -> Texture<Self::Output>
    where
        Self::Output: Default + Clone,
    {
        let mut output = Texture::with_shape(input.shape());
        self.prepare(input.shape(), output.shape());
        self.apply(input.as_texture_slice(), output.as_texture_mut_slice());
        output
    }
}
