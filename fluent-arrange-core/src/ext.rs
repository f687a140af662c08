// Inline configuration helper

/// Configure a value in place and keep using it.
///
/// Not part of the prelude: the blanket method shadows `&self` methods named
/// `with`, such as `LocalKey::with`. Import it by path.
///
/// ```
/// use fluent_arrange_core::With;
///
/// #[derive(Default)]
/// struct Foo {
///     id: u32,
/// }
///
/// let foo = Foo::default().with(|foo| foo.id = 1);
/// assert_eq!(foo.id, 1);
/// ```
pub trait With: Sized {
    fn with(mut self, configure: impl FnOnce(&mut Self)) -> Self {
        configure(&mut self);
        self
    }
}

impl<T> With for T {}
