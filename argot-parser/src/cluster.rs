/// A run of short options (the `abc` in `-abc`) that is statically
/// guaranteed to hold at least one character.
#[derive(Debug, Clone, Copy)]
pub struct Cluster<'arg> {
    first: char,
    rest: &'arg str,
}

impl<'arg> Cluster<'arg> {
    #[inline]
    pub fn new(shorts: &'arg str) -> Option<Self> {
        let mut chars = shorts.chars();

        chars.next().map(|first| Self {
            first,
            rest: chars.as_str(),
        })
    }

    /// The whole point: the first option always exists
    #[inline]
    pub fn split_first(self) -> (char, &'arg str) {
        (self.first, self.rest)
    }
}
