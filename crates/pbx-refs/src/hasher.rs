/// Domain-separated BLAKE3 hasher for identifier bodies.
///
/// The domain tag is fed ahead of the prefix and context.
pub struct IdentifierHasher {
    domain: &'static str,
}

impl IdentifierHasher {
    /// The hasher used for every generated reference.
    pub const REFERENCE: Self = Self {
        domain: "pbx-reference-v1",
    };

    /// Number of hex digits in a body.
    pub const BODY_LEN: usize = 20;

    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Uppercase hex body for `(prefix, context)`.
    pub fn body(&self, prefix: &str, context: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(prefix.as_bytes());
        hasher.update(b":");
        hasher.update(context.as_bytes());
        let digest = hasher.finalize();
        hex::encode_upper(&digest.as_bytes()[..Self::BODY_LEN / 2])
    }
}
