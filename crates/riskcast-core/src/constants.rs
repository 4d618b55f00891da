/// Hard ceiling on parents per factor. CPT enumeration is 2^k, and parent
/// state combinations are packed into a `usize` bitmask.
pub const MAX_SUPPORTED_PARENTS: usize = 63;

/// Inclusive bounds for factor severity metadata.
pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 5;
