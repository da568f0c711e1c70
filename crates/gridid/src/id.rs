use core::fmt;

/// A federation-wide job identifier handed out by the directory service.
///
/// The raw value `0` is reserved as [`CrossClusterJobId::NONE`] and is never
/// the result of a successful allocation. Any other value is unique across
/// the federation for as long as the directory keeps it allocated.
///
/// # Example
///
/// ```
/// use gridid::CrossClusterJobId;
///
/// let id = CrossClusterJobId::from_raw(42);
/// assert!(!id.is_none());
/// assert_eq!(id.to_raw(), 42);
/// assert!(CrossClusterJobId::NONE.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct CrossClusterJobId(u32);

impl CrossClusterJobId {
    /// Sentinel meaning "no identifier allocated".
    pub const NONE: Self = Self(0);

    /// Wraps a raw identifier without validation.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Returns `true` for the reserved sentinel.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for CrossClusterJobId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<CrossClusterJobId> for u32 {
    fn from(id: CrossClusterJobId) -> Self {
        id.0
    }
}

impl fmt::Display for CrossClusterJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Position of a member cluster in the federation table.
///
/// Unlike [`CrossClusterJobId`], every value is meaningful, including `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct ClusterIndex(i32);

impl ClusterIndex {
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> i32 {
        self.0
    }
}

impl From<i32> for ClusterIndex {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<ClusterIndex> for i32 {
    fn from(idx: ClusterIndex) -> Self {
        idx.0
    }
}

impl fmt::Display for ClusterIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
