use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Image URLs registered so far.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// The photo shown by a tile, named by its URL.
///
/// Passed around by value. The URL itself is stored once and compared by
/// index.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(Spur);

impl ImageId {
    /// Id for `url`, registering the URL on first sight.
    pub fn intern(url: &str) -> Self {
        ImageId(INTERNER.get_or_intern(url))
    }

    /// Id for a URL already on the page. A drag payload naming an unknown
    /// URL yields `None` and is not registered.
    pub fn lookup(url: &str) -> Option<Self> {
        INTERNER.get(url).map(ImageId)
    }

    /// The image URL, as the host's `<img src>` expects it.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({:?})", self.as_str())
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ImageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ImageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ImageId::intern(&s))
    }
}
