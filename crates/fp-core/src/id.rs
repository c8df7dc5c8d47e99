use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Process-wide interner shared by every plan and history snapshot.
static IDS: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Identifier of a wall or room: an interned string, so copying plans for
/// undo snapshots never clones id text.
///
/// Imported documents keep the ids they were written with; new entities get
/// `<prefix>_<n>` ids from `Plan::fresh_id`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(Spur);

impl EntityId {
    pub fn intern(s: &str) -> Self {
        EntityId(IDS.get_or_intern(s))
    }

    /// `<prefix>_<n>`, e.g. `wall_3`.
    pub fn numbered(prefix: &str, n: usize) -> Self {
        Self::intern(&format!("{prefix}_{n}"))
    }

    pub fn as_str(&self) -> &str {
        IDS.resolve(&self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EntityId::intern(&s))
    }
}
