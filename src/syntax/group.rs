//! Display groups
//!
//! A group is the small integer a grammar assigns to a display style such
//! as `comment` or `constant.string`. Names are interned once per process
//! so that every grammar using `comment` gets the same ID, and the rendering
//! layer can map IDs back to names to pick colors.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;

/// Interned display group
///
/// Group 0 ([`Group::NONE`]) means "no highlight".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Group(u16);

/// Name table backing [`Group`]
///
/// IDs are never freed or renumbered.
struct GroupTable {
    ids: HashMap<String, Group>,
    names: Vec<String>,
}

impl GroupTable {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            // Slot 0 is reserved for Group::NONE
            names: vec![String::new()],
        }
    }

    fn intern(&mut self, name: &str) -> Group {
        if let Some(&group) = self.ids.get(name) {
            return group;
        }
        let Ok(id) = u16::try_from(self.names.len()) else {
            tracing::warn!("Group table is full, '{}' will not be highlighted", name);
            return Group::NONE;
        };
        let group = Group(id);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), group);
        group
    }
}

static GROUPS: Lazy<RwLock<GroupTable>> = Lazy::new(|| RwLock::new(GroupTable::new()));

impl Group {
    /// No highlight
    pub const NONE: Group = Group(0);

    /// Get the group for `name`, allocating a new ID the first time it is seen
    pub fn intern(name: &str) -> Group {
        // Fast path: most names are already known after the first grammar
        if let Some(&group) = GROUPS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ids
            .get(name)
        {
            return group;
        }
        GROUPS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .intern(name)
    }

    /// Look up an already interned group without allocating
    pub fn lookup(name: &str) -> Option<Group> {
        GROUPS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ids
            .get(name)
            .copied()
    }

    /// Name this group was interned under (empty for [`Group::NONE`])
    pub fn name(&self) -> String {
        let table = GROUPS.read().unwrap_or_else(PoisonError::into_inner);
        table
            .names
            .get(usize::from(self.0))
            .cloned()
            .unwrap_or_default()
    }

    /// Raw numeric ID
    pub fn id(&self) -> u16 {
        self.0
    }

    /// Check if this is the "no highlight" group
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "default")
        } else {
            write!(f, "{}", self.name())
        }
    }
}
