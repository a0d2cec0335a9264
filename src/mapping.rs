use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic purpose a column can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    X,
    Y,
    Z,
    Labels,
    Values,
    Group,
    Color,
    Size,
    Datasets,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::X,
        Role::Y,
        Role::Z,
        Role::Labels,
        Role::Values,
        Role::Group,
        Role::Color,
        Role::Size,
        Role::Datasets,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Role::X => "x",
            Role::Y => "y",
            Role::Z => "z",
            Role::Labels => "labels",
            Role::Values => "values",
            Role::Group => "group",
            Role::Color => "color",
            Role::Size => "size",
            Role::Datasets => "datasets",
        }
    }

    /// Roles that may bind an ordered list of columns.
    pub fn is_multi(self) -> bool {
        matches!(self, Role::Y | Role::Datasets)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value in a caller-supplied mapping object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingValue {
    One(String),
    Many(Vec<String>),
}

impl MappingValue {
    /// Column names with empty entries dropped.
    pub fn columns(&self) -> Vec<String> {
        let names: Vec<&String> = match self {
            MappingValue::One(s) => vec![s],
            MappingValue::Many(v) => v.iter().collect(),
        };
        names
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Mapping as received from the UI: key names may be synonyms and values
/// may be missing or empty.
pub type RawMapping = BTreeMap<String, Option<MappingValue>>;

/// Canonical role -> column table. Absent roles are not in the map;
/// present roles always carry at least one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxisMapping {
    bindings: BTreeMap<Role, Vec<String>>,
}

impl AxisMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a role. Single-column roles keep only the first column; an
    /// empty list leaves the role unbound.
    pub fn bind(&mut self, role: Role, mut columns: Vec<String>) {
        if columns.is_empty() {
            self.bindings.remove(&role);
            return;
        }
        if !role.is_multi() {
            columns.truncate(1);
        }
        self.bindings.insert(role, columns);
    }

    pub fn with(mut self, role: Role, column: &str) -> Self {
        self.bind(role, vec![column.to_string()]);
        self
    }

    pub fn with_many(mut self, role: Role, columns: &[&str]) -> Self {
        self.bind(role, columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn unbind(&mut self, role: Role) {
        self.bindings.remove(&role);
    }

    pub fn column(&self, role: Role) -> Option<&str> {
        self.bindings
            .get(&role)
            .and_then(|cols| cols.first())
            .map(String::as_str)
    }

    pub fn columns(&self, role: Role) -> &[String] {
        self.bindings.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_bound(&self, role: Role) -> bool {
        self.bindings.contains_key(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.bindings.keys().copied()
    }
}
