use crate::mapping::{AxisMapping, RawMapping, Role};

/// Accepted key names per role, in lookup order.
pub const ROLE_SYNONYMS: &[(Role, &[&str])] = &[
    (Role::X, &["x", "xAxis"]),
    (Role::Y, &["y", "yAxis"]),
    (Role::Z, &["z", "zAxis"]),
    (Role::Labels, &["labels", "label"]),
    (Role::Values, &["values", "value"]),
    (Role::Group, &["group", "category"]),
    (Role::Color, &["color"]),
    (Role::Size, &["size"]),
    (Role::Datasets, &["datasets"]),
];

/// Resolve a raw mapping into the canonical role table.
///
/// For each role the synonyms are tried in order and the first one holding a
/// non-empty value wins. Unresolved roles are simply absent; this never fails.
pub fn resolve_mapping(raw: &RawMapping) -> AxisMapping {
    let mut mapping = AxisMapping::new();

    for (role, keys) in ROLE_SYNONYMS {
        let columns = keys
            .iter()
            .filter_map(|key| raw.get(*key).and_then(Option::as_ref))
            .map(|value| value.columns())
            .find(|cols| !cols.is_empty());

        if let Some(columns) = columns {
            mapping.bind(*role, columns);
        }
    }

    log::debug!(
        "resolved mapping roles: {:?}",
        mapping.roles().map(Role::name).collect::<Vec<_>>()
    );
    mapping
}
