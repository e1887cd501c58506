use crate::semantic::{ResourceKind, Scene};

/// A call-like reference found in a property value, e.g. `ExtResource("1_x")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRef<'a> {
    pub kind: ResourceKind,
    pub id: &'a str,
    /// Byte offset of the tag in the scanned value.
    pub offset: usize,
}

/// First `<tag>("<id>")` in `value` for the given kind. Whitespace is allowed
/// around the quoted argument.
pub fn find_reference(value: &str, kind: ResourceKind) -> Option<ResourceRef<'_>> {
    let tag = kind.tag();
    let mut from = 0;
    while let Some(found) = value[from..].find(tag) {
        let offset = from + found;
        let after_tag = offset + tag.len();
        if let Some(id) = quoted_argument(&value[after_tag..]) {
            return Some(ResourceRef { kind, id, offset });
        }
        from = after_tag;
    }
    None
}

fn quoted_argument(rest: &str) -> Option<&str> {
    let rest = rest.strip_prefix('(')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let end = rest.find('"')?;
    let (id, tail) = rest.split_at(end);
    tail[1..].trim_start().starts_with(')').then_some(id)
}

/// Resolves a resource reference in `value`.
///
/// The first `ExtResource("<id>")` is tried first and resolves to the
/// resource's path. When there is none, or its id is unknown or has no path,
/// the first `SubResource("<id>")` resolves to `SubResource(<type>)`. Returns
/// `None` otherwise; callers then show the raw value.
pub fn resolve_resource_reference(value: &str, scene: &Scene) -> Option<String> {
    let external = find_reference(value, ResourceKind::External).and_then(|reference| {
        scene
            .ext_resources
            .get(reference.id)
            .and_then(|resource| resource.path.clone())
            .filter(|path| !path.is_empty())
    });
    if external.is_some() {
        return external;
    }

    let reference = find_reference(value, ResourceKind::Embedded)?;
    scene
        .sub_resources
        .get(reference.id)
        .map(|resource| format!("SubResource({})", resource.resource_type))
}
