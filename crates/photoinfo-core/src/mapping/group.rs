//! Mapped and grouped views of a tag set.

use std::collections::BTreeMap;

use super::format::format_value;
use super::table::mapping_for;
use crate::tags::TagMap;
use crate::types::{ExifCategory, GroupedExifData, MappedExifData, MappedTag};

/// Flatten a tag set to tag name and description, dropping tags without a
/// description.
pub fn descriptions(tags: &TagMap) -> BTreeMap<String, String> {
    tags.iter()
        .filter_map(|(name, tag)| Some((name.clone(), tag.description.clone()?)))
        .collect()
}

/// Attach display names and formatted values to every mapped tag.
///
/// Unmapped tags and tags without a description are left out.
pub fn map_tags(tags: &TagMap) -> MappedExifData {
    tags.iter()
        .filter_map(|(name, tag)| {
            let mapping = mapping_for(name)?;
            let description = tag.description.as_deref()?;
            Some((
                name.clone(),
                MappedTag {
                    value: tag.value.clone(),
                    display_name: mapping.display_name.to_string(),
                    formatted_value: format_value(name, description),
                },
            ))
        })
        .collect()
}

fn empty_groups() -> GroupedExifData {
    ExifCategory::ALL
        .into_iter()
        .map(|category| (category, BTreeMap::new()))
        .collect()
}

/// Partition descriptions by category for display: keys are display names
/// and values are formatted.
///
/// All eight categories are present in the result, empty or not.
pub fn group_by_category(descriptions: &BTreeMap<String, String>) -> GroupedExifData {
    let mut grouped = empty_groups();
    for (name, description) in descriptions {
        let Some(mapping) = mapping_for(name) else {
            continue;
        };
        if let Some(group) = grouped.get_mut(&mapping.category) {
            group.insert(
                mapping.display_name.to_string(),
                format_value(name, description),
            );
        }
    }
    grouped
}

/// [`group_by_category`] with empty categories pruned.
pub fn group_for_display(descriptions: &BTreeMap<String, String>) -> GroupedExifData {
    let mut grouped = group_by_category(descriptions);
    grouped.retain(|_, group| !group.is_empty());
    grouped
}
