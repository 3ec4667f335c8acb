//! Body placeholder assignment.
//!
//! Layouts can expose any number of body placeholders, and the mapped
//! content count rarely matches. This module decides which content goes
//! where: images are kept together near their original position, and
//! overflowing text stacks into the last placeholder instead of being
//! dropped.

use slidesmith_core::Content;

/// Assign content indices to body placeholders
///
/// Returns one group of content indices per placeholder, in placeholder
/// order. Groups may be empty when content underfills the layout. Every
/// input index appears in exactly one group, except with zero
/// placeholders where nothing can be assigned.
pub fn assign_content(contents: &[Content], placeholder_count: usize) -> Vec<Vec<usize>> {
    if placeholder_count == 0 {
        return Vec::new();
    }
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); placeholder_count];
    if placeholder_count == 1 {
        groups[0] = (0..contents.len()).collect();
        return groups;
    }
    if contents.len() == placeholder_count {
        for index in 0..contents.len() {
            groups[index].push(index);
        }
        return groups;
    }
    if contents.len() < placeholder_count {
        log::warn!(
            "{} content groups for {} placeholders, trailing placeholders stay empty",
            contents.len(),
            placeholder_count
        );
        for index in 0..contents.len() {
            groups[index].push(index);
        }
        return groups;
    }

    let images: Vec<usize> = (0..contents.len())
        .filter(|index| contents[*index].is_image())
        .collect();
    let texts: Vec<usize> = (0..contents.len())
        .filter(|index| !contents[*index].is_image())
        .collect();

    match images.first() {
        Some(&first_image) => {
            // All images share one placeholder, chosen by where the first
            // image sat in the original order, clamped to the last slot.
            let image_slot = first_image.min(placeholder_count - 1);
            groups[image_slot] = images;
            let remaining: Vec<usize> = (0..placeholder_count)
                .filter(|slot| *slot != image_slot)
                .collect();
            distribute(texts, &remaining, &mut groups);
        }
        None => {
            let slots: Vec<usize> = (0..placeholder_count).collect();
            distribute(texts, &slots, &mut groups);
        }
    }
    groups
}

/// Fill `slots` 1:1 in order, stacking leftover content into the last slot
fn distribute(content_indices: Vec<usize>, slots: &[usize], groups: &mut [Vec<usize>]) {
    let last_slot = match slots.last() {
        Some(slot) => *slot,
        None => return,
    };
    for (position, content_index) in content_indices.into_iter().enumerate() {
        let slot = slots.get(position).copied().unwrap_or(last_slot);
        groups[slot].push(content_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidesmith_core::{ImageContent, TextContent};

    fn text() -> Content {
        Content::Text(TextContent::plain("sample"))
    }

    fn image() -> Content {
        Content::Image(ImageContent::new("https://example.com/a.png", 640, 480))
    }

    #[test]
    fn test_single_placeholder_takes_everything() {
        let contents = vec![text(), image(), text()];
        assert_eq!(assign_content(&contents, 1), [vec![0, 1, 2]]);
    }

    #[test]
    fn test_equal_counts_assign_one_to_one() {
        let contents = vec![text(), image(), text()];
        assert_eq!(assign_content(&contents, 3), [vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_overflow_groups_image_at_its_position() {
        let contents = vec![text(), image(), text()];
        assert_eq!(assign_content(&contents, 2), [vec![0, 2], vec![1]]);
    }

    #[test]
    fn test_overflow_without_images_stacks_tail_into_last() {
        let contents = vec![text(), text(), text(), text()];
        assert_eq!(assign_content(&contents, 2), [vec![0], vec![1, 2, 3]]);
    }

    #[test]
    fn test_leading_image_keeps_first_slot() {
        let contents = vec![image(), text(), text()];
        assert_eq!(assign_content(&contents, 2), [vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_image_slot_clamps_to_last_placeholder() {
        let contents = vec![text(), text(), image(), text()];
        assert_eq!(assign_content(&contents, 2), [vec![0, 1, 3], vec![2]]);
    }

    #[test]
    fn test_multiple_images_share_one_slot() {
        let contents = vec![image(), image(), image()];
        assert_eq!(assign_content(&contents, 2), [vec![0, 1, 2], vec![]]);
    }

    #[test]
    fn test_underfill_leaves_trailing_placeholders_empty() {
        let contents = vec![text()];
        assert_eq!(assign_content(&contents, 3), [vec![0], vec![], vec![]]);
    }

    #[test]
    fn test_no_content_is_lost_on_overflow() {
        let contents = vec![text(), image(), text(), image(), text(), text()];
        let groups = assign_content(&contents, 3);
        let mut assigned: Vec<usize> = groups.into_iter().flatten().collect();
        assigned.sort_unstable();
        assert_eq!(assigned, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_placeholders_yield_no_groups() {
        let contents = vec![text()];
        assert!(assign_content(&contents, 0).is_empty());
    }
}
