use crate::media::MediaId;
use crate::registry::MediaRegistry;

/// Moves `source` next to `target`, then compacts the registry.
///
/// Room is made by shifting every other item at or past the insertion point
/// up by one, so no fractional orders are needed. Unknown ids and
/// `source == target` leave the registry untouched and return `false`.
pub fn move_item(
    registry: &mut MediaRegistry,
    source: MediaId,
    target: MediaId,
    insert_before: bool,
) -> bool {
    if source == target {
        return false;
    }
    let target_order = match (registry.get(source), registry.get(target)) {
        (Some(_), Some(t)) => t.order,
        _ => return false,
    };

    let new_order = if insert_before {
        target_order
    } else {
        target_order + 1
    };

    for item in registry.items_mut() {
        if item.id == source {
            item.order = new_order;
        } else if item.order >= new_order {
            item.order += 1;
        }
    }

    registry.normalize();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;

    fn abc() -> (MediaRegistry, MediaId, MediaId, MediaId) {
        let mut reg = MediaRegistry::new();
        let a = reg.add(MediaKind::Image, "A", None).id;
        let b = reg.add(MediaKind::Image, "B", None).id;
        let c = reg.add(MediaKind::Image, "C", None).id;
        (reg, a, b, c)
    }

    fn sequence(reg: &MediaRegistry) -> Vec<(String, usize)> {
        let mut items = reg.list();
        items.sort_by_key(|i| i.order);
        items.into_iter().map(|i| (i.source_ref, i.order)).collect()
    }

    fn names(reg: &MediaRegistry) -> Vec<String> {
        sequence(reg).into_iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn last_before_first() {
        let (mut reg, a, _, c) = abc();
        assert!(move_item(&mut reg, c, a, true));
        assert_eq!(
            sequence(&reg),
            vec![("C".to_string(), 0), ("A".to_string(), 1), ("B".to_string(), 2)]
        );
    }

    #[test]
    fn first_after_last() {
        let (mut reg, a, _, c) = abc();
        assert!(move_item(&mut reg, a, c, false));
        assert_eq!(names(&reg), vec!["B", "C", "A"]);
    }

    #[test]
    fn first_after_middle() {
        let (mut reg, a, b, _) = abc();
        assert!(move_item(&mut reg, a, b, false));
        assert_eq!(names(&reg), vec!["B", "A", "C"]);
    }

    #[test]
    fn middle_before_its_successor_keeps_sequence() {
        let (mut reg, _, b, c) = abc();
        assert!(move_item(&mut reg, b, c, true));
        assert_eq!(names(&reg), vec!["A", "B", "C"]);
    }

    #[test]
    fn unknown_or_self_moves_are_ignored() {
        let (mut reg, a, _, c) = abc();
        let before = sequence(&reg);
        assert!(!move_item(&mut reg, a, a, true));
        assert!(!move_item(&mut reg, MediaId(77), c, true));
        assert!(!move_item(&mut reg, a, MediaId(77), false));
        assert_eq!(sequence(&reg), before);
    }

    #[test]
    fn move_after_removal_still_lands_dense() {
        let (mut reg, a, b, c) = abc();
        reg.remove(b);
        // no normalize yet: orders are A:0, C:2
        assert!(move_item(&mut reg, a, c, false));
        assert_eq!(sequence(&reg), vec![("C".to_string(), 0), ("A".to_string(), 1)]);
    }
}
