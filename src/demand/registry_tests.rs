/*
 * Unit tests for the demand registry
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod registry_tests {
    use crate::demand::DemandRegistry;
    use crate::shared::CommitOrigin::{External, Internal};
    use crate::shared::HallDirection::{Down, Up};

    #[test]
    fn test_hall_call_is_idempotent() {
        // Arrange
        let mut registry = DemandRegistry::new(5);

        // Act
        registry.add_hall_call(Up, 5);
        registry.add_hall_call(Up, 5);

        // Assert
        assert!(registry.has_hall_call(Up, 5));
        assert!(!registry.has_hall_call(Down, 5));
    }

    #[test]
    fn test_add_commit_overwrites_origin() {
        // Arrange
        let mut registry = DemandRegistry::new(5);

        // Act
        registry.add_commit(1, 7, Internal);
        registry.add_commit(1, 7, External);

        // Assert
        assert_eq!(registry.commits_of(1).get(&7), Some(&External));
        assert_eq!(registry.commits_of(1).len(), 1);
    }

    #[test]
    fn test_commits_are_per_elevator() {
        // Arrange
        let mut registry = DemandRegistry::new(5);

        // Act
        registry.add_commit(2, 9, Internal);

        // Assert
        assert!(registry.commits_of(1).is_empty());
        assert_eq!(registry.commits_of(2).get(&9), Some(&Internal));
    }

    #[test]
    fn test_clear_at_floor_removes_both_hall_directions_and_own_commit() {
        // Arrange
        let mut registry = DemandRegistry::new(5);
        registry.add_hall_call(Up, 6);
        registry.add_hall_call(Down, 6);
        registry.add_commit(1, 6, Internal);
        registry.add_commit(2, 6, External);

        // Act
        registry.clear_at_floor(1, 6);

        // Assert: hall demand for either direction is gone, whether or not
        // the clearing car was serving it; only car 1's commit is removed.
        assert!(!registry.has_hall_call(Up, 6));
        assert!(!registry.has_hall_call(Down, 6));
        assert!(registry.commits_of(1).is_empty());
        assert_eq!(registry.commits_of(2).get(&6), Some(&External));
    }

    #[test]
    fn test_clear_at_floor_leaves_other_floors_alone() {
        // Arrange
        let mut registry = DemandRegistry::new(5);
        registry.add_hall_call(Up, 6);
        registry.add_hall_call(Down, 12);
        registry.add_commit(1, 12, Internal);

        // Act
        registry.clear_at_floor(1, 6);

        // Assert
        assert!(registry.has_hall_call(Down, 12));
        assert_eq!(registry.commits_of(1).get(&12), Some(&Internal));
    }

    #[test]
    fn test_clear_commits_empties_only_that_elevator() {
        // Arrange
        let mut registry = DemandRegistry::new(5);
        registry.add_commit(4, 7, External);
        registry.add_commit(4, 15, Internal);
        registry.add_commit(1, 3, Internal);

        // Act
        registry.clear_commits(4);

        // Assert
        assert!(registry.commits_of(4).is_empty());
        assert_eq!(registry.commits_of(1).get(&3), Some(&Internal));
    }
}
