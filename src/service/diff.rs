//! Change-set computation for the optional children.
//!
//! Pure functions, no I/O: the orchestrator reads current state, asks
//! here what needs writing, then issues one statement per entry. Keeping
//! the comparison logic out of the transaction mechanics makes it
//! testable without a database.

use crate::model::Dimension;

/// A single conditional dimension write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionWrite {
    Width(f64),
    Height(f64),
}

/// Compare the stored dimension against the requested values.
///
/// Width and height are independent: each produces its own write only
/// when the stored value differs from the requested one. A `None`
/// request means the field was not sent and is left untouched.
#[allow(clippy::float_cmp)]
pub fn dimension_writes(
    stored: &Dimension,
    width: Option<f64>,
    height: Option<f64>,
) -> Vec<DimensionWrite> {
    let mut writes = Vec::new();

    if let Some(width) = width {
        if stored.width != width {
            writes.push(DimensionWrite::Width(width));
        }
    }
    if let Some(height) = height {
        if stored.height != height {
            writes.push(DimensionWrite::Height(height));
        }
    }

    writes
}

/// Title is the sole change-detection key for the location child: when
/// the stored title matches the requested one, the whole location row is
/// left untouched even if other fields differ in the request.
pub fn location_needs_update(stored_title: &str, requested_title: &str) -> bool {
    stored_title != requested_title
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Dimension {
        Dimension {
            dimension_id: 1,
            item_id: 1,
            width: 10.0,
            height: 20.0,
        }
    }

    #[test]
    fn test_no_change_no_writes() {
        assert!(dimension_writes(&stored(), Some(10.0), Some(20.0)).is_empty());
    }

    #[test]
    fn test_width_only() {
        let writes = dimension_writes(&stored(), Some(15.0), Some(20.0));
        assert_eq!(writes, vec![DimensionWrite::Width(15.0)]);
    }

    #[test]
    fn test_height_only() {
        let writes = dimension_writes(&stored(), Some(10.0), Some(25.0));
        assert_eq!(writes, vec![DimensionWrite::Height(25.0)]);
    }

    #[test]
    fn test_both_change() {
        let writes = dimension_writes(&stored(), Some(15.0), Some(25.0));
        assert_eq!(
            writes,
            vec![DimensionWrite::Width(15.0), DimensionWrite::Height(25.0)]
        );
    }

    #[test]
    fn test_absent_fields_untouched() {
        assert!(dimension_writes(&stored(), None, None).is_empty());
        let writes = dimension_writes(&stored(), None, Some(25.0));
        assert_eq!(writes, vec![DimensionWrite::Height(25.0)]);
    }

    #[test]
    fn test_title_is_the_only_key() {
        assert!(!location_needs_update("warehouse", "warehouse"));
        assert!(location_needs_update("warehouse", "depot"));
    }
}
