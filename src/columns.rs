//! Column planner – converts column weight specs into absolute x-offsets
//! and widths for a given content width.
//!
//! Weights are fractions of the content width and must sum to at most 1.0.
//! Specs are fixed at design time, so the planner does not re-validate the
//! sum at runtime.

/// Ordered list of named columns with fractional widths.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    columns: Vec<(&'static str, f32)>,
}

impl ColumnSpec {
    pub fn new(columns: &[(&'static str, f32)]) -> Self {
        Self {
            columns: columns.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One resolved column: absolute x-offset and width in points.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub x: f32,
    pub width: f32,
}

/// Resolved horizontal layout for every column of a spec.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub columns: Vec<Column>,
}

impl ColumnLayout {
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Computes and caches the [`ColumnLayout`] for a content width.
///
/// The layout is recomputed only when the content width changes (e.g. a new
/// page class with a different usable width); otherwise the cached layout is
/// reused for the remainder of the document.
#[derive(Debug, Clone)]
pub struct ColumnPlanner {
    spec: ColumnSpec,
    cached: Option<(f32, ColumnLayout)>,
}

impl ColumnPlanner {
    pub fn new(spec: ColumnSpec) -> Self {
        Self { spec, cached: None }
    }

    /// Resolve the layout for `content_width` starting at `margin_left`.
    pub fn layout(&mut self, margin_left: f32, content_width: f32) -> &ColumnLayout {
        let stale = match &self.cached {
            Some((w, _)) => *w != content_width,
            None => true,
        };
        if stale {
            let mut columns = Vec::with_capacity(self.spec.len());
            let mut x = margin_left;
            for &(name, weight) in &self.spec.columns {
                let width = content_width * weight;
                columns.push(Column { name, x, width });
                x += width;
            }
            self.cached = Some((content_width, ColumnLayout { columns }));
        }
        // cached is always Some here
        &self.cached.as_ref().unwrap().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ColumnSpec {
        ColumnSpec::new(&[
            ("sn", 0.05),
            ("desc", 0.5),
            ("qty", 0.1),
            ("unit", 0.15),
            ("total", 0.2),
        ])
    }

    #[test]
    fn offsets_are_strictly_increasing() {
        let mut planner = ColumnPlanner::new(spec());
        let layout = planner.layout(15.0, 565.28);
        for pair in layout.columns.windows(2) {
            assert!(
                pair[1].x > pair[0].x,
                "offsets must increase: {} then {}",
                pair[0].x,
                pair[1].x
            );
        }
    }

    #[test]
    fn intervals_do_not_overlap() {
        let mut planner = ColumnPlanner::new(spec());
        let layout = planner.layout(30.0, 1130.55);
        for pair in layout.columns.windows(2) {
            assert!(
                pair[0].x + pair[0].width <= pair[1].x + 1e-3,
                "column '{}' overlaps '{}'",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn widths_follow_weights() {
        let mut planner = ColumnPlanner::new(spec());
        let layout = planner.layout(15.0, 1000.0);
        let desc = layout.get("desc").unwrap();
        assert!((desc.width - 500.0).abs() < 1e-3);
        assert!((desc.x - (15.0 + 50.0)).abs() < 1e-3);
    }

    #[test]
    fn layout_is_cached_until_width_changes() {
        let mut planner = ColumnPlanner::new(spec());
        let first = planner.layout(15.0, 565.28).clone();
        // same width: identical object back
        assert_eq!(planner.layout(15.0, 565.28), &first);
        // new width: recomputed
        let wider = planner.layout(30.0, 1130.55).clone();
        assert_ne!(wider, first);
        assert!(wider.get("desc").unwrap().width > first.get("desc").unwrap().width);
    }
}
